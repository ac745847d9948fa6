use std::fmt;

/// Percentage expressed in **basis points** (1% = 100 bp).
///
/// Two fractional digits of a percentage are enough for every split the
/// engine accepts (`33.33%` is `3333` bp), and keeping the value integral
/// lets the "sum to 100" check compare exact numbers.
///
/// ```rust
/// use engine::BasisPoints;
///
/// assert_eq!(BasisPoints::new(3333).to_string(), "33.33");
/// assert_eq!(BasisPoints::new(9900).to_string(), "99");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BasisPoints(i64);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);
    /// 100%.
    pub const WHOLE: BasisPoints = BasisPoints(10_000);

    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BasisPoints {
    /// Prints the percentage without trailing zeros (`99`, `33.5`, `33.33`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        match frac {
            0 => write!(f, "{sign}{whole}"),
            f10 if f10 % 10 == 0 => write!(f, "{sign}{whole}.{}", f10 / 10),
            _ => write!(f, "{sign}{whole}.{frac:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(BasisPoints::new(10_000).to_string(), "100");
        assert_eq!(BasisPoints::new(10_100).to_string(), "101");
        assert_eq!(BasisPoints::new(3350).to_string(), "33.5");
        assert_eq!(BasisPoints::new(3333).to_string(), "33.33");
        assert_eq!(BasisPoints::new(5).to_string(), "0.05");
        assert_eq!(BasisPoints::new(-250).to_string(), "-2.5");
    }
}
