use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::{EngineError, ResultEngine};

/// Signed money amount represented as **integer cents**.
///
/// Every amount the engine reads or produces (split totals, allocated lines,
/// settlements, net balances) goes through this type, so rounding to two
/// decimals happens exactly once and never drifts.
///
/// Values coming from callers are accumulated with the `checked_*` methods;
/// the operator impls are for amounts already known to be in range.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::new(i64::MAX).checked_add(MoneyCents::new(1)), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Checked absolute value (`None` for `i64::MIN` cents).
    #[must_use]
    pub fn checked_abs(self) -> Option<MoneyCents> {
        self.0.checked_abs().map(MoneyCents)
    }

    /// Adds up amounts, failing with [`EngineError::InvalidAmount`] on
    /// overflow.
    pub fn try_sum(amounts: impl IntoIterator<Item = MoneyCents>) -> ResultEngine<MoneyCents> {
        amounts
            .into_iter()
            .try_fold(MoneyCents::ZERO, |acc, amount| acc.checked_add(amount))
            .ok_or_else(too_large)
    }

    /// Rounds `self * numerator / denominator` half-up to whole cents.
    ///
    /// The product is kept in `i128` and divided once, so no intermediate
    /// value (per-person, per-share, per-percent) is ever rounded on its own.
    /// Callers pass a non-negative amount and ratio; `denominator` must be
    /// positive.
    pub(crate) fn mul_ratio_half_up(
        self,
        numerator: i128,
        denominator: i128,
    ) -> ResultEngine<Self> {
        debug_assert!(denominator > 0);
        let rounded = i128::from(self.0)
            .checked_mul(numerator)
            .and_then(|product| product.checked_mul(2))
            .and_then(|double| double.checked_add(denominator))
            .map(|double| double.div_euclid(2 * denominator))
            .ok_or_else(too_large)?;
        i64::try_from(rounded).map(Self).map_err(|_| too_large())
    }
}

pub(crate) fn too_large() -> EngineError {
    EngineError::InvalidAmount("amount too large".to_string())
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}
