//! Split allocator: turns an expense total into per-participant amounts.
//!
//! Four strategies are supported, see [`SplitType`]. Allocation is a pure
//! function of its input; it either returns one [`SplitLine`] per
//! participant, in input order, or fails without any partial result.

use std::{fmt, str::FromStr};

use crate::{BasisPoints, EngineError, MoneyCents, ResultEngine};

/// How the total of a split is divided among participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitType {
    /// Everyone owes `total / n`.
    Equal,
    /// Everyone owes their percentage of the total; percentages sum to 100.
    Percentage,
    /// Everyone owes the amount given for them, unchecked against the total.
    Exact,
    /// Everyone owes `total * shares / total_shares`.
    Shares,
}

impl SplitType {
    /// Canonical name used in requests and stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage => "percentage",
            Self::Exact => "exact",
            Self::Shares => "shares",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" => Ok(Self::Equal),
            "percentage" => Ok(Self::Percentage),
            "exact" => Ok(Self::Exact),
            "shares" => Ok(Self::Shares),
            _ => Err(EngineError::UnknownSplitType(s.to_string())),
        }
    }
}

/// One participant as entered by the caller.
///
/// Only the field matching the chosen [`SplitType`] is read; a missing field
/// counts as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantInput {
    /// Account id or guest name, compared verbatim.
    pub id: String,
    pub amount: Option<MoneyCents>,
    pub percentage: Option<BasisPoints>,
    pub shares: Option<u32>,
}

impl ParticipantInput {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_percentage(mut self, percentage: BasisPoints) -> Self {
        self.percentage = Some(percentage);
        self
    }

    #[must_use]
    pub fn with_shares(mut self, shares: u32) -> Self {
        self.shares = Some(shares);
        self
    }
}

/// Amount a participant owes for one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitLine {
    pub id: String,
    pub amount: MoneyCents,
}

/// Allowed distance of the percentage sum from 100, in basis points (0.01%).
pub const PERCENTAGE_TOLERANCE: i64 = 1;

/// Computes what each participant owes for an expense of `total`.
///
/// Every amount is rounded half-up to the cent on its own, so for
/// [`SplitType::Equal`] and [`SplitType::Shares`] the lines may not add back
/// to `total` exactly. The remainder is not redistributed.
///
/// # Errors
///
/// - [`EngineError::InvalidAmount`] if `total` is not positive, a
///   percentage or exact amount is negative, or a line does not fit in
///   `i64` cents.
/// - [`EngineError::NoParticipants`] if `participants` is empty.
/// - [`EngineError::PercentageTotal`] if percentages are more than 0.01 away
///   from 100.
/// - [`EngineError::ZeroShares`] if the shares add up to zero.
pub fn allocate(
    total: MoneyCents,
    split_type: SplitType,
    participants: &[ParticipantInput],
) -> ResultEngine<Vec<SplitLine>> {
    if !total.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "split total must be > 0, got {total}"
        )));
    }
    if participants.is_empty() {
        return Err(EngineError::NoParticipants);
    }

    let lines = match split_type {
        SplitType::Equal => {
            let count = participants.len() as i128;
            let each = total.mul_ratio_half_up(1, count)?;
            lines_with(participants, |_| Ok(each))?
        }
        SplitType::Percentage => {
            reject_negative(participants, "percentage", |p| {
                p.percentage.is_some_and(|v| v.value() < 0)
            })?;
            let sum: i128 = participants
                .iter()
                .map(|p| i128::from(p.percentage.unwrap_or_default().value()))
                .sum();
            let whole = i128::from(BasisPoints::WHOLE.value());
            if (sum - whole).abs() > i128::from(PERCENTAGE_TOLERANCE) {
                let shown = i64::try_from(sum).unwrap_or(i64::MAX);
                return Err(EngineError::PercentageTotal(BasisPoints::new(shown)));
            }
            lines_with(participants, |p| {
                let bp = p.percentage.unwrap_or_default().value();
                total.mul_ratio_half_up(i128::from(bp), whole)
            })?
        }
        SplitType::Exact => {
            reject_negative(participants, "amount", |p| {
                p.amount.is_some_and(MoneyCents::is_negative)
            })?;
            lines_with(participants, |p| Ok(p.amount.unwrap_or_default()))?
        }
        SplitType::Shares => {
            let total_shares: u64 = participants
                .iter()
                .map(|p| u64::from(p.shares.unwrap_or_default()))
                .sum();
            if total_shares == 0 {
                return Err(EngineError::ZeroShares);
            }
            lines_with(participants, |p| {
                let shares = p.shares.unwrap_or_default();
                total.mul_ratio_half_up(i128::from(shares), i128::from(total_shares))
            })?
        }
    };

    tracing::debug!(
        %split_type,
        %total,
        participants = lines.len(),
        "split allocated"
    );

    Ok(lines)
}

fn reject_negative(
    participants: &[ParticipantInput],
    field: &str,
    is_negative: impl Fn(&ParticipantInput) -> bool,
) -> ResultEngine<()> {
    match participants.iter().find(|p| is_negative(p)) {
        Some(p) => Err(EngineError::InvalidAmount(format!(
            "negative {field} for \"{}\"",
            p.id
        ))),
        None => Ok(()),
    }
}

fn lines_with(
    participants: &[ParticipantInput],
    amount: impl Fn(&ParticipantInput) -> ResultEngine<MoneyCents>,
) -> ResultEngine<Vec<SplitLine>> {
    participants
        .iter()
        .map(|p| {
            Ok(SplitLine {
                id: p.id.clone(),
                amount: amount(p)?,
            })
        })
        .collect()
}
