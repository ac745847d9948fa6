//! Balance netter: who owes whom across a set of splits.
//!
//! The computation runs in three steps:
//!
//! 1. [`net_positions`] folds every unpaid split line into a signed position
//!    per identifier (positive = is owed, negative = owes).
//! 2. [`simplify_debts`] pairs debtors with creditors and emits directed
//!    [`NetBalance`]s.
//! 3. [`apply_settlements`] subtracts payments already recorded between the
//!    same ordered pair.
//!
//! [`compute_balances`] chains the three.
//!
//! Pairing is greedy and follows first-seen order, so the result is
//! deterministic but not always the smallest possible set of transfers.

use indexmap::IndexMap;

use crate::{EngineError, MoneyCents, ResultEngine, SplitType, money::too_large};

/// Anything at or below one cent is considered settled.
pub const SETTLED_EPSILON: MoneyCents = MoneyCents::new(1);

/// A participant line of a stored split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitEntry {
    pub id: String,
    pub amount: MoneyCents,
    /// The participant already paid their share; the line no longer counts.
    pub paid: bool,
}

/// A split as persisted by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitRecord {
    pub total: MoneyCents,
    pub split_type: SplitType,
    /// `None` when no payer could be resolved; such a split is ignored.
    pub paid_by: Option<String>,
    pub participants: Vec<SplitEntry>,
}

/// A direct payment between two parties, made outside of any split.
///
/// Only built through [`SettlementRecord::new`], so the amount is always
/// positive and `from != to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRecord {
    from: String,
    to: String,
    amount: MoneyCents,
    scope: Option<String>,
}

impl SettlementRecord {
    /// Builds a settlement, rejecting self-payments and non-positive amounts.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: MoneyCents,
        scope: Option<String>,
    ) -> ResultEngine<Self> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return Err(EngineError::InvalidAmount(format!(
                "settlement from \"{from}\" to itself"
            )));
        }
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "settlement amount must be > 0, got {amount}"
            )));
        }
        Ok(Self {
            from,
            to,
            amount,
            scope,
        })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> MoneyCents {
        self.amount
    }

    /// Optional grouping (e.g. a group id) the settlement was recorded in.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

/// `from` owes `to` the given amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetBalance {
    pub from: String,
    pub to: String,
    pub amount: MoneyCents,
}

/// Signed position of every identifier, in first-seen order.
///
/// For each split with a payer, every unpaid line moves its amount from the
/// participant to the payer. Lines belonging to the payer are skipped.
///
/// Fails with [`EngineError::InvalidAmount`] if a position overflows `i64`
/// cents.
pub fn net_positions(splits: &[SplitRecord]) -> ResultEngine<IndexMap<String, MoneyCents>> {
    let mut positions: IndexMap<String, MoneyCents> = IndexMap::new();

    for split in splits {
        let Some(payer) = split.paid_by.as_deref() else {
            continue;
        };
        for entry in &split.participants {
            if entry.paid || entry.id == payer {
                continue;
            }
            let credit = positions.entry(payer.to_string()).or_default();
            *credit = credit.checked_add(entry.amount).ok_or_else(too_large)?;
            let debit = positions.entry(entry.id.clone()).or_default();
            *debit = debit.checked_sub(entry.amount).ok_or_else(too_large)?;
        }
    }

    Ok(positions)
}

struct Party<'a> {
    id: &'a str,
    remaining: MoneyCents,
}

/// Turns net positions into directed debtor -> creditor balances.
///
/// Creditors and debtors keep the order of `positions`. Two cursors walk
/// both lists; each step settles `min(creditor, debtor)` and advances the
/// side that reached zero. At most `creditors + debtors - 1` balances are
/// produced, every one above [`SETTLED_EPSILON`]. Balances always go from a
/// debtor to a creditor, so a pair never shows up in both directions.
pub fn simplify_debts(positions: &IndexMap<String, MoneyCents>) -> ResultEngine<Vec<NetBalance>> {
    let mut creditors: Vec<Party<'_>> = Vec::new();
    let mut debtors: Vec<Party<'_>> = Vec::new();

    for (id, position) in positions {
        if *position > SETTLED_EPSILON {
            creditors.push(Party {
                id: id.as_str(),
                remaining: *position,
            });
        } else if *position < -SETTLED_EPSILON {
            debtors.push(Party {
                id: id.as_str(),
                remaining: position.checked_abs().ok_or_else(too_large)?,
            });
        }
    }

    let mut balances = Vec::new();
    let (mut c, mut d) = (0, 0);
    while c < creditors.len() && d < debtors.len() {
        let creditor = &mut creditors[c];
        let debtor = &mut debtors[d];
        let amount = creditor.remaining.min(debtor.remaining);

        if amount > SETTLED_EPSILON {
            balances.push(NetBalance {
                from: debtor.id.to_string(),
                to: creditor.id.to_string(),
                amount,
            });
        }

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor.remaining < SETTLED_EPSILON {
            c += 1;
        }
        if debtor.remaining < SETTLED_EPSILON {
            d += 1;
        }
    }

    tracing::debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        balances = balances.len(),
        "debts simplified"
    );

    Ok(balances)
}

/// Subtracts recorded settlements from computed balances.
///
/// A settlement only offsets a balance with the same `from` and `to`; a
/// payment in the opposite direction is ignored. Results are clamped at
/// zero and balances at or below [`SETTLED_EPSILON`] are dropped.
///
/// With `scope` set, only settlements recorded in that scope count.
pub fn apply_settlements(
    balances: Vec<NetBalance>,
    settlements: &[SettlementRecord],
    scope: Option<&str>,
) -> ResultEngine<Vec<NetBalance>> {
    let mut adjusted = Vec::with_capacity(balances.len());
    for mut balance in balances {
        let settled = MoneyCents::try_sum(
            settlements
                .iter()
                .filter(|s| scope.is_none() || s.scope() == scope)
                .filter(|s| s.from == balance.from && s.to == balance.to)
                .map(SettlementRecord::amount),
        )?;
        balance.amount = balance
            .amount
            .checked_sub(settled)
            .ok_or_else(too_large)?
            .max(MoneyCents::ZERO);
        if balance.amount > SETTLED_EPSILON {
            adjusted.push(balance);
        }
    }
    Ok(adjusted)
}

/// Positions, simplification and settlements in one call.
pub fn compute_balances(
    splits: &[SplitRecord],
    settlements: &[SettlementRecord],
    scope: Option<&str>,
) -> ResultEngine<Vec<NetBalance>> {
    let positions = net_positions(splits)?;
    let balances = simplify_debts(&positions)?;
    apply_settlements(balances, settlements, scope)
}

/// The balances one identifier is part of.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserBalances {
    /// What the identifier owes to others.
    pub owes: Vec<NetBalance>,
    /// What others owe to the identifier.
    pub owed: Vec<NetBalance>,
    /// `sum(owed) - sum(owes)`.
    pub net_balance: MoneyCents,
}

impl UserBalances {
    pub fn for_identifier(balances: &[NetBalance], id: &str) -> ResultEngine<Self> {
        let owes: Vec<NetBalance> = balances.iter().filter(|b| b.from == id).cloned().collect();
        let owed: Vec<NetBalance> = balances.iter().filter(|b| b.to == id).cloned().collect();
        let net_balance = MoneyCents::try_sum(owed.iter().map(|b| b.amount))?
            .checked_sub(MoneyCents::try_sum(owes.iter().map(|b| b.amount))?)
            .ok_or_else(too_large)?;
        Ok(Self {
            owes,
            owed,
            net_balance,
        })
    }
}
