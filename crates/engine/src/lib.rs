//! Expense splitting and debt settlement.
//!
//! The engine is made of two pure computations:
//!
//! - the **split allocator** ([`allocate`]) divides an expense total among
//!   participants using one of the [`SplitType`] strategies;
//! - the **balance netter** ([`compute_balances`] and its steps) folds many
//!   splits into a short list of "X owes Y" [`NetBalance`]s, net of the
//!   [`SettlementRecord`]s already paid.
//!
//! Neither keeps state between calls. Identifiers (account ids or guest
//! names) are opaque strings compared verbatim.

pub use balances::{
    NetBalance, SETTLED_EPSILON, SettlementRecord, SplitEntry, SplitRecord, UserBalances,
    apply_settlements, compute_balances, net_positions, simplify_debts,
};
pub use error::EngineError;
pub use money::MoneyCents;
pub use percent::BasisPoints;
pub use split::{PERCENTAGE_TOLERANCE, ParticipantInput, SplitLine, SplitType, allocate};

mod balances;
mod error;
mod money;
mod percent;
mod split;

pub type ResultEngine<T> = Result<T, EngineError>;
