//! Wire shapes exchanged with the caller (the CRUD layer that stores splits
//! and settlements). Amounts are integer minor units, percentages are basis
//! points.

use serde::{Deserialize, Serialize};

pub mod split {
    use super::*;

    /// One participant of a split request.
    ///
    /// Which optional field is read depends on `split_type`; missing values
    /// count as zero.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ParticipantNew {
        /// Account id or guest name.
        pub id: String,
        pub amount_minor: Option<i64>,
        /// 1% = 100 bp.
        pub percentage_bp: Option<i64>,
        pub shares: Option<u32>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitRequest {
        /// Must be > 0.
        pub total_minor: i64,
        /// One of `equal`, `percentage`, `exact`, `shares`.
        pub split_type: String,
        pub participants: Vec<ParticipantNew>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SplitLineView {
        pub id: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitResponse {
        pub lines: Vec<SplitLineView>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitEntryView {
        pub id: String,
        pub amount_minor: i64,
        #[serde(default)]
        pub paid: bool,
    }

    /// A split exactly as the caller stored it.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SplitRecordView {
        pub total_minor: i64,
        pub split_type: String,
        pub paid_by: Option<String>,
        pub participants: Vec<SplitEntryView>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from: String,
        pub to: String,
        /// Must be > 0.
        pub amount_minor: i64,
        pub scope: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct BalancesRequest {
        pub splits: Vec<SplitRecordView>,
        #[serde(default)]
        pub settlements: Vec<SettlementView>,
    }

    /// `from` owes `to`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NetBalanceView {
        pub from: String,
        pub to: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<NetBalanceView>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserBalancesResponse {
        pub id: String,
        pub owes: Vec<NetBalanceView>,
        pub owed: Vec<NetBalanceView>,
        /// Owed minus owes.
        pub net_balance_minor: i64,
    }
}
