//! Mapping between wire DTOs (`api_types`) and engine values.

use api_types::{balance, split};
use engine::{
    BasisPoints, MoneyCents, NetBalance, ParticipantInput, SettlementRecord, SplitEntry,
    SplitLine, SplitRecord, SplitType, UserBalances,
};

use crate::error::Result;

pub fn participant(dto: &split::ParticipantNew) -> ParticipantInput {
    ParticipantInput {
        id: dto.id.clone(),
        amount: dto.amount_minor.map(MoneyCents::new),
        percentage: dto.percentage_bp.map(BasisPoints::new),
        shares: dto.shares,
    }
}

pub fn split_line(line: SplitLine) -> split::SplitLineView {
    split::SplitLineView {
        id: line.id,
        amount_minor: line.amount.cents(),
    }
}

pub fn split_record(dto: &balance::SplitRecordView) -> Result<SplitRecord> {
    Ok(SplitRecord {
        total: MoneyCents::new(dto.total_minor),
        split_type: dto.split_type.parse::<SplitType>()?,
        paid_by: dto.paid_by.clone(),
        participants: dto
            .participants
            .iter()
            .map(|p| SplitEntry {
                id: p.id.clone(),
                amount: MoneyCents::new(p.amount_minor),
                paid: p.paid,
            })
            .collect(),
    })
}

pub fn settlement(dto: &balance::SettlementView) -> Result<SettlementRecord> {
    Ok(SettlementRecord::new(
        dto.from.as_str(),
        dto.to.as_str(),
        MoneyCents::new(dto.amount_minor),
        dto.scope.clone(),
    )?)
}

pub fn net_balance(net: NetBalance) -> balance::NetBalanceView {
    balance::NetBalanceView {
        from: net.from,
        to: net.to,
        amount_minor: net.amount.cents(),
    }
}

pub fn user_balances(id: &str, summary: UserBalances) -> balance::UserBalancesResponse {
    balance::UserBalancesResponse {
        id: id.to_string(),
        owes: summary.owes.into_iter().map(net_balance).collect(),
        owed: summary.owed.into_iter().map(net_balance).collect(),
        net_balance_minor: summary.net_balance.cents(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::EngineError;

    #[test]
    fn participant_keeps_optional_fields() {
        let dto = split::ParticipantNew {
            id: "guest:Marco".to_string(),
            amount_minor: None,
            percentage_bp: Some(2500),
            shares: Some(2),
        };
        let input = participant(&dto);
        assert_eq!(input.id, "guest:Marco");
        assert_eq!(input.amount, None);
        assert_eq!(input.percentage, Some(BasisPoints::new(2500)));
        assert_eq!(input.shares, Some(2));
    }

    #[test]
    fn split_record_rejects_unknown_type() {
        let dto = balance::SplitRecordView {
            total_minor: 100,
            split_type: "by_weight".to_string(),
            paid_by: Some("A".to_string()),
            participants: vec![],
        };
        let err = split_record(&dto).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Engine(EngineError::UnknownSplitType(_))
        ));
    }

    #[test]
    fn settlement_rejects_self_payment() {
        let dto = balance::SettlementView {
            from: "A".to_string(),
            to: "A".to_string(),
            amount_minor: 100,
            scope: None,
        };
        assert!(settlement(&dto).is_err());
    }
}
