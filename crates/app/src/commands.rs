use api_types::{balance, split};
use serde::Serialize;

use crate::{convert, error::Result};

/// Reads a [`split::SplitRequest`] and allocates it.
pub fn split(input: &str) -> Result<split::SplitResponse> {
    let request: split::SplitRequest = serde_json::from_str(input)?;
    let split_type = request.split_type.parse::<engine::SplitType>()?;
    let participants: Vec<engine::ParticipantInput> =
        request.participants.iter().map(convert::participant).collect();

    let lines = engine::allocate(
        engine::MoneyCents::new(request.total_minor),
        split_type,
        &participants,
    )?;
    tracing::info!(%split_type, lines = lines.len(), "split computed");

    Ok(split::SplitResponse {
        lines: lines.into_iter().map(convert::split_line).collect(),
    })
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BalancesOutput {
    All(balance::BalancesResponse),
    User(balance::UserBalancesResponse),
}

/// Reads a [`balance::BalancesRequest`] and nets it, optionally narrowing the
/// output to one identifier and the settlements to one scope.
pub fn balances(input: &str, user: Option<&str>, scope: Option<&str>) -> Result<BalancesOutput> {
    let request: balance::BalancesRequest = serde_json::from_str(input)?;
    let splits = request
        .splits
        .iter()
        .map(convert::split_record)
        .collect::<Result<Vec<_>>>()?;
    let settlements = request
        .settlements
        .iter()
        .map(convert::settlement)
        .collect::<Result<Vec<_>>>()?;

    let balances = engine::compute_balances(&splits, &settlements, scope)?;
    tracing::info!(
        splits = splits.len(),
        settlements = settlements.len(),
        balances = balances.len(),
        "balances computed"
    );

    Ok(match user {
        Some(id) => {
            let summary = engine::UserBalances::for_identifier(&balances, id)?;
            BalancesOutput::User(convert::user_balances(id, summary))
        }
        None => BalancesOutput::All(balance::BalancesResponse {
            balances: balances.into_iter().map(convert::net_balance).collect(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use engine::EngineError;

    const DINNER: &str = r#"{
        "splits": [{
            "total_minor": 9000,
            "split_type": "equal",
            "paid_by": "A",
            "participants": [
                {"id": "B", "amount_minor": 3000},
                {"id": "C", "amount_minor": 3000},
                {"id": "A", "amount_minor": 3000}
            ]
        }],
        "settlements": [
            {"from": "B", "to": "A", "amount_minor": 2000, "scope": "trip"}
        ]
    }"#;

    #[test]
    fn split_shares() {
        let input = r#"{
            "total_minor": 10000,
            "split_type": "shares",
            "participants": [
                {"id": "a", "shares": 1},
                {"id": "b", "shares": 1},
                {"id": "c", "shares": 2}
            ]
        }"#;
        let response = split(input).unwrap();
        let amounts: Vec<i64> = response.lines.iter().map(|l| l.amount_minor).collect();
        assert_eq!(amounts, vec![2500, 2500, 5000]);
    }

    #[test]
    fn split_bad_percentages() {
        let input = r#"{
            "total_minor": 10000,
            "split_type": "percentage",
            "participants": [
                {"id": "a", "percentage_bp": 5000},
                {"id": "b", "percentage_bp": 4900}
            ]
        }"#;
        let err = split(input).unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(EngineError::PercentageTotal(_))
        ));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn split_unknown_type() {
        let input = r#"{"total_minor": 100, "split_type": "weird", "participants": [{"id": "a"}]}"#;
        assert!(matches!(
            split(input),
            Err(AppError::Engine(EngineError::UnknownSplitType(_)))
        ));
    }

    #[test]
    fn balances_all() {
        let BalancesOutput::All(response) = balances(DINNER, None, None).unwrap() else {
            panic!("expected all balances");
        };
        assert_eq!(
            response.balances,
            vec![
                balance::NetBalanceView {
                    from: "B".to_string(),
                    to: "A".to_string(),
                    amount_minor: 1000,
                },
                balance::NetBalanceView {
                    from: "C".to_string(),
                    to: "A".to_string(),
                    amount_minor: 3000,
                },
            ]
        );
    }

    #[test]
    fn balances_for_user_and_scope() {
        let BalancesOutput::User(a) = balances(DINNER, Some("A"), Some("flat")).unwrap() else {
            panic!("expected user balances");
        };
        // The only settlement belongs to "trip", so nothing is subtracted.
        assert_eq!(a.net_balance_minor, 6000);
        assert_eq!(a.owed.len(), 2);
        assert!(a.owes.is_empty());

        let BalancesOutput::User(a) = balances(DINNER, Some("A"), Some("trip")).unwrap() else {
            panic!("expected user balances");
        };
        assert_eq!(a.net_balance_minor, 4000);
    }

    #[test]
    fn balances_invalid_json() {
        assert!(matches!(balances("{", None, None), Err(AppError::Json(_))));
    }

    #[test]
    fn balances_overflow_is_an_engine_error() {
        let input = r#"{
            "splits": [
                {"total_minor": 4611686018427387904, "split_type": "exact", "paid_by": "A",
                 "participants": [{"id": "B", "amount_minor": 4611686018427387904}]},
                {"total_minor": 4611686018427387904, "split_type": "exact", "paid_by": "A",
                 "participants": [{"id": "C", "amount_minor": 4611686018427387904}]}
            ]
        }"#;
        assert!(matches!(
            balances(input, None, None),
            Err(AppError::Engine(EngineError::InvalidAmount(_)))
        ));
    }
}
