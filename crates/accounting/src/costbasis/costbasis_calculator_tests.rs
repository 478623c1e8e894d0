use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::costbasis::CostBasisCalculator;
use crate::errors::{CalculatorError, Error};
use crate::transactions::{Transaction, TransactionType};

fn dt(s: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn buy(date: &str, quantity: Decimal, price: Decimal, commission: Decimal) -> Transaction {
    Transaction {
        id: None,
        symbol: "AAPL".to_string(),
        transaction_type: TransactionType::Buy,
        quantity,
        price,
        total_cost: quantity * price,
        commission,
        date: dt(date),
        amount: Decimal::ZERO,
    }
}

fn sell(date: &str, quantity: Decimal, price: Decimal, commission: Decimal) -> Transaction {
    Transaction {
        id: None,
        symbol: "AAPL".to_string(),
        transaction_type: TransactionType::Sell,
        quantity,
        price,
        total_cost: quantity * price,
        commission,
        date: dt(date),
        amount: Decimal::ZERO,
    }
}

#[test]
fn empty_input_yields_zeroed_report() {
    let report = CostBasisCalculator::new()
        .calculate(Vec::new(), dec!(100))
        .unwrap();
    assert_eq!(report.quantity, Decimal::ZERO);
    assert_eq!(report.total_cost, Decimal::ZERO);
    assert_eq!(report.realized_profit, Decimal::ZERO);
    assert_eq!(report.unrealized_profit, Decimal::ZERO);
    assert_eq!(report.percent_change, Decimal::ZERO);
}

#[test]
fn commission_is_capitalized_into_basis_and_deducted_from_proceeds() {
    // BUY 10 @ $100 comm $5, then SELL 5 @ $150 comm $2:
    // basis 1005, avg 100.5, cost of sold 502.5, revenue 748, realized 245.5
    let transactions = vec![
        buy("2023-01-01", dec!(10), dec!(100), dec!(5)),
        sell("2023-06-01", dec!(5), dec!(150), dec!(2)),
    ];
    let report = CostBasisCalculator::new()
        .calculate(transactions, dec!(120))
        .unwrap();

    assert_eq!(report.quantity, dec!(5));
    assert_eq!(report.total_cost, dec!(502.5));
    assert_eq!(report.total_commission, dec!(7));
    assert_eq!(report.realized_profit, dec!(245.5));
    // market value 600 against basis 502.5
    assert_eq!(report.unrealized_profit, dec!(97.5));
    assert_eq!(report.total_profit, dec!(343));
    assert_eq!(
        report.percent_change,
        (dec!(97.5) / dec!(502.5) * dec!(100)).round_dp(6)
    );
}

#[test]
fn full_liquidation_zeroes_quantity_and_basis() {
    // Odd commission forces a repeating-decimal average cost; the snap must
    // still land both aggregates on exactly zero.
    let transactions = vec![
        buy("2023-01-01", dec!(3), dec!(10), dec!(1)),
        sell("2023-02-01", dec!(3), dec!(12), dec!(0)),
    ];
    let report = CostBasisCalculator::new()
        .calculate(transactions, dec!(12))
        .unwrap();
    assert_eq!(report.quantity, Decimal::ZERO);
    assert_eq!(report.total_cost, Decimal::ZERO);
    assert_eq!(report.unrealized_profit, Decimal::ZERO);
    assert_eq!(report.percent_change, Decimal::ZERO);
}

#[test]
fn oversell_fails_with_insufficient_inventory() {
    let transactions = vec![
        buy("2023-01-01", dec!(5), dec!(10), dec!(0)),
        sell("2023-02-01", dec!(6), dec!(12), dec!(0)),
    ];
    let err = CostBasisCalculator::new()
        .calculate(transactions, dec!(12))
        .unwrap_err();
    match err {
        Error::Calculation(CalculatorError::InsufficientInventory {
            symbol,
            requested,
            available,
            ..
        }) => {
            assert_eq!(symbol, "AAPL");
            assert_eq!(requested, dec!(6));
            assert_eq!(available, dec!(5));
        }
        other => panic!("Expected InsufficientInventory, got {other:?}"),
    }
}

#[test]
fn sell_against_empty_inventory_fails() {
    let transactions = vec![sell("2023-01-01", dec!(1), dec!(10), dec!(0))];
    assert!(matches!(
        CostBasisCalculator::new().calculate(transactions, dec!(10)),
        Err(Error::Calculation(CalculatorError::InsufficientInventory { .. }))
    ));
}

#[test]
fn input_order_does_not_matter() {
    let chronological = vec![
        buy("2023-01-01", dec!(10), dec!(100), dec!(5)),
        sell("2023-06-01", dec!(5), dec!(150), dec!(2)),
    ];
    let shuffled = vec![chronological[1].clone(), chronological[0].clone()];

    let calculator = CostBasisCalculator::new();
    let a = calculator.calculate(chronological, dec!(120)).unwrap();
    let b = calculator.calculate(shuffled, dec!(120)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_trade_rejects_whole_batch() {
    let transactions = vec![
        buy("2023-01-01", dec!(10), dec!(100), dec!(0)),
        buy("2023-01-02", dec!(0), dec!(100), dec!(0)),
    ];
    assert!(matches!(
        CostBasisCalculator::new().calculate(transactions, dec!(100)),
        Err(Error::Validation(_))
    ));
}

#[test]
fn percent_change_is_zero_without_basis() {
    let transactions = vec![
        buy("2023-01-01", dec!(2), dec!(50), dec!(0)),
        sell("2023-02-01", dec!(2), dec!(60), dec!(0)),
    ];
    let report = CostBasisCalculator::new()
        .calculate(transactions, dec!(70))
        .unwrap();
    assert_eq!(report.total_cost, Decimal::ZERO);
    assert_eq!(report.percent_change, Decimal::ZERO);
    assert_eq!(report.realized_profit, dec!(20));
}

proptest! {
    /// Any valid sequence without oversell keeps quantity and basis
    /// non-negative and never errors.
    #[test]
    fn quantity_and_basis_stay_non_negative(
        steps in prop::collection::vec((any::<bool>(), 1u32..100, 1u32..1000), 1..40)
    ) {
        let mut transactions = Vec::new();
        let mut available = Decimal::ZERO;
        let mut day = 1u32;
        for (is_buy, qty, price) in steps {
            let qty = Decimal::from(qty);
            let price = Decimal::from(price);
            let date = format!("2023-01-01T00:00:{:02}Z", day.min(59));
            let date: DateTime<Utc> = date.parse().unwrap();
            day += 1;
            if is_buy {
                available += qty;
                transactions.push(Transaction {
                    id: None,
                    symbol: "AAPL".to_string(),
                    transaction_type: TransactionType::Buy,
                    quantity: qty,
                    price,
                    total_cost: qty * price,
                    commission: Decimal::ONE,
                    date,
                    amount: Decimal::ZERO,
                });
            } else if available > Decimal::ZERO {
                let sell_qty = qty.min(available);
                available -= sell_qty;
                transactions.push(Transaction {
                    id: None,
                    symbol: "AAPL".to_string(),
                    transaction_type: TransactionType::Sell,
                    quantity: sell_qty,
                    price,
                    total_cost: sell_qty * price,
                    commission: Decimal::ONE,
                    date,
                    amount: Decimal::ZERO,
                });
            }
        }

        let report = CostBasisCalculator::new().calculate(transactions, dec!(10)).unwrap();
        prop_assert!(report.quantity >= Decimal::ZERO);
        prop_assert!(report.total_cost >= Decimal::ZERO);
    }
}
