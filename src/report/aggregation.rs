//! Folds transactions into month-bucketed income, expense and profit series.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    Error,
    models::{Transaction, TransactionType},
};

/// Month-bucketed totals for a set of transactions.
///
/// The four vectors are index-aligned: `income[i]`, `expense[i]` and
/// `profit[i]` are the totals for the month named by `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub labels: Vec<String>,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
    pub profit: Vec<Decimal>,
}

/// Bucket `transactions` by calendar month and total income and expense per
/// bucket.
///
/// Buckets are keyed by month name only, so transactions from the same month
/// of different years share a bucket. Labels appear in the order the months
/// are first seen after sorting by date, not in calendar order.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] if `range` ends before it starts, and
/// [`Error::NoData`] if no transaction falls within the range.
pub fn monthly_summary(
    mut transactions: Vec<Transaction>,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<MonthlySummary, Error> {
    if let Some((start, end)) = range {
        if end < start {
            return Err(Error::InvalidDateRange);
        }

        transactions.retain(|transaction| start <= transaction.date && transaction.date <= end);
    }

    if transactions.is_empty() {
        return Err(Error::NoData);
    }

    transactions.sort_by_key(|transaction| transaction.date);

    let mut labels: Vec<String> = Vec::new();
    let mut income: Vec<Decimal> = Vec::new();
    let mut expense: Vec<Decimal> = Vec::new();

    for transaction in transactions {
        let month = transaction.date.format("%B").to_string();

        let index = match labels.iter().position(|label| *label == month) {
            Some(index) => index,
            None => {
                labels.push(month);
                income.push(Decimal::ZERO);
                expense.push(Decimal::ZERO);
                labels.len() - 1
            }
        };

        match transaction.transaction_type {
            TransactionType::Income => income[index] += transaction.amount,
            TransactionType::Expense => expense[index] += transaction.amount,
        }
    }

    let profit = income
        .iter()
        .zip(&expense)
        .map(|(income, expense)| income - expense)
        .collect();

    Ok(MonthlySummary {
        labels,
        income,
        expense,
        profit,
    })
}

#[cfg(test)]
mod aggregation_tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        models::{Transaction, TransactionStatus, TransactionType, UserID},
    };

    use super::monthly_summary;

    fn transaction(amount: &str, transaction_type: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: 0,
            user_id: UserID::new(1),
            amount: Decimal::from_str(amount).unwrap(),
            description: None,
            transaction_type,
            status: TransactionStatus::Completed,
            company: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn decimals(raw: &[&str]) -> Vec<Decimal> {
        raw.iter().map(|s| Decimal::from_str(s).unwrap()).collect()
    }

    #[test]
    fn buckets_by_month_in_first_seen_order() {
        let transactions = vec![
            transaction("50", TransactionType::Income, "2024-02-10"),
            transaction("100", TransactionType::Income, "2024-01-15"),
            transaction("30", TransactionType::Expense, "2024-01-20"),
        ];

        let summary = monthly_summary(transactions, None).unwrap();

        assert_eq!(summary.labels, vec!["January", "February"]);
        assert_eq!(summary.income, decimals(&["100", "50"]));
        assert_eq!(summary.expense, decimals(&["30", "0"]));
        assert_eq!(summary.profit, decimals(&["70", "50"]));
    }

    #[test]
    fn same_month_of_different_years_shares_a_bucket() {
        let transactions = vec![
            transaction("10", TransactionType::Income, "2023-01-05"),
            transaction("20", TransactionType::Income, "2024-01-05"),
        ];

        let summary = monthly_summary(transactions, None).unwrap();

        assert_eq!(summary.labels, vec!["January"]);
        assert_eq!(summary.income, decimals(&["30"]));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let transactions = vec![
            transaction("10", TransactionType::Income, "2024-01-01"),
            transaction("20", TransactionType::Income, "2024-01-31"),
            transaction("40", TransactionType::Income, "2024-02-01"),
        ];
        let start = NaiveDate::parse_from_str("2024-01-01", "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str("2024-01-31", "%Y-%m-%d").unwrap();

        let summary = monthly_summary(transactions, Some((start, end))).unwrap();

        assert_eq!(summary.labels, vec!["January"]);
        assert_eq!(summary.income, decimals(&["30"]));
    }

    #[test]
    fn inverted_range_fails() {
        let transactions = vec![transaction("10", TransactionType::Income, "2024-01-01")];
        let start = NaiveDate::parse_from_str("2024-02-01", "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str("2024-01-01", "%Y-%m-%d").unwrap();

        let result = monthly_summary(transactions, Some((start, end)));

        assert_eq!(result, Err(Error::InvalidDateRange));
    }

    #[test]
    fn no_transactions_is_no_data() {
        assert_eq!(monthly_summary(vec![], None), Err(Error::NoData));
    }

    #[test]
    fn range_excluding_everything_is_no_data() {
        let transactions = vec![transaction("10", TransactionType::Income, "2024-06-15")];
        let start = NaiveDate::parse_from_str("2024-01-01", "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str("2024-01-31", "%Y-%m-%d").unwrap();

        let result = monthly_summary(transactions, Some((start, end)));

        assert_eq!(result, Err(Error::NoData));
    }
}
