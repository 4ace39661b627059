//! Transaction data aggregation.
//!
//! Provides pure functions that derive balances and totals from a set of
//! transactions. Nothing here is stored, every figure is recomputed from the
//! transactions it is given, so the same input always gives the same output.

use serde::Serialize;
use time::Date;

use crate::transaction::{Transaction, TransactionType};

/// The total expenses for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name exactly as it was recorded.
    pub category: String,
    /// The sum of expense amounts in the category.
    pub total: f64,
}

/// The figures shown alongside the transaction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Total income minus total expenses.
    pub balance: f64,
    /// The sum of all expenses.
    pub total_expense: f64,
    /// The income received in the month of the reference date.
    pub current_month_income: f64,
    /// Expense totals per category in order of first appearance.
    pub expense_by_category: Vec<CategoryTotal>,
}

impl Summary {
    /// Compute all figures for `transactions`, using `today` to decide what
    /// the current month is.
    pub fn compute(transactions: &[Transaction], today: Date) -> Self {
        Self {
            balance: balance(transactions),
            total_expense: total_by_type(transactions, TransactionType::Expense),
            current_month_income: current_month_income(transactions, today),
            expense_by_category: expense_by_category(transactions),
        }
    }
}

/// Sums the amounts of transactions of `kind`.
pub fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .fold(0.0, |sum, transaction| sum + transaction.amount)
}

/// Sums the amounts of every income transaction.
pub fn total_income(transactions: &[Transaction]) -> f64 {
    total_by_type(transactions, TransactionType::Income)
}

/// Total income minus total expenses. Zero for no transactions.
pub fn balance(transactions: &[Transaction]) -> f64 {
    total_income(transactions) - total_by_type(transactions, TransactionType::Expense)
}

/// Sums the income dated in the same calendar month and year as `reference_date`.
pub fn current_month_income(transactions: &[Transaction], reference_date: Date) -> f64 {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.kind == TransactionType::Income
                && transaction.date.year() == reference_date.year()
                && transaction.date.month() == reference_date.month()
        })
        .fold(0.0, |sum, transaction| sum + transaction.amount)
}

/// Groups expenses by category and sums each group.
///
/// Categories are reported in the order they first appear in `transactions`.
/// Categories with no expenses, or whose expenses sum to zero, are left out.
pub fn expense_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals.retain(|total| total.total != 0.0);
    totals
}

/// The share of `all` that `total` makes up, as a whole percentage.
///
/// Returns zero when `all` is zero.
pub fn category_share(total: f64, all: f64) -> u32 {
    if all == 0.0 {
        return 0;
    }

    (total / all * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        aggregation::{
            CategoryTotal, Summary, balance, category_share, current_month_income,
            expense_by_category, total_by_type, total_income,
        },
        transaction::{Transaction, TransactionType},
    };

    fn create_transaction(
        id: i64,
        amount: f64,
        kind: TransactionType,
        category: &str,
        date: Date,
    ) -> Transaction {
        Transaction {
            id,
            title: format!("transaction #{id}"),
            amount,
            kind,
            category: category.to_owned(),
            date,
        }
    }

    fn coffee_and_salary() -> Vec<Transaction> {
        vec![
            create_transaction(
                2,
                2000.0,
                TransactionType::Income,
                "salary",
                date!(2024 - 03 - 05),
            ),
            create_transaction(
                1,
                4.5,
                TransactionType::Expense,
                "food",
                date!(2024 - 03 - 01),
            ),
        ]
    }

    #[test]
    fn summary_for_coffee_and_salary() {
        let summary = Summary::compute(&coffee_and_salary(), date!(2024 - 03 - 20));

        assert_eq!(
            summary,
            Summary {
                balance: 1995.5,
                total_expense: 4.5,
                current_month_income: 2000.0,
                expense_by_category: vec![CategoryTotal {
                    category: "food".to_owned(),
                    total: 4.5
                }],
            }
        );
    }

    #[test]
    fn empty_set_has_zero_figures() {
        let summary = Summary::compute(&[], date!(2024 - 03 - 20));

        assert_eq!(summary, Summary::default());
        assert_eq!(balance(&[]), 0.0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let transactions = vec![
            create_transaction(
                1,
                100.0,
                TransactionType::Income,
                "gift",
                date!(2024 - 01 - 01),
            ),
            create_transaction(
                2,
                30.25,
                TransactionType::Expense,
                "food",
                date!(2024 - 01 - 02),
            ),
            create_transaction(
                3,
                80.0,
                TransactionType::Expense,
                "rent",
                date!(2024 - 01 - 03),
            ),
        ];

        let want = total_by_type(&transactions, TransactionType::Income)
            - total_by_type(&transactions, TransactionType::Expense);

        assert_eq!(balance(&transactions), want);
        assert_eq!(balance(&transactions), -10.25);
    }

    #[test]
    fn total_income_is_balance_plus_expenses() {
        let mut transactions = coffee_and_salary();
        transactions.push(create_transaction(
            3,
            250.0,
            TransactionType::Income,
            "gift",
            date!(2024 - 02 - 14),
        ));

        let got = total_income(&transactions);

        assert_eq!(got, 2250.0);
        assert_eq!(
            got,
            balance(&transactions) + total_by_type(&transactions, TransactionType::Expense)
        );
        assert_eq!(total_income(&[]), 0.0);
    }

    #[test]
    fn current_month_income_checks_month_and_year() {
        let transactions = vec![
            create_transaction(
                1,
                10.0,
                TransactionType::Income,
                "salary",
                date!(2024 - 03 - 31),
            ),
            create_transaction(
                2,
                20.0,
                TransactionType::Income,
                "salary",
                date!(2023 - 03 - 15),
            ),
            create_transaction(
                3,
                40.0,
                TransactionType::Income,
                "salary",
                date!(2024 - 04 - 01),
            ),
            create_transaction(
                4,
                80.0,
                TransactionType::Expense,
                "food",
                date!(2024 - 03 - 10),
            ),
        ];

        assert_eq!(
            current_month_income(&transactions, date!(2024 - 03 - 01)),
            10.0
        );
    }

    #[test]
    fn expense_by_category_keeps_first_occurrence_order() {
        let transactions = vec![
            create_transaction(
                1,
                5.0,
                TransactionType::Expense,
                "transport",
                date!(2024 - 03 - 01),
            ),
            create_transaction(
                2,
                12.0,
                TransactionType::Expense,
                "food",
                date!(2024 - 03 - 02),
            ),
            create_transaction(
                3,
                7.0,
                TransactionType::Income,
                "refunds",
                date!(2024 - 03 - 03),
            ),
            create_transaction(
                4,
                3.0,
                TransactionType::Expense,
                "transport",
                date!(2024 - 03 - 04),
            ),
            create_transaction(
                5,
                9.0,
                TransactionType::Expense,
                "space travel",
                date!(2024 - 03 - 05),
            ),
        ];

        let got = expense_by_category(&transactions);

        assert_eq!(
            got,
            vec![
                CategoryTotal {
                    category: "transport".to_owned(),
                    total: 8.0
                },
                CategoryTotal {
                    category: "food".to_owned(),
                    total: 12.0
                },
                CategoryTotal {
                    category: "space travel".to_owned(),
                    total: 9.0
                },
            ]
        );
        let sum: f64 = got.iter().map(|total| total.total).sum();
        assert_eq!(sum, total_by_type(&transactions, TransactionType::Expense));
    }

    #[test]
    fn expense_by_category_drops_zero_totals() {
        let transactions = vec![
            create_transaction(
                1,
                0.0,
                TransactionType::Expense,
                "free stuff",
                date!(2024 - 03 - 01),
            ),
            create_transaction(
                2,
                1.0,
                TransactionType::Expense,
                "food",
                date!(2024 - 03 - 02),
            ),
        ];

        let got = expense_by_category(&transactions);

        assert_eq!(
            got,
            vec![CategoryTotal {
                category: "food".to_owned(),
                total: 1.0
            }]
        );
    }

    #[test]
    fn results_do_not_depend_on_call_order() {
        let transactions = coffee_and_salary();
        let today = date!(2024 - 03 - 20);

        let first = Summary::compute(&transactions, today);
        let _ = expense_by_category(&transactions);
        let _ = current_month_income(&transactions, date!(1999 - 01 - 01));
        let second = Summary::compute(&transactions, today);

        assert_eq!(first, second);
    }

    #[test]
    fn category_share_rounds_to_whole_percent() {
        assert_eq!(category_share(1.0, 3.0), 33);
        assert_eq!(category_share(2.0, 3.0), 67);
        assert_eq!(category_share(5.0, 0.0), 0);
    }
}
