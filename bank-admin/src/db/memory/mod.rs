//! In-process store
//!
//! Backs development runs without `DATABASE_URL` and the test suites.
//! Implements every store trait over concurrent maps and enforces the same
//! foreign keys as the SQL schema, reporting the same constraint names.

mod accounts;
mod branches;
mod cards;
mod clients;
mod employees;
mod loans;
mod transactions;
mod users;

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use shared::models::{
    Account, Branch, Client, CreditCard, DashboardStats, Employee, Loan, Transaction, User,
};

use super::{StatsStore, StoreError, StoreResult, contains_ci};

#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    users: DashMap<i64, User>,
    clients: DashMap<i64, Client>,
    branches: DashMap<i64, Branch>,
    employees: DashMap<i64, Employee>,
    accounts: DashMap<i64, Account>,
    transactions: DashMap<i64, Transaction>,
    loans: DashMap<i64, Loan>,
    cards: DashMap<i64, CreditCard>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Insert/update side of a foreign key: the referenced row must exist
fn references<V>(map: &DashMap<i64, V>, id: i64, constraint: &str) -> StoreResult<()> {
    if map.contains_key(&id) {
        Ok(())
    } else {
        Err(StoreError::foreign_key(constraint))
    }
}

/// Delete side of a foreign key: no row of `map` may still point at the target
fn unreferenced<V>(
    map: &DashMap<i64, V>,
    constraint: &str,
    points_at: impl Fn(&V) -> bool,
) -> StoreResult<()> {
    if map.iter().any(|entry| points_at(entry.value())) {
        Err(StoreError::foreign_key(constraint))
    } else {
        Ok(())
    }
}

fn count_where<V>(map: &DashMap<i64, V>, pred: impl Fn(&V) -> bool) -> i64 {
    map.iter().filter(|entry| pred(entry.value())).count() as i64
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
}

fn matches_filter(value: Option<&str>, filter: Option<&str>) -> bool {
    match shared::util::non_blank(filter) {
        None => true,
        Some(needle) => value.is_some_and(|v| contains_ci(v, needle)),
    }
}

/// Exact match, blank filter matches everything
fn matches_exact(value: &str, filter: Option<&str>) -> bool {
    shared::util::non_blank(filter).is_none_or(|f| value == f)
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        Ok(DashboardStats {
            clients: self.clients.len() as i64,
            active_accounts: count_where(&self.accounts, |a| a.status == "Active"),
            employees: self.employees.len() as i64,
            branches: self.branches.len() as i64,
        })
    }
}

/// Row builders shared by the store tests
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::db::{AccountFields, BranchFields, ClientFields, EmployeeFields, TransactionFields};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn client(first: &str, last: &str, on: NaiveDate) -> ClientFields {
        ClientFields {
            first_name: first.into(),
            last_name: last.into(),
            address: None,
            phone: None,
            email: Some(format!("{}@example.com", first.to_lowercase())),
            registered_on: on,
        }
    }

    pub fn branch(name: &str) -> BranchFields {
        BranchFields {
            name: name.into(),
            address: "Av. Central 1".into(),
            phone: "555-0100".into(),
            opened_on: date(2020, 1, 1),
        }
    }

    pub fn employee(branch_id: i64, last: &str) -> EmployeeFields {
        EmployeeFields {
            branch_id: Some(branch_id),
            first_name: "Eva".into(),
            last_name: last.into(),
            position: "Teller".into(),
            phone: None,
            email: None,
            hired_on: date(2021, 5, 1),
        }
    }

    pub fn account(client_id: i64, branch_id: i64, employee_id: i64, status: &str) -> AccountFields {
        AccountFields {
            client_id,
            branch_id,
            employee_id,
            account_type: "Savings".into(),
            balance: 100.0,
            opened_on: date(2024, 2, 1),
            status: status.into(),
        }
    }

    pub fn deposit(account_id: i64, amount: f64) -> TransactionFields {
        TransactionFields {
            account_id,
            employee_id: None,
            transaction_type: "Deposit".into(),
            amount,
            occurred_at: chrono::Utc::now(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::db::{AccountStore, BranchStore, ClientStore, EmployeeStore};

    #[tokio::test]
    async fn test_stats_count_rows() {
        let store = MemoryStore::new();
        let client = ClientStore::create(&store, fixtures::client("Ana", "Ruiz", date(2024, 1, 10)))
            .await
            .unwrap();
        let branch = BranchStore::create(&store, fixtures::branch("Centro")).await.unwrap();
        let e1 = EmployeeStore::create(&store, employee(branch, "Soto")).await.unwrap();
        EmployeeStore::create(&store, employee(branch, "Vega")).await.unwrap();
        AccountStore::create(&store, account(client, branch, e1, "Active"))
            .await
            .unwrap();
        AccountStore::create(&store, account(client, branch, e1, "Blocked"))
            .await
            .unwrap();

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                clients: 1,
                active_accounts: 1,
                employees: 2,
                branches: 1,
            }
        );
    }

    #[test]
    fn test_matches_exact_ignores_blank() {
        assert!(matches_exact("Active", None));
        assert!(matches_exact("Active", Some(" ")));
        assert!(matches_exact("Active", Some("Active")));
        assert!(!matches_exact("Active", Some("active")));
    }
}
