use async_trait::async_trait;
use shared::models::{Account, AccountQuery};

use super::{MemoryStore, count_where, matches_exact, references, unreferenced};
use crate::db::{AccountFields, AccountStore, StoreResult, constraint};

impl MemoryStore {
    fn check_account(&self, fields: &AccountFields) -> StoreResult<()> {
        references(&self.clients, fields.client_id, constraint::ACCOUNT_CLIENT)?;
        references(&self.branches, fields.branch_id, constraint::ACCOUNT_BRANCH)?;
        references(&self.employees, fields.employee_id, constraint::ACCOUNT_EMPLOYEE)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn list(&self, query: &AccountQuery) -> StoreResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter(|a| query.client_id.is_none_or(|c| a.client_id == c))
            .filter(|a| query.branch_id.is_none_or(|b| a.branch_id == b))
            .filter(|a| matches_exact(&a.account_type, query.account_type.as_deref()))
            .filter(|a| matches_exact(&a.status, query.status.as_deref()))
            .map(|a| a.clone())
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn create(&self, fields: AccountFields) -> StoreResult<i64> {
        self.check_account(&fields)?;
        let id = self.next_id();
        self.accounts.insert(
            id,
            Account {
                id,
                client_id: fields.client_id,
                branch_id: fields.branch_id,
                employee_id: fields.employee_id,
                account_type: fields.account_type,
                balance: fields.balance,
                opened_on: fields.opened_on,
                status: fields.status,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: AccountFields) -> StoreResult<bool> {
        if !self.accounts.contains_key(&id) {
            return Ok(false);
        }
        self.check_account(&fields)?;
        let Some(mut account) = self.accounts.get_mut(&id) else {
            return Ok(false);
        };
        account.client_id = fields.client_id;
        account.branch_id = fields.branch_id;
        account.employee_id = fields.employee_id;
        account.account_type = fields.account_type;
        account.balance = fields.balance;
        account.opened_on = fields.opened_on;
        account.status = fields.status;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        unreferenced(&self.transactions, constraint::TRANSACTION_ACCOUNT, |t| t.account_id == id)?;
        unreferenced(&self.cards, constraint::CARD_ACCOUNT, |c| c.account_id == id)?;
        Ok(self.accounts.remove(&id).is_some())
    }

    async fn transaction_count(&self, account_id: i64) -> StoreResult<i64> {
        Ok(count_where(&self.transactions, |t| t.account_id == account_id))
    }
}
