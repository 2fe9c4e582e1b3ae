use async_trait::async_trait;
use shared::models::{Transaction, TransactionQuery};

use super::{MemoryStore, in_range, matches_exact, references};
use crate::db::{StoreResult, TransactionFields, TransactionStore, constraint};

impl MemoryStore {
    fn check_transaction(&self, fields: &TransactionFields) -> StoreResult<()> {
        references(&self.accounts, fields.account_id, constraint::TRANSACTION_ACCOUNT)?;
        if let Some(employee_id) = fields.employee_id {
            references(&self.employees, employee_id, constraint::TRANSACTION_EMPLOYEE)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| query.account_id.is_none_or(|a| t.account_id == a))
            .filter(|t| query.employee_id.is_none_or(|e| t.employee_id == Some(e)))
            .filter(|t| matches_exact(&t.transaction_type, query.transaction_type.as_deref()))
            .filter(|t| in_range(t.occurred_at.date_naive(), query.from, query.to))
            .map(|t| t.clone())
            .collect();
        transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Transaction>> {
        Ok(self.transactions.get(&id).map(|t| t.clone()))
    }

    async fn create(&self, fields: TransactionFields) -> StoreResult<i64> {
        self.check_transaction(&fields)?;
        let id = self.next_id();
        self.transactions.insert(
            id,
            Transaction {
                id,
                account_id: fields.account_id,
                employee_id: fields.employee_id,
                transaction_type: fields.transaction_type,
                amount: fields.amount,
                occurred_at: fields.occurred_at,
                description: fields.description,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: TransactionFields) -> StoreResult<bool> {
        if !self.transactions.contains_key(&id) {
            return Ok(false);
        }
        self.check_transaction(&fields)?;
        let Some(mut tx) = self.transactions.get_mut(&id) else {
            return Ok(false);
        };
        tx.account_id = fields.account_id;
        tx.employee_id = fields.employee_id;
        tx.transaction_type = fields.transaction_type;
        tx.amount = fields.amount;
        tx.occurred_at = fields.occurred_at;
        tx.description = fields.description;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.transactions.remove(&id).is_some())
    }
}
