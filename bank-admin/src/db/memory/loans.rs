use async_trait::async_trait;
use shared::models::{Loan, LoanQuery};

use super::{MemoryStore, matches_exact, references};
use crate::db::{LoanFields, LoanStore, StoreResult, constraint};

impl MemoryStore {
    fn check_loan(&self, fields: &LoanFields) -> StoreResult<()> {
        references(&self.clients, fields.client_id, constraint::LOAN_CLIENT)?;
        references(&self.employees, fields.employee_id, constraint::LOAN_EMPLOYEE)?;
        references(&self.branches, fields.branch_id, constraint::LOAN_BRANCH)
    }
}

#[async_trait]
impl LoanStore for MemoryStore {
    async fn list(&self, query: &LoanQuery) -> StoreResult<Vec<Loan>> {
        let mut loans: Vec<Loan> = self
            .loans
            .iter()
            .filter(|l| query.client_id.is_none_or(|c| l.client_id == c))
            .filter(|l| query.branch_id.is_none_or(|b| l.branch_id == b))
            .filter(|l| query.employee_id.is_none_or(|e| l.employee_id == e))
            .filter(|l| matches_exact(&l.status, query.status.as_deref()))
            .map(|l| l.clone())
            .collect();
        loans.sort_by(|a, b| b.approved_on.cmp(&a.approved_on).then(b.id.cmp(&a.id)));
        Ok(loans)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Loan>> {
        Ok(self.loans.get(&id).map(|l| l.clone()))
    }

    async fn create(&self, fields: LoanFields) -> StoreResult<i64> {
        self.check_loan(&fields)?;
        let id = self.next_id();
        self.loans.insert(
            id,
            Loan {
                id,
                client_id: fields.client_id,
                employee_id: fields.employee_id,
                branch_id: fields.branch_id,
                amount: fields.amount,
                interest_rate: fields.interest_rate,
                term_months: fields.term_months,
                approved_on: fields.approved_on,
                status: fields.status,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: LoanFields) -> StoreResult<bool> {
        if !self.loans.contains_key(&id) {
            return Ok(false);
        }
        self.check_loan(&fields)?;
        let Some(mut loan) = self.loans.get_mut(&id) else {
            return Ok(false);
        };
        loan.client_id = fields.client_id;
        loan.employee_id = fields.employee_id;
        loan.branch_id = fields.branch_id;
        loan.amount = fields.amount;
        loan.interest_rate = fields.interest_rate;
        loan.term_months = fields.term_months;
        loan.approved_on = fields.approved_on;
        loan.status = fields.status;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.loans.remove(&id).is_some())
    }
}
