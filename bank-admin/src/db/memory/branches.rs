use async_trait::async_trait;
use shared::models::{Branch, BranchQuery};

use super::{MemoryStore, count_where, matches_filter, unreferenced};
use crate::db::{BranchFields, BranchStore, StoreResult, constraint};

#[async_trait]
impl BranchStore for MemoryStore {
    async fn list(&self, query: &BranchQuery) -> StoreResult<Vec<Branch>> {
        let mut branches: Vec<Branch> = self
            .branches
            .iter()
            .filter(|b| matches_filter(Some(b.name.as_str()), query.name.as_deref()))
            .filter(|b| matches_filter(Some(b.address.as_str()), query.address.as_deref()))
            .map(|b| b.clone())
            .collect();
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Branch>> {
        Ok(self.branches.get(&id).map(|b| b.clone()))
    }

    async fn create(&self, fields: BranchFields) -> StoreResult<i64> {
        let id = self.next_id();
        self.branches.insert(
            id,
            Branch {
                id,
                name: fields.name,
                address: fields.address,
                phone: fields.phone,
                opened_on: fields.opened_on,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: BranchFields) -> StoreResult<bool> {
        let Some(mut branch) = self.branches.get_mut(&id) else {
            return Ok(false);
        };
        branch.name = fields.name;
        branch.address = fields.address;
        branch.phone = fields.phone;
        branch.opened_on = fields.opened_on;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        unreferenced(&self.employees, constraint::EMPLOYEE_BRANCH, |e| e.branch_id == Some(id))?;
        unreferenced(&self.accounts, constraint::ACCOUNT_BRANCH, |a| a.branch_id == id)?;
        unreferenced(&self.loans, constraint::LOAN_BRANCH, |l| l.branch_id == id)?;
        Ok(self.branches.remove(&id).is_some())
    }

    async fn employee_count(&self, branch_id: i64) -> StoreResult<i64> {
        Ok(count_where(&self.employees, |e| e.branch_id == Some(branch_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::fixtures;
    use crate::db::{EmployeeStore, StoreError};

    #[tokio::test]
    async fn test_branch_search_by_name() {
        let store = MemoryStore::new();
        BranchStore::create(&store, fixtures::branch("Norte")).await.unwrap();
        BranchStore::create(&store, fixtures::branch("Centro")).await.unwrap();

        let all = BranchStore::list(&store, &BranchQuery::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Centro", "Norte"]);

        let query = BranchQuery {
            name: Some("nor".into()),
            address: Some("".into()),
        };
        assert_eq!(BranchStore::list(&store, &query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_branch_with_employees_cannot_be_removed() {
        let store = MemoryStore::new();
        let branch = BranchStore::create(&store, fixtures::branch("Centro")).await.unwrap();
        let employee = EmployeeStore::create(&store, fixtures::employee(branch, "Soto"))
            .await
            .unwrap();
        assert_eq!(store.employee_count(branch).await.unwrap(), 1);

        let err = BranchStore::delete(&store, branch).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(c) if c == constraint::EMPLOYEE_BRANCH));

        EmployeeStore::delete(&store, employee).await.unwrap();
        assert!(BranchStore::delete(&store, branch).await.unwrap());
    }
}
