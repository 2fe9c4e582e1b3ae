use async_trait::async_trait;
use shared::models::{Employee, EmployeeQuery};

use super::{MemoryStore, count_where, matches_filter, references, unreferenced};
use crate::db::{EmployeeFields, EmployeeStore, StoreResult, constraint};

impl MemoryStore {
    fn check_employee(&self, fields: &EmployeeFields) -> StoreResult<()> {
        if let Some(branch_id) = fields.branch_id {
            references(&self.branches, branch_id, constraint::EMPLOYEE_BRANCH)?;
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list(&self, query: &EmployeeQuery) -> StoreResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self
            .employees
            .iter()
            .filter(|e| matches_filter(Some(e.first_name.as_str()), query.first_name.as_deref()))
            .filter(|e| matches_filter(Some(e.last_name.as_str()), query.last_name.as_deref()))
            .filter(|e| matches_filter(Some(e.position.as_str()), query.position.as_deref()))
            .filter(|e| query.branch_id.is_none_or(|b| e.branch_id == Some(b)))
            .map(|e| e.clone())
            .collect();
        employees.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(employees)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Employee>> {
        Ok(self.employees.get(&id).map(|e| e.clone()))
    }

    async fn create(&self, fields: EmployeeFields) -> StoreResult<i64> {
        self.check_employee(&fields)?;
        let id = self.next_id();
        self.employees.insert(
            id,
            Employee {
                id,
                branch_id: fields.branch_id,
                first_name: fields.first_name,
                last_name: fields.last_name,
                position: fields.position,
                phone: fields.phone,
                email: fields.email,
                hired_on: fields.hired_on,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: EmployeeFields) -> StoreResult<bool> {
        if !self.employees.contains_key(&id) {
            return Ok(false);
        }
        self.check_employee(&fields)?;
        let Some(mut employee) = self.employees.get_mut(&id) else {
            return Ok(false);
        };
        employee.branch_id = fields.branch_id;
        employee.first_name = fields.first_name;
        employee.last_name = fields.last_name;
        employee.position = fields.position;
        employee.phone = fields.phone;
        employee.email = fields.email;
        employee.hired_on = fields.hired_on;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        unreferenced(&self.accounts, constraint::ACCOUNT_EMPLOYEE, |a| a.employee_id == id)?;
        unreferenced(&self.transactions, constraint::TRANSACTION_EMPLOYEE, |t| {
            t.employee_id == Some(id)
        })?;
        unreferenced(&self.loans, constraint::LOAN_EMPLOYEE, |l| l.employee_id == id)?;
        if self.employees.remove(&id).is_none() {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for mut user in self.users.iter_mut() {
            if user.employee_id == Some(id) {
                user.employee_id = None;
            }
        }
        Ok(true)
    }

    async fn account_count(&self, employee_id: i64) -> StoreResult<i64> {
        Ok(count_where(&self.accounts, |a| a.employee_id == employee_id))
    }
}
