use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{User, UserQuery};

use super::{MemoryStore, matches_filter, references};
use crate::db::{NewUser, StoreError, StoreResult, UserChanges, UserStore, constraint};

impl MemoryStore {
    fn check_user(&self, username: &str, employee_id: Option<i64>, id: Option<i64>) -> StoreResult<()> {
        if self
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id) != id)
        {
            return Err(StoreError::Duplicate(constraint::USERNAME_UNIQUE.to_string()));
        }
        if let Some(employee_id) = employee_id {
            references(&self.employees, employee_id, constraint::USER_EMPLOYEE)?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn list(&self, query: &UserQuery) -> StoreResult<Vec<User>> {
        let role = shared::util::non_blank(query.role.as_deref());
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| matches_filter(Some(u.username.as_str()), query.username.as_deref()))
            .filter(|u| role.is_none_or(|r| u.role == r))
            .filter(|u| query.employee_id.is_none_or(|e| u.employee_id == Some(e)))
            .map(|u| u.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        Ok(self
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id) != exclude_id))
    }

    async fn create(&self, user: NewUser) -> StoreResult<i64> {
        self.check_user(&user.username, user.employee_id, None)?;
        let id = self.next_id();
        self.users.insert(
            id,
            User {
                id,
                username: user.username,
                password_hash: user.password_hash,
                role: user.role,
                employee_id: user.employee_id,
                last_access: None,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<bool> {
        if !self.users.contains_key(&id) {
            return Ok(false);
        }
        self.check_user(&changes.username, changes.employee_id, Some(id))?;
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(false);
        };
        user.username = changes.username;
        user.role = changes.role;
        user.employee_id = changes.employee_id;
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.users.remove(&id).is_some())
    }

    async fn touch_last_access(&self, id: i64, at: DateTime<Utc>) -> StoreResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_access = Some(at);
        }
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.users.len() as i64)
    }
}
