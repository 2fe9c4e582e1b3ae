use async_trait::async_trait;
use shared::models::{Client, ClientQuery};

use super::{MemoryStore, count_where, in_range, matches_filter, unreferenced};
use crate::db::{ClientFields, ClientStore, StoreResult, constraint};

#[async_trait]
impl ClientStore for MemoryStore {
    async fn list(&self, query: &ClientQuery) -> StoreResult<Vec<Client>> {
        let mut clients: Vec<Client> = self
            .clients
            .iter()
            .filter(|c| matches_filter(Some(c.first_name.as_str()), query.first_name.as_deref()))
            .filter(|c| matches_filter(Some(c.last_name.as_str()), query.last_name.as_deref()))
            .filter(|c| matches_filter(c.email.as_deref(), query.email.as_deref()))
            .filter(|c| in_range(c.registered_on, query.registered_from, query.registered_to))
            .map(|c| c.clone())
            .collect();
        clients.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(clients)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Client>> {
        Ok(self.clients.get(&id).map(|c| c.clone()))
    }

    async fn create(&self, fields: ClientFields) -> StoreResult<i64> {
        let id = self.next_id();
        self.clients.insert(
            id,
            Client {
                id,
                first_name: fields.first_name,
                last_name: fields.last_name,
                address: fields.address,
                phone: fields.phone,
                email: fields.email,
                registered_on: fields.registered_on,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: ClientFields) -> StoreResult<bool> {
        let Some(mut client) = self.clients.get_mut(&id) else {
            return Ok(false);
        };
        client.first_name = fields.first_name;
        client.last_name = fields.last_name;
        client.address = fields.address;
        client.phone = fields.phone;
        client.email = fields.email;
        client.registered_on = fields.registered_on;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        unreferenced(&self.accounts, constraint::ACCOUNT_CLIENT, |a| a.client_id == id)?;
        unreferenced(&self.loans, constraint::LOAN_CLIENT, |l| l.client_id == id)?;
        unreferenced(&self.cards, constraint::CARD_CLIENT, |c| c.client_id == id)?;
        Ok(self.clients.remove(&id).is_some())
    }

    async fn account_count(&self, client_id: i64) -> StoreResult<i64> {
        Ok(count_where(&self.accounts, |a| a.client_id == client_id))
    }
}
