use async_trait::async_trait;
use shared::models::{CreditCard, CreditCardQuery};

use super::{MemoryStore, matches_exact, references};
use crate::db::{CreditCardFields, CreditCardStore, StoreResult, constraint};

impl MemoryStore {
    fn check_card(&self, fields: &CreditCardFields) -> StoreResult<()> {
        references(&self.accounts, fields.account_id, constraint::CARD_ACCOUNT)?;
        references(&self.clients, fields.client_id, constraint::CARD_CLIENT)
    }
}

#[async_trait]
impl CreditCardStore for MemoryStore {
    async fn list(&self, query: &CreditCardQuery) -> StoreResult<Vec<CreditCard>> {
        let mut cards: Vec<CreditCard> = self
            .cards
            .iter()
            .filter(|c| query.client_id.is_none_or(|id| c.client_id == id))
            .filter(|c| query.account_id.is_none_or(|id| c.account_id == id))
            .filter(|c| matches_exact(&c.card_type, query.card_type.as_deref()))
            .filter(|c| matches_exact(&c.status, query.status.as_deref()))
            .map(|c| c.clone())
            .collect();
        cards.sort_by_key(|c| c.id);
        Ok(cards)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<CreditCard>> {
        Ok(self.cards.get(&id).map(|c| c.clone()))
    }

    async fn create(&self, fields: CreditCardFields) -> StoreResult<i64> {
        self.check_card(&fields)?;
        let id = self.next_id();
        self.cards.insert(
            id,
            CreditCard {
                id,
                account_id: fields.account_id,
                client_id: fields.client_id,
                card_type: fields.card_type,
                number: fields.number,
                credit_limit: fields.credit_limit,
                issued_on: fields.issued_on,
                expires_on: fields.expires_on,
                status: fields.status,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: CreditCardFields) -> StoreResult<bool> {
        if !self.cards.contains_key(&id) {
            return Ok(false);
        }
        self.check_card(&fields)?;
        let Some(mut card) = self.cards.get_mut(&id) else {
            return Ok(false);
        };
        card.account_id = fields.account_id;
        card.client_id = fields.client_id;
        card.card_type = fields.card_type;
        card.number = fields.number;
        card.credit_limit = fields.credit_limit;
        card.issued_on = fields.issued_on;
        card.expires_on = fields.expires_on;
        card.status = fields.status;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.cards.remove(&id).is_some())
    }
}
