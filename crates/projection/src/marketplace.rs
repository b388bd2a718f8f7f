//! Marketplace offer and purchase handlers.

use alloy::primitives::{Address, U256};

use atelier_chain::{EventMeta, MetadataFetcher, StateResolver};
use atelier_storage::models::{Collection, Offer, Purchase};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

use crate::{Projector, ids, stats};

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub(crate) async fn on_offer_created(
        &self,
        meta: &EventMeta,
        collection_id: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(collection_id);
        let mut offer = self
            .store
            .load::<Offer>(&id)
            .await?
            .unwrap_or_else(|| Offer::new(id.clone()));

        match self.resolver.offer_terms(meta.contract, collection_id).await {
            Ok(terms) => {
                offer.price = Some(terms.price);
                offer.start_time = terms.start_time;
                offer.end_time = terms.end_time;
                offer.platform_fee = terms.platform_fee;
                offer.discount = terms.discount;
            }
            Err(e) => {
                tracing::debug!(offer = %id, error = %e, "Offer terms unavailable");
            }
        }

        offer.collection = self
            .store
            .load::<Collection>(&id)
            .await?
            .map(|collection| collection.id);

        self.store.save(&offer).await
    }

    pub(crate) async fn on_offer_purchased(
        &self,
        meta: &EventMeta,
        collection_id: U256,
        buyer: Address,
        order_id: U256,
        value: U256,
        payment_amount: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(collection_id);
        let Some(mut offer) = self.store.load::<Offer>(&id).await? else {
            tracing::warn!(offer = %id, "Purchase for untracked offer, skipping");
            return Ok(());
        };

        let collection = self.store.load::<Collection>(&id).await?;
        let exchange_rate = self.resolver.oracle_quote(meta.contract).await.ok();

        let purchase = Purchase {
            id: ids::log_entry_id(&id, &meta.tx_hash, meta.log_index),
            buyer: ids::address_id(buyer),
            order_id,
            value,
            payment_amount,
            exchange_rate,
            // Rarity is a point-in-time copy from the collection.
            rarity: collection
                .as_ref()
                .map(|c| c.rarity.clone())
                .unwrap_or_default(),
            timestamp: meta.timestamp,
        };
        self.store.save(&purchase).await?;

        offer.amount_sold = offer.amount_sold.saturating_add(value);
        self.store.save(&offer).await?;

        if let Some(mut collection) = collection {
            collection.value_sold = collection.value_sold.saturating_add(value);
            self.store.save(&collection).await?;
        }

        stats::record_purchase(&self.store, &ids::day_id(meta.timestamp), value, exchange_rate)
            .await
    }

    pub(crate) async fn on_offer_cancelled(
        &self,
        _meta: &EventMeta,
        collection_id: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(collection_id);
        let Some(mut offer) = self.store.load::<Offer>(&id).await? else {
            tracing::warn!(offer = %id, "Cancellation for untracked offer, skipping");
            return Ok(());
        };

        // Cancellation clears the price and association; the row stays.
        offer.price = None;
        offer.collection = None;
        self.store.save(&offer).await
    }
}
