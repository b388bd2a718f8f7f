//! Garment NFT and collection handlers.

use alloy::primitives::{Address, U256};

use atelier_chain::ipfs::string_field;
use atelier_chain::{EventMeta, MetadataFetcher, StateResolver};
use atelier_storage::models::{Collection, Garment};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

use crate::{Projector, ids};

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub(crate) async fn on_garment_minted(
        &self,
        meta: &EventMeta,
        token_id: U256,
        owner: Address,
    ) -> Result<(), StoreError> {
        let id = ids::garment_id(meta.contract, token_id);
        let mut garment = match self.store.load::<Garment>(&id).await? {
            Some(existing) => existing,
            None => Garment::new(
                id.clone(),
                ids::address_id(meta.contract),
                ids::address_id(owner),
                meta.timestamp,
            ),
        };
        garment.owner = ids::address_id(owner);

        match self.resolver.token_uri(meta.contract, token_id).await {
            Ok(uri) => {
                garment.token_uri = uri.clone();
                if let Some(doc) = self.fetcher.fetch(&uri).await {
                    if let Some(name) = string_field(&doc, "name") {
                        garment.name = name;
                    }
                    if let Some(description) = string_field(&doc, "description") {
                        garment.description = description;
                    }
                    if let Some(image) = string_field(&doc, "image") {
                        garment.image = image;
                    }
                    if let Some(animation) = string_field(&doc, "animation_url") {
                        garment.animation = animation;
                    }
                }
                self.observe_uri(&uri).await;
            }
            Err(e) => {
                tracing::debug!(garment = %id, error = %e, "Token URI unavailable");
            }
        }

        if let Ok(weight) = self.resolver.garment_weight(meta.contract, token_id).await {
            garment.weight = Some(weight);
        }

        self.store.save(&garment).await
    }

    pub(crate) async fn on_garment_transferred(
        &self,
        meta: &EventMeta,
        _from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), StoreError> {
        let id = ids::garment_id(meta.contract, token_id);
        let Some(mut garment) = self.store.load::<Garment>(&id).await? else {
            tracing::warn!(garment = %id, "Transfer for untracked garment, skipping");
            return Ok(());
        };

        // A transfer to the zero address is a burn; the overwritten owner
        // marks it and the row stays.
        garment.owner = ids::address_id(to);
        self.store.save(&garment).await
    }

    pub(crate) async fn on_collection_minted(
        &self,
        _meta: &EventMeta,
        collection_id: U256,
        designer: Address,
        rarity: &str,
        token_ids: &[U256],
    ) -> Result<(), StoreError> {
        let id = ids::token_id(collection_id);
        let mut collection = self
            .store
            .load::<Collection>(&id)
            .await?
            .unwrap_or_else(|| Collection::new(id.clone()));

        collection.rarity = rarity.to_string();
        let designer_id = self
            .remap
            .canonical(&ids::address_id(designer))
            .to_string();
        collection.designer = Some(designer_id.clone());

        for token in token_ids {
            let garment_id = ids::garment_id(self.contracts.garment_nft, *token);
            // Re-mints append again; the member list keeps duplicates.
            collection.garments.push(garment_id.clone());

            if let Some(mut garment) = self.store.load::<Garment>(&garment_id).await? {
                garment.designer = Some(designer_id.clone());
                self.store.save(&garment).await?;
            }
        }

        self.store.save(&collection).await
    }
}
