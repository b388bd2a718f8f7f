//! Designer registry handlers.

use alloy::primitives::Address;

use atelier_chain::ipfs::string_field;
use atelier_chain::{MetadataFetcher, StateResolver};
use atelier_storage::models::{Auction, Collection, Designer};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

use crate::{Projector, ids};

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub(crate) async fn on_designer_added(
        &self,
        designer: Address,
        uri: &str,
    ) -> Result<(), StoreError> {
        let id = self
            .remap
            .canonical(&ids::address_id(designer))
            .to_string();
        let mut record = self
            .store
            .load::<Designer>(&id)
            .await?
            .unwrap_or_else(|| Designer::new(id.clone()));

        if let Some(doc) = self.fetcher.fetch(uri).await {
            if let Some(name) = string_field(&doc, "name") {
                record.name = name;
            }
            if let Some(description) = string_field(&doc, "description") {
                record.description = description;
            }
            if let Some(image) = string_field(&doc, "image") {
                record.image = image;
            }
            if let Some(twitter) = string_field(&doc, "twitter") {
                record.twitter = twitter;
            }
            if let Some(instagram) = string_field(&doc, "instagram") {
                record.instagram = instagram;
            }
        }
        self.observe_uri(uri).await;

        self.store.save(&record).await
    }

    /// Group membership revoked: clear every back-reference first, then
    /// remove the row, so no optional field references a deleted entity.
    pub(crate) async fn on_designer_removed(&self, designer: Address) -> Result<(), StoreError> {
        let id = self
            .remap
            .canonical(&ids::address_id(designer))
            .to_string();

        for mut collection in self.store.all::<Collection>().await? {
            if collection.designer.as_deref() == Some(id.as_str()) {
                collection.designer = None;
                self.store.save(&collection).await?;
            }
        }

        for mut auction in self.store.all::<Auction>().await? {
            if auction.designer.as_deref() == Some(id.as_str()) {
                auction.designer = None;
                self.store.save(&auction).await?;
            }
        }

        self.store.remove::<Designer>(&id).await
    }
}
