//! Staking contract handlers.

use alloy::primitives::{Address, U256};

use atelier_chain::{EventMeta, MetadataFetcher, StateResolver};
use atelier_storage::models::{Garment, Staker, WhitelistedToken};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

use crate::{Projector, ids};

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub(crate) async fn on_garment_staked(
        &self,
        meta: &EventMeta,
        staker: Address,
        token_id: U256,
    ) -> Result<(), StoreError> {
        let staker_id = ids::address_id(staker);
        let mut record = self
            .store
            .load::<Staker>(&staker_id)
            .await?
            .unwrap_or_else(|| Staker::new(staker_id.clone()));

        let garment_id = ids::garment_id(self.contracts.garment_nft, token_id);
        record.garments.push(garment_id.clone());
        self.refresh_staker_weight(meta, &mut record, staker).await;
        self.store.save(&record).await?;

        // The staked garment's own weight may have just changed on-chain.
        if let Some(mut garment) = self.store.load::<Garment>(&garment_id).await? {
            if let Ok(weight) = self
                .resolver
                .garment_weight(self.contracts.garment_nft, token_id)
                .await
            {
                garment.weight = Some(weight);
                self.store.save(&garment).await?;
            }
        }

        Ok(())
    }

    pub(crate) async fn on_garment_unstaked(
        &self,
        meta: &EventMeta,
        staker: Address,
        token_id: U256,
    ) -> Result<(), StoreError> {
        let staker_id = ids::address_id(staker);
        let Some(mut record) = self.store.load::<Staker>(&staker_id).await? else {
            tracing::warn!(staker = %staker_id, "Unstake for untracked staker, skipping");
            return Ok(());
        };

        // Linear scan-and-filter, preserving the relative order of the rest.
        let garment_id = ids::garment_id(self.contracts.garment_nft, token_id);
        record.garments.retain(|g| g != &garment_id);

        self.refresh_staker_weight(meta, &mut record, staker).await;
        self.store.save(&record).await
    }

    pub(crate) async fn on_reward_paid(
        &self,
        _meta: &EventMeta,
        staker: Address,
        amount: U256,
    ) -> Result<(), StoreError> {
        let staker_id = ids::address_id(staker);
        let mut record = self
            .store
            .load::<Staker>(&staker_id)
            .await?
            .unwrap_or_else(|| Staker::new(staker_id.clone()));

        record.rewards_claimed = record.rewards_claimed.saturating_add(amount);
        self.store.save(&record).await
    }

    pub(crate) async fn on_token_whitelisted(&self, token: Address) -> Result<(), StoreError> {
        let id = ids::address_id(token);
        // Registry entries are written once and immutable thereafter.
        if self.store.load::<WhitelistedToken>(&id).await?.is_some() {
            return Ok(());
        }

        let name = self.resolver.token_name(token).await.ok();
        self.store.save(&WhitelistedToken { id, name }).await
    }

    /// Overwrite (never accumulate) the staker's weight from the contract;
    /// a revert keeps the prior value.
    async fn refresh_staker_weight(&self, meta: &EventMeta, record: &mut Staker, staker: Address) {
        match self.resolver.staker_weight(meta.contract, staker).await {
            Ok(weight) => record.weight = weight,
            Err(e) => {
                tracing::debug!(staker = %record.id, error = %e, "Staker weight unavailable");
            }
        }
    }
}
