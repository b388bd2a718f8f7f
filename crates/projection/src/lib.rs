//! Projection of ordered platform events into the entity store.
//!
//! One [`Projector`] instance is the single writer: events are handled one
//! at a time in blockchain order, and every entity a handler mutates is
//! persisted before the handler returns. External lookups (contract state,
//! off-chain metadata) are fail-tolerant — a revert or a bad document skips
//! the affected field, never the event.

pub mod auctions;
pub mod designers;
pub mod garments;
pub mod ids;
pub mod marketplace;
pub mod remap;
pub mod staking;
pub mod stats;

use tokio::sync::Mutex;

use atelier_chain::ipfs::extract_cid;
use atelier_chain::{ChainEvent, ContractSet, EventKind, MetadataFetcher, StateResolver};
use atelier_storage::{EntityStore, StoreError};

pub use remap::RemapTable;

/// Event projector: derives ids, loads-or-creates entities, merges event and
/// resolved data, maintains aggregates, and persists.
pub struct Projector<S, R, F> {
    store: S,
    resolver: R,
    fetcher: F,
    contracts: ContractSet,
    remap: RemapTable,
    /// Content hashes observed since the last drain, handed to the
    /// out-of-band pinning service. Never read by handlers.
    observed: Mutex<Vec<String>>,
}

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub fn new(store: S, resolver: R, fetcher: F, contracts: ContractSet, remap: RemapTable) -> Self {
        Self {
            store,
            resolver,
            fetcher,
            contracts,
            remap,
            observed: Mutex::new(Vec::new()),
        }
    }

    /// Apply one decoded event to the projection.
    ///
    /// Only store failures propagate; everything else is handled inside and
    /// at worst leaves a field at its default.
    pub async fn handle(&self, event: &ChainEvent) -> Result<(), StoreError> {
        let meta = &event.meta;
        match &event.kind {
            EventKind::GarmentMinted { token_id, owner } => {
                self.on_garment_minted(meta, *token_id, *owner).await
            }
            EventKind::GarmentTransferred { from, to, token_id } => {
                self.on_garment_transferred(meta, *from, *to, *token_id).await
            }
            EventKind::CollectionMinted {
                collection_id,
                designer,
                rarity,
                token_ids,
            } => {
                self.on_collection_minted(meta, *collection_id, *designer, rarity, token_ids)
                    .await
            }
            EventKind::GarmentStaked { staker, token_id } => {
                self.on_garment_staked(meta, *staker, *token_id).await
            }
            EventKind::GarmentUnstaked { staker, token_id } => {
                self.on_garment_unstaked(meta, *staker, *token_id).await
            }
            EventKind::RewardPaid { staker, amount } => {
                self.on_reward_paid(meta, *staker, *amount).await
            }
            EventKind::TokenWhitelisted { token } => self.on_token_whitelisted(*token).await,
            EventKind::AuctionCreated { token_id } => {
                self.on_auction_created(meta, *token_id).await
            }
            EventKind::BidPlaced {
                token_id,
                bidder,
                value,
            } => self.on_bid_placed(meta, *token_id, *bidder, *value).await,
            EventKind::BidWithdrawn {
                token_id,
                bidder,
                value,
            } => self.on_bid_withdrawn(meta, *token_id, *bidder, *value).await,
            EventKind::AuctionResulted {
                token_id,
                winner,
                winning_bid,
            } => {
                self.on_auction_resulted(meta, *token_id, *winner, *winning_bid)
                    .await
            }
            EventKind::AuctionCancelled { token_id } => {
                self.on_auction_cancelled(meta, *token_id).await
            }
            EventKind::OfferCreated { collection_id } => {
                self.on_offer_created(meta, *collection_id).await
            }
            EventKind::OfferPurchased {
                collection_id,
                buyer,
                order_id,
                value,
                payment_amount,
            } => {
                self.on_offer_purchased(
                    meta,
                    *collection_id,
                    *buyer,
                    *order_id,
                    *value,
                    *payment_amount,
                )
                .await
            }
            EventKind::OfferCancelled { collection_id } => {
                self.on_offer_cancelled(meta, *collection_id).await
            }
            EventKind::DesignerAdded { designer, uri } => {
                self.on_designer_added(*designer, uri).await
            }
            EventKind::DesignerRemoved { designer } => self.on_designer_removed(*designer).await,
        }
    }

    /// Take the content hashes observed since the last call.
    pub async fn drain_observed(&self) -> Vec<String> {
        std::mem::take(&mut *self.observed.lock().await)
    }

    /// Record the content hash behind a metadata URI, if it has one.
    pub(crate) async fn observe_uri(&self, uri: &str) {
        if let Some(cid) = extract_cid(uri) {
            self.observed.lock().await.push(cid);
        }
    }
}
