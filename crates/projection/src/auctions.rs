//! Auction house handlers and the append-only auction history log.

use alloy::primitives::{Address, U256};

use atelier_chain::{EventMeta, MetadataFetcher, StateResolver};
use atelier_storage::models::{Auction, AuctionEvent, AuctionEventKind, Garment};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

use crate::{Projector, ids, stats};

impl<S, R, F> Projector<S, R, F>
where
    S: EntityStore,
    R: StateResolver,
    F: MetadataFetcher,
{
    pub(crate) async fn on_auction_created(
        &self,
        meta: &EventMeta,
        token_id: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(token_id);

        // Re-listing overwrites the auction row; the history log below is
        // what preserves the earlier listing's trace.
        let mut auction = Auction::new(id.clone());
        match self.resolver.auction_terms(meta.contract, token_id).await {
            Ok(terms) => {
                auction.reserve_price = terms.reserve_price;
                auction.start_time = terms.start_time;
                auction.end_time = terms.end_time;
            }
            Err(e) => {
                tracing::debug!(auction = %id, error = %e, "Auction terms unavailable");
            }
        }

        let garment_id = ids::garment_id(self.contracts.garment_nft, token_id);
        if let Some(garment) = self.store.load::<Garment>(&garment_id).await? {
            auction.designer = garment.designer.clone();
        }

        self.store.save(&auction).await?;
        self.record_history(meta, &id, AuctionEventKind::Created, None, None)
            .await
    }

    pub(crate) async fn on_bid_placed(
        &self,
        meta: &EventMeta,
        token_id: U256,
        bidder: Address,
        value: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(token_id);
        let Some(mut auction) = self.store.load::<Auction>(&id).await? else {
            tracing::warn!(auction = %id, "Bid for untracked auction, skipping");
            return Ok(());
        };

        let replaced = auction.top_bid;
        let bidder_id = ids::address_id(bidder);
        auction.top_bidder = Some(bidder_id.clone());
        auction.top_bid = Some(value);
        auction.last_bid_time = Some(meta.timestamp);
        self.store.save(&auction).await?;

        stats::record_bid(&self.store, &ids::day_id(meta.timestamp), value, replaced).await?;
        self.record_history(
            meta,
            &id,
            AuctionEventKind::BidPlaced,
            Some(bidder_id),
            Some(value),
        )
        .await
    }

    pub(crate) async fn on_bid_withdrawn(
        &self,
        meta: &EventMeta,
        token_id: U256,
        bidder: Address,
        value: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(token_id);
        let Some(mut auction) = self.store.load::<Auction>(&id).await? else {
            tracing::warn!(auction = %id, "Withdrawal for untracked auction, skipping");
            return Ok(());
        };

        // A withdrawal must have a matching tracked bid; otherwise the
        // subtraction below would have no confirmed prior addition.
        if auction.top_bid.is_none() {
            tracing::warn!(auction = %id, "Withdrawal without a tracked bid, skipping");
            return Ok(());
        }

        auction.top_bidder = None;
        auction.top_bid = None;
        auction.last_bid_time = None;
        self.store.save(&auction).await?;

        stats::record_withdrawal(&self.store, &ids::day_id(meta.timestamp), value).await?;
        self.record_history(
            meta,
            &id,
            AuctionEventKind::BidWithdrawn,
            Some(ids::address_id(bidder)),
            Some(value),
        )
        .await
    }

    pub(crate) async fn on_auction_resulted(
        &self,
        meta: &EventMeta,
        token_id: U256,
        winner: Address,
        winning_bid: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(token_id);
        let Some(mut auction) = self.store.load::<Auction>(&id).await? else {
            tracing::warn!(auction = %id, "Result for untracked auction, skipping");
            return Ok(());
        };

        auction.resulted = true;
        auction.resulted_at = Some(meta.timestamp);
        // The winning bid is no longer an open bid; release its
        // contribution while keeping the final bidder/bid on the row.
        if let Some(top) = auction.top_bid {
            stats::release_active_bid(&self.store, top).await?;
        }
        self.store.save(&auction).await?;

        self.record_history(
            meta,
            &id,
            AuctionEventKind::Resulted,
            Some(ids::address_id(winner)),
            Some(winning_bid),
        )
        .await
    }

    pub(crate) async fn on_auction_cancelled(
        &self,
        meta: &EventMeta,
        token_id: U256,
    ) -> Result<(), StoreError> {
        let id = ids::token_id(token_id);
        let Some(mut auction) = self.store.load::<Auction>(&id).await? else {
            tracing::warn!(auction = %id, "Cancellation for untracked auction, skipping");
            return Ok(());
        };

        // Reverse the open bid's contribution before clearing the fields.
        if let Some(top) = auction.top_bid {
            stats::release_active_bid(&self.store, top).await?;
        }
        auction.top_bidder = None;
        auction.top_bid = None;
        auction.last_bid_time = None;
        self.store.save(&auction).await?;

        self.record_history(meta, &id, AuctionEventKind::Cancelled, None, None)
            .await
    }

    async fn record_history(
        &self,
        meta: &EventMeta,
        auction_id: &str,
        kind: AuctionEventKind,
        bidder: Option<String>,
        value: Option<U256>,
    ) -> Result<(), StoreError> {
        let entry = AuctionEvent {
            id: ids::log_entry_id(auction_id, &meta.tx_hash, meta.log_index),
            auction: auction_id.to_string(),
            kind,
            bidder,
            value,
            timestamp: meta.timestamp,
            tx_hash: meta.tx_hash.clone(),
        };
        self.store.save(&entry).await
    }
}
