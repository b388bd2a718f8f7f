//! End-to-end projection scenarios over an in-memory store with stubbed
//! chain access.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{Address, U256, address};
use async_trait::async_trait;
use serde_json::{Value, json};

use atelier_chain::resolver::{AuctionTerms, CallError, CallResult, OfferTerms, StateResolver};
use atelier_chain::{ChainEvent, ContractSet, EventKind, EventMeta, MetadataFetcher};
use atelier_projection::{Projector, RemapTable};
use atelier_storage::models::{
    Auction, AuctionEvent, AuctionEventKind, Collection, Designer, Garment, GlobalStats, Offer,
    Purchase, Staker, WhitelistedToken,
};
use atelier_storage::{EntityStoreExt, MemoryStore};

const NFT: Address = address!("00000000000000000000000000000000000000a1");
const COLLECTION: Address = address!("00000000000000000000000000000000000000a2");
const STAKING: Address = address!("00000000000000000000000000000000000000a3");
const AUCTION: Address = address!("00000000000000000000000000000000000000a4");
const MARKET: Address = address!("00000000000000000000000000000000000000a5");
const REGISTRY: Address = address!("00000000000000000000000000000000000000a6");

const OWNER: Address = address!("00000000000000000000000000000000000000b1");
const BIDDER_A: Address = address!("00000000000000000000000000000000000000b2");
const BIDDER_B: Address = address!("00000000000000000000000000000000000000b3");
const DESIGNER: Address = address!("00000000000000000000000000000000000000c1");

// 2024-03-05T00:00:00Z
const TS: u64 = 1_709_596_800;

fn contracts() -> ContractSet {
    ContractSet {
        garment_nft: NFT,
        garment_collection: COLLECTION,
        staking: STAKING,
        auction: AUCTION,
        marketplace: MARKET,
        designer_registry: REGISTRY,
    }
}

fn ev(contract: Address, log_index: u64, kind: EventKind) -> ChainEvent {
    ChainEvent {
        meta: EventMeta {
            contract,
            block_number: 1,
            timestamp: TS,
            tx_hash: format!("0x{log_index:04x}"),
            tx_index: 0,
            log_index,
        },
        kind,
    }
}

// ─── Stubs ──────────────────────────────────────────────────────────────────

struct NullFetcher;

#[async_trait]
impl MetadataFetcher for NullFetcher {
    async fn fetch(&self, _uri: &str) -> Option<Value> {
        None
    }
}

struct StaticFetcher(HashMap<String, Value>);

#[async_trait]
impl MetadataFetcher for StaticFetcher {
    async fn fetch(&self, uri: &str) -> Option<Value> {
        self.0.get(uri).cloned()
    }
}

/// Resolver where every configured method returns its value and everything
/// else reverts.
#[derive(Default, Clone)]
struct FixedResolver {
    uri: Option<String>,
    garment_weight: Option<U256>,
    staker_weight: Option<U256>,
    token_name: Option<String>,
    auction_terms: Option<AuctionTerms>,
    offer_terms: Option<OfferTerms>,
    quote: Option<U256>,
}

#[async_trait]
impl StateResolver for FixedResolver {
    async fn token_uri(&self, _contract: Address, _token_id: U256) -> CallResult<String> {
        self.uri.clone().ok_or(CallError::Reverted)
    }

    async fn garment_weight(&self, _contract: Address, _token_id: U256) -> CallResult<U256> {
        self.garment_weight.ok_or(CallError::Reverted)
    }

    async fn staker_weight(&self, _contract: Address, _staker: Address) -> CallResult<U256> {
        self.staker_weight.ok_or(CallError::Reverted)
    }

    async fn token_name(&self, _token: Address) -> CallResult<String> {
        self.token_name.clone().ok_or(CallError::Reverted)
    }

    async fn auction_terms(
        &self,
        _contract: Address,
        _token_id: U256,
    ) -> CallResult<AuctionTerms> {
        self.auction_terms.ok_or(CallError::Reverted)
    }

    async fn offer_terms(&self, _contract: Address, _collection_id: U256) -> CallResult<OfferTerms> {
        self.offer_terms.ok_or(CallError::Reverted)
    }

    async fn oracle_quote(&self, _contract: Address) -> CallResult<U256> {
        self.quote.ok_or(CallError::Reverted)
    }
}

/// Resolver where every call reverts.
fn reverting() -> FixedResolver {
    FixedResolver::default()
}

type TestProjector<R, F> = Projector<Arc<MemoryStore>, R, F>;

fn projector<R: StateResolver, F: MetadataFetcher>(
    store: &Arc<MemoryStore>,
    resolver: R,
    fetcher: F,
) -> TestProjector<R, F> {
    Projector::new(
        store.clone(),
        resolver,
        fetcher,
        contracts(),
        RemapTable::default(),
    )
}

fn garment_key(token: u64) -> String {
    format!("{NFT:#x}-{token}")
}

async fn global(store: &MemoryStore) -> GlobalStats {
    store.load::<GlobalStats>("1").await.unwrap().unwrap()
}

// ─── Garments ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn mint_with_failed_lookups_creates_default_garment() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        NFT,
        0,
        EventKind::GarmentMinted {
            token_id: U256::from(42),
            owner: OWNER,
        },
    ))
    .await
    .unwrap();

    let garment = store
        .load::<Garment>(&garment_key(42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(garment.owner, format!("{OWNER:#x}"));
    assert_eq!(garment.name, "");
    assert_eq!(garment.description, "");
    assert_eq!(garment.image, "");
    assert_eq!(garment.animation, "");
    assert_eq!(garment.token_uri, "");
    assert!(garment.weight.is_none());
    assert_eq!(garment.created_at, TS);
}

#[tokio::test]
async fn mint_fills_metadata_fields_independently() {
    let store = Arc::new(MemoryStore::new());
    let doc = json!({
        "name": "Silk Bomber",
        "description": 7,
        "image": "ipfs://QmImage",
    });
    let fetcher = StaticFetcher(HashMap::from([("ipfs://QmMeta".to_string(), doc)]));
    let resolver = FixedResolver {
        uri: Some("ipfs://QmMeta".to_string()),
        garment_weight: Some(U256::from(9)),
        ..Default::default()
    };
    let p = projector(&store, resolver, fetcher);

    p.handle(&ev(
        NFT,
        0,
        EventKind::GarmentMinted {
            token_id: U256::from(1),
            owner: OWNER,
        },
    ))
    .await
    .unwrap();

    let garment = store
        .load::<Garment>(&garment_key(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(garment.name, "Silk Bomber");
    // Wrong JSON type: the field keeps its default.
    assert_eq!(garment.description, "");
    assert_eq!(garment.image, "ipfs://QmImage");
    assert_eq!(garment.weight, Some(U256::from(9)));

    // The document's hash is queued for the out-of-band sync service.
    assert_eq!(p.drain_observed().await, vec!["QmMeta".to_string()]);
    assert!(p.drain_observed().await.is_empty());
}

#[tokio::test]
async fn transfer_for_untracked_garment_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        NFT,
        0,
        EventKind::GarmentTransferred {
            from: OWNER,
            to: BIDDER_A,
            token_id: U256::from(9),
        },
    ))
    .await
    .unwrap();

    assert!(
        store
            .load::<Garment>(&garment_key(9))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn burn_marks_owner_without_deleting_the_row() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        NFT,
        0,
        EventKind::GarmentMinted {
            token_id: U256::from(3),
            owner: OWNER,
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        NFT,
        1,
        EventKind::GarmentTransferred {
            from: OWNER,
            to: Address::ZERO,
            token_id: U256::from(3),
        },
    ))
    .await
    .unwrap();

    let garment = store
        .load::<Garment>(&garment_key(3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(garment.owner, format!("{:#x}", Address::ZERO));
}

// ─── Staking ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stake_with_reverting_resolver_keeps_prior_weight() {
    let store = Arc::new(MemoryStore::new());

    let resolver = FixedResolver {
        staker_weight: Some(U256::from(5)),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);
    p.handle(&ev(
        STAKING,
        0,
        EventKind::GarmentStaked {
            staker: OWNER,
            token_id: U256::from(1),
        },
    ))
    .await
    .unwrap();

    // Same store, but now every contract call reverts.
    let p = projector(&store, reverting(), NullFetcher);
    p.handle(&ev(
        STAKING,
        1,
        EventKind::GarmentStaked {
            staker: OWNER,
            token_id: U256::from(2),
        },
    ))
    .await
    .unwrap();

    let staker = store
        .load::<Staker>(&format!("{OWNER:#x}"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(staker.garments, vec![garment_key(1), garment_key(2)]);
    // Weight is overwritten only on a successful call.
    assert_eq!(staker.weight, U256::from(5));
}

#[tokio::test]
async fn unstake_removes_only_the_departing_garment_in_order() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    for (i, token) in [1u64, 2, 3].into_iter().enumerate() {
        p.handle(&ev(
            STAKING,
            i as u64,
            EventKind::GarmentStaked {
                staker: OWNER,
                token_id: U256::from(token),
            },
        ))
        .await
        .unwrap();
    }
    p.handle(&ev(
        STAKING,
        3,
        EventKind::GarmentUnstaked {
            staker: OWNER,
            token_id: U256::from(2),
        },
    ))
    .await
    .unwrap();

    let staker = store
        .load::<Staker>(&format!("{OWNER:#x}"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(staker.garments, vec![garment_key(1), garment_key(3)]);
}

#[tokio::test]
async fn unstake_without_prior_stake_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        STAKING,
        0,
        EventKind::GarmentUnstaked {
            staker: OWNER,
            token_id: U256::from(1),
        },
    ))
    .await
    .unwrap();

    assert!(
        store
            .load::<Staker>(&format!("{OWNER:#x}"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn rewards_accumulate_across_events() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    for (i, amount) in [10u64, 15].into_iter().enumerate() {
        p.handle(&ev(
            STAKING,
            i as u64,
            EventKind::RewardPaid {
                staker: OWNER,
                amount: U256::from(amount),
            },
        ))
        .await
        .unwrap();
    }

    let staker = store
        .load::<Staker>(&format!("{OWNER:#x}"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(staker.rewards_claimed, U256::from(25));
}

#[tokio::test]
async fn whitelisted_token_is_written_once() {
    let store = Arc::new(MemoryStore::new());
    let token = address!("00000000000000000000000000000000000000d1");

    let resolver = FixedResolver {
        token_name: Some("Mona".to_string()),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);
    p.handle(&ev(STAKING, 0, EventKind::TokenWhitelisted { token }))
        .await
        .unwrap();

    let resolver = FixedResolver {
        token_name: Some("Other".to_string()),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);
    p.handle(&ev(STAKING, 1, EventKind::TokenWhitelisted { token }))
        .await
        .unwrap();

    let record = store
        .load::<WhitelistedToken>(&format!("{token:#x}"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.name.as_deref(), Some("Mona"));
}

// ─── Auctions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn aggregates_stay_consistent_over_a_bid_sequence() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        AUCTION,
        0,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();

    let steps = [
        ev(
            AUCTION,
            1,
            EventKind::BidPlaced {
                token_id: U256::from(7),
                bidder: BIDDER_A,
                value: U256::from(100),
            },
        ),
        ev(
            AUCTION,
            2,
            EventKind::BidPlaced {
                token_id: U256::from(7),
                bidder: BIDDER_B,
                value: U256::from(120),
            },
        ),
        ev(
            AUCTION,
            3,
            EventKind::BidWithdrawn {
                token_id: U256::from(7),
                bidder: BIDDER_B,
                value: U256::from(120),
            },
        ),
    ];

    for step in &steps {
        p.handle(step).await.unwrap();
        let g = global(&store).await;
        assert_eq!(
            g.net_bid_activity,
            g.total_bid_value - g.total_withdrawal_value
        );
    }

    let g = global(&store).await;
    assert_eq!(g.total_bid_value, U256::from(220));
    assert_eq!(g.total_withdrawal_value, U256::from(120));
    // The replacement bid swapped contributions; the withdrawal released it.
    assert_eq!(g.total_active_bids, U256::ZERO);

    let auction = store.load::<Auction>("7").await.unwrap().unwrap();
    assert!(auction.top_bid.is_none());
    assert!(auction.top_bidder.is_none());
}

#[tokio::test]
async fn cancellation_reverses_the_top_bid_and_clears_fields() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        AUCTION,
        0,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        1,
        EventKind::BidPlaced {
            token_id: U256::from(7),
            bidder: BIDDER_A,
            value: U256::from(100),
        },
    ))
    .await
    .unwrap();
    assert_eq!(global(&store).await.total_active_bids, U256::from(100));

    p.handle(&ev(
        AUCTION,
        2,
        EventKind::AuctionCancelled {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();

    assert_eq!(global(&store).await.total_active_bids, U256::ZERO);
    let auction = store.load::<Auction>("7").await.unwrap().unwrap();
    assert!(auction.top_bidder.is_none());
    assert!(auction.top_bid.is_none());
    assert!(auction.last_bid_time.is_none());
}

#[tokio::test]
async fn withdrawal_without_tracked_bid_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        AUCTION,
        0,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        1,
        EventKind::BidWithdrawn {
            token_id: U256::from(7),
            bidder: BIDDER_A,
            value: U256::from(50),
        },
    ))
    .await
    .unwrap();

    // No matching prior bid: nothing was subtracted anywhere.
    assert!(store.load::<GlobalStats>("1").await.unwrap().is_none());
}

#[tokio::test]
async fn resulted_auction_releases_the_winning_bid() {
    let store = Arc::new(MemoryStore::new());
    let resolver = FixedResolver {
        auction_terms: Some(AuctionTerms {
            reserve_price: U256::from(50),
            start_time: TS,
            end_time: TS + 3600,
        }),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);

    p.handle(&ev(
        AUCTION,
        0,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        1,
        EventKind::BidPlaced {
            token_id: U256::from(7),
            bidder: BIDDER_A,
            value: U256::from(100),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        2,
        EventKind::AuctionResulted {
            token_id: U256::from(7),
            winner: BIDDER_A,
            winning_bid: U256::from(100),
        },
    ))
    .await
    .unwrap();

    let auction = store.load::<Auction>("7").await.unwrap().unwrap();
    assert!(auction.resulted);
    assert_eq!(auction.resulted_at, Some(TS));
    assert_eq!(auction.reserve_price, U256::from(50));
    assert_eq!(global(&store).await.total_active_bids, U256::ZERO);
}

#[tokio::test]
async fn relisting_overwrites_the_auction_but_history_survives() {
    let store = Arc::new(MemoryStore::new());
    let p = projector(&store, reverting(), NullFetcher);

    p.handle(&ev(
        AUCTION,
        0,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        1,
        EventKind::BidPlaced {
            token_id: U256::from(7),
            bidder: BIDDER_A,
            value: U256::from(100),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        2,
        EventKind::AuctionCreated {
            token_id: U256::from(7),
        },
    ))
    .await
    .unwrap();

    let auction = store.load::<Auction>("7").await.unwrap().unwrap();
    assert!(auction.top_bid.is_none());

    let mut history = store.all::<AuctionEvent>().await.unwrap();
    history.sort_by_key(|entry| entry.id.clone());
    assert_eq!(history.len(), 3);
    assert_eq!(
        history
            .iter()
            .filter(|entry| entry.kind == AuctionEventKind::Created)
            .count(),
        2
    );
}

// ─── Marketplace ────────────────────────────────────────────────────────────

#[tokio::test]
async fn purchase_copies_rarity_and_accumulates_volume() {
    let store = Arc::new(MemoryStore::new());
    let resolver = FixedResolver {
        offer_terms: Some(OfferTerms {
            price: U256::from(10),
            start_time: TS,
            end_time: TS + 86_400,
            platform_fee: U256::from(120),
            discount: U256::from(5),
        }),
        quote: Some(U256::from(3)),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);

    p.handle(&ev(
        COLLECTION,
        0,
        EventKind::CollectionMinted {
            collection_id: U256::from(1),
            designer: DESIGNER,
            rarity: "Exclusive".to_string(),
            token_ids: vec![U256::from(42)],
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        MARKET,
        1,
        EventKind::OfferCreated {
            collection_id: U256::from(1),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        MARKET,
        2,
        EventKind::OfferPurchased {
            collection_id: U256::from(1),
            buyer: BIDDER_A,
            order_id: U256::from(77),
            value: U256::from(25),
            payment_amount: U256::from(500),
        },
    ))
    .await
    .unwrap();

    let purchase = store
        .load::<Purchase>("1-0x0002-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(purchase.rarity, "Exclusive");
    assert_eq!(purchase.exchange_rate, Some(U256::from(3)));
    assert_eq!(purchase.order_id, U256::from(77));
    assert_eq!(purchase.payment_amount, U256::from(500));

    let offer = store.load::<Offer>("1").await.unwrap().unwrap();
    assert_eq!(offer.amount_sold, U256::from(25));
    assert_eq!(offer.price, Some(U256::from(10)));
    assert_eq!(offer.collection.as_deref(), Some("1"));

    let collection = store.load::<Collection>("1").await.unwrap().unwrap();
    assert_eq!(collection.value_sold, U256::from(25));

    let stats = global(&store).await;
    assert_eq!(stats.marketplace_volume, U256::from(25));
    assert_eq!(stats.exchange_rate, Some(U256::from(3)));
}

#[tokio::test]
async fn offer_cancellation_clears_price_and_association_but_keeps_the_row() {
    let store = Arc::new(MemoryStore::new());
    let resolver = FixedResolver {
        offer_terms: Some(OfferTerms {
            price: U256::from(10),
            start_time: TS,
            end_time: TS + 86_400,
            platform_fee: U256::ZERO,
            discount: U256::ZERO,
        }),
        ..Default::default()
    };
    let p = projector(&store, resolver, NullFetcher);

    p.handle(&ev(
        COLLECTION,
        0,
        EventKind::CollectionMinted {
            collection_id: U256::from(1),
            designer: DESIGNER,
            rarity: "Common".to_string(),
            token_ids: vec![],
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        MARKET,
        1,
        EventKind::OfferCreated {
            collection_id: U256::from(1),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        MARKET,
        2,
        EventKind::OfferCancelled {
            collection_id: U256::from(1),
        },
    ))
    .await
    .unwrap();

    let offer = store.load::<Offer>("1").await.unwrap().unwrap();
    assert!(offer.price.is_none());
    assert!(offer.collection.is_none());
}

// ─── Designers ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn designer_removal_clears_every_back_reference() {
    let store = Arc::new(MemoryStore::new());
    let profile = json!({ "name": "Ada", "twitter": "@ada" });
    let fetcher = StaticFetcher(HashMap::from([("ipfs://QmAda".to_string(), profile)]));
    let p = projector(&store, reverting(), fetcher);

    let designer_id = format!("{DESIGNER:#x}");

    p.handle(&ev(
        NFT,
        0,
        EventKind::GarmentMinted {
            token_id: U256::from(42),
            owner: OWNER,
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        REGISTRY,
        1,
        EventKind::DesignerAdded {
            designer: DESIGNER,
            uri: "ipfs://QmAda".to_string(),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        COLLECTION,
        2,
        EventKind::CollectionMinted {
            collection_id: U256::from(1),
            designer: DESIGNER,
            rarity: "Semi-Rare".to_string(),
            token_ids: vec![U256::from(42)],
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        AUCTION,
        3,
        EventKind::AuctionCreated {
            token_id: U256::from(42),
        },
    ))
    .await
    .unwrap();

    let record = store
        .load::<Designer>(&designer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.name, "Ada");
    assert_eq!(record.twitter, "@ada");
    let auction = store.load::<Auction>("42").await.unwrap().unwrap();
    assert_eq!(auction.designer.as_deref(), Some(designer_id.as_str()));

    p.handle(&ev(
        REGISTRY,
        4,
        EventKind::DesignerRemoved { designer: DESIGNER },
    ))
    .await
    .unwrap();

    assert!(store.load::<Designer>(&designer_id).await.unwrap().is_none());
    let collection = store.load::<Collection>("1").await.unwrap().unwrap();
    assert!(collection.designer.is_none());
    let auction = store.load::<Auction>("42").await.unwrap().unwrap();
    assert!(auction.designer.is_none());
}

#[tokio::test]
async fn remap_table_canonicalizes_designer_ids() {
    let store = Arc::new(MemoryStore::new());
    let alias = format!("{DESIGNER:#x}");
    let canonical = format!("{BIDDER_B:#x}");
    let remap = RemapTable::new(HashMap::from([(alias, canonical.clone())]));
    let p = Projector::new(
        store.clone(),
        reverting(),
        NullFetcher,
        contracts(),
        remap,
    );

    p.handle(&ev(
        REGISTRY,
        0,
        EventKind::DesignerAdded {
            designer: DESIGNER,
            uri: String::new(),
        },
    ))
    .await
    .unwrap();
    p.handle(&ev(
        COLLECTION,
        1,
        EventKind::CollectionMinted {
            collection_id: U256::from(1),
            designer: DESIGNER,
            rarity: "Common".to_string(),
            token_ids: vec![],
        },
    ))
    .await
    .unwrap();

    assert!(
        store
            .load::<Designer>(&canonical)
            .await
            .unwrap()
            .is_some()
    );
    let collection = store.load::<Collection>("1").await.unwrap().unwrap();
    assert_eq!(collection.designer.as_deref(), Some(canonical.as_str()));
}
