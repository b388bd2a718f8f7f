use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// Id of the singleton [`GlobalStats`] row.
pub const GLOBAL_STATS_ID: &str = "1";

/// Id of the singleton [`Checkpoint`] row.
pub const CHECKPOINT_ID: &str = "1";

// ─── Garment ────────────────────────────────────────────────────────────────

/// A minted garment NFT, keyed by `{contract}-{tokenId}`.
///
/// Metadata fields default to the empty string until the token's
/// content-addressed document resolves. Burns overwrite `owner` with the
/// zero address; the row is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garment {
    pub id: String,
    pub contract: String,
    pub owner: String,
    pub token_uri: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub animation: String,
    pub weight: Option<U256>,
    pub designer: Option<String>,
    pub created_at: u64,
}

impl Garment {
    /// New garment with defined defaults for every field.
    pub fn new(id: String, contract: String, owner: String, created_at: u64) -> Self {
        Self {
            id,
            contract,
            owner,
            token_uri: String::new(),
            name: String::new(),
            description: String::new(),
            image: String::new(),
            animation: String::new(),
            weight: None,
            designer: None,
            created_at,
        }
    }
}

impl Entity for Garment {
    const KIND: &'static str = "garment";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Staker ─────────────────────────────────────────────────────────────────

/// An address's aggregate staking position, keyed by the staker address.
///
/// `weight` is overwritten from an on-chain call on every stake/unstake,
/// never accumulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staker {
    pub id: String,
    pub garments: Vec<String>,
    pub rewards_claimed: U256,
    pub weight: U256,
}

impl Staker {
    pub fn new(id: String) -> Self {
        Self {
            id,
            garments: Vec::new(),
            rewards_claimed: U256::ZERO,
            weight: U256::ZERO,
        }
    }
}

impl Entity for Staker {
    const KIND: &'static str = "staker";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── WhitelistedToken ───────────────────────────────────────────────────────

/// Registry entry for an allowed underlying token contract. Written once on
/// the whitelist event and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistedToken {
    pub id: String,
    pub name: Option<String>,
}

impl Entity for WhitelistedToken {
    const KIND: &'static str = "whitelisted_token";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Collection ─────────────────────────────────────────────────────────────

/// A group of garments minted together, keyed by the on-chain collection id.
///
/// Re-minting the same collection appends to `garments` (duplicates are kept).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub rarity: String,
    pub value_sold: U256,
    pub garments: Vec<String>,
    pub designer: Option<String>,
}

impl Collection {
    pub fn new(id: String) -> Self {
        Self {
            id,
            rarity: String::new(),
            value_sold: U256::ZERO,
            garments: Vec::new(),
            designer: None,
        }
    }
}

impl Entity for Collection {
    const KIND: &'static str = "collection";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Auction ────────────────────────────────────────────────────────────────

/// One auction per garment token id. Re-listing the same token overwrites the
/// row; the append-only [`AuctionEvent`] log preserves the full trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub reserve_price: U256,
    pub start_time: u64,
    pub end_time: u64,
    pub resulted: bool,
    pub resulted_at: Option<u64>,
    pub top_bidder: Option<String>,
    pub top_bid: Option<U256>,
    pub last_bid_time: Option<u64>,
    pub designer: Option<String>,
}

impl Auction {
    pub fn new(id: String) -> Self {
        Self {
            id,
            reserve_price: U256::ZERO,
            start_time: 0,
            end_time: 0,
            resulted: false,
            resulted_at: None,
            top_bidder: None,
            top_bid: None,
            last_bid_time: None,
            designer: None,
        }
    }
}

impl Entity for Auction {
    const KIND: &'static str = "auction";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── AuctionEvent ───────────────────────────────────────────────────────────

/// Kind of an auction history entry. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionEventKind {
    Created,
    BidPlaced,
    BidWithdrawn,
    Resulted,
    Cancelled,
}

/// Append-only auction history entry, keyed `{tokenId}-{txHash}-{logIndex}`
/// so multiple qualifying events in one transaction stay distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionEvent {
    pub id: String,
    pub auction: String,
    pub kind: AuctionEventKind,
    pub bidder: Option<String>,
    pub value: Option<U256>,
    pub timestamp: u64,
    pub tx_hash: String,
}

impl Entity for AuctionEvent {
    const KIND: &'static str = "auction_event";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Offer ──────────────────────────────────────────────────────────────────

/// A marketplace offer, one per sellable collection id. Cancellation clears
/// the price and collection association instead of deleting the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub price: Option<U256>,
    pub start_time: u64,
    pub end_time: u64,
    pub amount_sold: U256,
    pub platform_fee: U256,
    pub discount: U256,
    pub collection: Option<String>,
}

impl Offer {
    pub fn new(id: String) -> Self {
        Self {
            id,
            price: None,
            start_time: 0,
            end_time: 0,
            amount_sold: U256::ZERO,
            platform_fee: U256::ZERO,
            discount: U256::ZERO,
            collection: None,
        }
    }
}

impl Entity for Offer {
    const KIND: &'static str = "offer";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Purchase ───────────────────────────────────────────────────────────────

/// One row per marketplace purchase, keyed `{collectionId}-{txHash}-{logIndex}`.
/// `rarity` is denormalized from the collection at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub buyer: String,
    pub order_id: U256,
    pub value: U256,
    pub payment_amount: U256,
    pub exchange_rate: Option<U256>,
    pub rarity: String,
    pub timestamp: u64,
}

impl Entity for Purchase {
    const KIND: &'static str = "purchase";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Stats ──────────────────────────────────────────────────────────────────

/// Per-day running aggregates, keyed by a `YYYY-MM-DD` day id.
///
/// `net_bid_activity` is derived (bids minus withdrawals) and is always
/// recomputed from the base fields after they change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayStats {
    pub id: String,
    pub total_bid_value: U256,
    pub total_withdrawal_value: U256,
    pub net_bid_activity: U256,
    pub marketplace_volume: U256,
    /// Latest oracle quote seen on a purchase that day.
    pub exchange_rate: Option<U256>,
}

impl DayStats {
    pub fn new(id: String) -> Self {
        Self {
            id,
            total_bid_value: U256::ZERO,
            total_withdrawal_value: U256::ZERO,
            net_bid_activity: U256::ZERO,
            marketplace_volume: U256::ZERO,
            exchange_rate: None,
        }
    }
}

impl Entity for DayStats {
    const KIND: &'static str = "day_stats";
    fn id(&self) -> &str {
        &self.id
    }
}

/// Global running aggregates, a singleton keyed [`GLOBAL_STATS_ID`].
///
/// `total_active_bids` tracks the sum of current top bids across open
/// auctions; results, withdrawals and cancellations release their
/// contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub id: String,
    pub total_bid_value: U256,
    pub total_withdrawal_value: U256,
    pub net_bid_activity: U256,
    pub total_active_bids: U256,
    pub marketplace_volume: U256,
    /// Latest oracle quote seen on any purchase.
    pub exchange_rate: Option<U256>,
}

impl GlobalStats {
    pub fn new() -> Self {
        Self {
            id: GLOBAL_STATS_ID.to_string(),
            total_bid_value: U256::ZERO,
            total_withdrawal_value: U256::ZERO,
            net_bid_activity: U256::ZERO,
            total_active_bids: U256::ZERO,
            marketplace_volume: U256::ZERO,
            exchange_rate: None,
        }
    }
}

impl Default for GlobalStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for GlobalStats {
    const KIND: &'static str = "global_stats";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Designer ───────────────────────────────────────────────────────────────

/// Address-keyed designer registry entry enriched from a content-addressed
/// profile document. Removed entirely when group membership is revoked, after
/// every back-reference has been cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Designer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub twitter: String,
    pub instagram: String,
}

impl Designer {
    pub fn new(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            image: String::new(),
            twitter: String::new(),
            instagram: String::new(),
        }
    }
}

impl Entity for Designer {
    const KIND: &'static str = "designer";
    fn id(&self) -> &str {
        &self.id
    }
}

// ─── Checkpoint ─────────────────────────────────────────────────────────────

/// Indexer cursor, a singleton recording the last fully projected block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub last_block: u64,
}

impl Checkpoint {
    pub fn new(last_block: u64) -> Self {
        Self {
            id: CHECKPOINT_ID.to_string(),
            last_block,
        }
    }
}

impl Entity for Checkpoint {
    const KIND: &'static str = "checkpoint";
    fn id(&self) -> &str {
        &self.id
    }
}
