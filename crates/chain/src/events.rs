use alloy::primitives::{Address, U256};
use alloy::rpc::types::Log;
use atelier_core::Settings;

/// The tracked contract set. Every log outside these six addresses is
/// ignored by the decoder.
#[derive(Debug, Clone, Copy)]
pub struct ContractSet {
    pub garment_nft: Address,
    pub garment_collection: Address,
    pub staking: Address,
    pub auction: Address,
    pub marketplace: Address,
    pub designer_registry: Address,
}

impl ContractSet {
    pub fn from_settings(settings: &Settings) -> eyre::Result<Self> {
        Ok(Self {
            garment_nft: settings.garment_nft_address.parse()?,
            garment_collection: settings.garment_collection_address.parse()?,
            staking: settings.staking_address.parse()?,
            auction: settings.auction_address.parse()?,
            marketplace: settings.marketplace_address.parse()?,
            designer_registry: settings.designer_registry_address.parse()?,
        })
    }

    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.garment_nft,
            self.garment_collection,
            self.staking,
            self.auction,
            self.marketplace,
            self.designer_registry,
        ]
    }
}

/// Chain-native envelope shared by every decoded event.
#[derive(Debug, Clone)]
pub struct EventMeta {
    pub contract: Address,
    pub block_number: u64,
    /// Block timestamp in Unix seconds. The indexer backfills this from
    /// block headers when the RPC omits it on logs.
    pub timestamp: u64,
    pub tx_hash: String,
    pub tx_index: u64,
    pub log_index: u64,
}

impl EventMeta {
    /// Build the envelope from a raw log. Logs without a block number or log
    /// index are unconfirmed and are skipped entirely.
    pub fn from_log(log: &Log) -> Option<Self> {
        Some(Self {
            contract: log.address(),
            block_number: log.block_number?,
            timestamp: log.block_timestamp.unwrap_or(0),
            tx_hash: log
                .transaction_hash
                .map(|h| format!("{h:#x}"))
                .unwrap_or_default(),
            tx_index: log.transaction_index.unwrap_or(0),
            log_index: log.log_index?,
        })
    }
}

/// Closed set of decoded platform events, one variant per handled event kind.
#[derive(Debug, Clone)]
pub enum EventKind {
    // Garment NFT
    GarmentMinted {
        token_id: U256,
        owner: Address,
    },
    GarmentTransferred {
        from: Address,
        to: Address,
        token_id: U256,
    },

    // Garment collection
    CollectionMinted {
        collection_id: U256,
        designer: Address,
        rarity: String,
        token_ids: Vec<U256>,
    },

    // Staking
    GarmentStaked {
        staker: Address,
        token_id: U256,
    },
    GarmentUnstaked {
        staker: Address,
        token_id: U256,
    },
    RewardPaid {
        staker: Address,
        amount: U256,
    },
    TokenWhitelisted {
        token: Address,
    },

    // Auction house
    AuctionCreated {
        token_id: U256,
    },
    BidPlaced {
        token_id: U256,
        bidder: Address,
        value: U256,
    },
    BidWithdrawn {
        token_id: U256,
        bidder: Address,
        value: U256,
    },
    AuctionResulted {
        token_id: U256,
        winner: Address,
        winning_bid: U256,
    },
    AuctionCancelled {
        token_id: U256,
    },

    // Marketplace
    OfferCreated {
        collection_id: U256,
    },
    OfferPurchased {
        collection_id: U256,
        buyer: Address,
        order_id: U256,
        value: U256,
        payment_amount: U256,
    },
    OfferCancelled {
        collection_id: U256,
    },

    // Designer registry
    DesignerAdded {
        designer: Address,
        uri: String,
    },
    DesignerRemoved {
        designer: Address,
    },
}

/// One decoded, ordered platform event ready for projection.
#[derive(Debug, Clone)]
pub struct ChainEvent {
    pub meta: EventMeta,
    pub kind: EventKind,
}
