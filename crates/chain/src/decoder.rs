use alloy::primitives::Address;
use alloy::rpc::types::Log;

use crate::abi::{AuctionHouse, DesignerRegistry, GarmentCollection, GarmentNFT, GarmentStaking, Marketplace};
use crate::events::{ChainEvent, ContractSet, EventKind, EventMeta};

/// Zero address constant for mint/burn detection.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Decode a raw log from one of the tracked contracts into a platform event.
///
/// Returns `None` for logs from untracked addresses, logs that fail to
/// decode against the contract's event set, and unconfirmed logs missing
/// block number or log index.
pub fn decode_log(contracts: &ContractSet, log: &Log) -> Option<ChainEvent> {
    let meta = EventMeta::from_log(log)?;
    let address = log.address();

    let kind = if address == contracts.garment_nft {
        decode_garment_log(log)?
    } else if address == contracts.garment_collection {
        decode_collection_log(log)?
    } else if address == contracts.staking {
        decode_staking_log(log)?
    } else if address == contracts.auction {
        decode_auction_log(log)?
    } else if address == contracts.marketplace {
        decode_marketplace_log(log)?
    } else if address == contracts.designer_registry {
        decode_registry_log(log)?
    } else {
        return None;
    };

    Some(ChainEvent { meta, kind })
}

/// Decode a garment NFT log.
///
/// ERC-721 Transfer events with `from == 0x0` are classified as mints;
/// transfers to `0x0` are burns, which only overwrite the owner field
/// downstream — garment rows are never deleted.
fn decode_garment_log(log: &Log) -> Option<EventKind> {
    let decoded = log.log_decode::<GarmentNFT::Transfer>().ok()?;
    let d = decoded.inner.data;

    let kind = if d.from == ZERO_ADDRESS {
        EventKind::GarmentMinted {
            token_id: d.tokenId,
            owner: d.to,
        }
    } else {
        EventKind::GarmentTransferred {
            from: d.from,
            to: d.to,
            token_id: d.tokenId,
        }
    };
    Some(kind)
}

fn decode_collection_log(log: &Log) -> Option<EventKind> {
    let decoded = log.log_decode::<GarmentCollection::CollectionMinted>().ok()?;
    let d = decoded.inner.data;

    Some(EventKind::CollectionMinted {
        collection_id: d.collectionId,
        designer: d.designer,
        rarity: d.rarity,
        token_ids: d.tokenIds,
    })
}

fn decode_staking_log(log: &Log) -> Option<EventKind> {
    if let Ok(decoded) = log.log_decode::<GarmentStaking::Staked>() {
        let d = decoded.inner.data;
        return Some(EventKind::GarmentStaked {
            staker: d.owner,
            token_id: d.tokenId,
        });
    }

    if let Ok(decoded) = log.log_decode::<GarmentStaking::Unstaked>() {
        let d = decoded.inner.data;
        return Some(EventKind::GarmentUnstaked {
            staker: d.owner,
            token_id: d.tokenId,
        });
    }

    if let Ok(decoded) = log.log_decode::<GarmentStaking::RewardPaid>() {
        let d = decoded.inner.data;
        return Some(EventKind::RewardPaid {
            staker: d.user,
            amount: d.reward,
        });
    }

    if let Ok(decoded) = log.log_decode::<GarmentStaking::TokenWhitelisted>() {
        let d = decoded.inner.data;
        return Some(EventKind::TokenWhitelisted { token: d.token });
    }

    None
}

fn decode_auction_log(log: &Log) -> Option<EventKind> {
    if let Ok(decoded) = log.log_decode::<AuctionHouse::AuctionCreated>() {
        let d = decoded.inner.data;
        return Some(EventKind::AuctionCreated {
            token_id: d.garmentTokenId,
        });
    }

    if let Ok(decoded) = log.log_decode::<AuctionHouse::BidPlaced>() {
        let d = decoded.inner.data;
        return Some(EventKind::BidPlaced {
            token_id: d.garmentTokenId,
            bidder: d.bidder,
            value: d.bid,
        });
    }

    if let Ok(decoded) = log.log_decode::<AuctionHouse::BidWithdrawn>() {
        let d = decoded.inner.data;
        return Some(EventKind::BidWithdrawn {
            token_id: d.garmentTokenId,
            bidder: d.bidder,
            value: d.bid,
        });
    }

    if let Ok(decoded) = log.log_decode::<AuctionHouse::AuctionResulted>() {
        let d = decoded.inner.data;
        return Some(EventKind::AuctionResulted {
            token_id: d.garmentTokenId,
            winner: d.winner,
            winning_bid: d.winningBid,
        });
    }

    if let Ok(decoded) = log.log_decode::<AuctionHouse::AuctionCancelled>() {
        let d = decoded.inner.data;
        return Some(EventKind::AuctionCancelled {
            token_id: d.garmentTokenId,
        });
    }

    None
}

fn decode_marketplace_log(log: &Log) -> Option<EventKind> {
    if let Ok(decoded) = log.log_decode::<Marketplace::OfferCreated>() {
        let d = decoded.inner.data;
        return Some(EventKind::OfferCreated {
            collection_id: d.collectionId,
        });
    }

    if let Ok(decoded) = log.log_decode::<Marketplace::OfferPurchased>() {
        let d = decoded.inner.data;
        return Some(EventKind::OfferPurchased {
            collection_id: d.collectionId,
            buyer: d.buyer,
            order_id: d.orderId,
            value: d.primarySalePrice,
            payment_amount: d.paymentAmount,
        });
    }

    if let Ok(decoded) = log.log_decode::<Marketplace::OfferCancelled>() {
        let d = decoded.inner.data;
        return Some(EventKind::OfferCancelled {
            collection_id: d.collectionId,
        });
    }

    None
}

fn decode_registry_log(log: &Log) -> Option<EventKind> {
    if let Ok(decoded) = log.log_decode::<DesignerRegistry::DesignerAdded>() {
        let d = decoded.inner.data;
        return Some(EventKind::DesignerAdded {
            designer: d.designer,
            uri: d.uri,
        });
    }

    if let Ok(decoded) = log.log_decode::<DesignerRegistry::DesignerRemoved>() {
        let d = decoded.inner.data;
        return Some(EventKind::DesignerRemoved {
            designer: d.designer,
        });
    }

    None
}
