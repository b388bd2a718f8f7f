use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;
use thiserror::Error;

use crate::abi::{AuctionHouse, Erc20, GarmentNFT, GarmentStaking, Marketplace};

/// Failure of a read-only contract call.
///
/// A revert is a normal, expected outcome (querying a not-yet-initialised
/// value); callers inspect the error and skip the corresponding field update
/// instead of aborting.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("contract call reverted")]
    Reverted,

    #[error("transport error: {0}")]
    Transport(String),
}

pub type CallResult<T> = Result<T, CallError>;

/// Current auction terms read from the auction house contract.
#[derive(Debug, Clone, Copy)]
pub struct AuctionTerms {
    pub reserve_price: U256,
    pub start_time: u64,
    pub end_time: u64,
}

/// Current offer terms read from the marketplace contract.
#[derive(Debug, Clone, Copy)]
pub struct OfferTerms {
    pub price: U256,
    pub start_time: u64,
    pub end_time: u64,
    pub platform_fee: U256,
    pub discount: U256,
}

/// Read-only access to current contract state not carried in event payloads.
///
/// Every method is side-effect free and safe to invoke speculatively.
#[async_trait]
pub trait StateResolver: Send + Sync {
    async fn token_uri(&self, contract: Address, token_id: U256) -> CallResult<String>;

    async fn garment_weight(&self, contract: Address, token_id: U256) -> CallResult<U256>;

    async fn staker_weight(&self, contract: Address, staker: Address) -> CallResult<U256>;

    /// ERC-20 display name of a whitelisted token.
    async fn token_name(&self, token: Address) -> CallResult<String>;

    async fn auction_terms(&self, contract: Address, token_id: U256) -> CallResult<AuctionTerms>;

    async fn offer_terms(&self, contract: Address, collection_id: U256) -> CallResult<OfferTerms>;

    /// Latest payment-token exchange-rate quote.
    async fn oracle_quote(&self, contract: Address) -> CallResult<U256>;
}

/// [`StateResolver`] backed by JSON-RPC `eth_call`s.
pub struct RpcResolver {
    provider: DynProvider,
}

impl RpcResolver {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

fn map_call_error(err: alloy::contract::Error) -> CallError {
    match err {
        // An error response from the node on eth_call is a revert.
        alloy::contract::Error::TransportError(rpc) if rpc.as_error_resp().is_some() => {
            CallError::Reverted
        }
        other => CallError::Transport(other.to_string()),
    }
}

#[async_trait]
impl StateResolver for RpcResolver {
    async fn token_uri(&self, contract: Address, token_id: U256) -> CallResult<String> {
        let nft = GarmentNFT::new(contract, self.provider.clone());
        nft.tokenURI(token_id).call().await.map_err(map_call_error)
    }

    async fn garment_weight(&self, contract: Address, token_id: U256) -> CallResult<U256> {
        let nft = GarmentNFT::new(contract, self.provider.clone());
        nft.garmentWeight(token_id)
            .call()
            .await
            .map_err(map_call_error)
    }

    async fn staker_weight(&self, contract: Address, staker: Address) -> CallResult<U256> {
        let staking = GarmentStaking::new(contract, self.provider.clone());
        staking
            .stakerWeight(staker)
            .call()
            .await
            .map_err(map_call_error)
    }

    async fn token_name(&self, token: Address) -> CallResult<String> {
        let erc20 = Erc20::new(token, self.provider.clone());
        erc20.name().call().await.map_err(map_call_error)
    }

    async fn auction_terms(&self, contract: Address, token_id: U256) -> CallResult<AuctionTerms> {
        let auction = AuctionHouse::new(contract, self.provider.clone());
        let terms = auction
            .auctions(token_id)
            .call()
            .await
            .map_err(map_call_error)?;
        Ok(AuctionTerms {
            reserve_price: terms.reservePrice,
            start_time: terms.startTime.saturating_to(),
            end_time: terms.endTime.saturating_to(),
        })
    }

    async fn offer_terms(&self, contract: Address, collection_id: U256) -> CallResult<OfferTerms> {
        let marketplace = Marketplace::new(contract, self.provider.clone());
        let terms = marketplace
            .offers(collection_id)
            .call()
            .await
            .map_err(map_call_error)?;
        Ok(OfferTerms {
            price: terms.price,
            start_time: terms.startTime.saturating_to(),
            end_time: terms.endTime.saturating_to(),
            platform_fee: terms.platformFee,
            discount: terms.discount,
        })
    }

    async fn oracle_quote(&self, contract: Address) -> CallResult<U256> {
        let marketplace = Marketplace::new(contract, self.provider.clone());
        marketplace
            .lastOracleQuote()
            .call()
            .await
            .map_err(map_call_error)
    }
}
