use alloy::providers::{DynProvider, Provider, ProviderBuilder};

/// Create an HTTP provider from an RPC URL string.
///
/// The provider is type-erased so downstream code and the resolver do not
/// carry the filler type parameters around.
pub fn create_provider(rpc_url: &str) -> eyre::Result<DynProvider> {
    let url = rpc_url.parse()?;
    let provider = ProviderBuilder::new().connect_http(url);
    Ok(provider.erased())
}
