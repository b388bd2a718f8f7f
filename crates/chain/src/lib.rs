pub mod abi;
pub mod decoder;
pub mod events;
pub mod ipfs;
pub mod provider;
pub mod resolver;
pub mod sync;

pub use decoder::decode_log;
pub use events::{ChainEvent, ContractSet, EventKind, EventMeta};
pub use ipfs::{IpfsGateway, MetadataFetcher};
pub use provider::create_provider;
pub use resolver::{CallError, CallResult, RpcResolver, StateResolver};
pub use sync::{PinningService, SyncError, SyncTransport};
