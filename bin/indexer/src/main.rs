//! Atelier Indexer — projects platform events into the entity store.
//!
//! Flow:
//! 1. Connect to the chain RPC & PostgreSQL
//! 2. Poll blocks in batches for logs from the six tracked contracts
//! 3. Decode and project events one at a time, in blockchain order
//! 4. Hand newly observed content hashes to the out-of-band pinning task
//!
//! A single projector instance is the only writer to the entity store;
//! events are applied strictly in (block, transaction, log) order. A failed
//! event is logged and skipped — indexing liveness wins over per-record
//! completeness.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::{
    consensus::BlockHeader,
    providers::{DynProvider, Provider},
    rpc::types::{Filter, Log},
};
use eyre::Result;
use tokio::sync::mpsc;

use atelier_chain::ipfs::IpfsGateway;
use atelier_chain::resolver::RpcResolver;
use atelier_chain::sync::{HttpPinner, PinningService};
use atelier_chain::{ContractSet, create_provider, decode_log};
use atelier_core::{Settings, telemetry};
use atelier_projection::{Projector, RemapTable};
use atelier_storage::models::{CHECKPOINT_ID, Checkpoint};
use atelier_storage::{EntityStoreExt, PgStore};

type AppProjector = Projector<Arc<PgStore>, RpcResolver, IpfsGateway>;

#[tokio::main]
async fn main() -> Result<()> {
    // ── Initialisation ──────────────────────────────────────────────────
    telemetry::init();
    let settings = Settings::from_env()?;

    tracing::info!(rpc = %settings.rpc_url, "Starting Atelier Indexer");

    let pool = atelier_storage::connect(&settings.database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let provider = create_provider(&settings.rpc_url)?;
    tracing::info!("Connected to RPC");

    let contracts = ContractSet::from_settings(&settings)?;
    let remap = match &settings.designer_remap_path {
        Some(path) => RemapTable::load(path)?,
        None => RemapTable::default(),
    };

    let store = Arc::new(PgStore::from_pool(pool));
    let resolver = RpcResolver::new(provider.clone());
    let fetcher = IpfsGateway::new(&settings.ipfs_gateway)?;
    let projector = Projector::new(store.clone(), resolver, fetcher, contracts, remap);

    let sync_tx = spawn_pinning_task(&settings)?;

    // ── Main Indexing Loop ──────────────────────────────────────────────
    let mut last_block = match store.load::<Checkpoint>(CHECKPOINT_ID).await? {
        Some(checkpoint) => checkpoint.last_block,
        None => settings.start_block.saturating_sub(1),
    };

    tracing::info!(from_block = last_block + 1, "Starting indexing loop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down gracefully…");
                break;
            }
            result = index_next_batch(
                &provider,
                &projector,
                &store,
                &contracts,
                &mut last_block,
                &settings,
                &sync_tx,
            ) => {
                match result {
                    Ok(indexed) => {
                        if !indexed {
                            // We're caught up — wait before polling again
                            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Indexing error, retrying in 5s…");
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    }
                }
            }
        }
    }

    tracing::info!("Indexer stopped.");
    Ok(())
}

/// Start the out-of-band hash mirroring task, if an endpoint is configured.
///
/// The task consumes batches of content hashes over a channel and never
/// touches projection entities; its failures stay inside the pinning
/// service's retry budget.
fn spawn_pinning_task(settings: &Settings) -> Result<Option<mpsc::UnboundedSender<Vec<String>>>> {
    let Some(endpoint) = &settings.pinning_endpoint else {
        tracing::info!("No pinning endpoint configured, hash sync disabled");
        return Ok(None);
    };

    let transport = HttpPinner::new(endpoint, settings.pinning_api_key.clone())?;
    let service = PinningService::new(transport);
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<String>>();

    tokio::spawn(async move {
        while let Some(hashes) = rx.recv().await {
            // Final failures are logged by the service; projected state is
            // unaffected either way.
            let _ = service.sync_hashes(&hashes).await;
        }
    });

    Ok(Some(tx))
}

/// Index the next batch of blocks. Returns `Ok(true)` if work was done,
/// `Ok(false)` if caught up.
async fn index_next_batch(
    provider: &DynProvider,
    projector: &AppProjector,
    store: &Arc<PgStore>,
    contracts: &ContractSet,
    last_block: &mut u64,
    settings: &Settings,
    sync_tx: &Option<mpsc::UnboundedSender<Vec<String>>>,
) -> Result<bool> {
    let chain_head = provider.get_block_number().await?;

    if *last_block >= chain_head {
        return Ok(false); // Caught up
    }

    let from = *last_block + 1;
    let to = std::cmp::min(from + settings.batch_size - 1, chain_head);

    tracing::info!(from = from, to = to, head = chain_head, "Indexing batch");

    let filter = Filter::new()
        .address(contracts.addresses())
        .from_block(from)
        .to_block(to);

    let mut logs = provider.get_logs(&filter).await?;

    // Strict blockchain order: block, then transaction, then log position.
    logs.sort_by_key(|log| {
        (
            log.block_number.unwrap_or(0),
            log.transaction_index.unwrap_or(0),
            log.log_index.unwrap_or(0),
        )
    });

    backfill_timestamps(provider, &mut logs).await?;

    let mut projected = 0usize;
    for log in &logs {
        let Some(event) = decode_log(contracts, log) else {
            continue;
        };
        // One failed event must not take the pipeline down with it.
        if let Err(e) = projector.handle(&event).await {
            tracing::error!(
                block = event.meta.block_number,
                log_index = event.meta.log_index,
                error = %e,
                "Projection failed for event, skipping"
            );
            continue;
        }
        projected += 1;
    }

    // Hand newly observed content hashes to the out-of-band sync task.
    let observed = projector.drain_observed().await;
    if let Some(tx) = sync_tx {
        if !observed.is_empty() {
            let _ = tx.send(observed);
        }
    }

    store.save(&Checkpoint::new(to)).await?;
    *last_block = to;

    tracing::info!(block = to, events = projected, "Batch complete");

    Ok(true)
}

/// `eth_getLogs` does not always carry block timestamps; fill them in from
/// the block headers so day bucketing stays accurate.
async fn backfill_timestamps(provider: &DynProvider, logs: &mut [Log]) -> Result<()> {
    let mut timestamps: HashMap<u64, u64> = HashMap::new();

    for log in logs.iter_mut() {
        if log.block_timestamp.is_some() {
            continue;
        }
        let Some(number) = log.block_number else {
            continue;
        };
        if let Some(ts) = timestamps.get(&number) {
            log.block_timestamp = Some(*ts);
            continue;
        }
        let Some(block) = provider.get_block_by_number(number.into()).await? else {
            continue;
        };
        let ts = block.header.timestamp();
        timestamps.insert(number, ts);
        log.block_timestamp = Some(ts);
    }

    Ok(())
}
