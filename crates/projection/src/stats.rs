//! Per-day and global running aggregates.
//!
//! Base fields (bid totals, withdrawal totals, volume) accumulate; the
//! derived `net_bid_activity` is always recomputed from the updated bases,
//! never patched incrementally. Subtractions saturate at zero and are only
//! issued by callers that confirmed a matching prior addition.

use alloy::primitives::U256;

use atelier_storage::models::{DayStats, GLOBAL_STATS_ID, GlobalStats};
use atelier_storage::{EntityStore, EntityStoreExt, StoreError};

async fn load_day<S: EntityStore>(store: &S, day: &str) -> Result<DayStats, StoreError> {
    Ok(store
        .load::<DayStats>(day)
        .await?
        .unwrap_or_else(|| DayStats::new(day.to_string())))
}

async fn load_global<S: EntityStore>(store: &S) -> Result<GlobalStats, StoreError> {
    Ok(store
        .load::<GlobalStats>(GLOBAL_STATS_ID)
        .await?
        .unwrap_or_default())
}

fn net(bids: U256, withdrawals: U256) -> U256 {
    bids.saturating_sub(withdrawals)
}

/// Record a placed bid.
///
/// `replaced` is the outbid prior top bid, whose contribution leaves the
/// active-bids total before the new bid's is added.
pub async fn record_bid<S: EntityStore>(
    store: &S,
    day: &str,
    value: U256,
    replaced: Option<U256>,
) -> Result<(), StoreError> {
    let mut day_stats = load_day(store, day).await?;
    day_stats.total_bid_value = day_stats.total_bid_value.saturating_add(value);
    day_stats.net_bid_activity = net(day_stats.total_bid_value, day_stats.total_withdrawal_value);
    store.save(&day_stats).await?;

    let mut global = load_global(store).await?;
    global.total_bid_value = global.total_bid_value.saturating_add(value);
    if let Some(prior) = replaced {
        global.total_active_bids = global.total_active_bids.saturating_sub(prior);
    }
    global.total_active_bids = global.total_active_bids.saturating_add(value);
    global.net_bid_activity = net(global.total_bid_value, global.total_withdrawal_value);
    store.save(&global).await
}

/// Record a bid withdrawal. The withdrawn value also leaves the active-bids
/// total.
pub async fn record_withdrawal<S: EntityStore>(
    store: &S,
    day: &str,
    value: U256,
) -> Result<(), StoreError> {
    let mut day_stats = load_day(store, day).await?;
    day_stats.total_withdrawal_value = day_stats.total_withdrawal_value.saturating_add(value);
    day_stats.net_bid_activity = net(day_stats.total_bid_value, day_stats.total_withdrawal_value);
    store.save(&day_stats).await?;

    let mut global = load_global(store).await?;
    global.total_withdrawal_value = global.total_withdrawal_value.saturating_add(value);
    global.total_active_bids = global.total_active_bids.saturating_sub(value);
    global.net_bid_activity = net(global.total_bid_value, global.total_withdrawal_value);
    store.save(&global).await
}

/// Release a top bid from the active-bids total without recording a
/// withdrawal (auction resulted or cancelled).
pub async fn release_active_bid<S: EntityStore>(store: &S, value: U256) -> Result<(), StoreError> {
    let mut global = load_global(store).await?;
    global.total_active_bids = global.total_active_bids.saturating_sub(value);
    store.save(&global).await
}

/// Record a marketplace purchase. A resolved oracle quote refreshes the
/// exchange-rate snapshot on both rows; `None` leaves the prior snapshot.
pub async fn record_purchase<S: EntityStore>(
    store: &S,
    day: &str,
    value: U256,
    rate: Option<U256>,
) -> Result<(), StoreError> {
    let mut day_stats = load_day(store, day).await?;
    day_stats.marketplace_volume = day_stats.marketplace_volume.saturating_add(value);
    if rate.is_some() {
        day_stats.exchange_rate = rate;
    }
    store.save(&day_stats).await?;

    let mut global = load_global(store).await?;
    global.marketplace_volume = global.marketplace_volume.saturating_add(value);
    if rate.is_some() {
        global.exchange_rate = rate;
    }
    store.save(&global).await
}
