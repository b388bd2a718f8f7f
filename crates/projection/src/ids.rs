//! Deterministic entity-id derivation.
//!
//! Every id is a pure function of event/contract data — never random or
//! sequential — so replaying a handler for the same event writes the same
//! keys.

use alloy::primitives::{Address, U256};

/// Lower-case `0x…` hex id for an address-keyed entity.
pub fn address_id(address: Address) -> String {
    format!("{address:#x}")
}

/// Decimal id for a numeric on-chain id.
pub fn token_id(id: U256) -> String {
    id.to_string()
}

/// `{parent}-{child}` composite key.
pub fn child_id(parent: &str, child: &str) -> String {
    format!("{parent}-{child}")
}

/// Garment key: `{contract}-{tokenId}` with the contract in lower-case hex.
pub fn garment_id(contract: Address, token: U256) -> String {
    child_id(&address_id(contract), &token_id(token))
}

/// Key for append-only per-subject logs: `{subject}-{txHash}-{logIndex}`.
/// Unique even for multiple qualifying events in one transaction.
pub fn log_entry_id(subject: &str, tx_hash: &str, log_index: u64) -> String {
    format!("{subject}-{tx_hash}-{log_index}")
}

const SECS_PER_DAY: i64 = 86_400;

/// Zero-padded `YYYY-MM-DD` key for the calendar day containing `timestamp`
/// (Unix seconds, UTC).
pub fn day_id(timestamp: u64) -> String {
    let days = (timestamp as i64).div_euclid(SECS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Proleptic-Gregorian civil date from days since the Unix epoch.
///
/// Epoch-shifted integer arithmetic over 400-year eras; no floating point.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u32, day as u32)
}
