//! Backfill for rows written before set numbers existed.

/// Games per set assumed for legacy rows.
pub const LEGACY_SET_SIZE: u64 = 10;

/// Set number for a legacy row, derived from its game id.
pub fn legacy_set_no(game_id: u64) -> u32 {
    let set = game_id.saturating_sub(1) / LEGACY_SET_SIZE + 1;
    u32::try_from(set).unwrap_or(u32::MAX)
}

/// Resolve the set number of a loaded row: keep a stored positive value,
/// otherwise fall back to the legacy derivation.
pub fn migrate_set_no(game_id: u64, stored: Option<u32>) -> u32 {
    match stored {
        Some(set) if set > 0 => set,
        _ => legacy_set_no(game_id),
    }
}
