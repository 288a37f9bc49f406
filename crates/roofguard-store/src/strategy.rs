//! Cached listing strategy.

use roofguard_core::ListingStrategy;

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::STRATEGY_KEY;

/// Loads the cached strategy, or [`ListingStrategy::default`] when nothing
/// usable is stored.
///
/// Never fails: an unreadable store or a value that does not parse as a
/// complete strategy is logged and replaced by the default.
pub fn load_strategy(store: &dyn KeyValueStore) -> ListingStrategy {
    let raw = match store.get(STRATEGY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ListingStrategy::default(),
        Err(e) => {
            tracing::warn!(error = %e, "strategy store unreadable, using default strategy");
            return ListingStrategy::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cached strategy is corrupt, using default strategy");
        ListingStrategy::default()
    })
}

/// Serializes `strategy` as JSON and stores it, replacing any previous value.
///
/// # Errors
///
/// Returns [`StoreError`] if the strategy cannot be serialized or the store
/// cannot be written.
pub fn save_strategy(
    store: &dyn KeyValueStore,
    strategy: &ListingStrategy,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(strategy)?;
    store.set(STRATEGY_KEY, &raw)?;
    tracing::debug!(tiers = strategy.pricing_options.len(), "strategy cached");
    Ok(())
}
