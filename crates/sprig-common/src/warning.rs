//! Engine warnings routed through the [`log`] facade.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the selector compiler to report degraded behavior, such as a
//! requested cache that the host tree cannot support.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about degraded behavior (emitted once per unique message)
///
/// The warning is logged at `warn` level with the `sprig` target, so hosts
/// decide where it ends up by installing a logger.
///
/// # Example
/// ```ignore
/// warn_once("select", "adapter exposes no node keys; descendant cache disabled");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        log::warn!(target: "sprig", "[{component}] {message}");
    }
}

/// Returns `true` if this exact warning has already been emitted.
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when reconfiguring a host)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("test", "first message");
        assert!(was_warned("test", "first message"));
        assert!(!was_warned("test", "never emitted"));
    }

    #[test]
    fn test_warn_once_is_keyed_by_component() {
        warn_once("alpha", "shared text");
        assert!(was_warned("alpha", "shared text"));
        assert!(!was_warned("beta", "shared text"));
    }
}
