//! Deduplicated pipeline warnings.
//!
//! Unsupported units, unknown `display` keywords and similar irregularities
//! never abort a render; they degrade to a default value and are reported
//! here exactly once per unique message through the `log` facade.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    /// Warnings already emitted on this thread. A render runs start to finish
    /// on one thread, so renders on other threads never clear each other's set.
    static WARNED: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Warn about an unsupported feature (emitted once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("CSS", "unsupported unit 'vw' in width: 10vw");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if WARNED.with_borrow_mut(|set| set.insert(key)) {
        log::warn!(target: "lantern", "[{component}] {message}");
    }
}

/// Returns true if the given message has already been reported on this thread.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED.with_borrow(|set| set.contains(&key))
}

/// Clear this thread's recorded warnings (call when rendering a new document)
pub fn clear_warnings() {
    WARNED.with_borrow_mut(HashSet::clear);
}
