// Flush or clear persisted tabs when the host is about to exit

use std::rc::Rc;

use route_tabs::{KeyValueStore, Route};

use crate::codec::save_tabs;

/// Write the tabs when persisting, otherwise drop the stored record.
///
/// Runs during teardown, so failures are logged and swallowed.
pub fn flush_tabs(persist: bool, store: &dyn KeyValueStore, key: &str, routes: &[Route]) {
    if persist {
        if let Err(e) = save_tabs(store, key, routes) {
            log::error!("tabs: failed to persist {} tabs: {}", routes.len(), e);
        }
    } else if let Err(e) = store.remove(key) {
        log::error!("tabs: failed to clear '{}': {}", key, e);
    } else {
        log::debug!("tabs: persistence off, cleared '{}'", key);
    }
}

/// Listener for the shell's unload signal.
pub fn unload_listener(
    persist: bool,
    store: Rc<dyn KeyValueStore>,
    key: String,
) -> impl FnOnce(&[Route]) + 'static {
    move |routes: &[Route]| flush_tabs(persist, &*store, &key, routes)
}
