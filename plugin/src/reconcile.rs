// First navigation after a restart: merge it into the persisted tabs

use std::rc::Rc;

use route_tabs::{
    is_same_route, AddVerdict, Adoption, Guards, KeyValueStore, Route, TabView, Unsubscribe,
};

use crate::codec::load_tabs;

/// Point at the persisted tab equal to `route`, or append `route` and point at it.
pub fn resolve_active_index_and_tabs(persisted: Vec<Route>, route: Route) -> Adoption {
    if let Some(active) = persisted.iter().position(|tab| is_same_route(tab, &route)) {
        return Adoption {
            tabs: persisted,
            active,
        };
    }
    let mut tabs = persisted;
    tabs.push(route);
    Adoption {
        active: tabs.len() - 1,
        tabs,
    }
}

/// One-shot add guard that restores the persisted tabs.
///
/// It detaches itself before touching storage, so no later navigation can
/// reconcile again, then answers with an adoption that replaces the whole
/// list instead of adding a single tab.
pub fn install_reconciler(
    guards: &mut Guards,
    store: Rc<dyn KeyValueStore>,
    key: String,
) -> Unsubscribe {
    guards.before_add_with(move |off| {
        move |route: Route, _: &TabView<'_>| {
            off.off();
            let persisted = load_tabs(&*store, &key);
            log::info!(
                "tabs: reconciling {} against {} persisted tabs",
                route.full_path,
                persisted.len()
            );
            AddVerdict::Adopt(resolve_active_index_and_tabs(persisted, route))
        }
    })
}
