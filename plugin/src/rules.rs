// Which navigations become tabs, and which tabs the user may close

use route_tabs::{AddVerdict, RemoveVerdict, Route, TabView};

/// True when the route renders inside the layout named `root`.
pub fn is_layout_route(route: &Route, root: &str) -> bool {
    route.root_name() == Some(root)
}

/// Pinned tabs stay open. Unknown indices are left for the container to reject.
pub fn is_closable(view: &TabView<'_>, index: usize) -> bool {
    !view.get(index).is_some_and(Route::is_pinned)
}

/// Keeps pages outside the layout (login, errors) out of the tab bar.
pub fn scope_guard(root: String) -> impl FnMut(Route, &TabView<'_>) -> AddVerdict + 'static {
    move |route: Route, _: &TabView<'_>| {
        if is_layout_route(&route, &root) {
            AddVerdict::Continue(route)
        } else {
            log::debug!("tabs: {} is outside layout '{}'", route.path, root);
            AddVerdict::Veto
        }
    }
}

pub fn fixed_tab_guard() -> impl FnMut(usize, &TabView<'_>) -> RemoveVerdict + 'static {
    |index: usize, view: &TabView<'_>| {
        if is_closable(view, index) {
            RemoveVerdict::Continue(index)
        } else {
            log::debug!("tabs: tab {} is pinned", index);
            RemoveVerdict::Veto
        }
    }
}
