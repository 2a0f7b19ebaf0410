// route-tabs-plugin: layout scoping, pinned tabs, and persistence across restarts

pub mod codec;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod reconcile;
pub mod rules;

use std::rc::Rc;

use route_tabs::{KeyValueStore, PluginContext, ShellPlugin, Unsubscribe};

pub use crate::config::TabsConfig;
pub use crate::error::{Result, TabsError};

/// Installs the tab rules into a shell.
///
/// Registration order matters: the scope guard runs before the reconciler,
/// so a first navigation to a page outside the layout does not use up the
/// one-time restore.
pub struct TabsPlugin {
    config: TabsConfig,
    store: Rc<dyn KeyValueStore>,
    handles: Vec<Unsubscribe>,
}

impl TabsPlugin {
    pub fn new(config: TabsConfig, store: Rc<dyn KeyValueStore>) -> Self {
        TabsPlugin {
            config,
            store,
            handles: Vec::new(),
        }
    }

    /// Unregister every guard this plugin installed.
    pub fn detach(&self) {
        for handle in &self.handles {
            handle.off();
        }
    }
}

impl ShellPlugin for TabsPlugin {
    fn install(&mut self, ctx: &mut PluginContext<'_>) {
        let guards = ctx.visited.guards_mut();
        self.handles
            .push(guards.before_add(rules::scope_guard(self.config.root_route.clone())));
        self.handles.push(guards.before_remove(rules::fixed_tab_guard()));

        if self.config.persist {
            self.handles.push(reconcile::install_reconciler(
                guards,
                self.store.clone(),
                self.config.storage_key.clone(),
            ));
        }

        ctx.unload.on_unload(lifecycle::unload_listener(
            self.config.persist,
            self.store.clone(),
            self.config.storage_key.clone(),
        ));

        log::info!(
            "tabs: installed (persist={}, root='{}', key='{}')",
            self.config.persist,
            self.config.root_route,
            self.config.storage_key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_tabs::{AddOutcome, MatchedRoute, MemoryStore, RemoveOutcome, Route, Shell};

    fn page(path: &str) -> Route {
        Route::new(path).with_matched(vec![
            MatchedRoute::named("root", "/"),
            MatchedRoute::named(path.trim_start_matches('/'), path),
        ])
    }

    fn login() -> Route {
        Route::new("/login").with_matched(vec![MatchedRoute::named("login", "/login")])
    }

    fn shell_with(config: TabsConfig, store: Rc<MemoryStore>) -> (Shell, TabsPlugin) {
        let mut plugin = TabsPlugin::new(config, store);
        let mut shell = Shell::new();
        shell.use_plugin(&mut plugin);
        (shell, plugin)
    }

    #[test]
    fn test_install_without_persistence() {
        let store = Rc::new(MemoryStore::new());
        store.set("tabs", "[{\"path\": \"/stale\"}]").unwrap();
        let (mut shell, plugin) = shell_with(TabsConfig::default(), store.clone());
        assert_eq!(plugin.handles.len(), 2);

        assert_eq!(shell.navigate(login()), AddOutcome::Vetoed);
        assert_eq!(shell.navigate(page("/home").pinned()), AddOutcome::Inserted(0));
        assert_eq!(shell.navigate(page("/users")), AddOutcome::Inserted(1));
        assert_eq!(shell.close(0), RemoveOutcome::Vetoed);

        shell.shutdown();
        assert!(!store.contains("tabs"));
    }

    #[test]
    fn test_restore_after_restart() {
        let store = Rc::new(MemoryStore::new());
        let config = TabsConfig::default().with_persist(true);

        let (mut shell, _plugin) = shell_with(config.clone(), store.clone());
        shell.navigate(page("/home").pinned());
        shell.navigate(page("/users"));
        shell.navigate(page("/settings"));
        shell.shutdown();

        let (mut shell, _plugin) = shell_with(config, store.clone());
        // Login page is vetoed by scope and does not consume the restore
        assert_eq!(shell.navigate(login()), AddOutcome::Vetoed);
        assert_eq!(shell.navigate(page("/users")), AddOutcome::Adopted(1));

        let paths: Vec<&str> = shell.visited().routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/home", "/users", "/settings"]);
        assert_eq!(shell.close(0), RemoveOutcome::Vetoed);

        assert_eq!(shell.navigate(page("/reports")), AddOutcome::Inserted(3));
    }

    #[test]
    fn test_detach_removes_guards() {
        let store = Rc::new(MemoryStore::new());
        let (mut shell, plugin) = shell_with(TabsConfig::default().with_persist(true), store);
        assert_eq!(plugin.handles.len(), 3);

        plugin.detach();
        plugin.detach();
        assert_eq!(shell.navigate(login()), AddOutcome::Inserted(0));
        assert_eq!(shell.visited_mut().guards_mut().add_len(), 0);
        assert_eq!(shell.visited_mut().guards_mut().remove_len(), 0);
    }
}
