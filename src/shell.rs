// Navigation shell: owns the visited routes, installs plugins, and raises
// the unload signal when the host process is about to exit

use crate::route::Route;
use crate::visited::{AddOutcome, RemoveOutcome, VisitedRoutes};

type UnloadListener = Box<dyn FnOnce(&[Route])>;

/// Fires at most once per process lifetime. Listeners run synchronously,
/// in registration order, and see the final tab list.
#[derive(Default)]
pub struct UnloadSignal {
    listeners: Vec<UnloadListener>,
    fired: bool,
}

impl UnloadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_unload<F>(&mut self, listener: F)
    where
        F: FnOnce(&[Route]) + 'static,
    {
        if self.fired {
            log::warn!("shell: unload listener registered after unload, ignoring");
            return;
        }
        self.listeners.push(Box::new(listener));
    }

    /// Returns false if the signal already fired.
    pub fn fire(&mut self, routes: &[Route]) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        for listener in self.listeners.drain(..) {
            listener(routes);
        }
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// What a plugin gets to touch while it is being installed.
pub struct PluginContext<'a> {
    pub visited: &'a mut VisitedRoutes,
    pub unload: &'a mut UnloadSignal,
}

pub trait ShellPlugin {
    fn install(&mut self, ctx: &mut PluginContext<'_>);
}

/// Host for a multi-page tab bar. Route resolution happens elsewhere; the
/// shell receives already-resolved routes after each navigation.
#[derive(Default)]
pub struct Shell {
    visited: VisitedRoutes,
    unload: UnloadSignal,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_plugin(&mut self, plugin: &mut dyn ShellPlugin) -> &mut Self {
        let mut ctx = PluginContext {
            visited: &mut self.visited,
            unload: &mut self.unload,
        };
        plugin.install(&mut ctx);
        self
    }

    /// Called after the router finished a navigation to `route`.
    pub fn navigate(&mut self, route: Route) -> AddOutcome {
        log::debug!("shell: navigated to {}", route.full_path);
        self.visited.add(route)
    }

    /// User asked to close the tab at `index`.
    pub fn close(&mut self, index: usize) -> RemoveOutcome {
        self.visited.remove(index)
    }

    pub fn activate(&mut self, index: usize) -> bool {
        self.visited.activate(index)
    }

    pub fn visited(&self) -> &VisitedRoutes {
        &self.visited
    }

    pub fn visited_mut(&mut self) -> &mut VisitedRoutes {
        &mut self.visited
    }

    /// Raise the unload signal. Only the first call does anything.
    pub fn shutdown(&mut self) -> bool {
        self.unload.fire(self.visited.routes())
    }
}
