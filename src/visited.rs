// Ordered container of visited routes plus the active-tab cursor

use crate::equality::is_same_route;
use crate::guards::{AddVerdict, Guards, RemoveVerdict, TabView};
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// New tab appended at this index and activated.
    Inserted(usize),
    /// An equal tab already existed; it was replaced and activated.
    Activated(usize),
    /// A guard replaced the whole list; the cursor now points here.
    Adopted(usize),
    Vetoed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(Route),
    Vetoed,
    OutOfRange,
}

/// Tabs in display order, the cursor, and the guards that gate mutation.
///
/// The cursor is `Some(i)` with `i < len` whenever the list is non-empty
/// and `None` when it is empty.
#[derive(Default)]
pub struct VisitedRoutes {
    routes: Vec<Route>,
    active: Option<usize>,
    guards: Guards,
}

impl VisitedRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.active.and_then(|i| self.routes.get(i))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn guards_mut(&mut self) -> &mut Guards {
        &mut self.guards
    }

    /// Propose a tab for a completed navigation.
    pub fn add(&mut self, route: Route) -> AddOutcome {
        let view = TabView {
            tabs: &self.routes,
            active: self.active,
        };
        match self.guards.run_add(route, &view) {
            AddVerdict::Veto => {
                log::debug!("visited: add vetoed");
                AddOutcome::Vetoed
            }
            AddVerdict::Adopt(adoption) => {
                log::debug!(
                    "visited: adopting {} tabs, active {}",
                    adoption.tabs.len(),
                    adoption.active
                );
                self.commit(adoption.tabs, Some(adoption.active));
                AddOutcome::Adopted(self.active.unwrap_or(0))
            }
            AddVerdict::Continue(route) => {
                if let Some(index) = self.routes.iter().position(|r| is_same_route(r, &route)) {
                    self.routes[index] = route;
                    self.active = Some(index);
                    AddOutcome::Activated(index)
                } else {
                    self.routes.push(route);
                    let index = self.routes.len() - 1;
                    self.active = Some(index);
                    AddOutcome::Inserted(index)
                }
            }
        }
    }

    /// Propose closing the tab at `index`.
    pub fn remove(&mut self, index: usize) -> RemoveOutcome {
        let view = TabView {
            tabs: &self.routes,
            active: self.active,
        };
        if self.guards.run_remove(index, &view) == RemoveVerdict::Veto {
            log::debug!("visited: remove of tab {} vetoed", index);
            return RemoveOutcome::Vetoed;
        }
        if index >= self.routes.len() {
            return RemoveOutcome::OutOfRange;
        }

        let removed = self.routes.remove(index);
        self.active = match self.active {
            _ if self.routes.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index.min(self.routes.len() - 1)),
            other => other,
        };
        RemoveOutcome::Removed(removed)
    }

    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.routes.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    fn commit(&mut self, routes: Vec<Route>, active: Option<usize>) {
        self.active = if routes.is_empty() {
            None
        } else {
            Some(active.unwrap_or(0).min(routes.len() - 1))
        };
        self.routes = routes;
    }
}
