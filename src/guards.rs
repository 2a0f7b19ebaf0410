// Guard chains run before every add/remove on the visited-routes container

use std::cell::Cell;
use std::rc::Rc;

use crate::route::Route;

/// Read-only snapshot of the container handed to each guard.
#[derive(Debug, Clone, Copy)]
pub struct TabView<'a> {
    pub tabs: &'a [Route],
    pub active: Option<usize>,
}

impl<'a> TabView<'a> {
    pub fn get(&self, index: usize) -> Option<&'a Route> {
        self.tabs.get(index)
    }
}

/// Replace the whole tab list and cursor in one commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Adoption {
    pub tabs: Vec<Route>,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddVerdict {
    /// Pass the (possibly rewritten) route to the next guard.
    Continue(Route),
    Veto,
    /// Veto this add and commit the adoption instead.
    Adopt(Adoption),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveVerdict {
    Continue(usize),
    Veto,
}

pub type AddGuardFn = dyn FnMut(Route, &TabView<'_>) -> AddVerdict;
pub type RemoveGuardFn = dyn FnMut(usize, &TabView<'_>) -> RemoveVerdict;

/// Detach handle returned by every registration.
///
/// Cloning shares the same registration; `off` is idempotent.
#[derive(Debug, Clone)]
pub struct Unsubscribe {
    live: Rc<Cell<bool>>,
}

impl Unsubscribe {
    fn new() -> Self {
        Unsubscribe {
            live: Rc::new(Cell::new(true)),
        }
    }

    pub fn off(&self) {
        self.live.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.live.get()
    }
}

struct Entry<G: ?Sized> {
    handle: Unsubscribe,
    guard: Box<G>,
}

struct GuardChain<G: ?Sized> {
    entries: Vec<Entry<G>>,
}

impl<G: ?Sized> Default for GuardChain<G> {
    fn default() -> Self {
        GuardChain { entries: Vec::new() }
    }
}

impl<G: ?Sized> GuardChain<G> {
    fn push(&mut self, handle: Unsubscribe, guard: Box<G>) -> Unsubscribe {
        self.prune();
        self.entries.push(Entry {
            handle: handle.clone(),
            guard,
        });
        handle
    }

    fn prune(&mut self) {
        self.entries.retain(|e| e.handle.is_active());
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.handle.is_active()).count()
    }
}

/// The two independent guard chains: `before_add` and `before_remove`.
#[derive(Default)]
pub struct Guards {
    add: GuardChain<AddGuardFn>,
    remove: GuardChain<RemoveGuardFn>,
}

impl Guards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_add<F>(&mut self, guard: F) -> Unsubscribe
    where
        F: FnMut(Route, &TabView<'_>) -> AddVerdict + 'static,
    {
        self.add.push(Unsubscribe::new(), Box::new(guard))
    }

    /// Register an add guard that holds its own detach handle, for guards
    /// that must run once and then remove themselves.
    pub fn before_add_with<B, F>(&mut self, build: B) -> Unsubscribe
    where
        B: FnOnce(Unsubscribe) -> F,
        F: FnMut(Route, &TabView<'_>) -> AddVerdict + 'static,
    {
        let handle = Unsubscribe::new();
        let guard = build(handle.clone());
        self.add.push(handle, Box::new(guard))
    }

    pub fn before_remove<F>(&mut self, guard: F) -> Unsubscribe
    where
        F: FnMut(usize, &TabView<'_>) -> RemoveVerdict + 'static,
    {
        self.remove.push(Unsubscribe::new(), Box::new(guard))
    }

    /// Run add guards in registration order until one stops the chain.
    pub fn run_add(&mut self, route: Route, view: &TabView<'_>) -> AddVerdict {
        let verdict = chain_add(&mut self.add.entries, route, view);
        self.add.prune();
        verdict
    }

    /// Run remove guards in registration order. Every guard sees the
    /// original index.
    pub fn run_remove(&mut self, index: usize, view: &TabView<'_>) -> RemoveVerdict {
        let mut verdict = RemoveVerdict::Continue(index);
        for entry in self.remove.entries.iter_mut() {
            if !entry.handle.is_active() {
                continue;
            }
            if (entry.guard)(index, view) == RemoveVerdict::Veto {
                verdict = RemoveVerdict::Veto;
                break;
            }
        }
        self.remove.prune();
        verdict
    }

    pub fn add_len(&self) -> usize {
        self.add.len()
    }

    pub fn remove_len(&self) -> usize {
        self.remove.len()
    }
}

fn chain_add(entries: &mut [Entry<AddGuardFn>], route: Route, view: &TabView<'_>) -> AddVerdict {
    let mut current = route;
    for entry in entries.iter_mut() {
        // A guard may have been detached by an earlier one in this run
        if !entry.handle.is_active() {
            continue;
        }
        match (entry.guard)(current, view) {
            AddVerdict::Continue(next) => current = next,
            stop => return stop,
        }
    }
    AddVerdict::Continue(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn empty_view() -> TabView<'static> {
        TabView {
            tabs: &[],
            active: None,
        }
    }

    fn recorder() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_add_guards_run_in_registration_order() {
        let mut guards = Guards::new();
        let calls = recorder();
        for name in ["g1", "g2", "g3"] {
            let calls = calls.clone();
            guards.before_add(move |route, _| {
                calls.borrow_mut().push(name);
                AddVerdict::Continue(route)
            });
        }

        let verdict = guards.run_add(Route::new("/a"), &empty_view());
        assert_eq!(verdict, AddVerdict::Continue(Route::new("/a")));
        assert_eq!(*calls.borrow(), vec!["g1", "g2", "g3"]);
    }

    #[test]
    fn test_add_veto_short_circuits() {
        let mut guards = Guards::new();
        let calls = recorder();
        let c1 = calls.clone();
        guards.before_add(move |route, _| {
            c1.borrow_mut().push("g1");
            AddVerdict::Continue(route)
        });
        let c2 = calls.clone();
        guards.before_add(move |_, _| {
            c2.borrow_mut().push("g2");
            AddVerdict::Veto
        });
        let c3 = calls.clone();
        guards.before_add(move |route, _| {
            c3.borrow_mut().push("g3");
            AddVerdict::Continue(route)
        });

        assert_eq!(guards.run_add(Route::new("/a"), &empty_view()), AddVerdict::Veto);
        assert_eq!(*calls.borrow(), vec!["g1", "g2"]);
    }

    #[test]
    fn test_add_guards_thread_rewritten_route() {
        let mut guards = Guards::new();
        guards.before_add(|route, _| AddVerdict::Continue(route.with_title("Rewritten")));
        guards.before_add(|route, _| {
            assert_eq!(route.title(), "Rewritten");
            AddVerdict::Continue(route.pinned())
        });

        match guards.run_add(Route::new("/a"), &empty_view()) {
            AddVerdict::Continue(route) => {
                assert_eq!(route.title(), "Rewritten");
                assert!(route.is_pinned());
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut guards = Guards::new();
        let calls = recorder();
        let c = calls.clone();
        let off = guards.before_add(move |route, _| {
            c.borrow_mut().push("g");
            AddVerdict::Continue(route)
        });
        assert!(off.is_active());
        assert_eq!(guards.add_len(), 1);

        off.off();
        off.off();
        assert!(!off.is_active());
        assert_eq!(guards.add_len(), 0);

        guards.run_add(Route::new("/a"), &empty_view());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_self_detaching_guard_runs_once() {
        let mut guards = Guards::new();
        let calls = recorder();
        let c = calls.clone();
        guards.before_add_with(move |off| {
            move |_: Route, _: &TabView<'_>| {
                off.off();
                c.borrow_mut().push("once");
                AddVerdict::Veto
            }
        });

        assert_eq!(guards.run_add(Route::new("/a"), &empty_view()), AddVerdict::Veto);
        assert_eq!(
            guards.run_add(Route::new("/a"), &empty_view()),
            AddVerdict::Continue(Route::new("/a"))
        );
        assert_eq!(*calls.borrow(), vec!["once"]);
        assert_eq!(guards.add_len(), 0);
    }

    #[test]
    fn test_guard_detached_mid_chain_is_skipped() {
        let mut guards = Guards::new();
        let calls = recorder();
        let later: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));

        let l = later.clone();
        guards.before_add(move |route, _| {
            if let Some(off) = l.borrow().as_ref() {
                off.off();
            }
            AddVerdict::Continue(route)
        });
        let c = calls.clone();
        let off = guards.before_add(move |route, _| {
            c.borrow_mut().push("late");
            AddVerdict::Continue(route)
        });
        *later.borrow_mut() = Some(off);

        guards.run_add(Route::new("/a"), &empty_view());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_remove_guards_see_original_index() {
        let mut guards = Guards::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..3 {
            let seen = seen.clone();
            guards.before_remove(move |index, _| {
                seen.borrow_mut().push(index);
                RemoveVerdict::Continue(index + 10)
            });
        }

        assert_eq!(guards.run_remove(2, &empty_view()), RemoveVerdict::Continue(2));
        assert_eq!(*seen.borrow(), vec![2, 2, 2]);
    }

    #[test]
    fn test_remove_veto_short_circuits() {
        let mut guards = Guards::new();
        let calls = recorder();
        guards.before_remove(|_, _| RemoveVerdict::Veto);
        let c = calls.clone();
        guards.before_remove(move |index, _| {
            c.borrow_mut().push("second");
            RemoveVerdict::Continue(index)
        });

        assert_eq!(guards.run_remove(0, &empty_view()), RemoveVerdict::Veto);
        assert!(calls.borrow().is_empty());
        assert_eq!(guards.remove_len(), 2);
    }
}
