// route-tabs: visited-route container behind a multi-page tab bar

pub mod equality;
pub mod error;
pub mod guards;
pub mod route;
pub mod shell;
pub mod store;
pub mod visited;

pub use equality::{is_same_route, normalize_path};
pub use error::StoreError;
pub use guards::{AddVerdict, Adoption, Guards, RemoveVerdict, TabView, Unsubscribe};
pub use route::{MatchedRoute, Route, RouteMeta, RouteValue};
pub use shell::{PluginContext, Shell, ShellPlugin, UnloadSignal};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use visited::{AddOutcome, RemoveOutcome, VisitedRoutes};
