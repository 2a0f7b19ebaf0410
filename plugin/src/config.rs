use std::collections::BTreeMap;

pub const DEFAULT_ROOT_ROUTE: &str = "root";
pub const DEFAULT_STORAGE_KEY: &str = "tabs";

/// Tabs settings, snapshotted once when the plugin is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsConfig {
    /// Keep tabs across restarts.
    pub persist: bool,
    /// Name of the layout route every tab must live under.
    pub root_route: String,
    pub storage_key: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        TabsConfig {
            persist: false,
            root_route: DEFAULT_ROOT_ROUTE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl TabsConfig {
    pub fn from_btreemap(config: &BTreeMap<String, String>) -> Self {
        let persist = config
            .get("tabs_persist")
            .map(|s| s == "true")
            .unwrap_or(false);

        let root_route = config
            .get("root_route")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ROOT_ROUTE)
            .to_string();

        let storage_key = config
            .get("storage_key")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STORAGE_KEY)
            .to_string();

        TabsConfig {
            persist,
            root_route,
            storage_key,
        }
    }

    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }
}
