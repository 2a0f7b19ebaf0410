// Persisted form of the tab list: JSON, ancestry stripped

use route_tabs::{KeyValueStore, Route};
use serde_json::Value;

use crate::error::Result;

/// Encode tabs for storage. Every entry keeps a `matched` field, always empty.
pub fn encode_tabs(tabs: &[Route]) -> Result<String> {
    let detached: Vec<Route> = tabs.iter().map(Route::without_matched).collect();
    Ok(serde_json::to_string(&detached)?)
}

/// Decode a stored record. Absent, blank or malformed input is an empty list.
///
/// Entries are decoded one at a time, so an unreadable tab is dropped on its
/// own and the rest of the record survives.
pub fn decode_tabs(data: Option<&str>) -> Vec<Route> {
    let data = match data {
        Some(d) if !d.trim().is_empty() => d,
        _ => return Vec::new(),
    };
    let entries = match serde_json::from_str::<Vec<Value>>(data) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("tabs: discarding unreadable persisted tabs: {}", e);
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Route>(entry) {
            Ok(tab) => Some(tab),
            Err(e) => {
                log::warn!("tabs: dropping unreadable persisted tab {}: {}", index, e);
                None
            }
        })
        .collect()
}

pub fn load_tabs(store: &dyn KeyValueStore, key: &str) -> Vec<Route> {
    match store.get(key) {
        Ok(data) => decode_tabs(data.as_deref()),
        Err(e) => {
            log::warn!("tabs: failed to read '{}': {}", key, e);
            Vec::new()
        }
    }
}

pub fn save_tabs(store: &dyn KeyValueStore, key: &str, tabs: &[Route]) -> Result<()> {
    let data = encode_tabs(tabs)?;
    store.set(key, &data)?;
    log::info!("tabs: saved {} tabs to '{}'", tabs.len(), key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_tabs::{is_same_route, MatchedRoute, MemoryStore};

    fn sample() -> Vec<Route> {
        let ancestry = vec![
            MatchedRoute::named("root", "/"),
            MatchedRoute::named("users", "/users"),
        ];
        vec![
            Route::new("/home")
                .pinned()
                .with_title("Home")
                .with_matched(ancestry.clone()),
            Route::new("/users")
                .with_query("page", "2")
                .with_query("tag", vec!["a", "b"])
                .with_matched(ancestry),
            Route::new("/users/7").with_param("id", "7"),
        ]
    }

    #[test]
    fn test_encode_strips_matched() {
        let data = encode_tabs(&sample()).unwrap();
        let value: Value = serde_json::from_str(&data).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        for entry in entries {
            assert_eq!(entry["matched"], Value::Array(vec![]));
        }
        assert_eq!(entries[0]["meta"]["fixedInTabs"], Value::Bool(true));
        assert_eq!(entries[1]["fullPath"], Value::from("/users?page=2&tag=a&tag=b"));
    }

    #[test]
    fn test_decode_matches_original_tabs() {
        let tabs = sample();
        let decoded = decode_tabs(Some(&encode_tabs(&tabs).unwrap()));
        assert_eq!(decoded.len(), tabs.len());
        for (original, restored) in tabs.iter().zip(&decoded) {
            assert!(is_same_route(original, restored));
            assert!(restored.matched.is_empty());
            assert_eq!(original.is_pinned(), restored.is_pinned());
        }
    }

    #[test]
    fn test_decode_absent_or_malformed() {
        assert!(decode_tabs(None).is_empty());
        assert!(decode_tabs(Some("")).is_empty());
        assert!(decode_tabs(Some("   \n")).is_empty());
        assert!(decode_tabs(Some("{not json")).is_empty());
        assert!(decode_tabs(Some("{\"path\": \"/a\"}")).is_empty());
        assert!(decode_tabs(Some("[{\"fullPath\": \"/a\"}]")).is_empty());
    }

    #[test]
    fn test_decode_mixed_meta_shapes() {
        let data = r#"[
            {"path": "/home", "meta": {"fixedInTabs": true, "title": "Home"}},
            {"path": "/users", "meta": {"title": {"en": "Users"}, "badge": 3}},
            {"path": "/reports", "meta": null},
            {"fullPath": "/no-path"},
            {"path": "/settings", "meta": {"fixedInTabs": 1}}
        ]"#;
        let tabs = decode_tabs(Some(data));
        let paths: Vec<&str> = tabs.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["/home", "/users", "/settings"]);

        assert!(tabs[0].is_pinned());
        assert_eq!(tabs[0].title(), "Home");
        assert_eq!(tabs[1].title(), "/users");
        assert_eq!(tabs[1].meta.extra.get("badge"), Some(&Value::from(3)));
        assert!(!tabs[2].is_pinned());
    }

    #[test]
    fn test_save_overwrites_and_load_reads_back() {
        let store = MemoryStore::new();
        save_tabs(&store, "tabs", &sample()).unwrap();
        save_tabs(&store, "tabs", &[Route::new("/only")]).unwrap();
        let loaded = load_tabs(&store, "tabs");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].path, "/only");
        assert!(load_tabs(&store, "other").is_empty());
    }
}
