// Tab identity: two routes are the same tab when path, query and params agree

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::route::{Route, RouteValue};

/// Empty paths become `/`; trailing slashes are dropped everywhere but the root.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else if trimmed.len() == path.len() {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(trimmed.to_string())
    }
}

impl RouteValue {
    /// `"a"` and `["a"]` are the same value; lists compare in order.
    pub fn equivalent(&self, other: &RouteValue) -> bool {
        match (self, other) {
            (RouteValue::One(a), RouteValue::One(b)) => a == b,
            (RouteValue::Many(a), RouteValue::Many(b)) => a == b,
            (RouteValue::One(a), RouteValue::Many(b)) | (RouteValue::Many(b), RouteValue::One(a)) => {
                b.len() == 1 && b[0] == *a
            }
        }
    }
}

fn same_values(a: &BTreeMap<String, RouteValue>, b: &BTreeMap<String, RouteValue>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value.equivalent(other)))
}

/// True when both routes denote the same tab.
///
/// Only the normalized path, query and params take part; hash, full path,
/// name, metadata and the matched ancestry are ignored, so a freshly
/// resolved navigation still matches its persisted copy.
pub fn is_same_route(a: &Route, b: &Route) -> bool {
    normalize_path(&a.path) == normalize_path(&b.path)
        && same_values(&a.query, &b.query)
        && same_values(&a.params, &b.params)
}
