// Route descriptors as the shell hands them to the tab container

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded::byte_serialize;

/// A query or param value.
///
/// Hosts send either a single (possibly null) string or a list of them,
/// e.g. `?tag=a&tag=b` arrives as `Many`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteValue {
    One(Option<String>),
    Many(Vec<Option<String>>),
}

impl RouteValue {
    fn render(&self, key: &str) -> Vec<String> {
        let key: String = byte_serialize(key.as_bytes()).collect();
        let one = |v: &Option<String>| match v {
            Some(v) => format!("{}={}", key, byte_serialize(v.as_bytes()).collect::<String>()),
            None => key.clone(),
        };
        match self {
            RouteValue::One(v) => vec![one(v)],
            RouteValue::Many(vs) => vs.iter().map(one).collect(),
        }
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::One(Some(value.to_string()))
    }
}

impl From<String> for RouteValue {
    fn from(value: String) -> Self {
        RouteValue::One(Some(value))
    }
}

impl From<Vec<&str>> for RouteValue {
    fn from(values: Vec<&str>) -> Self {
        RouteValue::Many(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

pub type Query = BTreeMap<String, RouteValue>;
pub type Params = BTreeMap<String, RouteValue>;

// Known meta keys with an unexpected type read as unset
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(title) => Some(title),
        _ => None,
    })
}

/// Route-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Pinned: the tab cannot be closed by the user.
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub fixed_in_tabs: bool,
    /// Only string titles are kept; anything else reads as no title.
    #[serde(
        default,
        deserialize_with = "lenient_title",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Anything else the host attached (icons, permissions, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of the matched-route ancestry, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl MatchedRoute {
    pub fn named(name: &str, path: &str) -> Self {
        MatchedRoute {
            name: Some(name.to_string()),
            path: path.to_string(),
            meta: RouteMeta::default(),
        }
    }
}

/// A resolved navigation target; one of these backs every tab.
///
/// Field names on the wire are camelCase so records written by browser
/// hosts load unchanged. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub path: String,
    #[serde(default)]
    pub full_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub query: Query,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub matched: Vec<MatchedRoute>,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(path: &str) -> Self {
        Route {
            path: path.to_string(),
            full_path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: impl Into<RouteValue>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self.refresh_full_path();
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<RouteValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = hash.to_string();
        self.refresh_full_path();
        self
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.meta.title = Some(title.to_string());
        self
    }

    pub fn pinned(mut self) -> Self {
        self.meta.fixed_in_tabs = true;
        self
    }

    pub fn with_matched(mut self, matched: Vec<MatchedRoute>) -> Self {
        self.matched = matched;
        self
    }

    /// Name of the outermost matched route, if any.
    pub fn root_name(&self) -> Option<&str> {
        self.matched.first().and_then(|m| m.name.as_deref())
    }

    pub fn is_pinned(&self) -> bool {
        self.meta.fixed_in_tabs
    }

    /// Display label: the meta title, else the path.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.path)
    }

    /// Shallow copy with the ancestry emptied.
    pub fn without_matched(&self) -> Route {
        Route {
            matched: Vec::new(),
            ..self.clone()
        }
    }

    fn refresh_full_path(&mut self) {
        let mut full = self.path.clone();
        let pairs: Vec<String> = self
            .query
            .iter()
            .flat_map(|(k, v)| v.render(k))
            .collect();
        if !pairs.is_empty() {
            full.push('?');
            full.push_str(&pairs.join("&"));
        }
        if !self.hash.is_empty() {
            if !self.hash.starts_with('#') {
                full.push('#');
            }
            full.push_str(&self.hash);
        }
        self.full_path = full;
    }
}
