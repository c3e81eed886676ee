//! Document root, path items, and the shared document handle.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::operation::Parameter;

/// OpenAPI document root object.
///
/// The `paths` map is keyed by OpenAPI path template (`/users/{userId}`)
/// and is always serialized, even when empty, because OpenAPI 3.0
/// requires it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version, `"3.0.3"` for documents built by [`OpenApi::new`].
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Available servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApi {
    /// Creates an empty OpenAPI 3.0.3 document.
    #[must_use]
    pub fn new(info: Info) -> Self {
        Self {
            openapi: "3.0.3".to_string(),
            info,
            servers: Vec::new(),
            paths: IndexMap::new(),
        }
    }

    /// Adds a server entry.
    #[must_use]
    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    /// Creates metadata with the required title and version.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Server information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// Creates a server entry.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A path item holding one operation per HTTP method.
///
/// Operation slots are raw JSON so that hand-written operations survive
/// untouched; generated operations are serialized into the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Summary for all operations on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description for all operations on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Value>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Value>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Value>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Value>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Value>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Value>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Value>,
    /// Parameters common to all operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Whether the method has an operation slot in OpenAPI.
    ///
    /// `CONNECT` and extension methods do not.
    #[must_use]
    pub fn supports(method: &Method) -> bool {
        matches!(
            method.as_str(),
            "GET" | "PUT" | "POST" | "DELETE" | "OPTIONS" | "HEAD" | "PATCH" | "TRACE"
        )
    }

    /// Stores an operation under the method's slot.
    ///
    /// Replaces whatever the slot held. Methods without a slot are
    /// ignored; check with [`PathItem::supports`] first to tell the
    /// difference.
    pub fn set_operation(&mut self, method: &Method, operation: Value) {
        if let Some(slot) = self.slot_mut(method) {
            *slot = Some(operation);
        }
    }

    /// The operation stored under the method's slot, if any.
    #[must_use]
    pub fn operation(&self, method: &Method) -> Option<&Value> {
        self.slot(method).and_then(Option::as_ref)
    }

    fn slot(&self, method: &Method) -> Option<&Option<Value>> {
        match method.as_str() {
            "GET" => Some(&self.get),
            "PUT" => Some(&self.put),
            "POST" => Some(&self.post),
            "DELETE" => Some(&self.delete),
            "OPTIONS" => Some(&self.options),
            "HEAD" => Some(&self.head),
            "PATCH" => Some(&self.patch),
            "TRACE" => Some(&self.trace),
            _ => None,
        }
    }

    fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Value>> {
        match method.as_str() {
            "GET" => Some(&mut self.get),
            "PUT" => Some(&mut self.put),
            "POST" => Some(&mut self.post),
            "DELETE" => Some(&mut self.delete),
            "OPTIONS" => Some(&mut self.options),
            "HEAD" => Some(&mut self.head),
            "PATCH" => Some(&mut self.patch),
            "TRACE" => Some(&mut self.trace),
            _ => None,
        }
    }
}

/// A shareable, lockable handle to one [`OpenApi`] document.
///
/// Route registration contributes operations through [`update`]; an
/// application serves the result from [`snapshot`]. Clones share the
/// same underlying document.
///
/// [`update`]: SharedDocument::update
/// [`snapshot`]: SharedDocument::snapshot
///
/// # Example
///
/// ```rust
/// use periplus_openapi::{Info, OpenApi, PathItem, SharedDocument};
///
/// let docs = SharedDocument::new(OpenApi::new(Info::new("API", "1.0.0")));
///
/// docs.update(|doc| {
///     doc.paths.entry("/ping".to_string()).or_default();
/// });
///
/// assert!(docs.snapshot().paths.contains_key("/ping"));
/// ```
#[derive(Debug, Clone)]
pub struct SharedDocument {
    inner: Arc<RwLock<OpenApi>>,
}

impl SharedDocument {
    /// Wraps a document in a shared handle.
    #[must_use]
    pub fn new(document: OpenApi) -> Self {
        Self {
            inner: Arc::new(RwLock::new(document)),
        }
    }

    /// Runs a closure with mutable access to the document.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut OpenApi) -> R) -> R {
        mutate(&mut self.inner.write())
    }

    /// Returns a copy of the document at this moment.
    #[must_use]
    pub fn snapshot(&self) -> OpenApi {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_document_shape() {
        let doc = OpenApi::new(Info::new("Harbor API", "2.1.0"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "openapi": "3.0.3",
                "info": {"title": "Harbor API", "version": "2.1.0"},
                "paths": {}
            })
        );
    }

    #[test]
    fn test_info_description_serialized_when_set() {
        let doc = OpenApi::new(Info::new("API", "1.0.0").with_description("ledger"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["info"]["description"], json!("ledger"));
    }

    #[test]
    fn test_servers_serialized_when_present() {
        let doc = OpenApi::new(Info::new("API", "1.0.0"))
            .with_server(Server::new("https://api.example.com").with_description("prod"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["servers"][0]["url"], json!("https://api.example.com"));
    }

    #[test]
    fn test_path_item_slots() {
        let mut item = PathItem::default();
        item.set_operation(&Method::GET, json!({"responses": {}}));
        item.set_operation(&Method::PATCH, json!({"responses": {"200": {}}}));

        assert!(item.operation(&Method::GET).is_some());
        assert!(item.operation(&Method::PATCH).is_some());
        assert!(item.operation(&Method::POST).is_none());
    }

    #[test]
    fn test_path_item_replaces_slot() {
        let mut item = PathItem::default();
        item.set_operation(&Method::GET, json!({"description": "old"}));
        item.set_operation(&Method::GET, json!({"description": "new"}));

        assert_eq!(item.operation(&Method::GET), Some(&json!({"description": "new"})));
    }

    #[test]
    fn test_path_item_ignores_unsupported_method() {
        let mut item = PathItem::default();
        assert!(!PathItem::supports(&Method::CONNECT));

        item.set_operation(&Method::CONNECT, json!({}));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_path_item_serializes_only_filled_slots() {
        let mut item = PathItem::default();
        item.set_operation(&Method::DELETE, json!({"responses": {}}));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"delete": {"responses": {}}}));
    }

    #[test]
    fn test_shared_document_clones_share_state() {
        let docs = SharedDocument::new(OpenApi::new(Info::new("API", "1.0.0")));
        let other = docs.clone();

        other.update(|doc| {
            doc.paths.entry("/a".to_string()).or_default();
        });

        assert!(docs.snapshot().paths.contains_key("/a"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let docs = SharedDocument::new(OpenApi::new(Info::new("API", "1.0.0")));
        let before = docs.snapshot();

        docs.update(|doc| {
            doc.paths.entry("/later".to_string()).or_default();
        });

        assert!(before.paths.is_empty());
    }

    #[test]
    fn test_document_roundtrip() {
        let mut doc = OpenApi::new(Info::new("API", "1.0.0"));
        let item = doc.paths.entry("/users/{userId}".to_string()).or_default();
        item.set_operation(&Method::GET, json!({"responses": {"200": {"description": "ok"}}}));

        let text = serde_json::to_string(&doc).unwrap();
        let back: OpenApi = serde_json::from_str(&text).unwrap();
        assert_eq!(
            back.paths["/users/{userId}"].operation(&Method::GET),
            doc.paths["/users/{userId}"].operation(&Method::GET)
        );
    }
}
