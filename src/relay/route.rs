//! Route resolution.
//!
//! # Responsibilities
//! - Extract the site identifier from a raw request path
//! - Evaluate an ordered route table against (method, site id)
//! - Return the matched operation or an explicit `Route::NotFound`
//!
//! # Design Decisions
//! - First match wins, in table order
//! - No regex: the identifier is the segment after the first `/api/sites/`
//! - An empty segment counts as "no identifier"

use axum::http::Method;

/// Literal path segment preceding the site identifier.
pub const SITES_PATH: &str = "/api/sites/";

/// Operation selected for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListSites,
    DeleteSite { id: String },
    NotFound,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::ListSites => "list_sites",
            Route::DeleteSite { .. } => "delete_site",
            Route::NotFound => "not_found",
        }
    }
}

/// Return the path segment after `/api/sites/`, up to the next `/`.
pub fn extract_site_id(path: &str) -> Option<&str> {
    path.match_indices(SITES_PATH).find_map(|(idx, _)| {
        let rest = &path[idx + SITES_PATH.len()..];
        let segment = rest.split('/').next().unwrap_or_default();
        (!segment.is_empty()).then_some(segment)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteId {
    Absent,
    Required,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    List,
    Delete,
}

#[derive(Debug, Clone)]
struct RouteRule {
    method: Method,
    site_id: SiteId,
    operation: Operation,
}

/// Ordered (method, path-pattern, operation) table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// The two relayed operations: list (GET, no id) then delete (DELETE, id).
    pub fn standard() -> Self {
        Self {
            rules: vec![
                RouteRule {
                    method: Method::GET,
                    site_id: SiteId::Absent,
                    operation: Operation::List,
                },
                RouteRule {
                    method: Method::DELETE,
                    site_id: SiteId::Required,
                    operation: Operation::Delete,
                },
            ],
        }
    }

    /// Resolve a raw method/path pair.
    pub fn resolve(&self, method: &Method, path: &str) -> Route {
        let site_id = extract_site_id(path);

        let matched = self.rules.iter().find(|rule| {
            rule.method == *method
                && match rule.site_id {
                    SiteId::Absent => site_id.is_none(),
                    SiteId::Required => site_id.is_some(),
                }
        });

        match (matched.map(|r| r.operation), site_id) {
            (Some(Operation::List), _) => Route::ListSites,
            (Some(Operation::Delete), Some(id)) => Route::DeleteSite { id: id.to_string() },
            _ => Route::NotFound,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
