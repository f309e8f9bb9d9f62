//! # Request Context
//!
//! The ambient request as supplied by the surrounding server. The router
//! never reaches into process-global state: method, URI and every ambient
//! map arrive through a [`RequestContext`].
//!
//! ```rust
//! use ramify_core::{Params, RequestContext};
//!
//! let ctx = RequestContext::builder()
//!     .method("GET")
//!     .uri("/users/42?limit=5")
//!     .query(Params::from([("limit", "5")]))
//!     .build();
//!
//! assert_eq!(ctx.path(), "/users/42");
//! ```

use crate::params::Params;
use typed_builder::TypedBuilder;

/// Ambient values of one request.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
pub struct RequestContext {
    /// Request method, e.g. `GET`.
    #[builder(default, setter(into))]
    method: String,
    /// Request URI; query string and fragment are ignored for routing.
    #[builder(default, setter(into))]
    uri: String,
    /// Values seeding the resolver before any segment is captured.
    #[builder(default)]
    params: Params,
    /// Decoded query string.
    #[builder(default)]
    query: Params,
    /// Decoded request body fields.
    #[builder(default)]
    body: Params,
    /// Request headers.
    #[builder(default)]
    headers: Params,
    /// Request cookies.
    #[builder(default)]
    cookies: Params,
    /// Session values.
    #[builder(default)]
    session: Params,
}

impl RequestContext {
    /// Request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Full request URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The URI without query string or fragment.
    pub fn path(&self) -> &str {
        let end = self.uri.find(['?', '#']).unwrap_or(self.uri.len());
        &self.uri[..end]
    }

    /// Seed parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Query string values.
    pub fn query(&self) -> &Params {
        &self.query
    }

    /// Body values.
    pub fn body(&self) -> &Params {
        &self.body
    }

    /// Header values.
    pub fn headers(&self) -> &Params {
        &self.headers
    }

    /// Cookie values.
    pub fn cookies(&self) -> &Params {
        &self.cookies
    }

    /// Session values.
    pub fn session(&self) -> &Params {
        &self.session
    }

    /// The ambient maps in merge order: headers, query, body, cookies,
    /// session. Later maps win on key collisions.
    pub fn ambient(&self) -> [&Params; 5] {
        [
            &self.headers,
            &self.query,
            &self.body,
            &self.cookies,
            &self.session,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_strips_query_and_fragment() {
        let ctx = RequestContext::builder().uri("/a/b?x=1#top").build();
        assert_eq!(ctx.path(), "/a/b");
        let ctx = RequestContext::builder().uri("/a#frag").build();
        assert_eq!(ctx.path(), "/a");
    }

    #[test]
    fn test_default_is_empty() {
        let ctx = RequestContext::default();
        assert_eq!(ctx.method(), "");
        assert!(ctx.ambient().iter().all(|m| m.is_empty()));
    }
}
