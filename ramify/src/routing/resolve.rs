//! Recursive-descent resolver over the route tree.
//!
//! At each node the next request token is consumed:
//!
//! - No token left (or an empty one) on a terminal node: match.
//! - A literal child equal to the token: descend and return whatever that
//!   subtree yields. A literal match commits; siblings are never retried.
//! - Otherwise each parameter child, in insertion order, binds the token
//!   under its name and descends. A failed attempt is discarded together
//!   with its binding and the next sibling is tried.
//!
//! Every attempt works on its own copy of the parameter pool, so a failed
//! branch leaves no trace in the result.

use super::{
    path::{PARAM_MARKER, tokenize},
    tree::{Node, Route, RouteTree},
};
use crate::config::ResolveOrder;
use ramify_core::{BoxHandler, Params, ResolveError};

/// A successful resolution.
#[derive(Debug, Clone)]
pub struct Resolved<'t> {
    route: &'t Route,
    params: Params,
}

impl<'t> Resolved<'t> {
    /// The matched handler.
    pub fn handler(&self) -> &'t BoxHandler {
        self.route.handler()
    }

    /// The matched route's hook names.
    pub fn hooks(&self) -> &'t [String] {
        self.route.hooks()
    }

    /// Seed values plus captured segments.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Consume into the parameter pool.
    pub fn into_params(self) -> Params {
        self.params
    }
}

/// Resolve `method` and `path` against `tree`, starting from `seed`.
pub fn resolve<'t>(
    tree: &'t RouteTree,
    method: &str,
    path: &str,
    seed: Params,
    order: ResolveOrder,
) -> Result<Resolved<'t>, ResolveError> {
    let root = tree
        .root(method)
        .ok_or_else(|| ResolveError::UnknownMethod(method.to_owned()))?;

    let tokens = tokenize(path);
    match descend(root, &tokens, &seed, order) {
        Some((route, params)) => {
            tracing::debug!(method, path, ?params, "Resolved route");
            Ok(Resolved { route, params })
        }
        None => Err(ResolveError::NoRouteMatch {
            method: method.to_owned(),
            path: path.to_owned(),
        }),
    }
}

fn descend<'t>(
    node: &'t Node,
    tokens: &[String],
    params: &Params,
    order: ResolveOrder,
) -> Option<(&'t Route, Params)> {
    let (token, rest) = match tokens.split_first() {
        Some((token, rest)) => (token.as_str(), rest),
        None => ("", tokens),
    };

    if token.is_empty() {
        // Registered keys are never empty, so no child can consume this.
        return node.leaf().map(|route| (route, params.clone()));
    }

    match order {
        ResolveOrder::LiteralFirst => {
            if let Some(child) = node.child(token) {
                return descend(child, rest, params, order);
            }
            node.param_children()
                .find_map(|(name, child)| try_param(name, child, token, rest, params, order))
        }
        ResolveOrder::InsertionOrder => {
            for (key, child) in node.children() {
                if key == token {
                    return descend(child, rest, params, order);
                }
                if let Some(name) = key.strip_prefix(PARAM_MARKER) {
                    if let Some(hit) = try_param(name, child, token, rest, params, order) {
                        return Some(hit);
                    }
                }
            }
            None
        }
    }
}

fn try_param<'t>(
    name: &str,
    child: &'t Node,
    token: &str,
    rest: &[String],
    params: &Params,
    order: ResolveOrder,
) -> Option<(&'t Route, Params)> {
    let mut attempt = params.clone();
    attempt.insert(name, token);
    let hit = descend(child, rest, &attempt, order);
    if hit.is_none() {
        tracing::trace!(param = name, token, "Backtracking");
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramify_core::{Handler, Signature, Value, handler_fn};
    use std::sync::Arc;

    fn tree(paths: &[(&str, &'static str)]) -> RouteTree {
        let mut tree = RouteTree::new();
        for (path, tag) in paths {
            let tag = *tag;
            let handler = Arc::new(handler_fn(Signature::new(), move |_| tag));
            tree.insert("GET", path, Route::new(handler, Vec::new()));
        }
        tree
    }

    fn tag(resolved: &Resolved<'_>) -> Value {
        resolved
            .handler()
            .invoke(ramify_core::Args::new())
            .unwrap()
    }

    fn lookup<'t>(tree: &'t RouteTree, path: &str) -> Result<Resolved<'t>, ResolveError> {
        resolve(tree, "GET", path, Params::new(), ResolveOrder::LiteralFirst)
    }

    #[test]
    fn test_exact_match() {
        let tree = tree(&[("/users/list", "list")]);
        let hit = lookup(&tree, "users/list").unwrap();
        assert_eq!(tag(&hit), Value::from("list"));
        assert!(hit.params().is_empty());
    }

    #[test]
    fn test_parameter_capture() {
        let tree = tree(&[("/users/:id", "show")]);
        let hit = lookup(&tree, "users/42").unwrap();
        assert_eq!(hit.params(), &Params::from([("id", "42")]));
    }

    #[test]
    fn test_literal_commits_without_fallback() {
        let tree = tree(&[("/users/:id", "show"), ("/users/list/all", "all")]);
        assert!(matches!(
            lookup(&tree, "users/list"),
            Err(ResolveError::NoRouteMatch { .. })
        ));
        // Other segments still fall through to the parameter.
        assert_eq!(tag(&lookup(&tree, "users/7").unwrap()), Value::from("show"));
    }

    #[test]
    fn test_parameter_backtracking_erases_binding() {
        let tree = tree(&[("/users/:id/edit", "edit"), ("/users/:name/view", "view")]);
        let hit = lookup(&tree, "users/42/view").unwrap();
        assert_eq!(tag(&hit), Value::from("view"));
        assert_eq!(hit.params(), &Params::from([("name", "42")]));
        assert!(!hit.params().contains_key("id"));
    }

    #[test]
    fn test_backtracking_restores_seed_value() {
        let tree = tree(&[("/users/:id/edit", "edit"), ("/users/:name/view", "view")]);
        let seed = Params::from([("id", "seeded")]);
        let hit = resolve(&tree, "GET", "users/42/view", seed, ResolveOrder::LiteralFirst).unwrap();
        assert_eq!(hit.params().get_str("id"), Some("seeded"));
        assert_eq!(hit.params().get_str("name"), Some("42"));
    }

    #[test]
    fn test_unknown_method() {
        let tree = tree(&[("/", "home")]);
        let err = resolve(&tree, "DELETE", "/", Params::new(), ResolveOrder::LiteralFirst)
            .unwrap_err();
        assert_eq!(err, ResolveError::UnknownMethod("DELETE".into()));
        assert_eq!(err.to_string(), "Unknown method: DELETE");
    }

    #[test]
    fn test_normalization() {
        let tree = tree(&[("/users/:id", "show")]);
        for path in ["users/42/", "users.42", "/users/42"] {
            let hit = lookup(&tree, path).unwrap();
            assert_eq!(hit.params().get_str("id"), Some("42"), "path {path}");
        }
    }

    #[test]
    fn test_empty_path_needs_root_route() {
        let without = tree(&[("/users", "users")]);
        assert!(lookup(&without, "").is_err());

        let with = tree(&[("/", "home")]);
        assert_eq!(tag(&lookup(&with, "/").unwrap()), Value::from("home"));
        assert_eq!(tag(&lookup(&with, "").unwrap()), Value::from("home"));
    }

    #[test]
    fn test_prefix_of_longer_route_is_terminal() {
        let tree = tree(&[("/a", "a"), ("/a/b", "ab")]);
        assert_eq!(tag(&lookup(&tree, "a").unwrap()), Value::from("a"));
        assert_eq!(tag(&lookup(&tree, "a/b").unwrap()), Value::from("ab"));
        assert!(lookup(&tree, "a/b/c").is_err());
    }

    #[test]
    fn test_insertion_order_tries_earlier_parameter_first() {
        let tree = tree(&[("/users/:id", "show"), ("/users/list/all", "all")]);
        let hit = resolve(
            &tree,
            "GET",
            "users/list",
            Params::new(),
            ResolveOrder::InsertionOrder,
        )
        .unwrap();
        assert_eq!(tag(&hit), Value::from("show"));
        assert_eq!(hit.params().get_str("id"), Some("list"));
    }

    #[test]
    fn test_insertion_order_literal_first_when_registered_first() {
        let tree = tree(&[("/users/list/all", "all"), ("/users/:id", "show")]);
        assert!(
            resolve(
                &tree,
                "GET",
                "users/list",
                Params::new(),
                ResolveOrder::InsertionOrder,
            )
            .is_err()
        );
    }
}
