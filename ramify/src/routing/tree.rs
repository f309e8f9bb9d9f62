//! The route tree: one trie per HTTP method.
//!
//! Each edge is labeled with a registered token (a literal segment or a
//! `:name` parameter). Children are kept in insertion order, which the
//! resolver relies on when it walks parameter siblings.

use super::path::{Token, tokenize};
use indexmap::IndexMap;
use ramify_core::{BoxHandler, Handler};
use std::fmt;

/// A dispatchable route: the handler and the names of its hooks.
#[derive(Clone)]
pub struct Route {
    handler: BoxHandler,
    hooks: Vec<String>,
}

impl Route {
    /// Create a route.
    pub fn new(handler: BoxHandler, hooks: Vec<String>) -> Self {
        Self { handler, hooks }
    }

    /// The registered handler.
    pub fn handler(&self) -> &BoxHandler {
        &self.handler
    }

    /// The per-route hook names, in run order.
    pub fn hooks(&self) -> &[String] {
        &self.hooks
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("signature", self.handler.signature())
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// A node in the trie.
///
/// A node with a `leaf` is terminal; any node may also have children, so a
/// path can be both a full route and a prefix of longer ones.
#[derive(Debug, Clone, Default)]
pub struct Node {
    children: IndexMap<String, Node>,
    leaf: Option<Route>,
}

impl Node {
    /// The route terminating at this node, if any.
    pub fn leaf(&self) -> Option<&Route> {
        self.leaf.as_ref()
    }

    /// Look up the child for an exact token.
    pub fn child(&self, token: &str) -> Option<&Node> {
        self.children.get(token)
    }

    /// Iterate children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate parameter children in insertion order, with their names.
    pub fn param_children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children()
            .filter_map(|(key, node)| Token::parse(key).param_name().map(|name| (name, node)))
    }

    fn routes(&self) -> usize {
        usize::from(self.leaf.is_some()) + self.children.values().map(Node::routes).sum::<usize>()
    }
}

/// Route tries partitioned by method.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    roots: IndexMap<String, Node>,
}

impl RouteTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The trie root for `method`.
    pub fn root(&self, method: &str) -> Option<&Node> {
        self.roots.get(method)
    }

    /// Registered methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Total number of terminal routes across all methods.
    pub fn len(&self) -> usize {
        self.roots.values().map(Node::routes).sum()
    }

    /// Returns `true` if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the route at the node `path` terminates on, creating missing
    /// nodes along the way. Returns the route it replaced.
    ///
    /// Registration stops at the first empty token, so `/` terminates on
    /// the root itself.
    pub fn insert(&mut self, method: &str, path: &str, route: Route) -> Option<Route> {
        let mut node = self.roots.entry(method.to_owned()).or_default();
        for token in tokenize(path) {
            if token.is_empty() {
                break;
            }
            node = node.children.entry(token).or_default();
        }
        node.leaf.replace(route)
    }

    /// The route registered for exactly this token sequence, without any
    /// parameter matching.
    pub fn get(&self, method: &str, path: &str) -> Option<&Route> {
        let mut node = self.roots.get(method)?;
        for token in tokenize(path) {
            if token.is_empty() {
                break;
            }
            node = node.children.get(&token)?;
        }
        node.leaf.as_ref()
    }
}
