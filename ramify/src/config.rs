//! Router configuration.
//!
//! The defaults reproduce the permissive behavior: duplicate registrations
//! silently replace the previous route, unbound handler parameters receive
//! `Value::Null`, and literal children are preferred over parameters.

/// What happens when a route is registered twice for the same method and
/// token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The last registration wins.
    #[default]
    Overwrite,
    /// The second registration fails with `RouteError::Duplicate`.
    Reject,
}

/// What happens when a declared handler parameter has neither a pool value
/// nor a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingParamPolicy {
    /// Bind `Value::Null` and call the handler anyway.
    #[default]
    Null,
    /// Fail the dispatch with `DispatchError::MissingParameter`.
    Reject,
}

/// How the resolver orders sibling children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveOrder {
    /// Try the literal child equal to the token first and commit to it;
    /// only if there is none, try parameter children in insertion order.
    #[default]
    LiteralFirst,
    /// Visit children strictly in insertion order. A literal child equal to
    /// the token commits when reached; parameter children before it are
    /// tried first.
    InsertionOrder,
}

/// Router configuration.
///
/// # Example
///
/// ```rust
/// use ramify::{RouterConfig, ResolveOrder};
///
/// let config = RouterConfig::default()
///     .reject_duplicates()
///     .resolve_order(ResolveOrder::InsertionOrder);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    pub(crate) duplicate_routes: DuplicatePolicy,
    pub(crate) missing_params: MissingParamPolicy,
    pub(crate) resolve_order: ResolveOrder,
    pub(crate) inject_router: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            duplicate_routes: DuplicatePolicy::default(),
            missing_params: MissingParamPolicy::default(),
            resolve_order: ResolveOrder::default(),
            inject_router: true,
        }
    }
}

impl RouterConfig {
    /// Set the duplicate registration policy.
    pub fn duplicate_routes(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_routes = policy;
        self
    }

    /// Fail registrations that would replace an existing route.
    pub fn reject_duplicates(self) -> Self {
        self.duplicate_routes(DuplicatePolicy::Reject)
    }

    /// Set the missing parameter policy.
    pub fn missing_params(mut self, policy: MissingParamPolicy) -> Self {
        self.missing_params = policy;
        self
    }

    /// Fail dispatches whose handler has an unbound parameter.
    pub fn reject_missing_params(self) -> Self {
        self.missing_params(MissingParamPolicy::Reject)
    }

    /// Set the sibling order used by the resolver.
    pub fn resolve_order(mut self, order: ResolveOrder) -> Self {
        self.resolve_order = order;
        self
    }

    /// Whether the router injects itself into the pool under `router`.
    pub fn inject_router(mut self, inject: bool) -> Self {
        self.inject_router = inject;
        self
    }

    /// The duplicate registration policy.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_routes
    }

    /// The missing parameter policy.
    pub fn missing_param_policy(&self) -> MissingParamPolicy {
        self.missing_params
    }

    /// The resolver's sibling order.
    pub fn order(&self) -> ResolveOrder {
        self.resolve_order
    }

    /// Whether the router injects itself into the pool.
    pub fn injects_router(&self) -> bool {
        self.inject_router
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_permissive() {
        let config = RouterConfig::default();
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Overwrite);
        assert_eq!(config.missing_param_policy(), MissingParamPolicy::Null);
        assert_eq!(config.order(), ResolveOrder::LiteralFirst);
        assert!(config.injects_router());
    }

    #[test]
    fn test_builder_methods() {
        let config = RouterConfig::default()
            .reject_duplicates()
            .reject_missing_params()
            .inject_router(false);
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Reject);
        assert_eq!(config.missing_param_policy(), MissingParamPolicy::Reject);
        assert!(!config.injects_router());
    }
}
