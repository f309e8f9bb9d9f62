//! Guard hook - reject requests missing required parameters.

use ramify_core::{Hook, HookResult, Params};

/// A hook that stops the pipeline unless every listed name is present and
/// non-null in the pool.
///
/// # Example
///
/// ```rust,ignore
/// router
///     .hook("auth", RequireParams::new(["token"]))
///     .match_route("GET", "/admin", admin, &["auth"])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequireParams {
    names: Vec<String>,
}

impl RequireParams {
    /// Require all of `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The first required name missing from `params`.
    pub fn missing<'a>(&'a self, params: &Params) -> Option<&'a str> {
        self.names
            .iter()
            .find(|name| params.get(name).is_none_or(|v| v.is_null()))
            .map(String::as_str)
    }
}

impl Hook for RequireParams {
    fn on_params(&self, params: Params) -> HookResult {
        match self.missing(&params) {
            Some(name) => {
                tracing::debug!(param = name, "Required parameter missing");
                HookResult::Stop
            }
            None => HookResult::Next(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramify_core::Value;

    #[test]
    fn test_passes_when_present() {
        let guard = RequireParams::new(["token"]);
        let params = Params::from([("token", "abc")]);
        assert_eq!(guard.on_params(params.clone()), HookResult::Next(params));
    }

    #[test]
    fn test_stops_on_missing_or_null() {
        let guard = RequireParams::new(["token", "user"]);
        assert!(guard.on_params(Params::from([("token", "abc")])).is_stop());

        let mut params = Params::from([("token", "abc")]);
        params.insert("user", Value::Null);
        assert_eq!(guard.missing(&params), Some("user"));
    }
}
