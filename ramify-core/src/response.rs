//! Output conversion traits.

use crate::{
    error::{BoxError, HandlerError},
    hook::HookResult,
    params::Params,
    value::Value,
};

/// Trait for converting a hook's return value into a [`HookResult`].
///
/// # Default Implementations
///
/// - `HookResult` → As is
/// - `Params` → `Next`
/// - `Option<Params>` → `Some` = `Next`, `None` = `Stop`
/// - `Result<Params, E>` → `Ok` = `Next`, `Err` = `Stop`
pub trait IntoHookResult {
    /// Convert into a pipeline decision.
    fn into_hook_result(self) -> HookResult;
}

impl IntoHookResult for HookResult {
    fn into_hook_result(self) -> HookResult {
        self
    }
}

impl IntoHookResult for Params {
    fn into_hook_result(self) -> HookResult {
        HookResult::Next(self)
    }
}

impl IntoHookResult for Option<Params> {
    fn into_hook_result(self) -> HookResult {
        match self {
            Some(params) => HookResult::Next(params),
            None => HookResult::Stop,
        }
    }
}

impl<E> IntoHookResult for Result<Params, E> {
    fn into_hook_result(self) -> HookResult {
        self.ok().into_hook_result()
    }
}

/// Trait for converting a handler's return value into its output [`Value`].
///
/// Plain values are wrapped; `Result`s surface their error as
/// [`HandlerError::Custom`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "missing `IntoResponse` implementation",
    note = "Return a `Value`, a type convertible into `Value`, or a `Result` of one."
)]
pub trait IntoResponse {
    /// Convert into the handler output.
    fn into_response(self) -> Result<Value, HandlerError>;
}

macro_rules! impl_into_response_via_value {
    ($($t:ty),+) => {
        $(
            impl IntoResponse for $t {
                fn into_response(self) -> Result<Value, HandlerError> {
                    Ok(Value::from(self))
                }
            }
        )+
    };
}

impl_into_response_via_value!(
    Value, (), bool, i32, i64, u8, u16, u32, f64, String, &'static str, Params
);

impl<T: Into<Value>> IntoResponse for Option<T> {
    fn into_response(self) -> Result<Value, HandlerError> {
        Ok(Value::from(self))
    }
}

impl<T: Into<Value>> IntoResponse for Vec<T> {
    fn into_response(self) -> Result<Value, HandlerError> {
        Ok(Value::from(self))
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<BoxError>,
{
    fn into_response(self) -> Result<Value, HandlerError> {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => Err(HandlerError::Custom(e.into())),
        }
    }
}
