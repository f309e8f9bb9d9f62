//! # Endpoint Layer (Handler)
//!
//! A handler is the terminal point of a dispatch. Instead of inspecting a
//! callable's parameter list at runtime, every handler carries an explicit
//! [`Signature`]: the ordered list of parameter names it accepts, each with
//! an optional default. The router reads the signature, looks every name up
//! in the merged parameter pool and hands the handler positional [`Args`].
//!
//! # Usage Patterns
//!
//! 1. **Plain function**: [`handler_fn`] pairs a signature with `Fn(Args) -> R`
//! 2. **Bound method**: [`method_handler`] binds an `Arc<T>` receiver to
//!    `Fn(&T, Args) -> R`
//! 3. **Macro**: `#[ramify::handler]` derives the signature from an ordinary
//!    Rust function
//! 4. **Struct implementation**: `impl Handler for MyHandler`

use crate::{
    error::HandlerError,
    response::IntoResponse,
    value::{FromValue, Value},
};
use std::{fmt, sync::Arc};

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    default: Option<Value>,
}

impl ParamSpec {
    /// A parameter without a default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter with a default value.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// The parameter name looked up in the pool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `true` if a default was declared.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The ordered parameter list of a handler.
///
/// # Example
///
/// ```rust
/// use ramify_core::Signature;
///
/// let sig = Signature::new().param("id").optional("limit", 20);
/// assert_eq!(sig.names().collect::<Vec<_>>(), vec!["id", "limit"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<ParamSpec>,
}

impl Signature {
    /// An empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter without a default.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::required(name));
        self
    }

    /// Append a parameter with a default.
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(ParamSpec::optional(name, default));
        self
    }

    /// Iterate parameters in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParamSpec> {
        self.params.iter()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(ParamSpec::name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the handler takes no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<ParamSpec> for Signature {
    fn from_iter<I: IntoIterator<Item = ParamSpec>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Positional arguments bound for one handler call.
///
/// Each slot remembers the parameter name it was bound for so conversion
/// errors can name it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    slots: Vec<(String, Value)>,
}

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.slots.push((name.into(), value));
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrow the argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).map(|(_, v)| v)
    }

    /// Borrow the argument bound for `name`.
    pub fn by_name(&self, name: &str) -> Option<&Value> {
        self.slots.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Move the argument at `index` out and convert it.
    ///
    /// The slot is left as [`Value::Null`]. An index past the end behaves
    /// like an unbound parameter.
    pub fn take<T: FromValue>(&mut self, index: usize) -> Result<T, HandlerError> {
        let (name, value) = match self.slots.get_mut(index) {
            Some((name, value)) => (name.as_str(), std::mem::take(value)),
            None => ("", Value::Null),
        };
        T::from_value(value).map_err(|found| HandlerError::Conversion {
            param: name.to_owned(),
            expected: T::expected(),
            found: found.kind(),
        })
    }

    /// The argument values in order.
    pub fn into_values(self) -> Vec<Value> {
        self.slots.into_iter().map(|(_, v)| v).collect()
    }
}

/// The terminal endpoint of a dispatch.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Handler`",
    label = "missing `Handler` implementation",
    note = "Wrap functions with `handler_fn`, `method_handler` or `#[ramify::handler]`."
)]
pub trait Handler: Send + Sync + 'static {
    /// The declared parameters, in order.
    fn signature(&self) -> &Signature;

    /// Run the handler with arguments bound according to [`Self::signature`].
    fn invoke(&self, args: Args) -> Result<Value, HandlerError>;
}

/// A shared, type-erased handler as stored in the route tree.
pub type BoxHandler = Arc<dyn Handler>;

impl Handler for BoxHandler {
    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn invoke(&self, args: Args) -> Result<Value, HandlerError> {
        (**self).invoke(args)
    }
}

/// Adapter for plain functions and closures.
pub struct FnHandler<F> {
    signature: Signature,
    func: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl<F, R> Handler for FnHandler<F>
where
    F: Fn(Args) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(&self, args: Args) -> Result<Value, HandlerError> {
        (self.func)(args).into_response()
    }
}

/// Pair a signature with a function taking positional [`Args`].
///
/// # Example
///
/// ```rust
/// use ramify_core::{Args, Signature, handler_fn};
///
/// let show = handler_fn(Signature::new().param("id"), |mut args: Args| {
///     let id: String = args.take(0)?;
///     Ok::<_, ramify_core::HandlerError>(format!("user {id}"))
/// });
/// ```
pub fn handler_fn<F, R>(signature: Signature, func: F) -> FnHandler<F>
where
    F: Fn(Args) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    FnHandler { signature, func }
}

/// Adapter binding a shared receiver to a method.
pub struct MethodHandler<T, F> {
    receiver: Arc<T>,
    signature: Signature,
    method: F,
}

impl<T, F> MethodHandler<T, F> {
    /// The bound receiver.
    pub fn receiver(&self) -> &Arc<T> {
        &self.receiver
    }
}

impl<T, F> fmt::Debug for MethodHandler<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandler")
            .field("receiver", &std::any::type_name::<T>())
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl<T, F, R> Handler for MethodHandler<T, F>
where
    T: Send + Sync + 'static,
    F: Fn(&T, Args) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(&self, args: Args) -> Result<Value, HandlerError> {
        (self.method)(&self.receiver, args).into_response()
    }
}

/// Bind `receiver` to `method` under the given signature.
pub fn method_handler<T, F, R>(
    receiver: Arc<T>,
    signature: Signature,
    method: F,
) -> MethodHandler<T, F>
where
    T: Send + Sync + 'static,
    F: Fn(&T, Args) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    MethodHandler {
        receiver,
        signature,
        method,
    }
}

/// A handler for an error class (405, 406, ...).
///
/// Receives the default message and returns the payload surfaced to the
/// caller.
pub trait ErrorHandler: Send + Sync + 'static {
    /// Produce the error payload.
    fn on_error(&self, message: &str) -> Value;
}

impl<F, R> ErrorHandler for F
where
    F: Fn(&str) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    fn on_error(&self, message: &str) -> Value {
        (self)(message).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeter {
        greeting: String,
    }

    impl Greeter {
        fn greet(&self, mut args: Args) -> Result<String, HandlerError> {
            let name: String = args.take(0)?;
            Ok(format!("{}, {name}", self.greeting))
        }
    }

    #[test]
    fn test_fn_handler_invokes() {
        let h = handler_fn(Signature::new().param("a").param("b"), |mut args: Args| {
            let a: i64 = args.take(0)?;
            let b: i64 = args.take(1)?;
            Ok::<_, HandlerError>(a + b)
        });
        let mut args = Args::new();
        args.push("a", Value::from("2"));
        args.push("b", Value::Int(3));
        assert_eq!(h.invoke(args).unwrap(), Value::Int(5));
        assert_eq!(h.signature().len(), 2);
    }

    #[test]
    fn test_method_handler_binds_receiver() {
        let greeter = Arc::new(Greeter {
            greeting: "hello".into(),
        });
        let h = method_handler(greeter, Signature::new().param("name"), Greeter::greet);
        let mut args = Args::new();
        args.push("name", Value::from("ada"));
        assert_eq!(h.invoke(args).unwrap(), Value::from("hello, ada"));
    }

    #[test]
    fn test_take_reports_parameter_name() {
        let mut args = Args::new();
        args.push("limit", Value::from("many"));
        let err = args.take::<i64>(0).unwrap_err();
        assert_eq!(err.to_string(), "parameter `limit` expects integer, found string");
    }

    #[test]
    fn test_signature_defaults() {
        let sig = Signature::new().param("id").optional("limit", 10);
        let specs: Vec<_> = sig.iter().collect();
        assert!(!specs[0].has_default());
        assert_eq!(specs[1].default_value(), Some(&Value::Int(10)));
    }

    #[test]
    fn test_error_handler_closure() {
        let h = |msg: &str| format!("oops: {msg}");
        assert_eq!(h.on_error("x"), Value::from("oops: x"));
    }
}
