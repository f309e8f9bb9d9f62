//! Procedural macros for ramify.
//!
//! - `#[handler]` - Derive a `Handler` implementation, including its
//!   parameter signature, from an ordinary function

use proc_macro::TokenStream;

mod handler;

/// Turn a synchronous function into a `ramify::Handler`.
///
/// The function's parameter names become the handler's signature, in
/// declaration order. Each parameter's type must implement
/// `ramify::FromValue`; the return type must implement
/// `ramify::IntoResponse`. Defaults are declared in the attribute:
///
/// ```rust,ignore
/// #[ramify::handler(default(limit = 20, order = "asc"))]
/// fn list_users(group: String, limit: i64, order: String) -> String {
///     format!("{group}: {limit} {order}")
/// }
///
/// router.get("/groups/:group/users", list_users, &[])?;
/// ```
///
/// A unit struct named after the function (or `name = "..."`) is generated
/// in place of the function.
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::handler_impl(attr, item)
}
