//! # Routing
//!
//! Path tokenization, the per-method route tree and the backtracking
//! resolver.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`tokenize`] | Split a path into segment tokens |
//! | [`RouteTree`] | One trie per method; nodes keyed by literal or `:name` tokens |
//! | [`resolve`] | Walk the trie, literal-first with parameter backtracking |

mod path;
mod resolve;
mod tree;

pub use path::{PARAM_MARKER, SEPARATOR, Token, tokenize};
pub use resolve::{Resolved, resolve};
pub use tree::{Node, Route, RouteTree};
