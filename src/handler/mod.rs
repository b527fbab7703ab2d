//! Request handling module
//!
//! Explicit route registration plus the handlers routes dispatch to.

pub mod console_log;
pub mod router;
pub mod static_files;

pub use router::{handle_request, Fallback, RouteKind, RouteTable};
