//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from the handlers that
//! choose between them.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_file_response, build_ok_json_response, build_options_response,
};
