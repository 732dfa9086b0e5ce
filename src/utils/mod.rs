pub mod dates;
pub mod extractor;
pub mod form;
pub mod parameter_error_handler;
pub mod password;
pub mod session;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::{form_error_handler, json_error_handler, query_error_handler};
