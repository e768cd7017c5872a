pub mod error_handler;

pub use error_handler::domain_error_response;
