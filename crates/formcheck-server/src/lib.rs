//! formcheck server
//!
//! Reference axum server for the customer registration page. It serves the
//! markup the browser validator expects (page marker, opt-in flags, error
//! labels), the compiled wasm package, and re-validates every postback on its
//! own before echoing it back.

pub mod config;
pub mod customer;
pub mod error;
pub mod pages;
pub mod routes;

pub use config::Config;
pub use customer::{department_name, AcceptedCustomer, CustomerSubmission, DEPARTMENTS};
pub use error::ServerValidationError;
pub use routes::{router, CUSTOMER_PATH};
