//! Company management.

pub mod service;

pub use service::{CompanyService, CreateCompanyRequest};
