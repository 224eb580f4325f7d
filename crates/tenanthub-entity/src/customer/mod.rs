//! Customer domain entities.

pub mod model;

pub use model::{CreateCustomer, Customer};
