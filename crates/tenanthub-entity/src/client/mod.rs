//! Client domain entities.

pub mod model;

pub use model::{Client, ContactDetails, CreateClient};
