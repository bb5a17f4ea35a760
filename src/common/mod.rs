pub mod config;
pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod record;
pub mod store;
pub mod utils;

#[cfg(test)]
pub(crate) mod fakes;

pub const USERS_COLLECTION: &str = "user";
pub const ORDERS_COLLECTION: &str = "orders";

pub use record::{Order, Record, User};
