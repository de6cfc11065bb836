//! Shared identifier and payload types used across the saga service.

pub mod types;

pub use types::{ItemId, OrderData, OrderId, OrderItem, UserId};
