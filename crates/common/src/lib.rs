//! Identifier types shared by the order, store and collaborator crates.

pub mod types;

pub use types::{OrderId, Version};
