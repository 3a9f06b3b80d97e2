//! Identity types shared across the crate

pub mod ids;

pub use ids::{EntryId, UserId};
