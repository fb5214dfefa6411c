//! Core domain types
//!
//! Snapshots of the records exposed by the dashboard backend. The client never
//! mutates these; each successful fetch replaces the whole collection.

pub mod repository;
pub mod stats;
mod timestamp;
