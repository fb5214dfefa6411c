//! Data Transfer Objects
//!
//! Request-side types sent from the dashboard to the backend.

pub mod query;
