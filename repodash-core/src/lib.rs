//! Repodash Core
//!
//! Core types shared by the repodash client and dashboard.
//!
//! This crate contains:
//! - Domain types: the repository records and aggregate stats served by the backend
//! - DTOs: query parameters sent to the backend

pub mod domain;
pub mod dto;
