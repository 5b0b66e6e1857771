//! AutoChef Core
//!
//! Core types and building blocks for the AutoChef recipe search.
//!
//! This crate contains:
//! - Domain types: operations, pipelines, detection and bake outcomes
//! - DTOs: request/response bodies for the `/magic` and `/bake` endpoints
//! - The recipe catalog of candidate final operations
//! - Result classifiers deciding whether a bake produced readable output

pub mod catalog;
pub mod classify;
pub mod domain;
pub mod dto;
