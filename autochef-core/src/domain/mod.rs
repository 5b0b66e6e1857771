//! Core domain types
//!
//! These types are shared between the HTTP client (which parses them out of
//! service responses) and the search service (which combines and classifies
//! them). Everything here is plain data with structural equality.

pub mod candidate;
pub mod detection;
pub mod operation;
pub mod pipeline;
pub mod transform;
