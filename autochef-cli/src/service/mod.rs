//! Service layer
//!
//! The search itself plus the two seams it depends on. Detection and
//! transformation are traits so the search can run against the real
//! service client or against fakes.

mod detection;
mod search;
mod transform;

// Re-export traits
pub use detection::DetectionService;
pub use transform::TransformService;

// Re-export the search
pub use search::{SearchError, SearchOptions, SearchService};
