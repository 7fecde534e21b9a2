//! Catalogue data models, types and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::TransitCatalogue;
pub use types::{Bus, BusStatistics, CatalogueError, LoadPhase, Result, RouteInfo, RouteLeg, Stop};
