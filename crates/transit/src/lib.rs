//! # transport-catalogue
//!
//! In-memory bus network catalogue with fastest-itinerary routing.
//!
//! ## Features
//!
//! - **Catalogue**: stops, directed road distances and ring or
//!   there-and-back buses, loaded in explicit phases
//! - **Statistics**: stop counts, road length and curvature per bus
//! - **Routing**: all-pairs shortest paths over a wait/ride graph, answered
//!   as itineraries of wait and bus legs
//!
//! ## Example
//!
//! ```
//! use transport_catalogue::prelude::*;
//! use geo::Point;
//!
//! let mut catalogue = TransportCatalogue::new();
//! catalogue.add_stop("Tolstopaltsevo", Point::new(37.20829, 55.611087)).unwrap();
//! catalogue.add_stop("Marushkino", Point::new(37.209755, 55.595884)).unwrap();
//! catalogue.add_distance("Tolstopaltsevo", "Marushkino", 3900).unwrap();
//! catalogue.add_bus("750", &["Tolstopaltsevo", "Marushkino"], false).unwrap();
//!
//! let stats = catalogue.bus_statistics("750").unwrap();
//! assert_eq!(stats.stop_count, 3);
//! assert_eq!(stats.route_length, 7800);
//!
//! let router = catalogue.build_router().unwrap();
//! let route = router.resolve_route("Tolstopaltsevo", "Marushkino").unwrap();
//! assert_eq!(route.legs.len(), 2); // wait, then ride
//! ```

pub mod graph;
pub mod identifiers;
pub mod models;
pub mod provider;
pub mod routing;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::provider::TransportCatalogue;
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::routing::{RoutingSettings, TransitRouter};
}

pub use prelude::*;
