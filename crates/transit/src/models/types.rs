//! Core data types for catalogue entities and query results.

use geo::Point;

use crate::graph::GraphError;
use crate::identifiers::*;

// ============================================================================
// Entities
// ============================================================================

/// A named stop. `location` stores longitude as `x` and latitude as `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: StopName,
    pub location: Point,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// A bus route.
///
/// `stops` is the route as published. A ring route already lists the full
/// loop (`A, B, C, A`); any other route is driven to its last stop and back,
/// see [`Bus::traversal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,
    pub name: BusName,
    pub stops: Vec<StopId>,
    pub ring: bool,
}

impl Bus {
    /// Stops in the order the bus actually visits them.
    pub fn traversal(&self) -> Vec<StopId> {
        let mut stops = self.stops.clone();
        if !self.ring {
            stops.extend(self.stops.iter().rev().skip(1).copied());
        }
        stops
    }

    /// Number of stops on the traversal, repeats included.
    pub fn stop_count(&self) -> usize {
        if self.ring || self.stops.is_empty() {
            self.stops.len()
        } else {
            self.stops.len() * 2 - 1
        }
    }
}

/// Aggregates reported for a single bus.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BusStatistics {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length in meters.
    pub route_length: u64,
    /// Road length divided by great-circle length.
    pub curvature: f64,
}

// ============================================================================
// Route query results
// ============================================================================

/// One step of an itinerary.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteLeg {
    /// Waiting for a bus at `stop`.
    Wait { stop: StopName, time: f64 },
    /// Riding `bus` across `span_count` consecutive stops.
    Bus {
        bus: BusName,
        span_count: u32,
        time: f64,
    },
}

impl RouteLeg {
    /// Stop name for a wait, bus name for a ride.
    pub fn name(&self) -> &str {
        match self {
            RouteLeg::Wait { stop, .. } => stop.as_str(),
            RouteLeg::Bus { bus, .. } => bus.as_str(),
        }
    }

    /// Duration in minutes.
    pub fn time(&self) -> f64 {
        match self {
            RouteLeg::Wait { time, .. } | RouteLeg::Bus { time, .. } => *time,
        }
    }

    /// Zero for waits.
    pub fn span_count(&self) -> u32 {
        match self {
            RouteLeg::Wait { .. } => 0,
            RouteLeg::Bus { span_count, .. } => *span_count,
        }
    }
}

/// Minimum-time itinerary between two stops.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RouteInfo {
    /// Minutes, equal to the sum of leg times.
    pub total_time: f64,
    pub legs: Vec<RouteLeg>,
}

// ============================================================================
// Load phases
// ============================================================================

/// Population stage of a catalogue.
///
/// Phases only move forward. Skipping a phase is allowed (a network without
/// distances is valid), going back is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadPhase {
    Empty,
    StopsLoaded,
    DistancesLoaded,
    BusesLoaded,
    GraphBuilt,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Stop not found: {0}")]
    UnknownStop(StopName),

    #[error("Bus not found: {0}")]
    UnknownBus(BusName),

    #[error("Stop already exists: {0}")]
    DuplicateStop(StopName),

    #[error("Bus already exists: {0}")]
    DuplicateBus(BusName),

    #[error("No road distance from {from} to {to}")]
    MissingDistance { from: StopName, to: StopName },

    #[error("Bus {0} has no stops")]
    EmptyRoute(BusName),

    #[error("Cannot {operation} once the catalogue is in phase {phase:?}")]
    OutOfOrder {
        operation: &'static str,
        phase: LoadPhase,
    },

    #[error("Invalid routing settings: {0}")]
    InvalidRoutingSettings(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(stops: &[u32], ring: bool) -> Bus {
        Bus {
            id: BusId::from_index(0),
            name: BusName::new("750"),
            stops: stops.iter().map(|&i| StopId::from_index(i as usize)).collect(),
            ring,
        }
    }

    #[test]
    fn test_linear_traversal_goes_back() {
        let linear = bus(&[0, 1, 2], false);
        let visited: Vec<usize> = linear.traversal().into_iter().map(StopId::index).collect();

        assert_eq!(visited, vec![0, 1, 2, 1, 0]);
        assert_eq!(linear.stop_count(), 5);
    }

    #[test]
    fn test_ring_traversal_is_published_loop() {
        let ring = bus(&[0, 1, 2, 0], true);
        let visited: Vec<usize> = ring.traversal().into_iter().map(StopId::index).collect();

        assert_eq!(visited, vec![0, 1, 2, 0]);
        assert_eq!(ring.stop_count(), 4);
    }

    #[test]
    fn test_route_leg_accessors() {
        let wait = RouteLeg::Wait {
            stop: StopName::new("Universam"),
            time: 6.0,
        };
        let ride = RouteLeg::Bus {
            bus: BusName::new("297"),
            span_count: 2,
            time: 5.235,
        };

        assert_eq!(wait.name(), "Universam");
        assert_eq!(wait.span_count(), 0);
        assert_eq!(ride.name(), "297");
        assert_eq!(ride.span_count(), 2);
        assert_eq!(ride.time(), 5.235);
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogueError::MissingDistance {
            from: StopName::new("A"),
            to: StopName::new("B"),
        };
        assert_eq!(err.to_string(), "No road distance from A to B");

        let err = CatalogueError::OutOfOrder {
            operation: "add a stop",
            phase: LoadPhase::BusesLoaded,
        };
        assert_eq!(
            err.to_string(),
            "Cannot add a stop once the catalogue is in phase BusesLoaded"
        );
    }
}
