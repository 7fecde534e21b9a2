//! Read-only query interface over a populated catalogue.
//!
//! Output layers (JSON responses, map export) only need this trait, so they
//! never see the mutation API.

use std::collections::BTreeSet;

use crate::identifiers::*;
use crate::models::types::*;

pub trait TransitCatalogue {
    // ---- Lookups ----
    fn find_stop(&self, name: &str) -> Option<&Stop>;
    fn find_bus(&self, name: &str) -> Option<&Bus>;
    fn stop(&self, id: StopId) -> Option<&Stop>;

    // ---- Collections ----

    /// Stops in insertion order.
    fn all_stops(&self) -> &[Stop];

    /// Buses in insertion order.
    fn all_buses(&self) -> &[Bus];

    // ---- Queries ----

    /// Directed road distance in meters, if one is known.
    fn distance(&self, from: StopId, to: StopId) -> Option<u32>;

    /// Names of buses through a stop, sorted.
    ///
    /// `None` only when the stop is unknown. A stop without buses yields an
    /// empty set.
    fn buses_for_stop(&self, name: &str) -> Option<&BTreeSet<BusName>>;

    /// `None` when the bus is unknown.
    fn bus_statistics(&self, name: &str) -> Option<BusStatistics>;
}
