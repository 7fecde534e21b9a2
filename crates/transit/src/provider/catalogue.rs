//! In-memory transport catalogue.
//!
//! Stops and buses live in append-only arenas and are referenced everywhere
//! else by [`StopId`] / [`BusId`] handles. Population follows the
//! [`LoadPhase`] order: stops, then road distances, then buses, then the
//! routing graph.

use std::collections::{BTreeSet, HashMap, HashSet};

use geo::Point;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::routing::{RoutingSettings, TransitRouter};
use crate::spatial::path_length;

#[derive(Clone, Debug)]
pub struct TransportCatalogue {
    phase: LoadPhase,

    // Arenas
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Lookup maps
    stop_map: HashMap<StopName, StopId>,
    bus_map: HashMap<BusName, BusId>,

    // Indexed by `StopId`
    buses_through_stop: Vec<BTreeSet<BusName>>,

    distances: HashMap<(StopId, StopId), u32>,
    routing_settings: RoutingSettings,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Empty,
            stops: Vec::new(),
            buses: Vec::new(),
            stop_map: HashMap::new(),
            bus_map: HashMap::new(),
            buses_through_stop: Vec::new(),
            distances: HashMap::new(),
            routing_settings: RoutingSettings::default(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn routing_settings(&self) -> RoutingSettings {
        self.routing_settings
    }

    /// Register a stop. Names are unique: a second stop with the same name is
    /// rejected.
    pub fn add_stop(&mut self, name: impl Into<StopName>, location: Point) -> Result<StopId> {
        self.check_phase("add a stop", LoadPhase::StopsLoaded)?;

        let name = name.into();
        if self.stop_map.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId::from_index(self.stops.len());
        self.stops.push(Stop {
            id,
            name: name.clone(),
            location,
        });
        self.stop_map.insert(name, id);
        self.buses_through_stop.push(BTreeSet::new());
        self.phase = LoadPhase::StopsLoaded;

        Ok(id)
    }

    /// Record the road distance from `from` to `to`.
    ///
    /// The reverse direction gets the same value unless it already has one.
    /// An explicit value always replaces that fallback.
    pub fn add_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<()> {
        self.check_phase("add a road distance", LoadPhase::DistancesLoaded)?;

        let from = self.stop_id(from)?;
        let to = self.stop_id(to)?;

        self.distances.insert((from, to), meters);
        self.distances.entry((to, from)).or_insert(meters);
        self.phase = LoadPhase::DistancesLoaded;

        Ok(())
    }

    /// Register a bus over already known stops.
    ///
    /// `stops` is the published route: the full loop for a ring bus, one
    /// direction otherwise. Every hop the bus drives must have a road
    /// distance. A rejected bus leaves the catalogue untouched.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<BusName>,
        stops: &[S],
        ring: bool,
    ) -> Result<BusId> {
        self.check_phase("add a bus", LoadPhase::BusesLoaded)?;

        let name = name.into();
        if self.bus_map.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(name));
        }

        let stops = stops
            .iter()
            .map(|stop| self.stop_id(stop.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let id = BusId::from_index(self.buses.len());
        let bus = Bus {
            id,
            name: name.clone(),
            stops,
            ring,
        };
        self.road_length(&bus.traversal())?;

        for stop in &bus.stops {
            self.buses_through_stop[stop.index()].insert(name.clone());
        }
        self.bus_map.insert(name, id);
        self.buses.push(bus);
        self.phase = LoadPhase::BusesLoaded;

        Ok(id)
    }

    pub fn set_routing_settings(&mut self, settings: RoutingSettings) -> Result<()> {
        if self.phase == LoadPhase::GraphBuilt {
            return Err(CatalogueError::OutOfOrder {
                operation: "change routing settings",
                phase: self.phase,
            });
        }
        settings.validate()?;
        self.routing_settings = settings;
        Ok(())
    }

    /// Build the routing graph with the stored settings.
    ///
    /// Closes the catalogue for further changes. Building again from the
    /// same catalogue yields an identical router.
    pub fn build_router(&mut self) -> Result<TransitRouter> {
        let router = TransitRouter::build(&*self, self.routing_settings)?;
        self.phase = LoadPhase::GraphBuilt;
        Ok(router)
    }

    /// Directed road distance between two stops by name.
    pub fn distance_between(&self, from: &str, to: &str) -> Result<u32> {
        let from_id = self.stop_id(from)?;
        let to_id = self.stop_id(to)?;
        self.required_distance(from_id, to_id)
    }

    /// Sum of road distances along consecutive stops, in meters.
    pub(crate) fn road_length(&self, stops: &[StopId]) -> Result<u64> {
        stops.windows(2).try_fold(0u64, |total, hop| {
            Ok(total + u64::from(self.required_distance(hop[0], hop[1])?))
        })
    }

    pub(crate) fn required_distance(&self, from: StopId, to: StopId) -> Result<u32> {
        self.distance(from, to)
            .ok_or_else(|| CatalogueError::MissingDistance {
                from: self.stops[from.index()].name.clone(),
                to: self.stops[to.index()].name.clone(),
            })
    }

    fn stop_id(&self, name: &str) -> Result<StopId> {
        self.stop_map
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(StopName::new(name)))
    }

    fn check_phase(&self, operation: &'static str, target: LoadPhase) -> Result<()> {
        if self.phase > target {
            return Err(CatalogueError::OutOfOrder {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }
}

impl Default for TransportCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitCatalogue for TransportCatalogue {
    fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_map.get(name).map(|id| &self.stops[id.index()])
    }

    fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_map.get(name).map(|id| &self.buses[id.index()])
    }

    fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.index())
    }

    fn all_stops(&self) -> &[Stop] {
        &self.stops
    }

    fn all_buses(&self) -> &[Bus] {
        &self.buses
    }

    fn distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances.get(&(from, to)).copied()
    }

    fn buses_for_stop(&self, name: &str) -> Option<&BTreeSet<BusName>> {
        self.stop_map
            .get(name)
            .map(|id| &self.buses_through_stop[id.index()])
    }

    fn bus_statistics(&self, name: &str) -> Option<BusStatistics> {
        let bus = self.find_bus(name)?;
        let traversal = bus.traversal();

        let unique_stop_count = traversal.iter().collect::<HashSet<_>>().len();
        // Every hop was checked in `add_bus`.
        let route_length = self.road_length(&traversal).ok()?;
        let geo_length = path_length(
            traversal
                .iter()
                .map(|stop| self.stops[stop.index()].location),
        );
        let curvature = if geo_length > 0.0 {
            route_length as f64 / geo_length
        } else {
            1.0
        };

        Some(BusStatistics {
            stop_count: traversal.len(),
            unique_stop_count,
            route_length,
            curvature,
        })
    }
}
