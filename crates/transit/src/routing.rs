//! Transit routing graph.
//!
//! Every stop becomes two vertices: a *waiting* vertex (`2 * id`) and a
//! *boarded* vertex (`2 * id + 1`). Edges come in two kinds:
//!
//! - a wait edge, waiting -> boarded of the same stop, weighted with the
//!   constant wait time;
//! - a ride edge, boarded of stop `i` -> waiting of stop `j`, for every pair
//!   of stops a bus connects without a transfer, weighted with the ride time
//!   over the summed road distance.
//!
//! Ring buses contribute every forward pair of their loop. Other buses
//! contribute the forward and the backward half as two separate runs.
//! Because a ride always ends on a waiting vertex, the shortest path weight
//! is the total travel time and each edge maps back to one itinerary leg.

use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::graph::{DirectedWeightedGraph, Edge, Router, VertexId};
use crate::identifiers::*;
use crate::models::{traits::*, types::*};

type Minutes = OrderedFloat<f64>;

/// Parameters of the routing graph.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSettings {
    /// Minutes spent waiting for any bus at a stop.
    pub bus_wait_time: f64,
    /// Bus speed in km/h.
    pub bus_velocity: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

impl RoutingSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(CatalogueError::InvalidRoutingSettings(format!(
                "bus velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(CatalogueError::InvalidRoutingSettings(format!(
                "bus wait time must not be negative, got {}",
                self.bus_wait_time
            )));
        }
        Ok(())
    }

    /// Minutes needed to drive `meters`.
    pub fn ride_time(&self, meters: u64) -> f64 {
        meters as f64 / (self.bus_velocity * 1000.0) * 60.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StopVertices {
    wait: VertexId,
    board: VertexId,
}

impl StopVertices {
    fn for_stop(id: StopId) -> Self {
        Self {
            wait: id.index() * 2,
            board: id.index() * 2 + 1,
        }
    }
}

/// Shortest-itinerary index over a finished catalogue.
///
/// Owns its graph and names, so it stays valid independently of the
/// catalogue it was built from.
#[derive(Clone, Debug)]
pub struct TransitRouter {
    router: Router<Minutes>,
    stop_vertices: HashMap<StopName, StopVertices>,
    // Indexed by edge id
    legs: Vec<RouteLeg>,
    settings: RoutingSettings,
}

impl TransitRouter {
    pub fn build(catalogue: &impl TransitCatalogue, settings: RoutingSettings) -> Result<Self> {
        settings.validate()?;

        let stops = catalogue.all_stops();
        let mut builder = GraphBuilder {
            graph: DirectedWeightedGraph::new(stops.len() * 2),
            legs: Vec::new(),
        };

        let mut stop_vertices = HashMap::with_capacity(stops.len());
        for stop in stops {
            let vertices = StopVertices::for_stop(stop.id);
            builder.add(
                vertices.wait,
                vertices.board,
                RouteLeg::Wait {
                    stop: stop.name.clone(),
                    time: settings.bus_wait_time,
                },
            )?;
            stop_vertices.insert(stop.name.clone(), vertices);
        }

        for bus in catalogue.all_buses() {
            for run in runs(bus) {
                builder.add_rides(catalogue, &settings, &bus.name, &run)?;
            }
        }

        log::debug!(
            "Built transit graph: {} stops, {} buses, {} vertices, {} edges",
            stops.len(),
            catalogue.all_buses().len(),
            builder.graph.vertex_count(),
            builder.graph.edge_count()
        );

        Ok(Self {
            router: Router::new(builder.graph),
            stop_vertices,
            legs: builder.legs,
            settings,
        })
    }

    /// Fastest itinerary from `from` to `to`.
    ///
    /// `None` when either stop is unknown or `to` cannot be reached. Asking
    /// for a stop's route to itself yields an empty itinerary.
    pub fn resolve_route(&self, from: &str, to: &str) -> Option<RouteInfo> {
        let from = self.stop_vertices.get(from)?;
        let to = self.stop_vertices.get(to)?;
        let path = self.router.build_route(from.wait, to.wait)?;

        let legs = path
            .edges
            .iter()
            .map(|&edge_id| self.legs.get(edge_id).cloned())
            .collect::<Option<Vec<_>>>()?;
        Some(RouteInfo {
            total_time: path.weight.into_inner(),
            legs,
        })
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<Minutes> {
        self.router.graph()
    }
}

/// Stop sequences a bus drives without turning around.
fn runs(bus: &Bus) -> Vec<Vec<StopId>> {
    if bus.ring {
        vec![bus.stops.clone()]
    } else {
        let forward = bus.stops.clone();
        let backward = bus.stops.iter().rev().copied().collect();
        vec![forward, backward]
    }
}

struct GraphBuilder {
    graph: DirectedWeightedGraph<Minutes>,
    legs: Vec<RouteLeg>,
}

impl GraphBuilder {
    fn add(&mut self, from: VertexId, to: VertexId, leg: RouteLeg) -> Result<()> {
        self.graph.add_edge(Edge {
            from,
            to,
            weight: OrderedFloat(leg.time()),
        })?;
        self.legs.push(leg);
        Ok(())
    }

    /// One ride edge per (i, j) pair with i < j along `run`.
    fn add_rides(
        &mut self,
        catalogue: &impl TransitCatalogue,
        settings: &RoutingSettings,
        bus: &BusName,
        run: &[StopId],
    ) -> Result<()> {
        for (i, &origin) in run.iter().enumerate() {
            let mut meters = 0u64;
            for j in i + 1..run.len() {
                meters += u64::from(hop_distance(catalogue, run[j - 1], run[j])?);

                let destination = run[j];
                if destination == origin {
                    continue;
                }

                self.add(
                    StopVertices::for_stop(origin).board,
                    StopVertices::for_stop(destination).wait,
                    RouteLeg::Bus {
                        bus: bus.clone(),
                        span_count: (j - i) as u32,
                        time: settings.ride_time(meters),
                    },
                )?;
            }
        }
        Ok(())
    }
}

fn hop_distance(catalogue: &impl TransitCatalogue, from: StopId, to: StopId) -> Result<u32> {
    catalogue
        .distance(from, to)
        .ok_or_else(|| CatalogueError::MissingDistance {
            from: stop_name(catalogue, from),
            to: stop_name(catalogue, to),
        })
}

fn stop_name(catalogue: &impl TransitCatalogue, id: StopId) -> StopName {
    catalogue
        .stop(id)
        .map(|stop| stop.name.clone())
        .unwrap_or_else(|| StopName::new(format!("#{}", id.index())))
}
