use anyhow::Result;
use api_types::{RenderSettings, RouteItem, StatRequest, StatResponse};
use transport_catalogue::models::{RouteLeg, TransitCatalogue};
use transport_catalogue::routing::TransitRouter;

use crate::map::render_map;

/// Answers stat requests against a loaded catalogue and its router.
pub struct RequestHandler<'a, C> {
    catalogue: &'a C,
    router: &'a TransitRouter,
    render_settings: &'a RenderSettings,
}

impl<'a, C: TransitCatalogue> RequestHandler<'a, C> {
    pub fn new(catalogue: &'a C, router: &'a TransitRouter, render_settings: &'a RenderSettings) -> Self {
        Self {
            catalogue,
            router,
            render_settings,
        }
    }

    pub fn handle_all(&self, requests: &[StatRequest]) -> Result<Vec<StatResponse>> {
        requests.iter().map(|request| self.handle(request)).collect()
    }

    pub fn handle(&self, request: &StatRequest) -> Result<StatResponse> {
        let response = match request {
            StatRequest::Bus { id, name } => self.bus(*id, name),
            StatRequest::Stop { id, name } => self.stop(*id, name),
            StatRequest::Route { id, from, to } => self.route(*id, from, to),
            StatRequest::Map { id } => StatResponse::Map {
                request_id: *id,
                map: render_map(self.catalogue, self.render_settings)?,
            },
        };

        if let StatResponse::NotFound { request_id, .. } = &response {
            log::debug!("Request {} answered with not found", request_id);
        }
        Ok(response)
    }

    fn bus(&self, request_id: i64, name: &str) -> StatResponse {
        match self.catalogue.bus_statistics(name) {
            Some(stats) => StatResponse::Bus {
                request_id,
                curvature: stats.curvature,
                route_length: stats.route_length,
                stop_count: stats.stop_count,
                unique_stop_count: stats.unique_stop_count,
            },
            None => StatResponse::not_found(request_id),
        }
    }

    fn stop(&self, request_id: i64, name: &str) -> StatResponse {
        match self.catalogue.buses_for_stop(name) {
            Some(buses) => StatResponse::Stop {
                request_id,
                buses: buses.iter().map(ToString::to_string).collect(),
            },
            None => StatResponse::not_found(request_id),
        }
    }

    fn route(&self, request_id: i64, from: &str, to: &str) -> StatResponse {
        match self.router.resolve_route(from, to) {
            Some(route) => StatResponse::Route {
                request_id,
                total_time: route.total_time,
                items: route.legs.iter().map(route_item).collect(),
            },
            None => StatResponse::not_found(request_id),
        }
    }
}

fn route_item(leg: &RouteLeg) -> RouteItem {
    match leg {
        RouteLeg::Wait { stop, time } => RouteItem::Wait {
            stop_name: stop.to_string(),
            time: *time,
        },
        RouteLeg::Bus {
            bus,
            span_count,
            time,
        } => RouteItem::Bus {
            bus: bus.to_string(),
            span_count: *span_count,
            time: *time,
        },
    }
}
