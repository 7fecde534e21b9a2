//! JSON document exchanged with the transport catalogue.
//!
//! An input document carries `base_requests` that populate the catalogue,
//! optional `routing_settings` and `render_settings`, and `stat_requests`
//! that are answered in order with one [`StatResponse`] each.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use transport_catalogue::routing::RoutingSettings;

// ============================================================================
// Input document
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransitDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,
    #[serde(default)]
    pub render_settings: Option<RenderSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Road distances in meters from this stop to its neighbours.
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BusRequest {
    pub name: String,
    /// Full loop for a round trip, one direction otherwise.
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

// ============================================================================
// Render settings
// ============================================================================

/// A color as a name (`"green"`), `[r, g, b]` or `[r, g, b, opacity]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{name}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

/// Map styling. Other keys of the document's `render_settings` object are
/// accepted and ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Bus line colors, cycled in bus name order.
    pub color_palette: Vec<Color>,
}

// ============================================================================
// Responses
// ============================================================================

pub const NOT_FOUND: &str = "not found";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem>,
    },
    Map {
        request_id: i64,
        map: String,
    },
    NotFound {
        request_id: i64,
        error_message: String,
    },
}

impl StatResponse {
    pub fn not_found(request_id: i64) -> Self {
        StatResponse::NotFound {
            request_id,
            error_message: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: u32,
        time: f64,
    },
}
