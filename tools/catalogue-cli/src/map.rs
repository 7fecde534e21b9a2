use anyhow::{Context, Result};
use api_types::RenderSettings;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use std::path::Path;
use transport_catalogue::models::{Bus, Stop, TransitCatalogue};

fn position(stop: &Stop) -> Vec<f64> {
    vec![stop.longitude(), stop.latitude()]
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// LineString over the stops the bus actually drives through.
fn bus_to_feature(
    catalogue: &impl TransitCatalogue,
    bus: &Bus,
    settings: &RenderSettings,
    index: usize,
) -> Feature {
    let line: Vec<Vec<f64>> = bus
        .traversal()
        .into_iter()
        .filter_map(|id| catalogue.stop(id))
        .map(position)
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), serde_json::json!(bus.name.as_str()));
    properties.insert("kind".to_string(), serde_json::json!("bus"));
    properties.insert("is_roundtrip".to_string(), serde_json::json!(bus.ring));
    if !settings.color_palette.is_empty() {
        let color = &settings.color_palette[index % settings.color_palette.len()];
        properties.insert("stroke".to_string(), serde_json::json!(color.to_string()));
    }

    feature(Value::LineString(line), properties)
}

fn stop_to_feature(stop: &Stop) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), serde_json::json!(stop.name.as_str()));
    properties.insert("kind".to_string(), serde_json::json!("stop"));

    feature(Value::Point(position(stop)), properties)
}

/// Buses in name order, then every stop served by a bus in name order.
pub fn build_map(catalogue: &impl TransitCatalogue, settings: &RenderSettings) -> FeatureCollection {
    let mut buses: Vec<&Bus> = catalogue
        .all_buses()
        .iter()
        .filter(|bus| !bus.stops.is_empty())
        .collect();
    buses.sort_by(|a, b| a.name.cmp(&b.name));

    let mut stops: Vec<&Stop> = catalogue
        .all_stops()
        .iter()
        .filter(|stop| {
            catalogue
                .buses_for_stop(stop.name.as_str())
                .is_some_and(|buses| !buses.is_empty())
        })
        .collect();
    stops.sort_by(|a, b| a.name.cmp(&b.name));

    let mut features: Vec<Feature> = buses
        .iter()
        .enumerate()
        .map(|(i, bus)| bus_to_feature(catalogue, bus, settings, i))
        .collect();
    features.extend(stops.iter().map(|stop| stop_to_feature(stop)));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// The map as a compact GeoJSON string, as embedded in a Map response.
pub fn render_map(catalogue: &impl TransitCatalogue, settings: &RenderSettings) -> Result<String> {
    let geojson = GeoJson::from(build_map(catalogue, settings));
    serde_json::to_string(&geojson).context("Failed to serialize GeoJSON")
}

pub fn write_map_geojson(
    catalogue: &impl TransitCatalogue,
    settings: &RenderSettings,
    output_path: &Path,
) -> Result<()> {
    let collection = build_map(catalogue, settings);
    log::info!(
        "Writing map ({} features) to {}",
        collection.features.len(),
        output_path.display()
    );

    let geojson = GeoJson::from(collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
