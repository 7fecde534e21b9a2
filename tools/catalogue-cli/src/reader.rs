use anyhow::{Context, Result};
use api_types::{BaseRequest, BusRequest, StopRequest, TransitDocument};
use geo::Point;
use transport_catalogue::provider::TransportCatalogue;
use transport_catalogue::models::TransitCatalogue;

/// Populate a catalogue from the document's base requests.
///
/// Requests are applied in phases regardless of document order: all stops,
/// then all road distances, then all buses, then routing settings.
pub fn load_catalogue(document: &TransitDocument) -> Result<TransportCatalogue> {
    let mut catalogue = TransportCatalogue::new();

    let stops: Vec<&StopRequest> = document
        .base_requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
        .collect();
    let buses: Vec<&BusRequest> = document
        .base_requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Bus(bus) => Some(bus),
            BaseRequest::Stop(_) => None,
        })
        .collect();

    for stop in &stops {
        catalogue
            .add_stop(stop.name.as_str(), Point::new(stop.longitude, stop.latitude))
            .with_context(|| format!("Failed to add stop {}", stop.name))?;
    }

    let mut distance_count = 0;
    for stop in &stops {
        for (neighbour, &meters) in &stop.road_distances {
            catalogue
                .add_distance(&stop.name, neighbour, meters)
                .with_context(|| {
                    format!("Failed to add distance {} -> {}", stop.name, neighbour)
                })?;
            distance_count += 1;
        }
    }

    for bus in &buses {
        catalogue
            .add_bus(bus.name.as_str(), bus.stops.as_slice(), bus.is_roundtrip)
            .with_context(|| format!("Failed to add bus {}", bus.name))?;
    }

    if let Some(settings) = document.routing_settings {
        catalogue
            .set_routing_settings(settings)
            .context("Invalid routing settings")?;
    }

    log::info!(
        "  Loaded {} stops, {} road distances, {} buses",
        catalogue.all_stops().len(),
        distance_count,
        catalogue.all_buses().len()
    );

    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> TransitDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_buses_before_stops_in_document() {
        let catalogue = load_catalogue(&document(json!({
            "base_requests": [
                {"type": "Bus", "name": "14", "stops": ["Lipetskaya ulitsa 40", "Zagorye"], "is_roundtrip": false},
                {"type": "Stop", "name": "Zagorye", "latitude": 55.579909, "longitude": 37.68372},
                {
                    "type": "Stop",
                    "name": "Lipetskaya ulitsa 40",
                    "latitude": 55.581387,
                    "longitude": 37.680374,
                    "road_distances": {"Zagorye": 1500}
                }
            ]
        })))
        .unwrap();

        let stats = catalogue.bus_statistics("14").unwrap();
        assert_eq!(stats.stop_count, 3);
        assert_eq!(stats.route_length, 3000);
        assert_eq!(catalogue.distance_between("Zagorye", "Lipetskaya ulitsa 40").unwrap(), 1500);
    }

    #[test]
    fn test_routing_settings_are_applied() {
        let catalogue = load_catalogue(&document(json!({
            "base_requests": [],
            "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30}
        })))
        .unwrap();

        assert_eq!(catalogue.routing_settings().bus_wait_time, 2.0);
        assert_eq!(catalogue.routing_settings().bus_velocity, 30.0);
    }

    #[test]
    fn test_unknown_stop_in_bus() {
        let err = load_catalogue(&document(json!({
            "base_requests": [
                {"type": "Stop", "name": "Zagorye", "latitude": 55.579909, "longitude": 37.68372},
                {"type": "Bus", "name": "14", "stops": ["Zagorye", "Nowhere"], "is_roundtrip": false}
            ]
        })))
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to add bus 14");
    }
}
