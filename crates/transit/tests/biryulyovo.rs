//! End-to-end scenario over a small southern Moscow network.
//!
//! Bus 297 is a ring through all five stops, bus 635 runs
//! Biryulyovo Tovarnaya - Universam - Biryusinka and back. Wait time is
//! 6 minutes, buses drive at 40 km/h (1.5 minutes per kilometer).

use approx::assert_relative_eq;
use geo::Point;
use transport_catalogue::prelude::*;

const STOPS: [(&str, f64, f64); 5] = [
    ("Biryulyovo Zapadnoye", 55.574371, 37.6517),
    ("Biryusinka", 55.581065, 37.64839),
    ("Universam", 55.587655, 37.645687),
    ("Biryulyovo Tovarnaya", 55.592028, 37.653656),
    ("Biryulyovo Passazhirskaya", 55.580999, 37.659164),
];

const DISTANCES: [(&str, &str, u32); 6] = [
    ("Biryulyovo Zapadnoye", "Biryusinka", 1800),
    ("Biryulyovo Zapadnoye", "Universam", 2400),
    ("Biryusinka", "Universam", 750),
    ("Universam", "Biryulyovo Tovarnaya", 900),
    ("Biryulyovo Tovarnaya", "Biryulyovo Passazhirskaya", 1300),
    ("Biryulyovo Passazhirskaya", "Biryulyovo Zapadnoye", 1200),
];

fn catalogue() -> TransportCatalogue {
    let mut catalogue = TransportCatalogue::new();
    for (name, lat, lng) in STOPS {
        catalogue.add_stop(name, Point::new(lng, lat)).unwrap();
    }
    for (from, to, meters) in DISTANCES {
        catalogue.add_distance(from, to, meters).unwrap();
    }
    catalogue
        .add_bus(
            "297",
            &[
                "Biryulyovo Zapadnoye",
                "Biryusinka",
                "Universam",
                "Biryulyovo Tovarnaya",
                "Biryulyovo Passazhirskaya",
                "Biryulyovo Zapadnoye",
            ],
            true,
        )
        .unwrap();
    catalogue
        .add_bus(
            "635",
            &["Biryulyovo Tovarnaya", "Universam", "Biryusinka"],
            false,
        )
        .unwrap();
    catalogue
        .set_routing_settings(RoutingSettings {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        })
        .unwrap();
    catalogue
}

/// (name, span_count, time) per leg; span 0 marks a wait.
fn assert_route(route: &RouteInfo, total_time: f64, legs: &[(&str, u32, f64)]) {
    assert_relative_eq!(route.total_time, total_time, epsilon = 1e-9);
    let actual: Vec<(&str, u32)> = route
        .legs
        .iter()
        .map(|leg| (leg.name(), leg.span_count()))
        .collect();
    let expected: Vec<(&str, u32)> = legs.iter().map(|&(name, span, _)| (name, span)).collect();
    assert_eq!(actual, expected);

    for (leg, &(_, _, time)) in route.legs.iter().zip(legs) {
        assert_relative_eq!(leg.time(), time, epsilon = 1e-9);
    }
}

#[test]
fn test_bus_statistics() {
    let catalogue = catalogue();

    let ring = catalogue.bus_statistics("297").unwrap();
    assert_eq!(ring.stop_count, 6);
    assert_eq!(ring.unique_stop_count, 5);
    assert_eq!(ring.route_length, 5950);
    assert_relative_eq!(ring.curvature, 1.36124, epsilon = 1e-5);

    let linear = catalogue.bus_statistics("635").unwrap();
    assert_eq!(linear.stop_count, 5);
    assert_eq!(linear.unique_stop_count, 3);
    assert_eq!(linear.route_length, 3300);
    assert_relative_eq!(linear.curvature, 1.13777, epsilon = 1e-5);

    assert!(catalogue.bus_statistics("751").is_none());
}

#[test]
fn test_buses_for_stop() {
    let catalogue = catalogue();

    let names = |stop: &str| -> Vec<String> {
        catalogue
            .buses_for_stop(stop)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    };
    assert_eq!(names("Universam"), vec!["297", "635"]);
    assert_eq!(names("Biryulyovo Passazhirskaya"), vec!["297"]);
    assert!(catalogue.buses_for_stop("Prazhskaya").is_none());
}

#[test]
fn test_single_ride() {
    let router = catalogue().build_router().unwrap();

    let route = router
        .resolve_route("Biryusinka", "Biryulyovo Passazhirskaya")
        .unwrap();
    assert_route(
        &route,
        10.425,
        &[("Biryusinka", 0, 6.0), ("297", 3, 4.425)],
    );
}

#[test]
fn test_ride_against_ring_direction_uses_linear_bus() {
    let router = catalogue().build_router().unwrap();

    let route = router
        .resolve_route("Biryulyovo Tovarnaya", "Biryusinka")
        .unwrap();
    assert_route(
        &route,
        8.475,
        &[("Biryulyovo Tovarnaya", 0, 6.0), ("635", 2, 2.475)],
    );

    let route = router.resolve_route("Universam", "Biryusinka").unwrap();
    assert_route(&route, 7.125, &[("Universam", 0, 6.0), ("635", 1, 1.125)]);
}

#[test]
fn test_transfer_at_ring_start() {
    let router = catalogue().build_router().unwrap();

    let route = router
        .resolve_route("Biryulyovo Passazhirskaya", "Biryusinka")
        .unwrap();
    assert_route(
        &route,
        16.5,
        &[
            ("Biryulyovo Passazhirskaya", 0, 6.0),
            ("297", 1, 1.8),
            ("Biryulyovo Zapadnoye", 0, 6.0),
            ("297", 1, 2.7),
        ],
    );
}

#[test]
fn test_loop_closing_ride() {
    let router = catalogue().build_router().unwrap();

    let route = router
        .resolve_route("Universam", "Biryulyovo Zapadnoye")
        .unwrap();
    assert_route(&route, 11.1, &[("Universam", 0, 6.0), ("297", 3, 5.1)]);
}

#[test]
fn test_same_stop() {
    let router = catalogue().build_router().unwrap();

    let route = router.resolve_route("Universam", "Universam").unwrap();
    assert_eq!(route.total_time, 0.0);
    assert!(route.total_time.is_sign_positive());
    assert!(route.legs.is_empty());
}

#[test]
fn test_total_time_is_sum_of_legs() {
    let router = catalogue().build_router().unwrap();

    for (from, _, _) in STOPS {
        for (to, _, _) in STOPS {
            let route = router.resolve_route(from, to).unwrap();
            let sum: f64 = route.legs.iter().map(RouteLeg::time).sum();
            assert_relative_eq!(route.total_time, sum, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_rebuild_is_deterministic() {
    let mut catalogue = catalogue();
    let first = catalogue.build_router().unwrap();
    let second = catalogue.build_router().unwrap();
    let fresh = self::catalogue().build_router().unwrap();

    for (from, _, _) in STOPS {
        for (to, _, _) in STOPS {
            let expected = first.resolve_route(from, to);
            assert_eq!(second.resolve_route(from, to), expected);
            assert_eq!(fresh.resolve_route(from, to), expected);
        }
    }
}
