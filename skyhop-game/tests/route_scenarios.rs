use skyhop_game::{
    Airport, AirportCatalog, AirportFilter, FuelModel, JsonCatalog, RouteOutcome, distance_km,
    plan_route,
};

fn finnish_airports() -> Vec<Airport> {
    JsonCatalog::load_from_static()
        .unwrap()
        .list_airports(&AirportFilter::country("FI"))
        .unwrap()
}

#[test]
fn distance_is_symmetric_across_catalog() {
    let airports = finnish_airports();
    for a in &airports {
        for b in &airports {
            let there = distance_km(a.coords(), b.coords());
            let back = distance_km(b.coords(), a.coords());
            assert!((there - back).abs() < 1e-9, "{} <-> {}", a.icao, b.icao);
        }
    }
}

#[test]
fn helsinki_to_tampere_is_about_140_km() {
    let airports = finnish_airports();
    let find = |icao: &str| airports.iter().find(|a| a.icao == icao).unwrap();
    let km = find("EFHK").distance_to(find("EFTP"));
    assert!((km - 142.0).abs() < 10.0, "got {km}");
}

#[test]
fn planner_terminates_for_every_pair() {
    let airports = finnish_airports();
    let fuel = FuelModel::default();
    for start in &airports {
        for target in &airports {
            let route = plan_route(start, target, &airports, fuel, 5);
            if start.same_icao(target) {
                assert_eq!(route.outcome, RouteOutcome::AlreadyThere);
                continue;
            }
            let remaining: Vec<f64> = route.path.iter().map(|a| a.distance_to(target)).collect();
            assert!(
                remaining.windows(2).all(|w| w[1] < w[0]),
                "{} -> {} went backwards",
                start.icao,
                target.icao
            );
            assert_eq!(route.hops, route.path.len().saturating_sub(1));
            if route.success() {
                assert_eq!(route.path.last().map(|a| a.icao.as_str()), Some(target.icao.as_str()));
                assert!(route.base_fuel > 0.0);
                let legs: f64 = route.path.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
                assert!((legs - route.distance_km).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn distinct_coordinates_always_reach_the_target() {
    // The target itself is always strictly closer to the target than any
    // other airport, so with distinct coordinates the planner never stalls.
    let airports = finnish_airports();
    let fuel = FuelModel::default();
    let home = airports.iter().find(|a| a.icao == "EFHK").unwrap();
    for target in airports.iter().filter(|a| !a.same_icao(home)) {
        let route = plan_route(home, target, &airports, fuel, 5);
        assert!(route.success(), "EFHK -> {}: {}", target.icao, route.message());
        assert_eq!(route.message(), "ok");
    }
}

#[test]
fn three_airport_scenario() {
    let catalog = vec![
        Airport::new("A", "A", "FI", 60.0, 24.0),
        Airport::new("B", "B", "FI", 61.0, 25.0),
        Airport::new("C", "C", "FI", 62.0, 26.0),
    ];
    let route = plan_route(&catalog[0], &catalog[2], &catalog, FuelModel::new(2.0, 0.08), 5);
    assert!(route.success());
    assert!(route.base_fuel > 0.0);
    let path = route.icao_path();
    assert!(path == ["A", "B", "C"] || path == ["A", "C"], "got {path:?}");
}

#[test]
fn smaller_neighborhoods_never_shorten_the_hop_count() {
    let airports = finnish_airports();
    let fuel = FuelModel::default();
    let find = |icao: &str| airports.iter().find(|a| a.icao == icao).unwrap();
    let wide = plan_route(find("EFHN"), find("EFIV"), &airports, fuel, 34);
    let narrow = plan_route(find("EFHN"), find("EFIV"), &airports, fuel, 1);
    assert!(wide.success() && narrow.success());
    assert_eq!(wide.hops, 1, "the target itself is always a candidate with full reach");
    assert!(narrow.hops >= wide.hops);
}
