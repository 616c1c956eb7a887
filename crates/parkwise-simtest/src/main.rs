//! ParkWise Headless Simulation Harness
//!
//! Validates the parking logic without any UI. Runs entirely in-process:
//! no persistence, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p parkwise-simtest
//!   cargo run -p parkwise-simtest -- --verbose --seed 42
//!   cargo run -p parkwise-simtest -- --config data/parking.json --dump

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use parkwise_logic::booking::{BookingStatus, VehicleSize};
use parkwise_logic::config::{validate_config, ParkingConfig};
use parkwise_logic::constants::{grid, odds};
use parkwise_logic::error::ParkingError;
use parkwise_logic::route::{compute_route, Coord};
use parkwise_logic::selector::{select_spot, Preference};
use parkwise_logic::session::{ParkingSession, PreBookRequest};
use parkwise_logic::spots::{count_available, generate_floor, SpotStatus, SpotType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 2025;

// ── Command line ────────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    dump: bool,
    seed: u64,
    config: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut opts = Options {
        verbose: false,
        dump: false,
        seed: DEFAULT_SEED,
        config: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => opts.verbose = true,
            "--dump" => opts.dump = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                opts.seed = value
                    .parse()
                    .map_err(|e| format!("bad --seed {value:?}: {e}"))?;
            }
            "--config" => opts.config = Some(args.next().ok_or("--config needs a path")?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(opts)
}

fn load_config(opts: &Options) -> Result<ParkingConfig, String> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            ParkingConfig::from_json(&text).map_err(|e| e.to_string())?
        }
        None => ParkingConfig::default(),
    };
    config.seed.get_or_insert(opts.seed);
    Ok(config)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let opts = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    if opts.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
    let config = match load_config(&opts) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    println!("=== ParkWise Simulation Harness (seed {}) ===\n", opts.seed);

    let mut results = Vec::new();

    // 1. Spot generation sweep
    results.extend(validate_generation(opts.seed));

    // 2. Selector properties
    results.extend(validate_selection(opts.seed));

    // 3. Routing over the whole grid
    results.extend(validate_routing());

    // 4. Configuration
    results.extend(validate_configuration(&config));

    // 5. Scripted session
    results.extend(run_session_script(&config, opts.dump));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn validate_generation(seed: u64) -> Vec<TestResult> {
    println!("--- Spot Generation ---");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let floors = 1000;
    let mut results = Vec::new();

    let mut bad_count = 0;
    let mut bad_ids = 0;
    let mut bad_distance = 0;
    let mut available = 0;
    for i in 0..floors {
        let floor = (i % 5 + 1) as u8;
        let spots = generate_floor(floor, &mut rng);
        if spots.len() != grid::SPOTS_PER_FLOOR {
            bad_count += 1;
        }
        let ids: HashSet<&str> = spots.iter().map(|s| s.id.as_str()).collect();
        if ids.len() != spots.len() {
            bad_ids += 1;
        }
        bad_distance += spots
            .iter()
            .filter(|s| s.distance_to_entry != s.row.unsigned_abs() + (s.col - 2).unsigned_abs())
            .count();
        available += count_available(&spots);
    }

    results.push(check(
        "generation_forty_spots",
        bad_count == 0,
        format!("{bad_count}/{floors} floors with wrong spot count"),
    ));
    results.push(check(
        "generation_unique_ids",
        bad_ids == 0,
        format!("{bad_ids}/{floors} floors with duplicate ids"),
    ));
    results.push(check(
        "generation_manhattan_distance",
        bad_distance == 0,
        format!("{bad_distance} spots with wrong distance"),
    ));

    let ratio = available as f64 / (floors * grid::SPOTS_PER_FLOOR) as f64;
    results.push(check(
        "generation_availability_ratio",
        (ratio - odds::EXPECTED_AVAILABLE).abs() < 0.03,
        format!(
            "{:.3} available (expected ~{:.2})",
            ratio,
            odds::EXPECTED_AVAILABLE
        ),
    ));
    results
}

// ── 2. Selection ────────────────────────────────────────────────────────

fn validate_selection(seed: u64) -> Vec<TestResult> {
    println!("--- Spot Selection ---");
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    let mut results = Vec::new();

    let mut beaten = 0;
    let mut unavailable_picks = 0;
    let mut trials = 0;
    for _ in 0..500 {
        let spots = generate_floor(1, &mut rng);
        for pref in Preference::ALL {
            let Ok(spot) = select_spot(&spots, pref, None, &mut rng) else {
                continue;
            };
            trials += 1;
            if !spot.is_available() {
                unavailable_picks += 1;
            }
            if pref == Preference::ClosestToEntry
                && spots
                    .iter()
                    .any(|s| s.is_available() && s.distance_to_entry < spot.distance_to_entry)
            {
                beaten += 1;
            }
        }
    }
    results.push(check(
        "selection_only_available",
        unavailable_picks == 0,
        format!("{unavailable_picks}/{trials} picks were not available"),
    ));
    results.push(check(
        "selection_closest_is_minimum",
        beaten == 0,
        format!("{beaten} closest picks had a nearer candidate"),
    ));

    let mut empty = generate_floor(1, &mut rng);
    for s in &mut empty {
        s.status = SpotStatus::Occupied;
    }
    let outcome = select_spot(&empty, Preference::Any, Some(SpotType::EvCharging), &mut rng);
    results.push(check(
        "selection_reports_unavailable",
        outcome == Err(ParkingError::NoSpotsAvailable),
        format!("{outcome:?}"),
    ));
    results
}

// ── 3. Routing ──────────────────────────────────────────────────────────

fn validate_routing() -> Vec<TestResult> {
    println!("--- Routing ---");
    let mut results = Vec::new();

    let mut bad_length = 0;
    let mut bad_steps = 0;
    let mut nondeterministic = 0;
    for row in 0..grid::ROWS {
        for col in 0..grid::COLS {
            let end = Coord::new(row, col);
            let route = compute_route(Coord::entry(), end);
            if route.len() as u32 != Coord::entry().manhattan(end) {
                bad_length += 1;
            }
            let mut prev = Coord::entry();
            for &step in &route {
                if prev.manhattan(step) != 1 {
                    bad_steps += 1;
                }
                prev = step;
            }
            if route != compute_route(Coord::entry(), end) {
                nondeterministic += 1;
            }
        }
    }
    results.push(check(
        "routing_length_is_manhattan",
        bad_length == 0,
        format!("{bad_length} routes with wrong length"),
    ));
    results.push(check(
        "routing_unit_steps",
        bad_steps == 0,
        format!("{bad_steps} non-unit steps"),
    ));
    results.push(check(
        "routing_deterministic",
        nondeterministic == 0,
        format!("{nondeterministic} routes differed on recompute"),
    ));

    let route = compute_route(Coord::entry(), Coord::new(3, 4));
    let expected = [(0, 3), (0, 4), (1, 4), (2, 4), (3, 4)];
    let got: Vec<(i32, i32)> = route.iter().map(|c| (c.row, c.col)).collect();
    results.push(check(
        "routing_entry_to_3_4",
        got == expected,
        format!("{got:?}"),
    ));
    results
}

// ── 4. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &ParkingConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let errors = validate_config(config);
    vec![
        check(
            "config_valid",
            errors.is_empty(),
            if errors.is_empty() {
                format!("{} facilities", config.facilities.len())
            } else {
                format!("{errors:?}")
            },
        ),
        check(
            "config_round_trips_json",
            serde_json::to_string(config)
                .ok()
                .and_then(|json| ParkingConfig::from_json(&json).ok())
                .as_ref()
                == Some(config),
            "serialize then parse".into(),
        ),
    ]
}

// ── 5. Session script ───────────────────────────────────────────────────

fn run_session_script(config: &ParkingConfig, dump: bool) -> Vec<TestResult> {
    println!("--- Session Script ---");
    let mut results = Vec::new();

    let mut session = match ParkingSession::new(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("session_start", false, e.to_string()));
            return results;
        }
    };
    let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default();
    let arrive: NaiveDateTime = today.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default());

    let Some(facility) = config.facilities.first().map(|f| f.name.clone()) else {
        results.push(check("session_facility", false, "no facilities".into()));
        return results;
    };
    let before = session.facilities().available_spots();

    let denied = session.quick_park(&facility, 1, Preference::Any, arrive);
    results.push(check(
        "session_requires_login",
        matches!(denied, Err(ParkingError::NotLoggedIn)),
        format!("{denied:?}"),
    ));

    let login = session.login("Sim Driver", "00000 00000", "SIM 0001");
    results.push(check(
        "session_login",
        login.is_ok(),
        format!("{login:?}"),
    ));

    let parked = session
        .quick_park(&facility, 1, Preference::ClosestToEntry, arrive)
        .map(|b| (b.spot_id.clone(), b.route().len()));
    results.push(check(
        "session_quick_park",
        parked.is_ok(),
        format!("{parked:?}"),
    ));
    let expected_drop = u32::from(parked.is_ok());
    results.push(check(
        "session_decrements_availability",
        session.facilities().available_spots() + expected_drop == before,
        format!(
            "{} → {} available",
            before,
            session.facilities().available_spots()
        ),
    ));

    match session.navigation_view() {
        Ok(view) => {
            println!("{}", view.render_ascii());
            for line in &view.directions {
                println!("  • {line}");
            }
            results.push(check(
                "session_navigation_marks_spot",
                view.assigned_cell().is_some(),
                format!("{} route cells", view.route_cells().count()),
            ));
        }
        Err(e) => results.push(check("session_navigation_marks_spot", false, e.to_string())),
    }

    let exited = session
        .exit_parking(arrive + Duration::hours(2))
        .map(|b| b.status);
    results.push(check(
        "session_exit_archives",
        exited == Ok(BookingStatus::Completed) && session.current_booking().is_none(),
        format!("{exited:?}"),
    ));
    let after_exit = session.facilities().available_spots();
    let restored = config.restore_availability_on_exit;
    results.push(check(
        "session_exit_availability",
        after_exit == if restored { before } else { before - expected_drop },
        format!("{after_exit} available after exit (restore: {restored})"),
    ));

    let request = PreBookRequest {
        facility: facility.clone(),
        floor: 1,
        date: today + Duration::days(1),
        arrival_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        duration_hours: 2,
        spot_type: SpotType::EvCharging,
        preference: Preference::NearElevator,
        vehicle_size: VehicleSize::Sedan,
    };
    let booked = session.pre_book(&request, today).map(|b| b.status);
    results.push(check(
        "session_pre_book_confirmed",
        booked == Ok(BookingStatus::Confirmed),
        format!("{booked:?}"),
    ));
    results.push(check(
        "session_pre_book_keeps_availability",
        session.facilities().available_spots() == after_exit,
        format!("{} available", session.facilities().available_spots()),
    ));

    let history = session.history();
    results.push(check(
        "session_history_newest_first",
        history.first().map(|r| r.status.as_str()) == Some("Confirmed")
            && history.len() == session.dashboard().total_bookings,
        format!("{} bookings", history.len()),
    ));

    if dump {
        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("snapshot failed: {e}"),
        }
    }

    session.logout();
    results.push(check(
        "session_logout",
        !session.is_logged_in() && session.history().len() == history.len(),
        "profile cleared, history kept".into(),
    ));
    results
}
