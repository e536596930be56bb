//! Altered Headless Simulation Harness
//!
//! Validates pure simulation logic and data without the engine crate.
//! Runs entirely in-process — no ECS, no rendering, no save files.
//!
//! Usage:
//!   cargo run -p altered-simtest
//!   cargo run -p altered-simtest -- --verbose

use altered_logic::construction::BuildProgress;
use altered_logic::grid::{GridDims, TilePos};
use altered_logic::oxygen::{
    OxygenField, OxygenHazard, CONSUMPTION_PER_ENTITY, CRITICAL_OXYGEN, DAMAGE_RATE,
    GENERATION_PER_SOURCE,
};
use altered_logic::power::{
    route_power, PowerConsumer, PowerSource, LIFE_SUPPORT_DEMAND, REACTOR_OUTPUT,
};
use altered_logic::vitals;
use serde::Deserialize;
use std::collections::HashSet;

/// Fixed tick used throughout the sweeps.
const DT: f32 = 0.1;

// ── Scenario definitions (JSON-driven adversarial sweep) ────────────────
const SCENARIOS_JSON: &str = include_str!("../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    width: u32,
    height: u32,
    initial_level: f32,
    ticks: u32,
    /// (x, y, count)
    occupants: Vec<(i32, i32, u32)>,
    /// (x, y), each contributing one life support source
    sources: Vec<(i32, i32)>,
    /// (x, y) tiles outside the hull
    blocked: Vec<(i32, i32)>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Altered Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Oxygen field properties
    results.extend(validate_oxygen_properties(verbose));

    // 2. Adversarial scenario sweep from data file
    results.extend(validate_scenarios(verbose));

    // 3. Power routing
    results.extend(validate_power_routing(verbose));

    // 4. Construction progress
    results.extend(validate_construction(verbose));

    // 5. Vitals math
    results.extend(validate_vitals(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Oxygen field properties ──────────────────────────────────────────

fn validate_oxygen_properties(verbose: bool) -> Vec<TestResult> {
    println!("--- Oxygen Field ---");
    let mut results = Vec::new();

    // Lone consumer drains at 0.05/s, floored at zero
    {
        let dims = GridDims::new(1, 1);
        let mut field = OxygenField::new(dims);
        for _ in 0..10 {
            field.step(&[1], &[0.0], &[false], DT);
        }
        let after_one_second = field.level(TilePos::new(0, 0));
        let drain_ok = (after_one_second - (1.0 - CONSUMPTION_PER_ENTITY)).abs() < 1e-4;
        results.push(TestResult::new(
            "consumer_drain_rate",
            drain_ok,
            format!("level {:.4} after 1s (expected 0.95)", after_one_second),
        ));

        for _ in 0..1000 {
            field.step(&[1], &[0.0], &[false], DT);
        }
        let floor = field.level(TilePos::new(0, 0));
        results.push(TestResult::new(
            "consumer_floor_at_zero",
            floor == 0.0,
            format!("level {:.4} after exhaustion", floor),
        ));
    }

    // Lone source fills at 0.2/s up to the clamp
    {
        let dims = GridDims::new(1, 1);
        let mut field = OxygenField::with_level(dims, 0.0);
        for _ in 0..10 {
            field.step(&[0], &[GENERATION_PER_SOURCE], &[false], DT);
        }
        let after_one_second = field.level(TilePos::new(0, 0));
        let fill_ok = (after_one_second - GENERATION_PER_SOURCE).abs() < 1e-4;
        results.push(TestResult::new(
            "source_fill_rate",
            fill_ok,
            format!("level {:.4} after 1s (expected 0.20)", after_one_second),
        ));

        for _ in 0..100 {
            field.step(&[0], &[GENERATION_PER_SOURCE], &[false], DT);
        }
        let capped = field.level(TilePos::new(0, 0));
        results.push(TestResult::new(
            "source_capped_at_one",
            capped == 1.0,
            format!("level {:.4} after saturation", capped),
        ));
    }

    // Empty tile surrounded by full neighbors rises monotonically, no overshoot
    {
        let dims = GridDims::new(3, 3);
        let mut field = OxygenField::new(dims);
        let center = TilePos::new(1, 1);
        field.set_level(center, 0.0);
        let occupants = vec![0u32; dims.area()];
        let generation = vec![0.0f32; dims.area()];
        let blocked = vec![false; dims.area()];

        let mut previous = 0.0;
        let mut monotonic = true;
        for _ in 0..2000 {
            field.step(&occupants, &generation, &blocked, DT);
            let level = field.level(center);
            if level < previous - 1e-4 || level > 1.0 {
                monotonic = false;
                break;
            }
            previous = level;
        }
        results.push(TestResult::new(
            "diffusion_monotonic_approach",
            monotonic && previous > 0.8,
            format!("center reached {:.4}, monotonic={}", previous, monotonic),
        ));
    }

    // Exposure is exactly DAMAGE_RATE * dt per occupant while critical
    {
        let dims = GridDims::new(2, 1);
        let mut field = OxygenField::with_level(dims, 0.1);
        let exposures = field.step(&[3, 0], &[0.0, 0.0], &[false, false], DT);
        let exact = exposures.len() == 1
            && exposures[0].occupants == 3
            && (exposures[0].damage - DAMAGE_RATE * DT).abs() < 1e-6;
        results.push(TestResult::new(
            "exposure_exact_damage",
            exact,
            format!("{} exposure records", exposures.len()),
        ));
    }

    // Exposure stops once the level recovers past the threshold
    {
        let dims = GridDims::new(1, 1);
        let mut field = OxygenField::with_level(dims, CRITICAL_OXYGEN - 0.05);
        let mut still_exposed_after_recovery = false;
        for tick in 0..50 {
            let exposures = field.step(&[1], &[2.0], &[false], DT);
            if field.level(TilePos::new(0, 0)) >= CRITICAL_OXYGEN
                && tick > 5
                && !exposures.is_empty()
            {
                still_exposed_after_recovery = true;
            }
        }
        results.push(TestResult::new(
            "exposure_stops_on_recovery",
            !still_exposed_after_recovery,
            "no exposure once level back over threshold",
        ));
    }

    // Hazard classification bands
    {
        let bands_ok = OxygenHazard::from_level(0.9) == OxygenHazard::Normal
            && OxygenHazard::from_level(0.4) == OxygenHazard::Low
            && OxygenHazard::from_level(0.1) == OxygenHazard::Critical;
        results.push(TestResult::new(
            "hazard_bands",
            bands_ok,
            "normal/low/critical thresholds",
        ));
    }

    if verbose {
        println!("  oxygen property checks: {}", results.len());
    }
    results
}

// ── 2. Scenario sweep ───────────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Sweep ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult::new(
                "scenarios_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };

    results.push(TestResult::new(
        "scenarios_not_empty",
        !scenarios.is_empty(),
        format!("{} scenarios", scenarios.len()),
    ));

    for scenario in &scenarios {
        let dims = GridDims::new(scenario.width, scenario.height);
        let mut field = OxygenField::with_level(dims, scenario.initial_level);

        let mut occupants = vec![0u32; dims.area()];
        for &(x, y, count) in &scenario.occupants {
            occupants[dims.index(TilePos::new(x, y))] = count;
        }
        let mut generation = vec![0.0f32; dims.area()];
        for &(x, y) in &scenario.sources {
            generation[dims.index(TilePos::new(x, y))] += GENERATION_PER_SOURCE;
        }
        let mut blocked = vec![false; dims.area()];
        for &(x, y) in &scenario.blocked {
            blocked[dims.index(TilePos::new(x, y))] = true;
        }

        let mut in_range = true;
        let mut blocked_clean = true;
        for _ in 0..scenario.ticks {
            field.step(&occupants, &generation, &blocked, DT);
            for (i, &level) in field.levels().iter().enumerate() {
                if !(0.0..=1.0).contains(&level) {
                    in_range = false;
                }
                if blocked[i] && level != 0.0 {
                    blocked_clean = false;
                }
            }
            if !in_range || !blocked_clean {
                break;
            }
        }

        let average = field.average(&blocked);
        results.push(TestResult::new(
            &format!("scenario_{}", scenario.name),
            in_range && blocked_clean,
            format!(
                "{} ticks, final average {:.3}",
                scenario.ticks, average
            ),
        ));
        if verbose {
            println!("  {}: final average {:.3}", scenario.name, average);
        }
    }

    results
}

// ── 3. Power routing ────────────────────────────────────────────────────

fn validate_power_routing(verbose: bool) -> Vec<TestResult> {
    println!("--- Power Routing ---");
    let mut results = Vec::new();

    let reactor = PowerSource {
        id: 1,
        capacity: REACTOR_OUTPUT,
        tiles: vec![TilePos::new(0, 0), TilePos::new(1, 0)],
    };

    // Consumer at the end of a conduit run is powered
    {
        let consumer = PowerConsumer {
            id: 10,
            demand: LIFE_SUPPORT_DEMAND,
            tiles: vec![TilePos::new(6, 0)],
        };
        let conduits: HashSet<TilePos> =
            (2..6).map(|x| TilePos::new(x, 0)).collect();
        let flow = route_power(
            std::slice::from_ref(&reactor),
            std::slice::from_ref(&consumer),
            &conduits,
        );
        results.push(TestResult::new(
            "routed_over_conduits",
            flow.is_powered(10),
            format!("remaining {:.1}", flow.remaining[&1]),
        ));
    }

    // Gap in the run leaves the consumer dark
    {
        let consumer = PowerConsumer {
            id: 10,
            demand: LIFE_SUPPORT_DEMAND,
            tiles: vec![TilePos::new(6, 0)],
        };
        let mut conduits: HashSet<TilePos> =
            (2..6).map(|x| TilePos::new(x, 0)).collect();
        conduits.remove(&TilePos::new(4, 0));
        let flow = route_power(
            std::slice::from_ref(&reactor),
            std::slice::from_ref(&consumer),
            &conduits,
        );
        results.push(TestResult::new(
            "gap_breaks_circuit",
            !flow.is_powered(10),
            "severed run leaves consumer dark",
        ));
    }

    // Oversubscription is deterministic: lowest ids win
    {
        let consumers: Vec<PowerConsumer> = (0..6)
            .map(|i| PowerConsumer {
                id: 100 + i,
                demand: LIFE_SUPPORT_DEMAND,
                tiles: vec![TilePos::new(2, 0)],
            })
            .collect();
        let flow = route_power(std::slice::from_ref(&reactor), &consumers, &HashSet::new());
        let powered_count = flow.powered.len();
        let lowest_win = flow.is_powered(100) && !flow.is_powered(105);
        results.push(TestResult::new(
            "oversubscription_deterministic",
            powered_count == 5 && lowest_win,
            format!("{}/6 powered from capacity {}", powered_count, REACTOR_OUTPUT),
        ));
    }

    if verbose {
        println!("  power routing checks: {}", results.len());
    }
    results
}

// ── 4. Construction ─────────────────────────────────────────────────────

fn validate_construction(verbose: bool) -> Vec<TestResult> {
    println!("--- Construction ---");
    let mut results = Vec::new();

    let mut progress = BuildProgress::new(4.0);
    let mut ticks = 0;
    while !progress.advance(DT) {
        ticks += 1;
        if ticks > 1000 {
            break;
        }
    }
    // 4.0 seconds at 0.1s per tick: complete on the 40th advance
    results.push(TestResult::new(
        "build_completes_on_schedule",
        (39..=40).contains(&ticks),
        format!("completed after {} ticks", ticks + 1),
    ));

    let fraction_ok = BuildProgress::new(0.0).is_complete()
        && BuildProgress {
            elapsed: 1.0,
            required: 4.0,
        }
        .fraction()
            == 0.25;
    results.push(TestResult::new(
        "fraction_and_zero_required",
        fraction_ok,
        "fraction math and instant builds",
    ));

    if verbose {
        println!("  construction checks: {}", results.len());
    }
    results
}

// ── 5. Vitals ───────────────────────────────────────────────────────────

fn validate_vitals(verbose: bool) -> Vec<TestResult> {
    println!("--- Vitals ---");
    let mut results = Vec::new();

    // Starvation only bites at zero satiation
    let mut satiation = 1.0;
    let mut health = 100.0;
    let mut seconds_to_first_damage = 0.0;
    for _ in 0..10000 {
        satiation = vitals::decay_satiation(satiation, DT);
        seconds_to_first_damage += DT;
        let damage = vitals::starvation_damage(satiation, DT);
        if damage > 0.0 {
            health = vitals::apply_damage(health, damage);
            break;
        }
    }
    results.push(TestResult::new(
        "starvation_starts_at_zero_satiation",
        (0.4..=0.6).contains(&seconds_to_first_damage) && health < 100.0,
        format!("first damage after {:.1}s", seconds_to_first_damage),
    ));

    // Damage floors at zero, healing caps at max
    let clamps_ok = vitals::apply_damage(1.0, 50.0) == 0.0
        && vitals::heal(99.0, 50.0, 100.0) == 100.0
        && vitals::is_dead(0.0)
        && !vitals::is_dead(0.01);
    results.push(TestResult::new(
        "vitals_clamping",
        clamps_ok,
        "damage floor, heal cap, death threshold",
    ));

    if verbose {
        println!("  vitals checks: {}", results.len());
    }
    results
}
