//! downtown — a small end-to-end run of the rust_dl courier dispatcher.
//!
//! Hires a handful of couriers on the 10×10 grid, feeds in waves of orders
//! for random streets, and lets the assignment and movement loops deliver
//! them.  Snapshots and per-tick counters land in CSV files.
//!
//! ```text
//! cargo run -p downtown -- demos/downtown/config.json
//! RUST_LOG=debug cargo run -p downtown
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dl_core::{Location, SimConfig, SimRng, Tick, Transport, Uuid};
use dl_courier::Courier;
use dl_order::{Order, OrderStatus};
use dl_output::{CsvWriter, OutputWriter, SimOutputObserver};
use dl_sim::{SimBuilder, SimObserver, TickSummary};
use dl_store::{CourierRepository, InMemoryStore, RandomGeoClient, RetryingGeoClient};

// ── Constants ─────────────────────────────────────────────────────────────────

const NAMES: &[&str] = &["Alex", "Bea", "Cruz", "Dana", "Eli", "Fern", "Gus", "Hana", "Ivo", "Jun"];

const STREETS: &[&str] = &[
    "1 Main St",
    "14 Elm St",
    "7 Harbor Rd",
    "220 Market Sq",
    "3 Orchard Ln",
    "98 Station Ave",
    "41 Mill Row",
];

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:              SimConfig,
    couriers:         usize,
    orders_per_wave:  usize,
    wave_every_ticks: u64,
    output_dir:       PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:              SimConfig { total_ticks: 60, ..SimConfig::default() },
            couriers:         6,
            orders_per_wave:  3,
            wave_every_ticks: 10,
            output_dir:       PathBuf::from("output/downtown"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer wrapper to count deliveries ──────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    assigned:  usize,
    delivered: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, assigned: 0, delivered: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.assigned += summary.assigned();
        self.delivered += summary.completed();
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, couriers: &[Courier], orders: &[Order]) {
        self.inner.on_snapshot(tick, couriers, orders);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Population ────────────────────────────────────────────────────────────────

fn hire_couriers(count: usize, rng: &mut SimRng) -> Result<Vec<Courier>> {
    (0..count)
        .map(|i| {
            let name = rng.choose(NAMES).copied().unwrap_or("Courier");
            let transport = rng.choose(&Transport::ALL).copied().unwrap_or(Transport::Pedestrian);
            let courier = Courier::new(format!("{name}-{i}"), transport, Location::random(rng))?;
            Ok(courier)
        })
        .collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    info!(
        ticks    = config.sim.total_ticks,
        seed     = config.sim.seed,
        couriers = config.couriers,
        "downtown starting"
    );

    // 1. Independent random streams so adding couriers never reshuffles orders.
    let mut rng = SimRng::new(config.sim.seed);
    let mut courier_rng = rng.child(1);
    let mut street_rng = rng.child(2);
    let mut basket_rng = rng.child(3);
    let mut geo = RetryingGeoClient::new(RandomGeoClient::new(rng.child(4)));

    // 2. Build sim.
    let couriers = hire_couriers(config.couriers, &mut courier_rng)?;
    let mut sim = SimBuilder::new(config.sim.clone(), InMemoryStore::new())
        .couriers(couriers)
        .build()?;

    // 3. Set up output.
    std::fs::create_dir_all(&config.output_dir)?;
    let writer = CsvWriter::new(&config.output_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config.sim));

    // 4. Run in waves: drop a batch of orders, then advance the clock.
    let t0 = Instant::now();
    let end = config.sim.end_tick();
    let wave = config.wave_every_ticks.max(1);
    let mut created = 0usize;
    while sim.clock.current_tick < end {
        for _ in 0..config.orders_per_wave {
            let street = street_rng.choose(STREETS).copied().unwrap_or(STREETS[0]);
            let basket = Uuid::from_u128(basket_rng.random::<u128>());
            sim.create_order(&mut geo, basket, street)?;
            created += 1;
        }
        let remaining = end.0 - sim.clock.current_tick.0;
        sim.run_ticks(wave.min(remaining), &mut obs)?;
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let open = sim.store.orders().iter().filter(|o| o.status() != OrderStatus::Completed).count();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  orders created   : {created}");
    println!("  orders assigned  : {}", obs.assigned);
    println!("  orders delivered : {}", obs.delivered);
    println!("  orders open      : {open}");
    println!("  output           : {}", config.output_dir.display());
    println!();

    // 6. Final courier table.
    let mut couriers = sim.store.find_free()?;
    couriers.extend(sim.store.find_busy()?);
    println!("{:<10} {:<11} {:<9} {:<6}", "Courier", "Transport", "Location", "Status");
    println!("{}", "-".repeat(40));
    for c in &couriers {
        println!(
            "{:<10} {:<11} {:<9} {:<6}",
            c.name(),
            c.transport().as_str(),
            c.location().to_string(),
            c.status().as_str(),
        );
    }

    Ok(())
}
