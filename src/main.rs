//! Demo service: seats every table, lets the [`Expediter`] run the pass in real time, and logs
//! the mistake summary.
//!
//! Usage: `brigade [config.json] [catalog.json]`. Without arguments the built-in defaults and
//! house catalog are used.

use brigade::lifecycle::{driver, Expediter};
use brigade::model::{DishCatalog, TableId};
use brigade::{EventKind, ServiceConfig, ServiceEvent, ServiceSystem};
use brigade_framework::tracing::setup_tracing;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, info_span, warn};

const HOUSE_CATALOG: &str = r#"[
    { "name": "bread",   "station": "cold",   "cook_seconds": 2.0,  "decay_seconds": 60.0, "first_course_only": true },
    { "name": "salad",   "station": "cold",   "cook_seconds": 4.0,  "decay_seconds": 40.0 },
    { "name": "soup",    "station": "stove",  "cook_seconds": 6.0,  "decay_seconds": 25.0 },
    { "name": "risotto", "station": "stove",  "cook_seconds": 14.0, "decay_seconds": 20.0 },
    { "name": "steak",   "station": "grill",  "cook_seconds": 12.0, "decay_seconds": 15.0 },
    { "name": "fish",    "station": "grill",  "cook_seconds": 9.0,  "decay_seconds": 12.0 },
    { "name": "tart",    "station": "pastry", "cook_seconds": 5.0,  "decay_seconds": 45.0 }
]"#;

/// Safety net for the demo loop, in steps.
const MAX_STEPS: u64 = 20_000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ServiceConfig::from_path(path)?,
        None => ServiceConfig::default(),
    }
    .with_env_overrides()?;
    let catalog = match args.next() {
        Some(path) => DishCatalog::from_path(path)?,
        None => DishCatalog::from_json_str(HOUSE_CATALOG)?,
    };

    info!(?config, "Starting service");
    let mut system = ServiceSystem::new(config.clone(), catalog)?;
    system.on_passive(
        EventKind::MistakeRecorded,
        Box::new(|event: &ServiceEvent| {
            if let ServiceEvent::MistakeRecorded(mistake) = event {
                info!(kind = %mistake.kind, at = mistake.at, "Ledger updated");
            }
        }),
    );
    system.on_passive(
        EventKind::TicketCompleted,
        Box::new(|event: &ServiceEvent| info!(?event, "Table finished")),
    );

    let mut party_rng = StdRng::seed_from_u64(config.seed);
    {
        let _span = info_span!("seating").entered();
        for table in 1..=config.table_count {
            let party = party_rng.gen_range(1..=config.table_capacity.max(1));
            if let Err(e) = system.seat_party(TableId(table), party) {
                warn!(table, error = %e, "Could not seat party");
            }
        }
    }

    let mut expediter = Expediter::new();
    let report = driver::run(&mut system, MAX_STEPS, |system| expediter.act(system)).await;

    info!(
        steps = report.steps,
        simulated = report.simulated,
        all_served = report.all_served,
        "Service closed"
    );
    for (kind, count) in system.mistake_counts() {
        info!(%kind, count, "Mistakes");
    }
    if system.mistakes().is_empty() {
        info!("Clean service, no mistakes");
    }
    Ok(())
}
