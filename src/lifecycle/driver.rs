//! Real-time driver: calls [`ServiceSystem::step`] on a tokio interval.

use super::ServiceSystem;
use brigade_framework::Seconds;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, info_span, Instrument};

/// Summary of one driver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverReport {
    pub steps: u64,
    /// Simulated time at the end of the run.
    pub simulated: Seconds,
    pub all_served: bool,
}

/// Steps `system` every `config.step_interval_ms` until every table is served or `max_steps`
/// steps have run. `between_steps` runs after each step, outside the engine, and may submit
/// inbound events.
pub async fn run<F>(system: &mut ServiceSystem, max_steps: u64, mut between_steps: F) -> DriverReport
where
    F: FnMut(&mut ServiceSystem),
{
    let period = Duration::from_millis(system.config().step_interval_ms);
    let raw_delta = period.as_secs_f64();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let span = info_span!("driver", period_ms = period.as_millis() as u64, max_steps);
    let steps = async {
        info!("Driver started");
        let mut steps = 0;
        while steps < max_steps {
            interval.tick().await;
            system.step(raw_delta);
            steps += 1;
            between_steps(system);
            if system.is_all_served() {
                break;
            }
        }
        steps
    }
    .instrument(span)
    .await;

    let report = DriverReport {
        steps,
        simulated: system.now(),
        all_served: system.is_all_served(),
    };
    info!(steps, simulated = report.simulated, all_served = report.all_served, "Driver stopped");
    report
}
