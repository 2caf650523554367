//! Station coordinators: one per production line, advancing fired dishes through cooking.

use crate::dishes::{DishAction, DishStore};
use crate::events::{ServiceBus, ServiceEvent};
use crate::model::{DishCatalog, DishId, DishStatus};
use crate::tickets::TicketStore;
use brigade_framework::Seconds;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct StationCoordinator {
    station: String,
    cooking: Vec<DishId>,
}

impl StationCoordinator {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            cooking: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.station
    }

    /// Dishes currently cooking here, in fire order.
    pub fn cooking(&self) -> &[DishId] {
        &self.cooking
    }

    /// Fires `dish` if it belongs to this station and its course is unlocked.
    /// Returns whether the dish started cooking.
    pub fn fire(
        &mut self,
        dish: DishId,
        dishes: &mut DishStore,
        tickets: &TicketStore,
        catalog: &DishCatalog,
        bus: &mut ServiceBus,
    ) -> bool {
        let Some(instance) = dishes.get(dish) else {
            warn!(station = %self.station, %dish, "Fire for unknown dish skipped");
            return false;
        };
        if instance.station != self.station {
            warn!(
                station = %self.station,
                %dish,
                expected = %instance.station,
                "Fire at wrong station skipped"
            );
            return false;
        }
        if let Some(binding) = instance.binding {
            let unlocked = tickets
                .get(binding.ticket)
                .is_some_and(|t| t.is_course_unlocked(binding.course));
            if !unlocked {
                debug!(%dish, ticket = %binding.ticket, course = binding.course, "Course locked, fire ignored");
                return false;
            }
        }

        let fired = match dishes.perform_action(dish, DishAction::Fire, catalog) {
            Ok(result) => result.transition().entered(DishStatus::Cooking),
            Err(e) => {
                warn!(%dish, error = %e, "Fire failed");
                false
            }
        };
        if fired {
            self.cooking.push(dish);
            info!(station = %self.station, %dish, "Fired");
            bus.publish(ServiceEvent::DishFired {
                dish,
                station: self.station.clone(),
            });
        }
        fired
    }

    /// Advances every cooking dish by `delta`; finished dishes leave for the pass.
    pub fn tick(
        &mut self,
        delta: Seconds,
        dishes: &mut DishStore,
        catalog: &DishCatalog,
        bus: &mut ServiceBus,
    ) {
        let station = &self.station;
        self.cooking.retain(|&dish| {
            match dishes.perform_action(dish, DishAction::Advance(delta), catalog) {
                Ok(result) if result.transition().entered(DishStatus::OnPass) => {
                    info!(%station, %dish, "Dish ready");
                    bus.publish(ServiceEvent::DishReady {
                        dish,
                        station: station.clone(),
                    });
                    false
                }
                Ok(_) => true,
                Err(e) => {
                    warn!(%station, %dish, error = %e, "Dropping dish from station");
                    false
                }
            }
        });
    }
}
