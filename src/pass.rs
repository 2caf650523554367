//! The pass: cooked dishes wait here, decaying, until served or dead.

use crate::dishes::{DishAction, DishStore};
use crate::events::{ServiceBus, ServiceEvent};
use crate::model::{DishCatalog, DishId, DishStatus};
use brigade_framework::Seconds;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct PassCoordinator {
    holding: Vec<DishId>,
    /// Received since the last tick. Decay starts on the next tick.
    arrived: Vec<DishId>,
}

impl PassCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dishes on the pass (OnPass or Walking), oldest first.
    pub fn holding(&self) -> &[DishId] {
        &self.holding
    }

    pub fn holds(&self, dish: DishId) -> bool {
        self.holding.contains(&dish)
    }

    pub fn receive(&mut self, dish: DishId, bus: &mut ServiceBus) {
        if self.holds(dish) {
            return;
        }
        self.holding.push(dish);
        self.arrived.push(dish);
        bus.publish(ServiceEvent::DishOnPass { dish });
    }

    pub fn mark_walking(&mut self, dish: DishId, dishes: &mut DishStore, catalog: &DishCatalog) -> bool {
        if !self.holds(dish) {
            debug!(%dish, "Mark walking for dish not on the pass");
            return false;
        }
        match dishes.perform_action(dish, DishAction::MarkWalking, catalog) {
            Ok(result) => result.transition().entered(DishStatus::Walking),
            Err(e) => {
                warn!(%dish, error = %e, "Mark walking failed");
                false
            }
        }
    }

    /// Takes a served dish off the pass.
    pub fn release(&mut self, dish: DishId) {
        self.holding.retain(|&held| held != dish);
        self.arrived.retain(|&held| held != dish);
    }

    /// Advances decay for every dish still strictly on the pass, except those that arrived
    /// during the current step.
    pub fn tick(
        &mut self,
        delta: Seconds,
        now: Seconds,
        dishes: &mut DishStore,
        catalog: &DishCatalog,
        bus: &mut ServiceBus,
    ) {
        let arrived = std::mem::take(&mut self.arrived);
        self.holding.retain(|&dish| {
            if arrived.contains(&dish) {
                return true;
            }
            match dishes.perform_action(dish, DishAction::Advance(delta), catalog) {
                Ok(result) if result.transition().entered(DishStatus::Dead) => {
                    let Some(instance) = dishes.get(dish) else {
                        return false;
                    };
                    info!(%dish, dish_type = %instance.dish, "Dish died on the pass");
                    bus.publish(ServiceEvent::DishDied {
                        dish,
                        dish_type: instance.dish.clone(),
                        binding: instance.binding,
                        at: now,
                    });
                    false
                }
                Ok(_) => true,
                Err(e) => {
                    warn!(%dish, error = %e, "Dropping dish from the pass");
                    false
                }
            }
        });
    }
}
