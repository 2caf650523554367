//! Entity trait implementation for [`DishInstance`].
//!
//! Creation resolves the station and timings from the [`DishCatalog`]. Every action that can
//! move the status returns a [`Transition`]; a request that does not fit the current status is
//! a [`Transition::NoOp`], never an error.

use super::actions::{DishAction, DishActionResult};
use super::error::DishError;
use crate::model::{DishCatalog, DishCreate, DishId, DishInstance, DishStatus};
use brigade_framework::{Entity, Seconds, Transition};
use tracing::debug;

impl Entity for DishInstance {
    type Id = DishId;
    type Create = DishCreate;
    type Action = DishAction;
    type ActionResult = DishActionResult;
    type Context = DishCatalog;
    type Error = DishError;

    fn from_create_params(id: DishId, params: DishCreate) -> Result<Self, DishError> {
        Ok(Self::new(id, params.dish, params.binding))
    }

    /// Copies station, cook and decay durations out of the catalog.
    fn on_create(&mut self, catalog: &DishCatalog) -> Result<(), DishError> {
        let definition = catalog
            .get(&self.dish)
            .ok_or_else(|| DishError::UnknownDish(self.dish.clone()))?;
        check_duration(&self.dish, "cook", definition.cook_seconds)?;
        check_duration(&self.dish, "decay", definition.decay_seconds)?;
        self.station = definition.station.clone();
        self.cook_seconds = definition.cook_seconds;
        self.decay_seconds = definition.decay_seconds;
        Ok(())
    }

    /// # Actions
    /// - `Fire`: starts cooking and re-captures the cook duration
    /// - `Advance`: accumulates cook time (Cooking) or decay time (strictly OnPass)
    /// - `MarkWalking`: freezes decay
    /// - `Serve`: idempotent; a second serve is a no-op
    /// - `Rebind`: replaces the ticket/table/course binding
    fn handle_action(
        &mut self,
        action: DishAction,
        catalog: &DishCatalog,
    ) -> Result<DishActionResult, DishError> {
        let result = match action {
            DishAction::Fire => {
                if self.status != DishStatus::NotFired {
                    DishActionResult::Fire(self.no_op("fire"))
                } else {
                    if let Some(definition) = catalog.get(&self.dish) {
                        self.cook_seconds = definition.cook_seconds;
                    }
                    DishActionResult::Fire(self.move_to(DishStatus::Cooking))
                }
            }
            DishAction::Advance(delta) => DishActionResult::Advance(self.advance(delta)),
            DishAction::MarkWalking => {
                if self.status == DishStatus::OnPass {
                    DishActionResult::MarkWalking(self.move_to(DishStatus::Walking))
                } else {
                    DishActionResult::MarkWalking(self.no_op("mark_walking"))
                }
            }
            DishAction::Serve => {
                if self.status.is_servable() {
                    DishActionResult::Serve(self.move_to(DishStatus::Served))
                } else {
                    DishActionResult::Serve(self.no_op("serve"))
                }
            }
            DishAction::Rebind(binding) => {
                self.binding = Some(binding);
                DishActionResult::Rebind(())
            }
        };
        Ok(result)
    }
}

impl DishInstance {
    fn advance(&mut self, delta: Seconds) -> Transition<DishStatus> {
        // A paused clock yields a zero delta; zero-length timers wait for time to pass.
        if delta <= 0.0 {
            return Transition::NoOp;
        }
        match self.status {
            DishStatus::Cooking => {
                self.elapsed += delta;
                if self.elapsed >= self.cook_seconds {
                    self.move_to(DishStatus::OnPass)
                } else {
                    Transition::NoOp
                }
            }
            DishStatus::OnPass => {
                self.elapsed += delta;
                if self.elapsed >= self.decay_seconds {
                    self.move_to(DishStatus::Dead)
                } else {
                    Transition::NoOp
                }
            }
            // Walking is frozen; every other status has no timer.
            _ => Transition::NoOp,
        }
    }

    fn move_to(&mut self, to: DishStatus) -> Transition<DishStatus> {
        let from = self.status;
        self.status = to;
        self.elapsed = 0.0;
        self.history.push(to);
        Transition::applied(from, to)
    }

    fn no_op(&self, request: &'static str) -> Transition<DishStatus> {
        debug!(dish = %self.id, status = ?self.status, request, "Ignored dish transition");
        Transition::NoOp
    }
}

fn check_duration(dish: &str, label: &str, value: Seconds) -> Result<(), DishError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DishError::InvalidDefinition {
            dish: dish.to_string(),
            reason: format!("{label} duration {value}"),
        })
    }
}
