//! Lifecycle actions for dish instances.
//!
//! These actions are handled by [`Entity::handle_action`](brigade_framework::Entity::handle_action).
//! See [`impl Entity for DishInstance`](crate::model::DishInstance#impl-Entity-for-DishInstance)
//! for the implementation details.

use crate::model::{DishBinding, DishStatus};
use brigade_framework::{Seconds, Transition};

#[derive(Debug, Clone)]
pub enum DishAction {
    /// `NotFired → Cooking`.
    Fire,
    /// Feeds one scaled clock delta into the cook or decay timer.
    ///
    /// # Arguments
    /// * `Seconds` - Scaled time since the previous advance
    Advance(Seconds),
    /// `OnPass → Walking`.
    MarkWalking,
    /// `OnPass | Walking → Served`.
    Serve,
    /// Points the instance at another table's ticket after a reassignment.
    Rebind(DishBinding),
}

/// Results from DishActions - variants match 1:1 with DishAction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DishActionResult {
    Fire(Transition<DishStatus>),
    Advance(Transition<DishStatus>),
    MarkWalking(Transition<DishStatus>),
    Serve(Transition<DishStatus>),
    Rebind(()),
}

impl DishActionResult {
    /// The status transition carried by the result. `Rebind` never changes status.
    pub fn transition(self) -> Transition<DishStatus> {
        match self {
            DishActionResult::Fire(t)
            | DishActionResult::Advance(t)
            | DishActionResult::MarkWalking(t)
            | DishActionResult::Serve(t) => t,
            DishActionResult::Rebind(()) => Transition::NoOp,
        }
    }
}
