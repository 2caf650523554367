//! An automated expediter: the policy the demo binary and the driver tests use to play a
//! service without a human at the pass.
//!
//! Each call to [`Expediter::act`]:
//! 1. fires every unfired dish of each table's unlocked current course
//! 2. refires a dead dish ad hoc and reassigns the replacement once it reaches the pass
//! 3. walks and serves a table's current course together, once all of it is on the pass

use super::ServiceSystem;
use crate::model::{DishId, DishStatus, TableId};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct Expediter {
    /// Dead dishes already replaced.
    replaced: Vec<DishId>,
    /// Tables waiting on an ad hoc replacement of a type.
    awaiting: Vec<(TableId, String)>,
}

impl Expediter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn act(&mut self, system: &mut ServiceSystem) {
        self.fire_current_courses(system);
        self.replace_dead(system);
        self.claim_replacements(system);
        self.serve_ready_courses(system);
    }

    fn fire_current_courses(&mut self, system: &mut ServiceSystem) {
        let mut to_fire = Vec::new();
        for table in system.tables() {
            let Some(ticket) = table.ticket.and_then(|t| system.ticket(t)) else {
                continue;
            };
            if !ticket.is_active() {
                continue;
            }
            let Some(course) = ticket.course(table.current_course).filter(|c| c.unlocked) else {
                continue;
            };
            to_fire.extend(
                course
                    .dishes
                    .iter()
                    .copied()
                    .filter(|&d| system.dish(d).is_some_and(|d| d.status == DishStatus::NotFired)),
            );
        }
        for dish in to_fire {
            if let Err(e) = system.fire(dish) {
                warn!(%dish, error = %e, "Expediter could not fire");
            }
        }
    }

    fn replace_dead(&mut self, system: &mut ServiceSystem) {
        let dead: Vec<(DishId, TableId, String)> = system
            .dishes()
            .filter(|d| d.status == DishStatus::Dead && !self.replaced.contains(&d.id))
            .filter_map(|d| d.table().map(|table| (d.id, table, d.dish.clone())))
            .collect();
        for (dish, table, dish_type) in dead {
            self.replaced.push(dish);
            let still_wanted = system
                .table_order(table)
                .is_some_and(|o| o.has_unserved(&dish_type));
            if !still_wanted {
                continue;
            }
            debug!(%dish, %table, %dish_type, "Refiring dead dish");
            match system.fire_ad_hoc(dish_type.clone()) {
                Ok(()) => self.awaiting.push((table, dish_type)),
                Err(e) => warn!(%dish, error = %e, "Expediter could not refire"),
            }
        }
    }

    fn claim_replacements(&mut self, system: &mut ServiceSystem) {
        let ready: Vec<(DishId, String)> = system
            .dishes()
            .filter(|d| d.binding.is_none() && d.status == DishStatus::OnPass)
            .map(|d| (d.id, d.dish.clone()))
            .collect();
        for (dish, dish_type) in ready {
            let Some(index) = self.awaiting.iter().position(|(_, t)| *t == dish_type) else {
                continue;
            };
            let (table, _) = self.awaiting.remove(index);
            if let Err(e) = system.reassign_dish(dish, table) {
                warn!(%dish, %table, error = %e, "Expediter could not reassign");
            }
        }
    }

    fn serve_ready_courses(&mut self, system: &mut ServiceSystem) {
        let mut ready: Vec<(TableId, Vec<DishId>)> = Vec::new();
        for table in system.tables() {
            let (Some(ticket), Some(order)) = (
                table.ticket.and_then(|t| system.ticket(t)),
                system.table_order(table.id),
            ) else {
                continue;
            };
            let Some(course) = ticket.course(table.current_course) else {
                continue;
            };
            let outstanding = order.course(course.number).map_or(0, |c| c.outstanding());
            if outstanding == 0 {
                continue;
            }
            let pending: Vec<(DishId, DishStatus)> = course
                .dishes
                .iter()
                .filter_map(|&d| system.dish(d).map(|dish| (d, dish.status)))
                .filter(|(_, status)| !status.is_terminal())
                .collect();
            let all_on_pass = pending.iter().all(|(_, status)| status.is_servable());
            if all_on_pass && pending.len() >= outstanding {
                ready.push((table.id, pending.into_iter().map(|(d, _)| d).collect()));
            }
        }
        for (table, dishes) in ready {
            for &dish in &dishes {
                if let Err(e) = system.mark_walking(dish) {
                    warn!(%dish, error = %e, "Expediter could not walk");
                }
            }
            if let Err(e) = system.serve(table, &dishes) {
                warn!(%table, error = %e, "Expediter could not serve");
            }
        }
    }
}
