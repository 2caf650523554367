//! Table order fulfillment.
//!
//! The [`OrderBook`] holds one [`TableOrder`] per seated table and resolves deliveries by dish
//! type. A served instance is checked only for being servable; which table it was fired for
//! does not matter.

use crate::dishes::{DishAction, DishStore};
use crate::events::{ServiceBus, ServiceEvent};
use crate::model::{DishCatalog, DishId, DishStatus, FulfillOutcome, TableId, TableOrder};
use crate::pass::PassCoordinator;
use crate::tables::TableStore;
use brigade_framework::Seconds;
use std::collections::HashMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: HashMap<TableId, TableOrder>,
}

/// Borrowed collaborators for one delivery.
pub struct ServiceContext<'a> {
    pub dishes: &'a mut DishStore,
    pub pass: &'a mut PassCoordinator,
    pub tables: &'a TableStore,
    pub catalog: &'a DishCatalog,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order: TableOrder) {
        self.orders.insert(order.table, order);
    }

    pub fn remove(&mut self, table: TableId) -> Option<TableOrder> {
        self.orders.remove(&table)
    }

    pub fn get(&self, table: TableId) -> Option<&TableOrder> {
        self.orders.get(&table)
    }

    pub fn get_mut(&mut self, table: TableId) -> Option<&mut TableOrder> {
        self.orders.get_mut(&table)
    }

    pub fn is_course_complete(&self, table: TableId, course: u32) -> bool {
        self.get(table).is_some_and(|o| o.is_course_complete(course))
    }

    pub fn is_complete(&self, table: TableId) -> bool {
        self.get(table).is_some_and(TableOrder::is_complete)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableOrder> + '_ {
        self.orders.values()
    }

    /// Serves `dishes` (instances) and `dish_types` (type-only) to `table` at `at`.
    ///
    /// Instances that are not on the pass or walking are skipped. Every delivered type emits
    /// `DishDelivered`; each course that became complete emits `CourseCompleted` once.
    pub fn deliver(
        &mut self,
        table: TableId,
        dishes: &[DishId],
        dish_types: &[String],
        at: Seconds,
        ctx: ServiceContext<'_>,
        bus: &mut ServiceBus,
    ) {
        let Some(order) = self.orders.get_mut(&table) else {
            warn!(%table, "Delivery to table without an order skipped");
            return;
        };
        let current_course = ctx.tables.get(table).map_or(0, |t| t.current_course);
        let was_complete: Vec<bool> = order.courses.iter().map(|c| c.is_complete()).collect();

        let mut delivered: Vec<(Option<DishId>, String)> = Vec::new();
        for &dish in dishes {
            let Some(instance) = ctx.dishes.get(dish) else {
                warn!(%dish, "Served dish does not exist");
                continue;
            };
            if !instance.status.is_servable() {
                debug!(%dish, status = ?instance.status, "Dish not servable, skipped");
                continue;
            }
            let dish_type = instance.dish.clone();
            match ctx.dishes.perform_action(dish, DishAction::Serve, ctx.catalog) {
                Ok(result) if result.transition().entered(DishStatus::Served) => {
                    ctx.pass.release(dish);
                    delivered.push((Some(dish), dish_type));
                }
                Ok(_) => {}
                Err(e) => warn!(%dish, error = %e, "Serve failed"),
            }
        }
        delivered.extend(dish_types.iter().map(|t| (None, t.clone())));

        for (dish, dish_type) in delivered {
            let (course, ahead) = match order.fulfill(&dish_type, at, current_course) {
                FulfillOutcome::Matched { course, ahead } => (Some(course), ahead),
                FulfillOutcome::NoMatch => (None, false),
            };
            info!(%table, dish_type = %dish_type, ?course, ahead, "Delivered");
            bus.publish(ServiceEvent::DishDelivered {
                table,
                dish,
                dish_type,
                course,
                ahead,
                at,
            });
        }

        for (course, was) in order.courses.iter().zip(was_complete) {
            if !was && course.is_complete() {
                info!(%table, course = course.number, "Course completed");
                bus.publish(ServiceEvent::CourseCompleted {
                    table,
                    ticket: order.ticket,
                    course: course.number,
                    at,
                });
            }
        }
    }
}
