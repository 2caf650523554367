use crate::auditor::{Delivery, MistakeAuditor};
use crate::config::ServiceConfig;
use crate::dishes::{DishAction, DishStore};
use crate::error::ServiceError;
use crate::events::{self, Component, EventKind, ServiceBus, ServiceEvent};
use crate::fulfillment::{OrderBook, ServiceContext};
use crate::gate::CourseGate;
use crate::model::{
    DishBinding, DishCatalog, DishCreate, DishId, DishInstance, MistakeKind, MistakeLedger,
    Table, TableId, TableOrder, Ticket, TicketCreate, TicketId, TicketStatus,
};
use crate::pass::PassCoordinator;
use crate::station::StationCoordinator;
use crate::tickets::{TicketAction, TicketComposer, TicketStore};
use brigade_framework::{BusEvent, Clock, PassiveListener, Seconds, Tick};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Upper bound on deliveries handled by one drain. Hitting it means an event loop.
const MAX_DELIVERIES_PER_DRAIN: usize = 10_000;

/// Outcome of [`ServiceSystem::reassign_dish`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReassignOutcome {
    /// The dish now belongs to the target table, for `course`.
    Accepted { course: u32 },
    /// The target does not need the dish's type. Nothing changed.
    Rejected { reason: String },
}

/// The session orchestrator.
///
/// `ServiceSystem` is responsible for:
/// - **Ownership**: the clock, the event bus, every store and every coordinator
/// - **Wiring**: routing each delivered event to the components subscribed to its kind
/// - **Stepping**: advancing time through stations, the pass and the gate in a fixed order
///
/// # Architecture
///
/// Components never hold references to each other. Each handler borrows exactly the stores it
/// needs from the system for the duration of one delivery, and publishes follow-up events on
/// the bus. [`ServiceSystem::step`] and every inbound operation drain the bus before returning.
///
/// # Example
///
/// ```
/// use brigade::model::{DishCatalog, DishDefinition, TableId};
/// use brigade::{ServiceConfig, ServiceSystem};
///
/// let catalog = DishCatalog::new(vec![DishDefinition::new("soup", "stove", 2.0, 10.0)]);
/// let mut system = ServiceSystem::new(ServiceConfig::default(), catalog).unwrap();
///
/// let ticket = system.seat_ticket(TableId(1), vec![vec!["soup".into()]]).unwrap();
/// let soup = system.ticket(ticket).unwrap().courses[0].dishes[0];
/// system.fire(soup).unwrap();
/// system.step(2.0);
/// system.mark_walking(soup).unwrap();
/// system.serve(TableId(1), &[soup]).unwrap();
///
/// assert!(system.table_order(TableId(1)).unwrap().is_complete());
/// ```
pub struct ServiceSystem {
    config: ServiceConfig,
    catalog: DishCatalog,
    clock: Clock,
    bus: ServiceBus,
    dishes: DishStore,
    tickets: TicketStore,
    stations: Vec<StationCoordinator>,
    pass: PassCoordinator,
    orders: OrderBook,
    gate: CourseGate,
    auditor: MistakeAuditor,
    composer: TicketComposer,
    all_served: bool,
}

impl ServiceSystem {
    /// Creates a session with `config.table_count` idle tables and one station per catalog
    /// station.
    pub fn new(config: ServiceConfig, catalog: DishCatalog) -> Result<Self, ServiceError> {
        config.validate()?;
        catalog.validate()?;
        let tables = crate::tables::new(config.table_count, config.table_capacity)?;
        let stations = catalog
            .stations()
            .into_iter()
            .map(StationCoordinator::new)
            .collect();
        let composer = TicketComposer::new(
            config.seed,
            config.min_courses,
            config.max_courses,
            config.max_dishes_per_ticket,
        );
        info!(
            tables = config.table_count,
            dishes = catalog.len(),
            seed = config.seed,
            "Service opened"
        );
        Ok(Self {
            clock: Clock::new(config.initial_speed),
            bus: events::wire(),
            dishes: crate::dishes::new(),
            tickets: crate::tickets::new(),
            stations,
            pass: PassCoordinator::new(),
            orders: OrderBook::new(),
            gate: CourseGate::new(tables),
            auditor: MistakeAuditor::new(),
            composer,
            all_served: false,
            config,
            catalog,
        })
    }

    // =========================================================================
    // Seating
    // =========================================================================

    /// Seats a party with a randomly composed ticket.
    #[instrument(skip(self))]
    pub fn seat_party(&mut self, table: TableId, party_size: u32) -> Result<TicketId, ServiceError> {
        let capacity = self.require_free_table(table)?.capacity;
        if party_size > capacity {
            return Err(ServiceError::PartyTooLarge {
                table,
                party: party_size,
                capacity,
            });
        }
        let courses = self.composer.compose(party_size, &self.catalog);
        self.seat_ticket(table, courses)
    }

    /// Seats a ticket with a fixed composition: dish type names per course.
    #[instrument(skip(self))]
    pub fn seat_ticket(
        &mut self,
        table: TableId,
        courses: Vec<Vec<String>>,
    ) -> Result<TicketId, ServiceError> {
        self.require_free_table(table)?;
        if let Some(unknown) = courses.iter().flatten().find(|t| !self.catalog.contains(t)) {
            return Err(ServiceError::UnknownDishType(unknown.clone()));
        }

        let ticket_id = self.tickets.create(
            TicketCreate {
                table,
                created_at: self.clock.now(),
                courses,
                consumption_seconds: self.config.consumption_seconds,
            },
            &self.catalog,
        )?;
        let ticket = self.tickets.require(ticket_id)?.clone();

        for course in &ticket.courses {
            for dish_type in &course.dish_types {
                let binding = DishBinding {
                    ticket: ticket_id,
                    table,
                    course: course.number,
                };
                let dish = self.dishes.create(
                    DishCreate {
                        dish: dish_type.clone(),
                        binding: Some(binding),
                    },
                    &self.catalog,
                )?;
                self.tickets.perform_action(
                    ticket_id,
                    TicketAction::AttachDish {
                        course: course.number,
                        dish,
                    },
                    &self.catalog,
                )?;
            }
        }

        self.orders.insert(TableOrder::from_ticket(&ticket));
        self.gate.seat(table, ticket_id, ticket.course_count())?;
        self.all_served = false;
        info!(%table, ticket = %ticket_id, courses = ticket.course_count(), "Ticket seated");
        self.bus.publish(ServiceEvent::TicketCreated {
            table,
            ticket: ticket_id,
            courses: ticket.course_count(),
        });
        self.drain();
        Ok(ticket_id)
    }

    /// Releases a table. An unfinished ticket is abandoned.
    #[instrument(skip(self))]
    pub fn clear_table(&mut self, table: TableId) -> Result<(), ServiceError> {
        let ticket = self
            .gate
            .table(table)
            .ok_or(ServiceError::UnknownTable(table))?
            .ticket;
        if let Some(ticket) = ticket {
            if self.tickets.get(ticket).is_some_and(Ticket::is_active) {
                warn!(%table, %ticket, "Clearing table with an unfinished ticket");
                self.tickets
                    .perform_action(ticket, TicketAction::Abandon, &self.catalog)?;
            }
        }
        self.orders.remove(table);
        self.gate.clear(table)?;
        info!(%table, "Table cleared");
        // Abandoning the last unfinished ticket can end the service.
        self.check_all_served(self.clock.now());
        self.drain();
        Ok(())
    }

    // =========================================================================
    // Inbound events
    // =========================================================================

    /// Accepts an inbound event and dispatches it, with everything it triggers, before
    /// returning.
    pub fn submit(&mut self, event: ServiceEvent) -> Result<(), ServiceError> {
        let kind = event.kind();
        if !kind.is_inbound() {
            return Err(ServiceError::NotInbound(kind));
        }
        match &event {
            ServiceEvent::Fire { dish, .. } | ServiceEvent::MarkWalking { dish } => {
                self.require_dish(*dish)?;
            }
            ServiceEvent::FireAdHoc { dish_type } => {
                if !self.catalog.contains(dish_type) {
                    return Err(ServiceError::UnknownDishType(dish_type.clone()));
                }
            }
            ServiceEvent::DishesServed { table, .. } => {
                self.gate
                    .table(*table)
                    .ok_or(ServiceError::UnknownTable(*table))?;
            }
            _ => {}
        }
        debug!(?event, "Submitted");
        self.bus.publish(event);
        self.drain();
        Ok(())
    }

    /// Fires `dish` at the station that cooks it.
    pub fn fire(&mut self, dish: DishId) -> Result<(), ServiceError> {
        let station = self.require_dish(dish)?.station.clone();
        self.submit(ServiceEvent::Fire { dish, station })
    }

    pub fn fire_ad_hoc(&mut self, dish_type: impl Into<String>) -> Result<(), ServiceError> {
        self.submit(ServiceEvent::FireAdHoc {
            dish_type: dish_type.into(),
        })
    }

    pub fn mark_walking(&mut self, dish: DishId) -> Result<(), ServiceError> {
        self.submit(ServiceEvent::MarkWalking { dish })
    }

    /// Serves dish instances to `table` together, at the current clock time.
    pub fn serve(&mut self, table: TableId, dishes: &[DishId]) -> Result<(), ServiceError> {
        self.submit(ServiceEvent::DishesServed {
            table,
            dishes: dishes.to_vec(),
            dish_types: Vec::new(),
            at: self.clock.now(),
        })
    }

    /// Serves dish types without instances, at the current clock time.
    pub fn serve_types(&mut self, table: TableId, dish_types: &[&str]) -> Result<(), ServiceError> {
        self.submit(ServiceEvent::DishesServed {
            table,
            dishes: Vec::new(),
            dish_types: dish_types.iter().map(|t| t.to_string()).collect(),
            at: self.clock.now(),
        })
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advances the clock by `raw_delta` real seconds, then stations, the pass and the gate,
    /// draining the bus after each.
    pub fn step(&mut self, raw_delta: Seconds) -> Tick {
        let tick = self.clock.advance(raw_delta);

        for station in self.stations.iter_mut() {
            station.tick(tick.delta, &mut self.dishes, &self.catalog, &mut self.bus);
        }
        self.drain();

        self.pass.tick(
            tick.delta,
            tick.now,
            &mut self.dishes,
            &self.catalog,
            &mut self.bus,
        );
        self.drain();

        self.gate.tick(
            tick.delta,
            tick.now,
            &mut self.tickets,
            &self.orders,
            &self.catalog,
            &mut self.bus,
        );
        self.drain();
        tick
    }

    /// Sets the speed multiplier, clamped. Returns the applied value.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.clock.set_speed(speed)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    // =========================================================================
    // Reassignment
    // =========================================================================

    /// Moves a dish instance to another table if that table still needs its type.
    #[instrument(skip(self))]
    pub fn reassign_dish(
        &mut self,
        dish: DishId,
        to: TableId,
    ) -> Result<ReassignOutcome, ServiceError> {
        let instance = self.require_dish(dish)?;
        let dish_type = instance.dish.clone();
        let previous = instance.binding;
        let status = instance.status;
        if self.gate.table(to).is_none() {
            return Err(ServiceError::UnknownTable(to));
        }
        if status.is_terminal() {
            let reason = format!("{dish} is already {status:?}");
            warn!(%dish, %to, %reason, "Reassignment rejected");
            return Ok(ReassignOutcome::Rejected { reason });
        }
        let order = self.orders.get(to).ok_or(ServiceError::NoOrder(to))?;

        let Some(course) = order
            .courses
            .iter()
            .find(|c| c.expectations.iter().any(|e| !e.served && e.dish_type == dish_type))
            .map(|c| c.number)
        else {
            let reason = format!("{to} has no outstanding {dish_type}");
            warn!(%dish, %to, %reason, "Reassignment rejected");
            return Ok(ReassignOutcome::Rejected { reason });
        };
        let binding = DishBinding {
            ticket: order.ticket,
            table: to,
            course,
        };

        if let Some(previous) = previous {
            self.tickets.perform_action(
                previous.ticket,
                TicketAction::DetachDish(dish),
                &self.catalog,
            )?;
        }
        self.tickets.perform_action(
            binding.ticket,
            TicketAction::AttachDish { course, dish },
            &self.catalog,
        )?;
        self.dishes
            .perform_action(dish, DishAction::Rebind(binding), &self.catalog)?;

        info!(%dish, %to, course, "Dish reassigned");
        self.bus.publish(ServiceEvent::DishReassigned {
            dish,
            from: previous.map(|b| b.table),
            to,
        });
        self.drain();
        Ok(ReassignOutcome::Accepted { course })
    }

    /// Moves one unit of unserved `dish_type` demand from `from` to the current course of `to`.
    /// Returns the course it was added to.
    #[instrument(skip(self))]
    pub fn transfer_demand(
        &mut self,
        from: TableId,
        to: TableId,
        dish_type: &str,
    ) -> Result<u32, ServiceError> {
        for table in [from, to] {
            if self.gate.table(table).is_none() {
                return Err(ServiceError::UnknownTable(table));
            }
        }
        let Some(target_course) = self
            .gate
            .table(to)
            .filter(|t| t.occupied && !t.is_complete())
            .map(|t| t.current_course)
        else {
            return Err(ServiceError::NoOrder(to));
        };
        let source = self.orders.get(from).ok_or(ServiceError::NoOrder(from))?;
        let source_ticket = source.ticket;
        if !source.has_unserved(dish_type) {
            return Err(ServiceError::NoOutstandingDemand {
                table: from,
                dish_type: dish_type.to_string(),
            });
        }
        if self.orders.get(to).is_none() {
            return Err(ServiceError::NoOrder(to));
        }

        let source = self.orders.get_mut(from).ok_or(ServiceError::NoOrder(from))?;
        let removed_from = source.remove_unserved(dish_type);
        let now_complete = removed_from.filter(|&c| source.is_course_complete(c));
        let added = self
            .orders
            .get_mut(to)
            .is_some_and(|target| target.add_expectation(target_course, dish_type));
        if !added {
            warn!(%to, course = target_course, dish_type, "Target course missing, demand dropped");
        }
        info!(%from, %to, dish_type, course = target_course, "Demand transferred");

        // Removing the last outstanding expectation completes the source course.
        if let Some(course) = now_complete {
            self.bus.publish(ServiceEvent::CourseCompleted {
                table: from,
                ticket: source_ticket,
                course,
                at: self.clock.now(),
            });
        }
        self.drain();
        Ok(target_course)
    }

    /// Sweeps every completed course for staggered service. Already-checked courses are skipped.
    pub fn audit_completed_courses(&mut self) {
        self.auditor
            .audit_completed_courses(self.clock.now(), &self.orders, &mut self.bus);
        self.drain();
    }

    // =========================================================================
    // Observers & accessors
    // =========================================================================

    /// Registers an external observer for one event kind.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener<ServiceEvent>) {
        self.bus.on_passive(kind, listener);
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DishCatalog {
        &self.catalog
    }

    pub fn now(&self) -> Seconds {
        self.clock.now()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn table_order(&self, table: TableId) -> Option<&TableOrder> {
        self.orders.get(table)
    }

    /// Every table in table order, with occupancy and eating state.
    pub fn tables(&self) -> Vec<&Table> {
        self.gate.tables().iter().collect()
    }

    pub fn table(&self, table: TableId) -> Option<&Table> {
        self.gate.table(table)
    }

    pub fn ticket(&self, ticket: TicketId) -> Option<&Ticket> {
        self.tickets.get(ticket)
    }

    pub fn dish(&self, dish: DishId) -> Option<&DishInstance> {
        self.dishes.get(dish)
    }

    pub fn dishes(&self) -> impl Iterator<Item = &DishInstance> + '_ {
        self.dishes.iter()
    }

    pub fn stations(&self) -> &[StationCoordinator] {
        &self.stations
    }

    pub fn pass(&self) -> &PassCoordinator {
        &self.pass
    }

    pub fn mistakes(&self) -> &MistakeLedger {
        self.auditor.ledger()
    }

    pub fn mistake_counts(&self) -> BTreeMap<MistakeKind, usize> {
        self.auditor.ledger().counts_by_kind()
    }

    pub fn active_tickets(&self) -> usize {
        self.tickets.iter().filter(|t| t.is_active()).count()
    }

    /// True once every seated ticket has completed, until the next seating.
    pub fn is_all_served(&self) -> bool {
        self.all_served
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Announces the end of service once no ticket is active and at least one was completed.
    fn check_all_served(&mut self, now: Seconds) {
        let any_completed = self
            .tickets
            .iter()
            .any(|t| t.status == TicketStatus::Completed);
        if !self.all_served && any_completed && self.active_tickets() == 0 {
            self.all_served = true;
            info!(at = now, "All tables served");
            self.bus.publish(ServiceEvent::AllTablesServed { at: now });
        }
    }

    fn drain(&mut self) {
        let mut handled = 0usize;
        while let Some(delivery) = self.bus.next_delivery() {
            handled += 1;
            if handled > MAX_DELIVERIES_PER_DRAIN {
                let dropped = self.bus.discard_pending() + 1;
                warn!(dropped, "Delivery limit reached, discarding pending events");
                return;
            }
            for component in delivery.subscribers {
                self.route(component, &delivery.event);
            }
        }
    }

    fn route(&mut self, component: Component, event: &ServiceEvent) {
        let now = self.clock.now();
        match (component, event) {
            (Component::Stations, ServiceEvent::Fire { dish, station }) => {
                match self.stations.iter_mut().find(|s| s.name() == station.as_str()) {
                    Some(coordinator) => {
                        coordinator.fire(
                            *dish,
                            &mut self.dishes,
                            &self.tickets,
                            &self.catalog,
                            &mut self.bus,
                        );
                    }
                    None => warn!(%dish, %station, "Fire for unknown station skipped"),
                }
            }
            (Component::Pass, ServiceEvent::DishReady { dish, .. }) => {
                self.pass.receive(*dish, &mut self.bus);
            }
            (Component::Pass, ServiceEvent::MarkWalking { dish }) => {
                self.pass.mark_walking(*dish, &mut self.dishes, &self.catalog);
            }
            (
                Component::OrderBook,
                ServiceEvent::DishesServed {
                    table,
                    dishes,
                    dish_types,
                    at,
                },
            ) => {
                let ctx = ServiceContext {
                    dishes: &mut self.dishes,
                    pass: &mut self.pass,
                    tables: self.gate.tables(),
                    catalog: &self.catalog,
                };
                self.orders
                    .deliver(*table, dishes, dish_types, *at, ctx, &mut self.bus);
            }
            (Component::Gate, ServiceEvent::CourseCompleted { table, .. }) => {
                self.gate
                    .on_course_completed(*table, now, &self.orders, &self.tickets);
            }
            (Component::Auditor, ServiceEvent::CourseCompleted { table, course, at, .. }) => {
                self.auditor
                    .on_course_completed(*table, *course, *at, &self.orders, &mut self.bus);
            }
            (
                Component::Auditor,
                ServiceEvent::DishDied {
                    dish,
                    dish_type,
                    binding,
                    at,
                },
            ) => {
                self.auditor
                    .on_dish_died(*dish, dish_type, *binding, *at, &mut self.bus);
            }
            (
                Component::Auditor,
                ServiceEvent::DishDelivered {
                    table,
                    dish,
                    dish_type,
                    course,
                    ahead,
                    at,
                },
            ) => {
                let delivery = Delivery {
                    table: *table,
                    dish: *dish,
                    dish_type,
                    course: *course,
                    ahead: *ahead,
                    at: *at,
                };
                self.auditor
                    .on_dish_delivered(delivery, &self.orders, &self.tickets, &mut self.bus);
            }
            (Component::Lifecycle, ServiceEvent::FireAdHoc { dish_type }) => {
                self.fire_unbound(dish_type);
            }
            (Component::Lifecycle, ServiceEvent::TicketCompleted { .. }) => {
                self.check_all_served(now);
            }
            (component, event) => {
                debug!(?component, kind = ?event.kind(), "No handler");
            }
        }
    }

    fn fire_unbound(&mut self, dish_type: &str) {
        let created = self.dishes.create(
            DishCreate {
                dish: dish_type.to_string(),
                binding: None,
            },
            &self.catalog,
        );
        match created {
            Ok(dish) => {
                let station = self
                    .dishes
                    .get(dish)
                    .map(|d| d.station.clone())
                    .unwrap_or_default();
                self.bus.publish(ServiceEvent::Fire { dish, station });
            }
            Err(e) => warn!(dish_type, error = %e, "Ad hoc fire skipped"),
        }
    }

    fn require_free_table(&self, table: TableId) -> Result<&Table, ServiceError> {
        let found = self
            .gate
            .table(table)
            .ok_or(ServiceError::UnknownTable(table))?;
        if found.occupied {
            return Err(ServiceError::TableOccupied(table));
        }
        Ok(found)
    }

    fn require_dish(&self, dish: DishId) -> Result<&DishInstance, ServiceError> {
        self.dishes.get(dish).ok_or(ServiceError::UnknownDish(dish))
    }
}
