//! The closed set of events exchanged during a service, and who handles each kind.

use crate::model::{DishBinding, DishId, Mistake, TableId, TicketId};
use brigade_framework::{BusEvent, EventBus, Seconds};

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    // Inbound
    /// Start cooking `dish` at `station`.
    Fire { dish: DishId, station: String },
    /// Create and fire an unbound instance of `dish_type`.
    FireAdHoc { dish_type: String },
    MarkWalking { dish: DishId },
    /// Deliver `dishes` (instances) and `dish_types` (type-only) to `table`.
    DishesServed {
        table: TableId,
        dishes: Vec<DishId>,
        dish_types: Vec<String>,
        at: Seconds,
    },

    // Outbound
    DishFired { dish: DishId, station: String },
    DishReady { dish: DishId, station: String },
    DishOnPass { dish: DishId },
    DishDied {
        dish: DishId,
        dish_type: String,
        binding: Option<DishBinding>,
        at: Seconds,
    },
    /// One dish type reached `table`. `course` is `None` when nothing in the order matched.
    DishDelivered {
        table: TableId,
        dish: Option<DishId>,
        dish_type: String,
        course: Option<u32>,
        ahead: bool,
        at: Seconds,
    },
    CourseCompleted {
        table: TableId,
        ticket: TicketId,
        course: u32,
        at: Seconds,
    },
    CourseUnlocked {
        table: TableId,
        ticket: TicketId,
        course: u32,
        at: Seconds,
    },
    TicketCreated {
        table: TableId,
        ticket: TicketId,
        courses: u32,
    },
    TicketCompleted {
        table: TableId,
        ticket: TicketId,
        at: Seconds,
    },
    AllTablesServed { at: Seconds },
    DishReassigned {
        dish: DishId,
        from: Option<TableId>,
        to: TableId,
    },
    MistakeRecorded(Mistake),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Fire,
    FireAdHoc,
    MarkWalking,
    DishesServed,
    DishFired,
    DishReady,
    DishOnPass,
    DishDied,
    DishDelivered,
    CourseCompleted,
    CourseUnlocked,
    TicketCreated,
    TicketCompleted,
    AllTablesServed,
    DishReassigned,
    MistakeRecorded,
}

impl EventKind {
    pub const ALL: [EventKind; 16] = [
        EventKind::Fire,
        EventKind::FireAdHoc,
        EventKind::MarkWalking,
        EventKind::DishesServed,
        EventKind::DishFired,
        EventKind::DishReady,
        EventKind::DishOnPass,
        EventKind::DishDied,
        EventKind::DishDelivered,
        EventKind::CourseCompleted,
        EventKind::CourseUnlocked,
        EventKind::TicketCreated,
        EventKind::TicketCompleted,
        EventKind::AllTablesServed,
        EventKind::DishReassigned,
        EventKind::MistakeRecorded,
    ];

    /// Kinds a caller may hand to [`ServiceSystem::submit`](crate::ServiceSystem::submit).
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            EventKind::Fire | EventKind::FireAdHoc | EventKind::MarkWalking | EventKind::DishesServed
        )
    }
}

impl BusEvent for ServiceEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            ServiceEvent::Fire { .. } => EventKind::Fire,
            ServiceEvent::FireAdHoc { .. } => EventKind::FireAdHoc,
            ServiceEvent::MarkWalking { .. } => EventKind::MarkWalking,
            ServiceEvent::DishesServed { .. } => EventKind::DishesServed,
            ServiceEvent::DishFired { .. } => EventKind::DishFired,
            ServiceEvent::DishReady { .. } => EventKind::DishReady,
            ServiceEvent::DishOnPass { .. } => EventKind::DishOnPass,
            ServiceEvent::DishDied { .. } => EventKind::DishDied,
            ServiceEvent::DishDelivered { .. } => EventKind::DishDelivered,
            ServiceEvent::CourseCompleted { .. } => EventKind::CourseCompleted,
            ServiceEvent::CourseUnlocked { .. } => EventKind::CourseUnlocked,
            ServiceEvent::TicketCreated { .. } => EventKind::TicketCreated,
            ServiceEvent::TicketCompleted { .. } => EventKind::TicketCompleted,
            ServiceEvent::AllTablesServed { .. } => EventKind::AllTablesServed,
            ServiceEvent::DishReassigned { .. } => EventKind::DishReassigned,
            ServiceEvent::MistakeRecorded(_) => EventKind::MistakeRecorded,
        }
    }
}

/// Engine components that handle events. Routed by an exhaustive match in the service loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Stations,
    Pass,
    OrderBook,
    Gate,
    Auditor,
    Lifecycle,
}

pub type ServiceBus = EventBus<ServiceEvent, Component>;

/// Builds the bus with the engine's fixed subscriptions.
pub fn wire() -> ServiceBus {
    let mut bus = ServiceBus::new();
    bus.subscribe(EventKind::Fire, Component::Stations);
    bus.subscribe(EventKind::FireAdHoc, Component::Lifecycle);
    bus.subscribe(EventKind::MarkWalking, Component::Pass);
    bus.subscribe(EventKind::DishReady, Component::Pass);
    bus.subscribe(EventKind::DishesServed, Component::OrderBook);
    bus.subscribe(EventKind::DishDelivered, Component::Auditor);
    bus.subscribe(EventKind::DishDied, Component::Auditor);
    bus.subscribe(EventKind::CourseCompleted, Component::Gate);
    bus.subscribe(EventKind::CourseCompleted, Component::Auditor);
    bus.subscribe(EventKind::TicketCompleted, Component::Lifecycle);
    bus
}
