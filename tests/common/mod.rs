#![allow(dead_code)]

use brigade::model::{DishCatalog, DishDefinition, DishId, TableId, TicketId};
use brigade::{ServiceConfig, ServiceEvent, ServiceSystem};
use brigade_framework::mock::EventRecorder;

/// A: stove 2s/5s, B: grill 3s/5s, C: stove 1s/5s, bread: cold 1s/10s (first course only).
pub fn catalog() -> DishCatalog {
    DishCatalog::new(vec![
        DishDefinition::new("A", "stove", 2.0, 5.0),
        DishDefinition::new("B", "grill", 3.0, 5.0),
        DishDefinition::new("C", "stove", 1.0, 5.0),
        DishDefinition::new("bread", "cold", 1.0, 10.0).first_course_only(),
    ])
}

pub fn config() -> ServiceConfig {
    ServiceConfig {
        table_count: 2,
        consumption_seconds: 4.0,
        ..ServiceConfig::default()
    }
}

pub fn system() -> ServiceSystem {
    ServiceSystem::new(config(), catalog()).expect("valid session")
}

/// A system with every event kind captured.
pub fn recorded_system() -> (ServiceSystem, EventRecorder<ServiceEvent>) {
    let mut system = system();
    let recorder = EventRecorder::new();
    for kind in brigade::EventKind::ALL {
        system.on_passive(kind, recorder.listener());
    }
    (system, recorder)
}

pub fn courses(layout: &[&[&str]]) -> Vec<Vec<String>> {
    layout.iter()
        .map(|course| course.iter().map(|t| t.to_string()).collect())
        .collect()
}

/// Dish instances of `course` in ticket order.
pub fn course_dishes(system: &ServiceSystem, ticket: TicketId, course: u32) -> Vec<DishId> {
    system
        .ticket(ticket)
        .and_then(|t| t.course(course))
        .map(|c| c.dishes.clone())
        .unwrap_or_default()
}

pub fn steps(system: &mut ServiceSystem, count: usize, raw_delta: f64) {
    for _ in 0..count {
        system.step(raw_delta);
    }
}

pub const T1: TableId = TableId(1);
pub const T2: TableId = TableId(2);
