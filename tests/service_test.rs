mod common;

use brigade::model::{DishStatus, MistakeKind, TableState};
use brigade::{EventKind, ServiceError, ServiceEvent};
use common::*;

/// One course of {A, B}: fire, cook, walk, serve together.
#[test]
fn single_course_served_together_completes_cleanly() {
    let (mut system, recorder) = recorded_system();
    recorder.expect(EventKind::TicketCompleted).times(1);
    recorder.expect(EventKind::AllTablesServed).times(1);
    recorder.expect(EventKind::MistakeRecorded).never();

    let ticket = system.seat_ticket(T1, courses(&[&["A", "B"]])).unwrap();
    let dishes = course_dishes(&system, ticket, 1);
    assert_eq!(dishes.len(), 2);
    for &dish in &dishes {
        system.fire(dish).unwrap();
    }

    // A cooks in 2s, B in 3s.
    steps(&mut system, 3, 1.0);
    for &dish in &dishes {
        assert_eq!(system.dish(dish).unwrap().status, DishStatus::OnPass);
        system.mark_walking(dish).unwrap();
    }
    system.serve(T1, &dishes).unwrap();

    assert!(system.table_order(T1).unwrap().is_complete());
    assert_eq!(
        system.table(T1).unwrap().state,
        TableState::Eating { course: 1 }
    );
    assert!(system.pass().holding().is_empty());

    steps(&mut system, 4, 1.0);
    assert_eq!(system.table(T1).unwrap().state, TableState::Complete);
    assert!(!system.ticket(ticket).unwrap().is_active());
    assert!(system.is_all_served());
    assert!(system.mistakes().is_empty());
    recorder.verify();
}

/// Same ticket, but A is left on the pass until it dies.
#[test]
fn dish_left_on_the_pass_dies_and_blocks_completion() {
    let (mut system, recorder) = recorded_system();
    recorder.expect(EventKind::DishDied).times(1);
    recorder.expect(EventKind::TicketCompleted).never();

    let ticket = system.seat_ticket(T1, courses(&[&["A", "B"]])).unwrap();
    let dishes = course_dishes(&system, ticket, 1);
    let (a, b) = (dishes[0], dishes[1]);
    system.fire(a).unwrap();
    system.fire(b).unwrap();

    // A reaches the pass at t=2 and decays for 5s from the next step.
    steps(&mut system, 3, 1.0);
    system.mark_walking(b).unwrap();
    steps(&mut system, 4, 1.0);

    assert_eq!(system.dish(a).unwrap().status, DishStatus::Dead);
    assert_eq!(system.dish(b).unwrap().status, DishStatus::Walking);
    assert!(!system.pass().holds(a));

    system.serve(T1, &[a, b]).unwrap();
    let order = system.table_order(T1).unwrap();
    assert!(!order.is_complete());
    assert!(order.has_unserved("A"));
    assert!(!order.has_unserved("B"));

    assert_eq!(system.mistakes().len(), 1);
    assert_eq!(system.mistakes().count(MistakeKind::DeadDish), 1);
    let mistake = &system.mistakes().entries()[0];
    assert_eq!(mistake.dish, Some(a));
    assert_eq!(mistake.table, Some(T1));

    steps(&mut system, 20, 1.0);
    assert_eq!(system.table(T1).unwrap().state, TableState::Serving { course: 1 });
    recorder.verify();
}

#[test]
fn pause_and_speed_drive_every_timer() {
    let mut system = system();
    let ticket = system.seat_ticket(T1, courses(&[&["B"]])).unwrap();
    let b = course_dishes(&system, ticket, 1)[0];
    system.fire(b).unwrap();

    system.set_paused(true);
    assert!(system.clock().is_paused());
    steps(&mut system, 10, 1.0);
    assert_eq!(system.now(), 0.0);
    assert_eq!(system.dish(b).unwrap().status, DishStatus::Cooking);

    system.set_paused(false);
    assert_eq!(system.set_speed(1000.0), brigade_framework::MAX_SPEED);
    assert_eq!(system.set_speed(3.0), 3.0);
    assert_eq!(system.clock().speed(), 3.0);
    system.step(1.0);
    assert_eq!(system.now(), 3.0);
    assert_eq!(system.dish(b).unwrap().status, DishStatus::OnPass);
}

#[test]
fn ad_hoc_fire_creates_an_unbound_dish() {
    let (mut system, recorder) = recorded_system();
    system.fire_ad_hoc("C").unwrap();
    let fired = recorder.of_kind(EventKind::DishFired);
    assert_eq!(fired.len(), 1);
    let ServiceEvent::DishFired { dish, station } = &fired[0] else {
        panic!("unexpected event {:?}", fired[0]);
    };
    assert_eq!(station, "stove");
    assert!(system.dish(*dish).unwrap().binding.is_none());

    system.step(1.0);
    assert_eq!(system.dish(*dish).unwrap().status, DishStatus::OnPass);
}

#[test]
fn outer_api_misuse_returns_typed_errors() {
    let mut system = system();
    assert!(matches!(
        system.seat_ticket(brigade::model::TableId(9), courses(&[&["A"]])),
        Err(ServiceError::UnknownTable(_))
    ));
    assert!(matches!(
        system.seat_ticket(T1, courses(&[&["pie"]])),
        Err(ServiceError::UnknownDishType(t)) if t == "pie"
    ));
    system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    assert!(matches!(
        system.seat_party(T1, 2),
        Err(ServiceError::TableOccupied(_))
    ));
    assert!(matches!(
        system.seat_party(T2, 99),
        Err(ServiceError::PartyTooLarge { party: 99, .. })
    ));
    assert!(matches!(
        system.submit(ServiceEvent::AllTablesServed { at: 0.0 }),
        Err(ServiceError::NotInbound(EventKind::AllTablesServed))
    ));
    assert!(matches!(
        system.fire(brigade::model::DishId(404)),
        Err(ServiceError::UnknownDish(_))
    ));
    assert!(matches!(
        system.fire_ad_hoc("pie"),
        Err(ServiceError::UnknownDishType(_))
    ));
}

#[test]
fn clearing_an_unfinished_table_abandons_its_ticket() {
    let mut system = system();
    let ticket = system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    system.clear_table(T1).unwrap();

    assert!(!system.ticket(ticket).unwrap().is_active());
    assert!(system.table_order(T1).is_none());
    let table = system.table(T1).unwrap();
    assert!(!table.occupied);
    assert_eq!(table.state, TableState::Idle);
    // Nothing was ever served.
    assert!(!system.is_all_served());

    // The table can be seated again.
    system.seat_ticket(T1, courses(&[&["B"]])).unwrap();
    assert_eq!(system.active_tickets(), 1);
}

#[test]
fn clearing_the_last_unfinished_table_ends_the_service() {
    let (mut system, recorder) = recorded_system();
    recorder.expect(EventKind::AllTablesServed).times(1);
    system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    system.seat_ticket(T2, courses(&[&["B"]])).unwrap();

    system.serve_types(T1, &["A"]).unwrap();
    steps(&mut system, 4, 1.0);
    assert_eq!(system.table(T1).unwrap().state, TableState::Complete);
    assert!(!system.is_all_served());

    system.clear_table(T2).unwrap();
    assert_eq!(system.active_tickets(), 0);
    assert!(system.is_all_served());
    recorder.verify();
}
