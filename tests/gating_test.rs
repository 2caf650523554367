mod common;

use brigade::model::{DishStatus, MistakeKind, TableState};
use brigade::{EventKind, ServiceEvent};
use common::*;

#[test]
fn next_course_stays_locked_until_served_and_eaten() {
    let (mut system, recorder) = recorded_system();
    let ticket = system.seat_ticket(T1, courses(&[&["A"], &["C"]])).unwrap();
    let a = course_dishes(&system, ticket, 1)[0];
    let c = course_dishes(&system, ticket, 2)[0];

    // Locked course: firing is a no-op.
    system.fire(c).unwrap();
    assert_eq!(system.dish(c).unwrap().status, DishStatus::NotFired);

    system.fire(a).unwrap();
    steps(&mut system, 2, 1.0);
    system.mark_walking(a).unwrap();
    system.serve(T1, &[a]).unwrap();
    assert_eq!(system.table(T1).unwrap().state, TableState::Eating { course: 1 });

    // Served but not yet eaten.
    steps(&mut system, 3, 1.0);
    assert!(!system.ticket(ticket).unwrap().is_course_unlocked(2));
    assert_eq!(system.table(T1).unwrap().current_course, 1);
    system.fire(c).unwrap();
    assert_eq!(system.dish(c).unwrap().status, DishStatus::NotFired);

    system.step(1.0);
    assert!(system.ticket(ticket).unwrap().is_course_unlocked(2));
    let table = system.table(T1).unwrap();
    assert_eq!(table.current_course, 2);
    assert_eq!(table.state, TableState::Serving { course: 2 });
    assert_eq!(recorder.count(EventKind::CourseUnlocked), 1);

    system.fire(c).unwrap();
    assert_eq!(system.dish(c).unwrap().status, DishStatus::Cooking);

    // The pointer never moves back.
    steps(&mut system, 30, 1.0);
    assert!(system.table(T1).unwrap().current_course >= 2);
    assert!(system.ticket(ticket).unwrap().is_course_unlocked(2));
}

#[test]
fn course_served_ahead_is_premature_and_eaten_right_after_unlock() {
    let (mut system, recorder) = recorded_system();
    recorder.expect(EventKind::TicketCompleted).times(1);
    let ticket = system.seat_ticket(T1, courses(&[&["A"], &["C"]])).unwrap();

    system.serve_types(T1, &["C"]).unwrap();
    assert_eq!(system.mistakes().count(MistakeKind::PrematureDish), 1);
    assert!(system.table_order(T1).unwrap().is_course_complete(2));
    // Course 2 completing early does not move the gate.
    assert_eq!(system.table(T1).unwrap().state, TableState::Serving { course: 1 });

    system.serve_types(T1, &["A"]).unwrap();
    steps(&mut system, 4, 1.0);
    // Course 2 became current already complete, so eating starts at once.
    assert_eq!(system.table(T1).unwrap().state, TableState::Eating { course: 2 });
    assert!(system.ticket(ticket).unwrap().is_course_unlocked(2));

    steps(&mut system, 4, 1.0);
    assert_eq!(system.table(T1).unwrap().state, TableState::Complete);
    assert_eq!(system.mistakes().len(), 1);
    recorder.verify();
}

#[test]
fn unlock_events_follow_course_order() {
    let (mut system, recorder) = recorded_system();
    system
        .seat_ticket(T1, courses(&[&["A"], &["B"], &["C"]]))
        .unwrap();
    for course in ["A", "B", "C"] {
        system.serve_types(T1, &[course]).unwrap();
        steps(&mut system, 4, 1.0);
    }
    let unlocked: Vec<u32> = recorder
        .of_kind(EventKind::CourseUnlocked)
        .into_iter()
        .filter_map(|event| match event {
            ServiceEvent::CourseUnlocked { course, .. } => Some(course),
            _ => None,
        })
        .collect();
    assert_eq!(unlocked, vec![2, 3]);
    assert_eq!(system.table(T1).unwrap().state, TableState::Complete);
    assert!(system.mistakes().is_empty());
}

#[test]
fn demand_moved_onto_an_eaten_course_reopens_it() {
    let (mut system, recorder) = recorded_system();
    recorder.expect(EventKind::TicketCompleted).times(2);
    let ticket = system.seat_ticket(T1, courses(&[&["A"], &["B"]])).unwrap();
    system.seat_ticket(T2, courses(&[&["C"]])).unwrap();

    system.serve_types(T1, &["A"]).unwrap();
    assert_eq!(system.table(T1).unwrap().state, TableState::Eating { course: 1 });
    assert_eq!(system.transfer_demand(T2, T1, "C").unwrap(), 1);

    // Course 1 is incomplete again when its timer runs out.
    steps(&mut system, 4, 1.0);
    let table = system.table(T1).unwrap();
    assert_eq!(table.state, TableState::Serving { course: 1 });
    assert_eq!(table.current_course, 1);
    assert!(!system.ticket(ticket).unwrap().is_course_unlocked(2));
    assert_eq!(system.table(T2).unwrap().state, TableState::Complete);
    assert!(!system.is_all_served());

    system.serve_types(T1, &["B"]).unwrap();
    system.serve_types(T1, &["C"]).unwrap();
    assert_eq!(system.table(T1).unwrap().state, TableState::Eating { course: 1 });

    steps(&mut system, 4, 1.0);
    assert!(system.ticket(ticket).unwrap().is_course_unlocked(2));
    assert_eq!(system.table(T1).unwrap().state, TableState::Eating { course: 2 });

    steps(&mut system, 4, 1.0);
    assert_eq!(system.table(T1).unwrap().state, TableState::Complete);
    assert!(system.is_all_served());
    recorder.verify();
}
