mod common;

use brigade::model::{DishStatus, MistakeKind};
use brigade::{EventKind, ReassignOutcome, ServiceEvent};
use common::*;

#[test]
fn same_timestamp_service_is_not_staggered() {
    let mut system = system();
    system.seat_ticket(T1, courses(&[&["A", "C"]])).unwrap();
    system.serve_types(T1, &["A", "C"]).unwrap();
    system.audit_completed_courses();
    assert_eq!(system.mistakes().count(MistakeKind::StaggeredCourse), 0);
}

#[test]
fn two_timestamps_are_staggered_exactly_once() {
    let (mut system, recorder) = recorded_system();
    system.seat_ticket(T1, courses(&[&["A", "C"]])).unwrap();
    system.serve_types(T1, &["A"]).unwrap();
    system.step(1.0);
    system.serve_types(T1, &["C"]).unwrap();

    assert_eq!(system.mistakes().count(MistakeKind::StaggeredCourse), 1);
    system.audit_completed_courses();
    system.audit_completed_courses();
    assert_eq!(system.mistakes().count(MistakeKind::StaggeredCourse), 1);
    assert_eq!(recorder.count(EventKind::MistakeRecorded), 1);
    assert_eq!(
        system.mistake_counts().get(&MistakeKind::StaggeredCourse),
        Some(&1)
    );
}

#[test]
fn unordered_type_is_a_wrong_table_mistake() {
    let mut system = system();
    system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    system.seat_ticket(T2, courses(&[&["B"]])).unwrap();

    system.serve_types(T1, &["B"]).unwrap();
    assert_eq!(system.mistakes().count(MistakeKind::WrongTable), 1);
    assert!(!system.table_order(T1).unwrap().is_complete());

    // A second A is extra, not wrong: the table did order A.
    system.serve_types(T1, &["A"]).unwrap();
    system.serve_types(T1, &["A"]).unwrap();
    assert_eq!(system.mistakes().count(MistakeKind::WrongTable), 1);
}

#[test]
fn fulfillment_is_idempotent_per_expectation() {
    let (mut system, recorder) = recorded_system();
    system.seat_ticket(T1, courses(&[&["A", "A"]])).unwrap();
    system.serve_types(T1, &["A", "A", "A"]).unwrap();

    let matched = recorder
        .of_kind(EventKind::DishDelivered)
        .into_iter()
        .filter(|event| matches!(event, ServiceEvent::DishDelivered { course: Some(_), .. }))
        .count();
    assert_eq!(matched, 2);
    assert_eq!(recorder.count(EventKind::CourseCompleted), 1);
    assert!(system.mistakes().is_empty());
}

#[test]
fn reassignment_succeeds_exactly_once_after_demand_transfer() {
    let (mut system, recorder) = recorded_system();
    let first = system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    let second = system.seat_ticket(T2, courses(&[&["B"]])).unwrap();
    let a = course_dishes(&system, first, 1)[0];

    let rejected = system.reassign_dish(a, T2).unwrap();
    assert!(matches!(rejected, ReassignOutcome::Rejected { .. }));
    assert_eq!(system.dish(a).unwrap().table(), Some(T1));

    assert_eq!(system.transfer_demand(T1, T2, "A").unwrap(), 1);
    assert!(!system.table_order(T1).unwrap().has_unserved("A"));
    assert!(system.table_order(T2).unwrap().has_unserved("A"));

    assert_eq!(
        system.reassign_dish(a, T2).unwrap(),
        ReassignOutcome::Accepted { course: 1 }
    );
    assert_eq!(system.dish(a).unwrap().table(), Some(T2));
    assert_eq!(system.ticket(second).unwrap().course_of_dish(a), Some(1));
    assert_eq!(system.ticket(first).unwrap().course_of_dish(a), None);
    assert_eq!(recorder.count(EventKind::DishReassigned), 1);

    system.fire(a).unwrap();
    steps(&mut system, 2, 1.0);
    assert_eq!(system.dish(a).unwrap().status, DishStatus::OnPass);
    system.serve(T2, &[a]).unwrap();
    system.serve_types(T2, &["A"]).unwrap();

    let served_a: Vec<Option<u32>> = recorder
        .of_kind(EventKind::DishDelivered)
        .into_iter()
        .filter_map(|event| match event {
            ServiceEvent::DishDelivered {
                table, dish_type, course, ..
            } if table == T2 && dish_type == "A" => Some(course),
            _ => None,
        })
        .collect();
    assert_eq!(served_a, vec![Some(1), None]);
    assert!(system.mistakes().is_empty());
}

#[test]
fn transfer_without_outstanding_demand_is_rejected() {
    let mut system = system();
    system.seat_ticket(T1, courses(&[&["A"]])).unwrap();
    system.seat_ticket(T2, courses(&[&["B"]])).unwrap();
    assert!(matches!(
        system.transfer_demand(T1, T2, "B"),
        Err(brigade::ServiceError::NoOutstandingDemand { .. })
    ));
}
