mod common;

use brigade::model::DishStatus;
use common::*;

fn rank(status: DishStatus) -> u8 {
    match status {
        DishStatus::NotFired => 0,
        DishStatus::Cooking => 1,
        DishStatus::OnPass => 2,
        DishStatus::Walking => 3,
        DishStatus::Served | DishStatus::Dead => 4,
    }
}

#[test]
fn dish_history_only_moves_forward() {
    let mut system = system();
    let ticket = system.seat_ticket(T1, courses(&[&["A", "B", "C"]])).unwrap();
    let dishes = course_dishes(&system, ticket, 1);
    for &dish in &dishes {
        system.fire(dish).unwrap();
    }
    steps(&mut system, 3, 1.0);
    system.mark_walking(dishes[1]).unwrap();
    system.serve(T1, &dishes[1..2]).unwrap();
    steps(&mut system, 10, 1.0);

    for &dish in &dishes {
        let instance = system.dish(dish).unwrap();
        let ranks: Vec<u8> = instance.history.iter().map(|&s| rank(s)).collect();
        assert!(
            ranks.windows(2).all(|pair| pair[0] < pair[1]),
            "{dish}: {:?}",
            instance.history
        );
        assert_eq!(instance.history.last(), Some(&instance.status));
    }
    assert_eq!(
        system.dish(dishes[1]).unwrap().history,
        vec![
            DishStatus::NotFired,
            DishStatus::Cooking,
            DishStatus::OnPass,
            DishStatus::Walking,
            DishStatus::Served,
        ]
    );
    assert_eq!(
        system.dish(dishes[0]).unwrap().history,
        vec![
            DishStatus::NotFired,
            DishStatus::Cooking,
            DishStatus::OnPass,
            DishStatus::Dead,
        ]
    );
}

#[test]
fn walking_dish_stops_decaying() {
    let mut system = system();
    let ticket = system.seat_ticket(T1, courses(&[&["C"]])).unwrap();
    let c = course_dishes(&system, ticket, 1)[0];
    system.fire(c).unwrap();
    system.step(1.0);
    system.mark_walking(c).unwrap();

    steps(&mut system, 50, 1.0);
    let instance = system.dish(c).unwrap();
    assert_eq!(instance.status, DishStatus::Walking);
    assert!(system.pass().holds(c));
    assert!(system.mistakes().is_empty());

    system.serve(T1, &[c]).unwrap();
    assert_eq!(system.dish(c).unwrap().status, DishStatus::Served);
    assert!(!system.pass().holds(c));
}

#[test]
fn served_and_dead_dishes_cannot_be_revived() {
    let mut system = system();
    let ticket = system.seat_ticket(T1, courses(&[&["C"]])).unwrap();
    let c = course_dishes(&system, ticket, 1)[0];
    system.fire(c).unwrap();
    steps(&mut system, 7, 1.0);
    assert_eq!(system.dish(c).unwrap().status, DishStatus::Dead);

    system.fire(c).unwrap();
    system.mark_walking(c).unwrap();
    system.serve(T1, &[c]).unwrap();
    assert_eq!(system.dish(c).unwrap().status, DishStatus::Dead);
    assert!(system.table_order(T1).unwrap().has_unserved("C"));
}
