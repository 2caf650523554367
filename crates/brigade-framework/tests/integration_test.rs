use brigade_framework::mock::EventRecorder;
use brigade_framework::{BusEvent, Clock, Entity, EventBus, ResourceStore, Seconds, Transition};

// --- Test Entity ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KettleState {
    Cold,
    Heating,
    Boiled,
}

#[derive(Clone, Debug)]
struct Kettle {
    id: u32,
    state: KettleState,
    elapsed: Seconds,
}

#[derive(Debug)]
struct KettleCreate;

#[derive(Debug)]
enum KettleAction {
    SwitchOn,
    Heat(Seconds),
}

#[derive(Debug, thiserror::Error)]
#[error("kettle error")]
struct KettleError;

/// Seconds to boil, injected as context.
struct BoilTime(Seconds);

impl Entity for Kettle {
    type Id = u32;
    type Create = KettleCreate;
    type Action = KettleAction;
    type ActionResult = Transition<KettleState>;
    type Context = BoilTime;
    type Error = KettleError;

    fn from_create_params(id: u32, _: KettleCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            state: KettleState::Cold,
            elapsed: 0.0,
        })
    }

    fn handle_action(
        &mut self,
        action: KettleAction,
        ctx: &BoilTime,
    ) -> Result<Transition<KettleState>, Self::Error> {
        let from = self.state;
        match (action, self.state) {
            (KettleAction::SwitchOn, KettleState::Cold) => self.state = KettleState::Heating,
            (KettleAction::Heat(delta), KettleState::Heating) => {
                self.elapsed += delta;
                if self.elapsed >= ctx.0 {
                    self.state = KettleState::Boiled;
                }
            }
            _ => {}
        }
        if from == self.state {
            Ok(Transition::NoOp)
        } else {
            Ok(Transition::applied(from, self.state))
        }
    }
}

// --- Test Events ---

#[derive(Debug, Clone, PartialEq)]
enum KitchenEvent {
    Boiled(u32),
    Whistle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KitchenKind {
    Boiled,
    Whistle,
}

impl BusEvent for KitchenEvent {
    type Kind = KitchenKind;
    fn kind(&self) -> KitchenKind {
        match self {
            KitchenEvent::Boiled(_) => KitchenKind::Boiled,
            KitchenEvent::Whistle => KitchenKind::Whistle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Handler {
    Whistler,
}

#[test]
fn clock_store_and_bus_cooperate_within_a_step() {
    let boil = BoilTime(3.0);
    let mut store = ResourceStore::<Kettle>::new();
    let mut bus = EventBus::<KitchenEvent, Handler>::new();
    let mut clock = Clock::new(2.0);
    let recorder = EventRecorder::<KitchenEvent>::new();

    bus.subscribe(KitchenKind::Boiled, Handler::Whistler);
    bus.on_passive(KitchenKind::Boiled, recorder.listener());
    bus.on_passive(KitchenKind::Whistle, recorder.listener());
    recorder.expect(KitchenKind::Boiled).times(1);
    recorder.expect(KitchenKind::Whistle).times(1);

    let id = store.create(KettleCreate, &boil).unwrap();
    store.perform_action(id, KettleAction::SwitchOn, &boil).unwrap();

    for _ in 0..3 {
        let tick = clock.advance(1.0);
        let moved = store
            .perform_action(id, KettleAction::Heat(tick.delta), &boil)
            .unwrap();
        if moved.entered(KettleState::Boiled) {
            bus.publish(KitchenEvent::Boiled(id));
        }
        // Drain within the step, re-entrantly.
        while let Some(delivery) = bus.next_delivery() {
            for handler in delivery.subscribers {
                match (handler, &delivery.event) {
                    (Handler::Whistler, KitchenEvent::Boiled(_)) => bus.publish(KitchenEvent::Whistle),
                    _ => {}
                }
            }
        }
        assert!(bus.is_idle());
    }

    assert_eq!(store.get(id).unwrap().state, KettleState::Boiled);
    assert_eq!(clock.now(), 6.0);
    assert_eq!(
        recorder.events(),
        vec![KitchenEvent::Boiled(1), KitchenEvent::Whistle]
    );
    recorder.verify();
}

#[test]
fn paused_clock_freezes_entity_timers() {
    let boil = BoilTime(1.0);
    let mut store = ResourceStore::<Kettle>::new();
    let mut clock = Clock::default();
    let id = store.create(KettleCreate, &boil).unwrap();
    store.perform_action(id, KettleAction::SwitchOn, &boil).unwrap();

    clock.set_paused(true);
    for _ in 0..10 {
        let tick = clock.advance(1.0);
        store
            .perform_action(id, KettleAction::Heat(tick.delta), &boil)
            .unwrap();
    }
    assert_eq!(store.get(id).unwrap().state, KettleState::Heating);
    assert_eq!(store.get(id).unwrap().elapsed, 0.0);
}

#[test]
#[should_panic(expected = "Expected 2 Whistle")]
fn recorder_verify_reports_missing_events() {
    let mut bus = EventBus::<KitchenEvent, Handler>::new();
    let recorder = EventRecorder::<KitchenEvent>::new();
    bus.on_passive(KitchenKind::Whistle, recorder.listener());
    recorder.expect(KitchenKind::Whistle).times(2);
    bus.publish(KitchenEvent::Whistle);
    while bus.next_delivery().is_some() {}
    recorder.verify();
}

#[test]
fn missing_entity_lookup_is_not_found() {
    let store = ResourceStore::<Kettle>::new();
    assert!(store.get(3).is_none());
    assert!(store.require(3).unwrap_err().is_not_found());
}
