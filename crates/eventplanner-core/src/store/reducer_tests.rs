//! Property tests for the reducer.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::clock::ManualClock;
    use crate::event::{Event, EventStatus, NewEvent};
    use proptest::prelude::*;

    const T0: i64 = 1_790_000_000_000;

    fn arb_status() -> impl Strategy<Value = EventStatus> {
        prop_oneof![Just(EventStatus::Pending), Just(EventStatus::Completed)]
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        (
            "[a-z0-9]{8}",
            "[A-Za-z ]{3,20}",
            0i64..1_000,
            1u64..50,
            arb_status(),
        )
            .prop_map(|(id, name, last_modified, version, status)| Event {
                id,
                name,
                date: "2026-12-01".to_string(),
                time: "18:00".to_string(),
                location: "Main Hall".to_string(),
                description: String::new(),
                status,
                last_modified,
                version,
            })
    }

    fn arb_new_event() -> impl Strategy<Value = NewEvent> {
        ("[A-Za-z ]{3,40}", "[A-Za-z ]{3,40}", arb_status()).prop_map(|(name, location, status)| {
            let mut event = NewEvent::new(name, "2026-12-01", "18:00", location);
            event.status = status;
            event
        })
    }

    fn loaded(events: Vec<Event>, clock: &ManualClock) -> EventState {
        reduce(EventState::new(clock.now_ms()), EventAction::LoadEvents(events), clock)
    }

    proptest! {
        #[test]
        fn add_grows_by_one(events in proptest::collection::vec(arb_event(), 0..20), payload in arb_new_event()) {
            let clock = ManualClock::new(T0);
            let state = loaded(events, &clock);
            let before = state.len();
            let state = reduce(state, EventAction::AddEvent(payload), &clock);
            prop_assert_eq!(state.len(), before + 1);
            let added = state.events.last().unwrap();
            prop_assert_eq!(added.status, EventStatus::Pending);
            prop_assert_eq!(added.version, 1);
        }

        #[test]
        fn update_increments_version_and_timestamp(
            events in proptest::collection::vec(arb_event(), 1..20),
            pick in any::<prop::sample::Index>(),
            step in 1i64..10_000,
        ) {
            let clock = ManualClock::new(T0);
            let state = loaded(events, &clock);
            let target = state.events[pick.index(state.len())].clone();
            let old = state.find(&target.id).cloned().unwrap();

            clock.advance(step);
            let state = reduce(state, EventAction::UpdateEvent(target.clone()), &clock);
            let updated = state.find(&target.id).unwrap();
            prop_assert_eq!(updated.version, old.version + 1);
            prop_assert!(updated.last_modified > old.last_modified);
        }

        #[test]
        fn delete_missing_id_keeps_collection(events in proptest::collection::vec(arb_event(), 0..20)) {
            let clock = ManualClock::new(T0);
            let state = loaded(events, &clock);
            let next = reduce(state.clone(), EventAction::DeleteEvent("not-an-id".to_string()), &clock);
            prop_assert_eq!(next.events, state.events);
        }

        #[test]
        fn complete_then_pending_returns_to_pending(
            events in proptest::collection::vec(arb_event(), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let clock = ManualClock::new(T0);
            let state = loaded(events, &clock);
            let target = state.events[pick.index(state.len())].clone();

            let state = reduce(state, EventAction::MarkCompleted(target.id.clone()), &clock);
            let state = reduce(state, EventAction::MarkPending(target.id.clone()), &clock);
            let event = state.find(&target.id).unwrap();
            prop_assert_eq!(event.status, EventStatus::Pending);
            prop_assert_eq!(event.version, target.version + 2);
        }

        #[test]
        fn optimize_is_bounded_sorted_and_idempotent(events in proptest::collection::vec(arb_event(), 0..250)) {
            let clock = ManualClock::new(T0);
            let state = loaded(events.clone(), &clock);
            let once = reduce(state, EventAction::OptimizeCache, &clock);

            prop_assert_eq!(once.len(), events.len().min(MAX_CACHED_EVENTS));
            prop_assert!(once
                .events
                .windows(2)
                .all(|w| w[0].last_modified >= w[1].last_modified));

            let twice = reduce(once.clone(), EventAction::OptimizeCache, &clock);
            prop_assert_eq!(twice.events, once.events);
        }
    }

    #[test]
    fn optimize_two_hundred_keeps_newest_hundred() {
        let clock = ManualClock::new(T0);
        let events: Vec<Event> = (0..200)
            .map(|i| Event {
                id: format!("evt-{i}"),
                name: format!("Event {i}"),
                date: "2026-12-01".to_string(),
                time: "18:00".to_string(),
                location: "Main Hall".to_string(),
                description: String::new(),
                status: EventStatus::Pending,
                last_modified: i,
                version: 1,
            })
            .collect();

        let state = reduce(loaded(events, &clock), EventAction::OptimizeCache, &clock);
        assert_eq!(state.len(), 100);
        assert_eq!(state.events[0].id, "evt-199");
        assert_eq!(state.events[99].id, "evt-100");
    }

    #[test]
    fn optimize_breaks_ties_by_prior_order() {
        let clock = ManualClock::new(T0);
        let events: Vec<Event> = (0..150)
            .map(|i| Event {
                id: format!("tie-{i}"),
                name: "Same".to_string(),
                date: "2026-12-01".to_string(),
                time: "18:00".to_string(),
                location: "Main Hall".to_string(),
                description: String::new(),
                status: EventStatus::Pending,
                last_modified: 5,
                version: 1,
            })
            .collect();

        let state = reduce(loaded(events, &clock), EventAction::OptimizeCache, &clock);
        let ids: Vec<_> = state.events.iter().map(|e| e.id.clone()).collect();
        let expected: Vec<_> = (0..100).map(|i| format!("tie-{i}")).collect();
        assert_eq!(ids, expected);
    }
}
