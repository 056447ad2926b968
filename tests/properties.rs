use proptest::prelude::*;

use CircularQueueMini::core::buildcore::{AnyQueue, BoundedQueue, Item, QueueBuilder, QueueError, QueueKind, Retention};

fn kind() -> impl Strategy<Value = QueueKind> {
    prop_oneof![Just(QueueKind::Array), Just(QueueKind::Linked)]
}

fn filled(kind: QueueKind, capacity: usize, overwritable: bool, values: &[u32]) -> AnyQueue<u32> {
    QueueBuilder::new(kind, capacity)
        .overwritable(overwritable)
        .build_with(vec![Item::Many(values.to_vec())])
        .unwrap()
}

proptest! {
    #[test]
    fn fitting_values_drain_in_order(
        kind in kind(),
        capacity in 1usize..32,
        values in prop::collection::vec(any::<u32>(), 0..32),
    ) {
        let values: Vec<u32> = values.into_iter().take(capacity).collect();
        let mut queue = filled(kind, capacity, false, &values);
        prop_assert_eq!(queue.drain_all(), values);
    }

    #[test]
    fn one_past_capacity(kind in kind(), capacity in 1usize..32) {
        let values: Vec<u32> = (0..capacity as u32).collect();

        let mut overwriting = filled(kind, capacity, true, &values);
        overwriting.push(capacity as u32).unwrap();
        prop_assert_eq!(overwriting.drain_all(), (1..=capacity as u32).collect::<Vec<_>>());

        let mut strict = filled(kind, capacity, false, &values);
        prop_assert_eq!(strict.push(capacity as u32), Err(QueueError::BufferFull { capacity }));
        prop_assert_eq!(strict.drain_all(), values);
    }

    #[test]
    fn overwriting_keeps_the_newest(
        kind in kind(),
        capacity in 1usize..16,
        values in prop::collection::vec(any::<u32>(), 0..64),
    ) {
        let mut queue = filled(kind, capacity, true, &values);
        let expected = values[values.len().saturating_sub(capacity)..].to_vec();
        prop_assert_eq!(queue.drain_all(), expected);
    }

    #[test]
    fn shrinking_resize_follows_retention(
        kind in kind(),
        capacity in 1usize..24,
        target in 1usize..24,
        consumed in 0usize..8,
        values in prop::collection::vec(any::<u32>(), 0..48),
    ) {
        // consume a few first so the array ring is wrapped when resized
        let mut oldest = filled(kind, capacity, true, &values);
        for _ in 0..consumed {
            oldest.next();
        }
        let live = oldest.to_vec();
        let mut newest = oldest.clone();

        oldest.resize(target, Retention::KeepOldest).unwrap();
        newest.resize(target, Retention::KeepNewest).unwrap();

        let kept = live.len().min(target);
        prop_assert_eq!(oldest.capacity(), target);
        prop_assert_eq!(oldest.drain_all(), live[..kept].to_vec());
        prop_assert_eq!(newest.drain_all(), live[live.len() - kept..].to_vec());
    }

    #[test]
    fn drained_queue_matches_fresh_queue(
        kind in kind(),
        capacity in 1usize..16,
        first in prop::collection::vec(any::<u32>(), 0..32),
        second in prop::collection::vec(any::<u32>(), 0..32),
    ) {
        let mut reused = filled(kind, capacity, true, &first);
        prop_assert_eq!(reused.by_ref().count(), first.len().min(capacity));
        prop_assert_eq!(reused.len(), 0);

        reused.append(vec![Item::Many(second.clone())]).unwrap();
        let mut fresh = filled(kind, capacity, true, &second);
        prop_assert_eq!(reused.drain_all(), fresh.drain_all());
    }
}
