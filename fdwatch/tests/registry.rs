use fdwatch::{
    Condition, DescriptorKey, FdHandler, HandlerId, Interest, InterestObserver, Registry,
    RegistryBuilder,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Idle;

impl FdHandler for Idle {}

type Changes = Rc<RefCell<Vec<(DescriptorKey, Interest, Interest)>>>;

/// Collects every interest change the registry reports.
struct Watcher {
    changes: Changes,
}

impl InterestObserver for Watcher {
    fn interest_changed(&mut self, key: DescriptorKey, old: Interest, new: Interest) {
        self.changes.borrow_mut().push((key, old, new));
    }
}

fn observed() -> (Registry, Changes) {
    let changes = Changes::default();
    let registry = RegistryBuilder::new()
        .observer(Watcher {
            changes: changes.clone(),
        })
        .build();

    (registry, changes)
}

fn readable() -> Interest {
    Interest::NONE.with(Condition::Readable, true)
}

#[test]
fn register_and_unregister_track_membership() {
    let mut registry = Registry::new();
    assert!(registry.is_empty());

    let a = registry.register(Idle);
    let b = registry.register(Idle);

    assert_ne!(a, b, "every handler gets its own id");
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(a) && registry.contains(b));

    registry.unregister(a);

    assert!(!registry.contains(a));
    assert!(registry.contains(b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn stale_id_does_not_resolve_to_slot_successor() {
    let mut registry = RegistryBuilder::new().capacity(1).build();

    let old = registry.register(Idle);
    registry.unregister(old);
    let new = registry.register(Idle);

    assert_eq!(old.index(), new.index());
    assert_ne!(old.generation(), new.generation());
    assert!(!registry.contains(old), "stale id must not see the new handler");
    assert!(registry.handler_mut(old).is_none());
    assert!(registry.handler_mut(new).is_some());
}

#[test]
fn handler_id_round_trips_through_raw() {
    let mut registry = Registry::new();
    let id = registry.register(Idle);

    assert_eq!(HandlerId::from_raw(id.raw()), id);
}

#[test]
fn unregister_removes_every_descriptor_state() {
    let mut registry = Registry::new();
    let h = registry.register(Idle);
    let other = registry.register(Idle);

    for fd in 0..5 {
        registry.set_read_interest(h, fd, true);
        registry.set_exception_interest(h, fd, true);
    }
    registry.set_write_interest(other, 0, true);

    registry.unregister(h);

    for fd in 0..5 {
        let key = DescriptorKey::new(h, fd);
        assert!(registry.descriptor(key).is_none());
        assert!(!registry.is_dispatchable(key), "no target may remain for {key}");
    }

    let watched: Vec<_> = registry.watched().collect();
    assert_eq!(
        watched,
        vec![(
            DescriptorKey::new(other, 0),
            Interest::NONE.with(Condition::Writable, true)
        )]
    );
}

#[test]
#[should_panic(expected = "unknown handler")]
fn double_unregister_panics() {
    let mut registry = Registry::new();
    let h = registry.register(Idle);

    registry.unregister(h);
    registry.unregister(h);
}

#[test]
fn lookups_on_unknown_handler_find_nothing() {
    let mut registry = Registry::new();
    let h = registry.register(Idle);
    registry.set_read_interest(h, 1, true);
    registry.unregister(h);

    assert_eq!(registry.descriptors(h).count(), 0);
    assert!(registry.interest(h, 1).is_none());
    assert!(registry.descriptor(DescriptorKey::new(h, 1)).is_none());
}

#[test]
fn boxed_handler_registers_like_any_other() {
    let mut registry = Registry::new();
    let boxed: Box<dyn FdHandler> = Box::new(Idle);

    let h = registry.register_boxed(boxed);
    registry.set_write_interest(h, 6, true);

    assert!(registry.contains(h));
    assert!(registry.handler_mut(h).is_some());
    assert_eq!(
        registry.interest(h, 6),
        Some(Interest::NONE.with(Condition::Writable, true))
    );
}

#[test]
fn registry_grows_past_initial_capacity() {
    let mut registry = RegistryBuilder::new().capacity(2).build();
    let ids: Vec<_> = (0..10).map(|_| registry.register(Idle)).collect();

    for (fd, id) in ids.iter().enumerate() {
        registry.set_read_interest(*id, fd as i32, true);
    }

    assert_eq!(registry.len(), 10);
    assert_eq!(registry.watched().count(), 10);
}

#[test]
#[should_panic(expected = "capacity must be > 0")]
fn zero_capacity_is_rejected() {
    let _ = RegistryBuilder::new().capacity(0);
}

#[test]
fn observer_sees_effective_changes_only() {
    let (mut registry, changes) = observed();
    let h = registry.register(Idle);
    let key = DescriptorKey::new(h, 3);
    let both = readable().with(Condition::Writable, true);

    registry.set_read_interest(h, 3, true);
    registry.set_read_interest(h, 3, true);
    registry.set_write_interest(h, 3, true);
    registry.set_exception_interest(h, 3, false);
    registry.set_read_interest(h, 3, false);
    registry.set_write_interest(h, 3, false);

    assert_eq!(
        *changes.borrow(),
        vec![
            (key, Interest::NONE, readable()),
            (key, readable(), both),
            (key, both, Interest::NONE.with(Condition::Writable, true)),
            (key, Interest::NONE.with(Condition::Writable, true), Interest::NONE),
        ]
    );
}

#[test]
fn observer_is_not_told_about_transient_empty_state() {
    let (mut registry, changes) = observed();
    let h = registry.register(Idle);

    registry.set_read_interest(h, 4, false);

    assert!(changes.borrow().is_empty());
}

#[test]
fn observer_sees_teardown_on_unregister() {
    let (mut registry, changes) = observed();
    let h = registry.register(Idle);

    registry.set_read_interest(h, 1, true);
    registry.set_read_interest(h, 2, true);
    changes.borrow_mut().clear();

    registry.unregister(h);

    assert_eq!(
        *changes.borrow(),
        vec![
            (DescriptorKey::new(h, 1), readable(), Interest::NONE),
            (DescriptorKey::new(h, 2), readable(), Interest::NONE),
        ]
    );
}

#[test]
fn shutdown_tears_down_every_handler() {
    let (mut registry, changes) = observed();
    let a = registry.register(Idle);
    let b = registry.register(Idle);

    registry.set_read_interest(a, 7, true);
    registry.set_read_interest(b, 7, true);
    changes.borrow_mut().clear();

    registry.shutdown();

    let removed: Vec<_> = changes
        .borrow()
        .iter()
        .filter(|(_, _, new)| new.is_empty())
        .map(|(key, _, _)| *key)
        .collect();
    assert_eq!(removed, vec![DescriptorKey::new(a, 7), DescriptorKey::new(b, 7)]);
}

#[test]
fn contract_violation_messages_name_the_target() {
    let mut registry = Registry::new();
    let h = registry.register(Idle);

    let message = fdwatch::ContractViolation::MissingDescriptor(DescriptorKey::new(h, 42)).to_string();

    assert!(message.contains("fd 42"), "unexpected message: {message}");
    assert!(message.contains(&h.to_string()));
}
