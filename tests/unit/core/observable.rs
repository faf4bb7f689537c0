use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_set_notifies_with_old_and_new() {
    let prop = Property::new(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    prop.add_listener(move |old, new| sink.borrow_mut().push((*old, *new)));

    prop.set(2);
    prop.set(2);
    prop.set(5);

    assert_eq!(*seen.borrow(), vec![(1, 2), (2, 5)]);
}

#[test]
fn test_remove_listener() {
    let prop = Property::new(String::new());
    let hits = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&hits);
    let id = prop.add_listener(move |_, _| *sink.borrow_mut() += 1);

    prop.set("a".to_string());
    assert!(prop.remove_listener(id));
    assert!(!prop.remove_listener(id));
    prop.set("b".to_string());

    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_bind_follows_source_one_way() {
    let source = Property::new(10);
    let target = Property::new(0);
    target.bind(&source);
    assert_eq!(target.get(), 10);

    source.set(11);
    assert_eq!(target.get(), 11);

    // writes to the bound side are dropped and never reach the source
    target.set(99);
    assert_eq!(target.get(), 11);
    assert_eq!(source.get(), 11);
}

#[test]
fn test_bind_map_and_read_only_source() {
    let at_mark = Property::new(true);
    let modified = Property::new(false);
    modified.bind_map(&at_mark.read_only(), |at: &bool| !*at);
    assert!(!modified.get());

    at_mark.set(false);
    assert!(modified.get());
    at_mark.set(true);
    assert!(!modified.get());
}

#[test]
fn test_bound_target_notifies_its_listeners() {
    let source = Property::new(0.0_f64);
    let target = Property::new(0.0_f64);
    target.bind(&source);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    target.add_listener(move |_, new| sink.borrow_mut().push(*new));

    source.set(3.5);
    assert_eq!(*seen.borrow(), vec![3.5]);
}

#[test]
fn test_unbind_releases_source_listener() {
    let source = Property::new(1);
    let target = Property::new(0);
    target.bind(&source);
    assert_eq!(source.listener_count(), 1);

    target.unbind();
    assert!(!target.is_bound());
    assert_eq!(source.listener_count(), 0);

    source.set(2);
    assert_eq!(target.get(), 1);
    target.set(7);
    assert_eq!(target.get(), 7);
}

#[test]
fn test_rebind_replaces_previous_binding() {
    let a = Property::new(1);
    let b = Property::new(2);
    let target = Property::new(0);
    target.bind(&a);
    target.bind(&b);
    assert_eq!(a.listener_count(), 0);
    assert_eq!(target.get(), 2);

    a.set(10);
    assert_eq!(target.get(), 2);
}

#[test]
fn test_dropping_target_detaches_from_source() {
    let source = Property::new(1);
    {
        let target = Property::new(0);
        target.bind(&source);
        assert_eq!(source.listener_count(), 1);
    }
    assert_eq!(source.listener_count(), 0);
    source.set(3);
}

#[test]
fn test_subscription_cancel() {
    let source = Property::new(1);
    let hits = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&hits);
    let sub = Observable::subscribe(&source, move |_, _| *sink.borrow_mut() += 1);

    source.set(2);
    sub.cancel();
    source.set(3);

    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_weak_property() {
    let prop = Property::new(Some(1));
    let weak = prop.downgrade();
    assert!(weak.upgrade().is_some_and(|p| p.ptr_eq(&prop)));
    drop(prop);
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_listener_may_read_property() {
    let prop = Property::new(1);
    let observed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&observed);
    let weak = prop.downgrade();
    prop.add_listener(move |_, _| {
        if let Some(p) = weak.upgrade() {
            *sink.borrow_mut() = p.get();
        }
    });

    prop.set(4);
    assert_eq!(*observed.borrow(), 4);
}
