//! Tests for attaching accelerator groups to objects.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use accelkit::{AccelBindings, AccelClosure, AccelConfig, AccelFlags, AccelGroup, ModifierType};
use accelkit_core::{global_registry, Object, ObjectBase, ObjectId};
use parking_lot::Mutex;

struct Window {
    base: ObjectBase,
}

impl Window {
    fn new() -> Self {
        Self {
            base: ObjectBase::new::<Self>(),
        }
    }
}

impl Object for Window {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

fn config() -> AccelConfig {
    AccelConfig::new().with_primary_modifier(ModifierType::CONTROL)
}

fn recording(
    log: &Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
    handled: bool,
) -> AccelClosure {
    let log = log.clone();
    AccelClosure::new(move |_, _, _, _| {
        log.lock().push(name);
        handled
    })
}

#[test]
fn test_attach_two_detach_one_destroy_other() {
    let bindings = AccelBindings::new(config());
    let group = AccelGroup::new(config());
    let first = Window::new();
    let second = Window::new();

    bindings.attach(&group, first.object_id());
    bindings.attach(&group, second.object_id());
    assert_eq!(
        group.acceleratables(),
        vec![second.object_id(), first.object_id()]
    );

    bindings.detach(&group, first.object_id());
    assert_eq!(group.acceleratables(), vec![second.object_id()]);
    assert!(bindings.groups_of(first.object_id()).is_empty());

    let second_id = second.object_id();
    drop(second);
    assert!(group.acceleratables().is_empty());
    assert!(bindings.groups_of(second_id).is_empty());
    assert_eq!(bindings.object_count(), 0);
    drop(first);
}

#[test]
fn test_most_recent_group_wins() {
    let bindings = AccelBindings::new(config());
    let window = Window::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let older = AccelGroup::new(config());
    let newer = AccelGroup::new(config());
    let f = u32::from('f');
    older.connect(f, ModifierType::CONTROL, AccelFlags::VISIBLE, recording(&log, "older", true));
    newer.connect(f, ModifierType::CONTROL, AccelFlags::VISIBLE, recording(&log, "newer", false));

    bindings.attach(&older, window.object_id());
    bindings.attach(&newer, window.object_id());

    assert!(bindings.activate(window.object_id(), u32::from('f'), ModifierType::CONTROL));
    assert_eq!(*log.lock(), vec!["newer", "older"]);

    bindings.detach(&older, window.object_id());
    log.lock().clear();
    assert!(!bindings.activate(window.object_id(), u32::from('f'), ModifierType::CONTROL));
    assert_eq!(*log.lock(), vec!["newer"]);
}

#[test]
fn test_attached_group_outlives_caller_handle() {
    let bindings = AccelBindings::new(config());
    let window = Window::new();
    let hits = Arc::new(AtomicUsize::new(0));

    {
        let group = AccelGroup::new(config());
        let hits = hits.clone();
        group.connect(
            u32::from('r'),
            ModifierType::CONTROL,
            AccelFlags::VISIBLE,
            AccelClosure::new(move |_, _, _, _| {
                hits.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );
        bindings.attach(&group, window.object_id());
    }

    assert!(bindings.activate(window.object_id(), u32::from('R'), ModifierType::CONTROL));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_activate_unknown_object() {
    let bindings = AccelBindings::new(config());
    let window = Window::new();
    assert!(!bindings.activate(window.object_id(), u32::from('s'), ModifierType::CONTROL));
}

#[test]
fn test_destroy_hook_runs_once_per_object() {
    let bindings = AccelBindings::new(config());
    let window = Window::new();
    let id = window.object_id();
    let groups: Vec<AccelGroup> = (0..3).map(|_| AccelGroup::new(config())).collect();
    for group in &groups {
        bindings.attach(group, id);
    }
    assert_eq!(global_registry().weak_ref_count(id), Ok(1));

    drop(window);
    for group in &groups {
        assert!(group.acceleratables().is_empty());
    }
}

#[test]
fn test_activation_across_primary_modifiers() {
    let bindings = AccelBindings::new(AccelConfig::new().with_primary_modifier(ModifierType::META));
    let window = Window::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let group = AccelGroup::new(config());
    let s = u32::from('s');
    group.connect(s, ModifierType::CONTROL, AccelFlags::VISIBLE, recording(&log, "save", true));
    group.connect(s, ModifierType::META, AccelFlags::VISIBLE, recording(&log, "meta", true));
    bindings.attach(&group, window.object_id());

    assert!(bindings.activate(window.object_id(), s, ModifierType::CONTROL));
    assert!(bindings.activate(window.object_id(), s, ModifierType::META));
    assert_eq!(*log.lock(), vec!["save", "meta"]);
}
