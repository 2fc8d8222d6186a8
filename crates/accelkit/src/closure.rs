//! Bound accelerator callbacks.
//!
//! An [`AccelClosure`] is the action behind an accelerator. It has identity
//! (two handles are the same closure iff [`ptr_eq`](AccelClosure::ptr_eq)),
//! can be invalidated once when its target goes away, and remembers the
//! [`AccelGroup`] it is connected to.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use accelkit_core::logging::targets;
use accelkit_core::ObjectId;
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::group::{AccelGroup, GroupInner};
use crate::modifier::ModifierType;

new_key_type! {
    /// Identifies an invalidation notifier registered on a closure.
    pub struct NotifierId;
}

/// Unique identifier of an [`AccelClosure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClosureId(u64);

impl ClosureId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// The callback type: `(group, acceleratable, key, mods) -> handled`.
type Callback = dyn Fn(&AccelGroup, ObjectId, u32, ModifierType) -> bool + Send + Sync;

type InvalidateNotify = Box<dyn FnOnce(&AccelClosure) + Send>;

/// Invalidation notifiers, fired in registration order.
#[derive(Default)]
struct Notifiers {
    ids: SlotMap<NotifierId, ()>,
    pending: Vec<(NotifierId, InvalidateNotify)>,
}

struct ClosureInner {
    id: ClosureId,
    callback: Box<Callback>,
    invalid: AtomicBool,
    notifiers: Mutex<Notifiers>,
    /// The group this closure is connected to.
    owner: Mutex<Weak<GroupInner>>,
}

/// A shared handle to an accelerator callback.
///
/// # Example
///
/// ```
/// use accelkit::AccelClosure;
///
/// let save = AccelClosure::new(|_group, _window, _key, _mods| {
///     println!("save");
///     true
/// });
/// assert!(!save.is_invalid());
/// save.invalidate();
/// assert!(save.is_invalid());
/// ```
#[derive(Clone)]
pub struct AccelClosure {
    inner: Arc<ClosureInner>,
}

impl AccelClosure {
    /// Create a closure from a callback.
    ///
    /// The callback receives the activated group, the object the
    /// accelerator was activated on, and the key and modifiers of the key
    /// event. It returns whether it handled the event.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&AccelGroup, ObjectId, u32, ModifierType) -> bool + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ClosureInner {
                id: ClosureId::next(),
                callback: Box::new(callback),
                invalid: AtomicBool::new(false),
                notifiers: Mutex::new(Notifiers::default()),
                owner: Mutex::new(Weak::new()),
            }),
        }
    }

    pub fn id(&self) -> ClosureId {
        self.inner.id
    }

    /// Check whether two handles refer to the same closure.
    pub fn ptr_eq(&self, other: &AccelClosure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether [`invalidate`](Self::invalidate) has been called.
    pub fn is_invalid(&self) -> bool {
        self.inner.invalid.load(Ordering::SeqCst)
    }

    /// Run the callback. Invalid closures do nothing and return `false`.
    pub fn invoke(
        &self,
        group: &AccelGroup,
        acceleratable: ObjectId,
        key: u32,
        mods: ModifierType,
    ) -> bool {
        if self.is_invalid() {
            return false;
        }
        (self.inner.callback)(group, acceleratable, key, mods)
    }

    /// Mark the closure as permanently unusable.
    ///
    /// The first call runs every invalidation notifier once, in registration
    /// order; a closure connected to a group is disconnected by this.
    /// Further calls do nothing.
    pub fn invalidate(&self) {
        if self.inner.invalid.swap(true, Ordering::SeqCst) {
            return;
        }
        let pending = {
            let mut notifiers = self.inner.notifiers.lock();
            notifiers.ids.clear();
            std::mem::take(&mut notifiers.pending)
        };
        tracing::trace!(
            target: targets::GROUP,
            closure = self.id().as_u64(),
            notifier_count = pending.len(),
            "closure invalidated"
        );
        for (_, notify) in pending {
            notify(self);
        }
    }

    /// Register a function to run when the closure is invalidated.
    ///
    /// If the closure is already invalid the function is dropped without
    /// running.
    pub fn add_invalidate_notifier<F>(&self, notify: F) -> NotifierId
    where
        F: FnOnce(&AccelClosure) + Send + 'static,
    {
        let mut notifiers = self.inner.notifiers.lock();
        let id = notifiers.ids.insert(());
        if !self.is_invalid() {
            notifiers.pending.push((id, Box::new(notify)));
        }
        id
    }

    /// Remove an invalidation notifier without running it.
    ///
    /// Returns `false` if the notifier already ran or was removed.
    pub fn remove_invalidate_notifier(&self, id: NotifierId) -> bool {
        let mut notifiers = self.inner.notifiers.lock();
        if notifiers.ids.remove(id).is_none() {
            return false;
        }
        notifiers.pending.retain(|(key, _)| *key != id);
        true
    }

    /// The group this closure is connected to, if any.
    pub(crate) fn owner(&self) -> Option<AccelGroup> {
        self.inner.owner.lock().upgrade().map(AccelGroup::from_inner)
    }

    /// Whether this closure is connected to `group`.
    pub(crate) fn is_owned_by(&self, group: &Arc<GroupInner>) -> bool {
        std::ptr::eq(self.inner.owner.lock().as_ptr(), Arc::as_ptr(group))
    }

    pub(crate) fn set_owner(&self, group: Option<&Arc<GroupInner>>) {
        *self.inner.owner.lock() = group.map(Arc::downgrade).unwrap_or_default();
    }
}

impl PartialEq for AccelClosure {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for AccelClosure {}

impl fmt::Debug for AccelClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelClosure")
            .field("id", &self.inner.id)
            .field("invalid", &self.is_invalid())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccelClosure: Send, Sync);
