//! Accelerator groups.
//!
//! An [`AccelGroup`] owns a sorted table of accelerator entries and the
//! activation handlers derived from it. Groups are attached to
//! acceleratable objects (windows) through
//! [`AccelBindings`](crate::AccelBindings); a key event on such an object
//! activates the matching entry of one of its groups.
//!
//! Internal state sits behind one mutex that is never held while user code
//! runs. Callbacks, signal slots and invalidation notifiers may therefore
//! connect and disconnect accelerators on the group that invoked them.
//!
//! # Example
//!
//! ```
//! use accelkit::{AccelClosure, AccelConfig, AccelFlags, AccelGroup, AcceleratorCodec};
//!
//! let config = AccelConfig::new();
//! let codec = AcceleratorCodec::new(config.clone());
//! let group = AccelGroup::new(config);
//!
//! let (key, mods) = codec.parse("<Control>q");
//! group.connect(key, mods, AccelFlags::VISIBLE, AccelClosure::new(|_, _, _, _| true));
//!
//! assert_eq!(group.query(key, mods).len(), 1);
//! assert!(group.disconnect_key(key, mods));
//! assert!(group.is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use accelkit_core::logging::targets;
use accelkit_core::{Object, ObjectBase, ObjectId, Signal};
use parking_lot::Mutex;

use crate::accel_map::{is_valid_accel_path, AccelPathSource};
use crate::closure::AccelClosure;
use crate::codec::{accel_signature, AcceleratorCodec};
use crate::config::AccelConfig;
use crate::entry::{AccelEntry, AccelEntryTable, AccelKey, AccelPath};
use crate::keysym::keyval_to_lower;
use crate::modifier::{AccelFlags, ModifierType};

/// Arguments of the [`accel_changed`](AccelGroup::accel_changed) signal.
#[derive(Debug, Clone)]
pub struct AccelChange {
    pub key: u32,
    pub mods: ModifierType,
    /// The closure that was added or removed.
    pub closure: AccelClosure,
}

#[derive(Default)]
struct GroupState {
    table: AccelEntryTable,
    lock_count: u32,
    /// Activation handlers keyed by accelerator signature, in connect order.
    handlers: HashMap<String, Vec<AccelClosure>>,
    /// Objects this group is attached to, most recent first.
    acceleratables: Vec<ObjectId>,
}

pub(crate) struct GroupInner {
    base: ObjectBase,
    codec: AcceleratorCodec,
    modifier_mask: ModifierType,
    path_source: Option<Arc<dyn AccelPathSource>>,
    state: Mutex<GroupState>,
    accel_changed: Signal<AccelChange>,
    is_locked_changed: Signal<bool>,
}

impl Drop for GroupInner {
    fn drop(&mut self) {
        let id = self.base.id();
        let entries: Vec<AccelEntry> = self.state.get_mut().table.drain().collect();
        self.state.get_mut().handlers.clear();
        tracing::debug!(
            target: targets::GROUP,
            group = ?id,
            entries = entries.len(),
            "accel group destroyed"
        );

        for entry in entries {
            if let (Some(path), Some(source)) = (entry.path(), &self.path_source) {
                source.unregister_group(path, id);
            }
            if let Some(notifier) = entry.notifier() {
                entry.closure().remove_invalidate_notifier(notifier);
            }
            entry.closure().set_owner(None);
        }
    }
}

/// A shared handle to a group of accelerators.
///
/// Cloning the handle does not copy the group. The group is destroyed when
/// the last handle is dropped, which disconnects every entry.
#[derive(Clone)]
pub struct AccelGroup {
    inner: Arc<GroupInner>,
}

impl AccelGroup {
    /// Create an empty group.
    ///
    /// The group's modifier mask is the configuration's default mask at
    /// this point.
    pub fn new(config: AccelConfig) -> Self {
        Self::build(config, None)
    }

    /// Create an empty group whose path entries resolve through `source`.
    pub fn with_path_source(config: AccelConfig, source: Arc<dyn AccelPathSource>) -> Self {
        Self::build(config, Some(source))
    }

    fn build(config: AccelConfig, path_source: Option<Arc<dyn AccelPathSource>>) -> Self {
        let modifier_mask = config.default_mod_mask();
        let group = Self {
            inner: Arc::new(GroupInner {
                base: ObjectBase::new::<AccelGroup>(),
                codec: AcceleratorCodec::new(config),
                modifier_mask,
                path_source,
                state: Mutex::new(GroupState::default()),
                accel_changed: Signal::new(),
                is_locked_changed: Signal::new(),
            }),
        };
        tracing::debug!(target: targets::GROUP, group = ?group.object_id(), "accel group created");
        group
    }

    pub(crate) fn from_inner(inner: Arc<GroupInner>) -> Self {
        Self { inner }
    }

    /// A weak handle that does not keep the group alive.
    pub fn downgrade(&self) -> WeakAccelGroup {
        WeakAccelGroup {
            id: self.object_id(),
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Check whether two handles refer to the same group.
    pub fn ptr_eq(&self, other: &AccelGroup) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn name(&self) -> String {
        self.inner.base.name()
    }

    /// Name the group for debug output.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.base.set_name(name);
    }

    /// The modifiers that are significant for this group's accelerators.
    pub fn modifier_mask(&self) -> ModifierType {
        self.inner.modifier_mask
    }

    /// The codec built from the group's configuration.
    pub fn codec(&self) -> &AcceleratorCodec {
        &self.inner.codec
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted after an entry with a non-zero key is added or removed.
    pub fn accel_changed(&self) -> &Signal<AccelChange> {
        &self.inner.accel_changed
    }

    /// Emitted with the new state when the group becomes locked or unlocked.
    pub fn is_locked_changed(&self) -> &Signal<bool> {
        &self.inner.is_locked_changed
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Lock the group against changes through the accelerator map.
    ///
    /// Locks nest: the group stays locked until [`unlock`](Self::unlock) has
    /// been called as many times as `lock`.
    pub fn lock(&self) {
        let became_locked = {
            let mut state = self.inner.state.lock();
            state.lock_count += 1;
            state.lock_count == 1
        };
        if became_locked {
            tracing::debug!(
                target: targets::GROUP,
                group = ?self.object_id(),
                "accel group locked"
            );
            self.inner.is_locked_changed.emit(true);
        }
    }

    /// Undo one [`lock`](Self::lock).
    ///
    /// # Panics
    ///
    /// Panics if the group is not locked.
    pub fn unlock(&self) {
        let became_unlocked = {
            let mut state = self.inner.state.lock();
            assert!(state.lock_count > 0, "unlock called on an accel group that is not locked");
            state.lock_count -= 1;
            state.lock_count == 0
        };
        if became_unlocked {
            tracing::debug!(
                target: targets::GROUP,
                group = ?self.object_id(),
                "accel group unlocked"
            );
            self.inner.is_locked_changed.emit(false);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.state.lock().lock_count > 0
    }

    // =========================================================================
    // Connecting
    // =========================================================================

    /// Bind `closure` to the chord `(key, mods)`.
    ///
    /// The key is stored lower-cased. An invalidated closure is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `key` is 0 or if the closure is already connected to a
    /// group.
    pub fn connect(&self, key: u32, mods: ModifierType, flags: AccelFlags, closure: AccelClosure) {
        assert!(key > 0, "cannot connect an accelerator without a key");
        assert!(
            closure.owner().is_none(),
            "closure is already connected to an accel group"
        );
        if closure.is_invalid() {
            return;
        }
        let key = AccelKey::new(keyval_to_lower(key), mods, flags);
        self.add_entry(key, closure, None);
    }

    /// Bind `closure` to whatever chord the accelerator path currently maps
    /// to.
    ///
    /// The path is tracked: when its mapping changes, the path source calls
    /// [`reconnect_by_path`](Self::reconnect_by_path) and the closure is
    /// rebound. Without a path source, or for an unknown path, the entry is
    /// kept with no key until the mapping changes.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid accelerator path or if the closure is
    /// already connected to a group.
    pub fn connect_by_path(&self, path: &str, closure: AccelClosure) {
        assert!(is_valid_accel_path(path), "invalid accelerator path '{path}'");
        assert!(
            closure.owner().is_none(),
            "closure is already connected to an accel group"
        );
        if closure.is_invalid() {
            return;
        }

        let (key, mods) = self
            .inner
            .path_source
            .as_ref()
            .and_then(|source| source.lookup_entry(path))
            .map(|found| (keyval_to_lower(found.key), found.mods))
            .unwrap_or((0, ModifierType::empty()));

        let key = AccelKey::new(key, mods, AccelFlags::VISIBLE);
        self.add_entry(key, closure, Some(AccelPath::new(path)));
    }

    /// Remove a closure's entry, or the first entry of the table when
    /// `closure` is `None`.
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn disconnect(&self, closure: Option<&AccelClosure>) -> bool {
        self.remove_entry(|table| match closure {
            Some(closure) => table.position_of(closure),
            None => (!table.is_empty()).then_some(0),
        })
    }

    /// Remove every entry bound to `(key, mods)`.
    ///
    /// Returns whether anything was removed.
    pub fn disconnect_key(&self, key: u32, mods: ModifierType) -> bool {
        let key = keyval_to_lower(key);
        let closures = {
            let state = self.inner.state.lock();
            let range = state.table.find(key, mods);
            state.table.closures_in(range)
        };

        let mut removed = false;
        for closure in &closures {
            removed |= self.disconnect(Some(closure));
        }
        removed
    }

    /// Rebind every entry tracking `path` to the path's current chord.
    pub fn reconnect_by_path(&self, path: &str) {
        let closures = self.inner.state.lock().table.closures_with_path(path);
        tracing::trace!(
            target: targets::GROUP,
            group = ?self.object_id(),
            path,
            count = closures.len(),
            "reconnecting by path"
        );

        for closure in closures {
            if self.disconnect(Some(&closure)) {
                self.connect_by_path(path, closure);
            }
        }
    }

    fn add_entry(&self, key: AccelKey, closure: AccelClosure, path: Option<AccelPath>) {
        let weak = Arc::downgrade(&self.inner);
        let notifier = closure.add_invalidate_notifier(move |closure| {
            if let Some(inner) = weak.upgrade() {
                AccelGroup::from_inner(inner).disconnect(Some(closure));
            }
        });
        closure.set_owner(Some(&self.inner));

        let signature = (key.key != 0).then(|| accel_signature(key.key, key.mods));
        let mut entry = AccelEntry::new(key, closure.clone(), path.clone());
        entry.set_notifier(notifier);
        {
            let mut state = self.inner.state.lock();
            let index = state.table.insert(entry);
            if let Some(signature) = &signature {
                state
                    .handlers
                    .entry(signature.clone())
                    .or_default()
                    .push(closure.clone());
            }
            tracing::trace!(
                target: targets::GROUP,
                group = ?self.object_id(),
                index,
                key = key.key,
                mods = key.mods.bits(),
                path = path.as_deref(),
                "accel entry added"
            );
        }

        if let (Some(path), Some(source)) = (&path, &self.inner.path_source) {
            source.register_group(path, self);
        }
        if key.key != 0 {
            self.inner.accel_changed.emit(AccelChange {
                key: key.key,
                mods: key.mods,
                closure,
            });
        }
    }

    fn remove_entry(&self, locate: impl FnOnce(&AccelEntryTable) -> Option<usize>) -> bool {
        let entry = {
            let mut state = self.inner.state.lock();
            let Some(index) = locate(&state.table) else {
                return false;
            };
            let Some(entry) = state.table.get(index) else {
                return false;
            };
            let key = entry.key();
            let closure = entry.closure().clone();
            if let Some(notifier) = entry.notifier() {
                closure.remove_invalidate_notifier(notifier);
            }
            if key.key != 0 {
                let signature = accel_signature(key.key, key.mods);
                if let Some(handlers) = state.handlers.get_mut(&signature) {
                    handlers.retain(|handler| !handler.ptr_eq(&closure));
                    if handlers.is_empty() {
                        state.handlers.remove(&signature);
                    }
                }
            }
            tracing::trace!(
                target: targets::GROUP,
                group = ?self.object_id(),
                index,
                key = key.key,
                mods = key.mods.bits(),
                "accel entry removed"
            );
            state.table.remove_at(index)
        };

        if let (Some(path), Some(source)) = (entry.path(), &self.inner.path_source) {
            source.unregister_group(path, self.object_id());
        }
        entry.closure().set_owner(None);

        let key = entry.key();
        if key.key != 0 {
            self.inner.accel_changed.emit(AccelChange {
                key: key.key,
                mods: key.mods,
                closure: entry.into_closure(),
            });
        }
        true
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Snapshot of the entries bound to `(key, mods)`, in insertion order.
    pub fn query(&self, key: u32, mods: ModifierType) -> Vec<AccelEntry> {
        let key = keyval_to_lower(key);
        let state = self.inner.state.lock();
        let range = state.table.find(key, mods);
        state.table.as_slice()[range].to_vec()
    }

    /// The key of the first entry for which `predicate` returns `true`.
    pub fn find<F>(&self, mut predicate: F) -> Option<AccelKey>
    where
        F: FnMut(&AccelKey, &AccelClosure) -> bool,
    {
        self.entries()
            .into_iter()
            .find(|entry| predicate(&entry.key(), entry.closure()))
            .map(|entry| entry.key())
    }

    /// The group a closure is connected to.
    pub fn from_accel_closure(closure: &AccelClosure) -> Option<AccelGroup> {
        closure.owner()
    }

    /// Snapshot of all entries in table order.
    pub fn entries(&self) -> Vec<AccelEntry> {
        self.inner.state.lock().table.as_slice().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().table.is_empty()
    }

    /// The objects this group is attached to, most recently attached first.
    pub fn acceleratables(&self) -> Vec<ObjectId> {
        self.inner.state.lock().acceleratables.clone()
    }

    pub(crate) fn add_acceleratable(&self, object: ObjectId) {
        self.inner.state.lock().acceleratables.insert(0, object);
    }

    pub(crate) fn remove_acceleratable(&self, object: ObjectId) {
        let mut state = self.inner.state.lock();
        if let Some(pos) = state.acceleratables.iter().position(|id| *id == object) {
            state.acceleratables.remove(pos);
        }
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Run the handlers registered under `signature` until one handles the
    /// event.
    ///
    /// `signature` is the accelerator as built by
    /// [`accel_signature`](crate::accel_signature), e.g. `"<Control>s"`. It
    /// never contains `<Primary>`, so groups and bindings built from
    /// different configurations agree on it.
    /// Handlers run in the order they were connected. Returns whether a
    /// handler returned `true`.
    #[tracing::instrument(
        skip_all,
        name = "accelkit::activate",
        target = "accelkit::group",
        level = "trace",
        fields(signature = %signature)
    )]
    pub fn activate(
        &self,
        signature: &str,
        acceleratable: ObjectId,
        key: u32,
        mods: ModifierType,
    ) -> bool {
        let handlers = match self.inner.state.lock().handlers.get(signature) {
            Some(handlers) => handlers.clone(),
            None => return false,
        };

        for closure in handlers {
            // Skip handlers disconnected by an earlier handler in this run.
            if !closure.is_owned_by(&self.inner) {
                continue;
            }
            if closure.invoke(self, acceleratable, key, mods) {
                tracing::trace!(
                    target: targets::GROUP,
                    closure = closure.id().as_u64(),
                    "accelerator handled"
                );
                return true;
            }
        }
        false
    }
}

impl Object for AccelGroup {
    fn object_id(&self) -> ObjectId {
        self.inner.base.id()
    }
}

impl PartialEq for AccelGroup {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for AccelGroup {}

impl fmt::Debug for AccelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("AccelGroup")
            .field("id", &self.inner.base.id())
            .field("entries", &state.table.len())
            .field("lock_count", &state.lock_count)
            .field("modifier_mask", &self.inner.modifier_mask)
            .finish()
    }
}

/// A non-owning reference to an [`AccelGroup`].
#[derive(Clone)]
pub struct WeakAccelGroup {
    id: ObjectId,
    inner: Weak<GroupInner>,
}

impl WeakAccelGroup {
    /// The group, if it is still alive.
    pub fn upgrade(&self) -> Option<AccelGroup> {
        self.inner.upgrade().map(AccelGroup::from_inner)
    }

    /// The object id of the group, valid even after it was destroyed.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for WeakAccelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakAccelGroup")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccelGroup: Send, Sync);
static_assertions::assert_impl_all!(WeakAccelGroup: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::keysym::keys;

    const S: u32 = 0x73;

    fn group() -> AccelGroup {
        AccelGroup::new(AccelConfig::new())
    }

    fn counting(counter: &Arc<AtomicUsize>, handled: bool) -> AccelClosure {
        let counter = counter.clone();
        AccelClosure::new(move |_, _, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            handled
        })
    }

    fn window() -> ObjectId {
        struct Window;
        accelkit_core::global_registry().register::<Window>()
    }

    // =========================================================================
    // Connect / disconnect
    // =========================================================================

    #[test]
    fn test_connect_lowercases_key() {
        let group = group();
        let closure = AccelClosure::new(|_, _, _, _| true);
        group.connect(u32::from('S'), ModifierType::CONTROL, AccelFlags::VISIBLE, closure);

        let entries = group.query(S, ModifierType::CONTROL);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key().key, S);
        assert_eq!(entries[0].key().flags, AccelFlags::VISIBLE);
        assert_eq!(group.query(u32::from('S'), ModifierType::CONTROL).len(), 1);
    }

    #[test]
    #[should_panic(expected = "without a key")]
    fn test_connect_zero_key_panics() {
        let closure = AccelClosure::new(|_, _, _, _| true);
        group().connect(0, ModifierType::CONTROL, AccelFlags::empty(), closure);
    }

    #[test]
    #[should_panic(expected = "already connected")]
    fn test_connect_bound_closure_panics() {
        let group = group();
        let closure = AccelClosure::new(|_, _, _, _| true);
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure.clone());
        group.connect(u32::from('o'), ModifierType::CONTROL, AccelFlags::empty(), closure);
    }

    #[test]
    fn test_connect_invalid_closure_is_ignored() {
        let group = group();
        let closure = AccelClosure::new(|_, _, _, _| true);
        closure.invalidate();
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure.clone());
        assert!(group.is_empty());
        assert!(AccelGroup::from_accel_closure(&closure).is_none());
    }

    #[test]
    fn test_disconnect_none_removes_first_entry() {
        let group = group();
        let a = AccelClosure::new(|_, _, _, _| true);
        let b = AccelClosure::new(|_, _, _, _| true);
        group.connect(u32::from('z'), ModifierType::empty(), AccelFlags::empty(), a.clone());
        group.connect(u32::from('a'), ModifierType::empty(), AccelFlags::empty(), b.clone());

        assert!(group.disconnect(None));
        assert_eq!(group.len(), 1);
        assert!(group.entries()[0].closure().ptr_eq(&a));
        assert!(group.disconnect(None));
        assert!(!group.disconnect(None));
    }

    #[test]
    fn test_disconnect_clears_owner() {
        let group = group();
        let closure = AccelClosure::new(|_, _, _, _| true);
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure.clone());
        assert!(AccelGroup::from_accel_closure(&closure).is_some_and(|g| g.ptr_eq(&group)));

        assert!(group.disconnect(Some(&closure)));
        assert!(AccelGroup::from_accel_closure(&closure).is_none());
        assert!(!group.disconnect(Some(&closure)));

        // An unbound closure may be connected again.
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_invalidate_disconnects() {
        let group = group();
        let closure = AccelClosure::new(|_, _, _, _| true);
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure.clone());

        closure.invalidate();
        assert!(group.is_empty());
        assert!(!group.activate("<Control>s", window(), S, ModifierType::CONTROL));
    }

    // =========================================================================
    // Signals
    // =========================================================================

    #[test]
    fn test_accel_changed_on_add_and_remove() {
        let group = group();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        group.accel_changed().connect(move |change| {
            seen_clone.lock().push((change.key, change.mods));
        });

        let closure = AccelClosure::new(|_, _, _, _| true);
        group.connect(u32::from('W'), ModifierType::CONTROL, AccelFlags::empty(), closure.clone());
        group.disconnect(Some(&closure));

        assert_eq!(
            *seen.lock(),
            vec![
                (u32::from('w'), ModifierType::CONTROL),
                (u32::from('w'), ModifierType::CONTROL)
            ]
        );
    }

    #[test]
    fn test_lock_edges() {
        let group = group();
        let edges = Arc::new(Mutex::new(Vec::new()));
        let edges_clone = edges.clone();
        group.is_locked_changed().connect(move |locked| edges_clone.lock().push(*locked));

        assert!(!group.is_locked());
        group.lock();
        group.lock();
        assert!(group.is_locked());
        group.unlock();
        assert!(group.is_locked());
        group.unlock();
        assert!(!group.is_locked());

        assert_eq!(*edges.lock(), vec![true, false]);
    }

    #[test]
    #[should_panic(expected = "not locked")]
    fn test_unlock_unlocked_panics() {
        group().unlock();
    }

    // =========================================================================
    // Activation
    // =========================================================================

    #[test]
    fn test_activate_stops_at_first_handled() {
        let group = group();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), counting(&first, false));
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), counting(&second, true));
        group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), counting(&third, true));

        let signature = accel_signature(S, ModifierType::CONTROL);
        assert!(group.activate(&signature, window(), S, ModifierType::CONTROL));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 0);

        assert!(!group.activate("<Control>q", window(), u32::from('q'), ModifierType::CONTROL));
    }

    #[test]
    fn test_handler_may_disconnect_later_handler() {
        let group = group();
        let victim_count = Arc::new(AtomicUsize::new(0));
        let victim = counting(&victim_count, true);

        let victim_clone = victim.clone();
        let killer = AccelClosure::new(move |group, _, _, _| {
            group.disconnect(Some(&victim_clone));
            false
        });
        group.connect(keys::F5, ModifierType::empty(), AccelFlags::empty(), killer);
        group.connect(keys::F5, ModifierType::empty(), AccelFlags::empty(), victim);

        let signature = accel_signature(keys::F5, ModifierType::empty());
        assert!(!group.activate(&signature, window(), keys::F5, ModifierType::empty()));
        assert_eq!(victim_count.load(Ordering::SeqCst), 0);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_find() {
        let group = group();
        let target = AccelClosure::new(|_, _, _, _| true);
        let other = AccelClosure::new(|_, _, _, _| true);
        group.connect(u32::from('a'), ModifierType::empty(), AccelFlags::empty(), other);
        group.connect(u32::from('b'), ModifierType::SHIFT, AccelFlags::LOCKED, target.clone());

        let found = group.find(|_, closure| closure.ptr_eq(&target)).unwrap();
        assert_eq!(found.key, u32::from('b'));
        assert_eq!(found.mods, ModifierType::SHIFT);
        assert_eq!(found.flags, AccelFlags::LOCKED);
        assert!(group.find(|key, _| key.key == 0).is_none());
    }

    #[test]
    fn test_drop_unbinds_closures() {
        let closure = AccelClosure::new(|_, _, _, _| true);
        {
            let group = group();
            group.connect(S, ModifierType::CONTROL, AccelFlags::empty(), closure.clone());
        }
        assert!(AccelGroup::from_accel_closure(&closure).is_none());
        // Invalidating after the group is gone must not panic.
        closure.invalidate();
    }

    #[test]
    fn test_acceleratables_most_recent_first() {
        let group = group();
        let (a, b) = (window(), window());
        group.add_acceleratable(a);
        group.add_acceleratable(b);
        assert_eq!(group.acceleratables(), vec![b, a]);
        group.remove_acceleratable(b);
        assert_eq!(group.acceleratables(), vec![a]);
    }
}
