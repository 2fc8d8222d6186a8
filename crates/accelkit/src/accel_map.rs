//! The accelerator map: user-remappable accelerators addressed by path.
//!
//! An accelerator path names an action independently of its chord, e.g.
//! `<MainWindow>/File/Save`. Groups bind closures to paths with
//! [`AccelGroup::connect_by_path`]; the chord comes from an
//! [`AccelPathSource`], and when the chord changes every group tracking the
//! path rebinds its entries.
//!
//! [`AccelMap`] is the in-memory path source.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use accelkit_core::logging::targets;
use accelkit_core::{Object, ObjectId, Signal};
use parking_lot::Mutex;

use crate::entry::{AccelKey, AccelPath};
use crate::error::{AccelError, Result};
use crate::group::{AccelGroup, WeakAccelGroup};
use crate::keysym::keyval_to_lower;
use crate::modifier::{AccelFlags, ModifierType};

/// Resolves accelerator paths for a group and tracks which groups use them.
pub trait AccelPathSource: Send + Sync {
    /// The chord currently mapped to `path`.
    fn lookup_entry(&self, path: &str) -> Option<AccelKey>;

    /// Record that `group` has an entry tracking `path`.
    ///
    /// Called once per entry, so a group may be registered for the same
    /// path more than once.
    fn register_group(&self, path: &str, group: &AccelGroup);

    /// Undo one [`register_group`](Self::register_group) call.
    ///
    /// Receives the group's id because this also runs while the group is
    /// being destroyed.
    fn unregister_group(&self, path: &str, group: ObjectId);
}

/// Check the `<Scope>/...` shape of an accelerator path.
///
/// The path must start with `<`, contain a non-empty scope closed by `>`,
/// and the `>` must end the path or be followed by `/`.
pub fn is_valid_accel_path(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('<') else {
        return false;
    };
    if rest.is_empty() || rest.starts_with(['<', '>']) {
        return false;
    }
    match rest.find('>') {
        Some(pos) => matches!(rest.as_bytes().get(pos + 1), None | Some(b'/')),
        None => false,
    }
}

/// Arguments of the [`changed`](AccelMap::changed) signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelMapChange {
    pub path: AccelPath,
    pub key: u32,
    pub mods: ModifierType,
}

#[derive(Debug)]
struct MapEntry {
    key: u32,
    mods: ModifierType,
    lock_count: u32,
    /// One element per tracking entry.
    groups: Vec<WeakAccelGroup>,
}

impl MapEntry {
    fn new(key: u32, mods: ModifierType) -> Self {
        Self {
            key,
            mods,
            lock_count: 0,
            groups: Vec::new(),
        }
    }

    fn accel_key(&self) -> AccelKey {
        AccelKey::new(self.key, self.mods, AccelFlags::empty())
    }
}

struct MapInner {
    entries: Mutex<BTreeMap<AccelPath, MapEntry>>,
    changed: Signal<AccelMapChange>,
}

/// In-memory accelerator map.
///
/// `AccelMap` is a cheap-to-clone handle; clones share the same map. It
/// only holds groups weakly.
///
/// # Example
///
/// ```
/// use accelkit::{AccelClosure, AccelConfig, AccelGroup, AccelMap, ModifierType};
///
/// let map = AccelMap::new();
/// map.add_entry("<Editor>/File/Save", u32::from('s'), ModifierType::CONTROL).unwrap();
///
/// let group = AccelGroup::with_path_source(AccelConfig::new(), map.source());
/// group.connect_by_path("<Editor>/File/Save", AccelClosure::new(|_, _, _, _| true));
/// assert_eq!(group.query(u32::from('s'), ModifierType::CONTROL).len(), 1);
///
/// map.change_entry("<Editor>/File/Save", u32::from('w'), ModifierType::CONTROL, false).unwrap();
/// assert!(group.query(u32::from('s'), ModifierType::CONTROL).is_empty());
/// assert_eq!(group.query(u32::from('w'), ModifierType::CONTROL).len(), 1);
/// ```
#[derive(Clone)]
pub struct AccelMap {
    inner: Arc<MapInner>,
}

impl Default for AccelMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelMap {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MapInner {
                entries: Mutex::new(BTreeMap::new()),
                changed: Signal::new(),
            }),
        }
    }

    /// This map as a path source for [`AccelGroup::with_path_source`].
    pub fn source(&self) -> Arc<dyn AccelPathSource> {
        Arc::new(self.clone())
    }

    /// Emitted after the chord of a path changed.
    pub fn changed(&self) -> &Signal<AccelMapChange> {
        &self.inner.changed
    }

    /// Add a path with its default chord. Existing entries are left alone.
    pub fn add_entry(&self, path: &str, key: u32, mods: ModifierType) -> Result<()> {
        if !is_valid_accel_path(path) {
            return Err(AccelError::invalid_path(path));
        }
        let key = keyval_to_lower(key);
        let mut entries = self.inner.entries.lock();
        if !entries.contains_key(path) {
            tracing::trace!(
                target: targets::ACCEL_MAP,
                path,
                key,
                mods = mods.bits(),
                "accel map entry added"
            );
            entries.insert(AccelPath::new(path), MapEntry::new(key, mods));
        }
        Ok(())
    }

    /// The chord mapped to `path`.
    pub fn lookup_entry(&self, path: &str) -> Option<AccelKey> {
        self.inner.entries.lock().get(path).map(MapEntry::accel_key)
    }

    /// Map `path` to a new chord and rebind every group tracking it.
    ///
    /// Fails if the path is unknown, or if it or a live group tracking it
    /// is locked. If other paths already use the chord, the change fails
    /// with [`AccelError::Conflict`] unless `replace` is set, in which case
    /// those paths lose their chord (they must not be locked either).
    #[tracing::instrument(
        skip_all,
        name = "accelkit::map_change",
        target = "accelkit::accel_map",
        level = "trace",
        fields(path = %path)
    )]
    pub fn change_entry(
        &self,
        path: &str,
        key: u32,
        mods: ModifierType,
        replace: bool,
    ) -> Result<()> {
        let key = keyval_to_lower(key);

        let (tracked, conflicts) = {
            let entries = self.inner.entries.lock();
            let Some(entry) = entries.get(path) else {
                return Err(AccelError::unknown_path(path));
            };
            if entry.lock_count > 0 {
                tracing::warn!(
                    target: targets::ACCEL_MAP,
                    path,
                    "accel map change rejected, path is locked"
                );
                return Err(AccelError::path_locked(path));
            }
            let conflicts: Vec<(AccelPath, u32, Vec<WeakAccelGroup>)> = if key == 0 {
                Vec::new()
            } else {
                entries
                    .iter()
                    .filter(|(other, e)| other.as_str() != path && e.key == key && e.mods == mods)
                    .map(|(other, e)| (other.clone(), e.lock_count, e.groups.clone()))
                    .collect()
            };
            (entry.groups.clone(), conflicts)
        };

        // Upgraded outside the map lock: dropping the last handle of a
        // group unregisters its paths.
        if any_locked(&tracked) {
            tracing::warn!(
                target: targets::ACCEL_MAP,
                path,
                "accel map change rejected, group is locked"
            );
            return Err(AccelError::path_locked(path));
        }
        for (other, lock_count, groups) in &conflicts {
            if !replace {
                tracing::warn!(
                    target: targets::ACCEL_MAP,
                    path,
                    other = other.as_str(),
                    "accel map change rejected, conflict"
                );
                return Err(AccelError::conflict(path, other.as_str()));
            }
            if *lock_count > 0 || any_locked(groups) {
                tracing::warn!(
                    target: targets::ACCEL_MAP,
                    path,
                    other = other.as_str(),
                    "accel map change rejected, conflicting path is locked"
                );
                return Err(AccelError::path_locked(other.as_str()));
            }
        }

        let mut changed = Vec::with_capacity(conflicts.len() + 1);
        {
            let mut entries = self.inner.entries.lock();
            for (other, _, _) in &conflicts {
                if let Some(entry) = entries.get_mut(other.as_str()) {
                    entry.key = 0;
                    entry.mods = ModifierType::empty();
                    changed.push(AccelMapChange {
                        path: other.clone(),
                        key: 0,
                        mods: ModifierType::empty(),
                    });
                }
            }
            let stored = entries.get_key_value(path).map(|(stored, _)| stored.clone());
            if let (Some(stored), Some(entry)) = (stored, entries.get_mut(path)) {
                entry.key = key;
                entry.mods = mods;
                changed.push(AccelMapChange {
                    path: stored,
                    key,
                    mods,
                });
            }
        }

        for change in changed {
            tracing::debug!(
                target: targets::ACCEL_MAP,
                path = change.path.as_str(),
                key = change.key,
                mods = change.mods.bits(),
                "accel map entry changed"
            );
            for group in self.tracking_groups(&change.path) {
                group.reconnect_by_path(&change.path);
            }
            self.inner.changed.emit(change);
        }
        Ok(())
    }

    /// Forbid changes to `path` until a matching
    /// [`unlock_path`](Self::unlock_path). Locks nest.
    pub fn lock_path(&self, path: &str) -> Result<()> {
        let mut entries = self.inner.entries.lock();
        let entry = entries
            .get_mut(path)
            .ok_or_else(|| AccelError::unknown_path(path))?;
        entry.lock_count += 1;
        Ok(())
    }

    /// Undo one [`lock_path`](Self::lock_path).
    pub fn unlock_path(&self, path: &str) -> Result<()> {
        let mut entries = self.inner.entries.lock();
        let entry = entries
            .get_mut(path)
            .ok_or_else(|| AccelError::unknown_path(path))?;
        if entry.lock_count == 0 {
            tracing::warn!(
                target: targets::ACCEL_MAP,
                path,
                "unlock_path on a path that is not locked"
            );
        } else {
            entry.lock_count -= 1;
        }
        Ok(())
    }

    pub fn is_path_locked(&self, path: &str) -> bool {
        self.inner
            .entries
            .lock()
            .get(path)
            .is_some_and(|entry| entry.lock_count > 0)
    }

    /// Call `f` for every entry, in path order.
    pub fn foreach<F>(&self, mut f: F)
    where
        F: FnMut(&str, AccelKey),
    {
        let snapshot: Vec<(AccelPath, AccelKey)> = self
            .inner
            .entries
            .lock()
            .iter()
            .map(|(path, entry)| (path.clone(), entry.accel_key()))
            .collect();
        for (path, key) in snapshot {
            f(&path, key);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    /// Live groups tracking `path`, each once.
    fn tracking_groups(&self, path: &str) -> Vec<AccelGroup> {
        let weak: Vec<WeakAccelGroup> = self
            .inner
            .entries
            .lock()
            .get(path)
            .map(|entry| entry.groups.clone())
            .unwrap_or_default();

        let mut groups: Vec<AccelGroup> = Vec::with_capacity(weak.len());
        for group in weak.iter().filter_map(WeakAccelGroup::upgrade) {
            if !groups.iter().any(|seen| seen.ptr_eq(&group)) {
                groups.push(group);
            }
        }
        groups
    }
}

fn any_locked(groups: &[WeakAccelGroup]) -> bool {
    groups
        .iter()
        .filter_map(WeakAccelGroup::upgrade)
        .any(|group| group.is_locked())
}

impl AccelPathSource for AccelMap {
    fn lookup_entry(&self, path: &str) -> Option<AccelKey> {
        AccelMap::lookup_entry(self, path)
    }

    fn register_group(&self, path: &str, group: &AccelGroup) {
        let mut entries = self.inner.entries.lock();
        if !entries.contains_key(path) {
            entries.insert(AccelPath::new(path), MapEntry::new(0, ModifierType::empty()));
        }
        if let Some(entry) = entries.get_mut(path) {
            entry.groups.retain(WeakAccelGroup::is_alive);
            entry.groups.push(group.downgrade());
        }
        tracing::trace!(
            target: targets::ACCEL_MAP,
            path,
            group = ?group.object_id(),
            "group registered for path"
        );
    }

    fn unregister_group(&self, path: &str, group: ObjectId) {
        let mut entries = self.inner.entries.lock();
        if let Some(entry) = entries.get_mut(path)
            && let Some(pos) = entry.groups.iter().position(|weak| weak.id() == group)
        {
            entry.groups.remove(pos);
        }
    }
}

impl fmt::Debug for AccelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelMap")
            .field("entries", &self.inner.entries.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccelMap: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    const SAVE: &str = "<Editor>/File/Save";
    const QUIT: &str = "<Editor>/File/Quit";

    #[test]
    fn test_valid_paths() {
        assert!(is_valid_accel_path("<Editor>/File/Save"));
        assert!(is_valid_accel_path("<Editor>"));
        assert!(is_valid_accel_path("<a>/b"));
        assert!(!is_valid_accel_path(""));
        assert!(!is_valid_accel_path("<"));
        assert!(!is_valid_accel_path("<>"));
        assert!(!is_valid_accel_path("<<Editor>/File"));
        assert!(!is_valid_accel_path("Editor/File"));
        assert!(!is_valid_accel_path("<Editor/File"));
        assert!(!is_valid_accel_path("<Editor>File"));
    }

    #[test]
    fn test_add_and_lookup() {
        let map = AccelMap::new();
        map.add_entry(SAVE, u32::from('S'), ModifierType::CONTROL).unwrap();
        map.add_entry(SAVE, u32::from('x'), ModifierType::empty()).unwrap();

        let key = map.lookup_entry(SAVE).unwrap();
        assert_eq!((key.key, key.mods), (u32::from('s'), ModifierType::CONTROL));
        assert_eq!(map.len(), 1);
        assert!(map.lookup_entry(QUIT).is_none());
        assert_eq!(
            map.add_entry("File/Save", 1, ModifierType::empty()),
            Err(AccelError::invalid_path("File/Save"))
        );
    }

    #[test]
    fn test_change_unknown_path() {
        let map = AccelMap::new();
        assert_eq!(
            map.change_entry(SAVE, 1, ModifierType::empty(), false),
            Err(AccelError::unknown_path(SAVE))
        );
    }

    #[test]
    fn test_conflict_and_replace() {
        let map = AccelMap::new();
        map.add_entry(SAVE, u32::from('s'), ModifierType::CONTROL).unwrap();
        map.add_entry(QUIT, u32::from('q'), ModifierType::CONTROL).unwrap();

        assert_eq!(
            map.change_entry(QUIT, u32::from('s'), ModifierType::CONTROL, false),
            Err(AccelError::conflict(QUIT, SAVE))
        );

        map.change_entry(QUIT, u32::from('s'), ModifierType::CONTROL, true).unwrap();
        assert_eq!(map.lookup_entry(SAVE).unwrap().key, 0);
        assert_eq!(map.lookup_entry(QUIT).unwrap().key, u32::from('s'));
    }

    #[test]
    fn test_locked_path_rejects_change() {
        let map = AccelMap::new();
        map.add_entry(SAVE, u32::from('s'), ModifierType::CONTROL).unwrap();
        map.lock_path(SAVE).unwrap();
        assert!(map.is_path_locked(SAVE));
        assert_eq!(
            map.change_entry(SAVE, u32::from('w'), ModifierType::CONTROL, false),
            Err(AccelError::path_locked(SAVE))
        );
        map.unlock_path(SAVE).unwrap();
        assert!(map.change_entry(SAVE, u32::from('w'), ModifierType::CONTROL, false).is_ok());
    }

    #[test]
    fn test_replace_locked_conflict_fails() {
        let map = AccelMap::new();
        map.add_entry(SAVE, u32::from('s'), ModifierType::CONTROL).unwrap();
        map.add_entry(QUIT, u32::from('q'), ModifierType::CONTROL).unwrap();
        map.lock_path(SAVE).unwrap();
        assert_eq!(
            map.change_entry(QUIT, u32::from('s'), ModifierType::CONTROL, true),
            Err(AccelError::path_locked(SAVE))
        );
        assert_eq!(map.lookup_entry(QUIT).unwrap().key, u32::from('q'));
    }

    #[test]
    fn test_changed_signal_and_foreach() {
        let map = AccelMap::new();
        map.add_entry(SAVE, u32::from('s'), ModifierType::CONTROL).unwrap();
        map.add_entry(QUIT, u32::from('q'), ModifierType::CONTROL).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        map.changed().connect(move |change| seen_clone.lock().push(change.path.to_string()));
        map.change_entry(QUIT, u32::from('s'), ModifierType::CONTROL, true).unwrap();
        assert_eq!(*seen.lock(), vec![SAVE.to_string(), QUIT.to_string()]);

        let mut paths = Vec::new();
        map.foreach(|path, key| paths.push((path.to_string(), key.key)));
        assert_eq!(
            paths,
            vec![(QUIT.to_string(), u32::from('s')), (SAVE.to_string(), 0)]
        );
    }
}
