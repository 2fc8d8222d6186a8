//! Accelerator entries and the sorted per-group entry table.
//!
//! Entries are kept ordered by `(key, mods)` so that every binding for a
//! chord forms one contiguous run that a binary search can locate. Among
//! entries with the same chord, insertion order is preserved.

use std::borrow::Borrow;
use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

use crate::closure::{AccelClosure, NotifierId};
use crate::modifier::{AccelFlags, ModifierType};

// ============================================================================
// AccelKey
// ============================================================================

/// A key and modifier chord, with per-entry flags.
///
/// Ordering in an [`AccelEntryTable`] only looks at `key` and `mods`; the
/// flags ride along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccelKey {
    pub key: u32,
    pub mods: ModifierType,
    pub flags: AccelFlags,
}

impl AccelKey {
    pub const fn new(key: u32, mods: ModifierType, flags: AccelFlags) -> Self {
        Self { key, mods, flags }
    }

    /// The chord with no key, used for unresolved paths.
    pub const fn none() -> Self {
        Self::new(0, ModifierType::empty(), AccelFlags::empty())
    }

    /// The table ordering key.
    #[inline]
    pub fn sort_key(&self) -> (u32, u32) {
        (self.key, self.mods.bits())
    }

    /// Whether this key has the given chord, ignoring flags.
    #[inline]
    pub fn matches(&self, key: u32, mods: ModifierType) -> bool {
        self.key == key && self.mods == mods
    }
}

impl Default for AccelKey {
    fn default() -> Self {
        Self::none()
    }
}

// ============================================================================
// AccelPath
// ============================================================================

/// An interned accelerator path such as `<MainWindow>/File/Save`.
///
/// Cloning is a reference count bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccelPath(Arc<str>);

impl AccelPath {
    pub fn new(path: &str) -> Self {
        Self(Arc::from(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for AccelPath {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AccelPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccelPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Debug for AccelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for AccelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// AccelEntry
// ============================================================================

/// One binding in a group: a chord, the closure it runs and an optional
/// accelerator path.
#[derive(Clone)]
pub struct AccelEntry {
    key: AccelKey,
    closure: AccelClosure,
    path: Option<AccelPath>,
    notifier: Option<NotifierId>,
}

impl AccelEntry {
    pub fn new(key: AccelKey, closure: AccelClosure, path: Option<AccelPath>) -> Self {
        Self {
            key,
            closure,
            path,
            notifier: None,
        }
    }

    pub fn key(&self) -> AccelKey {
        self.key
    }

    pub fn closure(&self) -> &AccelClosure {
        &self.closure
    }

    /// The accelerator path this entry tracks, if any.
    pub fn path(&self) -> Option<&AccelPath> {
        self.path.as_ref()
    }

    pub(crate) fn notifier(&self) -> Option<NotifierId> {
        self.notifier
    }

    pub(crate) fn set_notifier(&mut self, id: NotifierId) {
        self.notifier = Some(id);
    }

    pub(crate) fn into_closure(self) -> AccelClosure {
        self.closure
    }
}

impl fmt::Debug for AccelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelEntry")
            .field("key", &self.key)
            .field("closure", &self.closure.id())
            .field("path", &self.path)
            .finish()
    }
}

// ============================================================================
// AccelEntryTable
// ============================================================================

/// The sorted entry array of an accelerator group.
///
/// The table only keeps order; ownership side effects (notifiers, handlers,
/// path registration) are applied by the group around it.
#[derive(Default, Clone, Debug)]
pub struct AccelEntryTable {
    entries: Vec<AccelEntry>,
}

impl AccelEntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AccelEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccelEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AccelEntry] {
        &self.entries
    }

    /// Insert an entry after any entries with the same chord and return its
    /// index.
    pub fn insert(&mut self, entry: AccelEntry) -> usize {
        let target = entry.key.sort_key();
        let index = self
            .entries
            .partition_point(|existing| existing.key.sort_key() <= target);
        self.entries.insert(index, entry);
        debug_assert!(self.is_sorted());
        index
    }

    /// The index range of every entry bound to `(key, mods)`.
    ///
    /// The range is empty when there is none; its start is then where such
    /// an entry would be inserted.
    pub fn find(&self, key: u32, mods: ModifierType) -> Range<usize> {
        let target = (key, mods.bits());
        let start = self
            .entries
            .partition_point(|entry| entry.key.sort_key() < target);
        let len = self.entries[start..]
            .iter()
            .take_while(|entry| entry.key.sort_key() == target)
            .count();
        start..start + len
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> AccelEntry {
        let entry = self.entries.remove(index);
        debug_assert!(self.is_sorted());
        entry
    }

    /// The index of the entry holding `closure`.
    pub fn position_of(&self, closure: &AccelClosure) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.closure.ptr_eq(closure))
    }

    /// Clones of the closures in `range`.
    pub fn closures_in(&self, range: Range<usize>) -> Vec<AccelClosure> {
        self.entries[range]
            .iter()
            .map(|entry| entry.closure.clone())
            .collect()
    }

    /// Clones of the closures tracking `path`, in table order.
    pub fn closures_with_path(&self, path: &str) -> Vec<AccelClosure> {
        self.entries
            .iter()
            .filter(|entry| entry.path.as_deref() == Some(path))
            .map(|entry| entry.closure.clone())
            .collect()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, AccelEntry> {
        self.entries.drain(..)
    }

    fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].key.sort_key() <= pair[1].key.sort_key())
    }
}

impl<'a> IntoIterator for &'a AccelEntryTable {
    type Item = &'a AccelEntry;
    type IntoIter = std::slice::Iter<'a, AccelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closure() -> AccelClosure {
        AccelClosure::new(|_, _, _, _| true)
    }

    fn entry(key: u32, mods: ModifierType) -> AccelEntry {
        AccelEntry::new(AccelKey::new(key, mods, AccelFlags::empty()), closure(), None)
    }

    fn chords(table: &AccelEntryTable) -> Vec<(u32, u32)> {
        table.iter().map(|e| e.key().sort_key()).collect()
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut table = AccelEntryTable::new();
        table.insert(entry(0x73, ModifierType::CONTROL));
        table.insert(entry(0x61, ModifierType::empty()));
        table.insert(entry(0x73, ModifierType::SHIFT));
        table.insert(entry(0x62, ModifierType::MOD1));

        assert_eq!(
            chords(&table),
            vec![(0x61, 0), (0x62, 0x08), (0x73, 0x01), (0x73, 0x04)]
        );
    }

    #[test]
    fn test_duplicates_keep_insertion_order() {
        let mut table = AccelEntryTable::new();
        let first = entry(0x73, ModifierType::CONTROL);
        let second = entry(0x73, ModifierType::CONTROL);
        let third = entry(0x73, ModifierType::CONTROL);
        let ids = [first.closure().id(), second.closure().id(), third.closure().id()];

        assert_eq!(table.insert(first), 0);
        assert_eq!(table.insert(entry(0x7a, ModifierType::empty())), 1);
        assert_eq!(table.insert(second), 1);
        assert_eq!(table.insert(third), 2);

        let range = table.find(0x73, ModifierType::CONTROL);
        assert_eq!(range, 0..3);
        let found: Vec<_> = table.closures_in(range).iter().map(|c| c.id()).collect();
        assert_eq!(found, ids);
    }

    #[test]
    fn test_find_run() {
        let mut table = AccelEntryTable::new();
        for key in [0x61, 0x62, 0x62, 0x62, 0x63] {
            table.insert(entry(key, ModifierType::empty()));
        }
        table.insert(entry(0x62, ModifierType::CONTROL));

        assert_eq!(table.find(0x62, ModifierType::empty()), 1..4);
        assert_eq!(table.find(0x62, ModifierType::CONTROL), 4..5);
        assert_eq!(table.find(0x61, ModifierType::empty()), 0..1);
        assert!(table.find(0x64, ModifierType::empty()).is_empty());
        assert!(table.find(0x62, ModifierType::SHIFT).is_empty());
        assert!(AccelEntryTable::new().find(1, ModifierType::empty()).is_empty());
    }

    #[test]
    fn test_remove_and_position() {
        let mut table = AccelEntryTable::new();
        let target = entry(0x62, ModifierType::empty());
        let closure = target.closure().clone();
        table.insert(entry(0x61, ModifierType::empty()));
        table.insert(target);
        table.insert(entry(0x63, ModifierType::empty()));

        let index = table.position_of(&closure).unwrap();
        assert_eq!(index, 1);
        let removed = table.remove_at(index);
        assert!(removed.closure().ptr_eq(&closure));
        assert_eq!(chords(&table), vec![(0x61, 0), (0x63, 0)]);
        assert!(table.position_of(&closure).is_none());
    }

    #[test]
    fn test_closures_with_path() {
        let mut table = AccelEntryTable::new();
        let save = AccelEntry::new(AccelKey::none(), closure(), Some("<App>/File/Save".into()));
        let save_id = save.closure().id();
        table.insert(save);
        table.insert(entry(0x71, ModifierType::CONTROL));

        let closures = table.closures_with_path("<App>/File/Save");
        assert_eq!(closures.len(), 1);
        assert_eq!(closures[0].id(), save_id);
        assert!(table.closures_with_path("<App>/File/Open").is_empty());
    }

    #[test]
    fn test_sorted_after_mixed_operations() {
        let mut table = AccelEntryTable::new();
        let mut seed = 17u32;
        for round in 0..64 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let key = 0x61 + (seed >> 16) % 8;
            let mods = ModifierType::from_bits_retain((seed >> 8) % 4);
            table.insert(entry(key, mods));
            if round % 3 == 0 {
                let index = (seed as usize) % table.len();
                table.remove_at(index);
            }
            let keys = chords(&table);
            assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_accel_path() {
        let path = AccelPath::from("<App>/Edit/Copy");
        assert_eq!(path.as_str(), "<App>/Edit/Copy");
        assert_eq!(path.to_string(), "<App>/Edit/Copy");
        assert!(path.starts_with("<App>"));
        assert_eq!(path, path.clone());
    }
}
