//! Object lifecycle registry for accelkit.
//!
//! Provides the minimal object model the accelerator subsystem needs:
//! - Unique object identifiers via arena-based storage
//! - Object naming for debugging
//! - Weak references: destruction hooks that fire exactly once when an
//!   object is destroyed, without keeping the object alive
//!
//! Anything that can have accelerator groups attached (windows, menus,
//! arbitrary owners) is identified by an [`ObjectId`]. Code that wants to
//! learn about an object's destruction registers a hook with
//! [`SharedObjectRegistry::add_weak_ref`] instead of storing a strong
//! reference to the object.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Registry managing all objects and their hooks
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles. They become invalid when the object
    /// is destroyed and are never reused for a different live object.
    pub struct ObjectId;
}

new_key_type! {
    /// Identifies a destruction hook registered on an object.
    ///
    /// Returned by [`SharedObjectRegistry::add_weak_ref`] and consumed by
    /// [`SharedObjectRegistry::remove_weak_ref`].
    pub struct WeakRefId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Note: This does not check if the ObjectId exists in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// The weak reference was never registered or has already been removed.
    InvalidWeakRef,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::InvalidWeakRef => write!(f, "Invalid or already removed weak reference"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// A destruction hook. Receives the id of the object being destroyed.
pub type WeakNotify = Box<dyn FnOnce(ObjectId) + Send + Sync + 'static>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    /// Human-readable name for debugging.
    name: String,
    /// The type name for debugging.
    type_name: &'static str,
    /// Destruction hooks, fired in registration order.
    weak_refs: Vec<(WeakRefId, WeakNotify)>,
}

/// The registry that tracks live objects and their destruction hooks.
///
/// This type does not run hooks itself: [`destroy`](Self::destroy) hands
/// them back so the caller can invoke them after releasing any lock around
/// the registry. [`SharedObjectRegistry`] does exactly that.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
    /// Owner of every registered hook.
    weak_owners: SlotMap<WeakRefId, ObjectId>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            weak_owners: SlotMap::with_key(),
        }
    }

    /// Register a new object of type `T` and return its ID.
    pub fn register<T: 'static>(&mut self) -> ObjectId {
        self.register_type_name(std::any::type_name::<T>())
    }

    /// Register a new object with an explicit type name.
    pub fn register_type_name(&mut self, type_name: &'static str) -> ObjectId {
        let id = self.objects.insert(ObjectData {
            name: String::new(),
            type_name,
            weak_refs: Vec::new(),
        });
        tracing::trace!(target: targets::OBJECT, ?id, type_name, "registered object");
        id
    }

    /// Remove an object from the registry, returning its pending hooks.
    ///
    /// The hooks are returned in registration order and must be invoked by
    /// the caller with the destroyed id.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<Vec<WeakNotify>> {
        let data = self.objects.remove(id).ok_or(ObjectError::InvalidObjectId)?;
        Ok(data
            .weak_refs
            .into_iter()
            .map(|(weak, hook)| {
                self.weak_owners.remove(weak);
                hook
            })
            .collect())
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name;
        Ok(())
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Register a destruction hook on an object.
    pub fn add_weak_ref(&mut self, id: ObjectId, notify: WeakNotify) -> ObjectResult<WeakRefId> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        let weak = self.weak_owners.insert(id);
        data.weak_refs.push((weak, notify));
        Ok(weak)
    }

    /// Remove a destruction hook without running it.
    pub fn remove_weak_ref(&mut self, id: ObjectId, weak: WeakRefId) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        if self.weak_owners.get(weak) != Some(&id) {
            return Err(ObjectError::InvalidWeakRef);
        }
        self.weak_owners.remove(weak);
        data.weak_refs.retain(|(key, _)| *key != weak);
        Ok(())
    }

    /// Number of destruction hooks currently registered on an object.
    pub fn weak_ref_count(&self, id: ObjectId) -> ObjectResult<usize> {
        self.objects
            .get(id)
            .map(|d| d.weak_refs.len())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the total number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all live object ids.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ObjectRegistry`].
///
/// Unlike the bare registry, [`destroy`](Self::destroy) runs the object's
/// destruction hooks, after the write lock has been released so hooks may
/// call back into the registry.
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared object registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object.
    pub fn register<T: 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Register a new object with an explicit type name.
    pub fn register_type_name(&self, type_name: &'static str) -> ObjectId {
        self.inner.write().register_type_name(type_name)
    }

    /// Destroy an object and run its destruction hooks.
    #[tracing::instrument(
        skip(self),
        name = "accelkit_core::destroy",
        target = "accelkit_core::object",
        level = "trace"
    )]
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        let hooks = self.inner.write().destroy(id)?;
        tracing::debug!(
            target: targets::OBJECT,
            ?id,
            hook_count = hooks.len(),
            "destroying object"
        );
        for hook in hooks {
            hook(id);
        }
        Ok(())
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(|s| s.to_string())
    }

    /// Set the object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Register a destruction hook on an object.
    ///
    /// The hook runs once, when the object is destroyed, unless it is
    /// removed first with [`remove_weak_ref`](Self::remove_weak_ref).
    pub fn add_weak_ref<F>(&self, id: ObjectId, notify: F) -> ObjectResult<WeakRefId>
    where
        F: FnOnce(ObjectId) + Send + Sync + 'static,
    {
        self.inner.write().add_weak_ref(id, Box::new(notify))
    }

    /// Remove a destruction hook without running it.
    pub fn remove_weak_ref(&self, id: ObjectId, weak: WeakRefId) -> ObjectResult<()> {
        self.inner.write().remove_weak_ref(id, weak)
    }

    /// Number of destruction hooks registered on an object.
    pub fn weak_ref_count(&self, id: ObjectId) -> ObjectResult<usize> {
        self.inner.read().weak_ref_count(id)
    }

    /// Get the total number of live objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Access the registry with a read lock for complex operations.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ObjectRegistry) -> R,
    {
        f(&self.inner.read())
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedObjectRegistry")
            .field("objects", &self.object_count())
            .finish()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Get the process-wide object registry, creating it on first use.
pub fn global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new)
}

/// The base trait for objects that participate in the registry.
///
/// # Example
///
/// ```
/// use accelkit_core::{Object, ObjectBase, ObjectId};
///
/// struct Window {
///     base: ObjectBase,
///     title: String,
/// }
///
/// impl Window {
///     fn new(title: &str) -> Self {
///         Self {
///             base: ObjectBase::new::<Self>(),
///             title: title.to_string(),
///         }
///     }
/// }
///
/// impl Object for Window {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let window = Window::new("Editor");
/// assert_eq!(window.title, "Editor");
/// ```
pub trait Object: Any + Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Helper for implementing the [`Object`] trait.
///
/// Registers the object with the [`global_registry`] on construction and
/// destroys it (running its destruction hooks) when dropped.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    pub fn new<T: Object + 'static>() -> Self {
        let id = global_registry().register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry().object_name(self.id).unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        let _ = global_registry().set_object_name(self.id, name.into());
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        let _ = global_registry().destroy(self.id);
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase").field("id", &self.id).finish()
    }
}

static_assertions::assert_impl_all!(SharedObjectRegistry: Send, Sync);
