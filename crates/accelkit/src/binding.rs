//! Bindings between acceleratable objects and accelerator groups.
//!
//! [`AccelBindings`] relates objects (usually windows) to the groups whose
//! accelerators they respond to. The object side is never owned: the
//! binding registry only knows the object's [`ObjectId`] and installs one
//! destruction hook per bound object, so destroying the object drops all of
//! its bindings. Groups are held strongly while attached.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use accelkit_core::logging::targets;
use accelkit_core::{global_registry, Object, ObjectId, SharedObjectRegistry, WeakRefId};
use parking_lot::Mutex;

use crate::codec::{accel_signature, AcceleratorCodec};
use crate::config::AccelConfig;
use crate::error::Result;
use crate::group::AccelGroup;
use crate::modifier::ModifierType;

/// The groups attached to one object, most recently attached first.
struct Binding {
    groups: Vec<AccelGroup>,
    hook: WeakRefId,
}

struct BindingsInner {
    registry: &'static SharedObjectRegistry,
    codec: AcceleratorCodec,
    table: Mutex<HashMap<ObjectId, Binding>>,
}

impl BindingsInner {
    /// Drop every binding of a destroyed object.
    fn object_destroyed(&self, object: ObjectId) {
        let Some(binding) = self.table.lock().remove(&object) else {
            return;
        };
        tracing::debug!(
            target: targets::BINDING,
            ?object,
            groups = binding.groups.len(),
            "acceleratable destroyed"
        );
        for group in &binding.groups {
            group.remove_acceleratable(object);
        }
    }
}

impl Drop for BindingsInner {
    fn drop(&mut self) {
        for (object, binding) in self.table.get_mut().drain() {
            if let Err(error) = self.registry.remove_weak_ref(object, binding.hook) {
                tracing::trace!(
                    target: targets::BINDING,
                    ?object,
                    %error,
                    "destroy hook already gone"
                );
            }
            for group in &binding.groups {
                group.remove_acceleratable(object);
            }
        }
    }
}

/// Registry of which accelerator groups are attached to which objects.
///
/// A cheap-to-clone handle; clones share the same table.
///
/// # Example
///
/// ```
/// use accelkit::{AccelBindings, AccelClosure, AccelConfig, AccelFlags, AccelGroup, ModifierType};
/// use accelkit_core::global_registry;
///
/// struct Window;
///
/// let config = AccelConfig::new();
/// let bindings = AccelBindings::new(config.clone());
/// let group = AccelGroup::new(config);
/// let new = AccelClosure::new(|_, _, _, _| true);
/// group.connect(u32::from('n'), ModifierType::CONTROL, AccelFlags::VISIBLE, new);
///
/// let window = global_registry().register::<Window>();
/// bindings.attach(&group, window);
/// assert!(bindings.activate(window, u32::from('n'), ModifierType::CONTROL));
///
/// global_registry().destroy(window).unwrap();
/// assert!(bindings.groups_of(window).is_empty());
/// assert!(group.acceleratables().is_empty());
/// ```
#[derive(Clone)]
pub struct AccelBindings {
    inner: Arc<BindingsInner>,
}

impl AccelBindings {
    /// Create a binding registry for objects of the global object registry.
    pub fn new(config: AccelConfig) -> Self {
        Self::with_registry(config, global_registry())
    }

    /// Create a binding registry for objects of `registry`.
    pub fn with_registry(config: AccelConfig, registry: &'static SharedObjectRegistry) -> Self {
        Self {
            inner: Arc::new(BindingsInner {
                registry,
                codec: AcceleratorCodec::new(config),
                table: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Attach `group` to `object`.
    ///
    /// # Panics
    ///
    /// Panics if the group is already attached to the object, or if the
    /// object is not alive in the registry.
    pub fn attach(&self, group: &AccelGroup, object: ObjectId) {
        if let Err(err) = self.try_attach(group, object) {
            panic!("cannot attach accel group to {object:?}: {err}");
        }
    }

    /// Attach `group` to `object`, reporting a dead object as an error.
    ///
    /// # Panics
    ///
    /// Panics if the group is already attached to the object.
    pub fn try_attach(&self, group: &AccelGroup, object: ObjectId) -> Result<()> {
        {
            let mut table = self.inner.table.lock();
            match table.get_mut(&object) {
                Some(binding) => {
                    assert!(
                        !binding.groups.iter().any(|g| g.ptr_eq(group)),
                        "accel group is already attached to {object:?}"
                    );
                    binding.groups.insert(0, group.clone());
                }
                None => {
                    let weak: Weak<BindingsInner> = Arc::downgrade(&self.inner);
                    let hook = self.inner.registry.add_weak_ref(object, move |object| {
                        if let Some(inner) = weak.upgrade() {
                            inner.object_destroyed(object);
                        }
                    })?;
                    table.insert(
                        object,
                        Binding {
                            groups: vec![group.clone()],
                            hook,
                        },
                    );
                }
            }
        }
        group.add_acceleratable(object);
        tracing::debug!(
            target: targets::BINDING,
            ?object,
            group = ?group.object_id(),
            "accel group attached"
        );
        Ok(())
    }

    /// Detach `group` from `object`.
    ///
    /// # Panics
    ///
    /// Panics if the group is not attached to the object.
    pub fn detach(&self, group: &AccelGroup, object: ObjectId) {
        let removed = {
            let mut table = self.inner.table.lock();
            let binding = table.get_mut(&object);
            let pos = binding
                .as_ref()
                .and_then(|binding| binding.groups.iter().position(|g| g.ptr_eq(group)));
            let (Some(binding), Some(pos)) = (binding, pos) else {
                panic!("accel group is not attached to {object:?}");
            };
            let removed = binding.groups.remove(pos);
            if binding.groups.is_empty() {
                let hook = binding.hook;
                table.remove(&object);
                if let Err(error) = self.inner.registry.remove_weak_ref(object, hook) {
                    tracing::trace!(
                        target: targets::BINDING,
                        ?object,
                        %error,
                        "destroy hook already gone"
                    );
                }
            }
            removed
        };
        group.remove_acceleratable(object);
        tracing::debug!(
            target: targets::BINDING,
            ?object,
            group = ?group.object_id(),
            "accel group detached"
        );
        drop(removed);
    }

    /// Whether `group` is attached to `object`.
    pub fn is_attached(&self, group: &AccelGroup, object: ObjectId) -> bool {
        self.inner
            .table
            .lock()
            .get(&object)
            .is_some_and(|binding| binding.groups.iter().any(|g| g.ptr_eq(group)))
    }

    /// The groups attached to `object`, most recently attached first.
    pub fn groups_of(&self, object: ObjectId) -> Vec<AccelGroup> {
        self.inner
            .table
            .lock()
            .get(&object)
            .map(|binding| binding.groups.clone())
            .unwrap_or_default()
    }

    /// Number of objects with at least one attached group.
    pub fn object_count(&self) -> usize {
        self.inner.table.lock().len()
    }

    /// Activate the accelerator `(key, mods)` on `object`.
    ///
    /// Only modifiers in the default mask take part in matching. Each
    /// attached group is tried, most recently attached first, until one
    /// handles the key. Invalid accelerators are never activated.
    #[tracing::instrument(
        skip_all,
        target = "accelkit::binding",
        level = "trace",
        fields(object = ?object, key = key, mods = mods.bits())
    )]
    pub fn activate(&self, object: ObjectId, key: u32, mods: ModifierType) -> bool {
        let codec = &self.inner.codec;
        if !codec.is_valid_accelerator(key, mods) {
            return false;
        }
        let signature = accel_signature(key, mods & codec.config().default_mod_mask());

        self.groups_of(object)
            .iter()
            .any(|group| group.activate(&signature, object, key, mods))
    }
}

impl fmt::Debug for AccelBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccelBindings")
            .field("objects", &self.object_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccelBindings: Send, Sync);
