//! Keyboard accelerator management.
//!
//! accelkit keeps track of keyboard accelerators (key plus modifier chords
//! such as `Ctrl+S`) and the actions bound to them:
//!
//! - **Codec**: [`AcceleratorCodec`] parses and formats accelerator strings
//!   like `"<Control><Shift>s"`, decides which chords are legal and builds
//!   display labels
//! - **Groups**: an [`AccelGroup`] is an ordered table of accelerators, each
//!   bound to an [`AccelClosure`]
//! - **Bindings**: [`AccelBindings`] attaches groups to acceleratable objects
//!   (windows) and dispatches key events to them
//! - **Accelerator map**: [`AccelMap`] maps remappable accelerator paths to
//!   chords and rebinds groups when a mapping changes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! use accelkit::{AccelBindings, AccelClosure, AccelConfig, AccelGroup, AcceleratorCodec};
//! use accelkit::{AccelFlags, ModifierType};
//! use accelkit_core::global_registry;
//!
//! struct Window;
//!
//! let config = AccelConfig::new();
//! let codec = AcceleratorCodec::new(config.clone());
//! let bindings = AccelBindings::new(config.clone());
//! let group = AccelGroup::new(config);
//!
//! let saved = Arc::new(AtomicBool::new(false));
//! let saved_clone = saved.clone();
//! let (key, mods) = codec.parse("<Control>s");
//! group.connect(key, mods, AccelFlags::VISIBLE, AccelClosure::new(move |_, _, _, _| {
//!     saved_clone.store(true, Ordering::SeqCst);
//!     true
//! }));
//!
//! let window = global_registry().register::<Window>();
//! bindings.attach(&group, window);
//!
//! // Num Lock does not take part in matching.
//! assert!(bindings.activate(window, u32::from('s'), ModifierType::CONTROL | ModifierType::MOD2));
//! assert!(saved.load(Ordering::SeqCst));
//! ```
//!
//! # Logging
//!
//! All subsystems log through `tracing` under the `accelkit::*` targets
//! listed in [`accelkit_core::logging::targets`].

pub mod accel_map;
mod binding;
mod closure;
pub mod codec;
mod config;
pub mod debug;
mod entry;
mod error;
mod group;
pub mod keysym;
pub mod label;
mod modifier;

pub use accel_map::{is_valid_accel_path, AccelMap, AccelMapChange, AccelPathSource};
pub use binding::AccelBindings;
pub use closure::{AccelClosure, ClosureId, NotifierId};
pub use codec::{accel_signature, AcceleratorCodec};
pub use config::AccelConfig;
pub use entry::{AccelEntry, AccelEntryTable, AccelKey, AccelPath};
pub use error::{AccelError, Result};
pub use group::{AccelChange, AccelGroup, WeakAccelGroup};
pub use label::{KeyLabels, LabelStyle};
pub use modifier::{AccelFlags, ModifierType};
