//! Core systems for accelkit.
//!
//! This crate provides the foundations the accelerator subsystem builds on:
//!
//! - **Object Model**: Object identifiers, naming, and destruction hooks
//!   (weak references that never keep an object alive)
//! - **Signal System**: Type-safe, reentrancy-safe change notification
//! - **Logging**: `tracing` targets and debug formatting helpers
//!
//! # Example
//!
//! ```
//! use accelkit_core::{global_registry, Signal};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! struct Window;
//!
//! let registry = global_registry();
//! let window = registry.register::<Window>();
//!
//! let destroyed = Arc::new(AtomicBool::new(false));
//! let destroyed_clone = destroyed.clone();
//! registry
//!     .add_weak_ref(window, move |_| destroyed_clone.store(true, Ordering::SeqCst))
//!     .unwrap();
//!
//! registry.destroy(window).unwrap();
//! assert!(destroyed.load(Ordering::SeqCst));
//!
//! let changed = Signal::<()>::new();
//! changed.connect(|_| println!("changed"));
//! changed.emit(());
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{CoreError, Result, SignalError};
pub use logging::TreeStyle;
pub use object::{
    global_registry, Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry, WeakNotify, WeakRefId,
};
pub use signal::{ConnectionId, Signal};
