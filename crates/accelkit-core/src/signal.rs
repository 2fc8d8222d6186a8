//! Typed change notification for accelkit.
//!
//! A [`Signal<Args>`] keeps an ordered list of connected slots and invokes
//! them, in connection order, when [`emit`](Signal::emit) is called. Slots
//! are invoked with the internal lock released, so a slot may connect or
//! disconnect slots (including itself) on the signal that is emitting.
//!
//! # Example
//!
//! ```
//! use accelkit_core::Signal;
//!
//! let changed = Signal::<u32>::new();
//! let conn_id = changed.connect(|key| {
//!     println!("accelerator for {key:#x} changed");
//! });
//!
//! changed.emit(0x73);
//! changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connection storage: `ids` hands out keys, `slots` keeps connection order.
struct Connections<Args> {
    ids: SlotMap<ConnectionId, ()>,
    slots: Vec<(ConnectionId, Slot<Args>)>,
}

impl<Args> Connections<Args> {
    fn new() -> Self {
        Self {
            ids: SlotMap::with_key(),
            slots: Vec::new(),
        }
    }

    fn insert(&mut self, slot: Slot<Args>) -> ConnectionId {
        let id = self.ids.insert(());
        self.slots.push((id, slot));
        id
    }

    fn remove(&mut self, id: ConnectionId) -> bool {
        if self.ids.remove(id).is_none() {
            return false;
        }
        self.slots.retain(|(key, _)| *key != id);
        true
    }

    fn clear(&mut self) {
        self.ids.clear();
        self.slots.clear();
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple for multiple arguments.
///
/// # Reentrancy
///
/// [`emit`](Self::emit) snapshots the connected slots before invoking any of
/// them. A slot connected during an emission is first called on the next
/// emission; a slot disconnected during an emission may still receive the
/// in-flight one.
pub struct Signal<Args> {
    /// All active connections, in connection order.
    connections: Mutex<Connections<Args>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections::new()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id)
    }

    /// Disconnect a slot, reporting an unknown id as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    #[tracing::instrument(skip_all, target = "accelkit_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self
            .connections
            .lock()
            .slots
            .iter()
            .map(|(_, slot)| slot.clone())
            .collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<u32>: Send, Sync);
