//! Logging and debugging facilities for accelkit.
//!
//! This module provides:
//! - Target names for the `tracing` instrumentation
//! - Tree drawing helpers shared by the debug dumps
//!
//! # Tracing Integration
//!
//! accelkit uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("accelkit=debug,accelkit_core=debug")
//!         .init();
//! }
//! ```

use std::fmt::Write as FmtWrite;

use crate::object::{ObjectId, SharedObjectRegistry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "accelkit_core";
    /// Object registry target.
    pub const OBJECT: &str = "accelkit_core::object";
    /// Signal system target.
    pub const SIGNAL: &str = "accelkit_core::signal";
    /// Accelerator group target.
    pub const GROUP: &str = "accelkit::group";
    /// Object/group binding target.
    pub const BINDING: &str = "accelkit::binding";
    /// Accelerator map target.
    pub const ACCEL_MAP: &str = "accelkit::accel_map";
    /// Accelerator parsing and formatting target.
    pub const CODEC: &str = "accelkit::codec";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

impl TreeStyle {
    /// Build the prefix string for a tree node.
    ///
    /// Depth 0 is the root and gets no prefix. `indent_size` spaces follow
    /// each vertical branch of the enclosing levels.
    pub fn prefix(self, depth: usize, is_last: bool, indent_size: usize) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// Describe an object as `name [id] (Type)` for debug output.
///
/// Destroyed objects are rendered as `(destroyed) [id]`.
pub fn describe_object(registry: &SharedObjectRegistry, id: ObjectId) -> String {
    let mut out = String::new();
    match (registry.object_name(id), registry.type_name(id)) {
        (Ok(name), Ok(type_name)) => {
            let name = if name.is_empty() { "(unnamed)" } else { name.as_str() };
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            let _ = write!(out, "{name} [{id:?}] ({short_type})");
        }
        _ => {
            let _ = write!(out, "(destroyed) [{id:?}]");
        }
    }
    out
}
