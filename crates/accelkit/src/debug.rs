//! Human-readable dumps of accelerator groups.
//!
//! ```
//! use accelkit::debug::AccelGroupDebug;
//! use accelkit::{AccelClosure, AccelConfig, AccelFlags, AccelGroup, ModifierType};
//!
//! let group = AccelGroup::new(AccelConfig::new());
//! group.set_name("editor");
//! let save = AccelClosure::new(|_, _, _, _| true);
//! group.connect(u32::from('s'), ModifierType::CONTROL, AccelFlags::VISIBLE, save);
//!
//! let dump = AccelGroupDebug::new().format(&group);
//! assert!(dump.starts_with("editor"));
//! ```

use std::fmt::Write as FmtWrite;

use accelkit_core::logging::describe_object;
use accelkit_core::{global_registry, Object, SharedObjectRegistry, TreeStyle};

use crate::entry::AccelEntry;
use crate::group::AccelGroup;
use crate::modifier::AccelFlags;

/// Configuration for group dumps.
#[derive(Debug, Clone)]
pub struct GroupFormatOptions {
    pub style: TreeStyle,
    /// Show the display label next to each accelerator.
    pub show_labels: bool,
    /// Show the objects the group is attached to.
    pub show_acceleratables: bool,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for GroupFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_labels: true,
            show_acceleratables: true,
            indent_size: 2,
        }
    }
}

impl GroupFormatOptions {
    /// Only the accelerators.
    pub fn minimal() -> Self {
        Self {
            show_labels: false,
            show_acceleratables: false,
            ..Default::default()
        }
    }
}

/// Formats an [`AccelGroup`] as a tree: the group on the first line, one
/// line per entry below it, then the attached objects.
#[derive(Debug, Clone)]
pub struct AccelGroupDebug {
    options: GroupFormatOptions,
    registry: &'static SharedObjectRegistry,
}

impl Default for AccelGroupDebug {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelGroupDebug {
    pub fn new() -> Self {
        Self::with_options(GroupFormatOptions::default())
    }

    pub fn with_options(options: GroupFormatOptions) -> Self {
        Self {
            options,
            registry: global_registry(),
        }
    }

    /// Describe attached objects from `registry` instead of the global one.
    pub fn with_registry(mut self, registry: &'static SharedObjectRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn format(&self, group: &AccelGroup) -> String {
        let mut output = String::new();

        output.push_str(&describe_object(global_registry(), group.object_id()));
        if group.is_locked() {
            output.push_str(" locked");
        }
        output.push('\n');

        let entries = group.entries();
        let acceleratables = if self.options.show_acceleratables {
            group.acceleratables()
        } else {
            Vec::new()
        };

        if entries.is_empty() {
            let is_last = acceleratables.is_empty();
            let _ = writeln!(output, "{}(no accelerators)", self.prefix(1, is_last));
        }
        let entry_count = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            let is_last = i + 1 == entry_count && acceleratables.is_empty();
            output.push_str(&self.prefix(1, is_last));
            self.format_entry(group, entry, &mut output);
            output.push('\n');
        }

        let object_count = acceleratables.len();
        for (i, object) in acceleratables.into_iter().enumerate() {
            let _ = writeln!(
                output,
                "{}attached to {}",
                self.prefix(1, i + 1 == object_count),
                describe_object(self.registry, object)
            );
        }

        output
    }

    fn format_entry(&self, group: &AccelGroup, entry: &AccelEntry, output: &mut String) {
        let key = entry.key();
        if key.key == 0 {
            output.push_str("(unbound)");
        } else {
            output.push_str(&group.codec().format(key.key, key.mods));
            if self.options.show_labels {
                let _ = write!(output, " \"{}\"", group.codec().label(key.key, key.mods));
            }
        }
        let _ = write!(output, " closure#{}", entry.closure().id().as_u64());
        if key.flags.contains(AccelFlags::VISIBLE) {
            output.push_str(" visible");
        }
        if key.flags.contains(AccelFlags::LOCKED) {
            output.push_str(" locked");
        }
        if let Some(path) = entry.path() {
            let _ = write!(output, " {path}");
        }
    }

    fn prefix(&self, depth: usize, is_last: bool) -> String {
        self.options
            .style
            .prefix(depth, is_last, self.options.indent_size)
    }
}
