//! Display strings for accelerators, as shown next to menu items.
//!
//! The output depends on a [`KeyLabels`] set: the modifier names and the
//! separator placed between them. [`LabelStyle`] picks one of the two
//! built-in sets; callers that localize their UI replace individual names.
//!
//! ```
//! use accelkit::label::{accelerator_label, KeyLabels, LabelStyle};
//! use accelkit::ModifierType;
//!
//! let labels = KeyLabels::for_style(LabelStyle::Default);
//! let mods = ModifierType::CONTROL | ModifierType::SHIFT;
//! let text = accelerator_label(&labels, u32::from('s'), mods);
//! assert_eq!(text, "Shift+Ctrl+S");
//! ```

use crate::keysym::{keys, keyval_name, keyval_to_lower, keyval_to_unicode};
use crate::modifier::ModifierType;

/// Built-in label conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Modifier names joined with `+`, e.g. `Shift+Ctrl+S`.
    #[default]
    Default,
    /// macOS glyphs with no separator, e.g. `⇧⌃S`.
    Mac,
}

impl LabelStyle {
    /// The style native to the platform this crate was built for.
    pub fn platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Default
        }
    }
}

/// The strings an accelerator label is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLabels {
    /// Name of the Shift modifier.
    pub shift: String,
    /// Name of the Control modifier.
    pub control: String,
    /// Name of the Alt (Mod1) modifier.
    pub alt: String,
    pub super_key: String,
    pub hyper: String,
    pub meta: String,
    /// Placed between modifier names and before the key.
    pub separator: String,
    /// Name shown for the space bar.
    pub space: String,
    /// Name shown for the backslash key.
    pub backslash: String,
    /// Render navigation and editing keys as glyphs (arrows, return...).
    pub key_glyphs: bool,
    /// Show non-ASCII printable characters as themselves rather than by name.
    pub latin1_to_char: bool,
}

impl KeyLabels {
    /// The label set of a built-in style.
    pub fn for_style(style: LabelStyle) -> Self {
        match style {
            LabelStyle::Default => Self {
                shift: "Shift".into(),
                control: "Ctrl".into(),
                alt: "Alt".into(),
                super_key: "Super".into(),
                hyper: "Hyper".into(),
                meta: "Meta".into(),
                separator: "+".into(),
                space: "Space".into(),
                backslash: "Backslash".into(),
                key_glyphs: false,
                latin1_to_char: true,
            },
            LabelStyle::Mac => Self {
                shift: "\u{21e7}".into(),
                control: "\u{2303}".into(),
                alt: "\u{2325}".into(),
                super_key: "Super".into(),
                hyper: "Hyper".into(),
                meta: "\u{2318}".into(),
                separator: String::new(),
                space: "Space".into(),
                backslash: "Backslash".into(),
                key_glyphs: true,
                latin1_to_char: true,
            },
        }
    }

    /// Replace the separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for KeyLabels {
    fn default() -> Self {
        Self::for_style(LabelStyle::Default)
    }
}

/// Glyph for a navigation or editing key.
fn key_glyph(keyval: u32) -> Option<&'static str> {
    let glyph = match keyval {
        keys::RETURN => "\u{21a9}",
        keys::ISO_ENTER => "\u{2324}",
        keys::LEFT => "\u{2190}",
        keys::UP => "\u{2191}",
        keys::RIGHT => "\u{2192}",
        keys::DOWN => "\u{2193}",
        keys::PAGE_UP => "\u{21de}",
        keys::PAGE_DOWN => "\u{21df}",
        keys::HOME => "\u{2196}",
        keys::END => "\u{2198}",
        keys::ESCAPE => "\u{238b}",
        keys::BACKSPACE => "\u{232b}",
        keys::DELETE => "\u{2326}",
        _ => return None,
    };
    Some(glyph)
}

/// Build the display string for an accelerator.
///
/// Modifiers come first in the order Shift, Control, Alt, Mod2..Mod5,
/// Super, Hyper, Meta, each followed by the separator. The key follows:
/// printable characters upper-cased, then glyphs when enabled, then the key
/// name with underscores shown as spaces.
pub fn accelerator_label(labels: &KeyLabels, keyval: u32, mods: ModifierType) -> String {
    let mut out = String::new();

    let names: [(ModifierType, &str); 10] = [
        (ModifierType::SHIFT, labels.shift.as_str()),
        (ModifierType::CONTROL, labels.control.as_str()),
        (ModifierType::MOD1, labels.alt.as_str()),
        (ModifierType::MOD2, "Mod2"),
        (ModifierType::MOD3, "Mod3"),
        (ModifierType::MOD4, "Mod4"),
        (ModifierType::MOD5, "Mod5"),
        (ModifierType::SUPER, labels.super_key.as_str()),
        (ModifierType::HYPER, labels.hyper.as_str()),
        (ModifierType::META, labels.meta.as_str()),
    ];
    for (flag, name) in names {
        if mods.contains(flag) {
            out.push_str(name);
            out.push_str(&labels.separator);
        }
    }

    let printable = keyval_to_unicode(keyval)
        .filter(|ch| *ch == ' ' || is_graphic(*ch))
        .filter(|ch| ch.is_ascii() || labels.latin1_to_char);

    if let Some(ch) = printable {
        match ch {
            ' ' => out.push_str(&labels.space),
            '\\' => out.push_str(&labels.backslash),
            _ => out.extend(ch.to_uppercase()),
        }
    } else if let Some(glyph) = key_glyph(keyval).filter(|_| labels.key_glyphs) {
        out.push_str(glyph);
    } else if let Some(name) = keyval_name(keyval_to_lower(keyval)) {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(only), None) => out.push(only.to_ascii_uppercase()),
            _ => out.push_str(&name.replace('_', " ")),
        }
    }

    out
}

/// Printable and not whitespace.
fn is_graphic(ch: char) -> bool {
    !ch.is_control() && !ch.is_whitespace()
}
