//! Conversion between accelerator strings and `(keyval, modifiers)` pairs.
//!
//! # Format
//!
//! An accelerator string is a sequence of `<Modifier>` tokens followed by a
//! key name: `"<Control>s"`, `"<Shift><Alt>F1"`, `"<Release>z"`.
//!
//! - Modifier tokens are case-insensitive: `Release`, `Primary`, `Control`
//!   (also `Ctrl`, `Ctl`), `Shift` (also `Shft`), `Alt`, `Mod1`..`Mod5`,
//!   `Meta`, `Hyper`, `Super`
//! - `Primary` is the platform's main accelerator modifier (Control, or
//!   Command on macOS), taken from the [`AccelConfig`]
//! - Unknown `<...>` tokens are skipped
//! - The key name is the rest of the string, looked up with
//!   [`keyval_from_name`](crate::keysym::keyval_from_name)
//!
//! ```
//! use accelkit::{AccelConfig, AcceleratorCodec, ModifierType};
//!
//! let config = AccelConfig::new().with_primary_modifier(ModifierType::CONTROL);
//! let codec = AcceleratorCodec::new(config);
//! let (key, mods) = codec.parse("<Ctrl><Shift>S");
//! assert_eq!(key, u32::from('s'));
//! assert_eq!(mods, ModifierType::CONTROL | ModifierType::SHIFT);
//! assert_eq!(codec.format(key, mods), "<Primary><Shift>s");
//! ```

use accelkit_core::logging::targets;

use crate::config::AccelConfig;
use crate::entry::AccelKey;
use crate::error::{AccelError, Result};
use crate::keysym::{keys, keyval_from_name, keyval_name, keyval_to_lower};
use crate::label::accelerator_label;
use crate::modifier::{AccelFlags, ModifierType};

/// Keys that can never be accelerators.
const INVALID_ACCELERATOR_KEYS: &[u32] = &[
    keys::SHIFT_L,
    keys::SHIFT_R,
    keys::SHIFT_LOCK,
    keys::CAPS_LOCK,
    keys::ISO_LOCK,
    keys::CONTROL_L,
    keys::CONTROL_R,
    keys::META_L,
    keys::META_R,
    keys::ALT_L,
    keys::ALT_R,
    keys::SUPER_L,
    keys::SUPER_R,
    keys::HYPER_L,
    keys::HYPER_R,
    keys::ISO_LEVEL3_SHIFT,
    keys::ISO_NEXT_GROUP,
    keys::ISO_PREV_GROUP,
    keys::ISO_FIRST_GROUP,
    keys::ISO_LAST_GROUP,
    keys::MODE_SWITCH,
    keys::NUM_LOCK,
    keys::MULTI_KEY,
    keys::SCROLL_LOCK,
    keys::SYS_REQ,
    keys::TAB,
    keys::ISO_LEFT_TAB,
    keys::KP_TAB,
    keys::FIRST_VIRTUAL_SCREEN,
    keys::PREV_VIRTUAL_SCREEN,
    keys::NEXT_VIRTUAL_SCREEN,
    keys::LAST_VIRTUAL_SCREEN,
    keys::TERMINATE_SERVER,
    keys::AUDIBLE_BELL_ENABLE,
];

/// Keys that need at least one modifier; unmodified they navigate.
const INVALID_UNMODIFIED_KEYS: &[u32] = &[
    keys::UP,
    keys::DOWN,
    keys::LEFT,
    keys::RIGHT,
    keys::KP_UP,
    keys::KP_DOWN,
    keys::KP_LEFT,
    keys::KP_RIGHT,
];

/// A recognized `<...>` token.
#[derive(Clone, Copy)]
enum Token {
    Release,
    Primary,
    Modifier(ModifierType),
}

/// Match a lower-cased `<...>` token.
fn lookup_token(token: &str) -> Option<Token> {
    let token = match token {
        "<release>" => Token::Release,
        "<primary>" => Token::Primary,
        "<control>" | "<ctrl>" | "<ctl>" => Token::Modifier(ModifierType::CONTROL),
        "<shift>" | "<shft>" => Token::Modifier(ModifierType::SHIFT),
        "<alt>" | "<mod1>" => Token::Modifier(ModifierType::MOD1),
        "<mod2>" => Token::Modifier(ModifierType::MOD2),
        "<mod3>" => Token::Modifier(ModifierType::MOD3),
        "<mod4>" => Token::Modifier(ModifierType::MOD4),
        "<mod5>" => Token::Modifier(ModifierType::MOD5),
        "<meta>" => Token::Modifier(ModifierType::META),
        "<hyper>" => Token::Modifier(ModifierType::HYPER),
        "<super>" => Token::Modifier(ModifierType::SUPER),
        _ => return None,
    };
    Some(token)
}

/// Parses, formats, validates and labels accelerators.
///
/// The codec is a small value wrapping an [`AccelConfig`]; clone it freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceleratorCodec {
    config: AccelConfig,
}

impl AcceleratorCodec {
    /// Create a codec for the given configuration.
    pub fn new(config: AccelConfig) -> Self {
        Self { config }
    }

    /// The configuration this codec was created with.
    pub fn config(&self) -> &AccelConfig {
        &self.config
    }

    /// Parse an accelerator string.
    ///
    /// Returns the lower-cased key value and the modifiers, or `(0, empty)`
    /// if the string is empty, has no key, or names an unknown key.
    pub fn parse(&self, accelerator: &str) -> (u32, ModifierType) {
        match self.try_parse(accelerator) {
            Ok(key) => (key.key, key.mods),
            Err(_) => (0, ModifierType::empty()),
        }
    }

    /// Parse an accelerator string, reporting why parsing failed.
    ///
    /// On success the key has no flags set.
    pub fn try_parse(&self, accelerator: &str) -> Result<AccelKey> {
        if accelerator.is_empty() {
            return Err(AccelError::Empty);
        }

        let mut mods = ModifierType::empty();
        let mut rest = accelerator;
        while let Some(after_open) = rest.strip_prefix('<') {
            let Some(close) = after_open.find('>') else {
                // Unterminated token swallows the rest of the string.
                rest = "";
                break;
            };
            let token_len = close + 2;
            let token = rest[..token_len].to_ascii_lowercase();
            match lookup_token(&token) {
                Some(Token::Release) => mods |= ModifierType::RELEASE,
                Some(Token::Primary) => mods |= self.config.primary_modifier(),
                Some(Token::Modifier(modifier)) => mods |= modifier,
                None => {
                    tracing::trace!(
                        target: targets::CODEC,
                        accelerator,
                        token = %token,
                        "skipping unknown modifier token"
                    );
                }
            }
            rest = &rest[token_len..];
        }

        if rest.is_empty() {
            return Err(AccelError::no_key(accelerator));
        }
        let keyval =
            keyval_from_name(rest).ok_or_else(|| AccelError::unknown_key(accelerator, rest))?;

        Ok(AccelKey::new(keyval_to_lower(keyval), mods, AccelFlags::empty()))
    }

    /// Format an accelerator as a string [`parse`](Self::parse) accepts.
    ///
    /// Modifiers outside [`ModifierType::MODIFIER_MASK`] are ignored. The
    /// configured primary modifier is written as `<Primary>`. Lock and mouse
    /// button bits have no token and are not written.
    pub fn format(&self, keyval: u32, mods: ModifierType) -> String {
        write_accelerator(keyval, mods, self.config.primary_modifier())
    }

    /// Check whether a key and modifiers make a usable accelerator.
    ///
    /// Only the configured significant modifiers count. Control characters
    /// below space, pure modifier keys, lock keys and Tab are never valid;
    /// arrow keys are valid only with a modifier.
    pub fn is_valid_accelerator(&self, keyval: u32, mods: ModifierType) -> bool {
        let mods = mods & self.config.default_mod_mask();

        if keyval <= 0xff {
            return keyval >= 0x20;
        }
        if INVALID_ACCELERATOR_KEYS.contains(&keyval) {
            return false;
        }
        if mods.is_empty() && INVALID_UNMODIFIED_KEYS.contains(&keyval) {
            return false;
        }
        true
    }

    /// Build the display string for an accelerator, e.g. `Shift+Ctrl+S`.
    ///
    /// Uses the configuration's [`KeyLabels`](crate::label::KeyLabels).
    pub fn label(&self, keyval: u32, mods: ModifierType) -> String {
        accelerator_label(self.config.key_labels(), keyval, mods)
    }
}

/// The activation signature of an accelerator.
///
/// Like [`AcceleratorCodec::format`] but never writes `<Primary>`, so the
/// result does not depend on any [`AccelConfig`]. Groups register their
/// activation handlers under this string.
///
/// ```
/// use accelkit::{ModifierType, accel_signature};
///
/// assert_eq!(accel_signature(u32::from('S'), ModifierType::CONTROL), "<Control>s");
/// ```
pub fn accel_signature(keyval: u32, mods: ModifierType) -> String {
    write_accelerator(keyval, mods, ModifierType::empty())
}

fn write_accelerator(keyval: u32, mods: ModifierType, primary: ModifierType) -> String {
    let mut mods = mods & ModifierType::MODIFIER_MASK;
    let mut out = String::new();

    if mods.contains(ModifierType::RELEASE) {
        out.push_str("<Release>");
    }
    if !primary.is_empty() && mods.contains(primary) {
        out.push_str("<Primary>");
        mods.remove(primary);
    }

    let tokens = [
        (ModifierType::SHIFT, "<Shift>"),
        (ModifierType::CONTROL, "<Control>"),
        (ModifierType::MOD1, "<Alt>"),
        (ModifierType::MOD2, "<Mod2>"),
        (ModifierType::MOD3, "<Mod3>"),
        (ModifierType::MOD4, "<Mod4>"),
        (ModifierType::MOD5, "<Mod5>"),
        (ModifierType::META, "<Meta>"),
        (ModifierType::HYPER, "<Hyper>"),
        (ModifierType::SUPER, "<Super>"),
    ];
    for (flag, token) in tokens {
        if mods.contains(flag) {
            out.push_str(token);
        }
    }

    if let Some(name) = keyval_name(keyval_to_lower(keyval)) {
        out.push_str(&name);
    }
    out
}
