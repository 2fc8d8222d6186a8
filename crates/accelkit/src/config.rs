//! Process-wide accelerator configuration.
//!
//! There is no global mutable state in accelkit: an [`AccelConfig`] is built
//! once, early during startup, and passed by value to the
//! [`AcceleratorCodec`](crate::AcceleratorCodec), every
//! [`AccelGroup`](crate::AccelGroup) and the
//! [`AccelBindings`](crate::AccelBindings) registry.

use crate::label::{KeyLabels, LabelStyle};
use crate::modifier::ModifierType;

/// Configuration shared by the accelerator subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelConfig {
    default_mod_mask: ModifierType,
    primary_modifier: ModifierType,
    label_style: LabelStyle,
    key_labels: KeyLabels,
}

impl Default for AccelConfig {
    /// Platform defaults: Command is the primary modifier on macOS,
    /// Control everywhere else.
    fn default() -> Self {
        let label_style = LabelStyle::platform();
        let primary_modifier = if cfg!(target_os = "macos") {
            ModifierType::META
        } else {
            ModifierType::CONTROL
        };
        Self {
            default_mod_mask: ModifierType::DEFAULT_ACCEL_MASK,
            primary_modifier,
            label_style,
            key_labels: KeyLabels::for_style(label_style),
        }
    }
}

impl AccelConfig {
    /// Create a configuration with the platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the significant modifier mask. See
    /// [`set_default_mod_mask`](Self::set_default_mod_mask).
    pub fn with_default_mod_mask(mut self, mask: ModifierType) -> Self {
        self.set_default_mod_mask(mask);
        self
    }

    /// Set the modifier `<Primary>` stands for.
    pub fn with_primary_modifier(mut self, primary: ModifierType) -> Self {
        self.primary_modifier = primary;
        self
    }

    /// Set the label style. This also resets the key labels to the style's
    /// built-in set.
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self.key_labels = KeyLabels::for_style(style);
        self
    }

    /// Replace the key labels, e.g. with translated modifier names.
    pub fn with_key_labels(mut self, labels: KeyLabels) -> Self {
        self.key_labels = labels;
        self
    }

    /// Set the modifiers that are significant when matching accelerators.
    ///
    /// The mask is restricted to [`ModifierType::MODIFIER_MASK`], and Shift,
    /// Control and Alt are always kept. Call this during startup, before
    /// the configuration is handed to groups and codecs.
    pub fn set_default_mod_mask(&mut self, mask: ModifierType) {
        self.default_mod_mask =
            (mask & ModifierType::MODIFIER_MASK) | ModifierType::REQUIRED_ACCEL_MASK;
    }

    /// The modifiers that are significant when matching accelerators.
    pub fn default_mod_mask(&self) -> ModifierType {
        self.default_mod_mask
    }

    /// The modifier `<Primary>` stands for.
    pub fn primary_modifier(&self) -> ModifierType {
        self.primary_modifier
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    pub fn key_labels(&self) -> &KeyLabels {
        &self.key_labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask() {
        let config = AccelConfig::new();
        assert_eq!(config.default_mod_mask(), ModifierType::DEFAULT_ACCEL_MASK);
    }

    #[test]
    fn test_set_default_mod_mask_keeps_required_modifiers() {
        let config = AccelConfig::new().with_default_mod_mask(ModifierType::SUPER);
        assert_eq!(
            config.default_mod_mask(),
            ModifierType::SUPER | ModifierType::CONTROL | ModifierType::SHIFT | ModifierType::MOD1
        );

        let config = AccelConfig::new().with_default_mod_mask(ModifierType::empty());
        assert_eq!(config.default_mod_mask(), ModifierType::REQUIRED_ACCEL_MASK);
    }

    #[test]
    fn test_set_default_mod_mask_drops_unknown_bits() {
        let mut config = AccelConfig::new();
        config.set_default_mod_mask(ModifierType::from_bits_retain(1 << 20) | ModifierType::LOCK);
        assert_eq!(
            config.default_mod_mask(),
            ModifierType::LOCK | ModifierType::REQUIRED_ACCEL_MASK
        );
    }

    #[test]
    fn test_label_style_resets_labels() {
        let config = AccelConfig::new()
            .with_key_labels(KeyLabels::default().with_separator("-"))
            .with_label_style(LabelStyle::Mac);
        assert_eq!(config.label_style(), LabelStyle::Mac);
        assert_eq!(config.key_labels(), &KeyLabels::for_style(LabelStyle::Mac));
    }

    #[test]
    fn test_primary_modifier() {
        let config = AccelConfig::new().with_primary_modifier(ModifierType::META);
        assert_eq!(config.primary_modifier(), ModifierType::META);
    }
}
