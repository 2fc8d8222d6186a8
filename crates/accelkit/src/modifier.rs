//! Modifier masks and accelerator flags.

bitflags::bitflags! {
    /// A set of keyboard modifiers and mouse buttons.
    ///
    /// Bit values are compatible with the X11 core protocol state field,
    /// extended with the virtual `SUPER`, `HYPER` and `META` modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModifierType: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        /// Usually the Alt key.
        const MOD1 = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
        const BUTTON1 = 1 << 8;
        const BUTTON2 = 1 << 9;
        const BUTTON3 = 1 << 10;
        const BUTTON4 = 1 << 11;
        const BUTTON5 = 1 << 12;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
        /// Set on key release events.
        const RELEASE = 1 << 30;
        /// Every bit that names a modifier.
        const MODIFIER_MASK = 0x5c00_1fff;
    }
}

impl ModifierType {
    /// The modifiers that are significant for accelerators by default.
    pub const DEFAULT_ACCEL_MASK: Self = Self::SHIFT
        .union(Self::CONTROL)
        .union(Self::MOD1)
        .union(Self::SUPER)
        .union(Self::HYPER)
        .union(Self::META);

    /// Modifiers that can never be removed from the significant mask.
    pub const REQUIRED_ACCEL_MASK: Self = Self::CONTROL.union(Self::SHIFT).union(Self::MOD1);

    /// Alias for [`MOD1`](Self::MOD1).
    pub const ALT: Self = Self::MOD1;
}

bitflags::bitflags! {
    /// Per-entry accelerator flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AccelFlags: u16 {
        /// The accelerator is shown in menu item labels.
        const VISIBLE = 1 << 0;
        /// The accelerator may not be changed by the user.
        const LOCKED = 1 << 1;
        const MASK = 0x07;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_mask_covers_named_modifiers() {
        let all = ModifierType::SHIFT
            | ModifierType::LOCK
            | ModifierType::CONTROL
            | ModifierType::MOD1
            | ModifierType::MOD5
            | ModifierType::BUTTON5
            | ModifierType::SUPER
            | ModifierType::HYPER
            | ModifierType::META
            | ModifierType::RELEASE;
        assert!(ModifierType::MODIFIER_MASK.contains(all));
        assert_eq!(ModifierType::MODIFIER_MASK.bits(), 0x5c00_1fff);
    }

    #[test]
    fn test_default_accel_mask() {
        let mask = ModifierType::DEFAULT_ACCEL_MASK;
        assert!(mask.contains(ModifierType::REQUIRED_ACCEL_MASK));
        assert!(!mask.contains(ModifierType::LOCK));
        assert!(!mask.contains(ModifierType::MOD2));
        assert_eq!(ModifierType::ALT, ModifierType::MOD1);
    }

    #[test]
    fn test_accel_flags() {
        assert!(AccelFlags::MASK.contains(AccelFlags::VISIBLE | AccelFlags::LOCKED));
        assert_eq!(AccelFlags::default(), AccelFlags::empty());
        let bits: u16 = (AccelFlags::VISIBLE | AccelFlags::LOCKED).bits();
        assert_eq!(bits, 0x03);
        assert_eq!(AccelFlags::from_bits_truncate(0xff00), AccelFlags::empty());
    }
}
