//! Tests for accelerator parsing, formatting and validity.

use accelkit::keysym::keys;
use accelkit::{AccelConfig, AccelError, AcceleratorCodec, LabelStyle, ModifierType};

fn codec() -> AcceleratorCodec {
    AcceleratorCodec::new(
        AccelConfig::new()
            .with_primary_modifier(ModifierType::CONTROL)
            .with_label_style(LabelStyle::Default),
    )
}

#[test]
fn test_modifier_abbreviations_are_equivalent() {
    let codec = codec();
    let expected = (u32::from('a'), ModifierType::CONTROL);
    assert_eq!(codec.parse("<Ctl>a"), expected);
    assert_eq!(codec.parse("<Ctrl>a"), expected);
    assert_eq!(codec.parse("<Control>a"), expected);
    assert_eq!(codec.parse("<control>A"), expected);
    assert_eq!(codec.parse("<Primary>a"), expected);
}

#[test]
fn test_round_trip_over_modifier_combinations() {
    let codec = codec();
    let modifiers = [
        ModifierType::SHIFT,
        ModifierType::CONTROL,
        ModifierType::MOD1,
        ModifierType::MOD4,
        ModifierType::SUPER,
        ModifierType::HYPER,
        ModifierType::META,
        ModifierType::RELEASE,
    ];
    let keyvals = [
        u32::from('q'),
        u32::from('Q'),
        keys::F12,
        keys::PAGE_UP,
        keys::KP_ENTER,
        keys::SPACE,
    ];

    for keyval in keyvals {
        for bits in 0u32..(1 << modifiers.len()) {
            let mods = modifiers
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) != 0)
                .fold(ModifierType::empty(), |acc, (_, m)| acc | *m);

            let text = codec.format(keyval, mods);
            let (key, parsed) = codec.parse(&text);
            assert_eq!(
                (key, parsed),
                (accelkit::keysym::keyval_to_lower(keyval), mods),
                "round trip of {text:?}"
            );
        }
    }
}

#[test]
fn test_round_trip_drops_lock_and_button_bits() {
    let codec = codec();
    let tokenless = ModifierType::LOCK
        | ModifierType::BUTTON1
        | ModifierType::BUTTON3
        | ModifierType::BUTTON5;

    let text = codec.format(u32::from('z'), ModifierType::SHIFT | tokenless);
    assert_eq!(text, "<Shift>z");
    assert_eq!(codec.parse(&text), (u32::from('z'), ModifierType::SHIFT));

    assert_eq!(codec.format(u32::from('z'), tokenless), "z");
    assert!(ModifierType::MODIFIER_MASK.contains(tokenless));
}

#[test]
fn test_failures_yield_zero() {
    let codec = codec();
    let none = (0, ModifierType::empty());
    assert_eq!(codec.parse(""), none);
    assert_eq!(codec.parse("<Control>"), none);
    assert_eq!(codec.parse("<Control>NoSuchKey"), none);
    assert_eq!(codec.parse("<Control"), none);
}

#[test]
fn test_try_parse_reports_reason() {
    let codec = codec();
    assert_eq!(codec.try_parse(""), Err(AccelError::Empty));
    assert_eq!(codec.try_parse("<Shift>"), Err(AccelError::no_key("<Shift>")));
    assert_eq!(
        codec.try_parse("<Shift>Bogus"),
        Err(AccelError::unknown_key("<Shift>Bogus", "Bogus"))
    );

    let key = codec.try_parse("<Alt>F4").unwrap();
    assert_eq!((key.key, key.mods), (keys::F4, ModifierType::MOD1));
}

#[test]
fn test_validity_boundaries() {
    let codec = codec();
    let none = ModifierType::empty();
    assert!(codec.is_valid_accelerator(u32::from('a'), ModifierType::CONTROL));
    assert!(codec.is_valid_accelerator(0x20, none));
    assert!(codec.is_valid_accelerator(keys::UP, ModifierType::CONTROL));
    assert!(!codec.is_valid_accelerator(keys::CONTROL_L, none));
    assert!(!codec.is_valid_accelerator(keys::TAB, none));
    assert!(!codec.is_valid_accelerator(keys::TAB, ModifierType::CONTROL));
    assert!(!codec.is_valid_accelerator(keys::UP, none));
    assert!(!codec.is_valid_accelerator(0x1f, none));
    // Modifiers outside the default mask do not count.
    assert!(!codec.is_valid_accelerator(keys::UP, ModifierType::MOD2));
}

#[test]
fn test_labels() {
    let codec = codec();
    let ctrl_shift = ModifierType::CONTROL | ModifierType::SHIFT;
    assert_eq!(codec.label(u32::from('s'), ctrl_shift), "Shift+Ctrl+S");
    assert_eq!(codec.label(keys::PAGE_DOWN, ModifierType::MOD1), "Alt+Page Down");

    let mac = AcceleratorCodec::new(AccelConfig::new().with_label_style(LabelStyle::Mac));
    assert_eq!(mac.label(u32::from('q'), ModifierType::META), "\u{2318}Q");
}
