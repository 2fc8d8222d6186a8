//! Key values (keysyms) and their names.
//!
//! Key values follow the X11 keysym encoding:
//!
//! - `0x20..=0x7e` and `0xa0..=0xff` are Latin-1 characters
//! - `0xfe00..=0xffff` are function, modifier and keypad keys
//! - `0x0100_0000 | codepoint` encodes any other Unicode character
//!
//! [`keyval_name`] and [`keyval_from_name`] convert between key values and
//! the names used in accelerator strings (`"s"`, `"F5"`, `"Page_Up"`).

use std::borrow::Cow;

/// Flag marking a directly encoded Unicode keysym.
const UNICODE_FLAG: u32 = 0x0100_0000;

// =============================================================================
// Key Constants
// =============================================================================

/// Named key values.
///
/// Printable Latin-1 characters are their own key value, so
/// `u32::from('s')` is the key value of the `s` key.
pub mod keys {
    pub const SPACE: u32 = 0x020;
    pub const BACKSLASH: u32 = 0x05c;

    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const LINEFEED: u32 = 0xff0a;
    pub const CLEAR: u32 = 0xff0b;
    pub const RETURN: u32 = 0xff0d;
    pub const PAUSE: u32 = 0xff13;
    pub const SCROLL_LOCK: u32 = 0xff14;
    pub const SYS_REQ: u32 = 0xff15;
    pub const ESCAPE: u32 = 0xff1b;
    pub const MULTI_KEY: u32 = 0xff20;
    pub const DELETE: u32 = 0xffff;

    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
    pub const END: u32 = 0xff57;
    pub const BEGIN: u32 = 0xff58;

    pub const SELECT: u32 = 0xff60;
    pub const PRINT: u32 = 0xff61;
    pub const EXECUTE: u32 = 0xff62;
    pub const INSERT: u32 = 0xff63;
    pub const UNDO: u32 = 0xff65;
    pub const REDO: u32 = 0xff66;
    pub const MENU: u32 = 0xff67;
    pub const FIND: u32 = 0xff68;
    pub const CANCEL: u32 = 0xff69;
    pub const HELP: u32 = 0xff6a;
    pub const BREAK: u32 = 0xff6b;
    pub const MODE_SWITCH: u32 = 0xff7e;
    pub const NUM_LOCK: u32 = 0xff7f;

    pub const KP_SPACE: u32 = 0xff80;
    pub const KP_TAB: u32 = 0xff89;
    pub const KP_ENTER: u32 = 0xff8d;
    pub const KP_F1: u32 = 0xff91;
    pub const KP_F2: u32 = 0xff92;
    pub const KP_F3: u32 = 0xff93;
    pub const KP_F4: u32 = 0xff94;
    pub const KP_HOME: u32 = 0xff95;
    pub const KP_LEFT: u32 = 0xff96;
    pub const KP_UP: u32 = 0xff97;
    pub const KP_RIGHT: u32 = 0xff98;
    pub const KP_DOWN: u32 = 0xff99;
    pub const KP_PAGE_UP: u32 = 0xff9a;
    pub const KP_PAGE_DOWN: u32 = 0xff9b;
    pub const KP_END: u32 = 0xff9c;
    pub const KP_BEGIN: u32 = 0xff9d;
    pub const KP_INSERT: u32 = 0xff9e;
    pub const KP_DELETE: u32 = 0xff9f;
    pub const KP_MULTIPLY: u32 = 0xffaa;
    pub const KP_ADD: u32 = 0xffab;
    pub const KP_SEPARATOR: u32 = 0xffac;
    pub const KP_SUBTRACT: u32 = 0xffad;
    pub const KP_DECIMAL: u32 = 0xffae;
    pub const KP_DIVIDE: u32 = 0xffaf;
    pub const KP_0: u32 = 0xffb0;
    pub const KP_9: u32 = 0xffb9;
    pub const KP_EQUAL: u32 = 0xffbd;

    pub const F1: u32 = 0xffbe;
    pub const F2: u32 = 0xffbf;
    pub const F3: u32 = 0xffc0;
    pub const F4: u32 = 0xffc1;
    pub const F5: u32 = 0xffc2;
    pub const F10: u32 = 0xffc7;
    pub const F12: u32 = 0xffc9;
    pub const F35: u32 = 0xffe0;

    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const CAPS_LOCK: u32 = 0xffe5;
    pub const SHIFT_LOCK: u32 = 0xffe6;
    pub const META_L: u32 = 0xffe7;
    pub const META_R: u32 = 0xffe8;
    pub const ALT_L: u32 = 0xffe9;
    pub const ALT_R: u32 = 0xffea;
    pub const SUPER_L: u32 = 0xffeb;
    pub const SUPER_R: u32 = 0xffec;
    pub const HYPER_L: u32 = 0xffed;
    pub const HYPER_R: u32 = 0xffee;

    pub const ISO_LOCK: u32 = 0xfe01;
    pub const ISO_LEVEL3_SHIFT: u32 = 0xfe03;
    pub const ISO_NEXT_GROUP: u32 = 0xfe08;
    pub const ISO_PREV_GROUP: u32 = 0xfe0a;
    pub const ISO_FIRST_GROUP: u32 = 0xfe0c;
    pub const ISO_LAST_GROUP: u32 = 0xfe0e;
    pub const ISO_LEFT_TAB: u32 = 0xfe20;
    pub const ISO_ENTER: u32 = 0xfe34;

    pub const AUDIBLE_BELL_ENABLE: u32 = 0xfe7a;
    pub const FIRST_VIRTUAL_SCREEN: u32 = 0xfed0;
    pub const PREV_VIRTUAL_SCREEN: u32 = 0xfed1;
    pub const NEXT_VIRTUAL_SCREEN: u32 = 0xfed2;
    pub const LAST_VIRTUAL_SCREEN: u32 = 0xfed4;
    pub const TERMINATE_SERVER: u32 = 0xfed5;

    pub const VOID_SYMBOL: u32 = 0x00ff_ffff;
}

// =============================================================================
// Name Tables
// =============================================================================

/// Names of `0x20..=0x7e`.
const ASCII_NAMES: [&str; 95] = [
    "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand", "apostrophe",
    "parenleft", "parenright", "asterisk", "plus", "comma", "minus", "period", "slash", "0", "1",
    "2", "3", "4", "5", "6", "7", "8", "9", "colon", "semicolon", "less", "equal", "greater",
    "question", "at", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "bracketleft", "backslash",
    "bracketright", "asciicircum", "underscore", "grave", "a", "b", "c", "d", "e", "f", "g", "h",
    "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
    "braceleft", "bar", "braceright", "asciitilde",
];

/// Names of `0xa0..=0xff`.
const LATIN1_NAMES: [&str; 96] = [
    "nobreakspace", "exclamdown", "cent", "sterling", "currency", "yen", "brokenbar", "section",
    "diaeresis", "copyright", "ordfeminine", "guillemotleft", "notsign", "hyphen", "registered",
    "macron", "degree", "plusminus", "twosuperior", "threesuperior", "acute", "mu", "paragraph",
    "periodcentered", "cedilla", "onesuperior", "masculine", "guillemotright", "onequarter",
    "onehalf", "threequarters", "questiondown", "Agrave", "Aacute", "Acircumflex", "Atilde",
    "Adiaeresis", "Aring", "AE", "Ccedilla", "Egrave", "Eacute", "Ecircumflex", "Ediaeresis",
    "Igrave", "Iacute", "Icircumflex", "Idiaeresis", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocircumflex", "Otilde", "Odiaeresis", "multiply", "Oslash", "Ugrave", "Uacute",
    "Ucircumflex", "Udiaeresis", "Yacute", "THORN", "ssharp", "agrave", "aacute", "acircumflex",
    "atilde", "adiaeresis", "aring", "ae", "ccedilla", "egrave", "eacute", "ecircumflex",
    "ediaeresis", "igrave", "iacute", "icircumflex", "idiaeresis", "eth", "ntilde", "ograve",
    "oacute", "ocircumflex", "otilde", "odiaeresis", "division", "oslash", "ugrave", "uacute",
    "ucircumflex", "udiaeresis", "yacute", "thorn", "ydiaeresis",
];

/// Canonical names of the function, modifier and keypad keys.
const SPECIAL_NAMES: &[(u32, &str)] = &[
    (keys::ISO_LOCK, "ISO_Lock"),
    (0xfe02, "ISO_Level2_Latch"),
    (keys::ISO_LEVEL3_SHIFT, "ISO_Level3_Shift"),
    (0xfe04, "ISO_Level3_Latch"),
    (0xfe05, "ISO_Level3_Lock"),
    (0xfe06, "ISO_Group_Latch"),
    (0xfe07, "ISO_Group_Lock"),
    (keys::ISO_NEXT_GROUP, "ISO_Next_Group"),
    (0xfe09, "ISO_Next_Group_Lock"),
    (keys::ISO_PREV_GROUP, "ISO_Prev_Group"),
    (0xfe0b, "ISO_Prev_Group_Lock"),
    (keys::ISO_FIRST_GROUP, "ISO_First_Group"),
    (0xfe0d, "ISO_First_Group_Lock"),
    (keys::ISO_LAST_GROUP, "ISO_Last_Group"),
    (0xfe0f, "ISO_Last_Group_Lock"),
    (keys::ISO_LEFT_TAB, "ISO_Left_Tab"),
    (keys::ISO_ENTER, "ISO_Enter"),
    (keys::AUDIBLE_BELL_ENABLE, "AudibleBell_Enable"),
    (keys::FIRST_VIRTUAL_SCREEN, "First_Virtual_Screen"),
    (keys::PREV_VIRTUAL_SCREEN, "Prev_Virtual_Screen"),
    (keys::NEXT_VIRTUAL_SCREEN, "Next_Virtual_Screen"),
    (keys::LAST_VIRTUAL_SCREEN, "Last_Virtual_Screen"),
    (keys::TERMINATE_SERVER, "Terminate_Server"),
    (keys::BACKSPACE, "BackSpace"),
    (keys::TAB, "Tab"),
    (keys::LINEFEED, "Linefeed"),
    (keys::CLEAR, "Clear"),
    (keys::RETURN, "Return"),
    (keys::PAUSE, "Pause"),
    (keys::SCROLL_LOCK, "Scroll_Lock"),
    (keys::SYS_REQ, "Sys_Req"),
    (keys::ESCAPE, "Escape"),
    (keys::MULTI_KEY, "Multi_key"),
    (keys::HOME, "Home"),
    (keys::LEFT, "Left"),
    (keys::UP, "Up"),
    (keys::RIGHT, "Right"),
    (keys::DOWN, "Down"),
    (keys::PAGE_UP, "Page_Up"),
    (keys::PAGE_DOWN, "Page_Down"),
    (keys::END, "End"),
    (keys::BEGIN, "Begin"),
    (keys::SELECT, "Select"),
    (keys::PRINT, "Print"),
    (keys::EXECUTE, "Execute"),
    (keys::INSERT, "Insert"),
    (keys::UNDO, "Undo"),
    (keys::REDO, "Redo"),
    (keys::MENU, "Menu"),
    (keys::FIND, "Find"),
    (keys::CANCEL, "Cancel"),
    (keys::HELP, "Help"),
    (keys::BREAK, "Break"),
    (keys::MODE_SWITCH, "Mode_switch"),
    (keys::NUM_LOCK, "Num_Lock"),
    (keys::KP_SPACE, "KP_Space"),
    (keys::KP_TAB, "KP_Tab"),
    (keys::KP_ENTER, "KP_Enter"),
    (keys::KP_F1, "KP_F1"),
    (keys::KP_F2, "KP_F2"),
    (keys::KP_F3, "KP_F3"),
    (keys::KP_F4, "KP_F4"),
    (keys::KP_HOME, "KP_Home"),
    (keys::KP_LEFT, "KP_Left"),
    (keys::KP_UP, "KP_Up"),
    (keys::KP_RIGHT, "KP_Right"),
    (keys::KP_DOWN, "KP_Down"),
    (keys::KP_PAGE_UP, "KP_Page_Up"),
    (keys::KP_PAGE_DOWN, "KP_Page_Down"),
    (keys::KP_END, "KP_End"),
    (keys::KP_BEGIN, "KP_Begin"),
    (keys::KP_INSERT, "KP_Insert"),
    (keys::KP_DELETE, "KP_Delete"),
    (keys::KP_MULTIPLY, "KP_Multiply"),
    (keys::KP_ADD, "KP_Add"),
    (keys::KP_SEPARATOR, "KP_Separator"),
    (keys::KP_SUBTRACT, "KP_Subtract"),
    (keys::KP_DECIMAL, "KP_Decimal"),
    (keys::KP_DIVIDE, "KP_Divide"),
    (0xffb0, "KP_0"),
    (0xffb1, "KP_1"),
    (0xffb2, "KP_2"),
    (0xffb3, "KP_3"),
    (0xffb4, "KP_4"),
    (0xffb5, "KP_5"),
    (0xffb6, "KP_6"),
    (0xffb7, "KP_7"),
    (0xffb8, "KP_8"),
    (0xffb9, "KP_9"),
    (keys::KP_EQUAL, "KP_Equal"),
    (keys::SHIFT_L, "Shift_L"),
    (keys::SHIFT_R, "Shift_R"),
    (keys::CONTROL_L, "Control_L"),
    (keys::CONTROL_R, "Control_R"),
    (keys::CAPS_LOCK, "Caps_Lock"),
    (keys::SHIFT_LOCK, "Shift_Lock"),
    (keys::META_L, "Meta_L"),
    (keys::META_R, "Meta_R"),
    (keys::ALT_L, "Alt_L"),
    (keys::ALT_R, "Alt_R"),
    (keys::SUPER_L, "Super_L"),
    (keys::SUPER_R, "Super_R"),
    (keys::HYPER_L, "Hyper_L"),
    (keys::HYPER_R, "Hyper_R"),
    (keys::DELETE, "Delete"),
    (keys::VOID_SYMBOL, "VoidSymbol"),
];

/// Alternate spellings accepted by [`keyval_from_name`].
const NAME_ALIASES: &[(&str, u32)] = &[
    ("Prior", keys::PAGE_UP),
    ("Next", keys::PAGE_DOWN),
    ("KP_Prior", keys::KP_PAGE_UP),
    ("KP_Next", keys::KP_PAGE_DOWN),
    ("Eth", 0xd0),
    ("Thorn", 0xde),
    ("Ooblique", 0xd8),
    ("ooblique", 0xf8),
    ("script_switch", keys::MODE_SWITCH),
];

/// The `F1..=F35` run.
const FUNCTION_KEYS: std::ops::RangeInclusive<u32> = keys::F1..=keys::F35;

// =============================================================================
// Name Conversion
// =============================================================================

/// Get the name of a key value.
///
/// Returns `None` for `0`. Key values without a table entry are rendered
/// as `UXXXX` for Unicode keysyms and as `0x...` otherwise. Both forms are
/// accepted again by [`keyval_from_name`].
///
/// # Example
///
/// ```
/// use accelkit::keysym::{keys, keyval_name};
///
/// assert_eq!(keyval_name(u32::from('s')).as_deref(), Some("s"));
/// assert_eq!(keyval_name(keys::PAGE_UP).as_deref(), Some("Page_Up"));
/// assert_eq!(keyval_name(keys::F5).as_deref(), Some("F5"));
/// ```
pub fn keyval_name(keyval: u32) -> Option<Cow<'static, str>> {
    match keyval {
        0 => None,
        0x20..=0x7e => Some(Cow::Borrowed(ASCII_NAMES[(keyval - 0x20) as usize])),
        0xa0..=0xff => Some(Cow::Borrowed(LATIN1_NAMES[(keyval - 0xa0) as usize])),
        k if FUNCTION_KEYS.contains(&k) => Some(Cow::Owned(format!("F{}", k - keys::F1 + 1))),
        k => {
            if let Some((_, name)) = SPECIAL_NAMES.iter().find(|(value, _)| *value == k) {
                return Some(Cow::Borrowed(name));
            }
            if k & 0xff00_0000 == UNICODE_FLAG {
                Some(Cow::Owned(format!("U{:04X}", k & 0x00ff_ffff)))
            } else {
                Some(Cow::Owned(format!("{k:#x}")))
            }
        }
    }
}

/// Look up a key value by name.
///
/// Names are case-sensitive, as in accelerator strings (`"a"` and `"A"` are
/// different key values). Returns `None` for unknown names.
///
/// Besides the table names this accepts `F1`..`F35`, `UXXXX` (a Unicode
/// code point in hex) and `0x...` (a raw key value in hex).
pub fn keyval_from_name(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }
    if let Some(index) = ASCII_NAMES.iter().position(|n| *n == name) {
        return Some(0x20 + index as u32);
    }
    if let Some(index) = LATIN1_NAMES.iter().position(|n| *n == name) {
        return Some(0xa0 + index as u32);
    }
    if let Some((value, _)) = SPECIAL_NAMES.iter().find(|(_, n)| *n == name) {
        return Some(*value);
    }
    if let Some((_, value)) = NAME_ALIASES.iter().find(|(n, _)| *n == name) {
        return Some(*value);
    }
    if let Some(number) = name.strip_prefix('F') {
        if let Ok(n @ 1..=35) = number.parse::<u32>() {
            if !number.starts_with('0') {
                return Some(keys::F1 + n - 1);
            }
        }
    }
    if let Some(hex) = name.strip_prefix('U') {
        if !hex.is_empty() && hex.len() <= 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let cp = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(cp).map(unicode_to_keyval);
        }
    }
    if let Some(hex) = name.strip_prefix("0x") {
        if !hex.is_empty() && hex.len() <= 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u32::from_str_radix(hex, 16).ok().filter(|v| *v != 0);
        }
    }
    None
}

// =============================================================================
// Case Conversion
// =============================================================================

/// Get the lower- and upper-case versions of a key value.
///
/// Key values without case (function keys, digits, punctuation) are returned
/// unchanged in both positions.
pub fn keyval_convert_case(keyval: u32) -> (u32, u32) {
    if keyval & 0xff00_0000 == UNICODE_FLAG {
        let Some(ch) = char::from_u32(keyval & 0x00ff_ffff) else {
            return (keyval, keyval);
        };
        return (
            unicode_to_keyval(single_case(ch.to_lowercase(), ch)),
            unicode_to_keyval(single_case(ch.to_uppercase(), ch)),
        );
    }

    match keyval {
        0x41..=0x5a | 0xc0..=0xd6 | 0xd8..=0xde => (keyval + 0x20, keyval),
        0x61..=0x7a | 0xe0..=0xf6 | 0xf8..=0xfe => (keyval, keyval - 0x20),
        _ => (keyval, keyval),
    }
}

/// Convert a key value to lower case.
pub fn keyval_to_lower(keyval: u32) -> u32 {
    keyval_convert_case(keyval).0
}

/// Convert a key value to upper case.
pub fn keyval_to_upper(keyval: u32) -> u32 {
    keyval_convert_case(keyval).1
}

/// Check whether a key value is upper case (or has no case).
pub fn keyval_is_upper(keyval: u32) -> bool {
    keyval != 0 && keyval_to_upper(keyval) == keyval
}

/// Check whether a key value is lower case (or has no case).
pub fn keyval_is_lower(keyval: u32) -> bool {
    keyval != 0 && keyval_to_lower(keyval) == keyval
}

/// Multi-character case mappings have no single key value; keep the original.
fn single_case(mut mapped: impl Iterator<Item = char>, original: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => original,
    }
}

// =============================================================================
// Unicode Conversion
// =============================================================================

/// Convert a key value to the character it produces, if any.
///
/// Latin-1 and Unicode keysyms map to their character. A few function and
/// keypad keys map to the control or ASCII character they type.
pub fn keyval_to_unicode(keyval: u32) -> Option<char> {
    match keyval {
        0x20..=0x7e | 0xa0..=0xff => char::from_u32(keyval),
        keys::BACKSPACE => Some('\u{8}'),
        keys::TAB | keys::KP_TAB => Some('\t'),
        keys::LINEFEED => Some('\n'),
        keys::CLEAR => Some('\u{b}'),
        keys::RETURN | keys::KP_ENTER => Some('\r'),
        keys::ESCAPE => Some('\u{1b}'),
        keys::DELETE => Some('\u{7f}'),
        keys::KP_SPACE => Some(' '),
        keys::KP_EQUAL => Some('='),
        keys::KP_MULTIPLY => Some('*'),
        keys::KP_ADD => Some('+'),
        keys::KP_SEPARATOR => Some(','),
        keys::KP_SUBTRACT => Some('-'),
        keys::KP_DECIMAL => Some('.'),
        keys::KP_DIVIDE => Some('/'),
        k if (keys::KP_0..=keys::KP_9).contains(&k) => {
            char::from_u32(u32::from('0') + k - keys::KP_0)
        }
        k if k & 0xff00_0000 == UNICODE_FLAG => char::from_u32(k & 0x00ff_ffff),
        _ => None,
    }
}

/// Convert a character to its key value.
///
/// Latin-1 printable characters are their own key value; everything else
/// uses the Unicode keysym encoding.
pub fn unicode_to_keyval(ch: char) -> u32 {
    let cp = u32::from(ch);
    match cp {
        0x20..=0x7e | 0xa0..=0xff => cp,
        _ => cp | UNICODE_FLAG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_names() {
        assert_eq!(keyval_name(0x20).as_deref(), Some("space"));
        assert_eq!(keyval_name(0x7e).as_deref(), Some("asciitilde"));
        assert_eq!(keyval_name(0xa0).as_deref(), Some("nobreakspace"));
        assert_eq!(keyval_name(0xe9).as_deref(), Some("eacute"));
        assert_eq!(keyval_name(0xff).as_deref(), Some("ydiaeresis"));

        assert_eq!(keyval_from_name("space"), Some(0x20));
        assert_eq!(keyval_from_name("A"), Some(0x41));
        assert_eq!(keyval_from_name("a"), Some(0x61));
        assert_eq!(keyval_from_name("Eacute"), Some(0xc9));
    }

    #[test]
    fn test_special_names() {
        assert_eq!(keyval_name(keys::RETURN).as_deref(), Some("Return"));
        assert_eq!(keyval_name(keys::KP_PAGE_DOWN).as_deref(), Some("KP_Page_Down"));
        assert_eq!(keyval_from_name("Page_Up"), Some(keys::PAGE_UP));
        assert_eq!(keyval_from_name("Prior"), Some(keys::PAGE_UP));
        assert_eq!(keyval_from_name("ISO_Left_Tab"), Some(keys::ISO_LEFT_TAB));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(keyval_name(keys::F1).as_deref(), Some("F1"));
        assert_eq!(keyval_name(keys::F12).as_deref(), Some("F12"));
        assert_eq!(keyval_name(keys::F35).as_deref(), Some("F35"));
        assert_eq!(keyval_from_name("F10"), Some(keys::F10));
        assert_eq!(keyval_from_name("F36"), None);
        assert_eq!(keyval_from_name("F0"), None);
        assert_eq!(keyval_from_name("F05"), None);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(keyval_from_name(""), None);
        assert_eq!(keyval_from_name("NotAKey"), None);
        assert_eq!(keyval_from_name("return"), None);
        assert_eq!(keyval_name(0), None);
    }

    #[test]
    fn test_unicode_and_hex_names_round_trip() {
        let omega = unicode_to_keyval('\u{3c9}');
        assert_eq!(omega, 0x0100_03c9);
        assert_eq!(keyval_name(omega).as_deref(), Some("U03C9"));
        assert_eq!(keyval_from_name("U03C9"), Some(omega));

        // Latin-1 code points map back to their plain key value.
        assert_eq!(keyval_from_name("U0041"), Some(0x41));

        assert_eq!(keyval_name(0x1234).as_deref(), Some("0x1234"));
        assert_eq!(keyval_from_name("0x1234"), Some(0x1234));
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(keyval_to_lower(0x41), 0x61);
        assert_eq!(keyval_to_upper(0x61), 0x41);
        assert_eq!(keyval_to_lower(0xc0), 0xe0);
        assert_eq!(keyval_to_lower(0xd8), 0xf8);
        // Multiply and division sign have no case.
        assert_eq!(keyval_to_lower(0xd7), 0xd7);
        assert_eq!(keyval_to_upper(0xf7), 0xf7);
        assert_eq!(keyval_to_lower(keys::F1), keys::F1);

        let upper_omega = unicode_to_keyval('\u{3a9}');
        let lower_omega = unicode_to_keyval('\u{3c9}');
        assert_eq!(keyval_to_lower(upper_omega), lower_omega);
        assert_eq!(keyval_to_upper(lower_omega), upper_omega);

        assert!(keyval_is_upper(0x41));
        assert!(keyval_is_lower(0x61));
        assert!(!keyval_is_lower(0));
    }

    #[test]
    fn test_keyval_to_unicode() {
        assert_eq!(keyval_to_unicode(0x61), Some('a'));
        assert_eq!(keyval_to_unicode(keys::RETURN), Some('\r'));
        assert_eq!(keyval_to_unicode(keys::KP_0 + 7), Some('7'));
        assert_eq!(keyval_to_unicode(0x0100_20ac), Some('\u{20ac}'));
        assert_eq!(keyval_to_unicode(keys::F1), None);
        assert_eq!(keyval_to_unicode(keys::UP), None);
    }
}
