//! Keystroke codec.
//!
//! Vim records every key press it reads when started with `-W <file>`. A key
//! is either a single byte, or `0x80` (`K_SPECIAL`) followed by two bytes
//! naming a special key (`k1` is `<F1>`, `ku` is `<Up>`, ...). This module
//! decodes such keylogs into printable representations, and parses the
//! `<Name>` notation users type on the command line back into the bytes vim
//! reads with `-s <file>`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A keycode, always two bytes wide. Single-byte keys are zero-padded.
pub type Keycode = [u8; 2];

const K_SPECIAL: u8 = 0x80;

/// Keycodes that never count towards a score.
pub const IGNORED_KEYCODES: [Keycode; 5] = [
    [0xfd, 0x35], // KE_IGNORE
    [0xfd, 0x60], // KE_CURSORHOLD, sent when gvim moves its window
    [0xfd, 0x61], // KE_NOP
    [0xfd, 0x62], // KE_FOCUSGAINED
    [0xfd, 0x63], // KE_FOCUSLOST
];

/// Two-byte keycodes that have a name in vim's key notation.
const NAMED_KEYCODES: &[(Keycode, &str)] = &[
    (*b"k1", "<F1>"),
    (*b"k2", "<F2>"),
    (*b"k3", "<F3>"),
    (*b"k4", "<F4>"),
    (*b"k5", "<F5>"),
    (*b"k6", "<F6>"),
    (*b"k7", "<F7>"),
    (*b"k8", "<F8>"),
    (*b"k9", "<F9>"),
    (*b"k;", "<F10>"),
    (*b"F1", "<F11>"),
    (*b"F2", "<F12>"),
    (*b"F3", "<F13>"),
    (*b"F4", "<F14>"),
    (*b"F5", "<F15>"),
    (*b"F6", "<F16>"),
    (*b"F7", "<F17>"),
    (*b"F8", "<F18>"),
    (*b"F9", "<F19>"),
    (*b"%1", "<Help>"),
    (*b"&8", "<Undo>"),
    (*b"#2", "<S-Home>"),
    (*b"*7", "<S-End>"),
    (*b"K1", "<kHome>"),
    (*b"K4", "<kEnd>"),
    (*b"K3", "<kPageUp>"),
    (*b"K5", "<kPageDown>"),
    (*b"K6", "<kPlus>"),
    (*b"K7", "<kMinus>"),
    (*b"K8", "<kDivide>"),
    (*b"K9", "<kMultiply>"),
    (*b"KA", "<kEnter>"),
    (*b"KB", "<kPoint>"),
    (*b"KC", "<k0>"),
    (*b"KD", "<k1>"),
    (*b"KE", "<k2>"),
    (*b"KF", "<k3>"),
    (*b"KG", "<k4>"),
    (*b"KH", "<k5>"),
    (*b"KI", "<k6>"),
    (*b"KJ", "<k7>"),
    (*b"KK", "<k8>"),
    (*b"KL", "<k9>"),
    (*b"kP", "<PageUp>"),
    (*b"kN", "<PageDown>"),
    (*b"kh", "<Home>"),
    (*b"@7", "<End>"),
    (*b"kI", "<Insert>"),
    (*b"kD", "<Del>"),
    (*b"kb", "<BS>"),
    (*b"ku", "<Up>"),
    (*b"kd", "<Down>"),
    (*b"kl", "<Left>"),
    (*b"kr", "<Right>"),
    (*b"#4", "<S-Left>"),
    (*b"%i", "<S-Right>"),
    (*b"kB", "<S-Tab>"),
    ([0xff, b'X'], "<C-@>"),
    // escaped literal 0x80
    ([0xfe, b'X'], "<0x80>"),
    // Modifier prefixes. Vim combines these with the next stroke, they are
    // shown on their own here.
    ([0xfc, 0x02], "<S->"),
    ([0xfc, 0x04], "<C->"),
    ([0xfc, 0x06], "<C-S->"),
    ([0xfc, 0x08], "<A->"),
    ([0xfc, 0x0a], "<A-S->"),
    ([0xfc, 0x0c], "<C-A->"),
    ([0xfc, 0x0e], "<C-A-S->"),
    ([0xfc, 0x10], "<M->"),
    ([0xfc, 0x12], "<M-S->"),
    ([0xfc, 0x14], "<M-C->"),
    ([0xfc, 0x16], "<M-C-S->"),
    ([0xfc, 0x18], "<M-A->"),
    ([0xfc, 0x1a], "<M-A-S->"),
    ([0xfc, 0x1c], "<M-C-A->"),
    ([0xfc, 0x1e], "<M-C-A-S->"),
    ([0xfd, 0x04], "<S-Up>"),
    ([0xfd, 0x05], "<S-Down>"),
    ([0xfd, 0x2b], "<Mouse>"),
    ([0xfd, 0x2c], "<LeftMouse>"),
    ([0xfd, 0x2d], "<LeftDrag>"),
    ([0xfd, 0x2e], "<LeftRelease>"),
    ([0xfd, 0x2f], "<MiddleMouse>"),
    ([0xfd, 0x30], "<MiddleDrag>"),
    ([0xfd, 0x31], "<MiddleRelease>"),
    ([0xfd, 0x32], "<RightMouse>"),
    ([0xfd, 0x33], "<RightDrag>"),
    ([0xfd, 0x34], "<RightRelease>"),
    ([0xfd, 0x4b], "<ScrollWheelUp>"),
    ([0xfd, 0x4c], "<ScrollWheelDown>"),
    ([0xfd, 0x4d], "<ScrollWheelRight>"),
    ([0xfd, 0x4e], "<ScrollWheelLeft>"),
    ([0xfd, 0x4f], "<kInsert>"),
    ([0xfd, 0x50], "<kDel>"),
    ([0xfd, 0x55], "<C-Left>"),
    ([0xfd, 0x56], "<C-Right>"),
    ([0xfd, 0x57], "<C-Home>"),
    ([0xfd, 0x58], "<C-End>"),
];

/// Names from `:help keycodes` that are only ever typed, never decoded.
const NOTATION_ALIASES: &[(&str, &str)] = &[
    ("<nul>", "<C-@>"),
    ("<return>", "<CR>"),
    ("<enter>", "<CR>"),
    ("<space>", " "),
    ("<lt>", "<"),
    ("<bslash>", "\\"),
    ("<bar>", "|"),
    ("<csi>", "<0x9b>"),
];

/// Error for key notation that cannot be turned into key presses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeysError {
    #[error("unknown key {name} at position {position}")]
    UnknownKey { name: String, position: usize },
}

#[derive(Clone)]
struct NamedKey {
    repr: String,
    raw: Vec<u8>,
}

struct KeyTable {
    reprs: HashMap<Keycode, String>,
    /// Lowercased `<name>` to canonical representation and raw bytes.
    by_name: HashMap<String, NamedKey>,
}

impl KeyTable {
    fn build() -> Self {
        let mut reprs = HashMap::new();
        for b in 0..=u8::MAX {
            let repr = match b {
                9 => "<Tab>".to_string(),
                10 => "<NL>".to_string(),
                13 => "<CR>".to_string(),
                27 => "<Esc>".to_string(),
                127 => "<Del>".to_string(),
                0..=31 => format!("<C-{}>", (b + 64) as char),
                32..=126 => (b as char).to_string(),
                _ => format!("<0x{:02x}>", b),
            };
            reprs.insert([0, b], repr);
        }
        for (code, name) in NAMED_KEYCODES {
            reprs.insert(*code, name.to_string());
        }
        for n in 1..=37u8 {
            reprs.insert([0xfd, 5 + n], format!("<S-F{}>", n));
        }

        // Two-byte keycodes win over single bytes sharing a name (`<Del>`,
        // `<C-@>`, `<0x80>`).
        let mut codes: Vec<(&Keycode, &String)> = reprs.iter().collect();
        codes.sort_by_key(|(code, _)| (code[0] == 0, **code));
        let mut by_name: HashMap<String, NamedKey> = HashMap::new();
        for (code, repr) in codes {
            if repr.len() < 2 || !repr.starts_with('<') || !repr.ends_with('>') {
                continue;
            }
            by_name
                .entry(repr.to_ascii_lowercase())
                .or_insert_with(|| NamedKey {
                    repr: repr.clone(),
                    raw: encode_keycode(*code),
                });
        }
        for (alias, target) in NOTATION_ALIASES {
            let key = match by_name.get(&target.to_ascii_lowercase()) {
                Some(key) => key.clone(),
                None => NamedKey {
                    repr: target.to_string(),
                    raw: target.as_bytes().to_vec(),
                },
            };
            by_name.insert(alias.to_string(), key);
        }

        Self { reprs, by_name }
    }
}

fn table() -> &'static KeyTable {
    static TABLE: OnceLock<KeyTable> = OnceLock::new();
    TABLE.get_or_init(KeyTable::build)
}

/// Raw bytes vim reads for a keycode.
fn encode_keycode(code: Keycode) -> Vec<u8> {
    if code[0] == 0 {
        vec![code[1]]
    } else {
        vec![K_SPECIAL, code[0], code[1]]
    }
}

/// Split a raw keylog into keycodes.
///
/// A truncated trailing special sequence is dropped.
pub fn parse_keycodes(raw: &[u8]) -> Vec<Keycode> {
    let mut keycodes = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(b0) = bytes.next() {
        if b0 == K_SPECIAL {
            match (bytes.next(), bytes.next()) {
                (Some(b1), Some(b2)) => keycodes.push([b1, b2]),
                _ => break,
            }
        } else {
            keycodes.push([0, b0]);
        }
    }
    keycodes
}

/// Printable representation of a keycode.
///
/// Unknown keycodes are shown as their hex bytes in brackets.
pub fn keycode_repr(code: Keycode) -> String {
    match table().reprs.get(&code) {
        Some(repr) => repr.clone(),
        None => format!("[\\x{:02x}\\x{:02x}]", code[0], code[1]),
    }
}

/// A single key event of the notation grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    /// An ASCII character typed as itself.
    Char(char),
    /// A `<Name>` key, holding its canonical representation.
    Named(&'static str),
    /// One byte of a non-ASCII character. Vim reads and logs these one at a
    /// time, so each byte is a key press of its own.
    Byte(u8),
}

impl KeyToken {
    /// Bytes vim reads for this key.
    pub fn raw(&self) -> Vec<u8> {
        match self {
            KeyToken::Char(c) => {
                let mut buf = [0; 4];
                c.encode_utf8(&mut buf).as_bytes().to_vec()
            }
            KeyToken::Named(repr) => table()
                .by_name
                .get(&repr.to_ascii_lowercase())
                .map(|named| named.raw.clone())
                .unwrap_or_else(|| repr.as_bytes().to_vec()),
            KeyToken::Byte(b) => encode_keycode(byte_keycode(*b)),
        }
    }
}

/// Keycode vim uses for a byte. A bare `0x80` would start a special key,
/// so it gets the escaped form.
fn byte_keycode(b: u8) -> Keycode {
    if b == K_SPECIAL { [0xfe, b'X'] } else { [0, b] }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{}", c),
            KeyToken::Named(repr) => f.write_str(repr),
            KeyToken::Byte(b) => f.write_str(&keycode_repr(byte_keycode(*b))),
        }
    }
}

/// Split key notation into key events.
///
/// `<` starts a named key when the text up to the next `>` is a known name
/// (case-insensitive). A name-shaped token that is not known is an error;
/// any other `<` is typed literally. Use `<lt>` for a literal `<` in front
/// of a name.
pub fn tokenize(notation: &str) -> Result<Vec<KeyToken>, KeysError> {
    let table = table();
    let mut tokens = Vec::new();
    let mut idx = 0;
    while let Some(c) = notation[idx..].chars().next() {
        if c == '<' {
            if let Some(end) = notation[idx..].find('>') {
                let candidate = &notation[idx..=idx + end];
                if let Some(named) = table.by_name.get(&candidate.to_ascii_lowercase()) {
                    let mut chars = named.repr.chars();
                    tokens.push(match (chars.next(), chars.next()) {
                        (Some(single), None) => KeyToken::Char(single),
                        _ => KeyToken::Named(named.repr.as_str()),
                    });
                    idx += end + 1;
                    continue;
                }
                if is_name_shaped(candidate) {
                    return Err(KeysError::UnknownKey {
                        name: candidate.to_string(),
                        position: idx,
                    });
                }
            }
        }
        if c.is_ascii() {
            tokens.push(KeyToken::Char(c));
        } else {
            let mut buf = [0; 4];
            tokens.extend(c.encode_utf8(&mut buf).bytes().map(KeyToken::Byte));
        }
        idx += c.len_utf8();
    }
    Ok(tokens)
}

fn is_name_shaped(candidate: &str) -> bool {
    let inner = &candidate[1..candidate.len() - 1];
    let mut chars = inner.chars();
    inner.len() >= 2
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '@'))
}

/// A recorded or typed key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keys {
    raw: Vec<u8>,
    reprs: Vec<String>,
}

impl Keys {
    /// Decode a keylog written by vim's `-W`.
    pub fn from_raw(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let reprs = parse_keycodes(&raw)
            .into_iter()
            .filter(|code| !IGNORED_KEYCODES.contains(code))
            .map(keycode_repr)
            .collect();
        Self { raw, reprs }
    }

    /// Parse key notation such as `ihello<Esc>ZZ`.
    pub fn from_notation(notation: &str) -> Result<Self, KeysError> {
        let tokens = tokenize(notation)?;
        Ok(Self {
            raw: tokens.iter().flat_map(KeyToken::raw).collect(),
            reprs: tokens.iter().map(ToString::to_string).collect(),
        })
    }

    /// The bytes as vim reads or records them.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn reprs(&self) -> &[String] {
        &self.reprs
    }

    /// Number of scoring key presses.
    pub fn score(&self) -> u32 {
        self.reprs.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.reprs.is_empty()
    }
}

impl fmt::Display for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for repr in &self.reprs {
            f.write_str(repr)?;
        }
        Ok(())
    }
}
