//! Emoji sequence resolver
//!
//! Turns free-form hex text into a [`CodepointSequence`], places a skin-tone
//! modifier relative to the first ZWJ, and renders the sequence either as
//! display text or as a lookup key for third-party emoji art.
//!
//! Tone placement is a heuristic: only the first human component of a joined
//! sequence receives the tone. Sequences with several people that each need
//! their own tone (couples, families) are not handled.

use std::fmt::{self, Write as _};

use crate::types::{is_skin_tone, AssetKeyStyle, SkinTone, VS16, ZWJ};

/// Error returned by [`parse_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input contained no codepoint tokens.
    #[error("empty codepoint input")]
    Empty,

    /// A token is not a hexadecimal Unicode scalar value.
    #[error("invalid codepoint token `{token}`")]
    InvalidToken {
        /// The offending token as typed (prefix included).
        token: String,
    },
}

/// An ordered sequence of Unicode scalar values.
///
/// Sequences are immutable; every operation returns a new sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CodepointSequence(Vec<u32>);

impl CodepointSequence {
    pub fn new(codepoints: Vec<u32>) -> Self {
        Self(codepoints)
    }

    /// Sequence of the scalar values making up `text`.
    pub fn from_text(text: &str) -> Self {
        Self(text.chars().map(u32::from).collect())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First skin-tone modifier in the sequence, if any.
    pub fn skin_tone(&self) -> Option<SkinTone> {
        self.0.iter().copied().find_map(SkinTone::from_codepoint)
    }

    pub fn contains_zwj(&self) -> bool {
        self.0.contains(&ZWJ)
    }
}

impl From<Vec<u32>> for CodepointSequence {
    fn from(value: Vec<u32>) -> Self {
        Self(value)
    }
}

impl fmt::Display for CodepointSequence {
    /// Formats as `U+1F469 U+200D U+1F4BB`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cp) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "U+{:04X}", cp)?;
        }
        Ok(())
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '-' | '_')
}

fn strip_prefix(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let head = [bytes[0].to_ascii_lowercase(), bytes[1]];
        if head == *b"u+" || (head[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X')) {
            return &token[2..];
        }
    }
    token
}

fn parse_token(token: &str) -> Result<u32, ParseError> {
    let digits = strip_prefix(token);
    let invalid = || ParseError::InvalidToken {
        token: token.to_string(),
    };

    // from_str_radix tolerates a leading '+', which is not a hex digit here.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let cp = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    char::from_u32(cp).map(u32::from).ok_or_else(invalid)
}

/// Parse free-form hex text into a codepoint sequence.
///
/// Tokens are separated by whitespace, `,`, `-` or `_` and may carry a
/// `u+` / `U+` / `0x` prefix. Any bad token fails the whole parse.
///
/// # Examples
///
/// ```
/// use critters_core::emoji::{parse_hex, ParseError};
///
/// let seq = parse_hex("U+1F469 200d,0x1f4bb").unwrap();
/// assert_eq!(seq.as_slice(), &[0x1F469, 0x200D, 0x1F4BB]);
///
/// assert_eq!(parse_hex("  "), Err(ParseError::Empty));
/// assert!(parse_hex("1f600 zz").is_err());
/// ```
pub fn parse_hex(input: &str) -> Result<CodepointSequence, ParseError> {
    let mut out = Vec::new();
    for token in input.split(is_separator).filter(|t| !t.is_empty()) {
        out.push(parse_token(token)?);
    }
    if out.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(CodepointSequence(out))
}

/// Remove every skin-tone modifier from `base`.
pub fn strip_skin_tones(base: &CodepointSequence) -> CodepointSequence {
    CodepointSequence(base.0.iter().copied().filter(|&cp| !is_skin_tone(cp)).collect())
}

/// Insert `tone` into `base`, replacing any tone already present.
///
/// With `None` the input is returned unchanged. When `base` has a ZWJ after
/// its first codepoint the tone goes right before that ZWJ; otherwise it goes
/// right after the first codepoint.
///
/// # Examples
///
/// ```
/// use critters_core::emoji::{apply_skin_tone, CodepointSequence};
/// use critters_core::types::SkinTone;
///
/// let technologist = CodepointSequence::new(vec![0x1F469, 0x200D, 0x1F4BB]);
/// let toned = apply_skin_tone(&technologist, Some(SkinTone::Medium));
/// assert_eq!(toned.as_slice(), &[0x1F469, 0x1F3FD, 0x200D, 0x1F4BB]);
/// ```
pub fn apply_skin_tone(base: &CodepointSequence, tone: Option<SkinTone>) -> CodepointSequence {
    let Some(tone) = tone else {
        return base.clone();
    };

    let mut out = strip_skin_tones(base).0;
    let at = match out.iter().position(|&cp| cp == ZWJ) {
        Some(i) if i > 0 => i,
        _ => out.len().min(1),
    };
    out.insert(at, tone.codepoint());
    CodepointSequence(out)
}

/// Lowercase hex key for art-asset lookup, with VS16 dropped.
///
/// # Examples
///
/// ```
/// use critters_core::emoji::{to_asset_key, CodepointSequence};
/// use critters_core::types::AssetKeyStyle;
///
/// let heart = CodepointSequence::new(vec![0x2764, 0xFE0F]);
/// assert_eq!(to_asset_key(&heart, AssetKeyStyle::Hyphenated), "2764");
///
/// let seq = CodepointSequence::new(vec![0x1F469, 0x200D, 0x1F4BB]);
/// assert_eq!(to_asset_key(&seq, AssetKeyStyle::Underscored), "1f469_200d_1f4bb");
/// ```
pub fn to_asset_key(sequence: &CodepointSequence, style: AssetKeyStyle) -> String {
    let sep = style.separator();
    let mut key = String::with_capacity(sequence.len() * 6);
    for cp in sequence.0.iter().copied().filter(|&cp| cp != VS16) {
        if !key.is_empty() {
            key.push(sep);
        }
        // Writing into a String cannot fail.
        let _ = write!(key, "{:x}", cp);
    }
    key
}

/// Text the terminal renders as the emoji glyph (VS16 kept).
///
/// Values that are not scalar values can only come from
/// [`CodepointSequence::new`]; they render as U+FFFD.
pub fn to_display_string(sequence: &CodepointSequence) -> String {
    sequence
        .0
        .iter()
        .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// A versioned third-party emoji art set.
///
/// The template is opaque apart from the `{key}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    pub template: String,
    pub style: AssetKeyStyle,
}

impl AssetSource {
    pub const KEY_PLACEHOLDER: &'static str = "{key}";

    pub fn new(template: impl Into<String>, style: AssetKeyStyle) -> Self {
        Self {
            template: template.into(),
            style,
        }
    }

    /// Twemoji SVG set (hyphenated keys).
    pub fn twemoji() -> Self {
        Self::new(
            "https://cdn.jsdelivr.net/gh/jdecked/twemoji@15.1.0/assets/svg/{key}.svg",
            AssetKeyStyle::Hyphenated,
        )
    }

    /// Noto Emoji SVG set (underscored keys, `emoji_u` prefix).
    pub fn noto() -> Self {
        Self::new(
            "https://cdn.jsdelivr.net/gh/googlefonts/noto-emoji@v2.047/svg/emoji_u{key}.svg",
            AssetKeyStyle::Underscored,
        )
    }

    /// Preset by name ("twemoji" | "noto", case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "twemoji" => Some(Self::twemoji()),
            "noto" => Some(Self::noto()),
            _ => None,
        }
    }

    /// Image URL for `sequence` in this art set.
    pub fn url(&self, sequence: &CodepointSequence) -> String {
        self.template
            .replace(Self::KEY_PLACEHOLDER, &to_asset_key(sequence, self.style))
    }
}

impl Default for AssetSource {
    fn default() -> Self {
        Self::twemoji()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(cps: &[u32]) -> CodepointSequence {
        CodepointSequence::new(cps.to_vec())
    }

    #[test]
    fn parse_accepts_mixed_prefixes_and_separators() {
        let s = parse_hex("u+1F469_0X200d  0x1f4bb").unwrap();
        assert_eq!(s.as_slice(), &[0x1F469, 0x200D, 0x1F4BB]);
    }

    #[test]
    fn parse_skips_repeated_separators() {
        let s = parse_hex(",1f600,, 1f601--").unwrap();
        assert_eq!(s.as_slice(), &[0x1F600, 0x1F601]);
    }

    #[test]
    fn parse_separator_only_input_is_empty() {
        assert_eq!(parse_hex(" -_, \t"), Err(ParseError::Empty));
    }

    #[test]
    fn parse_rejects_bare_prefix_and_plus_sign() {
        assert_eq!(
            parse_hex("u+"),
            Err(ParseError::InvalidToken {
                token: "u+".to_string()
            })
        );
        assert!(parse_hex("+1f600").is_err());
    }

    #[test]
    fn parse_rejects_non_scalar_values() {
        assert!(parse_hex("d800").is_err());
        assert!(parse_hex("110000").is_err());
        assert!(parse_hex("ffffffffff").is_err());
    }

    #[test]
    fn parse_error_names_first_bad_token() {
        let err = parse_hex("1f600 0xzz 1f601").unwrap_err();
        assert_eq!(err.to_string(), "invalid codepoint token `0xzz`");
    }

    #[test]
    fn tone_after_first_codepoint_without_zwj() {
        let out = apply_skin_tone(&seq(&[0x1F44B]), Some(SkinTone::Dark));
        assert_eq!(out.as_slice(), &[0x1F44B, 0x1F3FF]);
    }

    #[test]
    fn tone_on_empty_sequence_is_singleton() {
        let out = apply_skin_tone(&CodepointSequence::default(), Some(SkinTone::Light));
        assert_eq!(out.as_slice(), &[0x1F3FB]);
    }

    #[test]
    fn tone_none_keeps_existing_tone() {
        let toned = seq(&[0x1F466, 0x1F3FB]);
        assert_eq!(apply_skin_tone(&toned, None), toned);
    }

    #[test]
    fn tone_replaces_existing_tone_before_zwj() {
        let base = seq(&[0x1F469, 0x1F3FB, 0x200D, 0x1F4BB]);
        let out = apply_skin_tone(&base, Some(SkinTone::MediumDark));
        assert_eq!(out.as_slice(), &[0x1F469, 0x1F3FE, 0x200D, 0x1F4BB]);
    }

    #[test]
    fn leading_zwj_falls_back_to_after_first() {
        let out = apply_skin_tone(&seq(&[0x200D, 0x1F4BB]), Some(SkinTone::Medium));
        assert_eq!(out.as_slice(), &[0x200D, 0x1F3FD, 0x1F4BB]);
    }

    #[test]
    fn strip_removes_all_tones() {
        let out = strip_skin_tones(&seq(&[0x1F469, 0x1F3FB, 0x200D, 0x1F468, 0x1F3FF]));
        assert_eq!(out.as_slice(), &[0x1F469, 0x200D, 0x1F468]);
    }

    #[test]
    fn display_keeps_vs16() {
        let heart = seq(&[0x2764, 0xFE0F]);
        assert_eq!(to_display_string(&heart), "\u{2764}\u{FE0F}");
        assert_eq!(to_asset_key(&heart, AssetKeyStyle::Hyphenated), "2764");
    }

    #[test]
    fn asset_key_is_unpadded_lowercase() {
        let s = seq(&[0xA9, 0x1F1FA]);
        assert_eq!(to_asset_key(&s, AssetKeyStyle::Hyphenated), "a9-1f1fa");
    }

    #[test]
    fn asset_urls_follow_preset_style() {
        let s = seq(&[0x1F469, 0x1F3FD, 0x200D, 0x1F4BB]);
        assert!(AssetSource::twemoji()
            .url(&s)
            .ends_with("/1f469-1f3fd-200d-1f4bb.svg"));
        assert!(AssetSource::noto()
            .url(&s)
            .ends_with("/emoji_u1f469_1f3fd_200d_1f4bb.svg"));
        assert_eq!(AssetSource::from_name("NOTO"), Some(AssetSource::noto()));
        assert_eq!(AssetSource::from_name("apple"), None);
    }

    #[test]
    fn display_impl_lists_codepoints() {
        assert_eq!(seq(&[0x1F600, 0x200D]).to_string(), "U+1F600 U+200D");
    }
}
