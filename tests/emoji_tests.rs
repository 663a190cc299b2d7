//! Emoji sequence resolver properties.

use critters::core::emoji::{
    apply_skin_tone, parse_hex, strip_skin_tones, to_asset_key, to_display_string,
};
use critters::core::{AssetSource, Catalog, CodepointSequence, ParseError};
use critters::types::{AssetKeyStyle, SkinTone, VS16, ZWJ};

fn seq(cps: &[u32]) -> CodepointSequence {
    CodepointSequence::new(cps.to_vec())
}

fn tone_count(s: &CodepointSequence) -> usize {
    s.as_slice()
        .iter()
        .filter(|&&cp| SkinTone::from_codepoint(cp).is_some())
        .count()
}

#[test]
fn parse_accepts_mixed_prefixes_and_separators() {
    let parsed = parse_hex("U+1F469, 0x200d_u+1f4bb").unwrap();
    assert_eq!(parsed, seq(&[0x1F469, ZWJ, 0x1F4BB]));
}

#[test]
fn parse_failure_has_no_partial_result() {
    assert_eq!(
        parse_hex("1f469 200d GG 1f4bb"),
        Err(ParseError::InvalidToken {
            token: "GG".to_string()
        })
    );
}

#[test]
fn parse_rejects_non_scalar_values() {
    assert!(matches!(parse_hex("d800"), Err(ParseError::InvalidToken { .. })));
    assert!(matches!(parse_hex("110000"), Err(ParseError::InvalidToken { .. })));
}

#[test]
fn parse_empty_input() {
    assert_eq!(parse_hex(""), Err(ParseError::Empty));
    assert_eq!(parse_hex(" \t "), Err(ParseError::Empty));
    assert_eq!(parse_hex(" , - _ "), Err(ParseError::Empty));
}

#[test]
fn parse_keeps_order_and_duplicates() {
    assert_eq!(parse_hex("2764 2764 fe0f").unwrap(), seq(&[0x2764, 0x2764, VS16]));
}

#[test]
fn tone_goes_before_first_zwj() {
    let base = parse_hex("1f469-200d-1f4bb").unwrap();
    let toned = apply_skin_tone(&base, Some(SkinTone::Medium));
    assert_eq!(toned, seq(&[0x1F469, 0x1F3FD, ZWJ, 0x1F4BB]));
}

#[test]
fn tone_goes_after_first_codepoint_without_zwj() {
    let toned = apply_skin_tone(&seq(&[0x1F44B]), Some(SkinTone::Dark));
    assert_eq!(toned, seq(&[0x1F44B, 0x1F3FF]));
}

#[test]
fn tone_on_empty_base_is_the_tone() {
    let toned = apply_skin_tone(&CodepointSequence::default(), Some(SkinTone::Light));
    assert_eq!(toned, seq(&[0x1F3FB]));
}

#[test]
fn no_tone_is_identity() {
    let base = seq(&[0x1F469, 0x1F3FD, ZWJ, 0x1F4BB]);
    assert_eq!(apply_skin_tone(&base, None), base);
}

#[test]
fn at_most_one_tone_and_last_tone_wins() {
    let bases = [
        seq(&[0x1F44B]),
        seq(&[0x1F469, ZWJ, 0x1F4BB]),
        seq(&[0x1F9D1, 0x1F3FB, ZWJ, 0x1F680]),
    ];
    for base in &bases {
        for a in SkinTone::ALL {
            for b in SkinTone::ALL {
                let once = apply_skin_tone(base, Some(b));
                let twice = apply_skin_tone(&apply_skin_tone(base, Some(a)), Some(b));
                assert_eq!(tone_count(&twice), 1);
                assert_eq!(twice, once);
                assert_eq!(twice.skin_tone(), Some(b));
            }
        }
    }
}

#[test]
fn strip_removes_every_tone() {
    let s = seq(&[0x1F469, 0x1F3FD, ZWJ, 0x1F469, 0x1F3FF]);
    assert_eq!(strip_skin_tones(&s), seq(&[0x1F469, ZWJ, 0x1F469]));
}

#[test]
fn asset_key_drops_vs16_and_is_idempotent() {
    let heart = parse_hex("2764-fe0f").unwrap();
    let key = to_asset_key(&heart, AssetKeyStyle::Hyphenated);
    assert_eq!(key, "2764");

    let reparsed = parse_hex(&key).unwrap();
    assert_eq!(to_asset_key(&reparsed, AssetKeyStyle::Hyphenated), key);

    let astronaut = parse_hex("1F468 200D 1F680").unwrap();
    let key = to_asset_key(&astronaut, AssetKeyStyle::Underscored);
    assert_eq!(key, "1f468_200d_1f680");
    assert_eq!(
        to_asset_key(&parse_hex(&key).unwrap(), AssetKeyStyle::Underscored),
        key
    );
}

#[test]
fn display_string_keeps_vs16() {
    let heart = parse_hex("2764 fe0f").unwrap();
    assert_eq!(to_display_string(&heart), "\u{2764}\u{FE0F}");
}

#[test]
fn asset_urls_follow_the_art_set() {
    let base = parse_hex("1f469-200d-1f4bb").unwrap();
    let toned = apply_skin_tone(&base, Some(SkinTone::MediumLight));
    assert!(AssetSource::twemoji()
        .url(&toned)
        .ends_with("/1f469-1f3fc-200d-1f4bb.svg"));
    assert!(AssetSource::noto()
        .url(&toned)
        .ends_with("/emoji_u1f469_1f3fc_200d_1f4bb.svg"));
}

#[test]
fn every_catalog_entry_resolves() {
    let catalog = Catalog;
    for entry in catalog.entries() {
        let s = entry.sequence().unwrap();
        assert!(!s.is_empty(), "{}", entry.name);
        if entry.tone_capable {
            let toned = apply_skin_tone(&s, Some(SkinTone::Medium));
            assert_eq!(toned.skin_tone(), Some(SkinTone::Medium));
        }
    }
}
