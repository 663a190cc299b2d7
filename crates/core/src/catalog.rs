//! Built-in emoji picker table.
//!
//! Entries are stored as hex text and resolved through [`parse_hex`], so the
//! table and typed user input share one parsing path.

use crate::emoji::{parse_hex, CodepointSequence, ParseError};

/// One selectable emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub hex: &'static str,
    /// Base accepts a skin-tone modifier.
    pub tone_capable: bool,
}

impl CatalogEntry {
    const fn new(name: &'static str, hex: &'static str, tone_capable: bool) -> Self {
        Self {
            name,
            hex,
            tone_capable,
        }
    }

    pub fn sequence(&self) -> Result<CodepointSequence, ParseError> {
        parse_hex(self.hex)
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry::new("cat", "1f408", false),
    CatalogEntry::new("dog", "1f415", false),
    CatalogEntry::new("fox", "1f98a", false),
    CatalogEntry::new("frog", "1f438", false),
    CatalogEntry::new("octopus", "1f419", false),
    CatalogEntry::new("penguin", "1f427", false),
    CatalogEntry::new("turtle", "1f422", false),
    CatalogEntry::new("snail", "1f40c", false),
    CatalogEntry::new("unicorn", "1f984", false),
    CatalogEntry::new("dragon", "1f409", false),
    CatalogEntry::new("ghost", "1f47b", false),
    CatalogEntry::new("robot", "1f916", false),
    CatalogEntry::new("waving hand", "1f44b", true),
    CatalogEntry::new("boy", "1f466", true),
    CatalogEntry::new("mage", "1f9d9", true),
    CatalogEntry::new("person running", "1f3c3", true),
    CatalogEntry::new("woman technologist", "1f469-200d-1f4bb", true),
    CatalogEntry::new("man astronaut", "1f468-200d-1f680", true),
    CatalogEntry::new("red heart", "2764-fe0f", false),
];

/// Read-only view over the built-in entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    pub fn entries(&self) -> &'static [CatalogEntry] {
        ENTRIES
    }

    pub fn len(&self) -> usize {
        ENTRIES.len()
    }

    pub fn is_empty(&self) -> bool {
        ENTRIES.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static CatalogEntry> {
        ENTRIES.get(index)
    }

    /// Index of the entry called `name` (case-insensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        ENTRIES
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Index after `index`, wrapping.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % ENTRIES.len()
    }

    /// Index before `index`, wrapping.
    pub fn prev_index(&self, index: usize) -> usize {
        (index + ENTRIES.len() - 1) % ENTRIES.len()
    }
}
