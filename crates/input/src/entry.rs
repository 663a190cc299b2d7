//! Hex codepoint entry prompt.
//!
//! Collects raw text while the prompt is open. Parsing is left to the caller
//! so the prompt never decides what a valid sequence is.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest text the prompt accepts.
pub const HEX_ENTRY_CAPACITY: usize = 64;

/// Result of feeding a key to an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// Keep collecting.
    Editing,
    /// Enter pressed; carries the typed text.
    Submitted(String),
    /// Esc pressed; text discarded.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct HexEntry {
    open: bool,
    text: ArrayString<HEX_ENTRY_CAPACITY>,
}

impl HexEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn open(&mut self) {
        self.open = true;
        self.text.clear();
    }

    fn close(&mut self) {
        self.open = false;
        self.text.clear();
    }

    /// Feed a key press. Closed prompts ignore input and report `Editing`.
    pub fn handle_key(&mut self, key: KeyEvent) -> EntryEvent {
        if !self.open {
            return EntryEvent::Editing;
        }

        match key.code {
            KeyCode::Enter => {
                let text = self.text.to_string();
                self.close();
                EntryEvent::Submitted(text)
            }
            KeyCode::Esc => {
                self.close();
                EntryEvent::Cancelled
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.close();
                EntryEvent::Cancelled
            }
            KeyCode::Backspace => {
                self.text.pop();
                EntryEvent::Editing
            }
            KeyCode::Char(ch) if is_entry_char(ch) => {
                // Full buffer: extra characters are dropped.
                let _ = self.text.try_push(ch);
                EntryEvent::Editing
            }
            _ => EntryEvent::Editing,
        }
    }
}

/// Characters that can appear in hex codepoint text.
fn is_entry_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | ',' | '-' | '_' | '+')
}
