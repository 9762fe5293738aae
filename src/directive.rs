//! Remote-directive wire format.
//!
//! The HUD server answers the periodic HTTP fetch with a small plain-text,
//! newline-separated document:
//!
//! ```text
//! color:#00ff00
//! line0:Power: 1.21 GW
//! line1:Gas: 0.3 m3
//! action:UP
//! ```
//!
//! Recognised prefixes are `color:#RRGGBB`, `line0:`, `line1:` and
//! `action:UP|DOWN|RESET`.  Unknown lines are ignored, the last occurrence
//! of a repeated key wins, and a missing trailing newline just makes the
//! remainder the final line.  A malformed document therefore never aborts
//! anything — absent fields stay absent and the colour falls back to the
//! "pending" yellow.

use crate::device::{COLOR_YELLOW, SunscreenAction};

/// Parse result of one fetched status document.  Borrows from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDirective<'a> {
    /// Background colour, 0xRRGGBB.  Pending-yellow when the document does
    /// not specify one.
    pub color: u32,
    pub line0: Option<&'a str>,
    pub line1: Option<&'a str>,
    pub action: Option<SunscreenAction>,
}

impl Default for RemoteDirective<'_> {
    fn default() -> Self {
        Self {
            color: COLOR_YELLOW,
            line0: None,
            line1: None,
            action: None,
        }
    }
}

/// Scan the document line by line, overwriting on repeats.
pub fn parse_remote(doc: &str) -> RemoteDirective<'_> {
    let mut res = RemoteDirective::default();

    for line in doc.split('\n') {
        if let Some(hex) = line.strip_prefix("color:#") {
            res.color = parse_hex_prefix(hex);
        } else if let Some(text) = line.strip_prefix("line0:") {
            res.line0 = Some(text);
        } else if let Some(text) = line.strip_prefix("line1:") {
            res.line1 = Some(text);
        } else if line.starts_with("action:UP") {
            res.action = Some(SunscreenAction::Up);
        } else if line.starts_with("action:RESET") {
            res.action = Some(SunscreenAction::None);
        } else if line.starts_with("action:DOWN") {
            res.action = Some(SunscreenAction::Down);
        }
    }
    res
}

/// Leading hex digits of `s`, `strtol`-style: stop at the first non-digit,
/// yield 0 when there are none.
fn parse_hex_prefix(s: &str) -> u32 {
    let digits: &str = {
        let end = s
            .char_indices()
            .take(8)
            .take_while(|(_, c)| c.is_ascii_hexdigit())
            .last()
            .map_or(0, |(i, _)| i + 1);
        &s[..end]
    };
    u32::from_str_radix(digits, 16).unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
