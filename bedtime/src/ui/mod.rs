//! Terminal UI: rendering and clipboard plumbing.

pub mod render;
pub mod theme;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// OSC 52 escape sequence asking the terminal emulator to place `text`
/// on the system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
