//! Low-level text helpers

use encoding_rs::UTF_8;
use log::{debug, warn};

/// Decode raw document bytes to text.
///
/// A UTF-8 or UTF-16 byte-order mark selects the encoding; without one the
/// document is read as UTF-8. Invalid sequences are replaced, not rejected.
pub fn decode_document(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    debug!("Decoded {} bytes of statistics XML as {}", bytes.len(), encoding.name());
    if had_errors {
        warn!("Statistics XML contained byte sequences invalid for {}; they were replaced", encoding.name());
    }
    text.into_owned()
}

/// Parse a counter value written as decimal text.
pub fn parse_count(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok()
}
