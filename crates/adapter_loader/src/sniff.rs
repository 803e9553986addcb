//! Delimiter detection for extract files.
//!
//! Extracts arrive comma-, semicolon-, tab- or pipe-separated depending on the
//! locale of whoever exported them. The delimiter is chosen from the header
//! line: the candidate with the most occurrences outside quoted sections wins,
//! ties resolved in candidate order, comma if none occurs.

/// Candidate delimiters in priority order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Picks the delimiter of a header line.
///
/// # Examples
/// ```
/// use adapter_loader::sniff::sniff_delimiter;
///
/// assert_eq!(sniff_delimiter("LEI_Code;Period;Item;Amount"), b';');
/// assert_eq!(sniff_delimiter("LEI_Code,Period,Item,Amount"), b',');
/// assert_eq!(sniff_delimiter("single"), b',');
/// ```
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;

    for byte in header_line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|&d| d == byte) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    CANDIDATE_DELIMITERS[best]
}
