// Number formatters
//
// Shared formatting utilities for the status segments.

/// Format a number compactly with K/M suffixes
///
/// # Examples
/// ```ignore
/// assert_eq!(format_compact_number(954356), "954K");
/// assert_eq!(format_compact_number(1_500_000), "1.5M");
/// assert_eq!(format_compact_number(42), "42");
/// ```
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{}K", n / 1_000)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Cut `text` so it occupies at most `width` terminal cells
pub fn truncate_to_width(text: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
