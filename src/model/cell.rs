// File: src/model/cell.rs
use std::fmt;

// Absence keywords, matched on the first three characters.
const ABSENCE_PREFIXES: &[&str] = &["off", "sic", "vac"];

// Applied in order. Each separator phrase becomes the pipe delimiter,
// qualifiers are dropped.
const SEPARATORS: &[(&str, &str)] = &[
    (" LUNCH : ", "|"),
    (" LUNCH: ", "|"),
    (" - ", "|"),
    ("-", "|"),
    (" PST", ""),
    (" PDT", ""),
    (" NO LUNCH", ""),
    ("LUNCH ", ""),
];

/// One table cell, before or after sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Free text: employee names, date headers, or not yet normalized content.
    Text(String),
    /// First cell of a row that carries the column dates.
    DatesHeader,
    NoShift,
    /// Canonical pipe-delimited time tokens, e.g. `9:00 AM|5:00 PM|12:00 PM`.
    Shift(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_no_shift(&self) -> bool {
        matches!(self, Cell::NoShift)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) | Cell::Shift(s) => s,
            Cell::DatesHeader => "@DATES",
            Cell::NoShift => "*",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleans the raw text of a shift cell into a canonical `Cell::Shift` token or
/// `Cell::NoShift`. Never fails: text that cannot be recognized degrades to
/// `NoShift` and is logged.
pub fn normalize_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == Cell::NoShift.as_str() {
        return Cell::NoShift;
    }

    let prefix: String = trimmed.chars().take(3).collect::<String>().to_lowercase();
    if ABSENCE_PREFIXES.contains(&prefix.as_str()) {
        return Cell::NoShift;
    }

    if !trimmed.chars().next().is_some_and(char::is_numeric) {
        log::warn!("Unrecognized cell: {:?}", trimmed);
        return Cell::NoShift;
    }

    let mut fixed = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    for (from, to) in SEPARATORS {
        fixed = fixed.replace(from, to);
    }

    // Keep the first two words of each segment; anything after is commentary.
    let tokens: Vec<String> = fixed
        .split('|')
        .map(|segment| {
            segment
                .split_whitespace()
                .take(2)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Cell::Shift(tokens.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_keywords() {
        for raw in ["OFF", "off", "Sick day", "SICK", "Vacation", "vac."] {
            assert_eq!(normalize_cell(raw), Cell::NoShift, "{raw}");
        }
    }

    #[test]
    fn test_unrecognized_text_is_no_shift() {
        assert_eq!(normalize_cell("Training at HQ"), Cell::NoShift);
        assert_eq!(normalize_cell("   "), Cell::NoShift);
    }

    #[test]
    fn test_no_shift_marker_passes_through() {
        assert_eq!(normalize_cell("*"), Cell::NoShift);
        assert_eq!(normalize_cell(" * "), Cell::NoShift);
        assert_eq!(normalize_cell(Cell::NoShift.as_str()), Cell::NoShift);
    }

    #[test]
    fn test_start_end() {
        assert_eq!(
            normalize_cell("9AM - 5PM"),
            Cell::Shift("9AM|5PM".to_string())
        );
    }

    #[test]
    fn test_lunch_and_qualifiers() {
        assert_eq!(
            normalize_cell("9:00 AM - 5:30 PM PST\r\nLUNCH : 12:00 PM"),
            Cell::Shift("9:00 AM|5:30 PM|12:00 PM".to_string())
        );
        assert_eq!(
            normalize_cell("10:00 AM  -  6:00 PM PST NO LUNCH"),
            Cell::Shift("10:00 AM|6:00 PM".to_string())
        );
    }

    #[test]
    fn test_trailing_commentary_dropped() {
        assert_eq!(
            normalize_cell("8:00 AM - 4:00 PM cover for Sam"),
            Cell::Shift("8:00 AM|4:00 PM".to_string())
        );
    }

    #[test]
    fn test_normalization_is_a_fixpoint() {
        let once = normalize_cell("9:00 am - 5:00 pm Lunch : 1:00 pm");
        let twice = normalize_cell(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(Cell::DatesHeader.to_string(), "@DATES");
        assert_eq!(Cell::NoShift.to_string(), "*");
    }
}
