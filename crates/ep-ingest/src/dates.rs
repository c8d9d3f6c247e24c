//! Accepted date layouts
//!
//! Uploads come from spreadsheets exported in different locales, so a date
//! cell is tried against several layouts in a fixed order and the first one
//! that fits wins. `01/02/2024` therefore reads as 1 February, because
//! `DD/MM/YYYY` is tried before `MM/DD/YYYY`.

use chrono::NaiveDate;

/// One accepted layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    /// Human-readable layout, e.g. `DD/MM/YYYY`
    pub label: String,
    /// chrono format string
    pub pattern: String,
}

impl DateFormat {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    /// Fixed-width read: `%Y` takes four digits, `%m` and `%d` take two
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        if !fits_width(&self.pattern, raw) {
            return None;
        }
        NaiveDate::parse_from_str(raw, &self.pattern).ok()
    }
}

/// chrono accepts short years and single-digit fields, so `05-03-24` would
/// otherwise read as year 5
fn fits_width(pattern: &str, raw: &str) -> bool {
    let mut text = raw.chars();
    let mut spec = pattern.chars();
    while let Some(c) = spec.next() {
        let width = match c {
            '%' => match spec.next() {
                Some('Y') => 4,
                Some('m' | 'd') => 2,
                // Other specifiers are left to chrono
                _ => return true,
            },
            literal => {
                if text.next() != Some(literal) {
                    return false;
                }
                continue;
            }
        };
        if !(0..width).all(|_| text.next().is_some_and(|d| d.is_ascii_digit())) {
            return false;
        }
    }
    text.next().is_none()
}

/// Outcome of reading one date cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCell {
    /// Empty or `NULL`
    Absent,
    Date(NaiveDate),
    Unparseable,
}

/// Ordered, immutable list of accepted layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormats {
    formats: Vec<DateFormat>,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self::new(vec![
            DateFormat::new("YYYY-MM-DD", "%Y-%m-%d"),
            DateFormat::new("DD/MM/YYYY", "%d/%m/%Y"),
            DateFormat::new("MM/DD/YYYY", "%m/%d/%Y"),
            DateFormat::new("DD-MM-YYYY", "%d-%m-%Y"),
            DateFormat::new("YYYY/MM/DD", "%Y/%m/%d"),
        ])
    }
}

impl DateFormats {
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self { formats }
    }

    /// Read a cell: absent markers first, then each layout in order
    pub fn read(&self, raw: &str) -> DateCell {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NULL") {
            return DateCell::Absent;
        }

        self.formats
            .iter()
            .find_map(|format| format.parse(trimmed))
            .map_or(DateCell::Unparseable, DateCell::Date)
    }

    /// Whether the cell holds a date in one of the accepted layouts
    pub fn is_date(&self, raw: &str) -> bool {
        matches!(self.read(raw), DateCell::Date(_))
    }
}
