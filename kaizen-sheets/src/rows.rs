//! Row-number arithmetic and A1 range helpers.
//!
//! A record's zero-based position in the in-memory snapshot maps to a
//! one-based row number in the sheet with a fixed offset of 2: one for
//! one-based indexing, one for the header row. Pure arithmetic, no
//! bounds checking here: staying inside the live table is the caller's
//! contract.

use kaizen_core::Field;

/// Rows occupied by the header.
pub const HEADER_ROWS: u32 = 1;

/// Translate a zero-based record position to its one-based sheet row.
pub fn to_remote(position: usize) -> u32 {
    position as u32 + HEADER_ROWS + 1
}

/// A1 column letter for a zero-based column index (0 → "A", 26 → "AA").
pub fn column_letter(index: usize) -> String {
    let mut index = index as i64;
    let mut letters = String::new();
    loop {
        letters.insert(0, char::from(b'A' + (index % 26) as u8));
        index = index / 26 - 1;
        if index < 0 {
            break;
        }
    }
    letters
}

/// Letter of the last declared schema column.
pub fn last_column() -> String {
    column_letter(Field::count() - 1)
}

/// Quote a worksheet name for A1 notation when it needs it.
fn sheet_prefix(worksheet: &str) -> String {
    if worksheet.chars().all(|c| c.is_ascii_alphanumeric()) {
        worksheet.to_string()
    } else {
        format!("'{}'", worksheet.replace('\'', "''"))
    }
}

/// Range covering the header row over the declared span.
pub fn header_range(worksheet: &str) -> String {
    format!("{}!A1:{}1", sheet_prefix(worksheet), last_column())
}

/// Open-ended range covering the whole table (header included).
pub fn table_range(worksheet: &str) -> String {
    format!("{}!A1:{}", sheet_prefix(worksheet), last_column())
}

/// Range covering the full declared span of one sheet row.
pub fn row_range(worksheet: &str, row_number: u32) -> String {
    format!(
        "{}!A{row_number}:{}{row_number}",
        sheet_prefix(worksheet),
        last_column()
    )
}
