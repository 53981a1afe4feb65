//! Loosely-typed record representation.
//!
//! An [`IdeaRecord`] is the working representation the rest of the
//! system passes around: a map from schema fields to free-form text,
//! plus the coerced numeric identifier. Every field besides the
//! identifier is plain text by contract; the sheet itself is the only
//! schema the data has.

use crate::schema::Field;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One idea submission.
///
/// The `id` is the coerced view of the `ID` column: `None` when the
/// column is missing or not numeric (a read never fails over it).
/// `fields` holds the raw text of every column that has been set;
/// absent fields read back as `""` and are written as `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaRecord {
    id: Option<i64>,
    fields: BTreeMap<Field, String>,
}

impl IdeaRecord {
    /// Empty record with no identifier and no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The coerced numeric identifier, if the record has one.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Assign the identifier, keeping the `ID` column text in sync.
    pub fn set_id(&mut self, id: i64) {
        self.id = Some(id);
        self.fields.insert(Field::Id, id.to_string());
    }

    /// Raw text of a field; `""` when unset.
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Set the raw text of a field.
    ///
    /// Setting `Field::Id` re-coerces the identifier: a non-numeric
    /// value leaves the record with the `None` sentinel rather than
    /// erroring.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if field == Field::Id {
            self.id = value.trim().parse::<i64>().ok();
        }
        self.fields.insert(field, value);
    }

    /// Whether the field has been explicitly set (even to `""`).
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Typed view of the `Status` column. `None` when the column holds
    /// an unknown value; the raw text stays available via `get`.
    pub fn status(&self) -> Option<Status> {
        self.get(Field::Status).parse().ok()
    }

    /// Set the `Status` column from the typed enum.
    pub fn set_status(&mut self, status: Status) {
        self.fields
            .insert(Field::Status, status.as_sheet_str().to_string());
    }

    /// Iterate the set fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// First required submission field that is empty or blank, if any.
    pub fn missing_required(&self) -> Option<Field> {
        Field::REQUIRED_ON_SUBMIT
            .iter()
            .copied()
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Overlay every field set on `other` onto this record, except the
    /// identifier, which is never taken from an edit.
    pub fn merge_from(&mut self, other: &IdeaRecord) {
        for (field, value) in other.fields() {
            if field == Field::Id {
                continue;
            }
            self.set(field, value);
        }
    }
}
