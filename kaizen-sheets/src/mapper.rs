//! Conversion between records and the sheet's ordered row layout.
//!
//! `to_row` emits one value per schema field, in schema order, with
//! `""` for anything unset, so a submitted mapping can never error over
//! a missing key. `from_row` rebuilds a record from a header-keyed row,
//! matching keys case-exactly and ignoring anything the schema does not
//! declare. Identifier coercion happens here: a non-numeric `ID` cell
//! becomes the `None` sentinel instead of failing the read.

use kaizen_core::{Field, IdeaRecord};
use std::collections::HashMap;

/// Order a record's fields into the declared column layout.
pub fn to_row(record: &IdeaRecord) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| record.get(*field).to_string())
        .collect()
}

/// Rebuild a record from a header-keyed row.
///
/// Unrecognized keys are ignored; recognized keys must match the
/// declared header exactly, including case.
pub fn from_row(named: &HashMap<String, String>) -> IdeaRecord {
    let mut record = IdeaRecord::new();
    for (key, value) in named {
        if let Some(field) = Field::from_header(key) {
            record.set(field, value.clone());
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_to_row_has_one_cell_per_column() {
        let record = IdeaRecord::new();
        let row = to_row(&record);
        assert_eq!(row.len(), Field::count());
        assert!(row.iter().all(String::is_empty));
    }

    #[test]
    fn test_to_row_orders_by_schema() {
        let mut record = IdeaRecord::new();
        record.set_id(12);
        record.set(Field::IdeaName, "Reaproveitar vapor");
        record.set(Field::ImageUrl, "https://drive.google.com/uc?id=abc");

        let row = to_row(&record);
        assert_eq!(row[0], "12");
        assert_eq!(row[1], "Reaproveitar vapor");
        assert_eq!(row[23], "https://drive.google.com/uc?id=abc");
        assert_eq!(row[2], "");
    }

    #[test]
    fn test_from_row_coerces_identifier() {
        let record = from_row(&named(&[("ID", "7"), ("Nome da ideia", "Trocar filtro")]));
        assert_eq!(record.id(), Some(7));
        assert_eq!(record.get(Field::IdeaName), "Trocar filtro");
    }

    #[test]
    fn test_from_row_non_numeric_id_is_sentinel() {
        let record = from_row(&named(&[("ID", "sete")]));
        assert_eq!(record.id(), None);
        assert_eq!(record.get(Field::Id), "sete");
    }

    #[test]
    fn test_from_row_missing_id_is_sentinel() {
        let record = from_row(&named(&[("Nome da ideia", "Sem ID")]));
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_from_row_ignores_unrecognized_and_miscased_keys() {
        let record = from_row(&named(&[
            ("Nome da Ideia", "casing drift"),
            ("Coluna extra", "ignorada"),
            ("Nome da ideia", "correta"),
        ]));
        assert_eq!(record.get(Field::IdeaName), "correta");
    }

    fn field_subset() -> impl Strategy<Value = Vec<(Field, String)>> {
        proptest::collection::vec(
            (0usize..Field::count(), "[a-zA-Z0-9 À-ú]{0,30}"),
            0..Field::count(),
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(i, v)| (Field::ALL[i], v))
                .collect()
        })
    }

    proptest! {
        // from_row(to_row(m)) restores every present key; absent keys
        // read back as "".
        #[test]
        fn prop_round_trip_restores_fields(pairs in field_subset()) {
            let mut record = IdeaRecord::new();
            for (field, value) in &pairs {
                record.set(*field, value.clone());
            }

            let row = to_row(&record);
            let named: HashMap<String, String> = Field::ALL
                .iter()
                .zip(row.iter())
                .map(|(f, v)| (f.header().to_string(), v.clone()))
                .collect();
            let restored = from_row(&named);

            for (field, _) in &pairs {
                prop_assert_eq!(restored.get(*field), record.get(*field));
            }
            for field in Field::ALL {
                if !record.contains(field) {
                    prop_assert_eq!(restored.get(field), "");
                }
            }
        }
    }
}
