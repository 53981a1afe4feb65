//! Column schema of the backing sheet.
//!
//! `Field` is the single source of truth for column order. Both the
//! record mapper and the remote client derive the physical layout from
//! `Field::ALL`; nothing else may hardcode column positions or spans.
//! Header matching is case-exact on purpose: a drifted header must fail
//! loudly instead of silently misaligning every subsequent write.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One column of the backing sheet, in declaration order.
///
/// The declaration order below *is* the physical column order (A..X).
/// `Ord` derives from it, so a `BTreeMap<Field, _>` iterates in schema
/// order for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    /// Numeric record identifier (column A).
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "Nome da ideia")]
    IdeaName,
    #[serde(rename = "Descrição da solução")]
    SolutionDescription,
    #[serde(rename = "Descrição de problema")]
    ProblemDescription,
    /// Area the idea would be applied in.
    #[serde(rename = "Área")]
    ApplicationArea,
    #[serde(rename = "Local")]
    Location,
    #[serde(rename = "BL")]
    BusinessLine,
    #[serde(rename = "Unidade")]
    Unit,
    /// Submitter's full name.
    #[serde(rename = "Dono da ideia")]
    Submitter,
    #[serde(rename = "Matrícula")]
    BadgeNumber,
    #[serde(rename = "Área do operador")]
    SubmitterArea,
    #[serde(rename = "Turno do operador que deu a ideia")]
    SubmitterShift,
    #[serde(rename = "Data ideia")]
    SubmittedOn,
    #[serde(rename = "Metodologia")]
    Methodology,
    #[serde(rename = "Líder")]
    TeamLead,
    #[serde(rename = "Equipe")]
    TeamMembers,
    #[serde(rename = "Status")]
    Status,
    #[serde(rename = "Observações")]
    Notes,
    #[serde(rename = "Data conclusão")]
    CompletedOn,
    #[serde(rename = "Investimento")]
    Investment,
    #[serde(rename = "Ganho financeiro")]
    FinancialGain,
    #[serde(rename = "Link")]
    Link,
    #[serde(rename = "Apresentou em alguma rotina?")]
    Presented,
    /// Public link of the uploaded attachment, stored verbatim (column X).
    #[serde(rename = "Imagem URL")]
    ImageUrl,
}

impl Field {
    /// Every field in physical column order.
    pub const ALL: [Field; 24] = [
        Field::Id,
        Field::IdeaName,
        Field::SolutionDescription,
        Field::ProblemDescription,
        Field::ApplicationArea,
        Field::Location,
        Field::BusinessLine,
        Field::Unit,
        Field::Submitter,
        Field::BadgeNumber,
        Field::SubmitterArea,
        Field::SubmitterShift,
        Field::SubmittedOn,
        Field::Methodology,
        Field::TeamLead,
        Field::TeamMembers,
        Field::Status,
        Field::Notes,
        Field::CompletedOn,
        Field::Investment,
        Field::FinancialGain,
        Field::Link,
        Field::Presented,
        Field::ImageUrl,
    ];

    /// Fields a submission must fill before anything is written.
    pub const REQUIRED_ON_SUBMIT: [Field; 6] = [
        Field::Submitter,
        Field::BadgeNumber,
        Field::SubmitterArea,
        Field::IdeaName,
        Field::ProblemDescription,
        Field::SolutionDescription,
    ];

    /// The exact column header as it appears in the sheet's first row.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::IdeaName => "Nome da ideia",
            Field::SolutionDescription => "Descrição da solução",
            Field::ProblemDescription => "Descrição de problema",
            Field::ApplicationArea => "Área",
            Field::Location => "Local",
            Field::BusinessLine => "BL",
            Field::Unit => "Unidade",
            Field::Submitter => "Dono da ideia",
            Field::BadgeNumber => "Matrícula",
            Field::SubmitterArea => "Área do operador",
            Field::SubmitterShift => "Turno do operador que deu a ideia",
            Field::SubmittedOn => "Data ideia",
            Field::Methodology => "Metodologia",
            Field::TeamLead => "Líder",
            Field::TeamMembers => "Equipe",
            Field::Status => "Status",
            Field::Notes => "Observações",
            Field::CompletedOn => "Data conclusão",
            Field::Investment => "Investimento",
            Field::FinancialGain => "Ganho financeiro",
            Field::Link => "Link",
            Field::Presented => "Apresentou em alguma rotina?",
            Field::ImageUrl => "Imagem URL",
        }
    }

    /// Case-exact reverse lookup from a column header.
    ///
    /// Returns `None` for any mismatch, including a casing drift such as
    /// "Nome da Ideia" vs "Nome da ideia".
    pub fn from_header(header: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.header() == header)
    }

    /// Number of declared columns.
    pub fn count() -> usize {
        Field::ALL.len()
    }

    /// Zero-based column index of this field.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_header(s).ok_or_else(|| format!("Unknown column header: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_24_columns() {
        assert_eq!(Field::count(), 24);
        assert_eq!(Field::ALL[0], Field::Id);
        assert_eq!(Field::ALL[23], Field::ImageUrl);
    }

    #[test]
    fn test_header_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_header(field.header()), Some(field));
        }
    }

    #[test]
    fn test_from_header_is_case_exact() {
        assert_eq!(Field::from_header("Nome da ideia"), Some(Field::IdeaName));
        assert_eq!(Field::from_header("Nome da Ideia"), None);
        assert_eq!(Field::from_header("nome da ideia"), None);
        assert_eq!(Field::from_header("id"), None);
    }

    #[test]
    fn test_ord_follows_declaration_order() {
        assert!(Field::Id < Field::IdeaName);
        assert!(Field::Presented < Field::ImageUrl);

        let mut sorted = Field::ALL;
        sorted.sort();
        assert_eq!(sorted, Field::ALL);
    }

    #[test]
    fn test_index_matches_position() {
        assert_eq!(Field::Id.index(), 0);
        assert_eq!(Field::Status.index(), 16);
        assert_eq!(Field::ImageUrl.index(), 23);
    }

    #[test]
    fn test_required_fields_are_schema_members() {
        for field in Field::REQUIRED_ON_SUBMIT {
            assert!(Field::ALL.contains(&field));
        }
    }
}
