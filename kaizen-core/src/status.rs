//! Review status of an idea.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triage status of a submitted idea.
///
/// The wire strings are the exact values the backing sheet stores; the
/// variant names are the English equivalents used throughout the code.
/// No transition constraints are enforced: any status may follow any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Status {
    #[default]
    #[serde(rename = "Nova")]
    New,
    #[serde(rename = "Em análise")]
    UnderReview,
    #[serde(rename = "Aprovada")]
    Approved,
    #[serde(rename = "Em implementação")]
    InImplementation,
    #[serde(rename = "Concluída")]
    Completed,
    #[serde(rename = "Rejeitada")]
    Rejected,
}

impl Status {
    /// String representation stored in the sheet.
    pub fn as_sheet_str(&self) -> &'static str {
        match self {
            Status::New => "Nova",
            Status::UnderReview => "Em análise",
            Status::Approved => "Aprovada",
            Status::InImplementation => "Em implementação",
            Status::Completed => "Concluída",
            Status::Rejected => "Rejeitada",
        }
    }

    /// All statuses, in the order the dashboard offers them.
    pub const ALL: [Status; 6] = [
        Status::New,
        Status::UnderReview,
        Status::Approved,
        Status::InImplementation,
        Status::Completed,
        Status::Rejected,
    ];
}

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sheet_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Lenient parse accepting both the sheet strings and the English
    /// variant names. Reads never fail on an unknown status; callers
    /// keep the raw text and treat the parse as optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "nova" | "new" => Ok(Status::New),
            "emanálise" | "emanalise" | "underreview" => Ok(Status::UnderReview),
            "aprovada" | "approved" => Ok(Status::Approved),
            "emimplementação" | "emimplementacao" | "inimplementation" => {
                Ok(Status::InImplementation)
            }
            "concluída" | "concluida" | "completed" => Ok(Status::Completed),
            "rejeitada" | "rejected" => Ok(Status::Rejected),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new() {
        assert_eq!(Status::default(), Status::New);
        assert_eq!(Status::default().as_sheet_str(), "Nova");
    }

    #[test]
    fn test_sheet_str_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.as_sheet_str().parse::<Status>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_accepts_english_names() {
        assert_eq!("UnderReview".parse::<Status>(), Ok(Status::UnderReview));
        assert_eq!("approved".parse::<Status>(), Ok(Status::Approved));
        assert_eq!("In implementation".parse::<Status>(), Ok(Status::InImplementation));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("Arquivada".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }
}
