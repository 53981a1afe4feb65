//! Request and response types for the Kaizen API.
//!
//! The JSON surface uses English snake_case names; the conversion to
//! and from the sheet's column layout happens through the schema, never
//! by string matching in handlers.

use kaizen_core::{Field, IdeaRecord, Status};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// REQUESTS
// ============================================================================

/// Inline attachment on a submission. The payload is base64-encoded;
/// only jpg/jpeg/png file names pass the allow-list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_base64: String,
}

/// A new idea submission.
///
/// The six required fields mirror the submission form; everything else
/// is optional free text and defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitIdeaRequest {
    pub submitter: String,
    pub badge_number: String,
    pub submitter_area: String,
    pub idea_name: String,
    pub problem_description: String,
    pub solution_description: String,

    #[serde(default)]
    pub submitter_shift: Option<String>,
    #[serde(default)]
    pub application_area: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub business_line: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub team_lead: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub attachment: Option<AttachmentUpload>,
}

impl SubmitIdeaRequest {
    /// Build the draft record. Identifier, submission date and status
    /// are stamped by the repository, the attachment link by the
    /// handler after the upload succeeds.
    pub fn to_record(&self) -> IdeaRecord {
        let mut record = IdeaRecord::new();
        record.set(Field::Submitter, self.submitter.clone());
        record.set(Field::BadgeNumber, self.badge_number.clone());
        record.set(Field::SubmitterArea, self.submitter_area.clone());
        record.set(Field::IdeaName, self.idea_name.clone());
        record.set(Field::ProblemDescription, self.problem_description.clone());
        record.set(Field::SolutionDescription, self.solution_description.clone());

        let optional = [
            (Field::SubmitterShift, &self.submitter_shift),
            (Field::ApplicationArea, &self.application_area),
            (Field::Location, &self.location),
            (Field::BusinessLine, &self.business_line),
            (Field::Unit, &self.unit),
            (Field::Methodology, &self.methodology),
            (Field::TeamLead, &self.team_lead),
            (Field::TeamMembers, &self.team_members),
            (Field::Link, &self.link),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                record.set(field, value.clone());
            }
        }
        record
    }
}

/// An edit to an existing idea. Only the fields present are changed;
/// the full row is rewritten with everything else carried over.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub idea_name: Option<String>,
    #[serde(default)]
    pub solution_description: Option<String>,
    #[serde(default)]
    pub problem_description: Option<String>,
    #[serde(default)]
    pub application_area: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub business_line: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub submitter: Option<String>,
    #[serde(default)]
    pub badge_number: Option<String>,
    #[serde(default)]
    pub submitter_area: Option<String>,
    #[serde(default)]
    pub submitter_shift: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub team_lead: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
    #[serde(default)]
    pub investment: Option<String>,
    #[serde(default)]
    pub financial_gain: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub presented: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UpdateIdeaRequest {
    /// Whether the edit changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.to_edits().fields().next().is_none()
    }

    /// Build the partial record to overlay on the current one.
    pub fn to_edits(&self) -> IdeaRecord {
        let mut edits = IdeaRecord::new();
        let text_fields = [
            (Field::IdeaName, &self.idea_name),
            (Field::SolutionDescription, &self.solution_description),
            (Field::ProblemDescription, &self.problem_description),
            (Field::ApplicationArea, &self.application_area),
            (Field::Location, &self.location),
            (Field::BusinessLine, &self.business_line),
            (Field::Unit, &self.unit),
            (Field::Submitter, &self.submitter),
            (Field::BadgeNumber, &self.badge_number),
            (Field::SubmitterArea, &self.submitter_area),
            (Field::SubmitterShift, &self.submitter_shift),
            (Field::Methodology, &self.methodology),
            (Field::TeamLead, &self.team_lead),
            (Field::TeamMembers, &self.team_members),
            (Field::Notes, &self.notes),
            (Field::CompletedOn, &self.completed_on),
            (Field::Investment, &self.investment),
            (Field::FinancialGain, &self.financial_gain),
            (Field::Link, &self.link),
            (Field::Presented, &self.presented),
            (Field::ImageUrl, &self.image_url),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                edits.set(field, value.clone());
            }
        }
        if let Some(status) = self.status {
            edits.set_status(status);
        }
        edits
    }
}

/// Exact-match filters for the idea list (the dashboard sidebar).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListIdeasQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}

// ============================================================================
// RESPONSES
// ============================================================================

/// One idea, as the dashboard consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaResponse {
    /// `null` when the sheet row carries a non-numeric identifier.
    pub id: Option<i64>,
    pub idea_name: String,
    pub solution_description: String,
    pub problem_description: String,
    pub application_area: String,
    pub location: String,
    pub business_line: String,
    pub unit: String,
    pub submitter: String,
    pub badge_number: String,
    pub submitter_area: String,
    pub submitter_shift: String,
    pub submitted_on: String,
    pub methodology: String,
    pub team_lead: String,
    pub team_members: String,
    /// Raw status text as stored; unknown values pass through.
    pub status: String,
    pub notes: String,
    pub completed_on: String,
    pub investment: String,
    pub financial_gain: String,
    pub link: String,
    pub presented: String,
    pub image_url: String,
}

impl IdeaResponse {
    pub fn from_record(record: &IdeaRecord) -> Self {
        Self {
            id: record.id(),
            idea_name: record.get(Field::IdeaName).to_string(),
            solution_description: record.get(Field::SolutionDescription).to_string(),
            problem_description: record.get(Field::ProblemDescription).to_string(),
            application_area: record.get(Field::ApplicationArea).to_string(),
            location: record.get(Field::Location).to_string(),
            business_line: record.get(Field::BusinessLine).to_string(),
            unit: record.get(Field::Unit).to_string(),
            submitter: record.get(Field::Submitter).to_string(),
            badge_number: record.get(Field::BadgeNumber).to_string(),
            submitter_area: record.get(Field::SubmitterArea).to_string(),
            submitter_shift: record.get(Field::SubmitterShift).to_string(),
            submitted_on: record.get(Field::SubmittedOn).to_string(),
            methodology: record.get(Field::Methodology).to_string(),
            team_lead: record.get(Field::TeamLead).to_string(),
            team_members: record.get(Field::TeamMembers).to_string(),
            status: record.get(Field::Status).to_string(),
            notes: record.get(Field::Notes).to_string(),
            completed_on: record.get(Field::CompletedOn).to_string(),
            investment: record.get(Field::Investment).to_string(),
            financial_gain: record.get(Field::FinancialGain).to_string(),
            link: record.get(Field::Link).to_string(),
            presented: record.get(Field::Presented).to_string(),
            image_url: record.get(Field::ImageUrl).to_string(),
        }
    }
}

/// The filtered idea list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListIdeasResponse {
    pub ideas: Vec<IdeaResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_request() -> SubmitIdeaRequest {
        SubmitIdeaRequest {
            submitter: "João Lima".to_string(),
            badge_number: "1020".to_string(),
            submitter_area: "Refino".to_string(),
            idea_name: "Reduzir setup".to_string(),
            problem_description: "Troca de molde lenta".to_string(),
            solution_description: "Padronizar ferramentas".to_string(),
            submitter_shift: Some("B".to_string()),
            application_area: None,
            location: None,
            business_line: None,
            unit: None,
            methodology: None,
            team_lead: None,
            team_members: None,
            link: None,
            attachment: None,
        }
    }

    #[test]
    fn test_submit_request_to_record() {
        let record = submit_request().to_record();
        assert_eq!(record.get(Field::Submitter), "João Lima");
        assert_eq!(record.get(Field::SubmitterShift), "B");
        assert_eq!(record.get(Field::ApplicationArea), "");
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_update_request_to_edits() {
        let req = UpdateIdeaRequest {
            status: Some(Status::Approved),
            notes: Some("aprovada no comitê".to_string()),
            ..Default::default()
        };
        assert!(!req.is_empty());

        let edits = req.to_edits();
        assert_eq!(edits.get(Field::Status), "Aprovada");
        assert_eq!(edits.get(Field::Notes), "aprovada no comitê");
        assert!(!edits.contains(Field::IdeaName));
    }

    #[test]
    fn test_empty_update_request() {
        assert!(UpdateIdeaRequest::default().is_empty());
    }

    #[test]
    fn test_idea_response_round_trips_record() {
        let mut record = IdeaRecord::new();
        record.set_id(4);
        record.set(Field::IdeaName, "Menos refugo");
        record.set(Field::Status, "Em análise");

        let response = IdeaResponse::from_record(&record);
        assert_eq!(response.id, Some(4));
        assert_eq!(response.idea_name, "Menos refugo");
        assert_eq!(response.status, "Em análise");
        assert_eq!(response.notes, "");
    }
}
