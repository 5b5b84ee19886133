//! Pearl: mock identity-verification provider.
//!
//! Empty or whitespace-only ids are a verification failure, not a 400.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::response::{ApiError, JsonBody};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::providers::{required_str, timestamp_now, trim_identifier};

/// What kind of identifier is being checked. Only affects wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Student,
    University,
}

impl Subject {
    fn empty_reason(self) -> &'static str {
        match self {
            Subject::Student => "Invalid or empty person ID",
            Subject::University => "Invalid or empty university ID",
        }
    }

    fn blocked_reason(self) -> &'static str {
        match self {
            Subject::Student => "Student verification failed (blocked pattern)",
            Subject::University => "University verification failed (blocked pattern)",
        }
    }

    fn accepted_reason(self) -> &'static str {
        match self {
            Subject::Student => "Student ID accepted",
            Subject::University => "University ID accepted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub verified: bool,
    pub reason: &'static str,
}

/// Apply the suffix rule to a trimmed identifier.
pub fn verify_identifier(id: &str, blocked_suffix: &str, subject: Subject) -> Verification {
    let (verified, reason) = if id.is_empty() {
        (false, subject.empty_reason())
    } else if id.ends_with(blocked_suffix) {
        (false, subject.blocked_reason())
    } else {
        (true, subject.accepted_reason())
    };
    Verification { verified, reason }
}

fn outcome_label(verified: bool) -> &'static str {
    if verified {
        "verified"
    } else {
        "rejected"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentVerificationResponse {
    pub person_id: String,
    pub verified: bool,
    pub reason: &'static str,
    pub checked_at: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationMetadata {
    pub provider: &'static str,
    pub rule: &'static str,
}

impl Default for VerificationMetadata {
    fn default() -> Self {
        Self {
            provider: "Pearl",
            rule: "simple-suffix-check",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityVerificationResponse {
    pub university_id: String,
    pub verified: bool,
    pub reason: &'static str,
    pub checked_at: String,
    pub metadata: VerificationMetadata,
}

/// `POST /api/pearl/student-verifications`
pub async fn verify_student(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<StudentVerificationResponse>, ApiError> {
    let person_id = trim_identifier(required_str(&body, "/personId", "personId")?);
    let result = verify_identifier(person_id, &state.rules.pearl_blocked_suffix, Subject::Student);

    tracing::info!(person_id = %person_id, verified = result.verified, "Pearl student checked");
    metrics::record_outcome("pearl_student", outcome_label(result.verified));

    Ok(Json(StudentVerificationResponse {
        person_id: person_id.to_string(),
        verified: result.verified,
        reason: result.reason,
        checked_at: timestamp_now(),
        role: Role::Student,
    }))
}

/// `POST /api/pearl/university-verifications`
pub async fn verify_university(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<UniversityVerificationResponse>, ApiError> {
    let university_id =
        trim_identifier(required_str(&body, "/student/universityId", "student.universityId")?);
    let result = verify_identifier(
        university_id,
        &state.rules.pearl_blocked_suffix,
        Subject::University,
    );

    tracing::info!(
        university_id = %university_id,
        verified = result.verified,
        "Pearl university checked"
    );
    metrics::record_outcome("pearl_university", outcome_label(result.verified));

    Ok(Json(UniversityVerificationResponse {
        university_id: university_id.to_string(),
        verified: result.verified,
        reason: result.reason,
        checked_at: timestamp_now(),
        metadata: VerificationMetadata::default(),
    }))
}
