//! Claim DTOs for the create-application endpoint

use serde::{Deserialize, Serialize};

/// Request body for the create-application call
///
/// `dsp_enabled` and `active_application_check_enabled` are fixed flags the
/// gateway expects on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub job_id: String,
    pub schedule_id: String,
    pub candidate_id: String,
    pub dsp_enabled: bool,
    pub active_application_check_enabled: bool,
}

impl CreateApplicationRequest {
    /// Builds a request with the gateway's expected fixed flags
    pub fn new(
        job_id: impl Into<String>,
        schedule_id: impl Into<String>,
        candidate_id: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            schedule_id: schedule_id.into(),
            candidate_id: candidate_id.into(),
            dsp_enabled: true,
            active_application_check_enabled: true,
        }
    }
}
