//! Create-application endpoint
//!
//! The one non-idempotent write the client performs. A claim either lands
//! (2xx) or fails with a typed error; the caller decides what a failure
//! means for the rest of the cycle.

use tracing::debug;

use crate::error::Result;
use crate::HiringClient;
use talon_core::dto::claim::CreateApplicationRequest;

impl HiringClient {
    /// Claim one shift slot for a candidate
    ///
    /// # Arguments
    /// * `req` - The application request (posting, slot and candidate ids)
    ///
    /// # Returns
    /// `Ok(())` when the gateway accepted the application; any non-2xx
    /// status, transport fault or timeout comes back as an error.
    pub async fn create_application(&self, req: &CreateApplicationRequest) -> Result<()> {
        let url = format!(
            "{}/api/candidate-application/create-application",
            self.base_url()
        );

        debug!(
            "Creating application for {}-{}",
            req.job_id, req.schedule_id
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(req)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
