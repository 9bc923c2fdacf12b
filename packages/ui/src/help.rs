//! Help requests from the menu overlay.

use thiserror::Error;
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpRequest {
    pub name: String,
    pub email: String,
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HelpError {
    #[error("Please fill in all fields")]
    MissingFields,
}

impl HelpRequest {
    pub fn validate(&self) -> Result<(), HelpError> {
        let filled = [&self.name, &self.email, &self.description]
            .iter()
            .all(|field| !field.trim().is_empty());
        if filled {
            Ok(())
        } else {
            Err(HelpError::MissingFields)
        }
    }
}

/// Where help requests go once they pass validation.
pub trait HelpDesk {
    fn submit_help_request(
        &self,
        request: &HelpRequest,
    ) -> impl std::future::Future<Output = Result<(), HelpError>>;
}

/// Accepts every request without sending it anywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalHelpDesk;

impl HelpDesk for LocalHelpDesk {
    async fn submit_help_request(&self, request: &HelpRequest) -> Result<(), HelpError> {
        request.validate()?;
        info!(
            name = %request.name,
            email = %request.email,
            description_len = request.description.len(),
            "help request received"
        );
        Ok(())
    }
}
