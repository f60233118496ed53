use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::types::internal::auth::Operation;
use crate::types::internal::context::RequestContext;

/// Serves the configured customer feedback link
pub struct FeedbackCoordinator {
    authorization_provider: AuthorizationProvider,
    feedback_url: String,
}

impl FeedbackCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authorization_provider: app_data.authorization_provider,
            feedback_url: app_data.feedback_url.clone(),
        }
    }

    pub fn feedback_url(&self, ctx: &RequestContext) -> Result<String, InternalError> {
        self.authorization_provider
            .authorize(ctx.caller()?, Operation::FeedbackQr)?;
        Ok(self.feedback_url.clone())
    }
}
