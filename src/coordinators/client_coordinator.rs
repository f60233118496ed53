use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::RequestStore;
use crate::types::db::repair_request;
use crate::types::internal::auth::{Caller, Operation};
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;
use crate::types::internal::repair::{NewRepairRequest, DEFAULT_PRIORITY, INITIAL_STATUS};

/// What a customer may say about a new request
#[derive(Debug, Clone)]
pub struct ClientSubmission {
    pub start_date: Option<NaiveDate>,
    pub equipment_type: String,
    pub equipment_model: String,
    pub problem_description: String,
}

/// Customer-facing request workflows, always scoped to the caller
pub struct ClientCoordinator {
    authorization_provider: AuthorizationProvider,
    request_store: Arc<RequestStore>,
}

impl ClientCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authorization_provider: app_data.authorization_provider,
            request_store: app_data.request_store.clone(),
        }
    }

    fn customer<'a>(&self, ctx: &'a RequestContext) -> Result<&'a Caller, InternalError> {
        let caller = ctx.caller()?;
        self.authorization_provider
            .authorize(caller, Operation::ClientRequests)?;
        Ok(caller)
    }

    pub async fn my_requests(
        &self,
        ctx: &RequestContext,
        status: Option<&str>,
        page: Page,
    ) -> Result<Vec<repair_request::Model>, InternalError> {
        let caller = self.customer(ctx)?;
        self.request_store
            .list_for_client(caller.user_id, status, page)
            .await
    }

    /// Another client's request reads as not found
    pub async fn my_request(
        &self,
        ctx: &RequestContext,
        id: i32,
    ) -> Result<repair_request::Model, InternalError> {
        let caller = self.customer(ctx)?;
        self.request_store.get_for_client(caller.user_id, id).await
    }

    /// Create a request as the caller
    ///
    /// Status is always "new", priority always "normal" and the client is the
    /// caller. The start date defaults to today.
    pub async fn submit_request(
        &self,
        ctx: &RequestContext,
        submission: ClientSubmission,
    ) -> Result<repair_request::Model, InternalError> {
        let caller = self.customer(ctx)?;

        let new_request = NewRepairRequest {
            start_date: submission
                .start_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            equipment_type: submission.equipment_type,
            equipment_model: submission.equipment_model,
            problem_description: submission.problem_description,
            status: INITIAL_STATUS.to_string(),
            completion_date: None,
            repair_parts: None,
            deadline: None,
            priority: DEFAULT_PRIORITY.to_string(),
            master_id: None,
            client_id: Some(caller.user_id),
        };

        let request = self.request_store.create(new_request).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            repair_request = request.id,
            "Client submitted request"
        );
        Ok(request)
    }
}
