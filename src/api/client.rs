use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::app_data::AppData;
use crate::coordinators::client_coordinator::ClientSubmission;
use crate::coordinators::{ClientCoordinator, FeedbackCoordinator};
use crate::errors::ServiceError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::client::ClientRequestCreate;
use crate::types::dto::common::FeedbackResponse;
use crate::types::dto::request::RepairRequestResponse;
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;

/// Endpoints for customers managing their own requests
pub struct ClientApi {
    client_coordinator: ClientCoordinator,
    feedback_coordinator: FeedbackCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl ClientApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            feedback_coordinator: FeedbackCoordinator::new(app_data.clone()),
            client_coordinator: ClientCoordinator::new(app_data),
        }
    }

    async fn context(&self, req: &Request) -> Result<RequestContext, ServiceError> {
        Ok(RequestContext::authenticate(req, &self.authentication_provider).await?)
    }
}

#[derive(Tags)]
enum ClientTags {
    /// Customer self-service
    Client,
    /// Customer feedback
    Qr,
}

#[OpenApi]
impl ClientApi {
    #[oai(path = "/client/my-requests", method = "get", tag = "ClientTags::Client")]
    async fn my_requests(
        &self,
        req: &Request,
        status: Query<Option<String>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<RepairRequestResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let requests = self
            .client_coordinator
            .my_requests(&ctx, status.0.as_deref(), Page::new(skip.0, limit.0)?)
            .await?;
        Ok(Json(requests.into_iter().map(Into::into).collect()))
    }

    /// Submit a new request; status, priority and client are set by the server
    #[oai(path = "/client/my-requests", method = "post", tag = "ClientTags::Client")]
    async fn submit_request(
        &self,
        req: &Request,
        body: Json<ClientRequestCreate>,
    ) -> Result<Json<RepairRequestResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let body = body.0;
        if body.priority.is_some() {
            tracing::debug!(request_id = %ctx.request_id, "Ignoring client-supplied priority");
        }
        let request = self
            .client_coordinator
            .submit_request(
                &ctx,
                ClientSubmission {
                    start_date: body.start_date,
                    equipment_type: body.equipment_type,
                    equipment_model: body.equipment_model,
                    problem_description: body.problem_description,
                },
            )
            .await?;
        Ok(Json(request.into()))
    }

    #[oai(path = "/client/my-requests/:request_id", method = "get", tag = "ClientTags::Client")]
    async fn my_request(
        &self,
        req: &Request,
        request_id: Path<i32>,
    ) -> Result<Json<RepairRequestResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let request = self.client_coordinator.my_request(&ctx, request_id.0).await?;
        Ok(Json(request.into()))
    }

    /// Link to the feedback form (encode it as a QR code client-side)
    #[oai(path = "/qr/feedback", method = "get", tag = "ClientTags::Qr")]
    async fn feedback(&self, req: &Request) -> Result<Json<FeedbackResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let feedback_url = self.feedback_coordinator.feedback_url(&ctx)?;
        Ok(Json(FeedbackResponse { feedback_url }))
    }
}
