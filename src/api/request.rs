use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::app_data::AppData;
use crate::coordinators::RequestCoordinator;
use crate::errors::ServiceError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::common::DetailResponse;
use crate::types::dto::request::{
    AssignMasterRequest, CreateRepairRequest, ExtendDeadlineRequest, RepairRequestResponse,
    UpdateRepairRequest,
};
use crate::types::dto::stats::{AverageTimeResponse, EquipmentCountResponse, RequestCountResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;
use crate::types::internal::repair::RequestFilter;

/// Repair request endpoints for staff, plus statistics
pub struct RequestApi {
    request_coordinator: RequestCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl RequestApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            request_coordinator: RequestCoordinator::new(app_data),
        }
    }

    async fn context(&self, req: &Request) -> Result<RequestContext, ServiceError> {
        Ok(RequestContext::authenticate(req, &self.authentication_provider).await?)
    }
}

#[derive(Tags)]
enum RequestTags {
    /// Repair requests
    Requests,
    /// Aggregated request statistics
    Statistics,
}

type RequestResult = Result<Json<RepairRequestResponse>, ServiceError>;

#[OpenApi]
impl RequestApi {
    #[oai(path = "/requests/", method = "get", tag = "RequestTags::Requests")]
    async fn list_requests(
        &self,
        req: &Request,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<RepairRequestResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let requests = self
            .request_coordinator
            .list_requests(&ctx, Page::new(skip.0, limit.0)?)
            .await?;
        Ok(Json(requests.into_iter().map(Into::into).collect()))
    }

    /// Search by exact match on any combination of filters
    #[oai(path = "/requests/search", method = "get", tag = "RequestTags::Requests")]
    async fn search_requests(
        &self,
        req: &Request,
        number: Query<Option<i32>>,
        status: Query<Option<String>>,
        equipment_type: Query<Option<String>>,
        client_id: Query<Option<i32>>,
        master_id: Query<Option<i32>>,
    ) -> Result<Json<Vec<RepairRequestResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let filter = RequestFilter {
            number: number.0,
            status: status.0,
            equipment_type: equipment_type.0,
            client_id: client_id.0,
            master_id: master_id.0,
        };
        let requests = self.request_coordinator.search_requests(&ctx, filter).await?;
        Ok(Json(requests.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/requests/:request_id", method = "get", tag = "RequestTags::Requests")]
    async fn get_request(&self, req: &Request, request_id: Path<i32>) -> RequestResult {
        let ctx = self.context(req).await?;

        let request = self.request_coordinator.get_request(&ctx, request_id.0).await?;
        Ok(Json(request.into()))
    }

    #[oai(path = "/requests/", method = "post", tag = "RequestTags::Requests")]
    async fn create_request(&self, req: &Request, body: Json<CreateRepairRequest>) -> RequestResult {
        let ctx = self.context(req).await?;

        let request = self
            .request_coordinator
            .create_request(&ctx, body.0.into())
            .await?;
        Ok(Json(request.into()))
    }

    /// Partial update: absent fields are kept, `null` clears a nullable field
    #[oai(path = "/requests/:request_id", method = "put", tag = "RequestTags::Requests")]
    async fn update_request(
        &self,
        req: &Request,
        request_id: Path<i32>,
        body: Json<UpdateRepairRequest>,
    ) -> RequestResult {
        let ctx = self.context(req).await?;

        let request = self
            .request_coordinator
            .update_request(&ctx, request_id.0, body.0.into())
            .await?;
        Ok(Json(request.into()))
    }

    #[oai(path = "/requests/:request_id", method = "delete", tag = "RequestTags::Requests")]
    async fn delete_request(
        &self,
        req: &Request,
        request_id: Path<i32>,
    ) -> Result<Json<DetailResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        self.request_coordinator
            .delete_request(&ctx, request_id.0)
            .await?;
        Ok(Json(DetailResponse::new("Request deleted")))
    }

    #[oai(path = "/requests/:request_id/assign", method = "post", tag = "RequestTags::Requests")]
    async fn assign_master(
        &self,
        req: &Request,
        request_id: Path<i32>,
        body: Json<AssignMasterRequest>,
    ) -> RequestResult {
        let ctx = self.context(req).await?;

        let request = self
            .request_coordinator
            .assign_master(&ctx, request_id.0, body.master_id)
            .await?;
        Ok(Json(request.into()))
    }

    #[oai(path = "/requests/:request_id/extend", method = "post", tag = "RequestTags::Requests")]
    async fn extend_deadline(
        &self,
        req: &Request,
        request_id: Path<i32>,
        body: Json<ExtendDeadlineRequest>,
    ) -> RequestResult {
        let ctx = self.context(req).await?;

        let request = self
            .request_coordinator
            .extend_deadline(&ctx, request_id.0, body.new_deadline, body.reason.as_deref())
            .await?;
        Ok(Json(request.into()))
    }

    /// Total and completed request counts
    #[oai(path = "/requests/stats/count", method = "get", tag = "RequestTags::Statistics")]
    async fn stats_count(&self, req: &Request) -> Result<Json<RequestCountResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let counts = self.request_coordinator.request_counts(&ctx).await?;
        Ok(Json(counts.into()))
    }

    /// Average days from start to completion
    #[oai(path = "/requests/stats/avg-time", method = "get", tag = "RequestTags::Statistics")]
    async fn stats_avg_time(&self, req: &Request) -> Result<Json<AverageTimeResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let stats = self.request_coordinator.average_completion(&ctx).await?;
        Ok(Json(stats.into()))
    }

    /// Request counts per equipment type
    #[oai(path = "/requests/stats/by-tech", method = "get", tag = "RequestTags::Statistics")]
    async fn stats_by_equipment(
        &self,
        req: &Request,
    ) -> Result<Json<Vec<EquipmentCountResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let rows = self.request_coordinator.count_by_equipment(&ctx).await?;
        Ok(Json(rows.into_iter().map(Into::into).collect()))
    }
}
