use std::sync::Arc;

use chrono::NaiveDate;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::statistics_provider;
use crate::providers::AuthorizationProvider;
use crate::stores::RequestStore;
use crate::types::db::repair_request;
use crate::types::internal::auth::Operation;
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;
use crate::types::internal::repair::{
    CompletionStats, EquipmentCount, NewRepairRequest, RequestChanges, RequestCounts,
    RequestFilter, StatsScope,
};

/// Staff-facing repair request workflows and statistics
pub struct RequestCoordinator {
    authorization_provider: AuthorizationProvider,
    request_store: Arc<RequestStore>,
}

impl RequestCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authorization_provider: app_data.authorization_provider,
            request_store: app_data.request_store.clone(),
        }
    }

    fn authorize(&self, ctx: &RequestContext, operation: Operation) -> Result<(), InternalError> {
        self.authorization_provider.authorize(ctx.caller()?, operation)
    }

    /// Customers see statistics over their own requests only
    fn stats_scope(&self, ctx: &RequestContext) -> Result<StatsScope, InternalError> {
        self.authorize(ctx, Operation::ViewStatistics)?;
        Ok(StatsScope::from_tenant(ctx.caller()?.tenant()))
    }

    pub async fn list_requests(
        &self,
        ctx: &RequestContext,
        page: Page,
    ) -> Result<Vec<repair_request::Model>, InternalError> {
        self.authorize(ctx, Operation::ListRequests)?;
        self.request_store.list(page).await
    }

    pub async fn search_requests(
        &self,
        ctx: &RequestContext,
        filter: RequestFilter,
    ) -> Result<Vec<repair_request::Model>, InternalError> {
        self.authorize(ctx, Operation::SearchRequests)?;
        self.request_store.search(&filter).await
    }

    /// Any role may read; a customer only its own requests
    pub async fn get_request(
        &self,
        ctx: &RequestContext,
        id: i32,
    ) -> Result<repair_request::Model, InternalError> {
        let caller = ctx.caller()?;
        self.authorization_provider.authorize(caller, Operation::ReadRequest)?;

        let request = self.request_store.get(id).await?;
        self.authorization_provider
            .authorize_request_access(caller, &request)?;
        Ok(request)
    }

    pub async fn create_request(
        &self,
        ctx: &RequestContext,
        new_request: NewRepairRequest,
    ) -> Result<repair_request::Model, InternalError> {
        self.authorize(ctx, Operation::CreateRequest)?;

        let request = self.request_store.create(new_request).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id, repair_request = request.id, "Request created");
        Ok(request)
    }

    pub async fn update_request(
        &self,
        ctx: &RequestContext,
        id: i32,
        changes: RequestChanges,
    ) -> Result<repair_request::Model, InternalError> {
        self.authorize(ctx, Operation::UpdateRequest)?;
        self.apply(ctx, id, changes, "Request updated").await
    }

    pub async fn delete_request(&self, ctx: &RequestContext, id: i32) -> Result<(), InternalError> {
        self.authorize(ctx, Operation::DeleteRequest)?;

        self.request_store.delete(id).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id, repair_request = id, "Request deleted");
        Ok(())
    }

    pub async fn assign_master(
        &self,
        ctx: &RequestContext,
        id: i32,
        master_id: i32,
    ) -> Result<repair_request::Model, InternalError> {
        self.authorize(ctx, Operation::AssignMaster)?;
        self.apply(ctx, id, RequestChanges::assign_master(master_id), "Master assigned")
            .await
    }

    /// Move the deadline; the reason is only written to the log
    pub async fn extend_deadline(
        &self,
        ctx: &RequestContext,
        id: i32,
        new_deadline: NaiveDate,
        reason: Option<&str>,
    ) -> Result<repair_request::Model, InternalError> {
        self.authorize(ctx, Operation::ExtendDeadline)?;

        let request = self
            .request_store
            .update(id, RequestChanges::extend_deadline(new_deadline))
            .await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            repair_request = id,
            deadline = %new_deadline,
            reason = reason.unwrap_or("-"),
            "Deadline extended"
        );
        Ok(request)
    }

    pub async fn request_counts(&self, ctx: &RequestContext) -> Result<RequestCounts, InternalError> {
        let scope = self.stats_scope(ctx)?;
        self.request_store.counts(scope).await
    }

    pub async fn average_completion(
        &self,
        ctx: &RequestContext,
    ) -> Result<CompletionStats, InternalError> {
        let scope = self.stats_scope(ctx)?;
        let spans = self.request_store.completion_spans(scope).await?;
        Ok(statistics_provider::average_completion(&spans))
    }

    pub async fn count_by_equipment(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<EquipmentCount>, InternalError> {
        let scope = self.stats_scope(ctx)?;
        self.request_store.count_by_equipment(scope).await
    }

    async fn apply(
        &self,
        ctx: &RequestContext,
        id: i32,
        changes: RequestChanges,
        message: &str,
    ) -> Result<repair_request::Model, InternalError> {
        let request = self.request_store.update(id, changes).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            repair_request = id,
            status = %request.status,
            "{}",
            message
        );
        Ok(request)
    }
}
