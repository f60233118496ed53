use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};

use crate::app_data::AppData;
use crate::coordinators::CommentCoordinator;
use crate::errors::ServiceError;
use crate::providers::AuthenticationProvider;
use crate::types::dto::comment::{CommentResponse, CreateCommentRequest};
use crate::types::dto::common::DetailResponse;
use crate::types::internal::comment::NewComment;
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;

pub struct CommentApi {
    comment_coordinator: CommentCoordinator,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl CommentApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authentication_provider: app_data.authentication_provider.clone(),
            comment_coordinator: CommentCoordinator::new(app_data),
        }
    }

    async fn context(&self, req: &Request) -> Result<RequestContext, ServiceError> {
        Ok(RequestContext::authenticate(req, &self.authentication_provider).await?)
    }
}

#[derive(Tags)]
enum CommentTags {
    /// Comments left by masters on repair requests
    Comments,
}

#[OpenApi]
impl CommentApi {
    #[oai(path = "/comments/", method = "get", tag = "CommentTags::Comments")]
    async fn list_comments(
        &self,
        req: &Request,
        request_id: Query<Option<i32>>,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<CommentResponse>>, ServiceError> {
        let ctx = self.context(req).await?;

        let comments = self
            .comment_coordinator
            .list_comments(&ctx, request_id.0, Page::new(skip.0, limit.0)?)
            .await?;
        Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
    }

    #[oai(path = "/comments/:comment_id", method = "get", tag = "CommentTags::Comments")]
    async fn get_comment(
        &self,
        req: &Request,
        comment_id: Path<i32>,
    ) -> Result<Json<CommentResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let comment = self.comment_coordinator.get_comment(&ctx, comment_id.0).await?;
        Ok(Json(comment.into()))
    }

    #[oai(path = "/comments/", method = "post", tag = "CommentTags::Comments")]
    async fn create_comment(
        &self,
        req: &Request,
        body: Json<CreateCommentRequest>,
    ) -> Result<Json<CommentResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        let body = body.0;
        let comment = self
            .comment_coordinator
            .create_comment(
                &ctx,
                NewComment {
                    message: body.message,
                    master_id: body.master_id,
                    request_id: body.request_id,
                },
            )
            .await?;
        Ok(Json(comment.into()))
    }

    #[oai(path = "/comments/:comment_id", method = "delete", tag = "CommentTags::Comments")]
    async fn delete_comment(
        &self,
        req: &Request,
        comment_id: Path<i32>,
    ) -> Result<Json<DetailResponse>, ServiceError> {
        let ctx = self.context(req).await?;

        self.comment_coordinator
            .delete_comment(&ctx, comment_id.0)
            .await?;
        Ok(Json(DetailResponse::new("Comment deleted")))
    }
}
