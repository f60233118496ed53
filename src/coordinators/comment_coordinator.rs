use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::AuthorizationProvider;
use crate::stores::{CommentStore, RequestStore};
use crate::types::db::comment;
use crate::types::internal::auth::Operation;
use crate::types::internal::comment::{CommentScope, NewComment};
use crate::types::internal::context::RequestContext;
use crate::types::internal::page::Page;

pub struct CommentCoordinator {
    authorization_provider: AuthorizationProvider,
    comment_store: Arc<CommentStore>,
    request_store: Arc<RequestStore>,
}

impl CommentCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            authorization_provider: app_data.authorization_provider,
            comment_store: app_data.comment_store.clone(),
            request_store: app_data.request_store.clone(),
        }
    }

    /// Comments visible to the caller, optionally for a single request
    pub async fn list_comments(
        &self,
        ctx: &RequestContext,
        request_id: Option<i32>,
        page: Page,
    ) -> Result<Vec<comment::Model>, InternalError> {
        let caller = ctx.caller()?;
        self.authorization_provider
            .authorize(caller, Operation::ListComments)?;

        let scope = match caller.tenant() {
            Some(client_id) => CommentScope::Requests(self.request_store.ids_for_client(client_id).await?),
            None => CommentScope::All,
        };
        self.comment_store.list(&scope, request_id, page).await
    }

    pub async fn get_comment(&self, ctx: &RequestContext, id: i32) -> Result<comment::Model, InternalError> {
        let caller = ctx.caller()?;
        self.authorization_provider
            .authorize(caller, Operation::ReadComment)?;

        let comment = self.comment_store.get(id).await?;
        if caller.tenant().is_some() {
            let request = self.request_store.get(comment.request_id).await?;
            self.authorization_provider
                .authorize_request_access(caller, &request)?;
        }
        Ok(comment)
    }

    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        new_comment: NewComment,
    ) -> Result<comment::Model, InternalError> {
        self.authorization_provider
            .authorize(ctx.caller()?, Operation::CreateComment)?;

        let comment = self.comment_store.create(new_comment).await?;
        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            comment = comment.id,
            repair_request = comment.request_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn delete_comment(&self, ctx: &RequestContext, id: i32) -> Result<(), InternalError> {
        self.authorization_provider
            .authorize(ctx.caller()?, Operation::DeleteComment)?;

        self.comment_store.delete(id).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id, comment = id, "Comment deleted");
        Ok(())
    }
}
