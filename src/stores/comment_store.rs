use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::errors::internal::{NotFoundError, ValidationError};
use crate::errors::InternalError;
use crate::stores::ensure_users_exist;
use crate::types::db::{comment, repair_request};
use crate::types::internal::comment::{CommentScope, NewComment};
use crate::types::internal::page::Page;

pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        scope: &CommentScope,
        request_id: Option<i32>,
        page: Page,
    ) -> Result<Vec<comment::Model>, InternalError> {
        let mut select = comment::Entity::find();

        if let CommentScope::Requests(ids) = scope {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(comment::Column::RequestId.is_in(ids.iter().copied()));
        }
        if let Some(request_id) = request_id {
            select = select.filter(comment::Column::RequestId.eq(request_id));
        }

        select
            .order_by_asc(comment::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_comments", e))
    }

    pub async fn get(&self, id: i32) -> Result<comment::Model, InternalError> {
        comment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_comment", e))?
            .ok_or_else(|| NotFoundError::Comment(id).into())
    }

    /// Insert a comment after checking both references resolve
    pub async fn create(&self, new_comment: NewComment) -> Result<comment::Model, InternalError> {
        ValidationError::require_text("message", &new_comment.message)?;

        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        ensure_users_exist(&txn, [("master_id", new_comment.master_id)]).await?;

        let request = repair_request::Entity::find_by_id(new_comment.request_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("create_comment", e))?;
        if request.is_none() {
            return Err(ValidationError::missing_reference("request_id", new_comment.request_id).into());
        }

        let model = comment::ActiveModel {
            message: Set(new_comment.message),
            created_at: Set(Utc::now()),
            master_id: Set(new_comment.master_id),
            request_id: Set(new_comment.request_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("create_comment", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let result = comment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_comment", e))?;

        if result.rows_affected == 0 {
            return Err(NotFoundError::Comment(id).into());
        }
        Ok(())
    }
}
