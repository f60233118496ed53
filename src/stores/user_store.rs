use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, Value,
};

use crate::errors::internal::{NotFoundError, ValidationError};
use crate::errors::InternalError;
use crate::types::db::{comment, repair_request, user};
use crate::types::internal::page::Page;
use crate::types::internal::user::{NewUser, UserChanges};

/// UserStore manages rows of the `users` table
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Users ordered by id
    pub async fn list(&self, page: Page) -> Result<Vec<user::Model>, InternalError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    pub async fn get(&self, id: i32) -> Result<user::Model, InternalError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user", e))?
            .ok_or_else(|| NotFoundError::User(id).into())
    }

    pub async fn find_by_login(&self, login: &str) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_login", e))
    }

    /// Insert a user
    ///
    /// # Errors
    /// * `ValidationError::DuplicateLogin` - login is taken
    /// * `ValidationError::EmptyField` - login or password is blank
    pub async fn create(&self, new_user: NewUser) -> Result<user::Model, InternalError> {
        ValidationError::require_text("login", &new_user.login)?;
        ValidationError::require_text("password", &new_user.password)?;

        if self.find_by_login(&new_user.login).await?.is_some() {
            return Err(ValidationError::DuplicateLogin(new_user.login).into());
        }

        let login = new_user.login.clone();
        let model = user::ActiveModel {
            full_name: Set(new_user.full_name),
            phone: Set(new_user.phone),
            login: Set(new_user.login),
            password: Set(new_user.password),
            role: Set(new_user.role.as_str().to_string()),
            created_at: Set(Utc::now()),
            is_active: Set(true),
            ..Default::default()
        };

        model.insert(&self.db).await.map_err(|e| {
            // Lost a race against a concurrent insert of the same login
            if e.to_string().to_uppercase().contains("UNIQUE") {
                ValidationError::DuplicateLogin(login).into()
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    /// Apply the supplied fields; absent ones keep their value
    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model, InternalError> {
        let changes = changes.without_blank_password();
        let mut active: user::ActiveModel = self.get(id).await?.into();

        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.as_str().to_string());
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    /// Delete a user together with the rows that depend on it
    ///
    /// Comments authored by the user are removed; requests that reference the
    /// user as master or client keep existing with the reference cleared.
    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let exists = user::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?
            .is_some();
        if !exists {
            return Err(NotFoundError::User(id).into());
        }

        comment::Entity::delete_many()
            .filter(comment::Column::MasterId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_comments", e))?;

        for column in [repair_request::Column::MasterId, repair_request::Column::ClientId] {
            repair_request::Entity::update_many()
                .col_expr(column, Expr::value(Value::Int(None)))
                .filter(column.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| InternalError::database("detach_user_requests", e))?;
        }

        user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(())
    }
}
