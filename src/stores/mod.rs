// Stores layer - Data access via sea-orm
pub mod comment_store;
pub mod request_store;
pub mod user_store;

pub use comment_store::CommentStore;
pub use request_store::RequestStore;
pub use user_store::UserStore;

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, ColumnTrait};

use crate::errors::internal::ValidationError;
use crate::errors::InternalError;
use crate::types::db::user;

/// Fail with a validation error unless every `(field, id)` names an existing user
pub(crate) async fn ensure_users_exist<C, I>(conn: &C, references: I) -> Result<(), InternalError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = (&'static str, i32)>,
{
    for (field, id) in references {
        let found = user::Entity::find()
            .filter(user::Column::Id.eq(id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("ensure_users_exist", e))?;

        if found == 0 {
            return Err(ValidationError::missing_reference(field, id).into());
        }
    }
    Ok(())
}
