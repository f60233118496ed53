use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use crate::errors::internal::NotFoundError;
use crate::errors::InternalError;
use crate::stores::ensure_users_exist;
use crate::types::db::{comment, repair_request};
use crate::types::internal::page::Page;
use crate::types::internal::repair::{
    EquipmentCount, NewRepairRequest, RequestChanges, RequestCounts, RequestFilter, StatsScope,
};

/// RequestStore manages rows of the `requests` table
pub struct RequestStore {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct EquipmentCountRow {
    equipment_type: String,
    count: i64,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(scope: StatsScope) -> Select<repair_request::Entity> {
        let select = repair_request::Entity::find();
        match scope {
            StatsScope::All => select,
            StatsScope::Client(client_id) => {
                select.filter(repair_request::Column::ClientId.eq(client_id))
            }
        }
    }

    pub async fn list(&self, page: Page) -> Result<Vec<repair_request::Model>, InternalError> {
        repair_request::Entity::find()
            .order_by_asc(repair_request::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests", e))
    }

    /// All filters that are present must match
    pub async fn search(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<repair_request::Model>, InternalError> {
        let mut select = repair_request::Entity::find();

        if let Some(number) = filter.number {
            select = select.filter(repair_request::Column::Id.eq(number));
        }
        if let Some(status) = &filter.status {
            select = select.filter(repair_request::Column::Status.eq(status.as_str()));
        }
        if let Some(equipment_type) = &filter.equipment_type {
            select = select.filter(repair_request::Column::EquipmentType.eq(equipment_type.as_str()));
        }
        if let Some(client_id) = filter.client_id {
            select = select.filter(repair_request::Column::ClientId.eq(client_id));
        }
        if let Some(master_id) = filter.master_id {
            select = select.filter(repair_request::Column::MasterId.eq(master_id));
        }

        select
            .order_by_asc(repair_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("search_requests", e))
    }

    pub async fn get(&self, id: i32) -> Result<repair_request::Model, InternalError> {
        repair_request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_request", e))?
            .ok_or_else(|| NotFoundError::Request(id).into())
    }

    /// Requests owned by one client, optionally narrowed to a status
    pub async fn list_for_client(
        &self,
        client_id: i32,
        status: Option<&str>,
        page: Page,
    ) -> Result<Vec<repair_request::Model>, InternalError> {
        let mut select = Self::scoped(StatsScope::Client(client_id));
        if let Some(status) = status {
            select = select.filter(repair_request::Column::Status.eq(status));
        }

        select
            .order_by_asc(repair_request::Column::Id)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_client_requests", e))
    }

    /// A client's request; someone else's request reads as missing
    pub async fn get_for_client(
        &self,
        client_id: i32,
        id: i32,
    ) -> Result<repair_request::Model, InternalError> {
        Self::scoped(StatsScope::Client(client_id))
            .filter(repair_request::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_client_request", e))?
            .ok_or_else(|| NotFoundError::Request(id).into())
    }

    /// Ids of every request owned by a client
    pub async fn ids_for_client(&self, client_id: i32) -> Result<Vec<i32>, InternalError> {
        Self::scoped(StatsScope::Client(client_id))
            .select_only()
            .column(repair_request::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("client_request_ids", e))
    }

    pub async fn create(
        &self,
        new_request: NewRepairRequest,
    ) -> Result<repair_request::Model, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let references: Vec<_> = [
            ("master_id", new_request.master_id),
            ("client_id", new_request.client_id),
        ]
        .into_iter()
        .filter_map(|(field, id)| id.map(|id| (field, id)))
        .collect();
        ensure_users_exist(&txn, references).await?;

        let model = repair_request::ActiveModel {
            start_date: Set(new_request.start_date),
            equipment_type: Set(new_request.equipment_type),
            equipment_model: Set(new_request.equipment_model),
            problem_description: Set(new_request.problem_description),
            status: Set(new_request.status),
            completion_date: Set(new_request.completion_date),
            repair_parts: Set(new_request.repair_parts),
            deadline: Set(new_request.deadline),
            priority: Set(new_request.priority),
            created_at: Set(Utc::now()),
            master_id: Set(new_request.master_id),
            client_id: Set(new_request.client_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("create_request", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(model)
    }

    /// Apply a partial update; fields absent from `changes` are not written
    pub async fn update(
        &self,
        id: i32,
        changes: RequestChanges,
    ) -> Result<repair_request::Model, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let current = repair_request::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("update_request", e))?
            .ok_or(NotFoundError::Request(id))?;

        let references: Vec<_> = changes.referenced_users().collect();
        ensure_users_exist(&txn, references).await?;

        let mut active: repair_request::ActiveModel = current.into();
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        if let Some(completion_date) = changes.completion_date {
            active.completion_date = Set(completion_date);
        }
        if let Some(repair_parts) = changes.repair_parts {
            active.repair_parts = Set(repair_parts);
        }
        if let Some(deadline) = changes.deadline {
            active.deadline = Set(deadline);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority);
        }
        if let Some(master_id) = changes.master_id {
            active.master_id = Set(master_id);
        }
        if let Some(client_id) = changes.client_id {
            active.client_id = Set(client_id);
        }

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_request", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(updated)
    }

    /// Delete a request and its comments
    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = repair_request::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("delete_request", e))?;
        if result.is_none() {
            return Err(NotFoundError::Request(id).into());
        }

        comment::Entity::delete_many()
            .filter(comment::Column::RequestId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_request_comments", e))?;

        repair_request::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_request", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(())
    }

    /// Total requests and those with a completion date
    pub async fn counts(&self, scope: StatsScope) -> Result<RequestCounts, InternalError> {
        let total = Self::scoped(scope)
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests", e))?;

        let completed = Self::scoped(scope)
            .filter(repair_request::Column::CompletionDate.is_not_null())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_completed_requests", e))?;

        Ok(RequestCounts { total, completed })
    }

    /// (start_date, completion_date) of every completed request
    pub async fn completion_spans(
        &self,
        scope: StatsScope,
    ) -> Result<Vec<(NaiveDate, NaiveDate)>, InternalError> {
        Self::scoped(scope)
            .filter(repair_request::Column::CompletionDate.is_not_null())
            .select_only()
            .column(repair_request::Column::StartDate)
            .column(repair_request::Column::CompletionDate)
            .into_tuple::<(NaiveDate, NaiveDate)>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("completion_spans", e))
    }

    pub async fn count_by_equipment(
        &self,
        scope: StatsScope,
    ) -> Result<Vec<EquipmentCount>, InternalError> {
        let rows = Self::scoped(scope)
            .select_only()
            .column(repair_request::Column::EquipmentType)
            .column_as(Expr::col(repair_request::Column::Id).count(), "count")
            .group_by(repair_request::Column::EquipmentType)
            .order_by_asc(repair_request::Column::EquipmentType)
            .into_model::<EquipmentCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_by_equipment", e))?;

        Ok(rows
            .into_iter()
            .map(|row| EquipmentCount {
                equipment_type: row.equipment_type,
                count: row.count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ValidationError;
    use crate::stores::UserStore;
    use crate::test::utils::{date, new_request, new_user, setup_test_db};
    use crate::types::internal::auth::Role;

    #[tokio::test]
    async fn test_partial_update_only_touches_supplied_fields() {
        let store = RequestStore::new(setup_test_db().await);
        let mut draft = new_request("Printer");
        draft.repair_parts = Some("toner".to_string());
        draft.deadline = Some(date(2024, 3, 10));
        let original = store.create(draft).await.unwrap();

        let updated = store
            .update(
                original.id,
                RequestChanges {
                    completion_date: Some(Some(date(2024, 3, 5))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.completion_date, Some(date(2024, 3, 5)));
        assert_eq!(
            repair_request::Model {
                completion_date: original.completion_date,
                ..updated
            },
            original
        );
    }

    #[tokio::test]
    async fn test_explicit_null_clears_nullable_field() {
        let store = RequestStore::new(setup_test_db().await);
        let mut draft = new_request("Monitor");
        draft.repair_parts = Some("cable".to_string());
        let request = store.create(draft).await.unwrap();

        let updated = store
            .update(
                request.id,
                RequestChanges {
                    repair_parts: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.repair_parts, None);
    }

    #[tokio::test]
    async fn test_dangling_master_is_rejected() {
        let store = RequestStore::new(setup_test_db().await);
        let request = store.create(new_request("Scanner")).await.unwrap();

        let result = store.update(request.id, RequestChanges::assign_master(77)).await;

        assert!(matches!(
            result,
            Err(InternalError::Validation(ValidationError::MissingReference { field: "master_id", id: 77 }))
        ));
        assert_eq!(store.get(request.id).await.unwrap().master_id, None);
    }

    #[tokio::test]
    async fn test_search_combines_filters() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = RequestStore::new(db);
        let client = users.create(new_user("client", Role::Customer)).await.unwrap();

        let mut laptop = new_request("Laptop");
        laptop.client_id = Some(client.id);
        store.create(laptop).await.unwrap();
        store.create(new_request("Laptop")).await.unwrap();
        store.create(new_request("Phone")).await.unwrap();

        let found = store
            .search(&RequestFilter {
                equipment_type: Some("Laptop".to_string()),
                client_id: Some(client.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].client_id, Some(client.id));
    }

    #[tokio::test]
    async fn test_client_scope_hides_other_requests() {
        let db = setup_test_db().await;
        let users = UserStore::new(db.clone());
        let store = RequestStore::new(db);
        let alice = users.create(new_user("alice", Role::Customer)).await.unwrap();
        let bob = users.create(new_user("bob", Role::Customer)).await.unwrap();

        let mut mine = new_request("Laptop");
        mine.client_id = Some(alice.id);
        let mine = store.create(mine).await.unwrap();
        let mut theirs = new_request("Phone");
        theirs.client_id = Some(bob.id);
        let theirs = store.create(theirs).await.unwrap();

        let listed = store.list_for_client(alice.id, None, Page::default()).await.unwrap();
        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![mine.id]);
        assert!(store.get_for_client(alice.id, mine.id).await.is_ok());
        assert!(matches!(
            store.get_for_client(alice.id, theirs.id).await,
            Err(InternalError::NotFound(NotFoundError::Request(_)))
        ));
        assert_eq!(store.ids_for_client(bob.id).await.unwrap(), vec![theirs.id]);
    }

    #[tokio::test]
    async fn test_statistics_queries() {
        let store = RequestStore::new(setup_test_db().await);
        let mut done = new_request("Laptop");
        done.start_date = date(2024, 1, 1);
        done.completion_date = Some(date(2024, 1, 4));
        store.create(done).await.unwrap();
        store.create(new_request("Laptop")).await.unwrap();
        store.create(new_request("Phone")).await.unwrap();

        let counts = store.counts(StatsScope::All).await.unwrap();
        assert_eq!(counts, RequestCounts { total: 3, completed: 1 });

        let spans = store.completion_spans(StatsScope::All).await.unwrap();
        assert_eq!(spans, vec![(date(2024, 1, 1), date(2024, 1, 4))]);

        let by_equipment = store.count_by_equipment(StatsScope::All).await.unwrap();
        assert_eq!(
            by_equipment,
            vec![
                EquipmentCount { equipment_type: "Laptop".to_string(), count: 2 },
                EquipmentCount { equipment_type: "Phone".to_string(), count: 1 },
            ]
        );

        let empty = store.counts(StatsScope::Client(999)).await.unwrap();
        assert_eq!(empty, RequestCounts { total: 0, completed: 0 });
    }
}
