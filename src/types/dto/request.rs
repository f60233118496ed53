use chrono::{DateTime, NaiveDate, Utc};
use poem_openapi::{types::MaybeUndefined, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::repair_request;
use crate::types::internal::repair::{
    NewRepairRequest, RequestChanges, DEFAULT_PRIORITY, INITIAL_STATUS,
};

/// Request model for creating a repair request (staff path)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateRepairRequest {
    pub start_date: NaiveDate,
    pub equipment_type: String,
    pub equipment_model: String,
    pub problem_description: String,

    /// Defaults to "new"
    pub status: Option<String>,
    pub completion_date: Option<NaiveDate>,
    pub repair_parts: Option<String>,
    pub deadline: Option<NaiveDate>,

    /// Defaults to "normal"
    pub priority: Option<String>,
    pub master_id: Option<i32>,
    pub client_id: Option<i32>,
}

impl From<CreateRepairRequest> for NewRepairRequest {
    fn from(body: CreateRepairRequest) -> Self {
        Self {
            start_date: body.start_date,
            equipment_type: body.equipment_type,
            equipment_model: body.equipment_model,
            problem_description: body.problem_description,
            status: body.status.unwrap_or_else(|| INITIAL_STATUS.to_string()),
            completion_date: body.completion_date,
            repair_parts: body.repair_parts,
            deadline: body.deadline,
            priority: body.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            master_id: body.master_id,
            client_id: body.client_id,
        }
    }
}

/// Partial update of a repair request
///
/// A field that is absent from the body is left unchanged. For nullable
/// columns an explicit `null` clears the stored value.
#[derive(Object, Debug, Default)]
pub struct UpdateRepairRequest {
    pub status: Option<String>,
    pub completion_date: MaybeUndefined<NaiveDate>,
    pub repair_parts: MaybeUndefined<String>,
    pub deadline: MaybeUndefined<NaiveDate>,
    pub priority: Option<String>,
    pub master_id: MaybeUndefined<i32>,
    pub client_id: MaybeUndefined<i32>,
}

fn change<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(v) => Some(Some(v)),
    }
}

impl From<UpdateRepairRequest> for RequestChanges {
    fn from(body: UpdateRepairRequest) -> Self {
        Self {
            status: body.status,
            completion_date: change(body.completion_date),
            repair_parts: change(body.repair_parts),
            deadline: change(body.deadline),
            priority: body.priority,
            master_id: change(body.master_id),
            client_id: change(body.client_id),
        }
    }
}

/// Body of POST /requests/{id}/assign
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AssignMasterRequest {
    pub master_id: i32,
}

/// Body of POST /requests/{id}/extend
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ExtendDeadlineRequest {
    pub new_deadline: NaiveDate,

    /// Free-text justification; logged, not stored
    pub reason: Option<String>,
}

/// A repair request as returned by the API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RepairRequestResponse {
    pub id: i32,
    pub start_date: NaiveDate,
    pub equipment_type: String,
    pub equipment_model: String,
    pub problem_description: String,
    pub status: String,
    pub completion_date: Option<NaiveDate>,
    pub repair_parts: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub master_id: Option<i32>,
    pub client_id: Option<i32>,
}

impl From<repair_request::Model> for RepairRequestResponse {
    fn from(r: repair_request::Model) -> Self {
        Self {
            id: r.id,
            start_date: r.start_date,
            equipment_type: r.equipment_type,
            equipment_model: r.equipment_model,
            problem_description: r.problem_description,
            status: r.status,
            completion_date: r.completion_date,
            repair_parts: r.repair_parts,
            deadline: r.deadline,
            priority: r.priority,
            created_at: r.created_at,
            master_id: r.master_id,
            client_id: r.client_id,
        }
    }
}
