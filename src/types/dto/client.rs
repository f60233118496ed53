use chrono::NaiveDate;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Body of POST /client/my-requests
///
/// Status, priority and client are never taken from the caller.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ClientRequestCreate {
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    pub equipment_type: String,
    pub equipment_model: String,
    pub problem_description: String,

    /// Accepted for compatibility and ignored
    pub priority: Option<String>,
}
