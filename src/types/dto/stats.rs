use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::repair::{CompletionStats, EquipmentCount, RequestCounts};

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RequestCountResponse {
    pub total_requests: u64,
    pub completed_requests: u64,
}

impl From<RequestCounts> for RequestCountResponse {
    fn from(c: RequestCounts) -> Self {
        Self {
            total_requests: c.total,
            completed_requests: c.completed,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AverageTimeResponse {
    /// Mean days from start to completion, one decimal place
    pub avg_repair_days: f64,
    pub count_completed: u64,
    pub total_days: i64,
}

impl From<CompletionStats> for AverageTimeResponse {
    fn from(s: CompletionStats) -> Self {
        Self {
            avg_repair_days: s.average_days,
            count_completed: s.completed,
            total_days: s.total_days,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EquipmentCountResponse {
    pub equipment_type: String,
    pub count: i64,
}

impl From<EquipmentCount> for EquipmentCountResponse {
    fn from(e: EquipmentCount) -> Self {
        Self {
            equipment_type: e.equipment_type,
            count: e.count,
        }
    }
}
