use chrono::NaiveDate;

/// Status every request starts in
pub const INITIAL_STATUS: &str = "new";

/// Priority assigned when none is given, and always on the customer path
pub const DEFAULT_PRIORITY: &str = "normal";

/// Fields required to insert a repair request
#[derive(Debug, Clone)]
pub struct NewRepairRequest {
    pub start_date: NaiveDate,
    pub equipment_type: String,
    pub equipment_model: String,
    pub problem_description: String,
    pub status: String,
    pub completion_date: Option<NaiveDate>,
    pub repair_parts: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: String,
    pub master_id: Option<i32>,
    pub client_id: Option<i32>,
}

/// Partial update of a repair request
///
/// Outer `None` leaves the column untouched. For nullable columns the inner
/// option distinguishes "set to value" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestChanges {
    pub status: Option<String>,
    pub completion_date: Option<Option<NaiveDate>>,
    pub repair_parts: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<String>,
    pub master_id: Option<Option<i32>>,
    pub client_id: Option<Option<i32>>,
}

impl RequestChanges {
    pub fn assign_master(master_id: i32) -> Self {
        Self {
            master_id: Some(Some(master_id)),
            ..Default::default()
        }
    }

    pub fn extend_deadline(deadline: NaiveDate) -> Self {
        Self {
            deadline: Some(Some(deadline)),
            ..Default::default()
        }
    }

    /// User references that must resolve before the write
    pub fn referenced_users(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        [
            ("master_id", self.master_id.flatten()),
            ("client_id", self.client_id.flatten()),
        ]
        .into_iter()
        .filter_map(|(field, id)| id.map(|id| (field, id)))
    }
}

/// Equality filters for /requests/search; all present filters must match
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub number: Option<i32>,
    pub status: Option<String>,
    pub equipment_type: Option<String>,
    pub client_id: Option<i32>,
    pub master_id: Option<i32>,
}

/// Which requests an aggregation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    All,
    Client(i32),
}

impl StatsScope {
    pub fn from_tenant(tenant: Option<i32>) -> Self {
        tenant.map_or(StatsScope::All, StatsScope::Client)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCounts {
    pub total: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionStats {
    /// Mean days from start to completion, one decimal place
    pub average_days: f64,
    pub completed: u64,
    pub total_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentCount {
    pub equipment_type: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_users_skips_absent_and_cleared() {
        let changes = RequestChanges {
            master_id: Some(Some(3)),
            client_id: Some(None),
            ..Default::default()
        };

        let refs: Vec<_> = changes.referenced_users().collect();
        assert_eq!(refs, vec![("master_id", 3)]);
    }

    #[test]
    fn test_stats_scope_follows_tenant() {
        assert_eq!(StatsScope::from_tenant(None), StatsScope::All);
        assert_eq!(StatsScope::from_tenant(Some(8)), StatsScope::Client(8));
    }
}
