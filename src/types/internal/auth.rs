use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, decimal string)
    pub sub: String,

    /// Role string of the subject at issuance
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// The fixed set of roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Operator,
    Specialist,
    Manager,
    QualityManager,
    Customer,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::Operator,
        Role::Specialist,
        Role::Manager,
        Role::QualityManager,
        Role::Customer,
    ];

    /// Every role except customer
    pub const STAFF: &'static [Role] = &[
        Role::Operator,
        Role::Specialist,
        Role::Manager,
        Role::QualityManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Specialist => "specialist",
            Role::Manager => "manager",
            Role::QualityManager => "quality-manager",
            Role::Customer => "customer",
        }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Role::Customer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRole(s.to_string()))
    }
}

/// Every guarded operation of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    ReadUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListRequests,
    SearchRequests,
    ReadRequest,
    CreateRequest,
    UpdateRequest,
    DeleteRequest,
    AssignMaster,
    ExtendDeadline,
    ViewStatistics,
    ListComments,
    ReadComment,
    CreateComment,
    DeleteComment,
    ClientRequests,
    FeedbackQr,
}

/// The authenticated user behind a request, re-read from the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub login: String,
    pub role: Role,
}

impl Caller {
    /// Client id that customer-scoped queries must be restricted to
    pub fn tenant(&self) -> Option<i32> {
        self.role.is_customer().then_some(self.user_id)
    }
}
