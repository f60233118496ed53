use crate::types::internal::auth::Role;

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub phone: String,
    pub login: String,
    pub password: String,
    pub role: Role,
}

/// Partial update of a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    /// An empty password means "keep the current one"
    pub fn without_blank_password(mut self) -> Self {
        if self.password.as_deref().is_some_and(str::is_empty) {
            self.password = None;
        }
        self
    }
}
