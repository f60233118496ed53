// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for specific API
// endpoints. Every coordinator method authorizes the caller before touching
// persistence.
pub mod auth_coordinator;
pub mod client_coordinator;
pub mod comment_coordinator;
pub mod feedback_coordinator;
pub mod request_coordinator;
pub mod user_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use client_coordinator::ClientCoordinator;
pub use comment_coordinator::CommentCoordinator;
pub use feedback_coordinator::FeedbackCoordinator;
pub use request_coordinator::RequestCoordinator;
pub use user_coordinator::UserCoordinator;
