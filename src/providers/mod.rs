// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate.
pub mod authentication_provider;
pub mod authorization_provider;
pub mod statistics_provider;
pub mod token_provider;

pub use authentication_provider::AuthenticationProvider;
pub use authorization_provider::AuthorizationProvider;
pub use token_provider::TokenProvider;
