// Library exports for the binary, integration tests and the portal

pub mod api;
pub mod app_data;
pub mod cli;
pub mod config;
pub mod coordinators;
pub mod errors;
pub mod portal;
pub mod providers;
pub mod stores;
pub mod types;

#[cfg(test)]
mod test;

pub use app_data::AppData;
