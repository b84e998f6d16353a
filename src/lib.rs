// Library exports for CropCare
// This allows integration tests and external code to use CropCare modules

pub mod analysis;
pub mod api;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod extractors;
pub mod i18n;
pub mod preference;
pub mod routes;
pub mod screens;
pub mod session;
pub mod state;
pub mod tasks;
pub mod upload;
