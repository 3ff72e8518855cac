// Library exports for chirp-server
// The binary and the integration tests both build on these modules

pub mod api;
pub mod config;
pub mod db;
pub mod render;
pub mod routes;
pub mod state;
pub mod synthetic;
