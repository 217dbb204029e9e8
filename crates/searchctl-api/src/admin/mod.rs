// Admin API client
//
// Covers the node-monitoring endpoints and the domain/keyword list
// management endpoints exposed under `/admin/` by the web backend.

mod client;
mod lists;
pub mod models;
mod monitor;

pub use client::AdminClient;
