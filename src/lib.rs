/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints and pages
pub mod controller;
/// Connection pool and migrations
pub mod database;
/// Domain objects
pub mod domain;
/// Application errors
pub mod error;
/// Stored records and their inputs
pub mod model;
/// HTML rendering
pub mod render;
/// Repositories
pub mod repo;
/// Campaign and signup workflows
pub mod service;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
