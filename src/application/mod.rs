// Application layer - Use cases over the repository traits
pub mod dashboard_service;
pub mod discovery_service;
pub mod repositories;
