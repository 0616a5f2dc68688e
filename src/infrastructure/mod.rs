// Infrastructure layer - External dependencies and adapters
pub mod aws;
pub mod cloudwatch_repository;
pub mod config;
pub mod files;
pub mod mediapackage_repository;
pub mod medialive_repository;
