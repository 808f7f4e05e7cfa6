// Infrastructure layer - Configuration and dataset storage adapters
pub mod config;
pub mod json_repository;
