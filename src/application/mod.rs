// Application layer - Chart use cases
pub mod chart_service;
pub mod dataset_repository;
