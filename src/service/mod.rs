pub mod error;
pub mod notification_service;
pub mod workflow;
