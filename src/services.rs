pub mod agenda_service;
pub mod auth;
pub mod board_service;
pub mod case_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod finance_service;
pub mod lifecycle;
