pub mod agenda;
pub mod auth;
pub mod board;
pub mod cases;
pub mod crm;
pub mod dashboard;
pub mod finance;
