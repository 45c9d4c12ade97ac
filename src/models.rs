pub mod agenda;
pub mod auth;
pub mod cases;
pub mod crm;
pub mod dashboard;
pub mod finance;
pub mod tenancy;
