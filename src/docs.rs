// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::crm::create_client,
        handlers::crm::list_clients,
        handlers::crm::update_client,
        handlers::crm::delete_client,

        // --- Casos ---
        handlers::cases::create_case,
        handlers::cases::list_cases,
        handlers::cases::update_case,
        handlers::cases::delete_case,
        handlers::cases::advance_stage,

        // --- Agenda ---
        handlers::agenda::create_appointment,
        handlers::agenda::list_appointments,
        handlers::agenda::update_appointment,
        handlers::agenda::delete_appointment,
        handlers::agenda::create_deadline,
        handlers::agenda::list_deadlines,
        handlers::agenda::update_deadline,
        handlers::agenda::delete_deadline,
        handlers::agenda::toggle_checklist_item,
        handlers::agenda::get_calendar,

        // --- Financeiro ---
        handlers::finance::create_time_entry,
        handlers::finance::list_time_entries,
        handlers::finance::update_time_entry,
        handlers::finance::delete_time_entry,
        handlers::finance::bill_time_entry,
        handlers::finance::create_transaction,
        handlers::finance::list_transactions,
        handlers::finance::update_transaction,
        handlers::finance::delete_transaction,
        handlers::finance::approve_transaction,
        handlers::finance::reject_transaction,
        handlers::finance::settle_transaction,
        handlers::finance::create_refund,
        handlers::finance::list_refunds,
        handlers::finance::approve_refund,
        handlers::finance::reject_refund,
        handlers::finance::pay_refund,

        // --- Board ---
        handlers::board::get_board,
        handlers::board::move_case,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Tenancy ---
            models::tenancy::Tenant,

            // --- Clientes ---
            models::crm::Client,
            handlers::crm::CreateClientPayload,

            // --- Casos ---
            models::cases::CaseStatus,
            models::cases::LegalArea,
            models::cases::Urgency,
            models::cases::Viability,
            models::cases::ChecklistItem,
            models::cases::FilingRecord,
            models::cases::Case,
            models::cases::StageSubmission,
            models::cases::BoardColumn,
            handlers::cases::CreateCasePayload,

            // --- Agenda ---
            models::agenda::AppointmentKind,
            models::agenda::AppointmentStatus,
            models::agenda::DeadlineStatus,
            models::agenda::Appointment,
            models::agenda::Deadline,
            models::agenda::CalendarEvent,
            models::agenda::CalendarDay,
            handlers::agenda::CreateAppointmentPayload,
            handlers::agenda::CreateDeadlinePayload,

            // --- Financeiro ---
            models::finance::TimeEntryStatus,
            models::finance::TransactionKind,
            models::finance::TransactionStatus,
            models::finance::RefundStatus,
            models::finance::TimeEntry,
            models::finance::FinancialTransaction,
            models::finance::Refund,
            handlers::finance::CreateTimeEntryPayload,
            handlers::finance::CreateTransactionPayload,
            handlers::finance::CreateRefundPayload,

            // --- Board ---
            handlers::board::MoveCasePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::StatusCount,
            models::dashboard::AreaCount,
            models::dashboard::MonthlyFinanceEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e sessão"),
        (name = "Usuários", description = "Dados do usuário autenticado"),
        (name = "Clientes", description = "Gestão de clientes do escritório"),
        (name = "Casos", description = "Casos jurídicos e funil de etapas"),
        (name = "Agenda", description = "Compromissos, prazos e calendário"),
        (name = "Financeiro", description = "Horas, transações e reembolsos"),
        (name = "Board", description = "Quadro de casos por status"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
