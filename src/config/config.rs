// src/config/config.rs

use std::{env, sync::Arc};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    services::{
        agenda_service::AgendaService, auth::SessionService, board_service::BoardService,
        case_service::CaseService, crm_service::CrmService,
        dashboard_service::DashboardService, finance_service::FinanceService,
    },
    store::{TenantStore, seed},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub bind_addr: String,
    pub i18n_store: I18nStore,
    pub store: TenantStore,
    pub session_service: SessionService,
    pub crm_service: CrmService,
    pub case_service: CaseService,
    pub agenda_service: AgendaService,
    pub finance_service: FinanceService,
    pub board_service: BoardService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // O diretório de demonstração faz o papel das migrações: é a
        // fonte de onde o login recorta o snapshot do escritório.
        let directory = Arc::new(seed::demo_directory()?);
        tracing::info!(
            "✅ Diretório carregado: {} escritórios, {} usuários",
            directory.tenants.len(),
            directory.users.len()
        );

        // --- Monta o gráfico de dependências ---
        let store = TenantStore::new();
        let session_service = SessionService::new(directory, store.clone(), jwt_secret);

        Ok(Self {
            bind_addr,
            i18n_store: I18nStore::new(),
            session_service,
            crm_service: CrmService::new(store.clone()),
            case_service: CaseService::new(store.clone()),
            agenda_service: AgendaService::new(store.clone()),
            finance_service: FinanceService::new(store.clone()),
            board_service: BoardService::new(store.clone()),
            dashboard_service: DashboardService::new(store.clone()),
            store,
        })
    }
}
