//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Logout e dados do usuário exigem sessão
    let session_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::crm::create_client).get(handlers::crm::list_clients),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::crm::update_client)
                .delete(handlers::crm::delete_client),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let case_routes = Router::new()
        .route(
            "/",
            post(handlers::cases::create_case).get(handlers::cases::list_cases),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::cases::update_case)
                .delete(handlers::cases::delete_case),
        )
        // submissão de etapa: o único caminho que avança o funil
        .route("/{id}/advance", post(handlers::cases::advance_stage))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let appointment_routes = Router::new()
        .route(
            "/",
            post(handlers::agenda::create_appointment).get(handlers::agenda::list_appointments),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::agenda::update_appointment)
                .delete(handlers::agenda::delete_appointment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let deadline_routes = Router::new()
        .route(
            "/",
            post(handlers::agenda::create_deadline).get(handlers::agenda::list_deadlines),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::agenda::update_deadline)
                .delete(handlers::agenda::delete_deadline),
        )
        .route(
            "/{id}/checklist/{item_id}/toggle",
            post(handlers::agenda::toggle_checklist_item),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let agenda_routes = Router::new()
        .route("/calendar", get(handlers::agenda::get_calendar))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let time_entry_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_time_entry).get(handlers::finance::list_time_entries),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::finance::update_time_entry)
                .delete(handlers::finance::delete_time_entry),
        )
        .route("/{id}/bill", post(handlers::finance::bill_time_entry))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let transaction_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_transaction)
                .get(handlers::finance::list_transactions),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::finance::update_transaction)
                .delete(handlers::finance::delete_transaction),
        )
        .route("/{id}/approve", post(handlers::finance::approve_transaction))
        .route("/{id}/reject", post(handlers::finance::reject_transaction))
        .route("/{id}/settle", post(handlers::finance::settle_transaction))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let refund_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_refund).get(handlers::finance::list_refunds),
        )
        .route("/{id}/approve", post(handlers::finance::approve_refund))
        .route("/{id}/reject", post(handlers::finance::reject_refund))
        .route("/{id}/pay", post(handlers::finance::pay_refund))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let board_routes = Router::new()
        .route("/", get(handlers::board::get_board))
        .route("/move", post(handlers::board::move_case))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", session_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/cases", case_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/deadlines", deadline_routes)
        .nest("/api/agenda", agenda_routes)
        .nest("/api/time-entries", time_entry_routes)
        .nest("/api/transactions", transaction_routes)
        .nest("/api/refunds", refund_routes)
        .nest("/api/board", board_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state.clone());

    // Inicia o servidor
    let listener = TcpListener::bind(&app_state.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
