// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// O conjunto de perfis que uma rota aceita.
pub trait RoleGate: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// O extrator-guardião: falha com 403 se o perfil do usuário
/// autenticado não estiver no conjunto da rota. SuperAdmin passa por
/// qualquer portão (perfil de plataforma).
pub struct RequireRole<T>(PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        if user.role == Role::SuperAdmin || T::allowed().contains(&user.role) {
            Ok(RequireRole(PhantomData))
        } else {
            Err(AppError::Forbidden)
        }
    }
}

// ---
// OS PORTÕES DO PRODUTO
// ---

/// Gestão de casos, agenda e board: advogados e o dono.
pub struct GateAdvocacia;
impl RoleGate for GateAdvocacia {
    fn allowed() -> &'static [Role] {
        &[Role::Advogado, Role::Master]
    }
}

/// Aprovações financeiras e faturamento: financeiro e o dono.
pub struct GateFinanceiro;
impl RoleGate for GateFinanceiro {
    fn allowed() -> &'static [Role] {
        &[Role::Financeiro, Role::Master]
    }
}

/// Ações destrutivas do escritório (ex: excluir cliente): só o dono.
pub struct GateMaster;
impl RoleGate for GateMaster {
    fn allowed() -> &'static [Role] {
        &[Role::Master]
    }
}
