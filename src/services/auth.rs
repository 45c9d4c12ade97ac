// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    models::{
        auth::{Claims, Role, User},
        tenancy::Tenant,
    },
    store::{Directory, TenantStore, UserDirectory},
};

// A sessão ativa do processo: usuário autenticado e, fora do perfil de
// plataforma, o escritório cujo snapshot está instalado no store.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub user: User,
    pub tenant: Option<Tenant>,
}

// Resolve credenciais e administra o ciclo de vida da sessão: `login`
// constrói (snapshot filtrado + token), `logout` desmonta. Uma sessão
// por processo; login novo substitui o anterior por inteiro.
#[derive(Clone)]
pub struct SessionService {
    directory: Arc<Directory>,
    store: TenantStore,
    active: Arc<RwLock<Option<ActiveSession>>>,
    jwt_secret: String,
}

impl SessionService {
    pub fn new(directory: Arc<Directory>, store: TenantStore, jwt_secret: String) -> Self {
        Self {
            directory,
            store,
            active: Arc::new(RwLock::new(None)),
            jwt_secret,
        }
    }

    /// Login por e-mail e senha. Credencial errada é resultado
    /// esperado (`InvalidCredentials`), nunca pânico.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, User, Option<Tenant>), AppError> {
        let Some(user) = self.directory.find_by_email(email).await else {
            return Err(AppError::InvalidCredentials);
        };

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();

        // Executa a verificação bcrypt em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let tenant = match user.role {
            // Perfil de plataforma: não pertence a escritório nenhum
            Role::SuperAdmin => None,
            _ => {
                let tenant_id = user.tenant_id.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("usuário {} sem escritório vinculado", user.id)
                })?;
                let tenant = self.directory.tenant_by_id(tenant_id).ok_or_else(|| {
                    anyhow::anyhow!("escritório {} não consta no diretório", tenant_id)
                })?;
                Some(tenant)
            }
        };

        // Ativa a sessão: snapshot recém-filtrado do escritório (ou
        // nenhum, no caso do SuperAdmin).
        match &tenant {
            Some(tenant) => {
                self.store
                    .activate(self.directory.snapshot_for(tenant))
                    .await
            }
            None => self.store.deactivate().await,
        }
        *self.active.write().await = Some(ActiveSession {
            user: user.clone(),
            tenant: tenant.clone(),
        });

        let token = self.create_token(&user.id)?;
        tracing::info!("🔓 Sessão ativa para {} ({:?})", user.email, user.role);
        Ok((token, user, tenant))
    }

    /// Encerra a sessão: snapshot descartado, token anterior inválido.
    pub async fn logout(&self) {
        self.store.deactivate().await;
        *self.active.write().await = None;
        tracing::info!("🔒 Sessão encerrada");
    }

    /// Valida o JWT e confere que ele pertence à sessão ativa — tokens
    /// de sessões substituídas ou encerradas não valem mais.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let guard = self.active.read().await;
        match guard.as_ref() {
            Some(session) if session.user.id == token_data.claims.sub => {
                Ok(session.user.clone())
            }
            _ => Err(AppError::InvalidToken),
        }
    }

    pub async fn active_session(&self) -> Option<ActiveSession> {
        self.active.read().await.clone()
    }

    fn create_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id.to_owned(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn service() -> SessionService {
        let directory = Arc::new(seed::demo_directory().unwrap());
        SessionService::new(directory, TenantStore::new(), "segredo-de-teste".into())
    }

    #[tokio::test]
    async fn login_activates_tenant_snapshot() {
        let svc = service();
        let (token, user, tenant) = svc.login("master@silva.adv.br", "senha123").await.unwrap();

        assert!(!token.is_empty());
        assert_eq!(user.role, Role::Master);
        assert_eq!(tenant.as_ref().map(|t| t.id.as_str()), Some("tn-silva"));

        // o store passou a responder com o snapshot do escritório
        let snapshot = svc.store.snapshot().await.unwrap();
        assert_eq!(snapshot.tenant.id, "tn-silva");
        assert!(snapshot.clients.iter().all(|c| c.tenant_id == "tn-silva"));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_reported_not_thrown() {
        let svc = service();
        assert!(matches!(
            svc.login("master@silva.adv.br", "senha-errada").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.login("ninguem@nada.com", "senha123").await,
            Err(AppError::InvalidCredentials)
        ));
        // nenhuma sessão ficou ativa pelo caminho
        assert!(svc.active_session().await.is_none());
    }

    #[tokio::test]
    async fn token_round_trips_against_active_session() {
        let svc = service();
        let (token, user, _) = svc.login("advogado@silva.adv.br", "senha123").await.unwrap();

        let validated = svc.validate_token(&token).await.unwrap();
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn logout_tears_down_session_and_store() {
        let svc = service();
        let (token, _, _) = svc.login("master@silva.adv.br", "senha123").await.unwrap();

        svc.logout().await;

        assert!(svc.active_session().await.is_none());
        assert!(matches!(
            svc.store.snapshot().await,
            Err(AppError::NoActiveSession)
        ));
        // o token emitido antes do logout deixa de valer
        assert!(matches!(
            svc.validate_token(&token).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn super_admin_logs_in_without_tenant() {
        let svc = service();
        let (_, user, tenant) = svc.login("admin@jusgestor.com.br", "senha123").await.unwrap();

        assert_eq!(user.role, Role::SuperAdmin);
        assert!(tenant.is_none());
        // sem escritório, nenhum snapshot é instalado
        assert!(matches!(
            svc.store.snapshot().await,
            Err(AppError::NoActiveSession)
        ));
    }

    #[tokio::test]
    async fn new_login_replaces_previous_session() {
        let svc = service();
        let (old_token, _, _) = svc.login("master@silva.adv.br", "senha123").await.unwrap();
        svc.login("master@almeida.adv.br", "senha123").await.unwrap();

        let snapshot = svc.store.snapshot().await.unwrap();
        assert_eq!(snapshot.tenant.id, "tn-almeida");
        assert!(matches!(
            svc.validate_token(&old_token).await,
            Err(AppError::InvalidToken)
        ));
    }
}
