// src/store/directory.rs

use async_trait::async_trait;

use crate::{
    models::{
        agenda::{Appointment, Deadline},
        auth::User,
        cases::Case,
        crm::Client,
        finance::{FinancialTransaction, Refund, TimeEntry},
        tenancy::Tenant,
    },
    store::snapshot::TenantSnapshot,
};

// A consulta de credenciais é o único ponto de suspensão do núcleo:
// resolve com o usuário ou com nada, sem efeito parcial antes de
// retornar. A trait deixa o diretório substituível nos testes.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Option<User>;
}

// O diretório global da plataforma: todos os escritórios e seus dados.
// No login, as coleções são filtradas pelo tenant do usuário e viram o
// snapshot da sessão; o diretório em si nunca é mutado depois do seed.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub tenants: Vec<Tenant>,
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub cases: Vec<Case>,
    pub appointments: Vec<Appointment>,
    pub deadlines: Vec<Deadline>,
    pub time_entries: Vec<TimeEntry>,
    pub transactions: Vec<FinancialTransaction>,
    pub refunds: Vec<Refund>,
}

impl Directory {
    pub fn tenant_by_id(&self, id: &str) -> Option<Tenant> {
        self.tenants.iter().find(|tenant| tenant.id == id).cloned()
    }

    /// Recorta o snapshot de um escritório: cada coleção filtrada por
    /// `tenant_id`, clonada do diretório.
    pub fn snapshot_for(&self, tenant: &Tenant) -> TenantSnapshot {
        let id = tenant.id.as_str();
        TenantSnapshot {
            tenant: tenant.clone(),
            users: self
                .users
                .iter()
                .filter(|user| user.tenant_id.as_deref() == Some(id))
                .cloned()
                .collect(),
            clients: filter_by_tenant(&self.clients, id, |c| &c.tenant_id),
            cases: filter_by_tenant(&self.cases, id, |c| &c.tenant_id),
            appointments: filter_by_tenant(&self.appointments, id, |a| &a.tenant_id),
            deadlines: filter_by_tenant(&self.deadlines, id, |d| &d.tenant_id),
            time_entries: filter_by_tenant(&self.time_entries, id, |t| &t.tenant_id),
            transactions: filter_by_tenant(&self.transactions, id, |t| &t.tenant_id),
            refunds: filter_by_tenant(&self.refunds, id, |r| &r.tenant_id),
        }
    }
}

fn filter_by_tenant<T: Clone>(items: &[T], tenant_id: &str, key: impl Fn(&T) -> &String) -> Vec<T> {
    items
        .iter()
        .filter(|item| key(item) == tenant_id)
        .cloned()
        .collect()
}

#[async_trait]
impl UserDirectory for Directory {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|user| user.email == email).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let directory = seed::demo_directory().unwrap();
        assert!(
            directory
                .find_by_email("master@silva.adv.br")
                .await
                .is_some()
        );
        assert!(directory.find_by_email("MASTER@silva.adv.br").await.is_none());
        assert!(directory.find_by_email("ninguem@nada.com").await.is_none());
    }

    #[test]
    fn snapshot_is_scoped_to_one_tenant() {
        let directory = seed::demo_directory().unwrap();
        let tenant = directory.tenant_by_id("tn-silva").unwrap();
        let snapshot = directory.snapshot_for(&tenant);

        assert!(!snapshot.clients.is_empty());
        assert!(
            snapshot
                .clients
                .iter()
                .all(|client| client.tenant_id == "tn-silva")
        );
        assert!(snapshot.cases.iter().all(|case| case.tenant_id == "tn-silva"));
        assert!(
            snapshot
                .users
                .iter()
                .all(|user| user.tenant_id.as_deref() == Some("tn-silva"))
        );
        // nada do outro escritório vaza para cá
        assert!(!snapshot.clients.iter().any(|client| client.id == "cl-marcia"));
    }
}
