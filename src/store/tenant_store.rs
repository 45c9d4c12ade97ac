// src/store/tenant_store.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    common::{error::AppError, ids::new_id},
    models::cases::Case,
    store::snapshot::{Record, TenantSnapshot},
};

// O store do tenant ativo. Guarda o snapshot atrás de um Arc e troca
// o Arc inteiro a cada mutação: quem observa consegue detectar
// "algo mudou" comparando identidade, sem diff, e uma operação que
// falha no meio não deixa nada aplicado pela metade.
#[derive(Clone, Default)]
pub struct TenantStore {
    inner: Arc<RwLock<Option<Arc<TenantSnapshot>>>>,
}

impl TenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instala o snapshot de um login recém-resolvido.
    pub async fn activate(&self, snapshot: TenantSnapshot) {
        *self.inner.write().await = Some(Arc::new(snapshot));
    }

    /// Descarta a sessão. Qualquer operação seguinte falha com
    /// `NoActiveSession` até o próximo login.
    pub async fn deactivate(&self) {
        *self.inner.write().await = None;
    }

    /// O snapshot corrente, compartilhado e imutável.
    pub async fn snapshot(&self) -> Result<Arc<TenantSnapshot>, AppError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or(AppError::NoActiveSession)
    }

    /// Aplica uma mutação inteira sobre um clone do snapshot e troca o
    /// Arc só no sucesso. É o único caminho de escrita do store.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut TenantSnapshot) -> Result<T, AppError>,
    {
        let mut guard = self.inner.write().await;
        let current = guard.as_ref().ok_or(AppError::NoActiveSession)?;

        let mut next = TenantSnapshot::clone(current);
        let out = op(&mut next)?; // falhou -> o snapshot antigo permanece
        *guard = Some(Arc::new(next));
        Ok(out)
    }

    // =========================================================================
    //  CONTRATO UNIFORME POR COLEÇÃO
    // =========================================================================

    /// Atribui id novo (`<prefixo>-<uuid>`) e o tenant ativo, anexa à
    /// coleção e devolve a entidade criada.
    pub async fn add<R: Record>(&self, mut entity: R) -> Result<R, AppError> {
        self.mutate(move |snap| {
            entity.set_id(new_id(R::ID_PREFIX));
            entity.set_tenant_id(snap.tenant.id.clone());
            R::collection_mut(snap).push(entity.clone());
            Ok(entity)
        })
        .await
    }

    /// Substitui a entidade de mesmo id. Id ausente é reportado como
    /// `NotFound`; o payload nunca troca o tenant do registro.
    pub async fn update<R: Record>(&self, mut entity: R) -> Result<R, AppError> {
        self.mutate(move |snap| {
            entity.set_tenant_id(snap.tenant.id.clone());
            let slot = R::collection_mut(snap)
                .iter_mut()
                .find(|existing| existing.id() == entity.id())
                .ok_or(AppError::NotFound(R::RESOURCE))?;
            *slot = entity.clone();
            Ok(entity)
        })
        .await
    }

    /// Remove pelo id. Id ausente é um no-op, não um erro.
    pub async fn remove<R: Record>(&self, id: &str) -> Result<(), AppError> {
        let id = id.to_owned();
        self.mutate(move |snap| {
            R::collection_mut(snap).retain(|existing| existing.id() != id);
            Ok(())
        })
        .await
    }

    /// Busca por id no snapshot corrente.
    pub async fn get<R: Record>(&self, id: &str) -> Result<R, AppError> {
        let snapshot = self.snapshot().await?;
        R::collection(&snapshot)
            .iter()
            .find(|existing| existing.id() == id)
            .cloned()
            .ok_or(AppError::NotFound(R::RESOURCE))
    }

    /// Todos os registros da coleção.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, AppError> {
        let snapshot = self.snapshot().await?;
        Ok(R::collection(&snapshot).clone())
    }

    // =========================================================================
    //  OPERAÇÕES COM CONSISTÊNCIA ENTRE COLEÇÕES
    // =========================================================================

    /// Cria um caso e registra o id na lista do cliente dono, na mesma
    /// mutação (uma única troca de snapshot).
    pub async fn add_case(&self, mut case: Case) -> Result<Case, AppError> {
        self.mutate(move |snap| {
            case.id = new_id(Case::ID_PREFIX);
            case.tenant_id = snap.tenant.id.clone();
            if let Some(client) = snap
                .clients
                .iter_mut()
                .find(|client| client.id == case.client_id)
            {
                client.case_ids.push(case.id.clone());
            }
            snap.cases.push(case.clone());
            Ok(case)
        })
        .await
    }

    /// Remove um caso e tira o id da lista do cliente dono.
    pub async fn remove_case(&self, id: &str) -> Result<(), AppError> {
        let id = id.to_owned();
        self.mutate(move |snap| {
            snap.cases.retain(|case| case.id != id);
            for client in &mut snap.clients {
                client.case_ids.retain(|case_id| case_id != &id);
            }
            Ok(())
        })
        .await
    }

    /// Exclusão de cliente com cascata: o cliente e todos os casos,
    /// compromissos e prazos que o referenciam saem juntos, numa única
    /// troca de snapshot. Nenhum estado intermediário é observável.
    pub async fn delete_client_cascade(&self, id: &str) -> Result<(), AppError> {
        let id = id.to_owned();
        self.mutate(move |snap| {
            snap.clients.retain(|client| client.id != id);
            snap.cases.retain(|case| case.client_id != id);
            snap.appointments
                .retain(|apt| apt.client_id.as_deref() != Some(id.as_str()));
            snap.deadlines
                .retain(|deadline| deadline.client_id.as_deref() != Some(id.as_str()));
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{
        agenda::{Appointment, AppointmentKind, AppointmentStatus, Deadline, DeadlineStatus},
        cases::{Case, CaseStatus, ChecklistItem},
        crm::Client,
        tenancy::Tenant,
    };

    fn tenant() -> Tenant {
        Tenant {
            id: "tn-1".into(),
            name: "Silva & Associados".into(),
            brand_color: "#1E3A8A".into(),
        }
    }

    fn client(id: &str) -> Client {
        Client {
            id: id.into(),
            tenant_id: "tn-1".into(),
            name: "João Pereira".into(),
            document: None,
            email: None,
            phone: None,
            notes: None,
            case_ids: vec![],
        }
    }

    fn case(id: &str, client_id: &str) -> Case {
        Case {
            id: id.into(),
            tenant_id: "tn-1".into(),
            title: "Caso".into(),
            client_id: client_id.into(),
            status: CaseStatus::LeadIdentification,
            responsible_ids: vec![],
            due_date: None,
            lead_origin: None,
            lead_notes: None,
            legal_area: None,
            case_value: None,
            urgency: None,
            triage_analysis: None,
            viability: None,
            meeting_date: None,
            meeting_notes: None,
            proposal_fee: None,
            proposal_terms: None,
            document_checklist: None,
            final_opinion: None,
            draft_content: None,
            filing: None,
        }
    }

    fn deadline(id: &str, client_id: Option<&str>) -> Deadline {
        Deadline {
            id: id.into(),
            tenant_id: "tn-1".into(),
            title: "Contestação".into(),
            case_number: None,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: DeadlineStatus::Pendente,
            responsible_id: None,
            client_id: client_id.map(Into::into),
            checklist: vec![ChecklistItem {
                id: "chk-1".into(),
                text: "Juntar procuração".into(),
                completed: false,
            }],
        }
    }

    fn appointment(id: &str, client_id: Option<&str>) -> Appointment {
        Appointment {
            id: id.into(),
            tenant_id: "tn-1".into(),
            title: "Audiência".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            kind: AppointmentKind::Audiencia,
            status: AppointmentStatus::Agendado,
            location: None,
            responsible_ids: vec![],
            client_id: client_id.map(Into::into),
        }
    }

    async fn store_with_fixture() -> TenantStore {
        let mut snapshot = TenantSnapshot::empty(tenant());
        let mut owner = client("cl-1");
        owner.case_ids = vec!["case-1".into(), "case-2".into()];
        snapshot.clients = vec![owner, client("cl-2")];
        snapshot.cases = vec![case("case-1", "cl-1"), case("case-2", "cl-1")];
        snapshot.appointments = vec![
            appointment("apt-1", Some("cl-1")),
            appointment("apt-2", Some("cl-2")),
        ];
        snapshot.deadlines = vec![deadline("dl-1", Some("cl-1")), deadline("dl-2", None)];

        let store = TenantStore::new();
        store.activate(snapshot).await;
        store
    }

    #[tokio::test]
    async fn add_assigns_prefixed_id_and_tenant() {
        let store = store_with_fixture().await;

        let created = store.add(deadline("", None)).await.unwrap();
        assert!(created.id.starts_with("dl-"));
        assert_eq!(created.tenant_id, "tn-1");

        // recuperável pelo id logo em seguida
        let fetched: Deadline = store.get(&created.id).await.unwrap();
        assert_eq!(fetched.title, created.title);
    }

    #[tokio::test]
    async fn added_ids_are_unique_in_collection() {
        let store = store_with_fixture().await;
        let a = store.add(deadline("", None)).await.unwrap();
        let b = store.add(deadline("", None)).await.unwrap();
        assert_ne!(a.id, b.id);

        let all: Vec<Deadline> = store.list().await.unwrap();
        let mut ids: Vec<_> = all.iter().map(|d| d.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[tokio::test]
    async fn update_round_trips_by_id() {
        let store = store_with_fixture().await;
        let mut dl: Deadline = store.get("dl-1").await.unwrap();
        dl.title = "Contestação revisada".into();
        dl.status = DeadlineStatus::Cumprido;

        store.update(dl.clone()).await.unwrap();

        let fetched: Deadline = store.get("dl-1").await.unwrap();
        assert_eq!(fetched.title, "Contestação revisada");
        assert_eq!(fetched.status, DeadlineStatus::Cumprido);
        assert_eq!(fetched.checklist, dl.checklist);
    }

    #[tokio::test]
    async fn update_of_missing_id_reports_not_found() {
        let store = store_with_fixture().await;
        let err = store.update(deadline("dl-inexistente", None)).await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn remove_of_missing_id_is_a_noop() {
        let store = store_with_fixture().await;
        store.remove::<Deadline>("dl-inexistente").await.unwrap();
        let all: Vec<Deadline> = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn client_delete_cascades_to_dependents() {
        let store = store_with_fixture().await;
        store.delete_client_cascade("cl-1").await.unwrap();

        let snapshot = store.snapshot().await.unwrap();
        assert!(!snapshot.clients.iter().any(|c| c.id == "cl-1"));
        // nenhum caso, compromisso ou prazo aponta mais para cl-1
        assert!(!snapshot.cases.iter().any(|c| c.client_id == "cl-1"));
        assert!(
            !snapshot
                .appointments
                .iter()
                .any(|a| a.client_id.as_deref() == Some("cl-1"))
        );
        assert!(
            !snapshot
                .deadlines
                .iter()
                .any(|d| d.client_id.as_deref() == Some("cl-1"))
        );
        // registros de outros clientes ficam intactos
        assert!(snapshot.clients.iter().any(|c| c.id == "cl-2"));
        assert!(snapshot.appointments.iter().any(|a| a.id == "apt-2"));
        assert!(snapshot.deadlines.iter().any(|d| d.id == "dl-2"));
    }

    #[tokio::test]
    async fn add_case_registers_id_on_owning_client() {
        let store = store_with_fixture().await;
        let created = store.add_case(case("", "cl-2")).await.unwrap();

        let owner: Client = store.get("cl-2").await.unwrap();
        assert!(owner.case_ids.contains(&created.id));

        store.remove_case(&created.id).await.unwrap();
        let owner: Client = store.get("cl-2").await.unwrap();
        assert!(!owner.case_ids.contains(&created.id));
    }

    #[tokio::test]
    async fn every_mutation_swaps_snapshot_identity() {
        let store = store_with_fixture().await;
        let before = store.snapshot().await.unwrap();

        // leitura não troca identidade
        let read_again = store.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&before, &read_again));

        store.add(deadline("", None)).await.unwrap();
        let after = store.snapshot().await.unwrap();
        assert!(!Arc::ptr_eq(&before, &after));

        // a mutação que falha não publica snapshot novo
        let mid = store.snapshot().await.unwrap();
        let _ = store.update(deadline("dl-inexistente", None)).await;
        let after_err = store.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&mid, &after_err));
    }

    #[tokio::test]
    async fn operations_without_session_fail() {
        let store = TenantStore::new();
        let err = store.list::<Deadline>().await;
        assert!(matches!(err, Err(AppError::NoActiveSession)));

        let store = store_with_fixture().await;
        store.deactivate().await;
        let err = store.add(deadline("", None)).await;
        assert!(matches!(err, Err(AppError::NoActiveSession)));
    }
}
