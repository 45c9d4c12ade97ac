// src/store/snapshot.rs

use crate::models::{
    agenda::{Appointment, Deadline},
    auth::User,
    cases::Case,
    crm::Client,
    finance::{FinancialTransaction, Refund, TimeEntry},
    tenancy::Tenant,
};

// O snapshot do tenant ativo: todas as coleções do escritório em
// memória. Cada mutação do store clona o snapshot, aplica a operação
// inteira no clone e troca o Arc — nunca edita este valor no lugar.
#[derive(Debug, Clone)]
pub struct TenantSnapshot {
    pub tenant: Tenant,
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub cases: Vec<Case>,
    pub appointments: Vec<Appointment>,
    pub deadlines: Vec<Deadline>,
    pub time_entries: Vec<TimeEntry>,
    pub transactions: Vec<FinancialTransaction>,
    pub refunds: Vec<Refund>,
}

impl TenantSnapshot {
    pub fn empty(tenant: Tenant) -> Self {
        Self {
            tenant,
            users: Vec::new(),
            clients: Vec::new(),
            cases: Vec::new(),
            appointments: Vec::new(),
            deadlines: Vec::new(),
            time_entries: Vec::new(),
            transactions: Vec::new(),
            refunds: Vec::new(),
        }
    }
}

// Contrato uniforme das coleções mutáveis: toda coleção expõe o mesmo
// add/update/remove no TenantStore através desta trait.
pub trait Record: Clone + Send + Sync + 'static {
    /// Prefixo do id gerado (ex: "dl" para prazos -> `dl-...`).
    const ID_PREFIX: &'static str;
    /// Nome do recurso em mensagens de erro.
    const RESOURCE: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn set_tenant_id(&mut self, tenant_id: String);
    fn collection(snapshot: &TenantSnapshot) -> &Vec<Self>;
    fn collection_mut(snapshot: &mut TenantSnapshot) -> &mut Vec<Self>;
}

macro_rules! impl_record {
    ($entity:ty, $prefix:literal, $resource:literal, $field:ident) => {
        impl Record for $entity {
            const ID_PREFIX: &'static str = $prefix;
            const RESOURCE: &'static str = $resource;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn set_tenant_id(&mut self, tenant_id: String) {
                self.tenant_id = tenant_id;
            }

            fn collection(snapshot: &TenantSnapshot) -> &Vec<Self> {
                &snapshot.$field
            }

            fn collection_mut(snapshot: &mut TenantSnapshot) -> &mut Vec<Self> {
                &mut snapshot.$field
            }
        }
    };
}

impl_record!(Client, "cl", "cliente", clients);
impl_record!(Case, "case", "caso", cases);
impl_record!(Appointment, "apt", "compromisso", appointments);
impl_record!(Deadline, "dl", "prazo", deadlines);
impl_record!(TimeEntry, "te", "lançamento de horas", time_entries);
impl_record!(FinancialTransaction, "fin", "transação", transactions);
impl_record!(Refund, "ref", "reembolso", refunds);
