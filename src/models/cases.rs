// src/models/cases.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- ENUMS ---

// As etapas do ciclo de vida de um caso, na ordem obrigatória.
// Da identificação do lead até a distribuição o funil é estrito e
// avança uma etapa por vez; depois do protocolo os status são livres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CaseStatus {
    #[serde(rename = "Identificação do Lead")]
    LeadIdentification,
    #[serde(rename = "Qualificação do Caso")]
    Qualification,
    #[serde(rename = "Triagem Jurídica")]
    Triage,
    #[serde(rename = "Reunião com Cliente")]
    ClientMeeting,
    #[serde(rename = "Proposta Comercial")]
    Proposal,
    #[serde(rename = "Coleta de Documentos")]
    DocumentCollection,
    #[serde(rename = "Análise Jurídica Final")]
    FinalAnalysis,
    #[serde(rename = "Elaboração da Peça")]
    Drafting,
    #[serde(rename = "Distribuição/Protocolo")]
    Filing,
    #[serde(rename = "Instrução")]
    Instruction,
    #[serde(rename = "Fase Recursal")]
    Appeals,
    #[serde(rename = "Finalizado")]
    Closed,
}

impl CaseStatus {
    // Ordem fixa das colunas do board e do funil.
    pub const ALL: [CaseStatus; 12] = [
        CaseStatus::LeadIdentification,
        CaseStatus::Qualification,
        CaseStatus::Triage,
        CaseStatus::ClientMeeting,
        CaseStatus::Proposal,
        CaseStatus::DocumentCollection,
        CaseStatus::FinalAnalysis,
        CaseStatus::Drafting,
        CaseStatus::Filing,
        CaseStatus::Instruction,
        CaseStatus::Appeals,
        CaseStatus::Closed,
    ];

    /// Posição na sequência completa (0 = Identificação do Lead).
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .expect("todo status está em ALL")
    }

    /// Próxima etapa do funil. A submissão da Distribuição desemboca
    /// na Instrução; dali em diante só o board reatribui status.
    pub fn next(&self) -> Option<CaseStatus> {
        match self {
            CaseStatus::Instruction | CaseStatus::Appeals | CaseStatus::Closed => None,
            _ => Self::ALL.get(self.position() + 1).copied(),
        }
    }

    /// Distribuição/Protocolo ou posterior.
    pub fn is_filed(&self) -> bool {
        self.position() >= CaseStatus::Filing.position()
    }

    /// Casos finalizados saem dos agregados "ativos", mas permanecem
    /// no acervo.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseStatus::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LegalArea {
    #[serde(rename = "Cível")]
    Civel,
    Trabalhista,
    Criminal,
    #[serde(rename = "Tributário")]
    Tributario,
    #[serde(rename = "Previdenciário")]
    Previdenciario,
    #[serde(rename = "Família")]
    Familia,
    Consumidor,
}

impl LegalArea {
    pub const ALL: [LegalArea; 7] = [
        LegalArea::Civel,
        LegalArea::Trabalhista,
        LegalArea::Criminal,
        LegalArea::Tributario,
        LegalArea::Previdenciario,
        LegalArea::Familia,
        LegalArea::Consumidor,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Urgency {
    Baixa,
    #[serde(rename = "Média")]
    Media,
    Alta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Viability {
    #[serde(rename = "Viável")]
    Viavel,
    #[serde(rename = "Parcialmente Viável")]
    ParcialmenteViavel,
    #[serde(rename = "Inviável")]
    Inviavel,
}

// Item de checklist, usado tanto nos prazos quanto na etapa de
// coleta de documentos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[schema(example = "chk-1")]
    pub id: String,
    #[schema(example = "Procuração assinada")]
    pub text: String,
    pub completed: bool,
}

// Registro da distribuição em juízo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilingRecord {
    #[schema(example = "0001234-56.2024.5.02.0001")]
    pub protocol_number: String,
    #[schema(example = "2ª Vara do Trabalho de São Paulo")]
    pub court: String,
    #[schema(value_type = String, format = Date, example = "2024-05-10")]
    pub filed_at: NaiveDate,
}

// --- CASO ---

// O caso jurídico. Os campos opcionais do bloco "etapas" vão sendo
// preenchidos conforme o caso avança no funil; nenhum é apagado ao
// seguir adiante.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    #[schema(example = "case-trabalhista")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    #[schema(example = "Reclamatória trabalhista - João Pereira")]
    pub title: String,

    #[schema(example = "cl-joao")]
    pub client_id: String,

    pub status: CaseStatus,

    // Advogados responsáveis; precisam existir no mesmo tenant
    #[serde(default)]
    pub responsible_ids: Vec<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-08-01")]
    pub due_date: Option<NaiveDate>,

    // --- Etapas ---
    #[schema(example = "Indicação")]
    pub lead_origin: Option<String>,
    pub lead_notes: Option<String>,

    pub legal_area: Option<LegalArea>,
    #[schema(value_type = Option<f64>, example = 25000.0)]
    pub case_value: Option<Decimal>,
    pub urgency: Option<Urgency>,

    pub triage_analysis: Option<String>,
    pub viability: Option<Viability>,

    #[schema(value_type = Option<String>, format = Date)]
    pub meeting_date: Option<NaiveDate>,
    pub meeting_notes: Option<String>,

    #[schema(value_type = Option<f64>, example = 5000.0)]
    pub proposal_fee: Option<Decimal>,
    pub proposal_terms: Option<String>,

    pub document_checklist: Option<Vec<ChecklistItem>>,

    pub final_opinion: Option<String>,
    pub draft_content: Option<String>,

    pub filing: Option<FilingRecord>,
}

// --- SUBMISSÃO DE ETAPA ---

// O payload que conclui a etapa atual do caso. Cada variante carrega
// exatamente os dados exigidos pela etapa que encerra; o merge no
// caso e a troca de status acontecem no serviço de ciclo de vida.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum StageSubmission {
    #[serde(rename_all = "camelCase")]
    Lead {
        origin: String,
        notes: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Qualification {
        legal_area: LegalArea,
        case_value: Decimal,
        urgency: Urgency,
    },
    #[serde(rename_all = "camelCase")]
    Triage {
        analysis: String,
        viability: Viability,
    },
    #[serde(rename_all = "camelCase")]
    Meeting { date: NaiveDate, notes: String },
    #[serde(rename_all = "camelCase")]
    Proposal { fee: Decimal, terms: String },
    #[serde(rename_all = "camelCase")]
    Documents { checklist: Vec<ChecklistItem> },
    #[serde(rename_all = "camelCase")]
    FinalAnalysis { opinion: String },
    #[serde(rename_all = "camelCase")]
    Draft { content: String },
    #[serde(rename_all = "camelCase")]
    Filing {
        protocol_number: String,
        court: String,
        filed_at: NaiveDate,
    },
}

impl StageSubmission {
    /// A etapa que esta submissão conclui.
    pub fn stage(&self) -> CaseStatus {
        match self {
            StageSubmission::Lead { .. } => CaseStatus::LeadIdentification,
            StageSubmission::Qualification { .. } => CaseStatus::Qualification,
            StageSubmission::Triage { .. } => CaseStatus::Triage,
            StageSubmission::Meeting { .. } => CaseStatus::ClientMeeting,
            StageSubmission::Proposal { .. } => CaseStatus::Proposal,
            StageSubmission::Documents { .. } => CaseStatus::DocumentCollection,
            StageSubmission::FinalAnalysis { .. } => CaseStatus::FinalAnalysis,
            StageSubmission::Draft { .. } => CaseStatus::Drafting,
            StageSubmission::Filing { .. } => CaseStatus::Filing,
        }
    }
}

// Coluna do board, na ordem de CaseStatus::ALL.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub status: CaseStatus,
    pub cases: Vec<Case>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_strict() {
        assert_eq!(
            CaseStatus::LeadIdentification.next(),
            Some(CaseStatus::Qualification)
        );
        assert_eq!(CaseStatus::Drafting.next(), Some(CaseStatus::Filing));
        // o protocolo desemboca na Instrução; depois disso o funil acaba
        assert_eq!(CaseStatus::Filing.next(), Some(CaseStatus::Instruction));
        assert_eq!(CaseStatus::Instruction.next(), None);
        assert_eq!(CaseStatus::Closed.next(), None);
    }

    #[test]
    fn filed_statuses() {
        assert!(!CaseStatus::Drafting.is_filed());
        assert!(CaseStatus::Filing.is_filed());
        assert!(CaseStatus::Instruction.is_filed());
        assert!(CaseStatus::Closed.is_filed());
    }

    #[test]
    fn status_labels_in_portuguese() {
        let json = serde_json::to_string(&CaseStatus::Triage).unwrap();
        assert_eq!(json, "\"Triagem Jurídica\"");
        let back: CaseStatus = serde_json::from_str("\"Finalizado\"").unwrap();
        assert_eq!(back, CaseStatus::Closed);
    }

    #[test]
    fn submission_maps_to_its_stage() {
        let sub = StageSubmission::Triage {
            analysis: "risco baixo".into(),
            viability: Viability::Viavel,
        };
        assert_eq!(sub.stage(), CaseStatus::Triage);
    }
}
