// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TimeEntryStatus {
    Pendente, // Ainda não faturado
    Faturado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TransactionKind {
    Receita,
    Despesa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TransactionStatus {
    Pendente,
    Aprovado,
    Liquidado,
    Rejeitado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RefundStatus {
    Pendente,
    Aprovado,
    Rejeitado,
    Pago,
}

// --- Structs ---

// Lançamento de horas trabalhadas em um caso.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    #[schema(example = "te-1")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    pub user_id: String,
    pub client_id: String,
    pub case_id: String,

    #[schema(value_type = String, format = Date, example = "2024-05-20")]
    pub date: NaiveDate,

    #[schema(value_type = f64, example = 2.5)]
    pub hours: Decimal,

    #[schema(example = "Elaboração da petição inicial")]
    pub description: String,

    pub status: TimeEntryStatus,
}

// Transação financeira do escritório, com fluxo de aprovação:
// Pendente -> Aprovado -> Liquidado, ou Pendente -> Rejeitado.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransaction {
    #[schema(example = "fin-1")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    pub kind: TransactionKind,

    #[schema(example = "Honorários - contrato João Pereira")]
    pub description: String,

    #[schema(value_type = f64, example = 5000.0)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-05-15")]
    pub date: NaiveDate,

    // Quem lançou a transação
    pub user_id: String,

    pub status: TransactionStatus,

    // Preenchido pela aprovação/rejeição
    pub approver_id: Option<String>,
}

// Pedido de reembolso de um membro do escritório.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[schema(example = "ref-1")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    pub requester_id: String,

    #[schema(example = "Deslocamento para audiência")]
    pub description: String,

    #[schema(value_type = f64, example = 180.0)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-05-18")]
    pub date: NaiveDate,

    pub status: RefundStatus,

    pub approver_id: Option<String>,
    pub client_id: Option<String>,
    pub case_id: Option<String>,
}
