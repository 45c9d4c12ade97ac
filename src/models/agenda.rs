// src/models/agenda.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::cases::ChecklistItem;

// Horários trafegam como "HH:mm" (24h), o formato que o frontend usa.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentKind {
    #[serde(rename = "Reunião")]
    Reuniao,
    #[serde(rename = "Audiência")]
    Audiencia,
    #[serde(rename = "Visita ao Cliente")]
    VisitaCliente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    Agendado,
    Confirmado,
    Realizado,
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DeadlineStatus {
    Pendente,
    Cumprido,
}

// --- COMPROMISSO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[schema(example = "apt-audiencia")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    #[schema(example = "Audiência de instrução")]
    pub title: String,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,

    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub time: NaiveTime,

    pub kind: AppointmentKind,
    pub status: AppointmentStatus,

    #[schema(example = "Fórum Trabalhista - Sala 3")]
    pub location: Option<String>,

    #[serde(default)]
    pub responsible_ids: Vec<String>,

    pub client_id: Option<String>,
}

// --- PRAZO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    #[schema(example = "dl-contestacao")]
    pub id: String,

    #[serde(default)]
    #[schema(ignore)]
    pub tenant_id: String,

    #[schema(example = "Contestação")]
    pub title: String,

    // Número do processo, texto livre
    #[schema(example = "0001234-56.2024.5.02.0001")]
    pub case_number: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub due_date: NaiveDate,

    pub status: DeadlineStatus,

    pub responsible_id: Option<String>,
    pub client_id: Option<String>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

// --- CALENDÁRIO ---

// O evento unificado do calendário: compromissos e prazos viram uma
// única lista, discriminada pelo campo `kind` e ordenada por horário
// dentro de cada dia.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalendarEvent {
    #[serde(rename_all = "camelCase")]
    Appointment {
        id: String,
        title: String,
        #[serde(with = "hhmm")]
        #[schema(value_type = String, example = "10:00")]
        time: NaiveTime,
        appointment_kind: AppointmentKind,
        status: AppointmentStatus,
        location: Option<String>,
        client_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Deadline {
        id: String,
        title: String,
        status: DeadlineStatus,
        case_number: Option<String>,
        client_id: Option<String>,
    },
}

impl CalendarEvent {
    /// Horário usado na ordenação do dia. Prazos não têm hora própria
    /// e entram no fim do dia, depois de qualquer compromisso marcado.
    pub fn sort_time(&self) -> NaiveTime {
        match self {
            CalendarEvent::Appointment { time, .. } => *time,
            CalendarEvent::Deadline { .. } => deadline_sentinel(),
        }
    }
}

/// 23:59, o horário-sentinela dos prazos no calendário.
pub fn deadline_sentinel() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("hora fixa válida")
}

// Um dia do calendário com seus eventos já ordenados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_time_serializes_as_hhmm() {
        let apt = Appointment {
            id: "apt-1".into(),
            tenant_id: "tn-1".into(),
            title: "Reunião".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            kind: AppointmentKind::Reuniao,
            status: AppointmentStatus::Agendado,
            location: None,
            responsible_ids: vec![],
            client_id: None,
        };
        let json = serde_json::to_value(&apt).unwrap();
        assert_eq!(json["time"], "14:30");
        assert_eq!(json["date"], "2024-06-01");
    }

    #[test]
    fn calendar_event_is_tagged_by_kind() {
        let event = CalendarEvent::Deadline {
            id: "dl-1".into(),
            title: "Contestação".into(),
            status: DeadlineStatus::Pendente,
            case_number: None,
            client_id: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "deadline");
    }

    #[test]
    fn deadline_sorts_after_timed_appointments() {
        let event = CalendarEvent::Deadline {
            id: "dl-1".into(),
            title: "Prazo".into(),
            status: DeadlineStatus::Pendente,
            case_number: None,
            client_id: None,
        };
        assert!(event.sort_time() > NaiveTime::from_hms_opt(22, 0, 0).unwrap());
    }
}
