// src/services/agenda_service.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::agenda::{Appointment, CalendarDay, CalendarEvent, Deadline},
    store::{TenantSnapshot, TenantStore},
};

// Visão derivada: compromissos e prazos fundidos em um calendário
// único. Função pura sobre o snapshot — duas chamadas com o mesmo
// snapshot produzem exatamente a mesma saída.
pub fn build_calendar(snapshot: &TenantSnapshot) -> Vec<CalendarDay> {
    let mut buckets: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();

    for apt in &snapshot.appointments {
        buckets
            .entry(apt.date)
            .or_default()
            .push(CalendarEvent::Appointment {
                id: apt.id.clone(),
                title: apt.title.clone(),
                time: apt.time,
                appointment_kind: apt.kind,
                status: apt.status,
                location: apt.location.clone(),
                client_id: apt.client_id.clone(),
            });
    }

    for deadline in &snapshot.deadlines {
        buckets
            .entry(deadline.due_date)
            .or_default()
            .push(CalendarEvent::Deadline {
                id: deadline.id.clone(),
                title: deadline.title.clone(),
                status: deadline.status,
                case_number: deadline.case_number.clone(),
                client_id: deadline.client_id.clone(),
            });
    }

    buckets
        .into_iter()
        .map(|(date, mut events)| {
            // prazos entram no fim do dia (sentinela 23:59)
            events.sort_by_key(CalendarEvent::sort_time);
            CalendarDay { date, events }
        })
        .collect()
}

#[derive(Clone)]
pub struct AgendaService {
    store: TenantStore,
}

impl AgendaService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    // --- COMPROMISSOS ---

    pub async fn create_appointment(&self, apt: Appointment) -> Result<Appointment, AppError> {
        self.store.add(apt).await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError> {
        self.store.list().await
    }

    pub async fn update_appointment(&self, apt: Appointment) -> Result<Appointment, AppError> {
        self.store.update(apt).await
    }

    pub async fn delete_appointment(&self, id: &str) -> Result<(), AppError> {
        self.store.remove::<Appointment>(id).await
    }

    // --- PRAZOS ---

    pub async fn create_deadline(&self, deadline: Deadline) -> Result<Deadline, AppError> {
        self.store.add(deadline).await
    }

    pub async fn list_deadlines(&self) -> Result<Vec<Deadline>, AppError> {
        self.store.list().await
    }

    pub async fn update_deadline(&self, deadline: Deadline) -> Result<Deadline, AppError> {
        self.store.update(deadline).await
    }

    pub async fn delete_deadline(&self, id: &str) -> Result<(), AppError> {
        self.store.remove::<Deadline>(id).await
    }

    /// Inverte a conclusão de um item do checklist do prazo.
    pub async fn toggle_checklist_item(
        &self,
        deadline_id: &str,
        item_id: &str,
    ) -> Result<Deadline, AppError> {
        let deadline_id = deadline_id.to_owned();
        let item_id = item_id.to_owned();
        self.store
            .mutate(move |snap| {
                let deadline = snap
                    .deadlines
                    .iter_mut()
                    .find(|d| d.id == deadline_id)
                    .ok_or(AppError::NotFound("prazo"))?;
                let item = deadline
                    .checklist
                    .iter_mut()
                    .find(|item| item.id == item_id)
                    .ok_or(AppError::NotFound("item do checklist"))?;
                item.completed = !item.completed;
                Ok(deadline.clone())
            })
            .await
    }

    // --- CALENDÁRIO ---

    pub async fn calendar(&self) -> Result<Vec<CalendarDay>, AppError> {
        let snapshot = self.store.snapshot().await?;
        Ok(build_calendar(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::{
        models::{
            agenda::{AppointmentKind, AppointmentStatus, DeadlineStatus},
            tenancy::Tenant,
        },
        store::TenantSnapshot,
    };

    fn snapshot() -> TenantSnapshot {
        let mut snap = TenantSnapshot::empty(Tenant {
            id: "tn-1".into(),
            name: "Teste".into(),
            brand_color: "#000000".into(),
        });
        snap.appointments = vec![
            Appointment {
                id: "apt-1".into(),
                tenant_id: "tn-1".into(),
                title: "Audiência".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                kind: AppointmentKind::Audiencia,
                status: AppointmentStatus::Agendado,
                location: None,
                responsible_ids: vec![],
                client_id: None,
            },
            Appointment {
                id: "apt-2".into(),
                tenant_id: "tn-1".into(),
                title: "Reunião tarde".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                kind: AppointmentKind::Reuniao,
                status: AppointmentStatus::Agendado,
                location: None,
                responsible_ids: vec![],
                client_id: None,
            },
        ];
        snap.deadlines = vec![Deadline {
            id: "dl-1".into(),
            tenant_id: "tn-1".into(),
            title: "Contestação".into(),
            case_number: None,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: DeadlineStatus::Pendente,
            responsible_id: None,
            client_id: None,
            checklist: vec![],
        }];
        snap
    }

    #[test]
    fn merges_both_sources_into_date_buckets() {
        let calendar = build_calendar(&snapshot());

        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(calendar[0].events.len(), 2);
        assert_eq!(calendar[1].events.len(), 1);
    }

    #[test]
    fn deadline_sorts_after_timed_appointment_in_same_day() {
        let calendar = build_calendar(&snapshot());
        let day = &calendar[0];

        // compromisso das 10:00 primeiro, prazo (23:59) por último
        assert!(matches!(day.events[0], CalendarEvent::Appointment { .. }));
        assert!(matches!(day.events[1], CalendarEvent::Deadline { .. }));
    }

    #[test]
    fn builder_is_pure() {
        let snap = snapshot();
        let a = build_calendar(&snap);
        let b = build_calendar(&snap);
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }

    #[tokio::test]
    async fn toggle_flips_one_checklist_item() {
        use crate::models::cases::ChecklistItem;

        let mut snap = snapshot();
        snap.deadlines[0].checklist = vec![
            ChecklistItem {
                id: "chk-1".into(),
                text: "Levantar jurisprudência".into(),
                completed: false,
            },
            ChecklistItem {
                id: "chk-2".into(),
                text: "Revisar minuta".into(),
                completed: false,
            },
        ];
        let store = TenantStore::new();
        store.activate(snap).await;
        let svc = AgendaService::new(store);

        let updated = svc.toggle_checklist_item("dl-1", "chk-1").await.unwrap();
        assert!(updated.checklist[0].completed);
        assert!(!updated.checklist[1].completed);

        let err = svc.toggle_checklist_item("dl-1", "chk-nada").await;
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }
}
