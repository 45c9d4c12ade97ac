// src/store/seed.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::{
    models::{
        agenda::{Appointment, AppointmentKind, AppointmentStatus, Deadline, DeadlineStatus},
        auth::{Role, User},
        cases::{
            Case, CaseStatus, ChecklistItem, FilingRecord, LegalArea, Urgency, Viability,
        },
        crm::Client,
        finance::{
            FinancialTransaction, Refund, RefundStatus, TimeEntry, TimeEntryStatus,
            TransactionKind, TransactionStatus,
        },
        tenancy::Tenant,
    },
    store::directory::Directory,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("data fixa do seed válida")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("hora fixa do seed válida")
}

fn item(id: &str, text: &str, completed: bool) -> ChecklistItem {
    ChecklistItem {
        id: id.into(),
        text: text.into(),
        completed,
    }
}

/// Diretório de demonstração carregado na subida do servidor, no lugar
/// das migrações de banco. Dois escritórios, um usuário por perfil e
/// dados suficientes para calendário, board e painel renderizarem algo.
pub fn demo_directory() -> anyhow::Result<Directory> {
    // mesma senha de demonstração para todos os usuários
    let password_hash = bcrypt::hash("senha123", bcrypt::DEFAULT_COST)?;

    let user = |id: &str, tenant: Option<&str>, name: &str, email: &str, role: Role| User {
        id: id.into(),
        tenant_id: tenant.map(Into::into),
        name: name.into(),
        email: email.into(),
        password_hash: password_hash.clone(),
        role,
    };

    let empty_case = |id: &str, client_id: &str, title: &str| Case {
        id: id.into(),
        tenant_id: "tn-silva".into(),
        title: title.into(),
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
    };

    // Caso maduro: percorreu o funil inteiro e hoje está em instrução.
    let mut reclamatoria = empty_case(
        "case-reclamatoria",
        "cl-joao",
        "Reclamatória trabalhista - João Pereira",
    );
    reclamatoria.status = CaseStatus::Instruction;
    reclamatoria.responsible_ids = vec!["user-rafael".into()];
    reclamatoria.due_date = Some(date(2024, 8, 1));
    reclamatoria.lead_origin = Some("Indicação".into());
    reclamatoria.lead_notes = Some("Indicado pela cliente Ana Beatriz".into());
    reclamatoria.legal_area = Some(LegalArea::Trabalhista);
    reclamatoria.case_value = Some(Decimal::from(25_000));
    reclamatoria.urgency = Some(Urgency::Alta);
    reclamatoria.triage_analysis =
        Some("Vínculo comprovado por testemunhas; verbas rescisórias em aberto.".into());
    reclamatoria.viability = Some(Viability::Viavel);
    reclamatoria.meeting_date = Some(date(2024, 3, 12));
    reclamatoria.meeting_notes = Some("Cliente confirmou documentos e testemunhas.".into());
    reclamatoria.proposal_fee = Some(Decimal::from(5_000));
    reclamatoria.proposal_terms = Some("30% de êxito + honorários fixos".into());
    reclamatoria.document_checklist = Some(vec![
        item("chk-ctps", "CTPS digitalizada", true),
        item("chk-procuracao", "Procuração assinada", true),
        item("chk-holerites", "Holerites dos últimos 12 meses", true),
    ]);
    reclamatoria.final_opinion =
        Some("Pedidos líquidos; risco baixo de sucumbência relevante.".into());
    reclamatoria.draft_content = Some("Petição inicial com pedidos de horas extras...".into());
    reclamatoria.filing = Some(FilingRecord {
        protocol_number: "0001234-56.2024.5.02.0001".into(),
        court: "2ª Vara do Trabalho de São Paulo".into(),
        filed_at: date(2024, 5, 10),
    });

    // Caso recém-entrado, ainda em qualificação.
    let mut rescisao = empty_case("case-rescisao", "cl-joao", "Rescisão indireta - João Pereira");
    rescisao.status = CaseStatus::Qualification;
    rescisao.responsible_ids = vec!["user-rafael".into()];
    rescisao.lead_origin = Some("Site".into());

    // Caso no meio do funil, com checklist em aberto.
    let mut aposentadoria = empty_case(
        "case-aposentadoria",
        "cl-ana",
        "Aposentadoria especial - Ana Beatriz",
    );
    aposentadoria.status = CaseStatus::DocumentCollection;
    aposentadoria.responsible_ids = vec!["user-rafael".into()];
    aposentadoria.legal_area = Some(LegalArea::Previdenciario);
    aposentadoria.case_value = Some(Decimal::from(48_000));
    aposentadoria.urgency = Some(Urgency::Media);
    aposentadoria.triage_analysis = Some("PPP indica agente nocivo contínuo.".into());
    aposentadoria.viability = Some(Viability::ParcialmenteViavel);
    aposentadoria.meeting_date = Some(date(2024, 4, 2));
    aposentadoria.meeting_notes = Some("Solicitados CNIS e PPP atualizados.".into());
    aposentadoria.proposal_fee = Some(Decimal::from(3_500));
    aposentadoria.proposal_terms = Some("Honorários fixos em 4 parcelas".into());
    aposentadoria.document_checklist = Some(vec![
        item("chk-cnis", "CNIS atualizado", true),
        item("chk-ppp", "PPP da última empresa", false),
    ]);

    // Escritório menor, para o isolamento entre tenants aparecer.
    let mut inventario = empty_case("case-inventario", "cl-marcia", "Inventário - Márcia Duarte");
    inventario.tenant_id = "tn-almeida".into();
    inventario.status = CaseStatus::Triage;
    inventario.responsible_ids = vec!["user-marcos".into()];
    inventario.lead_origin = Some("Telefone".into());
    inventario.legal_area = Some(LegalArea::Familia);
    inventario.case_value = Some(Decimal::from(120_000));
    inventario.urgency = Some(Urgency::Baixa);

    Ok(Directory {
        tenants: vec![
            Tenant {
                id: "tn-silva".into(),
                name: "Silva & Associados".into(),
                brand_color: "#1E3A8A".into(),
            },
            Tenant {
                id: "tn-almeida".into(),
                name: "Almeida Advocacia".into(),
                brand_color: "#065F46".into(),
            },
        ],
        users: vec![
            user(
                "user-helena",
                Some("tn-silva"),
                "Dra. Helena Silva",
                "master@silva.adv.br",
                Role::Master,
            ),
            user(
                "user-rafael",
                Some("tn-silva"),
                "Dr. Rafael Costa",
                "advogado@silva.adv.br",
                Role::Advogado,
            ),
            user(
                "user-livia",
                Some("tn-silva"),
                "Lívia Ramos",
                "financeiro@silva.adv.br",
                Role::Financeiro,
            ),
            user(
                "user-marcos",
                Some("tn-almeida"),
                "Dr. Marcos Almeida",
                "master@almeida.adv.br",
                Role::Master,
            ),
            user(
                "user-admin",
                None,
                "Admin da Plataforma",
                "admin@jusgestor.com.br",
                Role::SuperAdmin,
            ),
        ],
        clients: vec![
            Client {
                id: "cl-joao".into(),
                tenant_id: "tn-silva".into(),
                name: "João Pereira".into(),
                document: Some("12345678900".into()),
                email: Some("joao@email.com".into()),
                phone: Some("+55 11 98888-7777".into()),
                notes: Some("Prefere contato por WhatsApp.".into()),
                case_ids: vec!["case-reclamatoria".into(), "case-rescisao".into()],
            },
            Client {
                id: "cl-ana".into(),
                tenant_id: "tn-silva".into(),
                name: "Ana Beatriz Souza".into(),
                document: Some("98765432100".into()),
                email: Some("ana@email.com".into()),
                phone: None,
                notes: None,
                case_ids: vec!["case-aposentadoria".into()],
            },
            Client {
                id: "cl-marcia".into(),
                tenant_id: "tn-almeida".into(),
                name: "Márcia Duarte".into(),
                document: None,
                email: None,
                phone: None,
                notes: None,
                case_ids: vec!["case-inventario".into()],
            },
        ],
        cases: vec![reclamatoria, rescisao, aposentadoria, inventario],
        appointments: vec![
            Appointment {
                id: "apt-audiencia".into(),
                tenant_id: "tn-silva".into(),
                title: "Audiência de instrução".into(),
                date: date(2024, 6, 1),
                time: time(10, 0),
                kind: AppointmentKind::Audiencia,
                status: AppointmentStatus::Confirmado,
                location: Some("Fórum Trabalhista - Sala 3".into()),
                responsible_ids: vec!["user-rafael".into()],
                client_id: Some("cl-joao".into()),
            },
            Appointment {
                id: "apt-reuniao".into(),
                tenant_id: "tn-silva".into(),
                title: "Reunião de alinhamento".into(),
                date: date(2024, 6, 3),
                time: time(14, 30),
                kind: AppointmentKind::Reuniao,
                status: AppointmentStatus::Agendado,
                location: Some("Escritório".into()),
                responsible_ids: vec!["user-helena".into()],
                client_id: Some("cl-ana".into()),
            },
        ],
        deadlines: vec![
            Deadline {
                id: "dl-contestacao".into(),
                tenant_id: "tn-silva".into(),
                title: "Contestação".into(),
                case_number: Some("0001234-56.2024.5.02.0001".into()),
                due_date: date(2024, 6, 1),
                status: DeadlineStatus::Pendente,
                responsible_id: Some("user-rafael".into()),
                client_id: Some("cl-joao".into()),
                checklist: vec![
                    item("chk-jurisprudencia", "Levantar jurisprudência", true),
                    item("chk-minuta", "Revisar minuta", false),
                ],
            },
            Deadline {
                id: "dl-recurso".into(),
                tenant_id: "tn-silva".into(),
                title: "Recurso administrativo INSS".into(),
                case_number: None,
                due_date: date(2024, 6, 10),
                status: DeadlineStatus::Pendente,
                responsible_id: Some("user-rafael".into()),
                client_id: Some("cl-ana".into()),
                checklist: vec![],
            },
        ],
        time_entries: vec![
            TimeEntry {
                id: "te-1".into(),
                tenant_id: "tn-silva".into(),
                user_id: "user-rafael".into(),
                client_id: "cl-joao".into(),
                case_id: "case-reclamatoria".into(),
                date: date(2024, 5, 20),
                hours: Decimal::new(25, 1), // 2.5h
                description: "Elaboração da petição inicial".into(),
                status: TimeEntryStatus::Pendente,
            },
            TimeEntry {
                id: "te-2".into(),
                tenant_id: "tn-silva".into(),
                user_id: "user-rafael".into(),
                client_id: "cl-ana".into(),
                case_id: "case-aposentadoria".into(),
                date: date(2024, 5, 22),
                hours: Decimal::from(3),
                description: "Análise do CNIS".into(),
                status: TimeEntryStatus::Faturado,
            },
        ],
        transactions: vec![
            FinancialTransaction {
                id: "fin-honorarios".into(),
                tenant_id: "tn-silva".into(),
                kind: TransactionKind::Receita,
                description: "Honorários - contrato João Pereira".into(),
                amount: Decimal::from(5_000),
                date: date(2024, 5, 15),
                user_id: "user-livia".into(),
                status: TransactionStatus::Liquidado,
                approver_id: Some("user-helena".into()),
            },
            FinancialTransaction {
                id: "fin-custas".into(),
                tenant_id: "tn-silva".into(),
                kind: TransactionKind::Despesa,
                description: "Custas de distribuição".into(),
                amount: Decimal::from(450),
                date: date(2024, 5, 10),
                user_id: "user-livia".into(),
                status: TransactionStatus::Pendente,
                approver_id: None,
            },
        ],
        refunds: vec![Refund {
            id: "ref-deslocamento".into(),
            tenant_id: "tn-silva".into(),
            requester_id: "user-rafael".into(),
            description: "Deslocamento para audiência".into(),
            amount: Decimal::from(180),
            date: date(2024, 5, 18),
            status: RefundStatus::Pendente,
            approver_id: None,
            client_id: Some("cl-joao".into()),
            case_id: Some("case-reclamatoria".into()),
        }],
    })
}
