// src/services/lifecycle.rs
//
// A máquina de estados do ciclo de vida do caso. TODA troca de status
// passa por aqui: o formulário de etapa chama `advance`, o board chama
// `reassign`. Nenhum outro ponto do sistema escreve em `case.status`.

use crate::{
    common::error::AppError,
    models::cases::{Case, CaseStatus, FilingRecord, StageSubmission},
};

/// Conclui a etapa atual do caso com o payload que ela exige e avança
/// exatamente uma etapa no funil. A submissão precisa corresponder ao
/// status corrente; etapas não são puláveis nem reversíveis por aqui.
pub fn advance(case: &Case, submission: StageSubmission) -> Result<Case, AppError> {
    if submission.stage() != case.status {
        return Err(AppError::StageOutOfOrder);
    }

    // Nenhuma submissão corresponde a um status pós-protocolo; a checagem
    // acima garante que ainda estamos no funil.
    let next = case.status.next().ok_or(AppError::ForbiddenTransition)?;

    let mut updated = case.clone();
    merge(&mut updated, submission)?;
    updated.status = next;
    Ok(updated)
}

/// Reatribuição direta de status vinda do board. Válida somente no
/// território pós-protocolo: origem e destino precisam ser
/// Distribuição/Protocolo ou posteriores. `from == to` é ignorado em
/// silêncio (`None` = nada a aplicar).
pub fn reassign(
    case: &Case,
    from: CaseStatus,
    to: CaseStatus,
) -> Result<Option<Case>, AppError> {
    if from == to {
        return Ok(None);
    }
    // arrasto sobre um board desatualizado
    if case.status != from {
        return Err(AppError::StageOutOfOrder);
    }
    if !from.is_filed() || !to.is_filed() {
        return Err(AppError::ForbiddenTransition);
    }

    let mut updated = case.clone();
    updated.status = to;
    Ok(Some(updated))
}

// Funde o payload da etapa no caso. Os campos de etapas anteriores
// nunca são apagados.
fn merge(case: &mut Case, submission: StageSubmission) -> Result<(), AppError> {
    match submission {
        StageSubmission::Lead { origin, notes } => {
            case.lead_origin = Some(origin);
            case.lead_notes = notes;
        }
        StageSubmission::Qualification {
            legal_area,
            case_value,
            urgency,
        } => {
            case.legal_area = Some(legal_area);
            case.case_value = Some(case_value);
            case.urgency = Some(urgency);
        }
        StageSubmission::Triage {
            analysis,
            viability,
        } => {
            case.triage_analysis = Some(analysis);
            case.viability = Some(viability);
        }
        StageSubmission::Meeting { date, notes } => {
            case.meeting_date = Some(date);
            case.meeting_notes = Some(notes);
        }
        StageSubmission::Proposal { fee, terms } => {
            case.proposal_fee = Some(fee);
            case.proposal_terms = Some(terms);
        }
        StageSubmission::Documents { checklist } => {
            // A coleta só encerra com todos os documentos marcados.
            if checklist.is_empty() || checklist.iter().any(|item| !item.completed) {
                return Err(AppError::ChecklistIncomplete);
            }
            case.document_checklist = Some(checklist);
        }
        StageSubmission::FinalAnalysis { opinion } => {
            case.final_opinion = Some(opinion);
        }
        StageSubmission::Draft { content } => {
            case.draft_content = Some(content);
        }
        StageSubmission::Filing {
            protocol_number,
            court,
            filed_at,
        } => {
            case.filing = Some(FilingRecord {
                protocol_number,
                court,
                filed_at,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::cases::{ChecklistItem, LegalArea, Urgency, Viability};

    fn base_case(status: CaseStatus) -> Case {
        Case {
            id: "case-1".into(),
            tenant_id: "tn-1".into(),
            title: "Caso de teste".into(),
            client_id: "cl-1".into(),
            status,
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn done(id: &str, text: &str) -> ChecklistItem {
        ChecklistItem {
            id: id.into(),
            text: text.into(),
            completed: true,
        }
    }

    fn submission_for(stage: CaseStatus) -> StageSubmission {
        match stage {
            CaseStatus::LeadIdentification => StageSubmission::Lead {
                origin: "Indicação".into(),
                notes: None,
            },
            CaseStatus::Qualification => StageSubmission::Qualification {
                legal_area: LegalArea::Trabalhista,
                case_value: Decimal::from(25_000),
                urgency: Urgency::Alta,
            },
            CaseStatus::Triage => StageSubmission::Triage {
                analysis: "Viável com testemunhas".into(),
                viability: Viability::Viavel,
            },
            CaseStatus::ClientMeeting => StageSubmission::Meeting {
                date: date(2024, 3, 12),
                notes: "Documentos confirmados".into(),
            },
            CaseStatus::Proposal => StageSubmission::Proposal {
                fee: Decimal::from(5_000),
                terms: "30% de êxito".into(),
            },
            CaseStatus::DocumentCollection => StageSubmission::Documents {
                checklist: vec![done("chk-1", "CTPS"), done("chk-2", "Procuração")],
            },
            CaseStatus::FinalAnalysis => StageSubmission::FinalAnalysis {
                opinion: "Risco baixo".into(),
            },
            CaseStatus::Drafting => StageSubmission::Draft {
                content: "Petição inicial...".into(),
            },
            CaseStatus::Filing => StageSubmission::Filing {
                protocol_number: "0001234-56.2024.5.02.0001".into(),
                court: "2ª Vara do Trabalho".into(),
                filed_at: date(2024, 5, 10),
            },
            _ => unreachable!("status pós-protocolo não tem submissão"),
        }
    }

    #[test]
    fn walks_the_whole_pipeline_one_stage_at_a_time() {
        let mut case = base_case(CaseStatus::LeadIdentification);
        let expected = [
            CaseStatus::Qualification,
            CaseStatus::Triage,
            CaseStatus::ClientMeeting,
            CaseStatus::Proposal,
            CaseStatus::DocumentCollection,
            CaseStatus::FinalAnalysis,
            CaseStatus::Drafting,
            CaseStatus::Filing,
            CaseStatus::Instruction,
        ];

        for next in expected {
            let submission = submission_for(case.status);
            case = advance(&case, submission).unwrap();
            assert_eq!(case.status, next);
        }

        // a Distribuição desembocou na Instrução e todos os campos de
        // etapa estão presentes
        assert!(case.legal_area.is_some());
        assert!(case.triage_analysis.is_some());
        assert!(case.meeting_date.is_some());
        assert!(case.proposal_fee.is_some());
        assert!(case.document_checklist.is_some());
        assert!(case.final_opinion.is_some());
        assert!(case.draft_content.is_some());
        assert!(case.filing.is_some());
    }

    #[test]
    fn rejects_submission_of_a_later_stage() {
        let case = base_case(CaseStatus::LeadIdentification);
        let err = advance(&case, submission_for(CaseStatus::Triage));
        assert!(matches!(err, Err(AppError::StageOutOfOrder)));
    }

    #[test]
    fn rejects_submission_of_an_earlier_stage() {
        // monotonicidade: não há como voltar Reunião -> Triagem
        let case = base_case(CaseStatus::ClientMeeting);
        let err = advance(&case, submission_for(CaseStatus::Triage));
        assert!(matches!(err, Err(AppError::StageOutOfOrder)));
    }

    #[test]
    fn document_collection_is_gated_by_complete_checklist() {
        let case = base_case(CaseStatus::DocumentCollection);

        let incomplete = StageSubmission::Documents {
            checklist: vec![
                done("chk-1", "CTPS"),
                ChecklistItem {
                    id: "chk-2".into(),
                    text: "Procuração".into(),
                    completed: false,
                },
            ],
        };
        assert!(matches!(
            advance(&case, incomplete),
            Err(AppError::ChecklistIncomplete)
        ));

        // checklist vazio também não conclui a coleta
        let empty = StageSubmission::Documents { checklist: vec![] };
        assert!(matches!(
            advance(&case, empty),
            Err(AppError::ChecklistIncomplete)
        ));

        let complete = StageSubmission::Documents {
            checklist: vec![done("chk-1", "CTPS")],
        };
        let advanced = advance(&case, complete).unwrap();
        assert_eq!(advanced.status, CaseStatus::FinalAnalysis);
    }

    #[test]
    fn merge_preserves_fields_of_earlier_stages() {
        let mut case = base_case(CaseStatus::Qualification);
        case.lead_origin = Some("Indicação".into());

        let advanced = advance(&case, submission_for(CaseStatus::Qualification)).unwrap();
        assert_eq!(advanced.lead_origin.as_deref(), Some("Indicação"));
        assert_eq!(advanced.legal_area, Some(LegalArea::Trabalhista));
    }

    #[test]
    fn post_filing_cases_do_not_advance_by_submission() {
        let case = base_case(CaseStatus::Instruction);
        // nenhuma submissão corresponde a um status pós-protocolo, então
        // qualquer payload cai em StageOutOfOrder antes de tudo
        let err = advance(&case, submission_for(CaseStatus::Filing));
        assert!(matches!(err, Err(AppError::StageOutOfOrder)));
    }

    #[test]
    fn reassign_moves_freely_after_filing() {
        let case = base_case(CaseStatus::Instruction);

        let moved = reassign(&case, CaseStatus::Instruction, CaseStatus::Appeals)
            .unwrap()
            .unwrap();
        assert_eq!(moved.status, CaseStatus::Appeals);

        // inclusive "para trás", já que a fase processual não é total
        let back = reassign(&moved, CaseStatus::Appeals, CaseStatus::Instruction)
            .unwrap()
            .unwrap();
        assert_eq!(back.status, CaseStatus::Instruction);
    }

    #[test]
    fn reassign_rejects_pre_filing_endpoints() {
        let case = base_case(CaseStatus::Triage);
        let err = reassign(&case, CaseStatus::Triage, CaseStatus::ClientMeeting);
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));

        let filed = base_case(CaseStatus::Instruction);
        let err = reassign(&filed, CaseStatus::Instruction, CaseStatus::Drafting);
        assert!(matches!(err, Err(AppError::ForbiddenTransition)));
    }

    #[test]
    fn reassign_same_status_is_a_silent_noop() {
        let case = base_case(CaseStatus::Instruction);
        let moved = reassign(&case, CaseStatus::Instruction, CaseStatus::Instruction).unwrap();
        assert!(moved.is_none());
    }

    #[test]
    fn reassign_detects_stale_board() {
        let case = base_case(CaseStatus::Appeals);
        let err = reassign(&case, CaseStatus::Instruction, CaseStatus::Closed);
        assert!(matches!(err, Err(AppError::StageOutOfOrder)));
    }

    #[test]
    fn reassign_touches_only_the_status() {
        let mut case = base_case(CaseStatus::Instruction);
        case.document_checklist = Some(vec![done("chk-1", "CTPS")]);
        case.draft_content = Some("Petição...".into());

        let moved = reassign(&case, CaseStatus::Instruction, CaseStatus::Closed)
            .unwrap()
            .unwrap();
        assert_eq!(moved.document_checklist, case.document_checklist);
        assert_eq!(moved.draft_content, case.draft_content);
        assert_eq!(moved.title, case.title);
    }
}
