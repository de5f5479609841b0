//! Rendering of evaluations: result card, opinion text, tabular rows.
//!
//! Everything here returns a `String` so the caller decides where it goes.

use std::fmt::Write;

use chrono::NaiveDate;
use prescricao_core::calendar::format_br;
use prescricao_core::conclusion::{self, ConclusionModel};
use prescricao_core::{
    CUTOFF, CaseInput, Conduct, Evaluation, EvaluationResult, ExportRow, MaterialBasis, Nature,
    Regime, Situation, StartBasis,
};

use crate::input::RejectedEntry;

const NONE: &str = "—";

// ── Labels ──

pub fn regime_label(regime: Regime) -> &'static str {
    match regime {
        Regime::NewRegime => "Novo regime (art. 5º-A)",
        Regime::Transition => "Transição 2 anos (LC 220/24)",
        Regime::PreLawConsummated => "Prescrição consumada antes da lei",
        Regime::OutOfScope => "Fora do alcance: decisão anterior a 18/07/2024",
    }
}

pub fn situation_label(situation: Situation) -> &'static str {
    match situation {
        Situation::NotBarred => "Não prescrito",
        Situation::Barred => "Prescrição consumada",
        Situation::IntercurrentBarred => "Prescrição intercorrente",
        Situation::PriorRegimeBarred => "Prescrição reconhecida (regime anterior)",
        Situation::OutOfScope => "Fora do alcance da LC 220/2024",
    }
}

fn nature_label(nature: Nature) -> &'static str {
    match nature {
        Nature::Punitive => "Punitiva",
        Nature::Indemnificatory => "Ressarcitória (analogia)",
    }
}

fn conduct_label(conduct: Conduct) -> &'static str {
    match conduct {
        Conduct::Instantaneous => "Instantânea",
        Conduct::Continuing => "Continuada",
    }
}

fn basis_label(basis: MaterialBasis) -> &'static str {
    match basis {
        MaterialBasis::Act => "Data do ato",
        MaterialBasis::Cessation => "Data da cessação",
        MaterialBasis::DamageEvent => "Evento danoso (data do dano)",
        MaterialBasis::LastPayment => "Última medição/pagamento (contratos)",
        MaterialBasis::DamageCessation => "Cessação do dano",
    }
}

fn start_label(basis: StartBasis) -> String {
    match basis {
        StartBasis::Material(b) => basis_label(b).to_string(),
        StartBasis::Cutoff => format!("Transição ({})", format_br(CUTOFF)),
        StartBasis::Awareness => "Ciência pelo Tribunal (regime anterior)".to_string(),
    }
}

fn date_or_none(date: Option<NaiveDate>) -> String {
    date.map(format_br).unwrap_or_else(|| NONE.to_string())
}

fn date_list(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "não informado".to_string();
    }
    dates.iter().map(|d| format_br(*d)).collect::<Vec<_>>().join(", ")
}

/// One-line explanation of the situation.
pub fn detail(result: &EvaluationResult) -> String {
    let term = result.base_term_label().unwrap_or_default();
    let deadline = date_or_none(result.final_deadline);
    match result.situation {
        Situation::OutOfScope => {
            "Decisão administrativa transitada em julgado anterior a 18/07/2024.".to_string()
        }
        Situation::PriorRegimeBarred => {
            "A prescrição consumou-se integralmente antes de 18/07/2024, sob o regime precedente."
                .to_string()
        }
        Situation::IntercurrentBarred => format!(
            "Paralisação superior a 3 anos ({} dias).",
            result.intercurrent_gap_days.unwrap_or_default()
        ),
        Situation::Barred => format!("Esgotado o prazo {term}: {deadline}."),
        Situation::NotBarred => format!("Data-alvo projetada ({term}): {deadline}."),
    }
}

// ── Opinion text ──

/// Paragraph for the selected conclusion model.
pub fn opinion_text(
    model: ConclusionModel,
    case: &CaseInput,
    result: &EvaluationResult,
    today: NaiveDate,
) -> String {
    let start = date_or_none(result.effective_start);
    match model {
        ConclusionModel::A => {
            let milestones = if result.considered_milestones.is_empty() {
                NONE.to_string()
            } else {
                date_list(&result.considered_milestones)
            };
            format!(
                "À vista do termo inicial em {start}, dos marcos interruptivos em [{milestones}] \
                 e da ausência de paralisação superior a 3 anos, não se verifica prescrição, \
                 devendo o feito prosseguir para exame de mérito."
            )
        }
        ConclusionModel::B => {
            "O prazo prescricional consumou-se integralmente antes de 18/07/2024, sob o \
             regime então vigente, impondo o reconhecimento da prescrição por segurança \
             jurídica e irretroatividade da nova lei."
                .to_string()
        }
        ConclusionModel::C => {
            "Tratando-se de fato anterior a 18/07/2021 e não prescrita a pretensão até \
             18/07/2024, aplica-se o prazo bienal de transição. Inexistentes marcos \
             interruptivos hábeis, consumou-se a prescrição em 18/07/2026."
                .to_string()
        }
        ConclusionModel::D => format!(
            "Enquadrado no novo regime, escoado o prazo quinquenal contado de {start}, sem marcos \
             interruptivos válidos, impõe-se o reconhecimento da prescrição."
        ),
        ConclusionModel::E => {
            let (from, to) = match case.intercurrent {
                Some(check) => (
                    format_br(check.last_active_act),
                    format_br(check.subsequent_act.unwrap_or(today)),
                ),
                None => (NONE.to_string(), format_br(today)),
            };
            format!(
                "Verificada paralisação processual por período superior a 3 anos \
                 (de {from} a {to}), reconhece-se a prescrição intercorrente, com \
                 arquivamento, sem prejuízo de apuração funcional."
            )
        }
    }
}

/// Free-text summary block to paste into the opinion.
pub fn summary_block(case: &CaseInput, result: &EvaluationResult) -> String {
    let start = match (result.effective_start, result.start_basis) {
        (Some(date), Some(basis)) => format!("{} ({})", format_br(date), start_label(basis)),
        _ => "N/A".to_string(),
    };
    format!(
        "Enquadramento: {}. Natureza: {}. Conduta: {}.\n\
         Termo inicial adotado: {}.\n\
         Interrupções: {}.\n\
         Situação: {}. Detalhe: {}",
        regime_label(result.regime),
        nature_label(case.nature),
        conduct_label(case.conduct),
        start,
        date_list(&result.considered_milestones),
        situation_label(result.situation),
        detail(result),
    )
}

// ── Card ──

fn field(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<26} {}", name, value);
}

fn result_section(
    out: &mut String,
    header: &str,
    case: &CaseInput,
    result: &EvaluationResult,
    overridden: bool,
    today: NaiveDate,
) {
    let _ = writeln!(out, "{header}");
    field(out, "Situação", situation_label(result.situation));
    field(out, "Detalhe", detail(result));
    if let (Some(date), Some(basis)) = (result.effective_start, result.start_basis) {
        field(
            out,
            "Termo inicial",
            format!("{} ({})", format_br(date), start_label(basis)),
        );
    }
    if result.interruptions_applied {
        field(out, "Recontagem a partir de", date_or_none(result.recounted_start));
    }
    if let Some(deadline) = result.final_deadline {
        field(out, "Data-alvo", format_br(deadline));
    }
    if let Some(term) = result.base_term_label() {
        field(out, "Base", term);
    }
    if result.situation != Situation::OutOfScope {
        field(
            out,
            "Interrupções consideradas",
            date_list(&result.considered_milestones),
        );
    }
    if let Some(days) = result.intercurrent_gap_days {
        field(out, "Paralisação (dias)", days);
    }
    if result.deadline_after_cutoff {
        let reason = if overridden {
            "enquadramento forçado incoerente"
        } else {
            "citação qualificada deste responsável manteve o prazo anterior em curso"
        };
        field(
            out,
            "Atenção",
            format!("data-alvo posterior a {}; {reason}", format_br(CUTOFF)),
        );
    }

    match conclusion::select(result) {
        Some(model) => {
            field(out, "Modelo sugerido", format!("Opção {}", model.as_str()));
            let _ = writeln!(out, "    {}", opinion_text(model, case, result, today));
        }
        None => field(
            out,
            "Modelo sugerido",
            "nenhum dos modelos A–E se aplica literalmente",
        ),
    }
    let _ = writeln!(out);
}

/// Human-readable card for a whole evaluation.
pub fn render_card(
    case: &CaseInput,
    evaluation: &Evaluation,
    rejected: &[RejectedEntry],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Prescrição — LC-RJ 220/2024 (art. 5º-A) ===");
    let _ = writeln!(out);

    let _ = writeln!(out, "Enquadramento");
    field(&mut out, "Sugerido", regime_label(evaluation.suggested_regime));
    field(&mut out, "Aplicado", regime_label(evaluation.applied_regime));
    if evaluation.overridden() {
        field(&mut out, "Ajuste manual", "sim");
    }
    field(&mut out, "Natureza", nature_label(case.nature));
    field(&mut out, "Conduta", conduct_label(case.conduct));
    field(&mut out, "Avaliado em", format_br(evaluation.today));
    let _ = writeln!(out);

    if !rejected.is_empty() {
        let _ = writeln!(out, "Datas inválidas ignoradas (use AAAA-MM-DD)");
        for r in rejected {
            field(&mut out, r.party.as_deref().unwrap_or("marcos gerais"), &r.entry);
        }
        let _ = writeln!(out);
    }

    let overridden = evaluation.overridden();
    if evaluation.per_party.is_empty() {
        let result = &evaluation.case;
        result_section(&mut out, "Resultado", case, result, overridden, evaluation.today);
    } else {
        for p in &evaluation.per_party {
            let header = format!("Responsável: {}", p.party);
            result_section(&mut out, &header, case, &p.result, overridden, evaluation.today);
        }
    }

    let _ = writeln!(out, "Texto livre para o parecer");
    let _ = writeln!(out, "{}", summary_block(case, &evaluation.case));
    out
}

// ── Rows ──

const ROW_HEADER: &[&str] = &[
    "responsavel",
    "enquadramento",
    "situacao",
    "termo_inicial",
    "recontagem",
    "data_alvo",
    "base",
    "interrupcoes",
    "paralisacao_dias",
    "modelo",
];

/// Tab-separated rows with a header line.
pub fn render_rows(rows: &[ExportRow]) -> String {
    let mut out = ROW_HEADER.join("\t");
    out.push('\n');
    for row in rows {
        let cells = [
            row.party.clone().unwrap_or_default(),
            row.regime.as_str().to_string(),
            row.situation.as_str().to_string(),
            date_or_none(row.effective_start),
            date_or_none(row.recounted_start),
            date_or_none(row.final_deadline),
            row.base_term.clone().unwrap_or_default(),
            row.milestones
                .iter()
                .map(|d| format_br(*d))
                .collect::<Vec<_>>()
                .join(", "),
            row.intercurrent_gap_days
                .map(|d| d.to_string())
                .unwrap_or_default(),
            row.conclusion
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
        ];
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}
