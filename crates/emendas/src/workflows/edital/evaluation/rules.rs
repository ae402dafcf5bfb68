use super::super::domain::{format_brl, EvaluationCriteria, Project};
use super::config::EditalRules;

const HISTORY_POINTS: u8 = 15;
const SOCIAL_IMPACT_POINTS: u8 = 15;
const CONSISTENCY_BASE: usize = 10;
const DESCRIPTION_CHARS_PER_POINT: usize = 5;
const DESCRIPTION_POINTS_CAP: usize = 20;
const MANDATE_MATCH_POINTS: u8 = 10;
const MANDATE_DEFAULT_POINTS: u8 = 7;
const BUDGET_ADEQUATE_POINTS: u8 = 20;
const BUDGET_INADEQUATE_POINTS: u8 = 5;

pub(crate) const HUMAN_VALIDATION_DISCLAIMER: &str =
    "Análise preliminar gerada automaticamente; validação humana obrigatória.";

pub(crate) struct AutoSignals {
    pub budget_ok: bool,
    pub mandate_match: bool,
}

/// Heuristic pre-score for a pending project.
pub(crate) fn suggest_criteria(
    project: &Project,
    rules: &EditalRules,
) -> (EvaluationCriteria, AutoSignals) {
    let budget_ok = rules.budget_band.contains(project.requested_value);

    // floor(10 + min(len / 5, 20)) in integer arithmetic.
    let description_points =
        (project.description.chars().count() / DESCRIPTION_CHARS_PER_POINT)
            .min(DESCRIPTION_POINTS_CAP);
    let consistency = u8::try_from(CONSISTENCY_BASE + description_points).unwrap_or(u8::MAX);

    let theme = project.theme.label();
    let mandate_match = rules
        .mandate_keywords
        .iter()
        .any(|keyword| theme.contains(keyword.as_str()));

    let raw = EvaluationCriteria {
        history: HISTORY_POINTS,
        consistency,
        mandate_relation: if mandate_match {
            MANDATE_MATCH_POINTS
        } else {
            MANDATE_DEFAULT_POINTS
        },
        social_impact: SOCIAL_IMPACT_POINTS,
        budget: if budget_ok {
            BUDGET_ADEQUATE_POINTS
        } else {
            BUDGET_INADEQUATE_POINTS
        },
    };

    let maxima = &rules.criterion_maxima;
    let criteria = EvaluationCriteria {
        history: raw.history.min(maxima.history),
        consistency: raw.consistency.min(maxima.consistency),
        mandate_relation: raw.mandate_relation.min(maxima.mandate_relation),
        social_impact: raw.social_impact.min(maxima.social_impact),
        budget: raw.budget.min(maxima.budget),
    };

    (
        criteria,
        AutoSignals {
            budget_ok,
            mandate_match,
        },
    )
}

pub(crate) fn automatic_feedback(
    project: &Project,
    criteria: &EvaluationCriteria,
    signals: &AutoSignals,
    rules: &EditalRules,
) -> String {
    let budget_note = if signals.budget_ok {
        "adequado"
    } else {
        "fora da faixa"
    };
    let mandate_note = if signals.mandate_match {
        "aderente aos eixos prioritários"
    } else {
        "sem aderência direta aos eixos prioritários"
    };

    format!(
        "ANÁLISE AUTOMÁTICA:\n\
         • Orçamento ({}/{}): valor {} {} (faixa {} a {}).\n\
         • Relação com Mandato ({}/{}): tema \"{}\" {}.\n\
         {}",
        criteria.budget,
        rules.criterion_maxima.budget,
        format_brl(project.requested_value),
        budget_note,
        format_brl(rules.budget_band.min),
        format_brl(rules.budget_band.max),
        criteria.mandate_relation,
        rules.criterion_maxima.mandate_relation,
        project.theme.label(),
        mandate_note,
        HUMAN_VALIDATION_DISCLAIMER,
    )
}
