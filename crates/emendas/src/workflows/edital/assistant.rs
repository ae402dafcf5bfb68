//! Canned answers for the dashboard help widget.
//!
//! Replies are keyword driven and read every figure from the current parameters, so the
//! text never drifts from the rules the scoring engine applies.

use serde::{Deserialize, Serialize};

use super::domain::Criterion;
use super::parameters::EditalParameters;

const DEADLINE_KEYWORDS: [&str; 2] = ["prazo", "data"];
const HEALTH_KEYWORDS: [&str; 2] = ["saúde", "porcentagem"];
const SCORING_KEYWORDS: [&str; 2] = ["critério", "nota"];

pub const GREETING: &str = "Olá! Sou a assistente digital do mandato. Posso ajudar a esclarecer \
dúvidas sobre o Edital 2026 ou critérios de avaliação?";

const FALLBACK: &str = "Entendi. Para essa questão específica sobre o edital, recomendo \
verificar a seção de Parâmetros. Posso ajudar em algo mais?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub topic: AssistantTopic,
    pub reply: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantTopic {
    Deadlines,
    HealthAllocation,
    Scoring,
    General,
}

pub fn reply(message: &str, parameters: &EditalParameters) -> AssistantReply {
    let normalized = message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| normalized.contains(keyword));

    let (topic, reply) = if mentions(&DEADLINE_KEYWORDS) {
        let timeline = &parameters.timeline;
        (
            AssistantTopic::Deadlines,
            format!(
                "O cronograma oficial define o fim das inscrições para {} e a divulgação dos \
                 resultados para {}.",
                timeline.registration_end.format("%d/%m/%Y"),
                timeline.results_date.format("%d/%m/%Y"),
            ),
        )
    } else if mentions(&HEALTH_KEYWORDS) {
        (
            AssistantTopic::HealthAllocation,
            format!(
                "Lembre-se: {}% do orçamento total das emendas deve ser obrigatoriamente \
                 destinado a ações e serviços públicos de saúde (Art. 166, §9º da CF).",
                parameters.budget.health_allocation_pct,
            ),
        )
    } else if mentions(&SCORING_KEYWORDS) {
        let rules = &parameters.rules;
        let criteria = Criterion::ordered()
            .into_iter()
            .map(|criterion| format!("{} ({})", criterion.label(), rules.max_for(criterion)))
            .collect::<Vec<_>>()
            .join(", ");
        (
            AssistantTopic::Scoring,
            format!(
                "Os critérios são: {criteria}. A nota de corte é {} pontos.",
                rules.approval_threshold,
            ),
        )
    } else {
        (AssistantTopic::General, FALLBACK.to_string())
    };

    AssistantReply { topic, reply }
}
