use serde::{Deserialize, Serialize};

use super::super::domain::{Criterion, EvaluationCriteria};

pub const DEFAULT_APPROVAL_THRESHOLD: u16 = 70;
pub const DEFAULT_BUDGET_MIN: u64 = 200_000;
pub const DEFAULT_BUDGET_MAX: u64 = 500_000;
pub const DEFAULT_MAX_FEEDBACK_CHARS: usize = 1000;
pub const DEFAULT_UNASSIGNED_OWNER: &str = "Tabata Amaral";
pub const DEFAULT_AUTOMATIC_EVALUATOR: &str = "Assistente IA";

/// Rubric configuration shared by the manual and automatic scoring paths and by the
/// dashboard projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditalRules {
    pub approval_threshold: u16,
    pub criterion_maxima: EvaluationCriteria,
    pub budget_band: BudgetBand,
    pub mandate_keywords: Vec<String>,
    pub max_feedback_chars: usize,
    pub unassigned_owner: String,
    pub automatic_evaluator: String,
}

impl EditalRules {
    pub fn max_for(&self, criterion: Criterion) -> u8 {
        self.criterion_maxima.get(criterion)
    }

    pub fn max_score(&self) -> u16 {
        self.criterion_maxima.total()
    }

    pub fn is_approved(&self, score: u16) -> bool {
        score >= self.approval_threshold
    }
}

impl Default for EditalRules {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            criterion_maxima: EvaluationCriteria {
                history: 20,
                consistency: 30,
                mandate_relation: 10,
                social_impact: 20,
                budget: 20,
            },
            budget_band: BudgetBand {
                min: DEFAULT_BUDGET_MIN,
                max: DEFAULT_BUDGET_MAX,
            },
            mandate_keywords: vec!["Educação".to_string(), "Inovação".to_string()],
            max_feedback_chars: DEFAULT_MAX_FEEDBACK_CHARS,
            unassigned_owner: DEFAULT_UNASSIGNED_OWNER.to_string(),
            automatic_evaluator: DEFAULT_AUTOMATIC_EVALUATOR.to_string(),
        }
    }
}

/// Inclusive range of requested values considered adequate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBand {
    pub min: u64,
    pub max: u64,
}

impl BudgetBand {
    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
