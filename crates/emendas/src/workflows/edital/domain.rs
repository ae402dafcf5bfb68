use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted projects (e.g. `Proj-178`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Thematic areas accepted by the call. Labels outside the fixed set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeArea {
    Education,
    SocialDevelopment,
    Health,
    Entrepreneurship,
    CultureAndSport,
    Environment,
    AffirmativeAction,
    Other(String),
}

impl ThemeArea {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Education,
            Self::SocialDevelopment,
            Self::Health,
            Self::Entrepreneurship,
            Self::CultureAndSport,
            Self::Environment,
            Self::AffirmativeAction,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Education => "Educação",
            Self::SocialDevelopment => "Cidadania e Des. Social",
            Self::Health => "Saúde",
            Self::Entrepreneurship => "Empreendedorismo e Inovação",
            Self::CultureAndSport => "Cultura e Esporte",
            Self::Environment => "Meio Ambiente",
            Self::AffirmativeAction => "Ações Afirmativas",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for ThemeArea {
    fn from(value: String) -> Self {
        Self::ordered()
            .into_iter()
            .find(|theme| theme.label() == value)
            .unwrap_or(Self::Other(value))
    }
}

impl From<ThemeArea> for String {
    fn from(value: ThemeArea) -> Self {
        match value {
            ThemeArea::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ThemeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a project under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Pending,
            Self::UnderReview,
            Self::Approved,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::UnderReview => "Em Análise",
            Self::Approved => "Classificado",
            Self::Rejected => "Desclassificado",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.key() == value.trim())
    }
}

/// The five scoring dimensions of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    History,
    Consistency,
    MandateRelation,
    SocialImpact,
    Budget,
}

impl Criterion {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::History,
            Self::Consistency,
            Self::MandateRelation,
            Self::SocialImpact,
            Self::Budget,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::History => "Histórico",
            Self::Consistency => "Consistência",
            Self::MandateRelation => "Relação com Mandato",
            Self::SocialImpact => "Impacto Social",
            Self::Budget => "Orçamento",
        }
    }
}

/// Complete score breakdown; partial evaluations are not representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCriteria {
    pub history: u8,
    pub consistency: u8,
    pub mandate_relation: u8,
    pub social_impact: u8,
    pub budget: u8,
}

impl EvaluationCriteria {
    pub const fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::History => self.history,
            Criterion::Consistency => self.consistency,
            Criterion::MandateRelation => self.mandate_relation,
            Criterion::SocialImpact => self.social_impact,
            Criterion::Budget => self.budget,
        }
    }

    pub fn total(&self) -> u16 {
        Criterion::ordered()
            .into_iter()
            .map(|criterion| u16::from(self.get(criterion)))
            .sum()
    }
}

/// Who produced the current evaluation tuple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationProvenance {
    #[default]
    Unset,
    Human,
    Automatic,
}

/// A funding proposal submitted under the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub entity_name: String,
    pub cnpj: String,
    pub municipality: String,
    pub project_name: String,
    pub theme: ThemeArea,
    pub description: String,
    pub beneficiaries: String,
    pub requested_value: u64,
    pub has_parliamentary_amendment: bool,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator: Option<String>,
    #[serde(default)]
    pub provenance: EvaluationProvenance,
}

impl Project {
    /// Replace the whole evaluation tuple at once; no other field is touched.
    pub fn with_evaluation(mut self, record: EvaluationRecord) -> Self {
        let EvaluationRecord {
            criteria,
            score,
            status,
            feedback,
            evaluator,
            provenance,
        } = record;

        self.evaluation = Some(criteria);
        self.score = Some(score);
        self.status = status;
        self.feedback = Some(feedback);
        self.evaluator = Some(evaluator);
        self.provenance = provenance;
        self
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback
            .as_deref()
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    }
}

/// The evaluation tuple written by both the manual and the automatic scoring paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub criteria: EvaluationCriteria,
    pub score: u16,
    pub status: ProjectStatus,
    pub feedback: String,
    pub evaluator: String,
    pub provenance: EvaluationProvenance,
}

/// Formats whole currency units the way the call documents do (`R$ 1.250.000`).
pub fn format_brl(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("R$ {grouped}")
}
