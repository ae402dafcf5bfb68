use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::ThemeArea;
use super::evaluation::EditalRules;

/// Full set of call parameters: calendar, budget constraints, scoring rules and areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditalParameters {
    pub timeline: EditalTimeline,
    pub budget: BudgetParameters,
    pub rules: EditalRules,
    pub areas: Vec<String>,
}

impl EditalParameters {
    /// Parameters published for the 2026 cycle, combined with the given rules.
    pub fn edital_2026(rules: EditalRules) -> Self {
        Self {
            timeline: EditalTimeline::edital_2026(),
            budget: BudgetParameters {
                max_project_value: rules.budget_band.max,
                min_project_value: rules.budget_band.min,
                health_allocation_pct: 50,
                year: 2026,
            },
            rules,
            areas: ThemeArea::ordered()
                .iter()
                .map(|area| area.label().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetParameters {
    pub max_project_value: u64,
    pub min_project_value: u64,
    pub health_allocation_pct: u8,
    pub year: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditalTimeline {
    pub registration_start: NaiveDate,
    pub registration_end: NaiveDate,
    pub analysis_end: NaiveDate,
    pub voting_start: NaiveDate,
    pub voting_end: NaiveDate,
    pub results_date: NaiveDate,
}

impl EditalTimeline {
    pub fn edital_2026() -> Self {
        Self {
            registration_start: date(2025, 11, 3),
            registration_end: date(2025, 11, 21),
            analysis_end: date(2026, 1, 16),
            voting_start: date(2026, 1, 19),
            voting_end: date(2026, 1, 25),
            results_date: date(2026, 2, 13),
        }
    }

    /// Phase of the call on `today`. Boundary dates belong to the phase they open or close.
    pub fn phase_on(&self, today: NaiveDate) -> EditalPhase {
        if today < self.registration_start {
            EditalPhase::BeforeRegistration
        } else if today <= self.registration_end {
            EditalPhase::Registration
        } else if today <= self.analysis_end {
            EditalPhase::MeritAnalysis
        } else if today < self.voting_start {
            EditalPhase::AwaitingVote
        } else if today <= self.voting_end {
            EditalPhase::Voting
        } else if today < self.results_date {
            EditalPhase::AwaitingResults
        } else {
            EditalPhase::ResultsPublished
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditalPhase {
    BeforeRegistration,
    Registration,
    MeritAnalysis,
    AwaitingVote,
    Voting,
    AwaitingResults,
    ResultsPublished,
}

impl EditalPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BeforeRegistration => "Inscrições não iniciadas",
            Self::Registration => "Inscrições abertas",
            Self::MeritAnalysis => "Análise de mérito",
            Self::AwaitingVote => "Aguardando votação",
            Self::Voting => "Votação popular",
            Self::AwaitingResults => "Apuração",
            Self::ResultsPublished => "Resultados divulgados",
        }
    }
}
