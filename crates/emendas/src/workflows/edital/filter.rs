//! Listing filters.
//!
//! A project matches when every active constraint matches: the free-text query against
//! the project or entity name (case-insensitive substring), and exact equality for status,
//! municipality and effective evaluator. Constraints are independent, so applying them in
//! any order or in several passes yields the same set.

use serde::{Deserialize, Serialize};

use super::domain::{Project, ProjectStatus};
use super::evaluation::EditalRules;
use super::report::effective_evaluator;

/// A single-choice filter control whose neutral value is "all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

/// `"all"` in any case and the empty string leave a control unconstrained.
pub fn is_neutral(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("all")
}

impl Selection<String> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !is_neutral(value) => Selection::Only(value.to_string()),
            _ => Selection::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub query: String,
    pub status: Selection<ProjectStatus>,
    pub municipality: Selection<String>,
    pub evaluator: Selection<String>,
}

impl ProjectFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Selection::Only(municipality.into());
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl Into<String>) -> Self {
        self.evaluator = Selection::Only(evaluator.into());
        self
    }

    pub fn matches(&self, project: &Project, rules: &EditalRules) -> bool {
        self.matches_query(project)
            && self.status.matches(&project.status)
            && self.municipality.matches(&project.municipality)
            && match &self.evaluator {
                Selection::All => true,
                Selection::Only(expected) => expected == effective_evaluator(project, rules),
            }
    }

    fn matches_query(&self, project: &Project) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        project.project_name.to_lowercase().contains(&needle)
            || project.entity_name.to_lowercase().contains(&needle)
    }
}

pub fn filter_projects(
    projects: &[Project],
    filter: &ProjectFilter,
    rules: &EditalRules,
) -> Vec<Project> {
    projects
        .iter()
        .filter(|project| filter.matches(project, rules))
        .cloned()
        .collect()
}
