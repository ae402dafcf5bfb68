use super::super::domain::{Project, ProjectStatus};
use super::super::evaluation::EditalRules;
use super::views::{
    DashboardStats, EvaluatorBreakdown, FilterOptions, StatusCount, StatusDistribution,
    ThemeCount,
};
use std::collections::{BTreeMap, BTreeSet};

/// Evaluator identity used for grouping and filtering. Pending or unassigned projects
/// belong to the call's owner.
pub fn effective_evaluator<'a>(project: &'a Project, rules: &'a EditalRules) -> &'a str {
    match (&project.status, project.evaluator.as_deref()) {
        (ProjectStatus::Pending, _) | (_, None) => rules.unassigned_owner.as_str(),
        (_, Some(evaluator)) => evaluator,
    }
}

pub fn compute_stats(projects: &[Project], rules: &EditalRules) -> DashboardStats {
    let count_by_status = count_by_status(projects);

    DashboardStats {
        total_count: projects.len(),
        approved_count: count_by_status.approved,
        total_requested_budget: projects
            .iter()
            .map(|project| project.requested_value)
            .sum(),
        average_score: average_score(projects),
        count_by_theme: count_by_theme(projects),
        count_by_status,
        count_by_evaluator_and_status: count_by_evaluator_and_status(projects, rules),
    }
}

pub fn average_score(projects: &[Project]) -> f64 {
    let (sum, scored) = projects
        .iter()
        .filter_map(|project| project.score)
        .fold((0u64, 0usize), |(sum, scored), score| {
            (sum + u64::from(score), scored + 1)
        });

    if scored == 0 {
        0.0
    } else {
        sum as f64 / scored as f64
    }
}

pub fn count_by_theme(projects: &[Project]) -> Vec<ThemeCount> {
    let mut entries: Vec<ThemeCount> = Vec::new();
    for project in projects {
        let label = project.theme.label();
        match entries.iter_mut().find(|entry| entry.theme == label) {
            Some(entry) => entry.count += 1,
            None => entries.push(ThemeCount {
                theme: label.to_string(),
                count: 1,
            }),
        }
    }
    entries
}

pub fn count_by_status(projects: &[Project]) -> StatusDistribution {
    projects
        .iter()
        .fold(StatusDistribution::default(), |mut buckets, project| {
            match project.status {
                ProjectStatus::Approved => buckets.approved += 1,
                ProjectStatus::Pending => buckets.pending += 1,
                ProjectStatus::Rejected => buckets.rejected += 1,
                ProjectStatus::UnderReview => {}
            }
            buckets
        })
}

pub fn count_by_evaluator_and_status(
    projects: &[Project],
    rules: &EditalRules,
) -> Vec<EvaluatorBreakdown> {
    let mut grouped: BTreeMap<&str, BTreeMap<ProjectStatus, usize>> = BTreeMap::new();
    for project in projects {
        *grouped
            .entry(effective_evaluator(project, rules))
            .or_default()
            .entry(project.status)
            .or_default() += 1;
    }

    grouped
        .into_iter()
        .map(|(evaluator, counts)| {
            let statuses: Vec<StatusCount> = ProjectStatus::ordered()
                .into_iter()
                .filter_map(|status| {
                    counts
                        .get(&status)
                        .map(|count| StatusCount::new(status, *count))
                })
                .collect();
            EvaluatorBreakdown {
                evaluator: evaluator.to_string(),
                total: statuses.iter().map(|entry| entry.count).sum(),
                statuses,
            }
        })
        .collect()
}

pub fn distinct_municipalities(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .map(|project| project.municipality.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn distinct_effective_evaluators(projects: &[Project], rules: &EditalRules) -> Vec<String> {
    projects
        .iter()
        .map(|project| effective_evaluator(project, rules))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn filter_options(projects: &[Project], rules: &EditalRules) -> FilterOptions {
    FilterOptions {
        municipalities: distinct_municipalities(projects),
        evaluators: distinct_effective_evaluators(projects, rules),
    }
}
