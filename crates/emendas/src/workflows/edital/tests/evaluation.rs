use super::common::*;
use crate::workflows::edital::domain::{
    Criterion, EvaluationProvenance, ProjectId, ProjectStatus, ThemeArea,
};
use crate::workflows::edital::evaluation::{
    auto_evaluate, auto_evaluate_all, pending_count, record_evaluation, suggest_evaluation,
    EvaluationError, HUMAN_VALIDATION_DISCLAIMER,
};

#[test]
fn auto_scores_in_band_mandate_project_as_approved() {
    let project = pending("Proj-1", 300_000, "Educação e Cidadania", 100);

    let scored = auto_evaluate(project, &rules());

    assert_eq!(scored.evaluation, Some(criteria(15, 30, 10, 15, 20)));
    assert_eq!(scored.score, Some(90));
    assert_eq!(scored.status, ProjectStatus::Approved);
    assert_eq!(scored.evaluator.as_deref(), Some("Assistente IA"));
    assert_eq!(scored.provenance, EvaluationProvenance::Automatic);
}

#[test]
fn auto_score_below_band_stays_above_threshold() {
    let project = pending("Proj-2", 100_000, "Educação e Cidadania", 100);

    let scored = auto_evaluate(project, &rules());

    assert_eq!(scored.evaluation.map(|c| c.budget), Some(5));
    assert_eq!(scored.score, Some(75));
    assert_eq!(scored.status, ProjectStatus::Approved);
}

#[test]
fn auto_scores_weak_project_as_rejected() {
    let project = pending("Proj-3", 600_000, "Saúde", 0);

    let scored = auto_evaluate(project, &rules());

    assert_eq!(scored.evaluation, Some(criteria(15, 10, 7, 15, 5)));
    assert_eq!(scored.score, Some(52));
    assert_eq!(scored.status, ProjectStatus::Rejected);
}

#[test]
fn raising_the_threshold_changes_classification() {
    let mut strict = rules();
    strict.approval_threshold = 80;
    let project = pending("Proj-2", 100_000, "Educação e Cidadania", 100);

    let scored = auto_evaluate(project, &strict);

    assert_eq!(scored.score, Some(75));
    assert_eq!(scored.status, ProjectStatus::Rejected);
}

#[test]
fn budget_band_edges_are_inclusive() {
    let at_min = auto_evaluate(pending("Proj-4", 200_000, "Saúde", 0), &rules());
    let at_max = auto_evaluate(pending("Proj-5", 500_000, "Saúde", 0), &rules());
    let above = auto_evaluate(pending("Proj-6", 500_001, "Saúde", 0), &rules());

    assert_eq!(at_min.evaluation.map(|c| c.budget), Some(20));
    assert_eq!(at_max.evaluation.map(|c| c.budget), Some(20));
    assert_eq!(above.evaluation.map(|c| c.budget), Some(5));
}

#[test]
fn description_length_counts_characters() {
    // 60 two-byte characters: 12 points, not 24.
    let mut project = pending("Proj-7", 300_000, "Saúde", 0);
    project.description = "ç".repeat(60);

    let scored = auto_evaluate(project, &rules());

    assert_eq!(scored.evaluation.map(|c| c.consistency), Some(22));
}

#[test]
fn innovation_theme_matches_mandate_keywords() {
    let mut project = pending("Proj-8", 300_000, "Saúde", 0);
    project.theme = ThemeArea::Entrepreneurship;

    let scored = auto_evaluate(project, &rules());

    assert_eq!(scored.evaluation.map(|c| c.mandate_relation), Some(10));
}

#[test]
fn auto_components_are_capped_at_configured_maxima() {
    let mut tight = rules();
    tight.criterion_maxima.consistency = 20;
    tight.criterion_maxima.budget = 10;
    let project = pending("Proj-9", 300_000, "Educação e Cidadania", 200);

    let scored = auto_evaluate(project, &tight);

    let breakdown = scored.evaluation.expect("criteria recorded");
    assert_eq!(breakdown.consistency, 20);
    assert_eq!(breakdown.budget, 10);
    assert_eq!(scored.score, Some(70));
}

#[test]
fn auto_feedback_explains_budget_and_requires_review() {
    let scored = auto_evaluate(pending("Proj-3", 600_000, "Saúde", 0), &rules());

    let feedback = scored.feedback.expect("feedback recorded");
    assert!(feedback.starts_with("ANÁLISE AUTOMÁTICA:"));
    assert!(feedback.contains("Orçamento (5/20)"));
    assert!(feedback.contains("R$ 600.000 fora da faixa"));
    assert!(feedback.contains("Relação com Mandato (7/10)"));
    assert!(feedback.ends_with(HUMAN_VALIDATION_DISCLAIMER));
}

#[test]
fn auto_evaluation_skips_non_pending_projects() {
    let rejected = reviewed("Proj-10", ProjectStatus::Rejected, 45, "Ana");
    let under_review = project("Proj-11", ProjectStatus::UnderReview);

    assert_eq!(auto_evaluate(rejected.clone(), &rules()), rejected);
    assert_eq!(auto_evaluate(under_review.clone(), &rules()), under_review);
}

#[test]
fn suggestion_matches_automatic_tuple_without_applying_it() {
    let project = pending("Proj-1", 300_000, "Educação e Cidadania", 100);

    let suggestion = suggest_evaluation(&project, &rules());
    let scored = auto_evaluate(project.clone(), &rules());

    assert_eq!(suggestion.criteria, criteria(15, 30, 10, 15, 20));
    assert_eq!(suggestion.score, 90);
    assert_eq!(scored.feedback.as_deref(), Some(suggestion.feedback.as_str()));
    assert_eq!(project.clone().with_evaluation(suggestion), scored);
    assert_eq!(project.status, ProjectStatus::Pending);
}

#[test]
fn suggestion_is_available_for_reviewed_projects() {
    let approved = reviewed("Proj-2", ProjectStatus::Approved, 95, "Ana");

    let suggestion = suggest_evaluation(&approved, &rules());

    assert_eq!(suggestion.score, 71);
    assert_eq!(suggestion.status, ProjectStatus::Approved);
    assert_eq!(suggestion.evaluator, "Assistente IA");
}

#[test]
fn bulk_auto_evaluation_is_idempotent_and_order_preserving() {
    let projects = vec![
        pending("Proj-1", 300_000, "Educação e Cidadania", 100),
        reviewed("Proj-2", ProjectStatus::Approved, 85, "Ana"),
        pending("Proj-3", 600_000, "Saúde", 0),
    ];
    assert_eq!(pending_count(&projects), 2);

    let first = auto_evaluate_all(&projects, &rules());
    let second = auto_evaluate_all(&first, &rules());

    let ids: Vec<&str> = first.iter().map(|project| project.id.as_str()).collect();
    assert_eq!(ids, ["Proj-1", "Proj-2", "Proj-3"]);
    assert_eq!(pending_count(&first), 0);
    assert_eq!(first, second);
    assert_eq!(first[1], projects[1]);
}

#[test]
fn manual_score_at_threshold_is_approved() {
    let projects = vec![project("Proj-1", ProjectStatus::Pending)];

    let at = record_evaluation(
        &projects,
        &ProjectId::new("Proj-1"),
        criteria(20, 30, 10, 10, 0),
        "",
        "Ana",
        &rules(),
    )
    .expect("valid evaluation");
    let below = record_evaluation(
        &projects,
        &ProjectId::new("Proj-1"),
        criteria(20, 30, 10, 9, 0),
        "",
        "Ana",
        &rules(),
    )
    .expect("valid evaluation");

    assert_eq!((at.score, at.status), (Some(70), ProjectStatus::Approved));
    assert_eq!((below.score, below.status), (Some(69), ProjectStatus::Rejected));
}

#[test]
fn manual_evaluation_replaces_automatic_tuple() {
    let projects = auto_evaluate_all(
        &[pending("Proj-1", 300_000, "Educação e Cidadania", 100)],
        &rules(),
    );

    let updated = record_evaluation(
        &projects,
        &ProjectId::new("Proj-1"),
        criteria(10, 10, 5, 10, 5),
        "Cronograma frágil.",
        "  Ana Souza ",
        &rules(),
    )
    .expect("valid evaluation");

    assert_eq!(updated.score, Some(40));
    assert_eq!(updated.status, ProjectStatus::Rejected);
    assert_eq!(updated.feedback.as_deref(), Some("Cronograma frágil."));
    assert_eq!(updated.evaluator.as_deref(), Some("Ana Souza"));
    assert_eq!(updated.provenance, EvaluationProvenance::Human);
    assert_eq!(updated.project_name, projects[0].project_name);
}

#[test]
fn out_of_range_criterion_is_rejected_not_clamped() {
    let projects = vec![project("Proj-1", ProjectStatus::Pending)];

    let err = record_evaluation(
        &projects,
        &ProjectId::new("Proj-1"),
        criteria(20, 31, 10, 20, 20),
        "",
        "Ana",
        &rules(),
    )
    .expect_err("consistency above maximum");

    assert_eq!(
        err,
        EvaluationError::CriterionOutOfRange {
            criterion: Criterion::Consistency,
            value: 31,
            max: 30,
        }
    );
    assert_eq!(err.to_string(), "Consistência score 31 exceeds the maximum of 30");
}

#[test]
fn feedback_limit_counts_characters() {
    let projects = vec![project("Proj-1", ProjectStatus::Pending)];
    let id = ProjectId::new("Proj-1");

    let at_limit = "é".repeat(1000);
    record_evaluation(&projects, &id, criteria(10, 10, 5, 10, 5), &at_limit, "Ana", &rules())
        .expect("1000 characters allowed");

    let over = "é".repeat(1001);
    match record_evaluation(&projects, &id, criteria(10, 10, 5, 10, 5), &over, "Ana", &rules()) {
        Err(EvaluationError::FeedbackTooLong { length, max }) => {
            assert_eq!((length, max), (1001, 1000));
        }
        other => panic!("expected feedback length error, got {other:?}"),
    }
}

#[test]
fn blank_evaluator_is_rejected() {
    let projects = vec![project("Proj-1", ProjectStatus::Pending)];

    let err = record_evaluation(
        &projects,
        &ProjectId::new("Proj-1"),
        criteria(10, 10, 5, 10, 5),
        "",
        "   ",
        &rules(),
    )
    .expect_err("evaluator required");

    assert_eq!(err, EvaluationError::MissingEvaluator);
}

#[test]
fn unknown_project_is_reported_after_validation() {
    let projects = vec![project("Proj-1", ProjectStatus::Pending)];
    let missing = ProjectId::new("Proj-404");

    let not_found = record_evaluation(
        &projects,
        &missing,
        criteria(10, 10, 5, 10, 5),
        "",
        "Ana",
        &rules(),
    )
    .expect_err("unknown project");
    assert_eq!(not_found, EvaluationError::ProjectNotFound(missing.clone()));

    let invalid = record_evaluation(
        &projects,
        &missing,
        criteria(21, 10, 5, 10, 5),
        "",
        "Ana",
        &rules(),
    )
    .expect_err("invalid and unknown");
    assert!(matches!(
        invalid,
        EvaluationError::CriterionOutOfRange {
            criterion: Criterion::History,
            ..
        }
    ));
}
