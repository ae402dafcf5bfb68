use super::common::{criteria, project, rules};
use crate::workflows::edital::domain::{Project, ProjectStatus, ThemeArea};
use crate::workflows::edital::evaluation::EditalRules;
use crate::workflows::edital::seed::{
    load_projects_from_reader, parse_projects, validate_projects, DatasetError,
};
use crate::workflows::edital::seed_projects;

fn evaluated(status: ProjectStatus, score: u16, history: u8) -> Project {
    Project {
        score: Some(score),
        evaluation: Some(criteria(history, 20, 5, 10, 10)),
        ..project("Proj-7", status)
    }
}

fn invalid_reason(projects: &[Project], rules: &EditalRules) -> String {
    match validate_projects(projects, rules) {
        Err(DatasetError::InvalidRecord { id, reason }) => {
            assert_eq!(id.as_str(), "Proj-7");
            reason
        }
        other => panic!("expected invalid record, got {other:?}"),
    }
}

#[test]
fn seed_dataset_loads_twelve_projects() {
    let projects = seed_projects().expect("seed dataset parses");

    assert_eq!(projects.len(), 12);
    assert_eq!(projects[0].id.as_str(), "Proj-178");
    assert_eq!(projects[0].theme, ThemeArea::SocialDevelopment);
    assert_eq!(projects[1].status, ProjectStatus::UnderReview);
    assert!(projects
        .iter()
        .all(|project| project.evaluator.is_none()));
}

#[test]
fn duplicate_ids_are_rejected() {
    let raw = serde_json::to_string(&vec![
        project("Proj-1", ProjectStatus::Pending),
        project("Proj-1", ProjectStatus::Approved),
    ])
    .expect("serializes");

    match parse_projects(&raw) {
        Err(DatasetError::DuplicateId(id)) => assert_eq!(id.as_str(), "Proj-1"),
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[test]
fn unknown_theme_labels_are_kept_verbatim() {
    let mut project = project("Proj-9", ProjectStatus::Pending);
    project.theme = ThemeArea::from("Educação e Cidadania".to_string());
    let raw = serde_json::to_vec(&vec![project]).expect("serializes");

    let loaded = load_projects_from_reader(raw.as_slice()).expect("loads");

    assert_eq!(
        loaded[0].theme,
        ThemeArea::Other("Educação e Cidadania".to_string())
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        parse_projects("[{\"id\": 1}]"),
        Err(DatasetError::Parse(_))
    ));
}

#[test]
fn bundled_dataset_is_consistent_with_default_rubric() {
    let projects = seed_projects().expect("seed dataset parses");

    assert!(validate_projects(&projects, &rules()).is_ok());
}

#[test]
fn consistent_evaluated_records_pass() {
    let projects = vec![
        project("Proj-1", ProjectStatus::Pending),
        project("Proj-2", ProjectStatus::UnderReview),
        Project {
            score: Some(80),
            evaluation: Some(criteria(20, 30, 10, 10, 10)),
            ..project("Proj-3", ProjectStatus::Approved)
        },
        evaluated(ProjectStatus::Rejected, 55, 10),
    ];

    assert!(validate_projects(&projects, &rules()).is_ok());
}

#[test]
fn score_must_match_breakdown_total() {
    let reason = invalid_reason(&[evaluated(ProjectStatus::Rejected, 60, 10)], &rules());

    assert_eq!(reason, "score 60 differs from the breakdown total 55");
}

#[test]
fn criterion_above_maximum_is_refused() {
    let reason = invalid_reason(&[evaluated(ProjectStatus::Approved, 70, 25)], &rules());

    assert_eq!(reason, "Histórico score 25 exceeds the maximum of 20");
}

#[test]
fn score_above_rubric_maximum_is_refused() {
    let reason = invalid_reason(&[evaluated(ProjectStatus::Approved, 150, 99)], &rules());

    assert_eq!(reason, "score 150 exceeds the maximum of 100");
}

#[test]
fn classification_must_follow_threshold() {
    let approved_low = invalid_reason(&[evaluated(ProjectStatus::Approved, 55, 10)], &rules());
    let lenient = EditalRules {
        approval_threshold: 60,
        ..rules()
    };
    let rejected_high = invalid_reason(&[evaluated(ProjectStatus::Rejected, 65, 20)], &lenient);

    assert_eq!(approved_low, "approved with score 55 below the threshold of 70");
    assert_eq!(
        rejected_high,
        "rejected with score 65 at or above the threshold of 60"
    );
}

#[test]
fn partial_or_missing_evaluations_are_refused() {
    let missing_score = invalid_reason(&[project("Proj-7", ProjectStatus::Approved)], &rules());
    let missing_breakdown = invalid_reason(
        &[Project {
            score: Some(80),
            ..project("Proj-7", ProjectStatus::Approved)
        }],
        &rules(),
    );
    let scored_pending = invalid_reason(&[evaluated(ProjectStatus::Pending, 55, 10)], &rules());

    assert_eq!(missing_score, "approved without a score");
    assert_eq!(missing_breakdown, "score without a breakdown");
    assert_eq!(scored_pending, "pending project carries a score");
}
