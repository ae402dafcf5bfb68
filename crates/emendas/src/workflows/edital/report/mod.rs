mod summary;
pub mod views;

pub use summary::{
    average_score, compute_stats, count_by_evaluator_and_status, count_by_status,
    count_by_theme, distinct_effective_evaluators, distinct_municipalities, effective_evaluator,
    filter_options,
};
