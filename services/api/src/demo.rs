use crate::infra::load_dataset;
use chrono::{Local, NaiveDate};
use clap::Args;
use emendas::config::AppConfig;
use emendas::error::AppError;
use emendas::workflows::edital::assistant::{self, GREETING};
use emendas::workflows::edital::{
    compute_stats, format_brl, BulkAnalysisOutcome, DashboardStats, EditalParameters,
    EditalReviewService, EvaluationProvenance, InMemoryProjectStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// JSON array of projects (defaults to the bundled 2026 submissions)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Reporting date used to resolve the call phase (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// JSON array of projects (defaults to the bundled 2026 submissions)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { dataset, today } = args;

    let config = AppConfig::load()?;
    let projects = load_dataset(dataset.as_deref(), &config.edital.rules)?;
    let parameters = EditalParameters::edital_2026(config.edital.rules);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let phase = parameters.timeline.phase_on(today);
    println!("Edital de Emendas {}", parameters.budget.year);
    println!("Fase em {}: {}", today.format("%d/%m/%Y"), phase.label());

    let stats = compute_stats(&projects, &parameters.rules);
    for line in dashboard_lines(&stats) {
        println!("{line}");
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let projects = load_dataset(args.dataset.as_deref(), &config.edital.rules)?;
    let rules = config.edital.rules;
    let parameters = EditalParameters::edital_2026(rules.clone());

    let repository = Arc::new(InMemoryProjectStore::new(projects));
    let service = EditalReviewService::new(repository, rules)
        .with_analysis_delay(config.edital.analysis_delay);

    println!("Painel de Emendas demo");
    println!("{GREETING}");

    let before = match service.stats() {
        Ok(stats) => stats,
        Err(err) => {
            println!("  Dashboard unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nAntes da análise automática");
    for line in dashboard_lines(&before) {
        println!("{line}");
    }

    match service.auto_evaluate_all().await {
        Ok(BulkAnalysisOutcome::Completed { evaluated }) => {
            println!("\nAnálise automática concluída: {evaluated} projeto(s) avaliados");
        }
        Ok(BulkAnalysisOutcome::AlreadyRunning) => {
            println!("\nAnálise automática já em andamento");
        }
        Err(err) => {
            println!("\nAnálise automática indisponível: {err}");
            return Ok(());
        }
    }

    let projects = match service.list() {
        Ok(projects) => projects,
        Err(err) => {
            println!("  Project listing unavailable: {err}");
            return Ok(());
        }
    };
    for project in projects
        .iter()
        .filter(|project| project.provenance == EvaluationProvenance::Automatic)
    {
        println!(
            "- {} {} | {} | nota {} | {}",
            project.id,
            project.project_name,
            format_brl(project.requested_value),
            project.score.unwrap_or_default(),
            project.status.label()
        );
    }

    println!("\nDepois da análise automática");
    for line in dashboard_lines(&compute_stats(&projects, service.rules())) {
        println!("{line}");
    }

    let answer = assistant::reply("Quais são os critérios de nota?", &parameters);
    println!("\nAssistente: {}", answer.reply);

    Ok(())
}

pub(crate) fn dashboard_lines(stats: &DashboardStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Projetos: {} | Classificados: {} | Valor solicitado: {} | Nota média: {:.1}",
            stats.total_count,
            stats.approved_count,
            format_brl(stats.total_requested_budget),
            stats.average_score
        ),
        "Distribuição por status".to_string(),
    ];

    for entry in stats.count_by_status.entries() {
        lines.push(format!("- {}: {}", entry.status_label, entry.count));
    }

    lines.push("Projetos por área".to_string());
    for entry in &stats.count_by_theme {
        lines.push(format!("- {}: {}", entry.theme, entry.count));
    }

    lines.push("Avaliações por avaliador".to_string());
    for breakdown in &stats.count_by_evaluator_and_status {
        let statuses = breakdown
            .statuses
            .iter()
            .map(|entry| format!("{} {}", entry.count, entry.status_label))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "- {} ({}): {}",
            breakdown.evaluator, breakdown.total, statuses
        ));
    }

    lines
}
