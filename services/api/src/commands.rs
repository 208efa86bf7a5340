use std::fs;
use std::path::PathBuf;

use clap::Args;
use hiring_guru::coding::{score, Language, TestResult, TestSummary};
use hiring_guru::error::AppError;
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding an array of test results (camelCase fields, as returned by the API)
    pub(crate) path: PathBuf,
    /// Emit compact JSON instead of the human-readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoreReport {
    pub(crate) score: f64,
    pub(crate) summary: TestSummary,
}

pub(crate) fn score_report(results: &[TestResult]) -> ScoreReport {
    ScoreReport {
        score: score(results),
        summary: TestSummary::from_results(results),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.path)?;
    let results: Vec<TestResult> = serde_json::from_str(&raw)?;
    let report = score_report(&results);

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    let summary = &report.summary;
    println!("Submission score: {:.2}", report.score);
    println!(
        "Passed {}/{} test cases ({:.1}%), status {:?}",
        summary.passed_tests, summary.total_tests, summary.success_rate, summary.status
    );
    match summary.avg_execution_time {
        Some(time) => println!("Average execution time: {time:.3}s"),
        None => println!("Average execution time: not reported"),
    }
    if let Some(memory) = summary.avg_memory {
        println!("Average memory: {memory:.0} KB");
    }
    Ok(())
}

pub(crate) fn language_table() -> String {
    let mut table = format!("{:<12} {:>8}\n", "LANGUAGE", "JUDGE ID");
    for language in Language::ALL {
        table.push_str(&format!("{:<12} {:>8}\n", language.name(), language.judge_id()));
    }
    table
}

pub(crate) fn run_languages() -> Result<(), AppError> {
    print!("{}", language_table());
    Ok(())
}
