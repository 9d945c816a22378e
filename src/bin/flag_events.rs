use dead_cell_filter::config::flag_events::{self, OutputFormat};
use dead_cell_filter::config::io::{load_events, write_json_file};
use dead_cell_filter::diagnostics::{EventReport, IndexStage, RunSummary};
use dead_cell_filter::{Conditions, DeadCellFilter};
use serde::Serialize;
use std::env;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlagReport<'a> {
    index: &'a IndexStage,
    summary: &'a RunSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [EventReport]>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "flag_events".to_string());
    let config = flag_events::parse_cli(&program)?;

    let detector = config.detector.build();
    let events = load_events(&config.events)?;

    let mut filter = DeadCellFilter::new(config.filter.clone());
    filter
        .begin_run(&Conditions::from_provider(&detector), &config.run)
        .map_err(|e| format!("Failed to start run {}: {e}", config.run.run))?;
    let reports = filter
        .evaluate_batch_with_diagnostics(&events)
        .map_err(|e| e.to_string())?;

    let mut summary = RunSummary::new(config.run.run);
    for report in &reports {
        summary.record_report(report);
    }
    let index = filter
        .index_stage()
        .ok_or_else(|| "run state missing after begin_run".to_string())?;

    if config.output.format.includes_text() {
        print_text_summary(index, &summary, &reports);
    }

    if config.output.format.includes_json() {
        let report = FlagReport {
            index,
            summary: &summary,
            events: config.output.per_event.then_some(reports.as_slice()),
        };
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &report)?;
            if config.output.format.includes_text() {
                println!("\nJSON report written to {}", path.display());
            } else {
                println!("JSON report written to {}", path.display());
            }
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if config.output.format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    Ok(())
}

fn print_text_summary(index: &IndexStage, summary: &RunSummary, reports: &[EventReport]) {
    println!("Run {}", index.run);
    println!(
        "  masked cells: {} (grid A {}, grid B {}) in {} towers, threshold {}",
        index.masked_cells, index.grid_a_cells, index.grid_b_cells, index.groups, index.threshold
    );
    println!(
        "  tower method: {:?} (index built in {:.3} ms)",
        index.tower_method, index.elapsed_ms
    );

    println!("\nEvents");
    for report in reports {
        let d = &report.decision;
        let nearest = report
            .objects
            .as_ref()
            .and_then(|o| {
                o.matches
                    .iter()
                    .filter_map(|m| m.nearest.map(|n| n.distance))
                    .min_by(f64::total_cmp)
            })
            .map_or_else(|| "-".to_string(), |d| format!("{d:.3}"));
        println!(
            "  {}:{}:{} tower={:+} objects={} boundary={} nearest_dr={} pass={}{}",
            report.id.run,
            report.id.lumi,
            report.id.event,
            d.tower.result,
            d.objects.result,
            d.boundary_code,
            nearest,
            d.pass,
            if d.pass != d.raw_pass { " (tagged)" } else { "" }
        );
        for warning in report.warnings() {
            println!("    warning: {warning}");
        }
    }

    println!("\n{summary}");
}
