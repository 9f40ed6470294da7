//! CLI presentation: text and JSON rendering of generation reports.

use crate::emit::GenerationReport;
use crate::error::GenError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_generation_text(report: &GenerationReport) -> String {
    let mut out = format!(
        "Generated {} shards ({} types) across {} files\n",
        report.shards.len(),
        report.total_types,
        report.files.len()
    );
    let counts = report.shards_per_file();
    for (index, path) in report.files.iter().enumerate() {
        let shards = counts.get(index).copied().unwrap_or_default();
        out.push_str(&format!("  {} ({} shards)\n", path.display(), shards));
    }
    out
}

pub fn format_generation_json(report: &GenerationReport) -> Result<String, GenError> {
    let files: Vec<String> = report
        .files
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    let value = json!({
        "files": files,
        "shards": report.shards.len(),
        "types": report.total_types,
        "shards_per_file": report.shards_per_file(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn format_plan_text(report: &GenerationReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "File", "Suite", "Shard", "Types"]);
    for record in &report.shards {
        table.add_row(vec![
            record.counter.value().to_string(),
            record.file_index.to_string(),
            record.suite.to_string(),
            record.name.clone(),
            record.len.to_string(),
        ]);
    }
    format!(
        "{}\n\n{} shards, {} types, {} files\n",
        table,
        report.shards.len(),
        report.total_types,
        report.file_limit
    )
}

pub fn format_plan_json(report: &GenerationReport) -> Result<String, GenError> {
    let value = json!({
        "file_limit": report.file_limit,
        "types": report.total_types,
        "shards": report.shards,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
