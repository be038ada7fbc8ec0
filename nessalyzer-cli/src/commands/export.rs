//! `nessalyzer export` command handler

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use nessalyzer_core::config::NessalyzerConfig;
use nessalyzer_export::{export_to_path, ExportFormat};
use nessalyzer_report::NessusParser;

use crate::cli::ExportArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `export` command.
pub fn execute(
    args: ExportArgs,
    config: &NessalyzerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let format_name = args
        .format
        .as_deref()
        .unwrap_or(&config.export.default_format);
    let format = ExportFormat::parse(format_name)?;

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_out_path(&args.file, format, &config.export.output_dir));

    info!(
        file = %args.file.display(),
        format = %format,
        out = %out_path.display(),
        "exporting report"
    );

    let parser = NessusParser::new().with_max_file_size(config.report.max_file_size);
    let report = parser.parse_file(&args.file)?;
    export_to_path(&report, format, &out_path)?;

    let payload = ExportResult {
        file: args.file.display().to_string(),
        format: format.to_string(),
        out: out_path.display().to_string(),
        host_count: report.host_count(),
        finding_count: report.total_finding_count(),
    };
    writer.render(&payload)?;
    Ok(())
}

/// Derive the output path from the input file name and format extension.
fn default_out_path(input: &Path, format: ExportFormat, output_dir: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    Path::new(output_dir).join(format!("{stem}.{}", format.extension()))
}

#[derive(Serialize)]
pub struct ExportResult {
    pub file: String,
    pub format: String,
    pub out: String,
    pub host_count: usize,
    pub finding_count: usize,
}

impl Render for ExportResult {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{} Report exported to {}",
            "✓".green().bold(),
            self.out.bold()
        )?;
        writeln!(
            w,
            "  format: {}, hosts: {}, findings: {}",
            self.format, self.host_count, self.finding_count
        )?;
        Ok(())
    }
}
