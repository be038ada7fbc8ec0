//! `nessalyzer exploitable` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use nessalyzer_core::config::NessalyzerConfig;
use nessalyzer_report::{AnalyzerEngine, NessusParser};

use crate::cli::ExploitableArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `exploitable` command.
pub fn execute(
    args: ExploitableArgs,
    config: &NessalyzerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(file = %args.file.display(), "listing exploitable findings");
    let parser = NessusParser::new().with_max_file_size(config.report.max_file_size);
    let report = parser.parse_file(&args.file)?;

    let engine = AnalyzerEngine::new(&report);
    let findings: Vec<ExploitableEntry> = engine
        .exploitable_findings()
        .into_iter()
        .map(|finding| ExploitableEntry {
            plugin_id: finding.plugin_id.clone(),
            plugin_name: finding.plugin_name.clone(),
            severity: finding.severity,
            cvss_base_score: finding.cvss_base_score,
            metasploit_name: finding.metasploit_name.clone(),
        })
        .collect();

    let payload = ExploitableReport {
        file: args.file.display().to_string(),
        total: findings.len(),
        findings,
    };
    writer.render(&payload)?;
    Ok(())
}

#[derive(Serialize)]
pub struct ExploitableReport {
    pub file: String,
    pub total: usize,
    pub findings: Vec<ExploitableEntry>,
}

#[derive(Serialize)]
pub struct ExploitableEntry {
    pub plugin_id: String,
    pub plugin_name: String,
    pub severity: u8,
    pub cvss_base_score: Option<f64>,
    pub metasploit_name: Option<String>,
}

impl Render for ExploitableReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.findings.is_empty() {
            writeln!(w, "{}", "No exploitable vulnerabilities found.".yellow())?;
            return Ok(());
        }

        writeln!(
            w,
            "Found {} exploitable vulnerabilities",
            self.total.to_string().red().bold()
        )?;
        writeln!(w)?;
        writeln!(
            w,
            "{:<10} {:<50} {:<9} {:<6} Metasploit",
            "Plugin ID", "Vulnerability Name", "Severity", "CVSS"
        )?;
        writeln!(w, "{}", "-".repeat(95))?;

        for finding in &self.findings {
            let cvss = finding
                .cvss_base_score
                .map(|score| score.to_string())
                .unwrap_or_else(|| "N/A".to_owned());
            writeln!(
                w,
                "{:<10} {:<50} {:<9} {:<6} {}",
                finding.plugin_id,
                finding.plugin_name,
                finding.severity,
                cvss,
                finding.metasploit_name.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload(count: usize) -> ExploitableReport {
        ExploitableReport {
            file: "scan.nessus".to_owned(),
            total: count,
            findings: (0..count)
                .map(|i| ExploitableEntry {
                    plugin_id: i.to_string(),
                    plugin_name: format!("Vuln {i}"),
                    severity: 4,
                    cvss_base_score: Some(9.8),
                    metasploit_name: Some("exploit/test".to_owned()),
                })
                .collect(),
        }
    }

    #[test]
    fn render_text_empty_shows_notice() {
        let mut buffer = Vec::new();
        sample_payload(0).render_text(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("No exploitable vulnerabilities found."));
    }

    #[test]
    fn render_text_lists_findings() {
        let mut buffer = Vec::new();
        sample_payload(2).render_text(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Found"));
        assert!(output.contains("Vuln 0"));
        assert!(output.contains("Vuln 1"));
        assert!(output.contains("exploit/test"));
    }

    #[test]
    fn json_payload_round_trips() {
        let payload = sample_payload(1);
        let json = serde_json::to_string(&payload).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"].as_u64(), Some(1));
        assert_eq!(value["findings"][0]["severity"].as_u64(), Some(4));
    }
}
