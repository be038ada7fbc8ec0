//! `nessalyzer parse` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use nessalyzer_core::config::NessalyzerConfig;
use nessalyzer_report::{AnalyzerEngine, NessusParser, Report};

use crate::cli::ParseArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `parse` command.
pub fn execute(
    args: ParseArgs,
    config: &NessalyzerConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    check_extension(&args.file)?;

    info!(file = %args.file.display(), "parsing nessus file");
    let parser = NessusParser::new().with_max_file_size(config.report.max_file_size);
    let report = parser.parse_file(&args.file)?;

    let payload = build_parse_report(&args.file.display().to_string(), &report, args.summary);
    writer.render(&payload)?;
    Ok(())
}

fn check_extension(file: &std::path::Path) -> Result<(), CliError> {
    match file.extension().and_then(|e| e.to_str()) {
        Some("nessus") => Ok(()),
        _ => Err(CliError::Command(
            "input file must have a .nessus extension".to_owned(),
        )),
    }
}

fn build_parse_report(file: &str, report: &Report, summary: bool) -> ParseReport {
    let engine = AnalyzerEngine::new(report);
    let risk = engine.risk_summary();

    ParseReport {
        file: file.to_owned(),
        name: report.name.clone(),
        host_count: report.host_count(),
        finding_count: report.total_finding_count(),
        severity: SeveritySummary {
            critical: risk.critical,
            high: risk.high,
            medium: risk.medium,
            low: risk.low,
            info: risk.info,
        },
        exploitable_count: engine.exploitable_findings().len(),
        hosts: if summary {
            Vec::new()
        } else {
            report
                .hosts
                .iter()
                .map(|host| HostEntry {
                    name: host.name.clone(),
                    ip: host.ip.clone(),
                    operating_system: host.operating_system.clone(),
                    finding_count: host.finding_count(),
                })
                .collect()
        },
    }
}

#[derive(Serialize)]
pub struct ParseReport {
    pub file: String,
    pub name: String,
    pub host_count: usize,
    pub finding_count: usize,
    pub severity: SeveritySummary,
    pub exploitable_count: usize,
    /// Empty when only the summary was requested.
    pub hosts: Vec<HostEntry>,
}

#[derive(Serialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

#[derive(Serialize)]
pub struct HostEntry {
    pub name: String,
    pub ip: Option<String>,
    pub operating_system: Option<String>,
    pub finding_count: usize,
}

impl Render for ParseReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Report: {}", self.name.bold())?;
        writeln!(w, "File: {}", self.file)?;
        writeln!(
            w,
            "Hosts: {}  Findings: {}",
            self.host_count, self.finding_count
        )?;
        writeln!(w)?;

        writeln!(w, "{:<10} Count", "Severity")?;
        writeln!(w, "{}", "-".repeat(18))?;
        writeln!(
            w,
            "{:<10} {}",
            "Critical".red().bold(),
            self.severity.critical
        )?;
        writeln!(w, "{:<10} {}", "High".red(), self.severity.high)?;
        writeln!(w, "{:<10} {}", "Medium".yellow(), self.severity.medium)?;
        writeln!(w, "{:<10} {}", "Low".green(), self.severity.low)?;
        writeln!(w, "{:<10} {}", "Info".blue(), self.severity.info)?;
        writeln!(w)?;

        if self.exploitable_count > 0 {
            writeln!(
                w,
                "Exploitable findings: {}",
                self.exploitable_count.to_string().red().bold()
            )?;
        } else {
            writeln!(w, "Exploitable findings: {}", "0".green())?;
        }

        if !self.hosts.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{:<25} {:<16} {:<30} Findings",
                "Host", "IP", "Operating System"
            )?;
            writeln!(w, "{}", "-".repeat(82))?;
            for host in &self.hosts {
                writeln!(
                    w,
                    "{:<25} {:<16} {:<30} {}",
                    host.name,
                    host.ip.as_deref().unwrap_or("N/A"),
                    host.operating_system.as_deref().unwrap_or("N/A"),
                    host.finding_count
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parsed(xml: &str) -> Report {
        NessusParser::new().parse_str(xml).unwrap()
    }

    #[test]
    fn check_extension_accepts_nessus_files() {
        assert!(check_extension(Path::new("scan.nessus")).is_ok());
        assert!(check_extension(Path::new("/tmp/dir/weekly.nessus")).is_ok());
    }

    #[test]
    fn check_extension_rejects_other_files() {
        let err = check_extension(Path::new("scan.xml")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains(".nessus"));

        assert!(check_extension(Path::new("noextension")).is_err());
    }

    #[test]
    fn build_parse_report_full_listing() {
        let report = parsed(
            r#"<Report name="r"><ReportHost name="h">
                 <HostProperties><tag name="host-ip">10.0.0.1</tag></HostProperties>
                 <ReportItem pluginID="1" severity="4">
                   <exploit_available>true</exploit_available>
                 </ReportItem>
                 <ReportItem pluginID="2" severity="2"/>
               </ReportHost></Report>"#,
        );
        let payload = build_parse_report("scan.nessus", &report, false);

        assert_eq!(payload.host_count, 1);
        assert_eq!(payload.finding_count, 2);
        assert_eq!(payload.severity.critical, 1);
        assert_eq!(payload.severity.medium, 1);
        assert_eq!(payload.exploitable_count, 1);
        assert_eq!(payload.hosts.len(), 1);
        assert_eq!(payload.hosts[0].ip.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn build_parse_report_summary_omits_hosts() {
        let report = parsed(r#"<Report name="r"><ReportHost name="h"/></Report>"#);
        let payload = build_parse_report("scan.nessus", &report, true);
        assert!(payload.hosts.is_empty());
        assert_eq!(payload.host_count, 1);
    }

    #[test]
    fn render_text_lists_severities() {
        let report = parsed(
            r#"<Report name="render"><ReportHost name="h">
                 <ReportItem pluginID="1" severity="3"/>
               </ReportHost></Report>"#,
        );
        let payload = build_parse_report("scan.nessus", &report, true);

        let mut buffer = Vec::new();
        payload.render_text(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("render"));
        assert!(output.contains("Critical"));
        assert!(output.contains("Exploitable findings"));
    }
}
