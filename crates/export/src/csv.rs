//! CSV 내보내기
//!
//! 호스트×finding 조합마다 한 행을 씁니다. 필드 값에 따옴표 이스케이프를
//! 적용하고, 스프레드시트가 수식으로 해석할 수 있는 프리픽스는
//! 작은따옴표로 무력화합니다.

use std::io;

use nessalyzer_report::Report;

use crate::error::ExporterError;
use crate::format::ExportFormat;
use crate::Exporter;

/// CSV 헤더 행
const HEADER: &str =
    "Host,IP,Plugin ID,Plugin Name,Severity,Risk Factor,CVSS Base Score,Exploit Available,CVE";

/// CSV 형식 내보내기 구현
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write(&self, report: &Report, out: &mut dyn io::Write) -> Result<(), ExporterError> {
        writeln!(out, "{HEADER}")?;

        for host in &report.hosts {
            for finding in &host.findings {
                let cvss = finding
                    .cvss_base_score
                    .map(|score| score.to_string())
                    .unwrap_or_default();
                let cve = finding.cve.join(", ");
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{}",
                    csv_escape(&host.name),
                    csv_escape(host.ip.as_deref().unwrap_or("")),
                    csv_escape(&finding.plugin_id),
                    csv_escape(&finding.plugin_name),
                    finding.severity,
                    csv_escape(&finding.risk_factor),
                    cvss,
                    if finding.exploit_available { "Yes" } else { "No" },
                    csv_escape(&cve),
                )?;
            }
        }
        Ok(())
    }
}

/// CSV 필드 이스케이프
///
/// 구분자/따옴표/개행이 있으면 따옴표로 감싸고, 수식 프리픽스가 있으면
/// 작은따옴표를 앞에 붙여 수식 해석을 막습니다.
fn csv_escape(s: &str) -> String {
    let needs_quoting = s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r');
    let has_formula_prefix = matches!(
        s.as_bytes().first(),
        Some(b'=' | b'+' | b'-' | b'@' | b'\t' | b'\r')
    );

    if has_formula_prefix {
        format!("\"'{}\"", s.replace('"', "\"\""))
    } else if needs_quoting {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}
