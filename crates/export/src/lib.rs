#![doc = include_str!("../README.md")]

pub mod csv;
pub mod error;
pub mod format;
pub mod json;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use metrics::counter;
use tracing::info;

use nessalyzer_core::metrics::{EXPORT_REPORTS_EXPORTED_TOTAL, LABEL_FORMAT};
use nessalyzer_report::Report;

// --- 주요 타입 re-export ---
pub use csv::CsvExporter;
pub use error::ExporterError;
pub use format::ExportFormat;
pub use json::JsonExporter;

/// 형식별 직렬화 구현의 공통 인터페이스
///
/// 구현체는 리포트를 읽기만 하며, 같은 리포트에 대해 항상 같은
/// 바이트를 생성해야 합니다.
pub trait Exporter {
    /// 이 구현이 담당하는 출력 형식
    fn format(&self) -> ExportFormat;

    /// 리포트를 직렬화하여 writer에 기록합니다.
    fn write(&self, report: &Report, out: &mut dyn io::Write) -> Result<(), ExporterError>;
}

/// 형식에 맞는 Exporter 구현을 반환합니다.
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Csv => Box::new(CsvExporter),
        ExportFormat::Json => Box::new(JsonExporter),
    }
}

/// 리포트를 지정한 형식으로 파일에 내보냅니다.
///
/// # 사용 예시
///
/// ```no_run
/// use nessalyzer_export::{export_to_path, ExportFormat};
/// use nessalyzer_report::Report;
///
/// let report = Report::new("demo");
/// export_to_path(&report, ExportFormat::Json, "report.json").unwrap();
/// ```
pub fn export_to_path(
    report: &Report,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<(), ExporterError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();
    info!(target: "nessalyzer", format = %format, path = %display_path, "exporting report");

    let file = File::create(path).map_err(|source| ExporterError::Io {
        path: display_path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    exporter_for(format)
        .write(report, &mut writer)
        .map_err(|err| err.with_path(&display_path))?;

    counter!(EXPORT_REPORTS_EXPORTED_TOTAL, LABEL_FORMAT => format.as_str()).increment(1);
    info!(target: "nessalyzer", format = %format, path = %display_path, "export complete");
    Ok(())
}
