//! JSON 내보내기
//!
//! 리포트 모델 전체를 pretty JSON으로 직렬화합니다. 출력 스키마는
//! [`Report`] 타입의 serde 표현과 동일합니다.

use std::io;

use nessalyzer_report::Report;

use crate::error::ExporterError;
use crate::format::ExportFormat;
use crate::Exporter;

/// JSON 형식 내보내기 구현
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn write(&self, report: &Report, out: &mut dyn io::Write) -> Result<(), ExporterError> {
        serde_json::to_writer_pretty(&mut *out, report).map_err(|err| {
            if err.is_io() {
                ExporterError::Io {
                    path: String::new(),
                    source: io::Error::new(io::ErrorKind::Other, err),
                }
            } else {
                ExporterError::Serialize {
                    reason: err.to_string(),
                }
            }
        })?;
        // 후행 개행으로 파일을 마무리
        writeln!(out)?;
        Ok(())
    }
}
