//! 내보내기 에러 타입

use nessalyzer_core::error::{ExportError, NessalyzerError};

/// 내보내기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    /// 파일 생성/쓰기 실패
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로 (버퍼 대상 쓰기면 빈 문자열)
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 직렬화 실패
    #[error("serialize error: {reason}")]
    Serialize {
        /// 실패 사유
        reason: String,
    },

    /// 알 수 없는 형식 이름
    #[error("unsupported export format: {name}")]
    UnsupportedFormat {
        /// 요청된 형식 이름
        name: String,
    },
}

impl ExporterError {
    /// 경로 정보가 없는 I/O 에러에 경로를 채워 넣습니다.
    pub(crate) fn with_path(self, path: &str) -> Self {
        match self {
            Self::Io { path: old, source } if old.is_empty() => Self::Io {
                path: path.to_owned(),
                source,
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: String::new(),
            source,
        }
    }
}

impl From<ExporterError> for NessalyzerError {
    fn from(err: ExporterError) -> Self {
        match err {
            ExporterError::Io { path, source } => NessalyzerError::Export(ExportError::Write {
                path,
                reason: source.to_string(),
            }),
            ExporterError::Serialize { reason } => {
                NessalyzerError::Export(ExportError::Serialize(reason))
            }
            ExporterError::UnsupportedFormat { name } => {
                NessalyzerError::Export(ExportError::UnsupportedFormat(name))
            }
        }
    }
}
