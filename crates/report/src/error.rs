//! 리포트 파서 에러 타입
//!
//! [`ReportError`]는 문서 수준의 치명 에러만 나타냅니다.
//! 개별 finding의 추출 실패는 에러가 아니라 진단 싱크에 기록되는
//! 경고이며, 해당 finding만 건너뛰고 파싱은 계속됩니다.
//!
//! `From<ReportError> for NessalyzerError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.

use nessalyzer_core::error::{NessalyzerError, ParseError};

/// 리포트 파서 도메인 에러
///
/// # 에러 변환
///
/// `From<ReportError> for NessalyzerError` 구현으로
/// CLI에서 사용하는 최상위 에러 타입으로 자동 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 문서가 올바른 XML이 아니거나 `<Report>` 루트 요소가 없음
    ///
    /// 치명 에러 — 부분 리포트도 반환되지 않습니다.
    #[error("malformed document: {reason}")]
    MalformedDocument {
        /// 실패 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },
}

impl From<ReportError> for NessalyzerError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MalformedDocument { reason } => {
                NessalyzerError::Parse(ParseError::MalformedDocument(reason))
            }
            ReportError::Io { source, .. } => NessalyzerError::Io(source),
            ReportError::FileTooBig { size, max, .. } => {
                NessalyzerError::Parse(ParseError::TooLarge { size, max })
            }
        }
    }
}
