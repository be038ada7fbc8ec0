//! 에러 타입 — 도메인별 에러 정의

/// Nessalyzer 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum NessalyzerError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 스캔 리포트 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 리포트 내보내기 에러
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 스캔 리포트 파싱 에러
///
/// 문서 수준의 구조적 문제만 포함합니다.
/// 개별 finding 수준의 문제는 에러가 아닌 진단 경고로 처리됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 문서가 올바른 XML이 아니거나 필수 루트 요소가 없음
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// 파싱 실패 (기타)
    #[error("parse failed: {0}")]
    Failed(String),
}

/// 리포트 내보내기 에러
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// 직렬화 실패
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// 출력 쓰기 실패
    #[error("write failed: {path}: {reason}")]
    Write { path: String, reason: String },

    /// 지원하지 않는 출력 형식
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "nessalyzer.toml".to_owned(),
        };
        assert!(err.to_string().contains("nessalyzer.toml"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MalformedDocument("missing <Report> root".to_owned());
        let msg = err.to_string();
        assert!(msg.contains("malformed document"));
        assert!(msg.contains("missing <Report> root"));
    }

    #[test]
    fn parse_error_too_large_display() {
        let err = ParseError::TooLarge {
            size: 20_000_000,
            max: 10_000_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains("10000000"));
    }

    #[test]
    fn export_error_display() {
        let err = ExportError::Write {
            path: "/tmp/out.csv".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out.csv"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn converts_to_top_level_error() {
        let err: NessalyzerError = ParseError::MalformedDocument("bad".to_owned()).into();
        assert!(matches!(
            err,
            NessalyzerError::Parse(ParseError::MalformedDocument(_))
        ));

        let err: NessalyzerError = ConfigError::ParseFailed {
            reason: "bad toml".to_owned(),
        }
        .into();
        assert!(matches!(err, NessalyzerError::Config(_)));

        let err: NessalyzerError = ExportError::Serialize("fail".to_owned()).into();
        assert!(matches!(err, NessalyzerError::Export(_)));
    }

    #[test]
    fn converts_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: NessalyzerError = io_err.into();
        assert!(matches!(err, NessalyzerError::Io(_)));
    }
}
