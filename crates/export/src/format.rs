//! 출력 형식 열거

use std::fmt;

use crate::error::ExporterError;

/// 지원하는 내보내기 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// 호스트×finding 행 단위 CSV
    Csv,
    /// 리포트 모델 전체의 pretty JSON
    Json,
}

impl ExportFormat {
    /// 소문자 형식 이름을 반환합니다. 메트릭 레이블로도 사용됩니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// 출력 파일 확장자를 반환합니다.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// 대소문자와 앞뒤 공백을 무시하고 형식 이름을 해석합니다.
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// [`from_str_loose`](Self::from_str_loose)의 에러 반환 버전입니다.
    pub fn parse(value: &str) -> Result<Self, ExporterError> {
        Self::from_str_loose(value).ok_or_else(|| ExporterError::UnsupportedFormat {
            name: value.to_owned(),
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
