//! 설정 관리 — nessalyzer.toml 파싱 및 런타임 설정
//!
//! [`NessalyzerConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`NESSALYZER_GENERAL_LOG_LEVEL=debug` 형식)
//! 3. 설정 파일 (`nessalyzer.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```
//! use nessalyzer_core::config::NessalyzerConfig;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = NessalyzerConfig::parse("[general]\nlog_level = \"debug\"").unwrap();
//! assert_eq!(config.general.log_level, "debug");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, NessalyzerError};

/// Nessalyzer 통합 설정
///
/// `nessalyzer.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NessalyzerConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리포트 파서 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 내보내기 설정
    #[serde(default)]
    pub export: ExportConfig,
}

impl NessalyzerConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NessalyzerError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NessalyzerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NessalyzerError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                NessalyzerError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, NessalyzerError> {
        toml::from_str(toml_str).map_err(|e| {
            NessalyzerError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `NESSALYZER_{SECTION}_{FIELD}`
    /// 예: `NESSALYZER_GENERAL_LOG_LEVEL=debug`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "NESSALYZER_GENERAL_LOG_LEVEL");
        override_string(
            &mut self.general.log_format,
            "NESSALYZER_GENERAL_LOG_FORMAT",
        );

        // Report
        override_usize(
            &mut self.report.max_file_size,
            "NESSALYZER_REPORT_MAX_FILE_SIZE",
        );

        // Export
        override_string(
            &mut self.export.default_format,
            "NESSALYZER_EXPORT_DEFAULT_FORMAT",
        );
        override_string(&mut self.export.output_dir, "NESSALYZER_EXPORT_OUTPUT_DIR");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), NessalyzerError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // max_file_size 검증
        if self.report.max_file_size == 0 || self.report.max_file_size > MAX_FILE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "report.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            }
            .into());
        }

        // export 형식 검증
        let valid_export_formats = ["csv", "json"];
        if !valid_export_formats.contains(&self.export.default_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "export.default_format".to_owned(),
                reason: format!("must be one of: {}", valid_export_formats.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 설정 상한값 상수
const MAX_FILE_SIZE: usize = 500 * 1024 * 1024; // 500 MB

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 리포트 파서 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// .nessus 파일 최대 허용 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50 MB
        }
    }
}

/// 내보내기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 기본 출력 형식 (csv, json)
    pub default_format: String,
    /// 기본 출력 디렉토리
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_owned(),
            output_dir: ".".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key)
        && let Ok(parsed) = val.parse::<usize>()
    {
        *target = parsed;
    }
}
