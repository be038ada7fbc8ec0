//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 스캔 결과의 심각도 표현을 정의합니다.
//! 각 모듈은 이 타입을 사용하여 심각도를 비교하고 집계합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 심각도 레벨
///
/// Nessus 스캔 결과의 심각도를 나타냅니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Info < Low < Medium < High < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// 정보성 이벤트
    #[default]
    Info,
    /// 낮은 심각도
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적 — 즉시 대응 필요
    Critical,
}

impl Severity {
    /// Nessus 원시 심각도 값(0-4)에서 심각도를 생성합니다.
    ///
    /// 매핑 테이블이 인식하지 못하는 값(5 이상)은 `Info`로 취급합니다.
    pub fn from_level(level: u8) -> Self {
        match level {
            4 => Self::Critical,
            3 => Self::High,
            2 => Self::Medium,
            1 => Self::Low,
            _ => Self::Info,
        }
    }

    /// 심각도에 대응하는 원시 레벨 값을 반환합니다.
    pub fn level(&self) -> u8 {
        match self {
            Self::Info => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "informational" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_from_level() {
        assert_eq!(Severity::from_level(0), Severity::Info);
        assert_eq!(Severity::from_level(1), Severity::Low);
        assert_eq!(Severity::from_level(2), Severity::Medium);
        assert_eq!(Severity::from_level(3), Severity::High);
        assert_eq!(Severity::from_level(4), Severity::Critical);
    }

    #[test]
    fn severity_from_level_unknown_is_info() {
        // Values outside the recognized 0-4 range fall back to Info
        assert_eq!(Severity::from_level(5), Severity::Info);
        assert_eq!(Severity::from_level(255), Severity::Info);
    }

    #[test]
    fn severity_level_roundtrip() {
        for level in 0..=4u8 {
            assert_eq!(Severity::from_level(level).level(), level);
        }
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Info.to_string(), "Info");
        assert_eq!(Severity::Low.to_string(), "Low");
        assert_eq!(Severity::Medium.to_string(), "Medium");
        assert_eq!(Severity::High.to_string(), "High");
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }

    #[test]
    fn severity_from_str_loose() {
        assert_eq!(Severity::from_str_loose("info"), Some(Severity::Info));
        assert_eq!(
            Severity::from_str_loose("CRITICAL"),
            Some(Severity::Critical)
        );
        assert_eq!(Severity::from_str_loose("Med"), Some(Severity::Medium));
        assert_eq!(Severity::from_str_loose("unknown"), None);
    }

    #[test]
    fn severity_serialize_deserialize() {
        let severity = Severity::High;
        let json = serde_json::to_string(&severity).unwrap();
        let deserialized: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(severity, deserialized);
    }
}
