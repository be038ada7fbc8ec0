//! 리포트 모델 — 파싱 결과 데이터 구조
//!
//! 하나의 스캔 결과 전체를 나타내는 [`Report`]와 그 하위의
//! [`Host`], [`Finding`]을 정의합니다. 모든 타입은 파서가 생성한 이후
//! 변경되지 않으며, 분석 엔진과 내보내기 모듈은 읽기만 합니다.
//!
//! # 소유 관계
//!
//! `Report`가 `Host`를, `Host`가 `Finding`을 배타적으로 소유합니다.
//! 순서는 항상 원본 문서의 등장 순서를 따릅니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 호스트 하나에서 발견된 단일 이슈
///
/// 누락되거나 손상된 원본 필드는 파서가 문서화된 기본값으로 치환하므로
/// `severity`는 항상 존재하고 `cve`에는 빈 항목이 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 플러그인 식별자 (누락 시 "0")
    pub plugin_id: String,
    /// 플러그인 이름 (누락 시 "Unknown Plugin")
    pub plugin_name: String,
    /// 플러그인 패밀리 (누락 시 "None")
    pub plugin_family: String,
    /// 원시 심각도 값 (0=Info .. 4=Critical, 누락/비숫자 시 0)
    pub severity: u8,
    /// 위험도 라벨 (누락 시 "None")
    pub risk_factor: String,
    /// 상세 설명 (누락 시 빈 문자열)
    pub description: String,
    /// 개요
    pub synopsis: Option<String>,
    /// 해결 방법
    pub solution: Option<String>,
    /// CVE 식별자 목록 (빈 항목 없음, 문서 순서)
    pub cve: Vec<String>,
    /// CVSS 기본 점수 (누락/변환 실패 시 None)
    pub cvss_base_score: Option<f64>,
    /// CVSS 벡터 문자열
    pub cvss_vector: Option<String>,
    /// 익스플로잇 존재 여부 — 원본 텍스트가 정확히 "true"일 때만 true
    pub exploit_available: bool,
    /// 익스플로잇 성숙도
    pub exploit_code_maturity: Option<String>,
    /// Metasploit 모듈 이름
    pub metasploit_name: Option<String>,
    /// 플러그인 출력 원문
    pub plugin_output: Option<String>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (severity={})",
            self.plugin_id, self.plugin_name, self.severity,
        )
    }
}

/// 스캔 대상 호스트 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    /// 호스트 이름 (리포트 내 유일하다고 가정하지만 강제하지 않음)
    pub name: String,
    /// IP 주소 (host-ip 속성)
    pub ip: Option<String>,
    /// FQDN (host-fqdn 속성)
    pub fqdn: Option<String>,
    /// 운영체제 (operating-system 속성)
    pub operating_system: Option<String>,
    /// 발견 항목 목록 (문서 순서)
    pub findings: Vec<Finding>,
}

impl Host {
    /// 이름만으로 빈 호스트를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: None,
            fqdn: None,
            operating_system: None,
            findings: Vec::new(),
        }
    }

    /// 호스트의 발견 항목 수를 반환합니다.
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) findings={}",
            self.name,
            self.ip.as_deref().unwrap_or("N/A"),
            self.findings.len(),
        )
    }
}

/// 스캔 결과 전체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// 리포트 이름 (누락 시 "Unnamed Report")
    pub name: String,
    /// 호스트 목록 (문서 순서)
    pub hosts: Vec<Host>,
    /// 정책 이름 (예약 필드 — 현재 파서는 채우지 않음)
    pub policy_name: Option<String>,
    /// 스캔 시작 시각 (예약 필드)
    pub scan_start: Option<String>,
    /// 스캔 종료 시각 (예약 필드)
    pub scan_end: Option<String>,
}

impl Report {
    /// 이름만으로 빈 리포트를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: Vec::new(),
            policy_name: None,
            scan_start: None,
            scan_end: None,
        }
    }

    /// 호스트 수를 반환합니다.
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// 전체 발견 항목 수를 반환합니다.
    pub fn total_finding_count(&self) -> usize {
        self.hosts.iter().map(|h| h.findings.len()).sum()
    }

    /// 모든 발견 항목을 호스트 순서 → 문서 순서로 순회합니다.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.hosts.iter().flat_map(|h| h.findings.iter())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Report({}, {} hosts, {} findings)",
            self.name,
            self.hosts.len(),
            self.total_finding_count(),
        )
    }
}
