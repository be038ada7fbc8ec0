//! 분석 엔진 — 파싱된 리포트에 대한 읽기 전용 질의
//!
//! [`AnalyzerEngine`]은 리포트를 빌리기만 하며 절대 수정하지 않습니다.
//! 모든 질의는 순수 함수이고 호출 순서와 무관하게 같은 결과를
//! 반환합니다. 반환되는 참조의 수명은 리포트의 수명을 따릅니다.

use std::collections::{BTreeSet, HashMap};

use nessalyzer_core::diag::{DiagnosticSink, TracingSink};
use nessalyzer_core::types::Severity;

use crate::types::{Finding, Report};

/// 기본 심각도 필터 임계값 (High)
pub const DEFAULT_SEVERITY_THRESHOLD: u8 = 3;

/// 리포트 읽기 전용 분석 엔진
///
/// # 사용 예시
///
/// ```
/// use nessalyzer_report::{AnalyzerEngine, NessusParser};
///
/// let xml = r#"<Report name="r"><ReportHost name="h">
///   <ReportItem pluginID="1" severity="4">
///     <exploit_available>true</exploit_available>
///   </ReportItem>
///   <ReportItem pluginID="2" severity="1"/>
/// </ReportHost></Report>"#;
///
/// let report = NessusParser::new().parse_str(xml).unwrap();
/// let engine = AnalyzerEngine::new(&report);
/// assert_eq!(engine.exploitable_findings().len(), 1);
/// assert_eq!(engine.risk_summary().total(), 2);
/// ```
pub struct AnalyzerEngine<'a> {
    report: &'a Report,
    diag: Box<dyn DiagnosticSink>,
}

impl<'a> AnalyzerEngine<'a> {
    /// tracing 진단 싱크로 엔진을 생성합니다.
    pub fn new(report: &'a Report) -> Self {
        Self {
            report,
            diag: Box::new(TracingSink::new()),
        }
    }

    /// 지정한 진단 싱크로 엔진을 생성합니다.
    pub fn with_sink(report: &'a Report, diag: Box<dyn DiagnosticSink>) -> Self {
        Self { report, diag }
    }

    /// 분석 대상 리포트를 반환합니다.
    pub fn report(&self) -> &'a Report {
        self.report
    }

    /// 익스플로잇이 존재하는 finding만 문서 순서로 반환합니다.
    pub fn exploitable_findings(&self) -> Vec<&'a Finding> {
        self.report
            .findings()
            .filter(|f| f.exploit_available)
            .collect()
    }

    /// 심각도가 `threshold` 이상인 finding을 문서 순서로 반환합니다.
    ///
    /// `threshold == 0`이면 모든 finding이 반환됩니다.
    pub fn findings_by_severity(&self, threshold: u8) -> Vec<&'a Finding> {
        self.report
            .findings()
            .filter(|f| f.severity >= threshold)
            .collect()
    }

    /// 호스트 이름 → finding 슬라이스 매핑을 만듭니다.
    ///
    /// 같은 이름의 호스트가 여러 번 등장하면 마지막 호스트가 이깁니다.
    /// 이때 정보성 진단을 남깁니다.
    pub fn group_by_host(&self) -> HashMap<&'a str, &'a [Finding]> {
        let mut groups: HashMap<&'a str, &'a [Finding]> = HashMap::new();
        for host in &self.report.hosts {
            if groups
                .insert(host.name.as_str(), host.findings.as_slice())
                .is_some()
            {
                self.diag.info(&format!(
                    "duplicate host name '{}': keeping the last occurrence",
                    host.name
                ));
            }
        }
        groups
    }

    /// 심각도별 finding 개수 요약을 만듭니다.
    pub fn risk_summary(&self) -> RiskSummary {
        let mut summary = RiskSummary::default();
        for finding in self.report.findings() {
            match Severity::from_level(finding.severity) {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    }

    /// 리포트에 등장하는 Metasploit 모듈 이름을 정렬·중복 제거하여
    /// 반환합니다. 빈 문자열은 제외합니다.
    pub fn metasploit_modules(&self) -> BTreeSet<&'a str> {
        self.report
            .findings()
            .filter_map(|f| f.metasploit_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// 심각도별 finding 개수 요약
///
/// 항상 다섯 단계 전부를 담습니다. 등장하지 않은 단계는 0입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RiskSummary {
    /// Critical (severity 4) 개수
    pub critical: usize,
    /// High (severity 3) 개수
    pub high: usize,
    /// Medium (severity 2) 개수
    pub medium: usize,
    /// Low (severity 1) 개수
    pub low: usize,
    /// Info (severity 0 및 범위 밖) 개수
    pub info: usize,
}

impl RiskSummary {
    /// 전체 finding 수를 반환합니다. 리포트의 finding 수와 항상 같습니다.
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }

    /// 지정한 심각도의 개수를 반환합니다.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    /// (심각도, 개수) 쌍을 Critical부터 Info 순서로 반환합니다.
    pub fn entries(&self) -> [(Severity, usize); 5] {
        [
            (Severity::Critical, self.critical),
            (Severity::High, self.high),
            (Severity::Medium, self.medium),
            (Severity::Low, self.low),
            (Severity::Info, self.info),
        ]
    }
}
