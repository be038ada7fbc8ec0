//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `nessalyzer_`
//! - 모듈명: `report_`, `export_`
//! - 접미어: `_total` (counter)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 심각도 레이블 키 (info, low, medium, high, critical)
pub const LABEL_SEVERITY: &str = "severity";

/// 출력 형식 레이블 키 (csv, json)
pub const LABEL_FORMAT: &str = "format";

// ─── Report Parser 메트릭 ──────────────────────────────────────────

/// Report: 파싱 완료된 문서 수 (counter)
pub const REPORT_DOCUMENTS_PARSED_TOTAL: &str = "nessalyzer_report_documents_parsed_total";

/// Report: 파싱된 호스트 수 (counter)
pub const REPORT_HOSTS_PARSED_TOTAL: &str = "nessalyzer_report_hosts_parsed_total";

/// Report: 파싱된 finding 수 (counter)
pub const REPORT_FINDINGS_PARSED_TOTAL: &str = "nessalyzer_report_findings_parsed_total";

/// Report: 추출 실패로 건너뛴 finding 수 (counter)
pub const REPORT_FINDINGS_SKIPPED_TOTAL: &str = "nessalyzer_report_findings_skipped_total";

// ─── Export 메트릭 ─────────────────────────────────────────────────

/// Export: 내보내기 완료된 리포트 수 (counter, label: format)
pub const EXPORT_REPORTS_EXPORTED_TOTAL: &str = "nessalyzer_export_reports_exported_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// `metrics::describe_counter!()`를 호출하여 Prometheus HELP 텍스트를
/// 설정합니다. 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        REPORT_DOCUMENTS_PARSED_TOTAL,
        "Total number of .nessus documents successfully parsed"
    );
    describe_counter!(
        REPORT_HOSTS_PARSED_TOTAL,
        "Total number of report hosts parsed across all documents"
    );
    describe_counter!(
        REPORT_FINDINGS_PARSED_TOTAL,
        "Total number of findings successfully extracted"
    );
    describe_counter!(
        REPORT_FINDINGS_SKIPPED_TOTAL,
        "Total number of findings skipped due to extraction failures"
    );
    describe_counter!(
        EXPORT_REPORTS_EXPORTED_TOTAL,
        "Total number of reports exported per output format"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        REPORT_DOCUMENTS_PARSED_TOTAL,
        REPORT_HOSTS_PARSED_TOTAL,
        REPORT_FINDINGS_PARSED_TOTAL,
        REPORT_FINDINGS_SKIPPED_TOTAL,
        EXPORT_REPORTS_EXPORTED_TOTAL,
    ];

    #[test]
    fn all_metrics_start_with_nessalyzer_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("nessalyzer_"),
                "Metric '{}' does not start with 'nessalyzer_' prefix",
                name
            );
        }
    }

    #[test]
    fn counters_end_with_total_suffix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.ends_with("_total"),
                "Counter '{}' should end with '_total'",
                name
            );
        }
    }

    #[test]
    fn describe_all_does_not_panic() {
        // describe_all() should not panic even without a recorder installed
        describe_all();
    }

    #[test]
    fn label_keys_are_lowercase() {
        for label in [LABEL_SEVERITY, LABEL_FORMAT] {
            assert_eq!(label.to_lowercase(), label);
        }
    }
}
