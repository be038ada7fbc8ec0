//! 진단 싱크 — 파서/분석기에 주입되는 비치명 진단 기록 인터페이스
//!
//! 전역 로거 싱글톤 대신 [`DiagnosticSink`] trait 객체를 파서와 분석기
//! 생성 시점에 주입합니다. 운영 환경에서는 [`TracingSink`]가 `tracing`
//! 이벤트로 라우팅하고, 테스트에서는 [`MemorySink`]로 기록을 검증합니다.
//!
//! # 사용 예시
//!
//! ```
//! use std::sync::Arc;
//! use nessalyzer_core::diag::{DiagnosticSink, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! sink.warning("malformed cvss_base_score 'abc' for plugin 12345");
//! assert_eq!(sink.warnings().len(), 1);
//! ```

use std::fmt;
use std::sync::Mutex;

/// 진단 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// 정보성 기록
    Info,
    /// 비치명 경고 — 개별 필드/finding 복구 후 계속 진행
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// 단일 진단 기록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 진단 수준
    pub level: DiagnosticLevel,
    /// 진단 메시지
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// 진단 기록 인터페이스
///
/// 파서와 분석기는 이 trait을 통해서만 비치명 진단을 보고합니다.
pub trait DiagnosticSink: Send + Sync {
    /// 경고 수준 진단을 기록합니다.
    fn warning(&self, message: &str);

    /// 정보 수준 진단을 기록합니다.
    fn info(&self, message: &str);
}

/// `tracing` 이벤트로 라우팅하는 기본 싱크
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// 새 tracing 싱크를 생성합니다.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn warning(&self, message: &str) {
        tracing::warn!(target: "nessalyzer", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "nessalyzer", "{message}");
    }
}

/// 메모리에 진단을 누적하는 싱크 (테스트/검증용)
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// 새 메모리 싱크를 생성합니다.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// 기록된 모든 진단의 복사본을 반환합니다.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().expect("diagnostic sink poisoned").clone()
    }

    /// 경고 수준 진단만 반환합니다.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries()
            .into_iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .collect()
    }

    /// 기록된 진단 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("diagnostic sink poisoned").len()
    }

    /// 기록된 진단이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, level: DiagnosticLevel, message: &str) {
        self.entries
            .lock()
            .expect("diagnostic sink poisoned")
            .push(Diagnostic {
                level,
                message: message.to_owned(),
            });
    }
}

impl DiagnosticSink for MemorySink {
    fn warning(&self, message: &str) {
        self.record(DiagnosticLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.record(DiagnosticLevel::Info, message);
    }
}
