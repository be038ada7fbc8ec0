#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ReportError`)
//! - [`types`]: Report model (`Report`, `Host`, `Finding`)
//! - [`parser`]: .nessus XML parser (`NessusParser`)
//! - [`analyzer`]: Read-only analysis queries (`AnalyzerEngine`, `RiskSummary`)
//!
//! # Architecture
//!
//! ```text
//! .nessus file --> NessusParser --> Report
//!                                     |
//!                      +--------------+--------------+
//!                      |                             |
//!               AnalyzerEngine                  exporters
//!                      |                      (nessalyzer-export)
//!        RiskSummary / Vec<&Finding>
//! ```

pub mod analyzer;
pub mod error;
pub mod parser;
pub mod types;

// --- Public API Re-exports ---

// Parser
pub use parser::nessus::NessusParser;

// Analyzer
pub use analyzer::{AnalyzerEngine, DEFAULT_SEVERITY_THRESHOLD, RiskSummary};

// Error
pub use error::ReportError;

// Types
pub use types::{Finding, Host, Report};
