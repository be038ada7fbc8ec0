//! 스캔 리포트 파서 -- .nessus XML 문서를 [`Report`](crate::types::Report)로 변환
//!
//! [`NessusParser`]는 하나의 .nessus 문서를 스트리밍 이벤트 방식으로 읽어
//! 리포트 모델을 생성합니다.
//!
//! # 실패 의미론
//!
//! - **문서 수준**: XML 문법 오류, `<Report>` 루트 부재 — 치명 에러.
//!   부분 리포트는 반환되지 않습니다.
//! - **finding 수준**: 속성 해독 실패 등 개별 레코드의 문제 — 해당
//!   finding만 건너뛰고 경고 진단을 남긴 뒤 계속 진행합니다. 잘못된
//!   finding 하나가 형제 finding이나 호스트를 버리게 하지 않습니다.
//! - **필드 수준**: 비숫자 severity, 변환 불가 CVSS 점수 — 문서화된
//!   기본값으로 치환하거나 해당 필드만 비워 둡니다.

pub mod nessus;

pub use nessus::NessusParser;
