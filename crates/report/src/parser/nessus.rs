//! .nessus XML 파서 구현
//!
//! quick-xml 이벤트 루프로 문서를 한 번만 훑으며 리포트 모델을
//! 조립합니다. DOM을 만들지 않으므로 메모리 사용량은 결과 모델
//! 크기에 비례합니다.
//!
//! # 문서 구조 가정
//!
//! ```text
//! <NessusClientData_v2>
//!   <Report name="...">
//!     <ReportHost name="...">
//!       <HostProperties>
//!         <tag name="host-ip">10.0.0.5</tag>
//!       </HostProperties>
//!       <ReportItem pluginID="..." pluginName="..." severity="...">
//!         <description>...</description>
//!         <cve>CVE-....</cve>
//!       </ReportItem>
//!     </ReportHost>
//!   </Report>
//! </NessusClientData_v2>
//! ```
//!
//! 첫 번째 `<Report>` 요소만 해석하고 이후 내용은 문법 검증을 위해
//! 끝까지 소비만 합니다. 인식하지 못하는 요소는 하위 트리째 무시합니다.

use std::path::Path;
use std::sync::Arc;

use metrics::counter;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, info};

use nessalyzer_core::diag::{DiagnosticSink, TracingSink};
use nessalyzer_core::metrics::{
    REPORT_DOCUMENTS_PARSED_TOTAL, REPORT_FINDINGS_PARSED_TOTAL, REPORT_FINDINGS_SKIPPED_TOTAL,
    REPORT_HOSTS_PARSED_TOTAL,
};

use crate::error::ReportError;
use crate::types::{Finding, Host, Report};

/// 기본 최대 파일 크기 (50MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// .nessus 문서 파서
///
/// 문서 수준 문제만 에러로 반환하고, finding 수준 문제는 주입된
/// 진단 싱크에 경고로 기록한 뒤 해당 finding만 건너뜁니다.
///
/// # 사용 예시
///
/// ```
/// use nessalyzer_report::NessusParser;
///
/// let xml = r#"<NessusClientData_v2><Report name="demo">
///   <ReportHost name="10.0.0.5">
///     <ReportItem pluginID="19506" pluginName="Scan Info" severity="0"/>
///   </ReportHost>
/// </Report></NessusClientData_v2>"#;
///
/// let parser = NessusParser::new();
/// let report = parser.parse_str(xml).unwrap();
/// assert_eq!(report.name, "demo");
/// assert_eq!(report.total_finding_count(), 1);
/// ```
pub struct NessusParser {
    diag: Arc<dyn DiagnosticSink>,
    max_file_size: usize,
}

impl NessusParser {
    /// tracing 싱크와 기본 크기 제한으로 파서를 생성합니다.
    pub fn new() -> Self {
        Self {
            diag: Arc::new(TracingSink::new()),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// 지정한 진단 싱크를 사용하는 파서를 생성합니다.
    pub fn with_sink(diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            diag,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// 최대 파일 크기를 변경합니다.
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// 파일을 읽어 파싱합니다.
    ///
    /// # 에러
    ///
    /// - [`ReportError::Io`]: 파일 읽기 실패
    /// - [`ReportError::FileTooBig`]: 크기 제한 초과
    /// - [`ReportError::MalformedDocument`]: XML 오류 또는 `<Report>` 부재
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Report, ReportError> {
        let path = path.as_ref();
        let display_path = path.display().to_string();

        let metadata = std::fs::metadata(path).map_err(|source| ReportError::Io {
            path: display_path.clone(),
            source,
        })?;
        let size = metadata.len() as usize;
        if size > self.max_file_size {
            return Err(ReportError::FileTooBig {
                path: display_path,
                size,
                max: self.max_file_size,
            });
        }

        info!(target: "nessalyzer", path = %display_path, size, "parsing nessus file");
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: display_path,
            source,
        })?;
        self.parse_str(&content)
    }

    /// 문자열 형태의 .nessus 문서를 파싱합니다.
    pub fn parse_str(&self, content: &str) -> Result<Report, ReportError> {
        let mut reader = Reader::from_str(content);
        // 태그 짝이 맞지 않는 문서는 문법 오류로 취급
        reader.config_mut().check_end_names = true;
        let mut buf = Vec::new();

        let mut report: Option<Report> = None;
        let mut report_done = false;
        let mut host: Option<Host> = None;
        let mut skipped = 0u64;

        // 컨텍스트 상태
        let mut in_host_properties = false;
        let mut prop = PropertyTag::default();
        let mut item = ItemState::Idle;
        let mut child: Option<Vec<u8>> = None;
        let mut child_text = String::new();
        // 인식하지 못한 하위 트리를 건너뛰는 깊이 카운터
        let mut ignore_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if report_done {
                        buf.clear();
                        continue;
                    }
                    if ignore_depth > 0 {
                        ignore_depth += 1;
                        buf.clear();
                        continue;
                    }
                    let name = e.name().as_ref().to_vec();
                    if report.is_none() {
                        // 루트 래퍼(NessusClientData_v2, Policy 등)는 통과
                        if name == b"Report" {
                            report = Some(Report::new(
                                name_attr(&e).unwrap_or_else(|| "Unnamed Report".to_owned()),
                            ));
                        }
                    } else if host.is_none() {
                        if name == b"ReportHost" {
                            host = Some(Host::new(
                                name_attr(&e).unwrap_or_else(|| "Unknown Host".to_owned()),
                            ));
                        } else {
                            ignore_depth = 1;
                        }
                    } else {
                        match &item {
                            ItemState::Active(_) => {
                                if child.is_none() {
                                    child = Some(name);
                                    child_text.clear();
                                } else {
                                    ignore_depth = 1;
                                }
                            }
                            ItemState::Skipped => ignore_depth = 1,
                            ItemState::Idle if in_host_properties => {
                                if !prop.active && name == b"tag" {
                                    prop.active = true;
                                    prop.key = name_attr(&e);
                                    prop.value.clear();
                                } else {
                                    ignore_depth = 1;
                                }
                            }
                            ItemState::Idle => match name.as_slice() {
                                b"HostProperties" => in_host_properties = true,
                                b"ReportItem" => match RawFinding::from_attrs(&e) {
                                    Ok(raw) => item = ItemState::Active(raw),
                                    Err(reason) => {
                                        self.diag.warning(&format!(
                                            "skipping finding with unreadable attributes: {reason}"
                                        ));
                                        skipped += 1;
                                        item = ItemState::Skipped;
                                    }
                                },
                                _ => ignore_depth = 1,
                            },
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    if report_done || ignore_depth > 0 {
                        buf.clear();
                        continue;
                    }
                    let name = e.name().as_ref().to_vec();
                    if report.is_none() {
                        if name == b"Report" {
                            report = Some(Report::new(
                                name_attr(&e).unwrap_or_else(|| "Unnamed Report".to_owned()),
                            ));
                            report_done = true;
                        }
                    } else if let Some(current) = host.as_mut() {
                        match &mut item {
                            ItemState::Active(raw) => raw.set_child(&name, String::new()),
                            ItemState::Skipped => {}
                            ItemState::Idle if in_host_properties => {
                                // 값이 없는 tag는 버린다
                            }
                            ItemState::Idle => {
                                if name == b"ReportItem" {
                                    match RawFinding::from_attrs(&e) {
                                        Ok(raw) => {
                                            current
                                                .findings
                                                .push(raw.into_finding(self.diag.as_ref()));
                                        }
                                        Err(reason) => {
                                            self.diag.warning(&format!(
                                                "skipping finding with unreadable attributes: {reason}"
                                            ));
                                            skipped += 1;
                                        }
                                    }
                                }
                            }
                        }
                    } else if name == b"ReportHost"
                        && let Some(report) = report.as_mut()
                    {
                        report.hosts.push(Host::new(
                            name_attr(&e).unwrap_or_else(|| "Unknown Host".to_owned()),
                        ));
                    }
                }
                Ok(Event::End(e)) => {
                    if report_done {
                        buf.clear();
                        continue;
                    }
                    if ignore_depth > 0 {
                        ignore_depth -= 1;
                        buf.clear();
                        continue;
                    }
                    let name_owned = e.name();
                    let name = name_owned.as_ref();
                    if host.is_some() {
                        if name == b"ReportItem" {
                            match std::mem::replace(&mut item, ItemState::Idle) {
                                ItemState::Active(raw) => {
                                    if let Some(current) = host.as_mut() {
                                        current.findings.push(raw.into_finding(self.diag.as_ref()));
                                    }
                                }
                                ItemState::Skipped | ItemState::Idle => {}
                            }
                        } else if let ItemState::Active(raw) = &mut item {
                            if let Some(child_name) = child.take() {
                                raw.set_child(&child_name, std::mem::take(&mut child_text));
                            }
                        } else if in_host_properties {
                            if prop.active {
                                if let Some(current) = host.as_mut() {
                                    prop.apply(current);
                                }
                            } else if name == b"HostProperties" {
                                in_host_properties = false;
                            }
                        } else if name == b"ReportHost" {
                            let done = host.take();
                            if let (Some(report), Some(done)) = (report.as_mut(), done) {
                                report.hosts.push(done);
                            }
                        }
                    } else if report.is_some() && name == b"Report" {
                        report_done = true;
                    }
                }
                Ok(Event::Text(t)) => {
                    if report_done || ignore_depth > 0 {
                        buf.clear();
                        continue;
                    }
                    let text = match t.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(_) => String::from_utf8_lossy(t.as_ref()).into_owned(),
                    };
                    if child.is_some() {
                        child_text.push_str(&text);
                    } else if prop.active {
                        prop.value.push_str(&text);
                    }
                }
                Ok(Event::CData(t)) => {
                    if report_done || ignore_depth > 0 {
                        buf.clear();
                        continue;
                    }
                    let text = reader.decoder().decode(t.as_ref()).unwrap_or_default();
                    if child.is_some() {
                        child_text.push_str(&text);
                    } else if prop.active {
                        prop.value.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(ReportError::MalformedDocument {
                        reason: format!(
                            "xml error at position {}: {err}",
                            reader.buffer_position()
                        ),
                    });
                }
            }
            buf.clear();
        }

        let report = report.ok_or_else(|| ReportError::MalformedDocument {
            reason: "missing <Report> root element".to_owned(),
        })?;
        // EOF 시점에 <Report>가 열린 채라면 잘린 문서
        if !report_done {
            return Err(ReportError::MalformedDocument {
                reason: "unexpected end of document inside <Report>".to_owned(),
            });
        }

        counter!(REPORT_DOCUMENTS_PARSED_TOTAL).increment(1);
        counter!(REPORT_HOSTS_PARSED_TOTAL).increment(report.host_count() as u64);
        counter!(REPORT_FINDINGS_PARSED_TOTAL).increment(report.total_finding_count() as u64);
        if skipped > 0 {
            counter!(REPORT_FINDINGS_SKIPPED_TOTAL).increment(skipped);
        }
        debug!(
            target: "nessalyzer",
            report = %report.name,
            hosts = report.host_count(),
            findings = report.total_finding_count(),
            skipped,
            "parse complete"
        );
        Ok(report)
    }
}

impl Default for NessusParser {
    fn default() -> Self {
        Self::new()
    }
}

/// ReportItem 처리 상태
enum ItemState {
    /// 현재 ReportItem 내부가 아님
    Idle,
    /// 속성 추출에 성공한 finding을 조립 중
    Active(RawFinding),
    /// 속성 해독 실패 — 닫는 태그까지 무시
    Skipped,
}

/// HostProperties의 `<tag>` 하나를 누적하는 상태
#[derive(Default)]
struct PropertyTag {
    active: bool,
    key: Option<String>,
    value: String,
}

impl PropertyTag {
    /// 인식하는 키만 호스트에 반영하고 상태를 비웁니다.
    fn apply(&mut self, host: &mut Host) {
        let key = self.key.take();
        let value = std::mem::take(&mut self.value);
        self.active = false;

        let Some(key) = key else { return };
        if value.is_empty() {
            return;
        }
        match key.as_str() {
            "host-ip" => host.ip = Some(value),
            "host-fqdn" => host.fqdn = Some(value),
            "operating-system" => host.operating_system = Some(value),
            _ => {}
        }
    }
}

/// 기본값 치환 전의 finding 누적 버퍼
///
/// 속성과 자식 요소를 원문 그대로 모았다가 [`RawFinding::into_finding`]
/// 에서 문서화된 기본값 규칙을 한 번에 적용합니다.
#[derive(Default)]
struct RawFinding {
    plugin_id: Option<String>,
    plugin_name: Option<String>,
    plugin_family: Option<String>,
    severity: Option<String>,
    risk_factor: Option<String>,
    description: Option<String>,
    synopsis: Option<String>,
    solution: Option<String>,
    cve: Vec<String>,
    cvss_base_score: Option<String>,
    cvss_vector: Option<String>,
    exploit_available: Option<String>,
    exploit_code_maturity: Option<String>,
    metasploit_name: Option<String>,
    plugin_output: Option<String>,
}

impl RawFinding {
    /// ReportItem 시작 태그의 속성을 해독합니다.
    ///
    /// 속성 자체를 읽을 수 없으면 Err — 호출 측에서 이 finding만
    /// 건너뜁니다. 개별 속성의 부재는 정상이며 기본값으로 처리됩니다.
    fn from_attrs(e: &BytesStart<'_>) -> Result<Self, String> {
        let mut raw = Self::default();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| err.to_string())?;
            let value = attr
                .unescape_value()
                .map_err(|err| err.to_string())?
                .into_owned();
            match attr.key.as_ref() {
                b"pluginID" => raw.plugin_id = Some(value),
                b"pluginName" => raw.plugin_name = Some(value),
                b"pluginFamily" => raw.plugin_family = Some(value),
                b"severity" => raw.severity = Some(value),
                _ => {}
            }
        }
        Ok(raw)
    }

    /// 자식 요소의 텍스트를 기록합니다. 같은 요소가 반복되면 첫 값을
    /// 유지하고, `cve`는 비어 있지 않은 값을 전부 수집합니다.
    fn set_child(&mut self, name: &[u8], text: String) {
        match name {
            b"risk_factor" => set_first(&mut self.risk_factor, text),
            b"description" => set_first(&mut self.description, text),
            b"synopsis" => set_first(&mut self.synopsis, text),
            b"solution" => set_first(&mut self.solution, text),
            b"cve" => {
                if !text.is_empty() {
                    self.cve.push(text);
                }
            }
            b"cvss_base_score" => set_first(&mut self.cvss_base_score, text),
            b"cvss_vector" => set_first(&mut self.cvss_vector, text),
            b"exploit_available" => set_first(&mut self.exploit_available, text),
            b"exploit_code_maturity" => set_first(&mut self.exploit_code_maturity, text),
            b"metasploit_name" => set_first(&mut self.metasploit_name, text),
            b"plugin_output" => set_first(&mut self.plugin_output, text),
            _ => {}
        }
    }

    /// 기본값 규칙을 적용하여 최종 [`Finding`]을 만듭니다.
    fn into_finding(self, diag: &dyn DiagnosticSink) -> Finding {
        let plugin_id = self.plugin_id.unwrap_or_else(|| "0".to_owned());
        let severity = self
            .severity
            .as_deref()
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(0);

        let cvss_base_score = match self.cvss_base_score.as_deref() {
            None | Some("") => None,
            Some(text) => match text.trim().parse::<f64>() {
                Ok(score) => Some(score),
                Err(_) => {
                    diag.warning(&format!(
                        "malformed cvss_base_score '{text}' for plugin {plugin_id}"
                    ));
                    None
                }
            },
        };

        Finding {
            plugin_id,
            plugin_name: self
                .plugin_name
                .unwrap_or_else(|| "Unknown Plugin".to_owned()),
            plugin_family: self.plugin_family.unwrap_or_else(|| "None".to_owned()),
            severity,
            risk_factor: self.risk_factor.unwrap_or_else(|| "None".to_owned()),
            description: self.description.unwrap_or_default(),
            synopsis: self.synopsis,
            solution: self.solution,
            cve: self.cve,
            cvss_base_score,
            cvss_vector: self.cvss_vector,
            exploit_available: self.exploit_available.as_deref() == Some("true"),
            exploit_code_maturity: self.exploit_code_maturity,
            metasploit_name: self.metasploit_name,
            plugin_output: self.plugin_output,
        }
    }
}

fn set_first(slot: &mut Option<String>, text: String) {
    if slot.is_none() {
        *slot = Some(text);
    }
}

/// `name` 속성을 해독합니다. 해독 실패는 부재와 동일하게 취급합니다.
fn name_attr(e: &BytesStart<'_>) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}
