//! Integration tests for the full parse-then-analyze pipeline.
//!
//! These tests drive the public API only: parse realistic .nessus
//! documents, then run analyzer queries against the resulting model.

use std::sync::Arc;

use nessalyzer_core::diag::MemorySink;
use nessalyzer_report::{AnalyzerEngine, NessusParser, ReportError};

const REALISTIC_SCAN: &str = r#"<?xml version="1.0" ?>
<NessusClientData_v2>
  <Policy><policyName>Advanced Scan</policyName></Policy>
  <Report name="Quarterly External Scan">
    <ReportHost name="203.0.113.10">
      <HostProperties>
        <tag name="host-ip">203.0.113.10</tag>
        <tag name="host-fqdn">mail.example.com</tag>
        <tag name="operating-system">Ubuntu 22.04</tag>
        <tag name="netbios-name">MAIL</tag>
      </HostProperties>
      <ReportItem pluginID="51192" pluginName="SSL Certificate Cannot Be Trusted"
                  pluginFamily="General" severity="2">
        <risk_factor>Medium</risk_factor>
        <description>The server's X.509 certificate cannot be trusted.</description>
        <synopsis>The SSL certificate for this service cannot be trusted.</synopsis>
        <solution>Purchase or generate a proper SSL certificate.</solution>
        <cvss_base_score>6.4</cvss_base_score>
        <cvss_vector>CVSS2#AV:N/AC:L/Au:N/C:P/I:P/A:N</cvss_vector>
        <exploit_available>false</exploit_available>
      </ReportItem>
      <ReportItem pluginID="156032" pluginName="Apache Log4j RCE"
                  pluginFamily="CGI abuses" severity="4">
        <risk_factor>Critical</risk_factor>
        <description>A remote code execution vulnerability exists in Log4j.</description>
        <cve>CVE-2021-44228</cve>
        <cve>CVE-2021-45046</cve>
        <cvss_base_score>10.0</cvss_base_score>
        <exploit_available>true</exploit_available>
        <exploit_code_maturity>functional</exploit_code_maturity>
        <metasploit_name>exploit/multi/http/log4shell_header_injection</metasploit_name>
        <plugin_output>Vulnerable version 2.14.1 detected.</plugin_output>
      </ReportItem>
    </ReportHost>
    <ReportHost name="203.0.113.20">
      <HostProperties>
        <tag name="host-ip">203.0.113.20</tag>
      </HostProperties>
      <ReportItem pluginID="10114" pluginName="ICMP Timestamp Request"
                  pluginFamily="General" severity="0">
        <risk_factor>None</risk_factor>
        <description>The remote host answers to ICMP timestamp requests.</description>
      </ReportItem>
      <ReportItem pluginID="57582" pluginName="SSL Self-Signed Certificate"
                  pluginFamily="General" severity="2">
        <risk_factor>Medium</risk_factor>
        <description>The X.509 certificate chain ends in a self-signed cert.</description>
        <cvss_base_score>6.4</cvss_base_score>
      </ReportItem>
      <ReportItem pluginID="97833" pluginName="MS17-010 EternalBlue"
                  pluginFamily="Windows" severity="4">
        <risk_factor>Critical</risk_factor>
        <description>The remote host is affected by a remote code execution vulnerability.</description>
        <cve>CVE-2017-0144</cve>
        <cvss_base_score>9.3</cvss_base_score>
        <exploit_available>true</exploit_available>
        <metasploit_name>exploit/windows/smb/ms17_010_eternalblue</metasploit_name>
      </ReportItem>
    </ReportHost>
  </Report>
</NessusClientData_v2>"#;

#[test]
fn parses_realistic_multi_host_document() {
    let report = NessusParser::new().parse_str(REALISTIC_SCAN).unwrap();

    assert_eq!(report.name, "Quarterly External Scan");
    assert_eq!(report.host_count(), 2);
    assert_eq!(report.total_finding_count(), 5);

    let mail = &report.hosts[0];
    assert_eq!(mail.fqdn.as_deref(), Some("mail.example.com"));
    assert_eq!(mail.operating_system.as_deref(), Some("Ubuntu 22.04"));

    let log4j = &mail.findings[1];
    assert_eq!(log4j.plugin_id, "156032");
    assert_eq!(log4j.cve.len(), 2);
    assert_eq!(log4j.cvss_base_score, Some(10.0));
    assert!(log4j.exploit_available);
}

#[test]
fn analyzer_queries_agree_on_realistic_document() {
    let report = NessusParser::new().parse_str(REALISTIC_SCAN).unwrap();
    let engine = AnalyzerEngine::new(&report);

    let exploitable = engine.exploitable_findings();
    assert_eq!(exploitable.len(), 2);
    assert!(exploitable.iter().all(|f| f.exploit_available));

    let critical = engine.findings_by_severity(4);
    assert_eq!(critical.len(), 2);

    let summary = engine.risk_summary();
    assert_eq!(summary.critical, 2);
    assert_eq!(summary.medium, 2);
    assert_eq!(summary.info, 1);
    assert_eq!(summary.total(), report.total_finding_count());

    let modules: Vec<&str> = engine.metasploit_modules().into_iter().collect();
    assert_eq!(
        modules,
        vec![
            "exploit/multi/http/log4shell_header_injection",
            "exploit/windows/smb/ms17_010_eternalblue",
        ]
    );

    let groups = engine.group_by_host();
    assert_eq!(groups["203.0.113.10"].len(), 2);
    assert_eq!(groups["203.0.113.20"].len(), 3);
}

#[test]
fn parsing_twice_yields_identical_reports() {
    let parser = NessusParser::new();
    let first = parser.parse_str(REALISTIC_SCAN).unwrap();
    let second = parser.parse_str(REALISTIC_SCAN).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_fields_fall_back_to_defaults_without_diagnostics() {
    let sink = Arc::new(MemorySink::new());
    let parser = NessusParser::with_sink(sink.clone());
    let report = parser
        .parse_str(
            r#"<Report name="sparse"><ReportHost name="h">
                 <ReportItem/>
               </ReportHost></Report>"#,
        )
        .unwrap();

    let finding = &report.hosts[0].findings[0];
    assert_eq!(finding.plugin_id, "0");
    assert_eq!(finding.plugin_name, "Unknown Plugin");
    assert_eq!(finding.plugin_family, "None");
    assert_eq!(finding.risk_factor, "None");
    assert_eq!(finding.severity, 0);
    // plain absence is normal, not a diagnostic
    assert!(sink.is_empty());
}

#[test]
fn bad_finding_attributes_skip_only_that_finding() {
    let sink = Arc::new(MemorySink::new());
    let parser = NessusParser::with_sink(sink.clone());
    // the middle item carries an unresolvable entity in an attribute value
    let report = parser
        .parse_str(
            r#"<Report name="r"><ReportHost name="h">
                 <ReportItem pluginID="1" severity="1"/>
                 <ReportItem pluginID="2" pluginName="&bogus;" severity="2">
                   <description>should be dropped</description>
                 </ReportItem>
                 <ReportItem pluginID="3" severity="3"/>
               </ReportHost></Report>"#,
        )
        .unwrap();

    let ids: Vec<&str> = report.findings().map(|f| f.plugin_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("skipping finding"));
}

#[test]
fn malformed_xml_never_returns_partial_report() {
    let truncated = &REALISTIC_SCAN[..REALISTIC_SCAN.len() / 2];
    let err = NessusParser::new().parse_str(truncated).unwrap_err();
    assert!(matches!(err, ReportError::MalformedDocument { .. }));
}

#[test]
fn document_without_report_element_fails() {
    let err = NessusParser::new()
        .parse_str("<NessusClientData_v2><Policy/></NessusClientData_v2>")
        .unwrap_err();
    assert!(err.to_string().contains("missing <Report> root"));
}

#[test]
fn exploitable_and_non_exploitable_partition_the_report() {
    let report = NessusParser::new().parse_str(REALISTIC_SCAN).unwrap();
    let engine = AnalyzerEngine::new(&report);

    let exploitable = engine.exploitable_findings().len();
    let non_exploitable = report.findings().filter(|f| !f.exploit_available).count();
    assert_eq!(exploitable + non_exploitable, report.total_finding_count());
}

#[test]
fn severity_filter_is_monotonic() {
    let report = NessusParser::new().parse_str(REALISTIC_SCAN).unwrap();
    let engine = AnalyzerEngine::new(&report);

    let mut previous = usize::MAX;
    for threshold in 0..=5 {
        let count = engine.findings_by_severity(threshold).len();
        assert!(count <= previous, "threshold {threshold} grew the result");
        previous = count;
    }
}
