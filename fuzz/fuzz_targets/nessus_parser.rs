#![no_main]

use libfuzzer_sys::fuzz_target;
use nessalyzer_report::NessusParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let parser = NessusParser::new();
        let _ = parser.parse_str(content);
    }
});
