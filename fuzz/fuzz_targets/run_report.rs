#![no_main]

use flakesift::filter::TestFilter;
use flakesift::ingest::RunReport;
use flakesift::{analysis, DetectorConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any report that parses must make it through the pipeline without panicking
        if let Ok(report) = RunReport::from_json(input) {
            let ingested = report.into_records("fuzz");
            let _ = analysis::analyze_with_skips(
                ingested.records,
                &ingested.skipped,
                &TestFilter::all(),
                &DetectorConfig::default(),
            );
        }
    }
});
