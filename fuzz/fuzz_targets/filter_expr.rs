#![no_main]

use flakesift::filter::TestFilter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must not panic regardless of input
        if let Ok(filter) = TestFilter::from_expr(input) {
            let _ = filter.should_analyze(input);
        }
    }
});
