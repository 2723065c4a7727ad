//! Fuzz target for the CSV loader and the missing-value stages.
//!
//! Loading arbitrary text must either fail with an error or produce a
//! rectangular dataset that the analyzer and imputer can process without
//! panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{Imputer, Loader, MissingValueReport, Strategy, Writer};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(dataset) = Loader::new().load_str(content) else {
        return;
    };

    for row in &dataset.rows {
        assert_eq!(row.len(), dataset.column_count());
    }

    let report = MissingValueReport::count(&dataset);
    assert_eq!(report.counts.len(), dataset.column_count());

    for strategy in [Strategy::Mean, Strategy::Median, Strategy::Mode] {
        if let Ok(result) = Imputer::new(strategy).impute(&dataset) {
            let mut buf = Vec::new();
            let _ = Writer::new().write_to(&result.dataset, &mut buf);
        }
    }
});
