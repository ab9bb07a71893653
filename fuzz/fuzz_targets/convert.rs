#![no_main]

use libfuzzer_sys::fuzz_target;
use rstmdx::{EmitOptions, mdx};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let width = data.first().map_or(0, |b| i32::from(*b % 100));
        let result = rstmdx::convert(s, &EmitOptions::wrapped(width));
        let output = result.value;

        // Output is always trimmed
        assert_eq!(output.trim(), output);

        // Reflow is a fixed point on its own output
        let once = mdx::reflow(&output, width);
        assert_eq!(mdx::reflow(&once, width), once);
    }
});
