#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let result = rstmdx::rst::process_inline(s);

        // Placeholder tokens never leak into the output
        if !s.contains('\u{E000}') {
            assert!(!result.value.contains('\u{E000}'));
        }
    }
});
