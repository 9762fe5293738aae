//! Fuzz target: `directive::parse_remote`
//!
//! Feeds arbitrary bytes through the remote-directive parser and asserts
//! that it never panics and that extracted slices stay inside the input.
//!
//! cargo fuzz run fuzz_directive

#![no_main]

use libfuzzer_sys::fuzz_target;
use pe32hud::directive::parse_remote;

fuzz_target!(|data: &[u8]| {
    // The network component only ever hands the parser valid UTF-8.
    let Ok(doc) = core::str::from_utf8(data) else {
        return;
    };

    let res = parse_remote(doc);

    // Extracted lines must be substrings of the document, never spanning a
    // newline.
    for line in [res.line0, res.line1].into_iter().flatten() {
        assert!(!line.contains('\n'));
        assert!(line.len() <= doc.len());
    }

    // The colour is either an explicit 32-bit value or the pending yellow;
    // parsing twice is deterministic.
    assert_eq!(parse_remote(doc), res);
});
