#![no_main]

use libfuzzer_sys::fuzz_target;
use pancl::{ParseOptions, Parser};

/// Feeds arbitrary bytes straight at the parser and drives it to
/// exhaustion. The only property under test is "never panics" -- `Err`
/// is an expected, non-fatal outcome for most inputs.
fn run(data: &[u8]) {
    let mut parser = Parser::from_slice(data, ParseOptions::default());
    loop {
        match parser.get_next_table() {
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => break,
        }
    }
}

fuzz_target!(|data: &[u8]| run(data));
