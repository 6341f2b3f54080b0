#![no_main]

use libfuzzer_sys::fuzz_target;
use logcheck::transcript::{self, Options};

fuzz_target!(|data: &[u8]| {
    // The first line holds the expectations, the rest is the transcript.
    let split = data.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);
    let (expectations, log) = data.split_at(split);
    transcript::check(&Options::default(), log, expectations).ok();
});
