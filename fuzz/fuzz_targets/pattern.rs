#![no_main]

use libfuzzer_sys::fuzz_target;
use logcheck::pattern::Pattern;

fuzz_target!(|data: &str| {
    if data.len() > 1024 {
        return;
    }
    // Wildcards may match nothing, so removing them yields a matching message.
    let literal = data.replace('*', "");
    assert!(Pattern::new(&literal).unwrap().matches(&literal));
    if let Ok(pattern) = Pattern::new(data) {
        assert!(pattern.matches(&literal));
    }
});
