#![no_main]

use dupguard::detect::Detector;
use dupguard::validator::YamlFileValidator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let validator = YamlFileValidator::new(Detector::default(), usize::MAX);

    // Parse failures are fine; panics and differing reruns are not
    if let Ok(first) = validator.check_bytes(data) {
        let second = validator.check_bytes(data).unwrap_or_default();
        assert_eq!(first, second);
    }
});
