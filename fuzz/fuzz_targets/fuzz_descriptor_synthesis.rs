#![no_main]

use libfuzzer_sys::fuzz_target;
use protofuzz::{DescriptorPool, MessageSynthesizer, SynthesisConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fuzz_target!(|data: &[u8]| {
    // First 8 bytes seed the RNG, the rest is a YAML descriptor document
    let Some((seed, rest)) = data.split_first_chunk::<8>() else {
        return;
    };
    let Ok(yaml) = std::str::from_utf8(rest) else {
        return;
    };
    let Ok(pool) = DescriptorPool::from_yaml_str(yaml) else {
        return;
    };

    // Small limits keep each iteration fast; cycles must still end in an error
    let config = SynthesisConfig {
        repeated_count: 2,
        max_bytes_len: 64,
        max_string_len: 16,
        max_depth: 8,
        ..SynthesisConfig::default()
    };
    let Ok(synthesizer) = MessageSynthesizer::new(&pool, config) else {
        return;
    };

    let mut rng = StdRng::seed_from_u64(u64::from_le_bytes(*seed));
    for message in pool.messages() {
        let _ = synthesizer.generate_message(message, &mut rng);
    }
});
