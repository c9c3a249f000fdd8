//! Generation fuzzer.
//!
//! Feeds arbitrary bytes as a knowledge base through every generator. Errors
//! are fine; panics are not.

use competitor_sqlgen::{CsvSource, Generator, GeneratorConfig, MetricsMode};
use honggfuzz::fuzz;

fn main() {
    let configs = [
        GeneratorConfig::new("fuzz.csv"),
        GeneratorConfig::new("fuzz.csv")
            .metrics_mode(MetricsMode::PerRow)
            .competitor_limit(Some(3)),
    ];
    loop {
        fuzz!(|data: &[u8]| {
            for config in &configs {
                let generator = Generator::new(config);
                if let Ok(mut source) = CsvSource::from_reader(data) {
                    let _ = generator.competitors(&mut source, &mut Vec::new());
                }
                if let Ok(mut source) = CsvSource::from_reader(data) {
                    let _ = generator.metrics(&mut source, &mut Vec::new());
                }
                if let Ok(mut source) = CsvSource::from_reader(data) {
                    let _ = generator.locations(&mut source, &mut Vec::new());
                }
            }
        });
    }
}
