//! Criterion benchmarks for intentbot.
//!
//! Covers text featurization, classifier training and per-turn prediction.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use intentbot::analysis::{Analyzer, CharNgramAnalyzer, WordAnalyzer};
use intentbot::intent::{Intent, IntentCatalog};
use intentbot::ml::{
    IntentClassifier, MaxEntIntentClassifier, TextFeaturizer, TrainingParams,
    build_training_examples,
};
use std::hint::black_box;

/// Generate a synthetic catalog for benchmarking.
fn generate_catalog(intents: usize, patterns_per_intent: usize) -> IntentCatalog {
    let words = [
        "open", "close", "show", "tell", "what", "is", "the", "weather", "time", "music",
        "play", "stop", "calendar", "meeting", "reminder", "note", "light", "door", "today",
        "tomorrow", "please", "could", "you", "me",
    ];

    let intents = (0..intents)
        .map(|i| {
            let patterns = (0..patterns_per_intent)
                .map(|j| {
                    (0..4 + j % 3)
                        .map(|k| words[(i * 7 + j * 13 + k * 5) % words.len()])
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            Intent::new(format!("intent_{i}"), patterns, vec![format!("response {i}")])
        })
        .collect();

    IntentCatalog::new(intents).unwrap()
}

fn documents(catalog: &IntentCatalog) -> Vec<String> {
    build_training_examples(catalog)
        .into_iter()
        .map(|e| e.text)
        .collect()
}

/// Benchmark text analysis and featurization.
fn bench_featurization(c: &mut Criterion) {
    let mut group = c.benchmark_group("featurization");

    let word = WordAnalyzer::new(2).unwrap();
    let chars = CharNgramAnalyzer::new(3).unwrap();
    let text = "could you please tell me what the weather is like tomorrow";

    group.bench_function("word_analyzer", |b| {
        b.iter(|| black_box(word.analyze(black_box(text)).unwrap().count()))
    });
    group.bench_function("char_ngram_analyzer", |b| {
        b.iter(|| black_box(chars.analyze(black_box(text)).unwrap().count()))
    });

    let docs = documents(&generate_catalog(20, 10));
    let mut featurizer = TextFeaturizer::new(2, 3).unwrap();
    featurizer.fit(&docs).unwrap();

    group.bench_function("fit_vocabulary", |b| {
        b.iter(|| {
            let mut featurizer = TextFeaturizer::new(2, 3).unwrap();
            featurizer.fit(black_box(&docs)).unwrap();
            black_box(featurizer)
        })
    });
    group.bench_function("transform", |b| {
        b.iter(|| black_box(featurizer.transform(black_box(text)).unwrap()))
    });

    group.finish();
}

/// Benchmark classifier training.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    for (intents, patterns) in [(5, 5), (20, 10)] {
        let examples = build_training_examples(&generate_catalog(intents, patterns));
        group.throughput(Throughput::Elements(examples.len() as u64));
        group.bench_function(format!("train_{intents}x{patterns}"), |b| {
            b.iter(|| {
                MaxEntIntentClassifier::train(black_box(&examples), &TrainingParams::default())
                    .unwrap()
            })
        });
    }

    group.finish();
}

/// Benchmark per-turn prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let examples = build_training_examples(&generate_catalog(20, 10));
    let classifier = MaxEntIntentClassifier::train(&examples, &TrainingParams::default()).unwrap();
    let queries = [
        "open the door please",
        "what is the time",
        "play some music tomorrow",
        "completely unrelated gibberish",
    ];

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("predict", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(classifier.predict(black_box(query)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_featurization,
    bench_training,
    bench_prediction
);
criterion_main!(benches);
