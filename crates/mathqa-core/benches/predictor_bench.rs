use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathqa_core::{ModelConfig, Predictor, SequenceEncoder, Vocabulary, corpus};
use oorandom::Rand32;

fn bench_predictor_forward(c: &mut Criterion) {
    let training = corpus::training_set();
    let vocab = Vocabulary::build(&training);
    let encoder = SequenceEncoder::new(&vocab);
    let mut predictor =
        Predictor::new(ModelConfig::default(), vocab.len(), &mut Rand32::new(1)).unwrap();

    let short = encoder.encode("Add 3 and 5").unwrap();
    let questions: Vec<_> = training
        .iter()
        .map(|example| encoder.encode(&example.question).unwrap())
        .collect();

    c.bench_function("predictor_forward_short", |b| {
        b.iter(|| predictor.log_probabilities(black_box(&short)).unwrap());
    });

    c.bench_function("predictor_forward_training_set", |b| {
        b.iter(|| {
            for question in &questions {
                let _ = predictor.predict(black_box(question)).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_predictor_forward);
criterion_main!(benches);
