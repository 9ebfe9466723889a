use mathqa_core::{Predictor, SequenceEncoder, Vocabulary, corpus};
use mathqa_trainer::{RunOptions, Trainer, TrainingConfig, run};

fn quick_options(epochs: usize) -> RunOptions {
    RunOptions {
        config: TrainingConfig::new().with_epochs(epochs).with_log_every(0),
        chart_width: 30,
        chart_height: 6,
        ..RunOptions::default()
    }
}

#[test]
fn default_schedule_runs_every_step() {
    let training = corpus::training_set();
    let outcome = Trainer::default().fit(&training).unwrap();

    assert_eq!(outcome.steps, 300 * training.len());
    assert_eq!(outcome.trace.len(), 300 * training.len());
    assert!(outcome.trace.iter().all(|n| n.is_finite() && n >= 0.0));
    assert!(outcome.epoch_losses.iter().all(|l| l.is_finite()));
}

#[test]
fn report_lists_every_training_example() {
    let training = corpus::training_set();
    let test = corpus::test_set();

    let mut out = Vec::new();
    run(&quick_options(2), &training, &test, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("question: "))
        .collect();
    assert_eq!(lines.len(), training.len());
    for (line, example) in lines.iter().zip(&training) {
        let prefix = format!(
            "question: {}, correct answer: {}, predicted answer: ",
            example.question, example.answer
        );
        assert!(line.starts_with(&prefix), "{}", line);
        let predicted: u32 = line[prefix.len()..].parse().unwrap();
        assert!(predicted < 100);
    }
    assert!(text.starts_with("gradient norm (embedding table) per step\n"));
    assert!(!text.contains("accuracy"));
}

#[test]
fn test_split_reports_unknown_tokens() {
    let training = corpus::training_set();
    let test = corpus::test_set();
    let options = RunOptions {
        eval_test: true,
        ..quick_options(1)
    };

    let mut out = Vec::new();
    run(&options, &training, &test, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // "If", "Alex", "360", "12", "What", ... never occur in training.
    assert!(text.contains(
        "question: If Alex had 50 dollars in his account before he deposited 30 dollars. \
         How much does he now have?, correct answer: 80, error: unknown token \"If\" at position 0"
    ));
    assert!(text.contains("question: Add 9 and 3, correct answer: 12, predicted answer: "));

    let lines: Vec<&str> = text.lines().collect();
    let training_line = lines
        .iter()
        .position(|l| l.starts_with("training accuracy: "))
        .unwrap();
    let test_line = lines
        .iter()
        .position(|l| l.starts_with("test accuracy: "))
        .unwrap();

    // training predictions, training accuracy, test predictions, test accuracy
    assert_eq!(training_line, lines.len() - 1 - test.len() - 1);
    assert_eq!(test_line, lines.len() - 1);
    assert!(lines[training_line].ends_with(&format!("/{}", training.len())));
    assert!(lines[test_line].ends_with(&format!("/{}", test.len())));

    let correct: usize = lines[test_line]["test accuracy: ".len()..]
        .split('/')
        .next()
        .unwrap()
        .parse()
        .unwrap();
    assert!(correct <= 1);
}

#[test]
fn checkpoint_carries_non_default_shape() {
    let dir = tempfile::tempdir().unwrap();
    let training = corpus::training_set();
    let mut options = RunOptions {
        checkpoint_dir: Some(dir.path().to_path_buf()),
        ..quick_options(1)
    };
    options.config.hidden_dim = 8;

    let mut outcome = run(&options, &training, &[], &mut Vec::new()).unwrap();

    let config = TrainingConfig::from_file(dir.path().join("config.json")).unwrap();
    assert_eq!(config.hidden_dim, 8);

    let vocab = Vocabulary::load(dir.path().join("vocab.json")).unwrap();
    let mut restored = Predictor::load(
        dir.path().join("model.safetensors"),
        config.model_config(),
        vocab.len(),
    )
    .unwrap();
    assert_eq!(restored.config().hidden_dim, 8);

    let question = SequenceEncoder::new(&vocab).encode("Multiply 9 and 2").unwrap();
    assert_eq!(
        restored.log_probabilities(&question).unwrap(),
        outcome.predictor.log_probabilities(&question).unwrap()
    );
}

#[test]
fn ask_with_unknown_token_fails() {
    let training = corpus::training_set();
    let options = RunOptions {
        ask: vec!["Divide 360 by 4".to_string()],
        ..quick_options(1)
    };

    let mut out = Vec::new();
    let err = run(&options, &training, &[], &mut out).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown token \"360\" at position 1"));
}

#[test]
fn artifacts_are_written_and_reloadable() {
    let dir = tempfile::tempdir().unwrap();
    let training = corpus::training_set();
    let options = RunOptions {
        trace_out: Some(dir.path().join("trace.json")),
        checkpoint_dir: Some(dir.path().join("checkpoint")),
        ask: vec!["Add 3 and 5".to_string()],
        ..quick_options(2)
    };

    let mut out = Vec::new();
    let mut outcome = run(&options, &training, &[], &mut out).unwrap();

    let trace: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("trace.json")).unwrap())
            .unwrap();
    assert_eq!(trace["steps"], 2 * training.len());

    let vocab = Vocabulary::load(dir.path().join("checkpoint/vocab.json")).unwrap();
    assert_eq!(vocab, outcome.vocabulary);

    let config = TrainingConfig::from_file(dir.path().join("checkpoint/config.json")).unwrap();
    assert_eq!(config, options.config);

    let mut restored = Predictor::load(
        dir.path().join("checkpoint/model.safetensors"),
        config.model_config(),
        vocab.len(),
    )
    .unwrap();
    assert_eq!(restored.config(), outcome.predictor.config());
    assert_eq!(restored.vocab_size(), outcome.predictor.vocab_size());
    let question = SequenceEncoder::new(&vocab).encode("Add 3 and 5").unwrap();
    assert_eq!(
        restored.log_probabilities(&question).unwrap(),
        outcome.predictor.log_probabilities(&question).unwrap()
    );

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("question: Add 3 and 5, predicted answer: "));
}
