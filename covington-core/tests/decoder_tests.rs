//! End-to-end decoder scenarios

use covington_core::{
    Configuration, CovingtonOracle, Decoder, Move, Oracle, OracleScorer, ParseError, Scorer,
    Sentence, SignalRecorder, Token, TrainingPolicy, Vocabulary,
};

fn sentence(gold: &[(usize, &str)]) -> Sentence {
    let words = gold
        .iter()
        .enumerate()
        .map(|(i, &(head, label))| Token::new(i + 1, format!("w{}", i + 1)).with_gold(head, label))
        .collect();
    Sentence::new(words).unwrap()
}

fn gold_heads(sentence: &Sentence) -> Vec<usize> {
    sentence
        .words()
        .iter()
        .map(|t| t.gold_head.unwrap())
        .collect()
}

#[test]
fn test_oracle_round_trip_three_token_projective() {
    let mut s = sentence(&[(2, "nsubj"), (0, "root"), (2, "obj")]);
    let vocab = Vocabulary::from_sentences([&s]);

    Decoder::new(&vocab)
        .decode(&mut s, &OracleScorer::new(&vocab))
        .unwrap();

    assert_eq!(s.predicted_heads(), vec![2, 0, 2]);
}

#[test]
fn test_oracle_round_trip_four_token_crossing() {
    // 3 -> 1 and 4 -> 2 cross each other
    let mut s = sentence(&[(3, "a"), (4, "b"), (0, "root"), (0, "root")]);
    let vocab = Vocabulary::from_sentences([&s]);

    let outcome = Decoder::new(&vocab)
        .decode(&mut s, &OracleScorer::new(&vocab))
        .unwrap();

    assert_eq!(s.predicted_heads(), vec![3, 4, 0, 0]);
    assert_eq!(s.predicted_labels(), vec!["a", "b", "root", "root"]);
    assert_eq!(outcome.arcs, 2);
    assert_eq!(outcome.moves, Configuration::move_bound(4));
}

#[test]
fn test_oracle_round_trip_long_crossing_chain() {
    // Heavily non-projective: every arc crosses another
    let gold = [
        (4, "x"),
        (5, "x"),
        (6, "x"),
        (0, "root"),
        (1, "y"),
        (2, "y"),
    ];
    let mut s = sentence(&gold);
    let vocab = Vocabulary::from_sentences([&s]);

    Decoder::new(&vocab)
        .decode(&mut s, &OracleScorer::new(&vocab))
        .unwrap();

    assert_eq!(s.predicted_heads(), gold_heads(&s));
    for token in s.words() {
        assert_eq!(Some(token.pred_label.as_str()), token.gold_label.as_deref());
    }
}

#[test]
fn test_teacher_forcing_matches_gold_under_adversarial_scorer() {
    let mut s = sentence(&[(0, "root"), (1, "a"), (2, "b"), (1, "c")]);
    let vocab = Vocabulary::from_sentences([&s]);

    // Prefer whatever the oracle would not pick
    let oracle_scorer = OracleScorer::new(&vocab);
    let adversary =
        |s: &Sentence, c: &Configuration, mv: &Move| -oracle_scorer.score(s, c, mv);

    let mut recorder = SignalRecorder::default();
    let outcome = Decoder::new(&vocab)
        .train(&mut s, &adversary, &mut recorder, TrainingPolicy::TeacherForcing)
        .unwrap();

    assert_eq!(s.predicted_heads(), vec![0, 1, 2, 1]);
    assert_eq!(outcome.mismatches, recorder.signals.len());
}

#[test]
fn test_exploration_stays_legal_after_mistakes() {
    let mut s = sentence(&[(2, "a"), (0, "root"), (2, "b"), (3, "c"), (2, "d")]);
    let vocab = Vocabulary::from_sentences([&s]);

    // Always prefer RightArc with the last label: wrong most of the time
    let greedy = |_: &Sentence, _: &Configuration, mv: &Move| match mv {
        Move::RightArc(label) => 1.0 + label.index() as f64,
        _ => 0.0,
    };

    let mut recorder = SignalRecorder::default();
    let outcome = Decoder::new(&vocab)
        .train(&mut s, &greedy, &mut recorder, TrainingPolicy::Exploration)
        .unwrap();

    assert!(outcome.mismatches > 0);
    assert!(outcome.moves <= Configuration::move_bound(5));
    // single head per token, all heads inside the sentence
    for token in s.words() {
        assert!(token.pred_head <= s.len());
        assert_ne!(token.pred_head, token.id);
    }
}

#[test]
fn test_oracle_is_deterministic() {
    let s = sentence(&[(3, "a"), (4, "b"), (0, "root"), (0, "root")]);
    let vocab = Vocabulary::from_sentences([&s]);
    let oracle = CovingtonOracle::new();

    let mut config = Configuration::initial(&s);
    while !config.is_terminal() {
        let first = oracle.zero_cost(&s, &config, &vocab).unwrap();
        let second = oracle.zero_cost(&s, &config, &vocab).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        config = config.apply(first[0]).unwrap();
    }
}

#[test]
fn test_unknown_gold_label_fails_only_in_train_mode() {
    let mut s = sentence(&[(2, "det"), (0, "root")]);
    let vocab = Vocabulary::from_labels(["root"]);
    let decoder = Decoder::new(&vocab);
    let flat = |_: &Sentence, _: &Configuration, _: &Move| 0.0;

    assert!(decoder.decode(&mut s, &flat).is_ok());

    let err = decoder
        .train(&mut s, &flat, &mut SignalRecorder::default(), TrainingPolicy::TeacherForcing)
        .unwrap_err();
    assert_eq!(err, ParseError::UnknownLabel("det".into()));
}

#[test]
fn test_dyn_scorer_is_accepted() {
    let mut s = sentence(&[(0, "root"), (1, "a")]);
    let vocab = Vocabulary::from_sentences([&s]);
    let scorer = OracleScorer::new(&vocab);
    let dynamic: &dyn Scorer = &scorer;

    Decoder::new(&vocab).decode(&mut s, dynamic).unwrap();
    assert_eq!(s.predicted_heads(), vec![0, 1]);
}
