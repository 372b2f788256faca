//! Property tests over random (often non-projective) gold trees

use covington_core::{
    Configuration, CovingtonOracle, Decoder, Move, Oracle, OracleScorer, Sentence, Token,
    Vocabulary,
};
use proptest::prelude::*;
use proptest::sample::Index;

const LABELS: [&str; 3] = ["nsubj", "obj", "amod"];

/// Random tree over `1..=n`: tokens are attached in a shuffled order, each
/// to the root or to a token attached before it, so the result is acyclic
/// and crossing arcs are common.
fn gold_tree() -> impl Strategy<Value = Sentence> {
    (1usize..12)
        .prop_flat_map(|n| {
            (
                Just((1..=n).collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec(any::<Index>(), n),
                prop::collection::vec(0..LABELS.len(), n),
            )
        })
        .prop_map(|(order, picks, labels)| {
            let n = order.len();
            let mut heads = vec![0; n + 1];
            for (k, &id) in order.iter().enumerate() {
                let slot = picks[k].index(k + 1);
                heads[id] = if slot == k { 0 } else { order[slot] };
            }
            let words = (1..=n)
                .map(|id| {
                    let label = if heads[id] == 0 {
                        "root"
                    } else {
                        LABELS[labels[id - 1]]
                    };
                    Token::new(id, format!("w{id}")).with_gold(heads[id], label)
                })
                .collect();
            Sentence::new(words).expect("generated tree is well formed")
        })
}

fn vocabulary() -> Vocabulary {
    let mut labels = vec!["root"];
    labels.extend(LABELS);
    Vocabulary::from_labels(labels)
}

/// Every head chain reaches the root within `n` steps
fn assert_rooted_forest(heads: &[usize]) {
    let n = heads.len();
    for start in 1..=n {
        let mut node = start;
        let mut hops = 0;
        while node != 0 {
            node = heads[node - 1];
            hops += 1;
            assert!(hops <= n, "cycle through token {start}: {heads:?}");
        }
    }
}

/// Deterministic pseudo-random score for a move at a step
fn noise(seed: u64, step: usize, mv: &Move) -> f64 {
    let code = match mv {
        Move::LeftArc(l) => 1 + 4 * l.as_u32() as u64,
        Move::RightArc(l) => 2 + 4 * l.as_u32() as u64,
        Move::NoArc => 3,
        Move::Shift => 4,
    };
    let mut x = seed ^ (step as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ code;
    x ^= x >> 33;
    x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    x ^= x >> 33;
    (x % 10_000) as f64
}

proptest! {
    #[test]
    fn test_oracle_recovers_gold_tree(mut sentence in gold_tree()) {
        let vocab = vocabulary();
        let outcome = Decoder::new(&vocab)
            .decode(&mut sentence, &OracleScorer::new(&vocab))
            .unwrap();

        for token in sentence.words() {
            prop_assert_eq!(Some(token.pred_head), token.gold_head);
            prop_assert_eq!(Some(token.pred_label.as_str()), token.gold_label.as_deref());
        }
        prop_assert_eq!(outcome.moves, Configuration::move_bound(sentence.len()));
    }

    #[test]
    fn test_arbitrary_scorer_builds_rooted_forest(
        mut sentence in gold_tree(),
        seed in any::<u64>(),
    ) {
        let vocab = vocabulary();
        let scorer = |_: &Sentence, c: &Configuration, mv: &Move| noise(seed, c.steps(), mv);
        let outcome = Decoder::new(&vocab).decode(&mut sentence, &scorer).unwrap();

        prop_assert!(outcome.moves <= Configuration::move_bound(sentence.len()));
        prop_assert!(outcome.arcs < sentence.len() || sentence.is_empty());
        assert_rooted_forest(&sentence.predicted_heads());
    }

    #[test]
    fn test_random_walk_keeps_invariants(
        sentence in gold_tree(),
        picks in prop::collection::vec(any::<Index>(), 80),
    ) {
        let vocab = vocabulary();
        let oracle = CovingtonOracle::new();
        let mut config = Configuration::initial(&sentence);
        let mut step = 0;

        while !config.is_terminal() {
            let legal = config.legal_moves(&vocab);
            prop_assert!(!legal.is_empty());

            let shift_legal = config.is_legal(&Move::Shift);
            prop_assert_eq!(shift_legal, config.left().is_empty() && !config.buffer().is_empty());

            // the oracle is deterministic and always proposes legal moves
            let zero_cost = oracle.zero_cost(&sentence, &config, &vocab).unwrap();
            prop_assert_eq!(&zero_cost, &oracle.zero_cost(&sentence, &config, &vocab).unwrap());
            prop_assert!(!zero_cost.is_empty());
            for mv in &zero_cost {
                prop_assert!(config.is_legal(mv));
            }

            let mv = legal[picks[step % picks.len()].index(legal.len())];
            config = config.apply(mv).unwrap();
            step += 1;
            prop_assert!(step <= Configuration::move_bound(sentence.len()));
        }

        let mut heads = vec![0; sentence.len()];
        for arc in config.arcs().iter() {
            prop_assert_eq!(heads[arc.dependent - 1], 0);
            heads[arc.dependent - 1] = arc.head;
        }
        assert_rooted_forest(&heads);
    }
}
