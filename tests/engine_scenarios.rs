//! End-to-end scenarios through the public API

use std::sync::Arc;
use std::time::Duration;

use gomoku::board::{Axis, Pos, Stone};
use gomoku::eval::VectorEvaluator;
use gomoku::policy::{Deterministic, RandomPolicy};
use gomoku::rules::check_winner;
use gomoku::worker::{EngineWorker, Outcome, Table};
use gomoku::{Engine, EngineConfig, Randomness, Variant};

fn quiet_config(side: Stone, depth: u32, variant: Variant) -> EngineConfig {
    EngineConfig::default()
        .with_side(side)
        .with_depth(depth)
        .with_variant(variant)
        .with_randomness(Randomness::NONE)
        .with_seed(0)
}

#[test]
fn test_opening_reply_and_completed_five() {
    // Black (9, 9): White's candidates include a scored neighbor
    let mut eval = VectorEvaluator::new();
    eval.play(Pos::new(9, 9), Stone::Black);
    let moves = eval.list_moves(&mut Deterministic);
    assert!(moves
        .iter()
        .any(|c| c.pos.distance(Pos::new(9, 9)) == 1 && c.score > 0.0));

    for variant in [Variant::Vector, Variant::BruteForce] {
        for depth in [1, 4] {
            let mut engine = gomoku::Engine::new(quiet_config(Stone::Black, depth, variant)).unwrap();
            for (x, y, player) in [
                (9, 9, Stone::Black),
                (9, 10, Stone::White),
                (8, 8, Stone::Black),
                (7, 7, Stone::Black),
                (6, 6, Stone::Black),
            ] {
                engine.notify_move(Pos::new(x, y), player).unwrap();
            }
            assert_eq!(
                engine.compute_move().unwrap(),
                Pos::new(5, 5),
                "{variant:?} depth {depth}"
            );
            assert_eq!(
                engine.evaluator().run_at(Pos::new(5, 5), Axis::Diagonal).map(|r| r.len()),
                Some(5)
            );
        }
    }
}

#[test]
fn test_engine_blocks_closed_four() {
    for variant in [Variant::Vector, Variant::BruteForce] {
        let mut engine = Engine::new(quiet_config(Stone::White, 2, variant)).unwrap();
        engine.notify_move(Pos::new(4, 9), Stone::White).unwrap();
        for x in 5..9 {
            engine.notify_move(Pos::new(x, 9), Stone::Black).unwrap();
        }
        assert_eq!(engine.compute_move().unwrap(), Pos::new(9, 9), "{variant:?}");
    }
}

#[test]
fn test_noise_keeps_forced_win() {
    let config = EngineConfig::default().with_side(Stone::Black).with_depth(4);
    let policy = RandomPolicy::new(99).without_exploration();
    let mut engine = Engine::with_policy(config, Box::new(policy)).unwrap();
    for (x, y, player) in [
        (10, 3, Stone::White),
        (3, 4, Stone::Black),
        (3, 5, Stone::Black),
        (3, 6, Stone::Black),
        (3, 7, Stone::Black),
    ] {
        engine.notify_move(Pos::new(x, y), player).unwrap();
    }
    // Both (3, 3) and (3, 8) win; (3, 3) is ranked first and cuts the search off
    assert_eq!(engine.compute_move().unwrap(), Pos::new(3, 3));
}

#[test]
fn test_transposed_positions_get_same_reply() {
    let first_order = [
        (9, 9, Stone::Black),
        (10, 10, Stone::White),
        (8, 9, Stone::Black),
        (10, 9, Stone::White),
    ];
    let second_order = [
        (8, 9, Stone::Black),
        (10, 9, Stone::White),
        (9, 9, Stone::Black),
        (10, 10, Stone::White),
    ];

    let reply = |moves: &[(u8, u8, Stone)]| {
        let mut engine = Engine::new(quiet_config(Stone::Black, 2, Variant::BruteForce)).unwrap();
        for &(x, y, player) in moves {
            engine.notify_move(Pos::new(x, y), player).unwrap();
        }
        engine.compute_move_with_stats().unwrap()
    };
    let a = reply(&first_order);
    let b = reply(&second_order);
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
    assert_eq!(a.stats.nodes, b.stats.nodes);
}

#[test]
fn test_seeded_engines_are_reproducible() {
    let config = EngineConfig::default()
        .with_side(Stone::White)
        .with_depth(2)
        .with_seed(1234);

    let play = || {
        let mut engine = Engine::new(config.clone()).unwrap();
        let mut replies = Vec::new();
        for _ in 0..6 {
            let human = engine.board().nearest_empty_to_center().unwrap();
            engine.notify_move(human, Stone::Black).unwrap();
            replies.push(engine.compute_move().unwrap());
        }
        replies
    };
    assert_eq!(play(), play());
}

#[test]
fn test_self_play_reaches_an_outcome() {
    let table = Arc::new(Table::new());
    let poll = Duration::from_millis(2);
    let workers: Vec<EngineWorker> = [(Stone::Black, 5), (Stone::White, 6)]
        .into_iter()
        .map(|(side, seed)| {
            let config = EngineConfig::default()
                .with_side(side)
                .with_depth(2)
                .with_seed(seed);
            EngineWorker::spawn(Arc::clone(&table), Engine::new(config).unwrap(), poll)
        })
        .collect();

    let outcome = table.wait_for_end(poll);
    for worker in workers {
        assert!(worker.join().unwrap().is_ended());
    }

    let board = table.board();
    match outcome {
        Some(Outcome::Win(winner)) => assert_eq!(check_winner(&board), Some(winner)),
        Some(Outcome::Draw) => assert!(board.is_full()),
        None => panic!("workers stopped before the game was decided"),
    }

    // Moves alternate starting with Black
    for (i, (_, player)) in table.history().iter().enumerate() {
        let expected = if i % 2 == 0 { Stone::Black } else { Stone::White };
        assert_eq!(*player, expected);
    }
}
