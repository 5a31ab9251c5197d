use rand::{rngs::StdRng, SeedableRng};
use ttt_mcts::{
    board::{is_legal, Position},
    policy::simulation::{FirstMovePolicy, RandomPolicy, SimulationPolicy},
};

#[test]
fn test_random_policy_plays_legal_moves() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(0);
    let position = Position::from_moves(&[0, 4, 8, 2]);

    for _ in 0..100 {
        let cell = policy.choose_move(&position, &mut rng).unwrap();
        assert!(is_legal(&position, cell));
    }
}

#[test]
fn test_random_policy_covers_every_move() {
    let policy = RandomPolicy::new();
    let mut rng = StdRng::seed_from_u64(21);
    let mut seen = [0usize; 9];

    for _ in 0..900 {
        let cell = policy.choose_move(&Position::new(), &mut rng).unwrap();
        seen[cell] += 1;
    }

    // Expected 100 each; allow generous slack
    for (cell, &count) in seen.iter().enumerate() {
        assert!(count > 50 && count < 150, "cell {} drawn {} times", cell, count);
    }
}

#[test]
fn test_no_move_on_full_board() {
    let full = Position::from_moves(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(RandomPolicy::new().choose_move(&full, &mut rng), None);
    assert_eq!(FirstMovePolicy::new().choose_move(&full, &mut rng), None);
}

#[test]
fn test_first_move_policy_is_deterministic() {
    let policy = FirstMovePolicy::new();
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(policy.choose_move(&Position::new(), &mut rng), Some(0));
    assert_eq!(policy.choose_move(&Position::from_moves(&[0, 1, 3]), &mut rng), Some(2));
}

#[test]
fn test_simulation_policy_cloning() {
    let boxed: Box<dyn SimulationPolicy> = Box::new(FirstMovePolicy::new());
    let cloned = boxed.clone_box();
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(cloned.choose_move(&Position::from_moves(&[0]), &mut rng), Some(1));
}
