use ttt_mcts::{
    board::{is_legal, Player, Position},
    config::BestChildCriteria,
    outcome::evaluate,
    policy::{selection::UCTPolicy, simulation::RandomPolicy},
    recommend_move, MCTSConfig, MCTSError, SearchTree, MCTS,
};

/// Returns the single cell that differs between two positions
fn played_cell(before: &Position, after: &Position) -> usize {
    let changed: Vec<usize> = (0..9)
        .filter(|&cell| before.cell(cell) != after.cell(cell))
        .collect();
    assert_eq!(changed.len(), 1, "exactly one cell should change");
    changed[0]
}

#[test]
fn test_mcts_basic_functionality() {
    let config = MCTSConfig::default().with_iterations(100).with_seed(1);
    let mut mcts = MCTS::new(config);

    let empty = Position::new();
    let next = mcts.recommend_move(&empty, Player::X).unwrap();

    assert_eq!(next.moves_played(), 1);
    let cell = played_cell(&empty, &next);
    assert!(is_legal(&empty, cell));
    assert_eq!(next.cell(cell), Some(0));

    let stats = mcts.get_statistics();
    assert_eq!(stats.iterations, 100);
    assert_eq!(stats.wins + stats.losses + stats.draws, 100);
    assert!(stats.tree_size > 1, "Tree should have grown");
    assert_eq!(stats.tree_size, mcts.tree().len());
    assert!(stats.max_depth >= 5 && stats.max_depth <= 9);
}

#[test]
fn test_root_visits_equal_cycles() {
    let config = MCTSConfig::default().with_iterations(60).with_seed(2);
    let mut mcts = MCTS::new(config);
    mcts.recommend_move(&Position::new(), Player::X).unwrap();

    let tree = mcts.tree();
    let root = tree.node(tree.root());
    assert_eq!(root.visits(), 60);

    let child_visits: u64 = root
        .children()
        .iter()
        .map(|&id| tree.node(id).visits())
        .sum();
    assert_eq!(child_visits, 60);
}

#[test]
fn test_free_function_keeps_tree_between_calls() {
    let mut tree = SearchTree::new();
    let empty = Position::new();

    let next = recommend_move(&empty, &mut tree, Player::X, 100).unwrap();
    assert_eq!(next.moves_played(), 1);
    assert_eq!(tree.node(tree.root()).visits(), 100);
    let size = tree.len();

    recommend_move(&empty, &mut tree, Player::X, 100).unwrap();
    assert_eq!(tree.node(tree.root()).visits(), 200);
    assert!(tree.len() >= size);
}

#[test]
fn test_mcts_finds_winning_move() {
    // X X -
    // O O -
    // - - -
    let game = Position::from_moves(&[0, 3, 1, 4]);
    assert_eq!(game.player_to_move(), Player::X);

    let config = MCTSConfig::default()
        .with_iterations(1000)
        .with_seed(7)
        .with_best_child_criteria(BestChildCriteria::MostVisits);
    let mut mcts = MCTS::new(config);

    let next = mcts.recommend_move(&game, Player::X).unwrap();
    assert_eq!(played_cell(&game, &next), 2, "MCTS should find the winning move");
    assert_eq!(evaluate(&next).winner(), Some(Player::X));
}

#[test]
fn test_mcts_blocks_immediate_threat() {
    // X - O
    // - O -
    // - - X
    let game = Position::from_moves(&[0, 4, 8, 2]);

    let config = MCTSConfig::default().with_iterations(2000).with_seed(11);
    let mut mcts = MCTS::new(config);

    let next = mcts.recommend_move(&game, Player::X).unwrap();
    assert_eq!(played_cell(&game, &next), 6, "MCTS should block the diagonal");
}

#[test]
fn test_search_from_unknown_position() {
    let config = MCTSConfig::default().with_iterations(50).with_seed(5);
    let mut mcts = MCTS::new(config);

    let start = Position::from_moves(&[4]);
    let next = mcts.recommend_move(&start, Player::O).unwrap();
    assert_eq!(next.moves_played(), 2);

    let tree = mcts.tree();
    assert_eq!(tree.node_for(&start).unwrap().visits(), 50);
    assert_eq!(tree.node(tree.root()).visits(), 0);
}

#[test]
fn test_terminal_positions_have_no_recommendation() {
    let mut mcts = MCTS::new(MCTSConfig::default().with_seed(1));

    let won = Position::from_moves(&[0, 3, 1, 4, 2]);
    assert!(matches!(
        mcts.recommend_move(&won, Player::O),
        Err(MCTSError::NoLegalActions)
    ));

    let drawn = Position::from_moves(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    let result = mcts.recommend_move(&drawn, Player::X);
    match result {
        Err(e) => assert!(format!("{}", e).contains("No legal actions")),
        Ok(_) => panic!("Search on a full board should return an error"),
    }
}

#[test]
fn test_zero_iterations_rejected() {
    let mut mcts = MCTS::new(MCTSConfig::default().with_iterations(0));
    assert!(matches!(
        mcts.recommend_move(&Position::new(), Player::X),
        Err(MCTSError::InvalidConfiguration(_))
    ));

    let mut mcts = MCTS::new(MCTSConfig::default());
    assert!(mcts
        .search_for_iterations(&Position::new(), Player::X, 0)
        .is_err());

    // Still rejected once the root already has children
    mcts.recommend_move(&Position::new(), Player::X).unwrap();
    assert_eq!(mcts.tree().node(mcts.tree().root()).children().len(), 9);
    assert!(matches!(
        mcts.search_for_iterations(&Position::new(), Player::X, 0),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_simulate_reaches_terminal_and_backpropagates() {
    let mut mcts = MCTS::new(MCTSConfig::default().with_seed(9));
    let start = Position::new();

    let terminal = mcts.simulate(&start, Player::X).unwrap();
    assert!(evaluate(&terminal).is_terminal());

    let tree = mcts.tree();
    assert_eq!(tree.node_for(&terminal).unwrap().visits(), 1);
    assert_eq!(tree.node(tree.root()).visits(), 1);
}

#[test]
fn test_same_seed_same_recommendation() {
    let run = || {
        let config = MCTSConfig::default().with_iterations(300).with_seed(42);
        let mut mcts = MCTS::new(config);
        let next = mcts.recommend_move(&Position::new(), Player::X).unwrap();
        let root_reward = mcts.tree().node(mcts.tree().root()).total_reward();
        (next, mcts.tree().len(), root_reward)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_alternative_criteria_return_legal_moves() {
    for criteria in [BestChildCriteria::MostVisits, BestChildCriteria::HighestValue] {
        let config = MCTSConfig::default()
            .with_iterations(200)
            .with_seed(3)
            .with_best_child_criteria(criteria);
        let mut mcts = MCTS::new(config);

        let start = Position::from_moves(&[4, 0]);
        let next = mcts.recommend_move(&start, Player::X).unwrap();
        assert!(is_legal(&start, played_cell(&start, &next)));
    }
}

#[test]
fn test_mcts_policy_customization() {
    let config = MCTSConfig::default().with_iterations(100).with_seed(4);

    let mut mcts = MCTS::new(config)
        .with_selection_policy(UCTPolicy::new(0.1))
        .with_simulation_policy(RandomPolicy::new());

    assert!(mcts.recommend_move(&Position::new(), Player::X).is_ok());
}
