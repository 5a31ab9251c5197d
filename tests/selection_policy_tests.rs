use ttt_mcts::{
    board::{apply_move, Position},
    policy::selection::{SelectionPolicy, UCTPolicy},
    tree::SearchTree,
    utils::UctScore,
    MCTSError,
};

fn expanded_tree(position: &Position) -> SearchTree {
    let mut tree = SearchTree::new();
    tree.ensure_expanded(position);
    tree
}

fn visit(tree: &mut SearchTree, position: &Position, cell: usize, reward: f64) {
    let id = tree.node_id(&apply_move(position, cell)).unwrap();
    tree.backpropagate(id, reward);
}

#[test]
fn test_unvisited_children_come_first_in_cell_order() {
    let empty = Position::new();
    let mut tree = expanded_tree(&empty);
    let policy = UCTPolicy::default();

    assert_eq!(policy.select_move(&empty, &tree).unwrap(), 0);

    visit(&mut tree, &empty, 0, 1.0);
    visit(&mut tree, &empty, 1, 1.0);
    assert_eq!(policy.select_move(&empty, &tree).unwrap(), 2);
}

#[test]
fn test_ties_go_to_lowest_cell() {
    let start = Position::from_moves(&[0]);
    let mut tree = SearchTree::new();
    tree.ensure_expanded(&Position::new());
    tree.ensure_expanded(&start);

    for cell in 1..9 {
        visit(&mut tree, &start, cell, 0.0);
    }

    let policy = UCTPolicy::default();
    assert_eq!(policy.select_move(&start, &tree).unwrap(), 1);
}

#[test]
fn test_higher_reward_wins_with_equal_visits() {
    let empty = Position::new();
    let mut tree = expanded_tree(&empty);

    for cell in 0..9 {
        let reward = if cell == 5 { 1.0 } else { 0.0 };
        visit(&mut tree, &empty, cell, reward);
    }

    let policy = UCTPolicy::default();
    assert_eq!(policy.select_move(&empty, &tree).unwrap(), 5);
}

#[test]
fn test_exploration_favours_rarely_visited_child() {
    let empty = Position::new();
    let mut tree = expanded_tree(&empty);

    for cell in 0..9 {
        visit(&mut tree, &empty, cell, 0.0);
    }
    // Cell 3 is slightly better on average but has been tried far more
    for _ in 0..40 {
        visit(&mut tree, &empty, 3, 0.1);
    }

    assert_eq!(UCTPolicy::default().select_move(&empty, &tree).unwrap(), 0);
    // Without exploration the mean alone decides
    assert_eq!(UCTPolicy::new(0.0).select_move(&empty, &tree).unwrap(), 3);
}

#[test]
fn test_score_uses_recorded_parent_visits() {
    let empty = Position::new();
    let mut tree = expanded_tree(&empty);
    visit(&mut tree, &empty, 4, 1.0);
    visit(&mut tree, &empty, 4, 0.0);
    visit(&mut tree, &empty, 0, 0.0);

    let child = tree.child_for_move(&empty, 4).unwrap();
    let parent = tree.node(tree.root());
    let score = UCTPolicy::default().score(child, Some(parent));

    let expected = 0.5 + (2.0 * 3f64.ln() / 2.0).sqrt();
    assert!((score.value().unwrap() - expected).abs() < 1e-12);

    let unvisited = tree.child_for_move(&empty, 8).unwrap();
    assert_eq!(
        UCTPolicy::default().score(unvisited, Some(parent)),
        UctScore::Unvisited
    );
}

#[test]
fn test_selecting_before_expanding_is_an_error() {
    let tree = SearchTree::new();
    let result = UCTPolicy::default().select_move(&Position::new(), &tree);

    match result {
        Err(MCTSError::NotExpanded { position, cell }) => {
            assert_eq!(position, Position::new());
            assert_eq!(cell, 0);
        }
        other => panic!("expected NotExpanded, got {:?}", other),
    }
}

#[test]
fn test_full_board_has_no_move() {
    let full = Position::from_moves(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    let tree = SearchTree::new();
    assert!(matches!(
        UCTPolicy::default().select_move(&full, &tree),
        Err(MCTSError::NoLegalActions)
    ));
}

#[test]
fn test_boxed_policy_delegates() {
    let empty = Position::new();
    let mut tree = expanded_tree(&empty);
    for cell in 0..9 {
        visit(&mut tree, &empty, cell, if cell == 7 { 1.0 } else { -1.0 });
    }

    let boxed: Box<dyn SelectionPolicy> = Box::new(UCTPolicy::default());
    let cloned = boxed.clone_box();
    assert_eq!(boxed.select_move(&empty, &tree).unwrap(), 7);
    assert_eq!(cloned.select_move(&empty, &tree).unwrap(), 7);
}
