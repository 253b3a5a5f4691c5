use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_sign() {
    assert_eq!(Stone::Black.sign(), 1.0);
    assert_eq!(Stone::White.sign(), -1.0);
    assert_eq!(Stone::Empty.sign(), 0.0);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::center();
    assert_eq!(pos.to_index(), 9 * 19 + 9);
    assert_eq!(Pos::from_index(180), Pos::new(9, 9));
    assert_eq!(Pos::new(18, 18).to_index(), 360);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(18, 18));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, 19));
    assert_eq!(Pos::try_new(19, 3), None);
    assert_eq!(Pos::try_new(3, 4), Some(Pos::new(3, 4)));
}

#[test]
fn test_pos_step_along_axes() {
    let p = Pos::new(5, 5);
    assert_eq!(p.step(Axis::Horizontal, 1), Some(Pos::new(6, 5)));
    assert_eq!(p.step(Axis::Vertical, -2), Some(Pos::new(5, 3)));
    assert_eq!(p.step(Axis::Diagonal, 1), Some(Pos::new(6, 6)));
    assert_eq!(p.step(Axis::AntiDiagonal, 1), Some(Pos::new(6, 4)));
    assert_eq!(Pos::new(0, 0).step(Axis::Horizontal, -1), None);
    assert_eq!(Pos::new(18, 0).step(Axis::AntiDiagonal, 1), None);
}

#[test]
fn test_pos_distance() {
    assert_eq!(Pos::new(2, 2).distance(Pos::new(6, 6)), 4);
    assert_eq!(Pos::new(2, 7).distance(Pos::new(2, 3)), 4);
    assert_eq!(Pos::new(4, 4).distance(Pos::new(4, 4)), 0);
}

#[test]
fn test_board_place_and_remove() {
    let mut board = Board::new();
    assert!(board.is_board_empty());

    assert!(board.place_stone(Pos::new(9, 9), Stone::Black));
    assert!(!board.place_stone(Pos::new(9, 9), Stone::White));
    assert_eq!(board.get(Pos::new(9, 9)), Stone::Black);
    assert_eq!(board.stone_count(), 1);

    board.remove_stone(Pos::new(9, 9));
    assert!(board.is_empty(Pos::new(9, 9)));
    assert_eq!(board.stone_count(), 0);
    // The window never shrinks
    assert!(board.window().contains(Pos::new(9, 9)));
}

#[test]
fn test_board_window_tracks_stones() {
    let mut board = Board::new();
    board.place_stone(Pos::new(3, 10), Stone::Black);
    board.place_stone(Pos::new(12, 4), Stone::White);
    assert_eq!(
        board.window().corners(),
        Some((Pos::new(3, 4), Pos::new(12, 10)))
    );
}

#[test]
fn test_nearest_empty_to_center() {
    let mut board = Board::new();
    assert_eq!(board.nearest_empty_to_center(), Some(Pos::center()));

    board.place_stone(Pos::center(), Stone::Black);
    let p = board.nearest_empty_to_center().unwrap();
    assert_eq!(p.distance(Pos::center()), 1);
    assert_eq!(p, Pos::new(8, 8));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 19);
    assert_eq!(TOTAL_CELLS, 361);
    assert_eq!(CENTER, 9);
}
