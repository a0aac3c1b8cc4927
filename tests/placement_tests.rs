use battleship_rules::{
    legal_placements, validate_placement, Board, FleetAssembler, Fleet, GameError, Placement,
};

fn assembler_with(placements: &[Placement]) -> FleetAssembler {
    let mut asm = FleetAssembler::new();
    for p in placements {
        asm.submit_placement(p).unwrap();
    }
    asm
}

#[test]
fn test_horizontal_cells_on_empty_board() {
    let board = Board::new();
    let cells = validate_placement(&board, &Placement::horizontal(0, 0, 4)).unwrap();
    assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_vertical_cells_on_empty_board() {
    let board = Board::new();
    let cells = Placement::vertical(6, 9, 4).validate(&board).unwrap();
    assert_eq!(cells, vec![(6, 9), (7, 9), (8, 9), (9, 9)]);
}

#[test]
fn test_out_of_bounds() {
    let board = Board::new();
    assert_eq!(
        validate_placement(&board, &Placement::horizontal(0, 7, 4)).unwrap_err(),
        GameError::OutOfBounds { row: 0, col: 7 }
    );
    assert_eq!(
        validate_placement(&board, &Placement::vertical(8, 0, 3)).unwrap_err(),
        GameError::OutOfBounds { row: 8, col: 0 }
    );
    assert_eq!(
        validate_placement(&board, &Placement::horizontal(10, 0, 2)).unwrap_err(),
        GameError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(
        validate_placement(&board, &Placement::horizontal(0, usize::MAX, 2)).unwrap_err(),
        GameError::OutOfBounds {
            row: 0,
            col: usize::MAX
        }
    );
    // Touching the far edge exactly is fine.
    assert!(validate_placement(&board, &Placement::horizontal(9, 5, 5)).is_ok());
}

#[test]
fn test_overlap() {
    let asm = assembler_with(&[Placement::horizontal(0, 0, 4)]);
    assert_eq!(
        validate_placement(asm.board(), &Placement::vertical(0, 2, 3)).unwrap_err(),
        GameError::Overlap
    );
}

#[test]
fn test_touching_orthogonal_and_diagonal() {
    let asm = assembler_with(&[Placement::horizontal(0, 0, 4)]);
    let board = asm.board();
    assert_eq!(
        validate_placement(board, &Placement::horizontal(1, 0, 2)).unwrap_err(),
        GameError::Touching
    );
    // diagonal neighbour of (0, 3)
    assert_eq!(
        validate_placement(board, &Placement::vertical(1, 4, 3)).unwrap_err(),
        GameError::Touching
    );
    // end to end
    assert_eq!(
        validate_placement(board, &Placement::horizontal(0, 4, 2)).unwrap_err(),
        GameError::Touching
    );
    // one cell gap is enough
    assert!(validate_placement(board, &Placement::horizontal(0, 5, 2)).is_ok());
    assert!(validate_placement(board, &Placement::horizontal(2, 0, 5)).is_ok());
}

#[test]
fn test_ship_may_touch_itself() {
    let board = Board::new();
    for len in 2..=5 {
        assert!(validate_placement(&board, &Placement::horizontal(4, 2, len)).is_ok());
        assert!(validate_placement(&board, &Placement::vertical(2, 4, len)).is_ok());
    }
}

#[test]
fn test_zero_length_rejected() {
    let board = Board::new();
    assert_eq!(
        validate_placement(&board, &Placement::horizontal(0, 0, 0)).unwrap_err(),
        GameError::UnknownShipLength
    );
}

#[test]
fn test_validation_does_not_mutate() {
    let asm = assembler_with(&[Placement::horizontal(0, 0, 4)]);
    let before = asm.board().clone();
    let _ = validate_placement(asm.board(), &Placement::horizontal(5, 5, 3));
    let _ = validate_placement(asm.board(), &Placement::horizontal(1, 0, 3));
    assert_eq!(asm.board(), &before);
}

#[test]
fn test_legal_placements_on_empty_board() {
    let board = Board::new();
    // 10 rows * 6 start columns, twice.
    assert_eq!(legal_placements(&board, 5).len(), 120);
    assert_eq!(legal_placements(&board, 2).len(), 180);
}

#[test]
fn test_legal_placements_respect_neighbourhood() {
    let asm = assembler_with(&[Placement::vertical(0, 0, 5)]);
    let board = asm.board();
    let legal = legal_placements(board, 3);
    assert!(!legal.is_empty());
    for p in &legal {
        for (r, c) in p.cells() {
            assert!(c >= 2 || r >= 6, "{:?} touches the carrier", p);
        }
    }
}

#[test]
fn test_small_board_fleet() {
    let mut asm = FleetAssembler::with_fleet(Board::with_size(4), Fleet::from_lengths(&[3, 2]));
    asm.submit_placement(&Placement::horizontal(0, 0, 3)).unwrap();
    assert_eq!(
        asm.submit_placement(&Placement::horizontal(1, 2, 2)).unwrap_err(),
        GameError::Touching
    );
    asm.submit_placement(&Placement::horizontal(2, 2, 2)).unwrap();
    assert!(asm.is_ready());
}
