#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};

    use crate::{
        agent::{choose_column, get_ai_move, select_columns, MoveRequest},
        arena::{Arena, Outcome},
        board::{Board, Cell, ColumnFull, Mark},
        config::{Config, Weights},
        eval::Evaluator,
        movegen::valid_moves,
        search::{Searcher, INFINITY, NEG_INFINITY},
        window::{count_windows, has_won, WindowCounts},
    };

    // rows are given top to bottom, X is player one and O is player two
    fn board(rows: &[&str]) -> Board {
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                'X' => Cell::PlayerOne,
                'O' => Cell::PlayerTwo,
                _ => Cell::Empty,
            })
            .collect();
        Board::from_flat(cells, rows.len(), rows[0].len())
    }

    fn small(depth: usize) -> Result<Config> {
        Config::new(4, 4, 3, depth)
    }

    // reference minimax visiting every node
    fn exhaustive(
        board: &Board,
        depth: usize,
        maximizing: bool,
        mark: Mark,
        config: &Config,
        evaluator: &Evaluator,
    ) -> (i64, Option<usize>) {
        let moves: Vec<usize> = valid_moves(board).collect();
        if depth == 0 || moves.is_empty() {
            return (evaluator.score(board, config, mark), None);
        }
        let win = evaluator.weights().win;
        let player = if maximizing { mark } else { mark.opponent() };
        let mut best = (if maximizing { NEG_INFINITY } else { INFINITY }, None);
        for column in moves {
            let next = board.drop_piece(column, player).expect("column is playable");
            let immediate = evaluator.score(&next, config, mark);
            if maximizing && immediate >= win {
                return (win, Some(column));
            }
            if !maximizing && immediate <= -win {
                return (-win, Some(column));
            }
            let (score, _) = exhaustive(&next, depth - 1, !maximizing, mark, config, evaluator);
            if (maximizing && score > best.0) || (!maximizing && score < best.0) {
                best = (score, Some(column));
            }
        }
        best
    }

    #[test]
    pub fn drop_fills_column_bottom_up() -> Result<()> {
        let empty = Board::new(3, 2);

        let one = empty.drop_piece(0, Mark::PlayerOne)?;
        assert_eq!(one.get(2, 0), Cell::PlayerOne);
        assert_eq!(one.get(1, 0), Cell::Empty);

        let two = one.drop_piece(0, Mark::PlayerTwo)?;
        assert_eq!(two.get(1, 0), Cell::PlayerTwo);
        let three = two.drop_piece(0, Mark::PlayerOne)?;
        assert_eq!(three.get(0, 0), Cell::PlayerOne);
        assert!(three.is_settled());

        assert_eq!(
            three.drop_piece(0, Mark::PlayerTwo),
            Err(ColumnFull { column: 0 })
        );
        assert_eq!(three.drop_piece(5, Mark::PlayerTwo), Err(ColumnFull { column: 5 }));

        // earlier boards are untouched
        assert_eq!(empty, Board::new(3, 2));
        assert_eq!(one.count(Cell::Empty), 5);
        Ok(())
    }

    #[test]
    pub fn flat_values_are_row_major_from_the_top() -> Result<()> {
        let board = Board::from_values(&[0, 0, 0, 1, 2, 0], 2, 3)?;
        assert_eq!(board.get(1, 0), Cell::PlayerOne);
        assert_eq!(board.get(1, 1), Cell::PlayerTwo);
        assert_eq!(board.to_values(), vec![0, 0, 0, 1, 2, 0]);
        assert!(board.is_settled());

        assert!(Board::from_values(&[0, 3], 1, 2).is_err());
        assert!(Board::from_values(&[0, 0, 0], 2, 2).is_err());
        assert!(!Board::from_values(&[1, 0], 2, 1)?.is_settled());
        Ok(())
    }

    #[test]
    pub fn valid_moves_ascending() -> Result<()> {
        let board = board(&[".X.", ".O."]);
        assert!(!board.is_playable(1));
        assert!(board.is_playable(2));

        let moves = valid_moves(&board);
        assert_eq!(moves.clone().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(moves.collect::<Vec<_>>(), vec![0, 2]);

        let full = self::board(&["XOX", "OXO"]);
        assert!(full.is_full());
        assert_eq!(valid_moves(&full).next(), None);
        Ok(())
    }

    #[test]
    pub fn windows_vertical() -> Result<()> {
        let board = board(&["....", "....", "..X.", "..X."]);
        assert_eq!(count_windows(&board, 3, 2, Mark::PlayerOne), 1);
        assert_eq!(count_windows(&board, 3, 2, Mark::PlayerTwo), 0);
        Ok(())
    }

    #[test]
    pub fn windows_diagonals() -> Result<()> {
        let down_left = board(&["....", "....", ".X..", "XO.."]);
        assert_eq!(count_windows(&down_left, 3, 2, Mark::PlayerOne), 1);

        let down_right = board(&["....", "....", "..X.", "..OX"]);
        assert_eq!(count_windows(&down_right, 3, 2, Mark::PlayerOne), 1);
        Ok(())
    }

    #[test]
    pub fn windows_with_opposing_disc_do_not_count() -> Result<()> {
        let board = board(&["....", "....", "....", "XXO."]);
        assert_eq!(count_windows(&board, 3, 2, Mark::PlayerOne), 0);
        assert_eq!(count_windows(&board, 3, 1, Mark::PlayerTwo), 2);
        Ok(())
    }

    #[test]
    pub fn windows_symmetric_under_colour_swap() -> Result<()> {
        let rows = ["......", "..O...", "..XO..", ".XXO..", "OXOXX."];
        let swapped: Vec<String> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'X' => 'O',
                        'O' => 'X',
                        c => c,
                    })
                    .collect()
            })
            .collect();
        let swapped_refs: Vec<&str> = swapped.iter().map(|s| s.as_str()).collect();
        let (original, swapped) = (board(&rows), board(&swapped_refs));

        for inarow in 1..=4 {
            let counts = WindowCounts::scan(&original, inarow);
            for n in 0..=inarow {
                assert_eq!(
                    count_windows(&original, inarow, n, Mark::PlayerOne),
                    count_windows(&swapped, inarow, n, Mark::PlayerTwo)
                );
                assert_eq!(
                    count_windows(&original, inarow, n, Mark::PlayerTwo),
                    count_windows(&swapped, inarow, n, Mark::PlayerOne)
                );
                assert_eq!(
                    counts.get(Mark::PlayerOne, n),
                    count_windows(&original, inarow, n, Mark::PlayerOne)
                );
                assert_eq!(
                    counts.get(Mark::PlayerTwo, n),
                    count_windows(&original, inarow, n, Mark::PlayerTwo)
                );
            }
        }
        Ok(())
    }

    #[test]
    pub fn windows_longer_than_board() -> Result<()> {
        let board = board(&["X.", "X."]);
        assert_eq!(count_windows(&board, 3, 2, Mark::PlayerOne), 0);
        assert!(!has_won(&board, 3, Mark::PlayerOne));
        assert!(has_won(&board, 2, Mark::PlayerOne));
        Ok(())
    }

    #[test]
    pub fn completed_run_overrides_score() -> Result<()> {
        let config = small(1)?;
        let evaluator = Evaluator::default();
        let board = board(&["....", "....", "OO..", "XXX."]);

        assert_eq!(evaluator.score(&board, &config, Mark::PlayerOne), 1_000_000);
        assert_eq!(evaluator.score(&board, &config, Mark::PlayerTwo), -1_000_000);

        // the opponent's run is checked first
        let both = self::board(&["....", "....", "OOO.", "XXX."]);
        assert_eq!(evaluator.score(&both, &config, Mark::PlayerOne), -1_000_000);
        assert_eq!(evaluator.score(&both, &config, Mark::PlayerTwo), -1_000_000);
        Ok(())
    }

    #[test]
    pub fn weighted_sum_uses_injected_weights() -> Result<()> {
        let config = Config::new(6, 7, 4, 1)?;
        let board = board(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".OO....",
            "XXX....",
        ]);
        assert_eq!(Evaluator::default().score(&Board::new(6, 7), &config, Mark::PlayerOne), 0);

        let weights = Weights {
            win: 1_000_000,
            three: 7,
            two: 3,
            two_opp: -5,
            three_opp: -11,
        };
        let evaluator = Evaluator::new(weights);
        for &mark in [Mark::PlayerOne, Mark::PlayerTwo].iter() {
            let opponent = mark.opponent();
            let expected = 7 * count_windows(&board, 4, 3, mark) as i64
                + 3 * count_windows(&board, 4, 2, mark) as i64
                - 5 * count_windows(&board, 4, 2, opponent) as i64
                - 11 * count_windows(&board, 4, 3, opponent) as i64;
            assert_eq!(evaluator.score(&board, &config, mark), expected);
        }

        // only the open three matters
        let threes_only = Evaluator::new(Weights {
            win: 1_000_000,
            three: 1,
            two: 0,
            two_opp: 0,
            three_opp: 0,
        });
        assert_eq!(threes_only.score(&board, &config, Mark::PlayerOne), 1);
        Ok(())
    }

    #[test]
    pub fn search_is_deterministic() -> Result<()> {
        let config = Config::new(6, 7, 4, 4)?;
        let board = board(&[
            ".......",
            ".......",
            ".......",
            "...O...",
            "..XX...",
            ".OXO...",
        ]);
        let first = Searcher::new(config).search(&board, Mark::PlayerOne);
        let second = Searcher::new(config).search(&board, Mark::PlayerOne);
        assert_eq!(first, second);
        assert!(first.column.is_some());
        Ok(())
    }

    #[test]
    pub fn pruning_matches_exhaustive_minimax() -> Result<()> {
        let positions: [(&[&str], Mark); 4] = [
            (&["....", "....", "....", "...."], Mark::PlayerOne),
            (&["....", "....", ".O..", "XX.O"], Mark::PlayerOne),
            (&["....", "..X.", ".OO.", "XXO."], Mark::PlayerOne),
            (&["....", "....", "....", ".X.."], Mark::PlayerTwo),
        ];
        let evaluator = Evaluator::default();

        for depth in 1..=4 {
            let config = small(depth)?;
            for (rows, mark) in positions.iter() {
                let board = board(rows);
                let pruned = Searcher::new(config).search(&board, *mark);
                let (score, column) = exhaustive(&board, depth, true, *mark, &config, &evaluator);
                if (pruned.score, pruned.column) != (score, column) {
                    return Err(anyhow!(
                        "depth {}: pruned {:?}, exhaustive ({}, {:?}) on\n{}",
                        depth,
                        pruned,
                        score,
                        column,
                        board
                    ));
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn takes_immediate_win() -> Result<()> {
        let config = Config::new(6, 7, 4, 3)?;
        let board = board(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "OO.....",
            "XXX.O..",
        ]);
        let result = Searcher::new(config).search(&board, Mark::PlayerOne);
        assert_eq!(result.score, 1_000_000);
        assert_eq!(result.column, Some(3));
        Ok(())
    }

    #[test]
    pub fn blocks_open_three() -> Result<()> {
        let board = board(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".OO....",
            "XXX....",
        ]);
        for depth in 2..=4 {
            let config = Config::new(6, 7, 4, depth)?;
            let result = Searcher::new(config).search(&board, Mark::PlayerTwo);
            assert_eq!(result.column, Some(3), "depth {}", depth);
            assert!(result.score > -1_000_000);
        }
        Ok(())
    }

    #[test]
    pub fn single_playable_column() -> Result<()> {
        let board = board(&["X.O", "O.X", "X.O"]);
        for depth in 0..=5 {
            let config = Config::new(3, 3, 3, depth)?;
            assert_eq!(
                choose_column(&board, Mark::PlayerOne, &config, Evaluator::default()),
                Some(1)
            );
            if depth > 0 {
                let result = Searcher::new(config).search(&board, Mark::PlayerOne);
                assert_eq!(result.column, Some(1));
            }
        }
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let board = board(&["XOX", "OXO"]);
        let config = Config::new(2, 3, 3, 3)?;

        let result = Searcher::new(config).search(&board, Mark::PlayerOne);
        assert_eq!(result.column, None);
        assert_eq!(result.score, 0);
        assert_eq!(
            choose_column(&board, Mark::PlayerOne, &config, Evaluator::default()),
            None
        );

        let request = MoveRequest::new(board.to_values(), 1).with_dimensions(2, 3, 3);
        let err = get_ai_move(&request).unwrap_err();
        assert!(err.to_string().contains("game already over"));
        Ok(())
    }

    #[test]
    pub fn config_rejects_empty_dimensions() -> Result<()> {
        assert!(Config::new(0, 7, 4, 3).is_err());
        assert!(Config::new(6, 0, 4, 3).is_err());
        assert!(Config::new(6, 7, 0, 3).is_err());

        let unwinnable = Config::new(3, 3, 5, 1)?;
        assert!(!unwinnable.winnable());

        let default = Config::default();
        assert_eq!((default.rows, default.columns, default.inarow, default.depth), (6, 7, 4, 3));
        Ok(())
    }

    #[test]
    pub fn request_validation() -> Result<()> {
        let err = MoveRequest::new(vec![0; 42], 3).validate().unwrap_err();
        assert_eq!(err.to_string(), "mark must be 1 or 2");

        let err = MoveRequest::new(vec![0; 41], 1).validate().unwrap_err();
        assert_eq!(err.to_string(), "board length must be 42");

        let mut cells = vec![0; 42];
        cells[41] = 7;
        assert!(MoveRequest::new(cells, 1).validate().is_err());

        assert!(MoveRequest::new(vec![], 1)
            .with_dimensions(0, 7, 4)
            .validate()
            .is_err());

        let (board, mark, config) = MoveRequest::new(vec![0; 12], 2)
            .with_dimensions(3, 4, 3)
            .with_depth(5)
            .validate()?;
        assert_eq!(board, Board::new(3, 4));
        assert_eq!(mark, Mark::PlayerTwo);
        assert_eq!(config, Config::new(3, 4, 3, 5)?);
        Ok(())
    }

    #[test]
    pub fn floating_discs_are_rejected() -> Result<()> {
        let request = MoveRequest::new(vec![1, 0, 0, 0], 2)
            .with_dimensions(2, 2, 2)
            .with_depth(2);
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "board has floating discs");
        assert!(get_ai_move(&request).is_err());

        let settled = MoveRequest::new(vec![0, 0, 1, 0], 2)
            .with_dimensions(2, 2, 2)
            .with_depth(2);
        assert!(get_ai_move(&settled).is_ok());
        Ok(())
    }

    #[test]
    pub fn oversized_inarow_still_answers() -> Result<()> {
        for &inarow in [1 << 40, usize::MAX].iter() {
            let request = MoveRequest::new(vec![0; 42], 1)
                .with_dimensions(6, 7, inarow)
                .with_depth(2);
            assert_eq!(get_ai_move(&request)?, 0, "inarow {}", inarow);
        }

        let board = board(&["X..", "O..", "XO."]);
        let counts = WindowCounts::scan(&board, usize::MAX);
        assert_eq!(counts.get(Mark::PlayerOne, 0), 0);
        assert_eq!(counts.get(Mark::PlayerOne, usize::MAX), 0);
        assert_eq!(Evaluator::default().score(&board, &Config::new(3, 3, 8, 1)?, Mark::PlayerOne), 0);
        Ok(())
    }

    #[test]
    pub fn zero_depth_falls_back_to_lowest_playable_column() -> Result<()> {
        assert_eq!(get_ai_move(&MoveRequest::new(vec![0; 42], 1).with_depth(0))?, 0);

        let request = MoveRequest::new(vec![1, 0, 0, 2, 0, 0], 1)
            .with_dimensions(2, 3, 3)
            .with_depth(0);
        assert_eq!(get_ai_move(&request)?, 1);
        Ok(())
    }

    #[test]
    pub fn batch_answers_in_order() -> Result<()> {
        let mut block = vec![0; 42];
        block[35] = 1;
        block[36] = 1;
        block[37] = 1;
        block[29] = 2;
        block[30] = 2;

        let requests = vec![
            MoveRequest::new(block.clone(), 2),
            MoveRequest::new(block, 1),
            MoveRequest::new(vec![0; 42], 0),
            MoveRequest::new(vec![1, 2, 1, 2, 1, 2], 1).with_dimensions(2, 3, 3),
        ];
        let results = select_columns(&requests);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().ok(), Some(&3));
        assert_eq!(results[1].as_ref().ok(), Some(&3));
        assert!(results[2].is_err());
        assert!(results[3].is_err());

        for (request, result) in requests.iter().zip(results.iter()) {
            assert_eq!(get_ai_move(request).ok(), result.as_ref().ok().copied());
        }
        Ok(())
    }

    #[test]
    pub fn arena_openings() -> Result<()> {
        let config = small(2)?;
        let arena = Arena::new(config, Weights::default(), Weights::default());
        assert_eq!(arena.clone().with_opening_plies(0).openings().len(), 1);
        assert_eq!(arena.clone().with_opening_plies(1).openings().len(), 4);

        let openings = arena.with_opening_plies(2).openings();
        assert_eq!(openings.len(), 16);
        assert_eq!(openings[0], board(&["....", "....", "O...", "X..."]));
        assert_eq!(openings[1], board(&["....", "....", "....", "XO.."]));
        Ok(())
    }

    #[test]
    pub fn arena_is_deterministic_and_fair() -> Result<()> {
        let config = small(2)?;
        let defensive = Weights {
            two_opp: -100,
            three_opp: -20_000,
            ..Weights::default()
        };

        let arena = Arena::new(config, defensive, Weights::default()).with_opening_plies(1);
        let report = arena.play();
        assert_eq!(report.games(), 8);
        assert_eq!(report, arena.play());

        // identical tables play identical games from each side
        let mirror = Arena::new(config, Weights::default(), Weights::default()).with_opening_plies(1);
        let report = mirror.play();
        assert_eq!(report.challenger_wins, report.incumbent_wins);
        assert!((report.score() - 0.5).abs() < 1e-9);

        let opening = &mirror.openings()[0];
        let outcome = mirror.play_out(opening, true);
        assert_eq!(outcome, mirror.play_out(opening, false));
        assert!(matches!(outcome, Outcome::Won(_) | Outcome::Draw));
        Ok(())
    }
}
