use anyhow::Result;

use std::io::{stdin, stdout, Write};

use connectx_ai::{arena::Arena, *};

mod game;
use game::*;

fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_depth(default: usize) -> Result<usize> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("Search depth (blank for {}): ", default);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(depth) => return Ok(depth),
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}

fn run_arena(config: Config) {
    let incumbent = Weights::default();
    // a more defensive table: opponent shapes cost twice as much
    let challenger = Weights {
        two_opp: incumbent.two_opp * 2,
        three_opp: incumbent.three_opp * 2,
        ..incumbent
    };
    println!("Challenger: {:?}", challenger);
    println!("Incumbent:  {:?}", incumbent);

    let report = Arena::new(config, challenger, incumbent).verbose().play();
    println!(
        "Challenger {} - {} Incumbent, {} draws ({:.1}% of points to the challenger)",
        report.challenger_wins,
        report.incumbent_wins,
        report.draws,
        report.score() * 100.0
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let defaults = Config::default();
    println!("{}\n", title(&defaults));

    let config = defaults.with_depth(ask_depth(defaults.depth)?);

    if ask_yes_no("Run a self-play match between weight tables instead of a game?")? {
        run_arena(config);
        return Ok(());
    }

    let ai_players = (
        ask_yes_no("Is player 1 AI controlled?")?,
        ask_yes_no("Is player 2 AI controlled?")?,
    );

    let stdin = stdin();
    let mut game = Game::new(config);

    // game loop
    loop {
        game.display().expect("Failed to draw board!");

        match game.state {
            GameState::Playing => {
                let player = game.to_move.value();
                let next_move =
                    // AI player
                    if (player == 1 && ai_players.0) || (player == 2 && ai_players.1) {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let result =
                            choose_move(&game.board, game.to_move, &game.config, Evaluator::default());
                        let column = match result.column {
                            Some(column) => column,
                            None => {
                                println!("No playable column left");
                                break;
                            }
                        };

                        let win = Weights::default().win;
                        if result.score >= win {
                            println!("Player {} can force a win.", player);
                        } else if result.score <= -win {
                            println!("Player {} cannot stop a win.", player);
                        } else {
                            println!("Evaluation for player {}: {}", player, result.score);
                        }

                        println!("Best move: {}", column + 1);
                        column + 1

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
