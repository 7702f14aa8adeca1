//! Hex example for the UCT agent
//!
//! Play Blue (left to right) against the agent playing Red (top to bottom).
//!
//! ```bash
//! cargo run --release --example hex -- [size] [think-ms] [--parallel]
//! RUST_LOG=info cargo run --example hex -- 4 200 --verbose
//! ```

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use uct_agent::{
    hex::{HexBoard, HexPlayer},
    AgentConfig, Board, Move, Player, UctAgent,
};

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let flags: Vec<&str> = args
        .iter()
        .filter(|a| a.starts_with("--"))
        .map(String::as_str)
        .collect();
    let numbers: Vec<u64> = args.iter().filter_map(|a| a.parse().ok()).collect();

    let size = numbers.first().copied().unwrap_or(7) as usize;
    let think_ms = numbers.get(1).copied().unwrap_or(1000);

    let config = AgentConfig::default()
        .with_max_decision_time(Duration::from_millis(think_ms))
        .with_parallelization(flags.contains(&"--parallel"))
        .with_verbose(flags.contains(&"--verbose"));

    let mut agent = match UctAgent::new(config) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!("UCT Hex Example");
    println!("===============");
    println!("You are Blue (B) and connect left to right.");
    println!();

    let mut board = HexBoard::new(size);
    let mut player = HexPlayer::Blue;

    while board.check_winner().is_none() {
        println!("{}", board);

        if player == HexPlayer::Blue {
            print!("Your move (enter row column, e.g. '1 2'): ");
            io::stdout().flush().unwrap();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).unwrap() == 0 {
                return;
            }

            let coords: Vec<usize> = input
                .split_whitespace()
                .filter_map(|s| s.parse::<usize>().ok())
                .collect();

            if coords.len() != 2 {
                println!("Invalid move! Enter row and column.");
                continue;
            }

            let mv = Move::new(coords[0], coords[1]);
            if !board.get_valid_moves().contains(&mv) {
                println!("Illegal move! Try again.");
                continue;
            }

            board.make_move(mv, player);
        } else {
            println!("Agent is thinking...");

            match agent.choose_move(&board, player) {
                Ok(mv) => {
                    println!("Agent plays {}", mv);
                    board.make_move(mv, player);
                    println!("{}", agent.statistics().summary());
                }
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }

        player = player.opponent();
    }

    println!("{}", board);
    if let Some(winner) = board.check_winner() {
        println!("{} wins!", winner);
    }
}
