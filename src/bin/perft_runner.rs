//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft_runner -- --depth 5`
//! `cargo run --release --bin perft_runner -- --fen "<FEN>" --depth 4 --divide`
//! `cargo run --release --bin perft_runner -- --suite --depth 4`
//!
//! Logging follows `RUST_LOG` (`RUST_LOG=info` prints every divide line).

use chrono::Utc;

use plum_core::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_core::game_state::position::Position;
use plum_core::move_generation::legal_move_generator::LegalMoveGenerator;
use plum_core::move_generation::perft::{perft_divide, perft_multi_threaded};
use plum_core::utils::render_game_state::render_position;

const SUITE: [(&str, &str); 6] = [
    ("startpos", STARTING_POSITION_FEN),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "promotions",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    ),
    (
        "bugcatcher",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
    (
        "classical_mid",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
];

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn run_case(name: &str, mut position: Position, depth: u8, divide: bool) {
    let started = Utc::now();

    let nodes = if divide {
        let counts = perft_divide(&LegalMoveGenerator, &mut position, depth);
        for (mv, nodes) in &counts {
            println!("{mv}: {nodes}");
        }
        counts.iter().map(|(_, nodes)| nodes).sum::<u64>()
    } else {
        perft_multi_threaded(&LegalMoveGenerator, &position, depth)
    };

    let elapsed_ms = (Utc::now() - started).num_milliseconds().max(1);
    let nps = nodes as i64 * 1000 / elapsed_ms;
    println!("{name}: depth={depth} nodes={nodes} elapsed_ms={elapsed_ms} nps={nps}");
}

fn main() -> Result<(), String> {
    env_logger::init();
    plum_core::init();

    let args: Vec<String> = std::env::args().collect();
    let depth = match arg_value(&args, "--depth") {
        Some(text) => text
            .parse::<u8>()
            .map_err(|_| format!("invalid --depth value: {text}"))?
            .max(1),
        None => 4,
    };
    let divide = args.iter().any(|arg| arg == "--divide");

    if args.iter().any(|arg| arg == "--suite") {
        for (name, fen) in SUITE {
            let position = Position::from_fen(fen).map_err(|e| format!("{name}: {e}"))?;
            run_case(name, position, depth, divide);
        }
        return Ok(());
    }

    let fen = arg_value(&args, "--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let position = Position::from_fen(&fen).map_err(|e| e.to_string())?;
    println!("{}", render_position(&position));
    run_case("position", position, depth, divide);
    Ok(())
}
