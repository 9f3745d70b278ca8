use tictactoe_minimax::agents::{Agent, MinimaxAgent, RandomAgent};
use tictactoe_minimax::game::{GameRecord, play_game};
use tictactoe_minimax::minimax::MinimaxSearch;
use tictactoe_minimax::random::StandardRandomGenerator;
use tictactoe_minimax::{Board, Player, Result};
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn print_game(title: &str, record: &GameRecord) -> Result<()> {
    println!("== {}", title);
    for (board, action) in record.boards()?.iter().skip(1).zip(record.actions()) {
        println!("{}\n{}\n", action, board);
    }
    match record.winner() {
        Some(player) => println!("{} wins\n", player),
        None => println!("draw\n"),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    // Value of every opening move
    let search = MinimaxSearch::default();
    for action in Board::initial_state().actions() {
        let board = Board::initial_state().result(action)?;
        let outcome = search.search(&board);
        info!(
            opening = %action,
            score = %outcome.score,
            nodes = outcome.stats.nodes_visited,
            "opening evaluated"
        );
    }

    let mut x = MinimaxAgent::default();
    let mut o = MinimaxAgent::default();
    let record = play_game(&mut x, &mut o)?;
    print_game("minimax vs minimax", &record)?;

    let mut minimax = MinimaxAgent::default();
    let mut random: RandomAgent<StandardRandomGenerator> = RandomAgent::default();
    let record = play_game(&mut random, &mut minimax)?;
    print_game(
        &format!("{} (X) vs {} (O)", random.name(), minimax.name()),
        &record,
    )?;
    assert_ne!(record.winner(), Some(Player::X), "minimax lost a game");

    Ok(())
}
