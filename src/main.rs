extern crate roque;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use roque::board::Board;
use roque::hash_tables::TranspositionTable;
use roque::move_generation::moves::NO_MOVE;
use roque::move_generation::perft::perft_divide;
use roque::search::{EngineConfig, SearchInfo};
use roque::types::MAX_DEPTH;

// A small console driver around the engine: set up a position, play
// moves against the search or count perft nodes.
fn main() {
    let config = EngineConfig::default();
    let mut table = TranspositionTable::new(config.hash_size_mb);
    let mut board = Board::initial_position();

    println!("type 'help' for the command list");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush().expect("cannot flush stdout");

        input.clear();
        if stdin
            .lock()
            .read_line(&mut input)
            .expect("cannot read from stdin")
            == 0
        {
            break;
        }

        let mut words = input.split_whitespace();
        let command = match words.next() {
            Some(command) => command,
            None => continue,
        };

        match command {
            "help" => {
                println!("new                  reset to the initial position");
                println!("position <fen>       set up a position");
                println!("move <from><to>[p]   play a move, e2e4 or e7e8q");
                println!("search <depth> [ms]  search and play the best move");
                println!("perft <depth>        count the legal move tree");
                println!("print                show the board");
                println!("quit                 leave");
            }
            "new" => {
                board = Board::initial_position();
                table.clear();
            }
            "position" => {
                let fen = input.trim().trim_start_matches("position").trim();
                match Board::from_fen(fen) {
                    Ok(new_board) => board = new_board,
                    Err(err) => println!("bad fen: {}", err),
                }
            }
            "move" => {
                let mov = words.next().map_or(NO_MOVE, |word| board.parse_move(word));
                if mov == NO_MOVE {
                    println!("not a playable move");
                    continue;
                }
                if !board.make_move(mov) {
                    println!("this move leaves the king hanging");
                    continue;
                }
                board.ply = 0;
                println!("{}", board);
            }
            "search" => {
                let depth = words
                    .next()
                    .and_then(|word| word.parse::<usize>().ok())
                    .unwrap_or(6)
                    .min(MAX_DEPTH - 1) as u8;
                let time_limit = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .map(Duration::from_millis);

                let mut info = SearchInfo::new(depth, time_limit);
                info.use_null_move = config.use_null_move;
                let result = board.search_position(&mut info, &mut table);

                match result.best_move {
                    Some(best) => {
                        println!("engine plays {}", best);
                        board.make_move(best);
                        board.ply = 0;
                        println!("{}", board);
                    }
                    None => println!("no legal move in this position"),
                }
            }
            "perft" => {
                let depth = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .unwrap_or(4);
                perft_divide(&mut board, depth);
            }
            "print" => println!("{}", board),
            "quit" => break,
            _ => println!("unknown command: {}", command),
        }
    }
}
