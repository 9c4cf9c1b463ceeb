//! Move generation validation by exhaustive tree walking

use std::time::Instant;

use board::Board;

/// Counts the leaf nodes of the legal move tree to the given depth
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    let list = board.generate_all_moves();
    for scored in list.iter() {
        if !board.make_move(scored.mov) {
            continue;
        }
        nodes += perft(board, depth - 1);
        board.take_move();
    }

    nodes
}

/// Prints the node count below each root move, as the usual debugging
/// aid for comparing against another engine
pub fn perft_divide(board: &mut Board, depth: u8) -> u64 {
    assert!(depth > 0);

    let start = Instant::now();
    let mut total = 0;

    let list = board.generate_all_moves();
    for scored in list.iter() {
        if !board.make_move(scored.mov) {
            continue;
        }
        let nodes = perft(board, depth - 1);
        board.take_move();
        println!("{} {}", scored.mov, nodes);
        total += nodes;
    }

    let elapsed = start.elapsed();
    let millis = elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis());
    println!("perft {} total {} nodes in {}ms", depth, total, millis);

    total
}
