// This is a module for perft results testing
// All perft results and positions are taken from
// https://www.chessprogramming.org/Perft_Results

use board::Board;
use move_generation::perft::perft;
use types::START_FEN;

fn expect_perft(fen: &str, expected: &[u64]) {
    let mut board = Board::from_fen(fen).unwrap();
    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i as u8 + 1;
        assert_eq!(perft(&mut board, depth), nodes, "perft {} of {}", depth, fen);
    }
}

#[test]
fn perft_initial_position() {
    expect_perft(START_FEN, &[20, 400, 8_902, 197_281]);
}

#[test]
fn perft_kiwipete() {
    expect_perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862],
    );
}

#[test]
fn perft_sparse_board() {
    expect_perft(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2_812, 43_238],
    );
}

#[test]
fn perft_mirror() {
    // The same position from both sides must count the same tree
    expect_perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9_467, 422_333],
    );
    expect_perft(
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        &[6, 264, 9_467, 422_333],
    );
}

#[test]
fn perft_talkchess() {
    expect_perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379],
    );
}

#[test]
#[ignore]
fn perft_initial_position_deep() {
    let mut board = Board::initial_position();
    assert_eq!(perft(&mut board, 5), 4_865_609);
    assert_eq!(perft(&mut board, 6), 119_060_324);
}
