//! 局面评估函数

use chess_rules::{Board, Color, Piece, PieceKind, Position, BOARD_SIZE};

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（白方视角，黑方需要镜像）
/// 索引为 row * 8 + col，第 0 行是白方的升变行
mod position_tables {
    /// 兵的位置分值
    #[rustfmt::skip]
    pub const PAWN: [i32; 64] = [
         0,  0,  0,  0,  0,  0,  0,  0,
        50, 50, 50, 50, 50, 50, 50, 50,  // 即将升变
        10, 10, 20, 30, 30, 20, 10, 10,
         5,  5, 10, 25, 25, 10,  5,  5,
         0,  0,  0, 20, 20,  0,  0,  0,
         5, -5,-10,  0,  0,-10, -5,  5,
         5, 10, 10,-20,-20, 10, 10,  5,
         0,  0,  0,  0,  0,  0,  0,  0,
    ];

    /// 马的位置分值
    #[rustfmt::skip]
    pub const KNIGHT: [i32; 64] = [
        -50,-40,-30,-30,-30,-30,-40,-50,
        -40,-20,  0,  0,  0,  0,-20,-40,
        -30,  0, 10, 15, 15, 10,  0,-30,
        -30,  5, 15, 20, 20, 15,  5,-30,
        -30,  0, 15, 20, 20, 15,  0,-30,
        -30,  5, 10, 15, 15, 10,  5,-30,
        -40,-20,  0,  5,  5,  0,-20,-40,
        -50,-40,-30,-30,-30,-30,-40,-50,
    ];
}

impl Evaluator {
    /// 评估局面（`perspective` 视角，正值对该方有利）
    ///
    /// 对任意局面满足 `evaluate(b, c) == -evaluate(b, c.opponent())`。
    pub fn evaluate(board: &Board, perspective: Color) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(pos, piece)| {
                let value = Self::evaluate_piece(pos, piece);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    /// 评估单个棋子的价值（包括位置分）
    fn evaluate_piece(pos: Position, piece: Piece) -> i32 {
        piece.value() + Self::position_bonus(pos, piece)
    }

    /// 获取位置加成分
    fn position_bonus(pos: Position, piece: Piece) -> i32 {
        let row = match piece.color {
            Color::White => pos.row as usize,
            // 黑方向下推进，行号翻转
            Color::Black => BOARD_SIZE - 1 - pos.row as usize,
        };
        let index = row * BOARD_SIZE + pos.col as usize;

        match piece.kind {
            PieceKind::Pawn => position_tables::PAWN[index],
            PieceKind::Knight => position_tables::KNIGHT[index],
            // 其他棋子不加位置分
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::Fen;

    fn board(fen: &str) -> Board {
        Fen::parse(fen).unwrap().board
    }

    #[test]
    fn test_initial_evaluation() {
        let board = Board::initial();
        assert_eq!(Evaluator::evaluate(&board, Color::White), 0);
        assert_eq!(Evaluator::evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_zero_sum() {
        let fens = [
            "4k3/8/8/3q4/4P3/8/8/4K3 w -",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR",
            "8/P6k/8/8/2n5/8/5p2/K7 b -",
        ];
        for fen in fens {
            let board = board(fen);
            assert_eq!(
                Evaluator::evaluate(&board, Color::White),
                -Evaluator::evaluate(&board, Color::Black),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_material_advantage() {
        // 白方少一个后
        let board = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq");
        assert_eq!(Evaluator::evaluate(&board, Color::White), -900);
        assert_eq!(Evaluator::evaluate(&board, Color::Black), 900);
    }

    #[test]
    fn test_position_bonus_pawn() {
        // 推进的兵比原位兵价值高
        let advanced = board("4k3/8/4P3/8/8/8/8/4K3 w -");
        let home = board("4k3/8/8/8/8/8/4P3/4K3 w -");
        assert_eq!(
            Evaluator::evaluate(&advanced, Color::White) - Evaluator::evaluate(&home, Color::White),
            50
        );

        // 黑方镜像
        let advanced = board("4k3/8/8/8/8/4p3/8/4K3 w -");
        let home = board("4k3/4p3/8/8/8/8/8/4K3 w -");
        assert!(
            Evaluator::evaluate(&advanced, Color::Black) > Evaluator::evaluate(&home, Color::Black)
        );
    }

    #[test]
    fn test_position_bonus_knight() {
        // 中心马比边角马价值高
        let center = board("4k3/8/8/8/3N4/8/8/4K3 w -");
        let corner = board("4k3/8/8/8/8/8/8/N3K3 w -");
        assert_eq!(
            Evaluator::evaluate(&center, Color::White) - Evaluator::evaluate(&corner, Color::White),
            70
        );
    }

    #[test]
    fn test_other_pieces_have_no_bonus() {
        let a = board("4k3/8/8/8/3Q4/8/8/4K3 w -");
        let b = board("4k3/8/8/8/8/8/8/Q3K3 w -");
        assert_eq!(
            Evaluator::evaluate(&a, Color::White),
            Evaluator::evaluate(&b, Color::White)
        );
    }
}
