//! 走法记谱
//!
//! 格式：`<棋子字母><起始列><起始横线>→<目标列><目标横线>`
//! - 棋子字母：K/Q/R/B/N，兵为空
//! - 列：A-H 对应第 0-7 列
//! - 横线：8 - 行号

use crate::moves::Move;

/// 记谱
pub struct Notation;

impl Notation {
    /// 生成走法的记谱
    pub fn describe(mv: &Move) -> String {
        format!("{}{}→{}", mv.piece_kind.letter(), mv.from, mv.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::MoveGenerator;
    use crate::piece::Position;

    fn find(board: &Board, from: &str, to: &str) -> Move {
        let to = Position::parse(to).unwrap();
        MoveGenerator::legal_moves(board, Position::parse(from).unwrap())
            .into_iter()
            .find(|m| m.to == to)
            .unwrap()
    }

    #[test]
    fn test_pawn_notation() {
        let mv = find(&Board::initial(), "e2", "e4");
        assert_eq!(Notation::describe(&mv), "E2→E4");
    }

    #[test]
    fn test_piece_notation() {
        let board = Board::initial();
        assert_eq!(Notation::describe(&find(&board, "g1", "f3")), "NG1→F3");
        assert_eq!(Notation::describe(&find(&board, "b8", "c6")), "NB8→C6");
    }
}
