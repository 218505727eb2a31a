//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind, Position};

/// 底线棋子排列（第 0 列到第 7 列）
const BACK_ROW: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
    /// 下一个可分配的棋子 id
    next_id: u16,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
            next_id: 0,
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        // 黑方（上方，第 0、1 行）
        for (col, kind) in BACK_ROW.iter().enumerate() {
            board.place(Position::new_unchecked(0, col as u8), *kind, Color::Black);
        }
        for col in 0..BOARD_SIZE as u8 {
            board.place(Position::new_unchecked(1, col), PieceKind::Pawn, Color::Black);
        }

        // 白方（下方，第 6、7 行）
        for col in 0..BOARD_SIZE as u8 {
            board.place(Position::new_unchecked(6, col), PieceKind::Pawn, Color::White);
        }
        for (col, kind) in BACK_ROW.iter().enumerate() {
            board.place(Position::new_unchecked(7, col as u8), *kind, Color::White);
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 取走指定位置的棋子
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.get(pos);
        self.set(pos, None);
        piece
    }

    /// 放置一个新棋子（分配新 id，未走过）
    pub fn place(&mut self, pos: Position, kind: PieceKind, color: Color) -> Piece {
        let piece = Piece::new(kind, color, self.allocate_id());
        self.set(pos, Some(piece));
        piece
    }

    fn allocate_id(&mut self) -> u16 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// 移动棋子（不检查规则，不修改 has_moved），返回被吃的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.take(from);
        let captured = self.get(to);
        self.set(to, piece);
        captured
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.is(PieceKind::King, color))
            .map(|(pos, _)| pos)
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子（按行、列顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| {
                let piece = (*square)?;
                Position::from_index(index).map(|pos| (pos, piece))
            })
            .collect()
    }

    /// 执行一步合法走法，返回新棋盘
    ///
    /// 移动棋子并标记为已走，吃子随覆盖一并移除；王车易位时同时移动车；
    /// 兵到达对方底线时原地升变为同色的后。
    pub fn apply_move(&self, mv: &Move, mover: Color) -> Board {
        let mut next = self.clone();

        if let Some(mut piece) = next.take(mv.from) {
            piece.has_moved = true;
            next.set(mv.to, Some(piece));
        }

        if let Some(castle) = mv.castle {
            if let Some(mut rook) = next.take(castle.rook_from) {
                rook.has_moved = true;
                next.set(castle.rook_to, Some(rook));
            }
        }

        if mv.piece_kind == PieceKind::Pawn && mv.to.row == mover.promotion_row() {
            let mut queen = Piece::new(PieceKind::Queen, mover, next.allocate_id());
            queen.has_moved = true;
            next.set(mv.to, Some(queen));
        }

        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            write!(f, "{} ", BOARD_SIZE as u8 - row)?;
            for col in 0..BOARD_SIZE as u8 {
                let c = self
                    .get(Position::new_unchecked(row, col))
                    .map(|p| p.to_fen_char())
                    .unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// 棋盘与走子方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub to_move: Color,
}

impl BoardState {
    /// 创建初始状态
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            to_move: Color::White,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self { board, to_move }
    }

    /// 执行走法并切换走子方
    pub fn apply(&mut self, mv: &Move) {
        self.board = self.board.apply_move(mv, self.to_move);
        self.to_move = self.to_move.opponent();
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;
    use crate::moves::MoveGenerator;

    fn pos(text: &str) -> Position {
        Position::parse(text).unwrap()
    }

    fn find_move(board: &Board, from: &str, to: &str) -> Move {
        MoveGenerator::legal_moves(board, pos(from))
            .into_iter()
            .find(|m| m.to == pos(to))
            .unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        let king = board.get(pos("e1")).unwrap();
        assert!(king.is(PieceKind::King, Color::White));
        assert!(!king.has_moved);

        let queen = board.get(pos("d8")).unwrap();
        assert!(queen.is(PieceKind::Queen, Color::Black));

        let pawn = board.get(pos("a2")).unwrap();
        assert!(pawn.is(PieceKind::Pawn, Color::White));

        assert_eq!(board.pieces(Color::White).len(), 16);
        assert_eq!(board.pieces(Color::Black).len(), 16);
        assert!(board.get(pos("e4")).is_none());
    }

    #[test]
    fn test_piece_ids_unique() {
        let board = Board::initial();
        let mut ids: Vec<u16> = board.all_pieces().iter().map(|(_, p)| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();
        assert_eq!(board.find_king(Color::White), Some(pos("e1")));
        assert_eq!(board.find_king(Color::Black), Some(pos("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();
        let captured = board.move_piece(pos("g1"), pos("f3"));
        assert!(captured.is_none());
        assert!(board.get(pos("g1")).is_none());
        assert!(board
            .get(pos("f3"))
            .unwrap()
            .is(PieceKind::Knight, Color::White));
    }

    #[test]
    fn test_apply_move_marks_moved() {
        let board = Board::initial();
        let mv = find_move(&board, "e2", "e4");
        let next = board.apply_move(&mv, Color::White);

        assert!(next.get(pos("e2")).is_none());
        let pawn = next.get(pos("e4")).unwrap();
        assert!(pawn.is(PieceKind::Pawn, Color::White));
        assert!(pawn.has_moved);
        // 原棋盘不变
        assert!(board.get(pos("e2")).is_some());
    }

    #[test]
    fn test_apply_capture_removes_piece() {
        let state = Fen::parse("4k3/8/8/3p4/4P3/8/8/4K3 w -").unwrap();
        let mv = find_move(&state.board, "e4", "d5");
        assert!(mv.captured.is_some());

        let next = state.board.apply_move(&mv, Color::White);
        assert!(next.get(pos("d5")).unwrap().is(PieceKind::Pawn, Color::White));
        assert!(next.get(pos("e4")).is_none());
        assert_eq!(next.pieces(Color::Black).len(), 1);
    }

    #[test]
    fn test_apply_castling_moves_rook() {
        let state = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq").unwrap();

        let kingside = find_move(&state.board, "e1", "g1");
        assert!(kingside.is_castling());
        let next = state.board.apply_move(&kingside, Color::White);
        assert!(next.get(pos("e1")).is_none());
        assert!(next.get(pos("h1")).is_none());
        let king = next.get(pos("g1")).unwrap();
        let rook = next.get(pos("f1")).unwrap();
        assert!(king.is(PieceKind::King, Color::White) && king.has_moved);
        assert!(rook.is(PieceKind::Rook, Color::White) && rook.has_moved);

        let queenside = find_move(&state.board, "e1", "c1");
        let next = state.board.apply_move(&queenside, Color::White);
        assert!(next.get(pos("a1")).is_none());
        assert!(next.get(pos("c1")).unwrap().is(PieceKind::King, Color::White));
        assert!(next.get(pos("d1")).unwrap().is(PieceKind::Rook, Color::White));
    }

    #[test]
    fn test_white_promotion() {
        let state = Fen::parse("4k3/P7/8/8/8/8/8/4K3 w -").unwrap();
        let mv = find_move(&state.board, "a7", "a8");
        let next = state.board.apply_move(&mv, Color::White);

        let queen = next.get(pos("a8")).unwrap();
        assert!(queen.is(PieceKind::Queen, Color::White));
        assert!(queen.has_moved);
        assert!(next.get(pos("a7")).is_none());
    }

    #[test]
    fn test_black_capture_promotion() {
        let state = Fen::parse("4k3/8/8/8/8/8/p7/1R2K3 b -").unwrap();
        let mv = find_move(&state.board, "a2", "b1");
        assert_eq!(mv.captured.map(|p| p.kind), Some(PieceKind::Rook));

        let next = state.board.apply_move(&mv, Color::Black);
        assert!(next.get(pos("b1")).unwrap().is(PieceKind::Queen, Color::Black));
        assert!(next.pieces(Color::White).iter().all(|(_, p)| p.kind == PieceKind::King));
    }

    #[test]
    fn test_promoted_queen_gets_fresh_id() {
        let state = Fen::parse("4k3/P7/8/8/8/8/8/4K3 w -").unwrap();
        let pawn_id = state.board.get(pos("a7")).unwrap().id;
        let mv = find_move(&state.board, "a7", "a8");
        let next = state.board.apply_move(&mv, Color::White);
        let queen_id = next.get(pos("a8")).unwrap().id;
        assert_ne!(queen_id, pawn_id);
        assert!(next.all_pieces().iter().filter(|(_, p)| p.id == queen_id).count() == 1);
    }

    #[test]
    fn test_board_state_apply_switches_turn() {
        let mut state = BoardState::initial();
        let mv = find_move(&state.board, "b1", "c3");
        state.apply(&mv);
        assert_eq!(state.to_move, Color::Black);
        assert!(state.board.get(pos("c3")).is_some());
    }

    #[test]
    fn test_display() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[7], "1  R N B Q K B N R");
    }
}
