//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, FILES};
use crate::error::ChessError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// 所有棋子类型
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// 获取棋子的基础分值（用于 AI 评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::King => 20000,
            PieceKind::Queen => 900,
            PieceKind::Rook => 500,
            PieceKind::Bishop => 330,
            PieceKind::Knight => 320,
            PieceKind::Pawn => 100,
        }
    }

    /// 记谱字母（兵为空）
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::King => "K",
            PieceKind::Queen => "Q",
            PieceKind::Rook => "R",
            PieceKind::Bishop => "B",
            PieceKind::Knight => "N",
            PieceKind::Pawn => "",
        }
    }

    /// 棋子走法说明
    pub fn description(&self) -> &'static str {
        match self {
            PieceKind::King => "The king moves one square in any direction. It is the most important piece; protect it at all costs. Castling is a special move involving the king and a rook.",
            PieceKind::Queen => "The queen is the most powerful piece, combining the powers of the rook and bishop. It can move any number of squares horizontally, vertically, or diagonally.",
            PieceKind::Rook => "The rook moves any number of squares horizontally or vertically.",
            PieceKind::Bishop => "The bishop moves any number of squares diagonally. It always remains on squares of the same color.",
            PieceKind::Knight => "The knight moves in an 'L' shape: two squares in a cardinal direction, then one perpendicular. It is the only piece that can jump over others.",
            PieceKind::Pawn => "The pawn moves forward one square, but captures diagonally. On its first move, it can move two squares forward.",
        }
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, color: Color) -> char {
        let c = match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 白方（先手，在下方，第 6、7 行）
    White,
    /// 黑方（后手，在上方，第 0、1 行）
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 兵的前进方向（行增量）
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// 兵的起始行
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// 兵的升变行（对方底线）
    pub fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// 底线所在行
    pub fn back_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' | 'W' => Some(Color::White),
            'b' | 'B' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子
///
/// `id` 在同一棋盘内唯一，升变产生的后会分配新的 id。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub id: u16,
    /// 是否走过（王车易位资格）
    pub has_moved: bool,
}

impl Piece {
    /// 创建未走过的新棋子
    pub fn new(kind: PieceKind, color: Color, id: u16) -> Self {
        Self {
            kind,
            color,
            id,
            has_moved: false,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// 是否为指定阵营、指定类型的棋子
    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

/// 棋盘位置
///
/// 第 0 行是黑方底线（第 8 横线），第 7 行是白方底线（第 1 横线）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 获取偏移后的位置，出界返回 None
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let new_row = self.row as i8 + dr;
        let new_col = self.col as i8 + dc;
        if new_row >= 0
            && (new_row as usize) < BOARD_SIZE
            && new_col >= 0
            && (new_col as usize) < BOARD_SIZE
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 列名 A-H
    pub fn file(&self) -> char {
        FILES[self.col as usize]
    }

    /// 横线编号 1-8
    pub fn rank(&self) -> u8 {
        BOARD_SIZE as u8 - self.row
    }

    /// 解析坐标文本（如 "e2"，不区分大小写）
    pub fn parse(text: &str) -> Result<Position, ChessError> {
        let invalid = || ChessError::InvalidSquare {
            text: text.to_string(),
        };
        let mut chars = text.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let col = FILES
            .iter()
            .position(|f| *f == file.to_ascii_uppercase())
            .ok_or_else(invalid)?;
        let rank = rank.to_digit(10).ok_or_else(invalid)? as usize;
        if !(1..=BOARD_SIZE).contains(&rank) {
            return Err(invalid());
        }
        Ok(Position::new_unchecked((BOARD_SIZE - rank) as u8, col as u8))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
