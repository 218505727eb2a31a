//! 命令行输入解析

use chess_rules::{ChessError, PieceKind, Position};

/// 玩家命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 走棋，如 "e2e4" 或 "e2 e4"
    Move { from: Position, to: Position },
    /// 查看某个棋子的合法走法，如 "moves g1"
    Targets(Position),
    /// 棋子走法说明，如 "explain knight"
    Explain(PieceKind),
    Undo,
    New,
    Board,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<Command, ChessError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let invalid = || ChessError::InvalidSquare {
            text: line.trim().to_string(),
        };

        match words.as_slice() {
            ["quit" | "exit" | "q"] => Ok(Command::Quit),
            ["undo" | "u"] => Ok(Command::Undo),
            ["new"] => Ok(Command::New),
            ["board" | "b"] => Ok(Command::Board),
            ["help" | "h" | "?"] => Ok(Command::Help),
            ["moves", square] => Ok(Command::Targets(Position::parse(square)?)),
            ["explain", name] => parse_piece_kind(name).map(Command::Explain).ok_or_else(invalid),
            [from, to] => Ok(Command::Move {
                from: Position::parse(from)?,
                to: Position::parse(to)?,
            }),
            [text] if text.len() == 4 && text.is_ascii() => Ok(Command::Move {
                from: Position::parse(&text[..2])?,
                to: Position::parse(&text[2..])?,
            }),
            _ => Err(invalid()),
        }
    }
}

fn parse_piece_kind(name: &str) -> Option<PieceKind> {
    PieceKind::ALL
        .into_iter()
        .find(|kind| format!("{:?}", kind).eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(text: &str) -> Position {
        Position::parse(text).unwrap()
    }

    #[test]
    fn test_parse_moves() {
        let expected = Command::Move {
            from: pos("e2"),
            to: pos("e4"),
        };
        assert_eq!(Command::parse("e2e4"), Ok(expected.clone()));
        assert_eq!(Command::parse("  E2 E4 "), Ok(expected));
        assert!(Command::parse("e2e9").is_err());
        assert!(Command::parse("e2e").is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("undo"), Ok(Command::Undo));
        assert_eq!(Command::parse("new"), Ok(Command::New));
        assert_eq!(Command::parse("moves g1"), Ok(Command::Targets(pos("g1"))));
        assert_eq!(
            Command::parse("explain Knight"),
            Ok(Command::Explain(PieceKind::Knight))
        );
        assert!(Command::parse("explain dragon").is_err());
        assert!(Command::parse("save game.json").is_err());
        assert!(Command::parse("").is_err());
    }
}
