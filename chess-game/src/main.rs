use std::path::PathBuf;

use anyhow::Result;
use chess_game::{BotTurn, Command, GameConfig, GameController};
use chess_rules::GameStatus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
commands:
  e2e4 | e2 e4      move a piece
  moves <square>    list legal targets of a piece
  explain <piece>   how a piece moves (king, queen, rook, bishop, knight, pawn)
  undo              take back (two plies against the bot)
  new               start a new game
  board             print the board
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chess_game=info".parse()?)
                .add_directive("chess_rules=info".parse()?)
                .add_directive("chess_ai=info".parse()?),
        )
        .init();

    // 第一个参数可指定配置文件
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from(&PathBuf::from(path))?,
        None => GameConfig::load()?,
    };
    info!("国际象棋启动: {:?}", config);

    let mut game = GameController::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print_position(&game);

    loop {
        if game.is_bot_turn() {
            match game.play_bot_turn().await? {
                Some(BotTurn::Moved(mv)) => {
                    println!("bot plays {}", mv.notation.as_deref().unwrap_or_default());
                    print_position(&game);
                }
                Some(BotTurn::NoLegalMoves) => print_position(&game),
                Some(BotTurn::Discarded) | None => {}
            }
            continue;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Board => print_position(&game),
            Command::New => {
                game.new_game();
                print_position(&game);
            }
            Command::Undo => match game.undo() {
                Ok(plies) => {
                    println!("took back {plies} ply");
                    print_position(&game);
                }
                Err(e) => println!("{e}"),
            },
            Command::Targets(pos) => {
                let targets: Vec<String> = game
                    .legal_targets(pos)
                    .iter()
                    .map(|m| m.to.to_string())
                    .collect();
                println!("{pos}: {}", targets.join(" "));
            }
            Command::Explain(kind) => println!("{:?}: {}", kind, kind.description()),
            Command::Move { from, to } => match game.player_move(from, to) {
                Ok(mv) => {
                    println!("{}", mv.notation.as_deref().unwrap_or_default());
                    print_position(&game);
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    let elapsed = chrono::Utc::now() - game.started_at();
    info!("对局用时 {} 秒", elapsed.num_seconds());
    println!("{}", game.move_list());
    Ok(())
}

fn print_position(game: &GameController) {
    let state = game.state();
    println!("{}", state.board);
    match game.status() {
        GameStatus::Playing => println!("{} to move", state.to_move),
        GameStatus::Checkmate => println!("checkmate, {} wins", state.to_move.opponent()),
        GameStatus::Draw => println!("draw"),
    }
}
