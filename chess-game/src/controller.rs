//! 对局控制器
//!
//! 持有唯一的对局会话，负责玩家走棋、AI 回合、悔棋和新对局。
//! AI 每次搜索都会带上发起时的对局代数（generation），新对局会使代数加一，
//! 结果回来时代数不一致就直接丢弃，不会落到新对局上。

use std::time::Duration;

use chess_ai::{AiConfig, AiEngine};
use chess_rules::{BoardState, Color, GameSession, GameStatus, Move, Position};
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GameConfig, GameMode};
use crate::error::GameError;

/// 一次 AI 搜索
///
/// 持有发起时的局面快照，与控制器没有借用关系，可以交给其他任务执行。
#[derive(Debug, Clone)]
pub struct BotSearch {
    pub generation: u64,
    pub state: BoardState,
    pub color: Color,
    pub ai: AiConfig,
    pub seed: u64,
}

impl BotSearch {
    /// 不等待，直接计算走法
    pub fn decide(&self) -> Option<Move> {
        AiEngine::with_seed(self.ai.clone(), self.seed).select_move(&self.state.board, self.color)
    }

    /// 等待思考延迟后计算走法
    pub async fn run(self, delay: Duration) -> SearchOutcome {
        tokio::time::sleep(delay).await;
        SearchOutcome {
            generation: self.generation,
            choice: self.decide(),
        }
    }
}

/// 搜索结果
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub generation: u64,
    /// None 表示 AI 无棋可走
    pub choice: Option<Move>,
}

/// AI 回合的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum BotTurn {
    /// AI 走了一步
    Moved(Move),
    /// AI 无棋可走，对局结束
    NoLegalMoves,
    /// 结果已过期（期间开始了新对局），被丢弃
    Discarded,
}

/// 对局控制器
pub struct GameController {
    config: GameConfig,
    session: GameSession,
    /// 对局代数，每次新对局加一
    generation: u64,
    /// 正在进行的搜索所属代数
    pending: Option<u64>,
    rng: ChaCha8Rng,
    started_at: DateTime<Utc>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(config, BoardState::initial())
    }

    /// 从指定局面开始
    pub fn from_position(config: GameConfig, state: BoardState) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            "新对局: 模式 {:?}，玩家 {}，难度 {:?}",
            config.mode,
            config.player_color,
            config.difficulty
        );

        Self {
            config,
            session: GameSession::from_position(state),
            generation: 0,
            pending: None,
            rng,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> &BoardState {
        self.session.state()
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn history(&self) -> &[Move] {
        self.session.history()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.session.last_move()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// AI 方阵营（双人模式为 None）
    pub fn bot_color(&self) -> Option<Color> {
        self.config.bot_color()
    }

    /// 是否轮到 AI 走棋
    pub fn is_bot_turn(&self) -> bool {
        !self.session.is_over() && self.bot_color() == Some(self.session.to_move())
    }

    /// AI 是否正在思考
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// 指定位置棋子的合法走法（用于选子提示）
    pub fn legal_targets(&self, pos: Position) -> Vec<Move> {
        self.session.legal_moves_at(pos)
    }

    /// 玩家走棋
    pub fn player_move(&mut self, from: Position, to: Position) -> Result<Move, GameError> {
        if self.is_thinking() {
            tracing::warn!("AI 思考中，拒绝玩家走棋");
            return Err(GameError::BotThinking);
        }
        if self.is_bot_turn() {
            return Err(GameError::NotPlayerTurn);
        }

        let mv = self.session.play(from, to)?;
        self.log_if_over();
        Ok(mv)
    }

    /// 发起 AI 搜索，不是 AI 回合或已有搜索在进行时返回 None
    pub fn begin_bot_search(&mut self) -> Option<BotSearch> {
        if self.is_thinking() || !self.is_bot_turn() {
            return None;
        }

        let search = BotSearch {
            generation: self.generation,
            state: self.session.state().clone(),
            color: self.session.to_move(),
            ai: self.config.ai_config(),
            seed: self.rng.gen(),
        };
        self.pending = Some(self.generation);

        tracing::info!("AI 开始思考... 难度: {:?}", search.ai.difficulty);
        Some(search)
    }

    /// 应用搜索结果（代数不一致时丢弃）
    pub fn finish_bot_search(&mut self, outcome: SearchOutcome) -> Result<BotTurn, GameError> {
        if outcome.generation != self.generation || self.pending != Some(outcome.generation) {
            tracing::warn!(
                "AI 计算期间对局已改变（代数 {} -> {}），丢弃 AI 走法",
                outcome.generation,
                self.generation
            );
            return Ok(BotTurn::Discarded);
        }
        self.pending = None;

        match outcome.choice {
            Some(choice) => {
                let mv = self.session.commit(choice)?;
                tracing::info!(
                    "AI 走棋: {}，评分 {:?}",
                    mv.notation.as_deref().unwrap_or_default(),
                    mv.score
                );
                self.log_if_over();
                Ok(BotTurn::Moved(mv))
            }
            None => {
                tracing::info!("AI 无棋可走，对局结束");
                self.session.declare_no_moves();
                Ok(BotTurn::NoLegalMoves)
            }
        }
    }

    /// 完整执行一次 AI 回合，不是 AI 回合时返回 None
    pub async fn play_bot_turn(&mut self) -> Result<Option<BotTurn>, GameError> {
        let Some(search) = self.begin_bot_search() else {
            return Ok(None);
        };
        let outcome = search.run(self.config.bot_delay()).await;
        self.finish_bot_search(outcome).map(Some)
    }

    /// 开始新对局
    pub fn new_game(&mut self) {
        self.session = GameSession::new();
        self.generation += 1;
        self.pending = None;
        self.started_at = Utc::now();
        tracing::info!("开始新对局（代数 {}）", self.generation);
    }

    /// 悔棋，返回撤销的步数
    ///
    /// 人机模式下轮到玩家时撤销两步（AI 一步 + 玩家一步），否则撤销一步。
    pub fn undo(&mut self) -> Result<usize, GameError> {
        if self.is_thinking() {
            return Err(GameError::BotThinking);
        }

        let plies = match self.config.mode {
            GameMode::Bot if self.session.to_move() == self.config.player_color => 2,
            _ => 1,
        };
        Ok(self.session.undo(plies)?)
    }

    /// 记谱文本，每行一个回合
    pub fn move_list(&self) -> String {
        self.session
            .history()
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let plies: Vec<&str> = pair
                    .iter()
                    .map(|m| m.notation.as_deref().unwrap_or_default())
                    .collect();
                format!("{}. {}", i + 1, plies.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn log_if_over(&self) {
        if self.session.is_over() {
            tracing::info!(
                "对局结束: {:?}，{} 无棋可走",
                self.session.status(),
                self.session.to_move()
            );
        }
    }
}
