//! Game session - lifecycle state machine and tick engine

use std::time::{Duration, Instant};

use serde::Serialize;

use super::boost::{BoostChange, BoostController};
use super::cell::Cell;
use super::collision;
use super::direction::Direction;
use super::food;
use super::input::InputTracker;
use super::snake::Snake;
use crate::audio::Cue;
use crate::config::{
    BOOST_SPEED_MS, FOOD_SCORE, INITIAL_SNAKE_LENGTH, INITIAL_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS,
    SPEED_CONTROL_MAX, SPEED_CONTROL_MIN,
};
use crate::event_logger::GameEvent;
use crate::protocol::{CellData, Key, ServerMessage};

/// Heading the snake spawns with
const SPAWN_HEADING: Direction = Direction::Right;

/// Lifecycle state of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Fresh board, not ticking
    Idle,
    /// Ticking
    Running,
    /// Suspended mid-run, board intact
    Paused,
    /// Terminal collision, board left on display
    GameOver,
}

/// Scheduler change requested by a session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleCmd {
    /// Cancel the current tick task and start one at this period
    Start(Duration),
    /// Cancel the current tick task
    Stop,
}

/// Side effects of a session operation, applied by the caller after the
/// state mutation is done. Keeps the session free of timers and I/O.
#[derive(Debug, Default)]
pub struct Effects {
    /// Broadcast a fresh snapshot to all clients
    pub snapshot: bool,
    /// Scheduler change to apply
    pub schedule: Option<ScheduleCmd>,
    /// Sound cues to push (gated on the audio gate)
    pub cues: Vec<Cue>,
    /// Events for the gameplay log
    pub events: Vec<GameEvent>,
    /// Newly exceeded high score to write to disk
    pub persist_high_score: Option<u32>,
}

/// The whole mutable game record: snake, food, input, boost, score and
/// lifecycle. All mutation goes through the control operations and `tick`;
/// nothing outside this struct touches the fields.
#[derive(Debug)]
pub struct GameSession {
    snake: Snake,
    food: Cell,
    input: InputTracker,
    boost: BoostController,
    run_state: RunState,
    score: u32,
    high_score: u32,
    /// Player-configured tick period
    base_period: Duration,
    /// Period the scheduler actually runs at (boosted or base)
    period: Duration,
}

impl GameSession {
    pub fn new(high_score: u32) -> Self {
        let snake = Snake::spawn(Cell::board_center(), SPAWN_HEADING, INITIAL_SNAKE_LENGTH);
        let food = food::place(&snake, &mut rand::thread_rng());
        let base_period = Duration::from_millis(INITIAL_SPEED_MS);

        Self {
            snake,
            food,
            input: InputTracker::new(SPAWN_HEADING),
            boost: BoostController::new(),
            run_state: RunState::Idle,
            score: 0,
            high_score,
            base_period,
            period: base_period,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_boosting(&self) -> bool {
        self.boost.is_boosting()
    }

    /// Period the scheduler currently runs at
    pub fn effective_period(&self) -> Duration {
        self.period
    }

    pub fn base_period(&self) -> Duration {
        self.base_period
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Re-seed the board: snake at center, score zero, base speed, fresh
    /// food, no held keys, no boost.
    fn reset_board(&mut self) {
        self.snake = Snake::spawn(Cell::board_center(), SPAWN_HEADING, INITIAL_SNAKE_LENGTH);
        self.food = food::place(&self.snake, &mut rand::thread_rng());
        self.input = InputTracker::new(SPAWN_HEADING);
        self.boost = BoostController::new();
        self.score = 0;
        self.base_period = Duration::from_millis(INITIAL_SPEED_MS);
        self.period = self.base_period;
    }

    /// Start a run. From idle or game-over this is a full reset; from paused
    /// it resumes without touching the board; while running it does nothing.
    pub fn start(&mut self) -> Effects {
        let mut fx = Effects::default();

        match self.run_state {
            RunState::Running => return fx,
            RunState::Paused => {
                self.run_state = RunState::Running;
                fx.events.push(GameEvent::GameResumed);
            }
            RunState::Idle | RunState::GameOver => {
                self.reset_board();
                self.run_state = RunState::Running;
                fx.events.push(GameEvent::GameStarted);
            }
        }

        fx.snapshot = true;
        fx.schedule = Some(ScheduleCmd::Start(self.period));
        fx
    }

    /// Toggle running/paused. Ignored on the idle or game-over board.
    pub fn pause(&mut self) -> Effects {
        let mut fx = Effects::default();

        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                fx.snapshot = true;
                fx.schedule = Some(ScheduleCmd::Stop);
                fx.events.push(GameEvent::GamePaused);
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                fx.snapshot = true;
                fx.schedule = Some(ScheduleCmd::Start(self.period));
                fx.events.push(GameEvent::GameResumed);
            }
            RunState::Idle | RunState::GameOver => {}
        }

        fx
    }

    /// Full reset back to the idle board, from any state
    pub fn reset(&mut self) -> Effects {
        self.reset_board();
        self.run_state = RunState::Idle;

        Effects {
            snapshot: true,
            schedule: Some(ScheduleCmd::Stop),
            events: vec![GameEvent::GameReset],
            ..Effects::default()
        }
    }

    /// Map a speed-control value (1..=10, higher = faster) to the base tick
    /// period. Takes effect on the live schedule immediately unless a boost
    /// burst is active, in which case it applies at boost exit. Out-of-range
    /// values are ignored.
    pub fn set_base_speed(&mut self, raw: u8) -> Effects {
        let mut fx = Effects::default();

        if !(SPEED_CONTROL_MIN..=SPEED_CONTROL_MAX).contains(&raw) {
            return fx;
        }

        let reversed = (SPEED_CONTROL_MAX + 1 - raw) as u64;
        let period_ms = MIN_SPEED_MS + (MAX_SPEED_MS - MIN_SPEED_MS) * reversed / 10;
        self.base_period = Duration::from_millis(period_ms);
        fx.snapshot = true;
        fx.events.push(GameEvent::SpeedChanged {
            value: raw,
            period_ms,
        });

        if !self.boost.is_boosting() {
            self.period = self.base_period;
            if self.run_state == RunState::Running {
                fx.schedule = Some(ScheduleCmd::Start(self.period));
            }
        }

        fx
    }

    /// Handle a key press. Direction keys feed the input tracker; the
    /// confirm key starts/resumes, the toggle key pauses. Anything else is
    /// ignored.
    pub fn key_down(&mut self, key: Key) -> Effects {
        if let Some(direction) = key.direction() {
            self.input.press(direction, self.snake.heading());
            return Effects::default();
        }

        match key {
            Key::Enter if self.run_state != RunState::Running => self.start(),
            Key::Space if matches!(self.run_state, RunState::Running | RunState::Paused) => {
                self.pause()
            }
            _ => Effects::default(),
        }
    }

    /// Handle a key release
    pub fn key_up(&mut self, key: Key) -> Effects {
        if let Some(direction) = key.direction() {
            self.input.release(direction);
        }
        Effects::default()
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self, now: Instant) -> Effects {
        let mut fx = Effects::default();

        // The scheduler is cancelled on pause/reset/game-over, but the abort
        // lands at the tick task's next await; a tick already past it stops
        // here instead.
        if self.run_state != RunState::Running {
            return fx;
        }
        fx.snapshot = true;

        // Boost re-evaluation. A reschedule affects future ticks only.
        match self.boost.evaluate(self.input.any_held(), now) {
            Some(BoostChange::Started) => {
                self.period = Duration::from_millis(BOOST_SPEED_MS);
                fx.schedule = Some(ScheduleCmd::Start(self.period));
                fx.events.push(GameEvent::BoostStarted);
            }
            Some(BoostChange::Ended) => {
                self.period = self.base_period;
                fx.schedule = Some(ScheduleCmd::Start(self.period));
                fx.events.push(GameEvent::BoostEnded);
            }
            None => {}
        }

        // Commit the buffered heading and move
        self.snake.set_heading(self.input.buffered());
        self.snake.advance();

        // Collision is checked before food: the snake and food stay on the
        // board as they were at the moment of death.
        if let Some(kind) = collision::detect(&self.snake) {
            self.run_state = RunState::GameOver;
            self.boost.deactivate();
            self.input.clear(self.snake.heading());
            fx.schedule = Some(ScheduleCmd::Stop);
            fx.cues.push(Cue::GameOver);
            fx.events.push(GameEvent::GameOver {
                score: self.score,
                length: self.snake.len(),
                cause: kind.as_str().to_string(),
            });
            return fx;
        }

        // Food consumption decides whether the tail shrinks this tick
        if self.snake.head() == self.food {
            self.score += FOOD_SCORE;
            let eaten = self.food;
            self.food = food::place(&self.snake, &mut rand::thread_rng());
            debug_assert!(!self.snake.occupies(self.food));

            fx.cues.push(Cue::Eat);
            fx.events.push(GameEvent::FoodEaten {
                x: eaten.x,
                y: eaten.y,
                score: self.score,
            });

            if self.score > self.high_score {
                self.high_score = self.score;
                fx.persist_high_score = Some(self.high_score);
                fx.events.push(GameEvent::HighScore {
                    score: self.high_score,
                });
            }
        } else {
            self.snake.trim_tail();
        }

        debug_assert!(!self.snake.hit_self());
        fx
    }

    /// Read-only view for the rendering client
    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::Snapshot {
            snake: self.snake.to_data(),
            food: CellData {
                x: self.food.x,
                y: self.food.y,
            },
            score: self.score,
            high_score: self.high_score,
            run_state: self.run_state,
            is_boosting: self.boost.is_boosting(),
        }
    }
}
