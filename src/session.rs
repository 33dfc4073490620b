//! Match session
//!
//! Glue between a frame loop and the simulation. Owns the `GameState`, turns
//! variable frame times into fixed ticks, persists the result once per match
//! and handles restart / leave-to-menu keys.

use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::{Key, KeyBindings, PressedKeys};
use crate::ledger::{self, MatchResult, ScoreLedger};
use crate::renderer::scene::MENU_BUTTON;
use crate::renderer::{Canvas, TankSprite, draw_match};
use crate::settings::Settings;
use crate::sim::{GameState, MatchSetup, TickInput, tick};

/// Longest frame time fed into the accumulator
const MAX_FRAME_DT: f32 = 0.1;

/// What the frame loop should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Continue,
    Restarted,
    ExitToMenu,
}

/// Match setup described by the current settings
pub fn match_setup(settings: &Settings) -> MatchSetup {
    MatchSetup {
        difficulty: settings.difficulty,
        config: settings.match_config.clone(),
        cheats: settings.cheats.clone(),
        names: settings.player_names.clone(),
    }
}

/// A running match plus its frame-loop bookkeeping
pub struct Session {
    pub state: GameState,
    sprites: [TankSprite; 2],
    bindings: [KeyBindings; 2],
    ledger_path: PathBuf,
    accumulator: f32,
    /// Ledger as written by the last successful save
    last_ledger: Option<ScoreLedger>,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings, sprites: [TankSprite; 2]) -> Self {
        let state = GameState::new(seed, match_setup(settings));
        log::info!(
            "Match started ({}): {} vs {}",
            state.difficulty.as_str(),
            state.tanks[0].name,
            state.tanks[1].name
        );
        Self {
            state,
            sprites,
            bindings: settings.bindings.clone(),
            ledger_path: PathBuf::from(&settings.ledger_path),
            accumulator: 0.0,
            last_ledger: None,
        }
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Ledger contents after the most recent successful save
    pub fn last_ledger(&self) -> Option<&ScoreLedger> {
        self.last_ledger.as_ref()
    }

    /// Map held keys to both tanks' controls
    pub fn input_from_keys(&self, pressed: &PressedKeys) -> TickInput {
        TickInput::new(
            self.bindings[0].controls(pressed),
            self.bindings[1].controls(pressed),
        )
    }

    /// Run as many fixed ticks as `dt` seconds cover, returns ticks run
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Draw the current state, then persist the result if the match just ended
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        draw_match(&self.state, &self.sprites, canvas);
        self.persist_result();
    }

    /// One frame: simulate `dt`, then render
    pub fn frame(&mut self, dt: f32, input: &TickInput, canvas: &mut impl Canvas) -> u32 {
        let ticks = self.advance(dt, input);
        self.render(canvas);
        ticks
    }

    /// Write a finished match to the ledger exactly once
    ///
    /// A failed save is logged and the match still counts as persisted, so a
    /// retry can never credit the same result twice.
    pub fn persist_result(&mut self) {
        if self.state.result_recorded {
            return;
        }
        let Some(result) = MatchResult::from_state(&self.state) else {
            return;
        };

        match ledger::record_result(&self.ledger_path, &result) {
            Ok(ledger) => self.last_ledger = Some(ledger),
            Err(e) => log::error!("Failed to record match result: {:#}", e),
        }
        self.state.result_recorded = true;
    }

    /// Start the same match over
    pub fn restart(&mut self) {
        self.state.restart();
        self.accumulator = 0.0;
    }

    /// Handle a key press event
    pub fn handle_key(&mut self, key: Key) -> SessionEvent {
        match key {
            Key::Escape => SessionEvent::ExitToMenu,
            Key::R | Key::Char('r') | Key::Char('R') if self.state.is_finished() => {
                self.restart();
                SessionEvent::Restarted
            }
            _ => SessionEvent::Continue,
        }
    }

    /// Handle a mouse click in arena coordinates
    pub fn handle_click(&mut self, pos: Vec2) -> SessionEvent {
        if MENU_BUTTON.contains(pos) {
            SessionEvent::ExitToMenu
        } else {
            SessionEvent::Continue
        }
    }
}
