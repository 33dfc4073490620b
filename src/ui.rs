//! Menu screens
//!
//! A small state machine over the pre-match screens. The window layer turns
//! clicks and key presses into `UiEvent`s; layout and fonts live there too.

use crate::consts::FPS;
use crate::input::Key;
use crate::ledger::{ScoreLedger, ScoreRecord};
use crate::settings::{HomingCheat, MatchConfig, Settings, Slider};
use crate::sim::{Difficulty, PowerupKind};

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 20;
/// Countdown before a match starts
pub const COUNTDOWN_TICKS: u32 = 3 * FPS;

/// Main menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Settings,
    Difficulty,
    Instructions,
    Ranking,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Start,
        MenuItem::Settings,
        MenuItem::Difficulty,
        MenuItem::Instructions,
        MenuItem::Ranking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItem::Start => "START",
            MenuItem::Settings => "SETTING",
            MenuItem::Difficulty => "DIFFICULTY",
            MenuItem::Instructions => "INSTRUCTION",
            MenuItem::Ranking => "RANKING",
        }
    }
}

/// Cheat menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheatChoice {
    Homing(HomingCheat),
    WallHack,
    Burst,
    ThroughWalls,
    CancelAll,
}

impl CheatChoice {
    pub const ALL: [CheatChoice; 7] = [
        CheatChoice::Homing(HomingCheat::Blue),
        CheatChoice::Homing(HomingCheat::Green),
        CheatChoice::Homing(HomingCheat::Both),
        CheatChoice::WallHack,
        CheatChoice::Burst,
        CheatChoice::ThroughWalls,
        CheatChoice::CancelAll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheatChoice::Homing(HomingCheat::Blue) => "Blue Cheat",
            CheatChoice::Homing(HomingCheat::Green) => "Green Cheat",
            CheatChoice::Homing(HomingCheat::Both) => "Both Cheat",
            CheatChoice::WallHack => "Wall Hack",
            CheatChoice::Burst => "5 Bullets at a time",
            CheatChoice::ThroughWalls => "Through Wall",
            CheatChoice::CancelAll => "Cancel All",
        }
    }
}

/// Two-box player name form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    pub names: [String; 2],
    /// Box receiving typed characters
    pub focus: Option<usize>,
    pub confirmed: [bool; 2],
}

impl NameEntry {
    fn type_key(&mut self, key: Key) {
        let Some(i) = self.focus else {
            return;
        };
        if self.confirmed[i] {
            return;
        }
        let name = &mut self.names[i];
        match key {
            Key::Backspace => {
                name.pop();
            }
            _ => match key.as_char() {
                Some(c) if !c.is_control() && name.chars().count() < MAX_NAME_LEN => name.push(c),
                _ => {}
            },
        }
    }

    fn confirm(&mut self, i: usize) {
        if i < 2 && !self.names[i].is_empty() {
            self.confirmed[i] = true;
            if self.focus == Some(i) {
                self.focus = None;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.confirmed.iter().all(|c| *c)
    }
}

/// Current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    MainMenu,
    /// Slider edits are held in `draft` until confirmed
    Settings { draft: MatchConfig },
    /// Cheat picker, opened from the settings screen
    Cheats { draft: MatchConfig },
    Difficulty,
    Instructions,
    Ranking { rows: Vec<(String, ScoreRecord)> },
    NameEntry(NameEntry),
    Countdown { remaining_ticks: u32 },
    Match,
}

/// Input delivered to the menus
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Key(Key),
    Select(MenuItem),
    /// Slider dragged to `t` in [0, 1] along its track
    Slide(Slider, f32),
    OpenCheats,
    Cheat(CheatChoice),
    PickDifficulty(Difficulty),
    FocusName(usize),
    ConfirmName(usize),
}

/// What the caller should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    None,
    /// Settings changed and may be saved
    SettingsChanged,
    /// Countdown finished; start a match with the current settings
    StartMatch,
}

/// Menu flow plus the settings it edits
#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: Screen,
    pub settings: Settings,
}

impl Menu {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::MainMenu,
            settings,
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> UiAction {
        let screen = std::mem::replace(&mut self.screen, Screen::MainMenu);
        let (next, action) = self.transition(screen, event);
        self.screen = next;
        action
    }

    fn transition(&mut self, screen: Screen, event: UiEvent) -> (Screen, UiAction) {
        match (screen, event) {
            (Screen::MainMenu, UiEvent::Select(item)) => (self.open(item), UiAction::None),

            (Screen::Settings { mut draft }, UiEvent::Slide(slider, t)) => {
                slider.write(&mut draft, slider.value_at(t));
                (Screen::Settings { draft }, UiAction::None)
            }
            (Screen::Settings { draft }, UiEvent::OpenCheats) => {
                (Screen::Cheats { draft }, UiAction::None)
            }
            (Screen::Settings { draft }, UiEvent::Key(Key::Enter)) => {
                // Cap is not slider-controlled
                self.settings.match_config = MatchConfig {
                    hp_cap: self.settings.match_config.hp_cap,
                    ..draft
                };
                log::info!("Match settings updated: {:?}", self.settings.match_config);
                (Screen::MainMenu, UiAction::SettingsChanged)
            }

            (Screen::Cheats { draft }, UiEvent::Cheat(choice)) => {
                self.apply_cheat(choice);
                (Screen::Settings { draft }, UiAction::SettingsChanged)
            }
            (Screen::Cheats { draft }, UiEvent::Key(Key::Escape)) => {
                (Screen::Settings { draft }, UiAction::None)
            }

            (Screen::Difficulty, UiEvent::PickDifficulty(difficulty)) => {
                self.settings.difficulty = difficulty;
                log::info!("Difficulty set to {}", difficulty.as_str());
                (Screen::MainMenu, UiAction::SettingsChanged)
            }

            (Screen::NameEntry(mut form), UiEvent::FocusName(i)) if i < 2 => {
                form.focus = Some(i);
                (Screen::NameEntry(form), UiAction::None)
            }
            (Screen::NameEntry(mut form), UiEvent::ConfirmName(i)) => {
                form.confirm(i);
                if form.is_complete() {
                    self.settings.player_names = form.names;
                    let countdown = Screen::Countdown {
                        remaining_ticks: COUNTDOWN_TICKS,
                    };
                    (countdown, UiAction::SettingsChanged)
                } else {
                    (Screen::NameEntry(form), UiAction::None)
                }
            }
            (Screen::NameEntry(_), UiEvent::Key(Key::Escape)) => (Screen::MainMenu, UiAction::None),
            (Screen::NameEntry(mut form), UiEvent::Key(key)) => {
                form.type_key(key);
                (Screen::NameEntry(form), UiAction::None)
            }

            (screen @ (Screen::Countdown { .. } | Screen::Match), _) => (screen, UiAction::None),

            // Escape backs out of every other screen
            (_, UiEvent::Key(Key::Escape)) => (Screen::MainMenu, UiAction::None),
            (screen, _) => (screen, UiAction::None),
        }
    }

    fn open(&self, item: MenuItem) -> Screen {
        match item {
            MenuItem::Start => Screen::NameEntry(NameEntry::default()),
            MenuItem::Settings => Screen::Settings {
                draft: self.settings.match_config.clone(),
            },
            MenuItem::Difficulty => Screen::Difficulty,
            MenuItem::Instructions => Screen::Instructions,
            MenuItem::Ranking => Screen::Ranking {
                rows: ScoreLedger::load(&self.settings.ledger_path).ranking(),
            },
        }
    }

    fn apply_cheat(&mut self, choice: CheatChoice) {
        let cheats = &mut self.settings.cheats;
        match choice {
            CheatChoice::Homing(target) => cheats.homing = Some(target),
            CheatChoice::WallHack => cheats.wall_hack = true,
            CheatChoice::Burst => cheats.burst = true,
            CheatChoice::ThroughWalls => cheats.through_walls = true,
            CheatChoice::CancelAll => *cheats = Default::default(),
        }
        log::info!("Cheat selected: {}", choice.as_str());
    }

    /// Advance timed screens by one frame
    pub fn tick(&mut self) -> UiAction {
        if let Screen::Countdown { remaining_ticks } = &mut self.screen {
            *remaining_ticks = remaining_ticks.saturating_sub(1);
            if *remaining_ticks == 0 {
                self.screen = Screen::Match;
                return UiAction::StartMatch;
            }
        }
        UiAction::None
    }

    /// Back to the main menu after a match
    pub fn leave_match(&mut self) {
        self.screen = Screen::MainMenu;
    }

    /// Whole seconds left on the countdown, as shown on screen
    pub fn countdown_label(&self) -> Option<String> {
        match &self.screen {
            Screen::Countdown { remaining_ticks } => {
                Some(remaining_ticks.div_ceil(FPS).to_string())
            }
            _ => None,
        }
    }

    /// "Name: value" labels for each slider
    pub fn slider_labels(&self) -> Vec<String> {
        let config = match &self.screen {
            Screen::Settings { draft } | Screen::Cheats { draft } => draft,
            _ => &self.settings.match_config,
        };
        Slider::ALL
            .iter()
            .map(|s| format!("{}: {}", s.as_str(), s.read(config) as i32))
            .collect()
    }

    /// Ranking rows as "1. Alice - 10 pts"
    pub fn ranking_lines(&self) -> Vec<String> {
        match &self.screen {
            Screen::Ranking { rows } => rows
                .iter()
                .enumerate()
                .map(|(i, (name, record))| {
                    format!("{}. {} - {} pts", i + 1, name, record.rank_points)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Instruction text built from the active key bindings
pub fn instruction_lines(settings: &Settings) -> Vec<String> {
    let mut lines = vec!["Instructions:".to_string(), String::new()];
    for (i, (label, bindings)) in ["Player 1 (Blue):", "Player 2 (Green):"]
        .iter()
        .zip(&settings.bindings)
        .enumerate()
    {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(label.to_string());
        lines.push(format!(
            "  Move: {} {} {} {}",
            bindings.up.label(),
            bindings.left.label(),
            bindings.down.label(),
            bindings.right.label()
        ));
        lines.push(format!("  Shoot: {}", bindings.shoot.label()));
    }
    lines.push("Stay within the safe bubble or lose health".to_string());
    lines.push(String::new());
    lines.push("Collect the power-up squares to gain more power".to_string());
    lines.push("The four power-ups are:".to_string());
    for (i, kind) in PowerupKind::ALL.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, kind.as_str()));
    }
    lines.push(String::new());
    lines.push("Press ESC to return to menu.".to_string());
    lines
}
