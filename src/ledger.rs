//! Persistent score ledger
//!
//! A small delimited table keyed by player name:
//!
//! ```plaintext
//! Player,Rank Points,Net Score
//! Alice,10,5
//! Bob,5,0
//! ```
//!
//! The whole table is rewritten on every save. Rows keep first-seen order.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::sim::{GameState, MatchOutcome};

/// Header row of the ledger file
pub const LEDGER_HEADER: [&str; 3] = ["Player", "Rank Points", "Net Score"];

/// Rank points credited to each player on a draw
pub const DRAW_POINTS: i64 = 5;
/// Rank points credited to the winner
pub const WIN_POINTS: i64 = 10;

/// Cumulative totals for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreRecord {
    pub rank_points: i64,
    pub net_score: i64,
}

/// Result of a finished match, as the ledger needs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Draw { players: [String; 2] },
    Win { winner: String, loser: String, remaining_hp: i64 },
}

impl MatchResult {
    /// Extract the result of a finished match (None while still running)
    pub fn from_state(state: &GameState) -> Option<Self> {
        let names = state.names();
        match state.outcome? {
            MatchOutcome::Draw => Some(MatchResult::Draw { players: names }),
            MatchOutcome::Winner(slot) => Some(MatchResult::Win {
                winner: state.tank(slot).name.clone(),
                loser: state.tank(slot.other()).name.clone(),
                remaining_hp: i64::from(state.tank(slot).hp.max(0)),
            }),
        }
    }
}

/// In-memory copy of the ledger file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    entries: Vec<(String, ScoreRecord)>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ledger; a missing or malformed file yields an empty table
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let ledger = Self::parse(&text);
                log::info!("Loaded {} ledger entries from {}", ledger.len(), path.display());
                ledger
            }
            Err(_) => {
                log::info!("No ledger at {}, starting fresh", path.display());
                Self::new()
            }
        }
    }

    /// Parse ledger text; rows that cannot be read are skipped
    pub fn parse(text: &str) -> Self {
        let mut ledger = Self::new();
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header_ok = lines
            .next()
            .map(|h| split_row(h).iter().map(|f| f.trim()).eq(LEDGER_HEADER))
            .unwrap_or(false);
        if !header_ok {
            if !text.trim().is_empty() {
                log::warn!("Ledger header not recognised, ignoring file contents");
            }
            return ledger;
        }

        for (row, line) in lines.enumerate() {
            match parse_record(line) {
                Some((name, record)) => ledger.merge(&name, record),
                None => log::warn!("Skipping unreadable ledger row {}: {:?}", row + 2, line),
            }
        }
        ledger
    }

    /// Serialize the full table, header first
    pub fn to_text(&self) -> String {
        let mut out = LEDGER_HEADER.join(",");
        out.push('\n');
        for (name, record) in &self.entries {
            out.push_str(&format!(
                "{},{},{}\n",
                quote_field(name),
                record.rank_points,
                record.net_score
            ));
        }
        out
    }

    /// Rewrite the ledger file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())
            .with_context(|| format!("writing score ledger {}", path.display()))?;
        log::info!("Ledger saved ({} players)", self.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<ScoreRecord> {
        let name = clean_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, record)| *record)
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ScoreRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Record for `name`, created at zero if unseen
    ///
    /// Names are stored cleaned so every row stays on one line.
    pub fn entry(&mut self, name: &str) -> &mut ScoreRecord {
        let name = clean_name(name);
        let idx = match self.entries.iter().position(|(n, _)| *n == name) {
            Some(idx) => idx,
            None => {
                self.entries.push((name, ScoreRecord::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Set (or overwrite) a record
    pub fn insert(&mut self, name: &str, record: ScoreRecord) {
        *self.entry(name) = record;
    }

    fn merge(&mut self, name: &str, record: ScoreRecord) {
        let entry = self.entry(name);
        entry.rank_points += record.rank_points;
        entry.net_score += record.net_score;
    }

    /// Credit a finished match
    ///
    /// Draw: both players +5 rank points. Win: winner +10 rank points and
    /// remaining hit points added to net score; the loser is untouched
    /// apart from being listed.
    pub fn apply(&mut self, result: &MatchResult) {
        match result {
            MatchResult::Draw { players } => {
                for name in players {
                    self.entry(name).rank_points += DRAW_POINTS;
                }
            }
            MatchResult::Win {
                winner,
                loser,
                remaining_hp,
            } => {
                self.entry(loser);
                let record = self.entry(winner);
                record.rank_points += WIN_POINTS;
                record.net_score += remaining_hp;
            }
        }
    }

    /// Rows sorted by rank points, best first (ties keep ledger order)
    pub fn ranking(&self) -> Vec<(String, ScoreRecord)> {
        let mut rows = self.entries.clone();
        rows.sort_by(|a, b| b.1.rank_points.cmp(&a.1.rank_points));
        rows
    }
}

/// Load, credit and rewrite the ledger at `path` for one match result
pub fn record_result(path: impl AsRef<Path>, result: &MatchResult) -> anyhow::Result<ScoreLedger> {
    let path = path.as_ref();
    let mut ledger = ScoreLedger::load(path);
    ledger.apply(result);
    ledger.save(path)?;
    Ok(ledger)
}

fn parse_record(line: &str) -> Option<(String, ScoreRecord)> {
    let fields = split_row(line);
    let [name, rank, net] = fields.as_slice() else {
        return None;
    };
    let record = ScoreRecord {
        rank_points: rank.trim().parse().ok()?,
        net_score: net.trim().parse().ok()?,
    };
    Some((name.clone(), record))
}

/// Player name with control characters removed and outer whitespace trimmed
pub fn clean_name(raw: &str) -> String {
    let kept: String = raw.chars().filter(|c| !c.is_control()).collect();
    kept.trim().to_string()
}

/// Split one row on commas, honoring double-quoted fields
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn quote_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
