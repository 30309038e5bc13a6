use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::hand::Category;
use crate::player::PlayerAction;
use crate::showdown::PotSettlement;

/// Records a single seat action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index of the acting player
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action taken by the player
    pub action: PlayerAction,
    /// Chips moved from the stack into the street bet
    pub amount: u32,
    /// Stack left after the action
    pub chips_after: u32,
}

/// A forced blind bet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlindPost {
    pub seat: usize,
    pub amount: u32,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for deck shuffling (enables deterministic replay)
    pub seed: Option<u64>,
    /// Button seat for this hand
    pub dealer: usize,
    #[serde(default)]
    pub blinds: Vec<BlindPost>,
    /// Chronological list of all seat actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    /// Per-pot payouts in pot order
    #[serde(default)]
    pub settlements: Vec<PotSettlement>,
    /// Hand result summary
    pub result: Option<String>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// Showdown information if hand went to showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>, dealer: usize) -> Self {
        Self {
            hand_id,
            seed,
            dealer,
            blinds: Vec::new(),
            actions: Vec::new(),
            board: Vec::new(),
            settlements: Vec::new(),
            result: None,
            ts: None,
            meta: None,
            showdown: None,
        }
    }

    /// Total paid out per seat, in seat order.
    pub fn winnings(&self) -> Vec<(usize, u32)> {
        let mut totals: Vec<(usize, u32)> = Vec::new();
        for &(seat, amount) in self.settlements.iter().flat_map(|s| s.payouts.iter()) {
            match totals.iter_mut().find(|(s, _)| *s == seat) {
                Some(entry) => entry.1 += amount,
                None => totals.push((seat, amount)),
            }
        }
        totals.sort_unstable();
        totals
    }
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub hole_cards: Vec<Card>,
    pub category: Category,
    pub tiebreakers: Vec<u8>,
    pub best_five: Vec<Card>,
    pub description: String,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats that won at least one pot
    pub winners: Vec<usize>,
    pub hands: Vec<ShownHand>,
    /// Optional notes about the showdown (e.g., "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends hand records as JSON lines and hands out sequential hand ids.
pub struct HandLogger {
    writer: Option<BufWriter<Box<dyn Write>>>,
    date: String,
    seq: u32,
}

impl std::fmt::Debug for HandLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandLogger")
            .field("date", &self.date)
            .field("seq", &self.seq)
            .field("writes", &self.writer.is_some())
            .finish()
    }
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Box::new(f)))
    }

    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer: Some(BufWriter::new(writer)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    /// Id source only; `write` discards records.
    pub fn detached() -> Self {
        Self {
            writer: None,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
