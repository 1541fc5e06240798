use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod config;
pub mod error;

pub use config::{LineSettings, SessionSettings};
pub use error::FestivalError;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
pub enum FestivalType {
    #[default]
    #[serde(rename = "normal")]
    #[strum(serialize = "normal")]
    Normal,
    #[serde(rename = "esaf")]
    #[strum(serialize = "esaf")]
    Esaf,
}

impl FestivalType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Esaf => "esaf",
        }
    }

    pub const fn round_count(self) -> u8 {
        match self {
            Self::Normal => 6,
            Self::Esaf => 8,
        }
    }

    pub const fn final_round(self) -> u8 {
        self.round_count()
    }

    pub const fn contains_round(self, round: u8) -> bool {
        round >= 1 && round <= self.round_count()
    }
}

/// Score credited for one round. `high` counts toward the total, `low` is kept
/// for display of split results such as "10.00 / 9.75".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub high: f64,
    pub low: f64,
    pub display: String,
}

impl RoundResult {
    pub fn single(value: f64) -> Self {
        Self {
            high: value,
            low: value,
            display: format!("{value:.2}"),
        }
    }

    pub fn split(high: f64, low: f64) -> Self {
        Self {
            high,
            low,
            display: format!("{high:.2} / {low:.2}"),
        }
    }

    pub fn is_split(&self) -> bool {
        self.high != self.low
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub decoration: String,
    pub base_score: f64,
    pub rounds: Vec<Option<RoundResult>>,
    pub initial_rank: u32,
    pub initial_rank_label: String,
}

impl Competitor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        decoration: impl Into<String>,
        base_score: f64,
        festival_type: FestivalType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            decoration: decoration.into(),
            base_score,
            rounds: vec![None; festival_type.round_count() as usize],
            initial_rank: 0,
            initial_rank_label: String::new(),
        }
    }

    /// Base score plus the high value of every filled round. Always derived,
    /// never cached.
    pub fn total(&self) -> f64 {
        self.base_score
            + self
                .rounds
                .iter()
                .flatten()
                .map(|r| r.high)
                .sum::<f64>()
    }

    /// Result for a 1-based round number.
    pub fn round(&self, round: u8) -> Option<&RoundResult> {
        let idx = usize::from(round).checked_sub(1)?;
        self.rounds.get(idx)?.as_ref()
    }

    pub fn has_result(&self, round: u8) -> bool {
        self.round(round).is_some()
    }

    pub fn display_name(&self) -> String {
        if self.decoration.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.decoration)
        }
    }
}

/// Competitors keyed by id. Records are shared between the live map and the
/// undo snapshots and copied on write, so a snapshot is a cheap clone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorMap(BTreeMap<String, Arc<Competitor>>);

impl CompetitorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Competitor> {
        self.0.get(id).map(Arc::as_ref)
    }

    /// Mutable access; clones the record first if a snapshot still shares it.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Competitor> {
        self.0.get_mut(id).map(Arc::make_mut)
    }

    pub fn insert(&mut self, competitor: Competitor) -> Option<Arc<Competitor>> {
        self.0.insert(competitor.id.clone(), Arc::new(competitor))
    }

    pub fn values(&self) -> impl Iterator<Item = &Competitor> {
        self.0.values().map(Arc::as_ref)
    }

    /// Entries with the key they are stored under.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Competitor)> {
        self.0.iter().map(|(id, c)| (id.as_str(), c.as_ref()))
    }
}

impl FromIterator<Competitor> for CompetitorMap {
    fn from_iter<T: IntoIterator<Item = Competitor>>(iter: T) -> Self {
        let mut map = Self::new();
        for competitor in iter {
            map.insert(competitor);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum BoutSide {
    #[serde(rename = "first")]
    #[strum(serialize = "first", serialize = "1")]
    First,
    #[serde(rename = "second")]
    #[strum(serialize = "second", serialize = "2")]
    Second,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoutEntry {
    pub competitor_id: Option<String>,
    pub result: Option<String>,
}

impl BoutEntry {
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.competitor_id) && filled(&self.result)
    }
}

/// One bout slot of the current round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub slot_id: usize,
    pub first: BoutEntry,
    pub second: BoutEntry,
    pub error: Option<String>,
}

impl Pairing {
    pub fn empty(slot_id: usize) -> Self {
        Self {
            slot_id,
            ..Self::default()
        }
    }

    pub fn entry(&self, side: BoutSide) -> &BoutEntry {
        match side {
            BoutSide::First => &self.first,
            BoutSide::Second => &self.second,
        }
    }

    pub fn entry_mut(&mut self, side: BoutSide) -> &mut BoutEntry {
        match side {
            BoutSide::First => &mut self.first,
            BoutSide::Second => &mut self.second,
        }
    }

    pub fn clear(&mut self) {
        self.first = BoutEntry::default();
        self.second = BoutEntry::default();
        self.error = None;
    }
}

/// Roster line: start number plus name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub decoration: String,
}

/// Standing line: carried-over total plus name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub total: f64,
    pub name: String,
    pub decoration: String,
}
