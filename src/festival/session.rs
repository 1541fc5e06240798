use models::{
    BoutSide, Competitor, CompetitorMap, FestivalError, FestivalType, LineSettings, Pairing,
    RosterEntry, SessionSettings, StandingEntry,
};
use serde::{Deserialize, Serialize};

use super::calculator::{self, RoundsRemaining, TargetRequirement};
use super::history::{self, History};
use super::lines::{self, ActiveLines, KranzBounds, LineKind, StandingRow};
use super::ranking;
use super::score;

pub const DEFAULT_SLOT_COUNT: usize = 4;
pub const MIN_SLOT_COUNT: usize = 3;
pub const MAX_SLOT_COUNT: usize = 7;

/// Live state of one festival: competitors, undo history, bout slots and
/// operator settings. This is also the shape that gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festival {
    festival_type: FestivalType,
    current_round: u8,
    competitors: CompetitorMap,
    #[serde(default)]
    history: History,
    #[serde(default)]
    pairings: Vec<Pairing>,
    #[serde(default)]
    settings: SessionSettings,
    #[serde(default)]
    last_added: Vec<String>,
}

/// Competitors whose current-round result was removed by an undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoReport {
    pub reverted: Vec<(String, String)>,
}

impl UndoReport {
    pub fn message(&self) -> Option<String> {
        if self.reverted.is_empty() {
            return None;
        }
        let names = self
            .reverted
            .iter()
            .map(|(_, name)| name.as_str())
            .collect::<Vec<_>>()
            .join(" & ");
        Some(format!("Result for {names} reverted."))
    }
}

impl Festival {
    /// Starts a session. Round 1 seeds from the roster alone; later rounds
    /// need the standing after the previous round.
    pub fn start(
        festival_type: FestivalType,
        current_round: u8,
        roster: &[RosterEntry],
        standing: Option<&[StandingEntry]>,
    ) -> Result<Self, FestivalError> {
        if !festival_type.contains_round(current_round) {
            return Err(FestivalError::validation(format!(
                "round {current_round} does not exist in a {festival_type} festival"
            )));
        }
        if roster.is_empty() {
            return Err(FestivalError::validation("roster is required"));
        }

        let competitors = if current_round == 1 {
            score::seed(festival_type, roster, None)?
        } else {
            let standing = standing.filter(|s| !s.is_empty()).ok_or_else(|| {
                FestivalError::validation(format!(
                    "round {current_round} needs the standing after round {}",
                    current_round - 1
                ))
            })?;
            score::seed(festival_type, roster, Some(standing))?
        };

        tracing::info!(
            "Festival started: type={} round={} competitors={}",
            festival_type.as_str(),
            current_round,
            competitors.len()
        );

        Ok(Self {
            festival_type,
            current_round,
            competitors,
            history: History::new(),
            pairings: empty_slots(DEFAULT_SLOT_COUNT),
            settings: SessionSettings {
                lines: LineSettings::for_festival(festival_type),
                show_calculator: false,
            },
            last_added: Vec::new(),
        })
    }

    /// Checks invariants that deserialization cannot enforce, on the live
    /// collection and on every undo snapshot.
    pub fn check_consistency(&self) -> Result<(), FestivalError> {
        if !self.festival_type.contains_round(self.current_round) {
            return Err(FestivalError::validation(format!(
                "stored round {} does not exist in a {} festival",
                self.current_round, self.festival_type
            )));
        }
        let rounds = usize::from(self.festival_type.round_count());
        check_collection(&self.competitors, rounds, "live standing")?;
        for (idx, snapshot) in self.history.snapshots().enumerate() {
            check_collection(snapshot, rounds, &format!("undo snapshot {}", idx + 1))?;
        }
        Ok(())
    }

    pub fn festival_type(&self) -> FestivalType {
        self.festival_type
    }

    pub fn current_round(&self) -> u8 {
        self.current_round
    }

    pub fn competitors(&self) -> &CompetitorMap {
        &self.competitors
    }

    pub fn competitor(&self, id: &str) -> Option<&Competitor> {
        self.competitors.get(id)
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn last_added(&self) -> &[String] {
        &self.last_added
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Pushes a copy of the competitor collection onto the undo stack.
    pub fn snapshot(&mut self) {
        self.history.push(&self.competitors);
    }

    /// Reverts to the most recent snapshot. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<UndoReport> {
        let restored = self.history.pop()?;
        let round = self.current_round;
        let reverted = history::reverted_in_round(&restored, &self.competitors, round)
            .into_iter()
            .filter_map(|id| {
                let name = self.competitors.get(&id)?.display_name();
                Some((id, name))
            })
            .collect::<Vec<_>>();

        self.competitors = restored;
        self.last_added.clear();
        tracing::info!(
            "Undo: reverted={} remaining_history={}",
            reverted.len(),
            self.history.len()
        );
        Some(UndoReport { reverted })
    }

    /// Saves one bout of the current round. Both sides are validated before
    /// anything changes; on success a snapshot is pushed first.
    pub fn record_bout(
        &mut self,
        first: (&str, &str),
        second: (&str, &str),
    ) -> Result<(), FestivalError> {
        let (first_id, first_result) = (first.0.trim(), first.1);
        let (second_id, second_result) = (second.0.trim(), second.1);
        if first_id == second_id {
            return Err(FestivalError::validation(format!(
                "start number {first_id} cannot wrestle against itself"
            )));
        }

        for (id, text) in [(first_id, first_result), (second_id, second_result)] {
            let competitor = self.competitors.get(id).ok_or_else(|| {
                FestivalError::lookup(format!("no competitor with start number {id}"))
            })?;
            if competitor.has_result(self.current_round) {
                return Err(FestivalError::state(format!(
                    "{} already has a result",
                    competitor.display_name()
                )));
            }
            score::parse_result(text)?;
        }

        self.snapshot();
        let round = self.current_round;
        score::record_result(&mut self.competitors, first_id, round, first_result)?;
        score::record_result(&mut self.competitors, second_id, round, second_result)?;
        self.last_added = vec![first_id.to_string(), second_id.to_string()];

        tracing::info!(
            "Bout saved: round={} {}={} {}={}",
            round,
            first_id,
            first_result.trim(),
            second_id,
            second_result.trim()
        );
        Ok(())
    }

    /// Replaces the current-round result of one competitor. Not undoable.
    pub fn amend_result(&mut self, id: &str, text: &str) -> Result<&Competitor, FestivalError> {
        let round = self.current_round;
        let result = score::parse_result(text)?;
        let result_display = result.display.clone();
        score::clear_result(&mut self.competitors, id, round)?;
        let competitor = score::store_result(&mut self.competitors, id, round, result)?;
        tracing::info!(
            "Result amended: round={} id={} result={}",
            round,
            id,
            result_display
        );
        Ok(competitor)
    }

    /// Removes the current-round result of one competitor. Not undoable.
    pub fn clear_result(&mut self, id: &str) -> Result<&Competitor, FestivalError> {
        let round = self.current_round;
        let competitor = score::clear_result(&mut self.competitors, id, round)?;
        tracing::info!("Result cleared: round={} id={}", round, id);
        Ok(competitor)
    }

    /// Recreates the bout slots when the number of simultaneous bouts changes.
    pub fn set_slot_count(&mut self, count: usize) -> Result<(), FestivalError> {
        if !(MIN_SLOT_COUNT..=MAX_SLOT_COUNT).contains(&count) {
            return Err(FestivalError::validation(format!(
                "bout slots must be between {MIN_SLOT_COUNT} and {MAX_SLOT_COUNT}, got {count}"
            )));
        }
        if self.pairings.len() != count {
            self.pairings = empty_slots(count);
        }
        Ok(())
    }

    /// Edits one side of a bout slot. `None` leaves a field unchanged.
    pub fn update_slot(
        &mut self,
        slot_id: usize,
        side: BoutSide,
        competitor_id: Option<String>,
        result: Option<String>,
    ) -> Result<(), FestivalError> {
        let pairing = self.slot_mut(slot_id)?;
        let entry = pairing.entry_mut(side);
        if let Some(id) = competitor_id {
            entry.competitor_id = Some(id.trim().to_string());
        }
        if let Some(result) = result {
            entry.result = Some(result.trim().to_string());
        }
        pairing.error = None;
        Ok(())
    }

    /// Saves a filled bout slot. A failure is also stored on the slot.
    pub fn save_slot(&mut self, slot_id: usize) -> Result<(), FestivalError> {
        let pairing = self.slot_mut(slot_id)?.clone();
        let outcome = if pairing.first.is_complete() && pairing.second.is_complete() {
            let first = (
                pairing.first.competitor_id.as_deref().unwrap_or_default(),
                pairing.first.result.as_deref().unwrap_or_default(),
            );
            let second = (
                pairing.second.competitor_id.as_deref().unwrap_or_default(),
                pairing.second.result.as_deref().unwrap_or_default(),
            );
            self.record_bout(first, second)
        } else {
            Err(FestivalError::validation("all fields are required"))
        };

        let slot = self.slot_mut(slot_id)?;
        match outcome {
            Ok(()) => {
                slot.clear();
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Slot {} not saved: {}", slot_id, e);
                slot.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn slot_mut(&mut self, slot_id: usize) -> Result<&mut Pairing, FestivalError> {
        let count = self.pairings.len();
        self.pairings
            .iter_mut()
            .find(|p| p.slot_id == slot_id)
            .ok_or_else(|| {
                FestivalError::lookup(format!("bout slot {} does not exist (1..={count})", slot_id + 1))
            })
    }

    pub fn set_cutoff(&mut self, kind: LineKind, value: Option<f64>) -> Result<(), FestivalError> {
        let value = lines::validate_cutoff(kind, self.festival_type, value)?;
        let lines = &mut self.settings.lines;
        match kind {
            LineKind::Ausstich => lines.ausstich = value,
            LineKind::Kranzausstich => lines.kranzausstich = value,
            LineKind::Kranz => lines.kranz = value,
        }
        Ok(())
    }

    pub fn set_show_calculator(&mut self, show: bool) {
        self.settings.show_calculator = show;
    }

    /// Competitors with a result in the current round, in standing order.
    pub fn competed(&self) -> Vec<&Competitor> {
        let mut list = self
            .competitors
            .values()
            .filter(|c| c.has_result(self.current_round))
            .collect::<Vec<_>>();
        ranking::sort_by_total(&mut list);
        list
    }

    /// Competitors still waiting for their current-round bout.
    pub fn awaiting(&self) -> Vec<&Competitor> {
        let mut list = self
            .competitors
            .values()
            .filter(|c| !c.has_result(self.current_round))
            .collect::<Vec<_>>();
        ranking::sort_by_total(&mut list);
        list
    }

    pub fn active_lines(&self) -> ActiveLines {
        ActiveLines::for_round(
            self.festival_type,
            self.current_round,
            &self.settings.lines,
            self.competitors.len(),
        )
    }

    /// Live standing of the current round with its divider lines.
    pub fn standing(&self) -> Vec<StandingRow<'_>> {
        lines::build_standing(&self.competed(), &self.active_lines())
    }

    /// Wreath-count bounds, only in the final round.
    pub fn kranz_bounds(&self) -> Option<KranzBounds> {
        self.active_lines().kranz_view.map(|view| view.bounds)
    }

    pub fn rounds_remaining(&self) -> Option<RoundsRemaining> {
        RoundsRemaining::for_round(self.festival_type, self.current_round)
    }

    /// What a competitor needs to reach each Kranz target. `Ok(None)` when the
    /// festival is not in its last two rounds.
    pub fn calculator_for(&self, id: &str) -> Result<Option<Vec<TargetRequirement>>, FestivalError> {
        let competitor = self
            .competitors
            .get(id)
            .ok_or_else(|| FestivalError::lookup(format!("no competitor with start number {id}")))?;
        let Some(rounds) = self.rounds_remaining() else {
            return Ok(None);
        };
        Ok(Some(calculator::requirements(
            competitor.total(),
            rounds,
            calculator::kranz_targets(self.festival_type),
        )))
    }
}

fn check_collection(
    competitors: &CompetitorMap,
    rounds: usize,
    context: &str,
) -> Result<(), FestivalError> {
    for (key, competitor) in competitors.iter() {
        if key != competitor.id {
            return Err(FestivalError::validation(format!(
                "{context}: entry {key} holds competitor {}",
                competitor.id
            )));
        }
        if competitor.rounds.len() != rounds {
            return Err(FestivalError::validation(format!(
                "{context}: competitor {} has {} round slots, expected {rounds}",
                competitor.id,
                competitor.rounds.len()
            )));
        }
    }
    Ok(())
}

fn empty_slots(count: usize) -> Vec<Pairing> {
    (0..count).map(Pairing::empty).collect()
}
