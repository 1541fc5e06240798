use std::collections::{HashMap, HashSet};

use models::{
    Competitor, CompetitorMap, FestivalError, FestivalType, RosterEntry, RoundResult,
    StandingEntry,
};
use ordered_float::OrderedFloat;

use super::ranking;

/// Results offered to the operator when entering a bout.
pub const RESULT_OPTIONS: [&str; 7] = [
    "10.00",
    "9.75",
    "9.00",
    "8.75",
    "8.50",
    "10.00 / 9.75",
    "9.00 / 8.75",
];

/// Parses `"9.75"` or a split result `"10.00 / 9.75"`.
pub fn parse_result(text: &str) -> Result<RoundResult, FestivalError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FestivalError::validation("result is empty"));
    }

    if let Some((high, low)) = text.split_once('/') {
        let high = parse_score(high)
            .ok_or_else(|| FestivalError::validation(format!("invalid result: \"{text}\"")))?;
        let low = parse_score(low)
            .ok_or_else(|| FestivalError::validation(format!("invalid result: \"{text}\"")))?;
        return Ok(RoundResult::split(high, low));
    }

    let value = parse_score(text)
        .ok_or_else(|| FestivalError::validation(format!("invalid result: \"{text}\"")))?;
    Ok(RoundResult::single(value))
}

fn parse_score(text: &str) -> Option<f64> {
    let value = text.trim().replace(',', ".").parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parses and writes the result of a 1-based round. An occupied slot is
/// never overwritten; clear it first.
pub fn record_result<'a>(
    competitors: &'a mut CompetitorMap,
    id: &str,
    round: u8,
    text: &str,
) -> Result<&'a Competitor, FestivalError> {
    vacant_slot(competitors, id, round)?;
    let result = parse_result(text)?;
    store_result(competitors, id, round, result)
}

/// Writes an already parsed result into an empty slot.
pub fn store_result<'a>(
    competitors: &'a mut CompetitorMap,
    id: &str,
    round: u8,
    result: RoundResult,
) -> Result<&'a Competitor, FestivalError> {
    let slot = vacant_slot(competitors, id, round)?;
    let competitor = competitors
        .get_mut(id)
        .ok_or_else(|| unknown_competitor(id))?;
    competitor.rounds[slot] = Some(result);
    Ok(&*competitor)
}

fn vacant_slot(competitors: &CompetitorMap, id: &str, round: u8) -> Result<usize, FestivalError> {
    let existing = competitors
        .get(id)
        .ok_or_else(|| unknown_competitor(id))?;
    let slot = slot_index(existing, round)?;
    if existing.rounds[slot].is_some() {
        return Err(FestivalError::state(format!(
            "{} already has a result for round {round}",
            existing.display_name()
        )));
    }
    Ok(slot)
}

pub fn clear_result<'a>(
    competitors: &'a mut CompetitorMap,
    id: &str,
    round: u8,
) -> Result<&'a Competitor, FestivalError> {
    let existing = competitors
        .get(id)
        .ok_or_else(|| unknown_competitor(id))?;
    let slot = slot_index(existing, round)?;

    let competitor = competitors
        .get_mut(id)
        .ok_or_else(|| unknown_competitor(id))?;
    competitor.rounds[slot] = None;
    Ok(&*competitor)
}

/// Builds the competitor collection for a session.
///
/// Without a standing every roster entry starts at zero. With a standing, each
/// standing entry is matched to the roster by name to find its id and its
/// imported total becomes the base score; roster entries missing from the
/// standing are not seeded.
pub fn seed(
    festival_type: FestivalType,
    roster: &[RosterEntry],
    standing: Option<&[StandingEntry]>,
) -> Result<CompetitorMap, FestivalError> {
    let mut ids = HashSet::new();
    let mut by_name: HashMap<&str, &RosterEntry> = HashMap::new();
    for entry in roster {
        if !ids.insert(entry.id.as_str()) {
            return Err(FestivalError::duplicate(format!(
                "start number {} appears twice in the roster",
                entry.id
            )));
        }
        if by_name.insert(entry.name.as_str(), entry).is_some() {
            return Err(FestivalError::duplicate(format!(
                "name appears twice in the roster: {}",
                entry.name
            )));
        }
    }

    let mut seeded = match standing {
        None => roster
            .iter()
            .map(|e| Competitor::new(&e.id, &e.name, &e.decoration, 0.0, festival_type))
            .collect::<Vec<_>>(),
        Some(standing) => {
            let mut seen = HashSet::new();
            let mut out = Vec::with_capacity(standing.len());
            for s in standing {
                let entry = by_name.get(s.name.as_str()).ok_or_else(|| {
                    FestivalError::lookup(format!(
                        "competitor \"{}\" from the standing is not in the roster",
                        s.name
                    ))
                })?;
                if !seen.insert(entry.id.as_str()) {
                    return Err(FestivalError::duplicate(format!(
                        "name appears twice in the standing: {}",
                        s.name
                    )));
                }
                out.push(Competitor::new(
                    &entry.id,
                    &s.name,
                    &s.decoration,
                    s.total,
                    festival_type,
                ));
            }
            out
        }
    };

    assign_initial_ranks(&mut seeded);
    Ok(seeded.into_iter().collect())
}

/// Stable sort by pre-session total, so ties keep input order.
fn assign_initial_ranks(competitors: &mut [Competitor]) {
    competitors.sort_by_key(|c| std::cmp::Reverse(OrderedFloat(c.total())));
    let totals = competitors.iter().map(Competitor::total).collect::<Vec<_>>();
    for (competitor, placing) in competitors.iter_mut().zip(ranking::placings(&totals)) {
        competitor.initial_rank = placing.rank;
        competitor.initial_rank_label = placing.label;
    }
}

fn slot_index(competitor: &Competitor, round: u8) -> Result<usize, FestivalError> {
    usize::from(round)
        .checked_sub(1)
        .filter(|idx| *idx < competitor.rounds.len())
        .ok_or_else(|| FestivalError::validation(format!("round {round} is out of range")))
}

fn unknown_competitor(id: &str) -> FestivalError {
    FestivalError::lookup(format!("no competitor with start number {id}"))
}
