use models::{BoutEntry, BoutSide, Competitor};

use crate::festival::calculator::{Requirement, TargetRequirement};
use crate::festival::lines::StandingRow;
use crate::festival::Festival;

pub fn format_standing(festival: &Festival) -> String {
    let round = festival.current_round();
    let mut out = format!("=== Live-Rangliste (Gang {round}) ===\n");
    if let Some(bounds) = festival.kranz_bounds() {
        out.push_str(&format!("Kränze: {}-{}\n", bounds.min, bounds.max));
    }
    out.push_str(&format!(
        "{:<6} {:>4}  {:<32} {:>7}  {}\n",
        "Rang", "Nr.", "Name", "Total", format!("Note G.{round}")
    ));
    out.push_str(&"-".repeat(68));
    out.push('\n');

    for row in festival.standing() {
        match row {
            StandingRow::Competitor {
                competitor,
                placing,
            } => {
                let marker = if festival.last_added().contains(&competitor.id) {
                    " +"
                } else {
                    ""
                };
                let note = competitor
                    .round(round)
                    .map(|r| r.display.as_str())
                    .unwrap_or("-");
                out.push_str(&format!(
                    "{:<6} {:>4}  {:<32} {:>7.2}  {}{}\n",
                    placing.label,
                    competitor.id,
                    competitor.display_name(),
                    competitor.total(),
                    note,
                    marker
                ));
            }
            StandingRow::Placeholder { label } => {
                out.push_str(&format!("{label:<6} {:>4}  ...\n", ""));
            }
            StandingRow::Line(line) => {
                out.push_str(&format!("{line}\n"));
            }
        }
    }

    out
}

/// Competitors still waiting for their bout, with the rank they started the
/// session with.
pub fn format_overview(festival: &Festival) -> String {
    let mut out = format!(
        "=== Übersicht (nach Gang {}) ===\n",
        festival.current_round() - 1
    );
    out.push_str(&format!(
        "{:<6} {:>4}  {:<32} {:>7}\n",
        "Rang", "Nr.", "Name", "Total"
    ));
    out.push_str(&"-".repeat(54));
    out.push('\n');
    for competitor in festival.awaiting() {
        out.push_str(&format!(
            "{:<6} {:>4}  {:<32} {:>7.2}\n",
            competitor.initial_rank_label,
            competitor.id,
            competitor.display_name(),
            competitor.total()
        ));
    }
    out
}

pub fn format_requirements(requirements: &[TargetRequirement]) -> String {
    let mut out = String::new();
    for r in requirements {
        let text = match r.requirement {
            Requirement::Single(o) => format!("{} ({:.2})", o.tier, o.score),
            Requirement::Pair(a, b) => {
                format!("{} ({:.2}) & {} ({:.2})", a.tier, a.score, b.tier, b.score)
            }
            Requirement::Unreachable => "Nicht erreichbar".to_string(),
        };
        out.push_str(&format!("Für {:.2}: {}\n", r.target, text));
    }
    out
}

pub fn format_slots(festival: &Festival) -> String {
    let mut out = format!("=== Gänge Eingabe (Gang {}) ===\n", festival.current_round());
    for pairing in festival.pairings() {
        out.push_str(&format!(
            "Platz {}: {} --- {}",
            pairing.slot_id + 1,
            describe_entry(festival, pairing.entry(BoutSide::First), "Schwinger 1"),
            describe_entry(festival, pairing.entry(BoutSide::Second), "Schwinger 2"),
        ));
        if let Some(error) = &pairing.error {
            out.push_str(&format!("  [{error}]"));
        }
        out.push('\n');

        if festival.settings().show_calculator {
            for entry in [BoutSide::First, BoutSide::Second].map(|side| pairing.entry(side)) {
                let Some(id) = entry.competitor_id.as_deref() else {
                    continue;
                };
                let Ok(Some(requirements)) = festival.calculator_for(id) else {
                    continue;
                };
                for line in format_requirements(&requirements).lines() {
                    out.push_str(&format!("    {id}: {line}\n"));
                }
            }
        }
    }
    out
}

fn describe_entry(festival: &Festival, entry: &BoutEntry, placeholder: &str) -> String {
    let who = entry
        .competitor_id
        .as_deref()
        .and_then(|id| festival.competitor(id))
        .map(describe_competitor)
        .unwrap_or_else(|| placeholder.to_string());
    match entry.result.as_deref() {
        Some(result) if !result.is_empty() => format!("{who} = {result}"),
        _ => who,
    }
}

fn describe_competitor(competitor: &Competitor) -> String {
    format!("{} ({:.2})", competitor.display_name(), competitor.total())
}
