use std::fmt;

use models::{Competitor, FestivalError, FestivalType, LineSettings};
use serde::Serialize;
use strum::{Display, EnumString};

use super::ranking::{self, Placing};

const AUSSTICH_OPTIONS: [f64; 3] = [36.00, 35.75, 35.50];
const KRANZAUSSTICH_OPTIONS: [f64; 2] = [54.50, 54.25];
const KRANZ_OPTIONS_NORMAL: [f64; 3] = [56.50, 56.25, 56.00];
const KRANZ_OPTIONS_ESAF: [f64; 3] = [75.00, 74.75, 74.50];

const AUSSTICH_ROUND: u8 = 4;
const KRANZAUSSTICH_ROUND_ESAF: u8 = 6;

/// Operator-selectable lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
pub enum LineKind {
    #[strum(serialize = "ausstich")]
    Ausstich,
    #[strum(serialize = "kranzausstich")]
    Kranzausstich,
    #[strum(serialize = "kranz")]
    Kranz,
}

pub fn line_options(kind: LineKind, festival_type: FestivalType) -> &'static [f64] {
    match (kind, festival_type) {
        (LineKind::Ausstich, _) => &AUSSTICH_OPTIONS,
        (LineKind::Kranzausstich, _) => &KRANZAUSSTICH_OPTIONS,
        (LineKind::Kranz, FestivalType::Normal) => &KRANZ_OPTIONS_NORMAL,
        (LineKind::Kranz, FestivalType::Esaf) => &KRANZ_OPTIONS_ESAF,
    }
}

/// Rejects cutoffs that are not on the line's menu. `None` is always allowed.
pub fn validate_cutoff(
    kind: LineKind,
    festival_type: FestivalType,
    value: Option<f64>,
) -> Result<Option<f64>, FestivalError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let options = line_options(kind, festival_type);
    if options.contains(&value) {
        Ok(Some(value))
    } else {
        let menu = options
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(FestivalError::validation(format!(
            "{value:.2} is not a {kind} option (choose one of {menu} or none)"
        )))
    }
}

/// Total a competitor must exceed to count as a Kranz candidate.
pub fn kranz_candidate_threshold(festival_type: FestivalType) -> f64 {
    match festival_type {
        FestivalType::Normal => 55.75,
        FestivalType::Esaf => 74.25,
    }
}

/// Divider rows of the live standing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Line {
    Ausstich(f64),
    Kranzausstich(f64),
    Kranz(f64),
    Schlussgang,
    MinKranz(usize),
    MaxKranz(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ausstich(v) => write!(f, "--- Ausstichlinie ({v:.2}) ---"),
            Self::Kranzausstich(v) => write!(f, "--- Kranzausstichlinie ({v:.2}) ---"),
            Self::Kranz(v) => write!(f, "--- Kranzlinie ({v:.2}) ---"),
            Self::Schlussgang => write!(f, "--- Schlussgangkandidaten ---"),
            Self::MinKranz(n) => write!(f, "--- Min. Kränze ({n}) ---"),
            Self::MaxKranz(n) => write!(f, "--- Max. Kränze ({n}) ---"),
        }
    }
}

/// Bounds on the number of wreaths: 15% and 18% of the field, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KranzBounds {
    pub min: usize,
    pub max: usize,
}

impl KranzBounds {
    pub fn for_field(field_size: usize) -> Self {
        Self {
            min: percent_ceil(field_size, 15),
            max: percent_ceil(field_size, 18),
        }
    }
}

fn percent_ceil(n: usize, percent: usize) -> usize {
    (n * percent).div_ceil(100)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KranzView {
    pub bounds: KranzBounds,
    pub candidate_threshold: f64,
}

/// Lines that apply to one round, with the operator's cutoffs filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActiveLines {
    pub ausstich: Option<f64>,
    pub kranzausstich: Option<f64>,
    pub kranz: Option<f64>,
    pub schlussgang: bool,
    pub kranz_view: Option<KranzView>,
}

impl ActiveLines {
    pub fn for_round(
        festival_type: FestivalType,
        round: u8,
        settings: &LineSettings,
        field_size: usize,
    ) -> Self {
        let final_round = round == festival_type.final_round();
        let schlussgang_round = festival_type.final_round() - 1;

        Self {
            ausstich: settings.ausstich.filter(|_| round == AUSSTICH_ROUND),
            kranzausstich: settings.kranzausstich.filter(|_| {
                festival_type == FestivalType::Esaf && round == KRANZAUSSTICH_ROUND_ESAF
            }),
            kranz: settings.kranz.filter(|_| final_round),
            schlussgang: round == schlussgang_round,
            kranz_view: final_round.then(|| KranzView {
                bounds: KranzBounds::for_field(field_size),
                candidate_threshold: kranz_candidate_threshold(festival_type),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StandingRow<'a> {
    Competitor {
        competitor: &'a Competitor,
        placing: Placing,
    },
    /// Undecided slot up to the Kranz maximum.
    Placeholder { label: String },
    Line(Line),
}

impl StandingRow<'_> {
    pub fn line(&self) -> Option<Line> {
        match self {
            Self::Line(line) => Some(*line),
            _ => None,
        }
    }
}

/// Annotates a standing sorted by total with its divider lines.
///
/// Every active line appears exactly once: at its crossing, or at the end of
/// the list if the walk never crosses it. In the final round, Kranz candidates
/// come first, followed by placeholder rows up to the Kranz maximum.
pub fn build_standing<'a>(sorted: &[&'a Competitor], lines: &ActiveLines) -> Vec<StandingRow<'a>> {
    let placings = ranking::placings_for(sorted);
    let candidates = match lines.kranz_view {
        Some(view) => sorted
            .iter()
            .take_while(|c| c.total() > view.candidate_threshold)
            .count(),
        None => sorted.len(),
    };
    let top_group = placings.iter().take_while(|p| p.rank == 1).count();

    let mut walk = Walk::new(lines, sorted, &placings, top_group);
    for idx in 0..candidates {
        walk.competitor(idx, true);
    }
    if let Some(view) = lines.kranz_view {
        let last_rank = candidates
            .checked_sub(1)
            .map_or(0, |idx| placings[idx].rank);
        walk.placeholders(view.bounds, candidates, last_rank);
    }
    for idx in candidates..sorted.len() {
        walk.competitor(idx, false);
    }
    walk.finish()
}

#[derive(Debug, Default)]
struct Emitted {
    ausstich: bool,
    kranzausstich: bool,
    kranz: bool,
    schlussgang: bool,
    min_kranz: bool,
    max_kranz: bool,
}

struct Walk<'a, 'p> {
    lines: &'p ActiveLines,
    sorted: &'p [&'a Competitor],
    placings: &'p [Placing],
    top_group: usize,
    rows: Vec<StandingRow<'a>>,
    last_total: f64,
    emitted: Emitted,
}

impl<'a, 'p> Walk<'a, 'p> {
    fn new(
        lines: &'p ActiveLines,
        sorted: &'p [&'a Competitor],
        placings: &'p [Placing],
        top_group: usize,
    ) -> Self {
        Self {
            lines,
            sorted,
            placings,
            top_group,
            rows: Vec::with_capacity(sorted.len() + 8),
            last_total: f64::INFINITY,
            emitted: Emitted::default(),
        }
    }

    fn competitor(&mut self, idx: usize, kranz_candidate: bool) {
        let competitor = self.sorted[idx];
        let total = competitor.total();
        self.crossings(total);

        let placing = self.placings[idx].clone();
        let rank = placing.rank;
        self.rows.push(StandingRow::Competitor {
            competitor,
            placing,
        });

        let last_of_group = self
            .sorted
            .get(idx + 1)
            .map_or(true, |next| next.total() != total);
        if last_of_group {
            let closes_candidates =
                (rank == 1 && self.top_group >= 2) || (rank == 2 && self.top_group < 2);
            if self.lines.schlussgang && closes_candidates && !self.emitted.schlussgang {
                self.push(Line::Schlussgang);
                self.emitted.schlussgang = true;
            }
            if let (true, Some(view)) = (kranz_candidate, self.lines.kranz_view) {
                self.bounds_reached(view.bounds, idx + 1);
            }
        }

        self.last_total = total;
    }

    fn crossings(&mut self, total: f64) {
        let last = self.last_total;
        let crossed = |value: f64| last >= value && total < value;

        if let Some(value) = self.lines.ausstich {
            if !self.emitted.ausstich && crossed(value) {
                self.push(Line::Ausstich(value));
                self.emitted.ausstich = true;
            }
        }
        if let Some(value) = self.lines.kranzausstich {
            if !self.emitted.kranzausstich && crossed(value) {
                self.push(Line::Kranzausstich(value));
                self.emitted.kranzausstich = true;
            }
        }
        if let Some(value) = self.lines.kranz {
            if !self.emitted.kranz && crossed(value) {
                self.push(Line::Kranz(value));
                self.emitted.kranz = true;
            }
        }
    }

    fn placeholders(&mut self, bounds: KranzBounds, candidates: usize, last_rank: u32) {
        let needed = bounds.max.saturating_sub(candidates);
        for i in 0..needed {
            let rank = last_rank + i as u32 + 1;
            self.rows.push(StandingRow::Placeholder {
                label: format!("{rank}a"),
            });
            self.bounds_reached(bounds, candidates + i + 1);
        }
    }

    /// A wreath-count line goes after the first rank group (or placeholder)
    /// that reaches its position.
    fn bounds_reached(&mut self, bounds: KranzBounds, position: usize) {
        if !self.emitted.min_kranz && position >= bounds.min {
            self.push(Line::MinKranz(bounds.min));
            self.emitted.min_kranz = true;
        }
        if !self.emitted.max_kranz && position >= bounds.max {
            self.push(Line::MaxKranz(bounds.max));
            self.emitted.max_kranz = true;
        }
    }

    fn finish(mut self) -> Vec<StandingRow<'a>> {
        if let Some(value) = self.lines.ausstich.filter(|_| !self.emitted.ausstich) {
            self.push(Line::Ausstich(value));
        }
        if let Some(value) = self.lines.kranzausstich.filter(|_| !self.emitted.kranzausstich) {
            self.push(Line::Kranzausstich(value));
        }
        if let Some(value) = self.lines.kranz.filter(|_| !self.emitted.kranz) {
            self.push(Line::Kranz(value));
        }
        if self.lines.schlussgang && !self.emitted.schlussgang && !self.sorted.is_empty() {
            self.push(Line::Schlussgang);
        }
        if let Some(view) = self.lines.kranz_view {
            if !self.emitted.min_kranz {
                self.push(Line::MinKranz(view.bounds.min));
            }
            if !self.emitted.max_kranz {
                self.push(Line::MaxKranz(view.bounds.max));
            }
        }
        self.rows
    }

    fn push(&mut self, line: Line) {
        self.rows.push(StandingRow::Line(line));
    }
}
