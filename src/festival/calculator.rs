use models::{FestivalError, FestivalType};
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum OutcomeTier {
    #[strum(serialize = "Niederlage")]
    Loss,
    #[strum(serialize = "Gestellt")]
    Draw,
    #[strum(serialize = "Sieg")]
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub score: f64,
    pub tier: OutcomeTier,
}

/// Achievable per-round outcomes, ascending by score.
pub const OUTCOMES: [Outcome; 5] = [
    Outcome {
        score: 8.50,
        tier: OutcomeTier::Loss,
    },
    Outcome {
        score: 8.75,
        tier: OutcomeTier::Draw,
    },
    Outcome {
        score: 9.00,
        tier: OutcomeTier::Draw,
    },
    Outcome {
        score: 9.75,
        tier: OutcomeTier::Win,
    },
    Outcome {
        score: 10.00,
        tier: OutcomeTier::Win,
    },
];

const KRANZ_TARGETS_NORMAL: [f64; 3] = [56.50, 56.25, 56.00];
const KRANZ_TARGETS_ESAF: [f64; 3] = [75.00, 74.75, 74.50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundsRemaining {
    One,
    Two,
}

impl RoundsRemaining {
    pub const fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Rounds left including the current one, when the festival is close
    /// enough to its end for the calculator to apply.
    pub fn for_round(festival_type: FestivalType, current_round: u8) -> Option<Self> {
        match (festival_type.round_count() + 1).checked_sub(current_round)? {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }
}

impl TryFrom<u8> for RoundsRemaining {
    type Error = FestivalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(FestivalError::validation(format!(
                "calculator supports 1 or 2 remaining rounds, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Requirement {
    Single(Outcome),
    Pair(Outcome, Outcome),
    Unreachable,
}

impl Requirement {
    pub fn is_reachable(&self) -> bool {
        !matches!(self, Self::Unreachable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetRequirement {
    pub target: f64,
    pub requirement: Requirement,
}

pub fn kranz_targets(festival_type: FestivalType) -> &'static [f64] {
    match festival_type {
        FestivalType::Normal => &KRANZ_TARGETS_NORMAL,
        FestivalType::Esaf => &KRANZ_TARGETS_ESAF,
    }
}

/// First outcome (or outcome pair, outer round first) that lifts
/// `current_total` to `target`. The pair search returns the first hit in
/// enumeration order, not the pair with the smallest sum.
pub fn requirement_for(current_total: f64, rounds: RoundsRemaining, target: f64) -> Requirement {
    let needed = target - current_total;
    match rounds {
        RoundsRemaining::One => OUTCOMES
            .iter()
            .find(|o| o.score >= needed)
            .map_or(Requirement::Unreachable, |o| Requirement::Single(*o)),
        RoundsRemaining::Two => {
            for first in OUTCOMES {
                for second in OUTCOMES {
                    if first.score + second.score >= needed {
                        return Requirement::Pair(first, second);
                    }
                }
            }
            Requirement::Unreachable
        }
    }
}

pub fn requirements(
    current_total: f64,
    rounds: RoundsRemaining,
    targets: &[f64],
) -> Vec<TargetRequirement> {
    targets
        .iter()
        .map(|&target| TargetRequirement {
            target,
            requirement: requirement_for(current_total, rounds, target),
        })
        .collect()
}
