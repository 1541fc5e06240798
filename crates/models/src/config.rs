use serde::{Deserialize, Serialize};

use crate::FestivalType;

/// Operator-selected cutoff per line. `None` hides the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSettings {
    pub ausstich: Option<f64>,
    pub kranzausstich: Option<f64>,
    pub kranz: Option<f64>,
}

impl LineSettings {
    pub fn for_festival(festival_type: FestivalType) -> Self {
        Self {
            ausstich: Some(35.75),
            kranzausstich: Some(54.25),
            kranz: Some(match festival_type {
                FestivalType::Normal => 56.50,
                FestivalType::Esaf => 75.00,
            }),
        }
    }
}

impl Default for LineSettings {
    fn default() -> Self {
        Self::for_festival(FestivalType::Normal)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub lines: LineSettings,
    #[serde(default)]
    pub show_calculator: bool,
}
