use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use models::{BoutSide, FestivalType};

use crate::festival::lines::LineKind;

#[derive(Debug, Parser)]
#[command(name = "schwingen-pro")]
#[command(about = "Live scoring and ranking for Swiss wrestling festivals")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for session data (default: $SCHWINGEN_DATA_DIR or ./data)"
    )]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Start a festival session from a roster (and standing after round 1)")]
    Start {
        #[arg(
            long = "type",
            default_value = "normal",
            value_name = "normal|esaf",
            help = "Festival type: normal (6 rounds) or esaf (8 rounds)"
        )]
        festival_type: FestivalType,

        #[arg(long, default_value_t = 1, value_name = "N", help = "Current round (1-based)")]
        round: u8,

        #[arg(
            long,
            value_name = "FILE",
            help = "Roster text, one \"<number>, <name> [***]\" per line"
        )]
        roster: PathBuf,

        #[arg(
            long,
            value_name = "FILE",
            help = "Standing after the previous round, one \"<total>, <name> [***]\" per line"
        )]
        standing: Option<PathBuf>,
    },
    #[command(about = "Show and edit the bout slots of the current round")]
    Slots {
        #[command(subcommand)]
        command: Option<SlotCommand>,
    },
    #[command(about = "Save the result of one bout")]
    Bout {
        #[arg(long, value_name = "NUMBER", help = "Start number of the first wrestler")]
        first: String,
        #[arg(long, value_name = "RESULT", help = "Result of the first wrestler, e.g. 9.75 or \"10.00 / 9.75\"")]
        first_result: String,
        #[arg(long, value_name = "NUMBER", help = "Start number of the second wrestler")]
        second: String,
        #[arg(long, value_name = "RESULT", help = "Result of the second wrestler")]
        second_result: String,
    },
    #[command(about = "Replace the current-round result of one wrestler")]
    Amend {
        #[arg(value_name = "NUMBER")]
        id: String,
        #[arg(value_name = "RESULT")]
        result: String,
    },
    #[command(about = "Delete the current-round result of one wrestler")]
    Clear {
        #[arg(value_name = "NUMBER")]
        id: String,
    },
    #[command(about = "Undo the last saved bout")]
    Undo,
    #[command(about = "Print the live standing of the current round")]
    Standing,
    #[command(about = "Print wrestlers still waiting for their current-round bout")]
    Overview,
    #[command(about = "Set a line cutoff (a value from the line's menu, or none)")]
    Lines {
        #[arg(value_name = "ausstich|kranzausstich|kranz")]
        kind: LineKind,
        #[arg(value_name = "VALUE|none")]
        value: String,
    },
    #[command(about = "Show or hide the Kranz calculator in the bout slots")]
    Calculator {
        #[arg(action = ArgAction::Set, value_name = "true|false")]
        enabled: bool,
    },
    #[command(about = "Results needed to reach the Kranz targets")]
    Calc {
        #[arg(long, value_name = "NUMBER", help = "Wrestler of the current session")]
        id: Option<String>,
        #[arg(long, value_name = "POINTS", conflicts_with = "id", requires = "rounds")]
        total: Option<f64>,
        #[arg(long, value_name = "1|2", requires = "total")]
        rounds: Option<u8>,
        #[arg(long = "target", value_name = "POINTS", help = "Target total (repeatable)")]
        targets: Vec<f64>,
    },
    #[command(about = "Save, load and list named festivals")]
    Festival {
        #[command(subcommand)]
        command: FestivalCommand,
    },
    #[command(about = "Discard the current session")]
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SlotCommand {
    #[command(about = "Set the number of simultaneous bouts (3..7)")]
    Count {
        #[arg(value_name = "N")]
        count: usize,
    },
    #[command(about = "Fill one side of a bout slot")]
    Set {
        #[arg(value_name = "SLOT", help = "Slot number, starting at 1")]
        slot: usize,
        #[arg(value_name = "first|second")]
        side: BoutSide,
        #[arg(long, value_name = "NUMBER")]
        id: Option<String>,
        #[arg(long, value_name = "RESULT")]
        result: Option<String>,
    },
    #[command(about = "Save a filled bout slot")]
    Save {
        #[arg(value_name = "SLOT")]
        slot: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum FestivalCommand {
    #[command(about = "Save the current session under a name")]
    Save {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Make a saved festival the current session")]
    Load {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "List saved festivals")]
    List,
}
