use std::path::Path;

use clap::Parser;
use eyre::WrapErr;

use models::FestivalType;
use schwingen_parsers::{parse_roster_text, parse_standing_text};
use schwingen_pro::cli::{Command, FestivalCommand, RootArgs, SlotCommand};
use schwingen_pro::config::AppConfig;
use schwingen_pro::festival::calculator::{self, RoundsRemaining};
use schwingen_pro::festival::Festival;
use schwingen_pro::render;
use schwingen_pro::store::{JsonFileStore, SessionRepository};

fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;
    config.ensure_dirs().wrap_err("create data directories")?;

    let store = JsonFileStore::new(&config.data_dir);

    match args.command {
        Command::Start {
            festival_type,
            round,
            roster,
            standing,
        } => {
            if store.load_current()?.is_some() {
                return Err(eyre::eyre!(
                    "a festival is already running; run `reset` or `festival save` first"
                ));
            }
            let roster = parse_roster_text(&read_text(&roster)?).wrap_err("parse roster")?;
            let standing = match standing {
                Some(path) => {
                    Some(parse_standing_text(&read_text(&path)?).wrap_err("parse standing")?)
                }
                None => None,
            };
            let festival = Festival::start(festival_type, round, &roster, standing.as_deref())
                .wrap_err("start festival")?;
            persist(&store, &festival);
            print!("{}", render::format_overview(&festival));
        }
        Command::Slots { command } => {
            let mut festival = require_current(&store)?;
            let outcome = match command {
                None => Ok(()),
                Some(SlotCommand::Count { count }) => festival.set_slot_count(count),
                Some(SlotCommand::Set {
                    slot,
                    side,
                    id,
                    result,
                }) => festival.update_slot(slot_index(slot)?, side, id, result),
                Some(SlotCommand::Save { slot }) => festival.save_slot(slot_index(slot)?),
            };
            persist(&store, &festival);
            print!("{}", render::format_slots(&festival));
            outcome.wrap_err("update bout slots")?;
        }
        Command::Bout {
            first,
            first_result,
            second,
            second_result,
        } => {
            let mut festival = require_current(&store)?;
            festival
                .record_bout(
                    (first.as_str(), first_result.as_str()),
                    (second.as_str(), second_result.as_str()),
                )
                .wrap_err("save bout")?;
            persist(&store, &festival);
            print!("{}", render::format_standing(&festival));
        }
        Command::Amend { id, result } => {
            let mut festival = require_current(&store)?;
            festival.amend_result(&id, &result).wrap_err("amend result")?;
            persist(&store, &festival);
            print!("{}", render::format_standing(&festival));
        }
        Command::Clear { id } => {
            let mut festival = require_current(&store)?;
            festival.clear_result(&id).wrap_err("clear result")?;
            persist(&store, &festival);
            print!("{}", render::format_standing(&festival));
        }
        Command::Undo => {
            let mut festival = require_current(&store)?;
            match festival.undo() {
                Some(report) => {
                    persist(&store, &festival);
                    if let Some(message) = report.message() {
                        println!("{message}");
                    }
                    print!("{}", render::format_standing(&festival));
                }
                None => println!("nothing to undo"),
            }
        }
        Command::Standing => {
            let festival = require_current(&store)?;
            print!("{}", render::format_standing(&festival));
        }
        Command::Overview => {
            let festival = require_current(&store)?;
            print!("{}", render::format_overview(&festival));
        }
        Command::Lines { kind, value } => {
            let mut festival = require_current(&store)?;
            let value = parse_cutoff(&value)?;
            festival.set_cutoff(kind, value).wrap_err("set line")?;
            persist(&store, &festival);
            print!("{}", render::format_standing(&festival));
        }
        Command::Calculator { enabled } => {
            let mut festival = require_current(&store)?;
            festival.set_show_calculator(enabled);
            persist(&store, &festival);
            print!("{}", render::format_slots(&festival));
        }
        Command::Calc {
            id,
            total,
            rounds,
            targets,
        } => {
            let current = store.load_current()?;
            let requirements = match (id, total, rounds) {
                (Some(id), _, _) => {
                    let festival = current
                        .ok_or_else(|| eyre::eyre!("no festival running; start one first"))?;
                    match festival.calculator_for(&id).wrap_err("run calculator")? {
                        Some(requirements) => requirements,
                        None => {
                            println!("the calculator applies only to the last two rounds");
                            return Ok(());
                        }
                    }
                }
                (None, Some(total), Some(rounds)) => {
                    let rounds = RoundsRemaining::try_from(rounds)?;
                    let targets = if targets.is_empty() {
                        let festival_type = current
                            .as_ref()
                            .map_or(FestivalType::Normal, Festival::festival_type);
                        calculator::kranz_targets(festival_type).to_vec()
                    } else {
                        targets
                    };
                    calculator::requirements(total, rounds, &targets)
                }
                _ => return Err(eyre::eyre!("pass either --id or --total with --rounds")),
            };
            print!("{}", render::format_requirements(&requirements));
        }
        Command::Festival { command } => match command {
            FestivalCommand::Save { name } => {
                let festival = require_current(&store)?;
                store
                    .save_named(&name, &festival)
                    .wrap_err("save festival")?;
                println!("saved={name}");
            }
            FestivalCommand::Load { name } => {
                let festival = store
                    .load_named(&name)?
                    .ok_or_else(|| eyre::eyre!("no saved festival named '{name}'"))?;
                store
                    .save_current(&festival)
                    .wrap_err("activate festival")?;
                print!("{}", render::format_standing(&festival));
            }
            FestivalCommand::List => {
                let festivals = store.list_named()?;
                if festivals.is_empty() {
                    println!("no saved festivals");
                }
                for info in festivals {
                    println!("{}  (saved {})", info.name, info.saved_at.format("%Y-%m-%d %H:%M"));
                }
            }
        },
        Command::Reset => {
            store.clear_current().wrap_err("reset session")?;
            println!("reset=ok");
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn require_current(store: &impl SessionRepository) -> eyre::Result<Festival> {
    store
        .load_current()
        .wrap_err("load current session")?
        .ok_or_else(|| eyre::eyre!("no festival running; start one with `start`"))
}

/// State is already updated in memory; a failed write is reported, not fatal.
fn persist(store: &impl SessionRepository, festival: &Festival) {
    if let Err(e) = store.save_current(festival) {
        tracing::warn!("Failed to persist session: {:#}", e);
    }
}

fn read_text(path: &Path) -> eyre::Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("read {}", path.display()))
}

fn slot_index(slot: usize) -> eyre::Result<usize> {
    slot.checked_sub(1)
        .ok_or_else(|| eyre::eyre!("slot numbers start at 1"))
}

fn parse_cutoff(value: &str) -> eyre::Result<Option<f64>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") || value == "0" {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .wrap_err_with(|| format!("invalid line value: {value}"))
}
