use models::{Competitor, FestivalType, LineSettings, RoundResult};
use schwingen_pro::festival::lines::{build_standing, ActiveLines, Line, StandingRow};

fn scored(id: &str, total: f64, festival_type: FestivalType, round: u8) -> Competitor {
    let mut c = Competitor::new(id, format!("Schwinger {id}"), "", total - 10.0, festival_type);
    c.rounds[usize::from(round) - 1] = Some(RoundResult::single(10.0));
    c
}

fn field(totals: &[f64], festival_type: FestivalType, round: u8) -> Vec<Competitor> {
    totals
        .iter()
        .enumerate()
        .map(|(i, total)| scored(&(i + 1).to_string(), *total, festival_type, round))
        .collect()
}

fn rows(competitors: &[Competitor], lines: &ActiveLines) -> Vec<String> {
    let sorted = competitors.iter().collect::<Vec<_>>();
    build_standing(&sorted, lines)
        .into_iter()
        .map(|row| match row {
            StandingRow::Competitor { competitor, placing } => {
                format!("{} #{}", placing.label, competitor.id)
            }
            StandingRow::Placeholder { label } => format!("{label} ..."),
            StandingRow::Line(line) => line.to_string(),
        })
        .collect()
}

fn lines_for(festival_type: FestivalType, round: u8, field_size: usize) -> ActiveLines {
    ActiveLines::for_round(
        festival_type,
        round,
        &LineSettings::for_festival(festival_type),
        field_size,
    )
}

#[test]
fn ausstich_goes_to_the_end_when_nobody_is_below() {
    let competitors = field(&[48.75, 48.75], FestivalType::Normal, 4);
    let out = rows(&competitors, &lines_for(FestivalType::Normal, 4, 2));

    assert_eq!(
        out,
        vec!["1a #1", "1b #2", "--- Ausstichlinie (35.75) ---"]
    );
}

#[test]
fn ausstich_sits_between_the_crossing_totals() {
    let competitors = field(&[37.0, 36.0, 35.5, 35.0], FestivalType::Normal, 4);
    let out = rows(&competitors, &lines_for(FestivalType::Normal, 4, 4));

    assert_eq!(
        out,
        vec![
            "1a #1",
            "2a #2",
            "--- Ausstichlinie (35.75) ---",
            "3a #3",
            "4a #4",
        ]
    );
}

#[test]
fn total_equal_to_the_cutoff_stays_above_the_line() {
    let competitors = field(&[36.0, 35.75, 35.5], FestivalType::Normal, 4);
    let out = rows(&competitors, &lines_for(FestivalType::Normal, 4, 3));

    assert_eq!(
        out,
        vec!["1a #1", "2a #2", "--- Ausstichlinie (35.75) ---", "3a #3"]
    );
}

#[test]
fn disabled_line_is_not_shown() {
    let competitors = field(&[37.0, 35.0], FestivalType::Normal, 4);
    let settings = LineSettings {
        ausstich: None,
        ..LineSettings::for_festival(FestivalType::Normal)
    };
    let lines = ActiveLines::for_round(FestivalType::Normal, 4, &settings, 2);

    assert_eq!(rows(&competitors, &lines), vec!["1a #1", "2a #2"]);
}

#[test]
fn no_lines_outside_their_rounds() {
    let competitors = field(&[37.0, 35.0], FestivalType::Normal, 3);
    assert_eq!(
        rows(&competitors, &lines_for(FestivalType::Normal, 3, 2)),
        vec!["1a #1", "2a #2"]
    );
}

#[test]
fn kranzausstich_only_in_esaf_round_six() {
    let competitors = field(&[55.0, 54.0], FestivalType::Esaf, 6);
    assert_eq!(
        rows(&competitors, &lines_for(FestivalType::Esaf, 6, 2)),
        vec!["1a #1", "--- Kranzausstichlinie (54.25) ---", "2a #2"]
    );
}

#[test]
fn schlussgang_after_a_shared_lead() {
    let competitors = field(&[48.0, 48.0, 47.0, 46.0], FestivalType::Normal, 5);
    assert_eq!(
        rows(&competitors, &lines_for(FestivalType::Normal, 5, 4)),
        vec![
            "1a #1",
            "1b #2",
            "--- Schlussgangkandidaten ---",
            "2a #3",
            "3a #4",
        ]
    );
}

#[test]
fn schlussgang_after_second_group_with_a_single_leader() {
    let competitors = field(&[48.0, 47.0, 47.0, 46.0], FestivalType::Normal, 5);
    assert_eq!(
        rows(&competitors, &lines_for(FestivalType::Normal, 5, 4)),
        vec![
            "1a #1",
            "2a #2",
            "2b #3",
            "--- Schlussgangkandidaten ---",
            "3a #4",
        ]
    );
}

#[test]
fn schlussgang_falls_back_to_the_end() {
    let competitors = field(&[48.0], FestivalType::Normal, 5);
    assert_eq!(
        rows(&competitors, &lines_for(FestivalType::Normal, 5, 1)),
        vec!["1a #1", "--- Schlussgangkandidaten ---"]
    );
    assert!(rows(&[], &lines_for(FestivalType::Normal, 5, 1)).is_empty());
}

#[test]
fn final_round_fills_placeholders_up_to_max() {
    // 20 wrestlers: min 3, max 4 wreaths.
    let competitors = field(&[57.0, 56.5, 56.0, 55.75, 55.0], FestivalType::Normal, 6);
    let out = rows(&competitors, &lines_for(FestivalType::Normal, 6, 20));

    assert_eq!(
        out,
        vec![
            "1a #1",
            "2a #2",
            "--- Kranzlinie (56.50) ---",
            "3a #3",
            "--- Min. Kränze (3) ---",
            "4a ...",
            "--- Max. Kränze (4) ---",
            "4a #4",
            "5a #5",
        ]
    );
}

#[test]
fn tie_straddling_the_minimum_closes_after_the_group() {
    let competitors = field(&[57.0, 56.5, 56.5, 56.5, 56.0], FestivalType::Normal, 6);
    let out = rows(&competitors, &lines_for(FestivalType::Normal, 6, 20));

    assert_eq!(
        out,
        vec![
            "1a #1",
            "2a #2",
            "2b #3",
            "2c #4",
            "--- Min. Kränze (3) ---",
            "--- Max. Kränze (4) ---",
            "--- Kranzlinie (56.50) ---",
            "3a #5",
        ]
    );
}

#[test]
fn empty_final_round_shows_only_placeholders_and_lines() {
    let out = rows(&[], &lines_for(FestivalType::Normal, 6, 20));

    assert_eq!(
        out,
        vec![
            "1a ...",
            "2a ...",
            "3a ...",
            "--- Min. Kränze (3) ---",
            "4a ...",
            "--- Max. Kränze (4) ---",
            "--- Kranzlinie (56.50) ---",
        ]
    );
}

#[test]
fn every_active_line_appears_exactly_once() {
    let competitors = field(
        &[58.0, 57.0, 57.0, 56.5, 56.25, 55.5, 54.0, 50.0],
        FestivalType::Normal,
        6,
    );
    let sorted = competitors.iter().collect::<Vec<_>>();
    let standing = build_standing(&sorted, &lines_for(FestivalType::Normal, 6, 40));
    let found = standing.iter().filter_map(StandingRow::line).collect::<Vec<_>>();

    for expected in [Line::Kranz(56.5), Line::MinKranz(6), Line::MaxKranz(8)] {
        assert_eq!(found.iter().filter(|l| **l == expected).count(), 1, "{expected}");
    }
    assert_eq!(found.len(), 3);
}
