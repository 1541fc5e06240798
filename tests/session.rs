use models::{BoutSide, FestivalError, FestivalType, RosterEntry, StandingEntry};
use schwingen_pro::festival::lines::LineKind;
use schwingen_pro::festival::Festival;

fn roster() -> Vec<RosterEntry> {
    [
        ("1", "Giger Samuel", "***"),
        ("2", "Orlik Armon", "*"),
        ("3", "Wicki Joel", "**"),
        ("4", "Schlegel Werner", "*"),
    ]
    .into_iter()
    .map(|(id, name, decoration)| RosterEntry {
        id: id.to_string(),
        name: name.to_string(),
        decoration: decoration.to_string(),
    })
    .collect()
}

fn standing(entries: &[(f64, &str)]) -> Vec<StandingEntry> {
    entries
        .iter()
        .map(|(total, name)| StandingEntry {
            total: *total,
            name: name.to_string(),
            decoration: String::new(),
        })
        .collect()
}

fn round_one() -> Festival {
    Festival::start(FestivalType::Normal, 1, &roster(), None).unwrap()
}

fn assert_totals_are_derived(festival: &Festival) {
    for c in festival.competitors().values() {
        let sum = c.rounds.iter().flatten().map(|r| r.high).sum::<f64>();
        assert_eq!(c.total(), c.base_score + sum, "{}", c.id);
    }
}

#[test]
fn start_round_one_seeds_everyone_at_zero() {
    let festival = round_one();

    assert_eq!(festival.competitors().len(), 4);
    assert_eq!(festival.current_round(), 1);
    assert_eq!(festival.pairings().len(), 4);
    for c in festival.competitors().values() {
        assert_eq!(c.total(), 0.0);
        assert_eq!(c.rounds.len(), 6);
        assert_eq!(c.initial_rank, 1);
    }
    assert_eq!(festival.settings().lines.kranz, Some(56.5));
}

#[test]
fn start_rejects_bad_input() {
    assert!(matches!(
        Festival::start(FestivalType::Normal, 7, &roster(), None),
        Err(FestivalError::Validation(_))
    ));
    assert!(matches!(
        Festival::start(FestivalType::Normal, 1, &[], None),
        Err(FestivalError::Validation(_))
    ));
    assert!(matches!(
        Festival::start(FestivalType::Normal, 2, &roster(), None),
        Err(FestivalError::Validation(_))
    ));

    let mut twice = roster();
    twice[3].name = "Giger Samuel".to_string();
    assert!(matches!(
        Festival::start(FestivalType::Normal, 1, &twice, None),
        Err(FestivalError::Duplicate(_))
    ));
}

#[test]
fn start_later_round_uses_standing_totals() {
    let standing = standing(&[(19.75, "Orlik Armon"), (18.5, "Giger Samuel")]);
    let festival = Festival::start(FestivalType::Esaf, 3, &roster(), Some(&standing)).unwrap();

    assert_eq!(festival.competitors().len(), 2);
    let orlik = festival.competitor("2").unwrap();
    assert_eq!(orlik.base_score, 19.75);
    assert_eq!(orlik.initial_rank_label, "1a");
    assert_eq!(festival.competitor("1").unwrap().initial_rank_label, "2a");
    assert_eq!(festival.settings().lines.kranz, Some(75.0));

    let unknown = standing_with_unknown();
    assert!(matches!(
        Festival::start(FestivalType::Normal, 2, &roster(), Some(&unknown)),
        Err(FestivalError::Lookup(_))
    ));
}

fn standing_with_unknown() -> Vec<StandingEntry> {
    standing(&[(10.0, "Giger Samuel"), (9.0, "Stucki Christian")])
}

#[test]
fn recording_a_bout_updates_totals_and_history() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();

    assert_eq!(festival.competitor("1").unwrap().total(), 9.75);
    assert_eq!(festival.competitor("2").unwrap().total(), 8.75);
    assert_eq!(festival.history_len(), 1);
    assert_eq!(festival.last_added(), ["1", "2"]);
    assert_totals_are_derived(&festival);

    let competed = festival.competed().iter().map(|c| c.id.clone()).collect::<Vec<_>>();
    assert_eq!(competed, vec!["1", "2"]);
    let awaiting = festival.awaiting().iter().map(|c| c.id.clone()).collect::<Vec<_>>();
    assert_eq!(awaiting, vec!["3", "4"]);
}

#[test]
fn split_result_counts_the_higher_value() {
    let mut festival = round_one();
    festival
        .record_bout(("1", "10.00 / 9.75"), ("2", "9.00 / 8.75"))
        .unwrap();

    let giger = festival.competitor("1").unwrap();
    assert_eq!(giger.total(), 10.0);
    assert_eq!(giger.round(1).unwrap().display, "10.00 / 9.75");
}

#[test]
fn occupied_slot_is_a_state_error_and_changes_nothing() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();
    let before = festival.clone();

    let err = festival.record_bout(("1", "10.00"), ("3", "8.50")).unwrap_err();
    assert!(matches!(err, FestivalError::State(_)));
    assert_eq!(festival, before);
}

#[test]
fn invalid_bouts_are_rejected_before_any_write() {
    let mut festival = round_one();
    let before = festival.clone();

    assert!(matches!(
        festival.record_bout(("1", "9.75"), ("99", "8.75")),
        Err(FestivalError::Lookup(_))
    ));
    assert!(matches!(
        festival.record_bout(("1", "9.75"), ("2", "a lot")),
        Err(FestivalError::Validation(_))
    ));
    assert!(matches!(
        festival.record_bout(("1", "9.75"), ("1", "8.75")),
        Err(FestivalError::Validation(_))
    ));
    assert_eq!(festival, before);
}

#[test]
fn undo_restores_the_previous_snapshot() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();
    let after_first = festival.clone();
    festival.record_bout(("3", "10.00"), ("4", "8.50")).unwrap();

    let report = festival.undo().unwrap();
    assert_eq!(festival.competitors(), after_first.competitors());
    assert_eq!(festival.history_len(), 1);
    assert_eq!(
        report.message().as_deref(),
        Some("Result for Wicki Joel ** & Schlegel Werner * reverted.")
    );

    festival.undo().unwrap();
    assert!(festival
        .competitors()
        .values()
        .all(|c| c.total() == 0.0));
}

#[test]
fn undo_with_empty_history_is_a_no_op() {
    let mut festival = round_one();
    let before = festival.clone();

    assert!(festival.undo().is_none());
    assert_eq!(festival, before);
}

#[test]
fn amend_and_clear_keep_totals_derived() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();

    let amended = festival.amend_result("1", "10").unwrap();
    assert_eq!(amended.total(), 10.0);
    assert_eq!(amended.round(1).unwrap().display, "10.00");

    let cleared = festival.clear_result("2").unwrap();
    assert_eq!(cleared.total(), 0.0);
    assert!(!cleared.has_result(1));
    assert_totals_are_derived(&festival);

    assert!(matches!(
        festival.clear_result("42"),
        Err(FestivalError::Lookup(_))
    ));
    // Only saved bouts are undoable.
    assert_eq!(festival.history_len(), 1);
}

#[test]
fn slot_save_requires_every_field() {
    let mut festival = round_one();
    festival
        .update_slot(0, BoutSide::First, Some("1".into()), Some("9.75".into()))
        .unwrap();
    festival
        .update_slot(0, BoutSide::Second, Some("2".into()), None)
        .unwrap();

    assert!(matches!(
        festival.save_slot(0),
        Err(FestivalError::Validation(_))
    ));
    assert_eq!(
        festival.pairings()[0].error.as_deref(),
        Some("invalid input: all fields are required")
    );

    festival
        .update_slot(0, BoutSide::Second, None, Some("8.75".into()))
        .unwrap();
    assert!(festival.pairings()[0].error.is_none());
    festival.save_slot(0).unwrap();

    assert_eq!(festival.pairings()[0], models::Pairing::empty(0));
    assert_eq!(festival.competitor("2").unwrap().total(), 8.75);
    assert_eq!(festival.history_len(), 1);
}

#[test]
fn failed_slot_save_keeps_its_entries() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();
    festival
        .update_slot(1, BoutSide::First, Some("1".into()), Some("9.00".into()))
        .unwrap();
    festival
        .update_slot(1, BoutSide::Second, Some("3".into()), Some("9.00".into()))
        .unwrap();

    assert!(matches!(festival.save_slot(1), Err(FestivalError::State(_))));
    let slot = &festival.pairings()[1];
    assert!(slot.error.is_some());
    assert_eq!(slot.first.competitor_id.as_deref(), Some("1"));
}

#[test]
fn slot_count_is_bounded() {
    let mut festival = round_one();
    festival.set_slot_count(7).unwrap();
    assert_eq!(festival.pairings().len(), 7);

    assert!(festival.set_slot_count(2).is_err());
    assert!(festival.set_slot_count(8).is_err());
    assert_eq!(festival.pairings().len(), 7);

    assert!(matches!(
        festival.update_slot(9, BoutSide::First, None, None),
        Err(FestivalError::Lookup(_))
    ));
}

#[test]
fn cutoffs_come_from_the_menu() {
    let mut festival = round_one();
    festival.set_cutoff(LineKind::Ausstich, Some(36.0)).unwrap();
    festival.set_cutoff(LineKind::Kranz, None).unwrap();
    assert_eq!(festival.settings().lines.ausstich, Some(36.0));
    assert_eq!(festival.settings().lines.kranz, None);

    assert!(festival.set_cutoff(LineKind::Ausstich, Some(30.0)).is_err());
    assert_eq!(festival.settings().lines.ausstich, Some(36.0));
}

#[test]
fn calculator_applies_to_the_last_two_rounds() {
    let standing = standing(&[(47.0, "Giger Samuel"), (38.5, "Orlik Armon")]);

    let round_six = Festival::start(FestivalType::Normal, 6, &roster(), Some(&standing)).unwrap();
    let needs = round_six.calculator_for("1").unwrap().unwrap();
    assert_eq!(needs.len(), 3);
    assert_eq!(needs[0].target, 56.5);
    assert!(needs[0].requirement.is_reachable());

    let round_four = Festival::start(FestivalType::Normal, 4, &roster(), Some(&standing)).unwrap();
    assert!(round_four.calculator_for("1").unwrap().is_none());
    assert!(matches!(
        round_four.calculator_for("77"),
        Err(FestivalError::Lookup(_))
    ));
}

#[test]
fn kranz_bounds_only_in_the_final_round() {
    let festival = round_one();
    assert!(festival.kranz_bounds().is_none());

    let standing = standing(&[(47.0, "Giger Samuel"), (38.5, "Orlik Armon")]);
    let last = Festival::start(FestivalType::Normal, 6, &roster(), Some(&standing)).unwrap();
    let bounds = last.kranz_bounds().unwrap();
    assert_eq!((bounds.min, bounds.max), (1, 1));
}

#[test]
fn amend_credits_the_same_value_as_a_bout() {
    let mut by_bout = round_one();
    by_bout.record_bout(("1", "9.125"), ("2", "8.75")).unwrap();

    let mut by_amend = round_one();
    by_amend.record_bout(("1", "8.50"), ("2", "8.75")).unwrap();
    by_amend.amend_result("1", "9.125").unwrap();

    let bout_total = by_bout.competitor("1").unwrap().total();
    assert_eq!(bout_total, 9.125);
    assert_eq!(by_amend.competitor("1").unwrap().total(), bout_total);
    assert_eq!(
        by_amend.competitor("1").unwrap().round(1),
        by_bout.competitor("1").unwrap().round(1)
    );
    assert_totals_are_derived(&by_amend);
}

fn edited(festival: &Festival, edit: impl FnOnce(&mut serde_json::Value)) -> Festival {
    let mut value = serde_json::to_value(festival).unwrap();
    edit(&mut value);
    serde_json::from_value(value).unwrap()
}

#[test]
fn consistency_covers_undo_snapshots() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();
    festival.check_consistency().unwrap();

    let short_snapshot = edited(&festival, |v| {
        v["history"][0]["3"]["rounds"].as_array_mut().unwrap().pop();
    });
    assert!(matches!(
        short_snapshot.check_consistency(),
        Err(FestivalError::Validation(_))
    ));
}

#[test]
fn consistency_rejects_entries_stored_under_another_id() {
    let mut festival = round_one();
    festival.record_bout(("1", "9.75"), ("2", "8.75")).unwrap();

    let live = edited(&festival, |v| v["competitors"]["1"]["id"] = "9".into());
    assert!(matches!(
        live.check_consistency(),
        Err(FestivalError::Validation(_))
    ));

    let snapshot = edited(&festival, |v| v["history"][0]["4"]["id"] = "3".into());
    assert!(matches!(
        snapshot.check_consistency(),
        Err(FestivalError::Validation(_))
    ));
}
