//! End-to-end scenarios: selection → rule → code and matches.

use pc_core::{CodeFormat, Settings};
use pc_rules::{
    enumerate_matches, matches, normalize_selection, serialize, AutoCorrection, Ordinal,
    RawSelection, RawTimingParams, Rule, Selection, WeekLabel, PLACEHOLDER,
};
use pc_time::{scheduling_week_window, Date, Month, Parity, Weekday};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn settings() -> Settings {
    Settings::default()
}

// ─── A: calendar occurrence ──────────────────────────────────────────────────

#[test]
fn scenario_a_first_and_third_wednesday() {
    let rule = Selection::new()
        .with_location("JVJ")
        .with_weekdays([Weekday::Wednesday])
        .with_calendar_occurrence([Ordinal::First, Ordinal::Third])
        .with_shifts(["M"])
        .normalize(&settings())
        .unwrap()
        .rule;

    assert_eq!(
        serialize(&rule, CodeFormat::Labeled),
        "Location: JVJ | Day: 1Wed, 3Wed | Week: Any | Shift: M"
    );
    assert_eq!(serialize(&rule, CodeFormat::Compact), "JVJ | 1Wed, 3Wed | M");

    assert!(matches(&rule, date(2026, 1, 7)));
    assert!(!matches(&rule, date(2026, 1, 14)));
    assert!(matches(&rule, date(2026, 1, 21)));

    let january: Vec<_> = enumerate_matches(&rule, date(2026, 1, 1), date(2026, 1, 31)).collect();
    assert_eq!(january, vec![date(2026, 1, 7), date(2026, 1, 21)]);
}

#[test]
fn last_ordinal_covers_fourth_or_fifth() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Friday])
        .with_calendar_occurrence([Ordinal::Last])
        .normalize(&settings())
        .unwrap()
        .rule;
    assert_eq!(
        serialize(&rule, CodeFormat::Labeled),
        "Location: Any | Day: LastFri | Week: Any | Shift: Any"
    );
    // January 2026 Fridays: 2, 9, 16, 23, 30.
    assert!(matches(&rule, date(2026, 1, 30)));
    assert!(!matches(&rule, date(2026, 1, 23)));
    // February 2026 Fridays: 6, 13, 20, 27.
    assert!(matches(&rule, date(2026, 2, 27)));
}

#[test]
fn occurrence_grid_is_ordinal_major() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Friday, Weekday::Monday])
        .with_calendar_occurrence([Ordinal::Last, Ordinal::Second])
        .normalize(&settings())
        .unwrap()
        .rule;
    assert_eq!(
        serialize(&rule, CodeFormat::Compact),
        "2Mon, 2Fri, LastMon, LastFri"
    );
}

// ─── B: scheduling week ──────────────────────────────────────────────────────

#[test]
fn scenario_b_first_scheduling_week() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Monday])
        .with_scheduling_weeks([WeekLabel::W1])
        .normalize(&settings())
        .unwrap()
        .rule;

    let w1 = scheduling_week_window(2026, Month::January, 0).unwrap();
    assert_eq!((w1.start, w1.end), (date(2026, 1, 5), date(2026, 1, 11)));

    assert!(matches(&rule, date(2026, 1, 5)));
    assert!(!matches(&rule, date(2026, 1, 12)));
    // Dec 29 2025 is December's W5, not January's W1.
    assert!(!matches(&rule, date(2025, 12, 29)));

    assert_eq!(
        serialize(&rule, CodeFormat::Labeled),
        "Location: Any | Day: Mon | Week: W1 | Shift: Any"
    );
}

#[test]
fn any_week_still_excludes_pre_w1_days() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Thursday])
        .with_scheduling_weeks([WeekLabel::Any])
        .normalize(&settings())
        .unwrap()
        .rule;
    // Jan 1 2026 is a Thursday before the first Monday (Jan 5).
    assert!(!matches(&rule, date(2026, 1, 1)));
    assert!(matches(&rule, date(2026, 1, 8)));
}

#[test]
fn fifth_week_only_in_long_months() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Monday])
        .with_scheduling_weeks([WeekLabel::W5])
        .normalize(&settings())
        .unwrap()
        .rule;
    let hits: Vec<_> = enumerate_matches(&rule, date(2026, 1, 1), date(2026, 6, 30)).collect();
    // In the first half of 2026 only March (Mar 2 to Apr 6) and June
    // (Jun 1 to Jul 6) have a fifth scheduling week.
    assert_eq!(hits, vec![date(2026, 3, 30), date(2026, 6, 29)]);
}

// ─── C: alternating parity ───────────────────────────────────────────────────

#[test]
fn scenario_c_odd_weeks_alternate() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Friday])
        .with_parity(Parity::Odd)
        .normalize(&settings())
        .unwrap()
        .rule;
    assert_eq!(
        serialize(&rule, CodeFormat::Labeled),
        "Location: Any | Day: Fri | Week: Alt1 | Shift: Any"
    );

    // Jan 2 2026 is in ISO week 1, Jan 9 in week 2.
    assert!(matches(&rule, date(2026, 1, 2)));
    assert!(!matches(&rule, date(2026, 1, 9)));

    let fridays: Vec<bool> = (0..8)
        .map(|k| matches(&rule, date(2026, 1, 2).add_days(7 * k).unwrap()))
        .collect();
    assert_eq!(
        fridays,
        vec![true, false, true, false, true, false, true, false]
    );
}

#[test]
fn even_weeks_serialize_as_alt2() {
    let rule = Selection::new()
        .with_weekdays([Weekday::Saturday])
        .with_parity(Parity::Even)
        .with_shifts(["A"])
        .normalize(&settings())
        .unwrap()
        .rule;
    assert_eq!(serialize(&rule, CodeFormat::Compact), "Sat | Alt2 | A");
}

// ─── D: Sig auto-correction ──────────────────────────────────────────────────

#[test]
fn scenario_d_sig_shift_forces_sig_location() {
    let raw = RawSelection {
        locations: vec!["JVJ".into()],
        weekdays: vec!["Tue".into()],
        shifts: vec!["Sig1".into()],
        ..RawSelection::default()
    };
    let normalized = normalize_selection(&settings(), &raw).unwrap();
    assert_eq!(normalized.rule.locations(), ["Sig"]);
    assert_eq!(
        normalized.corrections,
        vec![AutoCorrection::LocationForcedToSig {
            replaced: vec!["JVJ".into()]
        }]
    );
    assert_eq!(
        normalized.rule.to_code(CodeFormat::Labeled),
        "Location: Sig | Day: Tue | Week: Any | Shift: Sig1"
    );
}

// ─── E: nothing selected ─────────────────────────────────────────────────────

#[test]
fn scenario_e_placeholder_in_both_formats() {
    let rule = normalize_selection(&settings(), &RawSelection::default())
        .unwrap()
        .rule;
    assert!(rule.is_empty());
    assert_eq!(serialize(&rule, CodeFormat::Labeled), PLACEHOLDER);
    assert_eq!(serialize(&rule, CodeFormat::Compact), PLACEHOLDER);
    assert_eq!(Rule::default().to_string(), PLACEHOLDER);
}

#[test]
fn raw_selection_from_ui_strings() {
    let raw = RawSelection {
        locations: vec!["KICC".into()],
        weekdays: vec!["Sat".into(), "Sun".into()],
        timing_tag: Some("Scheduling Week".into()),
        timing: RawTimingParams {
            weeks: vec!["W2".into(), "W4".into()],
            ..RawTimingParams::default()
        },
        shifts: vec!["EM".into(), "E".into()],
    };
    let rule = normalize_selection(&settings(), &raw).unwrap().rule;
    assert_eq!(
        serialize(&rule, CodeFormat::Labeled),
        "Location: KICC | Day: Sat, Sun | Week: W2, W4 | Shift: EM, E"
    );
}
