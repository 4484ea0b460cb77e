// Timetable grid parsing: day headers, time-slot row-groups and column classification.
use std::collections::HashMap;
use timetab::model::{Cell, TimetableEntry, TimetableParser, parse_timetable};

fn row(cells: &[Option<&str>]) -> Vec<Cell> {
    cells.iter().map(|c| c.map(str::to_string)).collect()
}

fn blank(n: usize) -> Vec<Cell> {
    vec![None; n]
}

/// Two days: Monday with three weeks, Tuesday with a single week.
fn sample_grid() -> Vec<Vec<Cell>> {
    vec![
        row(&[Some("Lundi 15/9 29/9 13/10"), None, None, None, None, None, None]),
        blank(7),
        row(&[None, Some("Algorithms"), None, Some("Intro to"), None, Some("Réseaux"), None]),
        row(&[
            Some("matin"),
            Some("SMITH John"),
            None,
            Some("statistics"),
            None,
            Some("DURAND Paul"),
            None,
        ]),
        blank(7),
        row(&[Some("après-midi"), Some("Compilation"), None, None, None, None, None]),
        row(&[None, Some("LEROY Anne"), None, None, None, None, None]),
        row(&[None, Some("Examen"), None, None, None, None, None]),
        row(&[Some("Mardi 16/9"), None, None, None, None]),
        row(&[Some("Matin"), None, None, Some("Anglais"), None]),
        row(&[Some(""), None, None, Some("BROWN Kate"), None]),
    ]
}

fn entry(day: &str, slot: &str, week: &str, course: &str, prof: &str) -> TimetableEntry {
    TimetableEntry {
        day: day.to_string(),
        time_slot: slot.to_string(),
        week: week.to_string(),
        course: course.to_string(),
        professor: prof.to_string(),
    }
}

const MORNING: &str = "Morning (8:30-12:15)";
const AFTERNOON: &str = "Afternoon (13:30-17:15)";

#[test]
fn test_full_sample_grid() {
    let entries = parse_timetable(&sample_grid(), None);
    assert_eq!(
        entries,
        vec![
            entry("Lundi", MORNING, "15/9", "Algorithms", "SMITH John"),
            entry("Lundi", MORNING, "29/9", "Intro to statistics", ""),
            entry("Lundi", MORNING, "13/10", "Réseaux", "DURAND Paul"),
            entry("Lundi", AFTERNOON, "15/9", "Compilation [EXAMEN]", "LEROY Anne"),
            entry("Mardi", MORNING, "Week 2", "Anglais", "BROWN Kate"),
        ]
    );
}

#[test]
fn test_every_entry_is_complete() {
    for e in parse_timetable(&sample_grid(), None) {
        assert!(!e.course.is_empty());
        assert!(!e.day.is_empty());
        assert!(!e.time_slot.is_empty());
        assert!(!e.week.is_empty());
    }
}

#[test]
fn test_short_grids_are_empty() {
    assert!(parse_timetable(&[], None).is_empty());
    let one = vec![row(&[Some("Lundi 15/9"), Some("Algo")])];
    assert!(parse_timetable(&one, None).is_empty());
}

#[test]
fn test_time_slot_without_day_is_ignored() {
    let grid = vec![
        row(&[Some("matin"), Some("Algorithms")]),
        row(&[None, Some("SMITH John")]),
        row(&[Some("Lundi 15/9")]),
    ];
    assert!(parse_timetable(&grid, None).is_empty());
}

#[test]
fn test_week_list_resets_on_each_day_header() {
    let grid = vec![
        row(&[Some("Lundi 15/9 22/9")]),
        row(&[Some("matin"), None, None, Some("Maths")]),
        row(&[Some("Jeudi 18/9")]),
        row(&[Some("matin"), None, None, Some("Physique")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].week, "22/9");
    assert_eq!(entries[1].day, "Jeudi");
    assert_eq!(entries[1].week, "Week 2");
}

#[test]
fn test_day_header_without_dates_gives_synthetic_weeks() {
    let grid = vec![
        row(&[Some("Wednesday")]),
        row(&[Some("Morning"), Some("Databases"), None, Some("Networks")]),
    ];
    let entries = parse_timetable(&grid, None);
    let weeks: Vec<&str> = entries.iter().map(|e| e.week.as_str()).collect();
    assert_eq!(weeks, vec!["Week 1", "Week 2"]);
    assert!(entries.iter().all(|e| e.day == "Wednesday"));
}

#[test]
fn test_day_header_is_case_insensitive() {
    let grid = vec![
        row(&[Some("VENDREDI 19/9")]),
        row(&[Some("MATIN"), Some("Sport")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries, vec![entry("Vendredi", MORNING, "19/9", "Sport", "")]);
}

#[test]
fn test_ragged_rows_use_longest_row_of_group() {
    let grid = vec![
        row(&[Some("Lundi 15/9 22/9")]),
        row(&[Some("matin")]),
        row(&[None, None, None, Some("Maths"), None]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries, vec![entry("Lundi", MORNING, "22/9", "Maths", "")]);
}

#[test]
fn test_row_group_is_capped() {
    let mut grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some("matin"), Some("Histoire")]),
    ];
    for i in 1..=8 {
        grid.push(row(&[None, Some(format!("suite {}", i).as_str())]));
    }
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries.len(), 1);
    // Only the time-slot row and the next five rows are read.
    assert_eq!(entries[0].course, "Histoire suite 1");
}

#[test]
fn test_course_name_above_time_slot_row() {
    let grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some(""), Some("Gestion de projet")]),
        row(&[Some("après-midi"), Some("MOREAU Luc")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(
        entries,
        vec![entry("Lundi", AFTERNOON, "15/9", "Gestion de projet", "MOREAU Luc")]
    );
}

#[test]
fn test_lookback_skips_other_time_slot_rows() {
    // The morning row directly above the afternoon row is not borrowed.
    let grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some("matin"), Some("Algo")]),
        row(&[Some("après-midi"), Some("Réseaux")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(
        entries,
        vec![
            entry("Lundi", MORNING, "15/9", "Algo", ""),
            entry("Lundi", AFTERNOON, "15/9", "Réseaux", ""),
        ]
    );
}

#[test]
fn test_row_before_time_slot_is_shared_with_previous_group() {
    let grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some("matin"), Some("Algo")]),
        row(&[None, Some("SMITH John")]),
        row(&[Some("après-midi"), Some("Réseaux")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].professor, "SMITH John");
    // The afternoon group also starts with the professor line above it.
    assert_eq!(entries[1].course, "SMITH John");
    assert_eq!(entries[1].professor, "Réseaux");
}

#[test]
fn test_spacer_columns_map_to_the_same_week() {
    let grid = vec![
        row(&[Some("Lundi 15/9 22/9")]),
        row(&[Some("matin"), Some("Algo"), Some("note")]),
    ];
    let entries = parse_timetable(&grid, None);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].week, "15/9");
    assert_eq!(entries[1].week, "15/9");
    assert_eq!(entries[1].course, "note");
}

#[test]
fn test_custom_time_slot_labels() {
    let labels = HashMap::from([("matin".to_string(), "AM".to_string())]);
    let grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some("Matin"), Some("Algo")]),
        row(&[Some("Après-midi"), Some("Réseaux")]),
    ];
    let entries = parse_timetable(&grid, Some(&labels));
    assert_eq!(entries[0].time_slot, "AM");
    // Missing from the map: the raw cell text is kept.
    assert_eq!(entries[1].time_slot, "Après-midi");
}

#[test]
fn test_label_map_keys_ignore_case() {
    let labels = HashMap::from([
        ("Matin".to_string(), "AM".to_string()),
        (" APRÈS-MIDI ".to_string(), "PM".to_string()),
    ]);
    let grid = vec![
        row(&[Some("Lundi 15/9")]),
        row(&[Some("matin"), Some("Algo")]),
        row(&[Some("Après-midi"), Some("Réseaux")]),
    ];
    let slots: Vec<String> = parse_timetable(&grid, Some(&labels))
        .into_iter()
        .map(|e| e.time_slot)
        .collect();
    assert_eq!(slots, vec!["AM", "PM"]);
}

#[test]
fn test_default_parser_matches_free_function() {
    let grid = sample_grid();
    assert_eq!(TimetableParser::default().parse(&grid), parse_timetable(&grid, None));
}

#[test]
fn test_malformed_rows_do_not_panic() {
    let grid = vec![
        Vec::new(),
        row(&[None]),
        row(&[Some("Samedi")]),
        Vec::new(),
        row(&[Some("afternoon")]),
        Vec::new(),
        row(&[Some("   "), Some("  ")]),
    ];
    assert!(parse_timetable(&grid, None).is_empty());
}
