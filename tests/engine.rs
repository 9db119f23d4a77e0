// tests/engine.rs
//
// Filter-and-rank behaviour through the public API, on the reference
// three-player table and on generated tables.
//
use proptest::prelude::*;

use scout_board::config::ColumnNames;
use scout_board::{
    all_rows_for_group, apply_filter, distinct_values, rank_by, summarize_entity, CellValue,
    Dataset, FilterSpec, MissingColumnError, NumericRange, RangeFilter, Record,
};

fn reference() -> Dataset {
    Dataset::from_records(vec![
        Record::new()
            .with("Nombre", "A")
            .with("Equipo", "X")
            .with("Edad", 20i64)
            .with("PJ", 5i64)
            .with("Goles", 3i64),
        Record::new()
            .with("Nombre", "B")
            .with("Equipo", "X")
            .with("Edad", 22i64)
            .with("PJ", 10i64)
            .with("Goles", 7i64),
        Record::new()
            .with("Nombre", "C")
            .with("Equipo", "Y")
            .with("Edad", 19i64)
            .with("PJ", 8i64)
            .with("Goles", 7i64),
    ])
}

fn names(ds: &Dataset) -> Vec<String> {
    ds.records.iter().map(|r| r.get("Nombre").to_string()).collect()
}

fn metrics(list: &[&str]) -> Vec<String> {
    list.iter().map(|m| m.to_string()).collect()
}

#[test]
fn reference_team_filter() {
    let ds = reference();
    let spec = FilterSpec::builder(&ds, &ColumnNames::default())
        .unwrap()
        .team("X")
        .build();
    assert_eq!(names(&apply_filter(&ds, &spec).unwrap()), vec!["A", "B"]);
}

#[test]
fn reference_ranking_is_stable() {
    assert_eq!(names(&rank_by(&reference(), "Goles", 2).unwrap()), vec!["B", "C"]);
}

#[test]
fn reference_summary() {
    let summary = summarize_entity(&reference(), "Nombre", &"B".into(), &metrics(&["Goles", "PJ"]));
    assert_eq!(summary.get("Goles"), Some(7.0));
    assert_eq!(summary.get("PJ"), Some(10.0));
}

#[test]
fn age_range_outside_data_yields_empty_result() {
    let ds = reference();
    let spec = FilterSpec::builder(&ds, &ColumnNames::default())
        .unwrap()
        .age_range(35.0, 40.0)
        .build();
    assert_eq!(spec.age(), RangeFilter::Empty);
    assert!(apply_filter(&ds, &spec).unwrap().is_empty());
}

#[test]
fn missing_team_column_is_reported_before_filtering() {
    let mut ds = reference();
    ds.column_names.retain(|c| c != "Equipo");
    assert_eq!(
        apply_filter(&ds, &FilterSpec::default()).unwrap_err(),
        MissingColumnError::new("Equipo")
    );
}

#[test]
fn empty_dataset_is_valid_everywhere() {
    let empty = reference().head(0);
    assert!(apply_filter(&empty, &FilterSpec::default()).unwrap().is_empty());
    assert!(all_rows_for_group(&empty, "Equipo", &"X".into()).is_empty());
    assert!(rank_by(&empty, "Goles", 10).unwrap().is_empty());
    assert!(distinct_values(&empty, "Nombre").unwrap().is_empty());
    let summary = summarize_entity(&empty, "Nombre", &"A".into(), &metrics(&["Goles"]));
    assert_eq!(summary.values(), vec![0.0]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const TEAMS: [&str; 3] = ["X", "Y", "Z"];
const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((0..4usize, 0..3usize, 15..35i64, 0..30i64, 0..12i64), 0..40).prop_map(
        |rows| {
            let records = rows
                .into_iter()
                .map(|(n, t, age, pj, goals)| {
                    Record::new()
                        .with("Nombre", NAMES[n])
                        .with("Equipo", TEAMS[t])
                        .with("Edad", age)
                        .with("PJ", pj)
                        .with("Goles", goals)
                })
                .collect();
            Dataset::new(
                ["Nombre", "Equipo", "Edad", "PJ", "Goles"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                records,
            )
        },
    )
}

/// Raw sidebar request: team index, age bounds, matches-played bounds.
type Request = (Option<usize>, Option<(f64, f64)>, Option<(f64, f64)>);

fn arb_request() -> impl Strategy<Value = Request> {
    (
        prop::option::of(0..3usize),
        prop::option::of((10.0..40.0f64, 10.0..40.0f64)),
        prop::option::of((0.0..35.0f64, 0.0..35.0f64)),
    )
}

fn build_spec(ds: &Dataset, (team, age, pj): Request) -> FilterSpec {
    let mut builder = FilterSpec::builder(ds, &ColumnNames::default()).unwrap();
    if let Some(t) = team {
        builder = builder.team(TEAMS[t]);
    }
    if let Some((a, b)) = age {
        builder = builder.age_range(a, b);
    }
    if let Some((a, b)) = pj {
        builder = builder.matches_range(a, b);
    }
    builder.build()
}

/// Membership checked against the unclamped request.
fn satisfies(rec: &Record, (team, age, pj): Request) -> bool {
    let in_range = |bounds: Option<(f64, f64)>, col: &str| {
        bounds.map_or(true, |(a, b)| {
            let range = NumericRange::new(a, b);
            rec.get(col).as_f64().is_some_and(|v| range.contains(v))
        })
    };
    team.map_or(true, |t| rec.get("Equipo") == &CellValue::from(TEAMS[t]))
        && in_range(age, "Edad")
        && in_range(pj, "PJ")
}

proptest! {
    /// Every kept row satisfies the spec and every satisfying row is kept once, in order.
    #[test]
    fn prop_filter_is_sound_and_complete(ds in arb_dataset(), request in arb_request()) {
        let spec = build_spec(&ds, request);
        let filtered = apply_filter(&ds, &spec).unwrap();
        let expected: Vec<&Record> = ds.records.iter().filter(|r| satisfies(r, request)).collect();
        prop_assert_eq!(filtered.records.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_empty_spec_is_identity(ds in arb_dataset()) {
        prop_assert_eq!(apply_filter(&ds, &FilterSpec::default()).unwrap(), ds);
    }

    /// Re-ranking a ranked prefix reproduces a prefix of the original ranking.
    #[test]
    fn prop_rank_is_idempotent(ds in arb_dataset(), limit in 0..50usize, extra in 0..10usize) {
        let once = rank_by(&ds, "Goles", limit).unwrap();
        let twice = rank_by(&once, "Goles", limit + extra).unwrap();
        prop_assert_eq!(&twice, &once);
        let shorter = rank_by(&once, "Goles", limit / 2).unwrap();
        prop_assert_eq!(shorter.records.as_slice(), &once.records[..shorter.len()]);
    }

    #[test]
    fn prop_rank_is_descending(ds in arb_dataset(), limit in 0..50usize) {
        let ranked = rank_by(&ds, "Goles", limit).unwrap();
        prop_assert_eq!(ranked.len(), limit.min(ds.len()));
        let goals: Vec<f64> = ranked
            .records
            .iter()
            .filter_map(|r| r.get("Goles").as_f64())
            .collect();
        prop_assert!(goals.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Summing per team then across teams equals summing over the whole table.
    #[test]
    fn prop_summary_is_additive_over_groups(ds in arb_dataset(), n in 0..4usize) {
        let player = CellValue::from(NAMES[n]);
        let wanted = metrics(&["Goles", "PJ"]);
        let whole = summarize_entity(&ds, "Nombre", &player, &wanted);

        let mut by_team = vec![0.0; wanted.len()];
        for team in distinct_values(&ds, "Equipo").unwrap() {
            let roster = all_rows_for_group(&ds, "Equipo", &team);
            let part = summarize_entity(&roster, "Nombre", &player, &wanted);
            for (acc, v) in by_team.iter_mut().zip(part.values()) {
                *acc += v;
            }
        }
        prop_assert_eq!(whole.values(), by_team);
    }

    #[test]
    fn prop_distinct_values_are_unique(ds in arb_dataset()) {
        let teams = distinct_values(&ds, "Equipo").unwrap();
        let mut sorted = teams.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), teams.len());
    }
}
