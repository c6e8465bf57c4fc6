use hub_api::{Direction, Record, SortState, Table, sort_rows};

fn record(id: usize, key: &str) -> Record {
    Record::from([("id".to_string(), id.to_string()), ("key".to_string(), key.to_string())])
}

/// Deterministic inputs with plenty of duplicate keys.
fn samples() -> Vec<Vec<Record>> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut out = Vec::new();
    for len in [0usize, 1, 2, 3, 7, 16, 40] {
        let rows = (0..len)
            .map(|i| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let key = ["", "a", "b", "B", "10", "5", "ä"][(seed >> 33) as usize % 7];
                record(i, key)
            })
            .collect();
        out.push(rows);
    }
    out
}

fn id(row: &Record) -> usize {
    row.value_or_empty("id").parse().unwrap()
}

fn ids(rows: &[Record]) -> Vec<usize> {
    rows.iter().map(id).collect()
}

#[test]
fn descending_is_reverse_of_ascending_for_distinct_keys() {
    let rows: Vec<Record> = ["delta", "alpha", "charlie", "bravo"]
        .iter()
        .enumerate()
        .map(|(i, k)| record(i, k))
        .collect();
    let asc = sort_rows("key", &rows, Direction::Ascending);
    let mut desc = sort_rows("key", &rows, Direction::Descending);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn duplicates_keep_input_order_in_both_directions() {
    for rows in samples() {
        for direction in [Direction::Ascending, Direction::Descending] {
            let sorted = sort_rows("key", &rows, direction);
            for pair in sorted.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a.value_or_empty("key") == b.value_or_empty("key") {
                    assert!(id(a) < id(b), "{direction:?}: {a:?} before {b:?}");
                }
            }
        }
    }
}

#[test]
fn output_is_ordered_and_a_permutation() {
    for rows in samples() {
        let asc = sort_rows("key", &rows, Direction::Ascending);
        assert!(asc.windows(2).all(|w| w[0].value_or_empty("key") <= w[1].value_or_empty("key")));
        let desc = sort_rows("key", &rows, Direction::Descending);
        assert!(desc.windows(2).all(|w| w[0].value_or_empty("key") >= w[1].value_or_empty("key")));

        let mut got = ids(&asc);
        got.sort_unstable();
        assert_eq!(got, (0..rows.len()).collect::<Vec<_>>());
    }
}

#[test]
fn empty_and_single_tables_are_unchanged() {
    let empty: Vec<Record> = Vec::new();
    assert!(sort_rows("key", &empty, Direction::Descending).is_empty());

    let one = vec![record(0, "z")];
    assert_eq!(sort_rows("key", &one, Direction::Ascending), one);
    assert_eq!(sort_rows("key", &one, Direction::Descending), one);
}

#[test]
fn input_is_not_mutated() {
    for rows in samples() {
        let before = rows.clone();
        let _ = sort_rows("key", &rows, Direction::Descending);
        assert_eq!(rows, before);
    }
}

#[test]
fn asc_desc_asc_round_trip() {
    for rows in samples() {
        let asc = sort_rows("key", &rows, Direction::Ascending);
        let desc = sort_rows("key", &asc, Direction::Descending);
        let again = sort_rows("key", &desc, Direction::Ascending);
        assert_eq!(again, asc);
    }
}

#[test]
fn header_clicks_drive_table_sort() {
    let header = vec!["id".to_string(), "key".to_string()];
    let table = Table::new(header, vec![record(0, "b"), record(1, "a"), record(2, "c")]).unwrap();

    let mut state = SortState::new();
    state.activate("key".to_string());
    assert_eq!(ids(table.sorted(&state).unwrap().rows()), vec![1, 0, 2]);

    state.activate("key".to_string());
    assert_eq!(ids(table.sorted(&state).unwrap().rows()), vec![2, 0, 1]);

    // "id" values are single digits here, so string order matches numeric order
    state.activate("id".to_string());
    assert_eq!(state.direction(), Direction::Ascending);
    assert_eq!(ids(table.sorted(&state).unwrap().rows()), vec![0, 1, 2]);
}

#[test]
fn numeric_looking_values_use_string_order() {
    let rows: Vec<Record> = ["10", "5", "20", "100"]
        .iter()
        .enumerate()
        .map(|(i, k)| record(i, k))
        .collect();
    let keys: Vec<String> = sort_rows("key", &rows, Direction::Ascending)
        .iter()
        .map(|r| r.value_or_empty("key").to_string())
        .collect();
    assert_eq!(keys, vec!["10", "100", "20", "5"]);
}
