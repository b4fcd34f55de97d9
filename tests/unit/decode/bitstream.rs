use super::*;

#[test]
fn symbol_values_follow_alphabet_order() {
    for (i, &b) in ALPHABET.iter().enumerate() {
        assert_eq!(usize::from(symbol_value(char::from(b))), i);
        assert!(is_symbol(char::from(b)));
    }
    assert_eq!(symbol_value('*'), 0);
    assert_eq!(symbol_value('é'), 0);
    assert!(!is_symbol('='));
}

#[test]
fn codes_are_sliced_msb_first() {
    // 'g' = 32 = 100000, then six zero bits: first code 1000000 = 64.
    let grid = decode_codes("gA");
    assert_eq!(grid.get(CellPos::new(0, 0)), 64);
    assert_eq!(grid.get(CellPos::new(0, 1)), 0);

    // '_' x 7 = 42 one bits = six full codes of 127.
    let grid = decode_codes("_______");
    for c in 0..6 {
        assert_eq!(grid.get(CellPos::new(0, c)), 127);
    }
    assert_eq!(grid.get(CellPos::new(0, 6)), 0);
}

#[test]
fn unknown_symbols_decode_as_zero() {
    assert_eq!(decode_codes("__*_"), decode_codes("__A_"));
}

#[test]
fn any_length_yields_full_shape() {
    for len in [0usize, 1, 7, 100, 1167, 3000] {
        let payload: String = (0..len)
            .map(|i| char::from(ALPHABET[(i * 7 + 3) % 64]))
            .collect();
        let grid = decode_codes(&payload);
        assert_eq!(grid.rows().count(), ROWS);
        assert!(grid.rows().all(|r| r.len() == COLS));
    }
}

#[test]
fn encode_inverts_decode_for_full_pages() {
    let mut grid = CodeGrid::new();
    for r in 0..ROWS {
        for c in 0..COLS {
            grid.set(CellPos::new(r, c), ((r * 31 + c * 17) % 128) as u8);
        }
    }
    let payload = encode_codes(&grid);
    assert_eq!(payload.len(), FULL_PAGE_SYMBOLS);
    assert_eq!(FULL_PAGE_SYMBOLS, 1167);
    assert_eq!(decode_codes(&payload), grid);
}

#[test]
fn serde_shape_is_rows_of_columns() {
    let mut grid = CodeGrid::new();
    grid.set(CellPos::new(2, 3), 19);
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json.as_array().unwrap().len(), ROWS);
    assert_eq!(json[2][3], 19);
    let back: CodeGrid = serde_json::from_value(json).unwrap();
    assert_eq!(back, grid);
    assert!(serde_json::from_str::<CodeGrid>("[[200]]").is_err());
}

#[test]
fn row_access_is_bounded() {
    let mut grid = CodeGrid::new();
    grid.set(CellPos::new(24, 39), 65);
    assert_eq!(grid.row(24).map(|r| r[39]), Some(65));
    assert_eq!(grid.row(25), None);
    assert_eq!(grid.row(usize::MAX), None);
}
