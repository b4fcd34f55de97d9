use super::*;
use crate::page::template::TemplateCatalogue;

fn built(id: &str, fields: PageFields) -> PageGrid {
    let cat = TemplateCatalogue::builtin().unwrap();
    let mut grid = PageGrid::new();
    build_page(&mut grid, cat.get(id).unwrap(), &fields);
    grid
}

fn fields_at(date_time: &str) -> PageFields {
    PageFields {
        date_time: Some(date_time.to_string()),
        ..PageFields::default()
    }
}

#[test]
fn news_page_matches_reference_layout() {
    let g = built(
        "news",
        PageFields {
            subtitle: Some("late edition".to_string()),
            ..fields_at("Thu 7 Mar 09:05/03")
        },
    );
    // The clock overlaps the service name and is cut at column 40.
    assert_eq!(g.row_text(0), "P100           CEEFAX 100Thu 7 Mar 09:05");
    let header = g.get(CellPos::new(0, 3)).unwrap();
    assert_eq!((header.fg, header.bg), (Color::White, Color::Cyan));
    assert!(g.get(CellPos::new(1, 0)).unwrap().separator);
    assert_eq!(g.row_text(2), "           HEADLINE TEXT HERE           ");
    assert_eq!(g.row_text(3), g.row_text(2));
    assert!(g.get(CellPos::new(2, 12)).unwrap().double_top);
    assert!(g.get(CellPos::new(3, 12)).unwrap().double_bottom);
    assert_eq!(g.row_text(4).trim(), "LATE EDITION");
    assert_eq!(g.row_text(6).trim_end(), " The Government has today announced");
    assert_eq!(g.row_text(16).trim_end(), " a press conference in Downing St.");
    assert_eq!(g.row_text(24), "■Headlines■Sport    ■Weather  ■Index    ");
    assert_eq!(g.get(CellPos::new(24, 10)).unwrap().fg, Color::Green);
}

#[test]
fn sports_table_alternates_colours_with_yellow_scores() {
    let g = built("sports", fields_at("X"));
    assert_eq!(g.row_text(0), "P300           CEEFAX 300              X");
    assert_eq!(g.row_text(5), " Home               Score  Away         ");
    assert_eq!(g.row_text(6), " ────────────────────────────────────── ");
    assert_eq!(g.row_text(7), " Arsenal            2-1    Liverpool    ");
    assert_eq!(g.get(CellPos::new(7, 1)).unwrap().fg, Color::White);
    assert_eq!(g.get(CellPos::new(8, 1)).unwrap().fg, Color::Cyan);
    assert_eq!(g.get(CellPos::new(7, 21)).unwrap().fg, Color::Yellow);
    assert_eq!(g.row_text(12), " Southampton        1-3    Watford      ");
    assert_eq!(g.row_text(13).trim(), "");
}

#[test]
fn sports_table_stops_before_row_limit() {
    let cat = TemplateCatalogue::builtin().unwrap();
    let mut t = cat.get("sports").unwrap().clone();
    for s in &mut t.layout {
        if let Section::SportsTable { rows } = s {
            *rows = Some(4);
        }
    }
    let mut g = PageGrid::new();
    build_page(&mut g, &t, &fields_at("X"));
    // Two heading rows plus one result row: (row - start) < rows - 1.
    assert_eq!(g.row_text(7).trim_start().split(' ').next(), Some("Arsenal"));
    assert_eq!(g.row_text(8).trim(), "");
}

#[test]
fn tv_listings_use_yellow_times() {
    let g = built("tvlistings", fields_at("X"));
    assert_eq!(g.row_text(5).trim_end(), " 18.00 Six O'Clock News");
    assert_eq!(g.get(CellPos::new(5, 1)).unwrap().fg, Color::Yellow);
    assert_eq!(g.get(CellPos::new(5, 7)).unwrap().fg, Color::White);
    assert_eq!(g.get(CellPos::new(6, 7)).unwrap().fg, Color::Cyan);
    assert_eq!(g.row_text(14).trim_end(), " 23.20 Close");
}

#[test]
fn index_body_right_aligns_page_numbers() {
    let g = built("index", fields_at("X"));
    assert_eq!(g.row_text(6), " News/Flash ...............         101 ");
    assert_eq!(g.get(CellPos::new(6, 36)).unwrap().fg, Color::Yellow);
    assert_eq!(g.row_text(19), " Holidays .................         450 ");
}

#[test]
fn index_lines_without_number_are_plain() {
    assert_eq!(split_index_line("Weather 401"), Some(("Weather", "401")));
    assert_eq!(split_index_line("Page 1234"), Some(("Page 1", "234")));
    assert_eq!(split_index_line("123"), None);
    assert_eq!(split_index_line("Sport"), None);
    assert_eq!(split_index_line("Café"), None);
}

#[test]
fn fastext_can_be_disabled_and_custom_has_no_separator() {
    let g = built(
        "custom",
        PageFields {
            fastext_enabled: Some(false),
            ..fields_at("X")
        },
    );
    assert_eq!(g.row_text(24).trim(), "");
    assert!(!(0..ROWS).any(|r| g.get(CellPos::new(r, 0)).unwrap().separator));
}

#[test]
fn field_overrides_replace_template_defaults() {
    let g = built(
        "news",
        PageFields {
            page_number: Some("888".to_string()),
            service_name: Some("ORACLE".to_string()),
            title: Some("hello".to_string()),
            title_color: Some(Color::Red),
            body: Some("".to_string()),
            ..fields_at("X")
        },
    );
    assert!(g.row_text(0).starts_with("P888"));
    assert!(g.row_text(0).contains("ORACLE 888"));
    assert_eq!(g.row_text(2).trim(), "HELLO");
    assert_eq!(g.get(CellPos::new(2, 18)).unwrap().fg, Color::Red);
    // The separator follows its own colour over the title colour.
    assert_eq!(g.get(CellPos::new(1, 0)).unwrap().fg, Color::Cyan);
    assert_eq!(g.row_text(6).trim(), "");
}

#[test]
fn empty_page_number_falls_back_to_default() {
    let g = built(
        "weather",
        PageFields {
            page_number: Some(String::new()),
            ..fields_at("X")
        },
    );
    assert!(g.row_text(0).starts_with("P401"));
}
