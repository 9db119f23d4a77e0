// tests/session_flow.rs
//
// Load a table from disk, render every page, export what the pages offer.
//
use std::fs;
use std::path::PathBuf;

use scout_board::config::DashboardConfig;
use scout_board::data::loader::load_file;
use scout_board::data::source::DatasetCache;
use scout_board::export::{export_dataset, export_file_name, ExportFormat};
use scout_board::state::{Page, PageView, Session};
use scout_board::CellValue;

fn tmp(path: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(path);
    p
}

const PLAYERS: &str = "\
Nombre,Equipo,Edad,PJ,Titular,Goles,Temporada,Liga
Ana Ruiz,CD Leganés,21,14,12,6,2024-2025,Primera
Bea Díaz,CD Leganés,25,3,0,0,2024-2025,Primera
Cris Romero,Getafe CF,19,20,18,11,2024-2025,Segunda
Ana Ruiz,AD Alcorcón,20,9,5,2,2023-2024,Segunda
Dora Gil,CD Leganés,,7,4,1,2024-2025,Primera
";

const BADGES: &str = "\
Equipo,url_escudo
CD Leganés,https://example.org/escudos/leganes.png
";

fn open_session(tag: &str) -> Session {
    let data = tmp(&format!("scout_board_flow_{tag}.csv"));
    let badges = tmp(&format!("scout_board_flow_{tag}_escudos.csv"));
    fs::write(&data, PLAYERS).unwrap();
    fs::write(&badges, BADGES).unwrap();
    let config = DashboardConfig {
        data_paths: vec![tmp("scout_board_flow_missing.parquet"), data],
        badge_paths: vec![badges],
        ..DashboardConfig::default()
    };
    Session::open(config, &DatasetCache::new()).unwrap()
}

#[test]
fn overview_ranking_carries_badges_and_exports() {
    let mut session = open_session("overview");
    let Some(PageView::Overview(page)) = session.refresh() else {
        panic!("overview should render");
    };

    assert_eq!(page.ranking.headers[0], "Escudo");
    assert_eq!(page.ranking.headers[1], "Nombre");
    assert_eq!(page.ranking.rows[0][1], "Cris Romero");
    assert_eq!(page.ranking.rows[1][0], "https://example.org/escudos/leganes.png");
    assert_eq!(page.controls.teams.len(), 3);

    let out = tmp(&export_file_name(&page.export_name, ExportFormat::Csv));
    export_dataset(&page.export, &out, ExportFormat::Csv).unwrap();
    let reloaded = load_file(&out).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded.column_names, page.export.column_names);
}

#[test]
fn search_and_comparison_share_the_loaded_table() {
    let mut session = open_session("pages");

    session.select_page(Page::Search);
    session.search.player = Some("Ana Ruiz".into());
    let Some(PageView::Search(search)) = session.refresh() else {
        panic!("search should render");
    };
    let ana = search.selected.unwrap();
    assert_eq!(ana.detail.rows.len(), 2);
    assert_eq!(ana.detail.summary.get("Goles"), Some(8.0));
    assert_eq!(ana.export_name, "datos_Ana Ruiz");

    session.select_page(Page::Comparison);
    session.comparison.first = Some("Ana Ruiz".into());
    session.comparison.second = Some("Cris Romero".into());
    let Some(PageView::Comparison(cmp)) = session.refresh() else {
        panic!("comparison should render");
    };
    let cmp = cmp.comparison.unwrap();
    assert_eq!(cmp.series[0].values, vec![8.0, 17.0, 23.0]);
    assert_eq!(cmp.series[1].values, vec![11.0, 18.0, 20.0]);

    let xlsx = tmp(&export_file_name(&cmp.export_name, ExportFormat::Xlsx));
    assert!(xlsx.ends_with("comparativa_Ana_Ruiz_vs_Cris_Romero.xlsx"));
    export_dataset(&cmp.export, &xlsx, ExportFormat::Xlsx).unwrap();
    assert!(fs::metadata(&xlsx).unwrap().len() > 0);
}

#[test]
fn only_pages_with_an_age_slider_drop_players_without_age() {
    let mut session = open_session("ageless");
    let team: CellValue = "CD Leganés".into();

    session.overview.team = Some(team.clone());
    let Some(PageView::Overview(overview)) = session.refresh() else {
        panic!("overview should render");
    };
    assert_eq!(overview.ranking.len(), 2);
    // The roster ignores every filter, so Dora is still there.
    assert_eq!(overview.roster.unwrap().len(), 3);

    session.select_page(Page::Search);
    session.search.team = Some(team.clone());
    let Some(PageView::Search(search)) = session.refresh() else {
        panic!("search should render");
    };
    assert_eq!(search.players.len(), 2);

    session.select_page(Page::Comparison);
    session.comparison.team = Some(team);
    let Some(PageView::Comparison(cmp)) = session.refresh() else {
        panic!("comparison should render");
    };
    let players: Vec<String> = cmp.players.iter().map(|p| p.to_string()).collect();
    assert_eq!(players, vec!["Ana Ruiz", "Bea Díaz", "Dora Gil"]);
}

#[test]
fn session_opens_a_workbook() {
    let csv_path = tmp("scout_board_flow_workbook_src.csv");
    fs::write(&csv_path, PLAYERS).unwrap();
    let xlsx_path = tmp("scout_board_flow_workbook.xlsx");
    export_dataset(&load_file(&csv_path).unwrap(), &xlsx_path, ExportFormat::Xlsx).unwrap();

    let config = DashboardConfig {
        data_paths: vec![xlsx_path],
        badge_paths: vec![tmp("scout_board_flow_workbook_no_badges.csv")],
        ..DashboardConfig::default()
    };
    let mut session = Session::open(config, &DatasetCache::new()).unwrap();
    assert_eq!(session.dataset().len(), 5);

    let Some(PageView::Overview(page)) = session.refresh() else {
        panic!("overview should render");
    };
    assert_eq!(page.ranking.rows[0][1], "Cris Romero");
    assert_eq!(page.ranking.headers[0], "Escudo");
}
