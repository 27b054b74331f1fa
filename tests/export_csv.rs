// tests/export_csv.rs
//
// File export: header, row count, defaults, paths.
//
use std::fs;
use std::path::{Path, PathBuf};

use clb_scrape::config::{ExportFormat, ExportOptions};
use clb_scrape::csv::CASE_HEADERS;
use clb_scrape::file::write_export;
use clb_scrape::specs::cases::{CaseRecord, extract_cases};

const FIXTURE: &str = include_str!("fixtures/cases.html");

fn read_back(path: &Path, delim: u8, headers: bool) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(headers)
        .from_path(path)
        .unwrap();
    let hdr = if headers {
        rdr.headers().unwrap().iter().map(String::from).collect()
    } else {
        Vec::new()
    };
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (hdr, rows)
}

fn export_to(out: PathBuf) -> ExportOptions {
    ExportOptions { out: Some(out), ..ExportOptions::default() }
}

#[test]
fn n_cases_give_n_rows_and_the_header() {
    let tmp = tempfile::tempdir().unwrap();
    let cases = extract_cases(FIXTURE);

    let path = write_export(&export_to(tmp.path().join("cases.csv")), &cases).unwrap();
    let (hdr, rows) = read_back(&path, b',', true);

    assert_eq!(hdr, CASE_HEADERS);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 13));

    // quotes, commas and the line break come back intact
    assert_eq!(rows[1][1], cases[1].description);
    // defaults are empty cells
    assert_eq!(rows[1][11], "");
    assert_eq!(rows[2][12], "");
}

#[test]
fn header_only_for_empty_page() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_export(&export_to(tmp.path().join("empty.csv")), &[]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, format!("{}\r\n", CASE_HEADERS.join(",")));
}

#[test]
fn directory_hint_gets_default_name_and_is_created() {
    let tmp = tempfile::tempdir().unwrap();
    let hint = PathBuf::from(format!("{}/nested/out/", tmp.path().display()));

    let mut export = export_to(hint);
    export.format = ExportFormat::Tsv;
    let path = write_export(&export, &extract_cases(FIXTURE)).unwrap();

    assert_eq!(path.file_name().unwrap(), "case_history.tsv");
    assert!(path.is_file());
    assert!(tmp.path().join("nested/out").is_dir());
}

#[test]
fn tsv_without_headers() {
    let tmp = tempfile::tempdir().unwrap();
    let mut export = export_to(tmp.path().join("cases.tsv"));
    export.format = ExportFormat::Tsv;
    export.include_headers = false;

    let path = write_export(&export, &extract_cases(FIXTURE)).unwrap();
    let (_, rows) = read_back(&path, b'\t', false);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "2024-12-05");
    assert_eq!(rows[0][2], "Dongguan, Guangdong");
}

#[test]
fn existing_file_is_truncated() {
    let tmp = tempfile::tempdir().unwrap();
    let export = export_to(tmp.path().join("cases.csv"));
    let cases = extract_cases(FIXTURE);

    write_export(&export, &cases).unwrap();
    let path = write_export(&export, &cases[..1]).unwrap();

    let (_, rows) = read_back(&path, b',', true);
    assert_eq!(rows.len(), 1);
}

#[test]
fn utf8_without_bom() {
    let tmp = tempfile::tempdir().unwrap();
    let case = CaseRecord {
        location: "广东省东莞市".into(),
        description: "工人讨薪".into(),
        ..CaseRecord::default()
    };
    let path = write_export(&export_to(tmp.path().join("zh.csv")), &[case]).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"date,"));
    let (_, rows) = read_back(&path, b',', true);
    assert_eq!(rows[0][2], "广东省东莞市");
}

#[test]
fn out_path_is_a_file_parent_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "not a dir").unwrap();

    let err = write_export(&export_to(blocker.join("cases.csv")), &[]).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}
