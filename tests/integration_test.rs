use chrono::NaiveDate;
use csv2gedcom::diagnostics::{Diagnostic, Role};
use csv2gedcom::emitter::Emitter;
use csv2gedcom::gedcom::Header;
use csv2gedcom::input;
use std::fs;
use std::path::PathBuf;

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn path(filename: &str) -> String {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push(filename);
    path.to_str().unwrap().to_owned()
}

fn slurp(filename: &str) -> String {
    fs::read_to_string(path(filename)).unwrap()
}

fn render(emitter: &Emitter) -> (String, Vec<Diagnostic>) {
    let timestamp = NaiveDate::from_ymd_opt(2021, 5, 17)
        .unwrap()
        .and_hms_opt(9, 30, 5)
        .unwrap();
    let mut out: Vec<u8> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    emitter
        .render_at(timestamp, &mut out, &mut diagnostics)
        .unwrap();
    (String::from_utf8(out).unwrap(), diagnostics)
}

#[test]
fn test_family() {
    init();
    let people = input::read_people(&path("sample-data/family.csv")).unwrap();
    assert_eq!(people.len(), 9);
    let emitter = Emitter::new(&people);
    let (out, diagnostics) = render(&emitter);
    let header_end = out.find("\n\n0 @I1@ INDI\n").unwrap() + 1;
    let (header, body) = out.split_at(header_end);
    assert!(header.starts_with("0 HEAD\n"));
    assert!(header.contains("\n1 DATE 17 MAY 2021\n2 TIME 09:30:05\n"));
    assert!(header.contains("\n1 LANG Swedish\n"));
    assert_eq!(body, slurp("integration-test/expected/family.ged"));
    assert_eq!(
        diagnostics,
        [Diagnostic::MissingParent {
            id: "99".to_owned(),
            role: Role::Father
        }]
    );
}

#[test]
fn test_deterministic() {
    init();
    let people = input::read_people(&path("sample-data/family.csv")).unwrap();
    let header = Header {
        copyright: Some("Copyright (c) 2021 The Persson family".to_owned()),
        ..Default::default()
    };
    let first = render(&Emitter::with_header(&people, header.clone()));
    let emitter = Emitter::with_header(&people, header);
    let second = render(&emitter);
    let third = render(&emitter);
    assert_eq!(first, second);
    assert_eq!(second, third);
    assert!(first.0.contains("\n1 COPR Copyright (c) 2021 The Persson family\n"));
}

#[test]
fn test_missing_column() {
    init();
    let data = "ID,Given Names,Sex,Father ID,Mother ID\n1,Nils,0,,\n";
    let e = input::read_people_from(data.as_bytes()).unwrap_err();
    assert!(e.to_string().contains("Surname"));
}

#[test]
fn test_missing_file() {
    init();
    assert!(input::read_people(&path("sample-data/no-such-file.csv")).is_err());
}
