mod common;

use common::read_fixture;
use divscan::{DividendEvent, RawFiling};

#[test]
fn parse_archive_fixture() {
    let content = read_fixture("archive.json");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let filings: Vec<RawFiling> = serde_json::from_value(value["values"].clone()).unwrap();

    assert_eq!(filings.len(), 2);
    assert_eq!(filings[0].files.len(), 2);
    assert_eq!(filings[0].files[0].file_type, "EX-99.1");
    assert_eq!(filings[0].files[0].mime, "text/html");
    assert_eq!(filings[0].filed_at, 1747244135);
    assert!(filings[1].files[0].url.contains("/ix?doc=/Archives"));
}

#[test]
fn parse_dividends_fixture() {
    let content = read_fixture("dividends.json");
    let events: Vec<DividendEvent> = serde_json::from_str(&content).unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].symbol, "WASH");
    assert_eq!(events[0].mic_code, "XNAS");
    assert_eq!(events[0].ex_date, "2025-06-20");
    assert_eq!(events[0].amount, 0.56);
}

#[test]
fn normalize_bare_archive_path() {
    let base = "https://www.sec.gov/Archives/edgar/data/";
    assert_eq!(
        divscan::normalize_url(base, "737468/000073746825000031/exhibit9912025q2.htm"),
        "https://www.sec.gov/Archives/edgar/data/737468/000073746825000031/exhibit9912025q2.htm"
    );
}

#[test]
fn eligibility_over_fixture_attachments() {
    let content = read_fixture("archive.json");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let filings: Vec<RawFiling> = serde_json::from_value(value["values"].clone()).unwrap();

    let eligible: Vec<_> = filings[0]
        .files
        .iter()
        .filter(|f| divscan::is_eligible(&f.url))
        .collect();
    assert_eq!(eligible.len(), 1);
    assert!(eligible[0].url.ends_with(".htm"));
}
