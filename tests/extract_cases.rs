// tests/extract_cases.rs
//
// Case extraction against a captured strike-map page.
//
use clb_scrape::specs::cases::{CaseRecord, extract_cases};

const FIXTURE: &str = include_str!("fixtures/cases.html");

#[test]
fn finds_every_case_in_document_order() {
    let cases = extract_cases(FIXTURE);
    assert_eq!(cases.len(), 3);

    let dates: Vec<&str> = cases.iter().map(|c| c.date.as_str()).collect();
    assert_eq!(dates, ["2024-12-05", "2024-12-07", "2024-12-19"]);
}

#[test]
fn full_case_fills_every_field() {
    let case = &extract_cases(FIXTURE)[0];
    let expected = CaseRecord {
        date: "2024-12-05".into(),
        description: "Around 200 workers at an electronics plant staged a protest over unpaid wages, blocking the factory gate.".into(),
        location: "Dongguan, Guangdong".into(),
        industry: "Manufacturing".into(),
        sub_industry: "Electronics".into(),
        action_type: "Protest".into(),
        worker_grievances: "Wage arrears".into(),
        number_of_participants: "100-1000".into(),
        result: "Negotiation".into(),
        related_enterprises: "Xinda Electronics Co.".into(),
        company_ownership: "Private".into(),
        source: "https://weibo.com/example/post/1".into(),
        image: "https://maps.clb.org.hk/img/2024120511353422735.jpg".into(),
    };
    assert_eq!(case, &expected);
}

#[test]
fn partial_cases_default_to_empty() {
    let cases = extract_cases(FIXTURE);

    let second = &cases[1];
    assert_eq!(second.industry, "Construction");
    assert_eq!(second.sub_industry, "");
    assert_eq!(second.result, "");
    assert_eq!(second.source, "", "link without href");
    assert_eq!(second.image, "");

    let third = &cases[2];
    assert_eq!(third.description, "");
    assert_eq!(third.action_type, "Strike");
    assert_eq!(third.number_of_participants, "Unknown");
    assert_eq!(third.image, "", "image without src");
}

#[test]
fn text_is_trimmed_but_inner_breaks_survive() {
    let cases = extract_cases(FIXTURE);
    // &nbsp; padding is trimmed like any other whitespace
    assert_eq!(cases[2].date, "2024-12-19");
    assert_eq!(
        cases[1].description,
        "Construction workers said \"we want our pay\", demanding back wages.\nPolice were called."
    );
}

#[test]
fn markup_outside_cases_is_ignored() {
    let cases = extract_cases(FIXTURE);
    assert!(cases.iter().all(|c| c.date != "1999-01-01" && c.date != "not a case"));
}
