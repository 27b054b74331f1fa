// src/specs/cases.rs
//! Case list on the strike map. Each `div.case-item` is one reported incident.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::core::sanitize::{clean_text, normalize_ws};

pub const CASE_ITEM: &str = "div.case-item";

/// One incident. Every field is optional in the page and defaults to "".
/// Field order is the export column order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub date: String,
    pub description: String,
    pub location: String,
    pub industry: String,
    pub sub_industry: String,
    pub action_type: String,
    pub worker_grievances: String,
    pub number_of_participants: String,
    pub result: String,
    pub related_enterprises: String,
    pub company_ownership: String,
    /// `href` of the source link
    pub source: String,
    /// `src` of the case image
    pub image: String,
}

impl CaseRecord {
    /// Collapse whitespace runs in the free-text fields. URLs are untouched.
    pub fn collapse_ws(&mut self) {
        for field in [
            &mut self.date,
            &mut self.description,
            &mut self.location,
            &mut self.industry,
            &mut self.sub_industry,
            &mut self.action_type,
            &mut self.worker_grievances,
            &mut self.number_of_participants,
            &mut self.result,
            &mut self.related_enterprises,
            &mut self.company_ownership,
        ] {
            *field = normalize_ws(field);
        }
    }
}

/// Every case in the document, in document order. No cases → empty vec.
pub fn extract_cases(html: &str) -> Vec<CaseRecord> {
    let doc = Html::parse_document(html);
    doc.select(selector!(CASE_ITEM)).map(extract_case).collect()
}

pub fn extract_case(case: ElementRef<'_>) -> CaseRecord {
    CaseRecord {
        date: text_of(case, selector!("span.case-date")),
        description: text_of(case, selector!("p.case-description")),
        location: text_of(case, selector!("span.case-location")),
        industry: text_of(case, selector!("span.case-industry")),
        sub_industry: text_of(case, selector!("span.case-sub-industry")),
        action_type: text_of(case, selector!("span.case-action-type")),
        worker_grievances: text_of(case, selector!("span.case-grievances")),
        number_of_participants: text_of(case, selector!("span.case-participants")),
        result: text_of(case, selector!("span.case-result")),
        related_enterprises: text_of(case, selector!("span.case-related-enterprises")),
        company_ownership: text_of(case, selector!("span.case-ownership")),
        source: attr_of(case, selector!("a.case-source"), "href"),
        image: attr_of(case, selector!("img.case-image"), "src"),
    }
}

/* ---------- helpers ---------- */

/// All descendant text of the first match, trimmed.
fn text_of(case: ElementRef<'_>, sel: &Selector) -> String {
    case.select(sel)
        .next()
        .map(|el| clean_text(el.text()))
        .unwrap_or_default()
}

/// An attribute of the first match, verbatim. Missing element or attribute → "".
fn attr_of(case: ElementRef<'_>, sel: &Selector, attr: &str) -> String {
    case.select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| s!(v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(html: &str) -> CaseRecord {
        let mut cases = extract_cases(html);
        assert_eq!(cases.len(), 1, "expected exactly one case in fixture");
        cases.remove(0)
    }

    #[test]
    fn empty_case_defaults_every_field() {
        let case = one(r#"<div class="case-item"></div>"#);
        assert_eq!(case, CaseRecord::default());
    }

    #[test]
    fn class_lists_and_nested_text() {
        let case = one(r#"
            <div class="card case-item selected">
              <span class="label case-date">  2024-12-05 </span>
              <p class="case-description">Workers <b>blocked</b> the gate</p>
            </div>"#);
        assert_eq!(case.date, "2024-12-05");
        assert_eq!(case.description, "Workers blocked the gate");
    }

    #[test]
    fn first_match_wins() {
        let case = one(r#"
            <div class="case-item">
              <span class="case-result">Wages paid</span>
              <span class="case-result">Ignored</span>
            </div>"#);
        assert_eq!(case.result, "Wages paid");
    }

    #[test]
    fn tag_must_match_not_just_class() {
        // description is a <p>; a <span> with the same class is not it
        let case = one(r#"
            <div class="case-item">
              <span class="case-description">wrong tag</span>
              <div class="case-date">wrong tag</div>
            </div>"#);
        assert_eq!(case.description, "");
        assert_eq!(case.date, "");
    }

    #[test]
    fn attributes_are_verbatim_or_empty() {
        let case = one(r#"
            <div class="case-item">
              <a class="case-source">no href</a>
              <img class="case-image" src=" https://img.example/1.jpg ">
            </div>"#);
        assert_eq!(case.source, "");
        assert_eq!(case.image, " https://img.example/1.jpg ");
    }

    #[test]
    fn collapse_ws_leaves_urls_alone() {
        let mut case = CaseRecord {
            description: s!("a\n   b"),
            source: s!("https://x.example/a%20b"),
            ..CaseRecord::default()
        };
        case.collapse_ws();
        assert_eq!(case.description, "a b");
        assert_eq!(case.source, "https://x.example/a%20b");
    }

    #[test]
    fn no_cases_is_empty_not_error() {
        assert!(extract_cases("<html><body><p>Loading…</p></body></html>").is_empty());
        assert!(extract_cases("").is_empty());
    }
}
