// src/csv.rs
use std::io::Write;

use ::csv::{Terminator, WriterBuilder};

use crate::specs::cases::CaseRecord;

/// Export header, in `CaseRecord` field order.
pub const CASE_HEADERS: [&str; 13] = [
    "date",
    "description",
    "location",
    "industry",
    "sub_industry",
    "action_type",
    "worker_grievances",
    "number_of_participants",
    "result",
    "related_enterprises",
    "company_ownership",
    "source",
    "image",
];

/// Write cases as CSV/TSV to any writer, CRLF after every row.
/// Fields are quoted only when they hold the separator, a quote, or a line break.
/// The header is written even when `cases` is empty.
pub fn write_cases<W: Write>(
    w: W,
    cases: &[CaseRecord],
    sep: u8,
    include_headers: bool,
) -> Result<(), ::csv::Error> {
    // Header written by hand: serde only emits one alongside the first record.
    let mut out = WriterBuilder::new()
        .delimiter(sep)
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(w);

    if include_headers {
        out.write_record(CASE_HEADERS)?;
    }
    for case in cases {
        out.serialize(case)?;
    }
    out.flush()?;
    Ok(())
}

/// Whole export as a string, exactly as `write_cases` would put it on disk.
pub fn to_export_string(cases: &[CaseRecord], sep: u8, include_headers: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // A Vec sink never fails and every field serializes as a plain string.
    let _ = write_cases(&mut buf, cases, sep, include_headers);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
