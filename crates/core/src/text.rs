// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text folding and timestamp parsing shared by the ingestion pipelines.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds case and diacritics out of `input`.
///
/// The text is canonically decomposed (NFD), combining marks are dropped,
/// and what remains is lowercased. "München", "MUNCHEN" and "munchen" all
/// fold to "munchen"; "Ёлки" folds to "елки".
#[must_use]
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses an internet date-time with whole seconds (e.g.,
/// `2025-11-03T08:15:00+00:00`).
///
/// Returns `None` for anything that does not conform: bare dates, missing
/// offsets, fractional seconds, or free text.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    // Whole seconds only
    if raw.as_bytes().get(SECONDS_END) == Some(&b'.') {
        return None;
    }
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}

/// Byte length of `YYYY-MM-DDTHH:MM:SS`.
const SECONDS_END: usize = 19;
