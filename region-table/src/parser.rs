//! Region table parser
//!
//! The REAPER web interface answers `/_/REGION` with a line-oriented,
//! tab-separated dump:
//!
//! ```text
//! REGION_LIST
//! REGION\tIntro\t1\t0\t16\t16777471
//! REGION\tVerse\t2\t16\t48\t33488896
//! REGION_LIST_END
//! ```
//!
//! The first and last lines are framing and are discarded. Each `REGION` row
//! carries `name, index, start, end, color`. Rows are collected in file
//! order, renamed on collision, sorted by start and folded into a
//! name-keyed [`RegionsData`] map.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// First field of every region row
pub const REGION_TAG: &str = "REGION";

/// Name given to rows with an empty name. Such regions are never keys.
pub const UNNAMED_REGION: &str = "-";

/// One named timeline interval as read from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    /// `None` when the field is not a base-10 integer
    pub start: Option<i64>,
    /// `None` when the field is not a base-10 integer
    pub end: Option<i64>,
    /// Decimal color literal, kept exactly as delivered
    pub color: String,
}

/// Interval and color metadata stored under a region name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    #[serde(rename = "Start")]
    pub start: Option<i64>,
    #[serde(rename = "End")]
    pub end: Option<i64>,
    #[serde(rename = "Color")]
    pub color: String,
}

/// Region name to interval map produced by a single parse.
///
/// Lookup is by name; use [`RegionsData::ordered`] for start order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegionsData {
    entries: HashMap<String, RegionEntry>,
    /// Position in the sorted row sequence of the row that owns each key
    #[serde(skip)]
    sequence: HashMap<String, usize>,
}

impl RegionsData {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a region by exact name
    pub fn get(&self, name: &str) -> Option<&RegionEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by start ascending, unparseable starts last.
    ///
    /// Equal starts keep the order their rows had in the table.
    pub fn ordered(&self) -> Vec<(&str, &RegionEntry)> {
        let mut ordered: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        ordered.sort_by_key(|(name, entry)| {
            (start_key(entry.start), self.sequence.get(*name).copied())
        });
        ordered
    }

    fn insert(&mut self, sequence: usize, region: Region) {
        self.sequence.insert(region.name.clone(), sequence);
        self.entries.insert(
            region.name,
            RegionEntry {
                start: region.start,
                end: region.end,
                color: region.color,
            },
        );
    }
}

/// Parse a raw `/_/REGION` response body.
///
/// Never fails: bodies without region rows yield an empty table and
/// malformed offsets are kept as `None`.
pub fn parse(raw_body: &str) -> RegionsData {
    let mut regions = collect_regions(raw_body);

    // Stable, so equal starts keep file order
    regions.sort_by_key(|region| start_key(region.start));

    let mut data = RegionsData::new();
    for (sequence, region) in regions.into_iter().enumerate() {
        if region.name != UNNAMED_REGION {
            data.insert(sequence, region);
        }
    }
    data
}

/// Collect region rows in file order with collision renaming applied.
///
/// A name already taken by an earlier row gets a space and the row's
/// 1-based position among body rows appended. The position counts every
/// body row, not only duplicates, so a second `A` on the fifth body line
/// becomes `A 5`.
pub fn collect_regions(raw_body: &str) -> Vec<Region> {
    let lines: Vec<&str> = raw_body.split('\n').collect();
    let body_end = lines.len().saturating_sub(1);

    let mut regions = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for (position, line) in lines.iter().enumerate().take(body_end).skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split('\t').collect();
        if fields[0] != REGION_TAG {
            continue;
        }

        let raw_name = fields
            .get(1)
            .copied()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_REGION);

        // Unnamed rows are dropped later, renaming them would leak them into the map
        let name = if raw_name != UNNAMED_REGION && taken.contains(raw_name) {
            format!("{raw_name} {position}")
        } else {
            raw_name.to_string()
        };
        taken.insert(name.clone());

        regions.push(Region {
            name,
            start: parse_offset(fields.get(3).copied()),
            end: parse_offset(fields.get(4).copied()),
            color: fields.get(5).copied().unwrap_or_default().to_string(),
        });
    }

    regions
}

/// Parse an optional offset field with [`leading_integer`].
pub fn parse_offset(field: Option<&str>) -> Option<i64> {
    field.and_then(leading_integer)
}

/// Parse a leading base-10 integer the way the DAW export is usually read:
/// leading whitespace and an optional sign, then the leading digit run.
/// `"12.5"` reads as 12. No digits, or overflow, gives `None`.
pub fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn start_key(start: Option<i64>) -> (bool, Option<i64>) {
    (start.is_none(), start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn body(rows: &[&str]) -> String {
        let mut lines = vec!["REGION_LIST"];
        lines.extend_from_slice(rows);
        lines.push("REGION_LIST_END");
        lines.join("\n")
    }

    fn entry(start: i64, end: i64, color: &str) -> RegionEntry {
        RegionEntry {
            start: Some(start),
            end: Some(end),
            color: color.to_string(),
        }
    }

    #[rstest]
    #[case("")]
    #[case("REGION\tA\t1\t0\t10\t255")]
    #[case("REGION_LIST\nREGION_LIST_END")]
    #[case("REGION_LIST\nMARKER\tm\t1\t5\t0\t0\nTRANSPORT\t1\nREGION_LIST_END")]
    fn test_no_region_rows_yields_empty(#[case] raw: &str) {
        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_header_and_footer_are_ignored() {
        let raw = "REGION\tHeader\t1\t0\t1\t0\nREGION\tBody\t2\t5\t9\t0\nREGION\tFooter\t3\t10\t11\t0";
        let data = parse(raw);

        assert_eq!(data.len(), 1);
        assert!(data.contains("Body"));
    }

    #[test]
    fn test_parses_fields() {
        let data = parse(&body(&["REGION\tVerse\t2\t16\t48\t33488896"]));

        assert_eq!(data.get("Verse"), Some(&entry(16, 48, "33488896")));
    }

    #[test]
    fn test_duplicate_name_gets_row_position_suffix() {
        let data = parse(&body(&[
            "REGION\tA\t\t0\t10\t255",
            "REGION\tA\t\t20\t30\t16711680",
        ]));

        assert_eq!(data.len(), 2);
        assert_eq!(data.get("A"), Some(&entry(0, 10, "255")));
        assert_eq!(data.get("A 2"), Some(&entry(20, 30, "16711680")));
    }

    #[test]
    fn test_duplicate_suffix_counts_every_body_row() {
        // The suffix is the row position, not a duplicate counter: the
        // second "Chorus" sits on body row 4 and the third on row 5.
        let data = parse(&body(&[
            "REGION\tChorus\t1\t0\t10\t0",
            "MARKER\tcue\t1\t12\t0\t0",
            "REGION\tBridge\t2\t40\t50\t0",
            "REGION\tChorus\t3\t60\t70\t0",
            "REGION\tChorus\t4\t80\t90\t0",
        ]));

        assert!(data.contains("Chorus"));
        assert!(data.contains("Chorus 4"));
        assert!(data.contains("Chorus 5"));
        assert!(!data.contains("Chorus 1"));
        assert!(!data.contains("Chorus 2"));
    }

    #[test]
    fn test_unnamed_regions_are_excluded() {
        let data = parse(&body(&[
            "REGION\t\t1\t0\t10\t0",
            "REGION\tNamed\t2\t10\t20\t0",
            "REGION\t\t3\t20\t30\t0",
            "REGION\t-\t4\t30\t40\t0",
        ]));

        assert_eq!(data.len(), 1);
        assert!(data.contains("Named"));
        assert!(!data.contains(UNNAMED_REGION));
        assert!(data.ordered().iter().all(|(name, _)| !name.starts_with('-')));
    }

    #[test]
    fn test_collected_rows_keep_file_order() {
        let regions = collect_regions(&body(&[
            "REGION\tLate\t1\t100\t110\t0",
            "REGION\tEarly\t2\t0\t10\t0",
        ]));

        let names: Vec<_> = regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Late", "Early"]);
    }

    #[test]
    fn test_ordered_by_start() {
        let data = parse(&body(&[
            "REGION\tC\t1\t200\t300\t0",
            "REGION\tA\t2\t0\t100\t0",
            "REGION\tB\t3\t100\t200\t0",
        ]));

        let names: Vec<_> = data.ordered().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_renamed_row_can_shadow_literal_name() {
        // Row 3 renames to "A 3", which a literal row already uses. The
        // row that sorts later by start owns the key.
        let data = parse(&body(&[
            "REGION\tA\t1\t0\t10\tfirst",
            "REGION\tA 3\t2\t100\t110\tliteral",
            "REGION\tA\t3\t5\t8\trenamed",
        ]));

        assert_eq!(data.len(), 2);
        assert_eq!(data.get("A 3"), Some(&entry(100, 110, "literal")));
    }

    #[test]
    fn test_sort_is_stable_for_equal_starts() {
        // Equal starts keep file order, so the renamed row lands last
        let data = parse(&body(&[
            "REGION\tA\t1\t0\t10\t1",
            "REGION\tA 3\t2\t50\t60\tliteral",
            "REGION\tA\t3\t50\t70\trenamed",
        ]));

        assert_eq!(data.get("A 3"), Some(&entry(50, 70, "renamed")));
    }

    #[test]
    fn test_ordered_keeps_file_order_for_equal_starts() {
        let data = parse(&body(&[
            "REGION\tZeta\t1\t0\t10\t0",
            "REGION\tAlpha\t2\t0\t20\t0",
            "REGION\tMid\t3\t5\t8\t0",
            "REGION\tBeta\t4\t0\t30\t0",
        ]));

        let names: Vec<_> = data.ordered().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Beta", "Mid"]);
    }

    #[test]
    fn test_ordered_places_shadowed_key_at_owning_row() {
        // Row 3 renames to "A 3" at 50; the literal "A 3" at 60 sorts later
        // and takes the key, so the key is ordered by the literal row.
        let data = parse(&body(&[
            "REGION\tA\t1\t0\t10\t1",
            "REGION\tA 3\t2\t60\t70\tliteral",
            "REGION\tA\t3\t50\t55\trenamed",
            "REGION\tB\t4\t50\t80\t0",
        ]));

        let names: Vec<_> = data.ordered().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["A", "B", "A 3"]);
        assert_eq!(data.get("A 3"), Some(&entry(60, 70, "literal")));
    }

    #[test]
    fn test_bad_offsets_do_not_abort_parse() {
        let data = parse(&body(&[
            "REGION\tBroken\t1\tsoon\tlater\t255",
            "REGION\tFine\t2\t10\t20\t0",
        ]));

        assert_eq!(data.len(), 2);
        let broken = data.get("Broken").unwrap();
        assert_eq!(broken.start, None);
        assert_eq!(broken.end, None);
        assert_eq!(data.get("Fine"), Some(&entry(10, 20, "0")));

        let names: Vec<_> = data.ordered().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Fine", "Broken"]);
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let data = parse(&body(&["REGION\tStub"]));

        let stub = data.get("Stub").unwrap();
        assert_eq!(stub.start, None);
        assert_eq!(stub.end, None);
        assert_eq!(stub.color, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let data = parse("REGION_LIST\r\nREGION\tIntro\t1\t0\t16\t255\r\nREGION_LIST_END\r\n");

        // The trailing newline makes the footer an empty line, so the
        // REGION_LIST_END row is examined (and ignored) as a body row.
        assert_eq!(data.get("Intro"), Some(&entry(0, 16, "255")));
    }

    #[rstest]
    #[case(Some("42"), Some(42))]
    #[case(Some("  42"), Some(42))]
    #[case(Some("-7"), Some(-7))]
    #[case(Some("+7"), Some(7))]
    #[case(Some("12.5"), Some(12))]
    #[case(Some("9abc"), Some(9))]
    #[case(Some(""), None)]
    #[case(Some("abc"), None)]
    #[case(Some("-"), None)]
    #[case(Some("99999999999999999999999"), None)]
    #[case(None, None)]
    fn test_parse_offset(#[case] field: Option<&str>, #[case] expected: Option<i64>) {
        assert_eq!(parse_offset(field), expected);
    }

    #[test]
    fn test_serializes_with_table_field_names() {
        let data = parse(&body(&["REGION\tIntro\t1\t0\t16\t255"]));
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"Intro": {"Start": 0, "End": 16, "Color": "255"}})
        );
    }

    proptest! {
        #[test]
        fn prop_ordered_is_sorted_by_start(starts in proptest::collection::vec(0i64..1_000, 0..40)) {
            let rows: Vec<String> = starts
                .iter()
                .enumerate()
                .map(|(i, start)| format!("REGION\tR{i}\t{i}\t{start}\t{}\t0", start + 1))
                .collect();
            let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
            let data = parse(&body(&row_refs));

            prop_assert_eq!(data.len(), starts.len());
            let ordered_starts: Vec<_> = data.ordered().iter().map(|(_, e)| e.start).collect();
            prop_assert!(ordered_starts.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
