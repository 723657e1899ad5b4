//! Keyword search over the major field

use crate::types::SchoolRecord;

/// Case-insensitive substring search confined to the `major` field.
///
/// Records without a major never match, regardless of query. The result
/// preserves the input order. An empty or whitespace-only query matches
/// nothing.
pub fn search_majors<'a>(records: &'a [SchoolRecord], query: &str) -> Vec<&'a SchoolRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record
                .major
                .as_ref()
                .is_some_and(|major| major.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn record(major: Option<&str>) -> SchoolRecord {
        SchoolRecord {
            major: major.map(String::from),
            ..Default::default()
        }
    }

    fn corpus() -> Vec<SchoolRecord> {
        vec![
            record(Some("소프트웨어개발")),
            record(None),
            record(Some("디자인")),
        ]
    }

    #[test]
    fn test_matching_query_returns_exact_subset() {
        let records = corpus();
        let hits = search_majors(&records, "디자인");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].major.as_deref(), Some("디자인"));
    }

    #[test_case("요리", 0; "no match yields empty")]
    #[test_case("디자인", 1; "keyword matches one")]
    #[test_case("소프트웨어", 1; "substring matches")]
    #[test_case("", 0; "empty query matches nothing")]
    #[test_case("   ", 0; "blank query matches nothing")]
    fn test_hit_counts(query: &str, expected: usize) {
        let records = corpus();
        assert_eq!(search_majors(&records, query).len(), expected);
    }

    #[test]
    fn test_absent_major_never_matches() {
        let records = vec![record(None), record(None)];
        // Even a query that would match anything textually
        assert!(search_majors(&records, "a").is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = vec![record(Some("IT소프트웨어과")), record(Some("Design과"))];
        let hits = search_majors(&records, "it");
        assert_eq!(hits.len(), 1);
        let hits = search_majors(&records, "DESIGN");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_result_preserves_input_order() {
        let records = vec![
            record(Some("디자인과")),
            record(Some("기계과")),
            record(Some("시각디자인과")),
        ];
        let hits = search_majors(&records, "디자인");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].major.as_deref(), Some("디자인과"));
        assert_eq!(hits[1].major.as_deref(), Some("시각디자인과"));
    }

}
