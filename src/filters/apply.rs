use super::model::{SearchFilters, StatusFilter};
use crate::models::{CaseDetail, CaseStatus, SearchResult, SortOrder};

/// Linear scan of `cases`, keeping those that match `query` and `filters`
///
/// Match logic:
/// - Query: empty (after trimming) matches everything, otherwise a
///   case-insensitive substring of the title or summary
/// - Within a multi-select field any selected label matches (OR)
/// - Across fields every active field must match (AND)
pub fn apply_filters<'a>(
    cases: &'a [CaseDetail],
    query: &str,
    filters: &SearchFilters,
) -> Vec<&'a CaseDetail> {
    cases.iter().filter(|case| matches_case(case, query, filters)).collect()
}

/// Evaluate query and every filter field against a single case
pub fn matches_case(case: &CaseDetail, query: &str, filters: &SearchFilters) -> bool {
    match_query(case, query)
        && match_any_label(&case.categories, &filters.categories)
        && match_jurisdiction(case, &filters.jurisdictions)
        && match_court(case, &filters.courts)
        && match_any_label(&case.judges, &filters.judges)
        && filters.date_range.contains(case.date)
        && match_status(case, filters.status)
        && filters.has_analysis.is_none_or(|wanted| case.has_analysis() == wanted)
}

/// Case-insensitive substring match on title or summary
fn match_query(case: &CaseDetail, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    case.title.to_lowercase().contains(&needle) || case.summary.to_lowercase().contains(&needle)
}

/// True when nothing is selected or any case label equals a selected one (ignoring case)
fn match_any_label(labels: &[String], selected: &[String]) -> bool {
    selected.is_empty()
        || selected.iter().any(|wanted| labels.iter().any(|label| label.eq_ignore_ascii_case(wanted)))
}

fn match_jurisdiction(case: &CaseDetail, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|j| case.jurisdiction.eq_ignore_ascii_case(j))
}

/// Court names are long-form ("U.S. District Court, Eastern District of Texas"),
/// so selections match as case-insensitive substrings
fn match_court(case: &CaseDetail, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let court = case.court.to_lowercase();
    selected.iter().any(|wanted| court.contains(&wanted.to_lowercase()))
}

fn match_status(case: &CaseDetail, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Pending => case.status == CaseStatus::Pending,
        StatusFilter::Decided => case.status == CaseStatus::Decided,
    }
}

/// Order results in place
///
/// - `Date`: newest first, ties broken by id
/// - `Relevance`: most query occurrences in title and summary first (title hits
///   weigh double), falling back to date order
pub fn sort_results(results: &mut [SearchResult], order: SortOrder, query: &str) {
    let by_date = |a: &SearchResult, b: &SearchResult| b.date.cmp(&a.date).then(a.id.cmp(&b.id));
    match order {
        SortOrder::Date => results.sort_by(by_date),
        SortOrder::Relevance => {
            let needle = query.trim().to_lowercase();
            results.sort_by(|a, b| {
                relevance(b, &needle).cmp(&relevance(a, &needle)).then_with(|| by_date(a, b))
            });
        }
    }
}

fn relevance(result: &SearchResult, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let title_hits = result.title.to_lowercase().matches(needle).count();
    let summary_hits = result.summary.to_lowercase().matches(needle).count();
    title_hits * 2 + summary_hits
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::filters::model::{DateRange, FilterCollection};
    use crate::models::{CaseAnalysis, Parties};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_case(id: &str, title: &str, court: &str, filed: NaiveDate) -> CaseDetail {
        CaseDetail {
            id: id.to_string(),
            title: title.to_string(),
            summary: format!("Summary of {}", title),
            date: filed,
            court: court.to_string(),
            jurisdiction: "California".to_string(),
            judges: vec!["Elena Kagan".to_string()],
            parties: Parties { plaintiff: "P".to_string(), defendant: "D".to_string() },
            citations: Vec::new(),
            full_text: String::new(),
            categories: vec!["Employment".to_string()],
            status: CaseStatus::Pending,
            analysis: None,
        }
    }

    #[test]
    fn test_query_case_insensitive() {
        let case = create_test_case("1", "Smith v. TechCorp Industries", "Court", date(2024, 3, 15));
        let filters = SearchFilters::new();
        assert!(matches_case(&case, "Smith", &filters));
        assert!(matches_case(&case, "smith", &filters));
        assert!(matches_case(&case, "TECHCORP", &filters));
        assert!(!matches_case(&case, "Johnson", &filters));
    }

    #[test]
    fn test_query_matches_summary() {
        let case = create_test_case("1", "Doe v. Roe", "Court", date(2024, 3, 15));
        assert!(matches_case(&case, "summary of", &SearchFilters::new()));
    }

    #[test]
    fn test_empty_query_matches_all() {
        let cases = vec![
            create_test_case("1", "A", "Court", date(2024, 1, 1)),
            create_test_case("2", "B", "Court", date(2024, 2, 1)),
        ];
        assert_eq!(apply_filters(&cases, "", &SearchFilters::new()).len(), 2);
        assert_eq!(apply_filters(&cases, "   ", &SearchFilters::new()).len(), 2);
    }

    #[test]
    fn test_same_field_is_or() {
        let case = create_test_case("1", "A", "Court", date(2024, 1, 1));
        let mut filters = SearchFilters::new();
        filters.toggle(FilterCollection::Categories, "Tax");
        assert!(!matches_case(&case, "", &filters));
        filters.toggle(FilterCollection::Categories, "employment");
        assert!(matches_case(&case, "", &filters));
    }

    #[test]
    fn test_cross_field_is_and() {
        let case = create_test_case("1", "A", "Court", date(2024, 1, 1));
        let mut filters = SearchFilters::new();
        filters.toggle(FilterCollection::Categories, "Employment");
        filters.toggle(FilterCollection::Jurisdictions, "Texas");
        assert!(!matches_case(&case, "", &filters));
        filters.toggle(FilterCollection::Jurisdictions, "California");
        assert!(matches_case(&case, "", &filters));
    }

    #[test]
    fn test_court_substring() {
        let case = create_test_case(
            "1",
            "A",
            "U.S. District Court, Northern District of California",
            date(2024, 1, 1),
        );
        let mut filters = SearchFilters::new();
        filters.toggle(FilterCollection::Courts, "District Court");
        assert!(matches_case(&case, "", &filters));
        filters = SearchFilters::new();
        filters.toggle(FilterCollection::Courts, "Supreme Court");
        assert!(!matches_case(&case, "", &filters));
    }

    #[test]
    fn test_judges() {
        let case = create_test_case("1", "A", "Court", date(2024, 1, 1));
        let mut filters = SearchFilters::new();
        filters.toggle(FilterCollection::Judges, "Neil Gorsuch");
        assert!(!matches_case(&case, "", &filters));
        filters.toggle(FilterCollection::Judges, "Elena Kagan");
        assert!(matches_case(&case, "", &filters));
    }

    #[test]
    fn test_date_range_and_status() {
        let case = create_test_case("1", "A", "Court", date(2024, 3, 15));
        let mut filters = SearchFilters::new();
        filters.date_range = DateRange::new(Some(date(2024, 3, 15)), Some(date(2024, 3, 15)));
        assert!(matches_case(&case, "", &filters));
        filters.status = StatusFilter::Decided;
        assert!(!matches_case(&case, "", &filters));
        filters.status = StatusFilter::Pending;
        assert!(matches_case(&case, "", &filters));
        filters.date_range = DateRange::new(Some(date(2024, 4, 1)), None);
        assert!(!matches_case(&case, "", &filters));
    }

    #[test]
    fn test_has_analysis() {
        let mut case = create_test_case("1", "A", "Court", date(2024, 3, 15));
        let mut filters = SearchFilters::new();
        filters.has_analysis = Some(true);
        assert!(!matches_case(&case, "", &filters));

        case.analysis = Some(CaseAnalysis {
            summary: String::new(),
            key_points: Vec::new(),
            legal_principles: Vec::new(),
            similar_cases: Vec::new(),
            ai_insights: String::new(),
        });
        assert!(matches_case(&case, "", &filters));
        filters.has_analysis = Some(false);
        assert!(!matches_case(&case, "", &filters));
    }

    #[test]
    fn test_sort_by_date() {
        let mut results: Vec<SearchResult> = [
            create_test_case("1", "A", "Court", date(2024, 1, 1)),
            create_test_case("2", "B", "Court", date(2024, 3, 1)),
            create_test_case("3", "C", "Court", date(2024, 2, 1)),
        ]
        .iter()
        .map(SearchResult::from)
        .collect();

        sort_results(&mut results, SortOrder::Date, "");
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_by_relevance() {
        let mut results: Vec<SearchResult> = [
            create_test_case("1", "Contract dispute", "Court", date(2024, 3, 1)),
            create_test_case("2", "Contract contract", "Court", date(2024, 1, 1)),
            create_test_case("3", "Unrelated", "Court", date(2024, 2, 1)),
        ]
        .iter()
        .map(SearchResult::from)
        .collect();

        sort_results(&mut results, SortOrder::Relevance, "contract");
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }
}
