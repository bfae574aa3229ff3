//! Fixture-backed case services.
//!
//! Serves a small hard-coded case catalogue with simulated latency. Search is
//! a linear predicate scan via [`crate::filters::apply_filters`].

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{AnalysisService, CaseLookupService, CaseRepository};
use crate::config::FixtureConfig;
use crate::error::ServiceError;
use crate::filters::{SearchFilters, apply_filters};
use crate::models::{CaseAnalysis, CaseDetail, CaseStatus, Parties, SearchResult, SimilarCase};

const MAX_SIMILAR_CASES: usize = 3;

/// Case lookup, repository and analysis over an in-memory catalogue
#[derive(Debug, Clone)]
pub struct FixtureCaseService {
    cases: Vec<CaseDetail>,
    latency: Duration,
    analysis_latency: Duration,
}

impl FixtureCaseService {
    pub fn new(config: &FixtureConfig) -> Self {
        Self::with_cases(fixture_cases(), config)
    }

    pub fn with_cases(cases: Vec<CaseDetail>, config: &FixtureConfig) -> Self {
        Self { cases, latency: config.latency(), analysis_latency: config.analysis_latency() }
    }

    pub fn cases(&self) -> &[CaseDetail] {
        &self.cases
    }

    fn find(&self, id: &str) -> Option<&CaseDetail> {
        self.cases.iter().find(|case| case.id == id)
    }

    /// Build a deterministic analysis from the case text and the rest of the catalogue
    fn build_analysis(&self, case: &CaseDetail) -> CaseAnalysis {
        let key_points: Vec<String> = case
            .summary
            .split_terminator('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}.", s))
            .collect();

        let legal_principles = case
            .categories
            .iter()
            .map(|category| format!("{} law as applied in {}", category, case.jurisdiction))
            .collect();

        let mut similar_cases: Vec<SimilarCase> = self
            .cases
            .iter()
            .filter(|other| other.id != case.id)
            .map(|other| SimilarCase::new(&other.id, &other.title, similarity(case, other)))
            .filter(|similar| similar.similarity > 0.0)
            .collect();
        similar_cases.sort_by(|a, b| {
            b.similarity.total_cmp(&a.similarity).then_with(|| a.id.cmp(&b.id))
        });
        similar_cases.truncate(MAX_SIMILAR_CASES);

        CaseAnalysis {
            summary: format!("{} ({}, {}).", case.summary, case.court, case.date.format("%Y-%m-%d")),
            key_points,
            legal_principles,
            ai_insights: format!(
                "{} against {} is {} before {}.",
                case.parties.plaintiff,
                case.parties.defendant,
                match case.status {
                    CaseStatus::Pending => "pending",
                    CaseStatus::Decided => "decided",
                },
                case.judges.join(", ")
            ),
            similar_cases,
        }
    }
}

/// Weighted overlap: categories (Jaccard) 0.6, jurisdiction 0.25, status 0.15
fn similarity(a: &CaseDetail, b: &CaseDetail) -> f64 {
    let left: BTreeSet<String> = a.categories.iter().map(|c| c.to_lowercase()).collect();
    let right: BTreeSet<String> = b.categories.iter().map(|c| c.to_lowercase()).collect();
    let union = left.union(&right).count();
    let jaccard = if union == 0 {
        0.0
    } else {
        left.intersection(&right).count() as f64 / union as f64
    };

    let mut score = 0.6 * jaccard;
    if a.jurisdiction.eq_ignore_ascii_case(&b.jurisdiction) {
        score += 0.25;
    }
    if jaccard > 0.0 && a.status == b.status {
        score += 0.15;
    }
    score
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl CaseLookupService for FixtureCaseService {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        simulate_latency(self.latency).await;
        let results: Vec<SearchResult> =
            apply_filters(&self.cases, query, filters).into_iter().map(SearchResult::from).collect();
        debug!(query, matched = results.len(), "fixture lookup");
        Ok(results)
    }
}

#[async_trait]
impl CaseRepository for FixtureCaseService {
    async fn get(&self, id: &str) -> Result<CaseDetail, ServiceError> {
        simulate_latency(self.latency).await;
        self.find(id).cloned().ok_or_else(|| ServiceError::not_found("Case", id))
    }
}

#[async_trait]
impl AnalysisService for FixtureCaseService {
    async fn analyze(&self, case_id: &str) -> Result<CaseAnalysis, ServiceError> {
        simulate_latency(self.analysis_latency).await;
        let case = self
            .find(case_id)
            .ok_or_else(|| ServiceError::analysis(format!("no case with id '{}'", case_id)))?;
        Ok(self.build_analysis(case))
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    title: &str,
    court: &str,
    filed: (i32, u32, u32),
    jurisdiction: &str,
    category: &str,
    status: CaseStatus,
    judges: &[&str],
    citations: &[&str],
    summary: &str,
) -> CaseDetail {
    let (plaintiff, defendant) = title.split_once(" v. ").unwrap_or((title, ""));
    CaseDetail {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        date: NaiveDate::from_ymd_opt(filed.0, filed.1, filed.2).unwrap_or_default(),
        court: court.to_string(),
        jurisdiction: jurisdiction.to_string(),
        judges: judges.iter().map(|j| j.to_string()).collect(),
        parties: Parties { plaintiff: plaintiff.to_string(), defendant: defendant.to_string() },
        citations: citations.iter().map(|c| c.to_string()).collect(),
        full_text: format!("{}\n\n{}\n\n{}", title, court, summary),
        categories: vec![category.to_string()],
        status,
        analysis: None,
    }
}

/// The built-in five-case catalogue
pub fn fixture_cases() -> Vec<CaseDetail> {
    vec![
        fixture(
            "1",
            "Smith v. TechCorp Industries",
            "U.S. District Court, Northern District of California",
            (2024, 3, 15),
            "California",
            "Employment",
            CaseStatus::Pending,
            &["Judge Smith", "Judge Johnson"],
            &["123 U.S. 456"],
            "Employment discrimination case involving wrongful termination and hostile work environment claims. Plaintiff seeks damages for lost wages and emotional distress.",
        ),
        fixture(
            "2",
            "Global Pharmaceuticals Inc. v. Generic Labs",
            "U.S. District Court, Southern District of New York",
            (2024, 2, 28),
            "New York",
            "Intellectual Property",
            CaseStatus::Decided,
            &["Judge Alvarez"],
            &["789 F.2d 101", "35 U.S.C. 271"],
            "Patent infringement lawsuit over generic drug manufacturing processes. Complex IP litigation involving multiple pharmaceutical patents.",
        ),
        fixture(
            "3",
            "Johnson v. Metro Construction LLC",
            "Superior Court of California, Los Angeles County",
            (2024, 1, 12),
            "California",
            "Personal Injury",
            CaseStatus::Decided,
            &["Judge Nakamura"],
            &["45 Cal. 4th 210"],
            "Construction site accident resulting in severe injuries. Plaintiff claims inadequate safety protocols and negligent supervision.",
        ),
        fixture(
            "4",
            "DataSecure Inc. v. CloudTech Solutions",
            "U.S. District Court, Eastern District of Texas",
            (2024, 4, 2),
            "Texas",
            "Contract Dispute",
            CaseStatus::Pending,
            &["Judge Whitfield"],
            &["512 S.W.3d 88"],
            "Breach of contract dispute over cloud services agreement. Issues include service level violations and data security breaches.",
        ),
        fixture(
            "5",
            "Environmental Alliance v. PetroMax Corp",
            "U.S. District Court, Middle District of Florida",
            (2024, 3, 20),
            "Florida",
            "Environmental",
            CaseStatus::Pending,
            &["Judge Okafor", "Judge Brennan"],
            &["42 U.S.C. 4321"],
            "Environmental protection lawsuit challenging offshore drilling permits. Class action seeking injunctive relief and damages.",
        ),
    ]
}
