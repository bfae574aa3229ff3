use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::case::CaseDetail;

/// Summary row returned by the case lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl From<&CaseDetail> for SearchResult {
    fn from(case: &CaseDetail) -> Self {
        Self {
            id: case.id.clone(),
            title: case.title.clone(),
            summary: case.summary.clone(),
            date: case.date,
            court: Some(case.court.clone()),
            jurisdiction: Some(case.jurisdiction.clone()),
            categories: case.categories.clone(),
        }
    }
}
