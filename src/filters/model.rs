use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional inclusive date bounds; `start > end` is accepted as-is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Number of bounds that are set (0..=2)
    pub fn endpoint_count(&self) -> usize {
        usize::from(self.start.is_some()) + usize::from(self.end.is_some())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Decision-status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Decided,
}

/// Multi-select filter fields that support toggling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCollection {
    Categories,
    Jurisdictions,
    Courts,
    Judges,
}

/// Filter selection for one search
///
/// Multi-select fields keep insertion order for display, but only membership
/// matters: [`SearchFilters::toggle`] is the only way labels get in, so a label
/// appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub date_range: DateRange,
    pub categories: Vec<String>,
    pub jurisdictions: Vec<String>,
    pub courts: Vec<String>,
    pub judges: Vec<String>,
    pub status: StatusFilter,
    pub has_analysis: Option<bool>,
}

/// Partial filter update applied by shallow merge
///
/// `date_range` replaces the whole range; callers wanting to change one bound
/// pass the other bound back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiltersPatch {
    pub date_range: Option<DateRange>,
    pub categories: Option<Vec<String>>,
    pub jurisdictions: Option<Vec<String>>,
    pub courts: Option<Vec<String>>,
    pub judges: Option<Vec<String>>,
    pub status: Option<StatusFilter>,
    pub has_analysis: Option<Option<bool>>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, collection: FilterCollection) -> &[String] {
        match collection {
            FilterCollection::Categories => &self.categories,
            FilterCollection::Jurisdictions => &self.jurisdictions,
            FilterCollection::Courts => &self.courts,
            FilterCollection::Judges => &self.judges,
        }
    }

    fn collection_mut(&mut self, collection: FilterCollection) -> &mut Vec<String> {
        match collection {
            FilterCollection::Categories => &mut self.categories,
            FilterCollection::Jurisdictions => &mut self.jurisdictions,
            FilterCollection::Courts => &mut self.courts,
            FilterCollection::Judges => &mut self.judges,
        }
    }

    /// Add `value` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, collection: FilterCollection, value: &str) -> bool {
        let current = self.collection_mut(collection);
        let selected = !current.iter().any(|v| v == value);
        let next: Vec<String> = if selected {
            current.iter().cloned().chain(std::iter::once(value.to_string())).collect()
        } else {
            current.iter().filter(|v| *v != value).cloned().collect()
        };
        *current = next;
        selected
    }

    /// Shallow merge of the supplied fields
    pub fn apply(&mut self, patch: FiltersPatch) {
        if let Some(date_range) = patch.date_range {
            self.date_range = date_range;
        }
        if let Some(categories) = patch.categories {
            self.categories = dedup_labels(categories);
        }
        if let Some(jurisdictions) = patch.jurisdictions {
            self.jurisdictions = dedup_labels(jurisdictions);
        }
        if let Some(courts) = patch.courts {
            self.courts = dedup_labels(courts);
        }
        if let Some(judges) = patch.judges {
            self.judges = dedup_labels(judges);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(has_analysis) = patch.has_analysis {
            self.has_analysis = has_analysis;
        }
    }

    /// Badge count: one per selected label, per date bound, and per non-default scalar
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.jurisdictions.len()
            + self.courts.len()
            + self.judges.len()
            + self.date_range.endpoint_count()
            + usize::from(self.status != StatusFilter::All)
            + usize::from(self.has_analysis.is_some())
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

/// Patch that replaces every field
impl From<SearchFilters> for FiltersPatch {
    fn from(filters: SearchFilters) -> Self {
        Self {
            date_range: Some(filters.date_range),
            categories: Some(filters.categories),
            jurisdictions: Some(filters.jurisdictions),
            courts: Some(filters.courts),
            judges: Some(filters.judges),
            status: Some(filters.status),
            has_analysis: Some(filters.has_analysis),
        }
    }
}

fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}
