//! Current case and on-demand analysis.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::models::CaseDetail;
use crate::services::{AnalysisService, CaseRepository};

#[derive(Debug, Default)]
struct CaseData {
    current_case: Option<CaseDetail>,
    fetch_in_flight: bool,
    analysis_in_flight: bool,
    error: Option<String>,
}

struct CaseInner {
    data: Mutex<CaseData>,
    cases: Arc<dyn CaseRepository>,
    analysis: Arc<dyn AnalysisService>,
    latest_fetch: AtomicU64,
}

/// Cloneable handle to the case detail state
#[derive(Clone)]
pub struct CaseDetailState {
    inner: Arc<CaseInner>,
}

impl CaseDetailState {
    pub fn new(cases: Arc<dyn CaseRepository>, analysis: Arc<dyn AnalysisService>) -> Self {
        Self {
            inner: Arc::new(CaseInner {
                data: Mutex::new(CaseData::default()),
                cases,
                analysis,
                latest_fetch: AtomicU64::new(0),
            }),
        }
    }

    /// Load `id` and make it the current case
    ///
    /// On failure the previous case (if any) stays current. When fetches
    /// overlap, only the most recently issued one is applied.
    pub async fn fetch_case(&self, id: &str) {
        let request = self.inner.latest_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut data = self.inner.data.lock();
            data.fetch_in_flight = true;
            data.error = None;
        }

        let outcome = self.inner.cases.get(id).await;

        if self.inner.latest_fetch.load(Ordering::SeqCst) != request {
            debug!(request, id, "discarding superseded case fetch");
            return;
        }

        let mut data = self.inner.data.lock();
        data.fetch_in_flight = false;
        match outcome {
            Ok(case) => {
                info!(id, "case loaded");
                data.current_case = Some(case);
            }
            Err(e) => {
                warn!(id, error = %e, "case fetch failed");
                data.error = Some(e.to_string());
            }
        }
    }

    /// Generate and attach an analysis to the current case
    ///
    /// Does nothing without a current case. While a generation is in flight,
    /// further calls return immediately. A result for a case that is no longer
    /// current is dropped.
    pub async fn generate_analysis(&self) {
        let case_id = {
            let mut data = self.inner.data.lock();
            let Some(case_id) = data.current_case.as_ref().map(|c| c.id.clone()) else {
                return;
            };
            if data.analysis_in_flight {
                debug!(case_id = %case_id, "analysis already in flight, coalescing");
                return;
            }
            data.analysis_in_flight = true;
            data.error = None;
            case_id
        };

        let outcome = self.inner.analysis.analyze(&case_id).await;

        let mut data = self.inner.data.lock();
        data.analysis_in_flight = false;
        match outcome {
            Ok(analysis) => {
                if let Some(case) = data.current_case.as_mut()
                    && case.id == case_id
                {
                    info!(case_id = %case_id, "analysis attached");
                    case.analysis = Some(analysis);
                } else {
                    debug!(case_id = %case_id, "current case changed, dropping analysis");
                }
            }
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "analysis failed");
                data.error = Some(e.to_string());
            }
        }
    }

    pub fn current_case(&self) -> Option<CaseDetail> {
        self.inner.data.lock().current_case.clone()
    }

    pub fn is_loading(&self) -> bool {
        let data = self.inner.data.lock();
        data.fetch_in_flight || data.analysis_in_flight
    }

    pub fn is_generating(&self) -> bool {
        self.inner.data.lock().analysis_in_flight
    }

    pub fn error(&self) -> Option<String> {
        self.inner.data.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.inner.data.lock().error = None;
    }
}
