use crate::consts::{SUMMARY_PROMPT, SUMMARY_UNAVAILABLE};
use crate::model::MatchSummary;

/// What the match statistics panel shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SummaryView {
    #[default]
    Prompt,
    Loading,
    Ready(MatchSummary),
    Unavailable(String),
}

impl SummaryView {
    pub fn unavailable() -> Self {
        SummaryView::Unavailable(SUMMARY_UNAVAILABLE.to_string())
    }

    pub fn from_summary(summary: MatchSummary) -> Self {
        if summary.available {
            SummaryView::Ready(summary)
        } else {
            SummaryView::Unavailable(
                summary
                    .reason
                    .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string()),
            )
        }
    }

    /// Label/value rows for display. A single message row when no statistics exist.
    pub fn rows(&self) -> Vec<(String, String)> {
        match self {
            SummaryView::Prompt => vec![(SUMMARY_PROMPT.to_string(), String::new())],
            SummaryView::Loading => vec![("Loading statistics...".to_string(), String::new())],
            SummaryView::Unavailable(reason) => vec![(reason.clone(), String::new())],
            SummaryView::Ready(s) => {
                let count = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
                let mut rows = vec![
                    ("Total matches".to_string(), count(s.total_matches)),
                    ("Inliers".to_string(), count(s.inlier_count)),
                    ("Outliers".to_string(), count(s.outlier_count)),
                ];
                match (s.two_view_geometry_available, &s.two_view_configuration) {
                    (Some(true), Some(config)) => {
                        rows.push(("Two-view geometry".to_string(), config.clone()))
                    }
                    (Some(true), None) => {
                        rows.push(("Two-view geometry".to_string(), "available".to_string()))
                    }
                    (Some(false), _) => {
                        rows.push(("Two-view geometry".to_string(), "unavailable".to_string()))
                    }
                    (None, _) => {}
                }
                rows
            }
        }
    }
}
