use std::collections::{BTreeSet, HashMap};

use crate::model::{Match, MatchClass, Panel};

/// Match lists currently held for the selected pair, one per class.
///
/// `None` means that class was not fetched (or not requested); `Some(vec![])`
/// is a valid empty result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchSet {
    inliers: Option<Vec<Match>>,
    outliers: Option<Vec<Match>>,
}

impl MatchSet {
    pub fn get(&self, class: MatchClass) -> Option<&[Match]> {
        match class {
            MatchClass::Inlier => self.inliers.as_deref(),
            MatchClass::Outlier => self.outliers.as_deref(),
        }
    }

    pub fn set(&mut self, class: MatchClass, matches: Vec<Match>) {
        match class {
            MatchClass::Inlier => self.inliers = Some(matches),
            MatchClass::Outlier => self.outliers = Some(matches),
        }
    }

    pub fn clear(&mut self) {
        self.inliers = None;
        self.outliers = None;
    }

    pub fn is_loaded(&self, class: MatchClass) -> bool {
        self.get(class).is_some()
    }

    pub fn any_loaded(&self) -> bool {
        self.inliers.is_some() || self.outliers.is_some()
    }

    pub fn len(&self) -> usize {
        self.count(MatchClass::Inlier) + self.count(MatchClass::Outlier)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, class: MatchClass) -> usize {
        self.get(class).map_or(0, <[Match]>::len)
    }

    /// Inliers first, then outliers.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        MatchClass::ALL
            .into_iter()
            .flat_map(move |class| self.get(class).unwrap_or_default().iter())
    }

    pub fn derive(&self) -> DerivedMatchIndices {
        DerivedMatchIndices::from_matches(self.iter())
    }
}

/// Index sets derived from the active match lists. Always rebuilt from
/// scratch, never patched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedMatchIndices {
    pub matched_a: BTreeSet<usize>,
    pub matched_b: BTreeSet<usize>,
    /// B index to the A index of its last-seen correspondence.
    pub b_to_a: HashMap<usize, usize>,
}

impl DerivedMatchIndices {
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut derived = Self::default();
        for m in matches {
            derived.matched_a.insert(m.index_a);
            derived.matched_b.insert(m.index_b);
            derived.b_to_a.insert(m.index_b, m.index_a);
        }
        derived
    }

    pub fn matched(&self, panel: Panel) -> &BTreeSet<usize> {
        match panel {
            Panel::A => &self.matched_a,
            Panel::B => &self.matched_b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matched_a.is_empty() && self.matched_b.is_empty()
    }
}
