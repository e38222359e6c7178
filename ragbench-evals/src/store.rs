//! In-memory, ordered store of test cases.

use crate::case::{CaseField, CaseId, TestCase};
use crate::metrics::{CaseMetrics, EvaluationResults};
use tracing::{debug, trace};

/// Owns the ordered test cases and the optional aggregate results.
///
/// Ids come from a counter that only moves forward, so removing a case
/// never lets a later case reuse its id.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseStore {
    cases: Vec<TestCase>,
    next_id: u64,
    results: Option<EvaluationResults>,
}

impl TestCaseStore {
    /// Create a store holding one empty test case with id 1.
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.create();
        store
    }

    /// Create a store with no test cases.
    pub fn empty() -> Self {
        Self {
            cases: Vec::new(),
            next_id: 1,
            results: None,
        }
    }

    /// Append a new empty test case and return its id.
    pub fn create(&mut self) -> CaseId {
        let id = CaseId::new(self.next_id);
        self.next_id += 1;
        self.cases.push(TestCase::new(id));
        debug!(id = %id, total = self.cases.len(), "Created test case");
        id
    }

    /// Remove the case with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: CaseId) -> Option<TestCase> {
        let Some(pos) = self.position(id) else {
            trace!(id = %id, "Remove ignored, no such test case");
            return None;
        };
        let removed = self.cases.remove(pos);
        debug!(id = %id, total = self.cases.len(), "Removed test case");
        Some(removed)
    }

    /// Replace one text field of the case with `id`.
    ///
    /// Returns `false` and changes nothing if the id is unknown.
    pub fn update_field(&mut self, id: CaseId, field: CaseField, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(case) => {
                *case.field_mut(field) = value.into();
                debug!(id = %id, field = %field, "Updated test case field");
                true
            }
            None => {
                trace!(id = %id, field = %field, "Update ignored, no such test case");
                false
            }
        }
    }

    /// Set the input query.
    pub fn set_input(&mut self, id: CaseId, input: impl Into<String>) -> bool {
        self.update_field(id, CaseField::Input, input)
    }

    /// Set the expected output.
    pub fn set_expected_output(&mut self, id: CaseId, expected: impl Into<String>) -> bool {
        self.update_field(id, CaseField::ExpectedOutput, expected)
    }

    /// Set the actual output.
    pub fn set_actual_output(&mut self, id: CaseId, actual: impl Into<String>) -> bool {
        self.update_field(id, CaseField::ActualOutput, actual)
    }

    /// Write the output and scores produced by an evaluation.
    pub fn record_scores(
        &mut self,
        id: CaseId,
        actual_output: impl Into<String>,
        metrics: CaseMetrics,
    ) -> bool {
        match self.get_mut(id) {
            Some(case) => {
                case.actual_output = actual_output.into();
                case.metrics = metrics;
                debug!(id = %id, %metrics, "Recorded scores");
                true
            }
            None => {
                trace!(id = %id, "Scores ignored, no such test case");
                false
            }
        }
    }

    /// Ordered view of every case.
    pub fn list(&self) -> &[TestCase] {
        &self.cases
    }

    /// Iterate cases in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    /// Look up a case by id.
    pub fn get(&self, id: CaseId) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Get the number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Store an aggregate results snapshot.
    pub fn set_results(&mut self, results: EvaluationResults) {
        self.results = Some(results);
    }

    /// Current aggregate results, if any have been supplied.
    pub fn results(&self) -> Option<&EvaluationResults> {
        self.results.as_ref()
    }

    /// Drop the aggregate results snapshot.
    pub fn clear_results(&mut self) {
        self.results = None;
    }

    /// Recompute the aggregate snapshot from the current cases.
    ///
    /// An empty store clears the snapshot.
    pub fn refresh_results(&mut self) -> Option<&EvaluationResults> {
        self.results = EvaluationResults::from_cases(&self.cases);
        self.results.as_ref()
    }

    fn position(&self, id: CaseId) -> Option<usize> {
        self.cases.iter().position(|c| c.id == id)
    }

    fn get_mut(&mut self, id: CaseId) -> Option<&mut TestCase> {
        self.cases.iter_mut().find(|c| c.id == id)
    }
}

impl Default for TestCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a TestCaseStore {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(store: &TestCaseStore) -> Vec<u64> {
        store.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn test_new_store_has_one_default_case() {
        let store = TestCaseStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0], TestCase::new(CaseId::new(1)));
        assert!(store.results().is_none());
    }

    #[test]
    fn test_create_appends_defaults() {
        let mut store = TestCaseStore::empty();
        for _ in 0..5 {
            store.create();
        }

        assert_eq!(store.len(), 5);
        for case in &store {
            assert!(case.input.is_empty());
            assert!(case.expected_output.is_empty());
            assert!(case.actual_output.is_empty());
            assert!(case.metrics.is_unscored());
        }
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = TestCaseStore::new();
        store.create();
        store.set_input(CaseId::new(1), "keep me");
        let before = store.clone();

        assert!(store.remove(CaseId::new(42)).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_existing() {
        let mut store = TestCaseStore::empty();
        let a = store.create();
        let b = store.create();
        let c = store.create();
        store.set_input(a, "first");
        store.set_input(c, "third");

        let removed = store.remove(b).unwrap();
        assert_eq!(removed.id, b);
        assert_eq!(ids(&store), vec![1, 3]);
        assert_eq!(store.get(a).unwrap().input, "first");
        assert_eq!(store.get(c).unwrap().input, "third");
    }

    #[test]
    fn test_ids_never_reused() {
        let mut store = TestCaseStore::new();
        store.create();
        store.create();
        store.create();
        assert_eq!(ids(&store), vec![1, 2, 3, 4]);

        store.remove(CaseId::new(2));
        store.create();
        assert_eq!(ids(&store), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_update_field_touches_only_target() {
        let mut store = TestCaseStore::empty();
        let a = store.create();
        let b = store.create();
        store.record_scores(a, "answer", CaseMetrics::new(0.1, 0.2, 0.3, 0.4));
        store.set_expected_output(a, "expected");
        let other_before = store.get(b).unwrap().clone();
        let target_before = store.get(a).unwrap().clone();

        assert!(store.update_field(a, CaseField::Input, "What is X?"));

        let target = store.get(a).unwrap();
        assert_eq!(target.input, "What is X?");
        assert_eq!(target.expected_output, target_before.expected_output);
        assert_eq!(target.actual_output, target_before.actual_output);
        assert_eq!(target.metrics, target_before.metrics);
        assert_eq!(store.get(b).unwrap(), &other_before);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = TestCaseStore::new();
        let before = store.clone();
        assert!(!store.set_expected_output(CaseId::new(9), "nope"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_explicit_setters() {
        let mut store = TestCaseStore::new();
        let id = CaseId::new(1);
        store.set_input(id, "q");
        store.set_expected_output(id, "e");
        store.set_actual_output(id, "a");

        let case = store.get(id).unwrap();
        assert_eq!(case.input, "q");
        assert_eq!(case.expected_output, "e");
        assert_eq!(case.actual_output, "a");
    }

    #[test]
    fn test_record_scores() {
        let mut store = TestCaseStore::new();
        let metrics = CaseMetrics::new(0.9, 0.8, 0.7, 0.6);
        assert!(store.record_scores(CaseId::new(1), "Paris", metrics));
        assert!(!store.record_scores(CaseId::new(2), "Rome", metrics));

        let case = store.get(CaseId::new(1)).unwrap();
        assert_eq!(case.actual_output, "Paris");
        assert_eq!(case.metrics, metrics);
    }

    #[test]
    fn test_results_snapshot() {
        let mut store = TestCaseStore::new();
        let snapshot = EvaluationResults {
            avg_relevance: 0.5,
            ..Default::default()
        };
        store.set_results(snapshot);
        assert_eq!(store.results(), Some(&snapshot));

        store.clear_results();
        assert!(store.results().is_none());
    }

    #[test]
    fn test_refresh_results() {
        let mut store = TestCaseStore::empty();
        let a = store.create();
        let b = store.create();
        store.record_scores(a, "", CaseMetrics::new(1.0, 1.0, 1.0, 1.0));
        store.record_scores(b, "", CaseMetrics::new(0.0, 0.5, 0.0, 0.5));

        let results = *store.refresh_results().unwrap();
        assert_eq!(results.avg_relevance, 0.5);
        assert_eq!(results.avg_coherence, 0.75);

        store.remove(a);
        store.remove(b);
        assert!(store.refresh_results().is_none());
        assert!(store.results().is_none());
    }
}
