//! The triage queue, the stateful heart of the engine.
//!
//! A mapping from patient id to [`QueueEntry`] kept in priority order:
//! higher priority score first, ties broken by earlier submission (the
//! FIFO fairness guarantee beneath the priority ordering). Positions are
//! always a contiguous 1..=N permutation; every mutation either fully
//! succeeds, renumbering included, or fails with no state change.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use triage_core::{AssessmentResult, QueueEntry, TriageError};

use crate::scorer::{CalibratedParams, PriorityScorer};

#[derive(Debug, Default)]
pub struct TriageQueue {
    /// Iteration order is position order; key lookups stay O(1).
    entries: IndexMap<String, QueueEntry>,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, patient_id: &str) -> Option<&QueueEntry> {
        self.entries.get(patient_id)
    }

    /// Insert a scored assessment. Fails on a duplicate patient id with
    /// the queue untouched; otherwise positions and wait estimates are
    /// reassigned for every entry whose rank changed.
    pub fn insert(
        &mut self,
        patient_id: String,
        assessment: AssessmentResult,
        scorer: &PriorityScorer,
        params: &CalibratedParams,
    ) -> Result<QueueEntry, TriageError> {
        if self.entries.contains_key(&patient_id) {
            return Err(TriageError::DuplicatePatient(patient_id));
        }

        self.entries.insert(
            patient_id.clone(),
            QueueEntry { patient_id: patient_id.clone(), assessment, queue_position: 0 },
        );
        self.reorder(scorer, params);

        Ok(self.entries[&patient_id].clone())
    }

    /// Position-1 entry without removal.
    pub fn peek_next(&self) -> Result<QueueEntry, TriageError> {
        self.entries
            .get_index(0)
            .map(|(_, e)| e.clone())
            .ok_or(TriageError::EmptyQueue)
    }

    /// Remove and return the position-1 entry, renumbering the remainder
    /// contiguously from 1.
    pub fn pop_next(
        &mut self,
        scorer: &PriorityScorer,
        params: &CalibratedParams,
    ) -> Result<QueueEntry, TriageError> {
        let (_, entry) = self.entries.shift_remove_index(0).ok_or(TriageError::EmptyQueue)?;
        self.renumber(scorer, params);
        Ok(entry)
    }

    /// Re-score every entry against elapsed wait, re-sort, and reassign
    /// positions. Idempotent for a fixed `now` and fixed params.
    pub fn recompute_all(
        &mut self,
        scorer: &PriorityScorer,
        params: &CalibratedParams,
        now: DateTime<Utc>,
    ) {
        for entry in self.entries.values_mut() {
            let waited = (now - entry.assessment.timestamp).num_minutes();
            let outcome = scorer.score(
                entry.assessment.risk_level,
                entry.assessment.confidence_score,
                entry.assessment.vitals.age,
                waited,
                entry.queue_position,
                params,
            );
            entry.assessment.priority_score = outcome.priority_score;
        }
        self.reorder(scorer, params);
    }

    /// Remove all entries unconditionally. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Position-ascending snapshot.
    pub fn list(&self) -> Vec<QueueEntry> {
        self.entries.values().cloned().collect()
    }

    fn reorder(&mut self, scorer: &PriorityScorer, params: &CalibratedParams) {
        // Stable sort: equal (score, timestamp) pairs keep insertion order.
        self.entries.sort_by(|_, a, _, b| {
            b.assessment
                .priority_score
                .partial_cmp(&a.assessment.priority_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.assessment.timestamp.cmp(&b.assessment.timestamp))
        });
        self.renumber(scorer, params);
    }

    fn renumber(&mut self, scorer: &PriorityScorer, params: &CalibratedParams) {
        for (i, entry) in self.entries.values_mut().enumerate() {
            entry.queue_position = i + 1;
            entry.assessment.estimated_wait_time =
                scorer.estimate_wait(entry.assessment.risk_level, i + 1, params);
        }
    }
}
