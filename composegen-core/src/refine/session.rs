//! Session-owned iteration history
//!
//! The front-end session keeps one append-only list of iteration
//! snapshots. Records are never mutated after append; refinement adds a new
//! record and leaves the prior snapshot intact. Reset is the only way to
//! clear the list.

use super::Refinement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot in the refinement history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub sequence: u32,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub code: String,
    pub accessibility: String,
    pub design: String,
    pub feedback: String,
}

/// Append-only history of generation and refinement iterations
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IterationHistory {
    records: Vec<IterationRecord>,
}

impl IterationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of an initial generation.
    pub fn record_generation(
        &mut self,
        description: &str,
        code: &str,
        accessibility: &str,
        design: &str,
    ) -> &IterationRecord {
        let record = IterationRecord {
            sequence: self.next_sequence(),
            timestamp: Utc::now(),
            description: description.to_string(),
            code: code.to_string(),
            accessibility: accessibility.to_string(),
            design: design.to_string(),
            feedback: String::new(),
        };
        self.records.push(record);
        self.records.last().expect("record just pushed")
    }

    /// Record the result of a refinement, formatting the structured notes
    /// into the review texts shown to the user.
    pub fn record_refinement(
        &mut self,
        refinement: &Refinement,
        feedback: &str,
    ) -> &IterationRecord {
        let description = self
            .records
            .last()
            .map(|record| record.description.clone())
            .unwrap_or_else(|| "Refinement".to_string());

        let record = IterationRecord {
            sequence: self.next_sequence(),
            timestamp: Utc::now(),
            description,
            code: refinement.refined_code.clone(),
            accessibility: format_notes("Improvements made:", &refinement.accessibility_notes),
            design: format!(
                "{}\n\n{}",
                format_notes("Improvements made:", &refinement.design_notes),
                format_notes("Changes applied:", &refinement.changes_made),
            ),
            feedback: feedback.to_string(),
        };
        self.records.push(record);
        self.records.last().expect("record just pushed")
    }

    /// All records, oldest first
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&IterationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sequence number the next appended record will get
    pub fn next_sequence(&self) -> u32 {
        self.records.iter().map(|record| record.sequence).max().unwrap_or(0) + 1
    }

    /// Clear the session history.
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

fn format_notes(heading: &str, notes: &[String]) -> String {
    let mut lines = vec![heading.to_string()];
    for note in notes {
        lines.push(format!("  \u{2022} {}", note));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_refinement() -> Refinement {
        Refinement {
            refined_code: "fun Screen() { /* bigger button */ }".to_string(),
            changes_made: vec!["Increased button size".to_string()],
            accessibility_notes: vec!["Touch target now 48dp".to_string()],
            design_notes: vec!["Button stands out more".to_string()],
        }
    }

    #[test]
    fn test_sequences_are_monotonic() {
        let mut history = IterationHistory::new();
        history.record_generation("a login screen", "fun A() {}", "ok", "ok");
        history.record_refinement(&sample_refinement(), "bigger button");
        history.record_refinement(&sample_refinement(), "even bigger");

        let sequences: Vec<u32> = history.records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_refinement_appends_without_rewriting_history() {
        let mut history = IterationHistory::new();
        history.record_generation("a login screen", "fun A() {}", "ok", "ok");
        let prior_max = history.next_sequence() - 1;

        let record = history.record_refinement(&sample_refinement(), "bigger button");
        assert_eq!(record.sequence, prior_max + 1);
        assert_ne!(record.code, "fun A() {}");

        // prior snapshot intact
        assert_eq!(history.records()[0].code, "fun A() {}");
        assert_eq!(history.records()[0].feedback, "");
    }

    #[test]
    fn test_refinement_inherits_description() {
        let mut history = IterationHistory::new();
        history.record_generation("a profile card", "fun A() {}", "ok", "ok");
        let record = history.record_refinement(&sample_refinement(), "round the avatar");
        assert_eq!(record.description, "a profile card");
    }

    #[test]
    fn test_refinement_on_empty_history_uses_placeholder() {
        let mut history = IterationHistory::new();
        let record = history.record_refinement(&sample_refinement(), "feedback");
        assert_eq!(record.description, "Refinement");
        assert_eq!(record.sequence, 1);
    }

    #[test]
    fn test_notes_are_formatted_as_bullets() {
        let mut history = IterationHistory::new();
        let record = history.record_refinement(&sample_refinement(), "feedback");
        assert!(record.accessibility.contains("\u{2022} Touch target now 48dp"));
        assert!(record.design.contains("Changes applied:"));
        assert!(record.design.contains("\u{2022} Increased button size"));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut history = IterationHistory::new();
        history.record_generation("a screen", "fun A() {}", "ok", "ok");
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.next_sequence(), 1);
    }
}
