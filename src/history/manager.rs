//! Linear undo/redo stack over transform snapshots.

use super::snapshot::TransformSnapshot;

/// Result of loading an externally supplied history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// Payload satisfied the stack invariants and was taken as-is.
    Clean,
    /// Index was out of range and has been clamped.
    Clamped { requested: i64, applied: isize },
}

impl RehydrateOutcome {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, RehydrateOutcome::Clean)
    }
}

/// Edit history for the active model.
///
/// Either empty (no entries, index -1) or populated with `index` pointing at
/// the pose currently applied to the model. Only [`commit`](Self::commit)
/// appends entries; undo and redo move the cursor and hand back the pose the
/// host must apply.
#[derive(Clone, Debug, Default)]
pub struct TransformHistory {
    entries: Vec<TransformSnapshot>,
    cursor: Option<usize>,
    model_attached: bool,
}

impl TransformHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries.
    pub fn reset(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("history reset ({} entries dropped)", self.entries.len());
        }
        self.entries.clear();
        self.cursor = None;
    }

    /// Mark whether a model is present. Detaching also clears the history.
    pub fn set_model_attached(&mut self, attached: bool) {
        self.model_attached = attached;
        if !attached {
            self.reset();
        }
    }

    pub fn model_attached(&self) -> bool {
        self.model_attached
    }

    /// Restart the stack from the model's current pose.
    ///
    /// Returns `true` when the history was seeded. With no model (or no pose
    /// supplied) the history ends up empty.
    pub fn begin_editing(&mut self, current: Option<TransformSnapshot>) -> bool {
        self.reset();
        match current {
            Some(pose) if self.model_attached => {
                self.entries.push(pose);
                self.cursor = Some(0);
                log::debug!("history seeded for edit session");
                true
            }
            _ => false,
        }
    }

    /// Record a completed edit, discarding anything redoable.
    ///
    /// No-op without a model. On an empty stack the snapshot becomes the first entry.
    pub fn commit(&mut self, snapshot: TransformSnapshot) -> bool {
        if !self.model_attached {
            log::debug!("commit ignored: no model");
            return false;
        }
        let keep = self.cursor.map_or(0, |i| i + 1);
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.cursor = Some(self.entries.len() - 1);
        if discarded > 0 {
            log::debug!("commit discarded {} redo entries", discarded);
        }
        true
    }

    pub fn undo(&mut self) -> Option<TransformSnapshot> {
        if !self.can_undo() {
            return None;
        }
        let i = self.cursor? - 1;
        self.cursor = Some(i);
        Some(self.entries[i])
    }

    pub fn redo(&mut self) -> Option<TransformSnapshot> {
        if !self.can_redo() {
            return None;
        }
        let i = self.cursor? + 1;
        self.cursor = Some(i);
        Some(self.entries[i])
    }

    pub fn can_undo(&self) -> bool {
        self.model_attached && matches!(self.cursor, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.model_attached && matches!(self.cursor, Some(i) if i + 1 < self.entries.len())
    }

    /// Replace the stack from persisted data, clamping a bad index into range.
    pub fn rehydrate(&mut self, entries: Vec<TransformSnapshot>, index: i64) -> RehydrateOutcome {
        let cursor = if entries.is_empty() {
            None
        } else {
            Some(index.clamp(0, entries.len() as i64 - 1) as usize)
        };
        self.entries = entries;
        self.cursor = cursor;

        let applied = self.index();
        if applied as i64 == index {
            RehydrateOutcome::Clean
        } else {
            log::warn!(
                "history index {} out of range for {} entries, using {}",
                index,
                self.entries.len(),
                applied
            );
            RehydrateOutcome::Clamped { requested: index, applied }
        }
    }

    /// Cursor position, -1 when empty.
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |i| i as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TransformSnapshot] {
        &self.entries
    }

    /// Pose at the cursor.
    pub fn current(&self) -> Option<&TransformSnapshot> {
        self.cursor.and_then(|i| self.entries.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(x: f64) -> TransformSnapshot {
        TransformSnapshot::IDENTITY.translated([x, 0.0, 0.0])
    }

    fn attached() -> TransformHistory {
        let mut h = TransformHistory::new();
        h.set_model_attached(true);
        h
    }

    #[test]
    fn test_starts_empty() {
        let h = TransformHistory::new();
        assert_eq!(h.len(), 0);
        assert_eq!(h.index(), -1);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_branch_discard_sequence() {
        let mut h = attached();
        assert!(h.begin_editing(Some(pose(0.0))));
        assert_eq!((h.len(), h.index()), (1, 0));

        for x in 1..=3 {
            assert!(h.commit(pose(x as f64)));
        }
        assert_eq!((h.len(), h.index()), (4, 3));

        assert_eq!(h.undo(), Some(pose(2.0)));
        assert_eq!(h.index(), 2);
        assert!(h.can_redo());

        // The old fourth entry is replaced, not kept behind the cursor.
        h.commit(pose(9.0));
        assert_eq!((h.len(), h.index()), (4, 3));
        assert_eq!(h.entries()[3], pose(9.0));
        assert!(!h.can_redo());
    }

    #[test]
    fn test_commit_after_undo_truncates() {
        let mut h = attached();
        h.begin_editing(Some(pose(0.0)));
        h.commit(pose(1.0));
        h.commit(pose(2.0));
        h.commit(pose(3.0));
        h.undo();
        h.undo();
        assert_eq!(h.index(), 1);

        h.commit(pose(7.0));
        assert_eq!((h.len(), h.index()), (3, 2));
        assert!(!h.can_redo());
        assert_eq!(h.redo(), None);
        assert_eq!(h.current(), Some(&pose(7.0)));
        assert_eq!(h.entries()[1], pose(1.0));
    }

    #[test]
    fn test_begin_editing_without_model() {
        let mut h = TransformHistory::new();
        assert!(!h.begin_editing(Some(pose(0.0))));
        assert!(h.is_empty());
        assert_eq!(h.index(), -1);
    }

    #[test]
    fn test_begin_editing_restarts_stack() {
        let mut h = attached();
        h.begin_editing(Some(pose(0.0)));
        h.commit(pose(1.0));
        h.begin_editing(Some(pose(5.0)));
        assert_eq!((h.len(), h.index()), (1, 0));
        assert_eq!(h.current(), Some(&pose(5.0)));
    }

    #[test]
    fn test_commit_without_model_is_noop() {
        let mut h = TransformHistory::new();
        h.rehydrate(vec![pose(0.0), pose(1.0)], 1);
        assert!(!h.commit(pose(2.0)));
        assert_eq!((h.len(), h.index()), (2, 1));
    }

    #[test]
    fn test_undo_redo_boundaries() {
        let mut h = attached();
        h.begin_editing(Some(pose(0.0)));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
        assert_eq!(h.index(), 0);

        h.commit(pose(1.0));
        assert_eq!(h.undo(), Some(pose(0.0)));
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), Some(pose(1.0)));
        assert_eq!(h.redo(), None);
        assert_eq!(h.index(), 1);
    }

    #[test]
    fn test_undo_requires_model() {
        let mut h = TransformHistory::new();
        h.rehydrate(vec![pose(0.0), pose(1.0)], 1);
        assert!(!h.can_undo());
        assert_eq!(h.undo(), None);
        h.set_model_attached(true);
        assert_eq!(h.undo(), Some(pose(0.0)));
    }

    #[test]
    fn test_detach_clears() {
        let mut h = attached();
        h.begin_editing(Some(pose(0.0)));
        h.commit(pose(1.0));
        h.set_model_attached(false);
        assert!(h.is_empty());
        assert_eq!(h.index(), -1);
    }

    #[test]
    fn test_commit_on_empty_stack() {
        let mut h = attached();
        assert!(h.commit(pose(1.0)));
        assert_eq!((h.len(), h.index()), (1, 0));
    }

    #[test]
    fn test_rehydrate_clean() {
        let mut h = attached();
        let outcome = h.rehydrate(vec![pose(0.0), pose(1.0), pose(2.0)], 1);
        assert_eq!(outcome, RehydrateOutcome::Clean);
        assert_eq!(h.index(), 1);
        assert!(h.can_undo());
        assert!(h.can_redo());

        assert_eq!(h.rehydrate(Vec::new(), -1), RehydrateOutcome::Clean);
        assert_eq!(h.index(), -1);
    }

    #[test]
    fn test_rehydrate_clamps_index() {
        let mut h = attached();
        let outcome = h.rehydrate(vec![pose(0.0), pose(1.0)], 7);
        assert_eq!(outcome, RehydrateOutcome::Clamped { requested: 7, applied: 1 });
        assert!(outcome.is_degraded());
        assert_eq!(h.current(), Some(&pose(1.0)));

        let outcome = h.rehydrate(vec![pose(0.0)], -3);
        assert_eq!(outcome, RehydrateOutcome::Clamped { requested: -3, applied: 0 });
    }

    #[test]
    fn test_rehydrate_empty_with_bad_index() {
        let mut h = attached();
        let outcome = h.rehydrate(Vec::new(), 2);
        assert_eq!(outcome, RehydrateOutcome::Clamped { requested: 2, applied: -1 });
        assert!(h.is_empty());
        assert_eq!(h.index(), -1);
    }
}
