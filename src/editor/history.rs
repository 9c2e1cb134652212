//! Snapshot-based undo/redo over the whole project configuration.
//!
//! Every observed change pushes the *previous* project onto the past stack
//! and clears the future stack. Interactive gestures pause the history so a
//! drag that touches the project on every pointer move yields one entry:
//!
//! ```ignore
//! let pause = history.pause();
//! // ... many record() calls, none of them create entries ...
//! pause.resume();
//! history.settle(&current); // one entry for the whole gesture
//! ```
//!
//! Pauses are reference counted. The state seen before the first paused
//! change is kept aside and committed once the count drops back to zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::project::ProjectConfiguration;

/// Undo/redo stacks for one editing session.
pub struct ProjectHistory {
    past: Vec<ProjectConfiguration>,
    /// Undone states; the last element is the next one to redo.
    future: Vec<ProjectConfiguration>,
    limit: usize,
    pause_count: Arc<AtomicUsize>,
    /// Project as it was before the first change made while paused.
    pause_anchor: Option<ProjectConfiguration>,
}

/// Outstanding history pause. Resuming or dropping it releases the pause
/// exactly once.
#[must_use = "dropping the pause resumes history immediately"]
pub struct HistoryPause {
    count: Arc<AtomicUsize>,
    released: bool,
}

impl HistoryPause {
    /// Release this pause.
    pub fn resume(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let _ = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}

impl Drop for HistoryPause {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for HistoryPause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryPause")
            .field("released", &self.released)
            .finish()
    }
}

impl ProjectHistory {
    /// Create an empty history keeping at most `limit` undo entries.
    pub fn new(limit: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: limit.max(1),
            pause_count: Arc::new(AtomicUsize::new(0)),
            pause_anchor: None,
        }
    }

    /// Number of outstanding pauses.
    pub fn pause_count(&self) -> usize {
        self.pause_count.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.pause_count() > 0
    }

    /// Suppress snapshotting until the returned guard is released.
    pub fn pause(&self) -> HistoryPause {
        let count = self.pause_count.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("[HISTORY] Paused (count={})", count);
        HistoryPause {
            count: Arc::clone(&self.pause_count),
            released: false,
        }
    }

    /// Observe a project transition. Returns true if a history entry was
    /// created.
    pub fn record(&mut self, prev: &ProjectConfiguration, next: &ProjectConfiguration) -> bool {
        if prev == next {
            return false;
        }

        if self.is_paused() {
            if self.pause_anchor.is_none() {
                self.pause_anchor = Some(prev.clone());
            }
            return false;
        }

        // A pause released by drop since the last call still has its
        // change pending.
        self.settle(prev);

        self.push_past(prev.clone());
        self.future.clear();
        log::debug!("[HISTORY] Entry pushed (undo depth={})", self.past.len());
        true
    }

    /// Commit the change made during a finished pause, if any. Returns true
    /// if an entry was created.
    pub fn settle(&mut self, current: &ProjectConfiguration) -> bool {
        if self.is_paused() {
            return false;
        }
        self.commit_pending(current)
    }

    /// Whether a paused change is waiting to be committed.
    pub fn has_pending_change(&self, current: &ProjectConfiguration) -> bool {
        self.pause_anchor.as_ref().map_or(false, |anchor| anchor != current)
    }

    fn commit_pending(&mut self, current: &ProjectConfiguration) -> bool {
        let Some(anchor) = self.pause_anchor.take() else {
            return false;
        };
        if &anchor == current {
            log::debug!("[HISTORY] Paused change reverted, nothing to commit");
            return false;
        }
        self.push_past(anchor);
        self.future.clear();
        log::debug!("[HISTORY] Paused change committed (undo depth={})", self.past.len());
        true
    }

    fn push_past(&mut self, project: ProjectConfiguration) {
        self.past.push(project);
        if self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(..excess);
        }
    }

    /// Step back. Returns the project to apply, or None if there is nothing
    /// to undo.
    pub fn undo(&mut self, current: &ProjectConfiguration) -> Option<ProjectConfiguration> {
        if self.pause_anchor.is_some() {
            if self.is_paused() {
                log::warn!("[HISTORY] Committing stuck paused change before undo");
            }
            self.commit_pending(current);
        }

        let previous = self.past.pop()?;
        self.future.push(current.clone());
        log::debug!(
            "[HISTORY] Undo (undo depth={}, redo depth={})",
            self.past.len(),
            self.future.len()
        );
        Some(previous)
    }

    /// Step forward again. Returns the project to apply, or None if there is
    /// nothing to redo.
    pub fn redo(&mut self, current: &ProjectConfiguration) -> Option<ProjectConfiguration> {
        if self.pause_anchor.is_some() {
            if self.is_paused() {
                log::warn!("[HISTORY] Committing stuck paused change before redo");
            }
            // A committed change starts a new branch, which empties the future.
            self.commit_pending(current);
        }

        let next = self.future.pop()?;
        self.push_past(current.clone());
        log::debug!(
            "[HISTORY] Redo (undo depth={}, redo depth={})",
            self.past.len(),
            self.future.len()
        );
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Drop both stacks and any pending paused change.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pause_anchor = None;
        log::debug!("[HISTORY] Cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(duration: f64) -> ProjectConfiguration {
        ProjectConfiguration::for_duration(duration)
    }

    /// Apply a change the way the session does: record, then replace.
    fn change(history: &mut ProjectHistory, current: &mut ProjectConfiguration, next: ProjectConfiguration) {
        history.record(current, &next);
        *current = next;
    }

    #[test]
    fn test_undo_redo_sequence() {
        let (a, b, c) = (project(1.0), project(2.0), project(3.0));
        let mut history = ProjectHistory::new(100);
        let mut current = a.clone();

        change(&mut history, &mut current, b.clone());
        change(&mut history, &mut current, c.clone());

        current = history.undo(&current).unwrap();
        assert_eq!(current, b);
        current = history.undo(&current).unwrap();
        assert_eq!(current, a);
        assert!(history.undo(&current).is_none());

        current = history.redo(&current).unwrap();
        assert_eq!(current, b);
        current = history.redo(&current).unwrap();
        assert_eq!(current, c);
        assert!(history.redo(&current).is_none());
    }

    #[test]
    fn test_n_undos_return_to_start() {
        let mut history = ProjectHistory::new(100);
        let initial = project(0.5);
        let mut current = initial.clone();
        for i in 1..=12 {
            change(&mut history, &mut current, project(i as f64));
        }
        let last = current.clone();

        for _ in 0..12 {
            current = history.undo(&current).unwrap();
        }
        assert_eq!(current, initial);

        for _ in 0..12 {
            current = history.redo(&current).unwrap();
        }
        assert_eq!(current, last);
    }

    #[test]
    fn test_unchanged_project_not_recorded() {
        let mut history = ProjectHistory::new(100);
        let a = project(1.0);
        assert!(!history.record(&a, &a.clone()));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_new_change_clears_future() {
        let mut history = ProjectHistory::new(100);
        let mut current = project(1.0);
        change(&mut history, &mut current, project(2.0));
        current = history.undo(&current).unwrap();
        assert!(history.can_redo());

        change(&mut history, &mut current, project(5.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = ProjectHistory::new(3);
        let mut current = project(0.0);
        for i in 1..=5 {
            change(&mut history, &mut current, project(i as f64));
        }
        assert_eq!(history.undo_depth(), 3);

        for _ in 0..3 {
            current = history.undo(&current).unwrap();
        }
        assert_eq!(current, project(2.0));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_pause_collapses_changes() {
        let mut history = ProjectHistory::new(100);
        let start = project(1.0);
        let mut current = start.clone();

        let pause = history.pause();
        for i in 2..10 {
            change(&mut history, &mut current, project(i as f64));
        }
        assert_eq!(history.undo_depth(), 0);
        pause.resume();
        assert!(history.settle(&current));
        assert_eq!(history.undo_depth(), 1);

        current = history.undo(&current).unwrap();
        assert_eq!(current, start);
    }

    #[test]
    fn test_nested_pauses() {
        let mut history = ProjectHistory::new(100);
        let mut current = project(1.0);

        let outer = history.pause();
        let inner = history.pause();
        assert_eq!(history.pause_count(), 2);
        change(&mut history, &mut current, project(2.0));

        inner.resume();
        assert!(!history.settle(&current));
        change(&mut history, &mut current, project(3.0));

        drop(outer);
        assert_eq!(history.pause_count(), 0);
        assert!(history.settle(&current));
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_pause_reverted_creates_no_entry() {
        let mut history = ProjectHistory::new(100);
        let start = project(1.0);
        let mut current = start.clone();

        let pause = history.pause();
        change(&mut history, &mut current, project(2.0));
        change(&mut history, &mut current, start.clone());
        pause.resume();

        assert!(!history.settle(&current));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_dropped_pause_committed_on_next_change() {
        let mut history = ProjectHistory::new(100);
        let mut current = project(1.0);

        {
            let _pause = history.pause();
            change(&mut history, &mut current, project(2.0));
        }
        change(&mut history, &mut current, project(3.0));

        assert_eq!(history.undo_depth(), 2);
        current = history.undo(&current).unwrap();
        assert_eq!(current, project(2.0));
        current = history.undo(&current).unwrap();
        assert_eq!(current, project(1.0));
    }

    #[test]
    fn test_undo_while_paused_commits_pending() {
        let mut history = ProjectHistory::new(100);
        let mut current = project(1.0);

        let _pause = history.pause();
        change(&mut history, &mut current, project(2.0));
        assert!(history.has_pending_change(&current));

        current = history.undo(&current).unwrap();
        assert_eq!(current, project(1.0));
        assert!(history.can_redo());
    }

    #[test]
    fn test_clear() {
        let mut history = ProjectHistory::new(100);
        let mut current = project(1.0);
        change(&mut history, &mut current, project(2.0));
        current = history.undo(&current).unwrap();
        change(&mut history, &mut current, project(4.0));
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
