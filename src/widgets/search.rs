use crate::Result;
use crate::config::{Markup, Timing};
use crate::dom::{Dom, NodeId};
use crate::scheduler::{Scheduler, TimerId, TimerTask};

use super::scan_scope;

/// Debounces text input on the navigation search field. At most one
/// notification is pending at any time.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    input: NodeId,
    pending: Option<TimerId>,
    debounce_ms: i64,
    min_chars: usize,
}

impl SearchDebouncer {
    /// First search field at or below `root`, if any.
    pub fn scan(dom: &Dom, root: NodeId, markup: &Markup, timing: &Timing) -> Result<Option<Self>> {
        Ok(scan_scope(dom, root, &markup.search_input)?
            .first()
            .map(|input| Self {
                input: *input,
                pending: None,
                debounce_ms: timing.search_debounce_ms,
                min_chars: timing.search_min_chars,
            }))
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Cancels the pending notification and, when `query` is long enough,
    /// schedules a new one carrying it.
    pub fn on_input(&mut self, scheduler: &mut dyn Scheduler, query: &str) -> Option<TimerId> {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        if query_length(query) < self.min_chars {
            return None;
        }
        let id = scheduler.schedule(
            self.debounce_ms,
            TimerTask::SearchSuggest {
                query: query.to_string(),
            },
        );
        self.pending = Some(id);
        Some(id)
    }

    /// Called when timer `id` fired.
    pub fn settle(&mut self, id: TimerId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

/// Length in UTF-16 code units, matching browser string length.
fn query_length(query: &str) -> usize {
    query.encode_utf16().count()
}
