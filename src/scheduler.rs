use std::fmt;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub i64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Work a timer performs when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    FadeNotice(NodeId),
    RemoveNotice(NodeId),
    SearchSuggest { query: String },
}

impl TimerTask {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::FadeNotice(_) => "fade_notice",
            Self::RemoveNotice(_) => "remove_notice",
            Self::SearchSuggest { .. } => "search_suggest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
    pub task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
}

/// Timer capability the widgets schedule against.
///
/// Implementations own the clock; the page advances it and drains due tasks
/// through [`Scheduler::take_next`].
pub trait Scheduler: fmt::Debug {
    fn now_ms(&self) -> i64;

    /// Moves the clock forward. Requests to move it backwards are ignored.
    fn advance_clock_to(&mut self, now_ms: i64);

    fn schedule(&mut self, delay_ms: i64, task: TimerTask) -> TimerId;

    /// Cancels a pending task. Returns whether a task was removed.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Removes and returns the earliest task due at or before `due_limit`
    /// (any task when `None`). Ties run in scheduling order.
    fn take_next(&mut self, due_limit: Option<i64>) -> Option<ScheduledTask>;

    fn pending(&self) -> Vec<PendingTimer>;

    fn clear_all(&mut self) -> usize;
}

#[derive(Debug)]
pub struct TimerQueue {
    task_queue: Vec<ScheduledTask>,
    now_ms: i64,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_timer_id(&mut self) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        TimerId(id)
    }

    fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }
}

impl Scheduler for TimerQueue {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn advance_clock_to(&mut self, now_ms: i64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn schedule(&mut self, delay_ms: i64, task: TimerTask) -> TimerId {
        let due_at = self.now_ms.saturating_add(delay_ms.max(0));
        let id = self.allocate_timer_id();
        let order = self.allocate_task_order();
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            task,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        self.task_queue.len() != before
    }

    fn take_next(&mut self, due_limit: Option<i64>) -> Option<ScheduledTask> {
        let idx = self.next_task_index(due_limit)?;
        Some(self.task_queue.remove(idx))
    }

    fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    fn clear_all(&mut self) -> usize {
        let cleared = self.task_queue.len();
        self.task_queue.clear();
        cleared
    }
}
