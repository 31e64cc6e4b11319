use std::collections::VecDeque;

use crate::page::DefaultAction;

#[derive(Debug)]
pub(crate) struct PlatformMockState {
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) default_actions: Vec<DefaultAction>,
    pub(crate) search_queries: Vec<String>,
}

impl Default for PlatformMockState {
    fn default() -> Self {
        Self {
            confirm_responses: VecDeque::new(),
            default_confirm_response: true,
            confirm_messages: Vec::new(),
            default_actions: Vec::new(),
            search_queries: Vec::new(),
        }
    }
}

impl PlatformMockState {
    /// Answers a confirmation prompt from the queued responses, falling back
    /// to the default once the queue is empty.
    pub(crate) fn answer_confirm(&mut self, message: &str) -> bool {
        self.confirm_messages.push(message.to_string());
        self.confirm_responses
            .pop_front()
            .unwrap_or(self.default_confirm_response)
    }
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

impl TraceState {
    pub(crate) fn push(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        tracing::trace!(target: "page_widgets::trace", "{line}");
        while self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }
}
