use super::*;
use crate::request::{self, FetchRequest, Method};
use serde_json::Value;

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > max_entries {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    /// Queues the answer for the next confirmation prompt.
    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    /// Answer used once the queue is empty. Defaults to `true`.
    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    /// Messages shown in confirmation prompts, oldest first.
    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn take_default_actions(&mut self) -> Vec<DefaultAction> {
        std::mem::take(&mut self.platform_mocks.default_actions)
    }

    /// Queries the search field delivered after its debounce window.
    pub fn take_search_queries(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.search_queries)
    }

    pub fn set_fetch_mock(&mut self, url: &str, body: &str) {
        self.fetch.set_mock(url, body);
    }

    pub fn clear_fetch_mocks(&mut self) {
        self.fetch.clear_mocks();
    }

    pub fn take_fetch_calls(&mut self) -> Vec<FetchRequest> {
        self.fetch.take_calls()
    }

    /// Issues a JSON request through the page's transport. Failures are
    /// logged and yield `None`.
    pub fn make_request(&mut self, url: &str, method: Method, data: Option<&Value>) -> Option<Value> {
        request::make_request(&mut self.fetch, url, method, data)
    }

    /// Delivers viewport intersection changes to the lazy image loader and
    /// returns the images whose source was promoted.
    pub fn report_intersections(&mut self, entries: &[IntersectionEntry]) -> Result<Vec<NodeId>> {
        let Some(loader) = &self.lazy_images else {
            return Ok(Vec::new());
        };
        let loaded = loader.handle(&mut self.dom, self.observer.as_mut(), entries)?;
        for image in &loaded {
            let line = format!("[observer] loaded {}", self.trace_node_label(*image));
            self.trace_state.push(line);
        }
        Ok(loaded)
    }

    /// Reports the first element matching `selector` as entering the
    /// viewport.
    pub fn scroll_into_view(&mut self, selector: &str) -> Result<Vec<NodeId>> {
        let target = self.select_one(selector)?;
        self.report_intersections(&[IntersectionEntry::entering(target)])
    }

    pub fn scroll_out_of_view(&mut self, selector: &str) -> Result<Vec<NodeId>> {
        let target = self.select_one(selector)?;
        self.report_intersections(&[IntersectionEntry::leaving(target)])
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.enabled && self.trace_state.timers {
            self.trace_state.push(line);
        }
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.index()))
    }
}
