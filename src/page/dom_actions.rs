use super::*;
use crate::events::{EventOutcome, EventState};

impl Page {
    /// Clicks the first element matching `selector`, then performs the
    /// default action (navigation or form submission) unless a listener
    /// prevented it. Disabled controls ignore the click.
    pub fn click(&mut self, selector: &str) -> Result<EventOutcome> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(EventOutcome {
                kind: EventKind::Click,
                default_prevented: true,
                propagation_stopped: false,
            });
        }

        let event = self.dispatch_event(target, EventKind::Click)?;
        let outcome = EventOutcome::from(&event);
        if event.default_prevented {
            return Ok(outcome);
        }

        if let Some(anchor) = self.dom.closest(target, "a[href]")? {
            let href = self.dom.attr(anchor, "href").unwrap_or_default();
            self.record_default_action(DefaultAction::Navigate { href });
        } else if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                let submit = self.dispatch_event(form, EventKind::Submit)?;
                if !submit.default_prevented {
                    let form_action = self.dom.attr(form, "action");
                    self.record_default_action(DefaultAction::Submit { form_action });
                }
            }
        }

        Ok(outcome)
    }

    /// Moves the pointer onto the first element matching `selector`,
    /// firing `mouseleave` on elements it exits (innermost first) and
    /// `mouseenter` on elements it enters (outermost first).
    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.move_pointer_to(Some(target))
    }

    /// Moves the pointer out of the first element matching `selector` onto
    /// its parent. Has no effect when the pointer is not over that element.
    pub fn leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.hover_path.contains(&target) {
            return Ok(());
        }
        let parent = self
            .dom
            .parent(target)
            .filter(|parent| *parent != self.dom.root());
        self.move_pointer_to(parent)
    }

    /// Moves the pointer off the page entirely.
    pub fn pointer_out(&mut self) -> Result<()> {
        self.move_pointer_to(None)
    }

    fn move_pointer_to(&mut self, target: Option<NodeId>) -> Result<()> {
        let mut next_path = Vec::new();
        let mut cursor = target;
        while let Some(node) = cursor {
            if node == self.dom.root() {
                break;
            }
            next_path.push(node);
            cursor = self.dom.parent(node);
        }
        next_path.reverse();

        let previous = std::mem::replace(&mut self.hover_path, next_path.clone());
        for node in previous.iter().rev() {
            if !next_path.contains(node) {
                self.dispatch_event(*node, EventKind::MouseLeave)?;
            }
        }
        for node in &next_path {
            if !previous.contains(node) {
                self.dispatch_event(*node, EventKind::MouseEnter)?;
            }
        }
        Ok(())
    }

    /// Replaces the value of a text control and fires one `input` event.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.editable_target(selector)?;
        let Some(target) = target else {
            return Ok(());
        };
        self.dom.set_value(target, text)?;
        self.dispatch_event(target, EventKind::Input)?;
        Ok(())
    }

    /// Types `text` one character at a time, firing `input` after each, as a
    /// user would without any pause between keystrokes.
    pub fn type_keys(&mut self, selector: &str, text: &str) -> Result<()> {
        let Some(target) = self.editable_target(selector)? else {
            return Ok(());
        };
        let mut value = self.dom.value(target)?;
        for ch in text.chars() {
            value.push(ch);
            self.dom.set_value(target, &value)?;
            self.dispatch_event(target, EventKind::Input)?;
        }
        Ok(())
    }

    fn editable_target(&self, selector: &str) -> Result<Option<NodeId>> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(None);
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        Ok(Some(target))
    }

    /// Dispatches a bare event with no default action.
    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<EventOutcome> {
        let target = self.select_one(selector)?;
        let kind = EventKind::parse(event).ok_or_else(|| Error::TypeMismatch {
            selector: selector.to_string(),
            expected: "click|input|submit|mouseenter|mouseleave".into(),
            actual: event.to_string(),
        })?;
        let event = self.dispatch_event(target, kind)?;
        Ok(EventOutcome::from(&event))
    }

    pub(crate) fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Result<EventState> {
        let mut event = EventState::new(kind, target);

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }
        path.reverse();

        // Capture phase.
        for node in &path[..path.len() - 1] {
            event.current_target = *node;
            self.invoke_listeners(*node, &mut event, true)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(event);
            }
        }

        // Target phase: capture listeners first.
        event.current_target = target;
        self.invoke_listeners(target, &mut event, true)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }
        self.invoke_listeners(target, &mut event, false)?;
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return Ok(event);
        }

        if kind.bubbles() {
            for node in path[..path.len() - 1].iter().rev() {
                event.current_target = *node;
                self.invoke_listeners(*node, &mut event, false)?;
                if event.propagation_stopped {
                    self.trace_event_done(&event, "propagation_stopped");
                    return Ok(event);
                }
            }
        }

        self.trace_event_done(&event, "completed");
        Ok(event)
    }

    fn invoke_listeners(
        &mut self,
        node_id: NodeId,
        event: &mut EventState,
        capture: bool,
    ) -> Result<()> {
        for listener in self.listeners.get(node_id, event.kind, capture) {
            if self.trace_state.enabled && self.trace_state.events {
                let phase = if capture { "capture" } else { "bubble" };
                let line = format!(
                    "[event] {} target={} current={} phase={} reaction={:?}",
                    event.kind,
                    self.trace_node_label(event.target),
                    self.trace_node_label(event.current_target),
                    phase,
                    listener.reaction
                );
                self.trace_state.push(line);
            }
            self.run_reaction(listener.reaction, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    fn run_reaction(&mut self, reaction: Reaction, event: &mut EventState) -> Result<()> {
        match reaction {
            Reaction::RatingPreview { widget, value } => {
                if let Some(rating) = self.ratings.get(widget) {
                    rating.preview(&mut self.dom, value)?;
                }
            }
            Reaction::RatingCommit { widget, value } => {
                if let Some(rating) = self.ratings.get_mut(widget) {
                    rating.commit(&mut self.dom, value)?;
                }
            }
            Reaction::RatingRestore { widget } => {
                if let Some(rating) = self.ratings.get(widget) {
                    rating.restore(&mut self.dom)?;
                }
            }
            Reaction::CarouselStep { widget, delta } => {
                if let Some(carousel) = self.carousels.get_mut(widget) {
                    carousel.step(&mut self.dom, delta)?;
                }
            }
            Reaction::ConfirmGate { guard } => {
                let Some(guard) = self.guards.get(guard) else {
                    return Ok(());
                };
                let mocks = &mut self.platform_mocks;
                if !guard.allows(&self.dom, |message| mocks.answer_confirm(message)) {
                    event.prevent_default();
                    event.stop_immediate_propagation();
                }
            }
            Reaction::SearchInput => {
                let query = self.dom.value(event.target)?;
                let Some(search) = self.search.as_mut() else {
                    return Ok(());
                };
                let scheduled = search.on_input(self.scheduler.as_mut(), &query);
                let line = match scheduled {
                    Some(id) => format!("[timer] schedule search_suggest id={id} query={query:?}"),
                    None => format!("[timer] search input below minimum query={query:?}"),
                };
                self.trace_timer_line(line);
            }
        }
        Ok(())
    }

    fn record_default_action(&mut self, action: DefaultAction) {
        tracing::debug!(?action, "default action performed");
        self.platform_mocks.default_actions.push(action);
    }

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !(self.trace_state.enabled && self.trace_state.events) {
            return;
        }
        let line = format!(
            "[event] done {} target={} outcome={} default_prevented={}",
            event.kind,
            self.trace_node_label(event.target),
            outcome,
            event.default_prevented
        );
        self.trace_state.push(line);
    }
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(tag) = dom.tag_name(node_id) else {
        return false;
    };
    let kind = dom.attr(node_id, "type");
    match tag {
        "button" => kind.is_none_or(|kind| kind.eq_ignore_ascii_case("submit")),
        "input" => kind.is_some_and(|kind| {
            kind.eq_ignore_ascii_case("submit") || kind.eq_ignore_ascii_case("image")
        }),
        _ => false,
    }
}
