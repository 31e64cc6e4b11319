use std::collections::HashMap;
use std::fmt;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Submit,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Submit => "submit",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "input" => Some(Self::Input),
            "submit" => Some(Self::Submit),
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a listener does when it runs. Indices point into the page's widget
/// lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reaction {
    RatingPreview { widget: usize, value: u32 },
    RatingCommit { widget: usize, value: u32 },
    RatingRestore { widget: usize },
    CarouselStep { widget: usize, delta: isize },
    ConfirmGate { guard: usize },
    SearchInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) reaction: Reaction,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<EventKind, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: EventKind, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: EventKind, capture: bool) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl From<&EventState> for EventOutcome {
    fn from(event: &EventState) -> Self {
        Self {
            kind: event.kind,
            default_prevented: event.default_prevented,
            propagation_stopped: event.propagation_stopped,
        }
    }
}
