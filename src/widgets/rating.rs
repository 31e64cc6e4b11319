use crate::Result;
use crate::config::Markup;
use crate::dom::{Dom, NodeId};

use super::{parse_leading_int, scan_scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Star {
    node: NodeId,
    value: u32,
}

/// Star-rating input bound to one container.
///
/// `selected` only changes on commit. Previews repaint the stars without
/// touching it, and [`RatingWidget::restore`] paints `selected` again.
#[derive(Debug, Clone)]
pub struct RatingWidget {
    container: NodeId,
    stars: Vec<Star>,
    input: Option<NodeId>,
    selected: u32,
    active_class: String,
}

impl RatingWidget {
    /// Builds a widget for every rating container at or below `root`.
    /// Containers without stars are skipped.
    pub fn scan(dom: &Dom, root: NodeId, markup: &Markup) -> Result<Vec<Self>> {
        let mut widgets = Vec::new();
        for container in scan_scope(dom, root, &markup.rating_container)? {
            if let Some(widget) = Self::from_container(dom, container, markup)? {
                widgets.push(widget);
            }
        }
        Ok(widgets)
    }

    pub fn from_container(dom: &Dom, container: NodeId, markup: &Markup) -> Result<Option<Self>> {
        let stars = dom
            .query_selector_all_from(container, &markup.rating_star)?
            .into_iter()
            .enumerate()
            .map(|(idx, node)| Star {
                node,
                value: star_value(dom, node, &markup.rating_value_attr, idx),
            })
            .collect::<Vec<_>>();
        if stars.is_empty() {
            return Ok(None);
        }

        let input = match dom.query_selector_from(container, &markup.rating_input)? {
            Some(input) => Some(input),
            None => match dom.find_ancestor_by_tag(container, "form") {
                Some(form) => dom.query_selector_from(form, &markup.rating_input)?,
                None => None,
            },
        };

        let declared = dom
            .attr(container, &markup.rating_current_attr)
            .and_then(|raw| parse_leading_int(&raw))
            .or_else(|| {
                input
                    .and_then(|node| dom.value(node).ok())
                    .and_then(|raw| parse_leading_int(&raw))
            })
            .unwrap_or(0);

        let mut widget = Self {
            container,
            stars,
            input,
            selected: 0,
            active_class: markup.rating_active_class.clone(),
        };
        widget.selected = widget.clamp(declared);
        Ok(Some(widget))
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn input(&self) -> Option<NodeId> {
        self.input
    }

    pub fn selected(&self) -> u32 {
        self.selected
    }

    pub fn star_nodes(&self) -> Vec<NodeId> {
        self.stars.iter().map(|star| star.node).collect()
    }

    pub fn star_values(&self) -> Vec<u32> {
        self.stars.iter().map(|star| star.value).collect()
    }

    pub fn max_value(&self) -> u32 {
        self.stars.iter().map(|star| star.value).max().unwrap_or(0)
    }

    /// Marks exactly the stars whose value is at most `value` as active.
    pub fn paint(&self, dom: &mut Dom, value: u32) -> Result<()> {
        for star in &self.stars {
            dom.class_set(star.node, &self.active_class, star.value <= value)?;
        }
        Ok(())
    }

    pub fn preview(&self, dom: &mut Dom, value: u32) -> Result<()> {
        tracing::trace!(container = self.container.index(), value, "rating preview");
        self.paint(dom, value)
    }

    pub fn commit(&mut self, dom: &mut Dom, value: u32) -> Result<()> {
        self.selected = value;
        if let Some(input) = self.input {
            dom.set_value(input, &value.to_string())?;
        }
        tracing::trace!(container = self.container.index(), value, "rating commit");
        self.paint(dom, value)
    }

    pub fn restore(&self, dom: &mut Dom) -> Result<()> {
        self.paint(dom, self.selected)
    }

    /// Values of the stars currently carrying the active class.
    pub fn active_values(&self, dom: &Dom) -> Result<Vec<u32>> {
        let mut active = Vec::new();
        for star in &self.stars {
            if dom.class_contains(star.node, &self.active_class)? {
                active.push(star.value);
            }
        }
        Ok(active)
    }

    pub(crate) fn star_bindings(&self) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.stars.iter().map(|star| (star.node, star.value))
    }

    fn clamp(&self, value: i64) -> u32 {
        u32::try_from(value.max(0))
            .unwrap_or(u32::MAX)
            .min(self.max_value())
    }
}

/// Star value from its attribute, or its 1-based position when the attribute
/// is missing or not a positive integer.
fn star_value(dom: &Dom, star: NodeId, attr: &str, idx: usize) -> u32 {
    dom.attr(star, attr)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| u32::try_from(idx + 1).unwrap_or(u32::MAX))
}
