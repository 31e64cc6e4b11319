use crate::Result;
use crate::config::Markup;
use crate::dom::{Dom, NodeId};

use super::scan_scope;

/// Slide carousel showing one slide at a time, stepping with wraparound.
#[derive(Debug, Clone)]
pub struct Carousel {
    container: NodeId,
    slides: Vec<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    current: usize,
    active_class: String,
}

impl Carousel {
    pub fn scan(dom: &Dom, root: NodeId, markup: &Markup) -> Result<Vec<Self>> {
        let mut carousels = Vec::new();
        for container in scan_scope(dom, root, &markup.carousel_container)? {
            if let Some(carousel) = Self::from_container(dom, container, markup)? {
                carousels.push(carousel);
            }
        }
        Ok(carousels)
    }

    /// `None` when the container holds no slides.
    pub fn from_container(dom: &Dom, container: NodeId, markup: &Markup) -> Result<Option<Self>> {
        let slides = dom.query_selector_all_from(container, &markup.carousel_slide)?;
        if slides.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            container,
            slides,
            prev: dom.query_selector_from(container, &markup.carousel_prev)?,
            next: dom.query_selector_from(container, &markup.carousel_next)?,
            current: 0,
            active_class: markup.carousel_active_class.clone(),
        }))
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn prev_control(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next_control(&self) -> Option<NodeId> {
        self.next
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn render(&self, dom: &mut Dom) -> Result<()> {
        for (idx, slide) in self.slides.iter().enumerate() {
            dom.class_set(*slide, &self.active_class, idx == self.current)?;
        }
        Ok(())
    }

    pub fn step(&mut self, dom: &mut Dom, delta: isize) -> Result<()> {
        self.current = wrap_index(self.current, delta, self.slides.len());
        tracing::trace!(
            container = self.container.index(),
            current = self.current,
            "carousel step"
        );
        self.render(dom)
    }

    pub fn show_next(&mut self, dom: &mut Dom) -> Result<()> {
        self.step(dom, 1)
    }

    pub fn show_prev(&mut self, dom: &mut Dom) -> Result<()> {
        self.step(dom, -1)
    }
}

fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i128;
    (current as i128 + delta as i128).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::wrap_index;

    #[test]
    fn wrap_index_cycles_in_both_directions() {
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(1, 7, 3), 2);
        assert_eq!(wrap_index(0, -7, 3), 2);
        assert_eq!(wrap_index(0, 1, 1), 0);
        assert_eq!(wrap_index(0, 1, 0), 0);
    }
}
