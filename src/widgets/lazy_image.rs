use crate::Result;
use crate::config::Markup;
use crate::dom::{Dom, NodeId};
use crate::visibility::{IntersectionEntry, VisibilityObserver};

use super::scan_scope;

/// Defers `src` assignment for images carrying a pending source until they
/// first intersect the viewport.
#[derive(Debug, Clone)]
pub struct LazyImageLoader {
    source_attr: String,
}

impl LazyImageLoader {
    /// Registers every pending image at or below `root` with `observer` and
    /// returns the loader with the number of registered images.
    pub fn register(
        dom: &Dom,
        root: NodeId,
        markup: &Markup,
        observer: &mut dyn VisibilityObserver,
    ) -> Result<(Self, usize)> {
        let images = scan_scope(dom, root, &markup.lazy_image_selector())?;
        for image in &images {
            observer.observe(*image);
        }
        Ok((
            Self {
                source_attr: markup.lazy_source_attr.clone(),
            },
            images.len(),
        ))
    }

    /// Promotes every observed, intersecting entry and stops observing it.
    /// Returns the images that were loaded.
    pub fn handle(
        &self,
        dom: &mut Dom,
        observer: &mut dyn VisibilityObserver,
        entries: &[IntersectionEntry],
    ) -> Result<Vec<NodeId>> {
        let mut loaded = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || !observer.is_observed(entry.target) {
                continue;
            }
            if let Some(source) = dom.attr(entry.target, &self.source_attr) {
                dom.set_attr(entry.target, "src", &source)?;
                dom.remove_attr(entry.target, &self.source_attr)?;
                loaded.push(entry.target);
            }
            observer.unobserve(entry.target);
        }
        Ok(loaded)
    }
}
