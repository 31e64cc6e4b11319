use crate::Result;
use crate::config::Markup;
use crate::dom::{Dom, NodeId};

use super::scan_scope;

/// Gate in front of a control's default action. The prompt text is read from
/// the marker attribute when the control is activated.
///
/// The gate listens in the capture phase of the marked element. When the
/// marker sits on an ancestor such as a form, the prompt is answered before
/// listeners on inner controls run, and a declined prompt stops them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmGuard {
    target: NodeId,
    attr: String,
}

impl ConfirmGuard {
    pub fn scan(dom: &Dom, root: NodeId, markup: &Markup) -> Result<Vec<Self>> {
        Ok(scan_scope(dom, root, &markup.confirm_selector())?
            .into_iter()
            .map(|target| Self {
                target,
                attr: markup.confirm_attr.clone(),
            })
            .collect())
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn message(&self, dom: &Dom) -> String {
        dom.attr(self.target, &self.attr).unwrap_or_default()
    }

    /// Asks `confirm` with the current message and returns whether the
    /// activation may proceed.
    pub fn allows(&self, dom: &Dom, confirm: impl FnOnce(&str) -> bool) -> bool {
        let message = self.message(dom);
        let accepted = confirm(&message);
        tracing::debug!(target_node = self.target.index(), accepted, "confirm prompt answered");
        accepted
    }
}
