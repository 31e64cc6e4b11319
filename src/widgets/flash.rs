use crate::Result;
use crate::config::{Markup, Timing};
use crate::dom::{Dom, NodeId};
use crate::scheduler::{Scheduler, TimerId, TimerTask};

use super::scan_scope;

/// Transient notices present at initialization: each fades after the
/// configured delay and is detached once the fade has had time to run.
#[derive(Debug, Clone, Default)]
pub struct FlashAutoHide {
    notices: Vec<NodeId>,
}

impl FlashAutoHide {
    pub fn scan(dom: &Dom, root: NodeId, markup: &Markup) -> Result<Self> {
        Ok(Self {
            notices: scan_scope(dom, root, &markup.flash_notice)?,
        })
    }

    pub fn notices(&self) -> &[NodeId] {
        &self.notices
    }

    /// Schedules one fade per notice.
    pub fn schedule(&self, scheduler: &mut dyn Scheduler, timing: &Timing) -> Vec<TimerId> {
        self.notices
            .iter()
            .map(|notice| scheduler.schedule(timing.flash_delay_ms, TimerTask::FadeNotice(*notice)))
            .collect()
    }

    pub fn fade(
        dom: &mut Dom,
        scheduler: &mut dyn Scheduler,
        notice: NodeId,
        timing: &Timing,
    ) -> Result<TimerId> {
        dom.style_set(notice, "opacity", "0")?;
        dom.style_set(
            notice,
            "transition",
            &format!("opacity {}s", format_seconds(timing.flash_fade_ms)),
        )?;
        Ok(scheduler.schedule(timing.flash_fade_ms, TimerTask::RemoveNotice(notice)))
    }

    pub fn remove(dom: &mut Dom, notice: NodeId) -> Result<()> {
        dom.remove_node(notice)
    }
}

fn format_seconds(ms: i64) -> String {
    let whole = ms / 1000;
    let frac = (ms % 1000).abs();
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:03}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::format_seconds;

    #[test]
    fn format_seconds_matches_css_time_notation() {
        assert_eq!(format_seconds(500), "0.5");
        assert_eq!(format_seconds(1000), "1");
        assert_eq!(format_seconds(1250), "1.25");
        assert_eq!(format_seconds(5), "0.005");
    }
}
