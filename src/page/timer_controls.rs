use super::*;
use crate::scheduler::{PendingTimer, ScheduledTask, TimerId, TimerTask};

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms()
    }

    /// Moves virtual time forward by `delta_ms`, running every task that
    /// falls due on the way. Each task observes the clock at its own due
    /// time, so follow-up tasks it schedules may also run within the window.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Timer(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.now_ms();
        let target = from.saturating_add(delta_ms);
        let ran = self.run_timer_queue(Some(target))?;
        self.scheduler.advance_clock_to(target);
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={target} ran_due={ran}"
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.now_ms();
        if target_ms < from {
            return Err(Error::Timer(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={from})"
            )));
        }
        let ran = self.run_timer_queue(Some(target_ms))?;
        self.scheduler.advance_clock_to(target_ms);
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs everything pending, advancing the clock to each task's due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.now_ms();
        let ran = self.run_timer_queue(None)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.now_ms()
        ));
        Ok(())
    }

    /// Runs the earliest pending task, jumping the clock to its due time.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(task) = self.scheduler.take_next(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        self.scheduler.advance_clock_to(task.due_at);
        self.execute_timer_task(task)?;
        Ok(true)
    }

    /// Runs tasks already due at the current time without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let now = self.now_ms();
        let ran = self.run_timer_queue(Some(now))?;
        self.trace_timer_line(format!("[timer] run_due now_ms={now} ran={ran}"));
        Ok(ran)
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let existed = self.scheduler.cancel(id);
        if let Some(search) = self.search.as_mut() {
            search.settle(id);
        }
        self.trace_timer_line(format!("[timer] clear id={id} existed={existed}"));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.clear_all();
        if let Some(search) = self.search.as_mut() {
            if let Some(pending) = search.pending() {
                search.settle(pending);
            }
        }
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Timer(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.config.timer_step_limit = max_steps;
        Ok(())
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>) -> Result<usize> {
        let limit = self.config.timer_step_limit;
        let mut steps = 0usize;
        loop {
            if steps == limit && self.has_due_task(due_limit) {
                return Err(Error::TimerStepLimit {
                    limit,
                    now_ms: self.now_ms(),
                    pending: self.scheduler.pending().len(),
                });
            }
            let Some(task) = self.scheduler.take_next(due_limit) else {
                break;
            };
            steps += 1;
            self.scheduler.advance_clock_to(task.due_at);
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn has_due_task(&self, due_limit: Option<i64>) -> bool {
        self.scheduler
            .pending()
            .iter()
            .any(|timer| due_limit.is_none_or(|limit| timer.due_at <= limit))
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} task={} due_at={} now_ms={}",
            task.id,
            task.task.label(),
            task.due_at,
            self.now_ms()
        ));

        match task.task {
            TimerTask::FadeNotice(notice) => {
                if !self.dom.is_connected(notice) {
                    return Ok(());
                }
                let timing = &self.config.timing;
                let removal =
                    FlashAutoHide::fade(&mut self.dom, self.scheduler.as_mut(), notice, timing)?;
                self.trace_timer_line(format!("[timer] schedule remove_notice id={removal}"));
            }
            TimerTask::RemoveNotice(notice) => {
                if self.dom.is_connected(notice) {
                    FlashAutoHide::remove(&mut self.dom, notice)?;
                }
            }
            TimerTask::SearchSuggest { query } => {
                if let Some(search) = self.search.as_mut() {
                    search.settle(task.id);
                }
                tracing::info!("Searching for: {query}");
                self.platform_mocks.search_queries.push(query);
            }
        }
        Ok(())
    }
}
