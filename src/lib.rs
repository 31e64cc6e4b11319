//! Progressive-enhancement widgets for server-rendered pages, running against
//! an in-memory DOM with virtual time and simulated viewport intersections.
//!
//! ```no_run
//! use page_widgets::{Page, Result};
//!
//! fn main() -> Result<()> {
//!     let mut page = Page::load(r#"<div class="carousel">
//!         <div class="carousel-item" id="a"></div>
//!         <div class="carousel-item" id="b"></div>
//!         <button class="carousel-next">next</button>
//!     </div>"#)?;
//!     page.click(".carousel-next")?;
//!     page.assert_class("#b", "active", true)?;
//!     Ok(())
//! }
//! ```

mod config;
mod dom;
mod events;
mod html;
mod page;
mod request;
mod runtime_state;
mod scheduler;
mod selector;
mod visibility;
mod widgets;

#[cfg(test)]
mod tests;

pub use config::{Markup, PageConfig, Timing};
pub use dom::{Dom, NodeId};
pub use events::{EventKind, EventOutcome};
pub use page::{DefaultAction, Page};
pub use request::{FetchError, FetchRequest, FetchTransport, Method, MockFetch, make_request};
pub use scheduler::{PendingTimer, ScheduledTask, Scheduler, TimerId, TimerQueue, TimerTask};
pub use visibility::{IntersectionEntry, IntersectionRegistry, VisibilityObserver};
pub use widgets::{
    Carousel, ConfirmGuard, FlashAutoHide, LazyImageLoader, RatingWidget, SearchDebouncer,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    #[error("invalid node operation: {0}")]
    InvalidNode(String),
    #[error("timer error: {0}")]
    Timer(String),
    #[error(
        "timer queue exceeded max task steps: limit={limit}, now_ms={now_ms}, pending_tasks={pending}"
    )]
    TimerStepLimit {
        limit: usize,
        now_ms: i64,
        pending: usize,
    },
    #[error("page widgets are already initialized")]
    AlreadyInitialized,
    #[error("configuration error: {0}")]
    Config(String),
}
