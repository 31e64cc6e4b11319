use crate::config::PageConfig;
use crate::dom::{Dom, NodeId};
use crate::events::{EventKind, Listener, ListenerStore, Reaction};
use crate::request::MockFetch;
use crate::runtime_state::{PlatformMockState, TraceState};
use crate::scheduler::{Scheduler, TimerQueue};
use crate::visibility::{IntersectionEntry, IntersectionRegistry, VisibilityObserver};
use crate::widgets::{
    Carousel, ConfirmGuard, FlashAutoHide, LazyImageLoader, RatingWidget, SearchDebouncer,
};
use crate::{Error, Result};

mod assertions;
mod dom_actions;
mod timer_controls;
mod trace_and_mocks;

/// Default action the page performed after an activation that nothing
/// cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultAction {
    Navigate { href: String },
    Submit { form_action: Option<String> },
}

/// A parsed page plus the widgets attached to it.
///
/// Gestures, virtual time and viewport intersections are all driven
/// explicitly by the host, so every behavior is reproducible.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    config: PageConfig,
    listeners: ListenerStore,
    scheduler: Box<dyn Scheduler>,
    observer: Box<dyn VisibilityObserver>,
    fetch: MockFetch,
    ratings: Vec<RatingWidget>,
    carousels: Vec<Carousel>,
    guards: Vec<ConfirmGuard>,
    flash: FlashAutoHide,
    search: Option<SearchDebouncer>,
    lazy_images: Option<LazyImageLoader>,
    initialized: bool,
    hover_path: Vec<NodeId>,
    platform_mocks: PlatformMockState,
    trace_state: TraceState,
}

impl Page {
    /// Parses `html` without attaching any widget.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_config(html, PageConfig::default())
    }

    pub fn with_config(html: &str, config: PageConfig) -> Result<Self> {
        Self::with_capabilities(
            html,
            config,
            Box::new(TimerQueue::new()),
            Box::new(IntersectionRegistry::new()),
        )
    }

    pub fn with_capabilities(
        html: &str,
        config: PageConfig,
        scheduler: Box<dyn Scheduler>,
        observer: Box<dyn VisibilityObserver>,
    ) -> Result<Self> {
        config.validate()?;
        let dom = stacker::grow(32 * 1024 * 1024, || Dom::parse(html))?;
        Ok(Self {
            dom,
            config,
            listeners: ListenerStore::default(),
            scheduler,
            observer,
            fetch: MockFetch::new(),
            ratings: Vec::new(),
            carousels: Vec::new(),
            guards: Vec::new(),
            flash: FlashAutoHide::default(),
            search: None,
            lazy_images: None,
            initialized: false,
            hover_path: Vec::new(),
            platform_mocks: PlatformMockState::default(),
            trace_state: TraceState::default(),
        })
    }

    /// Parses `html` and initializes every widget on the whole document.
    pub fn load(html: &str) -> Result<Self> {
        let mut page = Self::from_html(html)?;
        page.initialize()?;
        Ok(page)
    }

    pub fn initialize(&mut self) -> Result<()> {
        let root = self.dom.root();
        self.initialize_at(root)
    }

    /// Initializes widgets found at or below the first element matching
    /// `selector`.
    pub fn initialize_within(&mut self, selector: &str) -> Result<()> {
        let root = self.select_one(selector)?;
        self.initialize_at(root)
    }

    fn initialize_at(&mut self, root: NodeId) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        self.initialized = true;
        let markup = self.config.markup.clone();
        let timing = self.config.timing.clone();

        for widget in RatingWidget::scan(&self.dom, root, &markup)? {
            let index = self.ratings.len();
            widget.restore(&mut self.dom)?;
            for (star, value) in widget.star_bindings() {
                self.listen(star, EventKind::MouseEnter, Reaction::RatingPreview { widget: index, value });
                self.listen(star, EventKind::Click, Reaction::RatingCommit { widget: index, value });
            }
            self.listen(
                widget.container(),
                EventKind::MouseLeave,
                Reaction::RatingRestore { widget: index },
            );
            self.ratings.push(widget);
        }

        for carousel in Carousel::scan(&self.dom, root, &markup)? {
            let index = self.carousels.len();
            carousel.render(&mut self.dom)?;
            if let Some(prev) = carousel.prev_control() {
                self.listen(prev, EventKind::Click, Reaction::CarouselStep { widget: index, delta: -1 });
            }
            if let Some(next) = carousel.next_control() {
                self.listen(next, EventKind::Click, Reaction::CarouselStep { widget: index, delta: 1 });
            }
            self.carousels.push(carousel);
        }

        for guard in ConfirmGuard::scan(&self.dom, root, &markup)? {
            let index = self.guards.len();
            self.listeners.add(
                guard.target(),
                EventKind::Click,
                Listener {
                    capture: true,
                    reaction: Reaction::ConfirmGate { guard: index },
                },
            );
            self.guards.push(guard);
        }

        self.flash = FlashAutoHide::scan(&self.dom, root, &markup)?;
        self.flash.schedule(self.scheduler.as_mut(), &timing);

        self.search = SearchDebouncer::scan(&self.dom, root, &markup, &timing)?;
        if let Some(input) = self.search.as_ref().map(SearchDebouncer::input) {
            self.listen(input, EventKind::Input, Reaction::SearchInput);
        }

        let (loader, observed) =
            LazyImageLoader::register(&self.dom, root, &markup, self.observer.as_mut())?;
        self.lazy_images = Some(loader);

        tracing::debug!(
            ratings = self.ratings.len(),
            carousels = self.carousels.len(),
            confirm_guards = self.guards.len(),
            notices = self.flash.notices().len(),
            search = self.search.is_some(),
            lazy_images = observed,
            "page widgets initialized"
        );
        Ok(())
    }

    fn listen(&mut self, node: NodeId, kind: EventKind, reaction: Reaction) {
        self.listeners.add(
            node,
            kind,
            Listener {
                capture: false,
                reaction,
            },
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn rating_widgets(&self) -> &[RatingWidget] {
        &self.ratings
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn confirm_guards(&self) -> &[ConfirmGuard] {
        &self.guards
    }

    pub fn flash_notices(&self) -> &[NodeId] {
        self.flash.notices()
    }

    pub fn search_debouncer(&self) -> Option<&SearchDebouncer> {
        self.search.as_ref()
    }

    pub fn observed_images(&self) -> Vec<NodeId> {
        self.observer.observed()
    }

    pub fn select(&self, selector: &str) -> Result<NodeId> {
        self.select_one(selector)
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }
}
