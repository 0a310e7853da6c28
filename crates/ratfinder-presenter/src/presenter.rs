//! The nearby-site list: locate once, fetch once, then filter, sort and
//! window the result under persisted controls.

use std::fmt::Write as _;

use ratfinder_core::{Coordinates, EnrichedSite};

use crate::filters::{apply_filters, DistanceFilter, FilterState, SortField, StatusFilter};
use crate::location::LocationProvider;
use crate::prefs::{PreferenceError, PreferenceStore, Preferences};
use crate::render::{card_lines, controls_lines, location_header};
use crate::source::SiteSource;
use crate::window::{VirtualWindow, Virtualizer};

/// Lifecycle of one mount.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Locating,
    LocationUnavailable { reason: String },
    Loading { location: Coordinates },
    Ready {
        location: Coordinates,
        sites: Vec<EnrichedSite>,
    },
    Failed { location: Coordinates, reason: String },
}

impl ViewState {
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        match self {
            Self::Locating | Self::LocationUnavailable { .. } => None,
            Self::Loading { location }
            | Self::Ready { location, .. }
            | Self::Failed { location, .. } => Some(*location),
        }
    }
}

pub struct Presenter<S> {
    prefs: Preferences<S>,
    view: ViewState,
    visible: Vec<EnrichedSite>,
    virtualizer: Virtualizer,
}

impl<S: PreferenceStore> Presenter<S> {
    /// Rehydrates the controls from `store`. Nothing is fetched until
    /// [`Presenter::mount`].
    pub fn new(store: S) -> Self {
        Self {
            prefs: Preferences::load(store),
            view: ViewState::Locating,
            visible: Vec::new(),
            virtualizer: Virtualizer::default(),
        }
    }

    /// Requests the position once, then the nearby sites for it.
    pub async fn mount<L, Src>(&mut self, locator: &L, source: &Src) -> &ViewState
    where
        L: LocationProvider,
        Src: SiteSource,
    {
        self.set_view(ViewState::Locating);

        let location = match locator.current_position().await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "location unavailable");
                self.set_view(ViewState::LocationUnavailable {
                    reason: e.to_string(),
                });
                return &self.view;
            }
        };

        self.set_view(ViewState::Loading { location });

        let next = match source.fetch_nearby(location).await {
            Ok(sites) => {
                tracing::info!(count = sites.len(), %location, "loaded nearby sites");
                ViewState::Ready { location, sites }
            }
            Err(e) => {
                tracing::error!(error = %e, %location, "failed to load nearby sites");
                ViewState::Failed {
                    location,
                    reason: e.to_string(),
                }
            }
        };
        self.set_view(next);
        &self.view
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        self.prefs.state()
    }

    #[must_use]
    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    /// Sites passing the current controls, in display order.
    #[must_use]
    pub fn visible_sites(&self) -> &[EnrichedSite] {
        &self.visible
    }

    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the new value cannot be persisted.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), PreferenceError> {
        let result = self.prefs.set_text(text);
        self.refresh();
        result
    }

    /// # Errors
    ///
    /// See [`Presenter::set_text`].
    pub fn set_sort(&mut self, sort: SortField) -> Result<(), PreferenceError> {
        let result = self.prefs.set_sort(sort);
        self.refresh();
        result
    }

    /// # Errors
    ///
    /// See [`Presenter::set_text`].
    pub fn set_max_distance(&mut self, max_distance: DistanceFilter) -> Result<(), PreferenceError> {
        let result = self.prefs.set_max_distance(max_distance);
        self.refresh();
        result
    }

    /// # Errors
    ///
    /// See [`Presenter::set_text`].
    pub fn set_status(&mut self, status: StatusFilter) -> Result<(), PreferenceError> {
        let result = self.prefs.set_status(status);
        self.refresh();
        result
    }

    /// Sets a control from its stored key and textual value.
    ///
    /// # Errors
    ///
    /// See [`Preferences::set_raw`].
    pub fn set_control(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let result = self.prefs.set_raw(key, value);
        self.refresh();
        result
    }

    fn set_view(&mut self, view: ViewState) {
        self.view = view;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = match &self.view {
            ViewState::Ready { sites, .. } => apply_filters(sites, self.prefs.state()),
            _ => Vec::new(),
        };
        self.virtualizer.set_count(self.visible.len());
        self.virtualizer.reset_measurements();
    }

    /// Lays out the rows intersecting the viewport, measuring each
    /// materialized card (in lines, including its separator) until the
    /// layout settles.
    pub fn layout(&mut self, scroll_offset: u32, viewport: u32) -> VirtualWindow {
        let mut window = self.virtualizer.window(scroll_offset, viewport);
        loop {
            let mut changed = false;
            for row in &window.rows {
                let lines = card_lines(&self.visible[row.index]).len() + 1;
                let size = u32::try_from(lines).unwrap_or(u32::MAX);
                changed |= self.virtualizer.measure(row.index, size);
            }
            if !changed {
                return window;
            }
            window = self.virtualizer.window(scroll_offset, viewport);
        }
    }

    /// Renders the current view as text, with `scroll_offset` and
    /// `viewport` in lines of the result list.
    pub fn render(&mut self, scroll_offset: u32, viewport: u32) -> String {
        let mut out = String::new();
        if let ViewState::Ready { location, .. } = self.view {
            self.render_ready(&mut out, location, scroll_offset, viewport);
            return out;
        }
        match &self.view {
            ViewState::Locating => out.push_str("Locating...\n"),
            ViewState::LocationUnavailable { reason } => {
                let _ = writeln!(out, "Location unavailable: {reason}");
            }
            ViewState::Loading { location } => {
                out.push_str("Loading...\n");
                let _ = writeln!(out, "{}", location_header(*location));
            }
            ViewState::Failed { location, reason } => {
                let _ = writeln!(out, "{}", location_header(*location));
                let _ = writeln!(out, "Could not load nearby sites: {reason}");
            }
            ViewState::Ready { .. } => {}
        }
        out
    }

    fn render_ready(
        &mut self,
        out: &mut String,
        location: Coordinates,
        scroll_offset: u32,
        viewport: u32,
    ) {
        let _ = writeln!(out, "{}\n", location_header(location));
        for line in controls_lines(self.prefs.state()) {
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');

        if self.visible.is_empty() {
            out.push_str("No results\n");
            return;
        }

        let window = self.layout(scroll_offset, viewport);
        for row in &window.rows {
            for line in card_lines(&self.visible[row.index]) {
                let _ = writeln!(out, "{line}");
            }
            out.push('\n');
        }
        if let (Some(first), Some(last)) = (window.rows.first(), window.rows.last()) {
            let _ = writeln!(
                out,
                "Rows {}-{} of {} (lines {}-{} of {})",
                first.index + 1,
                last.index + 1,
                self.visible.len(),
                first.start,
                last.end(),
                window.total_size
            );
        }
    }
}
