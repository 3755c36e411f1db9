use std::sync::Arc;

use crate::chart::ChartSet;
use crate::config::DashboardConfig;
use crate::data::filter::Selection;
use crate::data::model::{Catalog, Category, StarSize};
use crate::data::session::SessionStore;
use crate::events::{self, ControlId, Event};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Charts,
    Data,
    About,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded catalogue, shared and never mutated.
    pub catalog: Arc<Catalog>,

    pub config: DashboardConfig,

    /// Current values of the filter controls. Only read when the user submits.
    pub controls: Selection,

    /// Filtered subset of the last submit, as CSV text.
    pub store: SessionStore,

    /// Output of the last successful render.
    pub charts: Option<ChartSet>,

    pub tab: Tab,

    /// Current page of the Data tab.
    pub page: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and fire the page-load event, so the initial selection
    /// is rendered before the first frame.
    pub fn new(catalog: Arc<Catalog>, config: DashboardConfig) -> Self {
        let controls = Selection::everything(&catalog);
        let mut state = Self {
            catalog,
            config,
            controls,
            store: SessionStore::default(),
            charts: None,
            tab: Tab::default(),
            page: 0,
            status_message: None,
        };
        state.dispatch(Event::PageLoaded);
        state
    }

    pub fn dispatch(&mut self, event: Event) {
        events::dispatch(self, event);
    }

    /// Toggle a single star size in the selector.
    pub fn toggle_star_size(&mut self, size: StarSize) {
        let selected = &mut self.controls.star_sizes;
        if !selected.remove(&size) {
            selected.insert(size);
        }
        self.dispatch(Event::ValueChanged(ControlId::StarSelector));
    }

    /// Select every star size.
    pub fn select_all(&mut self) {
        self.controls.star_sizes = StarSize::ALL.iter().copied().collect();
        self.dispatch(Event::ValueChanged(ControlId::StarSelector));
    }

    /// Deselect every star size.
    pub fn select_none(&mut self) {
        self.controls.star_sizes.clear();
        self.dispatch(Event::ValueChanged(ControlId::StarSelector));
    }

    /// Move the radius handles, clamped to the observed bounds with `lo <= hi`.
    pub fn set_radius_range(&mut self, lo: f64, hi: f64) {
        let (min, max) = self.catalog.radius_bounds;
        let lo = lo.clamp(min, max);
        let hi = hi.clamp(lo, max);
        self.controls.radius_min = lo;
        self.controls.radius_max = hi;
        self.dispatch(Event::ValueChanged(ControlId::RadiusSlider));
    }

    /// The "Apply" button.
    pub fn submit(&mut self) {
        self.dispatch(Event::Clicked(ControlId::SubmitButton));
    }

    /// Rows shown by the last render.
    pub fn shown_count(&self) -> usize {
        self.charts.as_ref().map_or(0, |c| c.table.rows.len())
    }
}
