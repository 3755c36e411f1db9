//! Event wiring between the filter controls, the session store and the
//! displays.
//!
//! ```text
//!  RadiusSlider ─┐ (state)
//!  StarSelector ─┤
//!  SubmitButton ─┴─(click)─▶ filter_data ─▶ FilteredStore ─▶ render_outputs ─▶ charts + table
//!  PageLoaded ──────────────▲
//! ```
//!
//! Value changes on the slider and the selector only update draft values; no
//! callback listens to them, so nothing is recomputed until the user submits.

use std::collections::VecDeque;

use thiserror::Error;

use crate::chart;
use crate::data::filter;
use crate::data::session::SessionError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    StarSelector,
    RadiusSlider,
    SubmitButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreId {
    FilteredStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayId {
    DistTempChart,
    CelestialChart,
    RelativeDistChart,
    StarMassTempChart,
    DataTable,
}

/// A vertex of the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Control(ControlId),
    Store(StoreId),
    Display(DisplayId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PageLoaded,
    ValueChanged(ControlId),
    Clicked(ControlId),
    StoreUpdated(StoreId),
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type Handler = fn(&mut AppState) -> Result<Vec<Event>, CallbackError>;

/// One edge set of the graph: what fires it, what it reads, what it writes.
pub struct Callback {
    pub name: &'static str,
    pub inputs: &'static [Event],
    /// Read at fire time without triggering.
    pub states: &'static [Node],
    pub outputs: &'static [Node],
    pub handler: Handler,
}

pub const CALLBACKS: &[Callback] = &[
    Callback {
        name: "filter_data",
        inputs: &[Event::PageLoaded, Event::Clicked(ControlId::SubmitButton)],
        states: &[
            Node::Control(ControlId::RadiusSlider),
            Node::Control(ControlId::StarSelector),
        ],
        outputs: &[Node::Store(StoreId::FilteredStore)],
        handler: filter_data,
    },
    Callback {
        name: "render_outputs",
        inputs: &[Event::StoreUpdated(StoreId::FilteredStore)],
        states: &[],
        outputs: &[
            Node::Display(DisplayId::DistTempChart),
            Node::Display(DisplayId::CelestialChart),
            Node::Display(DisplayId::RelativeDistChart),
            Node::Display(DisplayId::StarMassTempChart),
            Node::Display(DisplayId::DataTable),
        ],
        handler: render_outputs,
    },
];

/// Callbacks listening to `event`, in table order.
pub fn callbacks_for(event: Event) -> impl Iterator<Item = &'static Callback> {
    CALLBACKS.iter().filter(move |cb| cb.inputs.contains(&event))
}

/// Run `event` and everything it cascades into. Returns the number of
/// callbacks that ran.
///
/// A failing callback stops its own cascade, records the error in
/// `status_message` and leaves the rest of the queue running.
pub fn dispatch(state: &mut AppState, event: Event) -> usize {
    let mut queue = VecDeque::from([event]);
    let mut fired = 0;

    while let Some(ev) = queue.pop_front() {
        log::debug!("Dispatching {ev:?}");
        for cb in callbacks_for(ev) {
            fired += 1;
            log::debug!(
                "Running callback {} (state {:?}, outputs {:?})",
                cb.name,
                cb.states,
                cb.outputs
            );
            match (cb.handler)(state) {
                Ok(follow_up) => queue.extend(follow_up),
                Err(e) => {
                    log::error!("Callback {} failed: {e}", cb.name);
                    state.status_message = Some(format!("Error: {e}"));
                }
            }
        }
    }
    fired
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn filter_data(state: &mut AppState) -> Result<Vec<Event>, CallbackError> {
    let selection = &state.controls;
    let subset = filter::apply(&state.catalog.planets, selection);
    log::info!(
        "Filter {:?} radius ({}, {}) -> {} of {} planets",
        selection.star_sizes,
        selection.radius_min,
        selection.radius_max,
        subset.len(),
        state.catalog.len()
    );
    state.store.write(&subset)?;
    log::debug!(
        "Session store holds {} bytes",
        state.store.raw().map_or(0, str::len)
    );
    Ok(vec![Event::StoreUpdated(StoreId::FilteredStore)])
}

fn render_outputs(state: &mut AppState) -> Result<Vec<Event>, CallbackError> {
    // Clear first so a decode failure never leaves stale charts behind.
    state.charts = None;
    let subset = state.store.read()?;
    state.charts = Some(chart::render(&subset, &state.config));
    state.page = 0;
    state.status_message = None;
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::fixtures::catalog;
    use crate::data::model::StarSize;

    fn state() -> AppState {
        AppState::new(Arc::new(catalog()), DashboardConfig::default())
    }

    fn shown(state: &AppState) -> usize {
        state.charts.as_ref().map_or(0, |c| c.table.rows.len())
    }

    #[test]
    fn store_feeds_every_display() {
        let writer = CALLBACKS.iter().find(|c| c.name == "filter_data").unwrap();
        let reader = CALLBACKS.iter().find(|c| c.name == "render_outputs").unwrap();
        assert_eq!(writer.outputs, &[Node::Store(StoreId::FilteredStore)]);
        assert!(reader.inputs.contains(&Event::StoreUpdated(StoreId::FilteredStore)));
        assert_eq!(reader.outputs.len(), 5);
    }

    #[test]
    fn value_changes_have_no_listeners() {
        for control in [ControlId::StarSelector, ControlId::RadiusSlider] {
            assert_eq!(callbacks_for(Event::ValueChanged(control)).count(), 0);
        }
    }

    #[test]
    fn page_load_renders_initial_selection() {
        let state = state();
        assert!(state.store.raw().is_some());
        // Full selection, boundary radii excluded.
        assert_eq!(shown(&state), 3);
    }

    #[test]
    fn submit_runs_filter_then_render() {
        let mut state = state();
        assert_eq!(dispatch(&mut state, Event::Clicked(ControlId::SubmitButton)), 2);
    }

    #[test]
    fn drafts_do_not_apply_until_submit() {
        let mut state = state();
        state.select_none();
        assert_eq!(shown(&state), 3);

        state.submit();
        let charts = state.charts.as_ref().unwrap();
        assert!(charts.table.rows.is_empty());
        assert!(charts.dist_temp.series.iter().all(|s| s.points.is_empty()));
        assert_eq!(charts.relative_dist.bin_count(), 0);
    }

    #[test]
    fn narrowed_selection_reaches_the_table() {
        let mut state = state();
        state.select_none();
        state.toggle_star_size(StarSize::SunLike);
        // The lower bound clamps to the observed minimum 0.3, which the
        // exclusive comparison then drops.
        state.set_radius_range(0.0, 5.0);
        state.submit();
        assert_eq!(shown(&state), 2);
        assert_eq!(state.store.read().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_store_clears_charts_and_reports() {
        let mut state = state();
        state.store.put_raw("garbage\n1\n");
        dispatch(&mut state, Event::StoreUpdated(StoreId::FilteredStore));
        assert!(state.charts.is_none());
        assert!(state.status_message.is_some());
    }
}
