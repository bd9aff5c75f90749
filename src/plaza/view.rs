//! # View State
//!
//! An explicit little state machine for the browsing surface, so the
//! loading / loaded / error transitions that drive rendering can be tested
//! without a terminal. Events go in, an [`Effect`] comes out; the caller
//! performs the effect (re-render, show an error banner, or nothing).

use crate::filter::Criteria;
use crate::render::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    LoadStarted,
    LoadFinished,
    LoadFailed(String),
    SetMode(ViewMode),
    SetCriteria(Criteria),
    SetSearch(Option<String>),
}

/// What the caller should do after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Render,
    ShowError(String),
}

/// Ephemeral UI state: presentation mode, current criteria, load phase.
#[derive(Debug, Clone)]
pub struct ViewState {
    mode: ViewMode,
    criteria: Criteria,
    phase: Phase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Grid,
            criteria: Criteria::none(),
            phase: Phase::Loading,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }

    pub fn handle(&mut self, event: ViewEvent) -> Effect {
        match event {
            ViewEvent::LoadStarted => {
                self.phase = Phase::Loading;
                Effect::None
            }
            ViewEvent::LoadFinished => {
                self.phase = Phase::Loaded;
                Effect::Render
            }
            ViewEvent::LoadFailed(message) => {
                self.phase = Phase::Error;
                Effect::ShowError(message)
            }
            ViewEvent::SetMode(mode) => {
                // Re-selecting the active mode is a no-op.
                if mode == self.mode {
                    return Effect::None;
                }
                self.mode = mode;
                self.render_if_loaded()
            }
            ViewEvent::SetCriteria(criteria) => {
                self.criteria = criteria;
                self.render_if_loaded()
            }
            ViewEvent::SetSearch(term) => {
                self.criteria.search = term;
                self.render_if_loaded()
            }
        }
    }

    fn render_if_loaded(&self) -> Effect {
        if self.is_loaded() {
            Effect::Render
        } else {
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;

    #[test]
    fn starts_loading_in_grid_mode() {
        let state = ViewState::new();
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.mode(), ViewMode::Grid);
        assert!(state.criteria().is_empty());
    }

    #[test]
    fn successful_load_triggers_a_render() {
        let mut state = ViewState::new();
        assert_eq!(state.handle(ViewEvent::LoadFinished), Effect::Render);
        assert!(state.is_loaded());
    }

    #[test]
    fn failed_load_surfaces_the_error() {
        let mut state = ViewState::new();
        let effect = state.handle(ViewEvent::LoadFailed("boom".into()));
        assert_eq!(effect, Effect::ShowError("boom".into()));
        assert_eq!(state.phase(), Phase::Error);
    }

    #[test]
    fn reselecting_the_active_mode_does_nothing() {
        let mut state = ViewState::new();
        state.handle(ViewEvent::LoadFinished);
        assert_eq!(state.handle(ViewEvent::SetMode(ViewMode::Grid)), Effect::None);
        assert_eq!(
            state.handle(ViewEvent::SetMode(ViewMode::List)),
            Effect::Render
        );
        assert_eq!(state.mode(), ViewMode::List);
    }

    #[test]
    fn criteria_changes_before_load_do_not_render() {
        let mut state = ViewState::new();
        let criteria = Criteria {
            category: CategoryFilter::parse("gold"),
            ..Criteria::none()
        };
        assert_eq!(
            state.handle(ViewEvent::SetCriteria(criteria.clone())),
            Effect::None
        );
        assert_eq!(state.criteria(), &criteria);

        state.handle(ViewEvent::LoadFinished);
        assert_eq!(
            state.handle(ViewEvent::SetSearch(Some("cocoa".into()))),
            Effect::Render
        );
        assert_eq!(state.criteria().search.as_deref(), Some("cocoa"));
    }

    #[test]
    fn reload_goes_back_through_loading() {
        let mut state = ViewState::new();
        state.handle(ViewEvent::LoadFinished);
        assert_eq!(state.handle(ViewEvent::LoadStarted), Effect::None);
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.handle(ViewEvent::LoadFinished), Effect::Render);
    }
}
