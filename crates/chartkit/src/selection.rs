//! Per-chart interactive state: one optional selection instead of a
//! scatter of hovered/expanded/selected flags.

use crate::hit::HitKey;
use crate::scene::Emphasis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub key: HitKey,
    /// Pinned by a click; hover and leave no longer move it.
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState<F = String> {
    pub filter: Option<F>,
    pub selection: Option<Selection>,
    /// Index into the chart's time axis or category list.
    pub active_index: usize,
}

impl<F> Default for UiState<F> {
    fn default() -> Self {
        Self {
            filter: None,
            selection: None,
            active_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent<F = String> {
    Hover(HitKey),
    Leave,
    Click(HitKey),
    Filter(Option<F>),
    Step(isize),
    Jump(usize),
    Clear,
}

impl<F> UiState<F> {
    /// Applies one pointer or keyboard event. `len` bounds `active_index`.
    #[must_use]
    pub fn apply(mut self, event: UiEvent<F>, len: usize) -> Self {
        match event {
            UiEvent::Hover(key) => {
                if !self.is_pinned() {
                    self.selection = Some(Selection { key, pinned: false });
                }
            }
            UiEvent::Leave => {
                if !self.is_pinned() {
                    self.selection = None;
                }
            }
            UiEvent::Click(key) => {
                let already_pinned = self
                    .selection
                    .as_ref()
                    .is_some_and(|selection| selection.pinned && selection.key == key);
                self.selection = if already_pinned {
                    None
                } else {
                    Some(Selection { key, pinned: true })
                };
            }
            UiEvent::Filter(filter) => {
                self.filter = filter;
                self.selection = None;
            }
            UiEvent::Step(delta) => {
                let moved = self.active_index.saturating_add_signed(delta);
                self.active_index = clamp_index(moved, len);
            }
            UiEvent::Jump(index) => {
                self.active_index = clamp_index(index, len);
            }
            UiEvent::Clear => {
                self.selection = None;
            }
        }
        self
    }

    /// In-place form of [`UiState::apply`].
    pub fn update(&mut self, event: UiEvent<F>, len: usize) {
        let current = std::mem::take(self);
        *self = current.apply(event, len);
    }

    pub fn selected_key(&self) -> Option<&HitKey> {
        self.selection.as_ref().map(|selection| &selection.key)
    }

    pub fn is_selected(&self, key: &HitKey) -> bool {
        self.selected_key() == Some(key)
    }

    pub fn is_pinned(&self) -> bool {
        self.selection.as_ref().is_some_and(|selection| selection.pinned)
    }

    /// Highlighted when selected, dimmed when something else is, normal
    /// when nothing is.
    pub fn emphasis_for(&self, key: &HitKey) -> Emphasis {
        match self.selected_key() {
            None => Emphasis::Normal,
            Some(selected) if selected == key => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
        }
    }
}

impl<F: PartialEq> UiState<F> {
    pub fn passes_filter(&self, value: &F) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter == value)
    }
}

const fn clamp_index(index: usize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if index < last {
        index
    } else {
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = UiState<String>;

    #[test]
    fn hover_then_leave_round_trips() {
        let state = State::default().apply(UiEvent::Hover(HitKey::new("wheat")), 0);
        assert!(state.is_selected(&HitKey::new("wheat")));
        let state = state.apply(UiEvent::Leave, 0);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn pinned_selection_ignores_hover_and_leave() {
        let state = State::default()
            .apply(UiEvent::Click(HitKey::new("rice")), 0)
            .apply(UiEvent::Hover(HitKey::new("maize")), 0)
            .apply(UiEvent::Leave, 0);
        assert!(state.is_pinned());
        assert!(state.is_selected(&HitKey::new("rice")));
    }

    #[test]
    fn clicking_the_pinned_key_unpins() {
        let state = State::default()
            .apply(UiEvent::Click(HitKey::new("rice")), 0)
            .apply(UiEvent::Click(HitKey::new("rice")), 0);
        assert_eq!(state.selection, None);
    }

    #[test]
    fn clicking_another_key_moves_the_pin() {
        let state = State::default()
            .apply(UiEvent::Click(HitKey::new("rice")), 0)
            .apply(UiEvent::Click(HitKey::new("maize")), 0);
        assert!(state.is_pinned());
        assert!(state.is_selected(&HitKey::new("maize")));
    }

    #[test]
    fn filter_change_clears_selection() {
        let state = State::default()
            .apply(UiEvent::Click(HitKey::new("rice")), 0)
            .apply(UiEvent::Filter(Some("grains".to_string())), 0);
        assert_eq!(state.selection, None);
        assert!(state.passes_filter(&"grains".to_string()));
        assert!(!state.passes_filter(&"pulses".to_string()));
    }

    #[test]
    fn active_index_is_clamped() {
        let mut state = State::default();
        state.update(UiEvent::Step(-3), 5);
        assert_eq!(state.active_index, 0);
        state.update(UiEvent::Step(7), 5);
        assert_eq!(state.active_index, 4);
        state.update(UiEvent::Jump(2), 5);
        assert_eq!(state.active_index, 2);
        state.update(UiEvent::Jump(9), 0);
        assert_eq!(state.active_index, 0);
    }

    #[test]
    fn active_index_clamps_at_the_integer_limits() {
        let state = State::default().apply(UiEvent::Jump(usize::MAX), 5);
        assert_eq!(state.active_index, 4);

        let state = State::default()
            .apply(UiEvent::Jump(2), 5)
            .apply(UiEvent::Step(isize::MAX), 5);
        assert_eq!(state.active_index, 4);

        let state = state.apply(UiEvent::Step(isize::MIN), 5);
        assert_eq!(state.active_index, 0);
    }

    #[test]
    fn emphasis_follows_selection() {
        let key = HitKey::index(1);
        let other = HitKey::index(2);
        let idle = State::default();
        assert_eq!(idle.emphasis_for(&key), Emphasis::Normal);
        let hovered = idle.apply(UiEvent::Hover(key.clone()), 0);
        assert_eq!(hovered.emphasis_for(&key), Emphasis::Highlighted);
        assert_eq!(hovered.emphasis_for(&other), Emphasis::Dimmed);
    }

    #[test]
    fn same_events_give_same_state() {
        let events = [
            UiEvent::Hover(HitKey::index(3)),
            UiEvent::Step(2),
            UiEvent::Click(HitKey::index(1)),
        ];
        let run = || {
            events
                .iter()
                .cloned()
                .fold(State::default(), |state, event| state.apply(event, 10))
        };
        assert_eq!(run(), run());
    }
}
