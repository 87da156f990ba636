//! An editing session: one color, its history, and where it is saved.
//!
//! The session plays the part of the editor screen. Input controls hand it
//! [`FieldEdit`]s; it records an undo step, mutates the shared
//! [`ColorModel`], and keeps the store up to date through [`AutoSave`].
//! Renderers subscribe to the model directly.

use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::auto_save::AutoSave;
use crate::config::UserPreferences;
use crate::constants::{AUTO_SAVE_DEBOUNCE, AUTO_SAVE_MIN_INTERVAL, UNDO_HISTORY_LIMIT};
use crate::error::StoreError;
use crate::history::{Action, ColorHistory};
use crate::input::FieldEdit;
use crate::model::{ColorModel, ColorState};
use crate::store::ColorStore;

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Maximum undo steps
    pub undo_limit: usize,
    /// Whether `tick` saves automatically
    pub auto_save: bool,
    /// Quiet period before an auto-save
    pub auto_save_debounce: Duration,
    /// Minimum time between auto-saves
    pub auto_save_min_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            undo_limit: UNDO_HISTORY_LIMIT,
            auto_save: true,
            auto_save_debounce: AUTO_SAVE_DEBOUNCE,
            auto_save_min_interval: AUTO_SAVE_MIN_INTERVAL,
        }
    }
}

impl From<&UserPreferences> for SessionOptions {
    fn from(prefs: &UserPreferences) -> Self {
        Self {
            undo_limit: prefs.undo_limit,
            auto_save: prefs.auto_save,
            auto_save_debounce: prefs.auto_save_debounce(),
            ..Self::default()
        }
    }
}

/// One editing session over a persisted color.
pub struct Session<S: ColorStore> {
    model: Rc<ColorModel>,
    history: ColorHistory,
    store: S,
    auto_save: AutoSave,
    rng: fastrand::Rng,
}

impl<S: ColorStore> Session<S> {
    /// Open a session, starting from the stored color if there is one.
    ///
    /// A store that fails to load is logged and the session starts from a
    /// fresh default color instead.
    pub fn open(store: S, options: &SessionOptions) -> Self {
        let model = match store.load() {
            Ok(Some(state)) => ColorModel::from_state(state),
            Ok(None) => {
                log::debug!("Session: no saved color, starting fresh");
                ColorModel::create_color()
            }
            Err(e) => {
                log::warn!("Session: could not load saved color: {}", e);
                ColorModel::create_color()
            }
        };

        let auto_save = if options.auto_save {
            AutoSave::new()
        } else {
            AutoSave::disabled()
        }
        .with_debounce(options.auto_save_debounce)
        .with_min_interval(options.auto_save_min_interval);

        Self {
            model: Rc::new(model),
            history: ColorHistory::new(options.undo_limit),
            store,
            auto_save,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a seeded generator for `shuffle`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// The shared model. Clone the `Rc` to subscribe renderers.
    pub fn model(&self) -> &Rc<ColorModel> {
        &self.model
    }

    /// Current snapshot.
    pub fn state(&self) -> ColorState {
        self.model.state()
    }

    /// Undo/redo history.
    pub fn history(&self) -> &ColorHistory {
        &self.history
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether there are changes not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.auto_save.is_dirty()
    }

    /// Apply one input edit as an undoable step.
    pub fn apply(&mut self, edit: FieldEdit) {
        let before = self.model.state();
        match edit {
            FieldEdit::SetField(field, value) => {
                self.history.record(
                    before,
                    Action::SetField {
                        field,
                        mode: before.mode,
                    },
                );
                self.model.set_field(field, value);
            }
            FieldEdit::SetMode(mode) => {
                self.history.record(before, Action::SetMode(mode));
                self.model.set_mode(mode);
            }
            FieldEdit::ConvertMode(mode) => {
                self.history.record(before, Action::ConvertMode(mode));
                self.model.convert_mode(mode);
            }
        }
        self.auto_save.note_change(Instant::now());
    }

    /// Reinterpret the current values in the other mode.
    pub fn toggle_mode(&mut self) {
        self.apply(FieldEdit::SetMode(self.model.mode().toggled()));
    }

    /// Replace the three components with random values, keeping mode and
    /// alpha. One undo step, one color update.
    pub fn shuffle(&mut self) {
        let before = self.model.state();
        self.history.record(before, Action::Shuffle);

        let (c1, c2, c3) = (self.rng.f32(), self.rng.f32(), self.rng.f32());
        self.model.update(|state| {
            state.color1 = c1;
            state.color2 = c2;
            state.color3 = c3;
        });
        self.auto_save.note_change(Instant::now());
    }

    /// Undo the last edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&self.model);
        if undone {
            self.auto_save.note_change(Instant::now());
        }
        undone
    }

    /// Redo the last undone edit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&self.model);
        if redone {
            self.auto_save.note_change(Instant::now());
        }
        redone
    }

    /// Save the current color now.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.save_at(Instant::now())
    }

    /// Auto-save if the scheduler says a save is due.
    ///
    /// Returns `None` when nothing was attempted.
    pub fn tick(&mut self) -> Option<Result<(), StoreError>> {
        self.tick_at(Instant::now())
    }

    /// [`Session::tick`] with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) -> Option<Result<(), StoreError>> {
        if !self.auto_save.is_due(now) {
            return None;
        }
        Some(self.save_at(now))
    }

    /// Save pending changes and end the session.
    pub fn close(mut self) -> Result<(), StoreError> {
        if self.auto_save.is_dirty() {
            self.save()?;
        }
        Ok(())
    }

    fn save_at(&mut self, now: Instant) -> Result<(), StoreError> {
        match self.store.save(&self.model.state()) {
            Ok(()) => {
                self.auto_save.saved(now);
                Ok(())
            }
            Err(e) => {
                log::warn!("Session: save failed: {}", e);
                self.auto_save.failed(now);
                Err(e)
            }
        }
    }
}

impl<S: ColorStore + std::fmt::Debug> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model)
            .field("history", &self.history)
            .field("store", &self.store)
            .field("auto_save", &self.auto_save)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorMode, Component, Field, Rgba};
    use crate::store::MemoryStore;
    use std::cell::RefCell;

    fn no_auto_save() -> SessionOptions {
        SessionOptions {
            auto_save: false,
            ..SessionOptions::default()
        }
    }

    fn red() -> Field {
        Field::Component(Component::First)
    }

    #[test]
    fn test_open_uses_saved_color() {
        let saved = ColorState::new(ColorMode::Hsb, 0.3, 0.6, 0.9, 0.5);
        let session = Session::open(MemoryStore::with_state(saved), &no_auto_save());
        assert_eq!(session.state(), saved);
    }

    #[test]
    fn test_open_without_saved_color_uses_defaults() {
        let session = Session::open(MemoryStore::new(), &no_auto_save());
        assert_eq!(session.state(), ColorState::default());
    }

    #[test]
    fn test_edits_are_undoable() {
        let mut session = Session::open(MemoryStore::new(), &no_auto_save());
        let original = session.state();

        session.apply(FieldEdit::SetField(red(), 0.9));
        session.apply(FieldEdit::SetMode(ColorMode::Hsb));
        assert_eq!(session.history().undo_description(), Some("Switch to HSB"));

        assert!(session.undo());
        assert_eq!(session.state().mode, ColorMode::Rgb);
        assert!(session.undo());
        assert_eq!(session.state(), original);
        assert!(!session.undo());

        assert!(session.redo());
        assert_eq!(session.model().component(Component::First), 0.9);
    }

    #[test]
    fn test_toggle_mode_flips_and_undoes() {
        let mut session = Session::open(MemoryStore::new(), &no_auto_save());
        let original = session.state();

        session.toggle_mode();
        assert_eq!(session.state().mode, ColorMode::Hsb);
        assert_eq!(session.state().color1, original.color1);
        session.toggle_mode();
        assert_eq!(session.state(), original);

        assert!(session.undo());
        assert_eq!(session.state().mode, ColorMode::Hsb);
        assert_eq!(session.history().redo_description(), Some("Switch to RGB"));
    }

    #[test]
    fn test_shuffle_is_one_batch() {
        let mut session = Session::open(MemoryStore::new(), &no_auto_save()).with_seed(7);
        session.apply(FieldEdit::SetField(Field::Alpha, 0.25));

        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        session
            .model()
            .subscribe(move |_: &Rgba| *sink.borrow_mut() += 1);

        let before = session.state();
        session.shuffle();

        assert_eq!(*count.borrow(), 1 + 1);
        assert_eq!(session.state().alpha, 0.25);
        assert_eq!(session.state().mode, before.mode);
        assert_eq!(session.history().undo_description(), Some("Shuffle"));

        assert!(session.undo());
        assert_eq!(session.state(), before);
        assert_eq!(*count.borrow(), 1 + 2);
    }

    #[test]
    fn test_seeded_shuffle_is_repeatable() {
        let mut a = Session::open(MemoryStore::new(), &no_auto_save()).with_seed(42);
        let mut b = Session::open(MemoryStore::new(), &no_auto_save()).with_seed(42);
        a.shuffle();
        b.shuffle();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_tick_saves_after_debounce() {
        let options = SessionOptions {
            auto_save: true,
            auto_save_debounce: Duration::from_secs(2),
            auto_save_min_interval: Duration::ZERO,
            ..SessionOptions::default()
        };
        let store = MemoryStore::new();
        let mut session = Session::open(&store, &options);

        session.apply(FieldEdit::SetField(red(), 0.1));
        let now = Instant::now();
        assert!(session.tick_at(now).is_none());

        let result = session.tick_at(now + Duration::from_secs(5));
        assert!(matches!(result, Some(Ok(()))));
        assert!(!session.is_dirty());
        assert_eq!(store.saved(), Some(session.state()));
    }

    #[test]
    fn test_close_saves_pending_changes() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store, &no_auto_save());
        session.apply(FieldEdit::ConvertMode(ColorMode::Hsb));
        let state = session.state();

        session.close().unwrap();
        assert_eq!(store.saved(), Some(state));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_close_without_changes_does_not_save() {
        let store = MemoryStore::new();
        let session = Session::open(&store, &no_auto_save());
        session.close().unwrap();
        assert_eq!(store.save_count(), 0);
    }
}
