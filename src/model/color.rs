//! The persisted color record and its derived display color.
//!
//! A color is stored as a mode flag plus three mode-dependent components and
//! an alpha. The same three numbers are read as red/green/blue in RGB mode
//! and as hue/saturation/brightness in HSB mode.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use super::{Component, Field, Rgba};
use crate::color_utils::{clamp_unit, hsb_to_rgb, rgb_to_hsb};
use crate::constants::{DEFAULT_ALPHA, DEFAULT_COMPONENT};
use crate::signal::{Signal, SubscriptionId};

/// How the three color components are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Red, green, blue
    #[default]
    Rgb,
    /// Hue, saturation, brightness
    Hsb,
}

impl ColorMode {
    /// Build a mode from the persisted boolean flag (`true` = HSB).
    pub fn from_flag(hsb: bool) -> Self {
        if hsb { ColorMode::Hsb } else { ColorMode::Rgb }
    }

    /// The persisted boolean flag for this mode.
    pub fn flag(self) -> bool {
        self == ColorMode::Hsb
    }

    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Rgb => "RGB",
            ColorMode::Hsb => "HSB",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Rgb => ColorMode::Hsb,
            ColorMode::Hsb => ColorMode::Rgb,
        }
    }
}

/// Plain-data snapshot of a color record.
///
/// This is what gets persisted and what undo history stores. Values are
/// expected in `0.0..=1.0`; [`ColorState::clamped`] enforces it and
/// [`ColorModel`] applies it on every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorState {
    /// Interpretation of `color1..3`
    #[serde(default)]
    pub mode: ColorMode,
    /// Red or hue
    pub color1: f32,
    /// Green or saturation
    pub color2: f32,
    /// Blue or brightness
    pub color3: f32,
    /// Opacity
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

fn default_alpha() -> f32 {
    DEFAULT_ALPHA
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            mode: ColorMode::default(),
            color1: DEFAULT_COMPONENT,
            color2: DEFAULT_COMPONENT,
            color3: DEFAULT_COMPONENT,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ColorState {
    /// Create a snapshot, clamping every scalar into range.
    pub fn new(mode: ColorMode, color1: f32, color2: f32, color3: f32, alpha: f32) -> Self {
        Self {
            mode,
            color1,
            color2,
            color3,
            alpha,
        }
        .clamped()
    }

    /// Copy with every scalar clamped into `0.0..=1.0`.
    pub fn clamped(self) -> Self {
        Self {
            mode: self.mode,
            color1: clamp_unit(self.color1),
            color2: clamp_unit(self.color2),
            color3: clamp_unit(self.color3),
            alpha: clamp_unit(self.alpha),
        }
    }

    /// Read one of the three components.
    pub fn component(&self, component: Component) -> f32 {
        match component {
            Component::First => self.color1,
            Component::Second => self.color2,
            Component::Third => self.color3,
        }
    }

    /// Write one of the three components, clamped.
    pub fn set_component(&mut self, component: Component, value: f32) {
        let value = clamp_unit(value);
        match component {
            Component::First => self.color1 = value,
            Component::Second => self.color2 = value,
            Component::Third => self.color3 = value,
        }
    }

    /// Read any editable field.
    pub fn field(&self, field: Field) -> f32 {
        match field {
            Field::Component(component) => self.component(component),
            Field::Alpha => self.alpha,
        }
    }

    /// Write any editable field, clamped.
    pub fn set_field(&mut self, field: Field, value: f32) {
        match field {
            Field::Component(component) => self.set_component(component, value),
            Field::Alpha => self.alpha = clamp_unit(value),
        }
    }

    /// The renderable color for the current mode and components.
    pub fn derived_color(&self) -> Rgba {
        let (r, g, b) = match self.mode {
            ColorMode::Rgb => (self.color1, self.color2, self.color3),
            ColorMode::Hsb => hsb_to_rgb(self.color1, self.color2, self.color3),
        };
        Rgba::new(r, g, b, self.alpha)
    }

    /// The same visible color expressed in `mode`.
    ///
    /// Unlike changing `mode` directly, this converts the component values.
    pub fn converted_to(&self, mode: ColorMode) -> Self {
        if mode == self.mode {
            return *self;
        }

        let (c1, c2, c3) = match mode {
            ColorMode::Hsb => rgb_to_hsb(self.color1, self.color2, self.color3),
            ColorMode::Rgb => hsb_to_rgb(self.color1, self.color2, self.color3),
        };
        Self::new(mode, c1, c2, c3, self.alpha)
    }
}

/// A live color record.
///
/// All mutators take `&self`: the model is meant to be shared through an
/// `Rc` between input handlers, history and renderers on one thread. Every
/// mutation publishes exactly one derived color to the color stream.
#[derive(Debug)]
pub struct ColorModel {
    state: Cell<ColorState>,
    stream: Signal<ColorState>,
}

impl ColorModel {
    /// Create a color with the default field values: RGB mode, every
    /// component at 0.5 (neutral gray), fully opaque.
    pub fn create_color() -> Self {
        Self::from_state(ColorState::default())
    }

    /// Create a color from a saved snapshot. Out-of-range values are clamped.
    pub fn from_state(state: ColorState) -> Self {
        Self {
            state: Cell::new(state.clamped()),
            stream: Signal::new(),
        }
    }

    /// Current snapshot of all fields.
    pub fn state(&self) -> ColorState {
        self.state.get()
    }

    /// Current interpretation mode.
    pub fn mode(&self) -> ColorMode {
        self.state.get().mode
    }

    /// Current value of one component.
    pub fn component(&self, component: Component) -> f32 {
        self.state.get().component(component)
    }

    /// Current value of any editable field.
    pub fn field(&self, field: Field) -> f32 {
        self.state.get().field(field)
    }

    /// Current opacity.
    pub fn alpha(&self) -> f32 {
        self.state.get().alpha
    }

    /// Switch interpretation mode without touching the stored numbers.
    pub fn set_mode(&self, mode: ColorMode) {
        log::debug!("Color: mode -> {}", mode.name());
        self.update(|state| state.mode = mode);
    }

    /// Switch mode and convert the components so the visible color stays
    /// the same.
    pub fn convert_mode(&self, mode: ColorMode) {
        log::debug!("Color: convert to {}", mode.name());
        self.update(|state| *state = state.converted_to(mode));
    }

    /// Set `color1`, `color2` or `color3`, clamped to `0.0..=1.0`.
    pub fn set_component(&self, component: Component, value: f32) {
        log::trace!("Color: color{} = {}", component.index(), value);
        self.update(|state| state.set_component(component, value));
    }

    /// Set the opacity, clamped to `0.0..=1.0`.
    pub fn set_alpha(&self, value: f32) {
        log::trace!("Color: alpha = {}", value);
        self.update(|state| state.alpha = value);
    }

    /// Set any editable field, clamped.
    pub fn set_field(&self, field: Field, value: f32) {
        match field {
            Field::Component(component) => self.set_component(component, value),
            Field::Alpha => self.set_alpha(value),
        }
    }

    /// Replace every field at once (undo, redo, load). Publishes one color.
    pub fn restore(&self, state: ColorState) {
        log::debug!("Color: restored {:?}", state);
        self.update(|current| *current = state);
    }

    /// Apply an arbitrary batch edit. The result is clamped and exactly one
    /// color is published, however many fields changed.
    pub fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut ColorState),
    {
        let mut state = self.state.get();
        edit(&mut state);
        let state = state.clamped();
        self.state.set(state);
        self.stream.emit(state);
    }

    /// The renderable color for the current state.
    pub fn derived_color(&self) -> Rgba {
        self.state.get().derived_color()
    }

    /// Subscribe to the color stream.
    ///
    /// `callback` receives the current derived color immediately, then one
    /// color per later mutation for as long as it stays subscribed. Colors
    /// published by a callback's own mutations are delivered after the
    /// current notification pass, never inline.
    ///
    /// Callbacks that need the model should capture a `Weak` reference;
    /// a strong one would keep the model alive forever.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Rgba) + 'static,
    {
        self.subscribe_state(move |state: &ColorState| callback(&state.derived_color()))
    }

    /// Subscribe to the snapshots behind the color stream.
    ///
    /// Same delivery rules as [`ColorModel::subscribe`], but each event is the
    /// full [`ColorState`] that produced the color, so renderers needing more
    /// than the final color stay consistent with it.
    pub fn subscribe_state<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ColorState) + 'static,
    {
        self.stream.subscribe(self.state.get(), callback)
    }

    /// Stop delivering to a color or state subscriber.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.stream.unsubscribe(id)
    }

    /// Number of active color stream subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.stream.subscriber_count()
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::create_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f32 = 1e-6;

    fn collect(model: &ColorModel) -> Rc<RefCell<Vec<Rgba>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        model.subscribe(move |color: &Rgba| sink.borrow_mut().push(*color));
        seen
    }

    #[test]
    fn test_create_color_defaults() {
        let model = ColorModel::create_color();
        assert_eq!(model.mode(), ColorMode::Rgb);
        assert_eq!(model.derived_color(), Rgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_mode_flag_round_trip() {
        for mode in [ColorMode::Rgb, ColorMode::Hsb] {
            assert_eq!(ColorMode::from_flag(mode.flag()), mode);
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
        assert!(ColorMode::Hsb.flag());
        assert_eq!(ColorMode::from_flag(false), ColorMode::Rgb);
    }

    #[test]
    fn test_rgb_passthrough_is_exact() {
        let model = ColorModel::create_color();
        model.set_component(Component::First, 0.2);
        model.set_component(Component::Second, 0.4);
        model.set_component(Component::Third, 0.6);
        model.set_alpha(1.0);
        assert_eq!(model.derived_color(), Rgba::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn test_hsb_red() {
        let model = ColorModel::from_state(ColorState::new(ColorMode::Hsb, 0.0, 1.0, 1.0, 1.0));
        assert!(model.derived_color().approx_eq(Rgba::new(1.0, 0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_hsb_green_keeps_alpha() {
        let model =
            ColorModel::from_state(ColorState::new(ColorMode::Hsb, 1.0 / 3.0, 1.0, 1.0, 0.25));
        assert!(model.derived_color().approx_eq(Rgba::new(0.0, 1.0, 0.0, 0.25), EPS));
    }

    #[test]
    fn test_mode_switch_reinterprets_without_converting() {
        let model = ColorModel::create_color();
        model.restore(ColorState::new(ColorMode::Rgb, 0.2, 0.4, 0.6, 0.8));
        let before = model.state();
        let rgb_color = model.derived_color();

        model.set_mode(ColorMode::Hsb);
        assert_eq!(model.component(Component::First), 0.2);
        assert_eq!(model.component(Component::Second), 0.4);
        assert_eq!(model.component(Component::Third), 0.6);
        assert_eq!(model.alpha(), 0.8);
        assert_ne!(model.derived_color(), rgb_color);

        model.set_mode(ColorMode::Rgb);
        assert_eq!(model.state(), before);
        assert_eq!(model.derived_color(), rgb_color);
    }

    #[test]
    fn test_convert_mode_keeps_visible_color() {
        let model = ColorModel::from_state(ColorState::new(ColorMode::Rgb, 0.2, 0.4, 0.6, 0.5));
        let before = model.derived_color();

        model.convert_mode(ColorMode::Hsb);
        assert_eq!(model.mode(), ColorMode::Hsb);
        assert!(model.derived_color().approx_eq(before, 1e-5));

        model.convert_mode(ColorMode::Rgb);
        assert!(model.derived_color().approx_eq(before, 1e-5));
    }

    #[test]
    fn test_subscribe_yields_current_color_first() {
        let model = ColorModel::from_state(ColorState::new(ColorMode::Rgb, 0.1, 0.2, 0.3, 0.4));
        let seen = collect(&model);
        assert_eq!(*seen.borrow(), vec![model.derived_color()]);
    }

    #[test]
    fn test_one_event_per_mutation() {
        let model = ColorModel::create_color();
        let seen = collect(&model);

        model.set_component(Component::First, 0.9);
        model.set_component(Component::First, 0.9);
        model.set_alpha(2.0);
        model.set_mode(ColorMode::Hsb);

        assert_eq!(seen.borrow().len(), 1 + 4);
        assert_eq!(seen.borrow().last().copied(), Some(model.derived_color()));
    }

    #[test]
    fn test_restore_is_one_event() {
        let model = ColorModel::create_color();
        let seen = collect(&model);

        model.restore(ColorState::new(ColorMode::Hsb, 0.1, 0.2, 0.3, 0.4));

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(model.state(), ColorState::new(ColorMode::Hsb, 0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_restore_clamps() {
        let model = ColorModel::create_color();
        model.restore(ColorState {
            mode: ColorMode::Rgb,
            color1: -1.0,
            color2: 3.0,
            color3: f32::NAN,
            alpha: 1.5,
        });
        assert_eq!(model.state(), ColorState::new(ColorMode::Rgb, 0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_subscriber_mutation_is_deferred() {
        let model = Rc::new(ColorModel::create_color());
        let order = Rc::new(RefCell::new(Vec::new()));

        // Clamps alpha to at most 0.5 whenever it sees something more opaque
        let weak = Rc::downgrade(&model);
        let first = Rc::clone(&order);
        model.subscribe(move |color: &Rgba| {
            first.borrow_mut().push(("limiter", color.a));
            if color.a > 0.5 {
                if let Some(model) = weak.upgrade() {
                    model.set_alpha(0.5);
                }
            }
        });

        let second = Rc::clone(&order);
        model.subscribe(move |color: &Rgba| second.borrow_mut().push(("view", color.a)));

        order.borrow_mut().clear();
        model.set_alpha(0.9);

        assert_eq!(
            *order.borrow(),
            vec![("limiter", 0.9), ("view", 0.9), ("limiter", 0.5), ("view", 0.5)]
        );
        assert_eq!(model.alpha(), 0.5);
    }

    #[test]
    fn test_state_stream_matches_color_stream() {
        let model = ColorModel::create_color();
        let colors = collect(&model);
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        model.subscribe_state(move |state: &ColorState| sink.borrow_mut().push(*state));

        model.set_mode(ColorMode::Hsb);
        model.set_alpha(0.4);

        let states = states.borrow();
        assert_eq!(states.len(), 3);
        assert_eq!(states[2].alpha, 0.4);
        let derived: Vec<Rgba> = states.iter().map(ColorState::derived_color).collect();
        assert_eq!(derived, *colors.borrow());
    }

    #[test]
    fn test_unsubscribed_view_stops_receiving() {
        let model = ColorModel::create_color();
        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);
        let id = model.subscribe(move |_: &Rgba| *sink.borrow_mut() += 1);

        model.set_alpha(0.3);
        assert!(model.unsubscribe(id));
        model.set_alpha(0.4);

        assert_eq!(*seen.borrow(), 2);
        assert_eq!(model.subscriber_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_components_are_clamped(value in -1e6f32..1e6f32, index in 1usize..=3) {
            let model = ColorModel::create_color();
            let component = Component::from_index(index).unwrap();
            model.set_component(component, value);
            prop_assert_eq!(model.component(component), value.clamp(0.0, 1.0));
        }

        #[test]
        fn prop_alpha_is_clamped(value in -1e6f32..1e6f32) {
            let model = ColorModel::create_color();
            model.set_alpha(value);
            prop_assert_eq!(model.alpha(), value.clamp(0.0, 1.0));
        }

        #[test]
        fn prop_derived_color_in_range(
            hsb in any::<bool>(),
            c1 in 0.0f32..=1.0,
            c2 in 0.0f32..=1.0,
            c3 in 0.0f32..=1.0,
        ) {
            let state = ColorState::new(ColorMode::from_flag(hsb), c1, c2, c3, 1.0);
            for channel in state.derived_color().to_array() {
                prop_assert!((-EPS..=1.0 + EPS).contains(&channel));
            }
        }
    }
}
