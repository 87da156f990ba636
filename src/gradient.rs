//! Gradient swatches for the editable fields.
//!
//! Each slider is drawn over a gradient showing what the color would look
//! like as that field sweeps from 0 to 1 with every other field held fixed.
//! [`SwatchSet`] keeps one gradient per field in sync with a [`ColorModel`]
//! by subscribing to its state stream.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::constants::{DEFAULT_GRADIENT_STEPS, MIN_GRADIENT_STEPS};
use crate::model::{ColorMode, ColorModel, ColorState, Component, Field, Rgba};
use crate::signal::SubscriptionId;

/// A single gradient stop.
///
/// `offset` is in `0.0..=1.0` and equals the field value the stop shows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient
    pub offset: f32,
    /// Derived color with the field set to `offset`
    pub color: Rgba,
}

/// A linear gradient along one field.
///
/// Stops are sorted by offset; the first is at 0 and the last at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// The field this gradient sweeps
    pub field: Field,
    /// Stops in ascending offset order
    pub stops: Vec<GradientStop>,
}

/// Whether the derived color is linear in `field`, so two stops are exact.
///
/// Only HSB hue is piecewise; saturation and brightness scale the channels
/// linearly.
pub fn is_linear(mode: ColorMode, field: Field) -> bool {
    !(mode == ColorMode::Hsb && field == Field::Component(Component::First))
}

impl Gradient {
    /// Build the swatch for `field` around `state`.
    ///
    /// `steps` is the stop count used for non-linear fields; it is raised to
    /// at least two.
    pub fn for_field(state: &ColorState, field: Field, steps: usize) -> Self {
        let count = if is_linear(state.mode, field) {
            MIN_GRADIENT_STEPS
        } else {
            steps.max(MIN_GRADIENT_STEPS)
        };

        let last = (count - 1) as f32;
        let stops = (0..count)
            .map(|i| {
                let offset = i as f32 / last;
                let mut swept = *state;
                swept.set_field(field, offset);
                GradientStop {
                    offset,
                    color: swept.derived_color(),
                }
            })
            .collect();

        Self { field, stops }
    }

    /// Color at offset 0.
    pub fn start(&self) -> Rgba {
        self.stops.first().map(|s| s.color).unwrap_or_default()
    }

    /// Color at offset 1.
    pub fn end(&self) -> Rgba {
        self.stops.last().map(|s| s.color).unwrap_or_default()
    }

    /// Interpolated color at `t`, clamped to the gradient's range.
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let Some(upper) = self.stops.iter().position(|s| s.offset >= t) else {
            return self.end();
        };
        if upper == 0 {
            return self.start();
        }

        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let span = hi.offset - lo.offset;
        if span <= f32::EPSILON {
            return hi.color;
        }
        lo.color.lerp(hi.color, (t - lo.offset) / span)
    }
}

#[derive(Debug)]
struct SwatchState {
    canvas: Rgba,
    gradients: Vec<Gradient>,
    redraws: usize,
}

/// The canvas color plus one gradient per field, kept in sync with a model.
///
/// Attaching subscribes to the model's state stream; every published
/// snapshot triggers one redraw of the canvas and all four gradients, all
/// built from that same snapshot.
#[derive(Debug)]
pub struct SwatchSet {
    inner: Rc<RefCell<SwatchState>>,
    model: Weak<ColorModel>,
    subscription: SubscriptionId,
}

impl SwatchSet {
    /// Subscribe to `model` with the default hue stop count.
    pub fn attach(model: &Rc<ColorModel>) -> Self {
        Self::attach_with_steps(model, DEFAULT_GRADIENT_STEPS)
    }

    /// Subscribe to `model`, sampling non-linear gradients with `steps` stops.
    pub fn attach_with_steps(model: &Rc<ColorModel>, steps: usize) -> Self {
        let inner = Rc::new(RefCell::new(SwatchState {
            canvas: Rgba::default(),
            gradients: Vec::new(),
            redraws: 0,
        }));

        let sink = Rc::clone(&inner);
        let subscription = model.subscribe_state(move |state: &ColorState| {
            let mut swatches = sink.borrow_mut();
            swatches.canvas = state.derived_color();
            swatches.gradients = Field::all()
                .into_iter()
                .map(|field| Gradient::for_field(state, field, steps))
                .collect();
            swatches.redraws += 1;
            log::trace!("Swatches: redraw #{} for {}", swatches.redraws, swatches.canvas);
        });

        Self {
            inner,
            model: Rc::downgrade(model),
            subscription,
        }
    }

    /// The most recently delivered color.
    pub fn canvas(&self) -> Rgba {
        self.inner.borrow().canvas
    }

    /// Gradient for one field.
    pub fn gradient(&self, field: Field) -> Option<Gradient> {
        self.inner
            .borrow()
            .gradients
            .iter()
            .find(|g| g.field == field)
            .cloned()
    }

    /// All gradients in display order.
    ///
    /// The returned borrow must be released before the model is mutated.
    pub fn gradients(&self) -> Ref<'_, [Gradient]> {
        Ref::map(self.inner.borrow(), |s| s.gradients.as_slice())
    }

    /// Number of colors received so far, including the initial one.
    pub fn redraw_count(&self) -> usize {
        self.inner.borrow().redraws
    }

    /// Stop following the model.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for SwatchSet {
    fn drop(&mut self) {
        if let Some(model) = self.model.upgrade() {
            model.unsubscribe(self.subscription);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_rgb_gradient_endpoints() {
        let state = ColorState::new(ColorMode::Rgb, 0.2, 0.4, 0.6, 1.0);
        let gradient = Gradient::for_field(&state, Field::Component(Component::First), 7);

        assert_eq!(gradient.stops.len(), 2);
        assert!(gradient.start().approx_eq(Rgba::new(0.0, 0.4, 0.6, 1.0), EPS));
        assert!(gradient.end().approx_eq(Rgba::new(1.0, 0.4, 0.6, 1.0), EPS));
        assert!(gradient.sample(0.5).approx_eq(Rgba::new(0.5, 0.4, 0.6, 1.0), EPS));
    }

    #[test]
    fn test_alpha_gradient() {
        let state = ColorState::new(ColorMode::Hsb, 0.0, 1.0, 1.0, 0.3);
        let gradient = Gradient::for_field(&state, Field::Alpha, 7);

        assert_eq!(gradient.stops.len(), 2);
        assert!(gradient.start().approx_eq(Rgba::new(1.0, 0.0, 0.0, 0.0), EPS));
        assert!(gradient.end().approx_eq(Rgba::new(1.0, 0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_hue_gradient_hits_sector_boundaries() {
        let state = ColorState::new(ColorMode::Hsb, 0.5, 1.0, 1.0, 1.0);
        let gradient = Gradient::for_field(&state, Field::Component(Component::First), 7);

        assert_eq!(gradient.stops.len(), 7);
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        assert!(gradient.start().approx_eq(red, EPS));
        assert!(gradient.end().approx_eq(red, EPS));
        assert!(gradient.stops[2].color.approx_eq(Rgba::new(0.0, 1.0, 0.0, 1.0), EPS));
        assert!(gradient.stops[4].color.approx_eq(Rgba::new(0.0, 0.0, 1.0, 1.0), EPS));
    }

    #[test]
    fn test_sample_clamps() {
        let state = ColorState::default();
        let gradient = Gradient::for_field(&state, Field::Alpha, 2);
        assert_eq!(gradient.sample(-1.0), gradient.start());
        assert_eq!(gradient.sample(2.0), gradient.end());
    }

    #[test]
    fn test_swatches_follow_model() {
        let model = Rc::new(ColorModel::create_color());
        let swatches = SwatchSet::attach(&model);

        assert_eq!(swatches.redraw_count(), 1);
        assert_eq!(swatches.canvas(), model.derived_color());
        assert_eq!(swatches.gradients().len(), 4);

        model.set_mode(ColorMode::Hsb);
        assert_eq!(swatches.redraw_count(), 2);
        let hue = swatches
            .gradient(Field::Component(Component::First))
            .map(|g| g.stops.len());
        assert_eq!(hue, Some(DEFAULT_GRADIENT_STEPS));
        assert_eq!(swatches.canvas(), model.derived_color());
    }

    #[test]
    fn test_swatches_consistent_when_earlier_subscriber_mutates() {
        let model = Rc::new(ColorModel::create_color());

        // Registered before the swatches: caps alpha at 0.5
        let weak_model = Rc::downgrade(&model);
        model.subscribe(move |color: &Rgba| {
            if color.a > 0.5 {
                if let Some(model) = weak_model.upgrade() {
                    model.set_alpha(0.5);
                }
            }
        });

        let swatches = Rc::new(SwatchSet::attach(&model));
        let redraws = Rc::new(RefCell::new(Vec::new()));
        let weak_swatches = Rc::downgrade(&swatches);
        let sink = Rc::clone(&redraws);
        model.subscribe(move |_: &Rgba| {
            if let Some(swatches) = weak_swatches.upgrade() {
                let red_end = swatches
                    .gradient(Field::Component(Component::First))
                    .map(|g| g.end().a);
                sink.borrow_mut().push((swatches.canvas().a, red_end));
            }
        });

        redraws.borrow_mut().clear();
        model.set_alpha(0.9);

        assert_eq!(
            *redraws.borrow(),
            vec![(0.9, Some(0.9)), (0.5, Some(0.5))]
        );
        assert_eq!(swatches.redraw_count(), 3);
    }

    #[test]
    fn test_dropping_swatches_unsubscribes() {
        let model = Rc::new(ColorModel::create_color());
        let swatches = SwatchSet::attach(&model);
        assert_eq!(model.subscriber_count(), 1);

        swatches.detach();
        assert_eq!(model.subscriber_count(), 0);
    }
}
