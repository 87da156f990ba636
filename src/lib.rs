//! Reactive Color - a color model with live RGB/HSB derivation.
//!
//! A [`ColorModel`] stores a mode flag, three mode-dependent components and an
//! alpha. It derives a renderable [`Rgba`] from them and pushes that color to
//! subscribers on every change. Around it sit the pieces an editor needs:
//! undo/redo history, gradient swatches, input parsing and persistence of the
//! last-used color.
//!
//! ```
//! use reactive_color::{ColorMode, ColorModel, Component, Rgba};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let model = ColorModel::create_color();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! model.subscribe(move |color: &Rgba| sink.borrow_mut().push(*color));
//!
//! model.set_mode(ColorMode::Hsb);
//! model.set_component(Component::First, 0.0);
//! model.set_component(Component::Second, 1.0);
//! model.set_component(Component::Third, 1.0);
//!
//! assert_eq!(seen.borrow().len(), 5);
//! assert!(model.derived_color().approx_eq(Rgba::new(1.0, 0.0, 0.0, 1.0), 1e-6));
//! ```

pub mod auto_save;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod error;
pub mod gradient;
pub mod history;
pub mod input;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod model;
pub mod session;
pub mod signal;
pub mod store;

pub use error::{InputError, StoreError};
pub use gradient::{Gradient, GradientStop, SwatchSet};
pub use history::{Action, ColorHistory, UndoStack};
pub use input::{Command, FieldEdit};
pub use model::{ColorMode, ColorModel, ColorState, Component, Field, Rgba};
pub use session::{Session, SessionOptions};
pub use signal::{Signal, SubscriptionId};
pub use store::{ColorStore, JsonFileStore, MemoryStore};
