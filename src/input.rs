//! Input events from sliders, text fields and the command line.
//!
//! Controls deliver discrete [`FieldEdit`]s. Text fields go through
//! [`parse_field_value`] first; the headless binary reads whole lines and
//! parses them into [`Command`]s.

use std::str::FromStr;

use crate::error::InputError;
use crate::model::{ColorMode, Component, Field};

/// One discrete edit from an input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEdit {
    /// Slider or text field changed a value. Clamped by the model.
    SetField(Field, f32),
    /// Mode selector changed; values are reinterpreted
    SetMode(ColorMode),
    /// Mode changed with values converted to the new space
    ConvertMode(ColorMode),
}

/// Parse text field content into a field value.
///
/// Any finite decimal is accepted; range checking is left to the model,
/// which clamps.
pub fn parse_field_value(text: &str) -> Result<f32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    match trimmed.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::NotANumber(trimmed.to_string())),
    }
}

/// Parse a field name: a 1-based index, `alpha`/`a`, or a channel name of
/// either mode (`r`, `hue`, ...).
pub fn parse_field(name: &str) -> Result<Field, InputError> {
    let lowered = name.trim().to_ascii_lowercase();
    let field = match lowered.as_str() {
        "1" | "r" | "red" | "h" | "hue" => Field::Component(Component::First),
        "2" | "g" | "green" | "s" | "sat" | "saturation" => Field::Component(Component::Second),
        "3" | "b" | "blue" | "v" | "bri" | "brightness" => Field::Component(Component::Third),
        "4" | "a" | "alpha" => Field::Alpha,
        _ => return Err(InputError::UnknownField(name.trim().to_string())),
    };
    Ok(field)
}

/// Parse a mode name (`rgb` or `hsb`, `hsv` accepted).
pub fn parse_mode(name: &str) -> Result<ColorMode, InputError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rgb" => Ok(ColorMode::Rgb),
        "hsb" | "hsv" => Ok(ColorMode::Hsb),
        _ => Err(InputError::UnknownMode(name.trim().to_string())),
    }
}

/// A line command for a headless editing session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Apply an edit
    Edit(FieldEdit),
    /// Reinterpret the values in the other mode
    ToggleMode,
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Pick a random color
    Shuffle,
    /// Print the current color
    Show,
    /// Persist the current color now
    Save,
    /// Print usage
    Help,
    /// End the session
    Quit,
}

/// Usage text for the line commands.
pub const COMMAND_HELP: &str = "\
commands:
  set <field> <value>   set 1|2|3|alpha (or r/g/b, h/s/v) to a value in 0..1
  mode <rgb|hsb>        reinterpret the current values in another mode
  convert <rgb|hsb>     switch mode keeping the visible color
  toggle                flip between rgb and hsb without converting
  undo | redo           step through history
  shuffle               pick a random color
  show                  print the current color
  save                  save the color now
  help                  this text
  quit                  save and exit";

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(InputError::Empty);
        };
        let word = word.to_ascii_lowercase();

        let command = match word.as_str() {
            "set" => {
                let field = words
                    .next()
                    .ok_or_else(|| InputError::missing_argument(&word, "a field and a value"))?;
                let value = words
                    .next()
                    .ok_or_else(|| InputError::missing_argument(&word, "a value"))?;
                Command::Edit(FieldEdit::SetField(
                    parse_field(field)?,
                    parse_field_value(value)?,
                ))
            }
            "mode" => {
                let mode = words
                    .next()
                    .ok_or_else(|| InputError::missing_argument(&word, "rgb or hsb"))?;
                Command::Edit(FieldEdit::SetMode(parse_mode(mode)?))
            }
            "convert" => {
                let mode = words
                    .next()
                    .ok_or_else(|| InputError::missing_argument(&word, "rgb or hsb"))?;
                Command::Edit(FieldEdit::ConvertMode(parse_mode(mode)?))
            }
            "toggle" | "t" => Command::ToggleMode,
            "undo" | "u" => Command::Undo,
            "redo" => Command::Redo,
            "shuffle" => Command::Shuffle,
            "show" | "p" => Command::Show,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(InputError::UnknownCommand(word)),
        };
        Ok(command)
    }
}
