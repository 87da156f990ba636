//! Identifiers for the editable fields of a color.

use super::ColorMode;

/// One of the three mode-dependent color components.
///
/// In RGB mode these are red, green and blue; in HSB mode hue, saturation
/// and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// `color1`: red or hue
    First,
    /// `color2`: green or saturation
    Second,
    /// `color3`: blue or brightness
    Third,
}

impl Component {
    /// Map a 1-based component index to a component.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(Component::First),
            2 => Some(Component::Second),
            3 => Some(Component::Third),
            _ => None,
        }
    }

    /// The 1-based index of this component.
    pub fn index(self) -> usize {
        match self {
            Component::First => 1,
            Component::Second => 2,
            Component::Third => 3,
        }
    }

    /// All components in order.
    pub fn all() -> [Component; 3] {
        [Component::First, Component::Second, Component::Third]
    }

    /// Display name under the given interpretation mode.
    pub fn label(self, mode: ColorMode) -> &'static str {
        match (mode, self) {
            (ColorMode::Rgb, Component::First) => "Red",
            (ColorMode::Rgb, Component::Second) => "Green",
            (ColorMode::Rgb, Component::Third) => "Blue",
            (ColorMode::Hsb, Component::First) => "Hue",
            (ColorMode::Hsb, Component::Second) => "Saturation",
            (ColorMode::Hsb, Component::Third) => "Brightness",
        }
    }
}

/// A scalar field an input control can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// One of `color1..3`
    Component(Component),
    /// Opacity
    Alpha,
}

impl Field {
    /// Every slider-backed field, in display order.
    pub fn all() -> [Field; 4] {
        [
            Field::Component(Component::First),
            Field::Component(Component::Second),
            Field::Component(Component::Third),
            Field::Alpha,
        ]
    }

    /// Display name under the given interpretation mode.
    pub fn label(self, mode: ColorMode) -> &'static str {
        match self {
            Field::Component(component) => component.label(mode),
            Field::Alpha => "Alpha",
        }
    }
}

impl From<Component> for Field {
    fn from(component: Component) -> Self {
        Field::Component(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_index_round_trip() {
        for component in Component::all() {
            assert_eq!(Component::from_index(component.index()), Some(component));
        }
        assert_eq!(Component::from_index(0), None);
        assert_eq!(Component::from_index(4), None);
    }

    #[test]
    fn test_labels_follow_mode() {
        let first = Field::Component(Component::First);
        assert_eq!(first.label(ColorMode::Rgb), "Red");
        assert_eq!(first.label(ColorMode::Hsb), "Hue");
        assert_eq!(Field::Alpha.label(ColorMode::Hsb), "Alpha");
    }
}
