//! Paints that are turned into shading patterns.
//!
//! Gradients are plain descriptions: creating one doesn't validate anything or
//! allocate any objects. That only happens once a gradient is handed to
//! [`Page::find_or_create_linear_pattern`] or [`Page::find_or_create_radial_pattern`],
//! which deduplicate structurally equal gradients per page.
//!
//! [`Page::find_or_create_linear_pattern`]: crate::page::Page::find_or_create_linear_pattern
//! [`Page::find_or_create_radial_pattern`]: crate::page::Page::find_or_create_radial_pattern

use crate::error::{GradientError, QuireResult};
use crate::util::float_key;

/// An 8-bit RGBA color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Create a new opaque color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self::new_rgba(r, g, b, 255)
    }

    /// Create a new color with an alpha channel.
    pub fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The black color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// The white color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// The alpha channel.
    pub fn alpha(&self) -> u8 {
        self.a
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub(crate) fn to_pdf_color(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// A gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stop {
    /// The offset of the stop, between 0 and 1.
    pub offset: f32,
    /// The color of the stop.
    pub color: Color,
}

impl Stop {
    /// Create a new stop.
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How a gradient behaves outside of its defined area.
///
/// Only [`SpreadMethod::Pad`] is drawn as requested. Reflect and repeat are
/// still drawn like pad, and a warning is logged when a gradient uses them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SpreadMethod {
    /// Extend the end colors.
    #[default]
    Pad,
    /// Mirror the gradient.
    Reflect,
    /// Repeat the gradient.
    Repeat,
}

/// A linear gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// The x coordinate of the first point.
    pub x1: f32,
    /// The y coordinate of the first point.
    pub y1: f32,
    /// The x coordinate of the second point.
    pub x2: f32,
    /// The y coordinate of the second point.
    pub y2: f32,
    /// The stops of the gradient.
    pub stops: Vec<Stop>,
    /// The spread method of the gradient.
    pub spread_method: SpreadMethod,
}

impl LinearGradient {
    /// Create a gradient that goes from `c1` at `(x1, y1)` to `c2` at `(x2, y2)`.
    ///
    /// A cyclic gradient is mirrored beyond its end points.
    pub fn two_color(
        (x1, y1): (f32, f32),
        c1: Color,
        (x2, y2): (f32, f32),
        c2: Color,
        cyclic: bool,
    ) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stops: vec![Stop::new(0.0, c1), Stop::new(1.0, c2)],
            spread_method: if cyclic {
                SpreadMethod::Reflect
            } else {
                SpreadMethod::Pad
            },
        }
    }

    pub(crate) fn validate(&self) -> QuireResult<()> {
        check_finite(&[self.x1, self.y1, self.x2, self.y2])?;
        validate_stops(&self.stops)
    }

    pub(crate) fn fingerprint(&self) -> PatternKey {
        PatternKey::Linear {
            coords: [self.x1, self.y1, self.x2, self.y2].map(float_key),
            stops: StopsKey::new(&self.stops),
            spread_method: self.spread_method,
        }
    }
}

/// A radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// The x coordinate of the focal point.
    pub fx: f32,
    /// The y coordinate of the focal point.
    pub fy: f32,
    /// The x coordinate of the center.
    pub cx: f32,
    /// The y coordinate of the center.
    pub cy: f32,
    /// The radius of the end circle.
    pub radius: f32,
    /// The stops of the gradient.
    pub stops: Vec<Stop>,
    /// The spread method of the gradient.
    pub spread_method: SpreadMethod,
}

impl RadialGradient {
    pub(crate) fn validate(&self) -> QuireResult<()> {
        check_finite(&[self.fx, self.fy, self.cx, self.cy, self.radius])?;

        if self.radius < 0.0 {
            return Err(GradientError::NegativeRadius(self.radius).into());
        }

        validate_stops(&self.stops)
    }

    pub(crate) fn fingerprint(&self) -> PatternKey {
        PatternKey::Radial {
            coords: [self.fx, self.fy, self.cx, self.cy, self.radius].map(float_key),
            stops: StopsKey::new(&self.stops),
            spread_method: self.spread_method,
        }
    }
}

fn check_finite(values: &[f32]) -> QuireResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GradientError::NonFiniteGeometry.into())
    }
}

/// Check that there are at least two stops, and that their offsets are in
/// `[0, 1]` and strictly increasing.
pub(crate) fn validate_stops(stops: &[Stop]) -> QuireResult<()> {
    if stops.len() < 2 {
        return Err(GradientError::TooFewStops(stops.len()).into());
    }

    if let Some(stop) = stops
        .iter()
        .find(|s| !(0.0..=1.0).contains(&s.offset))
    {
        return Err(GradientError::OffsetOutOfRange(stop.offset).into());
    }

    if stops.windows(2).any(|w| w[0].offset >= w[1].offset) {
        return Err(GradientError::NonIncreasingOffsets.into());
    }

    Ok(())
}

/// The stops of a gradient, in a form that can be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StopsKey {
    stops: Vec<(u32, Color)>,
    /// Whether any of the stops is translucent.
    translucent: bool,
}

impl StopsKey {
    fn new(stops: &[Stop]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|s| (float_key(s.offset), s.color))
                .collect(),
            translucent: stops.iter().any(|s| !s.color.is_opaque()),
        }
    }
}

/// The fingerprint of a gradient. Two gradients with the same fingerprint
/// result in the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PatternKey {
    Linear {
        coords: [u32; 4],
        stops: StopsKey,
        spread_method: SpreadMethod,
    },
    Radial {
        coords: [u32; 5],
        stops: StopsKey,
        spread_method: SpreadMethod,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuireError;

    fn red_to_blue() -> LinearGradient {
        LinearGradient::two_color(
            (0.0, 0.0),
            Color::new(255, 0, 0),
            (100.0, 0.0),
            Color::new(0, 0, 255),
            false,
        )
    }

    #[test]
    fn equal_gradients_share_fingerprint() {
        assert_eq!(red_to_blue().fingerprint(), red_to_blue().fingerprint());
    }

    #[test]
    fn negative_zero_is_zero() {
        let mut other = red_to_blue();
        other.y1 = -0.0;
        assert_eq!(red_to_blue().fingerprint(), other.fingerprint());
    }

    #[test]
    fn every_attribute_is_part_of_the_fingerprint() {
        let base = red_to_blue().fingerprint();

        let mut moved = red_to_blue();
        moved.x2 = 50.0;
        assert_ne!(moved.fingerprint(), base);

        let mut cyclic = red_to_blue();
        cyclic.spread_method = SpreadMethod::Reflect;
        assert_ne!(cyclic.fingerprint(), base);

        let mut translucent = red_to_blue();
        translucent.stops[1].color = Color::new_rgba(0, 0, 255, 128);
        assert_ne!(translucent.fingerprint(), base);
    }

    #[test]
    fn linear_and_radial_never_collide() {
        let radial = RadialGradient {
            fx: 0.0,
            fy: 0.0,
            cx: 0.0,
            cy: 0.0,
            radius: 100.0,
            stops: red_to_blue().stops,
            spread_method: SpreadMethod::Pad,
        };

        assert_ne!(radial.fingerprint(), red_to_blue().fingerprint());
    }

    #[test]
    fn stop_validation() {
        let c = Color::black();
        assert!(validate_stops(&[Stop::new(0.0, c), Stop::new(1.0, c)]).is_ok());
        assert_eq!(
            validate_stops(&[Stop::new(0.0, c)]),
            Err(QuireError::MalformedGradient(GradientError::TooFewStops(1)))
        );
        assert_eq!(
            validate_stops(&[Stop::new(0.5, c), Stop::new(0.5, c)]),
            Err(QuireError::MalformedGradient(GradientError::NonIncreasingOffsets))
        );
        assert_eq!(
            validate_stops(&[Stop::new(0.0, c), Stop::new(1.5, c)]),
            Err(QuireError::MalformedGradient(GradientError::OffsetOutOfRange(1.5)))
        );
        assert!(validate_stops(&[Stop::new(f32::NAN, c), Stop::new(1.0, c)]).is_err());
    }

    #[test]
    fn radial_validation() {
        let mut radial = RadialGradient {
            fx: 0.0,
            fy: 0.0,
            cx: 0.0,
            cy: 0.0,
            radius: -1.0,
            stops: red_to_blue().stops,
            spread_method: SpreadMethod::Pad,
        };
        assert_eq!(
            radial.validate(),
            Err(QuireError::MalformedGradient(GradientError::NegativeRadius(-1.0)))
        );

        radial.radius = 10.0;
        radial.cx = f32::INFINITY;
        assert_eq!(
            radial.validate(),
            Err(QuireError::MalformedGradient(GradientError::NonFiniteGeometry))
        );
    }
}
