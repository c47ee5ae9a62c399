//! Shadings and shading patterns.

use crate::error::QuireResult;
use crate::object::dict::{Dictionary, Value};
use crate::object::function::GradientFunction;
use crate::object::{DictObject, ObjectId};
use crate::paint::{LinearGradient, RadialGradient, SpreadMethod};
use crate::serialize::SerializeContext;
use crate::util::TransformExt;
use crate::Transform;

/// Where a shading is anchored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShadingGeometry {
    Axial { coords: [f32; 4] },
    Radial { coords: [f32; 6] },
}

impl ShadingGeometry {
    fn shading_type(&self) -> i32 {
        match self {
            ShadingGeometry::Axial { .. } => 2,
            ShadingGeometry::Radial { .. } => 3,
        }
    }

    fn coords(&self) -> Value {
        match self {
            ShadingGeometry::Axial { coords } => Value::reals(*coords),
            ShadingGeometry::Radial { coords } => Value::reals(*coords),
        }
    }
}

/// A gradient that is ready to be added to a document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShadingPattern {
    function: GradientFunction,
    geometry: ShadingGeometry,
    matrix: Transform,
}

impl ShadingPattern {
    pub(crate) fn from_linear(gradient: &LinearGradient, matrix: Transform) -> QuireResult<Self> {
        gradient.validate()?;
        warn_spread_method(gradient.spread_method);

        Ok(Self {
            function: GradientFunction::synthesize(&gradient.stops)?,
            geometry: ShadingGeometry::Axial {
                coords: [gradient.x1, gradient.y1, gradient.x2, gradient.y2],
            },
            matrix,
        })
    }

    /// The start circle is the focal point with radius zero, the end circle
    /// is the center with the gradient's radius.
    pub(crate) fn from_radial(gradient: &RadialGradient, matrix: Transform) -> QuireResult<Self> {
        gradient.validate()?;
        warn_spread_method(gradient.spread_method);

        Ok(Self {
            function: GradientFunction::synthesize(&gradient.stops)?,
            geometry: ShadingGeometry::Radial {
                coords: [
                    gradient.fx,
                    gradient.fy,
                    0.0,
                    gradient.cx,
                    gradient.cy,
                    gradient.radius,
                ],
            },
            matrix,
        })
    }

    fn shading_dictionary(&self, function: ObjectId) -> Dictionary {
        Dictionary::new()
            .with("ShadingType", self.geometry.shading_type())
            .with("ColorSpace", Value::name("DeviceRGB"))
            .with("Coords", self.geometry.coords())
            .with("Function", function)
            .with("Extend", Value::Array(vec![true.into(), true.into()]))
    }

    fn pattern_dictionary(&self, shading: ObjectId) -> Dictionary {
        Dictionary::new()
            .with("Type", Value::name("Pattern"))
            .with("PatternType", 2)
            .with("Shading", shading)
            .with("Matrix", Value::reals(self.matrix.to_pdf_transform()))
    }

    /// Add the function, the shading and the pattern to the document, in that
    /// order, and return the identity of the pattern.
    pub(crate) fn register(&self, sc: &mut SerializeContext) -> ObjectId {
        let function_id = self.function.register(sc);

        let shading_id = sc.new_id();
        sc.add_object(DictObject::new(
            shading_id,
            self.shading_dictionary(function_id),
        ));

        let pattern_id = sc.new_id();
        sc.add_object(DictObject::new(
            pattern_id,
            self.pattern_dictionary(shading_id),
        ));

        pattern_id
    }
}

fn warn_spread_method(spread_method: SpreadMethod) {
    if spread_method != SpreadMethod::Pad {
        log::warn!("spread method {:?} is drawn as pad", spread_method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GradientError, QuireError};
    use crate::page::page_root_transform;
    use crate::paint::{Color, Stop};
    use crate::util::test_utils::settings_1;

    fn linear() -> LinearGradient {
        LinearGradient::two_color(
            (10.0, 20.0),
            Color::new(255, 0, 0),
            (110.0, 20.0),
            Color::new(0, 0, 255),
            false,
        )
    }

    #[test]
    fn axial_objects_in_order() {
        let mut sc = SerializeContext::new(settings_1());
        let pattern = ShadingPattern::from_linear(&linear(), page_root_transform(100.0)).unwrap();
        let id = pattern.register(&mut sc);

        // Function, shading, pattern.
        assert_eq!(sc.object_count(), 3);
        let ids = sc.objects().map(|o| o.id()).collect::<Vec<_>>();
        assert_eq!(ids.last(), Some(&id));

        let object = sc.objects().find(|o| o.id() == id).unwrap();
        let text = String::from_utf8(object.to_bytes(&settings_1())).unwrap();
        assert!(text.contains("/PatternType 2"));
        assert!(text.contains(&format!("/Shading {}", ids[1])));
        assert!(text.contains("/Matrix [1 0 0 -1 0 100]"));
    }

    #[test]
    fn axial_shading() {
        let pattern = ShadingPattern::from_linear(&linear(), Transform::identity()).unwrap();
        let dict = pattern.shading_dictionary(ObjectId::new(9));

        assert_eq!(dict.get("ShadingType"), Some(&Value::Integer(2)));
        assert_eq!(dict.get("ColorSpace"), Some(&Value::name("DeviceRGB")));
        assert_eq!(
            dict.get("Coords"),
            Some(&Value::reals([10.0, 20.0, 110.0, 20.0]))
        );
        assert_eq!(dict.get("Function"), Some(&Value::Reference(ObjectId::new(9))));
    }

    #[test]
    fn radial_shading() {
        let gradient = RadialGradient {
            fx: 5.0,
            fy: 6.0,
            cx: 50.0,
            cy: 60.0,
            radius: 40.0,
            stops: vec![
                Stop::new(0.0, Color::white()),
                Stop::new(0.5, Color::new(255, 0, 0)),
                Stop::new(1.0, Color::black()),
            ],
            spread_method: SpreadMethod::Pad,
        };
        let pattern = ShadingPattern::from_radial(&gradient, Transform::identity()).unwrap();
        let dict = pattern.shading_dictionary(ObjectId::new(9));

        assert_eq!(dict.get("ShadingType"), Some(&Value::Integer(3)));
        assert_eq!(
            dict.get("Coords"),
            Some(&Value::reals([5.0, 6.0, 0.0, 50.0, 60.0, 40.0]))
        );

        let mut sc = SerializeContext::new(settings_1());
        pattern.register(&mut sc);
        // Two sub-functions, the stitching function, the shading and the pattern.
        assert_eq!(sc.object_count(), 5);
    }

    #[test]
    fn cyclic_gradient_is_drawn_padded() {
        let mut cyclic = linear();
        cyclic.spread_method = SpreadMethod::Reflect;

        let padded = ShadingPattern::from_linear(&linear(), Transform::identity()).unwrap();
        let cyclic = ShadingPattern::from_linear(&cyclic, Transform::identity()).unwrap();

        assert_eq!(padded, cyclic);
        assert_eq!(
            cyclic.shading_dictionary(ObjectId::new(9)).get("Extend"),
            Some(&Value::Array(vec![true.into(), true.into()]))
        );
    }

    #[test]
    fn invalid_gradient_is_rejected_early() {
        let mut gradient = linear();
        gradient.stops.truncate(1);

        assert_eq!(
            ShadingPattern::from_linear(&gradient, Transform::identity()),
            Err(QuireError::MalformedGradient(GradientError::TooFewStops(1)))
        );
    }
}
