//! Interpolation functions for gradients.
//!
//! A gradient with two stops becomes a single exponential interpolation function
//! over the two colors. A gradient with `n > 2` stops becomes `n - 1` such functions,
//! one for each pair of neighboring stops, glued together by a stitching function.
//! The interior stop offsets are the bounds of the stitching function.
//!
//! Since two neighboring functions share a stop, the resulting function is
//! continuous at every bound.

use crate::error::QuireResult;
use crate::object::dict::{Dictionary, Value};
use crate::object::{DictObject, ObjectId};
use crate::paint::{validate_stops, Stop};
use crate::serialize::SerializeContext;

/// An exponential interpolation function from `[0, 1]` to RGB.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExponentialFunction {
    pub c0: [f32; 3],
    pub c1: [f32; 3],
    pub n: f32,
}

impl ExponentialFunction {
    pub(crate) fn linear(c0: [f32; 3], c1: [f32; 3]) -> Self {
        Self { c0, c1, n: 1.0 }
    }

    #[cfg(test)]
    pub(crate) fn evaluate(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0).powf(self.n);
        std::array::from_fn(|i| self.c0[i] + t * (self.c1[i] - self.c0[i]))
    }

    fn to_dictionary(&self) -> Dictionary {
        Dictionary::new()
            .with("FunctionType", 2)
            .with("Domain", Value::reals([0.0, 1.0]))
            .with("C0", Value::reals(self.c0))
            .with("C1", Value::reals(self.c1))
            .with("N", self.n)
    }
}

/// Several exponential functions, each covering a sub-interval of `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StitchingFunction {
    functions: Vec<ExponentialFunction>,
    bounds: Vec<f32>,
    encode: Vec<f32>,
}

impl StitchingFunction {
    #[cfg(test)]
    pub(crate) fn functions(&self) -> &[ExponentialFunction] {
        &self.functions
    }

    #[cfg(test)]
    pub(crate) fn bounds(&self) -> &[f32] {
        &self.bounds
    }

    #[cfg(test)]
    pub(crate) fn evaluate(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        let index = self
            .bounds
            .iter()
            .position(|b| t < *b)
            .unwrap_or(self.bounds.len());

        let start = if index == 0 { 0.0 } else { self.bounds[index - 1] };
        let end = self.bounds.get(index).copied().unwrap_or(1.0);
        let (e0, e1) = (self.encode[2 * index], self.encode[2 * index + 1]);

        let local = if end > start { (t - start) / (end - start) } else { 0.0 };
        self.functions[index].evaluate(e0 + local * (e1 - e0))
    }

    fn to_dictionary(&self, functions: &[ObjectId]) -> Dictionary {
        Dictionary::new()
            .with("FunctionType", 3)
            .with("Domain", Value::reals([0.0, 1.0]))
            .with("Functions", Value::references(functions.iter().copied()))
            .with("Bounds", Value::reals(self.bounds.iter().copied()))
            .with("Encode", Value::reals(self.encode.iter().copied()))
    }
}

/// The function backing the shading of a gradient.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GradientFunction {
    Exponential(ExponentialFunction),
    Stitching(StitchingFunction),
}

impl GradientFunction {
    /// Build the function for a list of stops. Fails if the stops are malformed.
    pub(crate) fn synthesize(stops: &[Stop]) -> QuireResult<Self> {
        validate_stops(stops)?;

        if let [first, second] = stops {
            return Ok(Self::Exponential(ExponentialFunction::linear(
                first.color.to_pdf_color(),
                second.color.to_pdf_color(),
            )));
        }

        let functions = stops
            .windows(2)
            .map(|w| {
                ExponentialFunction::linear(w[0].color.to_pdf_color(), w[1].color.to_pdf_color())
            })
            .collect::<Vec<_>>();
        let bounds = stops[1..stops.len() - 1]
            .iter()
            .map(|s| s.offset)
            .collect::<Vec<_>>();
        let encode = [0.0, 1.0].repeat(functions.len());

        Ok(Self::Stitching(StitchingFunction {
            functions,
            bounds,
            encode,
        }))
    }

    #[cfg(test)]
    pub(crate) fn evaluate(&self, t: f32) -> [f32; 3] {
        match self {
            GradientFunction::Exponential(f) => f.evaluate(t),
            GradientFunction::Stitching(f) => f.evaluate(t),
        }
    }

    /// Add the function to the document. Sub-functions of a stitching function
    /// are added before the stitching function itself.
    pub(crate) fn register(&self, sc: &mut SerializeContext) -> ObjectId {
        match self {
            GradientFunction::Exponential(f) => {
                let id = sc.new_id();
                sc.add_object(DictObject::new(id, f.to_dictionary()));
                id
            }
            GradientFunction::Stitching(f) => {
                let sub_ids = f
                    .functions
                    .iter()
                    .map(|sub| {
                        let id = sc.new_id();
                        sc.add_object(DictObject::new(id, sub.to_dictionary()));
                        id
                    })
                    .collect::<Vec<_>>();

                let id = sc.new_id();
                sc.add_object(DictObject::new(id, f.to_dictionary(&sub_ids)));
                id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::error::{GradientError, QuireError};
    use crate::paint::Color;
    use crate::util::test_utils::settings_1;

    fn assert_color_eq(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!(approx_eq!(f32, a[i], b[i], epsilon = 1e-5), "{a:?} != {b:?}");
        }
    }

    fn three_stops() -> Vec<Stop> {
        vec![
            Stop::new(0.0, Color::new(255, 0, 0)),
            Stop::new(0.4, Color::new(0, 255, 0)),
            Stop::new(1.0, Color::new(0, 0, 255)),
        ]
    }

    #[test]
    fn two_stops_give_one_function() {
        let stops = [
            Stop::new(0.0, Color::black()),
            Stop::new(1.0, Color::white()),
        ];
        let function = GradientFunction::synthesize(&stops).unwrap();

        let GradientFunction::Exponential(exp) = &function else {
            panic!("expected an exponential function");
        };
        assert_eq!(exp.c0, [0.0, 0.0, 0.0]);
        assert_eq!(exp.c1, [1.0, 1.0, 1.0]);
        assert_eq!(exp.n, 1.0);
        assert_color_eq(function.evaluate(0.5), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn three_stops_are_stitched() {
        let function = GradientFunction::synthesize(&three_stops()).unwrap();

        let GradientFunction::Stitching(stitching) = &function else {
            panic!("expected a stitching function");
        };
        assert_eq!(stitching.functions().len(), 2);
        assert_eq!(stitching.bounds(), [0.4f32].as_slice());
        assert_eq!(stitching.encode, vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(stitching.functions()[0].c1, stitching.functions()[1].c0);
    }

    #[test]
    fn stitching_is_continuous() {
        let function = GradientFunction::synthesize(&three_stops()).unwrap();

        assert_color_eq(function.evaluate(0.0), [1.0, 0.0, 0.0]);
        assert_color_eq(function.evaluate(0.4), [0.0, 1.0, 0.0]);
        assert_color_eq(function.evaluate(0.4 - 1e-6), function.evaluate(0.4));
        assert_color_eq(function.evaluate(0.2), [0.5, 0.5, 0.0]);
        assert_color_eq(function.evaluate(0.7), [0.0, 0.5, 0.5]);
        assert_color_eq(function.evaluate(1.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn malformed_stops_create_nothing() {
        let mut sc = SerializeContext::new(settings_1());
        let result = GradientFunction::synthesize(&[Stop::new(0.0, Color::black())]);

        assert_eq!(
            result,
            Err(QuireError::MalformedGradient(GradientError::TooFewStops(1)))
        );
        assert_eq!(sc.object_count(), 0);
        assert_eq!(sc.new_id().number(), 3);
    }

    #[test]
    fn sub_functions_are_registered_first() {
        let mut sc = SerializeContext::new(settings_1());
        let function = GradientFunction::synthesize(&three_stops()).unwrap();
        let id = function.register(&mut sc);

        assert_eq!(sc.object_count(), 3);
        let ids = sc.objects().map(|o| o.id()).collect::<Vec<_>>();
        assert_eq!(ids.last(), Some(&id));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
