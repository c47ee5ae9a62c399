//! External graphics states.

use crate::composite::Composite;
use crate::object::dict::{Dictionary, Value};
use crate::object::{DictObject, ObjectId};
use crate::serialize::SerializeContext;

/// A graphics state that sets both the stroking and the non-stroking alpha.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExtGState {
    stroking_alpha: f32,
    non_stroking_alpha: f32,
}

impl ExtGState {
    pub(crate) fn from_composite(composite: &Composite) -> Self {
        let alpha = composite.alpha().get();

        Self {
            stroking_alpha: alpha,
            non_stroking_alpha: alpha,
        }
    }

    pub(crate) fn to_dictionary(&self) -> Dictionary {
        Dictionary::new()
            .with("Type", Value::name("ExtGState"))
            .with("CA", self.stroking_alpha)
            .with("ca", self.non_stroking_alpha)
    }

    pub(crate) fn register(&self, sc: &mut SerializeContext) -> ObjectId {
        let id = sc.new_id();
        sc.add_object(DictObject::new(id, self.to_dictionary()));
        id
    }
}

#[cfg(test)]
mod tests {
    use tiny_skia_path::NormalizedF32;

    use super::*;
    use crate::composite::CompositeRule;
    use crate::util::test_utils::settings_1;

    #[test]
    fn alpha_applies_to_fill_and_stroke() {
        let composite = Composite::new(CompositeRule::SrcOver, NormalizedF32::new(0.5).unwrap());
        let dict = ExtGState::from_composite(&composite).to_dictionary();

        assert_eq!(dict.get("Type"), Some(&Value::name("ExtGState")));
        assert_eq!(dict.get("CA"), Some(&Value::Real(0.5)));
        assert_eq!(dict.get("ca"), Some(&Value::Real(0.5)));
    }

    #[test]
    fn register_allocates_one_object() {
        let mut sc = SerializeContext::new(settings_1());
        let id = ExtGState::from_composite(&Composite::default()).register(&mut sc);

        assert_eq!(sc.object_count(), 1);
        assert_eq!(sc.objects().next().map(|o| o.id()), Some(id));
    }
}
