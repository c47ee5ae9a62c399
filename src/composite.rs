//! Compositing.

use std::hash::{Hash, Hasher};

use tiny_skia_path::NormalizedF32;

use crate::util::float_key;

/// A Porter-Duff compositing rule.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CompositeRule {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
}

/// How new content is combined with what is already on the page.
///
/// Only the alpha value ends up in the document, as stroking and non-stroking
/// alpha of a graphics state. The rule is still part of the identity of a
/// composite, so two composites with different rules get separate graphics
/// states.
#[derive(Debug, Copy, Clone)]
pub struct Composite {
    rule: CompositeRule,
    alpha: NormalizedF32,
}

impl Composite {
    /// Create a new composite.
    pub fn new(rule: CompositeRule, alpha: NormalizedF32) -> Self {
        Self { rule, alpha }
    }

    /// Source-over compositing with the given alpha.
    pub fn src_over(alpha: NormalizedF32) -> Self {
        Self::new(CompositeRule::SrcOver, alpha)
    }

    /// The compositing rule.
    pub fn rule(&self) -> CompositeRule {
        self.rule
    }

    /// The alpha value.
    pub fn alpha(&self) -> NormalizedF32 {
        self.alpha
    }
}

impl Default for Composite {
    fn default() -> Self {
        Self::src_over(NormalizedF32::ONE)
    }
}

// Equality and hashing go through `float_key`, so `-0.0` and `0.0` are the same alpha.
impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule && float_key(self.alpha.get()) == float_key(other.alpha.get())
    }
}

impl Eq for Composite {}

impl Hash for Composite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rule.hash(state);
        float_key(self.alpha.get()).hash(state);
    }
}
