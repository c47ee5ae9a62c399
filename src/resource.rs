//! Dealing with page resources.
//!
//! Every page has four categories of resources: fonts, patterns, graphics states
//! and external objects (images). Each category hands out its own names, numbered
//! from 1 in the order resources are first used on the page. Fonts, patterns and
//! graphics states are deduplicated by a fingerprint, so asking twice for the same
//! gradient yields the same name and creates no new objects. Images are not.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::composite::Composite;
use crate::error::QuireResult;
use crate::font::StandardFont;
use crate::object::dict::{Dictionary, Value};
use crate::object::ObjectId;
use crate::paint::PatternKey;

pub(crate) trait ResourceTrait {
    fn get_key() -> &'static str;
    fn get_prefix() -> &'static str;
}

#[derive(Debug, Eq, PartialEq, Hash, Default, Clone)]
pub(crate) struct ExtGState;

impl ResourceTrait for ExtGState {
    fn get_key() -> &'static str {
        "ExtGState"
    }

    fn get_prefix() -> &'static str {
        "GS"
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Default, Clone)]
pub(crate) struct XObject;

impl ResourceTrait for XObject {
    fn get_key() -> &'static str {
        "XObject"
    }

    fn get_prefix() -> &'static str {
        "Image"
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Default, Clone)]
pub(crate) struct Pattern;

impl ResourceTrait for Pattern {
    fn get_key() -> &'static str {
        "Pattern"
    }

    fn get_prefix() -> &'static str {
        "P"
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Default, Clone)]
pub(crate) struct Font;

impl ResourceTrait for Font {
    fn get_key() -> &'static str {
        "Font"
    }

    fn get_prefix() -> &'static str {
        "F"
    }
}

/// Maps the fingerprints of one resource category to names, and names to
/// the objects backing them. Entries are never removed.
#[derive(Debug)]
pub(crate) struct ResourceMapper<T, K> {
    cache: HashMap<K, String>,
    entries: Dictionary,
    phantom: PhantomData<T>,
}

impl<T, K> Default for ResourceMapper<T, K> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
            entries: Dictionary::new(),
            phantom: PhantomData,
        }
    }
}

impl<T, K> ResourceMapper<T, K>
where
    T: ResourceTrait,
    K: Hash + Eq + std::fmt::Debug,
{
    /// Return the name of the resource with the given fingerprint. If there is
    /// none yet, `create` is called to build and register the backing objects,
    /// and the resource is given the next free name.
    ///
    /// If `create` fails, the mapper is left untouched.
    pub fn try_find_or_create<F>(&mut self, key: K, create: F) -> QuireResult<String>
    where
        F: FnOnce() -> QuireResult<ObjectId>,
    {
        if let Some(name) = self.cache.get(&key) {
            log::debug!("reusing {} {} for {:?}", T::get_key(), name, key);
            return Ok(name.clone());
        }

        let id = create()?;
        let name = self.push(id);
        log::debug!("created {} {} for {:?}", T::get_key(), name, key);
        self.cache.insert(key, name.clone());

        Ok(name)
    }

    /// Infallible variant of [`ResourceMapper::try_find_or_create`].
    pub fn find_or_create<F>(&mut self, key: K, create: F) -> String
    where
        F: FnOnce() -> ObjectId,
    {
        if let Some(name) = self.cache.get(&key) {
            log::debug!("reusing {} {} for {:?}", T::get_key(), name, key);
            return name.clone();
        }

        let name = self.push(create());
        log::debug!("created {} {} for {:?}", T::get_key(), name, key);
        self.cache.insert(key, name.clone());

        name
    }

    /// Add a resource without deduplication.
    pub fn push(&mut self, id: ObjectId) -> String {
        let name = format!("{}{}", T::get_prefix(), self.entries.len() + 1);
        self.entries.insert(name.clone(), id);
        name
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn into_entries(self) -> Dictionary {
        self.entries
    }
}

/// All resources of a page.
#[derive(Debug, Default)]
pub(crate) struct ResourceDictionaryBuilder {
    pub fonts: ResourceMapper<Font, StandardFont>,
    pub patterns: ResourceMapper<Pattern, PatternKey>,
    pub ext_g_states: ResourceMapper<ExtGState, Composite>,
    pub x_objects: ResourceMapper<XObject, ()>,
}

impl ResourceDictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> ResourceDictionary {
        ResourceDictionary {
            x_objects: self.x_objects.into_entries(),
            fonts: self.fonts.into_entries(),
            patterns: self.patterns.into_entries(),
            ext_g_states: self.ext_g_states.into_entries(),
        }
    }
}

/// The finished resources of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ResourceDictionary {
    x_objects: Dictionary,
    fonts: Dictionary,
    patterns: Dictionary,
    ext_g_states: Dictionary,
}

impl ResourceDictionary {
    /// The `/Resources` entry of a page. Categories without any entries
    /// are left out.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut resources = Dictionary::new().with(
            "ProcSet",
            Value::names(["PDF", "Text", "ImageB", "ImageC", "ImageI"]),
        );

        write_resource_type::<XObject>(&mut resources, &self.x_objects);
        write_resource_type::<Font>(&mut resources, &self.fonts);
        write_resource_type::<Pattern>(&mut resources, &self.patterns);
        write_resource_type::<ExtGState>(&mut resources, &self.ext_g_states);

        resources
    }
}

fn write_resource_type<T>(resources: &mut Dictionary, entries: &Dictionary)
where
    T: ResourceTrait,
{
    if !entries.is_empty() {
        resources.insert(T::get_key(), entries.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GradientError, QuireError};

    #[test]
    fn names_are_sequential_per_category() {
        let mut builder = ResourceDictionaryBuilder::new();
        assert_eq!(builder.x_objects.push(ObjectId::new(10)), "Image1");
        assert_eq!(builder.x_objects.push(ObjectId::new(11)), "Image2");
        assert_eq!(
            builder
                .fonts
                .find_or_create(StandardFont::Courier, || ObjectId::new(12)),
            "F1"
        );
        assert_eq!(builder.x_objects.len(), 2);
    }

    #[test]
    fn hit_does_not_call_factory() {
        let mut mapper = ResourceMapper::<Font, StandardFont>::default();
        let first = mapper.find_or_create(StandardFont::Symbol, || ObjectId::new(3));
        let second = mapper.find_or_create(StandardFont::Symbol, || {
            panic!("factory must not run on a cache hit")
        });

        assert_eq!(first, second);
        assert_eq!(mapper.len(), 1);
    }

    #[test]
    fn failed_factory_leaves_mapper_untouched() {
        let mut mapper = ResourceMapper::<Font, StandardFont>::default();
        let result = mapper.try_find_or_create(StandardFont::Courier, || {
            Err(GradientError::TooFewStops(0).into())
        });

        assert_eq!(
            result,
            Err(QuireError::MalformedGradient(GradientError::TooFewStops(0)))
        );
        assert_eq!(mapper.len(), 0);
        assert_eq!(
            mapper.find_or_create(StandardFont::Courier, || ObjectId::new(3)),
            "F1"
        );
    }

    #[test]
    fn empty_categories_are_omitted() {
        let resources = ResourceDictionaryBuilder::new().finish().to_dictionary();
        assert_eq!(resources.keys().collect::<Vec<_>>(), vec!["ProcSet"]);
    }

    #[test]
    fn populated_categories_in_order() {
        let mut builder = ResourceDictionaryBuilder::new();
        builder
            .ext_g_states
            .find_or_create(Composite::default(), || ObjectId::new(5));
        builder.x_objects.push(ObjectId::new(6));

        let resources = builder.finish().to_dictionary();
        assert_eq!(
            resources.keys().collect::<Vec<_>>(),
            vec!["ProcSet", "XObject", "ExtGState"]
        );

        let gs = resources.get("ExtGState").and_then(Value::as_dictionary).unwrap();
        assert_eq!(gs.get("GS1"), Some(&Value::Reference(ObjectId::new(5))));
    }
}
