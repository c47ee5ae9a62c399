//! Working with pages of a PDF document.

use crate::composite::Composite;
use crate::content::ContentStream;
use crate::error::{QuireError, QuireResult};
use crate::font::Font;
use crate::object::dict::{Dictionary, Value};
use crate::object::ext_g_state::ExtGState;
use crate::object::image::Image;
use crate::object::shading::ShadingPattern;
use crate::object::{DictObject, Object, ObjectId, StreamKind, StreamObject};
use crate::paint::{LinearGradient, RadialGradient};
use crate::resource::{ResourceDictionary, ResourceDictionaryBuilder};
use crate::serialize::{SerializeContext, WATERMARK_FONT};
use crate::util::RectExt;
use crate::{Rect, Transform};

/// The settings of a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSettings {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl PageSettings {
    /// Create new page settings for a page of the given size, anchored at the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Create new page settings from the bounds of a page.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// The width of the page.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The height of the page.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The bounds of the page. Fails if they are not finite or have no area.
    pub fn bounds(&self) -> QuireResult<Rect> {
        let invalid = || QuireError::InvalidBounds {
            width: self.width,
            height: self.height,
        };

        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid());
        }

        Rect::from_xywh(self.x, self.y, self.width, self.height).ok_or_else(invalid)
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        // A4
        Self::new(595.0, 842.0)
    }
}

/// A single page.
///
/// You cannot create an instance of this type yourself. Instead, use
/// [`Document::start_page`] to add a new page to a document. While a page is
/// open, it mutably borrows the document, so only one page can be worked on at
/// a time. The page is added to the document once it is dropped.
///
/// The drawing code writes its operators into [`Page::content_stream`], and asks
/// the page for the resource names it needs to refer to. Resources are shared
/// within a page: asking for an equal gradient twice yields the same name, and
/// doesn't create any new objects.
///
/// [`Document::start_page`]: crate::Document::start_page
pub struct Page<'a> {
    sc: &'a mut SerializeContext,
    id: ObjectId,
    content_id: ObjectId,
    bounds: Rect,
    content: Option<ContentStream>,
    resources: ResourceDictionaryBuilder,
}

impl<'a> Page<'a> {
    pub(crate) fn new(sc: &'a mut SerializeContext, bounds: Rect) -> Self {
        let id = sc.new_id();
        let content_id = sc.new_id();
        let mut resources = ResourceDictionaryBuilder::new();

        // The watermark stream is shared by all pages, so its font must have
        // the same name on each of them.
        if sc.serialize_settings().watermark.is_some() {
            let font_name = resources
                .fonts
                .find_or_create(WATERMARK_FONT, || sc.font_object(WATERMARK_FONT));
            sc.get_or_init_watermark(bounds, &font_name);
        }

        Self {
            sc,
            id,
            content_id,
            bounds,
            content: None,
            resources,
        }
    }

    /// The identity of the page object.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The identity of the content stream of the page.
    pub fn content_id(&self) -> ObjectId {
        self.content_id
    }

    /// The bounds of the page.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The transform from the y-down coordinate system of the drawing code
    /// to the native coordinate system of the page.
    pub fn transform(&self) -> Transform {
        page_root_transform(self.bounds.height())
    }

    /// The content stream of the page.
    pub fn content_stream(&mut self) -> &mut ContentStream {
        self.content.get_or_insert_with(ContentStream::new)
    }

    /// Return the name under which a font is available on this page.
    ///
    /// Fonts are mapped to one of the standard fonts by the font mapper of
    /// the document.
    pub fn find_or_create_font_reference(&mut self, font: &Font) -> String {
        let base_font = self.sc.map_font(font);
        let sc = &mut *self.sc;

        self.resources
            .fonts
            .find_or_create(base_font, || sc.font_object(base_font))
    }

    /// Return the name of a pattern that paints a linear gradient.
    pub fn find_or_create_linear_pattern(
        &mut self,
        gradient: &LinearGradient,
    ) -> QuireResult<String> {
        let transform = self.transform();
        let sc = &mut *self.sc;

        self.resources
            .patterns
            .try_find_or_create(gradient.fingerprint(), || {
                let pattern = ShadingPattern::from_linear(gradient, transform)?;
                Ok(pattern.register(sc))
            })
    }

    /// Return the name of a pattern that paints a radial gradient.
    pub fn find_or_create_radial_pattern(
        &mut self,
        gradient: &RadialGradient,
    ) -> QuireResult<String> {
        let transform = self.transform();
        let sc = &mut *self.sc;

        self.resources
            .patterns
            .try_find_or_create(gradient.fingerprint(), || {
                let pattern = ShadingPattern::from_radial(gradient, transform)?;
                Ok(pattern.register(sc))
            })
    }

    /// Return the name of a graphics state that applies a composite.
    pub fn find_or_create_graphics_state(&mut self, composite: Composite) -> String {
        let sc = &mut *self.sc;

        self.resources
            .ext_g_states
            .find_or_create(composite, || {
                ExtGState::from_composite(&composite).register(sc)
            })
    }

    /// Add an image to the page and return its name.
    ///
    /// Images are not shared: every call adds a new image to the document.
    pub fn add_image(&mut self, image: &Image) -> String {
        let id = image.register(self.sc);
        let name = self.resources.x_objects.push(id);
        log::debug!("created XObject {} for {:?}", name, image);

        name
    }

    /// The number of objects in the document so far.
    pub fn object_count(&self) -> usize {
        self.sc.object_count()
    }

    /// A shorthand for `std::mem::drop`.
    pub fn finish(self) {}
}

pub(crate) fn page_root_transform(height: f32) -> Transform {
    Transform::from_row(1.0, 0.0, 0.0, -1.0, 0.0, height)
}

impl Drop for Page<'_> {
    fn drop(&mut self) {
        let content = self
            .content
            .take()
            .map(ContentStream::into_bytes)
            .unwrap_or_default();
        let resources = std::mem::take(&mut self.resources).finish();

        let page = InternalPage {
            id: self.id,
            content_id: self.content_id,
            bounds: self.bounds,
            content,
            resources,
        };
        self.sc.register_page(page);
    }
}

/// A page that has been finished, but not yet turned into objects.
pub(crate) struct InternalPage {
    pub id: ObjectId,
    pub content_id: ObjectId,
    pub bounds: Rect,
    pub content: Vec<u8>,
    pub resources: ResourceDictionary,
}

impl InternalPage {
    /// Turn the page into its content stream and the page object itself.
    pub(crate) fn into_objects(
        self,
        page_tree_id: ObjectId,
        watermark: Option<ObjectId>,
    ) -> Vec<Box<dyn Object>> {
        let contents = match watermark {
            Some(watermark) => Value::references([self.content_id, watermark]),
            None => Value::Reference(self.content_id),
        };

        let page = Dictionary::new()
            .with("Type", Value::name("Page"))
            .with("Parent", page_tree_id)
            .with("MediaBox", Value::reals(self.bounds.to_pdf_rect()))
            .with("Contents", contents)
            .with("Resources", self.resources.to_dictionary());

        vec![
            Box::new(StreamObject::new(
                self.content_id,
                Dictionary::new(),
                self.content,
                StreamKind::Content,
            )),
            Box::new(DictObject::new(self.id, page)),
        ]
    }
}
