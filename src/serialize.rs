//! The mutable state shared by all pages of a document.

use std::collections::HashMap;

use pdf_writer::{Chunk, Content, Name, Pdf, Str};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::font::{encode_win_ansi, DefaultFontMapper, Font, FontMapper, StandardFont};
use crate::metadata::Metadata;
use crate::object::dict::{Dictionary, Value};
use crate::object::{DictObject, Object, ObjectId, StreamKind, StreamObject};
use crate::page::InternalPage;
use crate::util::hash_base64;
use crate::Rect;

/// Settings that should be applied when creating a PDF document.
#[derive(Clone, Debug)]
pub struct SerializeSettings {
    /// Whether content streams should be compressed. Leads to significantly smaller file sizes,
    /// but also longer running times. It is highly recommended that you set this to true.
    pub compress_content_streams: bool,
    /// Whether the PDF should be ASCII-compatible, i.e. only consist of
    /// characters in the ASCII range.
    ///
    /// Binary streams will be hex encoded in that case.
    pub ascii_compatible: bool,
    /// A text that is painted on top of every page.
    ///
    /// The watermark is written once and shared by all pages, as an additional
    /// content stream that is drawn after the page's own content.
    pub watermark: Option<String>,
}

impl Default for SerializeSettings {
    fn default() -> Self {
        Self {
            compress_content_streams: true,
            ascii_compatible: false,
            watermark: None,
        }
    }
}

pub(crate) const WATERMARK_FONT: StandardFont = StandardFont::CourierBold;
const WATERMARK_FONT_SIZE: f32 = 20.0;

/// The serialize context is passed to every page of a document, and owns all
/// state that outlives a single page:
/// - The counter from which every object identity is taken.
/// - All objects created so far.
/// - The font objects, which are shared by all pages.
/// - The watermark content stream, if any.
pub(crate) struct SerializeContext {
    /// The next free object number. All identities must be created through
    /// `new_id`, never by hand.
    cur_ref: pdf_writer::Ref,
    objects: Vec<Box<dyn Object>>,
    catalog_id: ObjectId,
    page_tree_id: ObjectId,
    pages: Vec<ObjectId>,
    font_mapper: Box<dyn FontMapper>,
    font_objects: HashMap<StandardFont, ObjectId>,
    watermark: Option<ObjectId>,
    metadata: Option<Metadata>,
    serialize_settings: SerializeSettings,
}

impl SerializeContext {
    pub fn new(serialize_settings: SerializeSettings) -> Self {
        let mut cur_ref = pdf_writer::Ref::new(1);
        let catalog_id = ObjectId::new(cur_ref.bump().get());
        let page_tree_id = ObjectId::new(cur_ref.bump().get());

        Self {
            cur_ref,
            objects: vec![],
            catalog_id,
            page_tree_id,
            pages: vec![],
            font_mapper: Box::new(DefaultFontMapper::new()),
            font_objects: HashMap::new(),
            watermark: None,
            metadata: None,
            serialize_settings,
        }
    }

    pub fn new_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.cur_ref.bump().get());
        log::trace!("allocated object {}", id);
        id
    }

    pub fn add_object(&mut self, object: impl Object + 'static) {
        log::trace!("registered object {}", object.id());
        self.objects.push(Box::new(object));
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[cfg(test)]
    pub fn objects(&self) -> impl Iterator<Item = &dyn Object> + '_ {
        self.objects.iter().map(|o| o.as_ref())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn serialize_settings(&self) -> &SerializeSettings {
        &self.serialize_settings
    }

    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    pub fn set_font_mapper(&mut self, font_mapper: Box<dyn FontMapper>) {
        self.font_mapper = font_mapper;
    }

    /// Map a font descriptor to one of the standard fonts, falling back to
    /// Courier if the mapper doesn't know the font.
    pub fn map_font(&self, font: &Font) -> StandardFont {
        self.font_mapper.map_to_base_font(font).unwrap_or_else(|| {
            log::debug!("no base font for {:?}, falling back to Courier", font);
            StandardFont::Courier
        })
    }

    /// The object of a standard font. Each base font is written at most once
    /// per document.
    pub fn font_object(&mut self, base_font: StandardFont) -> ObjectId {
        if let Some(id) = self.font_objects.get(&base_font) {
            return *id;
        }

        let id = self.new_id();
        self.add_object(DictObject::new(id, base_font.to_dictionary()));
        self.font_objects.insert(base_font, id);

        id
    }

    pub fn watermark(&self) -> Option<ObjectId> {
        self.watermark
    }

    /// Get the watermark stream, creating it on first use if the settings
    /// ask for one. `font_name` is the resource name under which the
    /// watermark font is available on every page.
    pub fn get_or_init_watermark(&mut self, bounds: Rect, font_name: &str) -> Option<ObjectId> {
        if self.watermark.is_some() {
            return self.watermark;
        }

        let text = self.serialize_settings.watermark.clone()?;
        let id = self.new_id();
        log::debug!("creating watermark stream {}", id);

        let data = watermark_content(&text, bounds, font_name);
        self.add_object(StreamObject::new(
            id,
            Dictionary::new(),
            data,
            StreamKind::Content,
        ));
        self.watermark = Some(id);

        self.watermark
    }

    pub fn register_page(&mut self, page: InternalPage) {
        let page_id = page.id;
        for object in page.into_objects(self.page_tree_id, self.watermark) {
            log::trace!("registered object {}", object.id());
            self.objects.push(object);
        }
        log::debug!("finished page {}", page_id);
        self.pages.push(page_id);
    }

    pub fn finish(mut self) -> Vec<u8> {
        let page_tree = Dictionary::new()
            .with("Type", Value::name("Pages"))
            .with("Kids", Value::references(self.pages.iter().copied()))
            .with("Count", self.pages.len() as i32);
        let page_tree_id = self.page_tree_id;
        self.add_object(DictObject::new(page_tree_id, page_tree));

        let info_id = self.metadata.is_some().then(|| self.new_id());

        self.objects.sort_by_key(|o| o.id());
        let chunks = serialize_objects(&self.objects, &self.serialize_settings);

        let mut pdf = Pdf::new();

        if self.serialize_settings.ascii_compatible {
            pdf.set_binary_marker(b"AAAA");
        }

        pdf.catalog(self.catalog_id.to_pdf_ref())
            .pages(self.page_tree_id.to_pdf_ref());

        for chunk in &chunks {
            pdf.extend(chunk);
        }

        if let (Some(metadata), Some(info_id)) = (&self.metadata, info_id) {
            metadata.serialize_document_info(info_id, &mut pdf);
        }

        let file_id = hash_base64(pdf.as_bytes());
        pdf.set_file_id((file_id.as_bytes().to_vec(), file_id.as_bytes().to_vec()));

        pdf.finish()
    }
}

#[cfg(feature = "rayon")]
fn serialize_objects(objects: &[Box<dyn Object>], settings: &SerializeSettings) -> Vec<Chunk> {
    objects.par_iter().map(|o| o.serialize(settings)).collect()
}

#[cfg(not(feature = "rayon"))]
fn serialize_objects(objects: &[Box<dyn Object>], settings: &SerializeSettings) -> Vec<Chunk> {
    objects.iter().map(|o| o.serialize(settings)).collect()
}

/// Draw the watermark text centered on a page of the given size. The stream
/// is written in the native coordinate system, so it doesn't depend on the
/// page transform.
fn watermark_content(text: &str, bounds: Rect, font_name: &str) -> Vec<u8> {
    let text = encode_win_ansi(text);
    // Courier glyphs are all 600 units wide.
    let text_width = 0.6 * WATERMARK_FONT_SIZE * text.len() as f32;
    let x = bounds.left() + (bounds.width() - text_width) / 2.0;
    let y = bounds.top() + bounds.height() / 2.0;

    let mut content = Content::new();
    content.save_state();
    content.set_fill_rgb(0.25, 0.25, 0.25);
    content.begin_text();
    content.set_font(Name(font_name.as_bytes()), WATERMARK_FONT_SIZE);
    content.next_line(x, y);
    content.show(Str(&text));
    content.end_text();
    content.restore_state();

    content.finish()
}
