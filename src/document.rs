//! Creating new PDF documents.
//!
//! The starting point is always the creation of a [`Document`]. A document
//! represents _one_ PDF document, to which you can add pages and metadata.
//!
//! Creating a PDF requires global state that is shared by all pages: the counter
//! from which object identities are taken, the font objects and the watermark.
//! Because of that, pages cannot be created at the same time. Instead, you add
//! pages one after another by calling [`Document::start_page`], which returns a
//! new [`Page`] that mutably borrows the global state from the document. Once the
//! page is dropped, the state is passed back to the document, which you can then
//! use to add even more pages.

use crate::error::QuireResult;
use crate::font::FontMapper;
use crate::metadata::Metadata;
use crate::object::ObjectId;
use crate::page::{Page, PageSettings};
use crate::serialize::{SerializeContext, SerializeSettings};

/// A PDF document.
pub struct Document {
    pub(crate) serializer_context: SerializeContext,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new document with default settings.
    pub fn new() -> Self {
        Self::new_with(SerializeSettings::default())
    }

    /// Create a new document with specific serialization settings.
    pub fn new_with(serialize_settings: SerializeSettings) -> Self {
        Self {
            serializer_context: SerializeContext::new(serialize_settings),
        }
    }

    /// Start a new page.
    ///
    /// Fails if the page settings describe invalid bounds, in which case nothing
    /// is added to the document.
    pub fn start_page(&mut self, page_settings: PageSettings) -> QuireResult<Page<'_>> {
        let bounds = page_settings.bounds()?;
        Ok(Page::new(&mut self.serializer_context, bounds))
    }

    /// Set the metadata of the document.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.serializer_context.set_metadata(metadata);
    }

    /// Set the font mapper that decides which standard font is used for a font.
    pub fn set_font_mapper(&mut self, font_mapper: impl FontMapper + 'static) {
        self.serializer_context
            .set_font_mapper(Box::new(font_mapper));
    }

    /// The number of objects added to the document so far.
    pub fn object_count(&self) -> usize {
        self.serializer_context.object_count()
    }

    /// The identity of the watermark stream, once it has been created.
    pub fn watermark_id(&self) -> Option<ObjectId> {
        self.serializer_context.watermark()
    }

    /// Write the document to a PDF.
    pub fn finish(mut self) -> QuireResult<Vec<u8>> {
        // Write an empty page if none has been created yet.
        if self.serializer_context.page_count() == 0 {
            self.start_page(PageSettings::default())?.finish();
        }

        Ok(self.serializer_context.finish())
    }
}
