/*!
The object graph and resource management core of a PDF writer.

quire keeps track of everything a page of a PDF document refers to: fonts, gradient
patterns, graphics states and images. Drawing code asks a [`Page`] for the name
of a resource, writes its operators into the page's content stream, and quire makes
sure that every resource is created exactly once per page, that every object gets a
unique identity, and that the finished document is written out in identity order.
The file structure itself is produced by the [pdf-writer] crate.

To get started, take a look at the [`document`] module that explains how you can
create a document.

# Example

```
use std::io::Write;

use quire::{Color, Document, Font, LinearGradient, PageSettings};

let mut document = Document::new();
let mut page = document.start_page(PageSettings::new(200.0, 200.0)).unwrap();

let font = page.find_or_create_font_reference(&Font::new("Arial", true, false));
let gradient = LinearGradient::two_color(
    (0.0, 0.0),
    Color::new(255, 0, 0),
    (200.0, 0.0),
    Color::new(0, 0, 255),
    false,
);
let pattern = page.find_or_create_linear_pattern(&gradient).unwrap();

let content = page.content_stream();
writeln!(content, "/Pattern cs /{pattern} scn 0 0 200 100 re f").unwrap();
writeln!(content, "BT /{font} 14 Tf 10 150 Td (Hello) Tj ET").unwrap();
page.finish();

let pdf = document.finish().unwrap();
assert!(pdf.starts_with(b"%PDF-"));
```

[pdf-writer]: https://github.com/typst/pdf-writer
*/

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod resource;
mod serialize;
mod stream;
mod util;

pub mod composite;
pub mod content;
pub mod document;
pub mod error;
pub mod font;
pub mod metadata;
pub mod object;
pub mod page;
pub mod paint;

pub use composite::{Composite, CompositeRule};
pub use content::ContentStream;
pub use document::Document;
pub use error::{GradientError, QuireError, QuireResult};
pub use font::{DefaultFontMapper, Font, FontMapper, StandardFont};
pub use metadata::Metadata;
pub use object::dict::{Dictionary, Value};
pub use object::image::Image;
pub use object::{Object, ObjectId};
pub use page::{Page, PageSettings};
pub use paint::{Color, LinearGradient, RadialGradient, SpreadMethod, Stop};
pub use serialize::SerializeSettings;

pub use tiny_skia_path::{NormalizedF32, Rect, Transform};
