//! Addressable objects.
//!
//! Everything that ends up in a document as an indirect object implements the
//! [`Object`] trait: it has a fixed [`ObjectId`], assigned when it is created,
//! and knows how to turn itself into bytes. Objects are collected by the document
//! and only serialized once the document is finished.

use std::fmt;

use pdf_writer::{Chunk, Ref};

use crate::object::dict::Dictionary;
use crate::serialize::SerializeSettings;
use crate::stream::EncodedStream;

pub mod dict;
pub(crate) mod ext_g_state;
pub(crate) mod function;
pub mod image;
pub(crate) mod shading;

/// The identity of an object in a document.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId {
    number: i32,
    generation: u16,
}

impl ObjectId {
    /// Create an identity with generation zero. Documents are always written
    /// from scratch, so this is the only generation the allocator hands out.
    pub(crate) fn new(number: i32) -> Self {
        Self {
            number,
            generation: 0,
        }
    }

    /// The object number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// The generation number.
    pub fn generation(&self) -> u16 {
        self.generation
    }

    pub(crate) fn to_pdf_ref(self) -> Ref {
        Ref::new(self.number)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// An object that can be written to a document.
pub trait Object: fmt::Debug + Send + Sync {
    /// The identity of the object.
    fn id(&self) -> ObjectId;

    /// Serialize the object into a chunk.
    fn serialize(&self, settings: &SerializeSettings) -> Chunk;

    /// Serialize the object and return the raw bytes.
    fn to_bytes(&self, settings: &SerializeSettings) -> Vec<u8> {
        self.serialize(settings).as_bytes().to_vec()
    }
}

/// An object that consists of a single dictionary.
#[derive(Debug, Clone)]
pub(crate) struct DictObject {
    id: ObjectId,
    dict: Dictionary,
}

impl DictObject {
    pub(crate) fn new(id: ObjectId, dict: Dictionary) -> Self {
        Self { id, dict }
    }
}

impl Object for DictObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn serialize(&self, _: &SerializeSettings) -> Chunk {
        let mut chunk = Chunk::new();
        let mut dict = chunk.indirect(self.id.to_pdf_ref()).dict();
        self.dict.write_into(&mut dict);
        drop(dict);

        chunk
    }
}

/// How the data of a stream should be encoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum StreamKind {
    /// Drawing operators. Only compressed if the settings ask for it.
    Content,
    /// Binary data like image samples. Always compressed.
    Binary,
}

/// An object that consists of a dictionary followed by a byte stream.
///
/// The data is kept unencoded until the object is serialized, at which point
/// the filters are chosen based on the serialize settings.
#[derive(Debug, Clone)]
pub(crate) struct StreamObject {
    id: ObjectId,
    dict: Dictionary,
    data: Vec<u8>,
    kind: StreamKind,
}

impl StreamObject {
    pub(crate) fn new(id: ObjectId, dict: Dictionary, data: Vec<u8>, kind: StreamKind) -> Self {
        Self {
            id,
            dict,
            data,
            kind,
        }
    }
}

impl Object for StreamObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn serialize(&self, settings: &SerializeSettings) -> Chunk {
        let mut chunk = Chunk::new();

        let encoded = EncodedStream::new(&self.data, self.kind, settings);

        let mut stream = chunk.stream(self.id.to_pdf_ref(), encoded.data());
        self.dict.write_into(&mut stream);
        encoded.write_filters(&mut stream);
        drop(stream);

        chunk
    }
}
