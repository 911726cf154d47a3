//! s72 documents
//!
//! An s72 file is a JSON array whose first element is the format tag
//! `"s72-v2"` and whose remaining elements are object records. Records may
//! only refer to records that appear earlier in the array.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{DocumentLoadError, DocumentSaveError};
use crate::object::{ObjectKind, Scene, SceneObject};

/// Format/version tag expected as the first array element
pub const FORMAT_TAG: &str = "s72-v2";

/// Indentation used for saved documents
const INDENT: &[u8] = b"\t";

/// An ordered sequence of s72 records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct S72Document {
    objects: Vec<SceneObject>,
}

impl S72Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Append a record at the end of the document
    pub fn push(&mut self, object: impl Into<SceneObject>) {
        self.objects.push(object.into());
    }

    /// All records, in document order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of records (the format tag is not counted)
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the document has no records
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The first SCENE record, if any
    pub fn scene(&self) -> Option<&Scene> {
        self.objects.iter().find_map(|object| match object {
            SceneObject::Scene(scene) => Some(scene),
            _ => None,
        })
    }

    /// Find a record by kind and name, returning its index and the record
    pub fn find(&self, kind: ObjectKind, name: &str) -> Option<(usize, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .find(|(_, object)| object.kind() == kind && object.name() == name)
    }

    /// Number of records of the given kind
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|object| object.kind() == kind).count()
    }

    /// Serialize as tab-indented JSON text
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        self.write_pretty(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Serialize as tab-indented JSON into a writer
    pub fn write_pretty<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)
    }

    /// Parse a document from JSON text
    pub fn parse(text: &str) -> Result<Self, DocumentLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a document from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentLoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let document = Self::parse(&contents)?;
        log::debug!("Loaded {} records from {}", document.len(), path.display());
        Ok(document)
    }

    /// Save the document to a file, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentSaveError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_pretty(&mut writer)?;
        writer.flush()?;
        log::debug!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }
}

impl Serialize for S72Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.objects.len() + 1))?;
        seq.serialize_element(FORMAT_TAG)?;
        for object in &self.objects {
            seq.serialize_element(object)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for S72Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = S72Document;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "an array starting with \"{}\"", FORMAT_TAG)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if tag != FORMAT_TAG {
            return Err(de::Error::invalid_value(de::Unexpected::Str(&tag), &self));
        }

        let mut objects = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(object) = seq.next_element::<SceneObject>()? {
            objects.push(object);
        }
        Ok(S72Document { objects })
    }
}
