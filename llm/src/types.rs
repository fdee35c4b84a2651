//! Request content types.

/// Binary content with a MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// MIME type of the blob (e.g. "audio/mp3").
    pub mime_type: String,
    /// Binary data.
    pub data: Vec<u8>,
}

/// A part of the user content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Text content.
    Text(String),
    /// Binary blob.
    Blob(Blob),
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    /// Creates a blob part.
    pub fn blob(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Part::Blob(Blob {
            mime_type: mime_type.into(),
            data: data.into(),
        })
    }

    /// Text content, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Blob content, if this is a blob part.
    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Part::Blob(b) => Some(b),
            _ => None,
        }
    }
}

/// One generation request: an optional system instruction plus ordered user
/// content parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    /// System instruction, if any.
    pub system: Option<String>,
    /// User content parts in order.
    pub parts: Vec<Part>,
}

impl GenerateRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the system instruction.
    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system = Some(text.into());
        self
    }

    /// Appends a text part.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::text(text));
        self
    }

    /// Appends a binary part.
    pub fn blob(mut self, mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.parts.push(Part::blob(mime_type, data));
        self
    }

    /// True if any part is binary.
    pub fn has_blobs(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, Part::Blob(_)))
    }
}
