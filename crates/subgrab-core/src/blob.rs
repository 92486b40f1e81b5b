//! Downloaded file as handed over by a source, and its sanity check.

use crate::classify::{self, Classification};

/// Bytes of a downloaded file plus the metadata the source reported for it.
#[derive(Clone, PartialEq, Eq)]
pub struct DownloadedBlob {
    pub file_name: String,
    pub content_type: String,
    pub content_length: u64,
    pub content: Vec<u8>,
}

impl DownloadedBlob {
    /// Downloads of this many bytes or fewer are rejected.
    pub const MIN_SIZE: u64 = 10;

    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            content_length: content.len() as u64,
            content,
        }
    }

    /// Valid if the name is a subtitle or any recognized archive and the
    /// declared length is above `MIN_SIZE`. Rejects error pages served as downloads.
    pub fn is_valid(&self) -> bool {
        (self.is_subtitle() || self.is_supported_archive()) && self.content_length > Self::MIN_SIZE
    }

    pub fn is_subtitle(&self) -> bool {
        self.classification() == Classification::Subtitle
    }

    /// True for accessible and inaccessible archives alike.
    pub fn is_supported_archive(&self) -> bool {
        self.classification().is_archive()
    }

    pub fn classification(&self) -> Classification {
        classify::classify(&self.file_name)
    }

    /// Extension of `file_name`, including the dot.
    pub fn extension(&self) -> &str {
        classify::extension(&self.file_name)
    }
}

// Content is elided so logging a rejected blob stays readable.
impl std::fmt::Debug for DownloadedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadedBlob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}
