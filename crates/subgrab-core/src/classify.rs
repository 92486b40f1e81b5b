//! Filename classification by extension.
//!
//! Extension comparison is case-sensitive: `movie.SRT` is not a subtitle.

/// Subtitle file extensions (including the dot).
pub const SUBTITLE_EXTS: &[&str] = &[".srt", ".sub", ".smi", ".ssa", ".ass", ".sup"];

/// Archive extensions recognized as archives.
pub const SUPPORTED_ARCHIVE_EXTS: &[&str] = &[
    ".zip", ".7z", ".tar", ".bz2", ".rar", ".gz", ".xz", ".iso", ".tgz", ".tbz2", ".cbr",
];

/// Archive extensions the walker can actually open.
pub const ACCESSIBLE_ARCHIVE_EXTS: &[&str] = &[".zip", ".rar"];

/// What a filename looks like, judged purely from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Subtitle,
    /// An archive the virtual filesystem can browse (`.zip`, `.rar`).
    AccessibleArchive,
    /// A recognized archive format that cannot be traversed.
    InaccessibleArchive,
    Unknown,
}

impl Classification {
    pub fn is_archive(self) -> bool {
        matches!(
            self,
            Classification::AccessibleArchive | Classification::InaccessibleArchive
        )
    }
}

/// Classify `name` (a bare filename, a path, or a VFS address).
pub fn classify(name: &str) -> Classification {
    let ext = extension(name);
    if ext.is_empty() {
        return Classification::Unknown;
    }
    if SUBTITLE_EXTS.contains(&ext) {
        Classification::Subtitle
    } else if ACCESSIBLE_ARCHIVE_EXTS.contains(&ext) {
        Classification::AccessibleArchive
    } else if SUPPORTED_ARCHIVE_EXTS.contains(&ext) {
        Classification::InaccessibleArchive
    } else {
        Classification::Unknown
    }
}

/// Last path component of `name`, splitting on `/` and `\`.
pub fn file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Extension of the final path component, including the dot; empty if none.
///
/// Leading dots of the component never start an extension, so `.srt` and
/// `..` have none while `a.tar.gz` yields `.gz`.
pub fn extension(name: &str) -> &str {
    let base = file_name(name);
    let stem_start = base.len() - base.trim_start_matches('.').len();
    match base[stem_start..].rfind('.') {
        Some(i) => &base[stem_start + i..],
        None => "",
    }
}

/// True if `name` ends with one of the subtitle extensions.
pub fn has_subtitle_suffix(name: &str) -> bool {
    SUBTITLE_EXTS.iter().any(|ext| name.ends_with(ext))
}

/// Title shown to the user for a file: `"[" + last dot-separated part + "]" + name`.
pub fn display_title(name: &str) -> String {
    let tag = name.rsplit('.').next().unwrap_or(name);
    format!("[{}]{}", tag, name)
}
