//! Archive address encoding and parsing.

use std::path::{Path, PathBuf};

use url::form_urlencoded;

use super::VfsError;
use crate::classify::{self, Classification};

const SCHEME_SEP: &str = "://";

/// Archive formats the filesystem can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Rar,
}

impl ArchiveKind {
    pub fn scheme(self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Rar => "rar",
        }
    }

    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "zip" => Some(ArchiveKind::Zip),
            "rar" => Some(ArchiveKind::Rar),
            _ => None,
        }
    }
}

/// A parsed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Local(PathBuf),
    Archive {
        kind: ArchiveKind,
        /// Address of the archive file (local path or another archive address).
        container: String,
        /// Path inside the archive, no leading or trailing `/`; empty for the root.
        inner: String,
    },
}

impl Address {
    pub fn parse(address: &str) -> Result<Self, VfsError> {
        let Some((scheme, rest)) = address.split_once(SCHEME_SEP) else {
            return Ok(Address::Local(PathBuf::from(address)));
        };
        let kind = ArchiveKind::from_scheme(scheme)
            .ok_or_else(|| VfsError::UnsupportedScheme(address.to_string()))?;
        let (encoded, inner) = rest.split_once('/').unwrap_or((rest, ""));
        let container = form_urlencoded::parse(encoded.as_bytes())
            .next()
            .map(|(k, _)| k.into_owned())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| VfsError::MalformedAddress(address.to_string()))?;
        Ok(Address::Archive {
            kind,
            container,
            inner: inner.trim_matches('/').to_string(),
        })
    }
}

/// Archive address for the root of the archive at `path`.
///
/// Plain paths are made absolute first; archive addresses are wrapped as-is,
/// which is how nested archives become browsable. Returns `None` if `path`
/// is not a `.zip` or `.rar`.
pub fn translate_archive_scheme(path: &str) -> Option<String> {
    if classify::classify(path) != Classification::AccessibleArchive {
        return None;
    }
    let scheme = &classify::extension(path)[1..];
    let container = if path.contains(SCHEME_SEP) {
        path.to_string()
    } else {
        let p = Path::new(path);
        std::path::absolute(p)
            .unwrap_or_else(|_| p.to_path_buf())
            .to_string_lossy()
            .into_owned()
    };
    let encoded: String = form_urlencoded::byte_serialize(container.as_bytes()).collect();
    Some(format!("{scheme}{SCHEME_SEP}{encoded}"))
}

/// Join path segments with `/`, without doubling separators.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for seg in segments {
        let seg = seg.as_ref();
        if out.is_empty() {
            out.push_str(seg);
        } else {
            if !out.ends_with('/') {
                out.push('/');
            }
            out.push_str(seg.trim_start_matches('/'));
        }
    }
    out
}
