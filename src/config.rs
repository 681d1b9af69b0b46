//! Parser configuration data.
//!
//! The link classifier needs out-of-band knowledge of which target prefixes
//! denote namespaces rather than page titles. That table and the pattern for
//! interlanguage prefixes live here, together with the tunable limits.

use regex::Regex;
use std::sync::LazyLock;

/// A link-target namespace recognised by the link classifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Namespace {
    /// `Category:` membership tags.
    Category,
    /// `File:` (or legacy `Image:`) media links.
    File,
}

/// Namespace prefixes, lowercased. `image` is the legacy alias of `file`.
static NAMESPACES: phf::Map<&'static str, Namespace> = phf::phf_map! {
    "category" => Namespace::Category,
    "file" => Namespace::File,
    "image" => Namespace::File,
};

/// A pattern that matches interlanguage link targets (`de:Title`).
static INTERLANG: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[a-z]{2,3}:").unwrap());

/// Processed configuration data for the parser.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// The maximum construct nesting depth before a parse is abandoned.
    pub recursion_limit: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl Configuration {
    /// Looks up the namespace denoted by a link-target prefix.
    pub(crate) fn namespace(&self, prefix: &str) -> Option<Namespace> {
        NAMESPACES.get(prefix.to_ascii_lowercase().as_str()).copied()
    }

    /// Returns true if the link target addresses another language edition.
    pub(crate) fn is_interlang(&self, target: &str) -> bool {
        INTERLANG.is_match(target)
    }
}

/// The default nesting cap. Deep enough for any real document; shallow
/// enough to stop pathological inputs from exhausting the stack.
pub const DEFAULT_RECURSION_LIMIT: usize = 256;

/// The default parser configuration.
pub(crate) static CONFIG: Configuration = Configuration {
    recursion_limit: DEFAULT_RECURSION_LIMIT,
};
