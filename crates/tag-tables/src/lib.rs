//! Grammar tables for Graphviz HTML-like labels.
//!
//! A [`TagTable`] lists every supported tag together with the parents it may
//! appear in and the attributes it accepts. The built-in table
//! ([`TagTable::builtin`]) describes the vocabulary Graphviz accepts inside
//! `label=<...>`; custom tables can be loaded from JSON with
//! [`TagTable::from_json`].
//!
//! All lookups are ASCII case-insensitive. Tables are immutable once built,
//! so a single table can be shared by any number of threads.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, OnceLock};
use thiserror::Error;

/// Sentinel parent name for tags written at the top level of a label.
pub const ROOT: &str = "ROOT";

fn is_root(name: &str) -> bool {
    name.eq_ignore_ascii_case(ROOT)
}

/// What directly encloses a tag: the label itself or another tag.
///
/// A source tag that happens to be spelled `root` is a [`Enclosing::Tag`];
/// only [`Enclosing::Root`] matches the [`ROOT`] entry of a parent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing<'a> {
    /// Top level of the label.
    Root,
    /// Another tag, by name as written.
    Tag(&'a str),
}

/// Errors that can occur when building or loading a tag table.
#[derive(Debug, Error)]
pub enum TableError {
    /// JSON deserialization failed.
    #[error("invalid tag table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A rule has an empty tag name.
    #[error("tag rule #{index} has an empty name")]
    EmptyName {
        /// Position of the offending rule in the table.
        index: usize,
    },

    /// The reserved `ROOT` name was used as a tag.
    #[error("'ROOT' is reserved and cannot be defined as a tag")]
    ReservedName,

    /// Two rules define the same tag (compared case-insensitively).
    #[error("tag '{name}' is defined more than once")]
    DuplicateTag {
        /// The duplicated tag name, as written in the second definition.
        name: String,
    },

    /// A rule names a parent that is neither `ROOT` nor a defined tag.
    #[error("tag '{tag}' lists unknown parent '{parent}'")]
    UnknownParent {
        /// The tag whose rule is inconsistent.
        tag: String,
        /// The parent name that could not be resolved.
        parent: String,
    },
}

/// Nesting and attribute rules for a single tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRule {
    /// Canonical tag name (upper case in the built-in table).
    pub name: String,
    /// Tags this tag may be nested in, in reporting order. [`ROOT`] allows
    /// the tag at the top level of a label.
    pub parents: Vec<String>,
    /// Attribute names this tag accepts.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl TagRule {
    /// Whether this tag may appear directly inside `parent`.
    pub fn allows_parent(&self, parent: Enclosing<'_>) -> bool {
        match parent {
            Enclosing::Root => self.parents.iter().any(|p| is_root(p)),
            Enclosing::Tag(name) => self
                .parents
                .iter()
                .any(|p| !is_root(p) && p.eq_ignore_ascii_case(name)),
        }
    }

    /// Whether `attribute` is accepted on this tag.
    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.eq_ignore_ascii_case(attribute))
    }
}

/// The full set of tag rules used by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTable {
    /// All supported tags, in definition order.
    pub tags: Vec<TagRule>,

    /// Cached map from upper-cased tag name → index into `tags` (lazily initialized).
    #[serde(skip)]
    index: OnceLock<HashMap<String, usize>>,
}

// ─── Built-in vocabulary ────────────────────────────────────────────────────

/// Parents of the inline text tags: a table cell or the label itself.
const TEXT_PARENTS: &[&str] = &["TD", ROOT];

const TABLE_ATTRIBUTES: &[&str] = &[
    "ALIGN",
    "BGCOLOR",
    "BORDER",
    "CELLBORDER",
    "CELLPADDING",
    "CELLSPACING",
    "COLOR",
    "COLUMNS",
    "FIXEDSIZE",
    "GRADIENTANGLE",
    "HEIGHT",
    "HREF",
    "ID",
    "PORT",
    "ROWS",
    "SIDES",
    "STYLE",
    "TARGET",
    "TITLE",
    "TOOLTIP",
    "VALIGN",
    "WIDTH",
];

const TD_ATTRIBUTES: &[&str] = &[
    "ALIGN",
    "BALIGN",
    "BGCOLOR",
    "BORDER",
    "CELLPADDING",
    "CELLSPACING",
    "COLOR",
    "COLSPAN",
    "FIXEDSIZE",
    "GRADIENTANGLE",
    "HEIGHT",
    "HREF",
    "ID",
    "PORT",
    "ROWSPAN",
    "SIDES",
    "STYLE",
    "TARGET",
    "TITLE",
    "TOOLTIP",
    "VALIGN",
    "WIDTH",
];

/// Declarative registry of the built-in rules: (tag, parents, attributes).
const BUILTIN_RULES: &[(&str, &[&str], &[&str])] = &[
    ("TABLE", &["TD", ROOT, "FONT", "I", "B", "U", "O"], TABLE_ATTRIBUTES),
    ("TR", &["TABLE"], &[]),
    ("TD", &["TR"], TD_ATTRIBUTES),
    ("FONT", TEXT_PARENTS, &["COLOR", "FACE", "POINT-SIZE"]),
    ("B", TEXT_PARENTS, &[]),
    ("I", TEXT_PARENTS, &[]),
    ("U", TEXT_PARENTS, &[]),
    ("O", TEXT_PARENTS, &[]),
    ("S", TEXT_PARENTS, &[]),
    ("SUB", TEXT_PARENTS, &[]),
    ("SUP", TEXT_PARENTS, &[]),
    ("BR", TEXT_PARENTS, &["ALIGN"]),
    ("IMG", &["TD"], &["SCALE", "SRC"]),
    ("HR", &["TABLE"], &[]),
    ("VR", &["TR"], &[]),
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

static BUILTIN: LazyLock<TagTable> = LazyLock::new(|| {
    TagTable::from_rules(
        BUILTIN_RULES
            .iter()
            .map(|(name, parents, attributes)| TagRule {
                name: name.to_string(),
                parents: owned(parents),
                attributes: owned(attributes),
            })
            .collect(),
    )
});

impl TagTable {
    /// Build a table from `tags`, checking that the rules are consistent.
    ///
    /// Rejects empty or reserved names, duplicate tags and parents that are
    /// neither [`ROOT`] nor defined in the same table.
    pub fn new(tags: Vec<TagRule>) -> Result<Self, TableError> {
        let table = Self::from_rules(tags);
        table.check()?;
        Ok(table)
    }

    /// Deserialize and check a table from its JSON form
    /// (`{"tags": [{"name": ..., "parents": [...], "attributes": [...]}]}`).
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let table: TagTable = serde_json::from_str(json)?;
        table.check()?;
        Ok(table)
    }

    /// The built-in Graphviz table, initialised once per process.
    pub fn builtin() -> &'static TagTable {
        &BUILTIN
    }

    fn from_rules(tags: Vec<TagRule>) -> Self {
        Self {
            tags,
            index: OnceLock::new(),
        }
    }

    fn check(&self) -> Result<(), TableError> {
        let mut seen: HashSet<String> = HashSet::with_capacity(self.tags.len());
        for (index, rule) in self.tags.iter().enumerate() {
            if rule.name.is_empty() {
                return Err(TableError::EmptyName { index });
            }
            if is_root(&rule.name) {
                return Err(TableError::ReservedName);
            }
            if !seen.insert(rule.name.to_ascii_uppercase()) {
                return Err(TableError::DuplicateTag {
                    name: rule.name.clone(),
                });
            }
        }
        for rule in &self.tags {
            let unknown = rule
                .parents
                .iter()
                .find(|p| !is_root(p) && !seen.contains(&p.to_ascii_uppercase()));
            if let Some(parent) = unknown {
                return Err(TableError::UnknownParent {
                    tag: rule.name.clone(),
                    parent: parent.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns the cached name → index map, building it lazily on first access.
    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.tags
                .iter()
                .enumerate()
                .map(|(i, rule)| (rule.name.to_ascii_uppercase(), i))
                .collect()
        })
    }

    /// Look up the rule for `name` (case-insensitive).
    pub fn rule(&self, name: &str) -> Option<&TagRule> {
        self.index()
            .get(&name.to_ascii_uppercase())
            .map(|&i| &self.tags[i])
    }

    /// Whether `name` is a supported tag.
    pub fn is_supported(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    /// Allowed parents of `name`, or `None` when the tag is unsupported.
    pub fn parents_of(&self, name: &str) -> Option<&[String]> {
        self.rule(name).map(|r| r.parents.as_slice())
    }

    /// Allowed attributes of `name`, or `None` when the tag is unsupported.
    pub fn attributes_of(&self, name: &str) -> Option<&[String]> {
        self.rule(name).map(|r| r.attributes.as_slice())
    }

    /// Tags that may appear directly inside `parent`, in table order.
    pub fn children_of(&self, parent: Enclosing<'_>) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|rule| rule.allows_parent(parent))
            .map(|rule| rule.name.as_str())
            .collect()
    }

    /// Number of supported tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the table defines no tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
