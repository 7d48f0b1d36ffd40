use crate::grammar::{
    ast::Tag,
    tables::{Enclosing, ROOT, TagTable},
};

/// The structural parent of a tag: another tag or the label itself.
#[derive(Clone, Copy)]
pub(super) enum Parent<'a> {
    Root,
    Tag(&'a Tag),
}

impl Parent<'_> {
    /// Name used in messages (`ROOT` at the top level).
    pub(super) fn name(&self) -> &str {
        match self {
            Parent::Root => ROOT,
            Parent::Tag(tag) => &tag.name,
        }
    }

    /// The table-level view used for nesting checks.
    pub(super) fn enclosing(&self) -> Enclosing<'_> {
        match self {
            Parent::Root => Enclosing::Root,
            Parent::Tag(tag) => Enclosing::Tag(&tag.name),
        }
    }
}

/// Per-tag view threaded through the tree walk.
#[derive(Clone, Copy)]
pub(super) struct TagCtx<'a> {
    pub(super) tag: &'a Tag,
    pub(super) parent: Parent<'a>,
    pub(super) path: &'a [usize],
    pub(super) table: &'a TagTable,
}
