pub use dot_htmllabel_tag_tables::{Enclosing, ROOT, TableError, TagRule, TagTable};
