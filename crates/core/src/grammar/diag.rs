pub use dot_htmllabel_diagnostics::{
    Diagnostic, NodeRef, Severity, Span, Subject, codes, explain,
};
