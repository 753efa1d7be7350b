/// Public entry point for processing one file.
///
/// `FilePipeline` runs a file's text through the directive machinery against
/// a configuration and a global variable layer, and returns the output text
/// or the decision to exclude the file.
pub mod file;
/// Per-file processing state.
///
/// The `Session` owns everything that lives for one file: local variables,
/// the nesting stack, the stack of source cursors for includes, and the
/// output accumulator. Directive handlers act on it.
pub mod session;
/// Line classification and substitution.
///
/// Recognises directive lines, uncomment lines (`//$`, `//$$`), and plain
/// text, and replaces `/*$expr$*/` blocks by their values.
pub mod line;
/// Comment removal.
///
/// Strips `//` and `/* */` comments from emitted lines while leaving string
/// and character literals intact. Block comments may span lines.
pub mod comments;
