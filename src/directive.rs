/// The directive table.
///
/// Declares every directive keyword with the shape of its argument, whether
/// it runs inside suppressed regions, and its handler. Also decodes argument
/// text according to its shape.
pub mod registry;
/// Conditional nesting state.
///
/// The stack of `#if` frames that decides whether a line is emitted.
pub mod state;
/// Directive handlers.
///
/// One function per directive keyword, called by the file pipeline with the
/// text following the keyword.
pub(crate) mod handlers;
