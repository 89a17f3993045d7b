// Constants for the Linen front end

/// Maximum number of bytes the lexer will scan in one call.
/// Longer sources stop with a fatal `SourceTooLong` error.
pub const MAX_SOURCE_LENGTH: usize = 200;

/// Limit used by the `linen` binary when no `--max-length` flag is given.
/// Script files are usually larger than the reference limit.
pub const DEMO_SOURCE_LENGTH: usize = 64 * 1024;

/// Deepest allowed nesting of brackets, call argument lists and blocks.
/// Deeper sources are rejected with a syntax error.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Marker that continues a statement across a newline when it starts the next line
pub const LINE_CONTINUATION: u8 = b'\\';
