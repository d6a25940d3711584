pub mod ast;
pub mod config;
pub mod datetime;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod serializer;

pub use ast::{Document, EnumClass, EnumMember, EnumRef, Module, ModuleContents, Value};
pub use config::ModcfgConfig;
pub use error::ModcfgError;
pub use serializer::serialize;

/// Options for one parse call. The enum catalog is read-only input data,
/// scoped to the call; there is no global registry.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Ordered enum catalog; order decides ambiguous unqualified references
    /// when `enum_ambiguity_check` is off.
    pub enums: Vec<EnumClass>,
    /// Replace unresolvable references with their literal text instead of
    /// failing.
    pub enum_resolve_fail_silently: bool,
    /// Treat an unqualified member defined by several classes as an error.
    pub enum_ambiguity_check: bool,
    /// Return a single top-level mapping directly instead of a one-element
    /// array.
    pub inline: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            enums: Vec::new(),
            enum_resolve_fail_silently: false,
            enum_ambiguity_check: true,
            inline: false,
        }
    }
}

/// Parse a MODCFG document with default options.
pub fn parse(input: &str) -> Result<Value, ModcfgError> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a MODCFG document: text → tokens → raw document → enum resolution.
/// The result is the document's top-level entries as an array, or a lone
/// mapping when `options.inline` applies.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value, ModcfgError> {
    let mut parser = parser::Parser::new(input)?;
    let document = parser.parse_document()?;
    let document = resolver::resolve_document(document, options)?;
    Ok(document.into_value(options.inline))
}
