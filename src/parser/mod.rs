use crate::lexer::{Lexer, Token};
use crate::ModcfgError;
use crate::ast::Document;

mod document;
mod module;
mod value;

/// Hard bound on nesting so adversarial input exhausts a counter, not the
/// native stack.
pub(crate) const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ModcfgError> {
        let mut lexer = Lexer::new(input);
        let peek = Some(lexer.next_token()?);
        Ok(Self { lexer, peek, depth: 0 })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, ModcfgError> {
        let curr = self.peek.take().ok_or(ModcfgError::UnexpectedEof {
            message: "Unexpected end of input".into(),
            line: self.lexer.line(),
            column: self.lexer.column(),
            hint: None,
            code: Some(201),
        })?;
        self.peek = Some(self.lexer.next_token()?);
        Ok(curr)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek.as_ref()
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<Token, ModcfgError> {
        let token = self.bump()?;
        if token != expected {
            return Err(ModcfgError::SyntaxError {
                message: format!("Expected {:?}, got {:?}", expected, token),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Check your syntax".into()),
                code: Some(202),
            });
        }
        Ok(token)
    }

    pub(crate) fn line(&self) -> usize {
        self.lexer.line()
    }

    pub(crate) fn column(&self) -> usize {
        self.lexer.column()
    }

    pub(crate) fn descend(&mut self) -> Result<(), ModcfgError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ModcfgError::SyntaxError {
                message: format!("Nesting deeper than {} levels", MAX_DEPTH),
                line: self.lexer.line(),
                column: self.lexer.column(),
                hint: Some("Flatten the document structure".into()),
                code: Some(214),
            });
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn parse_document(&mut self) -> Result<Document, ModcfgError> {
        document::parse_document(self)
    }
}
