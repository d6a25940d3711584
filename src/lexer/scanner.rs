use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip spaces, tabs, carriage returns, and `#` comments. Newlines stay put
/// so the caller decides whether they are significant.
pub(super) fn skip_inline_trivia(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' => {
                bump(lexer);
            }
            '#' => {
                while let Some(ch) = lexer.peek {
                    if ch == '\n' {
                        break;
                    }
                    bump(lexer);
                }
            }
            _ => break,
        }
    }
}

/// Measure the indentation of the next non-blank line and queue the
/// Indent/Dedent tokens it implies. Blank and comment-only lines are skipped
/// without touching the stack. Runs only at bracket depth zero.
pub(super) fn handle_line_start(lexer: &mut Lexer) -> Result<(), ModcfgError> {
    loop {
        let mut width = 0usize;
        loop {
            match lexer.peek {
                Some(' ') => {
                    width += 1;
                    bump(lexer);
                }
                Some('\t') => {
                    // tabs advance to the next multiple of 8
                    width = width / 8 * 8 + 8;
                    bump(lexer);
                }
                Some('\r') => {
                    bump(lexer);
                }
                _ => break,
            }
        }

        match lexer.peek {
            Some('\n') => {
                bump(lexer);
            }
            Some('#') => {
                while let Some(ch) = lexer.peek {
                    if ch == '\n' {
                        break;
                    }
                    bump(lexer);
                }
            }
            None => {
                // EOF closes every block still open
                while lexer.indent_stack.len() > 1 {
                    lexer.indent_stack.pop();
                    lexer.pending.push_back(Token::Dedent);
                }
                return Ok(());
            }
            _ => {
                let current = lexer.indent_stack.last().copied().unwrap_or(0);
                if width > current {
                    lexer.indent_stack.push(width);
                    lexer.pending.push_back(Token::Indent);
                } else if width < current {
                    while lexer.indent_stack.last().copied().unwrap_or(0) > width {
                        lexer.indent_stack.pop();
                        lexer.pending.push_back(Token::Dedent);
                    }
                    if lexer.indent_stack.last().copied().unwrap_or(0) != width {
                        return Err(ModcfgError::IndentationError {
                            message: format!(
                                "Dedent to width {} does not match any open block",
                                width
                            ),
                            line: lexer.line,
                            column: lexer.column,
                            hint: Some("Check indentation consistency".into()),
                            code: Some(104),
                        });
                    }
                }
                return Ok(());
            }
        }
    }
}
