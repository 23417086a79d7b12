//! Lexer (tokenizer) for the netlist DSL.

use crate::error::{GraphError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text; string tokens hold the unquoted contents
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier (keyword, node name, type name)
    Identifier,
    /// A decimal integer, possibly signed
    Number,
    /// A double-quoted string
    Str,
    /// A directive (starts with '.')
    Directive,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let token = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(token(TokenKind::Eof, String::new())),
        };

        match ch {
            '\n' => {
                self.advance();
                Ok(token(TokenKind::Newline, "\n".to_string()))
            }
            '.' => {
                self.advance();
                let name = self.read_identifier();
                if name.is_empty() {
                    return Err(GraphError::lexer(line, column, "empty directive"));
                }
                Ok(token(TokenKind::Directive, format!(".{}", name)))
            }
            '"' => {
                self.advance();
                let text = self.read_string(line, column)?;
                Ok(token(TokenKind::Str, text))
            }
            '-' | '+' | '0'..='9' => {
                let text = self.read_number();
                if !text.chars().any(|c| c.is_ascii_digit()) {
                    return Err(GraphError::lexer(
                        line,
                        column,
                        format!("expected digits after '{}'", text),
                    ));
                }
                Ok(token(TokenKind::Number, text))
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Ok(token(TokenKind::Identifier, text))
            }
            _ => Err(GraphError::lexer(
                line,
                column,
                format!("unexpected character '{}'", ch),
            )),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();
        if let Some(&sign) = self.chars.peek() {
            if sign == '-' || sign == '+' {
                text.push(sign);
                self.advance();
            }
        }
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_string(&mut self, line: usize, column: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.peek().copied() {
                Some('"') => {
                    self.advance();
                    return Ok(text);
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(c @ ('"' | '\\')) => text.push(c),
                        Some(c) => {
                            return Err(GraphError::lexer(
                                self.line,
                                self.column,
                                format!("unknown escape '\\{}'", c),
                            ))
                        }
                        None => break,
                    }
                }
                Some('\n') | None => break,
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        Err(GraphError::lexer(line, column, "unterminated string"))
    }
}

/// Parse an integer token.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            kinds.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return kinds;
            }
        }
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-8"), Some(-8));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("x"), None);
    }

    #[test]
    fn test_lexer_basic() {
        let input = "port clk in bit";
        let mut lexer = Lexer::new(input);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "port");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.text, "clk");
        assert_eq!(tok.column, 6);
    }

    #[test]
    fn test_lexer_line_kinds() {
        use TokenKind::*;
        assert_eq!(
            kinds(".type byte vector 8 # comment\nparam N string \"a b\""),
            vec![
                Directive, Identifier, Identifier, Number, Newline, Identifier, Identifier,
                Identifier, Str, Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let mut lexer = Lexer::new(r#""say \"hi\"""#);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text, "say \"hi\"");
    }

    #[test]
    fn test_lexer_errors() {
        assert!(matches!(
            Lexer::new("\"open").next_token(),
            Err(GraphError::LexerError { line: 1, column: 1, .. })
        ));
        assert!(matches!(
            Lexer::new("  @").next_token(),
            Err(GraphError::LexerError { column: 3, .. })
        ));
    }
}
