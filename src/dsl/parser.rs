//! Parser for the netlist DSL.

use super::ast::*;
use super::lexer::{parse_int, Lexer, Token, TokenKind};
use crate::error::{GraphError, Result};
use crate::node::{BinaryOp, Direction};
use crate::types::TypeKind;

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        // Placeholder; `parse` reads the first real token.
        let current = Token {
            kind: TokenKind::Newline,
            text: String::new(),
            line: 1,
            column: 1,
        };
        Self { lexer, current }
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<GraphAst> {
        let mut ast = GraphAst::new();
        self.advance()?;

        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => self.parse_statement(&mut ast)?,
                TokenKind::Number | TokenKind::Str => {
                    return Err(GraphError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(GraphError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Collect the remaining tokens of the current line.
    fn rest_of_line(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while self.current.kind != TokenKind::Newline && self.current.kind != TokenKind::Eof {
            tokens.push(self.current.clone());
            self.advance()?;
        }
        Ok(tokens)
    }

    fn parse_directive(&mut self, ast: &mut GraphAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;
        let args = self.rest_of_line()?;

        match directive.to_lowercase().as_str() {
            ".graph" => match args.as_slice() {
                [name] => ast.name = Some(identifier(name)?),
                _ => return Err(GraphError::parse(line, "expected '.graph <name>'")),
            },
            ".type" => {
                let def = parse_type_def(&args, line)?;
                ast.types.push(def);
            }
            _ => {
                return Err(GraphError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_statement(&mut self, ast: &mut GraphAst) -> Result<()> {
        let keyword = self.current.text.to_lowercase();
        let line = self.current.line;
        self.advance()?;
        let args = self.rest_of_line()?;

        match keyword.as_str() {
            "port" => {
                let (name, dir, ty) = match args.as_slice() {
                    [name, dir, ty] => (Some(identifier(name)?), dir, ty),
                    [dir, ty] => (None, dir, ty),
                    _ => return Err(GraphError::parse(line, "expected 'port [name] <dir> <type>'")),
                };
                let dir = Direction::from_keyword(&dir.text).ok_or_else(|| {
                    GraphError::parse(line, format!("unknown direction: {}", dir.text))
                })?;
                ast.nodes.push(NodeDef {
                    name,
                    kind: NodeDefKind::Port(dir),
                    type_name: Some(identifier(ty)?),
                    line,
                });
            }
            "signal" => {
                let (name, ty) = match args.as_slice() {
                    [name, ty] => (Some(identifier(name)?), ty),
                    [ty] => (None, ty),
                    _ => return Err(GraphError::parse(line, "expected 'signal [name] <type>'")),
                };
                ast.nodes.push(NodeDef {
                    name,
                    kind: NodeDefKind::Signal,
                    type_name: Some(identifier(ty)?),
                    line,
                });
            }
            "param" | "parameter" => {
                let (name, ty, default) = match args.as_slice() {
                    [name, ty] => (name, ty, None),
                    [name, ty, value] => (name, ty, Some(constant(value)?)),
                    _ => {
                        return Err(GraphError::parse(
                            line,
                            "expected 'param <name> <type> [default]'",
                        ))
                    }
                };
                ast.nodes.push(NodeDef {
                    name: Some(identifier(name)?),
                    kind: NodeDefKind::Parameter { default },
                    type_name: Some(identifier(ty)?),
                    line,
                });
            }
            "expr" => {
                let [name, op, lhs, rhs] = args.as_slice() else {
                    return Err(GraphError::parse(line, "expected 'expr <name> <op> <lhs> <rhs>'"));
                };
                let op = BinaryOp::from_keyword(&op.text).ok_or_else(|| {
                    GraphError::parse(line, format!("unknown operator: {}", op.text))
                })?;
                ast.nodes.push(NodeDef {
                    name: Some(identifier(name)?),
                    kind: NodeDefKind::Expression {
                        op,
                        lhs: operand(lhs)?,
                        rhs: operand(rhs)?,
                    },
                    type_name: None,
                    line,
                });
            }
            "connect" => {
                let [dst, src] = args.as_slice() else {
                    return Err(GraphError::parse(line, "expected 'connect <destination> <source>'"));
                };
                ast.connections.push(ConnectDef {
                    destination: identifier(dst)?,
                    source: operand(src)?,
                    line,
                });
            }
            _ => {
                return Err(GraphError::parse(
                    line,
                    format!("unknown statement: {}", keyword),
                ));
            }
        }

        Ok(())
    }
}

fn parse_type_def(args: &[Token], line: usize) -> Result<TypeDef> {
    let (name, kind) = match args {
        [name, kind] => {
            let kind = TypeKind::from_keyword(&kind.text).ok_or_else(|| {
                GraphError::parse(line, format!("unknown type kind: {}", kind.text))
            })?;
            (name, kind)
        }
        [name, kind, width] if kind.text.eq_ignore_ascii_case("vector") => {
            let width = parse_int(&width.text)
                .filter(|w| *w > 0)
                .and_then(|w| u32::try_from(w).ok())
                .ok_or_else(|| {
                    GraphError::parse(line, format!("invalid vector width: {}", width.text))
                })?;
            (name, TypeKind::Vector { width })
        }
        _ => return Err(GraphError::parse(line, "expected '.type <name> <kind> [width]'")),
    };
    Ok(TypeDef {
        name: identifier(name)?,
        kind,
        line,
    })
}

fn identifier(tok: &Token) -> Result<String> {
    if tok.kind == TokenKind::Identifier {
        Ok(tok.text.clone())
    } else {
        Err(GraphError::parse(
            tok.line,
            format!("expected identifier, got {:?}", tok.text),
        ))
    }
}

fn constant(tok: &Token) -> Result<Constant> {
    match tok.kind {
        TokenKind::Number => parse_int(&tok.text)
            .map(Constant::Int)
            .ok_or_else(|| GraphError::parse(tok.line, format!("invalid integer: {}", tok.text))),
        TokenKind::Str => Ok(Constant::Str(tok.text.clone())),
        TokenKind::Identifier if tok.text == "true" => Ok(Constant::Bool(true)),
        TokenKind::Identifier if tok.text == "false" => Ok(Constant::Bool(false)),
        _ => Err(GraphError::parse(
            tok.line,
            format!("expected constant, got {:?}", tok.text),
        )),
    }
}

fn operand(tok: &Token) -> Result<Operand> {
    match constant(tok) {
        Ok(c) => Ok(Operand::Constant(c)),
        Err(_) => identifier(tok).map(Operand::Node),
    }
}
