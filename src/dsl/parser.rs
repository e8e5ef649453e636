use super::ast::{Document, Statement, StatementKind, Variant};
use super::lexer::{Token, TokenKind};
use super::{Span, SyntaxError};

/// Recursive-descent parser over the token stream produced by the lexer
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// How a block was opened, and so how it must be closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    DoEnd,
    Braces,
}

impl Delimiter {
    fn closes(self, kind: &TokenKind) -> bool {
        match self {
            Delimiter::DoEnd => matches!(kind, TokenKind::Ident(word) if word == "end"),
            Delimiter::Braces => *kind == TokenKind::RBrace,
        }
    }

    fn closer(self) -> &'static str {
        match self {
            Delimiter::DoEnd => "`end`",
            Delimiter::Braces => "`}`",
        }
    }
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        // tokenize() always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::new(
            token.span,
            format!("expected {expected}, found {}", token.kind),
        )
    }

    pub fn parse_document(&mut self) -> Result<Document, SyntaxError> {
        let mut document = Document::default();

        loop {
            self.skip_separators();
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Eof => return Ok(document),
                TokenKind::Ident(word) if word == "configuration" => {
                    self.advance();
                    document.variants.push(self.parse_variant(token.span)?);
                }
                TokenKind::Ident(word) => {
                    return Err(SyntaxError::new(
                        token.span,
                        format!("`{word}` must appear inside a configuration block"),
                    ))
                }
                _ => return Err(self.unexpected("`configuration`")),
            }
        }
    }

    fn parse_variant(&mut self, span: Span) -> Result<Variant, SyntaxError> {
        let mut args = self.parse_args()?;
        expect_arity("configuration", span, &args, 1)?;
        let name = args.remove(0);
        let body = self.parse_block()?;
        Ok(Variant { name, body, span })
    }

    /// Arguments with or without surrounding parentheses
    fn parse_args(&mut self) -> Result<Vec<String>, SyntaxError> {
        if self.peek().kind == TokenKind::LParen {
            self.advance();
            self.skip_newlines();
            if self.peek().kind == TokenKind::RParen {
                self.advance();
                return Ok(Vec::new());
            }
            let args = self.parse_arg_list()?;
            self.skip_newlines();
            if self.peek().kind != TokenKind::RParen {
                return Err(self.unexpected("`)`"));
            }
            self.advance();
            return Ok(args);
        }

        if matches!(self.peek().kind, TokenKind::Str(_) | TokenKind::Symbol(_)) {
            self.parse_arg_list()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut args = vec![self.parse_value()?];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            self.skip_newlines();
            args.push(self.parse_value()?);
        }
        Ok(args)
    }

    fn parse_value(&mut self) -> Result<String, SyntaxError> {
        match self.peek().kind.clone() {
            TokenKind::Str(value) | TokenKind::Symbol(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("a string or symbol")),
        }
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let open = self.peek().clone();
        let delimiter = match &open.kind {
            TokenKind::Ident(word) if word == "do" => Delimiter::DoEnd,
            TokenKind::LBrace => Delimiter::Braces,
            _ => return Err(self.unexpected("`do` or `{`")),
        };
        self.advance();

        let mut body = Vec::new();
        loop {
            self.skip_separators();
            let token = self.peek();
            if delimiter.closes(&token.kind) {
                self.advance();
                return Ok(body);
            }
            if token.kind == TokenKind::Eof {
                return Err(SyntaxError::new(
                    open.span,
                    format!("block is never closed, expected {}", delimiter.closer()),
                ));
            }
            body.push(self.parse_statement(delimiter)?);
        }
    }

    fn parse_statement(&mut self, enclosing: Delimiter) -> Result<Statement, SyntaxError> {
        let token = self.advance();
        let span = token.span;
        let keyword = match token.kind {
            TokenKind::Ident(keyword) => keyword,
            other => {
                return Err(SyntaxError::new(
                    span,
                    format!("expected a statement, found {other}"),
                ))
            }
        };

        let kind = match keyword.as_str() {
            "env" => {
                let [key, value] = take_args::<2>(&keyword, span, self.parse_args()?)?;
                StatementKind::SetVar { key, value }
            }
            "alias_cmd" | "alias" => {
                let [key, value] = take_args::<2>(&keyword, span, self.parse_args()?)?;
                StatementKind::SetAlias { key, value }
            }
            "echo" => {
                let [text] = take_args::<1>(&keyword, span, self.parse_args()?)?;
                StatementKind::Echo { text }
            }
            "cmd" => {
                let [command] = take_args::<1>(&keyword, span, self.parse_args()?)?;
                StatementKind::RunCommand { command }
            }
            "os" => {
                let tags = self.parse_args()?;
                if tags.is_empty() {
                    return Err(SyntaxError::new(
                        span,
                        "`os` needs at least one operating system tag",
                    ));
                }
                let body = self.parse_block()?;
                StatementKind::Conditional { tags, body }
            }
            "configuration" => {
                return Err(SyntaxError::new(
                    span,
                    "configuration blocks cannot be nested",
                ))
            }
            other => {
                return Err(SyntaxError::new(
                    span,
                    format!("unknown statement `{other}`"),
                ))
            }
        };

        // A statement ends at a separator or at the end of its block
        let next = &self.peek().kind;
        let ended = matches!(
            next,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        ) || enclosing.closes(next);
        if !ended {
            return Err(self.unexpected("end of statement"));
        }

        Ok(Statement { kind, span })
    }
}

fn expect_arity(
    keyword: &str,
    span: Span,
    args: &[String],
    expected: usize,
) -> Result<(), SyntaxError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(SyntaxError::new(
            span,
            format!(
                "`{keyword}` takes {expected} argument(s), {} given",
                args.len()
            ),
        ))
    }
}

fn take_args<const N: usize>(
    keyword: &str,
    span: Span,
    args: Vec<String>,
) -> Result<[String; N], SyntaxError> {
    expect_arity(keyword, span, &args, N)?;
    args.try_into()
        .map_err(|_| SyntaxError::new(span, format!("`{keyword}` takes {N} argument(s)")))
}
