use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::{Span, SyntaxError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word: statement keywords, `do`, `end`
    Ident(String),
    /// `:name`
    Symbol(String),
    /// Quoted string with escapes already resolved
    Str(String),
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "`{name}`"),
            TokenKind::Symbol(name) => write!(f, "symbol `:{name}`"),
            TokenKind::Str(_) => write!(f, "string"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Newline => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

/// Split Desktopfile source into tokens. The result always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer {
        chars: source.chars().peekable(),
        line: 1,
        column: 1,
    };

    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Lexer<'_> {
    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        // Horizontal whitespace and comments
        while let Some(&c) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '#' => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let span = self.span();
        let Some(c) = self.bump() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span,
            });
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            '\'' => TokenKind::Str(self.single_quoted(span)?),
            '"' => TokenKind::Str(self.double_quoted(span)?),
            ':' => match self.chars.peek() {
                Some(&c) if is_ident_start(c) => TokenKind::Symbol(self.word(String::new())),
                _ => return Err(SyntaxError::new(span, "expected a symbol name after `:`")),
            },
            c if is_ident_start(c) => TokenKind::Ident(self.word(c.to_string())),
            other => {
                return Err(SyntaxError::new(
                    span,
                    format!("unexpected character {other:?}"),
                ))
            }
        };

        Ok(Token { kind, span })
    }

    fn word(&mut self, mut buf: String) -> String {
        while let Some(&c) = self.chars.peek() {
            if !is_ident_continue(c) {
                break;
            }
            buf.push(c);
            self.bump();
        }
        buf
    }

    /// `'...'`: only `\'` and `\\` are escapes
    fn single_quoted(&mut self, start: Span) -> Result<String, SyntaxError> {
        let mut buf = String::new();
        loop {
            match self.bump() {
                None => return Err(SyntaxError::new(start, "unterminated string")),
                Some('\'') => return Ok(buf),
                Some('\\') => match self.chars.peek() {
                    Some(&c @ ('\'' | '\\')) => {
                        buf.push(c);
                        self.bump();
                    }
                    _ => buf.push('\\'),
                },
                Some(c) => buf.push(c),
            }
        }
    }

    fn double_quoted(&mut self, start: Span) -> Result<String, SyntaxError> {
        let mut buf = String::new();
        loop {
            match self.bump() {
                None => return Err(SyntaxError::new(start, "unterminated string")),
                Some('"') => return Ok(buf),
                Some('\\') => {
                    let Some(c) = self.bump() else {
                        return Err(SyntaxError::new(start, "unterminated string"));
                    };
                    match c {
                        'n' => buf.push('\n'),
                        't' => buf.push('\t'),
                        'r' => buf.push('\r'),
                        '0' => buf.push('\0'),
                        'e' => buf.push('\x1b'),
                        '"' | '\\' | '$' | '#' => buf.push(c),
                        other => {
                            buf.push('\\');
                            buf.push(other);
                        }
                    }
                }
                Some('#') if self.chars.peek() == Some(&'{') => {
                    let column = self.column - 1;
                    return Err(SyntaxError::new(
                        Span {
                            line: self.line,
                            column,
                        },
                        "string interpolation is not supported",
                    ));
                }
                Some(c) => buf.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_statement() {
        assert_eq!(
            kinds("env 'A', \"1\"\n"),
            vec![
                TokenKind::Ident("env".into()),
                TokenKind::Str("A".into()),
                TokenKind::Comma,
                TokenKind::Str("1".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_symbols_and_comments() {
        assert_eq!(
            kinds("configuration :default do # trailing\nend"),
            vec![
                TokenKind::Ident("configuration".into()),
                TokenKind::Symbol("default".into()),
                TokenKind::Ident("do".into()),
                TokenKind::Newline,
                TokenKind::Ident("end".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_quote_escapes() {
        assert_eq!(
            kinds(r"'it\'s a \\ and \n'"),
            vec![TokenKind::Str(r"it's a \ and \n".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_double_quote_escapes() {
        assert_eq!(
            kinds(r#""say \"hi\"\tnow \q""#),
            vec![TokenKind::Str("say \"hi\"\tnow \\q".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_interpolation_is_rejected() {
        let err = tokenize("env 'H', \"#{ENV['HOME']}/x\"").unwrap_err();
        assert_eq!(err.span, Span { line: 1, column: 11 });
        assert!(err.message.contains("interpolation is not supported"));
    }

    #[test]
    fn test_escaped_or_bare_hash_in_double_quotes() {
        assert_eq!(
            kinds(r#""\#{x} # {y} #""#),
            vec![TokenKind::Str("#{x} # {y} #".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        assert_eq!(
            kinds("'a # b'"),
            vec![TokenKind::Str("a # b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = tokenize("env\n  cmd").unwrap();
        assert_eq!(tokens[0].span, Span { line: 1, column: 1 });
        assert_eq!(tokens[2].span, Span { line: 2, column: 3 });
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("\n  echo 'oops").unwrap_err();
        assert_eq!(err.span, Span { line: 2, column: 8 });
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("env = 1").unwrap_err();
        assert!(err.message.contains("unexpected character '='"));
    }

    #[test]
    fn test_bare_colon() {
        assert!(tokenize(": foo").is_err());
    }
}
