// Tastier - A single-pass compiler for a stack-based virtual machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Token definitions for the Tastier language.

use logos::Logos;

/// A token in the Tastier language.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // Literals
    /// Identifier (variable, constant or procedure name).
    #[regex("[A-Za-z][A-Za-z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Integer literal.
    #[regex("[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Number(i32),
    /// String literal, without the surrounding quotes.
    #[regex(r#""[^"]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    String(String),

    // Keywords
    /// `program`
    #[token("program")]
    Program,
    /// `void` - procedure declaration.
    #[token("void")]
    Void,
    /// `const`
    #[token("const")]
    Const,
    /// `external`
    #[token("external")]
    External,
    /// `procedure` - external procedure declaration.
    #[token("procedure")]
    Procedure,
    /// `int`
    #[token("int")]
    Int,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `string`
    #[token("string")]
    StringType,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `switch`
    #[token("switch")]
    Switch,
    /// `case`
    #[token("case")]
    Case,
    /// `default`
    #[token("default")]
    Default,
    /// `for`
    #[token("for")]
    For,
    /// `do`
    #[token("do")]
    Do,
    /// `read`
    #[token("read")]
    Read,
    /// `write`
    #[token("write")]
    Write,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<=")]
    LessEqual,
    /// `:=` - assignment.
    #[token(":=")]
    Assign,

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,

    /// Source text the lexer could not match. Produced by [`super::scan`],
    /// reported and skipped by the translator.
    Invalid(String),

    /// End of input. Appended by [`super::scan`], never matched.
    Eof,
}

impl Token {
    /// Describe the token the way syntax errors quote it.
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(_) => "ident".to_string(),
            Token::Number(_) => "number".to_string(),
            Token::String(_) => "string".to_string(),
            Token::Invalid(_) => "invalid".to_string(),
            Token::Eof => "EOF".to_string(),
            other => format!("\"{}\"", other.text()),
        }
    }

    /// The fixed source text of a keyword, operator or punctuation token.
    fn text(&self) -> &'static str {
        match self {
            Token::Program => "program",
            Token::Void => "void",
            Token::Const => "const",
            Token::External => "external",
            Token::Procedure => "procedure",
            Token::Int => "int",
            Token::Bool => "bool",
            Token::StringType => "string",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Switch => "switch",
            Token::Case => "case",
            Token::Default => "default",
            Token::For => "for",
            Token::Do => "do",
            Token::Read => "read",
            Token::Write => "write",
            Token::True => "true",
            Token::False => "false",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Equal => "=",
            Token::Less => "<",
            Token::Greater => ">",
            Token::GreaterEqual => ">=",
            Token::LessEqual => "<=",
            Token::Assign => ":=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::Question => "?",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Identifier(_)
            | Token::Number(_)
            | Token::String(_)
            | Token::Invalid(_)
            | Token::Eof => "",
        }
    }

    /// Whether this token names a variable type.
    pub fn is_type(&self) -> bool {
        matches!(self, Token::Int | Token::Bool | Token::StringType)
    }

    /// Whether this token can start a statement.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::LeftBrace
                | Token::If
                | Token::While
                | Token::Switch
                | Token::For
                | Token::Read
                | Token::Write
        )
    }

    /// Whether this token can start a simple (non-string, non-conditional)
    /// expression.
    pub fn starts_simple_expression(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_) | Token::Number(_) | Token::Minus | Token::True | Token::False
        )
    }

    /// Whether this token is a relational operator.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Token::Equal | Token::Less | Token::Greater | Token::GreaterEqual | Token::LessEqual
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Invalid(slice) => write!(f, "{}", slice),
            Token::Eof => write!(f, "end of input"),
            other => write!(f, "{}", other.text()),
        }
    }
}
