// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::ops::Range;

use chumsky::{
    error::Simple,
    primitive::{end, filter, just, one_of},
    text::{self, TextParser},
    Parser,
};

use crate::error::ExprError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Kept as text so the token stays hashable; parsed to f64 by the parser.
    Number(String),
    Variable(String),
    Function(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Number(value) => f.write_str(value),
            Token::Variable(name) => f.write_str(name),
            Token::Function(name) => write!(f, "{}(", name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

pub fn gen_lexer() -> impl Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>> {
    let digits = filter(|c: &char| c.is_ascii_digit()).repeated();

    // Digits with at most one decimal point. No sign and no exponent.
    let number = digits
        .clone()
        .chain::<char, _, _>(just('.').chain(digits).or_not().flatten())
        .collect::<String>()
        .try_map(|string, span| {
            if string.chars().any(|c| c.is_ascii_digit()) {
                Ok(Token::Number(string))
            } else {
                Err(Simple::custom(span, "expected digits"))
            }
        })
        .labelled("number");

    // An identifier is a function name when the next non-blank character is '('.
    let call_lookahead = filter(|c: &char| c.is_whitespace())
        .repeated()
        .ignore_then(just('('))
        .rewind()
        .or_not();

    let ident = text::ident()
        .then(call_lookahead)
        .map(|(name, call): (String, Option<char>)| match call {
            Some(_) => Token::Function(name),
            None => Token::Variable(name),
        })
        .labelled("identifier");

    let ctrl = one_of("+-*/(),").map(|c| match c {
        '+' => Token::Plus,
        '-' => Token::Minus,
        '*' => Token::Star,
        '/' => Token::Slash,
        '(' => Token::LParen,
        ')' => Token::RParen,
        ',' => Token::Comma,
        _ => unreachable!(),
    });

    let token = number.or(ident).or(ctrl);

    let token = token.map_with_span(|tok, span| (tok, span)).padded();
    text::whitespace().ignore_then(token.repeated()).then_ignore(end())
}

/// Turns lexer failures into an `UnknownCharacter` error for the first
/// offending character.
pub fn lex_error(expr_str: &str, errs: Vec<Simple<char>>) -> ExprError {
    for err in &errs {
        tracing::trace!(error = %err, "lex error");
    }

    let first = errs.into_iter().min_by_key(|err| err.span().start);
    match first {
        Some(err) => {
            let pos = err.span().start;
            let ch = err
                .found()
                .copied()
                .or_else(|| expr_str.chars().nth(pos));
            match ch {
                Some(ch) => ExprError::UnknownCharacter { ch, pos },
                None => ExprError::Syntax {
                    message: err.to_string(),
                },
            }
        }
        None => ExprError::Syntax {
            message: "expression lex error".to_string(),
        },
    }
}
