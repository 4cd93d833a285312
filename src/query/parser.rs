/*
 * tmsu
 * Copyright (C) 2026 The tmsu authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use super::Expr;
use crate::common::err::{TmsuError, TmsuResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // parens and minus stand alone; a name is any run free of whitespace
    // and the reserved characters
    static ref TOKEN_RE: Regex = Regex::new(r"[()]|-|[^\s()=<>,-]+").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Minus,
    Name(String),
}

fn lex(input: &str) -> TmsuResult<Vec<Token>> {
    let mut tokens = vec![];
    let mut pos = 0;
    for m in TOKEN_RE.find_iter(input) {
        let gap = &input[pos..m.start()];
        if let Some(bad) = gap.chars().find(|c| !c.is_whitespace()) {
            return Err(TmsuError::BadQuery(format!(
                "unexpected character {:?}",
                bad
            )));
        }
        pos = m.end();
        tokens.push(match m.as_str() {
            "(" => Token::LParen,
            ")" => Token::RParen,
            "-" => Token::Minus,
            name => Token::Name(name.to_owned()),
        });
    }
    if let Some(bad) = input[pos..].chars().find(|c| !c.is_whitespace()) {
        return Err(TmsuError::BadQuery(format!(
            "unexpected character {:?}",
            bad
        )));
    }
    Ok(tokens)
}

fn is_keyword(token: &Token, keyword: &str) -> bool {
    match token {
        Token::Name(name) => name.eq_ignore_ascii_case(keyword),
        _ => false,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // or := and ( "OR" and )*
    fn parse_or(&mut self) -> TmsuResult<Expr> {
        let mut left = self.parse_and()?;
        while self.peek().map_or(false, |t| is_keyword(t, "or")) {
            self.next();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // and := unary ( ( "AND" | ) unary )*   -- juxtaposition is AND
    fn parse_and(&mut self) -> TmsuResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let explicit_and = match self.peek() {
                Some(t) if is_keyword(t, "and") => true,
                Some(t) if is_keyword(t, "or") => break,
                Some(Token::RParen) | None => break,
                Some(_) => false,
            };
            if explicit_and {
                self.next();
            }
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // unary := ( "NOT" | "-" ) unary | atom
    fn parse_unary(&mut self) -> TmsuResult<Expr> {
        let negated = match self.peek() {
            Some(Token::Minus) => true,
            Some(t) if is_keyword(t, "not") => true,
            _ => false,
        };
        if negated {
            self.next();
            Ok(Expr::Not(Box::new(self.parse_unary()?)))
        } else {
            self.parse_atom()
        }
    }

    // atom := tagname | "(" expr ")"
    fn parse_atom(&mut self) -> TmsuResult<Expr> {
        match self.next() {
            Some(Token::Name(name)) => {
                if ["and", "or", "not"].iter().any(|kw| name.eq_ignore_ascii_case(kw)) {
                    Err(TmsuError::BadQuery(format!(
                        "expected a tag name, found keyword {:?}",
                        name
                    )))
                } else {
                    Ok(Expr::Tag(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(expr),
                    _ => Err(TmsuError::BadQuery("unbalanced parenthesis".to_string())),
                }
            }
            other => Err(TmsuError::BadQuery(format!(
                "expected a tag name, found {:?}",
                other
            ))),
        }
    }
}

pub fn parse(input: &str) -> TmsuResult<Expr> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(TmsuError::BadQuery("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(TmsuError::BadQuery(format!(
            "unexpected trailing input at token {}",
            parser.pos + 1
        )));
    }
    Ok(expr)
}
