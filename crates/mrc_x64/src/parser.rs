use crate::{Address, Error, MemoryReference, Register, Result, ScaleFactor};
use std::str::FromStr;

#[derive(Debug, PartialEq)]
enum Term {
    Register(Register),
    Scaled(Register, ScaleFactor),
    Number(i64),
}

fn invalid(text: &str) -> Error {
    Error::InvalidSyntax(text.to_string())
}

fn parse_number(text: &str) -> Option<i64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None if text.bytes().all(|b| b.is_ascii_digit()) => text.parse().ok(),
        None => None,
    }
}

fn parse_term(text: &str) -> Result<Term> {
    if let Some((left, right)) = text.split_once('*') {
        let (register, multiplier) = match (left.parse::<Register>(), right.parse::<Register>()) {
            (Ok(register), Err(_)) => (register, right),
            (Err(_), Ok(register)) => (register, left),
            _ => return Err(invalid(text)),
        };
        let multiplier = parse_number(multiplier)
            .and_then(|multiplier| u8::try_from(multiplier).ok())
            .ok_or_else(|| invalid(text))?;
        return Ok(Term::Scaled(register, ScaleFactor::try_from_multiplier(multiplier)?));
    }

    if let Ok(register) = text.parse::<Register>() {
        return Ok(Term::Register(register));
    }

    parse_number(text).map(Term::Number).ok_or_else(|| invalid(text))
}

/// Split `a+b-c` into signed terms, `true` marking a negated term.
fn split_terms(text: &str) -> Result<Vec<(bool, &str)>> {
    let mut terms = vec![];
    let mut negative = false;
    let mut start = 0;

    for (at, c) in text.char_indices() {
        if c != '+' && c != '-' {
            continue;
        }
        if at > 0 {
            terms.push((negative, &text[start..at]));
        }
        negative = c == '-';
        start = at + 1;
    }
    terms.push((negative, &text[start..]));

    if terms.iter().any(|(_, term)| term.is_empty()) {
        Err(invalid(text))
    } else {
        Ok(terms)
    }
}

impl FromStr for MemoryReference {
    type Err = Error;

    /// Parse Intel syntax, e.g. `[rbx + rcx*4 - 0x10]`.
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| invalid(s))?;

        let mut base: Option<Register> = None;
        let mut index: Option<(Register, ScaleFactor)> = None;
        let mut disp: i64 = 0;

        for (negative, text) in split_terms(inner)? {
            match parse_term(text)? {
                Term::Number(value) => {
                    let value = if negative { -value } else { value };
                    disp = disp.checked_add(value).ok_or_else(|| invalid(s))?;
                }
                _ if negative => return Err(invalid(s)),
                Term::Register(register) => {
                    if base.is_none() {
                        base = Some(register);
                    } else if index.is_none() {
                        index = Some((register, ScaleFactor::Times1));
                    } else {
                        return Err(invalid(s));
                    }
                }
                Term::Scaled(register, scale) => {
                    if index.is_some() {
                        return Err(invalid(s));
                    }
                    index = Some((register, scale));
                }
            }
        }

        // `[rax+rsp]` is still encodable with the registers swapped.
        if let (Some(first), Some((second, ScaleFactor::Times1))) = (base, index) {
            if second.is(Register::RSP) && !first.is(Register::RSP) {
                base = Some(second);
                index = Some((first, ScaleFactor::Times1));
            }
        }

        let disp = i32::try_from(disp).map_err(|_| invalid(s))?;

        Ok(MemoryReference::new(base, index, disp))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_reference(&s.parse()?)
    }
}
