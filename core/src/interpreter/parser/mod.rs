//! Parser for the robot control language
//!
//! Recursive descent directly over the source text. Each form is `(tag args...)`;
//! when an argument opens a parenthesis, the parser scans ahead counting nested
//! opens and closes until the depth returns to the entry level, slices that span
//! and recurses into it. There is no separate tokenizer.
//!
//! ```text
//! Command   ::= "(move)" | "(shoot)" | "(pick-up-and-use)"
//!             | "(turnclockwise)" | "(turncounterclockwise)"
//!             | "(seq" Command* ")"
//!             | "(if" Condition Command Command ")"
//!             | "(while" Condition Command ")"
//! Condition ::= "(true)" | "(false)" | "(wall)" | "(at-item)" | "(can-hit-robot)"
//!             | "(energy-at-least" Number ")"
//!             | "(and" Condition* ")" | "(or" Condition* ")" | "(not" Condition ")"
//! ```
//!
//! Keywords are case-insensitive. Zero-argument tags match only their exact literal
//! (`(true)`, never `(trueish)`); tags with arguments must be followed by
//! whitespace or a parenthesis.

use super::errors::{ParseResult, ProductionKind, SyntaxError};
use super::types::ast::{Command, Condition, PrimitiveKind, SensorKind};


/* ===================== Public API ===================== */

/// Deepest form nesting the parser accepts
///
/// Every later pass over a tree (printing, counting, execution) recurses once per
/// level, so the bound holds for the whole pipeline.
pub const MAX_DEPTH: usize = 256;

/// Parse program text into a command tree
pub fn parse_command(source: &str) -> ParseResult<Command> {
    check_balanced(source.trim())?;
    command_at(source, 1)
}

/// Parse condition text into a condition tree
pub fn parse_condition(source: &str) -> ParseResult<Condition> {
    check_balanced(source.trim())?;
    condition_at(source, 1)
}

/* ===================== Productions ===================== */

fn command_at(source: &str, depth: usize) -> ParseResult<Command> {
    let form = Form::split(source, ProductionKind::Program, depth)?;
    let child = depth + 1;

    match form.tag.as_str() {
        "seq" => {
            let body = form
                .args
                .iter()
                .map(|arg| command_at(arg, child))
                .collect::<ParseResult<Vec<_>>>()?;
            Ok(Command::Sequence { body })
        }
        "if" => {
            let [test, then_c, else_c] = form.exact::<3>()?;
            Ok(Command::conditional(
                condition_at(test, child)?,
                command_at(then_c, child)?,
                command_at(else_c, child)?,
            ))
        }
        "while" => {
            let [test, body] = form.exact::<2>()?;
            Ok(Command::looping(
                condition_at(test, child)?,
                command_at(body, child)?,
            ))
        }
        tag => match PrimitiveKind::from_keyword(tag) {
            Some(kind) => {
                form.exact::<0>()?;
                Ok(Command::Primitive { kind })
            }
            None => Err(form.unrecognized()),
        },
    }
}

fn condition_at(source: &str, depth: usize) -> ParseResult<Condition> {
    let form = Form::split(source, ProductionKind::Condition, depth)?;
    let child = depth + 1;

    match form.tag.as_str() {
        "true" | "false" => {
            form.exact::<0>()?;
            Ok(Condition::Constant {
                v: form.tag == "true",
            })
        }
        "and" => Ok(Condition::And {
            operands: form.conditions(child)?,
        }),
        "or" => Ok(Condition::Or {
            operands: form.conditions(child)?,
        }),
        "not" => {
            let [operand] = form.exact::<1>()?;
            Ok(Condition::negate(condition_at(operand, child)?))
        }
        "energy-at-least" => {
            let [amount] = form.exact::<1>()?;
            Ok(Condition::EnergyAtLeast {
                amount: parse_amount(amount)?,
            })
        }
        tag => match SensorKind::from_keyword(tag) {
            Some(kind) => {
                form.exact::<0>()?;
                Ok(Condition::Sensor { kind })
            }
            None => Err(form.unrecognized()),
        },
    }
}

/* ===================== Form Splitting ===================== */

/// One parenthesized form: its lowercased tag and raw argument slices
struct Form<'a> {
    kind: ProductionKind,
    text: &'a str,
    tag: String,
    args: Vec<&'a str>,
}

impl<'a> Form<'a> {
    /// `source` must be balanced; the public entry points check that once up front
    fn split(source: &'a str, kind: ProductionKind, depth: usize) -> ParseResult<Self> {
        let text = source.trim();
        if text.is_empty() {
            return Err(SyntaxError::Empty(kind));
        }
        if depth > MAX_DEPTH {
            return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
        }

        let unrecognized = || SyntaxError::Unrecognized {
            kind,
            text: text.to_string(),
        };

        if !text.starts_with('(') {
            return Err(unrecognized());
        }
        // The opening parenthesis must close at the very end: "(move) (shoot)" is two forms
        match matching_close(text, 0) {
            Some(close) if close == text.len() - 1 => {}
            _ => return Err(unrecognized()),
        }

        let inner = text[1..text.len() - 1].trim_start();
        let tag_end = inner
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(inner.len());
        let tag = inner[..tag_end].to_ascii_lowercase();
        if tag.is_empty() {
            return Err(unrecognized());
        }

        Ok(Form {
            kind,
            text,
            tag,
            args: split_arguments(&inner[tag_end..]),
        })
    }

    /// Arguments of a fixed-arity tag
    fn exact<const N: usize>(&self) -> ParseResult<[&'a str; N]> {
        <[&str; N]>::try_from(self.args.as_slice()).map_err(|_| SyntaxError::Arity {
            tag: self.tag.clone(),
            expected: N,
            found: self.args.len(),
        })
    }

    fn conditions(&self, depth: usize) -> ParseResult<Vec<Condition>> {
        self.args.iter().map(|arg| condition_at(arg, depth)).collect()
    }

    fn unrecognized(&self) -> SyntaxError {
        SyntaxError::Unrecognized {
            kind: self.kind,
            text: self.text.to_string(),
        }
    }
}

/// Split the text after a tag into arguments
///
/// A parenthesized argument extends to its matching close; anything else is a
/// bare word ending at whitespace or the next opening parenthesis. The input is
/// already known to be balanced.
fn split_arguments(rest: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut i = 0;

    while i < rest.len() {
        let Some(c) = rest[i..].chars().next() else {
            break;
        };

        if c.is_whitespace() {
            i += c.len_utf8();
        } else if c == '(' {
            let end = matching_close(rest, i).map_or(rest.len(), |close| close + 1);
            args.push(&rest[i..end]);
            i = end;
        } else {
            let end = rest[i..]
                .find(|c: char| c.is_whitespace() || c == '(')
                .map_or(rest.len(), |offset| i + offset);
            args.push(&rest[i..end]);
            i = end;
        }
    }

    args
}

/// Byte index of the parenthesis closing the one at `open`
fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

fn check_balanced(text: &str) -> ParseResult<()> {
    let mut depth = 0usize;

    for b in text.bytes() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1).ok_or_else(|| SyntaxError::Unbalanced {
                    text: text.to_string(),
                })?;
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(SyntaxError::Unbalanced {
            text: text.to_string(),
        })
    }
}

fn parse_amount(text: &str) -> ParseResult<f64> {
    let invalid = || SyntaxError::InvalidNumber {
        text: text.to_string(),
    };

    let amount: f64 = text.parse().map_err(|_| invalid())?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}
