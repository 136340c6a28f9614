//! Source rendering for command and condition trees
//!
//! `{}` renders a tree on one line, `{:#}` renders a command with one child per
//! line, indented two spaces per level. Both forms parse back to an equal tree.

use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter, Write};

use super::types::ast::{Command, Condition, PrimitiveKind, SensorKind};

const INDENT: &str = "  ";

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Display for SensorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Constant { v } => write!(f, "({})", v),
            Condition::Sensor { kind } => write!(f, "({})", kind),
            Condition::EnergyAtLeast { amount } => write!(f, "(energy-at-least {})", amount),
            Condition::And { operands } => write_list(f, "and", operands),
            Condition::Or { operands } => write_list(f, "or", operands),
            Condition::Not { operand } => write!(f, "(not {})", operand),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write_indented(f, self, 0);
        }

        match self {
            Command::Primitive { kind } => write!(f, "({})", kind),
            Command::Sequence { body } => write_list(f, "seq", body),
            Command::Conditional {
                test,
                then_c,
                else_c,
            } => write!(f, "(if {} {} {})", test, then_c, else_c),
            Command::Loop { test, body } => write!(f, "(while {} {})", test, body),
        }
    }
}

impl Command {
    /// SHA-256 of the canonical one-line source, as lowercase hex
    ///
    /// Equal trees share a fingerprint whatever whitespace or keyword case their
    /// source used.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, tag: &str, items: &[T]) -> fmt::Result {
    write!(f, "({}", tag)?;
    for item in items {
        write!(f, " {}", item)?;
    }
    f.write_char(')')
}

fn write_indented(f: &mut Formatter<'_>, command: &Command, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);

    match command {
        Command::Primitive { .. } => write!(f, "{}{}", pad, command),
        Command::Sequence { body } if body.is_empty() => write!(f, "{}(seq)", pad),
        Command::Sequence { body } => {
            write!(f, "{}(seq", pad)?;
            for child in body {
                f.write_char('\n')?;
                write_indented(f, child, depth + 1)?;
            }
            f.write_char(')')
        }
        Command::Conditional {
            test,
            then_c,
            else_c,
        } => {
            writeln!(f, "{}(if {}", pad, test)?;
            write_indented(f, then_c, depth + 1)?;
            f.write_char('\n')?;
            write_indented(f, else_c, depth + 1)?;
            f.write_char(')')
        }
        Command::Loop { test, body } => {
            writeln!(f, "{}(while {}", pad, test)?;
            write_indented(f, body, depth + 1)?;
            f.write_char(')')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::{parse_command, parse_condition};

    #[test]
    fn test_compact_form() {
        let program = Command::sequence(vec![
            Command::primitive(PrimitiveKind::TurnClockwise),
            Command::looping(
                Condition::energy_at_least(500.0),
                Command::primitive(PrimitiveKind::Move),
            ),
        ]);

        assert_eq!(
            program.to_string(),
            "(seq (turnclockwise) (while (energy-at-least 500) (move)))"
        );
    }

    #[test]
    fn test_fractional_amount_keeps_decimals() {
        assert_eq!(
            Condition::energy_at_least(2.5).to_string(),
            "(energy-at-least 2.5)"
        );
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(Command::sequence(vec![]).to_string(), "(seq)");
        assert_eq!(Condition::And { operands: vec![] }.to_string(), "(and)");
        assert_eq!(Condition::Or { operands: vec![] }.to_string(), "(or)");
    }

    #[test]
    fn test_indented_form() {
        let program = parse_command(
            "(seq (if (wall) (turncounterclockwise) (move)) (while (not (at-item)) (move)))",
        )
        .expect("Should parse");

        let expected = "\
(seq
  (if (wall)
    (turncounterclockwise)
    (move))
  (while (not (at-item))
    (move)))";
        assert_eq!(format!("{:#}", program), expected);
    }

    #[test]
    fn test_both_forms_parse_back() {
        let source = "(SEQ (while (and (energy-at-least 1000) (or (can-hit-robot) (true))) \
                      (seq (shoot) (pick-up-and-use))) (if (false) (seq) (turnclockwise)))";
        let program = parse_command(source).expect("Should parse");

        assert_eq!(parse_command(&program.to_string()).unwrap(), program);
        assert_eq!(parse_command(&format!("{:#}", program)).unwrap(), program);
    }

    #[test]
    fn test_fingerprint_ignores_layout_and_case() {
        let a = parse_command("(seq (move)   (SHOOT))").unwrap();
        let b = parse_command("(Seq\n  (move)\n  (shoot))").unwrap();
        let c = parse_command("(seq (shoot) (move))").unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_condition_round_trip() {
        let condition = parse_condition("(Not (AND (wall) (energy-at-least 12.75)))").unwrap();
        assert_eq!(condition.to_string(), "(not (and (wall) (energy-at-least 12.75)))");
        assert_eq!(parse_condition(&condition.to_string()).unwrap(), condition);
    }
}
