//! Two-pass, line-oriented parser for rule files.
//!
//! Every block is exactly three meaningful lines: a `#name` header, a
//! natural-language line and a code line. The declaration pass only
//! registers variable names so that the build pass can resolve references
//! in any order, including forward and cyclic ones.

use super::model::{Alternative, GrammarBuilder, Unit, VarId};
use crate::syntax::{self, EMPTY_SENTINEL, MARKER, PREFIX};

#[derive(thiserror::Error, Debug)]
#[error("Iskierka error in file '{file}' at line {line}: {kind}")]
pub struct SyntaxError {
    pub file: String,
    pub line: u64,
    pub kind: SyntaxErrorKind,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("missing variable name after #")]
    MissingName,

    #[error("the double hash expression '{0}' is not recognized")]
    DoubleMarker(String),

    #[error("variable name cannot start with '{0}'. Only letters a-zA-Z are allowed")]
    BadNameStart(char),

    #[error("character '{0}' is not allowed in a variable name")]
    BadNameChar(char),

    #[error("second line of this hash expression is missing")]
    MissingNaturalLine,

    #[error("third line of this hash expression is missing")]
    MissingCodeLine,

    #[error("'{0}' is not a property of a hash expression")]
    UnknownProperty(String),

    #[error("property '{0}' is not followed by a positive integer argument")]
    MissingWeight(String),

    #[error("value '{0}' is not a positive integer")]
    MalformedWeight(String),

    #[error("number '{0}' is too big. Weights are restricted to the range of i64")]
    WeightOutOfRange(String),

    #[error("the weight of this hash expression is too big. Integer overflow happened")]
    WeightOverflow,

    #[error("variables with prefix __ are not allowed in this version of Iskierka")]
    ReservedDoublePrefix,

    #[error("variable '{0}' has not been defined")]
    UndefinedVariable(String),
}

fn located(file: &str, line: u64, kind: SyntaxErrorKind) -> SyntaxError {
    SyntaxError {
        file: file.to_string(),
        line,
        kind,
    }
}

/// three-line block state machine shared by both passes
enum BlockState {
    Header,
    NaturalLine,
    CodeLine,
}

/// lines skipped while a header is expected: blanks, free text without the
/// marker, and the bare empty sentinel
fn is_comment(line: &str) -> bool {
    line.is_empty() || !line.starts_with(MARKER) || line == EMPTY_SENTINEL
}

/// First pass: register every declared variable name.
///
/// Weight clauses and content lines are not interpreted here beyond the
/// structural three-line check; a file ending mid-block is an error.
pub fn declaration_pass(
    builder: &mut GrammarBuilder,
    file: &str,
    content: &str,
) -> Result<(), SyntaxError> {
    let mut state = BlockState::Header;
    let mut line_no = 0u64;

    for raw in content.lines() {
        line_no += 1;
        let line = raw.trim_end();

        match state {
            BlockState::Header => {
                if is_comment(line) {
                    continue;
                }

                let (name, _rest) =
                    scan_name(line).map_err(|kind| located(file, line_no, kind))?;
                builder.declare(name);
                state = BlockState::NaturalLine;
            }
            BlockState::NaturalLine => {
                if line.is_empty() {
                    return Err(located(file, line_no, SyntaxErrorKind::MissingNaturalLine));
                }
                state = BlockState::CodeLine;
            }
            BlockState::CodeLine => {
                if line.is_empty() {
                    return Err(located(file, line_no, SyntaxErrorKind::MissingCodeLine));
                }
                state = BlockState::Header;
            }
        }
    }

    match state {
        BlockState::Header => Ok(()),
        BlockState::NaturalLine => {
            Err(located(file, line_no, SyntaxErrorKind::MissingNaturalLine))
        }
        BlockState::CodeLine => Err(located(file, line_no, SyntaxErrorKind::MissingCodeLine)),
    }
}

/// Second pass: parse headers fully and build every alternative.
///
/// A header naming a variable the declaration pass never saw means the file
/// changed on disk between the passes; it is reported as undefined.
pub fn build_pass(
    builder: &mut GrammarBuilder,
    file: &str,
    content: &str,
) -> Result<(), SyntaxError> {
    let mut state = BlockState::Header;
    let mut line_no = 0u64;

    let mut variable: VarId = 0;
    let mut weight = 1i64;
    let mut natural: Vec<Unit> = vec![];

    for raw in content.lines() {
        line_no += 1;
        let line = raw.trim_end();

        match state {
            BlockState::Header => {
                if is_comment(line) {
                    continue;
                }

                let (name, rest) =
                    scan_name(line).map_err(|kind| located(file, line_no, kind))?;

                variable = builder.lookup(name).ok_or_else(|| {
                    located(
                        file,
                        line_no,
                        SyntaxErrorKind::UndefinedVariable(name.to_string()),
                    )
                })?;
                weight = parse_weight(rest).map_err(|kind| located(file, line_no, kind))?;
                state = BlockState::NaturalLine;
            }
            BlockState::NaturalLine => {
                let is_sentinel = line == EMPTY_SENTINEL;
                let content_part = line.trim_start();

                if content_part.is_empty() {
                    return Err(located(file, line_no, SyntaxErrorKind::MissingNaturalLine));
                }

                natural = if is_sentinel {
                    vec![]
                } else {
                    parse_line(builder, content_part)
                        .map_err(|kind| located(file, line_no, kind))?
                };
                state = BlockState::CodeLine;
            }
            BlockState::CodeLine => {
                let is_sentinel = line == EMPTY_SENTINEL;
                let content_part = line.trim_start();

                if content_part.is_empty() {
                    return Err(located(file, line_no, SyntaxErrorKind::MissingCodeLine));
                }

                let code = if is_sentinel {
                    vec![]
                } else {
                    parse_line(builder, content_part)
                        .map_err(|kind| located(file, line_no, kind))?
                };

                let alternative = Alternative::new(std::mem::take(&mut natural), code);
                builder
                    .variable_mut(variable)
                    .insert(alternative, weight)
                    .map_err(|_| located(file, line_no, SyntaxErrorKind::WeightOverflow))?;
                state = BlockState::Header;
            }
        }
    }

    match state {
        BlockState::Header => Ok(()),
        BlockState::NaturalLine => {
            Err(located(file, line_no, SyntaxErrorKind::MissingNaturalLine))
        }
        BlockState::CodeLine => Err(located(file, line_no, SyntaxErrorKind::MissingCodeLine)),
    }
}

/// Splits a header line (already known to start with the marker) into the
/// variable name and the remainder after it.
fn scan_name(line: &str) -> Result<(&str, &str), SyntaxErrorKind> {
    let bytes = line.as_bytes();

    if bytes.len() == 1 {
        return Err(SyntaxErrorKind::MissingName);
    }

    if bytes[1] == b'#' {
        return Err(SyntaxErrorKind::DoubleMarker(line.to_string()));
    }

    if !syntax::is_name_start(bytes[1]) {
        let offender = line[1..].chars().next().unwrap();
        return Err(SyntaxErrorKind::BadNameStart(offender));
    }

    let mut end = 1;
    while end < bytes.len() {
        if bytes[end].is_ascii_whitespace() {
            break;
        }

        if !syntax::is_name_char(bytes[end]) {
            let offender = line[end..].chars().next().unwrap();
            return Err(SyntaxErrorKind::BadNameChar(offender));
        }

        end += 1;
    }

    Ok((&line[1..end], &line[end..]))
}

/// Parses the optional `weight <digits>` clause after the variable name.
/// Tokens after the number are ignored, as the format always has.
fn parse_weight(rest: &str) -> Result<i64, SyntaxErrorKind> {
    let mut words = rest.split_whitespace();

    let Some(property) = words.next() else {
        return Ok(1);
    };

    if property != "weight" {
        return Err(SyntaxErrorKind::UnknownProperty(property.to_string()));
    }

    let Some(number) = words.next() else {
        return Err(SyntaxErrorKind::MissingWeight(property.to_string()));
    };

    if !number.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(SyntaxErrorKind::MalformedWeight(number.to_string()));
    }

    number
        .parse::<i64>()
        .map_err(|_| SyntaxErrorKind::WeightOutOfRange(number.to_string()))
}

/// Splits one content line into alternating literal and reference units.
///
/// A reference opens at the prefix byte unless it sits mid-word (previous
/// byte is a letter), ends the line, or is followed by whitespace. Inside a
/// reference any non-identifier byte ends it; when that byte is the prefix
/// itself scanning stays in reference mode, which glues the next reference
/// to this one with no boundary in between.
pub fn parse_line(builder: &GrammarBuilder, line: &str) -> Result<Vec<Unit>, SyntaxErrorKind> {
    if line.starts_with("##") {
        return Err(SyntaxErrorKind::DoubleMarker(line.to_string()));
    }

    let bytes = line.as_bytes();
    let mut units = vec![];
    let mut in_literal = true;
    let mut start = 0usize;

    for i in 0..bytes.len() {
        if in_literal {
            let opens_reference = bytes[i] == PREFIX
                && !(i == bytes.len() - 1 || bytes[i + 1].is_ascii_whitespace())
                && (i == 0 || !bytes[i - 1].is_ascii_alphabetic());

            if opens_reference {
                units.push(Unit::Literal(line[start..i].to_string()));
                start = i;
                in_literal = false;
            }
        } else if !syntax::is_name_char(bytes[i]) {
            units.push(Unit::Reference(resolve(builder, &line[start + 1..i])?));
            start = i;
            in_literal = bytes[i] != PREFIX;
        }
    }

    if in_literal {
        units.push(Unit::Literal(line[start..].to_string()));
    } else {
        units.push(Unit::Reference(resolve(builder, &line[start + 1..])?));
    }

    Ok(units)
}

fn resolve(builder: &GrammarBuilder, name: &str) -> Result<VarId, SyntaxErrorKind> {
    if name.is_empty() {
        return Err(SyntaxErrorKind::ReservedDoublePrefix);
    }

    builder
        .lookup(name)
        .ok_or_else(|| SyntaxErrorKind::UndefinedVariable(name.to_string()))
}
