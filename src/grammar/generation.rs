use std::collections::HashMap;

use rand::Rng;

use super::model::{Alternative, Grammar, Unit, VarId};
use crate::DEFAULT_RECURSION_LEVEL_LIMIT;

/// one generated sample: correlated natural-language and code strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pair {
    pub natural: String,
    pub code: String,
}

/// Raised when a top-level generation descends deeper than the configured
/// level limit. The evaluator and rng stay valid for the next call.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("recursion level limit reached during generation")]
pub struct RecursionLimit;

/// Depth-first expansion of a sealed grammar into string pairs.
///
/// The rng is threaded in per call, so one evaluator can serve any number
/// of independent random streams.
#[derive(Debug)]
pub struct Evaluator {
    grammar: Grammar,
    level_limit: i64,
}

impl Evaluator {
    pub fn new(grammar: Grammar) -> Evaluator {
        Evaluator {
            grammar,
            level_limit: DEFAULT_RECURSION_LEVEL_LIMIT,
        }
    }

    pub fn set_level_limit(&mut self, limit: i64) {
        self.level_limit = limit;
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Result<Pair, RecursionLimit> {
        let mut level = 0i64;
        self.evaluate_variable(self.grammar.root(), rng, &mut level)
    }

    fn evaluate_variable(
        &self,
        id: VarId,
        rng: &mut impl Rng,
        level: &mut i64,
    ) -> Result<Pair, RecursionLimit> {
        let alternative = self.grammar.variable(id).choose(rng);
        self.evaluate_alternative(alternative, rng, level)
    }

    /// Evaluates every distinct referenced variable exactly once, so all
    /// occurrences of a variable within this alternative substitute the
    /// identical value, then renders both sides.
    fn evaluate_alternative(
        &self,
        alternative: &Alternative,
        rng: &mut impl Rng,
        level: &mut i64,
    ) -> Result<Pair, RecursionLimit> {
        let mut substitutions: HashMap<VarId, Pair> = HashMap::new();

        for &target in &alternative.references {
            *level += 1;

            if *level >= self.level_limit {
                return Err(RecursionLimit);
            }

            let value = self.evaluate_variable(target, rng, level)?;
            *level -= 1;

            substitutions.insert(target, value);
        }

        Ok(Pair {
            natural: render(&alternative.natural, &substitutions, natural_side),
            code: render(&alternative.code, &substitutions, code_side),
        })
    }
}

fn natural_side(pair: &Pair) -> &str {
    &pair.natural
}

fn code_side(pair: &Pair) -> &str {
    &pair.code
}

/// Concatenates one side of an alternative.
///
/// An empty substitution removes the single whitespace before it, or, when
/// there is none, arms a flag that swallows the leading whitespace of the
/// next literal. Decorative variables can thus vanish without leaving a
/// double space behind.
fn render(
    units: &[Unit],
    substitutions: &HashMap<VarId, Pair>,
    side: fn(&Pair) -> &str,
) -> String {
    let mut out = String::new();
    let mut omit_leading_space = false;

    for unit in units {
        match unit {
            Unit::Literal(text) => {
                if omit_leading_space {
                    omit_leading_space = false;

                    match text.chars().next() {
                        Some(first) if first.is_whitespace() => {
                            out.push_str(&text[first.len_utf8()..]);
                        }
                        _ => out.push_str(text),
                    }
                } else {
                    out.push_str(text);
                }
            }
            Unit::Reference(id) => {
                omit_leading_space = false;
                let value = side(&substitutions[id]);

                if value.is_empty() {
                    if out.ends_with(|c: char| c.is_whitespace()) {
                        out.pop();
                    } else {
                        omit_leading_space = true;
                    }
                } else {
                    out.push_str(value);
                }
            }
        }
    }

    out
}
