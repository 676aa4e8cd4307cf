use std::collections::HashMap;

use rand::Rng;

use super::sampler::WeightTable;

/// stable handle into the grammar's variable arena; alternatives refer to
/// other variables through these indices, so cyclic ("fractal") grammars
/// need no owning references
pub type VarId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    Literal(String),
    Reference(VarId),
}

/// one weighted production of a variable: a unit sequence for the natural
/// side and one for the code side
#[derive(Clone, Debug)]
pub struct Alternative {
    pub natural: Vec<Unit>,
    pub code: Vec<Unit>,

    /// distinct variables referenced on either side, first-seen order
    pub references: Vec<VarId>,
}

impl Alternative {
    pub fn new(natural: Vec<Unit>, code: Vec<Unit>) -> Self {
        let mut references = vec![];

        for unit in natural.iter().chain(code.iter()) {
            if let Unit::Reference(id) = unit {
                if !references.contains(id) {
                    references.push(*id);
                }
            }
        }

        Alternative {
            natural,
            code,
            references,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("the weight of this hash expression is too big. Integer overflow happened")]
pub struct WeightOverflow;

/// mutable stage of a variable: alternatives can be inserted until the
/// builder is sealed into a [`Variable`]
#[derive(Debug, Default)]
pub struct VariableBuilder {
    alternatives: Vec<Alternative>,
    weights: Vec<i64>,
    total_weight: i64,
}

impl VariableBuilder {
    pub fn insert(
        &mut self,
        alternative: Alternative,
        weight: i64,
    ) -> Result<(), WeightOverflow> {
        self.total_weight = self
            .total_weight
            .checked_add(weight)
            .ok_or(WeightOverflow)?;
        self.weights.push(weight);
        self.alternatives.push(alternative);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// freeze the alternative list and build the probability table
    pub fn seal(self) -> Variable {
        Variable {
            table: WeightTable::build(&self.weights),
            alternatives: self.alternatives,
        }
    }
}

/// sealed variable: immutable alternatives plus a ready sampler
#[derive(Debug)]
pub struct Variable {
    alternatives: Vec<Alternative>,
    table: WeightTable,
}

impl Variable {
    pub fn choose(&self, rng: &mut impl Rng) -> &Alternative {
        &self.alternatives[self.table.draw(rng)]
    }

    #[cfg(test)]
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }
}

/// registry of all variables while parsing; names resolve to arena indices
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    names: HashMap<String, VarId>,
    variables: Vec<VariableBuilder>,
}

impl GrammarBuilder {
    /// register a variable name, returning the existing handle if the name
    /// was already declared
    pub fn declare(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }

        let id = self.variables.len();
        self.variables.push(VariableBuilder::default());
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.names.get(name).copied()
    }

    pub fn variable_mut(&mut self, id: VarId) -> &mut VariableBuilder {
        &mut self.variables[id]
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &VariableBuilder)> {
        self.names
            .iter()
            .map(|(name, &id)| (name.as_str(), &self.variables[id]))
    }

    pub fn seal(self, root: VarId) -> Grammar {
        Grammar {
            variables: self
                .variables
                .into_iter()
                .map(VariableBuilder::seal)
                .collect(),
            root,
        }
    }
}

/// fully loaded grammar; read-only for the rest of the process
#[derive(Debug)]
pub struct Grammar {
    variables: Vec<Variable>,
    root: VarId,
}

impl Grammar {
    pub fn root(&self) -> VarId {
        self.root
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal_alternative(text: &str) -> Alternative {
        Alternative::new(
            vec![Unit::Literal(text.to_string())],
            vec![Unit::Literal(text.to_string())],
        )
    }

    #[test]
    fn references_are_deduplicated_across_both_sides() {
        let alternative = Alternative::new(
            vec![
                Unit::Literal("a ".to_string()),
                Unit::Reference(3),
                Unit::Literal(" b ".to_string()),
                Unit::Reference(3),
            ],
            vec![Unit::Reference(7), Unit::Reference(3)],
        );

        assert_eq!(alternative.references, vec![3, 7]);
    }

    #[test]
    fn weight_total_overflow_is_rejected() {
        let mut builder = VariableBuilder::default();

        builder
            .insert(literal_alternative("a"), i64::MAX - 1)
            .unwrap();

        assert!(builder.insert(literal_alternative("b"), 2).is_err());
    }

    #[test]
    fn declare_is_idempotent_per_name() {
        let mut builder = GrammarBuilder::default();

        let first = builder.declare("output");
        let second = builder.declare("output");
        let other = builder.declare("other");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(builder.lookup("output"), Some(first));
        assert_eq!(builder.lookup("missing"), None);
    }
}
