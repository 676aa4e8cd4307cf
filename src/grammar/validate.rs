use anyhow::anyhow;
use beau_collector::BeauCollector;
use itertools::Itertools;

use super::model::GrammarBuilder;

/// Every declared variable must have kept at least one alternative after
/// both passes. A miss means a source file changed on disk between them.
pub fn check_populated(builder: &GrammarBuilder) -> Result<(), anyhow::Error> {
    builder
        .entries()
        .sorted_by_key(|(name, _)| *name)
        .map(|(name, variable)| {
            if variable.is_empty() {
                Err(anyhow!(
                    "Iskierka error: variable '{name}' does not have any hash expression. \
                     The source code file was probably mutated by an external program \
                     during parsing. Try to run again."
                ))
            } else {
                Ok(())
            }
        })
        .bcollect::<Vec<_>>()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::model::{Alternative, Unit};

    #[test]
    fn populated_builder_passes() {
        let mut builder = GrammarBuilder::default();
        let id = builder.declare("output");
        builder
            .variable_mut(id)
            .insert(
                Alternative::new(vec![Unit::Literal("x".to_string())], vec![]),
                1,
            )
            .unwrap();

        assert!(check_populated(&builder).is_ok());
    }

    #[test]
    fn declared_but_empty_variable_is_reported() {
        let mut builder = GrammarBuilder::default();
        builder.declare("output");
        builder.declare("ghost");

        let error = check_populated(&builder).unwrap_err();
        assert!(error.to_string().contains("ghost") || error.to_string().contains("output"));
    }
}
