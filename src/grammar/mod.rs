pub mod generation;
pub mod model;
pub mod parse;
mod sampler;
mod validate;

use std::path::Path;

use anyhow::Context;

pub use model::{Grammar, GrammarBuilder, Unit};
pub use parse::{SyntaxError, SyntaxErrorKind};

use crate::{files, EXTENSION, ROOT};

/// Loads and seals a grammar from a directory of rule files.
///
/// All-or-nothing: the first error aborts the load and no partial grammar
/// escapes.
pub fn load_grammar(directory: &Path) -> Result<Grammar, anyhow::Error> {
    let sources = files::list_rule_files(directory)?;

    if sources.is_empty() {
        anyhow::bail!(
            "Iskierka error: not a single *.{EXTENSION} file has been found in directory '{}'.",
            directory.display()
        );
    }

    let mut builder = GrammarBuilder::default();

    for path in &sources {
        let content = read_rules(path)?;
        parse::declaration_pass(&mut builder, &path.display().to_string(), &content)?;
    }

    let Some(root) = builder.lookup(ROOT) else {
        anyhow::bail!(
            "Iskierka error: not a single instance of the variable '{ROOT}' has been found."
        );
    };

    // the build pass re-reads from disk; the populated check afterwards
    // catches files that changed between the passes
    for path in &sources {
        let content = read_rules(path)?;
        parse::build_pass(&mut builder, &path.display().to_string(), &content)?;
    }

    validate::check_populated(&builder)?;

    Ok(builder.seal(root))
}

fn read_rules(path: &Path) -> Result<String, anyhow::Error> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Iskierka error: unable to open file '{}'.", path.display()))
}
