use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};

use crate::grammar::{
    self,
    generation::{Evaluator, Pair, RecursionLimit},
};

/// execution flags of a generator instance
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// errors are computed as usual but nothing is printed
    pub quiet: bool,
}

/// Program-level generator: a loaded grammar plus its own rng stream.
///
/// One instance is single-threaded; to parallelize bulk generation, run
/// several instances, each with an independent rng.
#[derive(Debug)]
pub struct Iskierka {
    evaluator: Evaluator,
    rng: StdRng,
}

impl Iskierka {
    /// Loads all rule files from `directory`. Any error aborts the whole
    /// load; diagnostics go to stderr unless [`Options::quiet`] is set.
    pub fn load<P: AsRef<Path>>(directory: P, options: Options) -> Result<Self, anyhow::Error> {
        match grammar::load_grammar(directory.as_ref()) {
            Ok(grammar) => Ok(Iskierka {
                evaluator: Evaluator::new(grammar),
                rng: StdRng::from_entropy(),
            }),
            Err(error) => {
                if !options.quiet {
                    eprintln!("{error:#}");
                }
                Err(error)
            }
        }
    }

    /// generate the next (natural, code) pair; a recursion-limit breach
    /// fails only this one call
    pub fn next_pair(&mut self) -> Result<Pair, RecursionLimit> {
        self.evaluator.generate(&mut self.rng)
    }

    /// cap on nested variable evaluations for subsequent calls; large
    /// values risk exhausting the call stack on fractal grammars
    pub fn set_level_limit(&mut self, limit: i64) {
        self.evaluator.set_level_limit(limit);
    }
}
