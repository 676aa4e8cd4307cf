use std::process;

use iskierka::configuration::{load_config, ConfigReadError};
use iskierka::{Iskierka, Options};

fn main() {
    let config = match load_config("iskierka.toml") {
        Ok(config) => config,
        Err(ConfigReadError::ReadError(e)) => {
            eprintln!("failed to read iskierka.toml: {e}");
            process::exit(exitcode::IOERR)
        }

        Err(ConfigReadError::ParseError(e)) => {
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    let options = Options {
        quiet: config.source.quiet,
    };

    let mut generator = match Iskierka::load(&config.source.directory, options) {
        Ok(generator) => generator,
        Err(_) => process::exit(exitcode::DATAERR),
    };

    if let Some(limit) = config.source.recursion_limit {
        generator.set_level_limit(limit);
    }

    for _ in 0..config.output.pairs {
        match generator.next_pair() {
            Ok(pair) => {
                println!("{}", pair.natural);
                println!("{}", pair.code);
                println!();
            }
            Err(e) => {
                eprintln!("{e}");
                process::exit(exitcode::SOFTWARE)
            }
        }
    }
}
