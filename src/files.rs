use std::path::{Path, PathBuf};

use anyhow::Context;
use itertools::Itertools;

use crate::EXTENSION;

/// Non-recursive listing of `*.iski` files in one directory, sorted so the
/// load order does not depend on readdir order.
pub fn list_rule_files(directory: &Path) -> Result<Vec<PathBuf>, anyhow::Error> {
    let entries = std::fs::read_dir(directory).with_context(|| {
        format!(
            "Iskierka error: source directory '{}' could not be opened.",
            directory.display()
        )
    })?;

    let mut rule_files = vec![];

    for entry in entries {
        let entry = entry.context("trying to enumerate source directory")?;

        if !entry
            .file_type()
            .context("trying to enumerate source directory")?
            .is_file()
        {
            continue;
        }

        let path = entry.path();
        if path
            .extension()
            .map_or(false, |extension| extension == EXTENSION)
        {
            rule_files.push(path);
        }
    }

    Ok(rule_files.into_iter().sorted().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_only_rule_files_without_recursing() {
        let dir = std::env::temp_dir().join(format!("iskierka-files-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.iski"), "").unwrap();
        fs::write(dir.join("a.iski"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("nested").join("c.iski"), "").unwrap();

        let listed = list_rule_files(&dir).unwrap();
        fs::remove_dir_all(&dir).ok();

        let names: Vec<_> = listed
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.iski", "b.iski"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let error =
            list_rule_files(Path::new("/definitely/not/a/real/directory")).unwrap_err();
        assert!(error.to_string().contains("could not be opened"));
    }
}
