//! Common utilities and helper functions.

use std::{io::Read, path::Path, str::FromStr};

use anyhow::{Context, bail};

/// Read a document from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    let path = Path::new(path);
    std::fs::read_to_string(path).with_context(|| format!("can not open {}", path.display()))
}

/// A `path=value` form field assignment from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Dot-separated field path, e.g. `address.city`.
    pub path: String,
    /// Raw value text, coerced later by the field's type.
    pub value: String,
}

impl FromStr for Assignment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((path, value)) = s.split_once('=') else {
            bail!("expected `path=value`, got `{s}`");
        };
        let path = path.trim();
        if path.is_empty() {
            bail!("empty field path in `{s}`");
        }
        Ok(Self {
            path: path.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let a: Assignment = "address.city=New York".parse().unwrap();
        assert_eq!(a.path, "address.city");
        assert_eq!(a.value, "New York");

        let a: Assignment = "note=a=b".parse().unwrap();
        assert_eq!(a.value, "a=b", "only the first `=` splits");

        let a: Assignment = "name=".parse().unwrap();
        assert_eq!(a.value, "");

        assert!("novalue".parse::<Assignment>().is_err());
        assert!("=1".parse::<Assignment>().is_err());
    }

    #[test]
    fn test_read_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), "{}");

        let missing = dir.path().join("missing.json");
        assert!(read_input(missing.to_str().unwrap()).is_err());
    }
}
