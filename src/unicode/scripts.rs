use super::aliases::ValueAliases;
use super::source::UcdSource;
use crate::error::{Error, Result};
use std::collections::HashMap;

pub const UNKNOWN_SCRIPT: &str = "Unknown";
pub const UNKNOWN_SCRIPT_ABBREV: &str = "Zzzz";

/// Script long names and their abbreviations. The position of a script in
/// this list is its script index; index 0 is always `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptNames {
  names: Vec<String>,
  abbrevs: Vec<String>,
  name_index: HashMap<String, usize>,
  abbrev_index: HashMap<String, usize>,
}

impl ScriptNames {
  /// Collects script names in order of first appearance in Scripts.txt and
  /// resolves each one's abbreviation from the `sc` entries of
  /// PropertyValueAliases.txt.
  pub fn collect(scripts: &UcdSource, aliases: &ValueAliases) -> Result<ScriptNames> {
    let mut abbreviations = HashMap::new();
    for alias in aliases.of_property("sc") {
      if let (Some(abbrev), Some(name)) = (alias.field(1), alias.field(2)) {
        abbreviations.insert(name.to_owned(), abbrev.to_owned());
      }
    }

    let mut names = vec![UNKNOWN_SCRIPT.to_owned()];
    let mut abbrevs = vec![UNKNOWN_SCRIPT_ABBREV.to_owned()];
    for line in scripts.lines().iter() {
      let name = match line.field(0) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(Error::malformed(scripts.name(), line.line_number(), "missing script name")),
      };
      if names.iter().any(|n| n == name) {
        continue;
      }
      let abbrev = abbreviations.get(name).ok_or_else(|| {
        Error::malformed(
          scripts.name(),
          line.line_number(),
          format!("script '{}' has no entry in {}", name, aliases.name()),
        )
      })?;
      names.push(name.to_owned());
      abbrevs.push(abbrev.clone());
    }

    return Ok(ScriptNames::new(names, abbrevs));
  }

  pub fn new(names: Vec<String>, abbrevs: Vec<String>) -> ScriptNames {
    let name_index = names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
    let abbrev_index = abbrevs.iter().enumerate().map(|(i, a)| (a.clone(), i)).collect();
    return ScriptNames {
      names,
      abbrevs,
      name_index,
      abbrev_index,
    };
  }

  pub fn len(&self) -> usize {
    return self.names.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.names.is_empty();
  }

  pub fn names(&self) -> &[String] {
    return &self.names;
  }

  pub fn abbrevs(&self) -> &[String] {
    return &self.abbrevs;
  }

  pub fn index_of_name(&self, name: &str) -> Option<usize> {
    return self.name_index.get(name).copied();
  }

  pub fn index_of_abbrev(&self, abbrev: &str) -> Option<usize> {
    return self.abbrev_index.get(abbrev).copied();
  }
}
