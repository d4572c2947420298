use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// One line of PropertyValueAliases.txt, `property ; short ; long [; other]*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueAlias {
  line_number: usize,
  fields: Vec<String>,
}

impl ValueAlias {
  pub fn line_number(&self) -> usize {
    return self.line_number;
  }

  /// The property tag, e.g. `sc` or `gc`.
  pub fn property(&self) -> &str {
    return &self.fields[0];
  }

  /// Field `index` of the line, the property tag being field 0.
  pub fn field(&self, index: usize) -> Option<&str> {
    return self.fields.get(index).map(|f| f.as_str());
  }
}

/// Value aliases keyed by property tag rather than by codepoint.
#[derive(Clone, Debug)]
pub struct ValueAliases {
  name: String,
  aliases: Vec<ValueAlias>,
}

impl ValueAliases {
  pub fn parse(name: &str, content: &str) -> Result<ValueAliases> {
    let mut aliases = Vec::new();
    for (index, raw) in content.lines().enumerate() {
      let data = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
      };
      if data.trim().is_empty() {
        continue;
      }
      let fields = data.split(';').map(|f| f.trim().to_owned()).collect::<Vec<_>>();
      if fields.len() < 3 || fields[0].is_empty() {
        return Err(Error::malformed(
          name,
          index + 1,
          "expected 'property ; short name ; long name'",
        ));
      }
      aliases.push(ValueAlias {
        line_number: index + 1,
        fields,
      });
    }
    return Ok(ValueAliases {
      name: name.to_owned(),
      aliases,
    });
  }

  pub fn read(dir: &Path, name: &str) -> Result<ValueAliases> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    return ValueAliases::parse(name, &content);
  }

  pub fn name(&self) -> &str {
    return &self.name;
  }

  pub fn aliases(&self) -> &[ValueAlias] {
    return &self.aliases;
  }

  pub fn of_property<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ValueAlias> + 'a {
    return self.aliases.iter().filter(move |alias| alias.property() == property);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn value_aliases_parse_test() {
    let aliases = ValueAliases::parse(
      "PropertyValueAliases.txt",
      indoc! {"
        # PropertyValueAliases-15.0.0.txt
        #
        # Canonical_Combining_Class (ccc)

        ccc;   0; NR                         ; Not_Reordered
        ccc;   1; OV                         ; Overlay

        # @missing: 0000..10FFFF; General_Category; Unassigned
        gc ; C                                ; Other                            # Cc | Cf | Cn | Co | Cs
        gc ; Lu                               ; Uppercase_Letter
        sc ; Zinh                             ; Inherited                        ; Qaai
        sc ; Zyyy                             ; Common
      "},
    )
    .unwrap();
    assert_eq!(aliases.aliases().len(), 6);
    let ccc = &aliases.aliases()[0];
    assert_eq!((ccc.property(), ccc.field(1), ccc.field(3)), ("ccc", Some("0"), Some("Not_Reordered")));
    assert_eq!(ccc.line_number(), 5);

    let scripts = aliases.of_property("sc").collect::<Vec<_>>();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].field(1), Some("Zinh"));
    assert_eq!(scripts[0].field(2), Some("Inherited"));
    assert_eq!(scripts[0].field(3), Some("Qaai"));
    assert_eq!(aliases.of_property("gc").nth(0).and_then(|gc| gc.field(2)), Some("Other"));
  }

  #[test]
  fn value_aliases_short_line_test() {
    match ValueAliases::parse("PropertyValueAliases.txt", "# header\nsc ; Latn\n") {
      Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 2),
      other => panic!("expected malformed input, got {:?}", other),
    }
  }
}
