use crate::error::{Error, Result};
use property::Property;
use std::fs;
use std::path::Path;

/// One data line of a UCD text file, `LOW[..HIGH] ; field ; field # comment`.
#[derive(Clone, Debug, PartialEq, Eq, Property)]
pub struct UcdLine {
  #[property(get(type = "copy"))]
  first: u32,
  #[property(get(type = "copy"))]
  last: u32,
  #[property(get(type = "copy"))]
  is_range: bool,
  #[property(get(type = "copy"))]
  line_number: usize,
  #[property(skip)]
  fields: Vec<String>,
  #[property(skip)]
  comment: String,
}

impl UcdLine {
  pub fn fields(&self) -> &[String] {
    return &self.fields;
  }

  /// Text after `#`, trimmed.
  pub fn comment(&self) -> &str {
    return &self.comment;
  }

  /// Property value fields, i.e. everything after the codepoint field.
  pub fn field(&self, index: usize) -> Option<&str> {
    return self.fields.get(index).map(|f| f.as_str());
  }

  pub fn codepoints(&self) -> std::ops::RangeInclusive<u32> {
    return self.first..=self.last;
  }
}

#[derive(Clone, Debug)]
pub struct UcdSource {
  name: String,
  version: Option<String>,
  lines: Vec<UcdLine>,
}

fn split_comment(line: &str) -> (&str, &str) {
  return match line.find('#') {
    Some(pos) => (&line[..pos], line[pos + 1..].trim()),
    None => (line, ""),
  };
}

fn parse_codepoint(name: &str, line_number: usize, s: &str) -> Result<u32> {
  if s.is_empty() || !s.chars().all(|ch| ch.is_ascii_hexdigit()) {
    return Err(Error::malformed(name, line_number, format!("'{}' is not a hexadecimal codepoint", s)));
  }
  return u32::from_str_radix(s, 16)
    .map_err(|e| Error::malformed(name, line_number, format!("'{}' is not a codepoint: {}", s, e)));
}

/// Extracts `x.y.z` from a `# Name-x.y.z.txt` header line.
fn parse_version(base: &str, header: &str) -> Option<String> {
  let rest = header.strip_prefix("# ")?.strip_prefix(base)?.strip_prefix('-')?;
  let version = rest.trim_end().strip_suffix(".txt")?;
  let parts = version.split('.').collect::<Vec<_>>();
  if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|ch| ch.is_ascii_digit())) {
    return None;
  }
  return Some(version.to_owned());
}

impl UcdSource {
  /// Parses `content`. `name` is the file name, e.g. `Scripts.txt`; its stem
  /// is used to recognize the version header.
  pub fn parse(name: &str, content: &str) -> Result<UcdSource> {
    let base = name.strip_suffix(".txt").unwrap_or(name);
    let version = content.lines().next().and_then(|header| parse_version(base, header));
    let mut lines = Vec::new();
    for (index, raw) in content.lines().enumerate() {
      let line_number = index + 1;
      let (data, comment) = split_comment(raw);
      let fields = data.split(';').map(|f| f.trim()).collect::<Vec<_>>();
      if fields.len() <= 1 {
        continue;
      }

      let (first, last, is_range) = match fields[0].find("..") {
        Some(pos) => (
          parse_codepoint(name, line_number, &fields[0][..pos])?,
          parse_codepoint(name, line_number, &fields[0][pos + 2..])?,
          true,
        ),
        None => {
          let cp = parse_codepoint(name, line_number, fields[0])?;
          (cp, cp, false)
        }
      };
      if last < first {
        return Err(Error::malformed(name, line_number, format!("reversed range {:04X}..{:04X}", first, last)));
      }

      lines.push(UcdLine {
        first,
        last,
        is_range,
        line_number,
        fields: fields[1..].iter().map(|f| (*f).to_owned()).collect(),
        comment: comment.to_owned(),
      });
    }

    return Ok(UcdSource {
      name: name.to_owned(),
      version,
      lines,
    });
  }

  pub fn name(&self) -> &str {
    return &self.name;
  }

  /// Version declared by the header line, if any.
  pub fn version(&self) -> Option<&str> {
    return self.version.as_deref();
  }

  pub fn lines(&self) -> &[UcdLine] {
    return &self.lines;
  }

  pub fn read(dir: &Path, name: &str) -> Result<UcdSource> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    return UcdSource::parse(name, &content);
  }

  /// Lines whose first property field equals `property`.
  pub fn lines_with_property<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a UcdLine> + 'a {
    return self.lines.iter().filter(move |line| line.field(0) == Some(property));
  }
}
