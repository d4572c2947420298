//! Serializes compiled tables into the two generated Rust sources.
use crate::config::Settings;
use crate::def::NOTACHAR;
use crate::error::{Error, Result};
use crate::pipeline::{CompiledTables, RECORD_FIELDS};
use crate::table::{infer, IntKind};
use crate::unicode::{BidiClass, GeneralCategory, GraphemeBreak};
use itertools::Itertools;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: &str = concatcp!(
  "// This file was generated by ",
  PKG_NAME,
  " ",
  PKG_VERSION,
  " from the Unicode Character Database.\n",
  "// Do not edit it by hand.\n\n"
);

const WRAP: usize = 16;

macro_rules! write_to_array {
  ($buf:expr, $name:expr, $type_name:expr, $iter:expr, $wrap:expr) => {{
    let items = $iter.map(|item| item.to_string()).collect::<Vec<_>>();
    $buf.push_str(&format!("pub const {}: [{}; {}] = [\n", $name, $type_name, items.len()));
    for chunk in items.chunks($wrap) {
      $buf.push_str(&format!("  {},\n", chunk.iter().join(", ")));
    }
    $buf.push_str("];\n\n");
  }};
}

fn size_comment(buf: &mut String, kind: impl Display, len: usize, bytes: usize) {
  buf.push_str(&format!("/// {} entries of {}, {} bytes.\n", len, kind, bytes));
}

fn write_column(buf: &mut String, name: &str, values: &[i64], wrap: usize) -> Result<()> {
  let kind = infer(values)?;
  size_comment(buf, kind, values.len(), values.len() * kind.size());
  write_to_array!(buf, name, kind, values.iter(), wrap);
  return Ok(());
}

fn caseless_item(cp: &u32) -> String {
  if *cp == NOTACHAR {
    return "NOTACHAR".to_owned();
  }
  return format!("{:#06x}", cp);
}

/// Contents of the tables artifact.
pub fn render_tables(compiled: &CompiledTables) -> Result<String> {
  let table = compiled.table();
  let mut buf = String::from(BANNER);
  buf.push_str(&format!(
    "// Unicode {}. Total size {} bytes, block size {}.\n",
    compiled.version,
    compiled.search.total_size(),
    table.block_size()
  ));
  for (block_size, size) in compiled.search.candidate_sizes() {
    buf.push_str(&format!("//   block size {:>3}: {} bytes\n", block_size, size));
  }
  buf.push_str(&format!(
    "// UcdRecord is {} bytes with no padding field. Sizes count the records as declared.\n",
    compiled.layout.size()
  ));
  buf.push('\n');

  buf.push_str(&format!("pub const UNICODE_VERSION: &str = \"{}\";\n", compiled.version));
  buf.push_str(&format!("pub const NOTACHAR: u32 = {:#x};\n\n", NOTACHAR));

  buf.push_str("#[repr(C)]\n#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n");
  buf.push_str("pub struct UcdRecord {\n");
  for (name, kind) in RECORD_FIELDS.iter().zip(compiled.layout.fields()) {
    buf.push_str(&format!("  pub {}: {},\n", name, kind));
  }
  buf.push_str("}\n\n");

  let records = compiled.records.records();
  size_comment(
    &mut buf,
    "UcdRecord",
    records.len(),
    compiled.layout.table_size(records.len()),
  );
  let record_items = records.iter().map(|record| {
    let fields = RECORD_FIELDS
      .iter()
      .zip(record.iter())
      .map(|(name, value)| format!("{}: {}", name, value))
      .join(", ");
    format!("UcdRecord {{ {} }}", fields)
  });
  write_to_array!(buf, "RECORDS", "UcdRecord", record_items, 1);

  write_column(&mut buf, "STAGE1", table.stage1(), WRAP)?;
  buf.push_str(&format!("/// Blocks of {} entries.\n", table.block_size()));
  write_column(&mut buf, "STAGE2", table.stage2(), WRAP)?;

  let caseless = &compiled.caseless_sets;
  size_comment(&mut buf, IntKind::U32, caseless.len(), caseless.len() * 4);
  write_to_array!(buf, "CASELESS_SETS", IntKind::U32, caseless.iter().map(caseless_item), 8);

  let digits = compiled.digit_sets.to_table();
  size_comment(&mut buf, IntKind::U32, digits.len(), digits.len() * 4);
  write_to_array!(buf, "DIGIT_SETS", IntKind::U32, digits.iter().map(|cp| format!("{:#06x}", cp)), 8);

  let words = compiled.script_bitsets.words();
  buf.push_str(&format!("/// {} words per script set.\n", compiled.script_bitsets.stride()));
  size_comment(&mut buf, IntKind::U32, words.len(), words.len() * 4);
  write_to_array!(
    buf,
    "SCRIPT_SETS",
    IntKind::U32,
    words.iter().map(|w| format!("{:#010x}", w)),
    compiled.script_bitsets.stride().max(4)
  );

  return Ok(buf);
}

fn write_enum<I>(buf: &mut String, doc: &str, name: &str, variants: I)
where
  I: Iterator<Item = (String, String)>,
{
  buf.push_str(&format!("/// {}\n", doc));
  buf.push_str("#[allow(non_camel_case_types)]\n#[repr(u8)]\n");
  buf.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]\n");
  buf.push_str(&format!("pub enum {} {{\n", name));
  for (variant, description) in variants {
    if !description.is_empty() {
      buf.push_str(&format!("  /// {}\n", description));
    }
    buf.push_str(&format!("  {},\n", variant));
  }
  buf.push_str("}\n\n");
}

/// Contents of the property enumeration artifact. Variant order is the
/// index order used in the tables.
pub fn render_properties(compiled: &CompiledTables) -> String {
  let mut buf = String::from(BANNER);

  write_enum(
    &mut buf,
    "General character categories.",
    "UcdCategory",
    GeneralCategory::majors().into_iter().map(|major| (major.to_string(), String::new())),
  );
  write_enum(
    &mut buf,
    "Particular character categories.",
    "UcdParticularCategory",
    GeneralCategory::values().map(|gc| (format!("{:?}", gc), gc.description().to_owned())),
  );
  write_enum(
    &mut buf,
    "Bidi classes. Bidi_Control characters additionally carry `BIDI_CONTROL`.",
    "UcdBidiClass",
    BidiClass::values().map(|bc| (format!("{:?}", bc), bc.description().to_owned())),
  );
  write_enum(
    &mut buf,
    "Grapheme cluster break properties.",
    "UcdGraphemeBreak",
    GraphemeBreak::values().map(|gb| (format!("{:?}", gb), gb.description().to_owned())),
  );
  write_enum(
    &mut buf,
    "Scripts.",
    "UcdScript",
    compiled
      .scripts
      .names()
      .iter()
      .zip(compiled.scripts.abbrevs())
      .map(|(name, abbrev)| (name.clone(), abbrev.clone())),
  );

  buf.push_str(&format!("pub const BIDI_CONTROL: u8 = {:#x};\n", crate::def::BIDI_CONTROL_BIT));
  buf.push_str(&format!("pub const SCRIPT_COUNT: usize = {};\n", compiled.scripts.len()));
  buf.push_str(&format!("pub const UCD_BLOCK_SIZE: usize = {};\n", compiled.block_size()));
  return buf;
}

fn staging_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  return path.with_file_name(name);
}

fn stage_artifact(path: &Path, content: &str) -> Result<PathBuf> {
  let staged = staging_path(path);
  fs::write(&staged, content).map_err(|e| Error::io(&staged, e))?;
  return Ok(staged);
}

fn discard(staged: &[PathBuf]) {
  for path in staged {
    let _ = fs::remove_file(path);
  }
}

/// Renders both artifacts, stages them next to their targets, then moves
/// them into place. Neither target is touched unless both were staged.
pub fn emit(compiled: &CompiledTables, settings: &Settings) -> Result<()> {
  let tables = render_tables(compiled)?;
  let properties = render_properties(compiled);
  let artifacts = [
    (&settings.tables_output, tables),
    (&settings.properties_output, properties),
  ];

  let mut staged = Vec::with_capacity(artifacts.len());
  for (path, content) in artifacts.iter() {
    match stage_artifact(path, content) {
      Ok(tmp) => staged.push(tmp),
      Err(e) => {
        discard(&staged);
        return Err(e);
      }
    }
  }

  for (index, ((path, content), tmp)) in artifacts.iter().zip(staged.iter()).enumerate() {
    if let Err(e) = fs::rename(tmp, path) {
      discard(&staged[index..]);
      return Err(Error::io(path.as_path(), e));
    }
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote artifact");
  }
  return Ok(());
}
