//! Reads the Unicode data files and compiles them into the final tables.
use crate::config::Settings;
use crate::def::Column;
use crate::error::{Error, Result, Warning};
use crate::table::*;
use crate::unicode::*;
use tracing::{debug, info};

pub const SCRIPTS: &str = "Scripts.txt";
pub const GENERAL_CATEGORIES: &str = "DerivedGeneralCategory.txt";
pub const GRAPHEME_BREAK: &str = "GraphemeBreakProperty.txt";
pub const CASE_FOLDING: &str = "CaseFolding.txt";
pub const BIDI_CLASSES: &str = "DerivedBidiClass.txt";
pub const PROP_LIST: &str = "PropList.txt";
pub const EMOJI_DATA: &str = "emoji-data.txt";
pub const SCRIPT_EXTENSIONS: &str = "ScriptExtensions.txt";
pub const PROPERTY_VALUE_ALIASES: &str = "PropertyValueAliases.txt";

/// Record fields, in record order.
pub const RECORD_FIELDS: [&str; 7] = [
  "script",
  "category",
  "grapheme_break",
  "caseless_offset",
  "other_case",
  "script_extension",
  "bidi",
];

/// Everything the emitter needs, computed from one consistent set of
/// sources.
#[derive(Clone, Debug)]
pub struct CompiledTables {
  pub version: String,
  pub scripts: ScriptNames,
  pub records: RecordTable,
  pub layout: RecordLayout,
  pub search: BlockSizeSearch,
  pub caseless_sets: Vec<u32>,
  pub digit_sets: DigitSets,
  pub script_bitsets: ScriptBitsets,
  pub warnings: Vec<Warning>,
}

impl CompiledTables {
  pub fn table(&self) -> &TwoStageTable {
    return self.search.best();
  }

  pub fn block_size(&self) -> usize {
    return self.table().block_size();
  }

  /// Record stored for `codepoint`.
  pub fn record_of(&self, codepoint: u32) -> &[i64] {
    let id = self.table().lookup(codepoint as usize);
    return &self.records.records()[id as usize];
  }
}

fn property_value<T>(file: &str, line: &UcdLine, what: &str, from_name: fn(&str) -> Option<T>) -> Result<T> {
  let name = line.field(0).unwrap_or("");
  return from_name(name).ok_or_else(|| Error::malformed(file, line.line_number(), format!("unknown {} '{}'", what, name)));
}

fn script_value(scripts: &ScriptNames, line: &UcdLine) -> Result<i64> {
  let name = line.field(0).unwrap_or("");
  return scripts
    .index_of_name(name)
    .map(|index| index as i64)
    .ok_or_else(|| Error::malformed(SCRIPTS, line.line_number(), format!("unknown script '{}'", name)));
}

/// Delta to the simple case fold of a `C` or `S` line, 0 for other statuses.
/// The delta applies to every codepoint of a range, so each of them must
/// land inside the table.
fn fold_delta(line: &UcdLine, len: usize) -> Result<i64> {
  match line.field(0) {
    Some("C") | Some("S") => {}
    _ => return Ok(0),
  }
  let target = line.field(1).unwrap_or("");
  let target = u32::from_str_radix(target, 16)
    .map_err(|_| Error::malformed(CASE_FOLDING, line.line_number(), format!("'{}' is not a codepoint", target)))?;
  let delta = target as i64 - line.first() as i64;
  let last_target = line.last() as i64 + delta;
  if last_target >= len as i64 {
    return Err(Error::malformed(
      CASE_FOLDING,
      line.line_number(),
      format!("fold target {:04X} is outside the table", last_target),
    ));
  }
  return Ok(delta);
}

fn script_extension_value(scripts: &ScriptNames, encoder: &mut ScriptExtensionEncoder, line: &UcdLine) -> Result<i64> {
  let mut list = Vec::new();
  for abbrev in line.field(0).unwrap_or("").split_whitespace() {
    let index = scripts.index_of_abbrev(abbrev).ok_or_else(|| {
      Error::malformed(SCRIPT_EXTENSIONS, line.line_number(), format!("unknown script '{}'", abbrev))
    })?;
    list.push(index as u32);
  }
  return encoder.encode_list(&list).ok_or_else(|| {
    Error::malformed(SCRIPT_EXTENSIONS, line.line_number(), "script list is empty or names Unknown")
  });
}

/// Runs the whole compilation. Nothing is written; see `emitter::emit`.
pub fn compile(settings: &Settings) -> Result<CompiledTables> {
  let dir = settings.tables_dir.as_path();
  let len = settings.max_codepoint as usize;
  info!(dir = %dir.display(), "reading Unicode data");

  let scripts_source = UcdSource::read(dir, SCRIPTS)?;
  let aliases = ValueAliases::read(dir, PROPERTY_VALUE_ALIASES)?;
  let scripts = ScriptNames::collect(&scripts_source, &aliases)?;
  info!(scripts = scripts.len(), "collected script names");

  let mut builder = DenseTableBuilder::new(len);
  let script = builder.build(&scripts_source, |line| script_value(&scripts, line), 0)?;

  let category = builder.build(
    &UcdSource::read(dir, GENERAL_CATEGORIES)?,
    |line| {
      property_value(GENERAL_CATEGORIES, line, GeneralCategory::LABEL, GeneralCategory::from_name)
        .map(|gc| gc.index() as i64)
    },
    GeneralCategory::default().index() as i64,
  )?;

  let mut break_props = builder.build(
    &UcdSource::read(dir, GRAPHEME_BREAK)?,
    |line| property_value(GRAPHEME_BREAK, line, GraphemeBreak::LABEL, GraphemeBreak::from_name).map(|gb| gb.index() as i64),
    GraphemeBreak::default().index() as i64,
  )?;

  let other_case = builder.build(&UcdSource::read(dir, CASE_FOLDING)?, |line| fold_delta(line, len), 0)?;

  let mut encoder = ScriptExtensionEncoder::new(scripts.len());
  let script_extension = builder.build(
    &UcdSource::read(dir, SCRIPT_EXTENSIONS)?,
    |line| script_extension_value(&scripts, &mut encoder, line),
    0,
  )?;

  let mut bidi = builder.build(
    &UcdSource::read(dir, BIDI_CLASSES)?,
    |line| property_value(BIDI_CLASSES, line, BidiClass::LABEL, BidiClass::from_name).map(|bc| bc.index() as i64),
    BidiClass::default().index() as i64,
  )?;

  let prop_list = UcdSource::read(dir, PROP_LIST)?;
  let marked = mark_property(&mut bidi, &prop_list, "Bidi_Control", BidiFlags::CONTROL.bits())?;
  debug!(marked, "bidi control characters");

  let mut warnings = builder.warnings().to_vec();

  let emoji = UcdSource::read(dir, EMOJI_DATA)?;
  let conflicts = override_property(
    &mut break_props,
    &emoji,
    "Extended_Pictographic",
    GraphemeBreak::ExtendedPictographic.index() as i64,
    GraphemeBreak::Other.index() as i64,
  )?;
  let break_names = GraphemeBreak::values().collect::<Vec<_>>();
  for (codepoint, previous) in conflicts {
    let previous = break_names
      .get(previous as usize)
      .map(|gb| gb.name().to_owned())
      .unwrap_or_else(|| previous.to_string());
    let warning = Warning::BreakPropertyOverridden { codepoint, previous };
    tracing::warn!("{}", warning);
    warnings.push(warning);
  }

  let (script_extension, script_bitsets) = encoder.finish(&script_extension, &script, 0);
  debug!(bitsets = script_bitsets.len(), stride = script_bitsets.stride(), "script extension bitsets");

  let caseless = CaselessSetBuilder::new().build(other_case)?;

  let columns: [&[i64]; 7] = [
    &script,
    &category,
    &break_props,
    caseless.offsets(),
    caseless.other_case(),
    &script_extension,
    &bidi,
  ];
  let (ids, records) = combine(&columns)?;
  let layout = RecordLayout::compute(&records)?;
  for (name, kind) in RECORD_FIELDS.iter().zip(layout.fields()) {
    debug!(field = *name, kind = %kind, "record field width");
  }
  info!(records = records.len(), record_size = layout.size(), "interned records");

  let search = search_block_size(
    &ids,
    &settings.block_sizes,
    layout.table_size(records.len()),
    settings.parallel_search,
  )?;
  info!(
    block_size = search.best().block_size(),
    total_size = search.total_size(),
    "selected block size"
  );

  let digit_sets = DigitSetExtractor::from_source(&scripts_source);
  warnings.extend(digit_sets.warnings().iter().cloned());

  return Ok(CompiledTables {
    version: builder.version().unwrap_or_default().to_owned(),
    scripts,
    records,
    layout,
    search,
    caseless_sets: caseless.to_table(),
    digit_sets,
    script_bitsets,
    warnings,
  });
}

/// Columns the records are built from, in `RECORD_FIELDS` order.
pub fn columns_of(compiled: &CompiledTables, len: usize) -> Vec<Column> {
  return (0..RECORD_FIELDS.len())
    .map(|field| (0..len).map(|cp| compiled.record_of(cp as u32)[field]).collect())
    .collect();
}
