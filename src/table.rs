pub mod caseless;
pub mod dense_table;
pub mod digit_sets;
pub mod record;
pub mod script_ext;
pub mod two_stage;
pub mod type_width;

pub use self::caseless::{CaselessSetBuilder, CaselessSets};
pub use self::dense_table::{mark_property, override_property, DenseTableBuilder};
pub use self::digit_sets::{DigitSetExtractor, DigitSets};
pub use self::record::{combine, RecordLayout, RecordTable};
pub use self::script_ext::{ScriptBitsets, ScriptExtensionEncoder};
pub use self::two_stage::{compress, search_block_size, BlockSizeSearch, TwoStageTable};
pub use self::type_width::{infer, IntKind};
