macro_rules! property_enum {
  ($name:ident, $label:literal, default = $default:ident { $($item:ident($value:literal, $description:literal),)* }) => {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum $name {
      $(
        $item,
      )*
    }

    impl Default for $name {
      fn default() -> $name {
        return $name::$default;
      }
    }

    impl $name {
      pub const COUNT: usize = <[$name]>::len(&[$($name::$item,)*]);
      pub const LABEL: &'static str = $label;

      pub fn values() -> impl Iterator<Item = $name> {
        return vec![$($name::$item,)*].into_iter();
      }

      pub fn index(&self) -> usize {
        return *self as usize;
      }

      /// Name as spelled in the Unicode data files.
      pub fn name(&self) -> &'static str {
        return match self {
          $(
            &$name::$item => $value,
          )*
        };
      }

      pub fn description(&self) -> &'static str {
        return match self {
          $(
            &$name::$item => $description,
          )*
        };
      }

      pub fn from_name(s: &str) -> Option<$name> {
        return match s {
          $(
            $value => Some($name::$item),
          )*
          _ => None,
        };
      }
    }
  };
}

property_enum! {
  GeneralCategory, "particular character category", default = Cn {
    Cc("Cc", "Control"),
    Cf("Cf", "Format"),
    Cn("Cn", "Unassigned"),
    Co("Co", "Private use"),
    Cs("Cs", "Surrogate"),
    Ll("Ll", "Lower case letter"),
    Lm("Lm", "Modifier letter"),
    Lo("Lo", "Other letter"),
    Lt("Lt", "Title case letter"),
    Lu("Lu", "Upper case letter"),
    Mc("Mc", "Spacing mark"),
    Me("Me", "Enclosing mark"),
    Mn("Mn", "Non-spacing mark"),
    Nd("Nd", "Decimal number"),
    Nl("Nl", "Letter number"),
    No("No", "Other number"),
    Pc("Pc", "Connector punctuation"),
    Pd("Pd", "Dash punctuation"),
    Pe("Pe", "Close punctuation"),
    Pf("Pf", "Final punctuation"),
    Pi("Pi", "Initial punctuation"),
    Po("Po", "Other punctuation"),
    Ps("Ps", "Open punctuation"),
    Sc("Sc", "Currency symbol"),
    Sk("Sk", "Modifier symbol"),
    Sm("Sm", "Mathematical symbol"),
    So("So", "Other symbol"),
    Zl("Zl", "Line separator"),
    Zp("Zp", "Paragraph separator"),
    Zs("Zs", "Space separator"),
  }
}

impl GeneralCategory {
  /// The one letter general category, `C`, `L`, `M`, `N`, `P`, `S` or `Z`.
  pub fn major(&self) -> char {
    return self.name().chars().next().unwrap_or('C');
  }

  /// Distinct major categories in alphabetical order.
  pub fn majors() -> Vec<char> {
    let mut majors = GeneralCategory::values().map(|gc| gc.major()).collect::<Vec<_>>();
    majors.dedup();
    return majors;
  }
}

property_enum! {
  BidiClass, "bidi class", default = L {
    AL("AL", "Arabic letter"),
    AN("AN", "Arabic number"),
    B("B", "Paragraph separator"),
    BN("BN", "Boundary neutral"),
    CS("CS", "Common separator"),
    EN("EN", "European number"),
    ES("ES", "European separator"),
    ET("ET", "European terminator"),
    FSI("FSI", "First strong isolate"),
    L("L", "Left to right"),
    LRE("LRE", "Left to right embedding"),
    LRI("LRI", "Left to right isolate"),
    LRO("LRO", "Left to right override"),
    NSM("NSM", "Non-spacing mark"),
    ON("ON", "Other neutral"),
    PDF("PDF", "Pop directional format"),
    PDI("PDI", "Pop directional isolate"),
    R("R", "Right to left"),
    RLE("RLE", "Right to left embedding"),
    RLI("RLI", "Right to left isolate"),
    RLO("RLO", "Right to left override"),
    S("S", "Segment separator"),
    WS("WS", "White space"),
  }
}

// Extended_Pictographic comes from emoji-data.txt rather than
// GraphemeBreakProperty.txt, and must stay last.
property_enum! {
  GraphemeBreak, "grapheme break property", default = Other {
    CR("CR", "Carriage return"),
    LF("LF", "Line feed"),
    Control("Control", "Control"),
    Extend("Extend", "Extend"),
    Prepend("Prepend", "Prepend"),
    SpacingMark("SpacingMark", "Spacing mark"),
    L("L", "Hangul syllable type L"),
    V("V", "Hangul syllable type V"),
    T("T", "Hangul syllable type T"),
    LV("LV", "Hangul syllable type LV"),
    LVT("LVT", "Hangul syllable type LVT"),
    RegionalIndicator("Regional_Indicator", "Regional indicator"),
    Other("Other", "Other"),
    ZWJ("ZWJ", "Zero width joiner"),
    ExtendedPictographic("Extended_Pictographic", "Extended pictographic"),
  }
}

bitflags! {
  /// Flags or-ed into the bidi class column value.
  pub struct BidiFlags: i64 {
    const CONTROL = crate::def::BIDI_CONTROL_BIT;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn general_category_order_test() {
    assert_eq!(GeneralCategory::COUNT, 30);
    assert_eq!(GeneralCategory::Cc.index(), 0);
    assert_eq!(GeneralCategory::Zs.index(), 29);
    assert_eq!(GeneralCategory::default(), GeneralCategory::Cn);
    assert_eq!(GeneralCategory::majors(), vec!['C', 'L', 'M', 'N', 'P', 'S', 'Z']);
  }

  #[test]
  fn property_from_name_test() {
    assert_eq!(BidiClass::from_name("NSM"), Some(BidiClass::NSM));
    assert_eq!(BidiClass::from_name("XX"), None);
    assert_eq!(GraphemeBreak::from_name("Regional_Indicator"), Some(GraphemeBreak::RegionalIndicator));
    assert_eq!(GraphemeBreak::ExtendedPictographic.index(), GraphemeBreak::COUNT - 1);
    assert_eq!(BidiClass::default().name(), "L");
  }

  #[test]
  fn property_values_roundtrip_names_test() {
    for (i, gb) in GraphemeBreak::values().enumerate() {
      assert_eq!(gb.index(), i);
      assert_eq!(GraphemeBreak::from_name(gb.name()), Some(gb));
    }
  }
}
