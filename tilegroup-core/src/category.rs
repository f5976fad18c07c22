//! Experiment categories, summary record fields, and the pivot table that maps
//! a category to its result directory layout.

use std::fmt;
use std::str::FromStr;

/// The experiment type passed to the benchmark binary as `-e <code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
  Projectivity,
  Selectivity,
  Operator,
  Horizontal,
  Ycsb,
  Subset,
  Adapt,
  Weight,
  Reorg,
  Distribution,
  Join,
  Caching,
  Hyrise,
  Concurrency,
}

impl Category {
  pub const ALL: [Category; 14] = [
    Category::Projectivity,
    Category::Selectivity,
    Category::Operator,
    Category::Horizontal,
    Category::Ycsb,
    Category::Subset,
    Category::Adapt,
    Category::Weight,
    Category::Reorg,
    Category::Distribution,
    Category::Join,
    Category::Caching,
    Category::Hyrise,
    Category::Concurrency,
  ];

  /// Experiment type code understood by the benchmark binary.
  pub fn code(self) -> u32 {
    match self {
      Category::Projectivity => 1,
      Category::Selectivity => 2,
      Category::Operator => 3,
      Category::Horizontal => 4,
      Category::Ycsb => 5,
      Category::Subset => 6,
      Category::Adapt => 7,
      Category::Weight => 8,
      Category::Reorg => 9,
      Category::Distribution => 10,
      Category::Join => 11,
      Category::Caching => 12,
      Category::Hyrise => 13,
      Category::Concurrency => 14,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Category::Projectivity => "projectivity",
      Category::Selectivity => "selectivity",
      Category::Operator => "operator",
      Category::Horizontal => "horizontal",
      Category::Ycsb => "ycsb",
      Category::Subset => "subset",
      Category::Adapt => "adapt",
      Category::Weight => "weight",
      Category::Reorg => "reorg",
      Category::Distribution => "distribution",
      Category::Join => "join",
      Category::Caching => "caching",
      Category::Hyrise => "hyrise",
      Category::Concurrency => "concurrency",
    }
  }

  /// Name of the CSV file appended to at every leaf of the result tree.
  pub fn file_name(self) -> String {
    format!("{}.csv", self.name())
  }

  /// The pivot rule describing how a summary record of this category is bucketed.
  pub fn rule(self) -> &'static PivotRule {
    use Field as F;

    match self {
      Category::Projectivity => &PivotRule {
        path: &[F::Layout, F::Operator, F::ColumnCount, F::WriteRatio],
        key: F::Projectivity,
        values: &[F::Stat],
      },
      Category::Selectivity => &PivotRule {
        path: &[F::Layout, F::Operator, F::ColumnCount, F::WriteRatio],
        key: F::Selectivity,
        values: &[F::Stat],
      },
      Category::Operator => &PivotRule {
        path: &[F::Layout, F::Projectivity, F::ColumnCount, F::WriteRatio],
        key: F::Selectivity,
        values: &[F::Stat],
      },
      Category::Horizontal => &PivotRule {
        path: &[F::Layout, F::TuplesPerTilegroup],
        key: F::Selectivity,
        values: &[F::Stat],
      },
      Category::Ycsb => &PivotRule {
        path: &[F::Layout, F::Operator, F::WriteRatio],
        key: F::Selectivity,
        values: &[F::Stat],
      },
      Category::Subset => &PivotRule {
        path: &[F::SubsetExperimentType, F::AccessNumGroups],
        key: F::SubsetRatio,
        values: &[F::Stat],
      },
      Category::Adapt => &PivotRule {
        path: &[F::Layout],
        key: F::TxnItr,
        values: &[F::Stat],
      },
      Category::Weight => &PivotRule {
        path: &[F::SampleWeight],
        key: F::TxnItr,
        values: &[F::Stat],
      },
      Category::Reorg => &PivotRule {
        path: &[F::Layout, F::WriteRatio],
        key: F::TxnItr,
        values: &[F::Stat],
      },
      Category::Distribution => &PivotRule {
        path: &[F::TileGroupType],
        key: F::QueryItr,
        values: &[F::TileGroupCount],
      },
      Category::Join => &PivotRule {
        path: &[F::Layout, F::ColumnCount, F::WriteRatio],
        key: F::Projectivity,
        values: &[F::Stat],
      },
      Category::Caching => &PivotRule {
        path: &[F::Layout, F::ColumnCount, F::WriteRatio],
        key: F::Projectivity,
        values: &[F::Stat, F::CacheMisses],
      },
      Category::Hyrise => &PivotRule {
        path: &[F::Layout, F::Projectivity],
        key: F::Selectivity,
        values: &[F::Stat],
      },
      Category::Concurrency => &PivotRule {
        path: &[F::Layout, F::Theta],
        key: F::ThreadCount,
        values: &[F::Stat],
      },
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL
      .iter()
      .copied()
      .find(|category| category.name() == s)
      .ok_or_else(|| format!("unknown experiment category `{s}`"))
  }
}

/// A positional field of a summary record.
///
/// Most categories share the 16 field layout (plus the cache-miss count the
/// profiled runner appends); the distribution category has its own 3 field
/// layout, which is why `QueryItr`, `TileGroupType` and `TileGroupCount` alias
/// the first three positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Layout,
  Operator,
  Selectivity,
  Projectivity,
  ColumnCount,
  WriteRatio,
  SubsetExperimentType,
  AccessNumGroups,
  SubsetRatio,
  TuplesPerTilegroup,
  TxnItr,
  Theta,
  SplitPoint,
  SampleWeight,
  ThreadCount,
  Stat,
  CacheMisses,
  QueryItr,
  TileGroupType,
  TileGroupCount,
}

impl Field {
  pub fn index(self) -> usize {
    match self {
      Field::Layout => 0,
      Field::Operator => 1,
      Field::Selectivity => 2,
      Field::Projectivity => 3,
      Field::ColumnCount => 4,
      Field::WriteRatio => 5,
      Field::SubsetExperimentType => 6,
      Field::AccessNumGroups => 7,
      Field::SubsetRatio => 8,
      Field::TuplesPerTilegroup => 9,
      Field::TxnItr => 10,
      Field::Theta => 11,
      Field::SplitPoint => 12,
      Field::SampleWeight => 13,
      Field::ThreadCount => 14,
      Field::Stat => 15,
      Field::CacheMisses => 16,
      Field::QueryItr => 0,
      Field::TileGroupType => 1,
      Field::TileGroupCount => 2,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Field::Layout => "layout",
      Field::Operator => "operator",
      Field::Selectivity => "selectivity",
      Field::Projectivity => "projectivity",
      Field::ColumnCount => "column_count",
      Field::WriteRatio => "write_ratio",
      Field::SubsetExperimentType => "subset_experiment_type",
      Field::AccessNumGroups => "access_num_groups",
      Field::SubsetRatio => "subset_ratio",
      Field::TuplesPerTilegroup => "tuples_per_tilegroup",
      Field::TxnItr => "txn_itr",
      Field::Theta => "theta",
      Field::SplitPoint => "split_point",
      Field::SampleWeight => "sample_weight",
      Field::ThreadCount => "thread_count",
      Field::Stat => "stat",
      Field::CacheMisses => "cache_misses",
      Field::QueryItr => "query_itr",
      Field::TileGroupType => "tile_group_type",
      Field::TileGroupCount => "tile_group_count",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Describes how one summary record is turned into a CSV row:
/// * `path`: fields whose (decoded) text forms the directory below the result dir
/// * `key`: field written as the independent variable
/// * `values`: fields written after the key, in order
#[derive(Debug)]
pub struct PivotRule {
  pub path: &'static [Field],
  pub key: Field,
  pub values: &'static [Field],
}

impl PivotRule {
  /// Smallest record length that satisfies every field this rule reads.
  pub fn min_fields(&self) -> usize {
    self
      .path
      .iter()
      .chain(std::iter::once(&self.key))
      .chain(self.values.iter())
      .map(|field| field.index() + 1)
      .max()
      .unwrap_or(0)
  }
}

/// Storage layout under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layout {
  Row,
  Column,
  Hybrid,
}

impl Layout {
  pub const ALL: [Layout; 3] = [Layout::Row, Layout::Column, Layout::Hybrid];

  pub fn from_code(code: &str) -> Option<Layout> {
    match code {
      "0" => Some(Layout::Row),
      "1" => Some(Layout::Column),
      "2" => Some(Layout::Hybrid),
      _ => None,
    }
  }

  pub fn code(self) -> u32 {
    match self {
      Layout::Row => 0,
      Layout::Column => 1,
      Layout::Hybrid => 2,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Layout::Row => "row",
      Layout::Column => "column",
      Layout::Hybrid => "hybrid",
    }
  }

  /// Capitalized form used in chart legends.
  pub fn title(self) -> &'static str {
    match self {
      Layout::Row => "Row",
      Layout::Column => "Column",
      Layout::Hybrid => "Hybrid",
    }
  }
}

/// Query operator under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
  Direct,
  Aggregate,
  Arithmetic,
  Join,
}

impl Operator {
  pub fn from_code(code: &str) -> Option<Operator> {
    match code {
      "1" => Some(Operator::Direct),
      "2" => Some(Operator::Aggregate),
      "3" => Some(Operator::Arithmetic),
      "4" => Some(Operator::Join),
      _ => None,
    }
  }

  pub fn code(self) -> u32 {
    match self {
      Operator::Direct => 1,
      Operator::Aggregate => 2,
      Operator::Arithmetic => 3,
      Operator::Join => 4,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Operator::Direct => "direct",
      Operator::Aggregate => "aggregate",
      Operator::Arithmetic => "arithmetic",
      Operator::Join => "join",
    }
  }
}

/// Map a layout code to its directory name. Codes outside `0..=2` are kept as is.
pub fn decode_layout(code: &str) -> &str {
  Layout::from_code(code).map_or(code, |layout| layout.name())
}

/// Map an operator code to its directory name. Codes outside `1..=4` are kept as is.
pub fn decode_operator(code: &str) -> &str {
  Operator::from_code(code).map_or(code, |operator| operator.name())
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use super::*;

  #[rstest]
  #[case("0", "row")]
  #[case("1", "column")]
  #[case("2", "hybrid")]
  #[case("3", "3")]
  #[case("-1", "-1")]
  #[case("row", "row")]
  fn test_decode_layout(#[case] code: &str, #[case] expected: &str) {
    assert_eq!(expected, decode_layout(code));
  }

  #[rstest]
  #[case("1", "direct")]
  #[case("2", "aggregate")]
  #[case("3", "arithmetic")]
  #[case("4", "join")]
  #[case("0", "0")]
  #[case("5", "5")]
  fn test_decode_operator(#[case] code: &str, #[case] expected: &str) {
    assert_eq!(expected, decode_operator(code));
  }

  #[test]
  fn test_decode_borrows_unknown_codes() {
    let line = String::from("7 9");
    let mut fields = line.split_whitespace();
    let (layout, operator) = (fields.next().unwrap(), fields.next().unwrap());
    assert_eq!("7", decode_layout(layout));
    assert_eq!("9", decode_operator(operator));
    let code = 2.to_string();
    assert_eq!("hybrid", decode_layout(&code));
  }

  #[test]
  fn test_category_names_round_trip() {
    for category in Category::ALL {
      assert_eq!(Ok(category), category.name().parse::<Category>());
    }
    assert!("tilegroup".parse::<Category>().is_err());
  }

  #[test]
  fn test_category_codes_are_distinct() {
    let mut codes: Vec<u32> = Category::ALL.iter().map(|c| c.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(Category::ALL.len(), codes.len());
  }

  #[rstest]
  #[case(Category::Projectivity, 16)]
  #[case(Category::Adapt, 16)]
  #[case(Category::Caching, 17)]
  #[case(Category::Distribution, 3)]
  fn test_min_fields(#[case] category: Category, #[case] expected: usize) {
    assert_eq!(expected, category.rule().min_fields());
  }
}
