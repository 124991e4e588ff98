//! Filters accepted by `list_ids`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selects which identifiers `list_ids` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(from = "String", into = "String")
)]
pub enum ListFilter {
  /// Every known id: pending definitions plus already cached shared instances.
  #[default]
  AllRegistered,
  /// Only shared ids that have been resolved at least once.
  InitializedShared,
}

impl ListFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      ListFilter::AllRegistered => "all_registered",
      ListFilter::InitializedShared => "initialized_shared",
    }
  }
}

// Parsing never fails: anything not naming `InitializedShared` lists everything.
impl From<&str> for ListFilter {
  fn from(value: &str) -> Self {
    let normalized = value.trim().replace('-', "_");
    if normalized.eq_ignore_ascii_case("initialized_shared")
      || normalized.eq_ignore_ascii_case("initializedshared")
    {
      ListFilter::InitializedShared
    } else {
      ListFilter::AllRegistered
    }
  }
}

impl From<String> for ListFilter {
  fn from(value: String) -> Self {
    ListFilter::from(value.as_str())
  }
}

impl From<ListFilter> for String {
  fn from(filter: ListFilter) -> Self {
    filter.as_str().to_owned()
  }
}

impl FromStr for ListFilter {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(ListFilter::from(s))
  }
}

impl fmt::Display for ListFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
