//! The three fixed reports and their aggregations.
//!
//! Every aggregation is a pure function over a slice of [`SaleFact`]s. The
//! store only has to hand over the joined fact rows; grouping, ranking and
//! averaging all happen here.

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{Error, sale::SaleFact};

/// How many countries each side of the country ranking holds.
pub const RANKING_SIZE: usize = 3;

/// Last year that still belongs to [`YearBucket::Early`].
pub const EARLY_BUCKET_LAST_YEAR: i32 = 2010;

/// A sum of [`Amount`](crate::sale::Amount)s, wide enough that adding up
/// valid amounts never overflows.
pub type Total = i128;

// ─── Report selection ────────────────────────────────────────────────────────

/// One of the named reports a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
  /// `totalsales`: summed amount per product.
  TotalSales,
  /// `top3countries`: the highest and lowest selling countries.
  TopCountries,
  /// `averagesales`: mean positive amount per product and year bucket.
  AverageSales,
}

impl Report {
  pub const ALL: [Report; 3] = [Self::TotalSales, Self::TopCountries, Self::AverageSales];

  /// The name accepted on the command line.
  pub fn name(self) -> &'static str {
    match self {
      Self::TotalSales => "totalsales",
      Self::TopCountries => "top3countries",
      Self::AverageSales => "averagesales",
    }
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Report {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|report| report.name() == s)
      .ok_or_else(|| Error::UnknownReport(s.to_owned()))
  }
}

// ─── Year buckets ────────────────────────────────────────────────────────────

/// The two fixed year intervals used by `averagesales`.
///
/// Ordered so that `Early` sorts before `Late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearBucket {
  /// Up to and including 2010.
  Early,
  /// 2011 onwards.
  Late,
}

impl YearBucket {
  pub fn of(year: i32) -> Self {
    if year <= EARLY_BUCKET_LAST_YEAR { Self::Early } else { Self::Late }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Early => "<= 2010",
      Self::Late => "> 2010",
    }
  }
}

// ─── Results ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTotal {
  pub product: String,
  pub total:   Total,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTotal {
  pub country: String,
  pub total:   Total,
}

/// Both ends of the country ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRanking {
  /// Highest totals first.
  pub highest: Vec<CountryTotal>,
  /// Lowest totals first.
  pub lowest:  Vec<CountryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductAverage {
  pub product: String,
  pub bucket:  YearBucket,
  pub average: f64,
}

/// The result of running one [`Report`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
  TotalSales(Vec<ProductTotal>),
  TopCountries(CountryRanking),
  AverageSales(Vec<ProductAverage>),
}

impl ReportOutput {
  pub fn compute(report: Report, facts: &[SaleFact]) -> Self {
    match report {
      Report::TotalSales => Self::TotalSales(total_sales(facts)),
      Report::TopCountries => Self::TopCountries(country_ranking(facts, RANKING_SIZE)),
      Report::AverageSales => Self::AverageSales(average_sales(facts)),
    }
  }

  pub fn report(&self) -> Report {
    match self {
      Self::TotalSales(_) => Report::TotalSales,
      Self::TopCountries(_) => Report::TopCountries,
      Self::AverageSales(_) => Report::AverageSales,
    }
  }
}

// ─── Aggregations ────────────────────────────────────────────────────────────

/// Summed amount per product, ordered by product name.
pub fn total_sales(facts: &[SaleFact]) -> Vec<ProductTotal> {
  let mut totals: BTreeMap<&str, Total> = BTreeMap::new();
  for fact in facts {
    *totals.entry(fact.product.as_str()).or_default() += Total::from(fact.amount);
  }

  totals
    .into_iter()
    .map(|(product, total)| ProductTotal { product: product.to_owned(), total })
    .collect()
}

/// The `size` countries with the highest and the lowest summed amount.
///
/// Ties are broken by country name so the ranking is deterministic. With
/// fewer than `size` countries both lists hold every country.
pub fn country_ranking(facts: &[SaleFact], size: usize) -> CountryRanking {
  let mut totals: BTreeMap<&str, Total> = BTreeMap::new();
  for fact in facts {
    *totals.entry(fact.country.as_str()).or_default() += Total::from(fact.amount);
  }

  // BTreeMap iteration already yields names ascending, and the sorts below
  // are stable, so equal totals keep that order.
  let mut ascending: Vec<CountryTotal> = totals
    .into_iter()
    .map(|(country, total)| CountryTotal { country: country.to_owned(), total })
    .collect();
  ascending.sort_by_key(|c| c.total);

  let mut descending = ascending.clone();
  descending.sort_by(|a, b| b.total.cmp(&a.total));

  ascending.truncate(size);
  descending.truncate(size);

  CountryRanking { highest: descending, lowest: ascending }
}

/// Mean amount per (product, year bucket), ignoring non-positive amounts.
///
/// Pairs whose every fact was filtered out do not appear at all.
pub fn average_sales(facts: &[SaleFact]) -> Vec<ProductAverage> {
  let mut sums: BTreeMap<(&str, YearBucket), (Total, u64)> = BTreeMap::new();
  for fact in facts.iter().filter(|f| f.amount > 0) {
    let slot = sums
      .entry((fact.product.as_str(), YearBucket::of(fact.year)))
      .or_default();
    slot.0 += Total::from(fact.amount);
    slot.1 += 1;
  }

  sums
    .into_iter()
    .map(|((product, bucket), (sum, count))| ProductAverage {
      product: product.to_owned(),
      bucket,
      average: sum as f64 / count as f64,
    })
    .collect()
}
