//! The reporter: one read-only pass over the stored facts per report.

use petro_core::{
  report::{Report, ReportOutput},
  store::SalesStore,
};

use crate::render::render;

/// What the binary prints for a query, and the status it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
  /// The rendered report.
  Report(String),
  /// The query names no report. This is the caller's mistake, so it is
  /// printed but never logged.
  UnknownQuery(String),
}

impl Answer {
  /// Text for standard output, newline-terminated.
  pub fn text(&self) -> &str {
    match self {
      Self::Report(text) | Self::UnknownQuery(text) => text,
    }
  }

  pub fn exit_code(&self) -> u8 {
    match self {
      Self::Report(_) => 0,
      Self::UnknownQuery(_) => 1,
    }
  }
}

pub struct Reporter<'a, S> {
  store: &'a S,
}

impl<'a, S: SalesStore> Reporter<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  pub async fn run(&self, report: Report) -> Result<ReportOutput, S::Error> {
    let facts = self.store.sale_facts().await?;
    tracing::debug!(%report, facts = facts.len(), "computing report");
    Ok(ReportOutput::compute(report, &facts))
  }

  /// Resolve a query name and render its report. An unknown name is
  /// answered without reading the store.
  pub async fn answer(&self, query: &str) -> Result<Answer, S::Error> {
    let report = match query.parse::<Report>() {
      Ok(report) => report,
      Err(e) => {
        let names: Vec<&str> = Report::ALL.iter().map(|r| r.name()).collect();
        return Ok(Answer::UnknownQuery(format!(
          "{e}. Expected one of: {}\n",
          names.join(", ")
        )));
      }
    };

    let output = self.run(report).await?;
    Ok(Answer::Report(render(&output)))
  }
}

#[cfg(test)]
mod tests {
  use petro_core::{
    record::SaleRecord,
    report::{CountryTotal, ProductTotal},
    store::ImportMode,
  };
  use petro_store_sqlite::SqliteStore;

  use super::*;
  use crate::test_support::LogCapture;

  async fn seeded() -> SqliteStore {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.import(
      vec![
        SaleRecord::new("Nepal", "Diesel", 2009, 10),
        SaleRecord::new("India", "Diesel", 2012, 40),
        SaleRecord::new("India", "Petrol", 2010, 5),
        SaleRecord::new("Bhutan", "Petrol", 2011, 1),
      ],
      ImportMode::Append,
    )
    .await
    .unwrap();
    s
  }

  #[tokio::test]
  async fn total_sales_from_the_store() {
    let s = seeded().await;

    let output = Reporter::new(&s).run(Report::TotalSales).await.unwrap();

    assert_eq!(
      output,
      ReportOutput::TotalSales(vec![
        ProductTotal { product: "Diesel".into(), total: 50 },
        ProductTotal { product: "Petrol".into(), total: 6 },
      ])
    );
  }

  #[tokio::test]
  async fn country_ranking_from_the_store() {
    let s = seeded().await;

    let ReportOutput::TopCountries(ranking) =
      Reporter::new(&s).run(Report::TopCountries).await.unwrap()
    else {
      panic!("wrong report");
    };

    let expected_highest = vec![
      CountryTotal { country: "India".into(), total: 45 },
      CountryTotal { country: "Nepal".into(), total: 10 },
      CountryTotal { country: "Bhutan".into(), total: 1 },
    ];
    let mut expected_lowest = expected_highest.clone();
    expected_lowest.reverse();

    assert_eq!(ranking.highest, expected_highest);
    assert_eq!(ranking.lowest, expected_lowest);
  }

  #[tokio::test]
  async fn reports_on_an_empty_store_are_empty() {
    let s = SqliteStore::open_in_memory().await.unwrap();

    let output = Reporter::new(&s).run(Report::AverageSales).await.unwrap();
    assert_eq!(output, ReportOutput::AverageSales(Vec::new()));
  }

  #[tokio::test]
  async fn answer_renders_a_known_report() {
    let s = seeded().await;

    let answer = Reporter::new(&s).answer("totalsales").await.unwrap();

    assert_eq!(answer.exit_code(), 0);
    assert!(matches!(answer, Answer::Report(_)));
    assert!(answer.text().contains("Diesel"), "{}", answer.text());
    assert!(answer.text().ends_with('\n'));
  }

  #[tokio::test]
  async fn unknown_query_exits_one_and_logs_nothing() {
    let s    = seeded().await;
    let logs = LogCapture::default();
    let _guard = logs.install();

    let answer = Reporter::new(&s).answer("bogus").await.unwrap();

    assert_eq!(answer.exit_code(), 1);
    let Answer::UnknownQuery(text) = &answer else {
      panic!("expected an unknown query, got {answer:?}");
    };
    assert!(text.contains("\"bogus\""), "{text}");
    assert!(text.contains("totalsales, top3countries, averagesales"), "{text}");
    assert_eq!(logs.contents(), "");
  }

  #[tokio::test]
  async fn unknown_query_does_not_need_a_readable_store() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    s.clone().close().await.unwrap();

    let answer = Reporter::new(&s).answer("TotalSales").await.unwrap();
    assert_eq!(answer.exit_code(), 1);
  }
}
