//! Integration tests for `SqliteStore` against an in-memory database.

use petro_core::{
  record::SaleRecord,
  report::{ProductAverage, ProductTotal, Report, ReportOutput, YearBucket},
  store::{ImportMode, SalesStore, TableCounts},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn feed() -> Vec<SaleRecord> {
  vec![
    SaleRecord::new("Nepal", "Diesel", 2007, 120),
    SaleRecord::new("Nepal", "Petrol", 2007, 80),
    SaleRecord::new("India", "Diesel", 2012, 300),
    SaleRecord::new("India", "Petrol", 2012, 0),
    SaleRecord::new("Bhutan", "Diesel", 2007, 15),
  ]
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_is_empty() {
  let s = store().await;
  assert_eq!(s.counts().await.unwrap(), TableCounts::default());
  assert!(s.sale_facts().await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_keeps_data_and_schema() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("petroleum.db");

  let s = SqliteStore::open(&path).await.unwrap();
  s.import(feed(), ImportMode::Append).await.unwrap();
  s.close().await.unwrap();

  // Schema creation runs again on open and must not disturb existing rows.
  let s = SqliteStore::open(&path).await.unwrap();
  let counts = s.counts().await.unwrap();
  assert_eq!(counts.sales, 5);
  assert_eq!(counts.countries, 3);
  s.close().await.unwrap();
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_normalizes_dimensions() {
  let s = store().await;

  let summary = s.import(feed(), ImportMode::Append).await.unwrap();
  assert_eq!(summary.inserted, 5);
  assert_eq!(summary.failed_writes, 0);
  assert_eq!(summary.cleared, 0);

  assert_eq!(
    s.counts().await.unwrap(),
    TableCounts { countries: 3, products: 2, years: 2, sales: 5 }
  );

  let names: Vec<String> = s.countries().await.unwrap().into_iter().map(|c| c.name).collect();
  assert_eq!(names, ["Nepal", "India", "Bhutan"]);

  let years: Vec<i32> = s.years().await.unwrap().into_iter().map(|y| y.value).collect();
  assert_eq!(years, [2007, 2012]);
}

#[tokio::test]
async fn importing_twice_keeps_dimensions_and_doubles_facts() {
  let s = store().await;

  s.import(feed(), ImportMode::Append).await.unwrap();
  let first = s.counts().await.unwrap();
  let first_products = s.products().await.unwrap();

  s.import(feed(), ImportMode::Append).await.unwrap();
  let second = s.counts().await.unwrap();

  assert_eq!(second.countries, first.countries);
  assert_eq!(second.products, first.products);
  assert_eq!(second.years, first.years);
  assert_eq!(second.sales, first.sales * 2);

  // Existing rows keep their keys across runs.
  assert_eq!(s.products().await.unwrap(), first_products);
}

#[tokio::test]
async fn replace_mode_clears_facts_but_keeps_dimensions() {
  let s = store().await;

  s.import(feed(), ImportMode::Append).await.unwrap();
  s.import(feed(), ImportMode::Append).await.unwrap();

  let summary = s
    .import(vec![SaleRecord::new("Nepal", "Kerosene", 2013, 9)], ImportMode::Replace)
    .await
    .unwrap();
  assert_eq!(summary.cleared, 10);
  assert_eq!(summary.inserted, 1);

  assert_eq!(
    s.counts().await.unwrap(),
    TableCounts { countries: 3, products: 3, years: 3, sales: 1 }
  );
}

#[tokio::test]
async fn every_sale_references_existing_dimensions() {
  let s = store().await;
  s.import(feed(), ImportMode::Append).await.unwrap();

  let countries = s.countries().await.unwrap();
  let products  = s.products().await.unwrap();
  let years     = s.years().await.unwrap();

  for sale in s.sales().await.unwrap() {
    assert!(countries.iter().any(|c| c.id == sale.country_id), "{sale:?}");
    assert!(products.iter().any(|p| p.id == sale.product_id), "{sale:?}");
    assert!(years.iter().any(|y| y.id == sale.year_id), "{sale:?}");
  }
}

#[tokio::test]
async fn sale_facts_join_back_to_the_records() {
  let s = store().await;
  s.import(feed(), ImportMode::Append).await.unwrap();

  let facts = s.sale_facts().await.unwrap();
  let as_records: Vec<SaleRecord> = facts
    .into_iter()
    .map(|f| SaleRecord::new(f.country, f.product, f.year, f.amount))
    .collect();

  assert_eq!(as_records, feed());
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
  let s = store().await;
  let summary = s.import(Vec::new(), ImportMode::Append).await.unwrap();
  assert_eq!(summary.inserted, 0);
  assert_eq!(s.counts().await.unwrap(), TableCounts::default());
}

#[tokio::test]
async fn failing_record_does_not_abort_the_batch() {
  let s = store().await;

  // The CHECK constraint rejects negative amounts. Validation normally stops
  // these earlier; the store must still cope on its own.
  let summary = s
    .import(
      vec![
        SaleRecord::new("Nepal", "Diesel", 2007, 10),
        SaleRecord::new("Nepal", "Diesel", 2008, -1),
        SaleRecord::new("India", "Diesel", 2009, 20),
      ],
      ImportMode::Append,
    )
    .await
    .unwrap();

  assert_eq!(summary.inserted, 2);
  assert_eq!(summary.failed_writes, 1);
  assert_eq!(s.counts().await.unwrap().sales, 2);
}

// ─── Reports over stored facts ───────────────────────────────────────────────

#[tokio::test]
async fn reports_over_two_gasoline_records() {
  let s = store().await;
  s.import(
    vec![
      SaleRecord::new("X", "Gasoline", 2009, 10),
      SaleRecord::new("Y", "Gasoline", 2012, 20),
    ],
    ImportMode::Append,
  )
  .await
  .unwrap();

  let facts = s.sale_facts().await.unwrap();

  assert_eq!(
    ReportOutput::compute(Report::TotalSales, &facts),
    ReportOutput::TotalSales(vec![ProductTotal { product: "Gasoline".into(), total: 30 }])
  );
  assert_eq!(
    ReportOutput::compute(Report::AverageSales, &facts),
    ReportOutput::AverageSales(vec![
      ProductAverage { product: "Gasoline".into(), bucket: YearBucket::Early, average: 10.0 },
      ProductAverage { product: "Gasoline".into(), bucket: YearBucket::Late, average: 20.0 },
    ])
  );
}
