//! Plain-text tables for report output.
//!
//! Column widths follow the longest value in each column; numbers are
//! right-aligned.

use petro_core::report::{
  CountryTotal, ProductAverage, ProductTotal, RANKING_SIZE, ReportOutput,
};
use tabled::{
  Table,
  builder::Builder,
  settings::{Alignment, Style, object::Columns},
};

/// Render a report as text ready for standard output.
pub fn render(output: &ReportOutput) -> String {
  match output {
    ReportOutput::TotalSales(rows) => format!("{}\n", total_sales_table(rows)),
    ReportOutput::TopCountries(ranking) => format!(
      "Top {RANKING_SIZE} countries with the highest total sales:\n{}\n\n\
       Top {RANKING_SIZE} countries with the lowest total sales:\n{}\n",
      country_table(&ranking.highest),
      country_table(&ranking.lowest),
    ),
    ReportOutput::AverageSales(rows) => format!("{}\n", average_sales_table(rows)),
  }
}

fn total_sales_table(rows: &[ProductTotal]) -> Table {
  let mut builder = Builder::new();
  builder.push_record(["Product", "Total Sale"]);
  for row in rows {
    builder.push_record([row.product.clone(), row.total.to_string()]);
  }
  finish(builder, 1)
}

fn country_table(rows: &[CountryTotal]) -> Table {
  let mut builder = Builder::new();
  builder.push_record(["Country", "Total Sale"]);
  for row in rows {
    builder.push_record([row.country.clone(), row.total.to_string()]);
  }
  finish(builder, 1)
}

fn average_sales_table(rows: &[ProductAverage]) -> Table {
  let mut builder = Builder::new();
  builder.push_record(["Product", "Interval", "Average Sale"]);
  for row in rows {
    builder.push_record([
      row.product.clone(),
      row.bucket.label().to_string(),
      format!("{:.2}", row.average),
    ]);
  }
  finish(builder, 2)
}

/// Build the table, right-aligning every column from `numeric_from` on.
fn finish(builder: Builder, numeric_from: usize) -> Table {
  let mut table = builder.build();
  table.with(Style::psql());
  table.modify(Columns::new(numeric_from..), Alignment::right());
  table
}
