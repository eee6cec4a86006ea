// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Text rendering of pipeline results.

use std::{collections::BTreeSet, fmt::Display};

use unicode_segmentation::UnicodeSegmentation;

use crate::{
  grammar::{passes::table::ParseTable, Grammar, NonTerminal},
  pipeline::PipelineOutput,
};

const TABLE_CORNER: &str = "Non-Terminal/Terminal";
const ELLIPSIS: &str = "...";

/// Layout settings for rendered reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
  /// The page width the grammar pretty-printer breaks rules at.
  pub page_width: usize,
  /// The narrowest a table column may be.
  pub min_column_width: usize,
  /// The width of the table's first column, which holds nonterminals.
  pub head_column_width: usize,
}

impl Default for ReportOptions {
  fn default() -> Self {
    ReportOptions {
      page_width: 80,
      min_column_width: 20,
      head_column_width: 25,
    }
  }
}

fn width_of(text: &str) -> usize {
  text.graphemes(true).count()
}

/// Pads `text` with spaces up to `width` graphemes.
fn pad(text: &str, width: usize) -> String {
  let fill = width.saturating_sub(width_of(text));
  format!("{}{}", text, " ".repeat(fill))
}

/// Cuts `text` down to `width` graphemes, ending it with an ellipsis if
/// anything was removed.
fn truncate(text: &str, width: usize) -> String {
  if width_of(text) <= width {
    return text.to_string();
  }
  let keep = width.saturating_sub(ELLIPSIS.len());
  let mut cut: String = text.graphemes(true).take(keep).collect();
  cut.push_str(ELLIPSIS);
  cut
}

fn title(text: &str) -> String {
  format!("\n{}\n\n", text)
}

/// Renders a titled grammar section.
pub fn render_grammar(
  heading: &str,
  g: &Grammar,
  options: &ReportOptions,
) -> String {
  let mut out = title(heading);
  out.push_str(&g.to_pretty(options.page_width));
  out
}

/// Renders one `A : { "a" "b" }` line per nonterminal.
pub fn render_sets<'a, T, I>(heading: &str, sets: I) -> String
where
  T: Display + 'a,
  I: IntoIterator<Item = (&'a NonTerminal, &'a BTreeSet<T>)>,
{
  let mut out = title(heading);
  for (nt, set) in sets {
    out.push_str(&format!("{} : {{ ", nt));
    for member in set {
      out.push_str(&format!("{} ", member));
    }
    out.push_str("}\n");
  }
  out
}

/// Renders the parse table as fixed-width columns.
///
/// Every lookahead column is as wide as its longest quoted header plus
/// four, but at least `min_column_width`. Cells that do not fit are
/// truncated.
pub fn render_table(table: &ParseTable, options: &ReportOptions) -> String {
  let headers: Vec<String> =
    table.columns().iter().map(|la| la.to_string()).collect();
  let column_width = table
    .columns()
    .iter()
    .map(|la| width_of(la.label()) + 4)
    .fold(options.min_column_width, std::cmp::max);

  let mut out = title("LL(1) Parsing Table");
  out.push_str(&pad(TABLE_CORNER, options.head_column_width));
  for header in &headers {
    out.push_str(&pad(header, column_width));
  }
  out.push('\n');
  out.push_str(
    &"-".repeat(options.head_column_width + headers.len() * column_width),
  );
  out.push('\n');

  for (nt, _) in table.rows() {
    out.push_str(&pad(&nt.to_string(), options.head_column_width));
    for lookahead in table.columns() {
      let cell = table
        .get(nt, lookahead)
        .iter()
        .map(|prod| format!("{} -> {}", nt, prod))
        .collect::<Vec<_>>()
        .join(" | ");
      out.push_str(&pad(&truncate(&cell, column_width), column_width));
    }
    out.push('\n');
  }
  out
}

/// Renders one line per conflicting table cell.
pub fn render_conflicts(table: &ParseTable) -> String {
  let conflicts = table.conflicts();
  if conflicts.is_empty() {
    return "The grammar is LL(1): no table cell has more than one \
            production.\n"
      .to_string();
  }

  let mut out = format!("Conflicting cells: {}\n", conflicts.len());
  for conflict in conflicts {
    let prods = conflict
      .prods
      .iter()
      .map(|prod| format!("{} -> {}", conflict.nonterm, prod))
      .collect::<Vec<_>>()
      .join(" | ");
    out.push_str(&format!(
      "  ({}, {}): {}\n",
      conflict.nonterm, conflict.lookahead, prods
    ));
  }
  out
}

/// Renders every stage of a pipeline run.
pub fn render_report(
  output: &PipelineOutput,
  options: &ReportOptions,
) -> String {
  [
    render_grammar("Original Grammar", &output.original, options),
    render_grammar("Grammar After Left Factoring", &output.factored, options),
    render_grammar(
      "Grammar After Left Recursion Removal",
      &output.left_rec_free,
      options,
    ),
    render_sets("FIRST Sets", output.firsts.iter()),
    render_sets("FOLLOW Sets", output.follows.iter()),
    render_table(&output.table, options),
  ]
  .concat()
}
