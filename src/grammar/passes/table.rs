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

//! The LL(1) parse table.
//!
//! The table has one row per nonterminal and one column per terminal of the
//! grammar, plus a column for the end of input. A cell lists the productions
//! a predictive parser may choose when it must expand the row's nonterminal
//! and sees the column's lookahead. An empty cell is an error transition. A
//! cell with more than one production is a conflict, which the table keeps
//! as is.

use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::{NonTerminal, Production, StreamTerminal};

use super::{firsts::Firsts, follows::Follows, Pass, PassContext};

pub type Row = BTreeMap<StreamTerminal, Vec<Production>>;

/// A cell holding more than one production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict<'a> {
  pub nonterm: &'a NonTerminal,
  pub lookahead: &'a StreamTerminal,
  pub prods: &'a [Production],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTable {
  columns: BTreeSet<StreamTerminal>,
  rows: BTreeMap<NonTerminal, Row>,
}

impl ParseTable {
  /// Returns the productions in the cell `(nt, lookahead)`. The slice is
  /// empty for an error transition.
  pub fn get(
    &self,
    nt: &NonTerminal,
    lookahead: &StreamTerminal,
  ) -> &[Production] {
    self
      .rows
      .get(nt)
      .and_then(|row| row.get(lookahead))
      .map(|prods| prods.as_slice())
      .unwrap_or(&[])
  }

  /// Returns every row, in nonterminal order. Only non-empty cells are
  /// present in a row.
  pub fn rows(&self) -> impl Iterator<Item = (&NonTerminal, &Row)> {
    self.rows.iter()
  }

  /// Returns every lookahead column: each terminal of the grammar, and the
  /// end of input.
  pub fn columns(&self) -> &BTreeSet<StreamTerminal> {
    &self.columns
  }

  pub fn conflicts(&self) -> Vec<Conflict<'_>> {
    self
      .rows
      .iter()
      .flat_map(|(nonterm, row)| {
        row
          .iter()
          .filter(|(_, prods)| prods.len() > 1)
          .map(move |(lookahead, prods)| Conflict {
            nonterm,
            lookahead,
            prods,
          })
      })
      .collect()
  }

  /// Returns true if no cell holds more than one production.
  pub fn is_ll1(&self) -> bool {
    self
      .rows
      .values()
      .flat_map(|row| row.values())
      .all(|prods| prods.len() <= 1)
  }
}

impl Pass for ParseTable {
  fn run_pass(ctx: &PassContext) -> Self {
    let gram = ctx.grammar();
    let firsts = ctx.get_pass::<Firsts>();
    let follows = ctx.get_pass::<Follows>();

    let columns: BTreeSet<StreamTerminal> = gram
      .terminals()
      .into_iter()
      .cloned()
      .map(StreamTerminal::from)
      .chain(std::iter::once(StreamTerminal::EndOfStream))
      .collect();

    let mut rows: BTreeMap<NonTerminal, Row> = BTreeMap::new();
    for rule in gram.rules() {
      let head = rule.head();
      let row = rows.entry(head.clone()).or_default();

      for prod in rule.prods() {
        let seq = firsts.first_of(prod.elements());
        let mut lookaheads: BTreeSet<StreamTerminal> =
          seq.terminals.into_iter().map(StreamTerminal::from).collect();
        if seq.nullable {
          lookaheads.extend(follows.get(head).into_iter().flatten().cloned());
        }

        for lookahead in lookaheads {
          log::trace!("Table cell ({}, {}) gets {}.", head, lookahead, prod);
          row.entry(lookahead).or_default().push(prod.clone());
        }
      }
    }

    ParseTable { columns, rows }
  }
}
