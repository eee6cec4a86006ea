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

//! The full transformation pipeline, from a raw grammar to its parse table.

use std::rc::Rc;

use crate::{
  grammar::{
    passes::{firsts::Firsts, follows::Follows, table::ParseTable, PassContext},
    transform::{eliminate_left_recursion, left_factor, FreshNames},
    Grammar,
  },
  utils::fmt::set_fmt,
};

/// Every snapshot and derived mapping of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
  pub original: Grammar,
  pub factored: Grammar,
  pub left_rec_free: Grammar,
  pub firsts: Rc<Firsts>,
  pub follows: Rc<Follows>,
  pub table: Rc<ParseTable>,
  /// The number of helper nonterminals the transforms introduced.
  pub helpers_minted: usize,
}

/// Runs left factoring, left-recursion elimination, and the set and table
/// passes over one grammar.
///
/// A pipeline is consumed by [`Pipeline::run`], so the helper names of one
/// run never depend on an earlier one.
#[derive(Debug, Default)]
pub struct Pipeline {
  names: FreshNames,
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn run(mut self, original: Grammar) -> PipelineOutput {
    log::info!(
      "Input grammar: {} nonterminals, {} productions.",
      original.nonterminals().count(),
      original.num_prods()
    );

    let factored = left_factor(&original, &mut self.names);
    log::info!(
      "Left factoring done: {} nonterminals, {} productions.",
      factored.nonterminals().count(),
      factored.num_prods()
    );

    let left_rec_free = eliminate_left_recursion(&factored, &mut self.names);
    log::info!(
      "Left recursion removal done: {} nonterminals, {} productions.",
      left_rec_free.nonterminals().count(),
      left_rec_free.num_prods()
    );

    let (firsts, follows, table) = {
      let ctx = PassContext::new(&left_rec_free);
      let table = ctx.get_pass::<ParseTable>();
      (ctx.get_pass::<Firsts>(), ctx.get_pass::<Follows>(), table)
    };

    for (nt, set) in firsts.iter() {
      log::trace!("FIRST({}) = {:?}", nt, set_fmt(set));
    }
    for (nt, set) in follows.iter() {
      log::trace!("FOLLOW({}) = {:?}", nt, set_fmt(set));
    }
    log::info!(
      "Parse table built: {} columns, {} conflicting cells.",
      table.columns().len(),
      table.conflicts().len()
    );

    PipelineOutput {
      original,
      factored,
      left_rec_free,
      firsts,
      follows,
      table,
      helpers_minted: self.names.minted_count(),
    }
  }
}
