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

//! The FOLLOW sets of a grammar.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  grammar::{NonTerminal, StreamTerminal},
  utils::{change_iter, change_loop, CollectMap, WasChanged},
};

use super::{firsts::Firsts, Pass, PassContext};

/// The FOLLOW set of every nonterminal in a grammar.
///
/// The end-of-input marker is always in the set of the start nonterminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Follows(BTreeMap<NonTerminal, BTreeSet<StreamTerminal>>);

impl Follows {
  pub fn get(&self, nt: &NonTerminal) -> Option<&BTreeSet<StreamTerminal>> {
    self.0.get(nt)
  }

  pub fn iter(
    &self,
  ) -> impl Iterator<Item = (&NonTerminal, &BTreeSet<StreamTerminal>)> {
    self.0.iter()
  }
}

impl Pass for Follows {
  fn run_pass(ctx: &PassContext) -> Self {
    let gram = ctx.grammar();
    let firsts = ctx.get_pass::<Firsts>();

    let start = match gram.start_nt() {
      Some(start) => start,
      None => return Follows(BTreeMap::new()),
    };

    let mut follows = CollectMap::with_keys(gram.nonterminals().cloned());

    let rounds = change_loop(|| {
      let mut changed =
        follows.insert(start.clone(), StreamTerminal::EndOfStream);

      changed.merge(change_iter(gram.prods(), |prod| {
        let elems = prod.elements();
        change_iter(elems.iter().enumerate(), |(i, elem)| {
          let nt = match elem.as_nonterm() {
            Some(nt) => nt,
            None => return WasChanged::Unchanged,
          };

          let rest = firsts.first_of(&elems[i + 1..]);
          let mut changed = follows.insert_iter(
            nt.clone(),
            rest.terminals.into_iter().map(StreamTerminal::from),
          );
          if rest.nullable {
            changed
              .merge(follows.insert_from_key_set(nt.clone(), prod.head()));
          }
          changed
        })
      }));

      changed
    });
    log::trace!("FOLLOW sets stable after {} rounds.", rounds);

    Follows(follows.into_inner())
  }
}
