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

//! The FIRST sets of a grammar.
//!
//! FIRST(A) holds every terminal that can begin a sentence derived from `A`,
//! plus the empty marker when `A` can derive the empty sequence.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  grammar::{Elem, FirstTerminal, Grammar, NonTerminal, Terminal},
  utils::{change_iter, change_loop, CollectMap},
};

use super::{Pass, PassContext};

/// The FIRST set of a sequence of elements, with the empty marker split out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeqFirst {
  pub terminals: BTreeSet<Terminal>,
  /// True if the whole sequence can derive the empty sequence.
  pub nullable: bool,
}

impl SeqFirst {
  /// Returns the members of this set as FIRST set members.
  pub fn into_first_terminals(self) -> impl Iterator<Item = FirstTerminal> {
    let empty = if self.nullable {
      Some(FirstTerminal::Empty)
    } else {
      None
    };
    self
      .terminals
      .into_iter()
      .map(FirstTerminal::Term)
      .chain(empty)
  }
}

/// Walks `elems` left to right, collecting the FIRST set of the sequence.
///
/// A terminal ends the walk. The empty marker is skipped. A nonterminal
/// contributes its own FIRST set (looked up with `lookup`) minus the empty
/// marker, and ends the walk unless it is nullable. If the walk reaches the
/// end of the sequence, the sequence is nullable.
pub fn first_of_sequence<'a, F>(elems: &[Elem], mut lookup: F) -> SeqFirst
where
  F: FnMut(&NonTerminal) -> Option<&'a BTreeSet<FirstTerminal>>,
{
  let mut terminals = BTreeSet::new();
  for elem in elems {
    match elem {
      Elem::Term(t) => {
        terminals.insert(t.clone());
        return SeqFirst {
          terminals,
          nullable: false,
        };
      }
      Elem::Empty => {}
      Elem::NonTerm(nt) => {
        let mut nullable = false;
        for first in lookup(nt).into_iter().flatten() {
          match first {
            FirstTerminal::Term(t) => {
              terminals.insert(t.clone());
            }
            FirstTerminal::Empty => nullable = true,
          }
        }

        if !nullable {
          return SeqFirst {
            terminals,
            nullable: false,
          };
        }
      }
    }
  }

  SeqFirst {
    terminals,
    nullable: true,
  }
}

/// The FIRST set of every nonterminal in a grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Firsts(BTreeMap<NonTerminal, BTreeSet<FirstTerminal>>);

impl Firsts {
  /// Computes FIRST for every nonterminal of `gram`. Every nonterminal has
  /// an entry, even if its set is empty.
  pub fn compute(gram: &Grammar) -> Self {
    let mut firsts = CollectMap::with_keys(gram.nonterminals().cloned());

    let rounds = change_loop(|| {
      change_iter(gram.prods(), |prod| {
        let seq = first_of_sequence(prod.elements(), |nt| firsts.get(nt));
        firsts.insert_iter(prod.head().clone(), seq.into_first_terminals())
      })
    });
    log::trace!("FIRST sets stable after {} rounds.", rounds);

    Firsts(firsts.into_inner())
  }

  pub fn get(&self, nt: &NonTerminal) -> Option<&BTreeSet<FirstTerminal>> {
    self.0.get(nt)
  }

  /// Returns true if `nt` can derive the empty sequence.
  pub fn is_nullable(&self, nt: &NonTerminal) -> bool {
    self
      .get(nt)
      .map_or(false, |set| set.contains(&FirstTerminal::Empty))
  }

  /// Returns the FIRST set of a sequence of elements.
  pub fn first_of(&self, elems: &[Elem]) -> SeqFirst {
    first_of_sequence(elems, |nt| self.get(nt))
  }

  pub fn iter(
    &self,
  ) -> impl Iterator<Item = (&NonTerminal, &BTreeSet<FirstTerminal>)> {
    self.0.iter()
  }
}

impl Pass for Firsts {
  fn run_pass(ctx: &PassContext) -> Self {
    Firsts::compute(ctx.grammar())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;

  fn first_set(firsts: &Firsts, nt: &str) -> Vec<String> {
    firsts
      .get(&NonTerminal::new(nt))
      .unwrap_or_else(|| panic!("no FIRST set for {}", nt))
      .iter()
      .map(|f| f.to_string())
      .collect()
  }

  #[test]
  fn test_expr_firsts() {
    let g = examples::make_expr_ll1();
    let firsts = Firsts::compute(&g);
    assert_eq!(first_set(&firsts, "E"), vec!["\"(\"", "\"id\""]);
    assert_eq!(first_set(&firsts, "T"), vec!["\"(\"", "\"id\""]);
    assert_eq!(first_set(&firsts, "E'"), vec!["\"+\"", "\"ε\""]);
    assert_eq!(first_set(&firsts, "T'"), vec!["\"*\"", "\"ε\""]);
    assert!(firsts.is_nullable(&NonTerminal::new("E'")));
    assert!(!firsts.is_nullable(&NonTerminal::new("E")));
  }

  #[test]
  fn test_nullable_chain() {
    let g = examples::make_nullable_chain();
    let firsts = Firsts::compute(&g);
    // S -> A B "c"; A -> "a" | ε; B -> "b" | ε
    assert_eq!(first_set(&firsts, "S"), vec!["\"a\"", "\"b\"", "\"c\""]);
    assert!(!firsts.is_nullable(&NonTerminal::new("S")));
  }

  #[test]
  fn test_sequence_walk() {
    let g = examples::make_nullable_chain();
    let firsts = Firsts::compute(&g);
    let a = Elem::NonTerm(NonTerminal::new("A"));
    let b = Elem::NonTerm(NonTerminal::new("B"));

    let seq = firsts.first_of(&[a.clone(), b]);
    assert!(seq.nullable);
    assert_eq!(seq.terminals.len(), 2);

    let seq = firsts.first_of(&[a, Elem::Term(Terminal::new("x"))]);
    assert!(!seq.nullable);
    assert!(seq.terminals.contains(&Terminal::new("x")));

    assert!(firsts.first_of(&[Elem::Empty]).nullable);
    assert!(firsts.first_of(&[]).nullable);
  }

  #[test]
  fn test_firsts_are_closed() {
    for g in examples::all() {
      let firsts = Firsts::compute(&g);
      for prod in g.prods() {
        let set = firsts.get(prod.head()).unwrap();
        for first in firsts.first_of(prod.elements()).into_first_terminals() {
          assert!(set.contains(&first), "{} missing {}", prod, first);
        }
      }
      assert_eq!(Firsts::compute(&g), firsts);
    }
  }

  #[test]
  fn test_left_recursive_rule_without_base_is_empty() {
    let g = crate::grammar::build(|gb| {
      gb.add_rule("A", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("A").add_symbol("a");
        });
      });
    });
    let firsts = Firsts::compute(&g);
    assert!(first_set(&firsts, "A").is_empty());
  }
}
