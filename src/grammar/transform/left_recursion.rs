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

//! A Grammar transform that removes direct and indirect left recursion.
//!
//! Nonterminals are visited in a fixed order. Before visiting `A_i`, every
//! production `A_i -> A_j γ` with `j < i` is expanded by substituting each
//! production of `A_j`. Any direct recursion left on `A_i` is then removed
//! in the usual way:
//!
//! ```text
//! A -> A α_1 | ... | A α_m | β_1 | ... | β_n
//! ```
//!
//! becomes
//!
//! ```text
//! A -> β_1 A'r | ... | β_n A'r
//! A'r -> α_1 A'r | ... | α_m A'r | ε
//! ```
//!
//! The initial order is lexicographic. New helper nonterminals are appended
//! to the end of the order as they are created.
//!
//! A `β` that is the empty alternative gives `ε A'r`, which keeps its leading
//! `ε`. Substituting it into a helper therefore never makes the helper start
//! with itself.

use std::iter::once;

use im::OrdMap;

use crate::grammar::{
  build,
  transform::fresh::{FreshNames, Origin},
  Elem, Grammar, NonTerminal, Production,
};

type WorkingRules = OrdMap<NonTerminal, Vec<Production>>;

/// Returns a grammar equivalent to `g` with no left-recursive nonterminal.
pub fn eliminate_left_recursion(
  g: &Grammar,
  names: &mut FreshNames,
) -> Grammar {
  let in_use = g.labels();
  let mut rules: WorkingRules = g
    .rules()
    .map(|rule| (rule.head().clone(), rule.prods().to_vec()))
    .collect();
  let mut order: Vec<NonTerminal> = rules.keys().cloned().collect();

  let mut i = 0;
  while i < order.len() {
    let a_i = order[i].clone();
    let mut prods = rules.get(&a_i).cloned().unwrap_or_default();

    for a_j in &order[..i] {
      if !prods.iter().any(|p| p.starts_with_nonterm(a_j)) {
        continue;
      }
      let replacements = rules.get(a_j).cloned().unwrap_or_default();
      log::debug!(
        "Substituting {} productions of {} into {}.",
        replacements.len(),
        a_j,
        a_i
      );
      prods = substitute(&prods, a_j, &replacements);
    }

    match split_direct_recursion(&a_i, prods) {
      Split::NotRecursive(prods) => {
        rules.insert(a_i, prods);
      }
      Split::Recursive { alphas, betas } => {
        let helper = names.fresh(&a_i, Origin::LeftRecursion, &in_use);
        log::debug!(
          "Removing direct left recursion on {} through {} ({} recursive, {} \
           base alternatives).",
          a_i,
          helper,
          alphas.len(),
          betas.len()
        );

        let tail = [Elem::NonTerm(helper.clone())];
        rules.insert(
          a_i,
          betas.iter().map(|beta| beta.concat(&tail)).collect(),
        );

        let helper_prods = alphas
          .into_iter()
          .map(|alpha| {
            Production::new(alpha.into_iter().chain(tail.iter().cloned()))
          })
          .chain(once(Production::empty()))
          .collect();
        rules.insert(helper.clone(), helper_prods);
        order.push(helper);
      }
    }

    i += 1;
  }

  build(|gb| {
    for (head, prods) in rules.iter() {
      gb.add_rule(head, |rb| {
        for prod in prods {
          rb.add_production(prod);
        }
      });
    }
  })
}

/// Replaces every production `nt γ` in `prods` with `δ γ` for each `δ` in
/// `replacements`. Other productions are kept in place.
fn substitute(
  prods: &[Production],
  nt: &NonTerminal,
  replacements: &[Production],
) -> Vec<Production> {
  prods
    .iter()
    .flat_map(|prod| {
      if prod.starts_with_nonterm(nt) {
        replacements
          .iter()
          .map(|delta| delta.concat(prod.rest()))
          .collect::<Vec<_>>()
      } else {
        vec![prod.clone()]
      }
    })
    .collect()
}

enum Split {
  NotRecursive(Vec<Production>),
  /// The remainders of the recursive productions, and the other productions.
  Recursive {
    alphas: Vec<Vec<Elem>>,
    betas: Vec<Production>,
  },
}

/// Splits the productions of `head` on whether they start with `head`.
///
/// A production `head -> head` has no remainder and derives nothing new, so
/// it is dropped.
fn split_direct_recursion(head: &NonTerminal, prods: Vec<Production>) -> Split {
  if !prods.iter().any(|p| p.starts_with_nonterm(head)) {
    return Split::NotRecursive(prods);
  }

  let mut alphas = Vec::new();
  let mut betas = Vec::new();
  for prod in prods {
    if !prod.starts_with_nonterm(head) {
      betas.push(prod);
    } else if prod.rest().is_empty() {
      log::debug!("Dropping cyclic production {} -> {}.", head, prod);
    } else {
      alphas.push(prod.rest().to_vec());
    }
  }

  Split::Recursive { alphas, betas }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;

  fn prods_of(g: &Grammar, name: &str) -> Vec<String> {
    g.get_rule(&NonTerminal::new(name))
      .unwrap_or_else(|| panic!("no rule for {}", name))
      .prods()
      .iter()
      .map(|p| p.to_string())
      .collect()
  }

  #[test]
  fn test_direct_recursion() {
    let mut names = FreshNames::new();
    let g = eliminate_left_recursion(&examples::make_expr(), &mut names);
    assert!(g.left_recursive_nts().is_empty());
    assert_eq!(prods_of(&g, "E"), vec!["T E'r1"]);
    assert_eq!(prods_of(&g, "E'r1"), vec!["\"+\" T E'r1", "\"ε\""]);
    assert_eq!(prods_of(&g, "F"), vec!["\"(\" E \")\"", "\"id\""]);
    assert_eq!(prods_of(&g, "T"), vec!["\"(\" E \")\" T'r2", "\"id\" T'r2"]);
    assert_eq!(prods_of(&g, "T'r2"), vec!["\"*\" F T'r2", "\"ε\""]);
  }

  #[test]
  fn test_indirect_recursion() {
    let mut names = FreshNames::new();
    let input = examples::make_indirect();
    assert!(!input.left_recursive_nts().is_empty());

    let g = eliminate_left_recursion(&input, &mut names);
    assert!(g.left_recursive_nts().is_empty());
    assert_eq!(prods_of(&g, "A"), vec!["S \"d\" A'r1", "\"ε\" A'r1"]);
    assert_eq!(prods_of(&g, "A'r1"), vec!["\"c\" A'r1", "\"ε\""]);
    assert_eq!(
      prods_of(&g, "S"),
      vec!["\"ε\" A'r1 \"a\" S'r2", "\"b\" S'r2"]
    );
    assert_eq!(prods_of(&g, "S'r2"), vec!["\"d\" A'r1 \"a\" S'r2", "\"ε\""]);
  }

  #[test]
  fn test_cyclic_production_is_dropped() {
    let mut names = FreshNames::new();
    let g = build(|gb| {
      gb.add_rule("A", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("A");
        })
        .add_prod(|pb| {
          pb.add_symbol("a");
        });
      });
    });
    let g = eliminate_left_recursion(&g, &mut names);
    assert_eq!(prods_of(&g, "A"), vec!["\"a\" A'r1"]);
    assert_eq!(prods_of(&g, "A'r1"), vec!["\"ε\""]);
    assert!(g.left_recursive_nts().is_empty());
  }

  #[test]
  fn test_recursion_behind_empty_alternative() {
    let mut names = FreshNames::new();
    let g = build(|gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("S").add_symbol("S");
        })
        .add_prod(|pb| {
          pb.add_symbol("(").add_symbol("S").add_symbol(")");
        })
        .add_prod(|pb| {
          pb.add_empty();
        });
      });
    });
    let g = eliminate_left_recursion(&g, &mut names);
    assert_eq!(
      prods_of(&g, "S"),
      vec!["\"(\" S \")\" S'r1", "\"ε\" S'r1"]
    );
    assert_eq!(
      prods_of(&g, "S'r1"),
      vec!["\"(\" S \")\" S'r1 S'r1", "\"ε\" S'r1 S'r1", "\"ε\""]
    );
    for prod in g.prods() {
      assert!(!prod.body().starts_with_nonterm(prod.head()), "{}", prod);
    }
    assert!(g.left_recursive_nts().is_empty());
    assert_eq!(names.minted_count(), 1);
  }

  #[test]
  fn test_recursion_without_base_case() {
    let mut names = FreshNames::new();
    let g = build(|gb| {
      gb.add_rule("A", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("A").add_symbol("a");
        });
      });
    });
    let g = eliminate_left_recursion(&g, &mut names);
    assert!(prods_of(&g, "A").is_empty());
    assert_eq!(prods_of(&g, "A'r1"), vec!["\"a\" A'r1", "\"ε\""]);
  }

  #[test]
  fn test_non_recursive_grammar_is_unchanged() {
    let mut names = FreshNames::new();
    let g = build(|gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("a").add_symbol("B");
        })
        .add_prod(|pb| {
          pb.add_symbol("c");
        });
      })
      .add_rule("B", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("b");
        });
      });
    });
    assert_eq!(eliminate_left_recursion(&g, &mut names), g);
    assert_eq!(names.minted_count(), 0);
  }

  #[test]
  fn test_earlier_nonterminals_are_substituted() {
    let mut names = FreshNames::new();
    let g = build(|gb| {
      gb.add_rule("A", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("a");
        })
        .add_prod(|pb| {
          pb.add_symbol("b");
        });
      })
      .add_rule("B", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("A").add_symbol("c");
        });
      });
    });
    let g = eliminate_left_recursion(&g, &mut names);
    assert_eq!(prods_of(&g, "B"), vec!["\"a\" \"c\"", "\"b\" \"c\""]);
  }
}
