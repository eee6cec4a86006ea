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

//! A Grammar transform that left-factors every rule.
//!
//! The alternatives of each nonterminal are grouped by their first element.
//! When a group has more than one member, the longest prefix common to all
//! of them is pulled out into a new nonterminal:
//!
//! ```text
//! A -> x y b | x y c | d
//! ```
//!
//! becomes
//!
//! ```text
//! A -> x y A'f1 | d
//! A'f1 -> b | c
//! ```
//!
//! The new nonterminals may themselves need factoring, so passes repeat
//! until one pass leaves the grammar unchanged. The empty marker is never
//! part of a common prefix, so a rule with two empty alternatives keeps
//! both of them.

use std::iter::once;

use crate::{
  grammar::{
    build,
    transform::fresh::{FreshNames, Origin},
    Elem, Grammar, Production,
  },
  utils::{fixed_point, fmt::list_fmt},
};

/// Left-factors `g`, minting helper nonterminals from `names`.
///
/// Groups keep the order in which their first symbol first appears, and a
/// factored group takes the position of its first member. Groups are not
/// sorted by symbol: `A -> y | x a | x b` becomes `A -> y | x A'f1`, not
/// `A -> x A'f1 | y`.
pub fn left_factor(g: &Grammar, names: &mut FreshNames) -> Grammar {
  let mut pass = 0;
  fixed_point(g.clone(), |curr| {
    pass += 1;
    let (next, rewrites) = left_factor_pass(curr, names);
    log::debug!("Left factoring pass {} rewrote {} groups.", pass, rewrites);
    next
  })
}

/// Groups productions by their first element, in order of first appearance.
fn group_by_first(prods: &[Production]) -> Vec<Vec<&Production>> {
  let mut groups: Vec<Vec<&Production>> = Vec::new();
  for prod in prods {
    match groups
      .iter()
      .position(|group| group[0].first_elem() == prod.first_elem())
    {
      Some(i) => groups[i].push(prod),
      None => groups.push(vec![prod]),
    }
  }
  groups
}

/// Returns the length of the longest prefix shared by every production in
/// `group`. The empty marker ends the prefix.
fn common_prefix_len(group: &[&Production]) -> usize {
  let (first, rest) = match group.split_first() {
    Some(split) => split,
    None => return 0,
  };

  first
    .elements()
    .iter()
    .enumerate()
    .take_while(|(i, elem)| {
      !elem.is_empty_marker()
        && rest.iter().all(|p| p.elements().get(*i) == Some(*elem))
    })
    .count()
}

fn left_factor_pass(g: &Grammar, names: &mut FreshNames) -> (Grammar, usize) {
  let in_use = g.labels();
  let mut rewrites = 0;

  let next = build(|gb| {
    for rule in g.rules() {
      let mut helpers = Vec::new();

      gb.add_rule(rule.head(), |rb| {
        for group in group_by_first(rule.prods()) {
          let prefix_len = if group.len() > 1 {
            common_prefix_len(&group)
          } else {
            0
          };

          if prefix_len == 0 {
            for prod in group {
              rb.add_production(prod);
            }
            continue;
          }

          let helper = names.fresh(rule.head(), Origin::LeftFactor, &in_use);
          let prefix = &group[0].elements()[..prefix_len];
          log::debug!(
            "Factoring {} alternatives of {} on prefix {:?} into {}.",
            group.len(),
            rule.head(),
            list_fmt(prefix),
            helper
          );

          rb.add_prod_with_elems(
            prefix
              .iter()
              .cloned()
              .chain(once(Elem::NonTerm(helper.clone()))),
          );
          let suffixes: Vec<Production> = group
            .iter()
            .map(|p| Production::new(p.elements()[prefix_len..].to_vec()))
            .collect();
          helpers.push((helper, suffixes));
          rewrites += 1;
        }
      });

      for (helper, suffixes) in helpers {
        gb.add_rule(helper, |rb| {
          for suffix in suffixes {
            rb.add_production(suffix);
          }
        });
      }
    }
  });

  (next, rewrites)
}
