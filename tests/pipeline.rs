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

use ll1kit::{
  grammar::{
    passes::firsts::Firsts, Elem, FirstTerminal, Grammar, NonTerminal,
    StreamTerminal, Terminal,
  },
  pipeline::{Pipeline, PipelineOutput},
  reader::parse_grammar,
};

const SAMPLES: &[&str] = &[
  "S -> A B | A c\nA -> a | a A\n",
  "E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n",
  "S -> A a | b\nA -> A c | S d | ε\n",
  "A -> a | a\n",
  "S -> x\n",
  "X -> Y x | Y z\nY -> y | ε\n",
  "S -> i E t S | i E t S e S | a\nE -> b\n",
  "A -> B x | y\nB -> C w\nC -> A v | u\n",
  "S -> S S | ( S ) | ε\n",
];

fn run(text: &str) -> PipelineOutput {
  Pipeline::new().run(parse_grammar(text))
}

fn nt(name: &str) -> NonTerminal {
  NonTerminal::new(name)
}

fn term(name: &str) -> StreamTerminal {
  StreamTerminal::from(Terminal::new(name))
}

fn prod_strings(g: &Grammar, name: &str) -> Vec<String> {
  g.get_rule(&nt(name))
    .unwrap_or_else(|| panic!("no rule for {}", name))
    .prods()
    .iter()
    .map(|p| p.to_string())
    .collect()
}

#[test]
fn left_factored_grammars_share_no_prefixes() {
  for text in SAMPLES {
    let output = run(text);
    for rule in output.factored.rules() {
      let prods = rule.prods();
      for (i, a) in prods.iter().enumerate() {
        for b in &prods[i + 1..] {
          let first = a.first_elem();
          assert!(
            first.is_empty_marker() || first != b.first_elem(),
            "{} has two alternatives starting with {}",
            rule.head(),
            first
          );
        }
      }
    }
  }
}

#[test]
fn final_grammars_are_not_left_recursive() {
  for text in SAMPLES {
    let output = run(text);
    let g = &output.left_rec_free;
    for prod in g.prods() {
      assert!(
        !prod.body().starts_with_nonterm(prod.head()),
        "{} is directly left-recursive",
        prod
      );
    }
    assert!(g.left_recursive_nts().is_empty(), "input:\n{}", text);
  }
}

#[test]
fn firsts_are_closed_and_stable() {
  for text in SAMPLES {
    let output = run(text);
    for prod in output.left_rec_free.prods() {
      let set = output.firsts.get(prod.head()).unwrap();
      let walked = output.firsts.first_of(prod.elements());
      for t in &walked.terminals {
        assert!(set.contains(&FirstTerminal::Term(t.clone())));
      }
      if walked.nullable {
        assert!(set.contains(&FirstTerminal::Empty));
      }
    }
    assert_eq!(Firsts::compute(&output.left_rec_free), *output.firsts);
  }
}

#[test]
fn end_of_input_follows_start() {
  for text in SAMPLES {
    let output = run(text);
    let start = output.left_rec_free.start_nt().unwrap();
    assert!(output
      .follows
      .get(start)
      .unwrap()
      .contains(&StreamTerminal::EndOfStream));
  }
}

#[test]
fn table_entries_are_justified() {
  for text in SAMPLES {
    let output = run(text);
    for (head, row) in output.table.rows() {
      for (lookahead, prods) in row {
        for prod in prods {
          let seq = output.firsts.first_of(prod.elements());
          let by_first = match lookahead {
            StreamTerminal::Term(t) => seq.terminals.contains(t),
            StreamTerminal::EndOfStream => false,
          };
          let by_follow = seq.nullable
            && output.follows.get(head).unwrap().contains(lookahead);
          assert!(
            by_first || by_follow,
            "{} -> {} at {}",
            head,
            prod,
            lookahead
          );
        }
      }
    }
  }
}

#[test]
fn round_trip_scenario() {
  let output = run(SAMPLES[0]);

  assert_eq!(prod_strings(&output.factored, "S"), vec!["A S'f2"]);
  assert_eq!(prod_strings(&output.factored, "S'f2"), vec!["\"B\"", "\"c\""]);
  assert_eq!(prod_strings(&output.factored, "A"), vec!["\"a\" A'f1"]);
  assert_eq!(prod_strings(&output.factored, "A'f1"), vec!["\"ε\"", "A"]);

  let final_g = &output.left_rec_free;
  assert_eq!(prod_strings(final_g, "A'f1"), vec!["\"ε\"", "\"a\" A'f1"]);

  let first_a: Vec<_> = output.firsts.get(&nt("A")).unwrap().iter().collect();
  assert_eq!(first_a, vec![&FirstTerminal::Term(Terminal::new("a"))]);
  assert_eq!(output.table.get(&nt("S"), &term("a")).len(), 1);
  assert!(output.table.is_ll1());
}

#[test]
fn identical_alternatives_scenario() {
  let output = run(SAMPLES[3]);
  assert_eq!(prod_strings(&output.left_rec_free, "A"), vec!["\"a\" A'f1"]);
  assert_eq!(
    prod_strings(&output.left_rec_free, "A'f1"),
    vec!["\"ε\"", "\"ε\""]
  );

  let cell = output.table.get(&nt("A'f1"), &StreamTerminal::EndOfStream);
  assert_eq!(cell.len(), 2);
  assert_eq!(cell[0], cell[1]);
  assert!(!output.table.is_ll1());
  assert_eq!(output.table.conflicts().len(), 1);
}

#[test]
fn undefined_symbol_scenario() {
  let output = run(SAMPLES[4]);
  let g = &output.left_rec_free;
  assert!(!g.is_nonterminal("x"));
  assert_eq!(
    g.get_rule(&nt("S")).unwrap().prods()[0].first_elem(),
    &Elem::Term(Terminal::new("x"))
  );

  let first_s: Vec<_> = output.firsts.get(&nt("S")).unwrap().iter().collect();
  assert_eq!(first_s, vec![&FirstTerminal::Term(Terminal::new("x"))]);
  let follow_s: Vec<_> = output.follows.get(&nt("S")).unwrap().iter().collect();
  assert_eq!(follow_s, vec![&StreamTerminal::EndOfStream]);

  let cell = output.table.get(&nt("S"), &term("x"));
  assert_eq!(cell.len(), 1);
  assert_eq!(cell[0].to_string(), "\"x\"");
}

#[test]
fn start_symbol_convention() {
  let with_s = parse_grammar("A -> a\nS -> A\n");
  assert_eq!(with_s.start_nt(), Some(&nt("S")));

  let without_s = parse_grammar("Q -> P\nP -> p\n");
  assert_eq!(without_s.start_nt(), Some(&nt("P")));
  let output = Pipeline::new().run(without_s);
  assert!(output
    .follows
    .get(&nt("P"))
    .unwrap()
    .contains(&StreamTerminal::EndOfStream));
  assert!(output.follows.get(&nt("Q")).unwrap().is_empty());

  assert_eq!(parse_grammar("").start_nt(), None);
}

#[test]
fn helper_names_are_unique_across_stages() {
  // Both stages create a helper for S.
  let output = run("S -> S a | b c | b d\n");
  let helpers: Vec<String> = output
    .left_rec_free
    .nonterminals()
    .map(|nt| nt.to_string())
    .filter(|name| name != "S")
    .collect();
  assert_eq!(helpers, vec!["S'f1", "S'r2"]);
  assert_eq!(output.helpers_minted, 2);
}

#[test]
fn dangling_else_conflict_is_reported() {
  let output = run(SAMPLES[6]);
  let conflicts = output.table.conflicts();
  assert_eq!(conflicts.len(), 1);
  assert_eq!(conflicts[0].lookahead, &term("e"));
}

#[test]
fn recursion_behind_empty_alternative_is_removed() {
  let output = run(SAMPLES[8]);
  let g = &output.left_rec_free;
  for prod in g.prods() {
    assert!(
      !prod.body().starts_with_nonterm(prod.head()),
      "{} is directly left-recursive",
      prod
    );
  }
  assert!(g.left_recursive_nts().is_empty());
  assert_eq!(
    prod_strings(g, "S'r1"),
    vec!["\"(\" S \")\" S'r1 S'r1", "\"ε\" S'r1 S'r1", "\"ε\""]
  );
  assert_eq!(output.helpers_minted, 1);

  // ε S'r1 S'r1 and ( S ) S'r1 S'r1 both start with "(".
  let cell = output.table.get(&nt("S'r1"), &term("("));
  assert_eq!(cell.len(), 2);
  assert!(!output.table.is_ll1());
}
