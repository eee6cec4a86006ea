// Copyright 2018 Google LLC
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

pub mod builder;
mod element_types;

use {
  crate::utils::{breadth_first_search, Name, ToDoc},
  std::collections::{BTreeMap, BTreeSet},
};

pub use element_types::{
  FirstTerminal, NonTerminal, StreamTerminal, Terminal, EMPTY_MARKER,
  END_OF_INPUT,
};

/// The name of the nonterminal that is preferred as the start symbol.
pub const CONVENTIONAL_START: &str = "S";

/// A single element (terminal, non-terminal, or the empty-derivation marker).
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Elem {
  Term(Terminal),
  NonTerm(NonTerminal),
  Empty,
}

impl Elem {
  /// If this element is a terminal, returns a `Some` value containing a
  /// terminal datum. Returns `None` otherwise.
  pub fn as_term(&self) -> Option<&Terminal> {
    match self {
      Elem::Term(t) => Some(t),
      _ => None,
    }
  }

  /// Gets an element as a nonterm. Returns a `None` value otherwise.
  pub fn as_nonterm(&self) -> Option<&NonTerminal> {
    match self {
      Elem::NonTerm(nt) => Some(nt),
      _ => None,
    }
  }

  pub fn is_empty_marker(&self) -> bool {
    matches!(self, Elem::Empty)
  }

  /// The label of this element. `Empty` has no label.
  pub fn label(&self) -> Option<&Name> {
    match self {
      Elem::Term(t) => Some(t.name()),
      Elem::NonTerm(nt) => Some(nt.name()),
      Elem::Empty => None,
    }
  }

  /// Resolves the kind of this element against a set of defined heads.
  ///
  /// A label is a nonterminal exactly when it is one of `heads`; every other
  /// label is a terminal.
  fn classify(self, heads: &BTreeSet<Name>) -> Elem {
    match self {
      Elem::Empty => Elem::Empty,
      Elem::Term(t) if heads.contains(t.name()) => {
        Elem::NonTerm(NonTerminal::from(t.name().clone()))
      }
      Elem::NonTerm(nt) if !heads.contains(nt.name()) => {
        Elem::Term(Terminal::from(nt.name().clone()))
      }
      other => other,
    }
  }
}

impl From<Terminal> for Elem {
  fn from(t: Terminal) -> Self {
    Elem::Term(t)
  }
}

impl From<NonTerminal> for Elem {
  fn from(nt: NonTerminal) -> Self {
    Elem::NonTerm(nt)
  }
}

impl std::fmt::Display for Elem {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(t) => t.fmt(f),
      Elem::NonTerm(nt) => nt.fmt(f),
      Elem::Empty => write!(f, "\"{}\"", EMPTY_MARKER),
    }
  }
}

impl ToDoc for Elem {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      Elem::Term(t) => t.to_doc(da),
      Elem::NonTerm(nt) => nt.to_doc(da),
      Elem::Empty => FirstTerminal::Empty.to_doc(da),
    }
  }
}

impl std::fmt::Debug for Elem {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(term) => write!(fmt, "{:?}", term.name()),
      Elem::NonTerm(nt) => write!(fmt, "<{:?}>", nt.name()),
      Elem::Empty => fmt.write_str(EMPTY_MARKER),
    }
  }
}

/// The body of a production: a non-empty sequence of elements.
///
/// A production never has zero elements; the empty alternative is
/// `[Elem::Empty]`. An empty marker followed by other elements is kept, so
/// `ε · A` still starts with `ε` and never with `A`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production(Vec<Elem>);

impl Production {
  /// Creates a production from a sequence of elements. A sequence with no
  /// elements becomes the empty alternative.
  pub fn new(elems: impl IntoIterator<Item = Elem>) -> Self {
    let elems: Vec<_> = elems.into_iter().collect();
    if elems.is_empty() {
      Production::empty()
    } else {
      Production(elems)
    }
  }

  /// The empty alternative.
  pub fn empty() -> Self {
    Production(vec![Elem::Empty])
  }

  /// Returns `self · suffix`.
  pub fn concat(&self, suffix: &[Elem]) -> Self {
    Production::new(self.0.iter().chain(suffix).cloned())
  }

  pub fn elements(&self) -> &[Elem] {
    &self.0
  }

  pub fn first_elem(&self) -> &Elem {
    &self.0[0]
  }

  /// Returns the elements after the first one.
  pub fn rest(&self) -> &[Elem] {
    &self.0[1..]
  }

  pub fn starts_with_nonterm(&self, nt: &NonTerminal) -> bool {
    self.first_elem().as_nonterm() == Some(nt)
  }

  /// Returns true if this is the empty alternative.
  pub fn is_empty_alt(&self) -> bool {
    self.0.len() == 1 && self.0[0].is_empty_marker()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  fn classify(self, heads: &BTreeSet<Name>) -> Self {
    Production(self.0.into_iter().map(|e| e.classify(heads)).collect())
  }
}

impl std::fmt::Display for Production {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    for (i, elem) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      elem.fmt(f)?;
    }
    Ok(())
  }
}

impl std::fmt::Debug for Production {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_list().entries(self.0.iter()).finish()
  }
}

impl ToDoc for Production {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.intersperse(self.0.iter().map(|e| e.to_doc(da)), da.text(" "))
  }
}

/// A rule: a head nonterminal and its ordered alternatives.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule {
  head: NonTerminal,
  prods: Vec<Production>,
}

impl Rule {
  pub(crate) fn new(head: NonTerminal, prods: Vec<Production>) -> Self {
    Rule { head, prods }
  }

  /// Returns the head nonterminal.
  pub fn head(&self) -> &NonTerminal {
    &self.head
  }

  /// Returns the productions of this rule, in order.
  pub fn prods(&self) -> &[Production] {
    &self.prods
  }

  /// Returns an iterator over the productions of this rule with their head.
  pub fn prod_refs(&self) -> impl Iterator<Item = Prod<'_>> {
    let head = &self.head;
    self.prods.iter().map(move |body| Prod { head, body })
  }
}

impl ToDoc for Rule {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    self
      .head
      .to_doc(da)
      .append(da.text(" ->"))
      .append(
        da.line()
          .append(da.intersperse(
            self.prods.iter().map(|prod| prod.to_doc(da)),
            da.line().append(da.text("| ")),
          ))
          .nest(2),
      )
      .group()
  }
}

/// A single production in a grammar, with the head it belongs to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Prod<'a> {
  head: &'a NonTerminal,
  body: &'a Production,
}

impl<'a> Prod<'a> {
  /// Returns the head of this production.
  pub fn head(&self) -> &'a NonTerminal {
    self.head
  }

  /// Returns the body of this production.
  pub fn body(&self) -> &'a Production {
    self.body
  }

  /// Returns the elements of this production.
  pub fn elements(&self) -> &'a [Elem] {
    self.body.elements()
  }
}

impl std::fmt::Display for Prod<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{} -> {}", self.head, self.body)
  }
}

impl std::fmt::Debug for Prod<'_> {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = fmt.debug_struct("Prod");
    dbg_struct.field("head", self.head());
    dbg_struct.field("elems", self.body);
    dbg_struct.finish()
  }
}

/// A context-free grammar snapshot.
///
/// The grammar maps each defined nonterminal to its rule, and iterates rules
/// in lexicographic order of their heads. Every element of every production
/// is classified against the heads of this snapshot: a label is a
/// nonterminal exactly when it has a rule here. Grammars are built through
/// [`build`](builder::build), which performs that classification.
///
/// Grammars are read-only; transformations produce new snapshots.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Grammar {
  rule_set: BTreeMap<NonTerminal, Rule>,
}

impl std::fmt::Debug for Grammar {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = f.debug_struct("Grammar");
    dbg_struct.field("Terms", &self.terminals());
    dbg_struct.field("NonTerms", &self.nonterminals().collect::<Vec<_>>());
    dbg_struct.field("Rules", &self.rules().collect::<Vec<_>>());
    dbg_struct.finish()
  }
}

impl Grammar {
  fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
    let rules: Vec<Rule> = rules.into_iter().collect();
    let heads: BTreeSet<Name> =
      rules.iter().map(|r| r.head().name().clone()).collect();

    Grammar {
      rule_set: rules
        .into_iter()
        .map(|Rule { head, prods }| {
          let prods = prods.into_iter().map(|p| p.classify(&heads)).collect();
          (head.clone(), Rule { head, prods })
        })
        .collect(),
    }
  }

  /// Returns true if `label` is a defined nonterminal of this snapshot.
  pub fn is_nonterminal(&self, label: &str) -> bool {
    self.rule_set.contains_key(&NonTerminal::new(label))
  }

  /// Returns an iterator over all of the rules for this grammar, ordered by
  /// head.
  pub fn rules(&self) -> impl Iterator<Item = &Rule> {
    self.rule_set.values()
  }

  /// Gets an iterator over all productions in the grammar.
  pub fn prods(&self) -> impl Iterator<Item = Prod<'_>> {
    self.rules().flat_map(|rule| rule.prod_refs())
  }

  pub fn num_prods(&self) -> usize {
    self.rules().map(|r| r.prods().len()).sum()
  }

  /// Gets the rule that has the given nonterminal as a head.
  pub fn get_rule(&self, nt: &NonTerminal) -> Option<&Rule> {
    self.rule_set.get(nt)
  }

  /// Returns the defined nonterminals, in order.
  pub fn nonterminals(&self) -> impl Iterator<Item = &NonTerminal> {
    self.rule_set.keys()
  }

  /// Returns every terminal referenced by some production.
  pub fn terminals(&self) -> BTreeSet<&Terminal> {
    self
      .prods()
      .flat_map(|p| p.elements())
      .filter_map(|e| e.as_term())
      .collect()
  }

  /// Returns every label used in this grammar, heads and elements alike.
  pub fn labels(&self) -> BTreeSet<Name> {
    self
      .nonterminals()
      .map(|nt| nt.name().clone())
      .chain(
        self
          .prods()
          .flat_map(|p| p.elements())
          .filter_map(|e| e.label().cloned()),
      )
      .collect()
  }

  /// Returns the start nonterminal by convention: `S` if it is defined,
  /// otherwise the lexicographically smallest nonterminal.
  pub fn start_nt(&self) -> Option<&NonTerminal> {
    self
      .rule_set
      .get_key_value(&NonTerminal::new(CONVENTIONAL_START))
      .map(|(k, _)| k)
      .or_else(|| self.rule_set.keys().next())
  }

  /// Returns the nonterminals that are the first element of some production
  /// of `nt`.
  pub fn left_corners(&self, nt: &NonTerminal) -> BTreeSet<&NonTerminal> {
    self
      .get_rule(nt)
      .into_iter()
      .flat_map(|rule| rule.prods())
      .filter_map(|p| p.first_elem().as_nonterm())
      .collect()
  }

  /// Returns true if `nt` can derive a sequence beginning with itself by
  /// following first elements, directly or through other nonterminals.
  pub fn is_left_recursive(&self, nt: &NonTerminal) -> bool {
    breadth_first_search(self.left_corners(nt), |next| {
      self.left_corners(next)
    })
    .contains(nt)
  }

  /// Returns every left-recursive nonterminal.
  pub fn left_recursive_nts(&self) -> BTreeSet<&NonTerminal> {
    self
      .nonterminals()
      .filter(|nt| self.is_left_recursive(nt))
      .collect()
  }

  pub fn to_pretty(&self, width: usize) -> String {
    crate::utils::to_pretty_string(self, width)
  }
}

impl ToDoc for Grammar {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.concat(
      self
        .rule_set
        .values()
        .map(|rule| rule.to_doc(da).append(da.hardline())),
    )
  }
}

#[cfg(test)]
mod test {
  use super::builder::build;
  use super::*;

  fn sample() -> Grammar {
    build(|gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("A").add_symbol("x");
        });
      })
      .add_rule("A", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("S").add_symbol("y");
        })
        .add_prod(|pb| {
          pb.add_empty();
        });
      });
    })
  }

  #[test]
  fn test_production_keeps_leading_empty() {
    assert!(Production::new(vec![]).is_empty_alt());
    assert!(Production::empty().concat(&[]).is_empty_alt());

    let a = NonTerminal::new("A");
    let p = Production::empty().concat(&[Elem::NonTerm(a.clone())]);
    assert_eq!(p.elements(), &[Elem::Empty, Elem::NonTerm(a.clone())]);
    assert!(!p.starts_with_nonterm(&a));
    assert!(!p.is_empty_alt());
  }

  #[test]
  fn test_classification_is_membership() {
    let g = sample();
    assert!(g.is_nonterminal("S"));
    assert!(g.is_nonterminal("A"));
    assert!(!g.is_nonterminal("x"));
    let s_rule = g.get_rule(&NonTerminal::new("S")).unwrap();
    assert_eq!(
      s_rule.prods()[0].elements(),
      &[
        Elem::NonTerm(NonTerminal::new("A")),
        Elem::Term(Terminal::new("x"))
      ]
    );
  }

  #[test]
  fn test_start_prefers_s() {
    let g = sample();
    assert_eq!(g.start_nt(), Some(&NonTerminal::new("S")));
  }

  #[test]
  fn test_start_falls_back_to_smallest() {
    let g = build(|gb| {
      gb.add_rule("Expr", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("Atom");
        });
      })
      .add_rule("Atom", |rb| {
        rb.add_prod(|pb| {
          pb.add_symbol("num");
        });
      });
    });
    assert_eq!(g.start_nt(), Some(&NonTerminal::new("Atom")));
    assert_eq!(Grammar::default().start_nt(), None);
  }

  #[test]
  fn test_indirect_left_recursion_detected() {
    let g = sample();
    assert!(g.is_left_recursive(&NonTerminal::new("S")));
    assert!(g.is_left_recursive(&NonTerminal::new("A")));
    assert_eq!(g.left_recursive_nts().len(), 2);
  }

  #[test]
  fn test_labels_and_terminals() {
    let g = sample();
    let labels: Vec<_> =
      g.labels().iter().map(|n| n.str().to_string()).collect();
    assert_eq!(labels, vec!["A", "S", "x", "y"]);
    assert_eq!(g.terminals().len(), 2);
    assert_eq!(g.num_prods(), 3);
  }

  #[test]
  fn test_pretty_print() {
    let g = sample();
    assert_eq!(g.to_pretty(80), "A -> S \"y\" | \"ε\"\nS -> A \"x\"\n");
  }
}
