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

use std::collections::BTreeMap;

use super::{Elem, Grammar, NonTerminal, Production, Rule, Terminal};

/// A helper trait to allow builder methods to either take a type `T`, or a
/// reference to `T` if it is clonable.
pub trait BuilderInto<T> {
  /// Consumes self and produces a value of type `T`.
  fn builder_into(self) -> T;
}

impl<T> BuilderInto<T> for T {
  fn builder_into(self) -> T {
    self
  }
}

impl<'a, T> BuilderInto<T> for &'a T
where
  T: Clone,
{
  fn builder_into(self) -> T {
    self.clone()
  }
}

impl BuilderInto<NonTerminal> for &'_ str {
  fn builder_into(self) -> NonTerminal {
    NonTerminal::new(self)
  }
}

impl BuilderInto<Terminal> for &'_ str {
  fn builder_into(self) -> Terminal {
    Terminal::new(self)
  }
}

pub struct ProductionBuilder {
  elems: Vec<Elem>,
}

impl ProductionBuilder {
  fn new() -> Self {
    ProductionBuilder { elems: Vec::new() }
  }

  fn build(self) -> Production {
    Production::new(self.elems)
  }

  pub fn add_term(&mut self, term: impl BuilderInto<Terminal>) -> &mut Self {
    self.elems.push(Elem::Term(term.builder_into()));
    self
  }

  pub fn add_nonterm(
    &mut self,
    nonterm: impl BuilderInto<NonTerminal>,
  ) -> &mut Self {
    self.elems.push(Elem::NonTerm(nonterm.builder_into()));
    self
  }

  /// Adds a symbol whose kind is decided when the grammar is built.
  pub fn add_symbol(&mut self, label: &str) -> &mut Self {
    self.elems.push(Elem::Term(Terminal::new(label)));
    self
  }

  pub fn add_empty(&mut self) -> &mut Self {
    self.elems.push(Elem::Empty);
    self
  }
}

// ----------------

pub struct RuleBuilder {
  prods: Vec<Production>,
}

impl RuleBuilder {
  fn new() -> Self {
    RuleBuilder { prods: Vec::new() }
  }

  pub fn add_prod(
    &mut self,
    build_fn: impl FnOnce(&mut ProductionBuilder),
  ) -> &mut Self {
    let mut builder = ProductionBuilder::new();
    build_fn(&mut builder);
    self.prods.push(builder.build());
    self
  }

  pub fn add_prod_with_elems(
    &mut self,
    elems: impl IntoIterator<Item = Elem>,
  ) -> &mut Self {
    self.prods.push(Production::new(elems));
    self
  }

  pub fn add_production(
    &mut self,
    prod: impl BuilderInto<Production>,
  ) -> &mut Self {
    self.prods.push(prod.builder_into());
    self
  }
}

// ----------------

pub struct GrammarBuilder {
  rules: BTreeMap<NonTerminal, Vec<Production>>,
}

impl GrammarBuilder {
  fn new() -> Self {
    GrammarBuilder {
      rules: BTreeMap::new(),
    }
  }

  fn build(self) -> Grammar {
    let GrammarBuilder { rules } = self;
    Grammar::new(
      rules
        .into_iter()
        .map(|(head, prods)| Rule::new(head, prods)),
    )
  }

  /// Adds productions to the rule of `head`, creating the rule if needed.
  ///
  /// Adding to the same head twice appends to its productions.
  pub fn add_rule<F>(
    &mut self,
    head: impl BuilderInto<NonTerminal>,
    build_fn: F,
  ) -> &mut Self
  where
    F: FnOnce(&mut RuleBuilder),
  {
    let mut rule_builder = RuleBuilder::new();
    build_fn(&mut rule_builder);
    self
      .rules
      .entry(head.builder_into())
      .or_default()
      .extend(rule_builder.prods);
    self
  }
}

/// Builds a grammar using a builder function.
///
/// Example:
///
/// ```rust
/// # use ll1kit::grammar::build;
/// let g = build(|gb| {
///   gb.add_rule("E", |rb| {
///     rb.add_prod(|pb| {
///       pb.add_symbol("E").add_symbol("+").add_symbol("n");
///     })
///     .add_prod(|pb| {
///       pb.add_symbol("n");
///     });
///   });
/// });
/// assert!(g.is_nonterminal("E"));
/// assert!(!g.is_nonterminal("n"));
/// ```
///
/// Building is where every element is classified: after all rules are
/// known, any element whose label is a rule head becomes a nonterminal, and
/// every other label becomes a terminal, regardless of how it was added.
pub fn build(build_fn: impl FnOnce(&mut GrammarBuilder)) -> Grammar {
  let mut builder = GrammarBuilder::new();
  build_fn(&mut builder);
  builder.build()
}
