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

//! Generation of helper nonterminal names.
//!
//! Every transformation that introduces a nonterminal asks the same
//! [`FreshNames`] for it. A name is built as `<base>'<tag><n>`, where `tag`
//! identifies the transformation and `n` comes from a single counter shared
//! by all transformations, so two stages can never mint the same name.

use std::collections::BTreeSet;

use crate::grammar::NonTerminal;
use crate::utils::Name;

/// The transformation that created a helper nonterminal.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Origin {
  LeftFactor,
  LeftRecursion,
}

impl Origin {
  pub fn tag(self) -> &'static str {
    match self {
      Origin::LeftFactor => "f",
      Origin::LeftRecursion => "r",
    }
  }
}

/// A generator of nonterminal names that are unique for one pipeline run.
#[derive(Clone, Debug, Default)]
pub struct FreshNames {
  counter: usize,
  minted: BTreeSet<Name>,
}

impl FreshNames {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a new nonterminal derived from `base`, distinct from every
  /// label in `in_use` and from every name this generator minted before.
  pub fn fresh(
    &mut self,
    base: &NonTerminal,
    origin: Origin,
    in_use: &BTreeSet<Name>,
  ) -> NonTerminal {
    loop {
      self.counter += 1;
      let candidate =
        Name::new(&format!("{}'{}{}", base, origin.tag(), self.counter));
      if in_use.contains(&candidate) || self.minted.contains(&candidate) {
        log::trace!("Skipping fresh name {} already in use.", candidate);
        continue;
      }

      self.minted.insert(candidate.clone());
      return NonTerminal::from(candidate);
    }
  }

  /// Returns the number of names minted so far.
  pub fn minted_count(&self) -> usize {
    self.minted.len()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_names_are_tagged_and_counted() {
    let mut names = FreshNames::new();
    let a = NonTerminal::new("A");
    let in_use = BTreeSet::new();
    assert_eq!(
      names.fresh(&a, Origin::LeftFactor, &in_use),
      NonTerminal::new("A'f1")
    );
    assert_eq!(
      names.fresh(&a, Origin::LeftRecursion, &in_use),
      NonTerminal::new("A'r2")
    );
    assert_eq!(names.minted_count(), 2);
  }

  #[test]
  fn test_skips_labels_in_use() {
    let mut names = FreshNames::new();
    let in_use = vec![Name::new("S'f1")].into_iter().collect();
    assert_eq!(
      names.fresh(&NonTerminal::new("S"), Origin::LeftFactor, &in_use),
      NonTerminal::new("S'f2")
    );
  }
}
