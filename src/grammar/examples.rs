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

//! Sample grammars, used by tests and documentation.

use crate::grammar::{build, Grammar, GrammarBuilder, EMPTY_MARKER};

/// Adds one rule whose alternatives are whitespace-separated labels.
fn add_alts(gb: &mut GrammarBuilder, head: &str, alts: &[&str]) {
  gb.add_rule(head, |rb| {
    for alt in alts {
      rb.add_prod(|pb| {
        for label in alt.split_whitespace() {
          if label == EMPTY_MARKER {
            pb.add_empty();
          } else {
            pb.add_symbol(label);
          }
        }
      });
    }
  });
}

/// ```text
/// S -> A B | A c
/// A -> a | a A
/// ```
pub fn make_round_trip() -> Grammar {
  build(|gb| {
    add_alts(gb, "S", &["A B", "A c"]);
    add_alts(gb, "A", &["a", "a A"]);
  })
}

/// The classic left-recursive expression grammar.
pub fn make_expr() -> Grammar {
  build(|gb| {
    gb.add_rule("E", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("E").add_term("+").add_nonterm("T");
      })
      .add_prod(|pb| {
        pb.add_nonterm("T");
      });
    })
    .add_rule("T", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("T").add_term("*").add_nonterm("F");
      })
      .add_prod(|pb| {
        pb.add_nonterm("F");
      });
    })
    .add_rule("F", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("(").add_nonterm("E").add_term(")");
      })
      .add_prod(|pb| {
        pb.add_term("id");
      });
    });
  })
}

/// The expression grammar rewritten by hand into LL(1) form.
pub fn make_expr_ll1() -> Grammar {
  build(|gb| {
    add_alts(gb, "E", &["T E'"]);
    add_alts(gb, "E'", &["+ T E'", "ε"]);
    add_alts(gb, "T", &["F T'"]);
    add_alts(gb, "T'", &["* F T'", "ε"]);
    add_alts(gb, "F", &["( E )", "id"]);
  })
}

/// A grammar with indirect left recursion through `S` and `A`.
pub fn make_indirect() -> Grammar {
  build(|gb| {
    add_alts(gb, "S", &["A a", "b"]);
    add_alts(gb, "A", &["A c", "S d", "ε"]);
  })
}

/// `A -> a | a`
pub fn make_duplicate() -> Grammar {
  build(|gb| {
    add_alts(gb, "A", &["a", "a"]);
  })
}

/// `S -> X`, where `X` has no rule.
pub fn make_undefined_symbol() -> Grammar {
  build(|gb| {
    add_alts(gb, "S", &["X"]);
  })
}

/// A grammar with no nonterminal named `S`.
pub fn make_no_conventional_start() -> Grammar {
  build(|gb| {
    add_alts(gb, "Y", &["y"]);
    add_alts(gb, "X", &["Y x"]);
  })
}

pub fn make_nested_prefixes() -> Grammar {
  build(|gb| {
    add_alts(gb, "A", &["a b c", "a b d", "a e"]);
  })
}

pub fn make_interleaved() -> Grammar {
  build(|gb| {
    add_alts(gb, "A", &["x a", "y", "x b"]);
  })
}

/// ```text
/// S -> A B c
/// A -> a | ε
/// B -> b | ε
/// ```
pub fn make_nullable_chain() -> Grammar {
  build(|gb| {
    add_alts(gb, "S", &["A B c"]);
    add_alts(gb, "A", &["a", "ε"]);
    add_alts(gb, "B", &["b", "ε"]);
  })
}

/// Returns every sample grammar.
pub fn all() -> Vec<Grammar> {
  vec![
    make_round_trip(),
    make_expr(),
    make_expr_ll1(),
    make_indirect(),
    make_duplicate(),
    make_undefined_symbol(),
    make_no_conventional_start(),
    make_nested_prefixes(),
    make_interleaved(),
    make_nullable_chain(),
  ]
}
