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

//! A pass is a type of query over the grammar that may be depended on by
//! other passes. This allows us to build each different type of pass in
//! isolation, and then combine them with automatic dependency resolution.
//!
//! ```rust
//! # use ll1kit::grammar::{build, passes::{PassContext, table::ParseTable}};
//! let g = build(|gb| {
//!   gb.add_rule("S", |rb| {
//!     rb.add_prod(|pb| {
//!       pb.add_symbol("a");
//!     });
//!   });
//! });
//! let ctx = PassContext::new(&g);
//! assert!(ctx.get_pass::<ParseTable>().is_ll1());
//! ```

pub mod firsts;
pub mod follows;
pub mod table;

use std::{
  any::{Any, TypeId},
  cell::RefCell,
  collections::BTreeMap,
  rc::Rc,
};

use super::Grammar;

/// A unique placeholder type to represent the value of a pass that hasn't
/// completed.
///
/// This helps us avoid accidental infinite recursion in the case where a pass
/// depends on itself (directly or indirectly).
struct NoCurrentValue;

/// A query over a grammar whose result is computed once per context.
pub trait Pass: Any + Sized + 'static {
  fn run_pass(ctx: &PassContext) -> Self;
}

/// A map from passes to their associated results.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct PassContext<'a> {
  grammar: &'a Grammar,
  #[derivative(Debug = "ignore")]
  passes: RefCell<BTreeMap<TypeId, Rc<dyn Any + 'static>>>,
}

impl<'a> PassContext<'a> {
  /// Creates a new pass context, where passes derive from the given grammar
  /// and other passes.
  pub fn new(grammar: &'a Grammar) -> Self {
    PassContext {
      grammar,
      passes: RefCell::new(BTreeMap::new()),
    }
  }

  /// Returns the underlying grammar.
  pub fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  /// Returns the result of the given pass. Computes it if it hasn't been
  /// computed yet. Passes can depend on other passes.
  ///
  /// # Panics
  ///
  /// Panics if a pass depends on itself, directly or indirectly.
  pub fn get_pass<P: Pass>(&self) -> Rc<P> {
    let pass_type = TypeId::of::<P>();

    let existing = self.passes.borrow().get(&pass_type).cloned();
    let any_pass_ref = match existing {
      Some(pass) => {
        if pass.downcast_ref::<NoCurrentValue>().is_some() {
          panic!("Detected recursive loop in pass dependencies.")
        }
        pass
      }
      None => {
        // Mark the pass as in process before running it.
        self
          .passes
          .borrow_mut()
          .insert(pass_type, Rc::new(NoCurrentValue));
        let value: Rc<dyn Any> = Rc::new(P::run_pass(self));
        self.passes.borrow_mut().insert(pass_type, value.clone());
        value
      }
    };

    match any_pass_ref.downcast::<P>() {
      Ok(pass) => pass,
      Err(_) => unreachable!("pass results are keyed by their type"),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;
  use std::cell::Cell;

  thread_local! {
    static RUNS: Cell<usize> = Cell::new(0);
  }

  struct CountingPass(usize);

  impl Pass for CountingPass {
    fn run_pass(ctx: &PassContext) -> Self {
      RUNS.with(|runs| runs.set(runs.get() + 1));
      CountingPass(ctx.grammar().num_prods())
    }
  }

  struct SelfDependent;

  impl Pass for SelfDependent {
    fn run_pass(ctx: &PassContext) -> Self {
      ctx.get_pass::<SelfDependent>();
      SelfDependent
    }
  }

  #[test]
  fn test_pass_is_memoized() {
    let g = examples::make_round_trip();
    let ctx = PassContext::new(&g);
    let first = ctx.get_pass::<CountingPass>();
    let second = ctx.get_pass::<CountingPass>();
    assert_eq!(first.0, 4);
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(RUNS.with(|runs| runs.get()), 1);
  }

  #[test]
  #[should_panic(expected = "recursive loop")]
  fn test_recursive_pass_panics() {
    let g = examples::make_round_trip();
    PassContext::new(&g).get_pass::<SelfDependent>();
  }
}
