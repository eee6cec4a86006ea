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

//! Debug formatting of collections in log output.

use std::fmt::{Debug, Formatter, Result};

#[derive(Clone, Copy)]
enum Brackets {
  List,
  Set,
}

#[derive(Clone)]
struct Formatted<C> {
  items: C,
  brackets: Brackets,
}

impl<C> Debug for Formatted<C>
where
  C: IntoIterator + Clone,
  C::Item: Debug,
{
  fn fmt(&self, fmt: &mut Formatter) -> Result {
    let items = self.items.clone();
    match self.brackets {
      Brackets::List => fmt.debug_list().entries(items).finish(),
      Brackets::Set => fmt.debug_set().entries(items).finish(),
    }
  }
}

/// Formats `items` as `[a, b]`.
pub fn list_fmt<C>(items: C) -> impl Debug
where
  C: IntoIterator + Clone,
  C::Item: Debug,
{
  Formatted {
    items,
    brackets: Brackets::List,
  }
}

/// Formats `items` as `{a, b}`.
pub fn set_fmt<C>(items: C) -> impl Debug
where
  C: IntoIterator + Clone,
  C::Item: Debug,
{
  Formatted {
    items,
    brackets: Brackets::Set,
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_brackets() {
    assert_eq!(format!("{:?}", list_fmt(&[1, 2])), "[1, 2]");
    assert_eq!(format!("{:?}", set_fmt(vec!["a"])), "{\"a\"}");
  }
}
