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

use crate::utils::{Name, ToDoc};

/// The canonical spelling of the empty-derivation marker.
pub const EMPTY_MARKER: &str = "ε";

/// The spelling of the end-of-input marker in FOLLOW sets and table columns.
pub const END_OF_INPUT: &str = "$";

fn quoted_doc<'a, DA: pretty::DocAllocator<'a>>(
  da: &'a DA,
  text: &str,
) -> pretty::DocBuilder<'a, DA> {
  da.text(format!("\"{}\"", text))
}

/// A terminal element.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Terminal(Name);

impl Terminal {
  pub fn new(s: &str) -> Self {
    Terminal(Name::new(s))
  }

  pub fn name(&self) -> &Name {
    &self.0
  }
}

impl From<Name> for Terminal {
  fn from(name: Name) -> Self {
    Terminal(name)
  }
}

impl std::fmt::Display for Terminal {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "\"{}\"", self.0)
  }
}

impl ToDoc for Terminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    quoted_doc(da, self.0.str())
  }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NonTerminal(Name);

impl NonTerminal {
  pub fn new(s: &str) -> Self {
    NonTerminal(Name::new(s))
  }

  pub fn name(&self) -> &Name {
    &self.0
  }
}

impl From<Name> for NonTerminal {
  fn from(name: Name) -> Self {
    NonTerminal(name)
  }
}

impl std::fmt::Display for NonTerminal {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Display::fmt(&self.0, f)
  }
}

impl ToDoc for NonTerminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.text(self.0.str().to_string())
  }
}

/// A member of a FIRST set: a terminal, or the empty-derivation marker.
///
/// `Empty` sorts after every terminal.
#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Debug)]
pub enum FirstTerminal {
  Term(Terminal),
  Empty,
}

impl std::fmt::Display for FirstTerminal {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      FirstTerminal::Term(t) => t.fmt(f),
      FirstTerminal::Empty => write!(f, "\"{}\"", EMPTY_MARKER),
    }
  }
}

impl ToDoc for FirstTerminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      FirstTerminal::Term(t) => t.to_doc(da),
      FirstTerminal::Empty => quoted_doc(da, EMPTY_MARKER),
    }
  }
}

/// A member of a FOLLOW set and a column of the parse table: a terminal, or
/// the end of the input stream.
///
/// `EndOfStream` sorts before every terminal.
#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Debug)]
pub enum StreamTerminal {
  EndOfStream,
  Term(Terminal),
}

impl StreamTerminal {
  pub fn has_kind(&self, kind: &Terminal) -> bool {
    match self {
      StreamTerminal::Term(t) => t == kind,
      StreamTerminal::EndOfStream => false,
    }
  }

  pub fn is_eos(&self) -> bool {
    matches!(self, StreamTerminal::EndOfStream)
  }

  /// The bare label of this lookahead, without quoting.
  pub fn label(&self) -> &str {
    match self {
      StreamTerminal::EndOfStream => END_OF_INPUT,
      StreamTerminal::Term(t) => t.name().str(),
    }
  }
}

impl From<Terminal> for StreamTerminal {
  fn from(t: Terminal) -> Self {
    StreamTerminal::Term(t)
  }
}

impl std::fmt::Display for StreamTerminal {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "\"{}\"", self.label())
  }
}

impl ToDoc for StreamTerminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    quoted_doc(da, self.label())
  }
}
