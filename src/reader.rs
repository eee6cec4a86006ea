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

//! Reading grammars from their text form.
//!
//! A grammar file holds one rule per line:
//!
//! ```text
//! E -> T E'
//! E' -> "+" T E' | ε
//! ```
//!
//! The left-hand side is the text before the first `->`, trimmed. The
//! right-hand side is split into alternatives on `|`, and each alternative
//! into symbols on whitespace. A double-quoted span is part of one symbol
//! and may contain whitespace or `|`. Symbols are not marked as terminal or
//! nonterminal here: a symbol is a nonterminal if and only if some line
//! defines it.
//!
//! Lines without `->` are ignored, and a head that appears on several lines
//! collects the alternatives of all of them.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use crate::grammar::{build, Grammar, GrammarBuilder, EMPTY_MARKER};

/// Spellings of the empty-derivation marker, besides [`EMPTY_MARKER`]. The
/// second one is `ε` encoded as UTF-8 and decoded as code page 437.
const EMPTY_MARKER_ALIASES: &[&str] = &["╬╡"];

const ARROW: &str = "->";
const ALT_SEPARATOR: char = '|';
const QUOTE: char = '"';

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
  #[error("cannot read grammar file {path}: {source}", path = .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Reads and parses the grammar file at `path`.
pub fn read_grammar_file(path: &Path) -> Result<Grammar, ReadError> {
  let text = fs::read_to_string(path).map_err(|source| ReadError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  log::info!("Read {} bytes from {}.", text.len(), path.display());
  Ok(parse_grammar(&text))
}

/// Parses a grammar from its text form. Parsing never fails: text that is
/// not a rule is skipped.
pub fn parse_grammar(text: &str) -> Grammar {
  build(|gb| {
    for (line_no, line) in text.lines().enumerate() {
      parse_line(gb, line_no + 1, line);
    }
  })
}

fn parse_line(gb: &mut GrammarBuilder, line_no: usize, line: &str) {
  let (lhs, rhs) = match line.find(ARROW) {
    Some(pos) => (line[..pos].trim(), &line[pos + ARROW.len()..]),
    None => {
      if !line.trim().is_empty() {
        log::debug!("Line {}: no `{}`, skipping.", line_no, ARROW);
      }
      return;
    }
  };

  if lhs.is_empty() {
    log::warn!("Line {}: rule without a head, skipping.", line_no);
    return;
  }

  let alternatives: Vec<Vec<String>> = split_alternatives(rhs)
    .into_iter()
    .filter(|alt| !alt.trim().is_empty())
    .map(tokenize)
    .collect();
  if alternatives.is_empty() {
    log::debug!("Line {}: {} has no alternatives.", line_no, lhs);
    return;
  }

  gb.add_rule(lhs, |rb| {
    for symbols in &alternatives {
      rb.add_prod(|pb| {
        for symbol in symbols {
          if is_empty_marker(symbol) {
            pb.add_empty();
          } else {
            pb.add_symbol(symbol);
          }
        }
      });
    }
  });
}

fn is_empty_marker(symbol: &str) -> bool {
  symbol == EMPTY_MARKER || EMPTY_MARKER_ALIASES.contains(&symbol)
}

/// Splits `rhs` on every separator outside a quoted span.
fn split_alternatives(rhs: &str) -> Vec<&str> {
  let mut alts = Vec::new();
  let mut in_quotes = false;
  let mut start = 0;
  for (i, c) in rhs.char_indices() {
    match c {
      QUOTE => in_quotes = !in_quotes,
      ALT_SEPARATOR if !in_quotes => {
        alts.push(&rhs[start..i]);
        start = i + c.len_utf8();
      }
      _ => {}
    }
  }
  alts.push(&rhs[start..]);
  alts
}

/// Splits one alternative into symbols.
///
/// Quotes are removed; the text between them is copied into the current
/// symbol as is. A quoted span with nothing in it produces no symbol.
fn tokenize(alt: &str) -> Vec<String> {
  let mut symbols = Vec::new();
  let mut symbol = String::new();
  let mut in_quotes = false;
  for c in alt.chars() {
    if c == QUOTE {
      if in_quotes && !symbol.is_empty() {
        symbols.push(std::mem::take(&mut symbol));
      }
      in_quotes = !in_quotes;
    } else if c.is_whitespace() && !in_quotes {
      if !symbol.is_empty() {
        symbols.push(std::mem::take(&mut symbol));
      }
    } else {
      symbol.push(c);
    }
  }

  if !symbol.is_empty() {
    symbols.push(symbol);
  }
  symbols
}
