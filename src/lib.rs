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

//! Tools for preparing context-free grammars for predictive parsing.
//!
//! A grammar goes through a fixed [`pipeline`]: it is left-factored, its left
//! recursion is removed, and the FIRST sets, FOLLOW sets and LL(1) parse table
//! of the result are computed. Every intermediate grammar is kept.
//!
//! ```rust
//! use ll1kit::{pipeline::Pipeline, reader::parse_grammar};
//!
//! let g = parse_grammar("E -> E \"+\" n | n\n");
//! let output = Pipeline::new().run(g);
//! assert!(output.left_rec_free.left_recursive_nts().is_empty());
//! assert!(output.table.is_ll1());
//! ```

#[macro_use]
extern crate derivative;

pub mod grammar;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod utils;
