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

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use ll1kit::{
  grammar::dot::render_left_corners,
  pipeline::Pipeline,
  reader::read_grammar_file,
  report::{render_conflicts, render_report, ReportOptions},
};

/// Left-factors a grammar, removes its left recursion, and prints its FIRST
/// and FOLLOW sets and LL(1) parse table.
#[derive(Parser, Debug)]
#[command(name = "ll1kit", version)]
struct Args {
  /// The grammar file, one `LHS -> ALT | ALT` rule per line.
  #[arg(default_value = "grammar.txt")]
  grammar: PathBuf,

  /// Page width used when printing grammars.
  #[arg(long, default_value_t = 80)]
  width: usize,

  /// Minimum width of a parse table column.
  #[arg(long, default_value_t = 20)]
  min_column_width: usize,

  /// Write the left-corner graph of the final grammar to this file as DOT.
  #[arg(long)]
  dot: Option<PathBuf>,

  /// Only print the conflicting parse table cells.
  #[arg(long)]
  conflicts_only: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  env_logger::Builder::from_default_env()
    .format_timestamp(None)
    .init();

  let grammar = read_grammar_file(&args.grammar)?;
  let output = Pipeline::new().run(grammar);

  let options = ReportOptions {
    page_width: args.width,
    min_column_width: args.min_column_width,
    ..ReportOptions::default()
  };

  if args.conflicts_only {
    print!("{}", render_conflicts(&output.table));
  } else {
    println!("{}", render_report(&output, &options));
  }

  if let Some(path) = &args.dot {
    let file = File::create(path)
      .with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    render_left_corners(&output.left_rec_free, &mut out)
      .and_then(|()| out.flush())
      .with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("Wrote left-corner graph to {}.", path.display());
  }

  Ok(())
}
