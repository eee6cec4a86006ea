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

//! Export of the left-corner graph of a grammar as Graphviz DOT.
//!
//! There is one node per nonterminal, and an edge `A -> B` whenever some
//! production of `A` starts with `B`. A nonterminal is left-recursive
//! exactly when it lies on a cycle of this graph.

use std::{borrow::Cow, io};

use crate::grammar::{Grammar, NonTerminal};

type Node = usize;
type Edge = (usize, usize);

struct LeftCornerGraph<'g> {
  nodes: Vec<&'g NonTerminal>,
  edges: Vec<Edge>,
}

impl<'g> LeftCornerGraph<'g> {
  fn new(g: &'g Grammar) -> Self {
    let nodes: Vec<&NonTerminal> = g.nonterminals().collect();
    let index_of = |nt: &NonTerminal| nodes.iter().position(|n| *n == nt);

    let edges = nodes
      .iter()
      .enumerate()
      .flat_map(|(src, nt)| {
        g.left_corners(nt)
          .into_iter()
          .filter_map(|corner| index_of(corner))
          .map(move |dst| (src, dst))
          .collect::<Vec<_>>()
      })
      .collect();

    LeftCornerGraph { nodes, edges }
  }
}

impl<'a, 'g> dot::Labeller<'a, Node, Edge> for LeftCornerGraph<'g> {
  fn graph_id(&'a self) -> dot::Id<'a> {
    match dot::Id::new("left_corners") {
      Ok(id) => id,
      Err(()) => unreachable!("graph id is a valid identifier"),
    }
  }

  fn node_id(&'a self, n: &Node) -> dot::Id<'a> {
    match dot::Id::new(format!("N{}", n)) {
      Ok(id) => id,
      Err(()) => unreachable!("node ids are valid identifiers"),
    }
  }

  fn node_label(&'a self, n: &Node) -> dot::LabelText<'a> {
    dot::LabelText::LabelStr(Cow::Owned(self.nodes[*n].to_string()))
  }
}

impl<'a, 'g> dot::GraphWalk<'a, Node, Edge> for LeftCornerGraph<'g> {
  fn nodes(&'a self) -> dot::Nodes<'a, Node> {
    (0..self.nodes.len()).collect()
  }

  fn edges(&'a self) -> dot::Edges<'a, Edge> {
    Cow::Borrowed(&self.edges[..])
  }

  fn source(&'a self, e: &Edge) -> Node {
    e.0
  }

  fn target(&'a self, e: &Edge) -> Node {
    e.1
  }
}

/// Writes the left-corner graph of `g` to `out` in DOT format.
pub fn render_left_corners(
  g: &Grammar,
  out: &mut impl io::Write,
) -> io::Result<()> {
  let graph = LeftCornerGraph::new(g);
  log::debug!(
    "Rendering left-corner graph with {} nodes and {} edges.",
    graph.nodes.len(),
    graph.edges.len()
  );
  dot::render(&graph, out)
}
