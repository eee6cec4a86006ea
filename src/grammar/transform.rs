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

//! Grammar transforms that prepare a grammar for LL(1) analysis.

pub mod fresh;
pub mod left_factor;
pub mod left_recursion;

pub use fresh::{FreshNames, Origin};
pub use left_factor::left_factor;
pub use left_recursion::eliminate_left_recursion;
