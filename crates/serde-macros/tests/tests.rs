// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[test]
fn derive_macros() {
    let cases = trybuild::TestCases::new();
    cases.pass("tests/trybuild/01-plain.rs");
    cases.pass("tests/trybuild/02-from-external.rs");
    cases.pass("tests/trybuild/03-from-located.rs");
    cases.pass("tests/trybuild/04-writing-plain.rs");
    cases.pass("tests/trybuild/05-writing-from-std-io-error.rs");
    cases.pass("tests/trybuild/06-writing-from.rs");
}
