// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Replace every occurrence of the keys of `pairs` in `input` with their values in one pass.
///
/// The input is scanned left to right. At each position the longest matching key wins, its
/// value is copied to the output, and scanning resumes after the key. Values are never
/// scanned again, so a value that contains a key is inserted literally. Empty keys are ignored.
pub(crate) fn replace_pairs<K, V>(input: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs = pairs
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .filter(|(k, _)| !k.is_empty())
        .collect::<Vec<_>>();
    if pairs.is_empty() {
        return input.to_owned();
    }
    pairs.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        match pairs.iter().find(|(k, _)| rest.starts_with(k)) {
            Some((key, value)) => {
                output.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                output.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    output
}
