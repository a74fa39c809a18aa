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

/// Remove markup tags from `input`, keeping the text between them.
///
/// A tag starts at a `<` that is followed by a non-whitespace character and ends at the next
/// `>` outside a quoted attribute value. Comments run until `-->`. An unterminated tag swallows
/// the rest of the input. A `<` followed by whitespace or at the end of input is plain text.
pub(crate) fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        let (text, tail) = rest.split_at(start);
        output.push_str(text);

        let opens_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace());
        if !opens_tag {
            output.push('<');
            rest = &tail[1..];
            continue;
        }

        rest = match tail.strip_prefix("<!--") {
            Some(comment) => match comment.find("-->") {
                Some(end) => &comment[end + 3..],
                None => "",
            },
            None => skip_tag(&tail[1..]),
        };
    }

    output.push_str(rest);
    output
}

// Returns what follows the closing `>` of a tag whose body starts at `body`.
fn skip_tag(body: &str) -> &str {
    let mut quote = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (None, '>') => return &body[i + 1..],
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if q == c => quote = None,
            _ => {}
        }
    }
    ""
}

/// Turn the entities `&gt;` and `&lt;` back into `>` and `<`.
///
/// This is a narrow readability pass over a rendered line, not an HTML unescape: every other
/// entity (including `&amp;`) is left untouched.
pub(crate) fn decode_angle_entities(input: &str) -> String {
    input.replace("&gt;", ">").replace("&lt;", "<")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("plain text"), "plain text");
        assert_eq!(
            strip_tags(r#"<a href="/node/1">view</a>"#),
            "view"
        );
        assert_eq!(
            strip_tags("<em>bob</em> logged <strong>in</strong>"),
            "bob logged in"
        );
        assert_eq!(strip_tags(r#"<a title="x > y">link</a>"#), "link");
        assert_eq!(strip_tags("a<!-- hidden <b> -->b"), "ab");
        assert_eq!(strip_tags("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
        assert_eq!(strip_tags("trailing <"), "trailing <");
        assert_eq!(strip_tags("cut <span class='x"), "cut ");
    }

    #[test]
    fn test_decode_angle_entities() {
        assert_eq!(decode_angle_entities("a &lt;b&gt; c"), "a <b> c");
        assert_eq!(
            decode_angle_entities("&amp; &quot; &#62; &GT;"),
            "&amp; &quot; &#62; &GT;"
        );
        assert_eq!(decode_angle_entities("&amp;gt;"), "&amp;gt;");
    }
}
