use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::{as_char_array, input_object, malformed, parse_char_list};
use crate::error::Result;
use crate::harness::{Helper, HarnessTemplate, cpp};
use crate::testcase::{CaseFormat, TestCase};

const PROBLEM_ID: &str = "reverse-string";

static EXAMPLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"s\s*=\s*\[(.*)\]").expect("valid example pattern"));

const LOOP: &str = r#"  for(size_t i=0;i<ids.size();++i){
    vector<char> s = sList[i];
__CALL__    string inputStr = string("s=") + charVecToJson(sList[i]);
    printResult(ids[i], inputStr, charVecToJson(expected[i]), charVecToJson(s), s == expected[i], timeMs);
  }
"#;

/// In-place reversal of a character array; entry point `reverseString`.
pub struct ReverseString;

impl ReverseString {
    fn typed(input: &Map<String, Value>, expected: &Value) -> Option<(Vec<u8>, Vec<u8>)> {
        let s = as_char_array(input.get("s")?)?;
        let expected = as_char_array(expected)?;
        Some((s, expected))
    }

    fn char_list(bytes: Vec<u8>) -> String {
        cpp::brace_list(bytes.into_iter().map(cpp::char_literal))
    }
}

impl CaseFormat for ReverseString {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn parse_example(&self, input: &str, output: &str) -> Option<(Map<String, Value>, Value)> {
        let caps = EXAMPLE_PATTERN.captures(input)?;
        let s = parse_char_list(&caps[1]);
        let output = output.trim();
        let output = output.strip_prefix('[').unwrap_or(output);
        let output = output.strip_suffix(']').unwrap_or(output);
        let expected = parse_char_list(output);

        let input = input_object([("s", json!(s))]);
        let expected = json!(expected);
        self.accepts(&input, &expected).then_some((input, expected))
    }

    fn accepts(&self, input: &Map<String, Value>, expected: &Value) -> bool {
        Self::typed(input, expected).is_some()
    }
}

impl HarnessTemplate for ReverseString {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn language(&self) -> &'static str {
        cpp::LANGUAGE
    }

    fn entry_point(&self) -> &'static str {
        "reverseString"
    }

    fn helpers(&self) -> &'static [Helper] {
        &[Helper::CharVec]
    }

    fn render_main(&self, tests: &[TestCase]) -> Result<String> {
        let mut s_list = Vec::with_capacity(tests.len());
        let mut expecteds = Vec::with_capacity(tests.len());

        for test in tests {
            let (s, expected) = Self::typed(&test.input, &test.expected).ok_or_else(|| {
                malformed(PROBLEM_ID, test, "expected `s` and the result as single ASCII characters")
            })?;
            s_list.push(Self::char_list(s));
            expecteds.push(Self::char_list(expected));
        }

        let mut body = cpp::ids_decl(tests.iter().map(|t| t.id));
        body.push_str(&cpp::vector_decl("vector<char>", "sList", &cpp::brace_list(&s_list)));
        body.push_str(&cpp::vector_decl("vector<char>", "expected", &cpp::brace_list(&expecteds)));
        body.push_str(&LOOP.replace("__CALL__", &cpp::timed("Solution().reverseString(s);")));
        Ok(body)
    }
}
