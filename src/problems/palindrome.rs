use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::{as_int, input_object, malformed};
use crate::error::Result;
use crate::harness::{Helper, HarnessTemplate, cpp};
use crate::testcase::{CaseFormat, TestCase};

const PROBLEM_ID: &str = "integer-is-palindrome";

static EXAMPLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"x\s*=\s*(-?\d+)").expect("valid example pattern"));

const LOOP: &str = r#"  for(size_t i=0;i<ids.size();++i){
__CALL__    string inputStr = string("x=") + to_string(xs[i]);
    bool want = expected[i];
    printResult(ids[i], inputStr, want ? "true" : "false", actual ? "true" : "false", actual == want, timeMs);
  }
"#;

/// Whether an integer reads the same backwards; entry point `isPalindrome`.
pub struct Palindrome;

impl Palindrome {
    fn typed(input: &Map<String, Value>, expected: &Value) -> Option<(i32, bool)> {
        Some((as_int(input.get("x")?)?, expected.as_bool()?))
    }
}

impl CaseFormat for Palindrome {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn parse_example(&self, input: &str, output: &str) -> Option<(Map<String, Value>, Value)> {
        let caps = EXAMPLE_PATTERN.captures(input)?;
        let x: i32 = caps[1].parse().ok()?;
        let expected = output.trim().eq_ignore_ascii_case("true");
        Some((input_object([("x", json!(x))]), json!(expected)))
    }

    fn accepts(&self, input: &Map<String, Value>, expected: &Value) -> bool {
        Self::typed(input, expected).is_some()
    }
}

impl HarnessTemplate for Palindrome {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn language(&self) -> &'static str {
        cpp::LANGUAGE
    }

    fn entry_point(&self) -> &'static str {
        "isPalindrome"
    }

    fn helpers(&self) -> &'static [Helper] {
        &[]
    }

    fn render_main(&self, tests: &[TestCase]) -> Result<String> {
        let mut xs = Vec::with_capacity(tests.len());
        let mut expecteds = Vec::with_capacity(tests.len());

        for test in tests {
            let (x, expected) = Self::typed(&test.input, &test.expected)
                .ok_or_else(|| malformed(PROBLEM_ID, test, "expected `x: int` and a bool result"))?;
            xs.push(cpp::int_literal(x));
            expecteds.push(cpp::bool_literal(expected));
        }

        let mut body = cpp::ids_decl(tests.iter().map(|t| t.id));
        body.push_str(&cpp::vector_decl("int", "xs", &cpp::brace_list(&xs)));
        body.push_str(&cpp::vector_decl("bool", "expected", &cpp::brace_list(&expecteds)));
        body.push_str(&LOOP.replace(
            "__CALL__",
            &cpp::timed("bool actual = Solution().isPalindrome(xs[i]);"),
        ));
        Ok(body)
    }
}
