use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::{as_int, as_int_array, input_object, malformed, parse_int_list};
use crate::error::Result;
use crate::harness::{Helper, HarnessTemplate, cpp};
use crate::testcase::{CaseFormat, TestCase};

const PROBLEM_ID: &str = "pair-sum-to-target";

static EXAMPLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"nums\s*=\s*\[(.*?)\]\s*,\s*target\s*=\s*(-?\d+)").expect("valid example pattern")
});

const LOOP: &str = r#"  for(size_t i=0;i<ids.size();++i){
    vector<int> nums = numsList[i];
__CALL__    string inputStr = string("nums=") + vecToJson(numsList[i]) + ",target=" + to_string(targets[i]);
    printResult(ids[i], inputStr, vecToJson(expected[i]), vecToJson(actual), actual == expected[i], timeMs);
  }
"#;

/// Two indices whose values add up to `target`; entry point `twoSum`.
pub struct PairSum;

impl PairSum {
    fn typed(input: &Map<String, Value>, expected: &Value) -> Option<(Vec<i32>, i32, Vec<i32>)> {
        let nums = as_int_array(input.get("nums")?)?;
        let target = as_int(input.get("target")?)?;
        let expected = as_int_array(expected)?;
        Some((nums, target, expected))
    }
}

impl CaseFormat for PairSum {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn parse_example(&self, input: &str, output: &str) -> Option<(Map<String, Value>, Value)> {
        let caps = EXAMPLE_PATTERN.captures(input)?;
        let nums = parse_int_list(&caps[1])?;
        let target: i32 = caps[2].parse().ok()?;
        let expected = parse_int_list(&output.replace(['[', ']'], ""))?;

        Some((
            input_object([("nums", json!(nums)), ("target", json!(target))]),
            json!(expected),
        ))
    }

    fn accepts(&self, input: &Map<String, Value>, expected: &Value) -> bool {
        Self::typed(input, expected).is_some()
    }
}

impl HarnessTemplate for PairSum {
    fn problem_id(&self) -> &'static str {
        PROBLEM_ID
    }

    fn language(&self) -> &'static str {
        cpp::LANGUAGE
    }

    fn entry_point(&self) -> &'static str {
        "twoSum"
    }

    fn helpers(&self) -> &'static [Helper] {
        &[Helper::IntVec]
    }

    fn render_main(&self, tests: &[TestCase]) -> Result<String> {
        let mut nums_list = Vec::with_capacity(tests.len());
        let mut targets = Vec::with_capacity(tests.len());
        let mut expecteds = Vec::with_capacity(tests.len());

        for test in tests {
            let (nums, target, expected) = Self::typed(&test.input, &test.expected)
                .ok_or_else(|| {
                    malformed(PROBLEM_ID, test, "expected `nums: int[]`, `target: int` and an int[] result")
                })?;
            nums_list.push(cpp::brace_list(nums.into_iter().map(cpp::int_literal)));
            targets.push(cpp::int_literal(target));
            expecteds.push(cpp::brace_list(expected.into_iter().map(cpp::int_literal)));
        }

        let mut body = cpp::ids_decl(tests.iter().map(|t| t.id));
        body.push_str(&cpp::vector_decl("vector<int>", "numsList", &cpp::brace_list(&nums_list)));
        body.push_str(&cpp::vector_decl("int", "targets", &cpp::brace_list(&targets)));
        body.push_str(&cpp::vector_decl("vector<int>", "expected", &cpp::brace_list(&expecteds)));
        body.push_str(&LOOP.replace(
            "__CALL__",
            &cpp::timed("vector<int> actual = Solution().twoSum(nums, targets[i]);"),
        ));
        Ok(body)
    }
}
