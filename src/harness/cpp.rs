//! C++ source rendering. Every literal embedded in a generated harness goes
//! through this module.

use super::Helper;

pub const LANGUAGE: &str = "cpp";
pub const FILE_NAME: &str = "main.cpp";

const INCLUDES: &str = "#include <bits/stdc++.h>";

const JSON_ESCAPE: &str = r#"
static string jsonEscape(const string& s){
  string out;
  for(unsigned char c : s){
    switch(c){
      case '"': out += "\\\""; break;
      case '\\': out += "\\\\"; break;
      case '\n': out += "\\n"; break;
      case '\r': out += "\\r"; break;
      case '\t': out += "\\t"; break;
      default:
        if(c < 0x20){
          char buf[8];
          snprintf(buf, sizeof(buf), "\\u%04x", (unsigned)c);
          out += buf;
        } else {
          out += (char)c;
        }
    }
  }
  return out;
}
"#;

const PRINT_RESULT: &str = r#"
static void printResult(int testNumber, const string& input, const string& expected, const string& actual, bool passed, long long timeMs){
  cout << "{\"testNumber\":" << testNumber
       << ",\"input\":\"" << jsonEscape(input) << "\""
       << ",\"expected\":\"" << jsonEscape(expected) << "\""
       << ",\"actual\":\"" << jsonEscape(actual) << "\""
       << ",\"passed\":" << (passed ? "true" : "false")
       << ",\"timeMs\":" << timeMs
       << "}" << endl;
}
"#;

const INT_VEC_TO_JSON: &str = r#"
static string vecToJson(const vector<int>& v){
  string s = "[";
  for(size_t i=0;i<v.size();++i){ s += to_string(v[i]); if(i+1<v.size()) s += ","; }
  s += "]";
  return s;
}
"#;

const CHAR_VEC_TO_JSON: &str = r#"
static string charVecToJson(const vector<char>& v){
  string s = "[";
  for(size_t i=0;i<v.size();++i){ s += "\"" + jsonEscape(string(1, v[i])) + "\""; if(i+1<v.size()) s += ","; }
  s += "]";
  return s;
}
"#;

/// Includes plus the record printer and the renderers in `helpers`.
pub fn preamble(helpers: &[Helper]) -> String {
    let mut out = String::from(INCLUDES);
    out.push_str("\n\nusing namespace std;\n");
    out.push_str(JSON_ESCAPE);
    out.push_str(PRINT_RESULT);

    let mut emitted: Vec<Helper> = Vec::with_capacity(helpers.len());
    for helper in helpers {
        if emitted.contains(helper) {
            continue;
        }
        out.push_str(match helper {
            Helper::IntVec => INT_VEC_TO_JSON,
            Helper::CharVec => CHAR_VEC_TO_JSON,
        });
        emitted.push(*helper);
    }
    out
}

/// Wraps a generated loop body into `main`.
pub fn main_function(body: &str) -> String {
    format!("int main(){{\n{body}  return 0;\n}}\n")
}

/// Runs `statement` between two steady-clock reads, leaving `timeMs` in scope.
pub fn timed(statement: &str) -> String {
    format!(
        "    auto start = chrono::steady_clock::now();\n    {statement}\n    long long timeMs = chrono::duration_cast<chrono::milliseconds>(chrono::steady_clock::now() - start).count();\n"
    )
}

/// `vector<int> ids` holding the test numbers in run order.
pub fn ids_decl(ids: impl IntoIterator<Item = u32>) -> String {
    vector_decl("int", "ids", &brace_list(ids.into_iter().map(|id| id.to_string())))
}

/// Renders one byte as a C++ character literal.
pub fn char_literal(byte: u8) -> String {
    let escaped = match byte {
        b'\'' => "\\'".to_string(),
        b'"' => "\\\"".to_string(),
        b'\\' => "\\\\".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0x20..=0x7e => (byte as char).to_string(),
        _ => format!("\\{byte:03o}"),
    };
    format!("'{escaped}'")
}

/// `INT_MIN` cannot be written as a negated literal without widening.
pub fn int_literal(value: i32) -> String {
    if value == i32::MIN {
        "(-2147483647 - 1)".to_string()
    } else {
        value.to_string()
    }
}

pub fn bool_literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// `{a,b,c}` from already-rendered items.
pub fn brace_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    format!("{{{}}}", items.join(","))
}

/// Declaration of a vector initialized from a brace list.
pub fn vector_decl(ty: &str, name: &str, literal: &str) -> String {
    format!("  vector<{ty}> {name} = {literal};\n")
}
