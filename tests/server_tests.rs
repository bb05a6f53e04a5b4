use std::sync::Arc;

use actix_web::{App, test, web};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use judge::catalog::Catalog;
use judge::config::{CliArgs, Config, FallbackConfig, GatewayConfig};
use judge::gateway::{ExecutionGateway, ExecutionOutput, RuntimeCapability, StageOutput};
use judge::harness::SourceFile;
use judge::routes::{json_error_handler, run_code_handler, submit_code_handler};
use judge::{Judge, JudgeError, Result};

const TWO_SUM: &str = r#"class Solution {
public:
    vector<int> twoSum(vector<int>& nums, int target) {
        unordered_map<int, int> seen;
        for (int i = 0; i < (int)nums.size(); ++i) {
            auto it = seen.find(target - nums[i]);
            if (it != seen.end()) return {it->second, i};
            seen[nums[i]] = i;
        }
        return {};
    }
};"#;

// Lines the synthesized pair-sum program prints for the three catalog examples
const PAIR_SUM_LINE_1: &str = r#"{"testNumber":1,"input":"nums=[2,7,11,15],target=9","expected":"[0,1]","actual":"[0,1]","passed":true,"timeMs":0}"#;
const PAIR_SUM_LINE_2: &str = r#"{"testNumber":2,"input":"nums=[3,2,4],target=6","expected":"[1,2]","actual":"[1,2]","passed":true,"timeMs":0}"#;
const PAIR_SUM_LINE_3: &str = r#"{"testNumber":3,"input":"nums=[3,3],target=6","expected":"[0,1]","actual":"[0,1]","passed":true,"timeMs":1}"#;

type Responder = Box<dyn Fn(&SourceFile) -> Result<ExecutionOutput> + Send + Sync>;

/// Gateway answering from a script instead of a remote service
struct ScriptedGateway {
    runtimes: Vec<RuntimeCapability>,
    respond: Responder,
    executed: Mutex<Vec<SourceFile>>,
}

impl ScriptedGateway {
    fn new(respond: impl Fn(&SourceFile) -> Result<ExecutionOutput> + Send + Sync + 'static) -> Self {
        Self {
            runtimes: vec![RuntimeCapability {
                language: "c++".to_string(),
                version: "10.2.0".to_string(),
                aliases: vec!["cpp".to_string(), "g++".to_string()],
            }],
            respond: Box::new(respond),
            executed: Mutex::new(Vec::new()),
        }
    }

    fn printing(stdout: &str, stderr: &str) -> Self {
        let (stdout, stderr) = (stdout.to_string(), stderr.to_string());
        Self::new(move |_| {
            Ok(ExecutionOutput {
                stdout: stdout.clone(),
                stderr: stderr.clone(),
                compile: None,
            })
        })
    }

    fn without_runtimes(mut self) -> Self {
        self.runtimes.clear();
        self
    }
}

#[async_trait]
impl ExecutionGateway for ScriptedGateway {
    async fn resolve_runtime(&self, language: &str) -> Result<RuntimeCapability> {
        self.runtimes
            .iter()
            .find(|r| r.language == language || r.aliases.iter().any(|a| a == language))
            .cloned()
            .ok_or_else(|| JudgeError::UnsupportedLanguage(language.to_string()))
    }

    async fn execute(&self, _runtime: &RuntimeCapability, files: &[SourceFile]) -> Result<ExecutionOutput> {
        self.executed.lock().extend_from_slice(files);
        (self.respond)(&files[0])
    }
}

/// Gateway whose service cannot be reached
struct Unreachable;

#[async_trait]
impl ExecutionGateway for Unreachable {
    async fn resolve_runtime(&self, _language: &str) -> Result<RuntimeCapability> {
        Err(JudgeError::GatewayUnavailable("connection refused".to_string()))
    }

    async fn execute(&self, _runtime: &RuntimeCapability, _files: &[SourceFile]) -> Result<ExecutionOutput> {
        Err(JudgeError::GatewayUnavailable("connection refused".to_string()))
    }
}

fn sample_config() -> Config {
    CliArgs {
        config_path: "data/example.json".to_string(),
        warm_runtimes: false,
    }
    .to_config()
    .unwrap()
}

fn create_judge(gateway: Arc<dyn ExecutionGateway>) -> web::Data<Judge> {
    let config = sample_config();
    let catalog = Catalog::new(config.problems).unwrap();
    web::Data::new(Judge::new(
        Arc::new(catalog),
        gateway,
        &GatewayConfig::default(),
        &FallbackConfig::default(),
    ))
}

macro_rules! init_app {
    ($judge:expr) => {
        test::init_service(
            App::new()
                .app_data($judge.clone())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .service(run_code_handler)
                .service(submit_code_handler),
        )
        .await
    };
}

#[actix_web::test]
async fn test_submit_correct_pair_sum() {
    let gateway = Arc::new(ScriptedGateway::printing(
        &[PAIR_SUM_LINE_1, PAIR_SUM_LINE_2, PAIR_SUM_LINE_3].join("\n"),
        "",
    ));
    let judge = create_judge(gateway.clone());
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({
            "code": TWO_SUM,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    println!("Response: {}", response_body);

    assert_eq!(response_body["allPassed"], true);
    assert_eq!(response_body["results"].as_array().unwrap().len(), 3);
    assert_eq!(response_body["results"][0]["testNumber"], 1);
    assert_eq!(response_body["results"][0]["passed"], true);
    assert_eq!(response_body["results"][0]["actualOutput"], "[0,1]");
    assert_eq!(response_body["results"][0]["executionTimeMs"], 0.0);
    assert!(response_body.get("compileError").is_none());

    let executed = gateway.executed.lock();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].name, "main.cpp");
    assert!(executed[0].content.contains(TWO_SUM));
    assert!(executed[0].content.contains("Solution().twoSum(nums, targets[i])"));
}

#[actix_web::test]
async fn test_submit_with_one_wrong_answer() {
    let wrong = PAIR_SUM_LINE_2
        .replace(r#""actual":"[1,2]","passed":true"#, r#""actual":"[]","passed":false"#);
    let gateway = Arc::new(ScriptedGateway::printing(
        &[PAIR_SUM_LINE_1, wrong.as_str(), PAIR_SUM_LINE_3].join("\n"),
        "",
    ));
    let judge = create_judge(gateway);
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({
            "code": TWO_SUM,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["allPassed"], false);
    let passed: Vec<bool> = response_body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["passed"].as_bool().unwrap())
        .collect();
    assert_eq!(passed, vec![true, false, true]);
    assert_eq!(response_body["results"][1]["actualOutput"], "[]");
}

#[actix_web::test]
async fn test_run_has_no_pass_fail_gate() {
    let gateway = Arc::new(ScriptedGateway::printing(PAIR_SUM_LINE_1, ""));
    let judge = create_judge(gateway);
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": TWO_SUM,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert!(response_body.get("allPassed").is_none());
    assert_eq!(response_body["results"][0]["expectedOutput"], "[0,1]");
}

#[actix_web::test]
async fn test_unparsable_line_yields_sentinel() {
    let gateway = Arc::new(ScriptedGateway::printing(
        &format!("{PAIR_SUM_LINE_1}\nSegmentation fault (core dumped)\n"),
        "terminate called after throwing an instance of 'std::out_of_range'",
    ));
    let judge = create_judge(gateway);
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": TWO_SUM,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    let results = response_body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["passed"], true);
    assert_eq!(results[1]["testNumber"], -1);
    assert_eq!(results[1]["passed"], false);
    assert_eq!(results[1]["actualOutput"], "Segmentation fault (core dumped)");
    assert_eq!(
        results[1]["stderr"],
        "terminate called after throwing an instance of 'std::out_of_range'"
    );
}

#[actix_web::test]
async fn test_compile_failure_is_reported() {
    let gateway = Arc::new(ScriptedGateway::new(|_| {
        Ok(ExecutionOutput {
            stdout: String::new(),
            stderr: String::new(),
            compile: Some(StageOutput {
                stderr: "main.cpp:80:5: error: 'twoSum' was not declared in this scope\n".to_string(),
                code: Some(1),
                ..Default::default()
            }),
        })
    }));
    let judge = create_judge(gateway);
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({
            "code": "class Solution {};",
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["results"], json!([]));
    assert_eq!(response_body["allPassed"], false);
    assert_eq!(
        response_body["compileError"],
        "main.cpp:80:5: error: 'twoSum' was not declared in this scope"
    );
}

#[actix_web::test]
async fn test_custom_tests_are_appended() {
    let gateway = Arc::new(ScriptedGateway::printing("", ""));
    let judge = create_judge(gateway.clone());
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": "class Solution { public: bool isPalindrome(int x) { return x == 121; } };",
            "language": "cpp",
            "questionId": "integer-is-palindrome",
            "customTests": r#"[{"x": 121, "expected": true}, {"x": "oops", "expected": true}]"#
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Three catalog examples plus the one well-formed custom case
    let executed = gateway.executed.lock();
    let content = &executed[0].content;
    assert!(content.contains("vector<int> ids = {1,2,3,4};"));
    assert!(content.contains("vector<int> xs = {121,-121,10,121};"));
    assert!(content.contains("vector<bool> expected = {true,false,false,true};"));
}

#[actix_web::test]
async fn test_gateway_outage_falls_back_to_simulation() {
    let judge = create_judge(Arc::new(Unreachable));
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({
            "code": "// Write your solution here",
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    let results = response_body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(response_body["allPassed"], false);
    for (i, verdict) in results.iter().enumerate() {
        assert_eq!(verdict["testNumber"], i as i64 + 1);
        assert_eq!(verdict["passed"], false);
        assert_eq!(verdict["actualOutput"], "Incorrect output");
    }
    assert_eq!(results[0]["input"], "nums = [2,7,11,15], target = 9");
    assert_eq!(results[0]["expectedOutput"], "[0,1]");
}

#[actix_web::test]
async fn test_non_primary_language_passes_without_execution() {
    let gateway = Arc::new(ScriptedGateway::printing("", ""));
    let judge = create_judge(gateway.clone());
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({
            "code": "def reverseString(s): s.reverse()",
            "language": "python",
            "questionId": "reverse-string"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["allPassed"], true);
    assert_eq!(response_body["results"].as_array().unwrap().len(), 2);
    assert_eq!(
        response_body["results"][0]["actualOutput"],
        response_body["results"][0]["expectedOutput"]
    );
    assert!(gateway.executed.lock().is_empty());
}

#[actix_web::test]
async fn test_invalid_request_shape() {
    let judge = create_judge(Arc::new(Unreachable));
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": 42,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["reason"], "ERR_INVALID_ARGUMENT");
    assert_eq!(response_body["code"], 1);

    let req = test::TestRequest::post()
        .uri("/api/code/submit")
        .set_json(json!({ "code": "", "language": "cpp" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_unknown_question() {
    let judge = create_judge(Arc::new(Unreachable));
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": "",
            "language": "cpp",
            "questionId": "three-sum"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["reason"], "ERR_NOT_FOUND");
    assert_eq!(response_body["code"], 3);
}

#[actix_web::test]
async fn test_language_without_runtime() {
    let judge = create_judge(Arc::new(ScriptedGateway::printing("", "").without_runtimes()));
    let app = init_app!(judge);

    let req = test::TestRequest::post()
        .uri("/api/code/run")
        .set_json(json!({
            "code": TWO_SUM,
            "language": "cpp",
            "questionId": "pair-sum-to-target"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);

    let response_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response_body["reason"], "ERR_EXTERNAL");
    assert_eq!(response_body["code"], 5);
}

#[actix_web::test]
async fn test_non_string_custom_tests_are_ignored() {
    let gateway = Arc::new(ScriptedGateway::printing("", ""));
    let judge = create_judge(gateway.clone());
    let app = init_app!(judge);

    for custom_tests in [json!([{"x": 121, "expected": true}]), json!(42), json!({"a": 1}), json!(null)] {
        let req = test::TestRequest::post()
            .uri("/api/code/run")
            .set_json(json!({
                "code": "class Solution { public: bool isPalindrome(int x) { return false; } };",
                "language": "cpp",
                "questionId": "integer-is-palindrome",
                "customTests": custom_tests.clone()
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "customTests = {custom_tests}");
    }

    // Only the catalog examples reach the harness
    let executed = gateway.executed.lock();
    assert_eq!(executed.len(), 4);
    for file in executed.iter() {
        assert!(file.content.contains("vector<int> ids = {1,2,3};"));
    }
}
