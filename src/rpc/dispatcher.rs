use crate::common::errors::AppError;
use crate::common::json::JsonUtil;
use crate::keywords::{self, KEYWORDS};
use crate::rpc::protocol::{KeywordResult, RunKeywordParams};
use crate::session::registry::SessionRegistry;
use serde_json::{json, Value};

/// Routes protocol methods and keyword calls to one session.
#[derive(Debug, Default)]
pub struct Dispatcher {
    session: SessionRegistry,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionRegistry {
        &self.session
    }

    pub fn dispatch(&mut self, method: &str, params: Option<Value>) -> Result<Value, AppError> {
        match method {
            "initialize" => Ok(Self::initialize_result()),
            "initialized" | "notifications/initialized" => Ok(Value::Null),
            "get_keyword_names" => Ok(Self::keyword_names()),
            "get_keyword_documentation" | "keywords/list" => Ok(Self::keyword_documentation()),
            "run_keyword" => self.dispatch_run_keyword(params),
            // Direct calls by keyword name, handy for manual testing over stdio.
            _ => self.run_keyword(method, params.unwrap_or(Value::Null)),
        }
    }

    fn dispatch_run_keyword(&mut self, params: Option<Value>) -> Result<Value, AppError> {
        let payload = params.ok_or_else(|| AppError::InvalidInput("missing params".to_string()))?;
        let call: RunKeywordParams = JsonUtil::args(payload)?;
        let return_value = self.run_keyword(&call.name, call.args)?;
        JsonUtil::to_value(KeywordResult::pass(return_value))
    }

    fn run_keyword(&mut self, name: &str, args: Value) -> Result<Value, AppError> {
        let keyword = keywords::find(name)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown method/keyword: {name}")))?;
        keyword.run(&mut self.session, args)
    }

    fn initialize_result() -> Value {
        json!({
            "serverInfo": {
                "name": "xlsx-keywords",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "keywords": KEYWORDS.len()
            }
        })
    }

    fn keyword_names() -> Value {
        json!(KEYWORDS.iter().map(|kw| kw.name).collect::<Vec<_>>())
    }

    fn keyword_documentation() -> Value {
        let keywords: Vec<Value> = KEYWORDS
            .iter()
            .map(|kw| {
                json!({
                    "name": kw.name,
                    "doc": kw.doc,
                    "args": kw.args
                })
            })
            .collect();
        json!({ "keywords": keywords })
    }
}
