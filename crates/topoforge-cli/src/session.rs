//! JSON-lines tool session
//!
//! Each request is `{"tool": "<name>", "args": {...}}`. Each response is
//! `{"ok": true}` / `{"ok": true, "result": ...}` on success or
//! `{"ok": false, "error": "..."}` when the call is rejected. Validation
//! failures are results, not errors.

use anyhow::Result;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use topoforge_codegen::{Compilation, CompileOptions, Compiler};
use topoforge_core::{
    Catalog, CatalogKind, Device, IosConfig, Link, ModelCatalog, Module, PcIpConfig, ShapeError,
    SharedStore, ValidationRules, summarize, validate,
};

#[derive(Debug, Deserialize)]
struct Request {
    tool: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct GenerateArgs {
    with_validation: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ListCatalogArgs {
    kind: CatalogKind,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    starts_with: String,
}

fn default_limit() -> i64 {
    50
}

/// One tool session: a store, a catalog, and the configured rules
pub struct Session {
    store: SharedStore,
    catalog: Catalog,
    rules: ValidationRules,
    default_validate: bool,
}

impl Session {
    /// Create a session with an empty store
    pub fn new(catalog: Catalog, rules: ValidationRules, default_validate: bool) -> Self {
        Self {
            store: SharedStore::new(),
            catalog,
            rules,
            default_validate,
        }
    }

    /// Handle one request line as read off the wire.
    ///
    /// A line that is not UTF-8 is rejected like any other malformed
    /// request.
    pub fn handle_bytes(&self, line: &[u8]) -> Value {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                tracing::warn!(error = %e, "Request is not valid UTF-8");
                failure("request is not valid UTF-8".to_string())
            }
        }
    }

    /// Handle one request line
    pub fn handle_line(&self, line: &str) -> Value {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(&request.tool, request.args),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request");
                failure(format!("malformed request: {e}"))
            }
        }
    }

    /// Handle one tool call
    pub fn handle(&self, tool: &str, args: Value) -> Value {
        tracing::debug!(tool, "Tool call");

        match self.dispatch(tool, args) {
            Ok(None) => json!({ "ok": true }),
            Ok(Some(result)) => json!({ "ok": true, "result": result }),
            Err(e) => {
                tracing::warn!(tool, error = %e, "Tool call rejected");
                failure(e.to_string())
            }
        }
    }

    fn dispatch(&self, tool: &str, args: Value) -> Result<Option<Value>> {
        match tool {
            "reset" => {
                self.store.reset();
                Ok(None)
            }
            "appendDevice" => {
                self.store.append_device(parse_args::<Device>(tool, args)?)?;
                Ok(None)
            }
            "appendModule" => {
                self.store.append_module(parse_args::<Module>(tool, args)?)?;
                Ok(None)
            }
            "appendLink" => {
                self.store.append_link(parse_args::<Link>(tool, args)?)?;
                Ok(None)
            }
            "appendPcIpConfig" => {
                self.store
                    .append_pc_ip_config(parse_args::<PcIpConfig>(tool, args)?)?;
                Ok(None)
            }
            "appendIosConfig" => {
                self.store
                    .append_ios_config(parse_args::<IosConfig>(tool, args)?)?;
                Ok(None)
            }
            "validate" => {
                let diagnostics = validate(&self.store.snapshot(), &self.catalog, &self.rules);
                Ok(Some(json!(diagnostics)))
            }
            "generate" => {
                let args = if args.is_null() {
                    GenerateArgs::default()
                } else {
                    parse_args::<GenerateArgs>(tool, args)?
                };
                Ok(Some(self.generate(
                    args.with_validation.unwrap_or(self.default_validate),
                )))
            }
            "listCatalog" => {
                let args = parse_args::<ListCatalogArgs>(tool, args)?;
                let listing = self
                    .catalog
                    .list(args.kind, args.limit, &args.starts_with)?;
                Ok(Some(serde_json::to_value(listing)?))
            }
            "summarize" => {
                let summary = summarize(&self.store.snapshot());
                Ok(Some(serde_json::to_value(summary)?))
            }
            other => anyhow::bail!("unknown tool '{other}'"),
        }
    }

    fn generate(&self, with_validation: bool) -> Value {
        let compiler = Compiler::new(CompileOptions {
            validate: with_validation,
            rules: self.rules,
        });

        match compiler.compile(&self.store.snapshot(), &self.catalog) {
            Compilation::Script(script) => json!({ "statements": script.text() }),
            Compilation::Invalid { errors } => json!({ "valid": false, "errors": errors }),
        }
    }
}

fn parse_args<T: DeserializeOwned>(operation: &str, args: Value) -> Result<T, ShapeError> {
    serde_json::from_value(args).map_err(|e| ShapeError::InvalidArguments {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

fn failure(message: String) -> Value {
    json!({ "ok": false, "error": message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn session() -> Session {
        Session::new(Catalog::builtin().unwrap(), ValidationRules::default(), true)
    }

    fn call(session: &Session, line: &str) -> Value {
        session.handle_line(line)
    }

    fn summary(session: &Session) -> Value {
        call(session, r#"{"tool":"summarize"}"#)["result"].clone()
    }

    #[test]
    fn test_append_then_generate() {
        let s = session();
        for line in [
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":100,"y":100}}"#,
            r#"{"tool":"appendDevice","args":{"name":"PC1","model":"PC-PT","x":100,"y":300}}"#,
            r#"{"tool":"appendLink","args":{"device1Name":"R1","device1Interface":"FastEthernet0/0","device2Name":"PC1","device2Interface":"FastEthernet0","linkType":"Copper Cross-Over"}}"#,
            r#"{"tool":"appendPcIpConfig","args":{"deviceName":"PC1","ipAddress":"10.0.0.2","subnetMask":"255.0.0.0"}}"#,
        ] {
            assert_eq!(call(&s, line), json!({ "ok": true }), "{line}");
        }

        let response = call(&s, r#"{"tool":"generate","args":{"withValidation":true}}"#);
        assert_eq!(response["ok"], true);
        assert_eq!(
            response["result"]["statements"],
            [
                r#"addDevice("R1", "2811", 100, 100);"#,
                r#"addDevice("PC1", "PC-PT", 100, 300);"#,
                r#"addLink("R1", "FastEthernet0/0", "PC1", "FastEthernet0", "Copper Cross-Over");"#,
                r#"configurePcIp("PC1", undefined, "10.0.0.2", "255.0.0.0", undefined, undefined);"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_unknown_reference_is_reported_by_validate_and_generate() {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0,"y":0}}"#,
        );
        call(
            &s,
            r#"{"tool":"appendLink","args":{"device1Name":"R1","device1Interface":"Fa0/0","device2Name":"R9","device2Interface":"Fa0/0","linkType":"Copper Cross-Over"}}"#,
        );

        let validated = call(&s, r#"{"tool":"validate"}"#);
        assert_eq!(
            validated["result"],
            json!(["links[0]: unknown device \"R9\" (device2Name)"])
        );

        let generated = call(&s, r#"{"tool":"generate","args":{"withValidation":true}}"#);
        assert_eq!(generated["ok"], true);
        assert_eq!(generated["result"]["valid"], false);
        assert_eq!(generated["result"]["errors"], validated["result"]);

        let unchecked = call(&s, r#"{"tool":"generate","args":{"withValidation":false}}"#);
        assert!(unchecked["result"]["statements"].is_string());
    }

    #[test]
    fn test_validate_is_idempotent_and_read_only() {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"nope","x":0,"y":0}}"#,
        );

        let before = summary(&s);
        let first = call(&s, r#"{"tool":"validate"}"#);
        let second = call(&s, r#"{"tool":"validate"}"#);

        assert_eq!(first, second);
        assert_eq!(summary(&s), before);
    }

    #[rstest]
    #[case::negative_slot(r#"{"tool":"appendModule","args":{"deviceName":"R1","slot":-1,"model":"WIC-2T"}}"#)]
    #[case::missing_field(r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0}}"#)]
    #[case::wrong_type(r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":"0","y":0}}"#)]
    #[case::empty_name(r#"{"tool":"appendDevice","args":{"name":"","model":"2811","x":0,"y":0}}"#)]
    #[case::empty_commands(r#"{"tool":"appendIosConfig","args":{"deviceName":"R1","commands":""}}"#)]
    #[case::unknown_field(r#"{"tool":"appendPcIpConfig","args":{"deviceName":"PC1","gateway":"10.0.0.1"}}"#)]
    fn test_shape_errors_leave_store_unchanged(#[case] line: &str) {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0,"y":0}}"#,
        );
        let before = summary(&s);

        let response = call(&s, line);
        assert_eq!(response["ok"], false);
        assert!(response["error"].is_string());
        assert_eq!(summary(&s), before);
    }

    #[test]
    fn test_reset_discards_everything() {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0,"y":0}}"#,
        );
        call(
            &s,
            r#"{"tool":"appendIosConfig","args":{"deviceName":"R1","commands":"enable"}}"#,
        );

        assert_eq!(call(&s, r#"{"tool":"reset","args":{}}"#), json!({ "ok": true }));
        assert_eq!(summary(&s)["counts"]["devices"], 0);
        assert_eq!(summary(&s)["counts"]["iosConfigs"], 0);
        assert_eq!(
            call(&s, r#"{"tool":"generate"}"#)["result"]["statements"],
            "// Empty topology: nothing to build"
        );
    }

    #[test]
    fn test_list_catalog() {
        let s = session();
        let response = call(
            &s,
            r#"{"tool":"listCatalog","args":{"kind":"devices","limit":2,"startsWith":"29"}}"#,
        );
        assert_eq!(response["result"]["entries"], json!(["2901", "2911"]));
        assert!(response["result"]["totalKnown"].as_u64().unwrap() > 2);
    }

    #[rstest]
    #[case(0)]
    #[case(501)]
    #[case(-3)]
    fn test_list_catalog_rejects_limit(#[case] limit: i64) {
        let s = session();
        let line = format!(r#"{{"tool":"listCatalog","args":{{"kind":"links","limit":{limit}}}}}"#);
        assert_eq!(call(&s, &line)["ok"], false);
    }

    #[test]
    fn test_summarize_shape() {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"S1","model":"2960-24TT","x":1.5,"y":2}}"#,
        );
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0,"y":0}}"#,
        );

        let result = summary(&s);
        assert_eq!(result["deviceNames"], json!(["S1", "R1"]));
        assert_eq!(result["counts"]["devices"], 2);
        assert_eq!(result["counts"]["links"], 0);
    }

    #[test]
    fn test_default_validation_comes_from_session() {
        let s = Session::new(Catalog::builtin().unwrap(), ValidationRules::default(), false);
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"nope","x":0,"y":0}}"#,
        );

        let response = call(&s, r#"{"tool":"generate","args":{}}"#);
        assert_eq!(
            response["result"]["statements"],
            r#"addDevice("R1", "nope", 0, 0);"#
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected_without_touching_store() {
        let s = session();
        call(
            &s,
            r#"{"tool":"appendDevice","args":{"name":"R1","model":"2811","x":0,"y":0}}"#,
        );

        let response = s.handle_bytes(b"{\"tool\":\"reset\"\xff\xfe}");
        assert_eq!(
            response,
            json!({ "ok": false, "error": "request is not valid UTF-8" })
        );
        assert_eq!(summary(&s)["counts"]["devices"], 1);
    }

    #[rstest]
    #[case::not_json("hello")]
    #[case::missing_tool(r#"{"args":{}}"#)]
    #[case::unknown_tool(r#"{"tool":"dropTable"}"#)]
    fn test_bad_requests(#[case] line: &str) {
        let response = call(&session(), line);
        assert_eq!(response["ok"], false);
        assert!(response["error"].is_string());
    }
}
