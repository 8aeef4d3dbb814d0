use hot_lsp_server::Server;
use lsp_server::{Connection, Message, Notification, Request, RequestId, Response};
use serde_json::{Value, json};

const URI: &str = "file:///Class1.cs";
const TEXT: &str = "using System;\nusing Microsoft;\n\npublic class Class1 { }\n";

fn request(id: i32, method: &str, params: Value) -> Message {
    Request::new(RequestId::from(id), method.to_owned(), params).into()
}

fn notification(method: &str, params: Value) -> Message {
    Notification::new(method.to_owned(), params).into()
}

fn code_action(id: i32, line: u32, character: u32) -> Message {
    let position = json!({ "line": line, "character": character });
    request(
        id,
        "textDocument/codeAction",
        json!({
            "textDocument": { "uri": URI },
            "range": { "start": position, "end": position },
            "context": { "diagnostics": [] },
        }),
    )
}

fn did_open(uri: &str, text: &str) -> Message {
    notification(
        "textDocument/didOpen",
        json!({ "textDocument": { "uri": uri, "languageId": "csharp", "version": 0, "text": text } }),
    )
}

/// Queues `messages` after the handshake and runs the server until exit; returns every response.
fn session(initialization_options: Value, messages: Vec<Message>) -> Vec<Response> {
    let (server, client) = Connection::memory();

    let initialize = json!({ "capabilities": {}, "initializationOptions": initialization_options });
    client.sender.send(request(0, "initialize", initialize)).unwrap();
    client.sender.send(notification("initialized", json!({}))).unwrap();
    for message in messages {
        client.sender.send(message).unwrap();
    }
    client.sender.send(request(99, "shutdown", Value::Null)).unwrap();
    client.sender.send(notification("exit", Value::Null)).unwrap();

    let handle = std::thread::spawn(move || Server::with_connection(server, None)?.run());
    handle.join().unwrap().unwrap();

    client
        .receiver
        .try_iter()
        .filter_map(|message| match message {
            Message::Response(response) => Some(response),
            _ => None,
        })
        .collect()
}

fn response(responses: &[Response], id: i32) -> &Response {
    let id = RequestId::from(id);
    responses.iter().find(|response| response.id == id).unwrap()
}

fn titles(response: &Response) -> Vec<&str> {
    let actions = response.result.as_ref().unwrap().as_array().unwrap();
    actions.iter().map(|action| action["title"].as_str().unwrap()).collect()
}

#[test]
fn code_actions_carry_minimal_edits() {
    let responses = session(Value::Null, vec![did_open(URI, TEXT), code_action(1, 3, 2)]);

    let code_actions = response(&responses, 1);
    assert_eq!(
        titles(code_actions),
        [
            "To Protected",
            "To Internal",
            "To Private",
            "To Protected Internal",
            "Add newline betweeen using groups"
        ]
    );

    let actions = code_actions.result.as_ref().unwrap();
    assert_eq!(actions[1]["kind"], "refactor.rewrite");
    assert_eq!(actions[1]["data"], json!({ "kind": "changeAccessibility", "target": "internal" }));
    assert_eq!(
        actions[1]["edit"]["changes"][URI],
        json!([{
            "range": { "start": { "line": 3, "character": 0 }, "end": { "line": 3, "character": 6 } },
            "newText": "internal",
        }])
    );
    assert_eq!(
        actions[4]["edit"]["changes"][URI],
        json!([{
            "range": { "start": { "line": 1, "character": 0 }, "end": { "line": 1, "character": 0 } },
            "newText": "\n",
        }])
    );

    assert_eq!(response(&responses, 99).result, Some(Value::Null));
}

#[test]
fn follows_document_changes() {
    let changed = "using System;\n\nusing Microsoft;\n\ninternal class Class1 { }\n";
    let responses = session(
        Value::Null,
        vec![
            did_open(URI, TEXT),
            notification(
                "textDocument/didChange",
                json!({
                    "textDocument": { "uri": URI, "version": 1 },
                    "contentChanges": [{ "text": changed }],
                }),
            ),
            code_action(1, 4, 0),
            notification("textDocument/didClose", json!({ "textDocument": { "uri": URI } })),
            code_action(2, 4, 0),
        ],
    );

    assert_eq!(
        titles(response(&responses, 1)),
        ["To Public", "To Protected", "To Private", "To Protected Internal"]
    );

    let closed = response(&responses, 2);
    assert_eq!(closed.error.as_ref().unwrap().code, -32603);
}

#[test]
fn cancelled_request_gets_no_result() {
    let responses = session(
        Value::Null,
        vec![
            did_open(URI, TEXT),
            code_action(1, 3, 0),
            notification("$/cancelRequest", json!({ "id": 1 })),
            code_action(2, 3, 0),
        ],
    );

    let cancelled = response(&responses, 1);
    assert!(cancelled.result.is_none());
    assert_eq!(
        cancelled.error.as_ref().unwrap().code,
        lsp_server::ErrorCode::RequestCanceled as i32
    );
    assert_eq!(titles(response(&responses, 2)).len(), 5);
}

#[test]
fn configuration_disables_assists() {
    let responses = session(
        json!({ "separateUsingGroups": false }),
        vec![
            did_open(URI, TEXT),
            code_action(1, 3, 0),
            notification(
                "workspace/didChangeConfiguration",
                json!({ "settings": { "changeAccessibility": false } }),
            ),
            code_action(2, 3, 0),
        ],
    );

    assert_eq!(titles(response(&responses, 1)).len(), 4);
    assert_eq!(titles(response(&responses, 2)), ["Add newline betweeen using groups"]);
}

#[test]
fn reports_parse_diagnostics() {
    let uri = "file:///Broken.cs";
    let responses = session(
        Value::Null,
        vec![
            did_open(uri, "using System\nclass A { }\n"),
            request(1, "textDocument/diagnostic", json!({ "textDocument": { "uri": uri } })),
        ],
    );

    let report = response(&responses, 1).result.as_ref().unwrap();
    assert_eq!(report["kind"], "full");
    assert_eq!(report["items"][0]["message"], "expected `;`");
    assert_eq!(report["items"][0]["range"]["start"], json!({ "line": 1, "character": 0 }));
}

#[test]
fn unknown_requests_are_rejected() {
    let responses = session(Value::Null, vec![request(1, "textDocument/hover", json!({}))]);
    let error = response(&responses, 1).error.as_ref().unwrap();
    assert_eq!(error.code, lsp_server::ErrorCode::MethodNotFound as i32);
}

#[test]
fn malformed_config_fails_initialize() {
    let (server, client) = Connection::memory();
    let initialize = json!({ "capabilities": {}, "initializationOptions": { "newline": "cr" } });
    client.sender.send(request(0, "initialize", initialize)).unwrap();

    assert!(Server::with_connection(server, None).is_err());
    let Ok(Message::Response(response)) = client.receiver.try_recv() else {
        panic!("no response to initialize");
    };
    assert_eq!(response.error.unwrap().code, lsp_server::ErrorCode::InvalidParams as i32);
}
