use async_trait::async_trait;
use chrono::NaiveDate;
use college_finder::app::session::{parse_command, SessionCommand};
use college_finder::core::query::QueryBuilder;
use college_finder::core::ModelClient;
use college_finder::{FinderError, OutputFormat, Result, SearchOrchestrator, Session};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 固定回傳同一份 JSON，並計算呼叫次數
struct FixedClient {
    reply: String,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ModelClient for FixedClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct UnconfiguredClient;

#[async_trait]
impl ModelClient for UnconfiguredClient {
    fn ensure_ready(&self) -> Result<()> {
        Err(FinderError::MissingApiKeyError)
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        panic!("generate must not be called without an API key");
    }
}

fn colleges_json(count: usize) -> String {
    let entries: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "name": format!("College {}", i),
                "address": format!("Road {}, Pune", i),
                "coursesAvailable": ["BCA"],
                "fees": [{"course": "BCA", "amount": "₹90,000"}],
                "type": "IT"
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

fn session_with<M: ModelClient>(client: M) -> Session<M, Vec<u8>> {
    let queries = QueryBuilder::for_date(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    Session::new(
        SearchOrchestrator::with_queries(client, queries),
        6,
        OutputFormat::Text,
        Vec::new(),
    )
}

#[test]
fn test_parse_commands() {
    assert_eq!(parse_command("state Kerala"), SessionCommand::State("Kerala".to_string()));
    assert_eq!(parse_command("CITY  navi mumbai "), SessionCommand::City("navi mumbai".to_string()));
    assert_eq!(parse_command("state"), SessionCommand::ListStates);
    assert_eq!(parse_command("cities"), SessionCommand::ListCities);
    assert_eq!(parse_command("more"), SessionCommand::More);
    assert_eq!(parse_command("  "), SessionCommand::Empty);
    assert_eq!(parse_command("quit"), SessionCommand::Quit);
    assert_eq!(
        parse_command("Salt Lake, Kolkata"),
        SessionCommand::Search("Salt Lake, Kolkata".to_string())
    );
    assert_eq!(
        parse_command("search Whitefield"),
        SessionCommand::Search("Whitefield".to_string())
    );
}

#[tokio::test]
async fn test_interactive_search_and_load_more() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = FixedClient {
        reply: colleges_json(8),
        calls: calls.clone(),
    };
    let mut session = session_with(client);

    let input: &[u8] = b"city pune\nmore\nmore\nquit\n";
    session.run(input).await.unwrap();

    // load more 不會重新查詢
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.controller().visible().len(), 8);

    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("Colleges Found in Pune"));
    assert!(output.contains("Showing 6 of 8 colleges • 2 more available"));
    assert!(output.contains("Showing 8 of 8 colleges"));
    assert!(output.contains("College 7  [IT]"));
    assert!(output.contains("All 8 colleges are already shown"));
    assert!(output.contains("Bye"));
}

#[tokio::test]
async fn test_unknown_state_is_searched_as_custom_location() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = FixedClient {
        reply: colleges_json(1),
        calls: calls.clone(),
    };
    let mut session = session_with(client);

    session
        .handle(SessionCommand::State("Whitefield".to_string()))
        .await
        .unwrap();

    assert_eq!(session.controller().location(), Some("Whitefield"));
    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("not in the state list"));
}

#[tokio::test]
async fn test_no_results_banner() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = FixedClient {
        reply: "[]".to_string(),
        calls: calls.clone(),
    };
    let mut session = session_with(client);

    let error = session.search("Nowhereistan").await.unwrap_err();
    assert!(matches!(error, FinderError::NoResultsError { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("No colleges found in Nowhereistan"));
}

#[tokio::test]
async fn test_missing_api_key_is_reported_without_a_call() {
    let mut session = session_with(UnconfiguredClient);

    let error = session.search("Goa").await.unwrap_err();
    assert!(matches!(error, FinderError::MissingApiKeyError));
    assert_eq!(
        session.controller().error(),
        Some("Gemini API key is not configured. Please add GEMINI_API_KEY to your environment.")
    );
}

#[tokio::test]
async fn test_more_before_search() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = FixedClient {
        reply: "[]".to_string(),
        calls: calls.clone(),
    };
    let mut session = session_with(client);

    let keep_going = session.handle(SessionCommand::More).await.unwrap();
    assert!(keep_going);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("search for a location first"));
}

#[test]
fn test_quit_stops_session() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut session = session_with(FixedClient {
        reply: "[]".to_string(),
        calls: calls.clone(),
    });

    let keep_going = tokio_test::block_on(session.handle(SessionCommand::Quit))?;
    assert!(!keep_going);

    let keep_going = tokio_test::block_on(session.handle(SessionCommand::ListStates))?;
    assert!(keep_going);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let output = String::from_utf8(session.into_output())?;
    assert!(output.contains("Andaman and Nicobar Islands"));
    Ok(())
}
