use clap::Parser;
use college_finder::domain::locations::{INDIAN_STATES, MAJOR_CITIES};
use college_finder::utils::error::ErrorSeverity;
use college_finder::utils::{logger, validation::Validate};
use college_finder::{CliConfig, GeminiClient, OutputFormat, SearchOrchestrator, Session};
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.list_states || cli.list_cities {
        let names: Vec<&str> = if cli.list_states {
            INDIAN_STATES.to_vec()
        } else {
            MAJOR_CITIES.to_vec()
        };
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    tracing::info!("Starting college-finder CLI");

    // 合併並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    let location = match cli.location_request() {
        Ok(location) => location,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    let client = GeminiClient::from_config(&config)?;
    let orchestrator = SearchOrchestrator::new(client);
    let show_progress = std::io::stderr().is_terminal() && !cli.json_logs;

    // 單次查詢時，非文字格式或 --all 不分頁
    let page_size = if !cli.interactive && (cli.all || config.format != OutputFormat::Text) {
        usize::MAX
    } else {
        config.page_size
    };
    let mut session = Session::new(orchestrator, page_size, config.format, std::io::stdout())
        .with_progress(show_progress);

    if cli.interactive {
        if !config.has_api_key() {
            tracing::warn!("⚠️ No API key configured, searches will fail until GEMINI_API_KEY is set");
        }
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.run(stdin).await?;
        return Ok(());
    }

    let Some(location) = location else {
        eprintln!("❌ No location given. Pass a location, --state, --city or --interactive");
        std::process::exit(3);
    };

    match session.search(&location).await {
        Ok(()) => {
            if session.controller().has_more() {
                tracing::info!(
                    "Showing first {} of {} colleges, use --all or --interactive to see the rest",
                    session.controller().visible().len(),
                    session.controller().total()
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
