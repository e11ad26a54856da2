use crate::app::render::{self, OutputFormat, ResultPage};
use crate::core::controller::SearchController;
use crate::core::search::SearchOrchestrator;
use crate::core::ModelClient;
use crate::domain::locations::{LocationKind, LocationSelection};
use crate::domain::model::SearchOutcome;
use crate::utils::error::{ErrorCategory, FinderError, Result};
use crate::utils::progress::ProgressIndicator;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    State(String),
    City(String),
    Search(String),
    More,
    ListStates,
    ListCities,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match (head.to_ascii_lowercase().as_str(), rest) {
        ("", _) => SessionCommand::Empty,
        ("state", "") | ("states", _) => SessionCommand::ListStates,
        ("city", "") | ("cities", _) => SessionCommand::ListCities,
        ("state", name) => SessionCommand::State(name.to_string()),
        ("city", name) => SessionCommand::City(name.to_string()),
        ("search", text) => SessionCommand::Search(text.to_string()),
        ("more", "") => SessionCommand::More,
        ("help", "") | ("?", "") => SessionCommand::Help,
        ("quit", "") | ("exit", "") | ("q", "") => SessionCommand::Quit,
        _ => SessionCommand::Search(line.to_string()),
    }
}

const HELP: &str = "\
Commands:
  state <name>    search a state or union territory from the list
  city <name>     search a major city from the list
  search <text>   search a custom location (bare text works too)
  more            show the next page of results
  states, cities  list the selectable locations
  help            show this help
  quit            leave the session";

/// 終端機版的搜尋表單：選擇地點、送出、載入更多、顯示錯誤
pub struct Session<M: ModelClient, W: Write> {
    orchestrator: SearchOrchestrator<M>,
    controller: SearchController,
    selection: LocationSelection,
    format: OutputFormat,
    out: W,
    show_progress: bool,
}

impl<M: ModelClient, W: Write> Session<M, W> {
    pub fn new(orchestrator: SearchOrchestrator<M>, page_size: usize, format: OutputFormat, out: W) -> Self {
        Self {
            orchestrator,
            controller: SearchController::new(page_size),
            selection: LocationSelection::default(),
            format,
            out,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// 互動模式主迴圈，讀到 EOF 或 quit 時結束
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        writeln!(self.out, "🎓 College Finder India: find IT & Management colleges")?;
        writeln!(self.out, "{}", HELP)?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if !self.handle(parse_command(&line)).await? {
                break;
            }
        }

        writeln!(self.out, "👋 Bye")?;
        Ok(())
    }

    /// 處理一個指令；回傳 false 表示結束
    pub async fn handle(&mut self, command: SessionCommand) -> Result<bool> {
        match command {
            SessionCommand::Empty => {}
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Help => writeln!(self.out, "{}", HELP)?,
            SessionCommand::ListStates => self.list(LocationKind::State)?,
            SessionCommand::ListCities => self.list(LocationKind::City)?,
            SessionCommand::State(name) => self.pick(LocationKind::State, &name).await?,
            SessionCommand::City(name) => self.pick(LocationKind::City, &name).await?,
            SessionCommand::Search(text) => {
                self.selection.set_custom(&text);
                self.submit().await?;
            }
            SessionCommand::More => self.load_more()?,
        }
        Ok(true)
    }

    /// 搜尋並顯示第一頁。設定錯誤、查無結果、搜尋失敗都以 Err 回傳，畫面已顯示錯誤
    pub async fn search(&mut self, location: &str) -> Result<()> {
        let ticket = self.controller.start_search(location);
        let progress = ProgressIndicator::start(location, self.show_progress);
        let result = self.orchestrator.search(location).await;
        progress.finish();

        let terminal_error = match result {
            Ok(outcome) => {
                let error = match &outcome {
                    SearchOutcome::Success(_) => None,
                    SearchOutcome::NoResults { location } => Some(FinderError::NoResultsError {
                        location: location.clone(),
                    }),
                    SearchOutcome::SearchFailed { location, .. } => {
                        Some(FinderError::SearchFailedError {
                            location: location.clone(),
                        })
                    }
                };
                self.controller.apply(&ticket, outcome);
                error
            }
            Err(e) => {
                self.controller.search_failed(&ticket, e.user_friendly_message());
                Some(e)
            }
        };

        if let Some(error) = terminal_error {
            let message = self
                .controller
                .error()
                .map(str::to_string)
                .unwrap_or_else(|| error.user_friendly_message());
            writeln!(self.out, "❌ {}", message)?;
            return Err(error);
        }

        self.show_page(false)?;
        Ok(())
    }

    async fn pick(&mut self, kind: LocationKind, name: &str) -> Result<()> {
        if self.selection.kind() != kind {
            self.selection.switch_kind(kind);
        }
        if !self.selection.select(name) {
            writeln!(
                self.out,
                "⚠️ '{}' is not in the {} list, searching it as a custom location",
                name,
                kind.label().to_lowercase()
            )?;
            self.selection.set_custom(name);
        }
        self.submit().await
    }

    async fn submit(&mut self) -> Result<()> {
        let Some(location) = self.selection.resolve() else {
            writeln!(self.out, "⚠️ Enter a location to search")?;
            return Ok(());
        };

        match self.search(&location).await {
            Ok(()) => Ok(()),
            Err(e) if e.category() == ErrorCategory::Output => Err(e),
            Err(e) => {
                tracing::debug!("Search ended without results: {}", e);
                writeln!(self.out, "💡 {}", e.recovery_suggestion())?;
                Ok(())
            }
        }
    }

    fn load_more(&mut self) -> Result<()> {
        if self.controller.total() == 0 {
            writeln!(self.out, "⚠️ Nothing to show yet, search for a location first")?;
            return Ok(());
        }
        if self.controller.load_more() == 0 {
            writeln!(self.out, "✅ All {} colleges are already shown", self.controller.total())?;
            return Ok(());
        }
        self.show_page(true)
    }

    fn show_page(&mut self, latest_only: bool) -> Result<()> {
        let colleges = if latest_only {
            self.controller.latest_page()
        } else {
            self.controller.visible()
        };
        let page = ResultPage {
            location: self.controller.location().unwrap_or_default(),
            colleges,
            shown: self.controller.visible().len(),
            total: self.controller.total(),
        };
        render::render(&mut self.out, self.format, &page)
    }

    fn list(&mut self, kind: LocationKind) -> Result<()> {
        writeln!(self.out, "{}s:", kind.label())?;
        for chunk in kind.options().chunks(4) {
            writeln!(self.out, "  {}", chunk.join(" | "))?;
        }
        Ok(())
    }
}
