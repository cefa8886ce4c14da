//! REPL (Read-Eval-Print Loop) for chatting with the cooking assistant

use crate::ConsoleFormatter;
use crate::progress::reporter::{SimpleProgress, StreamIndicator, StreamProgressReporter};
use colored::Colorize;
use nutrichat_application::{FoodAssistantUseCase, StreamController, StreamProgress, SubmitError};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Help,
    Quit,
    Clear,
    History,
    Recipe(String),
    Describe(String),
    /// A slash command that exists but is missing its argument
    MissingArgument(&'static str),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return ReplCommand::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "clear" | "new" => ReplCommand::Clear,
            "history" => ReplCommand::History,
            "recipe" | "resep" if arg.is_empty() => ReplCommand::MissingArgument("/recipe"),
            "recipe" | "resep" => ReplCommand::Recipe(arg.to_string()),
            "describe" | "info" if arg.is_empty() => ReplCommand::MissingArgument("/describe"),
            "describe" | "info" => ReplCommand::Describe(arg.to_string()),
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

enum Step {
    Progress(Option<StreamProgress>),
    Interrupted,
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: StreamController,
    assistant: FoodAssistantUseCase,
    indicator: Box<dyn StreamIndicator>,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: StreamController, assistant: FoodAssistantUseCase) -> Self {
        Self {
            controller,
            assistant,
            indicator: Box::new(StreamProgressReporter::new()),
            history_path: None,
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.indicator = if show {
            Box::new(StreamProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        self
    }

    /// Set where readline history is kept
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub fn controller(&self) -> &StreamController {
        &self.controller
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if self.handle(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Sampai jumpa!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.controller.close();

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Start over with the recipe conversation for `food_name`.
    pub async fn open_recipe(&mut self, food_name: &str) {
        println!();
        println!("{} {}", "Resep:".cyan().bold(), food_name);
        println!();
        self.indicator.on_waiting();
        let turn = self
            .assistant
            .open_recipe(&mut self.controller, food_name)
            .await;
        self.indicator.on_first_token();
        for seeded in self.controller.session().turns() {
            if seeded != &turn {
                println!("{}", ConsoleFormatter::format_turn(seeded));
            }
        }
        println!("{}", ConsoleFormatter::format_turn(&turn));
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          NutriChat - Asisten Masak          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /recipe <makanan>    - Mulai percakapan resep");
        println!("  /describe <makanan>  - Tampilkan deskripsi makanan");
        println!("  /history             - Tampilkan percakapan");
        println!("  /clear               - Mulai percakapan baru");
        println!("  /help                - Tampilkan bantuan ini");
        println!("  /quit                - Keluar");
        println!();
        println!("Tekan Ctrl-C saat jawaban berjalan untuk membatalkan.");
        println!();
    }

    /// Handle one line. Returns true if the REPL should exit.
    async fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Sampai jumpa!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Clear => {
                self.controller.close();
                println!("{}", "Percakapan baru dimulai.".dimmed());
            }
            ReplCommand::History => {
                println!();
                if self.controller.session().is_empty() {
                    println!("{}", "Belum ada percakapan.".dimmed());
                }
                for turn in self.controller.session().turns() {
                    println!("{}", ConsoleFormatter::format_turn(turn));
                }
            }
            ReplCommand::Recipe(food) => self.open_recipe(&food).await,
            ReplCommand::Describe(food) => {
                let text = self.assistant.describe(&food).await;
                println!();
                println!("{}", ConsoleFormatter::format_food_text(&food, "Deskripsi", &text));
            }
            ReplCommand::MissingArgument(name) => {
                println!("Usage: {} <nama makanan>", name);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Ask(question) => self.process_question(&question).await,
        }
        false
    }

    async fn process_question(&mut self, question: &str) {
        match self.controller.submit(question) {
            Ok(id) => debug!("Submitted question as {}", id),
            Err(SubmitError::EmptyQuestion) => return,
            Err(SubmitError::Busy) => {
                println!("{}", "Jawaban sebelumnya masih berjalan.".yellow());
                return;
            }
        }

        println!();
        println!("{}", "Asisten".cyan().bold());

        // The transport could not be opened; the reply is already final.
        if !self.controller.is_streaming() {
            if let Some(turn) = self.controller.session().last() {
                println!("  {}", turn.content);
            }
            self.indicator.on_finished(true);
            println!();
            return;
        }

        self.stream_reply().await;
        println!();
    }

    async fn stream_reply(&mut self) {
        self.indicator.on_waiting();
        let mut printed_any = false;
        let mut stdout = std::io::stdout();

        loop {
            let step = tokio::select! {
                progress = self.controller.next_event() => Step::Progress(progress),
                _ = tokio::signal::ctrl_c() => Step::Interrupted,
            };

            match step {
                Step::Progress(Some(StreamProgress::Token(text))) => {
                    if !printed_any {
                        self.indicator.on_first_token();
                        print!("  ");
                        printed_any = true;
                    }
                    print!("{}", text.replace('\n', "\n  "));
                    let _ = stdout.flush();
                }
                Step::Progress(Some(StreamProgress::Finished(_))) => {
                    self.indicator.on_finished(false);
                    println!();
                    return;
                }
                Step::Progress(Some(StreamProgress::Failed(turn))) => {
                    if printed_any {
                        println!();
                    } else {
                        println!("  {}", turn.content);
                    }
                    self.indicator.on_finished(true);
                    return;
                }
                Step::Progress(None) => {
                    self.indicator.on_finished(false);
                    return;
                }
                Step::Interrupted => {
                    self.controller.cancel();
                    if printed_any {
                        println!();
                    }
                    self.indicator.on_cancelled();
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nutrichat_application::{
        ApiHealth, ChatRequest, ChatTransport, GatewayError, NutritionApi, StreamSubscription,
    };
    use nutrichat_domain::{
        BmiRequest, Food, NutritionRequest, Recommendation, Role, StreamEvent,
    };
    use std::sync::Arc;

    // ==================== Test Mocks ====================

    /// Replies to every question with fixed frames.
    struct CannedTransport {
        frames: Vec<&'static str>,
    }

    impl ChatTransport for CannedTransport {
        fn open(&self, _request: ChatRequest) -> Result<StreamSubscription, GatewayError> {
            let (tx, sub) = StreamSubscription::channel();
            let frames = self.frames.clone();
            tokio::spawn(async move {
                for frame in frames {
                    if !tx.send(StreamEvent::from_frame(frame)).await {
                        break;
                    }
                }
            });
            Ok(sub)
        }
    }

    struct RecipeApi;

    #[async_trait]
    impl NutritionApi for RecipeApi {
        async fn recipe(&self, food_name: &str) -> Result<String, GatewayError> {
            Ok(format!("Resep {}", food_name))
        }

        async fn description(&self, _food_name: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Timeout)
        }

        async fn foods(&self) -> Result<Vec<Food>, GatewayError> {
            Ok(Vec::new())
        }

        async fn recommend_by_bmi(
            &self,
            _request: &BmiRequest,
        ) -> Result<Recommendation, GatewayError> {
            Err(GatewayError::Timeout)
        }

        async fn recommend_by_nutrition(
            &self,
            _request: &NutritionRequest,
        ) -> Result<Recommendation, GatewayError> {
            Err(GatewayError::Timeout)
        }

        async fn health(&self) -> Result<ApiHealth, GatewayError> {
            Err(GatewayError::Timeout)
        }
    }

    fn repl(frames: Vec<&'static str>) -> ChatRepl {
        let controller = StreamController::new(Arc::new(CannedTransport { frames }));
        let assistant = FoodAssistantUseCase::new(Arc::new(RecipeApi));
        ChatRepl::new(controller, assistant).with_progress(false)
    }

    #[test]
    fn parse_plain_text_is_a_question() {
        assert_eq!(
            ReplCommand::parse("  Berapa lama merebus telur? "),
            ReplCommand::Ask("Berapa lama merebus telur?".to_string())
        );
    }

    #[test]
    fn parse_commands_with_arguments() {
        assert_eq!(
            ReplCommand::parse("/recipe Nasi Uduk"),
            ReplCommand::Recipe("Nasi Uduk".to_string())
        );
        assert_eq!(
            ReplCommand::parse("/info   Gado-gado"),
            ReplCommand::Describe("Gado-gado".to_string())
        );
        assert_eq!(
            ReplCommand::parse("/recipe"),
            ReplCommand::MissingArgument("/recipe")
        );
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("/foo bar"),
            ReplCommand::Unknown("/foo bar".to_string())
        );
    }

    #[tokio::test]
    async fn question_is_streamed_into_session() {
        let mut repl = repl(vec!["Rebus ", "10 menit", "[DONE]"]);
        assert!(!repl.handle(ReplCommand::parse("Berapa lama?")).await);

        let session = repl.controller().session();
        assert!(!repl.controller().is_streaming());
        assert_eq!(session.len(), 2);
        let last = session.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Rebus 10 menit");
    }

    #[tokio::test]
    async fn recipe_command_reseeds_conversation() {
        let mut repl = repl(vec!["ok", "[DONE]"]);
        repl.handle(ReplCommand::parse("halo")).await;
        repl.handle(ReplCommand::parse("/recipe Rendang")).await;

        let turns: Vec<_> = repl.controller().session().turns().cloned().collect();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].content, "Resep Rendang");
    }

    #[tokio::test]
    async fn clear_and_quit() {
        let mut repl = repl(vec!["ok", "[DONE]"]);
        repl.handle(ReplCommand::parse("halo")).await;
        assert!(!repl.handle(ReplCommand::Clear).await);
        assert!(repl.controller().session().is_empty());
        assert!(repl.handle(ReplCommand::Quit).await);
    }
}
