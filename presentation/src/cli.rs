use application::profile::GenerationProfile;
use application::rag_service::RagService;
use clap::{Parser, ValueEnum};
use domain::models::RunStage;
use infrastructure::config::{Config, DEFAULT_SETTINGS_PATH};
use infrastructure::openai_client::OpenAiClient;
use infrastructure::search::SearchClient;
use shared::input::{ask_question, normalize_question};
use shared::telemetry::Telemetry;
use shared::types::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::presenter::ConsolePresenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// One user message, temperature 0.3, up to 800 tokens
    Grounded,
    /// System and user message, temperature 1.0, up to 100 tokens
    Brief,
}

impl From<ProfileArg> for GenerationProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Grounded => GenerationProfile::Grounded,
            ProfileArg::Brief => GenerationProfile::Brief,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rag-demo")]
#[command(about = "Answer a question from a vector index with a streamed chat completion")]
pub struct Cli {
    /// Settings file with search and OpenAI endpoints
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Prompt and sampling configuration
    #[arg(long, value_enum, default_value_t = ProfileArg::Grounded)]
    pub profile: ProfileArg,

    /// Do not print citations after the answer
    #[arg(long)]
    pub no_citations: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// The question (asked interactively when omitted)
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn from_settings(cli: &Cli) -> Result<Self> {
        Ok(Self::new(Config::load(&cli.settings)?))
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        self.run_with(cli, std::io::stdout().lock()).await
    }

    /// Same as `run`, writing the answer and citations to `out`.
    pub async fn run_with<W: Write>(&self, cli: Cli, out: W) -> Result<()> {
        let telemetry = Telemetry::new();
        info!(stage = %RunStage::AwaitingQuery, "reading question");
        let question = if cli.question.is_empty() {
            ask_question("Enter your question")?
        } else {
            normalize_question(&cli.question.join(" "))?
        };

        let openai = OpenAiClient::new(&self.config.openai);
        let service = RagService::new(
            openai.embedder(
                &self.config.openai.embedding_deployment,
                self.config.openai.embedding_dimensions,
            ),
            SearchClient::new(&self.config.search),
            openai.chat(&self.config.openai.chat_deployment),
        )
        .with_profile(cli.profile.into());

        let answer = service.answer(&question).await?;

        info!(stage = %RunStage::Presenting, citations = answer.citations.len(), "streaming answer");
        let mut presenter = ConsolePresenter::new(out);
        presenter.write_banner()?;
        if cli.no_citations {
            presenter.write_stream(answer.fragments).await?;
        } else {
            presenter.present(answer.fragments, &answer.citations).await?;
        }

        info!(stage = %RunStage::Done, elapsed_ms = telemetry.elapsed_ms() as u64, "run complete");
        Ok(())
    }
}
