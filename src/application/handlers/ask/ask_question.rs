//! AskQuestion command handler.
//!
//! Runs the fixed exchange with the hosted assistant service:
//!
//! 1. Validate the question
//! 2. List assistants and pick the first one
//! 3. Create a thread and post the question as a `user` message
//! 4. Start a run and poll it until it is `completed` or `failed`
//! 5. Read the first assistant message and render it to HTML
//!
//! Steps 1-4 (up to starting the run) are exposed as [`AskQuestionHandler::start`]
//! and the wait as [`AskQuestionHandler::await_answer`], so the streaming
//! endpoint can open its event stream once the run exists.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::domain::assistant::{
    AssistantId, Question, Run, RunError, RunStatus, ThreadId, ThreadMessage,
};
use crate::ports::{AssistantService, AssistantServiceError, MarkdownRenderer};

/// Command to ask the assistant a question.
#[derive(Debug, Clone)]
pub struct AskQuestionCommand {
    /// Raw question from the request body; `None` when absent.
    pub question: Option<String>,
}

impl AskQuestionCommand {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
        }
    }
}

/// Errors that can occur while asking a question.
#[derive(Debug, Clone, Error)]
pub enum AskQuestionError {
    /// Question absent or empty.
    #[error("question is required")]
    MissingQuestion,

    /// No assistant available, or the listing itself failed.
    #[error("no assistants found")]
    NoAssistants,

    /// The run ended in the `failed` state.
    #[error("assistant run failed")]
    RunFailed { last_error: Option<RunError> },

    /// Run completed without any assistant-authored message.
    #[error("assistant produced no response")]
    NoAssistantResponse,

    /// First block of the answer is not text.
    #[error("unsupported answer content: {0}")]
    UnsupportedContent(String),

    /// Any other failure talking to the service.
    #[error("assistant service error: {0}")]
    Service(#[from] AssistantServiceError),
}

/// A run that has been started on a fresh thread.
#[derive(Debug, Clone)]
pub struct StartedRun {
    pub assistant_id: AssistantId,
    pub thread_id: ThreadId,
    pub run: Run,
}

/// The assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Text as written by the assistant.
    pub markdown: String,
    /// Rendered HTML fragment returned to clients.
    pub html: String,
}

/// Handler configuration.
#[derive(Debug, Clone)]
pub struct AskHandlerConfig {
    /// Delay between two status checks of a run.
    pub poll_interval: Duration,
}

impl Default for AskHandlerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Handler for AskQuestion commands.
pub struct AskQuestionHandler {
    assistant_service: Arc<dyn AssistantService>,
    renderer: Arc<dyn MarkdownRenderer>,
    config: AskHandlerConfig,
}

impl AskQuestionHandler {
    /// Creates a handler with the default 2 second poll interval.
    pub fn new(
        assistant_service: Arc<dyn AssistantService>,
        renderer: Arc<dyn MarkdownRenderer>,
    ) -> Self {
        Self::with_config(assistant_service, renderer, AskHandlerConfig::default())
    }

    /// Creates a handler with custom configuration.
    pub fn with_config(
        assistant_service: Arc<dyn AssistantService>,
        renderer: Arc<dyn MarkdownRenderer>,
        config: AskHandlerConfig,
    ) -> Self {
        Self {
            assistant_service,
            renderer,
            config,
        }
    }

    /// Runs the whole exchange without progress reporting.
    pub async fn handle(&self, cmd: AskQuestionCommand) -> Result<Answer, AskQuestionError> {
        let started = self.start(cmd).await?;
        self.await_answer(&started, None).await
    }

    /// Validates the question and starts a run on a new thread.
    ///
    /// No external call is made when the question is missing.
    pub async fn start(&self, cmd: AskQuestionCommand) -> Result<StartedRun, AskQuestionError> {
        let question =
            Question::parse(cmd.question).map_err(|_| AskQuestionError::MissingQuestion)?;

        let assistants = match self.assistant_service.list_assistants().await {
            Ok(assistants) => assistants,
            Err(err) => {
                tracing::warn!(error = %err, "failed to list assistants");
                return Err(AskQuestionError::NoAssistants);
            }
        };

        // First in list order; the service decides the ordering.
        let assistant_id = assistants
            .into_iter()
            .next()
            .ok_or(AskQuestionError::NoAssistants)?;
        tracing::info!(assistant_id = %assistant_id, "assistant selected");

        let thread_id = self.assistant_service.create_thread().await?;
        tracing::info!(thread_id = %thread_id, "thread created");

        self.assistant_service
            .add_user_message(&thread_id, question.as_str())
            .await?;

        let run = self
            .assistant_service
            .create_run(&thread_id, &assistant_id)
            .await?;
        tracing::info!(run_id = %run.id, status = %run.status, "run started");

        Ok(StartedRun {
            assistant_id,
            thread_id,
            run,
        })
    }

    /// Polls the run until it is `completed` or `failed`, then reads the answer.
    ///
    /// Every non-terminal status is sent to `progress` before sleeping. A
    /// closed receiver does not stop polling. There is no upper bound on the
    /// number of polls.
    pub async fn await_answer(
        &self,
        started: &StartedRun,
        progress: Option<&mpsc::Sender<RunStatus>>,
    ) -> Result<Answer, AskQuestionError> {
        let thread_id = &started.thread_id;
        let run_id = &started.run.id;

        let mut run = self.assistant_service.retrieve_run(thread_id, run_id).await?;
        while !run.status.is_terminal() {
            tracing::debug!(run_id = %run_id, status = %run.status, "run pending");
            if let Some(tx) = progress {
                let _ = tx.send(run.status.clone()).await;
            }
            sleep(self.config.poll_interval).await;
            run = self.assistant_service.retrieve_run(thread_id, run_id).await?;
        }

        if run.status == RunStatus::Failed {
            match &run.last_error {
                Some(last_error) => tracing::error!(
                    run_id = %run_id,
                    last_error = %last_error,
                    "assistant run failed"
                ),
                None => tracing::error!(run_id = %run_id, "assistant run failed"),
            }
            return Err(AskQuestionError::RunFailed {
                last_error: run.last_error,
            });
        }

        let messages = self.assistant_service.list_messages(thread_id).await?;
        let markdown = first_assistant_text(messages)?;
        tracing::debug!(thread_id = %thread_id, answer = %markdown, "assistant answered");

        let html = self.renderer.to_html(&markdown);
        Ok(Answer { markdown, html })
    }
}

/// Text of the first content block of the first assistant message.
fn first_assistant_text(messages: Vec<ThreadMessage>) -> Result<String, AskQuestionError> {
    let reply = messages
        .into_iter()
        .find(ThreadMessage::is_assistant)
        .ok_or(AskQuestionError::NoAssistantResponse)?;

    let block = reply
        .first_content()
        .ok_or_else(|| AskQuestionError::UnsupportedContent("empty message".to_string()))?;

    block
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| AskQuestionError::UnsupportedContent(block.kind().to_string()))
}
