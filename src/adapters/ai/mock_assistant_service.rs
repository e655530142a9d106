//! Mock Assistant Service for testing.
//!
//! Provides a scripted implementation of the AssistantService port, allowing
//! the request flow to run without calling the hosted API.
//!
//! # Features
//!
//! - Configured assistant list and thread messages
//! - Scripted run status sequence (the last status repeats)
//! - Error injection per operation
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let service = MockAssistantService::new()
//!     .with_assistants(["asst_1"])
//!     .with_run_statuses([RunStatus::Queued, RunStatus::Completed])
//!     .with_messages(vec![ThreadMessage::assistant("Hola")]);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::assistant::{
    AssistantId, Run, RunError, RunId, RunStatus, ThreadId, ThreadMessage,
};
use crate::ports::{AssistantService, AssistantServiceError};

/// Operations of the port, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListAssistants,
    CreateThread,
    AddUserMessage,
    CreateRun,
    RetrieveRun,
    ListMessages,
}

/// A recorded call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListAssistants,
    CreateThread,
    AddUserMessage { thread_id: ThreadId, content: String },
    CreateRun { thread_id: ThreadId, assistant_id: AssistantId },
    RetrieveRun { thread_id: ThreadId, run_id: RunId },
    ListMessages { thread_id: ThreadId },
}

impl MockCall {
    pub fn operation(&self) -> MockOperation {
        match self {
            Self::ListAssistants => MockOperation::ListAssistants,
            Self::CreateThread => MockOperation::CreateThread,
            Self::AddUserMessage { .. } => MockOperation::AddUserMessage,
            Self::CreateRun { .. } => MockOperation::CreateRun,
            Self::RetrieveRun { .. } => MockOperation::RetrieveRun,
            Self::ListMessages { .. } => MockOperation::ListMessages,
        }
    }
}

/// Mock assistant service for testing.
#[derive(Debug, Clone)]
pub struct MockAssistantService {
    assistants: Vec<AssistantId>,
    messages: Vec<ThreadMessage>,
    last_error: Option<RunError>,
    failures: HashMap<MockOperation, AssistantServiceError>,
    /// Remaining statuses for `retrieve_run`; the last one is never removed.
    statuses: Arc<Mutex<VecDeque<RunStatus>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    threads_created: Arc<Mutex<u32>>,
}

impl Default for MockAssistantService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAssistantService {
    /// Creates a mock with no assistants, no messages, and runs that
    /// complete on the first poll.
    pub fn new() -> Self {
        Self {
            assistants: Vec::new(),
            messages: Vec::new(),
            last_error: None,
            failures: HashMap::new(),
            statuses: Arc::new(Mutex::new(VecDeque::from([RunStatus::Completed]))),
            calls: Arc::new(Mutex::new(Vec::new())),
            threads_created: Arc::new(Mutex::new(0)),
        }
    }

    /// Sets the assistants returned by `list_assistants`, in order.
    pub fn with_assistants<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assistants = ids.into_iter().map(AssistantId::new).collect();
        self
    }

    /// Sets the status sequence observed by successive `retrieve_run` calls.
    pub fn with_run_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        let mut queue = self.statuses.lock().unwrap();
        *queue = statuses.into_iter().collect();
        drop(queue);
        self
    }

    /// Sets the `last_error` attached to retrieved runs.
    pub fn with_last_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.last_error = Some(RunError {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    /// Sets the messages returned by `list_messages`.
    pub fn with_messages(mut self, messages: Vec<ThreadMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Makes every call of `operation` fail with `error`.
    pub fn with_failure(mut self, operation: MockOperation, error: AssistantServiceError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls of one operation.
    pub fn count(&self, operation: MockOperation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    fn record(&self, call: MockCall) -> Result<(), AssistantServiceError> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);
        match self.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap_or(RunStatus::Completed)
        } else {
            statuses.front().cloned().unwrap_or(RunStatus::Completed)
        }
    }
}

#[async_trait]
impl AssistantService for MockAssistantService {
    async fn list_assistants(&self) -> Result<Vec<AssistantId>, AssistantServiceError> {
        self.record(MockCall::ListAssistants)?;
        Ok(self.assistants.clone())
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantServiceError> {
        self.record(MockCall::CreateThread)?;
        let mut created = self.threads_created.lock().unwrap();
        *created += 1;
        Ok(ThreadId::new(format!("thread_{}", created)))
    }

    async fn add_user_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<(), AssistantServiceError> {
        self.record(MockCall::AddUserMessage {
            thread_id: thread_id.clone(),
            content: content.to_string(),
        })
    }

    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantServiceError> {
        self.record(MockCall::CreateRun {
            thread_id: thread_id.clone(),
            assistant_id: assistant_id.clone(),
        })?;
        Ok(Run::new(RunId::new(format!("run_for_{}", thread_id)), RunStatus::Queued))
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<Run, AssistantServiceError> {
        self.record(MockCall::RetrieveRun {
            thread_id: thread_id.clone(),
            run_id: run_id.clone(),
        })?;
        let status = self.next_status();
        let last_error = match status {
            RunStatus::Failed => self.last_error.clone(),
            _ => None,
        };
        Ok(Run {
            id: run_id.clone(),
            status,
            last_error,
        })
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantServiceError> {
        self.record(MockCall::ListMessages {
            thread_id: thread_id.clone(),
        })?;
        Ok(self.messages.clone())
    }
}
