//! Server-sent events variant of the ask endpoint.
//!
//! Validation and assistant selection happen before any header is
//! committed, so a missing question or missing assistants are ordinary JSON
//! error responses. Otherwise the client receives one `data:` frame per
//! pending poll and a final `{response}` or `{error}` frame. Unexpected
//! failures, whether while starting the run or later, are logged and the
//! stream closes without a final frame.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::handlers::ask::{AskQuestionError, AskQuestionHandler, StartedRun};

use super::dto::{messages, AskRequest, StreamFrame};
use super::handlers::{ask_span, command_from_body, AskApiError, AskAppState};

/// Frames buffered between the polling task and the response body.
const FRAME_BUFFER: usize = 32;

/// POST /ask - Answer a question as a server-sent event stream.
pub async fn ask_stream(
    State(state): State<AskAppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response, AskApiError> {
    let span = ask_span();
    let cmd = command_from_body(body);
    let handler = Arc::new(state.ask_handler());

    let (tx, rx) = mpsc::channel(FRAME_BUFFER);
    match handler.start(cmd).instrument(span.clone()).await {
        Ok(started) => {
            tokio::spawn(relay_run(handler, started, tx).instrument(span));
        }
        Err(err @ (AskQuestionError::MissingQuestion | AskQuestionError::NoAssistants)) => {
            return Err(err.into());
        }
        Err(err) => {
            span.in_scope(|| {
                tracing::error!(error = %err, "ask stream aborted before run start");
            });
            drop(tx);
        }
    }

    Ok(event_stream(rx))
}

/// SSE response draining `rx`; it ends once every sender is gone.
fn event_stream(rx: mpsc::Receiver<StreamFrame>) -> Response {
    let sse = Sse::new(frame_stream(rx));
    ([(header::CONNECTION, "keep-alive")], sse).into_response()
}

/// Waits for the run and pushes frames until it ends.
///
/// Dropping `frames` at the end closes the event stream.
async fn relay_run(
    handler: Arc<AskQuestionHandler>,
    started: StartedRun,
    frames: mpsc::Sender<StreamFrame>,
) {
    let (status_tx, mut status_rx) = mpsc::channel(FRAME_BUFFER);

    let forward = async {
        while let Some(status) = status_rx.recv().await {
            let _ = frames.send(StreamFrame::status(&status)).await;
        }
    };
    let answer = async {
        let status_tx = status_tx;
        handler.await_answer(&started, Some(&status_tx)).await
    };

    let (result, ()) = tokio::join!(answer, forward);

    let final_frame = match result {
        Ok(answer) => Some(StreamFrame::response(answer.html)),
        Err(AskQuestionError::RunFailed { .. }) => Some(StreamFrame::error(messages::RUN_FAILED)),
        Err(AskQuestionError::NoAssistantResponse) => {
            Some(StreamFrame::error(messages::NO_RESPONSE))
        }
        Err(err) => {
            tracing::error!(error = %err, "ask stream aborted");
            None
        }
    };

    if let Some(frame) = final_frame {
        let _ = frames.send(frame).await;
    }
}

/// Turns queued frames into SSE events.
fn frame_stream(
    rx: mpsc::Receiver<StreamFrame>,
) -> impl Stream<Item = Result<Event, axum::Error>> + Send + 'static {
    stream::unfold(rx, |mut rx| async move {
        let frame = rx.recv().await?;
        Some((Event::default().json_data(&frame), rx))
    })
}
