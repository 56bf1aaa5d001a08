use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::animator::sort::SortAnimator;
use crate::animator::steps::{StepAnimator, Verdict, not_found_message};
use crate::animator::{Aborted, RunContext};
use crate::client::SearchService;
use crate::data_models::{SearchRequest, format_number};
use crate::input::{self, InputError};
use crate::view::{Message, View};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found { index: usize },
    FoundAll { indices: Vec<usize> },
    NotFound,
    /// The service could not be reached or rejected the request.
    Failed(String),
    Aborted,
}

struct ActiveRun {
    token: CancellationToken,
    handle: JoinHandle<Outcome>,
}

/// Backs the start and reset actions. At most one run mutates the view at a
/// time: a new run only begins once the previous one has observed its
/// cancellation and exited.
pub struct Session<S, V> {
    service: Arc<S>,
    view: Arc<Mutex<V>>,
    step_delay: Duration,
    active: Option<ActiveRun>,
}

impl<S: SearchService, V: View> Session<S, V> {
    pub fn new(service: S, view: V, step_delay: Duration) -> Session<S, V> {
        Session {
            service: Arc::new(service),
            view: Arc::new(Mutex::new(view)),
            step_delay,
            active: None,
        }
    }

    pub fn view(&self) -> Arc<Mutex<V>> {
        self.view.clone()
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }

    /// Starts a search for the given field contents. Invalid input is shown
    /// on the view and returned; nothing is sent in that case.
    pub async fn start(&mut self, array_text: &str, target_text: &str) -> Result<(), InputError> {
        self.abort_active().await;
        self.view.lock().await.reset();

        let (array, target) = match input::parse_inputs(array_text, target_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::info!("rejected input: {e}");
                self.view.lock().await.set_message(Message::error(e.to_string()));
                return Err(e);
            }
        };

        let token = CancellationToken::new();
        let ctx = RunContext::new(self.view.clone(), token.clone(), self.step_delay);
        let service = self.service.clone();
        let request = SearchRequest { array, target };
        let handle = tokio::spawn(async move {
            match run(&ctx, service.as_ref(), &request).await {
                Ok(outcome) => outcome,
                Err(Aborted) => Outcome::Aborted,
            }
        });

        self.active = Some(ActiveRun { token, handle });
        Ok(())
    }

    /// Stops the active run and clears the view.
    pub async fn reset(&mut self) {
        self.abort_active().await;
        self.view.lock().await.reset();
    }

    /// Waits for the active run to end.
    pub async fn finish(&mut self) -> Option<Outcome> {
        let run = self.active.take()?;
        Some(join(run.handle).await)
    }

    async fn abort_active(&mut self) {
        if let Some(run) = self.active.take() {
            run.token.cancel();
            let outcome = join(run.handle).await;
            log::debug!("previous run ended: {outcome:?}");
        }
    }
}

async fn join(handle: JoinHandle<Outcome>) -> Outcome {
    match handle.await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("animation task failed: {e}");
            Outcome::Failed(e.to_string())
        }
    }
}

async fn run<S: SearchService, V: View>(
    ctx: &RunContext<V>,
    service: &S,
    request: &SearchRequest,
) -> Result<Outcome, Aborted> {
    ctx.mutate(|view| {
        view.render_array(&request.array);
        view.set_message(Message::muted("Computing steps..."));
    })
    .await?;

    let response = tokio::select! {
        _ = ctx.token().cancelled() => return Err(Aborted),
        response = service.search(request) => response,
    };

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            let text = e.to_string();
            ctx.mutate(|view| view.set_message(Message::error(text.clone())))
                .await?;
            return Ok(Outcome::Failed(text));
        }
    };
    log::info!(
        "searching for {} in {} values: {} steps, sorted={}",
        format_number(request.target),
        request.array.len(),
        response.steps.len(),
        response.sorted
    );

    if response.steps.is_empty() {
        ctx.mutate(|view| view.set_message(Message::error(not_found_message(request.target))))
            .await?;
        return Ok(Outcome::NotFound);
    }

    if !response.sorted {
        SortAnimator::run(ctx, &request.array).await?;
    }

    ctx.mutate(|view| view.set_message(Message::info("Animating...")))
        .await?;
    let results = response.results.as_deref();
    let verdict = StepAnimator::run(ctx, &response.steps, request.target, results).await?;

    Ok(match verdict {
        Verdict::Found { .. } if results.is_some_and(|r| r.len() > 1) => Outcome::FoundAll {
            indices: results.map(<[usize]>::to_vec).unwrap_or_default(),
        },
        Verdict::Found { index } => Outcome::Found { index },
        Verdict::NotFound => Outcome::NotFound,
    })
}
