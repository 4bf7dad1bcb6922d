use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded};

use crate::config::AiConfig;
use crate::error::EngineError;
use crate::games::ultimate::{BotInput, BotType, Evaluator, Position, calculate_move};
use crate::{log, log_error};

type SearchResult = Result<Position, EngineError>;

/// Background thread that turns board snapshots into moves.
///
/// Both channels hold a single message. The worker checks the shutdown flag every
/// `poll_timeout`; a search that has started always runs to completion.
pub struct AiWorker {
    request_tx: Sender<BotInput>,
    response_rx: Receiver<SearchResult>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AiWorker {
    pub fn spawn(config: &AiConfig) -> Result<Self, EngineError> {
        let (request_tx, request_rx) = bounded::<BotInput>(1);
        let (response_tx, response_rx) = bounded::<SearchResult>(1);
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker_shutdown = Arc::clone(&shutdown);
        let bot_type = config.bot_type;
        let evaluator = config.evaluator();
        let poll_timeout = config.poll_timeout();

        let handle = thread::Builder::new()
            .name("ai-worker".to_string())
            .spawn(move || {
                run_worker(
                    request_rx,
                    response_tx,
                    worker_shutdown,
                    bot_type,
                    evaluator,
                    poll_timeout,
                )
            })
            .map_err(|e| {
                log_error!("Failed to start AI worker: {}", e);
                EngineError::WorkerUnavailable
            })?;

        Ok(Self {
            request_tx,
            response_rx,
            shutdown,
            handle: Some(handle),
        })
    }

    /// Queues a snapshot. Fails with `AiRequestPending` while the request slot is still full.
    pub fn submit(&self, input: BotInput) -> Result<(), EngineError> {
        self.request_tx.try_send(input).map_err(|e| match e {
            TrySendError::Full(_) => EngineError::AiRequestPending,
            TrySendError::Disconnected(_) => EngineError::WorkerUnavailable,
        })
    }

    /// Non-blocking. `Ok(None)` means the worker is still thinking.
    pub fn try_receive(&self) -> Result<Option<Position>, EngineError> {
        match self.response_rx.try_recv() {
            Ok(result) => result.map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::WorkerUnavailable),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log_error!("AI worker panicked");
        }
    }
}

fn run_worker(
    request_rx: Receiver<BotInput>,
    response_tx: Sender<SearchResult>,
    shutdown: Arc<AtomicBool>,
    bot_type: BotType,
    evaluator: Evaluator,
    poll_timeout: Duration,
) {
    log!("AI worker started ({:?} bot)", bot_type);

    while !shutdown.load(Ordering::Acquire) {
        let input = match request_rx.recv_timeout(poll_timeout) {
            Ok(input) => input,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let result = calculate_move(bot_type, &input, &evaluator);
        match &result {
            Ok(position) => log!("AI chose {} for {}", position, input.current_mark),
            Err(e) => log_error!("AI search failed: {}", e),
        }

        if response_tx.send(result).is_err() {
            break;
        }
    }

    log!("AI worker stopped");
}
