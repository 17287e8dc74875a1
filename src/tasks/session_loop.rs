//! Session event loop
//!
//! One task per live session consumes the session's event queue in order.
//! User input and completions from the animation domain arrive on the same
//! queue, so the discrete state is only ever touched from this task.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    animation::{Bridge, MotionValue, PanEvent, PanGesture},
    error::{QuizError, Result},
    history::HistoryRecorder,
    quiz::{
        Advance, ConfirmOutcome, DragOutcome, FeedbackOrchestrator, MotionSample, QueuedEvent,
        QuizFrame, QuizSession, ReplyStatus, SessionEvent, SessionSnapshot, SkipGesture,
    },
    services::{CompletionSummary, Cue, Cues, DialogKind, Navigator},
};

/// Collaborators a session talks to
#[derive(Clone)]
pub struct SessionDeps {
    pub navigator: Arc<dyn Navigator>,
    pub cues: Arc<dyn Cues>,
    pub history: Arc<dyn HistoryRecorder>,
}

/// Whether the loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Ended,
}

struct SessionController {
    session: QuizSession,
    feedback: FeedbackOrchestrator,
    deps: SessionDeps,
    open_dialog: Option<DialogKind>,
    awaiting_shake: Option<usize>,
    revision: u64,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    fn publish(&mut self) -> SessionSnapshot {
        self.revision += 1;
        let snapshot = self.session.snapshot(self.revision);
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    async fn handle(&mut self, event: SessionEvent) -> Flow {
        match event {
            SessionEvent::Select(index) => {
                if self.open_dialog.is_some() || !self.session.select_alternative(index) {
                    warn!("Selection of alternative {} rejected", index);
                }
                Flow::Continue
            }
            SessionEvent::Confirm => self.confirm().await,
            SessionEvent::Stop | SessionEvent::Back => {
                self.request_stop();
                Flow::Continue
            }
            SessionEvent::SkipRequested => {
                self.request_skip();
                Flow::Continue
            }
            SessionEvent::DialogAnswered { confirmed } => self.answer_dialog(confirmed).await,
            SessionEvent::ShakeSettled { question } => {
                if self.awaiting_shake != Some(question) {
                    debug!("Ignoring stale shake completion for question {}", question);
                    return Flow::Continue;
                }
                self.awaiting_shake = None;
                self.advance().await
            }
            SessionEvent::Close => {
                info!("Session for '{}' discarded", self.session.quiz().title);
                Flow::Ended
            }
        }
    }

    async fn confirm(&mut self) -> Flow {
        if self.open_dialog.is_some() {
            warn!("Confirm ignored while a dialog is open");
            return Flow::Continue;
        }

        let question = self.session.current_index();
        match self.session.confirm() {
            ConfirmOutcome::SkipRequested => {
                self.request_skip();
                Flow::Continue
            }
            ConfirmOutcome::Scored { correct: true } => {
                self.deps.cues.play(Cue::Correct);
                self.feedback.on_reply(ReplyStatus::Correct, question);
                self.advance().await
            }
            ConfirmOutcome::Scored { correct: false } => {
                // Same cue as a correct answer; only the haptic and shake differ.
                self.deps.cues.play(Cue::Correct);
                self.awaiting_shake = Some(question);
                self.feedback.on_reply(ReplyStatus::Incorrect, question);
                Flow::Continue
            }
            ConfirmOutcome::Rejected => {
                warn!("Confirm rejected in reply state {:?}", self.session.reply_status());
                Flow::Continue
            }
        }
    }

    fn request_skip(&mut self) {
        if self.open_dialog.is_some() {
            debug!("Skip ignored while a dialog is open");
            return;
        }
        match self.session.request_skip() {
            Some(dialog) => {
                self.open_dialog = Some(DialogKind::Skip);
                self.deps.navigator.confirm(dialog);
            }
            None => debug!("Skip ignored while feedback is showing"),
        }
    }

    fn request_stop(&mut self) {
        if self.open_dialog.is_some() {
            debug!("Stop ignored while a dialog is open");
            return;
        }
        self.open_dialog = Some(DialogKind::Stop);
        self.deps.navigator.confirm(self.session.request_stop());
    }

    async fn answer_dialog(&mut self, confirmed: bool) -> Flow {
        let Some(kind) = self.open_dialog.take() else {
            warn!("Dialog answer received with no dialog open");
            return Flow::Continue;
        };

        match (kind, confirmed) {
            (DialogKind::Skip, true) if self.session.awaiting_answer() => {
                info!("Question {} skipped", self.session.current_index());
                self.advance().await
            }
            (DialogKind::Stop, true) => {
                info!(
                    "Quiz '{}' stopped at question {}, nothing recorded",
                    self.session.quiz().title,
                    self.session.current_index()
                );
                self.deps.navigator.home();
                Flow::Ended
            }
            (kind, _) => {
                debug!("{:?} dialog dismissed", kind);
                Flow::Continue
            }
        }
    }

    async fn advance(&mut self) -> Flow {
        match self.session.advance() {
            Some(Advance::NextQuestion(_)) => {
                self.feedback.on_question_changed();
                Flow::Continue
            }
            Some(Advance::Finished(record)) => {
                let points = record.points;
                let total = record.questions;
                let warning = match self.deps.history.append(record).await {
                    Ok(()) => None,
                    Err(e) => {
                        warn!("Attempt could not be saved to history: {}", e);
                        Some(format!("Your result could not be saved: {}", e))
                    }
                };
                self.deps.navigator.finish(CompletionSummary {
                    points,
                    total,
                    warning,
                });
                Flow::Ended
            }
            None => Flow::Continue,
        }
    }

    fn teardown(&mut self) {
        self.feedback.cancel();
        self.awaiting_shake = None;
        self.open_dialog = None;
    }
}

/// Consume session events until the session finishes, is stopped or closed
async fn session_task(mut controller: SessionController, mut events: mpsc::UnboundedReceiver<QueuedEvent>) {
    info!("Session task started for '{}'", controller.session.quiz().title);

    while let Some(QueuedEvent { event, reply }) = events.recv().await {
        debug!("Session event: {:?}", event);
        let flow = controller.handle(event).await;
        let snapshot = controller.publish();
        if let Some(reply) = reply {
            // The caller may have stopped waiting.
            let _ = reply.send(snapshot);
        }
        if flow == Flow::Ended {
            break;
        }
    }

    controller.teardown();
    debug!("Session task ended");
}

/// Motion values of one session, shared with presentation
#[derive(Debug, Clone)]
pub struct SessionMotion {
    pub shake: MotionValue,
    pub drag: MotionValue,
    pub scroll_y: MotionValue,
    pub overlay: watch::Receiver<ReplyStatus>,
}

/// Cloneable handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    events: Bridge<QueuedEvent>,
    snapshot: watch::Receiver<SessionSnapshot>,
    motion: SessionMotion,
    skip: Arc<Mutex<SkipGesture>>,
}

/// Spawn the event loop for a freshly loaded session
pub fn spawn_session(session: QuizSession, deps: SessionDeps) -> SessionHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let bridge = Bridge::new(tx);

    let feedback = FeedbackOrchestrator::new(Arc::clone(&deps.cues), bridge.clone());
    let skip = SkipGesture::new(PanGesture::default(), bridge.clone());

    let motion = SessionMotion {
        shake: feedback.shake().clone(),
        drag: skip.drag().clone(),
        scroll_y: MotionValue::default(),
        overlay: feedback.overlay(),
    };

    let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot(0));
    let controller = SessionController {
        session,
        feedback,
        deps,
        open_dialog: None,
        awaiting_shake: None,
        revision: 0,
        snapshot_tx,
    };
    tokio::spawn(session_task(controller, rx));

    SessionHandle {
        events: bridge,
        snapshot: snapshot_rx,
        motion,
        skip: Arc::new(Mutex::new(skip)),
    }
}

impl SessionHandle {
    /// Queue an event without waiting for it to be handled
    pub fn send(&self, event: SessionEvent) -> Result<()> {
        if self.events.run_on_session(event) {
            Ok(())
        } else {
            Err(QuizError::SessionClosed)
        }
    }

    /// Queue an event and wait for the snapshot published right after it
    /// was handled. Events queued earlier do not count.
    pub async fn dispatch(&self, event: SessionEvent) -> Result<SessionSnapshot> {
        let (queued, handled) = QueuedEvent::with_reply(event);
        if !self.events.run_on_session(queued) {
            return Err(QuizError::SessionClosed);
        }

        match handled.await {
            Ok(snapshot) => Ok(snapshot),
            // Loop ended before reaching the event; the last published state is final.
            Err(_) => Ok(self.snapshot()),
        }
    }

    /// Discard the session without recording anything
    pub fn close(&self) {
        let _ = self.send(SessionEvent::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }

    /// Feed a raw pan sample to the skip gesture
    pub fn pan(&self, event: PanEvent) -> DragOutcome {
        self.skip
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle(event)
    }

    /// Record the vertical scroll offset of the question view
    pub fn scroll(&self, offset_y: f64) {
        self.motion.scroll_y.set(offset_y);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    pub fn motion(&self) -> &SessionMotion {
        &self.motion
    }

    /// Presentational frame from the current motion values
    pub fn frame(&self) -> QuizFrame {
        let snapshot = self.snapshot.borrow();
        let sample = MotionSample {
            shake: self.motion.shake.get(),
            drag: self.motion.drag.get(),
            scroll_y: self.motion.scroll_y.get(),
        };
        QuizFrame::compose(
            sample,
            *self.motion.overlay.borrow(),
            snapshot.question_index,
            snapshot.total,
        )
    }
}
