//! Shared fakes for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use futures::future::BoxFuture;
use tokio::sync::Notify;

use swipe_quiz::{
    content::{Level, Question, Quiz},
    history::{AttemptRecord, HistoryRecorder},
    quiz::QuizSession,
    services::{CompletionSummary, ConfirmDialog, Cue, Cues, DialogKind, Haptic, Navigator},
    tasks::{spawn_session, SessionDeps, SessionHandle},
    QuizError,
};

/// Navigation request seen by [`RecordingNavigator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Finish(CompletionSummary),
    Home,
    Confirm(DialogKind),
}

#[derive(Default)]
pub struct RecordingNavigator {
    requests: Mutex<Vec<Nav>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<Nav> {
        self.requests.lock().unwrap().clone()
    }

    pub fn dialogs(&self, kind: DialogKind) -> usize {
        self.requests()
            .iter()
            .filter(|nav| **nav == Nav::Confirm(kind))
            .count()
    }

    pub fn finishes(&self) -> Vec<CompletionSummary> {
        self.requests()
            .into_iter()
            .filter_map(|nav| match nav {
                Nav::Finish(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn finish(&self, summary: CompletionSummary) {
        self.requests.lock().unwrap().push(Nav::Finish(summary));
    }

    fn home(&self) {
        self.requests.lock().unwrap().push(Nav::Home);
    }

    fn confirm(&self, dialog: ConfirmDialog) {
        self.requests.lock().unwrap().push(Nav::Confirm(dialog.kind));
    }
}

#[derive(Default)]
pub struct RecordingCues {
    pub cues: Mutex<Vec<Cue>>,
    pub haptics: Mutex<Vec<Haptic>>,
}

impl Cues for RecordingCues {
    fn play(&self, cue: Cue) {
        self.cues.lock().unwrap().push(cue);
    }

    fn haptic(&self, pulse: Haptic) {
        self.haptics.lock().unwrap().push(pulse);
    }
}

/// History that counts appends and can be told to fail
#[derive(Default)]
pub struct TestHistory {
    pub appended: Mutex<Vec<AttemptRecord>>,
    pub fail: bool,
}

impl TestHistory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn appended(&self) -> Vec<AttemptRecord> {
        self.appended.lock().unwrap().clone()
    }
}

impl HistoryRecorder for TestHistory {
    fn append(&self, record: AttemptRecord) -> BoxFuture<'_, swipe_quiz::Result<()>> {
        Box::pin(async move {
            if self.fail {
                return Err(QuizError::HistoryUnavailable("disk full".to_string()));
            }
            self.appended.lock().unwrap().push(record);
            Ok(())
        })
    }

    fn records(&self) -> BoxFuture<'_, swipe_quiz::Result<Vec<AttemptRecord>>> {
        Box::pin(async move { Ok(self.appended()) })
    }
}

/// History whose appends wait until released
#[derive(Default)]
pub struct GatedHistory {
    pub entered: Notify,
    pub release: Notify,
    pub appended: Mutex<Vec<AttemptRecord>>,
}

impl HistoryRecorder for GatedHistory {
    fn append(&self, record: AttemptRecord) -> BoxFuture<'_, swipe_quiz::Result<()>> {
        Box::pin(async move {
            self.entered.notify_one();
            self.release.notified().await;
            self.appended.lock().unwrap().push(record);
            Ok(())
        })
    }

    fn records(&self) -> BoxFuture<'_, swipe_quiz::Result<Vec<AttemptRecord>>> {
        Box::pin(async move { Ok(self.appended.lock().unwrap().clone()) })
    }
}

/// A quiz of yes/no questions; `correct[i]` is 0 for "yes" and 1 for "no"
pub fn yes_no_quiz(correct: &[usize]) -> Arc<Quiz> {
    Arc::new(Quiz {
        id: "yes-no".to_string(),
        title: "Yes or no".to_string(),
        level: Level::Medium,
        questions: correct
            .iter()
            .enumerate()
            .map(|(i, &c)| Question {
                title: format!("Question {}", i + 1),
                alternatives: vec!["yes".to_string(), "no".to_string()],
                correct: c,
            })
            .collect(),
    })
}

pub const YES: usize = 0;
pub const NO: usize = 1;

pub struct Harness {
    pub handle: SessionHandle,
    pub navigator: Arc<RecordingNavigator>,
    pub cues: Arc<RecordingCues>,
    pub history: Arc<TestHistory>,
}

pub fn harness(quiz: Arc<Quiz>) -> Harness {
    harness_with_history(quiz, TestHistory::default())
}

pub fn harness_with_history(quiz: Arc<Quiz>, history: TestHistory) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let cues = Arc::new(RecordingCues::default());
    let history = Arc::new(history);

    let handle = spawn_session(
        QuizSession::new(quiz).unwrap(),
        SessionDeps {
            navigator: navigator.clone(),
            cues: cues.clone(),
            history: history.clone(),
        },
    );

    Harness {
        handle,
        navigator,
        cues,
        history,
    }
}
