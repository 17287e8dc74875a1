//! End-to-end tests of the session event loop with its animation tasks.
//!
//! Time is paused so shake and snap-back animations finish instantly and in
//! order.

mod common;

use std::time::Duration;
use tokio::time::{sleep, Instant};

use common::{harness, harness_with_history, yes_no_quiz, Nav, TestHistory, NO, YES};
use swipe_quiz::{
    animation::PanEvent,
    quiz::{
        feedback::QUESTION_EXIT_DURATION, DragOutcome, Phase, ReplyStatus, SessionEvent,
        SessionSnapshot,
    },
    services::{CompletionSummary, Cue, DialogKind, Haptic},
    tasks::SessionHandle,
};

async fn answer(handle: &SessionHandle, alternative: usize) -> SessionSnapshot {
    handle.dispatch(SessionEvent::Select(alternative)).await.unwrap();
    handle.dispatch(SessionEvent::Confirm).await.unwrap()
}

async fn wait_for_question(handle: &SessionHandle, index: usize) -> SessionSnapshot {
    let mut rx = handle.subscribe();
    let reached = rx
        .wait_for(|snapshot| snapshot.question_index == index || snapshot.phase == Phase::Finished)
        .await
        .map(|snapshot| snapshot.clone());
    reached.unwrap()
}

async fn wait_until_closed(handle: &SessionHandle) {
    for _ in 0..100 {
        if handle.is_closed() {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("session did not close");
}

#[tokio::test(start_paused = true)]
async fn scores_two_of_three_and_records_the_attempt() {
    let h = harness(yes_no_quiz(&[YES, NO, YES]));

    let after_first = answer(&h.handle, YES).await;
    assert_eq!(after_first.points, 1);
    assert_eq!(after_first.question_index, 1);
    assert_eq!(after_first.reply_status, ReplyStatus::Neutral);

    let after_second = answer(&h.handle, YES).await;
    assert_eq!(after_second.points, 1);
    assert_eq!(after_second.question_index, 1);
    assert_eq!(after_second.reply_status, ReplyStatus::Incorrect);

    let third = wait_for_question(&h.handle, 2).await;
    assert_eq!(third.reply_status, ReplyStatus::Neutral);

    let finished = answer(&h.handle, YES).await;
    assert_eq!(finished.phase, Phase::Finished);
    assert_eq!(finished.points, 2);

    let records = h.history.appended();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].points, 2);
    assert_eq!(records[0].questions, 3);
    assert_eq!(
        h.navigator.finishes(),
        vec![CompletionSummary {
            points: 2,
            total: 3,
            warning: None
        }]
    );

    // The same cue plays for right and wrong answers; only the wrong one buzzes.
    assert_eq!(*h.cues.cues.lock().unwrap(), vec![Cue::Correct; 3]);
    assert_eq!(*h.cues.haptics.lock().unwrap(), vec![Haptic::Error]);

    wait_until_closed(&h.handle).await;
}

#[tokio::test(start_paused = true)]
async fn confirming_nothing_asks_to_skip() {
    let h = harness(yes_no_quiz(&[YES, NO, YES]));
    answer(&h.handle, YES).await;

    let snapshot = h.handle.dispatch(SessionEvent::Confirm).await.unwrap();
    assert_eq!(snapshot.points, 1);
    assert_eq!(snapshot.question_index, 1);
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 1);

    let skipped = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();
    assert_eq!(skipped.question_index, 2);
    assert_eq!(skipped.points, 1);
    assert_eq!(skipped.reply_status, ReplyStatus::Neutral);
}

#[tokio::test(start_paused = true)]
async fn declining_the_skip_keeps_the_question() {
    let h = harness(yes_no_quiz(&[YES, NO]));

    h.handle.dispatch(SessionEvent::Confirm).await.unwrap();
    let kept = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: false })
        .await
        .unwrap();
    assert_eq!(kept.question_index, 0);
    assert_eq!(kept.points, 0);

    // The question can still be answered afterwards.
    let answered = answer(&h.handle, YES).await;
    assert_eq!(answered.points, 1);
    assert_eq!(answered.question_index, 1);
}

#[tokio::test(start_paused = true)]
async fn skipping_the_last_question_finishes() {
    let h = harness(yes_no_quiz(&[YES]));

    h.handle.dispatch(SessionEvent::Confirm).await.unwrap();
    let finished = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();
    assert_eq!(finished.phase, Phase::Finished);
    assert_eq!(finished.points, 0);
    assert_eq!(h.history.appended().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stopping_mid_quiz_records_nothing() {
    let h = harness(yes_no_quiz(&[YES, NO, YES]));
    answer(&h.handle, YES).await;

    h.handle.dispatch(SessionEvent::Stop).await.unwrap();
    assert_eq!(h.navigator.dialogs(DialogKind::Stop), 1);

    h.handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();
    wait_until_closed(&h.handle).await;

    assert!(h.history.appended().is_empty());
    assert_eq!(h.navigator.requests().last(), Some(&Nav::Home));
    assert!(h.navigator.finishes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn back_goes_through_the_stop_dialog() {
    let h = harness(yes_no_quiz(&[YES, NO]));

    h.handle.dispatch(SessionEvent::Back).await.unwrap();
    assert_eq!(h.navigator.dialogs(DialogKind::Stop), 1);

    // Input is blocked while the dialog is open.
    let blocked = h.handle.dispatch(SessionEvent::Select(YES)).await.unwrap();
    assert_eq!(blocked.selected, None);

    let resumed = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: false })
        .await
        .unwrap();
    assert_eq!(resumed.question_index, 0);
    assert!(!h.handle.is_closed());
    assert!(h.navigator.requests().iter().all(|nav| *nav != Nav::Home));
}

#[tokio::test(start_paused = true)]
async fn stop_during_the_shake_abandons_it() {
    let h = harness(yes_no_quiz(&[YES, NO]));

    let wrong = answer(&h.handle, NO).await;
    assert_eq!(wrong.reply_status, ReplyStatus::Incorrect);

    h.handle.dispatch(SessionEvent::Stop).await.unwrap();
    h.handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();

    sleep(Duration::from_secs(2)).await;
    let last = h.handle.snapshot();
    assert_eq!(last.question_index, 0);
    assert!(h.history.appended().is_empty());
    assert!(h.navigator.finishes().is_empty());
    assert_eq!(h.handle.motion().shake.get(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn repeated_confirms_during_the_shake_advance_once() {
    let h = harness(yes_no_quiz(&[YES, YES, YES]));

    answer(&h.handle, NO).await;
    for _ in 0..3 {
        let snapshot = h.handle.dispatch(SessionEvent::Confirm).await.unwrap();
        assert_eq!(snapshot.question_index, 0);
        assert_eq!(snapshot.reply_status, ReplyStatus::Incorrect);
    }
    // Confirming nothing while feedback plays is not a skip either.
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 0);

    wait_for_question(&h.handle, 1).await;
    sleep(Duration::from_secs(2)).await;

    let snapshot = h.handle.snapshot();
    assert_eq!(snapshot.question_index, 1);
    assert_eq!(snapshot.points, 0);
    assert_eq!(h.cues.haptics.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn every_wrong_answer_advances_exactly_once() {
    let h = harness(yes_no_quiz(&[YES, YES, YES]));

    for index in 0..3 {
        let snapshot = answer(&h.handle, NO).await;
        assert_eq!(snapshot.question_index, index);
        assert_eq!(snapshot.reply_status, ReplyStatus::Incorrect);
        wait_for_question(&h.handle, index + 1).await;
    }

    wait_until_closed(&h.handle).await;
    let records = h.history.appended();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].points, 0);
    assert_eq!(h.navigator.finishes().len(), 1);
    assert_eq!(h.cues.haptics.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn stale_shake_completion_is_ignored() {
    let h = harness(yes_no_quiz(&[YES, YES]));

    let snapshot = h
        .handle
        .dispatch(SessionEvent::ShakeSettled { question: 0 })
        .await
        .unwrap();
    assert_eq!(snapshot.question_index, 0);
    assert_eq!(snapshot.phase, Phase::Active);
}

#[tokio::test(start_paused = true)]
async fn history_failure_still_finishes_with_a_warning() {
    let h = harness_with_history(yes_no_quiz(&[YES]), TestHistory::failing());

    let finished = answer(&h.handle, YES).await;
    assert_eq!(finished.phase, Phase::Finished);

    let finishes = h.navigator.finishes();
    assert_eq!(finishes.len(), 1);
    assert_eq!(finishes[0].points, 1);
    assert_eq!(finishes[0].total, 1);
    assert!(finishes[0].warning.as_deref().unwrap().contains("disk full"));
}

#[tokio::test(start_paused = true)]
async fn swipe_past_the_area_opens_the_skip_dialog() {
    let h = harness(yes_no_quiz(&[YES, NO, YES]));
    let mut rx = h.handle.subscribe();
    let seen = rx.borrow_and_update().revision;

    let start = Instant::now();
    h.handle.pan(PanEvent::begin(start));
    let dragging = h.handle.pan(PanEvent::update(-150.0, start + Duration::from_millis(250)));
    assert!(matches!(dragging, DragOutcome::Dragging { offset } if offset == -150.0));
    assert_eq!(h.handle.frame().card.rotate_z_deg, -15.0);

    let released = h.handle.pan(PanEvent::end(-260.0, start + Duration::from_millis(400)));
    let snap_back = match released {
        DragOutcome::Released {
            skip_requested: true,
            snap_back,
        } => snap_back,
        other => panic!("expected a skip release, got {:?}", other),
    };

    rx.wait_for(|snapshot| snapshot.revision > seen).await.unwrap();
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 1);

    assert!(snap_back.finished().await);
    assert_eq!(h.handle.motion().drag.get(), 0.0);

    let skipped = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();
    assert_eq!(skipped.question_index, 1);
    assert_eq!(skipped.points, 0);
}

#[tokio::test(start_paused = true)]
async fn swipe_to_exactly_the_threshold_does_not_skip() {
    let h = harness(yes_no_quiz(&[YES, NO]));

    let start = Instant::now();
    h.handle.pan(PanEvent::begin(start));
    h.handle.pan(PanEvent::update(-200.0, start + Duration::from_millis(300)));
    let released = h.handle.pan(PanEvent::end(-200.0, start + Duration::from_millis(350)));
    assert!(matches!(
        released,
        DragOutcome::Released {
            skip_requested: false,
            ..
        }
    ));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 0);
    assert_eq!(h.handle.motion().drag.get(), 0.0);
    assert_eq!(h.handle.snapshot().question_index, 0);
}

#[tokio::test(start_paused = true)]
async fn quick_flick_is_not_a_gesture() {
    let h = harness(yes_no_quiz(&[YES, NO]));

    let start = Instant::now();
    h.handle.pan(PanEvent::begin(start));
    let moved = h.handle.pan(PanEvent::update(-500.0, start + Duration::from_millis(80)));
    let released = h.handle.pan(PanEvent::end(-500.0, start + Duration::from_millis(120)));
    assert!(matches!(moved, DragOutcome::Ignored));
    assert!(matches!(released, DragOutcome::Ignored));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 0);
    assert_eq!(h.handle.motion().drag.get(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn swipe_while_feedback_plays_is_ignored() {
    let h = harness(yes_no_quiz(&[YES, NO]));
    answer(&h.handle, NO).await;

    let start = Instant::now();
    h.handle.pan(PanEvent::begin(start));
    h.handle.pan(PanEvent::end(-300.0, start + Duration::from_millis(300)));

    let next = wait_for_question(&h.handle, 1).await;
    assert_eq!(next.points, 0);
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 0);
}

#[tokio::test(start_paused = true)]
async fn overlay_tracks_the_reply_and_clears_on_the_next_question() {
    let h = harness(yes_no_quiz(&[YES, YES]));

    answer(&h.handle, NO).await;
    assert_eq!(h.handle.frame().overlay, ReplyStatus::Incorrect);

    wait_for_question(&h.handle, 1).await;
    assert_eq!(h.handle.frame().progress_bar.current, 2);
    sleep(QUESTION_EXIT_DURATION + Duration::from_millis(50)).await;
    assert_eq!(h.handle.frame().overlay, ReplyStatus::Neutral);
}

#[tokio::test(start_paused = true)]
async fn correct_overlay_shows_until_the_answered_card_leaves() {
    let h = harness(yes_no_quiz(&[YES, YES]));

    let next = answer(&h.handle, YES).await;
    assert_eq!(next.question_index, 1);
    assert_eq!(next.reply_status, ReplyStatus::Neutral);
    assert_eq!(h.handle.frame().overlay, ReplyStatus::Correct);

    sleep(QUESTION_EXIT_DURATION + Duration::from_millis(50)).await;
    assert_eq!(h.handle.frame().overlay, ReplyStatus::Neutral);
}

#[tokio::test(start_paused = true)]
async fn dispatch_reports_the_state_after_its_own_event() {
    let h = harness(yes_no_quiz(&[YES, NO, YES]));

    h.handle.send(SessionEvent::Select(YES)).unwrap();
    let scored = h.handle.dispatch(SessionEvent::Confirm).await.unwrap();
    assert_eq!(scored.points, 1);
    assert_eq!(scored.question_index, 1);

    h.handle.send(SessionEvent::SkipRequested).unwrap();
    let skipped = h
        .handle
        .dispatch(SessionEvent::DialogAnswered { confirmed: true })
        .await
        .unwrap();
    assert_eq!(skipped.question_index, 2);
    assert_eq!(h.navigator.dialogs(DialogKind::Skip), 1);
}

#[tokio::test(start_paused = true)]
async fn dispatch_to_an_ended_session_fails() {
    let h = harness(yes_no_quiz(&[YES]));
    let finished = answer(&h.handle, YES).await;
    assert_eq!(finished.phase, Phase::Finished);
    wait_until_closed(&h.handle).await;

    let err = h.handle.dispatch(SessionEvent::Confirm).await.unwrap_err();
    assert!(matches!(err, swipe_quiz::QuizError::SessionClosed));
}
