mod common;

use std::time::Duration;

use common::fixtures::{finish_intro, finish_quiz, reveal_until, settle_confetti, test_app};
use common::terminal::{assert_screen_contains, render_app};
use crossterm::event::KeyCode;
use valentine::core::{RevealTick, QUESTIONS};
use valentine::ui::SceneView;
use valentine::Scene;

#[tokio::test(start_paused = true)]
async fn test_full_walkthrough_reaches_love_note_with_answers() {
    let (mut app, mirror) = test_app();

    finish_intro(&mut app).await;
    finish_quiz(&mut app);

    let expected: Vec<_> = QUESTIONS
        .iter()
        .map(|q| (q.prompt, q.options[0].text))
        .collect();
    let pairs: Vec<_> = app.answers().iter().collect();
    assert_eq!(pairs, expected);
    assert_eq!(mirror.writes(), vec![app.answers().clone()]);

    // Decline twice, then accept
    app.handle_key(KeyCode::Char('n'));
    app.handle_key(KeyCode::Char('n'));
    assert_eq!(app.scene(), Scene::Question);
    app.handle_key(KeyCode::Char('y'));
    assert_eq!(app.scene(), Scene::Bouquet);
    assert!(app.confetti_particles() > 0);

    reveal_until(&mut app, |v| matches!(v, SceneView::Bouquet(s) if s.is_text_visible())).await;
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.scene(), Scene::LoveNote);

    reveal_until(&mut app, |v| matches!(v, SceneView::LoveNote(s) if s.is_signed())).await;
    settle_confetti(&mut app).await;
    assert_screen_contains(&app, "Always yours");
    assert_screen_contains(&app, "Alex");

    app.handle_key(KeyCode::Char('p'));
    assert_screen_contains(&app, QUESTIONS[0].options[0].text);
    // The rejection loop never reached the record
    assert_eq!(app.answers().len(), QUESTIONS.len());
    assert_eq!(mirror.writes().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_intro_reveals_lines_over_time() {
    let (mut app, _mirror) = test_app();

    assert_screen_contains(&app, "Hi Sam...");
    let screen = render_app(&app, 100, 40);
    assert!(!screen.contains("I've been thinking."));

    app.next_reveal().await.unwrap();
    assert_screen_contains(&app, "I've been thinking.");

    // Enter does nothing until every line is out
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.scene(), Scene::Intro);
}

#[tokio::test(start_paused = true)]
async fn test_intro_timer_does_not_fire_after_leaving() {
    let (mut app, _mirror) = test_app();
    let intro_activation = app.activation();
    finish_intro(&mut app).await;

    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert_eq!(app.process_pending_reveals(), 0);

    // A tick that slipped through from the intro is ignored
    app.handle_reveal(RevealTick {
        activation: intro_activation,
        tag: 0,
    });
    assert_eq!(app.scene(), Scene::Quiz);
    assert!(matches!(app.view(), SceneView::Quiz(q) if q.progress().index() == 0));
}

#[tokio::test(start_paused = true)]
async fn test_quiz_screen_shows_counter_and_response() {
    let (mut app, _mirror) = test_app();
    finish_intro(&mut app).await;

    assert_screen_contains(&app, "1/6");
    assert_screen_contains(&app, QUESTIONS[0].prompt);

    app.handle_key(KeyCode::Char('2'));
    settle_confetti(&mut app).await;
    assert_screen_contains(&app, QUESTIONS[0].options[1].response);
}

#[tokio::test(start_paused = true)]
async fn test_music_toggle_flips_without_a_player() {
    let (mut app, _mirror) = test_app();
    assert!(!app.is_music_playing());
    assert_screen_contains(&app, "music off");

    app.handle_key(KeyCode::Char('m'));
    assert!(app.is_music_playing());
    assert_screen_contains(&app, "music on");

    app.handle_key(KeyCode::Char('m'));
    assert!(!app.is_music_playing());
}

#[tokio::test(start_paused = true)]
async fn test_quit_keys() {
    let (mut app, _mirror) = test_app();
    assert!(!app.should_quit());
    app.handle_key(KeyCode::Esc);
    assert!(app.should_quit());
}

#[tokio::test(start_paused = true)]
async fn test_small_terminal_renders() {
    let (mut app, _mirror) = test_app();
    finish_intro(&mut app).await;
    finish_quiz(&mut app);
    app.handle_key(KeyCode::Char('y'));
    for (w, h) in [(10, 3), (20, 8), (1, 1)] {
        render_app(&app, w, h);
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_quiz_result_visible_on_standard_terminal() {
    let (mut app, _mirror) = test_app();
    finish_intro(&mut app).await;
    finish_quiz(&mut app);
    app.handle_key(KeyCode::Char('y'));
    reveal_until(&mut app, |v| matches!(v, SceneView::Bouquet(s) if s.is_text_visible())).await;
    app.handle_key(KeyCode::Enter);
    reveal_until(&mut app, |v| matches!(v, SceneView::LoveNote(s) if s.is_signed())).await;
    settle_confetti(&mut app).await;

    app.handle_key(KeyCode::Char('p'));
    let screen = render_app(&app, 80, 24);
    for question in QUESTIONS {
        assert!(
            screen.contains(question.prompt),
            "{:?} not on screen:\n{screen}",
            question.prompt
        );
        assert!(screen.contains(question.options[0].text));
    }
}
