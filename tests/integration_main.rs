use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use sith_remote::api::{ApiError, LoadPosition, Playlist, PlaylistSummary, SearchResults, Track};
use sith_remote::app::config::UserConfig;
use sith_remote::app::controllers::transport::Command;
use sith_remote::app::events::AppEvent;
use sith_remote::app::requests::Request;
use sith_remote::app::router::Route;
use sith_remote::app::App;
use sith_remote::events::{EventKind, LogEntry, ServerEvent};
use std::time::Duration;

/// Helper to create a test app instance
fn create_test_app() -> App {
    App::new(UserConfig::default(), Route::Index)
}

fn key(app: &mut App, code: KeyCode) {
    app.apply(AppEvent::Input(Event::Key(KeyEvent::new(
        code,
        KeyModifiers::NONE,
    ))));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

fn server(app: &mut App, name: &str, data: &str) {
    let event = ServerEvent::decode(name, data).expect("valid event");
    app.apply(AppEvent::Server(event));
}

fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.apply(AppEvent::ProgressTick(Duration::from_millis(100)));
    }
}

fn track(uri: &str, name: &str) -> Track {
    Track {
        uri: uri.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_app_initialization() {
    let mut app = create_test_app();
    assert!(app.is_running);
    assert_eq!(*app.route(), Route::Index);
    assert!(app.take_requests().is_empty());
    assert!(app.session.playback.display_progress().is_none());
}

#[test]
fn test_playback_scenario() {
    let mut app = create_test_app();

    server(&mut app, "play-track", r#"{"uri":"spotify:track:1","name":"X","duration":180}"#);
    assert_eq!(app.session.playback.display_progress(), Some(0.0));

    tick(&mut app, 50);
    let playback = &app.session.playback;
    assert!((playback.offset_secs() - 5.0).abs() < 1e-9);
    assert!((playback.progress_percent() - 2.777_777).abs() < 1e-3);

    server(&mut app, "track-end", "");
    assert!(app.session.playback.track_name().is_none());
    assert!(app.session.playback.display_progress().is_none());

    // Ticks after the end do nothing
    let offset = app.session.playback.offset_secs();
    tick(&mut app, 10);
    assert_eq!(app.session.playback.offset_secs(), offset);
}

#[test]
fn test_new_track_restarts_from_zero() {
    let mut app = create_test_app();
    server(&mut app, "play-track", r#"{"name":"A","duration":60}"#);
    tick(&mut app, 30);
    server(&mut app, "play-track", r#"{"name":"B","duration":60}"#);
    assert_eq!(app.session.playback.offset_secs(), 0.0);
    assert_eq!(app.session.playback.track_name(), Some("B"));
}

#[test]
fn test_play_token_lost_pauses_and_space_resumes() {
    let mut app = create_test_app();
    server(&mut app, "play-track", r#"{"name":"X","duration":100}"#);
    tick(&mut app, 20);
    server(&mut app, "play-token-lost", "");
    assert!(!app.session.playback.is_playing());
    tick(&mut app, 20);
    assert!((app.session.playback.offset_secs() - 2.0).abs() < 1e-9);
    assert!(app.toast.is_some());

    key(&mut app, KeyCode::Char(' '));
    assert!(app.session.playback.is_playing());
    assert_eq!(app.take_requests(), vec![Request::Command(Command::Play { was_playing: false })]);

    tick(&mut app, 10);
    assert!((app.session.playback.offset_secs() - 3.0).abs() < 1e-9);
}

#[test]
fn test_failed_pause_is_rolled_back() {
    let mut app = create_test_app();
    server(&mut app, "play-track", r#"{"name":"X","duration":100}"#);
    key(&mut app, KeyCode::Char(' '));
    assert!(!app.session.playback.is_playing());
    let requests = app.take_requests();
    assert_eq!(requests, vec![Request::Command(Command::Pause { was_playing: true })]);

    app.apply(AppEvent::CommandDone {
        command: Command::Pause { was_playing: true },
        result: Err(ApiError::InvalidUrl("offline".into())),
    });
    assert!(app.session.playback.is_playing());
    assert!(app.toast.as_ref().unwrap().message.contains("pause failed"));
}

#[test]
fn test_search_flow_and_stale_results() {
    let mut app = create_test_app();

    key(&mut app, KeyCode::Char('/'));
    assert!(app.input_state.is_some());
    type_text(&mut app, "daft");
    key(&mut app, KeyCode::Enter);
    assert!(app.input_state.is_none());
    assert_eq!(*app.route(), Route::Search);

    // Search again before the first answer arrives
    key(&mut app, KeyCode::Char('/'));
    key(&mut app, KeyCode::Backspace);
    key(&mut app, KeyCode::Backspace);
    key(&mut app, KeyCode::Backspace);
    key(&mut app, KeyCode::Backspace);
    type_text(&mut app, "punk");
    key(&mut app, KeyCode::Enter);

    let requests = app.take_requests();
    assert_eq!(
        requests,
        vec![
            Request::Search {
                generation: 1,
                query: "daft".into()
            },
            Request::Search {
                generation: 2,
                query: "punk".into()
            },
        ]
    );

    let fresh = SearchResults {
        tracks: vec![track("spotify:track:p1", "Punk 1"), track("spotify:track:p2", "Punk 2")],
        ..Default::default()
    };
    let stale = SearchResults {
        tracks: vec![track("spotify:track:d1", "Daft 1")],
        ..Default::default()
    };
    app.apply(AppEvent::SearchLoaded {
        generation: 2,
        result: Ok(fresh),
    });
    app.apply(AppEvent::SearchLoaded {
        generation: 1,
        result: Ok(stale),
    });
    assert_eq!(app.search.tracks().len(), 2);
    assert_eq!(app.search.tracks()[0].name, "Punk 1");

    // Select the second track and load it
    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Enter);
    match app.take_requests().as_slice() {
        [Request::Command(Command::Load(req))] => {
            assert_eq!(req.ctx, "search");
            assert_eq!(req.position, LoadPosition::Index(1));
            assert_eq!(req.uri, "spotify:track:p2");
            assert_eq!(req.query.as_deref(), Some("punk"));
        }
        other => panic!("unexpected requests: {:?}", other),
    }
}

#[test]
fn test_failed_search_keeps_previous_context() {
    let mut app = create_test_app();
    app.submit_search("amy");
    app.apply(AppEvent::SearchLoaded {
        generation: 1,
        result: Ok(SearchResults {
            tracks: vec![track("spotify:track:rehab", "Rehab")],
            ..Default::default()
        }),
    });

    app.submit_search("metallica");
    app.apply(AppEvent::SearchLoaded {
        generation: 2,
        result: Err(ApiError::InvalidUrl("offline".into())),
    });
    assert_eq!(app.search.query(), Some("amy"));
    app.take_requests();

    key(&mut app, KeyCode::Enter);
    match app.take_requests().as_slice() {
        [Request::Command(Command::Load(req))] => {
            assert_eq!(req.uri, "spotify:track:rehab");
            assert_eq!(req.position, LoadPosition::Index(0));
            assert_eq!(req.query.as_deref(), Some("amy"));
        }
        other => panic!("unexpected requests: {:?}", other),
    }
}

#[test]
fn test_space_works_before_any_track_event() {
    // Started while the server is already playing: no play-track seen yet
    let mut app = create_test_app();
    key(&mut app, KeyCode::Char(' '));
    assert_eq!(
        app.take_requests(),
        vec![Request::Command(Command::Play { was_playing: false })]
    );
    key(&mut app, KeyCode::Char(' '));
    assert_eq!(
        app.take_requests(),
        vec![Request::Command(Command::Pause { was_playing: false })]
    );
    assert_eq!(app.toast.as_ref().unwrap().message, "⏸ Pause");
}

#[test]
fn test_blank_search_sends_nothing() {
    let mut app = create_test_app();
    key(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "   ");
    key(&mut app, KeyCode::Enter);
    assert!(app.take_requests().is_empty());
}

#[test]
fn test_playlists_to_playlist_navigation() {
    let mut app = create_test_app();
    key(&mut app, KeyCode::Char('3'));
    assert_eq!(*app.route(), Route::Playlists);
    assert_eq!(
        app.take_requests(),
        vec![Request::Playlists {
            generation: 1,
            limit: 6789
        }]
    );

    app.apply(AppEvent::PlaylistsLoaded {
        generation: 1,
        result: Ok(vec![
            PlaylistSummary {
                uri: "spotify:user:alice:playlist:1".into(),
                name: "Morning".into(),
                ..Default::default()
            },
            PlaylistSummary {
                uri: "spotify:user:bob smith:playlist:2".into(),
                name: "Evening".into(),
                ..Default::default()
            },
        ]),
    });

    key(&mut app, KeyCode::Down);
    key(&mut app, KeyCode::Enter);
    let expected = Route::Playlist {
        username: "bob smith".into(),
        playlist_id: "2".into(),
    };
    assert_eq!(*app.route(), expected);
    assert_eq!(
        app.take_requests(),
        vec![Request::Playlist {
            generation: 1,
            user: "bob smith".into(),
            id: "2".into(),
            limit: 6789
        }]
    );

    app.apply(AppEvent::PlaylistLoaded {
        generation: 1,
        result: Ok(Playlist {
            uri: "spotify:user:bob smith:playlist:2".into(),
            name: "Evening".into(),
            owner: None,
            tracks: vec![track("spotify:track:e1", "E1")],
        }),
    });
    key(&mut app, KeyCode::Enter);
    match app.take_requests().as_slice() {
        [Request::Command(Command::Load(req))] => {
            assert_eq!(req.ctx, "spotify:user:bob smith:playlist:2");
            assert_eq!(req.position, LoadPosition::Index(0));
        }
        other => panic!("unexpected requests: {:?}", other),
    }

    // Back to the list refetches it
    key(&mut app, KeyCode::Esc);
    assert_eq!(*app.route(), Route::Playlists);
    assert_eq!(
        app.take_requests(),
        vec![Request::Playlists {
            generation: 2,
            limit: 6789
        }]
    );
}

#[test]
fn test_playlist_filter_narrows_list() {
    let mut app = App::new(UserConfig::default(), Route::Playlists);
    app.take_requests();
    app.apply(AppEvent::PlaylistsLoaded {
        generation: 1,
        result: Ok(vec![
            PlaylistSummary {
                uri: "spotify:user:a:playlist:1".into(),
                name: "Jazz Classics".into(),
                ..Default::default()
            },
            PlaylistSummary {
                uri: "spotify:user:a:playlist:2".into(),
                name: "Rock".into(),
                ..Default::default()
            },
        ]),
    });

    key(&mut app, KeyCode::Char('f'));
    type_text(&mut app, "jz");
    assert_eq!(app.playlists.visible().len(), 1);
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.playlists.filter, "jz");
    assert_eq!(app.playlists.visible()[0].name, "Jazz Classics");
}

#[test]
fn test_log_view_subscription_lifetime() {
    let mut app = create_test_app();
    let log = |msg: &str| {
        AppEvent::Server(ServerEvent::Log(LogEntry {
            level: Some("info".into()),
            module: None,
            message: msg.to_string(),
        }))
    };
    let base = app.bus.subscriber_count(EventKind::Log);

    app.apply(log("boot"));
    key(&mut app, KeyCode::Char('4'));
    assert_eq!(*app.route(), Route::Log);
    assert_eq!(app.bus.subscriber_count(EventKind::Log), base + 1);

    app.apply(log("one"));
    app.apply(log("two"));
    assert_eq!(app.session.log_view.received, 2);

    key(&mut app, KeyCode::Char('1'));
    assert_eq!(app.bus.subscriber_count(EventKind::Log), base);
    app.apply(log("three"));
    assert_eq!(app.session.log_view.received, 2);
    assert_eq!(app.session.logs.len(), 4);
}

#[test]
fn test_user_messages_and_errors_are_surfaced() {
    let mut app = create_test_app();
    server(&mut app, "user-message", r#""hello there""#);
    assert_eq!(app.session.messages, vec!["hello there".to_string()]);
    assert!(app.toast.as_ref().unwrap().message.contains("hello there"));

    server(&mut app, "play-track-failed", r#"{"uri":"spotify:track:zz"}"#);
    assert!(app.toast.as_ref().unwrap().message.contains("spotify:track:zz"));

    // Events nobody listens to are harmless
    server(&mut app, "event-test", r#"{"any":1}"#);
}

#[test]
fn test_quit_closes_popups_first() {
    let mut app = create_test_app();
    key(&mut app, KeyCode::Char('?'));
    assert!(app.show_keyhints);
    key(&mut app, KeyCode::Char('q'));
    assert!(!app.show_keyhints);
    assert!(app.is_running);
    key(&mut app, KeyCode::Char('q'));
    assert!(!app.is_running);
}

#[test]
fn test_every_view_renders() {
    let mut app = create_test_app();
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();

    server(&mut app, "play-track", r#"{"name":"Song","duration":200}"#);
    tick(&mut app, 10);
    app.show_toast("hi");
    app.show_keyhints = true;
    app.show_messages = true;

    for route in [
        Route::Index,
        Route::Search,
        Route::Playlists,
        Route::Log,
        Route::Playlist {
            username: "u".into(),
            playlist_id: "p".into(),
        },
    ] {
        app.navigate(route);
        terminal
            .draw(|f| sith_remote::ui::ui(f, &app))
            .expect("draw");
    }

    // Tiny terminals must not panic either
    let mut tiny = Terminal::new(TestBackend::new(12, 5)).unwrap();
    tiny.draw(|f| sith_remote::ui::ui(f, &app)).expect("draw");
}
