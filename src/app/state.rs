pub mod ui;

pub use ui::{InputMode, InputState, Toast};

use super::config::UserConfig;
use super::controllers::transport::Command;
use super::controllers::{
    LogController, PlaylistController, PlaylistsController, SearchController, TransportController,
};
use super::events::AppEvent;
use super::keys::KeyConfig;
use super::requests::Request;
use super::router::{Route, Router};
use super::session::{self, Session};
use crate::events::{EventBus, ServerEvent, TransportStatus};
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct App {
    pub config: UserConfig,
    pub keys: KeyConfig,
    pub theme: Theme,

    pub is_running: bool,
    pub router: Router,

    /// State fed by server events, handed to every bus handler
    pub session: Session,
    pub bus: EventBus<Session>,

    pub search: SearchController,
    pub playlists: PlaylistsController,
    pub playlist: PlaylistController,
    pub transport: TransportController,
    pub log: LogController,

    /// UI State
    pub show_keyhints: bool,
    pub show_messages: bool,
    pub input_state: Option<InputState>,
    pub toast: Option<Toast>,

    /// HTTP work queued for the main loop
    outbox: Vec<Request>,
}

impl App {
    pub fn new(config: UserConfig, start: Route) -> Self {
        let mut bus = EventBus::new();
        session::register(&mut bus);

        let session = Session::new(
            config.progress.increment_secs,
            config.progress.mode,
            config.log_capacity,
        );

        let mut app = Self {
            keys: config.keys.clone(),
            config,
            theme: Theme::default(),
            is_running: true,
            router: Router::new(start.clone()),
            session,
            bus,
            search: SearchController::default(),
            playlists: PlaylistsController::default(),
            playlist: PlaylistController::default(),
            transport: TransportController::default(),
            log: LogController::default(),
            show_keyhints: false,
            show_messages: false,
            input_state: None,
            toast: None,
            outbox: Vec::new(),
        };

        app.enter(&start);
        app
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    /// Switch views. Navigating to the current route does nothing.
    pub fn navigate(&mut self, route: Route) {
        if let Some(left) = self.router.navigate(route.clone()) {
            self.leave(&left);
            self.enter(&route);
        }
    }

    pub fn back(&mut self) {
        if let Some(left) = self.router.back() {
            self.leave(&left);
            let current = self.router.current().clone();
            self.enter(&current);
        }
    }

    /// Activate a view: start its fetches and subscriptions.
    fn enter(&mut self, route: &Route) {
        debug!(route = %route, "entering view");
        match route {
            Route::Index | Route::Search => {}
            Route::Playlists => {
                let generation = self.playlists.begin();
                self.outbox.push(Request::Playlists {
                    generation,
                    limit: self.config.playlist_limit,
                });
            }
            Route::Playlist {
                username,
                playlist_id,
            } => {
                let generation = self.playlist.begin(username, playlist_id);
                self.outbox.push(Request::Playlist {
                    generation,
                    user: username.clone(),
                    id: playlist_id.clone(),
                    limit: self.config.playlist_limit,
                });
            }
            Route::Log => self.log.activate(&mut self.bus, &mut self.session),
        }
    }

    /// Tear down what `enter` set up.
    fn leave(&mut self, route: &Route) {
        if let Route::Log = route {
            self.log.deactivate(&mut self.bus);
        }
        self.input_state = None;
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) {
        let delivered = self.bus.publish(&mut self.session, &event);
        debug!(kind = %event.kind(), delivered, "server event");
        for notice in self.session.take_notices() {
            self.show_toast(&notice);
        }
    }

    pub fn handle_transport(&mut self, status: TransportStatus) {
        match &status {
            TransportStatus::Connected => {
                info!("event stream connected");
                if matches!(self.session.transport, TransportStatus::Disconnected(_)) {
                    self.show_toast("🔌 Reconnected");
                }
            }
            TransportStatus::Disconnected(reason) => {
                warn!("event stream lost: {reason}");
                if self.session.is_connected() {
                    self.show_toast("⚠ Lost connection to server");
                }
            }
            TransportStatus::Connecting => {}
        }
        self.session.transport = status;
    }

    pub fn on_progress_tick(&mut self, elapsed: Duration) {
        self.session.playback.tick(elapsed);
    }

    /// Run a search and show its results.
    pub fn submit_search(&mut self, query: &str) {
        self.search.input = query.to_string();
        if let Some(ticket) = self.search.begin(query) {
            self.outbox.push(Request::Search {
                generation: ticket.generation,
                query: ticket.query,
            });
        }
        self.navigate(Route::Search);
    }

    /// Enter on the current view: load a track or open a playlist.
    pub fn activate_selected(&mut self) {
        let load = match self.router.current().clone() {
            Route::Search => self.search.load_selected(),
            Route::Playlist { .. } => self.playlist.load_selected(),
            Route::Playlists => {
                if let Some(route) = self.playlists.selected_route() {
                    self.navigate(route);
                }
                None
            }
            Route::Index | Route::Log => None,
        };
        if let Some(req) = load {
            self.outbox.push(Request::Command(Command::Load(req)));
        }
    }

    pub fn toggle_play(&mut self) {
        let command = self.transport.toggle(&mut self.session.playback);
        self.outbox.push(Request::Command(command));
    }

    /// Fetch the current view again.
    pub fn refresh(&mut self) {
        match self.router.current().clone() {
            Route::Search => {
                let query = self.search.pending_query().or(self.search.query());
                if let Some(query) = query.map(str::to_string) {
                    if let Some(ticket) = self.search.begin(&query) {
                        self.outbox.push(Request::Search {
                            generation: ticket.generation,
                            query: ticket.query,
                        });
                    }
                }
            }
            route @ (Route::Playlists | Route::Playlist { .. }) => self.enter(&route),
            Route::Index | Route::Log => {}
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        match self.router.current() {
            Route::Search => self.search.move_selection(delta),
            Route::Playlists => self.playlists.move_selection(delta),
            Route::Playlist { .. } => self.playlist.move_selection(delta),
            // Log scrolls up from the tail
            Route::Log => self.log.scroll(&mut self.session, -delta),
            Route::Index => {}
        }
    }

    /// Drain queued HTTP work.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_requests(&self) -> &[Request] {
        &self.outbox
    }

    /// Feed one event from the app channel.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(input) => super::inputs::handle_event(input, self),
            AppEvent::Server(ev) => self.handle_server_event(ev),
            AppEvent::Transport(status) => self.handle_transport(status),
            AppEvent::ProgressTick(elapsed) => self.on_progress_tick(elapsed),
            AppEvent::SearchLoaded { generation, result } => {
                if let Some(msg) = self.search.complete(generation, result) {
                    self.show_toast(&format!("❌ {}", msg));
                }
            }
            AppEvent::PlaylistsLoaded { generation, result } => {
                if let Some(msg) = self.playlists.complete(generation, result) {
                    self.show_toast(&format!("❌ {}", msg));
                }
            }
            AppEvent::PlaylistLoaded { generation, result } => {
                if let Some(msg) = self.playlist.complete(generation, result) {
                    self.show_toast(&format!("❌ {}", msg));
                }
            }
            AppEvent::CommandDone { command, result } => {
                if let Some(msg) =
                    self.transport
                        .complete(&command, result, &mut self.session.playback)
                {
                    self.show_toast(&msg);
                }
            }
            AppEvent::Tick => self.on_tick(),
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(2000);

        if let Some(ref mut current) = self.toast {
            // Keep start_time so a rapid update does not replay the entrance
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every UI tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn app() -> App {
        App::new(UserConfig::default(), Route::Index)
    }

    #[test]
    fn test_start_route_is_entered() {
        let mut app = App::new(UserConfig::default(), Route::Playlists);
        assert_eq!(
            app.take_requests(),
            vec![Request::Playlists {
                generation: 1,
                limit: 6789
            }]
        );
    }

    #[test]
    fn test_refresh_on_index_is_silent() {
        let mut app = app();
        app.refresh();
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_failed_fetch_shows_toast() {
        let mut app = app();
        app.navigate(Route::Playlists);
        app.take_requests();
        app.apply(AppEvent::PlaylistsLoaded {
            generation: 1,
            result: Err(ApiError::InvalidUrl("nowhere".into())),
        });
        let toast = app.toast.as_ref().unwrap();
        assert!(toast.message.contains("Could not load playlists"));
    }

    #[test]
    fn test_toast_update_keeps_start_time() {
        let mut app = app();
        app.show_toast("one");
        let start = app.toast.as_ref().unwrap().start_time;
        app.show_toast("two");
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, "two");
        assert_eq!(toast.start_time, start);
    }

    #[test]
    fn test_disconnect_toasts_once() {
        let mut app = app();
        app.handle_transport(TransportStatus::Connected);
        assert!(app.toast.is_none());
        app.handle_transport(TransportStatus::Disconnected("eof".into()));
        assert!(app.toast.is_some());
        assert!(!app.session.is_connected());
    }
}
