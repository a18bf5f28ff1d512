use crate::app::App;
use ratatui::Frame;

pub mod help;
pub mod input;
pub mod messages;
pub mod toast;

pub fn render(f: &mut Frame, app: &App) {
    // USER MESSAGES
    if app.show_messages {
        messages::render(f, app);
    }

    // TOAST NOTIFICATION
    if app.toast.is_some() {
        toast::render(f, app);
    }

    // INPUT POPUP
    if app.input_state.is_some() {
        input::render(f, app);
    }

    // WHICHKEY POPUP
    if app.show_keyhints {
        help::render(f, app);
    }
}
