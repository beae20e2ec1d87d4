/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Log messages.
    pub log_messages: Vec<String>,

    /// Message shown in a blocking alert window.
    pub alert: Option<String>,

    pub show_about: bool,

    /// Keyboard focus sits in one of the image/source selectors.
    pub selector_focused: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn alert(&mut self, msg: impl Into<String>) {
        self.alert = Some(msg.into());
    }
}
