/// Destination for "copy to clipboard" actions.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error>;
}

/// System clipboard using arboard.
///
/// The handle is opened on first use and kept, since X11 clipboards lose
/// their contents when the owning handle is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)
    }
}
