const APP_NAME: &str = "Gallery Annotator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible feedback channel of the host UI.
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, body: &str);
}

/// Desktop notifications through the session's notification daemon.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, level: NoticeLevel, body: &str) {
        let summary = match level {
            NoticeLevel::Info => APP_NAME,
            NoticeLevel::Error => "Drawing not applied",
        };
        if let Err(err) = notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(summary)
            .body(body)
            .show()
        {
            tracing::warn!("system notification failed: {err}");
        }
    }
}
