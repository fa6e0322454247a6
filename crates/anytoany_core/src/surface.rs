use crate::{AlertKind, AppViewModel};

/// The UI capabilities the controller drives.
///
/// Implemented by the real front end at the edge and by recording fakes in
/// tests, so the state machine never touches a concrete widget toolkit.
pub trait UiSurface {
    fn set_count_label(&mut self, text: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_submit_caption(&mut self, caption: &str);
    fn set_busy(&mut self, busy: bool);
    fn set_processing_notice(&mut self, notice: Option<&str>);
    /// Replaces whatever banner is currently visible.
    fn show_alert(&mut self, kind: AlertKind, message: &str);
    fn hide_alert(&mut self);
    fn reset_file_picker(&mut self);
}

/// Pushes a full view model into a surface.
pub fn render(view: &AppViewModel, surface: &mut dyn UiSurface) {
    surface.set_count_label(&view.count_label);
    surface.set_submit_enabled(view.submit_enabled);
    surface.set_submit_caption(&view.submit_caption);
    surface.set_busy(view.busy);
    surface.set_processing_notice(view.processing_notice.as_deref());
    match &view.alert {
        Some(alert) => surface.show_alert(alert.kind, &alert.message),
        None => surface.hide_alert(),
    }
}
