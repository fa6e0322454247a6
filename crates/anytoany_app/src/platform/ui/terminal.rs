use std::io::{self, Write};

use anytoany_core::{AlertKind, UiSurface};
use convert_logging::convert_debug;

/// Line-oriented `UiSurface`: setters only record, `present` prints what changed.
pub struct TerminalSurface<W: Write> {
    out: W,
    label: String,
    submit_enabled: bool,
    caption: String,
    busy: bool,
    notice: Option<String>,
    alert: Option<(AlertKind, String)>,
    printed_status: Option<String>,
    printed_notice: Option<String>,
    printed_alert: Option<(AlertKind, String)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: String::new(),
            submit_enabled: false,
            caption: String::new(),
            busy: false,
            notice: None,
            alert: None,
            printed_status: None,
            printed_notice: None,
            printed_alert: None,
        }
    }

    /// Prints the banner, notice and status line if they changed since the
    /// last call.
    pub fn present(&mut self, target_format: &str) -> io::Result<()> {
        if self.alert != self.printed_alert {
            if let Some((kind, message)) = &self.alert {
                writeln!(self.out, "[{}] {}", alert_tag(*kind), message)?;
            }
            self.printed_alert = self.alert.clone();
        }

        if self.notice != self.printed_notice {
            if let Some(notice) = &self.notice {
                writeln!(self.out, "{notice}")?;
            }
            self.printed_notice = self.notice.clone();
        }

        let status = self.status_line(target_format);
        if self.printed_status.as_deref() != Some(status.as_str()) {
            writeln!(self.out, "{status}")?;
            self.printed_status = Some(status);
        }
        self.out.flush()
    }

    /// Prints the status line and banner again regardless of changes.
    pub fn present_full(&mut self, target_format: &str) -> io::Result<()> {
        self.printed_status = None;
        self.printed_alert = None;
        self.printed_notice = None;
        self.present(target_format)
    }

    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn status_line(&self, target_format: &str) -> String {
        let button = if self.submit_enabled {
            format!("[{}]", self.caption)
        } else {
            format!("[{}] (disabled)", self.caption)
        };
        let busy = if self.busy { " ..." } else { "" };
        format!(
            "{} | format: {} | {}{}",
            self.label, target_format, button, busy
        )
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn alert_tag(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Warning => "warning",
        AlertKind::Danger => "error",
        AlertKind::Success => "success",
    }
}

impl<W: Write> UiSurface for TerminalSurface<W> {
    fn set_count_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_submit_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn set_processing_notice(&mut self, notice: Option<&str>) {
        self.notice = notice.map(str::to_string);
    }

    fn show_alert(&mut self, kind: AlertKind, message: &str) {
        self.alert = Some((kind, message.to_string()));
    }

    fn hide_alert(&mut self) {
        self.alert = None;
    }

    fn reset_file_picker(&mut self) {
        // No persistent picker widget in a terminal; the next `select` starts fresh.
        convert_debug!("File picker reset");
    }
}
