use crate::view_model::SUCCESS_MESSAGE;
use crate::{interpret, AlertKind, AppState, Effect, Msg, Outcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            // An empty pick (dialog cancelled) leaves everything untouched, and
            // the selection is frozen while a request is in flight.
            if !files.is_empty() && state.pending_submission().is_none() {
                state.replace_selection(files);
            }
            Vec::new()
        }
        Msg::SelectionCleared => {
            if state.pending_submission().is_some() {
                return (state, Vec::new());
            }
            state.clear_selection();
            vec![Effect::ResetFilePicker]
        }
        Msg::FormatChosen(format) => {
            state.choose_format(&format);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some(request) => vec![Effect::Upload(request)],
            None => Vec::new(),
        },
        Msg::UploadFinished {
            submission_id,
            result,
        } => {
            let Some(pending) = state.finish_submission(submission_id) else {
                return (state, Vec::new());
            };
            match interpret(result, pending.submitted_count, &pending.target_format) {
                Outcome::Success {
                    artifact,
                    suggested_filename,
                } => {
                    // Clearing republishes the selection banner, so the success
                    // banner goes up afterwards to stay visible.
                    state.clear_selection();
                    state.show_alert(AlertKind::Success, SUCCESS_MESSAGE);
                    vec![
                        Effect::SaveArtifact {
                            filename: suggested_filename,
                            bytes: artifact,
                        },
                        Effect::ResetFilePicker,
                    ]
                }
                Outcome::Failure { message } => {
                    state.show_alert(AlertKind::Danger, format!("Error: {message}"));
                    Vec::new()
                }
            }
        }
        Msg::ArtifactSaved { location } => {
            state.set_last_download(location);
            Vec::new()
        }
        Msg::ArtifactSaveFailed { filename, message } => {
            state.show_alert(
                AlertKind::Danger,
                format!("Error: could not save {filename}: {message}"),
            );
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
