use std::sync::Once;

use anytoany_core::{
    limit_warning, update, Alert, AlertKind, AppState, ControllerConfig, Effect, FormatCatalog,
    Msg, SelectedFile, SessionState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(convert_logging::initialize_for_tests);
}

fn files(count: usize) -> Vec<SelectedFile> {
    (0..count)
        .map(|i| SelectedFile::in_memory(format!("img_{i:03}.heic"), vec![i as u8]))
        .collect()
}

fn select(state: AppState, count: usize) -> AppState {
    update(state, Msg::FilesSelected(files(count))).0
}

#[test]
fn fresh_state_has_nothing_selected() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.session, SessionState::Idle);
    assert_eq!(view.file_count, 0);
    assert_eq!(view.count_label, "No files selected");
    assert!(!view.submit_enabled);
    assert_eq!(view.alert, None);
    assert!(!view.busy);
    assert_eq!(view.target_format, "jpg");
    assert_eq!(view.max_files, 50);
}

#[test]
fn selection_within_limit_enables_submit_without_banner() {
    init_logging();
    for count in [1usize, 2, 49, 50] {
        let state = select(AppState::new(), count);
        let view = state.view();

        assert_eq!(view.file_count, count);
        assert!(view.submit_enabled, "count {count}");
        assert_eq!(view.alert, None, "count {count}");
        assert!(view.dirty);
    }
    assert_eq!(select(AppState::new(), 1).view().count_label, "1 file selected");
    assert_eq!(select(AppState::new(), 50).view().count_label, "50 files selected");
}

#[test]
fn selection_over_limit_warns_but_keeps_everything() {
    init_logging();
    let state = select(AppState::new(), 73);
    let view = state.view();

    assert_eq!(view.file_count, 73);
    assert_eq!(view.count_label, "73 files selected");
    assert!(view.submit_enabled);
    assert_eq!(
        view.alert,
        Some(Alert {
            kind: AlertKind::Warning,
            message: limit_warning(50),
        })
    );
    assert_eq!(state.selection().len(), 73);
}

#[test]
fn new_selection_replaces_previous_one() {
    init_logging();
    let state = select(AppState::new(), 3);
    let replacement = vec![SelectedFile::in_memory("other.png", vec![9u8])];
    let (state, effects) = update(state, Msg::FilesSelected(replacement.clone()));

    assert!(effects.is_empty());
    assert_eq!(state.selection(), replacement.as_slice());
    assert_eq!(state.view().count_label, "1 file selected");
}

#[test]
fn dropping_back_under_limit_clears_warning() {
    init_logging();
    let state = select(AppState::new(), 51);
    assert!(state.view().alert.is_some());

    let state = select(state, 5);
    assert_eq!(state.view().alert, None);
}

#[test]
fn clearing_selection_disables_submit_and_resets_picker() {
    init_logging();
    let state = select(AppState::new(), 60);
    let (state, effects) = update(state, Msg::SelectionCleared);
    let view = state.view();

    assert_eq!(effects, vec![Effect::ResetFilePicker]);
    assert_eq!(view.file_count, 0);
    assert_eq!(view.count_label, "No files selected");
    assert!(!view.submit_enabled);
    assert_eq!(view.alert, None);
}

#[test]
fn custom_limit_drives_warning_text() {
    init_logging();
    let config = ControllerConfig {
        max_files: 2,
        ..ControllerConfig::default()
    };
    let state = select(AppState::with_config(config), 3);

    assert_eq!(
        state.view().alert.map(|alert| alert.message),
        Some(limit_warning(2))
    );
}

#[test]
fn format_choice_is_limited_to_catalog() {
    init_logging();
    let config = ControllerConfig {
        formats: FormatCatalog::new(["PNG", ".webp", "png", ""]),
        default_format: Some("webp".to_string()),
        ..ControllerConfig::default()
    };
    let state = AppState::with_config(config);
    assert_eq!(state.view().formats, vec!["png".to_string(), "webp".to_string()]);
    assert_eq!(state.target_format(), "webp");

    let (mut state, _) = update(state, Msg::FormatChosen("PNG".to_string()));
    assert_eq!(state.target_format(), "png");
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::FormatChosen("exe".to_string()));
    assert_eq!(state.target_format(), "png");
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn empty_catalog_falls_back_to_defaults() {
    let catalog = FormatCatalog::new(Vec::<String>::new());
    assert_eq!(catalog, FormatCatalog::default());
    assert!(catalog.contains("pdf"));
}
