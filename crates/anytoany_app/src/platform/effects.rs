use std::io::Write;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use anytoany_core::{Effect, Msg, TransportError, UiSurface};
use anytoany_engine::{ArtifactSaver, EngineEvent, EngineHandle, EventSink};
use convert_logging::{convert_error, convert_info};

use super::app::AppEvent;
use super::settings::Settings;
use super::ui::terminal::TerminalSurface;

/// Maps engine completions back into controller messages.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::UploadCompleted {
                submission_id,
                result,
            } => Msg::UploadFinished {
                submission_id,
                result: result.map_err(TransportError::from),
            },
        };
        let _ = self.events.send(AppEvent::Msg(msg));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    saver: ArtifactSaver,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: &Settings, events: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let sink = Arc::new(MsgSink {
            events: events.clone(),
        });
        let engine = EngineHandle::new(settings.upload_settings(), sink)
            .context("failed to start upload engine")?;
        Ok(Self {
            engine,
            saver: ArtifactSaver::new(settings.download_dir.clone()),
            events,
        })
    }

    pub fn run<W: Write>(&self, effects: Vec<Effect>, surface: &mut TerminalSurface<W>) {
        for effect in effects {
            match effect {
                Effect::Upload(request) => {
                    convert_info!(
                        "Upload {} queued: {} files -> {}",
                        request.submission_id,
                        request.files.len(),
                        request.target_format
                    );
                    self.engine.upload(request);
                }
                Effect::SaveArtifact { filename, bytes } => {
                    let msg = match self.saver.save(&filename, &bytes) {
                        Ok(path) => {
                            let location = path.display().to_string();
                            let _ = surface.note(&format!("Downloaded {location}"));
                            Msg::ArtifactSaved { location }
                        }
                        Err(err) => {
                            convert_error!("Failed to save {}: {}", filename, err);
                            Msg::ArtifactSaveFailed {
                                filename,
                                message: err.to_string(),
                            }
                        }
                    };
                    let _ = self.events.send(AppEvent::Msg(msg));
                }
                Effect::ResetFilePicker => surface.reset_file_picker(),
            }
        }
    }
}
