use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use anytoany_core::SubmissionRequest;
use convert_logging::{convert_info, convert_warn};

use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, UploadError};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Upload(SubmissionRequest),
}

/// Runs uploads on a background runtime, one at a time, in submission order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)), sink)
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let worker_sink = sink.clone();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("anytoany-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.block_on(handle_command(
                        uploader.as_ref(),
                        command,
                        worker_sink.as_ref(),
                    ));
                }
                convert_info!("Engine command channel closed; stopping");
            })?;

        Ok(Self { cmd_tx, sink })
    }

    /// Queues an upload. Every queued request produces exactly one
    /// [`EngineEvent::UploadCompleted`], even if the worker has died.
    pub fn upload(&self, request: SubmissionRequest) {
        if let Err(mpsc::SendError(EngineCommand::Upload(request))) =
            self.cmd_tx.send(EngineCommand::Upload(request))
        {
            convert_warn!("Engine thread is gone; failing upload {}", request.submission_id);
            self.sink.emit(EngineEvent::UploadCompleted {
                submission_id: request.submission_id,
                result: Err(UploadError::EngineStopped),
            });
        }
    }
}

async fn handle_command(uploader: &dyn Uploader, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Upload(request) => {
            let result = uploader.upload(&request).await;
            if let Err(err) = &result {
                convert_warn!("Upload {} failed: {}", request.submission_id, err);
            }
            sink.emit(EngineEvent::UploadCompleted {
                submission_id: request.submission_id,
                result,
            });
        }
    }
}
