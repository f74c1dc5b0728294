mod host;
mod state;
mod ui;

use crate::config::ConverterConfig;
use crate::error::TransferError;
use crate::upload::{
    target_file_name, ConvertedArtifact, HttpTransport, ProgressFn, ResponseType, SelectedFile,
    Transport, TransferEvent,
};
use bytes::Bytes;
use eframe::App;
pub use host::{ArtifactSink, DialogNotifier, Notifier, SaveDialogSink};
pub use state::TransferState;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const TRANSFER_FAILED_MESSAGE: &str =
    "The conversion service returned an error. Please try again.";
pub const SAVE_FAILED_MESSAGE: &str = "The converted document could not be saved.";

/// What `submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    NoFileSelected,
    AlreadyInFlight,
}

/// How a finished attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Saved(PathBuf),
    SaveCancelled,
    Failed,
}

/// Result of the startup health check against the service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Checking,
    Online(String),
    Unreachable,
}

pub struct ReflowableApp {
    config: ConverterConfig,
    selected: Option<SelectedFile>,
    state: TransferState,
    transport: Arc<dyn Transport>,
    sink: Box<dyn ArtifactSink>,
    notifier: Box<dyn Notifier>,
    last_outcome: Option<String>,
    service: ServiceStatus,
    service_receiver: Option<std_mpsc::Receiver<ServiceStatus>>,
}

impl ReflowableApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ConverterConfig,
        transport: HttpTransport,
    ) -> Self {
        info!(endpoint = %transport.endpoint(), "Initializing Reflowable");
        let transport = Arc::new(transport);
        let sink = SaveDialogSink::new(
            config.download_dir.clone(),
            config.target_extension(),
            config.reveal_saved,
        );

        let mut app = Self::with_host(
            config,
            transport.clone(),
            Box::new(sink),
            Box::new(DialogNotifier),
        );
        app.check_service(transport);
        app
    }

    pub fn with_host(
        config: ConverterConfig,
        transport: Arc<dyn Transport>,
        sink: Box<dyn ArtifactSink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            selected: None,
            state: TransferState::default(),
            transport,
            sink,
            notifier,
            last_outcome: None,
            service: ServiceStatus::Unreachable,
            service_receiver: None,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn transfer_state(&self) -> &TransferState {
        &self.state
    }

    /// Replaces any previous selection. Content is not inspected.
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!(file = %file.name, path = %file.path.display(), "File selected");
        self.selected = Some(file);
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.state.in_flight {
            warn!("Conversion already in progress, ignoring submit");
            return SubmitOutcome::AlreadyInFlight;
        }
        let Some(file) = self.selected.clone() else {
            return SubmitOutcome::NoFileSelected;
        };

        info!(file = %file.name, "Starting conversion");
        let (sender, receiver) = std_mpsc::channel();
        self.state.begin(file.name.clone(), receiver);
        self.last_outcome = None;

        let transport = Arc::clone(&self.transport);
        std::thread::spawn(move || {
            let progress_sender = sender.clone();
            let on_progress: ProgressFn = Arc::new(move |percent| {
                let _ = progress_sender.send(TransferEvent::Progress(percent));
            });

            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(transport.send(&file, ResponseType::Binary, on_progress)),
                Err(e) => Err(TransferError::Runtime(e)),
            };
            let _ = sender.send(TransferEvent::Finished(result));
        });

        SubmitOutcome::Started
    }

    /// Drains worker events. Returns the settlement once the attempt finishes.
    pub fn poll(&mut self) -> Option<Settlement> {
        let receiver = self.state.event_receiver.as_ref()?;

        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for event in events {
            match event {
                TransferEvent::Progress(percent) => self.state.record_progress(percent),
                TransferEvent::Finished(result) => return Some(self.settle(result)),
            }
        }

        if disconnected {
            return Some(self.settle(Err(TransferError::Interrupted)));
        }
        None
    }

    fn settle(&mut self, result: Result<Bytes, TransferError>) -> Settlement {
        let settlement = match result {
            Ok(bytes) => self.deliver(bytes),
            Err(e) => {
                error!(error = %e, "Conversion failed");
                self.notifier.alert(TRANSFER_FAILED_MESSAGE);
                Settlement::Failed
            }
        };

        self.last_outcome = Some(match &settlement {
            Settlement::Saved(path) => format!("Saved {}", path.display()),
            Settlement::SaveCancelled => "Save cancelled".to_string(),
            Settlement::Failed => "Conversion failed".to_string(),
        });
        self.state.reset();
        settlement
    }

    fn deliver(&mut self, bytes: Bytes) -> Settlement {
        let original = self.state.file_name.as_deref().unwrap_or_default();
        let artifact = ConvertedArtifact {
            file_name: target_file_name(
                original,
                &self.config.source_suffix,
                &self.config.target_suffix,
            ),
            bytes,
        };
        info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Conversion finished");

        match self.sink.deliver(artifact) {
            Ok(Some(path)) => Settlement::Saved(path),
            Ok(None) => Settlement::SaveCancelled,
            Err(e) => {
                error!(error = %e, "Saving the converted document failed");
                self.notifier.alert(SAVE_FAILED_MESSAGE);
                Settlement::Failed
            }
        }
    }

    fn check_service(&mut self, transport: Arc<HttpTransport>) {
        let (sender, receiver) = std_mpsc::channel();
        self.service = ServiceStatus::Checking;
        self.service_receiver = Some(receiver);

        std::thread::spawn(move || {
            let status = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => match rt.block_on(transport.health()) {
                    Ok(report) if report.status == "online" => ServiceStatus::Online(report.message),
                    Ok(report) => {
                        warn!(status = %report.status, "Conversion service reports degraded status");
                        ServiceStatus::Unreachable
                    }
                    Err(e) => {
                        warn!(error = %e, "Conversion service health check failed");
                        ServiceStatus::Unreachable
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Could not start health check runtime");
                    ServiceStatus::Unreachable
                }
            };
            let _ = sender.send(status);
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.service_receiver {
            match receiver.try_recv() {
                Ok(status) => {
                    self.service = status;
                    self.service_receiver = None;
                }
                Err(TryRecvError::Disconnected) => {
                    self.service = ServiceStatus::Unreachable;
                    self.service_receiver = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        self.poll();

        if self.state.in_flight || self.service_receiver.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for ReflowableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
