use crate::upload::TransferEvent;
use derivative::Derivative;
use std::sync::mpsc::Receiver;

/// Bookkeeping for the attempt currently in flight.
///
/// `progress` only means something while `in_flight` is set; every finished
/// attempt, successful or not, goes back to `(false, 0)`.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct TransferState {
    pub in_flight: bool,
    pub progress: u8,
    /// Name of the file the running attempt was started with.
    pub file_name: Option<String>,
    #[derivative(Debug = "ignore")]
    pub event_receiver: Option<Receiver<TransferEvent>>,
}

impl TransferState {
    pub fn begin(&mut self, file_name: impl Into<String>, receiver: Receiver<TransferEvent>) {
        self.in_flight = true;
        self.progress = 0;
        self.file_name = Some(file_name.into());
        self.event_receiver = Some(receiver);
    }

    /// Applies a progress report. Late reports, regressions and values
    /// above 100 are ignored or clamped.
    pub fn record_progress(&mut self, percent: u8) {
        if !self.in_flight {
            return;
        }
        self.progress = self.progress.max(percent.min(100));
    }

    pub fn reset(&mut self) {
        *self = TransferState::default();
    }

    pub fn snapshot(&self) -> (bool, u8) {
        (self.in_flight, self.progress)
    }

    pub fn get_progress_fraction(&self) -> f32 {
        if self.in_flight {
            f32::from(self.progress) / 100.0
        } else {
            0.0
        }
    }

    pub fn button_label(&self) -> String {
        if self.in_flight {
            format!("Processing ({}%)", self.progress)
        } else {
            "Convert PDF".to_string()
        }
    }
}
