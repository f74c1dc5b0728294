mod naming;
mod progress;
mod transfer;
mod types;

pub use naming::target_file_name;
pub use progress::ProgressFn;
pub use transfer::{HealthReport, HttpTransport, Transport};
pub use types::{ConvertedArtifact, ResponseType, SelectedFile, TransferEvent};
