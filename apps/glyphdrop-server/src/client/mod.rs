//! Upload client
//!
//! The client half of Glyphdrop: stages one image at a time, keeps a local
//! preview of it, shows a simulated progress bar while the gateway works and
//! reports the result through toast-style notifications.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glyphdrop_server::client::{HttpTransport, SelectedFile, ToastLog, UploadController};
//!
//! let controller = UploadController::new(HttpTransport::new("http://localhost:3000"), ToastLog::new());
//! controller.select_file(Some(SelectedFile::from_path("receipt.png").await?));
//! let outcome = controller.extract().await;
//! ```

mod controller;
mod file;
mod notify;
mod preview;
mod progress;
mod session;
mod transport;

pub use controller::{
    ControllerOptions, ExtractOutcome, UploadController, MSG_BUSY, MSG_FAILED, MSG_NO_FILE, MSG_NO_TEXT,
    MSG_SUCCESS,
};
pub use file::{DragEvent, DropEvent, SelectedFile};
pub use notify::{Notification, NotificationLevel, Notifier, ToastLog};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use progress::ProgressSettings;
pub use session::{SessionSnapshot, UploadSession};
pub use transport::{ExtractionTransport, HttpTransport, TransportError};
