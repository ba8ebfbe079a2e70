mod audio;
mod error_response;
mod export;
mod health;
mod history;
mod transcribe;
mod upload_form;

pub use audio::audio_handler;
pub use error_response::{ErrorResponse, transcription_error_response, transcription_status};
pub use export::{attachment_disposition, export_entry_handler, export_many_handler};
pub use health::health_handler;
pub use history::{
    clear_history_handler, delete_history_entry_handler, delete_many_handler,
    get_history_entry_handler, list_history_handler,
};
pub use transcribe::{transcribe_handler, transcribe_stream_handler};
pub use upload_form::{API_KEY_HEADER, api_key_from_headers};
