mod document_port;
mod fetch_port;
mod settings_port;

pub use document_port::DocumentRegion;
pub use fetch_port::{
    FetchBody, FetchMethod, FetchPort, FetchRequest, FetchResponse, ResponseType,
};
pub use settings_port::SettingsPort;
