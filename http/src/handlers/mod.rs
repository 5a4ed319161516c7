mod form;
mod info;
mod translate;

pub use info::{health_check, list_languages, service_root};
pub use translate::{test_upload, translate_text, translate_voice};
