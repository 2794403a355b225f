//! Browser file delivery via a temporary object URL

use js_sys::{Array, Uint8Array};
use sprint_pulse::export::{DownloadSink, ExportArtifact};
use sprint_pulse::ExportError;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

/// Hand `bytes` to the browser as a download named `filename`.
pub fn trigger_download(filename: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
    let window = web_sys::window().ok_or("window is not available")?;
    let document = window.document().ok_or("document is not available")?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("could not create blob: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("could not create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("could not create link: {:?}", e))?;
    let clicked = anchor
        .set_attribute("href", &url)
        .and_then(|_| anchor.set_attribute("download", filename))
        .map_err(|e| format!("{:?}", e))
        .and_then(|_| {
            anchor
                .dyn_ref::<HtmlElement>()
                .map(|el| el.click())
                .ok_or_else(|| "link is not an HTML element".to_string())
        });

    let _ = Url::revoke_object_url(&url);
    clicked
}

/// Download sink that saves artifacts through the browser
pub struct BrowserDownload;

impl DownloadSink for BrowserDownload {
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        trigger_download(&artifact.filename, artifact.mime_type(), &artifact.bytes).map_err(|reason| {
            ExportError::DownloadRejected {
                filename: artifact.filename.clone(),
                reason,
            }
        })
    }
}
