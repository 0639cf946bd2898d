//! Clipboard and file-download side effects.

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn window() -> Result<web_sys::Window, JsValue> {
	web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Write `text` to the system clipboard.
pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
	let clipboard = window()?.navigator().clipboard();
	JsFuture::from(clipboard.write_text(text)).await.map(|_| ())
}

/// Offer `text` as a file download named `file_name`.
pub fn download_text(file_name: &str, mime: &str, text: &str) -> Result<(), JsValue> {
	let document = window()?
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();

	if let Err(e) = Url::revoke_object_url(&url) {
		warn!("could not revoke {url}: {e:?}");
	}
	Ok(())
}
