//! CSV assembly and browser download for the export buttons.
//!
//! Assembly is plain string work, kept separate from the hydrate-gated
//! Blob/anchor plumbing so every export column mapping is testable.

#[cfg(test)]
#[path = "csv_test.rs"]
mod csv_test;

/// Quote a field when it carries a delimiter, quote, or line break;
/// embedded quotes are doubled.
pub fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') || raw.contains('\r') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}

/// Assemble a full document: header line plus one line per row.
pub fn csv_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.iter().map(|h| csv_field(h)).collect::<Vec<_>>().join(","));
    for row in rows {
        lines.push(row.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

/// Trigger a browser download of `content` as `<filename>.csv`.
/// No-op outside the browser.
pub fn download_csv(filename: &str, content: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };

        let parts = js_sys::Array::of1(&content.into());
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/csv;charset=utf-8;");
        let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
            log::error!("csv export: could not build blob for {filename}");
            return;
        };
        let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
            return;
        };

        if let Ok(element) = document.create_element("a") {
            if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
                anchor.set_href(&url);
                anchor.set_download(&format!("{filename}.csv"));
                let _ = body.append_child(&anchor);
                anchor.click();
                let _ = body.remove_child(&anchor);
            }
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, content);
    }
}
