//! Photo attachments for multipart uploads

use wasm_bindgen_futures::JsFuture;

use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Read a picked file into memory
pub async fn read_photo(file: web_sys::File) -> Result<Photo, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Validation(format!("Could not read {}: {:?}", file.name(), e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = match file.type_() {
        mime if mime.is_empty() => "application/octet-stream".to_string(),
        mime => mime,
    };
    Ok(Photo {
        file_name: file.name(),
        mime,
        bytes,
    })
}
