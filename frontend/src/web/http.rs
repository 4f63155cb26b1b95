//! `fetch` transport for the core API client.

use gametracker::error::{ApiError, ApiResult};
use gametracker::request::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody,
};
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

fn js_error(context: &str, err: JsValue) -> ApiError {
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    ApiError::network(format!("{}: {}", context, detail))
}

/// Builds a browser `FormData`. The browser picks the multipart boundary.
fn form_data(form: &MultipartForm) -> ApiResult<FormData> {
    let data = FormData::new().map_err(|e| js_error("FormData", e))?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value)
            .map_err(|e| js_error("FormData.append", e))?;
    }
    for file in &form.files {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("Blob", e))?;
        data.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
            .map_err(|e| js_error("FormData.append", e))?;
    }
    Ok(data)
}

#[derive(Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder: RequestBuilder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match &req.body {
            Some(RequestBody::Json(body)) => builder.body(body.as_str()),
            Some(RequestBody::Multipart(form)) => builder.body(form_data(form)?),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
