//! Browser transport for the API client: `fetch` through gloo-net, with the
//! request timeout enforced by a gloo-timers race.

use async_trait::async_trait;
use client::transport::parse_body;
use client::{HttpRequest, HttpResponse, Method, RequestBody, Transport, TransportError};
use contracts::shared::payload::{FormPart, MultipartForm};
use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let timeout_ms = request.timeout_ms;
        let exchange = Box::pin(exchange(request));
        if timeout_ms == 0 {
            return exchange.await;
        }
        match select(exchange, TimeoutFuture::new(timeout_ms)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }
}

async fn exchange(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = builder_for(request.method, &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let prepared = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        // the browser sets the multipart boundary itself
        RequestBody::Multipart(form) => builder.body(to_form_data(&form)?),
    }
    .map_err(|e| TransportError::Network(e.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    Ok(HttpResponse::new(status, parse_body(&text)))
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", value))
}

fn to_form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(js_error)?;
    for (name, part) in form.parts() {
        match part {
            FormPart::Text(value) => data.append_with_str(name, value).map_err(js_error)?,
            FormPart::File(file) => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let chunks = js_sys::Array::of1(&bytes);
                let options = BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(js_error)?;
                data.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(data)
}
