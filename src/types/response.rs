use actix_web::http::header::{
    Charset, ContentDisposition, ContentType, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::types::error::AppError;

/// A stored file streamed back to the browser.
pub struct FileBody {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
    pub inline: bool,
}

pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
    NoContent,
    File(FileBody),
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(v),
            ApiResponse::Created(v) => HttpResponse::Created().json(v),
            ApiResponse::NoContent => HttpResponse::NoContent().finish(),
            ApiResponse::File(file) => {
                let disposition = ContentDisposition {
                    disposition: if file.inline {
                        DispositionType::Inline
                    } else {
                        DispositionType::Attachment
                    },
                    parameters: filename_params(file.filename),
                };
                let content_type = file
                    .content_type
                    .parse()
                    .map(ContentType)
                    .unwrap_or(ContentType::octet_stream());
                let mut res = HttpResponse::Ok();
                res.insert_header(content_type).insert_header(disposition);
                if file.inline {
                    // uploaded html/svg must not run scripts on our origin
                    res.insert_header(("Content-Security-Policy", "sandbox"));
                }
                res.body(file.bytes)
            }
        }
    }
}

/// Plain `filename` for ASCII names. Anything else gets an RFC 5987 `filename*`
/// with an ASCII stand-in for clients that ignore it.
fn filename_params(name: String) -> Vec<DispositionParam> {
    if name.is_ascii() {
        return vec![DispositionParam::Filename(name)];
    }
    let fallback: String = name.chars().map(|c| if c.is_ascii() { c } else { '_' }).collect();
    vec![
        DispositionParam::Filename(fallback),
        DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: name.into_bytes(),
        }),
    ]
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
