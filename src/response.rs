//! Response envelope helpers: `{message}` and `{message, data}` bodies.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct MessageData<T> {
    pub message: &'static str,
    pub data: T,
}

pub fn message(message: &'static str) -> Json<MessageBody> {
    Json(MessageBody { message })
}

pub fn message_with_data<T: Serialize>(message: &'static str, data: T) -> Json<MessageData<T>> {
    Json(MessageData { message, data })
}
