//! Interview service client abstractions and the HTTP implementation

pub mod client;
pub mod http;

pub use client::{
    decode_audio, is_valid_session_id, EndResponse, InterviewApi, RespondRequest, ResumeUpload,
    SessionOpened, TurnResponse,
};
pub use http::HttpInterviewApi;
