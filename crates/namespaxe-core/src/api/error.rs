use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("An error occurred: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{}", status_text(.0))]
    Status(u16),

    #[error("An error occurred: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

fn status_text(code: &u16) -> String {
    status_message(*code)
}

/// User-facing text for a non-200 response.
pub fn status_message(code: u16) -> String {
    match code {
        400 => "Bad Request: The server could not understand the request due to invalid syntax.".to_string(),
        401 => "Unauthorized: You are not authorized to access this resource. Please check your credentials.".to_string(),
        403 => "Forbidden: You do not have the necessary permissions to access this resource.".to_string(),
        404 => "Not Found: The requested resource could not be found.".to_string(),
        500 => "Internal Server Error: The server encountered an error and could not complete the request.".to_string(),
        502 => "Bad Gateway: The server received an invalid response from an upstream server.".to_string(),
        503 => "Service Unavailable: The server is currently unable to handle the request.".to_string(),
        504 => "Gateway Timeout: The server took too long to respond.".to_string(),
        _ => format!("Unexpected error: Received status code {}.", code),
    }
}
