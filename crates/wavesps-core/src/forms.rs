//! Form submissions
//!
//! Posts the signup, login and contact forms to the backend as JSON. Unlike
//! metrics polling, every failure is returned so the caller can show it to
//! the user.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::source::join_url;

/// Errors that can occur while submitting a form
#[derive(Error, Debug)]
pub enum FormError {
    /// Connection, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// Reply is not a form response
    #[error("Malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Body of `POST /api/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Full name
    pub name: String,
    /// Account email
    pub email: String,
    /// Plain password, hashed by the backend
    pub password: String,
}

/// Body of `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Body of `POST /api/contact`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body
    pub message: String,
}

/// Backend reply to every form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    /// `"success"` or `"error"`
    pub status: String,
    /// Text for the user
    #[serde(default)]
    pub message: String,
    /// Page to open next
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// What the user should see after submitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Backend reported `"success"`; `redirect` is where to navigate next
    Accepted {
        /// Text for the user
        message: String,
        /// Page to open next
        redirect: Option<String>,
    },
    /// Backend refused the form (e.g. email already registered)
    Rejected {
        /// Reason given by the backend
        message: String,
    },
}

impl From<FormResponse> for FormOutcome {
    fn from(response: FormResponse) -> Self {
        if response.status == "success" {
            FormOutcome::Accepted {
                message: response.message,
                redirect: response.redirect,
            }
        } else {
            FormOutcome::Rejected {
                message: response.message,
            }
        }
    }
}

impl FormOutcome {
    /// Message to show to the user
    pub fn message(&self) -> &str {
        match self {
            FormOutcome::Accepted { message, .. } | FormOutcome::Rejected { message } => message,
        }
    }

    /// Whether the backend accepted the form
    pub fn is_accepted(&self) -> bool {
        matches!(self, FormOutcome::Accepted { .. })
    }
}

/// Client for the form endpoints
#[derive(Clone)]
pub struct FormClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl FormClient {
    /// Create a client posting to `base_url`
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Create an account
    pub async fn signup(&self, request: &SignupRequest) -> Result<FormOutcome, FormError> {
        self.submit("/api/signup", request).await
    }

    /// Log in; on success the outcome carries the redirect target
    pub async fn login(&self, request: &LoginRequest) -> Result<FormOutcome, FormError> {
        self.submit("/api/login", request).await
    }

    /// Send a message to the command center
    pub async fn contact(&self, request: &ContactRequest) -> Result<FormOutcome, FormError> {
        self.submit("/api/contact", request).await
    }

    async fn submit<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<FormOutcome, FormError> {
        let url = join_url(&self.base_url, path);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(FormError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "form submission rejected by server");
            return Err(FormError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(FormError::Transport)?;
        let reply: FormResponse = serde_json::from_slice(&bytes).map_err(FormError::Decode)?;
        tracing::debug!(%url, status = %reply.status, "form submitted");
        Ok(reply.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_maps_to_accepted() {
        let response: FormResponse = serde_json::from_str(
            r#"{"message": "Login Successful!", "status": "success", "redirect": "/indexing"}"#,
        )
        .unwrap();
        let outcome = FormOutcome::from(response);

        assert_eq!(
            outcome,
            FormOutcome::Accepted {
                message: "Login Successful!".to_string(),
                redirect: Some("/indexing".to_string()),
            }
        );
    }

    #[test]
    fn test_other_status_maps_to_rejected() {
        let response: FormResponse =
            serde_json::from_str(r#"{"message": "Email already exists!", "status": "error"}"#)
                .unwrap();
        let outcome = FormOutcome::from(response);

        assert!(!outcome.is_accepted());
        assert_eq!(outcome.message(), "Email already exists!");
    }

    #[test]
    fn test_request_bodies_serialize_expected_keys() {
        let contact = ContactRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            message: "Streetlight out on 5th".to_string(),
        };
        let value = serde_json::to_value(&contact).unwrap();

        assert_eq!(value["name"], "Asha");
        assert_eq!(value["message"], "Streetlight out on 5th");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
