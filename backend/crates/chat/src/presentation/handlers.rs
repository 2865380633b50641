//! HTTP Handlers

use crate::application::config::ChatConfig;
use crate::application::mirror::MirrorQueue;
use crate::application::{
    CountOnlineUseCase, InspectPresenceUseCase, PollMessagesUseCase, PostMessageInput,
    PostMessageUseCase, PresenceReport,
};
use crate::domain::entities::ChatMessage;
use crate::domain::message_log::MessageLog;
use crate::domain::notifier::ChatNotifier;
use crate::domain::presence::PresenceTracker;
use crate::error::{ChatError, ChatResult};
use crate::presentation::dto::{OnlineResponse, PostMessageRequest};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use platform::client::{ClientFingerprint, extract_client_ip, extract_fingerprint};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Shared state for chat handlers
///
/// The log and presence map are only reachable through use cases; handlers
/// never hand out references to them.
#[derive(Clone)]
pub struct ChatAppState {
    pub log: Arc<MessageLog>,
    pub presence: Arc<PresenceTracker>,
    pub mirror: MirrorQueue,
    pub config: Arc<ChatConfig>,
}

impl ChatAppState {
    /// Fresh, empty state sized by `config`
    ///
    /// Starts the mirror worker for `notifier`. The returned handle
    /// completes once every clone of the state is dropped and the queue
    /// is drained.
    pub fn new<N>(config: ChatConfig, notifier: N) -> (Self, JoinHandle<()>)
    where
        N: ChatNotifier + Send + Sync + 'static,
    {
        let (mirror, worker) = MirrorQueue::spawn(Arc::new(notifier), config.mirror_capacity);
        let state = Self {
            log: Arc::new(MessageLog::with_max_len(config.max_history)),
            presence: Arc::new(PresenceTracker::new(config.presence_ttl)),
            mirror,
            config: Arc::new(config),
        };
        (state, worker)
    }

    fn fingerprint(&self, headers: &HeaderMap, addr: SocketAddr) -> ClientFingerprint {
        let client_ip = extract_client_ip(headers, Some(addr.ip()), self.config.trust_forwarded_for);
        let address = client_ip.map(|ip| ip.to_string()).unwrap_or_default();
        extract_fingerprint(headers, &address)
    }
}

/// GET /messages
pub async fn list_messages(
    State(state): State<ChatAppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Json<Vec<ChatMessage>> {
    let fingerprint = state.fingerprint(&headers, addr);

    let use_case = PollMessagesUseCase::new(state.log.clone(), state.presence.clone());
    let messages = use_case.execute(&fingerprint, Utc::now()).await;

    Json(messages)
}

/// GET /online
pub async fn online(State(state): State<ChatAppState>) -> Json<OnlineResponse> {
    let use_case = CountOnlineUseCase::new(state.presence.clone());
    let online = use_case.execute(Utc::now()).await;

    Json(OnlineResponse { online })
}

/// GET /debug/fp
pub async fn debug_fingerprint(
    State(state): State<ChatAppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> ChatResult<Html<String>> {
    if !state.config.debug_endpoint {
        return Err(ChatError::NotFound);
    }

    let fingerprint = state.fingerprint(&headers, addr);

    let use_case = InspectPresenceUseCase::new(state.presence.clone());
    let report = use_case.execute(fingerprint).await;

    Ok(Html(render_presence_report(&report)))
}

/// POST (any path)
pub async fn post_message(
    State(state): State<ChatAppState>,
    body: Bytes,
) -> ChatResult<&'static str> {
    let req = PostMessageRequest::parse(&body)?;

    let use_case = PostMessageUseCase::new(state.log.clone(), state.mirror.clone());
    let input = PostMessageInput {
        username: req.username,
        message: req.message,
    };
    use_case.execute(input).await;

    Ok("Message received")
}

/// Every path without an explicit route: POST still posts, anything else is 404
pub async fn fallback(
    State(state): State<ChatAppState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::POST {
        post_message(State(state), body).await.into_response()
    } else {
        ChatError::NotFound.into_response()
    }
}

fn render_presence_report(report: &PresenceReport) -> String {
    let mut html = format!(
        "<pre>Your fingerprint: {}</pre><pre>Tracked entries: {}\n",
        escape_html(&report.fingerprint),
        report.entries.len()
    );
    for entry in &report.entries {
        html.push_str(&format!(
            "{} ip={} last_seen={}\n",
            escape_html(&entry.fingerprint),
            escape_html(&entry.source_address),
            entry.last_seen_at.to_rfc3339()
        ));
    }
    html.push_str("</pre>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PresenceEntry;
    use chrono::TimeZone;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&'y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;&#39;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("10.0.0.1"), "10.0.0.1");
    }

    #[test]
    fn test_render_presence_report() {
        let report = PresenceReport {
            fingerprint: "abc123".to_string(),
            entries: vec![PresenceEntry {
                fingerprint: "def456".to_string(),
                last_seen_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                source_address: "<10.0.0.1>".to_string(),
            }],
        };

        let html = render_presence_report(&report);
        assert!(html.starts_with("<pre>Your fingerprint: abc123</pre>"));
        assert!(html.contains("Tracked entries: 1"));
        assert!(!html.contains("Online users"));
        assert!(html.contains("def456 ip=&lt;10.0.0.1&gt; last_seen=2024-05-01T12:00:00+00:00"));
        assert!(html.ends_with("</pre>"));
    }
}
