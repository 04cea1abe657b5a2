//! Wire messages exchanged with a dashboard client over a WebSocket.
//!
//! Every message is a JSON object tagged by `type`:
//! - client → server: control changes and keepalive pings
//! - server → client: the session greeting, recomputed views, errors, pongs

use serde::{Deserialize, Serialize};

use crate::controls::{ControlError, ControlEvent, ControlSpec};
use crate::dashboard::Views;

pub type SessionId = String;

/// Message from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SelectSpecies { species: String },
    SetYearRange { min: i32, max: i32 },
    SetPage { page: usize },

    /// Keepalive; answered with a `pong` carrying the same sequence number.
    Ping { seq: u64 },
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Malformed)
    }

    /// The control change this message asks for, if any.
    pub fn into_event(self) -> Option<ControlEvent> {
        match self {
            ClientMessage::SelectSpecies { species } => {
                Some(ControlEvent::SelectSpecies { species })
            }
            ClientMessage::SetYearRange { min, max } => {
                Some(ControlEvent::SetYearRange { min, max })
            }
            ClientMessage::SetPage { page } => Some(ControlEvent::SetPage { page }),
            ClientMessage::Ping { .. } => None,
        }
    }
}

/// Message from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First message on every connection.
    Hello {
        session_id: SessionId,
        server_version: String,
        controls: ControlSpec,
    },

    Views { views: Box<Views> },

    Error { code: String, message: String },

    Pong { seq: u64 },
}

impl ServerMessage {
    pub fn views(views: Views) -> Self {
        ServerMessage::Views {
            views: Box::new(views),
        }
    }

    pub fn error(err: &ProtocolError) -> Self {
        ServerMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

#[derive(Debug)]
pub enum ProtocolError {
    Malformed(serde_json::Error),
    Encode(serde_json::Error),
    Control(ControlError),
}

impl ProtocolError {
    /// Stable machine-readable code sent in `error` messages.
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::Malformed(_) => "parse_error",
            ProtocolError::Encode(_) => "internal_error",
            ProtocolError::Control(ControlError::UnknownSpecies(_)) => "unknown_species",
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "malformed client message: {e}"),
            ProtocolError::Encode(e) => write!(f, "failed to encode server message: {e}"),
            ProtocolError::Control(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Malformed(e) | ProtocolError::Encode(e) => Some(e),
            ProtocolError::Control(e) => Some(e),
        }
    }
}

impl From<ControlError> for ProtocolError {
    fn from(err: ControlError) -> Self {
        ProtocolError::Control(err)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{ClientMessage, ProtocolError, ServerMessage};
    use crate::controls::{ControlError, ControlEvent};

    #[test]
    fn decodes_client_messages() {
        let msg =
            ClientMessage::decode(r#"{"type":"select_species","species":"Ara macao"}"#).unwrap();
        assert_eq!(
            msg.into_event(),
            Some(ControlEvent::SelectSpecies {
                species: "Ara macao".to_string()
            })
        );

        let msg = ClientMessage::decode(r#"{"type":"ping","seq":7}"#).unwrap();
        assert_eq!(msg, ClientMessage::Ping { seq: 7 });
        assert_eq!(msg.into_event(), None);
    }

    #[test]
    fn malformed_messages_are_reported() {
        let err = ClientMessage::decode(r#"{"type":"zoom","level":3}"#).unwrap_err();
        assert_eq!(err.code(), "parse_error");
        let msg: Value =
            serde_json::from_str(&ServerMessage::error(&err).encode().unwrap()).unwrap();
        assert_eq!(msg["type"], "error");
        assert_eq!(msg["code"], "parse_error");
    }

    #[test]
    fn control_errors_map_to_codes() {
        let err = ProtocolError::from(ControlError::UnknownSpecies("X".to_string()));
        let msg: Value =
            serde_json::from_str(&ServerMessage::error(&err).encode().unwrap()).unwrap();
        assert_eq!(
            msg,
            json!({
                "type": "error",
                "code": "unknown_species",
                "message": "unknown species choice: \"X\"",
            })
        );
    }

    #[test]
    fn pong_is_tagged() {
        let text = ServerMessage::Pong { seq: 3 }.encode().unwrap();
        assert_eq!(text, r#"{"type":"pong","seq":3}"#);
    }
}
