use serde::{Deserialize, Serialize};

/// Fixed payload sent by the broker test endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloMessage {
    pub msg: String,
}

impl Default for HelloMessage {
    fn default() -> Self {
        Self {
            msg: "Hello world".to_string(),
        }
    }
}
