use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    // Success with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    // Success with message
    pub fn success_with_message(data: Option<T>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }
}

impl ApiResponse<()> {
    // Error response (no data)
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_envelope_serializes_data() {
        let body = serde_json::to_value(ApiResponse::success(42)).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
        assert_eq!(body["message"], serde_json::Value::Null);
    }

    #[test]
    fn error_envelope_carries_the_message() {
        let body = serde_json::to_value(ApiResponse::error("Not found: nope")).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not found: nope");
    }
}
