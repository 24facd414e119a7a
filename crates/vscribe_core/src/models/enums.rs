//! Small closed-set types shared across modules.

use serde::{Deserialize, Serialize};

/// Compute device requested for speech recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRequest {
    /// Use an accelerated device when one is compiled in, CPU otherwise.
    #[default]
    Auto,
    /// Force CPU inference.
    Cpu,
}

impl DeviceRequest {
    /// Whether GPU offload should be requested from the model runtime.
    pub fn wants_gpu(self) -> bool {
        matches!(self, DeviceRequest::Auto)
    }
}

impl std::fmt::Display for DeviceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceRequest::Auto => write!(f, "auto"),
            DeviceRequest::Cpu => write!(f, "cpu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_request_serde_roundtrip() {
        let json = serde_json::to_string(&DeviceRequest::Cpu).unwrap();
        assert_eq!(json, "\"cpu\"");
        let back: DeviceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DeviceRequest::Cpu);
    }

    #[test]
    fn auto_wants_gpu() {
        assert!(DeviceRequest::Auto.wants_gpu());
        assert!(!DeviceRequest::Cpu.wants_gpu());
    }
}
