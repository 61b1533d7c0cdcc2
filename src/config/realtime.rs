//! Real-time connection configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the WebSocket fan-out layer
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound queue depth. When a connection's queue
    /// is full, events for that connection are dropped rather than
    /// blocking the hub.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Seconds between keepalive pings to each client
    #[serde(default = "default_ping_interval")]
    pub ping_interval_secs: u64,

    /// Seconds a connection may go without a pong before it is closed.
    /// Must exceed the ping interval, or every connection would die
    /// before its first keepalive round trip.
    #[serde(default = "default_pong_timeout")]
    pub pong_timeout_secs: u64,

    /// Upper bound in seconds on any single socket write
    #[serde(default = "default_write_timeout")]
    pub write_timeout_secs: u64,

    /// Largest inbound frame accepted, in bytes. Clients only ever
    /// send control traffic, so this stays small.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl RealtimeConfig {
    /// Get ping interval as Duration
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    /// Get pong timeout as Duration
    pub fn pong_timeout(&self) -> Duration {
        Duration::from_secs(self.pong_timeout_secs)
    }

    /// Get write timeout as Duration
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Validate real-time configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.queue_capacity == 0 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        if self.pong_timeout_secs <= self.ping_interval_secs {
            return Err(ValidationError::PongTimeoutTooShort);
        }
        if self.write_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_frame_bytes == 0 {
            return Err(ValidationError::InvalidFrameSize);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            ping_interval_secs: default_ping_interval(),
            pong_timeout_secs: default_pong_timeout(),
            write_timeout_secs: default_write_timeout(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

fn default_queue_capacity() -> usize {
    32
}

fn default_ping_interval() -> u64 {
    45
}

fn default_pong_timeout() -> u64 {
    60
}

fn default_write_timeout() -> u64 {
    10
}

fn default_max_frame_bytes() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_config_defaults() {
        let config = RealtimeConfig::default();
        assert_eq!(config.queue_capacity, 32);
        assert_eq!(config.ping_interval_secs, 45);
        assert_eq!(config.pong_timeout_secs, 60);
        assert_eq!(config.max_frame_bytes, 1024);
    }

    #[test]
    fn test_duration_helpers() {
        let config = RealtimeConfig {
            ping_interval_secs: 30,
            pong_timeout_secs: 40,
            write_timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.ping_interval(), Duration::from_secs(30));
        assert_eq!(config.pong_timeout(), Duration::from_secs(40));
        assert_eq!(config.write_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(RealtimeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_queue_capacity() {
        let config = RealtimeConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_pong_timeout_not_beyond_ping_interval() {
        let config = RealtimeConfig {
            ping_interval_secs: 45,
            pong_timeout_secs: 45,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::PongTimeoutTooShort)
        ));
    }

    #[test]
    fn test_validation_zero_frame_size() {
        let config = RealtimeConfig {
            max_frame_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
