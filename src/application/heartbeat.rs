//! Heartbeat emitter - periodic demo alerts while anyone is registered.
//!
//! Keeps idle dashboards visibly "live": every tick, if at least one
//! client has registered, one entry from a fixed canned catalog is
//! re-stamped with the current time and broadcast through the same
//! `alert:received` path as a real alert. With nobody registered the tick
//! does nothing at all.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use rand::Rng;
use tokio::time::MissedTickBehavior;

use crate::domain::events::{Alert, AlertType, OutboundEvent};
use crate::domain::foundation::{Severity, Timestamp};
use crate::ports::EventTransport;

use super::registry::ConnectionRegistry;

/// Canned alert template, stamped with a fresh timestamp on each emission.
#[derive(Debug, Clone)]
pub struct AlertSeed {
    pub alert_type: AlertType,
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pub amount: Option<f64>,
    pub table_number: Option<u32>,
}

impl AlertSeed {
    /// Builds a full alert from this template.
    pub fn stamp(&self, timestamp: Timestamp) -> Alert {
        Alert {
            alert_type: self.alert_type,
            title: self.title.to_string(),
            message: self.message.to_string(),
            severity: self.severity,
            amount: self.amount,
            worker_id: None,
            table_number: self.table_number,
            timestamp,
        }
    }
}

static DEMO_CATALOG: Lazy<[AlertSeed; 2]> = Lazy::new(|| {
    [
        AlertSeed {
            alert_type: AlertType::InventoryGap,
            title: "Inventory shortage detected",
            message: "Fries: expected 15kg, counted 12.8kg",
            severity: Severity::Medium,
            amount: Some(30.50),
            table_number: None,
        },
        AlertSeed {
            alert_type: AlertType::VoiceOrder,
            title: "New voice order",
            message: "Table 5: 2x schnitzel, fries",
            severity: Severity::Low,
            amount: None,
            table_number: Some(5),
        },
    ]
});

/// The fixed demo-alert catalog the heartbeat draws from.
pub fn demo_catalog() -> &'static [AlertSeed] {
    &*DEMO_CATALOG
}

/// Background task broadcasting one canned alert per interval tick while
/// at least one client is registered.
pub struct HeartbeatEmitter {
    registry: Arc<ConnectionRegistry>,
    transport: Arc<dyn EventTransport>,
    interval: Duration,
}

impl HeartbeatEmitter {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        transport: Arc<dyn EventTransport>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            transport,
            interval,
        }
    }

    /// Runs until the process exits; intended for `tokio::spawn`.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately; consume it
        // so the first demo alert waits a full interval.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One heartbeat tick. Returns the alert that was broadcast, if any.
    pub async fn tick(&self) -> Option<Alert> {
        if self.registry.is_empty().await {
            return None;
        }

        let seed = &DEMO_CATALOG[rand::thread_rng().gen_range(0..DEMO_CATALOG.len())];
        let alert = seed.stamp(Timestamp::now());
        tracing::debug!(alert_type = ?alert.alert_type, "broadcasting heartbeat demo alert");

        self.transport
            .broadcast(OutboundEvent::AlertReceived(alert.clone().into_value()))
            .await;
        Some(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClientIdentity, ConnectionId, Role};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        broadcasts: Mutex<Vec<OutboundEvent>>,
    }

    #[async_trait]
    impl EventTransport for RecordingTransport {
        async fn send_to(&self, _connection: ConnectionId, _event: OutboundEvent) {
            panic!("heartbeat never sends to a single connection");
        }

        async fn broadcast(&self, event: OutboundEvent) {
            self.broadcasts.lock().await.push(event);
        }
    }

    fn emitter(
        registry: Arc<ConnectionRegistry>,
        transport: Arc<RecordingTransport>,
    ) -> HeartbeatEmitter {
        HeartbeatEmitter::new(registry, transport, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn tick_is_silent_with_no_registered_connections() {
        let registry = Arc::new(ConnectionRegistry::new());
        let transport = Arc::new(RecordingTransport::default());

        let emitted = emitter(registry, transport.clone()).tick().await;

        assert!(emitted.is_none());
        assert!(transport.broadcasts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn tick_broadcasts_exactly_one_catalog_alert_when_someone_is_registered() {
        let registry = Arc::new(ConnectionRegistry::new());
        registry
            .register(
                ConnectionId::new(),
                ClientIdentity::new("u1", Role::Waiter, "Iva"),
            )
            .await;
        let transport = Arc::new(RecordingTransport::default());

        let emitted = emitter(registry, transport.clone())
            .tick()
            .await
            .expect("alert emitted");

        let broadcasts = transport.broadcasts.lock().await;
        assert_eq!(broadcasts.len(), 1);
        assert!(matches!(broadcasts[0], OutboundEvent::AlertReceived(_)));
        assert!(demo_catalog()
            .iter()
            .any(|seed| seed.alert_type == emitted.alert_type
                && seed.message == emitted.message));
    }

    #[tokio::test]
    async fn repeated_ticks_each_produce_one_broadcast() {
        let registry = Arc::new(ConnectionRegistry::new());
        registry
            .register(
                ConnectionId::new(),
                ClientIdentity::new("u1", Role::Cook, "Marko"),
            )
            .await;
        let transport = Arc::new(RecordingTransport::default());
        let heartbeat = emitter(registry, transport.clone());

        for _ in 0..5 {
            heartbeat.tick().await;
        }

        assert_eq!(transport.broadcasts.lock().await.len(), 5);
    }

    #[test]
    fn demo_catalog_has_the_two_expected_entries() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].alert_type, AlertType::InventoryGap);
        assert_eq!(catalog[1].alert_type, AlertType::VoiceOrder);
    }
}
