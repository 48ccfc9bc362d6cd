//! Event router - translates one inbound event into its deliveries.
//!
//! `route` is the only place dispatch policy lives: for each event kind it
//! decides the outbound event name, the payload shape, and the delivery
//! set (broadcast-all, role-filtered, or both). It reads the registry and
//! never mutates it, and performs no I/O; `dispatch` pushes the computed
//! deliveries through the transport port.

use serde_json::{Map, Value};

use crate::domain::events::{
    Alert, AlertType, InboundEvent, Notification, OutboundEvent,
};
use crate::domain::foundation::{ConnectionId, Role, Severity, Timestamp};
use crate::ports::EventTransport;

use super::registry::ConnectionRegistry;

/// Who a single delivery goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Every live connection, registered or not.
    Broadcast,
    /// One specific connection.
    Direct(ConnectionId),
}

/// One outbound event bound for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub target: DeliveryTarget,
    pub event: OutboundEvent,
}

impl Delivery {
    fn broadcast(event: OutboundEvent) -> Self {
        Self {
            target: DeliveryTarget::Broadcast,
            event,
        }
    }

    fn direct(connection: ConnectionId, event: OutboundEvent) -> Self {
        Self {
            target: DeliveryTarget::Direct(connection),
            event,
        }
    }
}

/// Computes the deliveries for one inbound event.
///
/// `received_at` is stamped by the caller at the moment the relay accepted
/// the event; it overwrites any timestamp the sender supplied.
pub async fn route(
    event: InboundEvent,
    received_at: Timestamp,
    registry: &ConnectionRegistry,
) -> Vec<Delivery> {
    match event {
        // Registration is a connection-lifecycle concern handled by the
        // transport adapter, not a routable event.
        InboundEvent::Register(_) => Vec::new(),

        InboundEvent::AlertNew(payload) => {
            vec![Delivery::broadcast(OutboundEvent::AlertReceived(stamped(
                payload,
                received_at,
            )))]
        }

        InboundEvent::VoiceOrderNew(order) => {
            let map = order.into_map();

            let mut kitchen_map = map.clone();
            kitchen_map.insert("urgent".to_string(), Value::Bool(true));
            let kitchen_payload = stamped(kitchen_map, received_at);

            let mut deliveries = vec![Delivery::broadcast(OutboundEvent::VoiceOrderReceived(
                stamped(map, received_at),
            ))];
            for connection in registry.find_by_role(Role::is_kitchen).await {
                deliveries.push(Delivery::direct(
                    connection,
                    OutboundEvent::VoiceOrderKitchen(kitchen_payload.clone()),
                ));
            }
            deliveries
        }

        InboundEvent::ChecklistCompleted(completion) => {
            let notification = Notification {
                kind: "CHECKLIST_COMPLETED".to_string(),
                title: "Checklist completed".to_string(),
                message: format!(
                    "{} completed checklist: {}",
                    completion.worker_name, completion.checklist_name
                ),
                severity: Severity::Low,
                timestamp: received_at,
            };

            let mut deliveries = vec![Delivery::broadcast(OutboundEvent::ChecklistUpdate(
                stamped(completion.into_map(), received_at),
            ))];
            for connection in registry.find_by_role(Role::is_management).await {
                deliveries.push(Delivery::direct(
                    connection,
                    OutboundEvent::Notification(notification.clone()),
                ));
            }
            deliveries
        }

        InboundEvent::InventoryGap(gap) => {
            let alert = Alert {
                alert_type: AlertType::InventoryGap,
                title: "Inventory shortage detected".to_string(),
                message: format!("Stock variance detected for item: {}", gap.item_name),
                severity: Severity::High,
                amount: Some(gap.variance),
                worker_id: None,
                table_number: None,
                timestamp: received_at,
            };
            vec![Delivery::broadcast(OutboundEvent::AlertReceived(
                alert.into_value(),
            ))]
        }

        InboundEvent::TheftDetected(report) => {
            let alert = Alert {
                alert_type: AlertType::Theft,
                title: "Theft detected".to_string(),
                message: report.description,
                severity: Severity::Critical,
                amount: Some(report.amount),
                worker_id: None,
                table_number: None,
                timestamp: received_at,
            };

            let mut deliveries = vec![Delivery::broadcast(OutboundEvent::AlertReceived(
                alert.clone().into_value(),
            ))];
            for connection in registry.find_by_role(Role::is_management).await {
                deliveries.push(Delivery::direct(
                    connection,
                    OutboundEvent::NotificationUrgent(alert.clone()),
                ));
            }
            deliveries
        }

        InboundEvent::WorkerLate(arrival) => {
            let alert = Alert {
                alert_type: AlertType::LateArrival,
                title: "Late arrival".to_string(),
                message: format!(
                    "{} is {} minutes late",
                    arrival.worker_name, arrival.minutes_late
                ),
                severity: Severity::Medium,
                amount: None,
                worker_id: Some(arrival.worker_id),
                table_number: None,
                timestamp: received_at,
            };
            vec![Delivery::broadcast(OutboundEvent::AlertReceived(
                alert.into_value(),
            ))]
        }

        InboundEvent::TrainingFailed(failure) => {
            let severity = if failure.score < 50 {
                Severity::Critical
            } else {
                Severity::High
            };
            let alert = Alert {
                alert_type: AlertType::TrainingFailed,
                title: "Training test failed".to_string(),
                message: format!(
                    "{} failed test: {} (score {}/100)",
                    failure.worker_name, failure.test_name, failure.score
                ),
                severity,
                amount: None,
                worker_id: Some(failure.worker_id),
                table_number: None,
                timestamp: received_at,
            };
            vec![Delivery::broadcast(OutboundEvent::AlertReceived(
                alert.into_value(),
            ))]
        }

        // Confidential by design: never broadcast, management only.
        InboundEvent::AnonymousReportNew(payload) => {
            let value = stamped(payload, received_at);
            registry
                .find_by_role(Role::is_management)
                .await
                .into_iter()
                .map(|connection| {
                    Delivery::direct(
                        connection,
                        OutboundEvent::AnonymousReportReceived(value.clone()),
                    )
                })
                .collect()
        }
    }
}

/// Pushes deliveries through the transport.
///
/// Each send is independent and best-effort; the transport never surfaces
/// per-target failures, so one dead connection cannot stall the rest.
pub async fn dispatch(deliveries: Vec<Delivery>, transport: &dyn EventTransport) {
    for delivery in deliveries {
        match delivery.target {
            DeliveryTarget::Broadcast => transport.broadcast(delivery.event).await,
            DeliveryTarget::Direct(connection) => {
                transport.send_to(connection, delivery.event).await
            }
        }
    }
}

/// Merges the server timestamp into a pass-through payload, overwriting
/// any timestamp the sender supplied.
fn stamped(mut payload: Map<String, Value>, received_at: Timestamp) -> Value {
    payload.insert("timestamp".to_string(), received_at.as_json());
    Value::Object(payload)
}
