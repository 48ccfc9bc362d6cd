//! Event vocabulary of the relay.
//!
//! Inbound events arrive tagged by kind; kinds with a documented payload
//! contract deserialize into typed structs (a missing required field fails
//! deserialization and the frame is dropped upstream), while the open-ended
//! kinds carry raw JSON objects that are forwarded as-is. Outbound events
//! are what the router hands the transport: every payload carries a
//! server-assigned timestamp that overrides anything the sender supplied.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::foundation::{ClientIdentity, Role, Severity, Timestamp};

// ============================================
// Inbound (client → relay)
// ============================================

/// All events a client can send, tagged by the `event` field with the
/// payload under `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum InboundEvent {
    /// Identity registration for this connection.
    #[serde(rename = "register")]
    Register(Registration),

    /// Generic alert; any JSON object, forwarded untouched.
    #[serde(rename = "alert:new")]
    AlertNew(Map<String, Value>),

    /// Voice order captured at a table.
    #[serde(rename = "voiceorder:new")]
    VoiceOrderNew(VoiceOrder),

    /// A worker finished a checklist.
    #[serde(rename = "checklist:completed")]
    ChecklistCompleted(ChecklistCompletion),

    /// Stock count variance flagged by inventory reconciliation.
    #[serde(rename = "inventory:gap")]
    InventoryGap(InventoryGap),

    /// Suspected theft.
    #[serde(rename = "theft:detected")]
    TheftDetected(TheftReport),

    /// A worker arrived late for a shift.
    #[serde(rename = "worker:late")]
    WorkerLate(LateArrival),

    /// A worker failed a training test.
    #[serde(rename = "training:failed")]
    TrainingFailed(TrainingFailure),

    /// Confidential report; any JSON object, management-only delivery.
    #[serde(rename = "anonymousReport:new")]
    AnonymousReportNew(Map<String, Value>),
}

/// Payload of the `register` message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_id: String,
    pub user_role: Role,
    pub user_name: String,
}

impl From<Registration> for ClientIdentity {
    fn from(reg: Registration) -> Self {
        ClientIdentity::new(reg.user_id, reg.user_role, reg.user_name)
    }
}

/// Payload of `voiceorder:new`. The table number is required; everything
/// else the capture device attaches rides along in `extra`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceOrder {
    pub table_number: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VoiceOrder {
    /// Flattens the order back into a JSON object for fan-out.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        map.insert("tableNumber".to_string(), Value::from(self.table_number));
        map
    }
}

/// Payload of `checklist:completed`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistCompletion {
    pub checklist_id: String,
    pub worker_id: String,
    pub worker_name: String,
    pub checklist_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChecklistCompletion {
    /// Flattens the completion back into a JSON object for fan-out.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        map.insert("checklistId".to_string(), Value::from(self.checklist_id));
        map.insert("workerId".to_string(), Value::from(self.worker_id));
        map.insert("workerName".to_string(), Value::from(self.worker_name));
        map.insert("checklistName".to_string(), Value::from(self.checklist_name));
        map
    }
}

/// Payload of `inventory:gap`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryGap {
    pub item_name: String,
    pub variance: f64,
}

/// Payload of `theft:detected`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheftReport {
    pub description: String,
    pub amount: f64,
}

/// Payload of `worker:late`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LateArrival {
    pub worker_id: String,
    pub worker_name: String,
    pub minutes_late: u32,
}

/// Payload of `training:failed`. Score is out of 100.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingFailure {
    pub worker_id: String,
    pub worker_name: String,
    pub test_name: String,
    pub score: u32,
}

// ============================================
// Outbound (relay → client)
// ============================================

/// All events the relay can push, tagged by the `event` field with the
/// payload under `data`.
///
/// Pass-through kinds carry a JSON object the router has already merged
/// the server timestamp into; synthesized kinds carry typed payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    /// Acknowledgment of a `register` message.
    #[serde(rename = "registered")]
    Registered(RegisteredAck),

    /// Alert broadcast to everyone.
    #[serde(rename = "alert:received")]
    AlertReceived(Value),

    /// Voice order broadcast to everyone.
    #[serde(rename = "voiceorder:received")]
    VoiceOrderReceived(Value),

    /// Urgency-flagged voice order copy for kitchen roles.
    #[serde(rename = "voiceorder:kitchen")]
    VoiceOrderKitchen(Value),

    /// Checklist state broadcast to everyone.
    #[serde(rename = "checklist:update")]
    ChecklistUpdate(Value),

    /// Management notification.
    #[serde(rename = "notification")]
    Notification(Notification),

    /// Urgent management notification carrying a full alert payload.
    #[serde(rename = "notification:urgent")]
    NotificationUrgent(Alert),

    /// Confidential report, delivered to management only.
    #[serde(rename = "anonymousReport:received")]
    AnonymousReportReceived(Value),
}

impl OutboundEvent {
    /// Event name on the wire, mainly for logging.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Registered(_) => "registered",
            OutboundEvent::AlertReceived(_) => "alert:received",
            OutboundEvent::VoiceOrderReceived(_) => "voiceorder:received",
            OutboundEvent::VoiceOrderKitchen(_) => "voiceorder:kitchen",
            OutboundEvent::ChecklistUpdate(_) => "checklist:update",
            OutboundEvent::Notification(_) => "notification",
            OutboundEvent::NotificationUrgent(_) => "notification:urgent",
            OutboundEvent::AnonymousReportReceived(_) => "anonymousReport:received",
        }
    }
}

/// Reply to a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredAck {
    pub success: bool,
    pub message: String,
}

impl RegisteredAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: "Successfully registered for real-time updates".to_string(),
        }
    }
}

/// Class of a synthesized alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    InventoryGap,
    Theft,
    LateArrival,
    TrainingFailed,
    VoiceOrder,
}

/// Alert synthesized by the relay from a typed inbound event (or by the
/// heartbeat from the demo catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    pub timestamp: Timestamp,
}

impl Alert {
    /// Converts the alert into the JSON payload the broadcast path carries.
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).expect("alert payload serialization should not fail")
    }
}

/// Management notification (currently only checklist completions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inbound_register_deserializes() {
        let frame = json!({
            "event": "register",
            "data": { "userId": "u1", "userRole": "MANAGER", "userName": "Ana" }
        });
        let event: InboundEvent = serde_json::from_value(frame).unwrap();
        match event {
            InboundEvent::Register(reg) => {
                assert_eq!(reg.user_id, "u1");
                assert_eq!(reg.user_role, Role::Manager);
                assert_eq!(reg.user_name, "Ana");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn inbound_training_failure_requires_score() {
        let frame = json!({
            "event": "training:failed",
            "data": { "workerId": "u2", "workerName": "Marko", "testName": "Food Safety" }
        });
        assert!(serde_json::from_value::<InboundEvent>(frame).is_err());
    }

    #[test]
    fn inbound_alert_accepts_arbitrary_object() {
        let frame = json!({
            "event": "alert:new",
            "data": { "type": "CUSTOM", "whatever": [1, 2, 3] }
        });
        let event: InboundEvent = serde_json::from_value(frame).unwrap();
        assert!(matches!(event, InboundEvent::AlertNew(_)));
    }

    #[test]
    fn inbound_alert_rejects_non_object_payload() {
        let frame = json!({ "event": "alert:new", "data": "just a string" });
        assert!(serde_json::from_value::<InboundEvent>(frame).is_err());
    }

    #[test]
    fn inbound_unknown_event_name_is_an_error() {
        let frame = json!({ "event": "table:flipped", "data": {} });
        assert!(serde_json::from_value::<InboundEvent>(frame).is_err());
    }

    #[test]
    fn voice_order_keeps_extra_fields_through_into_map() {
        let order: VoiceOrder = serde_json::from_value(json!({
            "tableNumber": 7,
            "items": ["soup", "steak"],
            "note": "no onions"
        }))
        .unwrap();

        let map = order.into_map();
        assert_eq!(map.get("tableNumber"), Some(&json!(7)));
        assert_eq!(map.get("items"), Some(&json!(["soup", "steak"])));
        assert_eq!(map.get("note"), Some(&json!("no onions")));
    }

    #[test]
    fn checklist_completion_into_map_carries_canonical_fields() {
        let completion: ChecklistCompletion = serde_json::from_value(json!({
            "checklistId": "c1",
            "workerId": "u2",
            "workerName": "Marko",
            "checklistName": "Opening",
            "durationMinutes": 12
        }))
        .unwrap();

        let map = completion.into_map();
        assert_eq!(map.get("checklistId"), Some(&json!("c1")));
        assert_eq!(map.get("workerName"), Some(&json!("Marko")));
        assert_eq!(map.get("durationMinutes"), Some(&json!(12)));
    }

    #[test]
    fn outbound_event_serializes_with_event_and_data() {
        let event = OutboundEvent::Registered(RegisteredAck::ok());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "registered");
        assert_eq!(json["data"]["success"], true);
    }

    #[test]
    fn alert_serializes_type_and_severity_on_the_wire() {
        let alert = Alert {
            alert_type: AlertType::Theft,
            title: "Theft detected".to_string(),
            message: "cash drawer discrepancy".to_string(),
            severity: Severity::Critical,
            amount: Some(120.0),
            worker_id: None,
            table_number: None,
            timestamp: Timestamp::from_rfc3339("2024-01-15T10:30:00Z").unwrap(),
        };

        let value = alert.into_value();
        assert_eq!(value["type"], "THEFT");
        assert_eq!(value["severity"], "CRITICAL");
        assert_eq!(value["amount"], 120.0);
        assert_eq!(value["timestamp"], "2024-01-15T10:30:00.000Z");
        assert!(value.get("workerId").is_none());
    }

    #[test]
    fn outbound_event_name_matches_serialized_tag() {
        let event = OutboundEvent::AlertReceived(json!({}));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], event.name());
    }
}
