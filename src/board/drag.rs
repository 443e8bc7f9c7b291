//! Drag-and-drop transfer payloads and gesture state.
//!
//! A drag carries one of three payloads from drag start to drop. The payload
//! travels as a JSON string (the transfer data) and is decoded exactly once at
//! the drop target:
//!
//! ```text
//! {"kind":"single","leadId":"lead3"}
//! {"kind":"multi","leadIds":["lead1","lead2"]}
//! {"kind":"column","columnId":"col2"}
//! ```
//!
//! Lead gestures and column gestures are mutually exclusive; the `kind` tag
//! lets a drop handler tell them apart before looking at anything else.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::errors::{BoardError, BoardResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    #[serde(rename_all = "camelCase")]
    Single { lead_id: String },
    #[serde(rename_all = "camelCase")]
    Multi { lead_ids: Vec<String> },
    #[serde(rename_all = "camelCase")]
    Column { column_id: String },
}

impl DragPayload {
    pub fn encode(&self) -> BoardResult<String> {
        serde_json::to_string(self).map_err(BoardError::MalformedPayload)
    }

    pub fn decode(raw: &str) -> BoardResult<Self> {
        serde_json::from_str(raw).map_err(BoardError::MalformedPayload)
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column { .. })
    }

    /// Lead ids carried by a lead payload; `None` for a column payload.
    pub fn lead_ids(&self) -> Option<Vec<String>> {
        match self {
            Self::Single { lead_id } => Some(vec![lead_id.clone()]),
            Self::Multi { lead_ids } => Some(lead_ids.clone()),
            Self::Column { .. } => None,
        }
    }
}

/// Payload for dragging `lead_id`, adjusting the selection on the way.
///
/// A lead that is part of a multi-selection drags the whole selection. A lead
/// that is not selected becomes the only selected lead and drags alone.
pub fn lead_payload(lead_id: &str, selection: &mut Selection) -> DragPayload {
    if selection.contains(lead_id) && selection.len() > 1 {
        return DragPayload::Multi {
            lead_ids: selection.ids(),
        };
    }
    if !selection.contains(lead_id) {
        selection.collapse_to(lead_id);
    }
    DragPayload::Single {
        lead_id: lead_id.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Leads(DragPayload),
    Column(String),
}

/// Gesture in progress plus the column currently highlighted as a drop
/// target. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    gesture: Gesture,
    drag_over: Option<String>,
}

impl DragState {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn drag_over(&self) -> Option<&str> {
        self.drag_over.as_deref()
    }

    pub fn begin(&mut self, payload: &DragPayload) {
        self.gesture = match payload {
            DragPayload::Column { column_id } => Gesture::Column(column_id.clone()),
            other => Gesture::Leads(other.clone()),
        };
        self.drag_over = None;
    }

    pub fn over(&mut self, column_id: &str) {
        self.drag_over = Some(column_id.to_string());
    }

    pub fn leave(&mut self) {
        self.drag_over = None;
    }

    /// Back to idle with every flag cleared.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.drag_over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shapes() {
        let single = DragPayload::Single {
            lead_id: "lead3".into(),
        };
        assert_eq!(
            single.encode().unwrap(),
            r#"{"kind":"single","leadId":"lead3"}"#
        );
        let column = DragPayload::Column {
            column_id: "col2".into(),
        };
        assert_eq!(
            column.encode().unwrap(),
            r#"{"kind":"column","columnId":"col2"}"#
        );
    }

    #[test]
    fn test_decode_multi() {
        let payload = DragPayload::decode(r#"{"kind":"multi","leadIds":["a","b"]}"#).unwrap();
        assert_eq!(payload.lead_ids(), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(!payload.is_column());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for raw in ["lead3", "[\"a\",\"b\"]", r#"{"kind":"teleport"}"#, ""] {
            let err = DragPayload::decode(raw).unwrap_err();
            assert!(matches!(err, BoardError::MalformedPayload(_)), "{raw}");
        }
    }

    #[test]
    fn test_unselected_lead_collapses_selection() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("L2", true);
        let payload = lead_payload("L3", &mut sel);
        assert_eq!(payload.lead_ids(), Some(vec!["L3".to_string()]));
        assert_eq!(sel.ids(), vec!["L3".to_string()]);
    }

    #[test]
    fn test_selected_lead_drags_whole_selection() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        sel.select("L2", true);
        let payload = lead_payload("L2", &mut sel);
        assert_eq!(
            payload,
            DragPayload::Multi {
                lead_ids: vec!["L1".into(), "L2".into()]
            }
        );
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_sole_selected_lead_drags_single() {
        let mut sel = Selection::new();
        sel.select("L1", true);
        let payload = lead_payload("L1", &mut sel);
        assert!(matches!(payload, DragPayload::Single { .. }));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let mut state = DragState::default();
        assert!(state.is_idle());
        state.begin(&DragPayload::Column {
            column_id: "c".into(),
        });
        assert_eq!(state.gesture(), &Gesture::Column("c".into()));
        state.over("d");
        assert_eq!(state.drag_over(), Some("d"));
        state.leave();
        assert_eq!(state.drag_over(), None);
        state.over("d");
        state.reset();
        assert!(state.is_idle());
        assert_eq!(state.drag_over(), None);
    }
}
