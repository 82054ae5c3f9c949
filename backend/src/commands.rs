//! Websocket command protocol.
//!
//! Incoming text frames are JSON objects tagged by `type`. Replies are
//! `PREFIX:{json}` strings, matching the other update messages the front end
//! already understands.

use circle_core::geometry::{Point2, Vector2};
use circle_core::{Circle, CircleIndex, DisplayOptions, EngineError, Session, Snapshot};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Create {
        x: f64,
        y: f64,
        #[serde(default)]
        radius: Option<f64>,
    },
    Move { index: u64, x: f64, y: f64 },
    Translate { indices: Vec<u64>, dx: f64, dy: f64 },
    Resize { index: u64, radius: f64 },
    /// Scroll over the hovered circles; positive delta shrinks them.
    Wheel { indices: Vec<u64>, delta: f64 },
    HitTest { x: f64, y: f64 },
    Recompute,
    Reset,
}

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

#[derive(Serialize)]
struct SnapshotMessage<'a> {
    circles: &'a [Circle],
    snapshot: &'a Snapshot,
    display: &'a DisplayOptions,
    /// Per-chord stroke colour keyed like the registry.
    chord_colors: BTreeMap<String, [u8; 3]>,
}

pub fn snapshot_update(session: &Session) -> String {
    let snapshot = session.snapshot();
    let chord_colors = snapshot
        .registry
        .iter()
        .map(|(key, _)| (key.to_string(), key.display_color()))
        .collect();
    let message = SnapshotMessage {
        circles: session.circles(),
        snapshot: snapshot.as_ref(),
        display: session.display(),
        chord_colors,
    };
    let json = serde_json::to_string(&message).unwrap_or("{}".into());
    format!("SNAPSHOT_UPDATE:{}", json)
}

fn indices(raw: &[u64]) -> Vec<CircleIndex> {
    raw.iter().copied().map(CircleIndex).collect()
}

/// Apply one command. Returns an immediate reply, if the command has one.
/// Mutations reply later, when the scheduled recompute publishes a snapshot.
pub fn apply(session: &mut Session, command: Command, now: Instant) -> Result<Option<String>, EngineError> {
    match command {
        Command::Create { x, y, radius } => {
            let center = Point2::new(x, y);
            let index = match radius {
                Some(r) => session.create_circle_with_radius(center, r, now)?,
                None => session.create_circle(center, now)?,
            };
            debug!("Created circle {}", index);
            Ok(None)
        }
        Command::Move { index, x, y } => {
            session.move_circle(CircleIndex(index), Point2::new(x, y), now)?;
            Ok(None)
        }
        Command::Translate { indices: raw, dx, dy } => {
            session.translate(&indices(&raw), Vector2::new(dx, dy), now)?;
            Ok(None)
        }
        Command::Resize { index, radius } => {
            session.resize(CircleIndex(index), radius, now)?;
            Ok(None)
        }
        Command::Wheel { indices: raw, delta } => {
            session.adjust_radius(&indices(&raw), -delta, now)?;
            Ok(None)
        }
        Command::HitTest { x, y } => {
            let hits = session.circles_at(Point2::new(x, y));
            let json = serde_json::to_string(&hits).unwrap_or("[]".into());
            Ok(Some(format!("HIT_TEST:{}", json)))
        }
        Command::Recompute => {
            session.recompute_now();
            Ok(Some(snapshot_update(session)))
        }
        Command::Reset => {
            session.reset();
            Ok(Some(snapshot_update(session)))
        }
    }
}

/// Parse and apply a text frame, turning failures into `ERROR_UPDATE` replies.
pub fn handle_text(session: &mut Session, text: &str, now: Instant) -> Option<String> {
    let command = match serde_json::from_str::<Command>(text) {
        Ok(command) => command,
        Err(e) => {
            warn!("Failed to parse command: {} ({})", text, e);
            return Some(format_error("BAD_COMMAND", &format!("Unrecognized command: {}", e), "warning"));
        }
    };

    match apply(session, command, now) {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Command rejected: {}", e);
            Some(format_error("COMMAND_REJECTED", &e.to_string(), "error"))
        }
    }
}
