//! Synthetic pointer input.

use std::sync::Arc;

use async_trait::async_trait;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use scenelens_protocols::error::HostError;
use scenelens_protocols::host::{InputDispatcher, PointerIntent};

/// Input control errors.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input failed: {0}")]
    Failed(String),
}

impl From<InputError> for HostError {
    fn from(err: InputError) -> Self {
        HostError::Input(err.to_string())
    }
}

/// Mouse controller over the OS input APIs.
pub struct InputController {
    enigo: Enigo,
}

impl InputController {
    pub fn new() -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Failed(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// Move mouse to absolute position.
    pub fn mouse_move(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Left click at the current position.
    pub fn mouse_click(&mut self) -> Result<(), InputError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Move, then click if the intent asks for it.
    pub fn perform(&mut self, x: i32, y: i32, intent: PointerIntent) -> Result<(), InputError> {
        self.mouse_move(x, y)?;
        match intent {
            PointerIntent::Click => self.mouse_click(),
            PointerIntent::Move => Ok(()),
        }
    }
}

/// Dispatcher driving the real pointer.
///
/// Each event opens its own controller on a blocking thread.
#[derive(Debug, Default)]
pub struct EnigoDispatcher;

impl EnigoDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InputDispatcher for EnigoDispatcher {
    async fn dispatch(&self, x: i32, y: i32, intent: PointerIntent) -> Result<(), HostError> {
        tokio::task::spawn_blocking(move || {
            let mut controller = InputController::new()?;
            controller.perform(x, y, intent)
        })
        .await
        .map_err(|e| HostError::Input(e.to_string()))??;

        debug!(x, y, intent = ?intent, "Pointer event delivered");
        Ok(())
    }
}

/// Dispatcher that only logs. Used for `--dry-run` and headless hosts.
#[derive(Debug, Default)]
pub struct DryRunDispatcher;

#[async_trait]
impl InputDispatcher for DryRunDispatcher {
    async fn dispatch(&self, x: i32, y: i32, intent: PointerIntent) -> Result<(), HostError> {
        info!(x, y, intent = ?intent, "Dry run: pointer event not delivered");
        Ok(())
    }
}

/// A pointer event captured by [`RecordingDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchedPointer {
    pub x: i32,
    pub y: i32,
    pub intent: PointerIntent,
}

/// Dispatcher that remembers every event, for embedding tests.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<DispatchedPointer>>,
}

impl RecordingDispatcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DispatchedPointer> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl InputDispatcher for RecordingDispatcher {
    async fn dispatch(&self, x: i32, y: i32, intent: PointerIntent) -> Result<(), HostError> {
        self.events.lock().push(DispatchedPointer { x, y, intent });
        Ok(())
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
