//! Click and hover on semantic elements.
//!
//! Both actions run a fresh filtered query, take the top-most match and hand
//! its rounded absolute center (plus the window origin) to the input
//! dispatcher.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use scenelens_protocols::error::IntrospectionError;
use scenelens_protocols::host::{InputDispatcher, PointerIntent};
use scenelens_protocols::types::{Diagnostic, Point, ResolvedElement};

use crate::query::QueryEngine;

/// Integer screen coordinates handed to the input dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// What an action targeted and where.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub element: ResolvedElement,
    pub position: ScreenPoint,
    pub intent: PointerIntent,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ActionFacade {
    engine: Arc<QueryEngine>,
    dispatcher: Arc<dyn InputDispatcher>,
    origin: ScreenPoint,
}

impl ActionFacade {
    pub fn new(engine: Arc<QueryEngine>, dispatcher: Arc<dyn InputDispatcher>) -> Self {
        Self {
            engine,
            dispatcher,
            origin: ScreenPoint { x: 0, y: 0 },
        }
    }

    /// Screen position of the viewport's top-left corner.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = ScreenPoint { x, y };
        self
    }

    pub fn engine(&self) -> &Arc<QueryEngine> {
        &self.engine
    }

    pub async fn click_element(&self, id: &str) -> Result<ActionOutcome, IntrospectionError> {
        self.act(id, PointerIntent::Click).await
    }

    pub async fn hover_element(&self, id: &str) -> Result<ActionOutcome, IntrospectionError> {
        self.act(id, PointerIntent::Move).await
    }

    async fn act(
        &self,
        id: &str,
        intent: PointerIntent,
    ) -> Result<ActionOutcome, IntrospectionError> {
        if id.is_empty() {
            return Err(IntrospectionError::ElementNotFound(String::new()));
        }

        let outcome = self.engine.find_clickable(Some(id)).await?;
        let Some(element) = outcome.elements.into_iter().next() else {
            return Err(IntrospectionError::ElementNotFound(id.to_string()));
        };

        let center = element.absolute_center.ok_or_else(|| {
            IntrospectionError::InvalidElementGeometry {
                id: element.id().to_string(),
                reason: element
                    .absolute_bounds
                    .geometry_problem()
                    .unwrap_or_else(|| "no usable center".to_string()),
            }
        })?;
        let position = self.to_screen(&element, center)?;

        if element.position_approximate {
            warn!(element = %element.id(), "Dispatching at an approximate position");
        }
        self.dispatcher
            .dispatch(position.x, position.y, intent)
            .await
            .map_err(|e| IntrospectionError::InputDispatch(e.to_string()))?;

        info!(
            element = %element.id(),
            x = position.x,
            y = position.y,
            intent = ?intent,
            "Dispatched pointer input"
        );
        Ok(ActionOutcome {
            element,
            position,
            intent,
            diagnostics: outcome.diagnostics,
        })
    }

    fn to_screen(
        &self,
        element: &ResolvedElement,
        center: Point,
    ) -> Result<ScreenPoint, IntrospectionError> {
        let x = center.x.round() + f64::from(self.origin.x);
        let y = center.y.round() + f64::from(self.origin.y);
        let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
        if !range.contains(&x) || !range.contains(&y) {
            return Err(IntrospectionError::InvalidElementGeometry {
                id: element.id().to_string(),
                reason: format!("center ({}, {}) is off any screen", x, y),
            });
        }
        Ok(ScreenPoint {
            x: x as i32,
            y: y as i32,
        })
    }
}
