//! Command registry keyed by the request `action`.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use scenelens_protocols::command::{Command, CommandDefinition};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Command not found: {0}")]
    NotFound(String),
}

/// Thread-safe map from action name to command.
pub struct CommandRegistry {
    commands: DashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: DashMap::new(),
        }
    }

    /// Register a command under its definition's action.
    ///
    /// Returns an error if the action is already taken.
    pub fn register(&self, command: Arc<dyn Command>) -> Result<(), RegistryError> {
        let action = command.definition().action.clone();
        if self.commands.contains_key(&action) {
            return Err(RegistryError::AlreadyRegistered(action));
        }
        self.commands.insert(action, command);
        Ok(())
    }

    pub fn unregister(&self, action: &str) -> Result<(), RegistryError> {
        self.commands
            .remove(action)
            .ok_or_else(|| RegistryError::NotFound(action.to_string()))?;
        Ok(())
    }

    pub fn get(&self, action: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(action).map(|c| c.clone())
    }

    pub fn contains(&self, action: &str) -> bool {
        self.commands.contains_key(action)
    }

    /// Registered action names, sorted.
    pub fn list_actions(&self) -> Vec<String> {
        let mut actions: Vec<String> = self.commands.iter().map(|c| c.key().clone()).collect();
        actions.sort();
        actions
    }

    /// Definitions of every command, sorted by action.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        let mut defs: Vec<CommandDefinition> = self
            .commands
            .iter()
            .map(|c| c.value().definition().clone())
            .collect();
        defs.sort_by(|a, b| a.action.cmp(&b.action));
        defs
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
