//! Session state store
//!
//! All mutable state (filter selections, cart contents, user profile) is
//! scoped to one named session. The store is an injectable key-value map;
//! the MCP layer holds it behind a mutex since tools take `&self`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::FilterSelections;
use crate::models::{Cart, UserProfile};

/// Session id used when the client does not name one
pub const DEFAULT_SESSION: &str = "default";

/// Everything one session can mutate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Filter chain for the category browse tools
    pub browse: FilterSelections,
    /// Filter chain for the cart's food picker
    pub cart_filter: FilterSelections,
    /// Two independent filter chains for the comparison tools
    pub compare: [FilterSelections; 2],
    pub cart: Cart,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the fresh state: empty cart, sentinel filters, no profile
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Named sessions, created on first touch
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable state for a session, creating it if absent
    pub fn state(&mut self, id: &str) -> &mut SessionState {
        self.sessions.entry(id.to_string()).or_default()
    }

    pub fn reset(&mut self, id: &str) {
        self.state(id).reset();
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
