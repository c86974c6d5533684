use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::{Role, VIEWER_ROLE_FLAG};

pub const PARAM_ROLE: &str = "role";
pub const PARAM_DISHES: &str = "dishes";
pub const PARAM_NEW_DISH: &str = "newDish";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenRoute {
    Login,
    Home,
    AddDish,
    RemoveDish,
    Filter,
    Help,
}

impl ScreenRoute {
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::AddDish => "add_dish",
            Self::RemoveDish => "remove_dish",
            Self::Filter => "filter",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for ScreenRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named string parameters carried by one navigation hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenParams(BTreeMap<String, String>);

impl ScreenParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn role_flag(&self) -> Option<&str> {
        self.get(PARAM_ROLE)
    }

    /// Role flag as forwarded on the next hop; absence becomes the viewer flag.
    pub fn role_flag_or_default(&self) -> &str {
        self.role_flag().unwrap_or(VIEWER_ROLE_FLAG)
    }

    pub fn role(&self) -> Role {
        Role::from_flag(self.role_flag())
    }

    pub fn dishes(&self) -> Option<&str> {
        self.get(PARAM_DISHES)
    }

    pub fn new_dish(&self) -> Option<&str> {
        self.get(PARAM_NEW_DISH)
    }
}

/// Message a screen hands to the navigation channel when it exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub destination: ScreenRoute,
    pub params: ScreenParams,
    /// `false` when `dishes` is the incoming transport string forwarded
    /// verbatim; receivers holding its decoded form can skip decoding it.
    pub changed: bool,
}

impl OutboundMessage {
    pub fn new(destination: ScreenRoute, params: ScreenParams, changed: bool) -> Self {
        Self {
            destination,
            params,
            changed,
        }
    }

    /// First message of a session: the login screen with nothing carried.
    pub fn entry() -> Self {
        Self::new(ScreenRoute::Login, ScreenParams::new(), false)
    }
}
