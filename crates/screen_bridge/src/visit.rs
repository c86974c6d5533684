//! Per-visit hand-off protocol between screens.
//!
//! A [`ScreenVisit`] is the *active* state: it owns the working collection
//! decoded from the incoming message. [`ScreenVisit::exit`] consumes the
//! visit, so once the outbound message exists the visit is gone and stale
//! state cannot be revisited.

use std::collections::HashSet;

use menu_core::{codec, IdGenerator, MenuCollection};
use shared::{
    domain::{DishId, DishInput, DishRecord, Role},
    error::{MenuError, MenuResult},
    protocol::{
        OutboundMessage, ScreenParams, ScreenRoute, PARAM_DISHES, PARAM_NEW_DISH, PARAM_ROLE,
    },
};
use tracing::{debug, warn};

use crate::confirmation::{gated, Confirmation};

#[derive(Debug, Clone, PartialEq)]
pub enum ExitAction {
    /// Commit the working collection to `destination`.
    Confirm(ScreenRoute),
    /// Same hand-off as [`ExitAction::Confirm`]; the "go back" button.
    Back(ScreenRoute),
    /// Forward the incoming transport string untouched.
    Cancel(ScreenRoute),
    /// Same hand-off as [`ExitAction::Confirm`] plus one record on the side channel.
    Announce {
        destination: ScreenRoute,
        record: DishRecord,
    },
    /// Return to the login screen with the current menu and no role.
    Logout,
}

#[derive(Debug)]
pub struct ScreenVisit {
    route: ScreenRoute,
    role_flag: String,
    incoming: Option<String>,
    incoming_valid: bool,
    snapshot: MenuCollection,
    working: MenuCollection,
    side_channel: Option<String>,
    applied_side_channel: HashSet<DishId>,
}

impl ScreenVisit {
    /// Decodes the incoming snapshot. A malformed one is logged and replaced
    /// by an empty working collection; entering never fails.
    pub fn enter(route: ScreenRoute, params: &ScreenParams) -> Self {
        let incoming = params.dishes().map(str::to_string);
        let (snapshot, incoming_valid) = match codec::decode(incoming.as_deref()) {
            Ok(collection) => (collection, true),
            Err(err) => {
                warn!(screen = %route, error = %err, "ignoring malformed menu snapshot");
                (MenuCollection::new(), false)
            }
        };
        Self::activate(route, params, incoming, snapshot, incoming_valid)
    }

    /// Enters the destination of `message`. An unchanged hand-off reuses the
    /// snapshot the sender already decoded; anything else is decoded afresh.
    pub fn resume(message: &OutboundMessage, carried: Option<MenuCollection>) -> Self {
        match carried {
            Some(snapshot) if !message.changed => {
                debug!(screen = %message.destination, "reusing decoded menu snapshot");
                let incoming = message.params.dishes().map(str::to_string);
                Self::activate(message.destination, &message.params, incoming, snapshot, true)
            }
            _ => Self::enter(message.destination, &message.params),
        }
    }

    fn activate(
        route: ScreenRoute,
        params: &ScreenParams,
        incoming: Option<String>,
        snapshot: MenuCollection,
        incoming_valid: bool,
    ) -> Self {
        debug!(screen = %route, dishes = snapshot.len(), "entered screen");
        let mut visit = Self {
            route,
            role_flag: params.role_flag_or_default().to_string(),
            incoming,
            incoming_valid,
            working: snapshot.clone(),
            snapshot,
            side_channel: params.new_dish().map(str::to_string),
            applied_side_channel: HashSet::new(),
        };
        visit.observe_side_channel();
        visit
    }

    pub fn route(&self) -> ScreenRoute {
        self.route
    }

    pub fn role(&self) -> Role {
        Role::from_flag(Some(&self.role_flag))
    }

    pub fn role_flag(&self) -> &str {
        &self.role_flag
    }

    pub fn working(&self) -> &MenuCollection {
        &self.working
    }

    pub fn has_changes(&self) -> bool {
        self.working != self.snapshot
    }

    /// Applies the side-channel record received on entry. Safe to call on
    /// every render: a record id is merged at most once per visit.
    pub fn observe_side_channel(&mut self) -> bool {
        let Some(raw) = self.side_channel.as_deref() else {
            return false;
        };
        match codec::decode_record(raw) {
            Ok(record) => self.apply_side_channel(record),
            Err(err) => {
                warn!(screen = %self.route, error = %err, "ignoring malformed side-channel dish");
                self.side_channel = None;
                false
            }
        }
    }

    pub fn apply_side_channel(&mut self, record: DishRecord) -> bool {
        if !self.applied_side_channel.insert(record.id.clone())
            || self.working.contains(&record.id)
        {
            return false;
        }
        let dish_id = record.id.clone();
        match self.working.append_once(record) {
            Ok(next) => {
                debug!(screen = %self.route, dish_id = %dish_id, "merged side-channel dish");
                self.working = next;
                true
            }
            Err(err) => {
                warn!(screen = %self.route, error = %err, "rejected side-channel dish");
                false
            }
        }
    }

    pub fn add_dish(
        &mut self,
        input: &DishInput,
        ids: &mut dyn IdGenerator,
    ) -> MenuResult<DishRecord> {
        self.ensure_chef("add dishes")?;
        let (next, record) = self.working.add(input, ids)?;
        self.working = next;
        Ok(record)
    }

    /// Returns whether a record was actually removed.
    pub fn remove_dish(&mut self, id: &DishId, decision: Confirmation) -> MenuResult<bool> {
        self.ensure_chef("remove dishes")?;
        let before = self.working.len();
        self.working = gated(decision, &self.working, |current| current.remove(id));
        Ok(self.working.len() != before)
    }

    /// Returns whether the menu was cleared.
    pub fn reset_menu(&mut self, decision: Confirmation) -> MenuResult<bool> {
        self.ensure_chef("reset the menu")?;
        self.working = gated(decision, &self.working, MenuCollection::clear);
        Ok(decision.is_confirmed())
    }

    pub fn exit(self, action: ExitAction) -> OutboundMessage {
        self.hand_off(action).0
    }

    /// Like [`ScreenVisit::exit`], also returning the decoded snapshot when the
    /// message forwards the incoming transport string verbatim, so the next
    /// visit can [`ScreenVisit::resume`] without decoding it again.
    pub fn hand_off(self, action: ExitAction) -> (OutboundMessage, Option<MenuCollection>) {
        let message = match action {
            ExitAction::Confirm(destination) | ExitAction::Back(destination) => {
                let (dishes, changed) = self.outgoing_dishes();
                OutboundMessage::new(destination, self.params_with(dishes, true), changed)
            }
            ExitAction::Cancel(destination) => {
                let dishes = self.incoming.clone();
                OutboundMessage::new(destination, self.params_with(dishes, true), false)
            }
            ExitAction::Announce {
                destination,
                record,
            } => {
                let (dishes, changed) = self.outgoing_dishes();
                let mut params = self.params_with(dishes, true);
                match codec::encode_record(&record) {
                    Ok(raw) => params.insert(PARAM_NEW_DISH, raw),
                    Err(err) => {
                        warn!(screen = %self.route, error = %err, "dropping side-channel dish")
                    }
                }
                OutboundMessage::new(destination, params, changed)
            }
            ExitAction::Logout => {
                let (dishes, changed) = self.outgoing_dishes();
                let params = self.params_with(dishes, false);
                OutboundMessage::new(ScreenRoute::Login, params, changed)
            }
        };
        debug!(
            from = %self.route,
            to = %message.destination,
            changed = message.changed,
            "leaving screen"
        );
        let verbatim = !message.changed
            && self.incoming_valid
            && message.params.dishes() == self.incoming.as_deref();
        let carried = verbatim.then_some(self.snapshot);
        (message, carried)
    }

    fn ensure_chef(&self, action: &'static str) -> MenuResult<()> {
        if self.role().can_edit() {
            Ok(())
        } else {
            Err(MenuError::Forbidden { action })
        }
    }

    /// Forwards the incoming string verbatim when nothing changed, otherwise
    /// re-encodes the working collection.
    fn outgoing_dishes(&self) -> (Option<String>, bool) {
        if !self.has_changes() && self.incoming_valid {
            return (self.incoming.clone(), false);
        }
        match codec::encode(&self.working) {
            Ok(encoded) => (Some(encoded), true),
            Err(err) => {
                warn!(screen = %self.route, error = %err, "keeping incoming menu snapshot");
                (self.incoming.clone(), false)
            }
        }
    }

    fn params_with(&self, dishes: Option<String>, with_role: bool) -> ScreenParams {
        let mut params = ScreenParams::new();
        if with_role {
            params.insert(PARAM_ROLE, self.role_flag.as_str());
        }
        if let Some(dishes) = dishes {
            params.insert(PARAM_DISHES, dishes);
        }
        params
    }
}

/// Login screen hand-off: the chosen role flag plus whatever menu was carried
/// back by a previous logout.
pub fn sign_in(params: &ScreenParams, role_flag: &str) -> OutboundMessage {
    let mut outbound = ScreenParams::new().with(PARAM_ROLE, role_flag);
    if let Some(dishes) = params.dishes() {
        outbound.insert(PARAM_DISHES, dishes);
    }
    debug!(role = role_flag, "signed in");
    OutboundMessage::new(ScreenRoute::Home, outbound, false)
}

#[cfg(test)]
#[path = "tests/visit_tests.rs"]
mod tests;
