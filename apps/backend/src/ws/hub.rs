//! Connection registry: maps game rooms and player ids to live websocket
//! sessions.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// An outbound protocol event, delivered to a session actor.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct GameHub {
    /// game id -> (user id -> session recipient)
    rooms: DashMap<Uuid, DashMap<Uuid, Recipient<Outbound>>>,
    /// user id -> session recipient, for messages outside any room
    users: DashMap<Uuid, Recipient<Outbound>>,
}

impl GameHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_user(&self, user_id: Uuid, recipient: Recipient<Outbound>) {
        self.users.insert(user_id, recipient);
    }

    pub fn unregister_user(&self, user_id: Uuid) {
        self.users.remove(&user_id);
        for room in self.rooms.iter() {
            room.remove(&user_id);
        }
        self.rooms.retain(|_, members| !members.is_empty());
    }

    pub fn join_room(&self, game_id: Uuid, user_id: Uuid) {
        if let Some(recipient) = self.users.get(&user_id) {
            self.rooms
                .entry(game_id)
                .or_default()
                .insert(user_id, recipient.clone());
        }
    }

    pub fn leave_room(&self, game_id: Uuid, user_id: Uuid) {
        if let Some(room) = self.rooms.get(&game_id) {
            room.remove(&user_id);
        }
    }

    pub fn is_connected(&self, user_id: Uuid) -> bool {
        self.users.contains_key(&user_id)
    }

    /// Fire-and-forget broadcast to every member of a game room.
    pub fn broadcast(&self, game_id: Uuid, msg: ServerMsg) {
        if let Some(room) = self.rooms.get(&game_id) {
            for member in room.iter() {
                member.value().do_send(Outbound(msg.clone()));
            }
        }
    }

    /// Fire-and-forget unicast to one player's connection.
    pub fn send_to(&self, user_id: Uuid, msg: ServerMsg) {
        if let Some(recipient) = self.users.get(&user_id) {
            recipient.do_send(Outbound(msg));
        }
    }
}
