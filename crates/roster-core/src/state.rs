// ── Screen state ──
//
// Copy-on-write snapshot of everything the user list displays. The list
// lives behind an `Arc` so taking a rollback snapshot is a pointer clone.

use std::sync::Arc;

use roster_api::User;

/// Observable state of the user list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    /// Records in display order.
    pub users: Arc<Vec<User>>,
    /// Last failure message. Empty when nothing has failed.
    pub error: String,
    /// `true` while the initial list fetch is in flight.
    pub loading: bool,
}

impl ScreenState {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

// ── List derivations ─────────────────────────────────────────────────

pub(crate) fn prepended(users: &[User], user: User) -> Vec<User> {
    std::iter::once(user).chain(users.iter().cloned()).collect()
}

pub(crate) fn without_id(users: &[User], id: i64) -> Vec<User> {
    users.iter().filter(|u| u.id != id).cloned().collect()
}

pub(crate) fn replaced_by_id(users: &[User], id: i64, replacement: &User) -> Vec<User> {
    users
        .iter()
        .map(|u| {
            if u.id == id {
                replacement.clone()
            } else {
                u.clone()
            }
        })
        .collect()
}

/// Swap the first entry equal to `placeholder` for `created`, or prepend
/// `created` when the placeholder is no longer listed.
pub(crate) fn settled(users: &[User], placeholder: &User, created: User) -> Vec<User> {
    match users.iter().position(|u| u == placeholder) {
        Some(pos) => {
            let mut next = users.to_vec();
            next[pos] = created;
            next
        }
        None => prepended(users, created),
    }
}
