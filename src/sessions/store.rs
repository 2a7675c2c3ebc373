use crate::auth::csrf;
use crate::models::order::BasketItem;
use crate::models::user::SessionUser;
use dashmap::DashMap;
use rand::Rng;

/// One session's state. The basket key is absent (`None`) until the first
/// item is added and removed again once the basket empties, mirroring how
/// the handlers test for its presence.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub basket: Option<Vec<BasketItem>>,
    pub csrf_token: String,
    pub expires_at: i64,
}

/// In-memory session store keyed by the random cookie token.
///
/// Expiry is sliding: every touch pushes the deadline out by the full
/// configured duration. A background task sweeps expired entries.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    duration_secs: i64,
}

impl SessionStore {
    pub fn new(duration_secs: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    fn new_token() -> String {
        let bytes: [u8; 32] = rand::rng().random();
        hex::encode(bytes)
    }

    /// Create a fresh anonymous session and return its token.
    pub fn create(&self, now: i64) -> String {
        let token = Self::new_token();
        self.sessions.insert(
            token.clone(),
            Session {
                user: None,
                basket: None,
                csrf_token: csrf::issue_token(),
                expires_at: now + self.duration_secs,
            },
        );
        token
    }

    /// Slide the expiry of a live session. Returns false (and drops the
    /// entry) if the token is unknown or already expired.
    pub fn touch(&self, token: &str, now: i64) -> bool {
        let expired = match self.sessions.get_mut(token) {
            Some(mut entry) => {
                if entry.expires_at < now {
                    true
                } else {
                    entry.expires_at = now + self.duration_secs;
                    return true;
                }
            }
            None => return false,
        };

        if expired {
            self.sessions.remove(token);
        }
        false
    }

    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub fn user(&self, token: &str) -> Option<SessionUser> {
        self.sessions.get(token).and_then(|entry| entry.user.clone())
    }

    pub fn set_user(&self, token: &str, user: SessionUser) {
        if let Some(mut entry) = self.sessions.get_mut(token) {
            entry.user = Some(user);
        }
    }

    pub fn csrf_token(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|entry| entry.csrf_token.clone())
    }

    /// Clear user and basket and rotate the CSRF token, keeping the same
    /// cookie token. Returns the new CSRF token.
    pub fn reset(&self, token: &str) -> Option<String> {
        self.sessions.get_mut(token).map(|mut entry| {
            entry.user = None;
            entry.basket = None;
            entry.csrf_token = csrf::issue_token();
            entry.csrf_token.clone()
        })
    }

    /// Remove the session entirely (logout).
    pub fn destroy(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Current basket contents; empty if the basket key is absent.
    pub fn basket(&self, token: &str) -> Vec<BasketItem> {
        self.sessions
            .get(token)
            .and_then(|entry| entry.basket.clone())
            .unwrap_or_default()
    }

    /// Whether the basket key currently exists for this session.
    pub fn has_basket(&self, token: &str) -> bool {
        self.sessions
            .get(token)
            .map(|entry| entry.basket.is_some())
            .unwrap_or(false)
    }

    /// Append an item, creating the basket key on first use.
    pub fn push_basket_item(&self, token: &str, item: BasketItem) {
        if let Some(mut entry) = self.sessions.get_mut(token) {
            entry.basket.get_or_insert_with(Vec::new).push(item);
        }
    }

    /// Remove the item at `index`. An index beyond the current length is a
    /// no-op; removing the last item deletes the basket key entirely.
    pub fn remove_basket_item(&self, token: &str, index: usize) {
        if let Some(mut entry) = self.sessions.get_mut(token) {
            let emptied = match entry.basket.as_mut() {
                Some(basket) => {
                    if index < basket.len() {
                        basket.remove(index);
                    }
                    basket.is_empty()
                }
                None => false,
            };
            if emptied {
                entry.basket = None;
            }
        }
    }

    /// Take the basket for order submission, deleting the key.
    pub fn take_basket(&self, token: &str) -> Option<Vec<BasketItem>> {
        self.sessions
            .get_mut(token)
            .and_then(|mut entry| entry.basket.take())
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self, now: i64) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.expires_at >= now);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn store() -> SessionStore {
        SessionStore::new(1800)
    }

    fn item(name: &str) -> BasketItem {
        BasketItem {
            item: name.to_string(),
            size: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_create_issues_unique_tokens() {
        let store = store();
        let a = store.create(NOW);
        let b = store.create(NOW);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_touch_slides_expiry() {
        let store = store();
        let token = store.create(NOW);

        // Just before the deadline the session is still live, and touching
        // it pushes the deadline out by the full duration again.
        assert!(store.touch(&token, NOW + 1799));
        assert!(store.touch(&token, NOW + 1799 + 1799));
    }

    #[test]
    fn test_expired_session_is_dropped_on_touch() {
        let store = store();
        let token = store.create(NOW);

        assert!(!store.touch(&token, NOW + 1801));
        assert!(!store.contains(&token));
    }

    #[test]
    fn test_unknown_token() {
        let store = store();
        assert!(!store.touch("deadbeef", NOW));
        assert!(store.user("deadbeef").is_none());
        assert!(store.csrf_token("deadbeef").is_none());
    }

    #[test]
    fn test_set_and_refresh_user() {
        let store = store();
        let token = store.create(NOW);

        store.set_user(
            &token,
            SessionUser {
                nickname: "ada".to_string(),
                user_type: "Mentor".to_string(),
                dob: "1990-12-10".to_string(),
            },
        );
        assert_eq!(store.user(&token).map(|u| u.nickname), Some("ada".to_string()));
    }

    #[test]
    fn test_reset_clears_state_and_rotates_csrf() {
        let store = store();
        let token = store.create(NOW);
        let old_csrf = store.csrf_token(&token).expect("csrf");

        store.set_user(
            &token,
            SessionUser {
                nickname: "ada".to_string(),
                user_type: "Mentor".to_string(),
                dob: "1990-12-10".to_string(),
            },
        );
        store.push_basket_item(&token, item("hoodie"));

        let new_csrf = store.reset(&token).expect("session exists");
        assert_ne!(old_csrf, new_csrf);
        assert!(store.user(&token).is_none());
        assert!(!store.has_basket(&token));
        assert!(store.contains(&token));
    }

    #[test]
    fn test_destroy_removes_session() {
        let store = store();
        let token = store.create(NOW);
        store.destroy(&token);
        assert!(!store.contains(&token));
    }

    #[test]
    fn test_basket_key_created_on_first_add() {
        let store = store();
        let token = store.create(NOW);

        assert!(!store.has_basket(&token));
        store.push_basket_item(&token, item("hoodie"));
        assert!(store.has_basket(&token));
        assert_eq!(store.basket(&token).len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let store = store();
        let token = store.create(NOW);
        store.push_basket_item(&token, item("hoodie"));

        store.remove_basket_item(&token, 5);
        assert_eq!(store.basket(&token), vec![item("hoodie")]);
        assert!(store.has_basket(&token));
    }

    #[test]
    fn test_remove_last_item_deletes_basket_key() {
        let store = store();
        let token = store.create(NOW);
        store.push_basket_item(&token, item("hoodie"));
        store.push_basket_item(&token, item("mug"));

        store.remove_basket_item(&token, 0);
        assert_eq!(store.basket(&token), vec![item("mug")]);
        assert!(store.has_basket(&token));

        store.remove_basket_item(&token, 0);
        assert!(!store.has_basket(&token));
        assert!(store.basket(&token).is_empty());
    }

    #[test]
    fn test_remove_with_no_basket_is_noop() {
        let store = store();
        let token = store.create(NOW);
        store.remove_basket_item(&token, 0);
        assert!(!store.has_basket(&token));
    }

    #[test]
    fn test_take_basket_deletes_key() {
        let store = store();
        let token = store.create(NOW);
        store.push_basket_item(&token, item("hoodie"));

        let taken = store.take_basket(&token).expect("basket present");
        assert_eq!(taken, vec![item("hoodie")]);
        assert!(!store.has_basket(&token));
        assert!(store.take_basket(&token).is_none());
    }

    #[test]
    fn test_purge_expired() {
        let store = store();
        let live = store.create(NOW + 1000);
        let stale = store.create(NOW - 5000);

        let removed = store.purge_expired(NOW);
        assert_eq!(removed, 1);
        assert!(store.contains(&live));
        assert!(!store.contains(&stale));
    }
}
