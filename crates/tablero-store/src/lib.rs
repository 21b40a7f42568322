//! # tablero-store: In-Memory Record Store
//!
//! Holds the session's record collections and applies mutations with
//! copy-on-write semantics.
//!
//! ## Why Copy-on-Write?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  The query engine hands projections of these collections to         │
//! │  observers (list views, an in-flight export). A mutation that       │
//! │  edited a Vec in place would change data under them.                │
//! │                                                                     │
//! │  Instead, every mutation returns a NEW RecordStore:                 │
//! │                                                                     │
//! │    store ──mark_notification_read──► store'                         │
//! │      │                                 │                            │
//! │      └── old observers keep store      └── new reads use store'     │
//! │                                                                     │
//! │  Reads never need coordination; the engine never mutates input.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Boundary
//! In production every accepted mutation is also sent to the backend REST
//! API. That collaborator is out of scope here; the seam is marked with
//! an `info!` log at each call site.

pub mod demo;

use tracing::info;

use tablero_core::error::{CoreError, CoreResult};
use tablero_core::validation::{validate_client_name, validate_contact_method, validate_rating};
use tablero_core::{
    Client, Invoice, Notification, Product, Promotion, PromotionRedemption,
};

// =============================================================================
// Record Store
// =============================================================================

/// In-memory collections of the dashboard's domain entities.
///
/// Construct with [`RecordStore::new`] and the `with_*` builders, or use
/// [`demo::demo_store`] for a seeded dataset.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    clients: Vec<Client>,
    invoices: Vec<Invoice>,
    products: Vec<Product>,
    promotions: Vec<Promotion>,
    redemptions: Vec<PromotionRedemption>,
    notifications: Vec<Notification>,
}

impl RecordStore {
    /// An empty store.
    pub fn new() -> RecordStore {
        RecordStore::default()
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn with_clients(mut self, clients: Vec<Client>) -> RecordStore {
        self.clients = clients;
        self
    }

    pub fn with_invoices(mut self, invoices: Vec<Invoice>) -> RecordStore {
        self.invoices = invoices;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> RecordStore {
        self.products = products;
        self
    }

    pub fn with_promotions(mut self, promotions: Vec<Promotion>) -> RecordStore {
        self.promotions = promotions;
        self
    }

    pub fn with_redemptions(mut self, redemptions: Vec<PromotionRedemption>) -> RecordStore {
        self.redemptions = redemptions;
        self
    }

    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> RecordStore {
        self.notifications = notifications;
        self
    }

    // -------------------------------------------------------------------------
    // Read Access
    // -------------------------------------------------------------------------

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn redemptions(&self) -> &[PromotionRedemption] {
        &self.redemptions
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Unread notification count for the bell badge.
    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    // -------------------------------------------------------------------------
    // Copy-on-Write Mutations
    // -------------------------------------------------------------------------

    /// Adds a client from a form submission.
    ///
    /// Validates name, rating and contact method first; a rejection aborts
    /// with no side effects (the returned error carries the reason for the
    /// form to display).
    pub fn add_client(&self, client: Client) -> CoreResult<RecordStore> {
        validate_client_name(&client.name)?;
        validate_contact_method(client.email.as_deref(), client.phone.as_deref())?;
        validate_rating(client.rating)?;

        // Persistence happens in the external backend API
        info!(client_id = %client.id, "client accepted; forwarding to backend API");

        let mut next = self.clone();
        next.clients.push(client);
        Ok(next)
    }

    /// Marks a notification as read. The previous store is untouched.
    pub fn mark_notification_read(&self, id: &str) -> CoreResult<RecordStore> {
        if !self.notifications.iter().any(|n| n.id == id) {
            return Err(CoreError::NotificationNotFound(id.to_string()));
        }

        let mut next = self.clone();
        for notification in &mut next.notifications {
            if notification.id == id {
                notification.read = true;
            }
        }
        info!(notification_id = %id, "notification marked read");
        Ok(next)
    }

    /// Removes a notification from the list entirely.
    pub fn dismiss_notification(&self, id: &str) -> CoreResult<RecordStore> {
        if !self.notifications.iter().any(|n| n.id == id) {
            return Err(CoreError::NotificationNotFound(id.to_string()));
        }

        let mut next = self.clone();
        next.notifications.retain(|n| n.id != id);
        info!(notification_id = %id, "notification dismissed");
        Ok(next)
    }

    /// Toggles a client's active-promotion flag (set when a campaign is
    /// sent to the client, cleared when it ends).
    pub fn set_client_promotion_flag(&self, id: &str, active: bool) -> CoreResult<RecordStore> {
        if !self.clients.iter().any(|c| c.id == id) {
            return Err(CoreError::ClientNotFound(id.to_string()));
        }

        let mut next = self.clone();
        for client in &mut next.clients {
            if client.id == id {
                client.has_active_promotion = active;
            }
        }
        info!(client_id = %id, active, "client promotion flag updated");
        Ok(next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tablero_core::error::ValidationError;

    fn store_with_notification() -> RecordStore {
        RecordStore::new().with_notifications(vec![Notification {
            id: "n-1".to_string(),
            title: "Stock bajo".to_string(),
            body: "Barra clásica por debajo del mínimo en pdv-centro".to_string(),
            read: false,
            created_at: Utc::now(),
        }])
    }

    fn valid_client() -> Client {
        let now = Utc::now();
        Client {
            id: "c-1".to_string(),
            name: "Ana García".to_string(),
            email: Some("ana@example.com".to_string()),
            phone: None,
            address: None,
            postal_code: "28001".to_string(),
            signup_date: now,
            last_order_date: None,
            average_ticket: tablero_core::Money::zero(),
            average_ticket_previous: tablero_core::Money::zero(),
            total_spend: tablero_core::Money::zero(),
            rating: 0.0,
            order_count: 0,
            has_active_promotion: false,
            client_type: tablero_core::ClientType::New,
            segments: vec![],
            favorite_brand: None,
            favorite_product: None,
            favorite_point_of_sale: None,
            notes: None,
        }
    }

    #[test]
    fn test_mark_read_is_copy_on_write() {
        let store = store_with_notification();
        let updated = store.mark_notification_read("n-1").expect("known id");

        // New store sees the change, old store does not
        assert!(updated.notifications()[0].read);
        assert!(!store.notifications()[0].read);
        assert_eq!(store.unread_notification_count(), 1);
        assert_eq!(updated.unread_notification_count(), 0);
    }

    #[test]
    fn test_dismiss_removes_from_new_list_only() {
        let store = store_with_notification();
        let updated = store.dismiss_notification("n-1").expect("known id");

        assert_eq!(updated.notifications().len(), 0);
        assert_eq!(store.notifications().len(), 1);
    }

    #[test]
    fn test_unknown_notification_id_errors() {
        let store = store_with_notification();
        assert!(matches!(
            store.mark_notification_read("n-999"),
            Err(CoreError::NotificationNotFound(_))
        ));
        assert!(matches!(
            store.dismiss_notification("n-999"),
            Err(CoreError::NotificationNotFound(_))
        ));
    }

    #[test]
    fn test_add_client_validates_before_accepting() {
        let store = RecordStore::new();

        let accepted = store.add_client(valid_client()).expect("valid input");
        assert_eq!(accepted.clients().len(), 1);
        // Rejection leaves the original untouched
        assert_eq!(store.clients().len(), 0);

        let mut nameless = valid_client();
        nameless.name = "  ".to_string();
        assert!(matches!(
            store.add_client(nameless),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let mut uncontactable = valid_client();
        uncontactable.email = None;
        uncontactable.phone = None;
        assert!(matches!(
            store.add_client(uncontactable),
            Err(CoreError::Validation(ValidationError::NoContactMethod))
        ));
    }

    #[test]
    fn test_promotion_flag_copy_on_write() {
        let store = RecordStore::new()
            .add_client(valid_client())
            .expect("valid input");
        let flagged = store
            .set_client_promotion_flag("c-1", true)
            .expect("known id");

        assert!(flagged.clients()[0].has_active_promotion);
        assert!(!store.clients()[0].has_active_promotion);

        assert!(matches!(
            store.set_client_promotion_flag("c-404", true),
            Err(CoreError::ClientNotFound(_))
        ));
    }
}
