//! Lead repository trait: contact messages, career applications, WhatsApp
//! leads.

use crate::error::MetadataResult;
use crate::models::{CareerApplicationRow, ContactMessageRow, WhatsappLeadRow};
use async_trait::async_trait;
use uuid::Uuid;

/// Lead inbox sizes for the admin dashboard.
#[derive(Debug, Clone, Default)]
pub struct LeadCounts {
    pub contact_messages: u64,
    pub career_applications: u64,
    pub whatsapp_leads: u64,
}

/// Repository for inbound leads.
#[async_trait]
pub trait LeadRepo: Send + Sync {
    async fn create_contact_message(&self, message: &ContactMessageRow) -> MetadataResult<()>;
    async fn list_contact_messages(
        &self,
        limit: i64,
        offset: i64,
    ) -> MetadataResult<Vec<ContactMessageRow>>;
    async fn delete_contact_message(&self, message_id: Uuid) -> MetadataResult<()>;

    async fn create_career_application(
        &self,
        application: &CareerApplicationRow,
    ) -> MetadataResult<()>;
    async fn list_career_applications(
        &self,
        limit: i64,
        offset: i64,
    ) -> MetadataResult<Vec<CareerApplicationRow>>;
    async fn delete_career_application(&self, application_id: Uuid) -> MetadataResult<()>;

    /// Insert a WhatsApp lead. Duplicate (country_code, phone) pairs are
    /// ignored so resubmitting the widget is harmless.
    async fn create_whatsapp_lead(&self, lead: &WhatsappLeadRow) -> MetadataResult<()>;
    async fn list_whatsapp_leads(
        &self,
        limit: i64,
        offset: i64,
    ) -> MetadataResult<Vec<WhatsappLeadRow>>;
    async fn delete_whatsapp_lead(&self, lead_id: Uuid) -> MetadataResult<()>;

    /// Inbox sizes across all three lead tables.
    async fn lead_counts(&self) -> MetadataResult<LeadCounts>;
}
