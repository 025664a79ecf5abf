use crate::core::domain::{
    model::managed_object::ServiceContent, value_object::VsphereSessionId,
};

/// An authenticated VI/JSON session.
#[derive(Debug, Clone)]
pub struct VsphereSession {
    session_id: VsphereSessionId,
    service_content: ServiceContent,
}

impl VsphereSession {
    pub fn new(session_id: VsphereSessionId, service_content: ServiceContent) -> Self {
        Self {
            session_id,
            service_content,
        }
    }

    pub fn session_id(&self) -> &VsphereSessionId {
        &self.session_id
    }

    pub fn service_content(&self) -> &ServiceContent {
        &self.service_content
    }
}
