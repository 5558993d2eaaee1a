// Run ID source
// Each scan pass carries one ID in its tracing span and in its report

/// Hands out the ID of the next scan pass
pub trait IdProvider: Send + Sync {
    fn new_run_id(&self) -> String;
}

/// Random v4 UUIDs
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn new_run_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Always the same ID, so reports can be asserted on
pub struct FixedIdProvider(pub String);

impl IdProvider for FixedIdProvider {
    fn new_run_id(&self) -> String {
        self.0.clone()
    }
}
