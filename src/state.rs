use std::sync::Arc;

use crate::supabase::SupabaseClient;

#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<dyn SupabaseClient>,
}
