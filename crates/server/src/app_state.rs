use crate::api::RelayContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) relay: RelayContext,
}
