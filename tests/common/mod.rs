#![allow(dead_code)]

use axum_test::TestServer;
use shorty::api::routes::public_routes;
use shorty::infrastructure::Storage;
use shorty::state::AppState;

pub const ROOT_URI: &str = "http://sho.rt";

pub fn create_test_state() -> (AppState, Storage) {
    let storage = Storage::memory();
    let state = AppState::new(&storage, ROOT_URI);
    (state, storage)
}

pub fn create_test_server() -> (TestServer, Storage) {
    let (state, storage) = create_test_state();
    let app = public_routes().with_state(state);
    (TestServer::new(app).unwrap(), storage)
}

/// Extracts the code from a `shortened_url` value.
pub fn code_of(shortened_url: &str) -> String {
    shortened_url
        .strip_prefix(&format!("{ROOT_URI}/"))
        .expect("shortened_url must start with the root URI")
        .to_string()
}
