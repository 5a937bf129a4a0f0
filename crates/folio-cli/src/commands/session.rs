use folio_application::FeedbackStore;
use folio_core::session::LoginKind;

pub fn login(store: &mut FeedbackStore, username: &str, kind: LoginKind) -> bool {
    let username = username.trim();
    store.login(username, kind);
    store
        .view()
        .is_some_and(|view| view.current_user() == Some(username))
}

pub fn logout(store: &mut FeedbackStore) -> bool {
    store.logout();
    store.view().is_some_and(|view| view.current_user().is_none())
}

pub fn whoami(store: &FeedbackStore) -> bool {
    match store.view().and_then(|view| view.current_user()) {
        Some(user) => {
            println!("{user}");
            true
        }
        None => {
            println!("Not logged in");
            false
        }
    }
}
