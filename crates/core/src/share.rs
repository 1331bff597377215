//! Public share links for saved cards.

use crate::types::ShareId;

/// Generate a fresh, non-guessable share id.
pub fn new_share_id() -> ShareId {
    uuid::Uuid::new_v4()
}

/// Public preview URL handed to NFC writes and the clipboard.
pub fn share_url(public_base_url: &str, share_id: ShareId) -> String {
    format!("{}/card/{share_id}", public_base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_url_joins_without_double_slash() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            share_url("https://onlycard.app/", id),
            "https://onlycard.app/card/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            share_url("http://localhost:3000", id),
            "http://localhost:3000/card/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn share_ids_are_unique_v4() {
        let a = new_share_id();
        let b = new_share_id();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }
}
