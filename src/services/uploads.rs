use crate::domain::types::PhotoUrl;
use crate::session::SessionContext;
use crate::storage::{ObjectStore, StorageError, ensure_image, object_key};

use super::{ServiceError, ServiceResult};

/// Stores an uploaded image under a random key and returns its public URL.
pub fn upload_photo<S>(
    content_type: Option<&str>,
    file_name: Option<&str>,
    bytes: &[u8],
    session: &SessionContext,
    store: &S,
) -> ServiceResult<PhotoUrl>
where
    S: ObjectStore + ?Sized,
{
    ensure_image(content_type).map_err(|e| ServiceError::Form(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ServiceError::Form("Uploaded file is empty".to_string()));
    }

    let key = object_key(file_name);
    match store.put(&key, bytes) {
        Ok(()) => {}
        Err(StorageError::InvalidKey(key)) => {
            log::error!("Generated an invalid object key {key}");
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to store upload of {}: {e}", session.user_id);
            return Err(ServiceError::Internal);
        }
    }

    PhotoUrl::new(store.public_url(&key)).map_err(|e| {
        log::error!("Storage produced an invalid public url: {e}");
        ServiceError::Internal
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::types::UserId;
    use crate::session::AuthenticatedUser;

    #[derive(Default)]
    struct MemoryStore {
        objects: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl ObjectStore for MemoryStore {
        fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
            self.objects
                .borrow_mut()
                .push((key.to_string(), bytes.to_vec()));
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://cdn.example.com/images/{key}")
        }
    }

    fn session() -> SessionContext {
        let user = AuthenticatedUser {
            user_id: UserId::new("u1").unwrap(),
            email: None,
            expires_at: i64::MAX,
        };
        SessionContext::new(&user, None)
    }

    #[test]
    fn stores_image_and_returns_url() {
        let store = MemoryStore::default();

        let url = upload_photo(Some("image/jpeg"), Some("me.jpg"), b"jpeg", &session(), &store)
            .unwrap();

        let objects = store.objects.borrow();
        assert_eq!(objects.len(), 1);
        assert!(objects[0].0.ends_with(".jpg"));
        assert!(url.as_str().ends_with(&objects[0].0));
    }

    #[test]
    fn rejects_non_images_and_empty_files() {
        let store = MemoryStore::default();

        assert!(matches!(
            upload_photo(Some("text/plain"), None, b"hi", &session(), &store),
            Err(ServiceError::Form(_))
        ));
        assert!(matches!(
            upload_photo(Some("image/png"), None, b"", &session(), &store),
            Err(ServiceError::Form(_))
        ));
        assert!(store.objects.borrow().is_empty());
    }
}
