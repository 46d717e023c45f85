//! Error conversion glue between the layers.
//!
//! The domain layer must not depend on service or repository error types, but
//! consumers built with only the `data` feature still need the repository
//! conversion, so the server-side impls are gated separately.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::categories::CategoryFormError;
    use crate::forms::location::LocationReportFormError;
    use crate::forms::menu::MenuItemFormError;
    use crate::forms::places::PlaceFormError;
    use crate::forms::reviews::AddReviewFormError;
    use crate::forms::uploads::UploadPhotoFormError;
    use crate::services::ServiceError;
    use crate::storage::StorageError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<AddReviewFormError> for ServiceError {
        fn from(val: AddReviewFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<PlaceFormError> for ServiceError {
        fn from(val: PlaceFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<CategoryFormError> for ServiceError {
        fn from(val: CategoryFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<MenuItemFormError> for ServiceError {
        fn from(val: MenuItemFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<LocationReportFormError> for ServiceError {
        fn from(val: LocationReportFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UploadPhotoFormError> for ServiceError {
        fn from(val: UploadPhotoFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<StorageError> for ServiceError {
        fn from(val: StorageError) -> Self {
            match val {
                StorageError::UnsupportedContentType(_) => ServiceError::Form(val.to_string()),
                StorageError::InvalidKey(_) | StorageError::Io(_) => ServiceError::Internal,
            }
        }
    }
}
