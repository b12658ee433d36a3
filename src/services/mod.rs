//! Business logic, one module per resource.
//!
//! Service functions are generic over the repository traits so that unit
//! tests can run against the in-memory [`crate::repository::test::TestRepository`].

pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod enable;
pub mod errors;
pub mod images;
pub mod products;

use crate::domain::types::TypeConstraintError;
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Translate a repository failure, logging persistence errors with the
/// supplied operation context. Referential validation failures surface as
/// client errors; everything else is internal.
pub(crate) fn map_repository_error(operation: &str, err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Validation(message) => ServiceError::Validation(message),
        err => {
            log::error!("Failed to {operation}: {err}");
            ServiceError::Internal
        }
    }
}

/// Decode the `size`/`page` listing parameters shared by all collection
/// endpoints. A non-positive page size is a client error.
pub(crate) fn pagination_params(
    page: Option<usize>,
    size: Option<i64>,
) -> ServiceResult<Pagination> {
    let per_page = match size {
        Some(size) if size < 1 => {
            return Err(ServiceError::Validation(
                "Page size must be greater than 0.".into(),
            ));
        }
        Some(size) => size as usize,
        None => crate::pagination::DEFAULT_ITEMS_PER_PAGE,
    };

    Ok(Pagination::new(page.unwrap_or(1), per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pagination_is_ten_per_page() {
        let pagination = pagination_params(None, None).unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 10);
    }

    #[test]
    fn rejects_non_positive_page_size() {
        let err = pagination_params(None, Some(0)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
