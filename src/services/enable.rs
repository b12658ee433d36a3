use crate::domain::types::{EnableAction, EntityKind};
use crate::repository::EnableWriter;

use super::{ServiceError, ServiceResult, map_repository_error};

/// Confirmation returned after a successful enable/disable transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableConfirmation {
    pub message: String,
    pub enable: bool,
}

/// Apply an enable/disable transition to one entity.
///
/// The wire token has already been decoded into [`EnableAction`] at the
/// boundary; an unknown token never reaches this function. Exactly one row
/// is updated; a zero-row update means the entity does not exist.
pub fn set_enabled<R>(
    kind: EntityKind,
    id: i32,
    action: EnableAction,
    repo: &R,
) -> ServiceResult<EnableConfirmation>
where
    R: EnableWriter,
{
    if id < 1 {
        return Err(ServiceError::Validation("ID must be greater than 0.".into()));
    }

    match repo.set_enabled(kind, id, action.as_bool()) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(EnableConfirmation {
            message: format!("{kind} {id} has been {}.", action.past_tense()),
            enable: action.as_bool(),
        }),
        Err(e) => Err(map_repository_error("change the enable value", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;
    use crate::domain::types::{ProductDescription, ProductId, ProductName};
    use crate::repository::ProductReader;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_product(id: i32) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new("Desk").unwrap(),
            description: ProductDescription::new("Oak desk").unwrap(),
            enable: true,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn disables_an_existing_product() {
        let repo = TestRepository::new().with_products(vec![sample_product(1)]);

        let confirmation =
            set_enabled(EntityKind::Product, 1, EnableAction::Disable, &repo).unwrap();
        assert_eq!(confirmation.message, "Product 1 has been disabled.");
        assert!(!confirmation.enable);

        let product = repo
            .get_product_by_id(ProductId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert!(!product.enable);
    }

    #[test]
    fn missing_entity_is_not_found() {
        let repo = TestRepository::new();
        let err = set_enabled(EntityKind::Category, 9, EnableAction::Enable, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn non_positive_id_is_a_client_error() {
        let repo = TestRepository::new();
        let err = set_enabled(EntityKind::Image, 0, EnableAction::Enable, &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
